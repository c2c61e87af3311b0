pub mod border;
pub mod media;
