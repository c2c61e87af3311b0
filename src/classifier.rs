//! Routing of media items onto transform strategies.

use crate::models::media::MediaKind;

/// The transform strategy chosen for one item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Synchronous in-process raster transform.
    Raster,
    /// Asynchronous round trip to the remote border service.
    Remote,
    /// Excluded from the batch; reported, never fatal.
    Skip,
}

/// Pure, total mapping from declared kind to strategy. Every kind value
/// has exactly one route; the match is exhaustive so a new `MediaKind`
/// variant fails to compile until it is routed here.
pub fn classify(kind: MediaKind) -> Route {
    match kind {
        MediaKind::Image => Route::Raster,
        MediaKind::Video => Route::Remote,
        MediaKind::Unsupported => Route::Skip,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_has_one_route() {
        assert_eq!(classify(MediaKind::Image), Route::Raster);
        assert_eq!(classify(MediaKind::Video), Route::Remote);
        assert_eq!(classify(MediaKind::Unsupported), Route::Skip);
    }

    #[test]
    fn mime_strings_route_end_to_end() {
        assert_eq!(classify(MediaKind::from_mime("image/jpeg")), Route::Raster);
        assert_eq!(classify(MediaKind::from_mime("video/webm")), Route::Remote);
        assert_eq!(classify(MediaKind::from_mime("text/plain")), Route::Skip);
    }
}
