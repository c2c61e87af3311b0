//! Border parameters shared by every item in one batch.

use crate::common::errors::BuildError;
use image::Rgba;
use serde::{Deserialize, Serialize};

/// The color/width pair applied uniformly to one archive build.
///
/// A `BorderSpec` is snapshotted by value when a build starts and passed
/// into every transform task, so edits made while a build is in flight are
/// never observable inside that build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BorderSpec {
    /// CSS-style hex color, `#RRGGBB` or the `#RGB` shorthand.
    pub color_hex: String,
    /// Border band thickness in pixels. Zero is legal and leaves the
    /// image dimensions untouched.
    pub width_px: u32,
}

impl Default for BorderSpec {
    fn default() -> Self {
        Self {
            color_hex: "#000000".to_owned(),
            width_px: 5,
        }
    }
}

impl BorderSpec {
    pub fn new(color_hex: impl Into<String>, width_px: u32) -> Self {
        Self {
            color_hex: color_hex.into(),
            width_px,
        }
    }

    /// Parse `color_hex` into an opaque RGBA pixel.
    ///
    /// Rejection happens here, at input validation, so the raster
    /// transform never sees a malformed color.
    pub fn color(&self) -> Result<Rgba<u8>, BuildError> {
        parse_hex_color(&self.color_hex)
            .ok_or_else(|| BuildError::InvalidSpec(format!("bad hex color: {}", self.color_hex)))
    }
}

fn parse_hex_color(hex: &str) -> Option<Rgba<u8>> {
    let digits = hex.strip_prefix('#')?;
    let (r, g, b) = match digits.len() {
        3 => {
            let mut chars = digits.chars();
            let r = chars.next()?.to_digit(16)? as u8;
            let g = chars.next()?.to_digit(16)? as u8;
            let b = chars.next()?.to_digit(16)? as u8;
            (r * 17, g * 17, b * 17)
        }
        6 => (
            u8::from_str_radix(&digits[0..2], 16).ok()?,
            u8::from_str_radix(&digits[2..4], 16).ok()?,
            u8::from_str_radix(&digits[4..6], 16).ok()?,
        ),
        _ => return None,
    };
    Some(Rgba([r, g, b, 255]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_hex() {
        let spec = BorderSpec::new("#1a2B3c", 5);
        assert_eq!(spec.color().unwrap(), Rgba([0x1a, 0x2b, 0x3c, 255]));
    }

    #[test]
    fn parses_shorthand_hex() {
        let spec = BorderSpec::new("#f0a", 1);
        assert_eq!(spec.color().unwrap(), Rgba([0xff, 0x00, 0xaa, 255]));
    }

    #[test]
    fn default_matches_ui_defaults() {
        let spec = BorderSpec::default();
        assert_eq!(spec.color_hex, "#000000");
        assert_eq!(spec.width_px, 5);
        assert_eq!(spec.color().unwrap(), Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn rejects_malformed_colors() {
        for bad in ["000000", "#zz0000", "#12345", "", "#"] {
            let spec = BorderSpec::new(bad, 5);
            assert!(spec.color().is_err(), "expected rejection for {bad:?}");
        }
    }
}
