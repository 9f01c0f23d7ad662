//! Photo evidence attached to compliance and competitive reports.
//!
//! Images are only inspected, never decoded in full: the header tells us the
//! format and dimensions, which is enough to reject non-images. Geotags come
//! from form fields next to each image.

use std::io::Cursor;

use image::{ImageFormat, ImageReader};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::Timestamp;

/// Largest width or height accepted for an evidence photo.
pub const MAX_IMAGE_DIMENSION: u32 = 12_000;

/// Header-level facts about an uploaded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageInfo {
    pub format: ImageFormat,
    pub width: u32,
    pub height: u32,
}

impl ImageInfo {
    pub fn content_type(&self) -> &'static str {
        match self.format {
            ImageFormat::Png => "image/png",
            ImageFormat::WebP => "image/webp",
            _ => "image/jpeg",
        }
    }
}

/// Identify an uploaded image from its header.
///
/// Accepts PNG, JPEG and WebP with non-zero dimensions up to
/// [`MAX_IMAGE_DIMENSION`].
pub fn inspect_image(filename: &str, bytes: &[u8]) -> Result<ImageInfo, CoreError> {
    let invalid = || CoreError::validation(format!("Invalid file data for '{filename}'"));

    if bytes.is_empty() {
        return Err(invalid());
    }

    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|_| invalid())?;
    let format = match reader.format() {
        Some(f @ (ImageFormat::Png | ImageFormat::Jpeg | ImageFormat::WebP)) => f,
        _ => {
            return Err(CoreError::validation(format!(
                "Image '{filename}' must be a PNG, JPEG or WebP file."
            )))
        }
    };
    let (width, height) = reader.into_dimensions().map_err(|_| invalid())?;

    if width == 0 || height == 0 || width > MAX_IMAGE_DIMENSION || height > MAX_IMAGE_DIMENSION {
        return Err(CoreError::validation(format!(
            "Image '{filename}' has unsupported dimensions {width}x{height}."
        )));
    }

    Ok(ImageInfo {
        format,
        width,
        height,
    })
}

/// Where and when a photo was taken.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoTag {
    pub latitude: f64,
    pub longitude: f64,
    pub captured_at: Option<Timestamp>,
}

impl GeoTag {
    /// Parse raw form values. Latitude must be within ±90, longitude within
    /// ±180; `captured_at` is RFC 3339.
    pub fn parse(
        filename: &str,
        latitude: Option<&str>,
        longitude: Option<&str>,
        captured_at: Option<&str>,
    ) -> Result<Self, CoreError> {
        let missing = || {
            CoreError::validation(format!(
                "Image '{filename}' must contain GPS geotag information."
            ))
        };
        let latitude = parse_coordinate(latitude).ok_or_else(missing)?;
        let longitude = parse_coordinate(longitude).ok_or_else(missing)?;

        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(CoreError::validation(format!(
                "Image '{filename}' has out-of-range coordinates ({latitude}, {longitude})."
            )));
        }

        let captured_at = match captured_at.map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => Some(
                chrono::DateTime::parse_from_rfc3339(raw)
                    .map_err(|_| {
                        CoreError::validation(format!(
                            "Image '{filename}' has an invalid capture timestamp '{raw}'."
                        ))
                    })?
                    .with_timezone(&chrono::Utc),
            ),
            None => None,
        };

        Ok(Self {
            latitude,
            longitude,
            captured_at,
        })
    }

    /// Fails unless the capture time is present.
    pub fn require_capture_time(&self, filename: &str) -> Result<Timestamp, CoreError> {
        self.captured_at.ok_or_else(|| {
            CoreError::validation(format!(
                "Image '{filename}' must contain capture date and timestamp."
            ))
        })
    }
}

fn parse_coordinate(raw: Option<&str>) -> Option<f64> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

/// A stored evidence photo, as persisted in a report's `images` column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceImage {
    pub url: String,
    pub latitude: f64,
    pub longitude: f64,
    pub captured_at: Option<Timestamp>,
}

/// Object key for a stored photo: `<unix millis>-<sanitized filename>`.
///
/// Directory components are dropped and anything other than ASCII
/// alphanumerics, `.`, `-` and `_` becomes `_`.
pub fn storage_key(filename: &str, unix_millis: i64) -> String {
    let base = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim_start_matches('.');
    let sanitized: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let name = if sanitized.is_empty() {
        "image"
    } else {
        sanitized.as_str()
    };
    format!("{unix_millis}-{name}")
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = image::RgbImage::new(width, height);
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn png_header_is_recognised() {
        let info = inspect_image("board.png", &png_bytes(4, 3)).unwrap();
        assert_eq!(info.format, ImageFormat::Png);
        assert_eq!((info.width, info.height), (4, 3));
        assert_eq!(info.content_type(), "image/png");
    }

    #[test]
    fn non_image_bytes_are_rejected() {
        assert_matches!(
            inspect_image("notes.txt", b"just some text"),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn empty_upload_is_rejected() {
        assert_matches!(
            inspect_image("empty.jpg", &[]),
            Err(CoreError::Validation(msg)) if msg.contains("empty.jpg")
        );
    }

    #[test]
    fn geotag_parses_coordinates_and_timestamp() {
        let tag = GeoTag::parse(
            "a.jpg",
            Some("6.5244"),
            Some(" 3.3792 "),
            Some("2025-03-01T10:15:00+01:00"),
        )
        .unwrap();
        assert_eq!(tag.latitude, 6.5244);
        assert_eq!(tag.longitude, 3.3792);
        assert_eq!(
            tag.captured_at.unwrap().to_rfc3339(),
            "2025-03-01T09:15:00+00:00"
        );
    }

    #[test]
    fn geotag_requires_both_coordinates() {
        assert_matches!(
            GeoTag::parse("a.jpg", Some("6.5"), None, None),
            Err(CoreError::Validation(msg)) if msg.contains("GPS geotag")
        );
    }

    #[test]
    fn geotag_rejects_out_of_range() {
        assert!(GeoTag::parse("a.jpg", Some("91"), Some("0"), None).is_err());
        assert!(GeoTag::parse("a.jpg", Some("0"), Some("-181"), None).is_err());
        assert!(GeoTag::parse("a.jpg", Some("NaN"), Some("0"), None).is_err());
    }

    #[test]
    fn geotag_rejects_bad_timestamp() {
        assert!(GeoTag::parse("a.jpg", Some("1"), Some("1"), Some("yesterday")).is_err());
    }

    #[test]
    fn capture_time_can_be_required() {
        let tag = GeoTag::parse("a.jpg", Some("1"), Some("1"), None).unwrap();
        assert_matches!(tag.require_capture_time("a.jpg"), Err(CoreError::Validation(_)));
    }

    #[test]
    fn storage_key_sanitizes_filename() {
        assert_eq!(storage_key("IMG 001.JPG", 1700), "1700-IMG_001.JPG");
        assert_eq!(storage_key("../../etc/passwd", 5), "5-passwd");
        assert_eq!(storage_key("C:\\photos\\ok.png", 5), "5-ok.png");
        assert_eq!(storage_key("", 9), "9-image");
        assert_eq!(storage_key(".hidden", 9), "9-hidden");
    }
}
