//! Multipart form collection.
//!
//! Forms mix text fields, the `site_list` spreadsheet, and evidence photos.
//! Each `images` part may be followed by `latitude`, `longitude` and
//! `captured_at` fields, which belong to that photo.

use axum::extract::Multipart;

use crate::error::{AppError, AppResult};

/// Form field name for evidence photos.
pub const IMAGE_FIELD: &str = "images";

const GEOTAG_FIELDS: [&str; 3] = ["latitude", "longitude", "captured_at"];

/// One raw multipart part.
#[derive(Debug, Clone, PartialEq)]
pub enum Part {
    Text { name: String, value: String },
    File {
        name: String,
        filename: String,
        bytes: Vec<u8>,
    },
}

/// A photo with the geotag fields that followed it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UploadedImage {
    pub filename: String,
    pub bytes: Vec<u8>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub captured_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormData {
    /// Text fields in arrival order. Names may repeat.
    pub fields: Vec<(String, String)>,
    /// Non-image file parts as `(field name, filename, bytes)`.
    pub files: Vec<(String, String, Vec<u8>)>,
    pub images: Vec<UploadedImage>,
}

impl FormData {
    /// Last value of a text field, trimmed; blank counts as absent.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .rev()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.trim())
            .filter(|v| !v.is_empty())
    }

    /// Take ownership of the first file uploaded under `name`.
    pub fn take_file(&mut self, name: &str) -> Option<(String, Vec<u8>)> {
        let index = self.files.iter().position(|(n, _, _)| n == name)?;
        let (_, filename, bytes) = self.files.swap_remove(index);
        Some((filename, bytes))
    }
}

/// Sort parts into text fields, files and geotagged images.
///
/// Geotag fields before the first image are kept as plain text fields.
pub fn group_parts(parts: Vec<Part>) -> FormData {
    let mut form = FormData::default();

    for part in parts {
        match part {
            Part::File {
                name,
                filename,
                bytes,
            } if name == IMAGE_FIELD => form.images.push(UploadedImage {
                filename,
                bytes,
                ..UploadedImage::default()
            }),
            Part::File {
                name,
                filename,
                bytes,
            } => form.files.push((name, filename, bytes)),
            Part::Text { name, value } => {
                let geotag = GEOTAG_FIELDS.contains(&name.as_str());
                match form.images.last_mut() {
                    Some(image) if geotag => {
                        let slot = match name.as_str() {
                            "latitude" => &mut image.latitude,
                            "longitude" => &mut image.longitude,
                            _ => &mut image.captured_at,
                        };
                        *slot = Some(value);
                    }
                    _ => form.fields.push((name, value)),
                }
            }
        }
    }

    form
}

/// Drain a multipart request into [`FormData`].
pub async fn read_form(mut multipart: Multipart) -> AppResult<FormData> {
    let mut parts = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        let filename = field.file_name().map(str::to_string);

        match filename {
            Some(filename) => {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Failed to read upload: {e}")))?;
                parts.push(Part::File {
                    name,
                    filename,
                    bytes: bytes.to_vec(),
                });
            }
            None => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Invalid field '{name}': {e}")))?;
                parts.push(Part::Text { name, value });
            }
        }
    }

    Ok(group_parts(parts))
}
