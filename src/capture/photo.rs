use base64::{engine::general_purpose::STANDARD, Engine};
use serde::Serialize;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("Failed to read photo {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode photo: {0}")]
    Decode(#[source] image::ImageError),

    #[error("Failed to encode photo: {0}")]
    Encode(#[source] image::ImageError),
}

/// A photo ready to send: JPEG, base64, longest side bounded.
#[derive(Debug, Clone, Serialize)]
pub struct PhotoCapture {
    pub base64_image: String,
    pub width: u32,
    pub height: u32,
    pub timestamp: String,
}

pub fn load_photo(path: &Path, max_dimension: u32) -> Result<PhotoCapture, CaptureError> {
    let bytes = std::fs::read(path).map_err(|source| CaptureError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    encode_photo(&bytes, max_dimension)
}

pub fn encode_photo(bytes: &[u8], max_dimension: u32) -> Result<PhotoCapture, CaptureError> {
    let image = image::load_from_memory(bytes).map_err(CaptureError::Decode)?;
    // JPEG has no alpha channel
    let image = image.to_rgb8();

    let (width, height) = image.dimensions();
    let (new_width, new_height) = bounded_size(width, height, max_dimension);

    let image = if (new_width, new_height) != (width, height) {
        log::debug!("Resizing photo {}x{} -> {}x{}", width, height, new_width, new_height);
        image::imageops::resize(
            &image,
            new_width,
            new_height,
            image::imageops::FilterType::Triangle,
        )
    } else {
        image
    };

    let mut buffer = Cursor::new(Vec::new());
    image::DynamicImage::ImageRgb8(image)
        .write_to(&mut buffer, image::ImageFormat::Jpeg)
        .map_err(CaptureError::Encode)?;

    Ok(PhotoCapture {
        base64_image: STANDARD.encode(buffer.into_inner()),
        width: new_width,
        height: new_height,
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// Scale so the longest side is at most `max_dimension`, keeping aspect ratio.
fn bounded_size(width: u32, height: u32, max_dimension: u32) -> (u32, u32) {
    let longest = width.max(height);
    if max_dimension == 0 || longest <= max_dimension {
        return (width, height);
    }
    let scale = max_dimension as f64 / longest as f64;
    let scaled = |side: u32| ((side as f64 * scale).round() as u32).max(1);
    (scaled(width), scaled(height))
}
