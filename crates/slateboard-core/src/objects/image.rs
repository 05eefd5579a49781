//! Image object for embedded raster images.

use super::ObjectId;
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Image format for stored image data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageFormat {
    /// PNG format.
    Png,
    /// JPEG format.
    Jpeg,
    /// WebP format.
    WebP,
}

impl ImageFormat {
    /// Detect the format from the payload's magic bytes.
    fn detect(data: &[u8]) -> Option<Self> {
        match data {
            [0x89, b'P', b'N', b'G', ..] => Some(ImageFormat::Png),
            [0xFF, 0xD8, 0xFF, ..] => Some(ImageFormat::Jpeg),
            [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'E', b'B', b'P', ..] => {
                Some(ImageFormat::WebP)
            }
            _ => None,
        }
    }
}

/// An embedded raster image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Image {
    pub(crate) id: ObjectId,
    /// Top-left corner position.
    pub position: Point,
    /// Display width.
    pub width: f64,
    /// Display height.
    pub height: f64,
    /// Original image width in pixels.
    pub source_width: u32,
    /// Original image height in pixels.
    pub source_height: u32,
    /// Image format.
    pub format: ImageFormat,
    /// Image data as a base64-encoded string, so the document stays
    /// plain-JSON serializable.
    pub data_base64: String,
}

impl Image {
    /// Create a new image object from raw image bytes.
    pub fn new(
        position: Point,
        data: &[u8],
        source_width: u32,
        source_height: u32,
        format: ImageFormat,
    ) -> Self {
        use base64::{Engine, engine::general_purpose::STANDARD};

        Self {
            id: Uuid::new_v4(),
            position,
            width: source_width as f64,
            height: source_height as f64,
            source_width,
            source_height,
            format,
            data_base64: STANDARD.encode(data),
        }
    }

    /// Create an image object from raw bytes, detecting the format from the
    /// payload. Returns None when the bytes are not a supported image.
    pub fn from_bytes(
        position: Point,
        data: &[u8],
        source_width: u32,
        source_height: u32,
    ) -> Option<Self> {
        let format = ImageFormat::detect(data)?;
        Some(Self::new(position, data, source_width, source_height, format))
    }

    /// Set specific display dimensions.
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Decode the raw image bytes.
    pub fn data(&self) -> Result<Vec<u8>, base64::DecodeError> {
        use base64::{Engine, engine::general_purpose::STANDARD};
        STANDARD.decode(&self.data_base64)
    }

    /// Bounding box in world coordinates.
    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.position.x,
            self.position.y,
            self.position.x + self.width,
            self.position.y + self.height,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_bytes_detects_format() {
        let png = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
        let image = Image::from_bytes(Point::ZERO, &png, 4, 4).unwrap();
        assert_eq!(image.format, ImageFormat::Png);

        let jpeg = [0xFF, 0xD8, 0xFF, 0xE0];
        let image = Image::from_bytes(Point::ZERO, &jpeg, 4, 4).unwrap();
        assert_eq!(image.format, ImageFormat::Jpeg);

        let webp = *b"RIFF\x00\x00\x00\x00WEBP";
        let image = Image::from_bytes(Point::ZERO, &webp, 4, 4).unwrap();
        assert_eq!(image.format, ImageFormat::WebP);

        // Unknown or truncated payloads are refused
        assert!(Image::from_bytes(Point::ZERO, &[0x00, 0x01], 4, 4).is_none());
        assert!(Image::from_bytes(Point::ZERO, b"RIFF", 4, 4).is_none());
    }

    #[test]
    fn test_image_data_round_trip() {
        let data = [1u8, 2, 3, 4, 5];
        let image = Image::new(Point::ZERO, &data, 2, 2, ImageFormat::Png);
        assert_eq!(image.data().unwrap(), data);
    }

    #[test]
    fn test_image_bounds_use_display_size() {
        let image =
            Image::new(Point::new(10.0, 10.0), &[], 100, 50, ImageFormat::Jpeg).with_size(20.0, 10.0);
        assert_eq!(image.bounds(), Rect::new(10.0, 10.0, 30.0, 20.0));
    }
}
