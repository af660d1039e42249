//! Image decoding with format detection, limits, and timeout support.

use image::{DynamicImage, GenericImageView, ImageFormat};
use std::io::Cursor;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

use crate::config::LimitsConfig;
use crate::error::FingerprintError;

/// Image decoder with configurable limits and timeout.
#[derive(Debug, Clone)]
pub struct ImageDecoder {
    limits: LimitsConfig,
}

/// Result of decoding an image.
pub struct DecodedImage {
    /// The decoded image data
    pub image: DynamicImage,
    /// Format detected from the content
    pub format: ImageFormat,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
}

impl ImageDecoder {
    /// Create a new decoder with the given limits.
    pub fn new(limits: LimitsConfig) -> Self {
        Self { limits }
    }

    /// Decode an in-memory image off the async executor.
    ///
    /// `name` is only used for error context.
    pub async fn decode(
        &self,
        bytes: Arc<[u8]>,
        name: &str,
    ) -> Result<DecodedImage, FingerprintError> {
        let max_bytes = self.limits.max_file_size_mb.saturating_mul(1024 * 1024);
        if bytes.len() as u64 > max_bytes {
            return Err(FingerprintError::FileTooLarge {
                name: name.to_string(),
                size_mb: bytes.len() as u64 / (1024 * 1024),
                max_mb: self.limits.max_file_size_mb,
            });
        }

        let name_owned = name.to_string();
        let timeout_duration = Duration::from_millis(self.limits.decode_timeout_ms);

        let decode_result = timeout(timeout_duration, async {
            tokio::task::spawn_blocking(move || Self::decode_sync(&bytes, &name_owned)).await
        })
        .await;

        match decode_result {
            Ok(Ok(Ok(decoded))) => {
                if decoded.width > self.limits.max_image_dimension
                    || decoded.height > self.limits.max_image_dimension
                {
                    return Err(FingerprintError::ImageTooLarge {
                        name: name.to_string(),
                        width: decoded.width,
                        height: decoded.height,
                        max_dim: self.limits.max_image_dimension,
                    });
                }
                Ok(decoded)
            }
            Ok(Ok(Err(e))) => Err(e),
            Ok(Err(e)) => Err(FingerprintError::Decode {
                name: name.to_string(),
                message: format!("Task join error: {}", e),
            }),
            Err(_) => Err(FingerprintError::Timeout {
                name: name.to_string(),
                timeout_ms: self.limits.decode_timeout_ms,
            }),
        }
    }

    /// Synchronous decode (runs in spawn_blocking).
    pub(crate) fn decode_sync(bytes: &[u8], name: &str) -> Result<DecodedImage, FingerprintError> {
        let reader = image::ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|e| FingerprintError::Decode {
                name: name.to_string(),
                message: format!("Cannot detect image format: {}", e),
            })?;
        let format = reader.format().ok_or_else(|| FingerprintError::Decode {
            name: name.to_string(),
            message: "Unrecognized image format".to_string(),
        })?;
        let image = reader.decode().map_err(|e| FingerprintError::Decode {
            name: name.to_string(),
            message: e.to_string(),
        })?;

        let (width, height) = image.dimensions();
        Ok(DecodedImage {
            image,
            format,
            width,
            height,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbImage::from_pixel(width, height, Rgb([200, 40, 40]));
        let mut out = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(img)
            .write_to(&mut out, ImageFormat::Png)
            .unwrap();
        out.into_inner()
    }

    #[test]
    fn test_format_detected_by_content() {
        let decoded = ImageDecoder::decode_sync(&png_bytes(8, 4), "photo.jpg").unwrap();
        assert_eq!(decoded.format, ImageFormat::Png);
        assert_eq!((decoded.width, decoded.height), (8, 4));
    }

    #[test]
    fn test_garbage_is_decode_error() {
        let err = ImageDecoder::decode_sync(b"not an image at all", "junk.png").err().unwrap();
        assert!(matches!(err, FingerprintError::Decode { .. }));
        assert!(err.to_string().contains("junk.png"));
    }

    #[tokio::test]
    async fn test_decode_async() {
        let decoder = ImageDecoder::new(LimitsConfig::default());
        let decoded = decoder.decode(png_bytes(16, 16).into(), "a.png").await.unwrap();
        assert_eq!(decoded.width, 16);
    }

    #[tokio::test]
    async fn test_huge_size_limit_saturates() {
        let limits = LimitsConfig {
            max_file_size_mb: u64::MAX / 1024,
            ..LimitsConfig::default()
        };
        let decoder = ImageDecoder::new(limits);
        let decoded = decoder.decode(png_bytes(4, 4).into(), "tiny.png").await.unwrap();
        assert_eq!((decoded.width, decoded.height), (4, 4));
    }

    #[tokio::test]
    async fn test_file_size_limit() {
        let limits = LimitsConfig {
            max_file_size_mb: 1,
            ..LimitsConfig::default()
        };
        let decoder = ImageDecoder::new(limits);
        let oversized = vec![0u8; 1024 * 1024 + 1];
        let err = decoder.decode(oversized.into(), "big.png").await.err().unwrap();
        assert!(matches!(err, FingerprintError::FileTooLarge { max_mb: 1, .. }));
    }

    #[tokio::test]
    async fn test_dimension_limit() {
        let limits = LimitsConfig {
            max_image_dimension: 10,
            ..LimitsConfig::default()
        };
        let decoder = ImageDecoder::new(limits);
        let err = decoder.decode(png_bytes(20, 5).into(), "wide.png").await.err().unwrap();
        assert!(matches!(
            err,
            FingerprintError::ImageTooLarge {
                width: 20,
                max_dim: 10,
                ..
            }
        ));
    }
}
