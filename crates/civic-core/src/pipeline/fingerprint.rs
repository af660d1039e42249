//! Average-luminance perceptual fingerprints.
//!
//! An image is resampled to a small fixed grid, each cell is reduced to its
//! luminance, and every cell contributes one bit: set when the cell is at least
//! as bright as the grid mean. Re-compression and resampling noise move only a
//! few cells across the mean, so near-identical photos land a small Hamming
//! distance apart.

use image::imageops::FilterType;
use image::{DynamicImage, Rgb, RgbImage};
use std::borrow::Cow;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::config::{DetectionConfig, LimitsConfig};
use crate::error::{CompareError, FingerprintError};

use super::decode::ImageDecoder;

/// Fixed-length bit sequence summarizing an image's coarse appearance.
///
/// Bits are stored in raster order, packed most-significant-bit first, so the
/// hex form reads left to right in the same order as the grid.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint {
    bits: usize,
    bytes: Vec<u8>,
}

impl Fingerprint {
    /// Pack a sequence of bits. Trailing bits of the last byte are zero.
    pub fn from_bits<I: IntoIterator<Item = bool>>(bits: I) -> Self {
        let mut bytes = Vec::new();
        let mut len = 0usize;
        for bit in bits {
            if len % 8 == 0 {
                bytes.push(0);
            }
            if bit {
                if let Some(last) = bytes.last_mut() {
                    *last |= 0x80 >> (len % 8);
                }
            }
            len += 1;
        }
        Self { bits: len, bytes }
    }

    /// Parse the hex form produced by [`Fingerprint::to_hex`].
    pub fn from_hex(hex_str: &str) -> Result<Self, CompareError> {
        let bytes = hex::decode(hex_str.trim())
            .map_err(|e| CompareError::Malformed(format!("{e} in {hex_str:?}")))?;
        if bytes.is_empty() {
            return Err(CompareError::Malformed("empty fingerprint".to_string()));
        }
        Ok(Self {
            bits: bytes.len() * 8,
            bytes,
        })
    }

    /// Lowercase hex encoding, two characters per byte.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.bytes)
    }

    /// Number of bits in the fingerprint.
    pub fn len_bits(&self) -> usize {
        self.bits
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Value of the bit at `index` in raster order.
    pub fn bit(&self, index: usize) -> Option<bool> {
        if index >= self.bits {
            return None;
        }
        Some(self.bytes[index / 8] & (0x80 >> (index % 8)) != 0)
    }

    /// Packed bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Fingerprint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Fingerprint {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Fingerprint::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// Perceptual luminance of an RGB pixel, scaled by 1000 to stay integral.
fn luminance(pixel: &Rgb<u8>) -> u64 {
    let [r, g, b] = pixel.0;
    299 * u64::from(r) + 587 * u64::from(g) + 114 * u64::from(b)
}

/// Composite an image with transparency over black.
///
/// Fully transparent pixels count as black whatever colour they hide, and
/// partial alpha scales the colour down.
fn flatten_alpha(image: &DynamicImage) -> Cow<'_, DynamicImage> {
    if !image.color().has_alpha() {
        return Cow::Borrowed(image);
    }
    let rgba = image.to_rgba8();
    let flat = RgbImage::from_fn(rgba.width(), rgba.height(), |x, y| {
        let [r, g, b, a] = rgba.get_pixel(x, y).0;
        let scale = |c: u8| ((u16::from(c) * u16::from(a) + 127) / 255) as u8;
        Rgb([scale(r), scale(g), scale(b)])
    });
    Cow::Owned(DynamicImage::ImageRgb8(flat))
}

/// Produces fingerprints on a fixed grid.
///
/// Every fingerprint from one generator has the same bit length, which is what
/// keeps comparisons within a draft meaningful.
#[derive(Debug, Clone)]
pub struct FingerprintGenerator {
    grid_width: u32,
    grid_height: u32,
    decoder: ImageDecoder,
}

impl FingerprintGenerator {
    /// Create a generator for the configured grid and decode limits.
    pub fn new(detection: &DetectionConfig, limits: LimitsConfig) -> Self {
        Self {
            grid_width: detection.grid_width,
            grid_height: detection.grid_height,
            decoder: ImageDecoder::new(limits),
        }
    }

    /// Bit length of every fingerprint this generator produces.
    pub fn fingerprint_bits(&self) -> usize {
        self.grid_width as usize * self.grid_height as usize
    }

    /// Fingerprint an already-decoded image.
    pub fn fingerprint_image(&self, image: &DynamicImage) -> Fingerprint {
        let grid = flatten_alpha(image)
            .resize_exact(self.grid_width, self.grid_height, FilterType::Triangle)
            .to_rgb8();

        let cells: Vec<u64> = grid.pixels().map(luminance).collect();
        let total: u64 = cells.iter().sum();
        let count = cells.len() as u64;

        // cell >= total / count, without rounding the mean
        Fingerprint::from_bits(cells.iter().map(|&cell| cell * count >= total))
    }

    /// Decode raw image bytes and fingerprint them.
    ///
    /// `name` is used for error context only.
    pub async fn generate(
        &self,
        bytes: Arc<[u8]>,
        name: &str,
    ) -> Result<Fingerprint, FingerprintError> {
        let start = std::time::Instant::now();
        let decoded = self.decoder.decode(bytes, name).await?;
        let fingerprint = self.fingerprint_image(&decoded.image);
        tracing::trace!(
            "Fingerprinted {} ({}x{}) in {:?}",
            name,
            decoded.width,
            decoded.height,
            start.elapsed()
        );
        Ok(fingerprint)
    }

    /// Read an image file and fingerprint it.
    pub async fn generate_from_path(&self, path: &Path) -> Result<Fingerprint, FingerprintError> {
        let name = path.display().to_string();
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| FingerprintError::Io {
                name: name.clone(),
                source,
            })?;
        self.generate(bytes.into(), &name).await
    }
}

impl Default for FingerprintGenerator {
    fn default() -> Self {
        Self::new(&DetectionConfig::default(), LimitsConfig::default())
    }
}
