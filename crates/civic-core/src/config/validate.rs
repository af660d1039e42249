//! Range checks run after parsing.

use crate::error::ConfigError;

use super::{Config, DetectionConfig};

fn invalid(message: impl Into<String>) -> ConfigError {
    ConfigError::ValidationError(message.into())
}

/// Reject a zero value for a count, size, or timeout setting.
fn nonzero(key: &str, value: u64) -> Result<(), ConfigError> {
    if value == 0 {
        return Err(invalid(format!("{key} must be > 0")));
    }
    Ok(())
}

impl DetectionConfig {
    /// The grid must be non-empty and byte-aligned so fingerprints have a
    /// stable hex form, and the threshold cannot exceed the bit count.
    fn check(&self) -> Result<(), ConfigError> {
        if self.grid_width == 0 || self.grid_height == 0 {
            return Err(invalid(
                "detection.grid_width and detection.grid_height must be > 0",
            ));
        }
        let bits = self.fingerprint_bits();
        if bits % 8 != 0 {
            return Err(invalid(format!(
                "detection.grid_width * detection.grid_height must be a multiple of 8 (got {bits})"
            )));
        }
        if self.similarity_threshold as usize > bits {
            return Err(invalid(format!(
                "detection.similarity_threshold must be <= fingerprint size ({bits} bits)"
            )));
        }
        Ok(())
    }
}

impl Config {
    /// Validate every section, reporting the first offending key.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        self.detection.check()?;

        nonzero("limits.max_file_size_mb", self.limits.max_file_size_mb)?;
        nonzero(
            "limits.max_image_dimension",
            u64::from(self.limits.max_image_dimension),
        )?;
        nonzero("limits.decode_timeout_ms", self.limits.decode_timeout_ms)?;
        nonzero("store.timeout_ms", self.store.timeout_ms)?;

        if self.store.table.trim().is_empty() {
            return Err(invalid("store.table must not be empty"));
        }
        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(invalid("logging.format must be \"pretty\" or \"json\""));
        }
        Ok(())
    }
}
