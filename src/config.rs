//! TOML configuration for the codec
//!
//! Every setting has a default, so an empty file (or no file) is valid:
//!
//! ```toml
//! # mzbinary.toml
//! [codec]
//! zlib_level = 6
//! zstd_level = 3
//! linear_fixed_point = 100000.0
//! reverse_intensity_log_fallback = true
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Errors that can occur while loading a configuration file
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    /// The file is not valid TOML for this schema
    #[error("Failed to parse TOML configuration: {0}")]
    TomlError(#[from] toml::de::Error),
}

/// Root of an `mzbinary.toml` file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Codec settings
    #[serde(default)]
    pub codec: CodecConfig,
}

/// Settings shared by the peak encoder, decoder and combo codec
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// zlib compression level (0-9)
    pub zlib_level: u32,

    /// zstd compression level for combo compression (1-22)
    pub zstd_level: i32,

    /// Fixed point for numpress linear; chosen per array when unset
    pub linear_fixed_point: Option<f64>,

    /// Fixed point for numpress slof; chosen per array when unset
    pub slof_fixed_point: Option<f64>,

    /// Decode combo intensities stored through the log2 overflow fallback
    /// back to their magnitude instead of dividing them by the scale
    pub reverse_intensity_log_fallback: bool,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            zlib_level: 6,
            zstd_level: 3,
            linear_fixed_point: None,
            slof_fixed_point: None,
            reverse_intensity_log_fallback: true,
        }
    }
}

impl CodecConfig {
    /// Load the `[codec]` table of a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse the `[codec]` table of a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(content)?;
        Ok(file.codec)
    }
}
