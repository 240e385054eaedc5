//! # mzbinary - mzML binary data array codecs
//!
//! `mzbinary` decodes and encodes the `<binaryDataArray>` payloads of mzML
//! files: the Base64 text that carries m/z, intensity and retention time
//! arrays, optionally wrapped in zlib, MS-Numpress or Aird combo compression.
//!
//! ## Key Features
//!
//! - **Every mzML encoding**: uncompressed, zlib, MS-Numpress linear/pic/slof
//!   (alone or zlib-wrapped) and Aird combo (quantized integers, var-byte,
//!   zstd). The encoding is selected from the array's cvParams.
//!
//! - **Buffer reuse**: [`decoder::PeakDecoder::decode_into`] writes into a
//!   caller-owned vector that is cleared first, so one allocation serves a
//!   whole run.
//!
//! - **Windowed decoding**: decode a payload in place inside a larger byte
//!   region (for example a memory-mapped file) from its offset and length.
//!
//! - **f32 or f64 output**: every decode is generic over [`value::PeakValue`].
//!
//! ## Quick Start
//!
//! ```rust
//! use mzbinary::prelude::*;
//!
//! let params = vec![
//!     CvParam::ms(MS_CV_ACCESSIONS::FLOAT_64_BIT, "64-bit float"),
//!     CvParam::ms(MS_CV_ACCESSIONS::ZLIB_COMPRESSION, "zlib compression"),
//!     CvParam::ms(MS_CV_ACCESSIONS::MZ_ARRAY, "m/z array"),
//! ];
//!
//! let encoder = PeakEncoder::default();
//! let text = encoder.encode_to_string(
//!     &[100.0f64, 200.0, 300.0],
//!     CompressionKind::Zlib,
//!     BitWidth::Float64,
//! )?;
//!
//! let info = BinaryDataInfo::from_cv_params(&params, text.len(), 3)?;
//! let mz: Vec<f64> = PeakDecoder::default().decode_str(&text, &info)?;
//! assert_eq!(mz, vec![100.0, 200.0, 300.0]);
//! # Ok::<(), mzbinary::error::CodecError>(())
//! ```
//!
//! ## Architecture
//!
//! - [`descriptor`]: compression kinds, bit widths, array kinds and the
//!   per-array [`descriptor::BinaryDataInfo`]
//! - [`cv_params`]: HUPO-PSI MS accessions for binary data arrays
//! - [`decoder`] / [`encoder`]: the Base64 pipeline in both directions
//! - [`numpress`]: MS-Numpress linear, pic and slof
//! - [`combo`] and [`quantize`]: Aird combo compression
//! - [`compress`]: zlib and zstd byte compressors
//! - [`batch`]: decoding many arrays, optionally with rayon
//! - [`config`]: TOML codec settings

// Documentation lints - enforce complete documentation for publication
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod batch;
pub mod combo;
pub mod compress;
pub mod config;
pub mod cv_params;
pub mod decoder;
pub mod descriptor;
pub mod encoder;
pub mod error;
pub mod numpress;
pub mod quantize;
pub mod value;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::batch::{decode_batch, decode_batch_lossy, BatchStats, EncodedArray};
    pub use crate::combo::ComboCodec;
    pub use crate::compress::{ByteCodec, Zlib, Zstd};
    pub use crate::config::{CodecConfig, ConfigError, ConfigFile};
    pub use crate::cv_params::{CvParam, MS_CV_ACCESSIONS};
    pub use crate::decoder::PeakDecoder;
    pub use crate::descriptor::{
        ArrayKind, BinaryDataInfo, BitWidth, CompressionKind, NumpressScheme,
    };
    pub use crate::encoder::PeakEncoder;
    pub use crate::error::{CodecError, Result};
    pub use crate::value::PeakValue;
}
