//! Binary data array descriptors
//!
//! A [`BinaryDataInfo`] captures everything the codec needs to know about one
//! encoded array: how many values it holds, how long the base64 payload is,
//! which precision and compression produced it, and what quantity it stores.
//! It is built by the surrounding XML parser from the array's cvParams and
//! lives for a single decode call.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cv_params::{CvParam, MS_CV_ACCESSIONS as CV};
use crate::error::{CodecError, Result};

/// Quantity stored in an array; selects the combo integer codec and scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArrayKind {
    /// m/z values (CV: MS:1000514)
    Mz,
    /// Intensity values (CV: MS:1000515)
    Intensity,
    /// Retention/scan time values (CV: MS:1000595)
    Time,
}

impl ArrayKind {
    /// Determine array kind from CV accession
    pub fn from_cv_accession(accession: &str) -> Option<Self> {
        match accession {
            CV::MZ_ARRAY => Some(ArrayKind::Mz),
            CV::INTENSITY_ARRAY => Some(ArrayKind::Intensity),
            CV::TIME_ARRAY => Some(ArrayKind::Time),
            _ => None,
        }
    }
}

/// Binary encoding precision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BitWidth {
    /// 32-bit floating point (CV: MS:1000521)
    Float32,
    /// 32-bit signed integer (CV: MS:1000519)
    Int32,
    /// 64-bit floating point (CV: MS:1000523)
    Float64,
    /// 64-bit signed integer (CV: MS:1000522)
    Int64,
}

impl BitWidth {
    /// Determine precision from CV accession
    pub fn from_cv_accession(accession: &str) -> Option<Self> {
        match accession {
            CV::FLOAT_32_BIT => Some(BitWidth::Float32),
            CV::INTEGER_32_BIT => Some(BitWidth::Int32),
            CV::FLOAT_64_BIT => Some(BitWidth::Float64),
            CV::INTEGER_64_BIT => Some(BitWidth::Int64),
            _ => None,
        }
    }

    /// CV accession for this precision
    pub fn accession(&self) -> &'static str {
        match self {
            BitWidth::Float32 => CV::FLOAT_32_BIT,
            BitWidth::Int32 => CV::INTEGER_32_BIT,
            BitWidth::Float64 => CV::FLOAT_64_BIT,
            BitWidth::Int64 => CV::INTEGER_64_BIT,
        }
    }

    /// Get the byte size per value
    pub fn byte_size(&self) -> usize {
        match self {
            BitWidth::Float32 | BitWidth::Int32 => 4,
            BitWidth::Float64 | BitWidth::Int64 => 8,
        }
    }
}

/// The three MS-Numpress algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NumpressScheme {
    /// Linear prediction, suited to monotonic m/z and time arrays
    Linear,
    /// Positive integer, suited to ion counts
    Pic,
    /// Short logged float, suited to intensities
    Slof,
}

/// How a binary array was compressed
///
/// Each variant fixes the full byte pipeline between the base64 text and the
/// numeric values:
///
/// | Variant | Pipeline |
/// |---|---|
/// | `None` | little-endian values of the declared [`BitWidth`] |
/// | `Zlib` | zlib stream of little-endian values |
/// | `Numpress(s)` | numpress byte stream of scheme `s` (no bit width) |
/// | `NumpressZlib(s)` | zlib stream wrapping a numpress byte stream |
/// | `AirdCombo` | zstd frame of a var-byte integer stream (no bit width, no zlib) |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CompressionKind {
    /// No compression (raw binary)
    #[default]
    None,
    /// zlib compression (most common)
    Zlib,
    /// MS-Numpress
    Numpress(NumpressScheme),
    /// MS-Numpress followed by zlib
    NumpressZlib(NumpressScheme),
    /// Aird combo compression
    AirdCombo,
}

impl CompressionKind {
    /// Every compression kind known to the accession table
    pub const ALL: [CompressionKind; 9] = [
        CompressionKind::AirdCombo,
        CompressionKind::Numpress(NumpressScheme::Linear),
        CompressionKind::Numpress(NumpressScheme::Pic),
        CompressionKind::Numpress(NumpressScheme::Slof),
        CompressionKind::Zlib,
        CompressionKind::None,
        CompressionKind::NumpressZlib(NumpressScheme::Linear),
        CompressionKind::NumpressZlib(NumpressScheme::Pic),
        CompressionKind::NumpressZlib(NumpressScheme::Slof),
    ];

    /// Determine compression type from CV accession
    pub fn from_cv_accession(accession: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.accession() == accession)
    }

    /// Whether `accession` names a compression type
    pub fn is_compression_accession(accession: &str) -> bool {
        Self::from_cv_accession(accession).is_some()
    }

    /// CV accession of this compression type
    pub fn accession(&self) -> &'static str {
        use NumpressScheme::*;
        match self {
            CompressionKind::None => CV::NO_COMPRESSION,
            CompressionKind::Zlib => CV::ZLIB_COMPRESSION,
            CompressionKind::Numpress(Linear) => CV::NUMPRESS_LINEAR,
            CompressionKind::Numpress(Pic) => CV::NUMPRESS_PIC,
            CompressionKind::Numpress(Slof) => CV::NUMPRESS_SLOF,
            CompressionKind::NumpressZlib(Linear) => CV::NUMPRESS_LINEAR_ZLIB,
            CompressionKind::NumpressZlib(Pic) => CV::NUMPRESS_PIC_ZLIB,
            CompressionKind::NumpressZlib(Slof) => CV::NUMPRESS_SLOF_ZLIB,
            CompressionKind::AirdCombo => CV::AIRD_COMBO_COMPRESSION,
        }
    }

    /// CV term name of this compression type
    pub fn name(&self) -> &'static str {
        use NumpressScheme::*;
        match self {
            CompressionKind::None => "no compression",
            CompressionKind::Zlib => "zlib compression",
            CompressionKind::Numpress(Linear) => "MS-Numpress linear prediction compression",
            CompressionKind::Numpress(Pic) => "MS-Numpress positive integer compression",
            CompressionKind::Numpress(Slof) => "MS-Numpress short logged float compression",
            CompressionKind::NumpressZlib(Linear) => {
                "MS-Numpress linear prediction compression followed by zlib compression"
            }
            CompressionKind::NumpressZlib(Pic) => {
                "MS-Numpress positive integer compression followed by zlib compression"
            }
            CompressionKind::NumpressZlib(Slof) => {
                "MS-Numpress short logged float compression followed by zlib compression"
            }
            CompressionKind::AirdCombo => "aird combo compression",
        }
    }

    /// The payload is a zlib stream
    pub fn is_zlib_compressed(&self) -> bool {
        matches!(self, CompressionKind::Zlib | CompressionKind::NumpressZlib(_))
    }

    /// The numpress scheme, if any
    pub fn numpress_scheme(&self) -> Option<NumpressScheme> {
        match self {
            CompressionKind::Numpress(scheme) | CompressionKind::NumpressZlib(scheme) => {
                Some(*scheme)
            }
            _ => None,
        }
    }

    /// The payload is numpress encoded (with or without zlib)
    pub fn is_numpress(&self) -> bool {
        self.numpress_scheme().is_some()
    }

    /// The payload uses Aird combo compression
    pub fn is_combo(&self) -> bool {
        matches!(self, CompressionKind::AirdCombo)
    }

    /// Whether decoding needs a declared [`BitWidth`]
    pub fn requires_bit_width(&self) -> bool {
        matches!(self, CompressionKind::None | CompressionKind::Zlib)
    }
}

impl fmt::Display for CompressionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for CompressionKind {
    type Err = CodecError;

    fn from_str(accession: &str) -> Result<Self> {
        Self::from_cv_accession(accession).ok_or_else(|| {
            CodecError::UnrecognizedEncodingKind(format!(
                "unknown compression accession {accession}"
            ))
        })
    }
}

/// Meta-information about one encoded binary data array
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinaryDataInfo {
    compression: CompressionKind,
    bit_width: Option<BitWidth>,
    array_kind: Option<ArrayKind>,
    encoded_length: usize,
    array_length: usize,
    source_position: usize,
}

impl BinaryDataInfo {
    /// Describe an array of `array_length` values whose base64 text is
    /// `encoded_length` bytes long
    pub fn new(compression: CompressionKind, encoded_length: usize, array_length: usize) -> Self {
        Self {
            compression,
            bit_width: None,
            array_kind: None,
            encoded_length,
            array_length,
            source_position: 0,
        }
    }

    /// Set the value precision
    pub fn with_bit_width(mut self, bit_width: BitWidth) -> Self {
        self.bit_width = Some(bit_width);
        self
    }

    /// Set the stored quantity
    pub fn with_array_kind(mut self, array_kind: ArrayKind) -> Self {
        self.array_kind = Some(array_kind);
        self
    }

    /// Set the byte offset of the base64 payload inside its source region
    pub fn with_source_position(mut self, position: usize) -> Self {
        self.source_position = position;
        self
    }

    /// Resolve a descriptor from the cvParams of a `<binaryDataArray>`
    ///
    /// Accessions unrelated to encoding are skipped. A missing compression
    /// term, or two different compression or precision terms, is rejected.
    pub fn from_cv_params(
        params: &[CvParam],
        encoded_length: usize,
        array_length: usize,
    ) -> Result<Self> {
        let mut compression = None;
        let mut bit_width = None;
        let mut array_kind = None;

        for param in params {
            let accession = param.accession.as_str();
            if let Some(found) = CompressionKind::from_cv_accession(accession) {
                set_once(&mut compression, found, "compression")?;
            } else if let Some(found) = BitWidth::from_cv_accession(accession) {
                set_once(&mut bit_width, found, "bit width")?;
            } else if let Some(found) = ArrayKind::from_cv_accession(accession) {
                set_once(&mut array_kind, found, "array kind")?;
            }
        }

        let compression = compression.ok_or_else(|| {
            CodecError::UnrecognizedEncodingKind("no compression accession present".to_string())
        })?;
        if compression.requires_bit_width() && bit_width.is_none() {
            return Err(CodecError::UnrecognizedEncodingKind(format!(
                "no precision accession present for {compression}"
            )));
        }

        Ok(Self {
            compression,
            bit_width,
            array_kind,
            encoded_length,
            array_length,
            source_position: 0,
        })
    }

    /// Compression that produced the payload
    pub fn compression(&self) -> CompressionKind {
        self.compression
    }

    /// Value precision, if declared
    pub fn bit_width(&self) -> Option<BitWidth> {
        self.bit_width
    }

    /// Stored quantity, if declared
    pub fn array_kind(&self) -> Option<ArrayKind> {
        self.array_kind
    }

    /// Length in bytes of the base64 payload; zero means an empty array
    pub fn encoded_length(&self) -> usize {
        self.encoded_length
    }

    /// Number of values in the array
    pub fn array_length(&self) -> usize {
        self.array_length
    }

    /// Byte offset of the base64 payload inside its source region
    pub fn source_position(&self) -> usize {
        self.source_position
    }
}

fn set_once<T: PartialEq + fmt::Debug>(slot: &mut Option<T>, value: T, what: &str) -> Result<()> {
    match slot {
        Some(existing) if *existing != value => Err(CodecError::UnrecognizedEncodingKind(format!(
            "conflicting {what} terms: {existing:?} and {value:?}"
        ))),
        _ => {
            *slot = Some(value);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accession_table_is_bijective() {
        for kind in CompressionKind::ALL {
            assert_eq!(CompressionKind::from_cv_accession(kind.accession()), Some(kind));
        }
    }

    #[test]
    fn test_unknown_accession_rejected() {
        assert_eq!(CompressionKind::from_cv_accession("MS:1000521"), None);
        assert!(!CompressionKind::is_compression_accession("MS:9999999"));
        assert!(matches!(
            "MS:9999999".parse::<CompressionKind>(),
            Err(CodecError::UnrecognizedEncodingKind(_))
        ));
    }

    #[test]
    fn test_predicates() {
        let linear_zlib = CompressionKind::NumpressZlib(NumpressScheme::Linear);
        assert!(linear_zlib.is_zlib_compressed());
        assert!(linear_zlib.is_numpress());
        assert!(!linear_zlib.is_combo());

        assert!(CompressionKind::AirdCombo.is_combo());
        assert!(!CompressionKind::AirdCombo.is_zlib_compressed());
        assert!(!CompressionKind::AirdCombo.is_numpress());

        assert!(CompressionKind::Zlib.requires_bit_width());
        assert!(!CompressionKind::Numpress(NumpressScheme::Pic).requires_bit_width());
    }

    #[test]
    fn test_from_cv_params() {
        let params = vec![
            CvParam::ms(CV::FLOAT_64_BIT, "64-bit float"),
            CvParam::ms(CV::ZLIB_COMPRESSION, "zlib compression"),
            CvParam::ms(CV::MZ_ARRAY, "m/z array"),
            CvParam::ms("MS:1000127", "centroid spectrum"),
        ];

        let info = BinaryDataInfo::from_cv_params(&params, 120, 10).unwrap();
        assert_eq!(info.compression(), CompressionKind::Zlib);
        assert_eq!(info.bit_width(), Some(BitWidth::Float64));
        assert_eq!(info.array_kind(), Some(ArrayKind::Mz));
        assert_eq!(info.encoded_length(), 120);
        assert_eq!(info.array_length(), 10);
    }

    #[test]
    fn test_from_cv_params_conflicting_compression() {
        let params = vec![
            CvParam::ms(CV::ZLIB_COMPRESSION, "zlib compression"),
            CvParam::ms(CV::NO_COMPRESSION, "no compression"),
        ];

        let err = BinaryDataInfo::from_cv_params(&params, 8, 1).unwrap_err();
        assert!(matches!(err, CodecError::UnrecognizedEncodingKind(_)));
    }

    #[test]
    fn test_from_cv_params_missing_compression() {
        let params = vec![CvParam::ms(CV::FLOAT_32_BIT, "32-bit float")];
        assert!(BinaryDataInfo::from_cv_params(&params, 8, 2).is_err());
    }

    #[test]
    fn test_from_cv_params_missing_bit_width() {
        let params = vec![CvParam::ms(CV::ZLIB_COMPRESSION, "zlib compression")];
        let err = BinaryDataInfo::from_cv_params(&params, 8, 1).unwrap_err();
        assert!(matches!(err, CodecError::UnrecognizedEncodingKind(_)));

        // numpress and combo carry their own layout
        let params = vec![CvParam::ms(CV::NUMPRESS_SLOF, "MS-Numpress short logged float compression")];
        let info = BinaryDataInfo::from_cv_params(&params, 8, 1).unwrap();
        assert_eq!(info.bit_width(), None);
    }

    #[test]
    fn test_byte_size() {
        assert_eq!(BitWidth::Float32.byte_size(), 4);
        assert_eq!(BitWidth::Int32.byte_size(), 4);
        assert_eq!(BitWidth::Float64.byte_size(), 8);
        assert_eq!(BitWidth::Int64.byte_size(), 8);
    }
}
