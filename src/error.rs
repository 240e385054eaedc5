//! Error types for the binary data codecs

use crate::descriptor::CompressionKind;
use crate::numpress::NumpressError;

/// Errors that can occur while decoding or encoding a binary data array
///
/// Every variant is local to the single array being processed. A caller
/// handling many scans should log the failure and move on to the next array
/// (see [`crate::batch`]).
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// Unknown accession, unknown or missing bit width, or conflicting CV terms
    #[error("Unrecognized encoding: {0}")]
    UnrecognizedEncodingKind(String),

    /// A numpress decoder rejected its input
    #[error("{scheme} decoder failed: {reason}")]
    NumericDecodeFailed {
        /// The numpress flavour that failed
        scheme: CompressionKind,
        /// Decoder diagnostic
        reason: NumpressError,
    },

    /// A numpress encoder could not represent a value
    #[error("{scheme} encoder failed: {reason}")]
    NumericEncodeFailed {
        /// The numpress flavour that failed
        scheme: CompressionKind,
        /// Encoder diagnostic
        reason: NumpressError,
    },

    /// The payload ended before the declared number of points was read
    #[error(
        "Payload ended after {available} of {expected} values. \
         Please make sure the scan/chromatogram passes the filter predicate"
    )]
    TruncatedPayload {
        /// Declared number of points
        expected: usize,
        /// Number of complete values present in the payload
        available: usize,
    },

    /// The scheme only accepts 64-bit input
    #[error("{0} is only supported for 64-bit float input")]
    UnsupportedPrecisionForScheme(CompressionKind),

    /// zlib or zstd stream is structurally invalid
    #[error("Compression format error: {0}")]
    CompressionFormatError(String),

    /// Invalid base64 text
    #[error("Base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),

    /// The declared payload window does not fit inside the source region
    #[error("Payload window {position}+{length} exceeds source of {available} bytes")]
    SourceWindowOutOfBounds {
        /// Byte offset of the payload
        position: usize,
        /// Declared payload length
        length: usize,
        /// Size of the source region
        available: usize,
    },

    /// Paired arrays passed to the combo encoder differ in length
    #[error("Paired arrays differ in length: {left} vs {right}")]
    ArrayLengthMismatch {
        /// Length of the first (m/z or time) array
        left: usize,
        /// Length of the intensity array
        right: usize,
    },

    /// Combo compression encodes paired arrays and cannot go through the generic encoder
    #[error("aird combo compression must be encoded through ComboCodec")]
    ComboRequiresPairedArrays,
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, CodecError>;
