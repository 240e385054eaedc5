//! MS-Numpress lossy compression of double arrays
//!
//! Three algorithms from the MS-Numpress family, byte-compatible with the
//! reference implementation used by mzML writers:
//!
//! - [`encode_linear`]/[`decode_linear`]: fixed-point values predicted from the
//!   two previous values; residuals stored with half-byte integer coding.
//!   Suited to m/z and retention time arrays.
//! - [`encode_pic`]/[`decode_pic`]: values rounded to non-negative integers,
//!   half-byte coded. Suited to ion counts.
//! - [`encode_slof`]/[`decode_slof`]: `ln(x + 1)` in 16-bit fixed point.
//!   Suited to intensities.
//!
//! Linear and slof payloads start with the fixed point as an 8-byte big-endian
//! IEEE double. The codecs know nothing about base64 or zlib; the peak decoder
//! and encoder wrap them.

mod halfbyte;
mod linear;
mod pic;
mod slof;

#[cfg(test)]
mod tests;

pub use linear::{decode_linear, encode_linear, optimal_linear_fixed_point};
pub use pic::{decode_pic, encode_pic};
pub use slof::{decode_slof, encode_slof, optimal_slof_fixed_point};

use crate::descriptor::NumpressScheme;

/// Errors reported by the numpress codecs
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NumpressError {
    /// Input ended early or carries an impossible header
    #[error("corrupt input data: {0}")]
    Corrupt(&'static str),

    /// A value cannot be represented by the scheme
    #[error("value out of range: {0}")]
    Overflow(&'static str),
}

/// Encode with the given scheme, picking the fixed point automatically unless
/// one is supplied (pic has no fixed point and ignores it)
pub fn encode(
    scheme: NumpressScheme,
    data: &[f64],
    fixed_point: Option<f64>,
) -> Result<Vec<u8>, NumpressError> {
    match scheme {
        NumpressScheme::Linear => {
            let fp = fixed_point.unwrap_or_else(|| optimal_linear_fixed_point(data));
            encode_linear(data, fp)
        }
        NumpressScheme::Pic => encode_pic(data),
        NumpressScheme::Slof => {
            let fp = fixed_point.unwrap_or_else(|| optimal_slof_fixed_point(data));
            encode_slof(data, fp)
        }
    }
}

/// Decode a payload of the given scheme
pub fn decode(scheme: NumpressScheme, data: &[u8]) -> Result<Vec<f64>, NumpressError> {
    match scheme {
        NumpressScheme::Linear => decode_linear(data),
        NumpressScheme::Pic => decode_pic(data),
        NumpressScheme::Slof => decode_slof(data),
    }
}

pub(crate) fn encode_fixed_point(fixed_point: f64, out: &mut Vec<u8>) {
    out.extend_from_slice(&fixed_point.to_be_bytes());
}

pub(crate) fn valid_fixed_point(fixed_point: f64) -> bool {
    fixed_point.is_finite() && fixed_point > 0.0
}

pub(crate) fn decode_fixed_point(data: &[u8]) -> Result<f64, NumpressError> {
    let header: [u8; 8] = data
        .get(..8)
        .and_then(|bytes| bytes.try_into().ok())
        .ok_or(NumpressError::Corrupt("not enough bytes to read fixed point"))?;
    let fixed_point = f64::from_be_bytes(header);
    if !valid_fixed_point(fixed_point) {
        return Err(NumpressError::Corrupt("fixed point is not a positive number"));
    }
    Ok(fixed_point)
}
