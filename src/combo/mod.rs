//! Aird combo compression
//!
//! Combo compression stores an array as fixed-point integers (see
//! [`crate::quantize`]), codes those integers with a var-byte scheme chosen by
//! the array kind, and compresses the result with a generic byte compressor
//! (zstd by default):
//!
//! | Array kind | Integer codec | Scale |
//! |---|---|---|
//! | m/z, time | [`IntegratedVarByte`] (delta) | 100000 |
//! | intensity | [`VarByte`] | 10 |
//!
//! Scan encoding drops every point whose intensity is exactly zero, from both
//! arrays. A decoded scan is therefore shorter than its input whenever the
//! input had zero-intensity points; callers must not expect the original
//! length back. Chromatograms keep every point.

mod varbyte;

pub use varbyte::{IntCodec, IntegratedVarByte, VarByte};

use base64::prelude::*;
use log::debug;

use crate::compress::{ByteCodec, Zstd};
use crate::config::CodecConfig;
use crate::descriptor::ArrayKind;
use crate::error::{CodecError, Result};
use crate::quantize::{from_scaled_int, from_scaled_int_linear, to_scaled_int};
use crate::value::PeakValue;

/// Integer codec used for an array kind
pub fn int_codec(kind: ArrayKind) -> &'static dyn IntCodec {
    match kind {
        ArrayKind::Mz | ArrayKind::Time => &IntegratedVarByte,
        ArrayKind::Intensity => &VarByte,
    }
}

/// Two-stage integer + byte compressor
pub struct ComboCodec {
    byte_codec: Box<dyn ByteCodec>,
    reverse_log_fallback: bool,
}

impl Default for ComboCodec {
    fn default() -> Self {
        Self::new(&CodecConfig::default())
    }
}

impl std::fmt::Debug for ComboCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComboCodec")
            .field("byte_codec", &self.byte_codec.name())
            .field("reverse_log_fallback", &self.reverse_log_fallback)
            .finish()
    }
}

impl ComboCodec {
    /// zstd-backed codec configured from `config`
    pub fn new(config: &CodecConfig) -> Self {
        Self {
            byte_codec: Box::new(Zstd::new(config.zstd_level)),
            reverse_log_fallback: config.reverse_intensity_log_fallback,
        }
    }

    /// Replace the second-stage byte compressor
    pub fn with_byte_codec(mut self, byte_codec: Box<dyn ByteCodec>) -> Self {
        self.byte_codec = byte_codec;
        self
    }

    /// Integer-code and compress already quantized values
    pub fn encode_ints(&self, kind: ArrayKind, ints: &[i32]) -> Result<Vec<u8>> {
        let coded = int_codec(kind).encode(ints);
        self.byte_codec.compress(&coded)
    }

    /// Decompress and integer-decode a combo payload
    pub fn decode_ints(&self, kind: ArrayKind, bytes: &[u8]) -> Result<Vec<i32>> {
        let coded = self.byte_codec.decompress(bytes)?;
        int_codec(kind).decode(&coded)
    }

    /// Quantize and compress one array (no zero-intensity filtering, no base64)
    pub fn encode_array<T: PeakValue>(&self, values: &[T], kind: ArrayKind) -> Result<Vec<u8>> {
        let ints: Vec<i32> = values
            .iter()
            .map(|v| to_scaled_int(v.to_f64(), kind))
            .collect();
        self.encode_ints(kind, &ints)
    }

    /// Decode a combo payload (already base64-decoded) into `out`
    ///
    /// `out` is cleared first and receives exactly the number of values the
    /// payload carries; it stays empty on error.
    pub fn decode_into<T: PeakValue>(
        &self,
        bytes: &[u8],
        kind: ArrayKind,
        out: &mut Vec<T>,
    ) -> Result<()> {
        out.clear();
        let ints = self.decode_ints(kind, bytes)?;
        debug!(
            "combo decoded {} {:?} values via {}+{}",
            ints.len(),
            kind,
            int_codec(kind).name(),
            self.byte_codec.name()
        );

        out.reserve(ints.len());
        out.extend(ints.into_iter().map(|q| {
            let value = if self.reverse_log_fallback {
                from_scaled_int(q, kind)
            } else {
                from_scaled_int_linear(q, kind)
            };
            T::from_f64(value)
        }));
        Ok(())
    }

    /// Encode the m/z and intensity arrays of a scan
    ///
    /// Points with zero intensity are dropped from both arrays. Returns the
    /// base64 text of the m/z payload and of the intensity payload; both are
    /// empty when no point survives.
    pub fn encode_scan<M: PeakValue, I: PeakValue>(
        &self,
        mz: &[M],
        intensity: &[I],
    ) -> Result<(String, String)> {
        check_paired(mz.len(), intensity.len())?;

        let (mz_ints, int_ints): (Vec<i32>, Vec<i32>) = mz
            .iter()
            .zip(intensity)
            .filter(|(_, i)| i.to_f64() != 0.0)
            .map(|(m, i)| {
                (
                    to_scaled_int(m.to_f64(), ArrayKind::Mz),
                    to_scaled_int(i.to_f64(), ArrayKind::Intensity),
                )
            })
            .unzip();

        debug!("combo scan keeps {} of {} points", mz_ints.len(), mz.len());
        self.encode_pair(ArrayKind::Mz, &mz_ints, &int_ints)
    }

    /// Encode the time and intensity arrays of a chromatogram
    ///
    /// Every point is kept, including zero intensities.
    pub fn encode_chromatogram<R: PeakValue, I: PeakValue>(
        &self,
        time: &[R],
        intensity: &[I],
    ) -> Result<(String, String)> {
        check_paired(time.len(), intensity.len())?;

        let time_ints: Vec<i32> = time
            .iter()
            .map(|t| to_scaled_int(t.to_f64(), ArrayKind::Time))
            .collect();
        let int_ints: Vec<i32> = intensity
            .iter()
            .map(|i| to_scaled_int(i.to_f64(), ArrayKind::Intensity))
            .collect();

        self.encode_pair(ArrayKind::Time, &time_ints, &int_ints)
    }

    fn encode_pair(
        &self,
        axis: ArrayKind,
        axis_ints: &[i32],
        intensity_ints: &[i32],
    ) -> Result<(String, String)> {
        if axis_ints.is_empty() {
            return Ok((String::new(), String::new()));
        }
        let axis_bytes = self.encode_ints(axis, axis_ints)?;
        let intensity_bytes = self.encode_ints(ArrayKind::Intensity, intensity_ints)?;
        Ok((
            BASE64_STANDARD.encode(axis_bytes),
            BASE64_STANDARD.encode(intensity_bytes),
        ))
    }
}

fn check_paired(left: usize, right: usize) -> Result<()> {
    if left != right {
        return Err(CodecError::ArrayLengthMismatch { left, right });
    }
    Ok(())
}
