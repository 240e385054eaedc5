//! Binary data encoding for mzML
//!
//! The inverse of [`crate::decoder`]: numbers → optional MS-Numpress →
//! optional zlib → Base64 text ready for a `<binary>` element.
//!
//! Aird combo compression encodes m/z (or time) and intensity together and
//! goes through [`crate::combo::ComboCodec`] instead.

use base64::prelude::*;
use log::debug;

use crate::compress::{ByteCodec, Zlib};
use crate::config::CodecConfig;
use crate::descriptor::{BitWidth, CompressionKind, NumpressScheme};
use crate::error::{CodecError, Result};
use crate::numpress;
use crate::value::PeakValue;

/// Encoder for mzML binary data arrays
pub struct PeakEncoder {
    deflater: Box<dyn ByteCodec>,
    linear_fixed_point: Option<f64>,
    slof_fixed_point: Option<f64>,
}

impl std::fmt::Debug for PeakEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PeakEncoder")
            .field("deflater", &self.deflater.name())
            .field("linear_fixed_point", &self.linear_fixed_point)
            .field("slof_fixed_point", &self.slof_fixed_point)
            .finish()
    }
}

impl Default for PeakEncoder {
    fn default() -> Self {
        Self::new(&CodecConfig::default())
    }
}

impl PeakEncoder {
    /// Create an encoder from codec settings
    pub fn new(config: &CodecConfig) -> Self {
        Self {
            deflater: Box::new(Zlib::new(config.zlib_level)),
            linear_fixed_point: config.linear_fixed_point,
            slof_fixed_point: config.slof_fixed_point,
        }
    }

    /// Replace the zlib backend used for zlib-wrapped payloads
    pub fn with_deflater(mut self, deflater: Box<dyn ByteCodec>) -> Self {
        self.deflater = deflater;
        self
    }

    /// Encode `values` into Base64 bytes
    ///
    /// `bit_width` selects the stored precision for uncompressed and zlib
    /// arrays and is ignored by numpress, which fixes its own layout.
    /// Numpress only accepts `f64` input.
    pub fn encode<T: PeakValue>(
        &self,
        values: &[T],
        compression: CompressionKind,
        bit_width: BitWidth,
    ) -> Result<Vec<u8>> {
        Ok(self.encode_to_string(values, compression, bit_width)?.into_bytes())
    }

    /// [`PeakEncoder::encode`] returning text
    pub fn encode_to_string<T: PeakValue>(
        &self,
        values: &[T],
        compression: CompressionKind,
        bit_width: BitWidth,
    ) -> Result<String> {
        let encoded = match compression {
            CompressionKind::AirdCombo => return Err(CodecError::ComboRequiresPairedArrays),
            CompressionKind::Numpress(scheme) | CompressionKind::NumpressZlib(scheme) => {
                if !T::IS_DOUBLE {
                    return Err(CodecError::UnsupportedPrecisionForScheme(compression));
                }
                self.encode_numpress(values, scheme, compression)?
            }
            CompressionKind::None | CompressionKind::Zlib => write_values(values, bit_width),
        };

        let payload = if compression.is_zlib_compressed() {
            self.deflater.compress(&encoded)?
        } else {
            encoded
        };

        debug!(
            "Encoded {} values as {} ({} bytes before base64)",
            values.len(),
            compression,
            payload.len()
        );
        Ok(BASE64_STANDARD.encode(payload))
    }

    fn encode_numpress<T: PeakValue>(
        &self,
        values: &[T],
        scheme: NumpressScheme,
        compression: CompressionKind,
    ) -> Result<Vec<u8>> {
        let data: Vec<f64> = values.iter().map(|v| v.to_f64()).collect();
        let fixed_point = match scheme {
            NumpressScheme::Linear => self.linear_fixed_point,
            NumpressScheme::Slof => self.slof_fixed_point,
            NumpressScheme::Pic => None,
        };
        numpress::encode(scheme, &data, fixed_point).map_err(|reason| {
            CodecError::NumericEncodeFailed {
                scheme: compression,
                reason,
            }
        })
    }
}

/// Serialize as little-endian values of the given width
fn write_values<T: PeakValue>(values: &[T], bit_width: BitWidth) -> Vec<u8> {
    let mut out = Vec::with_capacity(values.len() * bit_width.byte_size());
    for value in values {
        match bit_width {
            BitWidth::Float32 => out.extend_from_slice(&value.to_f32().to_le_bytes()),
            BitWidth::Float64 => out.extend_from_slice(&value.to_f64().to_le_bytes()),
            BitWidth::Int32 => out.extend_from_slice(&(value.to_f64().round() as i32).to_le_bytes()),
            BitWidth::Int64 => out.extend_from_slice(&(value.to_f64().round() as i64).to_le_bytes()),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::PeakDecoder;
    use crate::descriptor::BinaryDataInfo;

    fn roundtrip<T: PeakValue>(
        values: &[T],
        compression: CompressionKind,
        bit_width: BitWidth,
    ) -> Vec<T> {
        let text = PeakEncoder::default()
            .encode_to_string(values, compression, bit_width)
            .unwrap();
        let info = BinaryDataInfo::new(compression, text.len(), values.len())
            .with_bit_width(bit_width);
        PeakDecoder::default().decode_str(&text, &info).unwrap()
    }

    #[test]
    fn test_zlib_float64_is_byte_exact() {
        let values: [f64; 4] = [445.120_025_634_765_6, 0.1, -3.25e-7, 1.0e300];
        let decoded = roundtrip(&values, CompressionKind::Zlib, BitWidth::Float64);
        for (a, b) in values.iter().zip(&decoded) {
            assert_eq!(a.to_bits(), b.to_bits());
        }
    }

    #[test]
    fn test_float32_width_rounds_to_float() {
        let values = [100.123_456_789f64, 2.5];
        let decoded = roundtrip(&values, CompressionKind::None, BitWidth::Float32);
        assert_eq!(decoded[0], 100.123_456_789f64 as f32 as f64);
        assert_eq!(decoded[1], 2.5);
    }

    #[test]
    fn test_integer_widths() {
        let values = [1.4f64, 2.5, -2.5];
        assert_eq!(
            roundtrip(&values, CompressionKind::None, BitWidth::Int32),
            vec![1.0, 3.0, -3.0]
        );
        assert_eq!(
            roundtrip(&values, CompressionKind::Zlib, BitWidth::Int64),
            vec![1.0, 3.0, -3.0]
        );
    }

    #[test]
    fn test_numpress_zlib_roundtrip() {
        let values: Vec<f64> = (0..300).map(|i| 200.0 + i as f64 * 0.0421).collect();
        let compression = CompressionKind::NumpressZlib(NumpressScheme::Linear);
        let decoded = roundtrip(&values, compression, BitWidth::Float64);

        assert_eq!(decoded.len(), values.len());
        for (a, b) in values.iter().zip(&decoded) {
            assert!((a - b).abs() < 1e-6);
        }
    }

    #[test]
    fn test_float_input_rejected_for_numpress() {
        let err = PeakEncoder::default()
            .encode(&[1.0f32, 2.0], CompressionKind::Numpress(NumpressScheme::Slof), BitWidth::Float32)
            .unwrap_err();
        assert!(matches!(err, CodecError::UnsupportedPrecisionForScheme(_)));
    }

    #[test]
    fn test_combo_rejected() {
        let err = PeakEncoder::default()
            .encode(&[1.0f64], CompressionKind::AirdCombo, BitWidth::Float64)
            .unwrap_err();
        assert!(matches!(err, CodecError::ComboRequiresPairedArrays));
    }

    #[test]
    fn test_numpress_overflow_surfaces() {
        let err = PeakEncoder::default()
            .encode(&[-10.0f64], CompressionKind::Numpress(NumpressScheme::Pic), BitWidth::Float64)
            .unwrap_err();
        assert!(matches!(err, CodecError::NumericEncodeFailed { .. }));
    }

    #[test]
    fn test_single_value_linear() {
        let compression = CompressionKind::Numpress(NumpressScheme::Linear);
        assert_eq!(roundtrip(&[0.0f64], compression, BitWidth::Float64), vec![0.0]);

        // a negative leading value cannot be stored; nothing undecodable is emitted
        let err = PeakEncoder::default()
            .encode(&[-5.0f64], compression, BitWidth::Float64)
            .unwrap_err();
        assert!(matches!(err, CodecError::NumericEncodeFailed { .. }));
    }

    #[test]
    fn test_configured_fixed_point_is_used() {
        let config = CodecConfig {
            linear_fixed_point: Some(10.0),
            ..CodecConfig::default()
        };
        let text = PeakEncoder::new(&config)
            .encode_to_string(&[1.0f64, 2.0, 3.0], CompressionKind::Numpress(NumpressScheme::Linear), BitWidth::Float64)
            .unwrap();
        let bytes = BASE64_STANDARD.decode(text).unwrap();
        assert_eq!(&bytes[..8], &10.0f64.to_be_bytes());
    }
}
