//! Binary data decoding for mzML
//!
//! mzML stores numerical arrays (m/z, intensity, time) as Base64-encoded
//! binary data. This module turns that text back into numbers:
//!
//! 1. An empty payload (`encoded_length == 0`) is an empty array, always
//! 2. Base64 decode the text
//! 3. Aird combo payloads go straight to [`ComboCodec`]
//! 4. Inflate if the compression includes zlib
//! 5. MS-Numpress payloads go to [`crate::numpress`]
//! 6. Anything else is read as little-endian values of the declared bit width

use std::io::Cursor;

use base64::prelude::*;
use byteorder::{LittleEndian, ReadBytesExt};
use log::{debug, warn};

use crate::combo::ComboCodec;
use crate::compress::{ByteCodec, Zlib};
use crate::config::CodecConfig;
use crate::descriptor::{BinaryDataInfo, BitWidth, CompressionKind, NumpressScheme};
use crate::error::{CodecError, Result};
use crate::numpress;
use crate::value::PeakValue;

/// Decoder for mzML binary data arrays
///
/// Holds no per-call state; one decoder can be shared between threads.
pub struct PeakDecoder {
    inflater: Box<dyn ByteCodec>,
    combo: ComboCodec,
}

impl std::fmt::Debug for PeakDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PeakDecoder")
            .field("inflater", &self.inflater.name())
            .field("combo", &self.combo)
            .finish()
    }
}

impl Default for PeakDecoder {
    fn default() -> Self {
        Self::new(&CodecConfig::default())
    }
}

impl PeakDecoder {
    /// Create a decoder from codec settings
    pub fn new(config: &CodecConfig) -> Self {
        Self {
            inflater: Box::new(Zlib::new(config.zlib_level)),
            combo: ComboCodec::new(config),
        }
    }

    /// Replace the zlib backend used for zlib-wrapped payloads
    pub fn with_inflater(mut self, inflater: Box<dyn ByteCodec>) -> Self {
        self.inflater = inflater;
        self
    }

    /// Use a differently configured combo codec
    pub fn with_combo_codec(mut self, combo: ComboCodec) -> Self {
        self.combo = combo;
        self
    }

    /// Decode a Base64 payload into a new vector
    ///
    /// # Arguments
    /// * `encoded` - The Base64 text of the `<binary>` element
    /// * `info` - Descriptor built from the array's cvParams
    pub fn decode<T: PeakValue>(&self, encoded: &[u8], info: &BinaryDataInfo) -> Result<Vec<T>> {
        let mut out = Vec::new();
        self.decode_into(encoded, info, &mut out)?;
        Ok(out)
    }

    /// [`PeakDecoder::decode`] for text input
    pub fn decode_str<T: PeakValue>(&self, encoded: &str, info: &BinaryDataInfo) -> Result<Vec<T>> {
        self.decode(encoded.as_bytes(), info)
    }

    /// Decode a Base64 payload into a caller-provided buffer
    ///
    /// `out` is cleared before anything is written, so stale values from an
    /// earlier call are never returned. Its allocation is reused. On error
    /// `out` is left empty.
    ///
    /// The result holds `info.array_length()` values for raw and zlib arrays.
    /// Numpress and combo payloads carry their own count, which is returned
    /// as is; combo scans are shorter than their source when zero-intensity
    /// points were dropped at encode time.
    pub fn decode_into<T: PeakValue>(
        &self,
        encoded: &[u8],
        info: &BinaryDataInfo,
        out: &mut Vec<T>,
    ) -> Result<()> {
        out.clear();

        // zero length <binary> elements occur, mostly for MS2 scans
        if info.encoded_length() == 0 {
            return Ok(());
        }

        let bytes = decode_base64(encoded)?;
        debug!(
            "Decoding {} payload bytes as {}",
            bytes.len(),
            info.compression()
        );

        match info.compression() {
            CompressionKind::AirdCombo => {
                let kind = info.array_kind().ok_or_else(|| {
                    CodecError::UnrecognizedEncodingKind(
                        "aird combo compression needs an array kind".to_string(),
                    )
                })?;
                self.combo.decode_into(&bytes, kind, out)
            }
            CompressionKind::Numpress(scheme) => self.decode_numpress(scheme, &bytes, info, out),
            CompressionKind::NumpressZlib(scheme) => {
                let inflated = self.inflater.decompress(&bytes)?;
                self.decode_numpress(scheme, &inflated, info, out)
            }
            CompressionKind::None => read_values(&bytes, info, out),
            CompressionKind::Zlib => {
                let inflated = self.inflater.decompress(&bytes)?;
                read_values(&inflated, info, out)
            }
        }
    }

    /// Decode the payload that `info` locates inside a larger byte region
    ///
    /// Only `region[source_position .. source_position + encoded_length]` is
    /// touched.
    pub fn decode_window<T: PeakValue>(
        &self,
        region: &[u8],
        info: &BinaryDataInfo,
        out: &mut Vec<T>,
    ) -> Result<()> {
        out.clear();
        if info.encoded_length() == 0 {
            return Ok(());
        }

        let position = info.source_position();
        let length = info.encoded_length();
        let payload = position
            .checked_add(length)
            .and_then(|end| region.get(position..end))
            .ok_or(CodecError::SourceWindowOutOfBounds {
                position,
                length,
                available: region.len(),
            })?;

        self.decode_into(payload, info, out)
    }

    fn decode_numpress<T: PeakValue>(
        &self,
        scheme: NumpressScheme,
        bytes: &[u8],
        info: &BinaryDataInfo,
        out: &mut Vec<T>,
    ) -> Result<()> {
        let values = numpress::decode(scheme, bytes).map_err(|reason| {
            CodecError::NumericDecodeFailed {
                scheme: info.compression(),
                reason,
            }
        })?;

        if values.len() != info.array_length() {
            warn!(
                "{} payload holds {} values, descriptor declares {}",
                info.compression(),
                values.len(),
                info.array_length()
            );
        }

        out.extend(values.into_iter().map(T::from_f64));
        Ok(())
    }
}

fn decode_base64(text: &[u8]) -> Result<Vec<u8>> {
    // pretty-printed XML may wrap the payload
    if text.iter().any(|b| b.is_ascii_whitespace()) {
        let clean: Vec<u8> = text
            .iter()
            .copied()
            .filter(|b| !b.is_ascii_whitespace())
            .collect();
        return Ok(BASE64_STANDARD.decode(clean)?);
    }
    Ok(BASE64_STANDARD.decode(text)?)
}

/// Read `array_length` little-endian values of the declared bit width
fn read_values<T: PeakValue>(bytes: &[u8], info: &BinaryDataInfo, out: &mut Vec<T>) -> Result<()> {
    let width = info.bit_width().ok_or_else(|| {
        CodecError::UnrecognizedEncodingKind(format!(
            "precision must be 32 or 64 bit when {} is used",
            info.compression()
        ))
    })?;

    let expected = info.array_length();
    out.reserve(expected.min(bytes.len() / width.byte_size()));

    let mut cursor = Cursor::new(bytes);
    for read in 0..expected {
        // an early EOF usually means the scan/chromatogram was filtered out
        // upstream while its descriptor still claims the points
        match read_value(&mut cursor, width) {
            Ok(value) => out.push(value),
            Err(_) => {
                out.clear();
                return Err(CodecError::TruncatedPayload {
                    expected,
                    available: read,
                });
            }
        }
    }

    Ok(())
}

fn read_value<T: PeakValue>(cursor: &mut Cursor<&[u8]>, width: BitWidth) -> std::io::Result<T> {
    Ok(match width {
        BitWidth::Float32 => T::from_f32(cursor.read_f32::<LittleEndian>()?),
        BitWidth::Int32 => T::from_f64(cursor.read_i32::<LittleEndian>()? as f64),
        BitWidth::Float64 => T::from_f64(cursor.read_f64::<LittleEndian>()?),
        BitWidth::Int64 => T::from_f64(cursor.read_i64::<LittleEndian>()? as f64),
    })
}
