//! Generic byte compressors
//!
//! The codec treats its byte compressors as pluggable primitives behind the
//! [`ByteCodec`] trait: zlib wraps raw and numpress payloads, zstd is the
//! second stage of combo compression. Alternative backends only need to
//! implement the trait.

use std::io::Read;

use flate2::read::ZlibDecoder;
use flate2::{Compress, Compression, FlushCompress, Status};

use crate::error::{CodecError, Result};

/// Smallest scratch buffer tried by the zlib compressor
const MIN_DEFLATE_SCRATCH: usize = 64;

/// A byte-to-byte compressor with a matching decompressor
pub trait ByteCodec: Send + Sync {
    /// Short backend name used in log messages
    fn name(&self) -> &'static str;

    /// Compress `data`
    fn compress(&self, data: &[u8]) -> Result<Vec<u8>>;

    /// Reverse [`ByteCodec::compress`]
    fn decompress(&self, data: &[u8]) -> Result<Vec<u8>>;
}

/// zlib (RFC 1950) streams via flate2
#[derive(Debug, Clone, Copy)]
pub struct Zlib {
    level: Compression,
}

impl Zlib {
    /// zlib at the given level (0-9)
    pub fn new(level: u32) -> Self {
        Self {
            level: Compression::new(level.min(9)),
        }
    }
}

impl Default for Zlib {
    fn default() -> Self {
        Self {
            level: Compression::default(),
        }
    }
}

impl ByteCodec for Zlib {
    fn name(&self) -> &'static str {
        "zlib"
    }

    /// Deflate into a scratch buffer that starts at half the input size and
    /// doubles until the whole stream fits with room to spare
    fn compress(&self, data: &[u8]) -> Result<Vec<u8>> {
        let mut capacity = (data.len() / 2).max(MIN_DEFLATE_SCRATCH);
        loop {
            let mut scratch = Vec::with_capacity(capacity);
            let mut deflater = Compress::new(self.level, true);
            let status = deflater
                .compress_vec(data, &mut scratch, FlushCompress::Finish)
                .map_err(|e| CodecError::CompressionFormatError(e.to_string()))?;

            if status == Status::StreamEnd && scratch.len() < scratch.capacity() {
                scratch.shrink_to_fit();
                return Ok(scratch);
            }
            capacity = scratch.capacity() * 2;
        }
    }

    fn decompress(&self, data: &[u8]) -> Result<Vec<u8>> {
        let mut decoder = ZlibDecoder::new(data);
        // 2.5x limits the number of reallocations for typical peak arrays
        let mut uncompressed = Vec::with_capacity(data.len() * 5 / 2);
        decoder
            .read_to_end(&mut uncompressed)
            .map_err(|e| CodecError::CompressionFormatError(format!("zlib: {e}")))?;
        Ok(uncompressed)
    }
}

/// Zstandard frames via the zstd crate
#[derive(Debug, Clone, Copy)]
pub struct Zstd {
    level: i32,
}

impl Zstd {
    /// zstd at the given level (1-22, 0 selects the library default)
    pub fn new(level: i32) -> Self {
        Self { level }
    }
}

impl Default for Zstd {
    fn default() -> Self {
        Self::new(3)
    }
}

impl ByteCodec for Zstd {
    fn name(&self) -> &'static str {
        "zstd"
    }

    fn compress(&self, data: &[u8]) -> Result<Vec<u8>> {
        zstd::encode_all(data, self.level)
            .map_err(|e| CodecError::CompressionFormatError(format!("zstd: {e}")))
    }

    fn decompress(&self, data: &[u8]) -> Result<Vec<u8>> {
        zstd::decode_all(data)
            .map_err(|e| CodecError::CompressionFormatError(format!("zstd: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zlib_roundtrip() {
        let data: Vec<u8> = (0..10_000u32).flat_map(|i| (i as f64).to_le_bytes()).collect();
        let codec = Zlib::default();

        let compressed = codec.compress(&data).unwrap();
        assert!(compressed.len() < data.len());
        assert_eq!(codec.decompress(&compressed).unwrap(), data);
    }

    #[test]
    fn test_zlib_grows_scratch_for_incompressible_input() {
        // pseudo-random bytes deflate to more than half their size
        let mut state = 0x2545_f491u32;
        let data: Vec<u8> = (0..4096)
            .map(|_| {
                state ^= state << 13;
                state ^= state >> 17;
                state ^= state << 5;
                state as u8
            })
            .collect();

        let codec = Zlib::new(9);
        let compressed = codec.compress(&data).unwrap();
        assert!(compressed.len() > data.len() / 2);
        assert_eq!(codec.decompress(&compressed).unwrap(), data);
    }

    #[test]
    fn test_zlib_empty_input() {
        let codec = Zlib::default();
        let compressed = codec.compress(&[]).unwrap();
        assert!(codec.decompress(&compressed).unwrap().is_empty());
    }

    #[test]
    fn test_zlib_rejects_garbage() {
        let err = Zlib::default().decompress(b"definitely not zlib").unwrap_err();
        assert!(matches!(err, CodecError::CompressionFormatError(_)));
    }

    #[test]
    fn test_zstd_roundtrip() {
        let data = b"aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaabbbbbbbbbbbbbbbbbbbbbb".repeat(20);
        let codec = Zstd::default();
        let compressed = codec.compress(&data).unwrap();
        assert_eq!(codec.decompress(&compressed).unwrap(), data);
        assert!(Zstd::default().decompress(b"nope").is_err());
    }
}
