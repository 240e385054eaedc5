//! Variable-length byte integer coding
//!
//! Each 32-bit value is written as 7-bit groups, least significant first, with
//! the high bit of a byte set when another byte follows. A stream starts with
//! the value count in the same coding.

use crate::error::{CodecError, Result};

/// Turns an integer array into bytes and back; the first stage of combo compression
pub trait IntCodec: Send + Sync {
    /// Short name used in log messages
    fn name(&self) -> &'static str;

    /// Encode `values`
    fn encode(&self, values: &[i32]) -> Vec<u8>;

    /// Reverse [`IntCodec::encode`]
    fn decode(&self, data: &[u8]) -> Result<Vec<i32>>;
}

/// Plain var-byte coding, for intensities
#[derive(Debug, Clone, Copy, Default)]
pub struct VarByte;

/// Delta + var-byte coding, for sorted m/z and time values
///
/// Stores the difference to the previous value, so small steps between
/// neighbouring points take one or two bytes. Unsorted input still round-trips
/// (differences wrap), it just compresses worse.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntegratedVarByte;

impl IntCodec for VarByte {
    fn name(&self) -> &'static str {
        "var-byte"
    }

    fn encode(&self, values: &[i32]) -> Vec<u8> {
        let mut out = Vec::with_capacity(values.len() * 2 + 5);
        write_u32(values.len() as u32, &mut out);
        for value in values {
            write_u32(*value as u32, &mut out);
        }
        out
    }

    fn decode(&self, data: &[u8]) -> Result<Vec<i32>> {
        let mut reader = Reader::new(data);
        let count = reader.read_u32()? as usize;
        let mut values = Vec::with_capacity(count.min(data.len()));
        for _ in 0..count {
            values.push(reader.read_u32()? as i32);
        }
        reader.finish()?;
        Ok(values)
    }
}

impl IntCodec for IntegratedVarByte {
    fn name(&self) -> &'static str {
        "integrated var-byte"
    }

    fn encode(&self, values: &[i32]) -> Vec<u8> {
        let mut out = Vec::with_capacity(values.len() * 2 + 5);
        write_u32(values.len() as u32, &mut out);
        let mut previous = 0i32;
        for value in values {
            write_u32(value.wrapping_sub(previous) as u32, &mut out);
            previous = *value;
        }
        out
    }

    fn decode(&self, data: &[u8]) -> Result<Vec<i32>> {
        let mut reader = Reader::new(data);
        let count = reader.read_u32()? as usize;
        let mut values = Vec::with_capacity(count.min(data.len()));
        let mut previous = 0i32;
        for _ in 0..count {
            previous = previous.wrapping_add(reader.read_u32()? as i32);
            values.push(previous);
        }
        reader.finish()?;
        Ok(values)
    }
}

fn write_u32(mut value: u32, out: &mut Vec<u8>) {
    while value >= 0x80 {
        out.push((value as u8 & 0x7f) | 0x80);
        value >>= 7;
    }
    out.push(value as u8);
}

struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn read_u32(&mut self) -> Result<u32> {
        let mut value = 0u32;
        for shift in (0..35).step_by(7) {
            let byte = *self.data.get(self.pos).ok_or_else(|| {
                CodecError::CompressionFormatError("var-byte stream ended early".to_string())
            })?;
            self.pos += 1;
            value |= ((byte & 0x7f) as u32) << shift;
            if byte & 0x80 == 0 {
                return Ok(value);
            }
        }
        Err(CodecError::CompressionFormatError(
            "var-byte integer longer than 5 bytes".to_string(),
        ))
    }

    fn finish(self) -> Result<()> {
        if self.pos != self.data.len() {
            return Err(CodecError::CompressionFormatError(format!(
                "{} trailing bytes after var-byte stream",
                self.data.len() - self.pos
            )));
        }
        Ok(())
    }
}
