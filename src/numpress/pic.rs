use super::halfbyte::{HalfByteReader, HalfByteWriter};
use super::NumpressError;

/// Encode non-negative values rounded to the nearest integer
pub fn encode_pic(data: &[f64]) -> Result<Vec<u8>, NumpressError> {
    let mut writer = HalfByteWriter::new(Vec::with_capacity(data.len() * 5));

    for value in data {
        if !(value + 0.5 <= i32::MAX as f64 && *value >= -0.5) {
            return Err(NumpressError::Overflow(
                "positive integer compression needs values in [0, i32::MAX]",
            ));
        }
        writer.write_int((value + 0.5) as u32);
    }

    Ok(writer.finish())
}

/// Decode a positive integer payload
pub fn decode_pic(data: &[u8]) -> Result<Vec<f64>, NumpressError> {
    let mut reader = HalfByteReader::new(data);
    let mut result = Vec::with_capacity(data.len() * 2);

    while !reader.is_done() {
        result.push(reader.read_int()? as f64);
    }

    Ok(result)
}
