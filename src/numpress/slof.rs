use super::{decode_fixed_point, encode_fixed_point, valid_fixed_point, NumpressError};

/// Fixed point that maps the largest `ln(x + 1)` of `data` onto `u16::MAX`
///
/// Returns 0 for empty input.
pub fn optimal_slof_fixed_point(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let max_double = data
        .iter()
        .map(|value| (value + 1.0).ln())
        .fold(1.0f64, f64::max);
    (0xFFFF as f64 / max_double).floor()
}

/// Encode `data` as 16-bit fixed-point logarithms
///
/// Layout: 8-byte big-endian fixed point, then one little-endian `u16` per value.
pub fn encode_slof(data: &[f64], fixed_point: f64) -> Result<Vec<u8>, NumpressError> {
    let mut out = Vec::with_capacity(8 + data.len() * 2);
    encode_fixed_point(fixed_point, &mut out);
    if data.is_empty() {
        return Ok(out);
    }
    if !valid_fixed_point(fixed_point) {
        return Err(NumpressError::Overflow("fixed point must be a positive finite number"));
    }

    for value in data {
        let temp = (value + 1.0).ln() * fixed_point;
        if !(0.0..=u16::MAX as f64).contains(&temp) {
            return Err(NumpressError::Overflow(
                "short logged float needs ln(x + 1) * fixed point in [0, 65535]",
            ));
        }
        let x = (temp + 0.5) as u16;
        out.extend_from_slice(&x.to_le_bytes());
    }

    Ok(out)
}

/// Decode a short logged float payload
pub fn decode_slof(data: &[u8]) -> Result<Vec<f64>, NumpressError> {
    if data.len() == 8 {
        return Ok(Vec::new());
    }
    let fixed_point = decode_fixed_point(data)?;
    let body = &data[8..];
    if body.len() % 2 != 0 {
        return Err(NumpressError::Corrupt("odd number of bytes after fixed point"));
    }

    Ok(body
        .chunks_exact(2)
        .map(|pair| {
            let x = u16::from_le_bytes([pair[0], pair[1]]);
            (x as f64 / fixed_point).exp() - 1.0
        })
        .collect())
}
