use super::halfbyte::{HalfByteReader, HalfByteWriter};
use super::{decode_fixed_point, encode_fixed_point, valid_fixed_point, NumpressError};

/// Largest fixed point that keeps every residual of `data` inside an `i32`
///
/// Returns 0 for empty input. A single value that is not positive gets a
/// fixed point of 1.
pub fn optimal_linear_fixed_point(data: &[f64]) -> f64 {
    match data {
        [] => 0.0,
        [only] => {
            let fixed_point = (0xFFFF_FFFFu32 as f64 / only).floor();
            if fixed_point.is_finite() && fixed_point > 0.0 {
                fixed_point
            } else {
                1.0
            }
        }
        [first, second, ..] => {
            let mut max_double = first.max(*second);
            for window in data.windows(3) {
                let extrapol = window[1] + (window[1] - window[0]);
                let diff = window[2] - extrapol;
                max_double = max_double.max((diff.abs() + 1.0).ceil());
            }
            if max_double <= 0.0 {
                max_double = 1.0;
            }
            (0x7FFF_FFFF as f64 / max_double).floor()
        }
    }
}

fn to_fixed(value: f64, fixed_point: f64) -> Result<i64, NumpressError> {
    let scaled = value * fixed_point + 0.5;
    if !scaled.is_finite() || scaled > i64::MAX as f64 || scaled < i64::MIN as f64 {
        return Err(NumpressError::Overflow("next number overflows a 64-bit integer"));
    }
    Ok(scaled as i64)
}

fn to_leading(value: f64, fixed_point: f64) -> Result<i64, NumpressError> {
    let fixed = to_fixed(value, fixed_point)?;
    if !(0..=u32::MAX as i64).contains(&fixed) {
        return Err(NumpressError::Overflow(
            "first two values must fit in 32 unsigned bits after scaling",
        ));
    }
    Ok(fixed)
}

/// Encode `data` with linear prediction at the given fixed point
///
/// Layout: 8-byte big-endian fixed point, the first two scaled values as
/// 4-byte little-endian integers, then half-byte coded prediction residuals.
pub fn encode_linear(data: &[f64], fixed_point: f64) -> Result<Vec<u8>, NumpressError> {
    let mut out = Vec::with_capacity(8 + data.len() * 5);
    encode_fixed_point(fixed_point, &mut out);

    let (first, second) = match data {
        [] => return Ok(out),
        _ if !valid_fixed_point(fixed_point) => {
            return Err(NumpressError::Overflow("fixed point must be a positive finite number"));
        }
        [only] => {
            let fixed = to_leading(*only, fixed_point)?;
            out.extend_from_slice(&(fixed as u32).to_le_bytes());
            return Ok(out);
        }
        [first, second, ..] => (to_leading(*first, fixed_point)?, to_leading(*second, fixed_point)?),
    };
    out.extend_from_slice(&(first as u32).to_le_bytes());
    out.extend_from_slice(&(second as u32).to_le_bytes());

    let mut ints = [0i64, first, second];
    let mut writer = HalfByteWriter::new(out);

    for value in &data[2..] {
        ints[0] = ints[1];
        ints[1] = ints[2];
        ints[2] = to_fixed(*value, fixed_point)?;

        let diff = ints[1]
            .checked_mul(2)
            .and_then(|twice| twice.checked_sub(ints[0]))
            .and_then(|extrapol| ints[2].checked_sub(extrapol))
            .ok_or(NumpressError::Overflow("prediction residual overflows"))?;
        let diff = i32::try_from(diff).map_err(|_| {
            NumpressError::Overflow("prediction residual exceeds the bounds of a 32-bit integer")
        })?;

        writer.write_int(diff as u32);
    }

    Ok(writer.finish())
}

/// Decode a linear prediction payload
pub fn decode_linear(data: &[u8]) -> Result<Vec<f64>, NumpressError> {
    if data.len() == 8 {
        return Ok(Vec::new());
    }
    let fixed_point = decode_fixed_point(data)?;

    let read_leading = |range: std::ops::Range<usize>, what: &'static str| {
        data.get(range)
            .and_then(|bytes| bytes.try_into().ok())
            .map(|bytes: [u8; 4]| u32::from_le_bytes(bytes) as i64)
            .ok_or(NumpressError::Corrupt(what))
    };

    let mut result = Vec::with_capacity((data.len() - 8) * 2);

    let first = read_leading(8..12, "not enough bytes to read first value")?;
    result.push(first as f64 / fixed_point);
    if data.len() == 12 {
        return Ok(result);
    }

    let second = read_leading(12..16, "not enough bytes to read second value")?;
    result.push(second as f64 / fixed_point);

    let mut ints = [0i64, first, second];
    let mut reader = HalfByteReader::new(&data[16..]);

    while !reader.is_done() {
        ints[0] = ints[1];
        ints[1] = ints[2];

        // wrapping: a corrupt residual stream must not panic
        let diff = reader.read_int()? as i32 as i64;
        let extrapol = ints[1].wrapping_mul(2).wrapping_sub(ints[0]);
        let y = extrapol.wrapping_add(diff);

        result.push(y as f64 / fixed_point);
        ints[2] = y;
    }

    Ok(result)
}
