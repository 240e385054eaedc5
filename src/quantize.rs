//! Fixed-point quantization for the combo compression path
//!
//! m/z and time values are stored as `round(value * 100000)`, intensities as
//! `round(value * 10)`. Rounding is half away from zero.
//!
//! Intensities whose scaled form does not fit in an `i32` are stored as
//! `-round(log2(value * 10) * 100000)`. Those values are always at or below
//! [`LOG_FALLBACK_CEILING`], so [`from_scaled_int`] can tell them apart from
//! ordinary intensities and reverse them. [`from_scaled_int_linear`] keeps the
//! plain division that older readers apply, which turns such intensities into
//! large negative numbers.

use log::warn;

use crate::descriptor::ArrayKind;

/// Scale for m/z and time values
pub const MZ_PRECISION: f64 = 100_000.0;

/// Scale for intensity values
pub const INTENSITY_PRECISION: f64 = 10.0;

/// Scale applied to `log2` in the intensity overflow fallback
pub const LOG_FALLBACK_PRECISION: f64 = 100_000.0;

/// Largest integer the intensity log fallback produces (`-round(31 * 100000)`)
pub const LOG_FALLBACK_CEILING: i32 = -3_100_000;

/// Returned when a value cannot be quantized
pub const QUANTIZE_ERROR: i32 = -1;

/// Fixed-point scale used for an array kind
pub fn precision(kind: ArrayKind) -> f64 {
    match kind {
        ArrayKind::Mz | ArrayKind::Time => MZ_PRECISION,
        ArrayKind::Intensity => INTENSITY_PRECISION,
    }
}

/// Quantize a value of the given kind
///
/// Never fails: values that cannot be represented come back as
/// [`QUANTIZE_ERROR`] (and a warning is logged) so that one bad point does
/// not abort the whole array.
pub fn to_scaled_int(value: f64, kind: ArrayKind) -> i32 {
    match kind {
        ArrayKind::Mz | ArrayKind::Time => quantize_fixed(value, MZ_PRECISION, kind),
        ArrayKind::Intensity => quantize_intensity(value),
    }
}

/// Whether a quantized value lies in the intensity log fallback range
pub fn is_log_fallback(value: i32, kind: ArrayKind) -> bool {
    kind == ArrayKind::Intensity && value <= LOG_FALLBACK_CEILING
}

/// Reverse [`to_scaled_int`], including the intensity log fallback
pub fn from_scaled_int(value: i32, kind: ArrayKind) -> f64 {
    match kind {
        ArrayKind::Intensity if is_log_fallback(value, kind) => {
            2f64.powf(-(value as f64) / LOG_FALLBACK_PRECISION) / INTENSITY_PRECISION
        }
        _ => from_scaled_int_linear(value, kind),
    }
}

/// Divide by the kind's scale without interpreting the log fallback range
pub fn from_scaled_int_linear(value: i32, kind: ArrayKind) -> f64 {
    value as f64 / precision(kind)
}

fn quantize_fixed(value: f64, scale: f64, kind: ArrayKind) -> i32 {
    let scaled = (value * scale).round();
    if !scaled.is_finite() || scaled > i32::MAX as f64 || scaled < i32::MIN as f64 {
        warn!("Cannot quantize {:?} value {}; storing {}", kind, value, QUANTIZE_ERROR);
        return QUANTIZE_ERROR;
    }
    scaled as i32
}

fn quantize_intensity(value: f64) -> i32 {
    let scaled = value * INTENSITY_PRECISION;
    if scaled.is_nan() || scaled == f64::INFINITY {
        warn!("Cannot quantize intensity {}; storing {}", value, QUANTIZE_ERROR);
        return QUANTIZE_ERROR;
    }
    if scaled <= i32::MAX as f64 {
        // saturating cast for very negative intensities
        let quantized = scaled.round() as i32;
        if is_log_fallback(quantized, ArrayKind::Intensity) {
            warn!(
                "Negative intensity {} falls in the log fallback range and will not decode back",
                value
            );
        }
        quantized
    } else {
        let logged = (scaled.log2() * LOG_FALLBACK_PRECISION).round() as i32;
        warn!("Intensity {} exceeds the fixed-point range; storing log2 form", value);
        -logged
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mz_golden_values() {
        let values = [100.12345, 100.12346, 200.5];
        let scaled: Vec<i32> = values
            .iter()
            .map(|v| to_scaled_int(*v, ArrayKind::Mz))
            .collect();
        assert_eq!(scaled, vec![10_012_345, 10_012_346, 20_050_000]);
    }

    #[test]
    fn test_rounding_half_away_from_zero() {
        assert_eq!(to_scaled_int(0.25, ArrayKind::Intensity), 3);
        assert_eq!(to_scaled_int(-0.25, ArrayKind::Intensity), -3);
        assert_eq!(to_scaled_int(0.24, ArrayKind::Intensity), 2);
    }

    #[test]
    fn test_time_uses_mz_precision() {
        assert_eq!(to_scaled_int(12.5, ArrayKind::Time), 1_250_000);
        assert_eq!(from_scaled_int(1_250_000, ArrayKind::Time), 12.5);
    }

    #[test]
    fn test_non_finite_mz_returns_error_sentinel() {
        assert_eq!(to_scaled_int(f64::NAN, ArrayKind::Mz), QUANTIZE_ERROR);
        assert_eq!(to_scaled_int(f64::INFINITY, ArrayKind::Time), QUANTIZE_ERROR);
        assert_eq!(to_scaled_int(1e9, ArrayKind::Mz), QUANTIZE_ERROR);
    }

    #[test]
    fn test_intensity_overflow_boundary() {
        // 214748364.7 * 10 rounds to exactly i32::MAX
        let at = 214_748_364.7;
        assert_eq!(at * INTENSITY_PRECISION, i32::MAX as f64);
        assert_eq!(to_scaled_int(at, ArrayKind::Intensity), i32::MAX);

        let below = 214_748_364.0;
        assert_eq!(to_scaled_int(below, ArrayKind::Intensity), 2_147_483_640);

        let above = 214_748_365.0;
        assert_eq!(to_scaled_int(above, ArrayKind::Intensity), -3_100_000);
    }

    #[test]
    fn test_log_fallback_is_reversed() {
        let big = 1.0e12;
        let q = to_scaled_int(big, ArrayKind::Intensity);
        assert!(q <= LOG_FALLBACK_CEILING);

        let restored = from_scaled_int(q, ArrayKind::Intensity);
        // log2 stored with 1e-5 resolution: relative error below 2^(5e-6) - 1
        assert!(((restored - big) / big).abs() < 1e-5);

        let linear = from_scaled_int_linear(q, ArrayKind::Intensity);
        assert!(linear < 0.0);
    }

    #[test]
    fn test_large_negative_intensity_collides_with_fallback() {
        let quantized = to_scaled_int(-400_000.0, ArrayKind::Intensity);
        assert_eq!(quantized, -4_000_000);
        assert!(is_log_fallback(quantized, ArrayKind::Intensity));
        assert!(from_scaled_int(quantized, ArrayKind::Intensity) > 0.0);

        assert_eq!(to_scaled_int(-1.0e12, ArrayKind::Intensity), i32::MIN);
        assert!(!is_log_fallback(to_scaled_int(-300_000.0, ArrayKind::Intensity), ArrayKind::Intensity));
        assert!(!is_log_fallback(-4_000_000, ArrayKind::Mz));
    }

    #[test]
    fn test_ordinary_intensities_not_mistaken_for_fallback() {
        assert_eq!(from_scaled_int(12_345, ArrayKind::Intensity), 1234.5);
        assert_eq!(from_scaled_int(-50, ArrayKind::Intensity), -5.0);
    }
}
