//! Numeric element types a binary array can be decoded into or encoded from

/// A floating-point element of a decoded peak array
///
/// Implemented for `f64` and `f32`. Conversions into `f32` narrow with a plain
/// cast; nothing is rounded beyond what the cast does.
pub trait PeakValue: Copy + Default + PartialEq + std::fmt::Debug + Send + Sync + 'static {
    /// True for 64-bit floats, the only input numpress accepts
    const IS_DOUBLE: bool;

    /// Convert from a decoded double
    fn from_f64(value: f64) -> Self;

    /// Convert from a decoded single-precision float
    fn from_f32(value: f32) -> Self;

    /// Widen to a double for quantization and numpress
    fn to_f64(self) -> f64;

    /// Narrow to a single-precision float for 32-bit output
    fn to_f32(self) -> f32;
}

impl PeakValue for f64 {
    const IS_DOUBLE: bool = true;

    #[inline]
    fn from_f64(value: f64) -> Self {
        value
    }

    #[inline]
    fn from_f32(value: f32) -> Self {
        value as f64
    }

    #[inline]
    fn to_f64(self) -> f64 {
        self
    }

    #[inline]
    fn to_f32(self) -> f32 {
        self as f32
    }
}

impl PeakValue for f32 {
    const IS_DOUBLE: bool = false;

    #[inline]
    fn from_f64(value: f64) -> Self {
        value as f32
    }

    #[inline]
    fn from_f32(value: f32) -> Self {
        value
    }

    #[inline]
    fn to_f64(self) -> f64 {
        self as f64
    }

    #[inline]
    fn to_f32(self) -> f32 {
        self
    }
}
