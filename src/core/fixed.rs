use std::fmt;

/// Number of fractional bits in a sample (16.16 encoding).
///
/// Enough to round correctly at three decimal digits while still covering
/// tablet coordinates in millimetres.
pub const FRACTIONAL_BITS: u32 = 16;

const SCALE: f64 = (1u32 << FRACTIONAL_BITS) as f64;

/// Signed fixed-point measurement as reported by the device-event source.
///
/// Values stay in their raw encoding until they are rendered. No ordering is
/// provided: an x coordinate and a pressure reading are both `Fixed` but
/// are not comparable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Fixed(i32);

impl Fixed {
    pub const ZERO: Fixed = Fixed(0);

    pub const fn from_raw(raw: i32) -> Self {
        Fixed(raw)
    }

    pub const fn raw(self) -> i32 {
        self.0
    }

    /// Encode a floating reading, saturating at the representable range.
    pub fn from_f64(value: f64) -> Self {
        let scaled = (value * SCALE).round();
        if scaled.is_nan() {
            return Fixed::ZERO;
        }
        // `as` saturates for out of range floats
        Fixed(scaled as i32)
    }

    /// Display value; only ever used at render time.
    pub fn to_f64(self) -> f64 {
        f64::from(self.0) / SCALE
    }
}

impl fmt::Display for Fixed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = f.precision().unwrap_or(3);
        match f.width() {
            Some(width) => write!(f, "{:width$.precision$}", self.to_f64()),
            None => write!(f, "{:.precision$}", self.to_f64()),
        }
    }
}
