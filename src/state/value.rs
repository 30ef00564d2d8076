// src/state/value.rs
//
// Unit-tagged scalar values and bounds handling.

use std::fmt;

/// Physical unit attached to a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Unit {
    #[default]
    None,
    /// Volts
    Volt,
    /// Millivolts
    MilliVolt,
    /// Amperes
    Amper,
    /// Milliamperes
    MilliAmper,
}

impl Unit {
    /// The base unit for a milli unit, or the unit itself.
    pub fn base(self) -> Self {
        match self {
            Unit::MilliVolt => Unit::Volt,
            Unit::MilliAmper => Unit::Amper,
            other => other,
        }
    }

    /// Factor converting a magnitude in `self` into its base unit.
    pub fn to_base_factor(self) -> f32 {
        match self {
            Unit::MilliVolt | Unit::MilliAmper => 0.001,
            _ => 1.0,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Unit::None => "",
            Unit::Volt => "V",
            Unit::MilliVolt => "mV",
            Unit::Amper => "A",
            Unit::MilliAmper => "mA",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A magnitude paired with its unit.
///
/// The magnitude only means something together with the unit; two values
/// are equal only when both match exactly.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Value {
    pub magnitude: f32,
    pub unit: Unit,
}

impl Value {
    pub const fn new(magnitude: f32, unit: Unit) -> Self {
        Self { magnitude, unit }
    }

    pub const fn volts(magnitude: f32) -> Self {
        Self::new(magnitude, Unit::Volt)
    }

    pub const fn amps(magnitude: f32) -> Self {
        Self::new(magnitude, Unit::Amper)
    }

    /// Same unit, new magnitude.
    #[inline]
    pub fn with_magnitude(self, magnitude: f32) -> Self {
        Self { magnitude, ..self }
    }

    /// Clamp the magnitude into `[min, max]`, keeping this value's unit.
    ///
    /// A NaN magnitude clamps to `min`.
    #[inline]
    pub fn clamped(self, min: Value, max: Value) -> Self {
        if self.magnitude.is_nan() {
            return self.with_magnitude(min.magnitude);
        }
        self.with_magnitude(self.magnitude.max(min.magnitude).min(max.magnitude))
    }

    /// Whether the magnitude lies within `[min, max]`.
    #[inline]
    pub fn is_within(&self, min: Value, max: Value) -> bool {
        self.magnitude >= min.magnitude && self.magnitude <= max.magnitude
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.unit == Unit::None {
            write!(f, "{:.2}", self.magnitude)
        } else {
            write!(f, "{:.2} {}", self.magnitude, self.unit)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_keeps_unit() {
        let v = Value::volts(25.0).clamped(Value::volts(0.0), Value::volts(20.0));
        assert_eq!(v, Value::volts(20.0));

        let v = Value::amps(-1.0).clamped(Value::amps(0.0), Value::amps(5.0));
        assert_eq!(v, Value::amps(0.0));
    }

    #[test]
    fn test_clamp_nan_goes_to_min() {
        let v = Value::volts(f32::NAN).clamped(Value::volts(1.0), Value::volts(20.0));
        assert_eq!(v, Value::volts(1.0));
    }

    #[test]
    fn test_equality_includes_unit() {
        assert_ne!(Value::volts(1.0), Value::new(1.0, Unit::MilliVolt));
        assert_eq!(Value::volts(1.0), Value::volts(1.0));
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::volts(5.0).to_string(), "5.00 V");
        assert_eq!(Value::new(250.0, Unit::MilliAmper).to_string(), "250.00 mA");
        assert_eq!(Value::new(0.5, Unit::None).to_string(), "0.50");
    }

    #[test]
    fn test_base_units() {
        assert_eq!(Unit::MilliVolt.base(), Unit::Volt);
        assert_eq!(Unit::Amper.base(), Unit::Amper);
        assert_eq!(Unit::MilliAmper.to_base_factor(), 0.001);
    }
}
