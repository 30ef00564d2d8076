// src/widgets/slider.rs
//
// Slider position mapping.

use crate::state::Value;

/// Map a slider position in `[0, 1]` onto the bounds.
#[inline]
pub fn position_to_value(position: f32, min: Value, max: Value) -> f32 {
    let position = if position.is_nan() { 0.0 } else { position.clamp(0.0, 1.0) };
    min.magnitude + position * (max.magnitude - min.magnitude)
}

/// Slider position of `value` within the bounds.
#[inline]
pub fn value_to_position(value: Value, min: Value, max: Value) -> f32 {
    let span = max.magnitude - min.magnitude;
    if span <= 0.0 {
        return 0.0;
    }
    ((value.magnitude - min.magnitude) / span).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_maps_onto_bounds() {
        let (min, max) = (Value::volts(0.0), Value::volts(20.0));
        assert_eq!(position_to_value(0.0, min, max), 0.0);
        assert_eq!(position_to_value(0.25, min, max), 5.0);
        assert_eq!(position_to_value(1.0, min, max), 20.0);
        assert_eq!(position_to_value(1.5, min, max), 20.0);
        assert_eq!(position_to_value(f32::NAN, min, max), 0.0);
    }

    #[test]
    fn test_value_to_position() {
        let (min, max) = (Value::volts(0.0), Value::volts(20.0));
        assert_eq!(value_to_position(Value::volts(10.0), min, max), 0.5);
        assert_eq!(value_to_position(Value::volts(5.0), max, max), 0.0);
    }
}
