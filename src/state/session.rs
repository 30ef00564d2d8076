// src/state/session.rs
//
// Edit session state.
//
// A session is either inactive or bound to exactly one parameter. All the
// per-session data lives inside the Active variant, so nothing can read an
// edit value while no parameter is bound.

use std::fmt;

use super::Value;
use crate::binding::ParameterRef;

/// Input method used to edit the bound parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InputMode {
    #[default]
    Slider,
    Step,
    Keypad,
}

impl InputMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputMode::Slider => "SLIDER",
            InputMode::Step => "STEP",
            InputMode::Keypad => "KEYPAD",
        }
    }
}

impl fmt::Display for InputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// State of a bound edit.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveEdit {
    /// The parameter being edited.
    pub target: ParameterRef,

    /// Selected input method.
    pub mode: InputMode,

    /// Live edit value, always within `[min, max]` after a write.
    pub edit_value: Value,

    /// Value restored on discard.
    pub undo_value: Value,

    /// Lower bound, fetched when the session was entered.
    pub min: Value,

    /// Upper bound, fetched when the session was entered.
    pub max: Value,
}

impl ActiveEdit {
    /// Build a candidate value in the session's unit, clamped to the bounds.
    #[inline]
    pub fn candidate(&self, magnitude: f32) -> Value {
        self.edit_value
            .with_magnitude(magnitude)
            .clamped(self.min, self.max)
    }

    /// Replace both the live and the undo value.
    pub fn reset_to(&mut self, value: Value) {
        self.edit_value = value;
        self.undo_value = value;
    }
}

/// The edit session: inactive, or bound to one parameter.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum EditSession {
    #[default]
    Inactive,
    Active(ActiveEdit),
}

impl EditSession {
    pub fn is_active(&self) -> bool {
        matches!(self, EditSession::Active(_))
    }

    pub fn active(&self) -> Option<&ActiveEdit> {
        match self {
            EditSession::Active(edit) => Some(edit),
            EditSession::Inactive => None,
        }
    }

    pub fn target(&self) -> Option<&ParameterRef> {
        self.active().map(|edit| &edit.target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::{Cursor, ParamKind};

    fn active() -> ActiveEdit {
        ActiveEdit {
            target: ParameterRef::new(Cursor::channel(0), ParamKind::Voltage),
            mode: InputMode::Step,
            edit_value: Value::volts(5.0),
            undo_value: Value::volts(5.0),
            min: Value::volts(0.0),
            max: Value::volts(20.0),
        }
    }

    #[test]
    fn test_candidate_is_clamped() {
        let edit = active();
        assert_eq!(edit.candidate(25.0), Value::volts(20.0));
        assert_eq!(edit.candidate(-3.0), Value::volts(0.0));
        assert_eq!(edit.candidate(7.5), Value::volts(7.5));
    }

    #[test]
    fn test_reset_to_replaces_undo() {
        let mut edit = active();
        edit.edit_value = Value::volts(6.0);
        edit.reset_to(Value::volts(8.0));
        assert_eq!(edit.edit_value, Value::volts(8.0));
        assert_eq!(edit.undo_value, Value::volts(8.0));
    }

    #[test]
    fn test_session_accessors() {
        let session = EditSession::default();
        assert!(!session.is_active());
        assert!(session.target().is_none());

        let session = EditSession::Active(active());
        assert!(session.is_active());
        assert_eq!(session.target().map(|t| t.param), Some(ParamKind::Voltage));
    }

    #[test]
    fn test_mode_strings() {
        assert_eq!(InputMode::Slider.as_str(), "SLIDER");
        assert_eq!(InputMode::Step.as_str(), "STEP");
        assert_eq!(InputMode::Keypad.as_str(), "KEYPAD");
    }
}
