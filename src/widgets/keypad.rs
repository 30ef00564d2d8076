// src/widgets/keypad.rs
//
// Numeric keypad entry buffer.

use crate::state::Unit;

/// Maximum number of characters the keypad accepts.
pub const KEYPAD_MAX_CHARS: usize = 8;

/// Error when turning keypad text into a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeypadError {
    /// Nothing has been typed.
    Empty,

    /// The buffer does not form a number.
    Malformed { text: String },

    /// The entry unit measures a different quantity than the parameter.
    UnitMismatch { entry: Unit, storage: Unit },

    /// The keypad page is not the one open.
    NotOpen,
}

impl std::fmt::Display for KeypadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeypadError::Empty => write!(f, "Keypad buffer is empty"),
            KeypadError::Malformed { text } => write!(f, "Keypad text '{}' is not a number", text),
            KeypadError::UnitMismatch { entry, storage } => {
                write!(f, "Cannot enter {} for a value stored in {}", entry, storage)
            }
            KeypadError::NotOpen => write!(f, "Keypad page is not open"),
        }
    }
}

impl std::error::Error for KeypadError {}

/// Result of keypad parsing.
pub type KeypadResult<T> = Result<T, KeypadError>;

/// Keypad state: typed text plus the unit the text is entered in.
///
/// The entry unit may differ from the storage unit of the edited
/// parameter (millivolt entry for a volt parameter, for instance).
#[derive(Debug, Clone, Default)]
pub struct Keypad {
    text: String,
    edit_unit: Unit,
}

impl Keypad {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear the buffer and start entering in `unit`.
    pub fn reset(&mut self, unit: Unit) {
        self.text.clear();
        self.edit_unit = unit;
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn edit_unit(&self) -> Unit {
        self.edit_unit
    }

    /// Append a decimal digit. Ignored when the buffer is full.
    pub fn push_digit(&mut self, digit: u8) {
        if digit > 9 || self.text.len() >= KEYPAD_MAX_CHARS {
            return;
        }
        self.text.push(char::from(b'0' + digit));
    }

    /// Append a decimal point. At most one is accepted.
    pub fn push_point(&mut self) {
        if self.text.contains('.') || self.text.len() >= KEYPAD_MAX_CHARS {
            return;
        }
        self.text.push('.');
    }

    pub fn backspace(&mut self) {
        self.text.pop();
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    /// Toggle between the base and milli entry unit.
    pub fn switch_unit(&mut self) {
        self.edit_unit = match self.edit_unit {
            Unit::Volt => Unit::MilliVolt,
            Unit::MilliVolt => Unit::Volt,
            Unit::Amper => Unit::MilliAmper,
            Unit::MilliAmper => Unit::Amper,
            Unit::None => Unit::None,
        };
    }

    /// Parse the buffer and express it in `storage_unit`.
    ///
    /// The entry unit must measure the same quantity as `storage_unit`.
    pub fn value(&self, storage_unit: Unit) -> KeypadResult<f32> {
        if self.edit_unit.base() != storage_unit.base() {
            return Err(KeypadError::UnitMismatch {
                entry: self.edit_unit,
                storage: storage_unit,
            });
        }
        if self.text.is_empty() {
            return Err(KeypadError::Empty);
        }
        let entered: f32 = self.text.parse().map_err(|_| KeypadError::Malformed {
            text: self.text.clone(),
        })?;
        Ok(entered * self.edit_unit.to_base_factor() / storage_unit.to_base_factor())
    }
}
