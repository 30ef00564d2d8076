// src/config.rs
//
// Start-up configuration for the edit mode.

use crate::state::InputMode;

/// Input method shown the first time the edit page opens.
pub const DEFAULT_INPUT_MODE: InputMode = InputMode::Slider;

/// Whether edits are applied as they happen by default.
pub const DEFAULT_INTERACTIVE: bool = true;

/// Initially selected step size (largest).
pub const DEFAULT_STEP_INDEX: usize = 0;

/// Configuration for creating an EditMode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditConfig {
    /// Mode used when `enter` is called without one.
    pub initial_mode: InputMode,
    /// Apply-immediately policy for slider and step edits.
    pub interactive: bool,
    /// Initial step-size index.
    pub step_index: usize,
}

impl EditConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn initial_mode(mut self, mode: InputMode) -> Self {
        self.initial_mode = mode;
        self
    }

    pub fn interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    pub fn step_index(mut self, index: usize) -> Self {
        self.step_index = index;
        self
    }
}

impl Default for EditConfig {
    fn default() -> Self {
        Self {
            initial_mode: DEFAULT_INPUT_MODE,
            interactive: DEFAULT_INTERACTIVE,
            step_index: DEFAULT_STEP_INDEX,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EditConfig::default();
        assert_eq!(config.initial_mode, InputMode::Slider);
        assert!(config.interactive);
        assert_eq!(config.step_index, 0);
    }

    #[test]
    fn test_builder() {
        let config = EditConfig::new()
            .initial_mode(InputMode::Keypad)
            .interactive(false)
            .step_index(2);
        assert_eq!(config.initial_mode, InputMode::Keypad);
        assert!(!config.interactive);
        assert_eq!(config.step_index, 2);
    }
}
