// src/widgets/mod.rs
//
// Input sub-widgets of the edit page.
//
// Each one only turns operator input into a candidate scalar. Bounds,
// apply policy and undo are handled by the edit mode.

pub mod keypad;
pub mod slider;
pub mod step;

pub use keypad::{Keypad, KeypadError, KeypadResult};
pub use step::StepSelector;
