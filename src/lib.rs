// src/lib.rs
//
// Library entry point for firmware and FFI consumers (iOS/Swift, web).

mod binding;
mod config;
mod edit_mode;
mod sim;
mod snapshot;
mod state;

pub mod widgets;

#[cfg(test)]
mod test;

#[cfg(feature = "ios")]
pub mod ffi;
#[cfg(feature = "web")]
pub mod wasm;

// Re-export key types for Rust consumers
pub use binding::{Cursor, DataBinding, ParamKind, ParameterRef, TimeCriticalHint, WidgetRef};
pub use config::EditConfig;
pub use edit_mode::{EditMode, Editor, Page};
pub use sim::{SimChannel, SimulatedPsu, TimeCriticalFlag};
pub use snapshot::{DataId, DataValue, Snapshot, keypad_unit_label};
pub use state::{ActiveEdit, EditSession, InputMode, Unit, Value};
pub use widgets::{Keypad, KeypadError, KeypadResult, StepSelector};
