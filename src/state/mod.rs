// src/state/mod.rs
//
// Declarative state for the edit mode.
//
// These types describe what is being edited and with which values. They
// carry no behaviour that touches the device; EditMode drives them.

mod session;
mod value;

pub use session::*;
pub use value::*;
