// src/binding.rs
//
// Contract between the edit mode and the device data-access layer.
//
// The edit mode never talks to hardware directly. It reads values and
// bounds through a DataBinding and pushes new values back through it,
// and it tells the rest of the firmware when a live edit is open through
// a TimeCriticalHint.

use std::fmt;

use crate::state::{Unit, Value};

/// Opaque location of a device context (a channel on the front panel).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Cursor {
    /// Zero-based channel index.
    pub channel: usize,
}

impl Cursor {
    pub const fn channel(channel: usize) -> Self {
        Self { channel }
    }

    /// Front-panel label, e.g. `Ch1` for the first channel.
    pub fn label(&self) -> String {
        format!("Ch{}", self.channel + 1)
    }
}

/// Which scalar of a channel is addressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamKind {
    Voltage,
    Current,
}

impl ParamKind {
    /// Storage unit of the parameter.
    pub fn unit(self) -> Unit {
        match self {
            ParamKind::Voltage => Unit::Volt,
            ParamKind::Current => Unit::Amper,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ParamKind::Voltage => "voltage",
            ParamKind::Current => "current",
        }
    }
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A bound parameter: location plus parameter id.
///
/// Only valid while the referenced channel exists; never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParameterRef {
    pub cursor: Cursor,
    pub param: ParamKind,
}

impl ParameterRef {
    pub const fn new(cursor: Cursor, param: ParamKind) -> Self {
        Self { cursor, param }
    }
}

impl fmt::Display for ParameterRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.cursor.label(), self.param)
    }
}

/// A widget as resolved by the hit-testing layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WidgetRef {
    pub cursor: Cursor,
    /// The data the widget displays.
    pub data: ParamKind,
}

impl WidgetRef {
    pub const fn new(cursor: Cursor, data: ParamKind) -> Self {
        Self { cursor, data }
    }

    /// The parameter this widget edits when touched.
    pub fn parameter(&self) -> ParameterRef {
        ParameterRef::new(self.cursor, self.data)
    }
}

/// Access to the device model that owns the parameters.
pub trait DataBinding {
    /// Authoritative live value of the parameter.
    fn current_value(&self, target: &ParameterRef) -> Value;

    fn min(&self, target: &ParameterRef) -> Value;

    fn max(&self, target: &ParameterRef) -> Value;

    /// Push a new value to the device.
    ///
    /// Returns `false` when the device rejects it; the device state is then
    /// unchanged.
    fn try_set(&mut self, target: &ParameterRef, value: Value) -> bool;
}

/// Cooperative scheduling signal for the rest of the firmware.
///
/// Entered once when an edit session opens and left once when it closes.
pub trait TimeCriticalHint {
    fn enter_time_critical_mode(&mut self);

    fn leave_time_critical_mode(&mut self);
}

impl TimeCriticalHint for () {
    fn enter_time_critical_mode(&mut self) {}

    fn leave_time_critical_mode(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_label_is_one_based() {
        assert_eq!(Cursor::channel(0).label(), "Ch1");
        assert_eq!(Cursor::channel(1).label(), "Ch2");
    }

    #[test]
    fn test_widget_resolves_parameter() {
        let widget = WidgetRef::new(Cursor::channel(1), ParamKind::Current);
        let target = widget.parameter();
        assert_eq!(target.cursor, Cursor::channel(1));
        assert_eq!(target.param, ParamKind::Current);
        assert_eq!(target.to_string(), "Ch2 current");
    }

    #[test]
    fn test_param_units() {
        assert_eq!(ParamKind::Voltage.unit(), Unit::Volt);
        assert_eq!(ParamKind::Current.unit(), Unit::Amper);
    }
}
