// src/snapshot.rs
//
// Render-time projection of the edit mode.
//
// The renderer never reads EditMode directly. Once per UI tick the owner
// calls Snapshot::take, and the renderer reads the copy through get().

use crate::binding::{DataBinding, TimeCriticalHint};
use crate::edit_mode::EditMode;
use crate::state::{Unit, Value};

/// Display elements of the edit page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataId {
    EditValue,
    EditInfo,
    EditUnit,
    InteractiveModeSelector,
    EditSteps,
    KeypadText,
}

/// A value handed to the renderer.
#[derive(Debug, Clone, PartialEq)]
pub enum DataValue {
    Value(Value),
    Text(String),
    Label(&'static str),
    Index(usize),
}

/// Label shown on the keypad unit key for the current entry unit.
///
/// The key shows the unit the entry would switch to, so a volt entry
/// shows "mV" and a millivolt entry shows "V".
pub fn keypad_unit_label(unit: Unit) -> &'static str {
    match unit {
        Unit::Volt => "mV",
        Unit::MilliVolt => "V",
        Unit::Amper => "mA",
        _ => "A",
    }
}

/// Point-in-time copy of the edit page state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub edit_value: Value,
    pub info_text: String,
    pub unit_label: &'static str,
    /// 0 when interactive, 1 otherwise.
    pub interactive_mode_selector: usize,
    pub step_index: usize,
    pub keypad_text: String,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refresh from `edit`. Leaves the previous contents when no session
    /// is open; they must not be rendered then.
    pub fn take<B: DataBinding, H: TimeCriticalHint>(&mut self, edit: &EditMode<B, H>) {
        let Some(active) = edit.session().active() else {
            return;
        };

        self.edit_value = active.edit_value;

        self.info_text.clear();
        self.info_text.push_str(&format!(
            "Set {} {} [{}-{} {}]",
            active.target.cursor.label(),
            active.target.param,
            active.min.magnitude as i32,
            active.max.magnitude as i32,
            active.target.param.unit(),
        ));

        self.interactive_mode_selector = if edit.is_interactive() { 0 } else { 1 };
        self.step_index = edit.steps().index();
        self.unit_label = keypad_unit_label(edit.keypad().edit_unit());

        self.keypad_text.clear();
        self.keypad_text.push_str(edit.keypad().text());
    }

    pub fn get(&self, id: DataId) -> Option<DataValue> {
        match id {
            DataId::EditValue => Some(DataValue::Value(self.edit_value)),
            DataId::EditInfo => Some(DataValue::Text(self.info_text.clone())),
            DataId::EditUnit => Some(DataValue::Label(self.unit_label)),
            DataId::InteractiveModeSelector => {
                Some(DataValue::Index(self.interactive_mode_selector))
            }
            DataId::EditSteps => Some(DataValue::Index(self.step_index)),
            DataId::KeypadText => Some(DataValue::Text(self.keypad_text.clone())),
        }
    }

    /// Blink state of a display element.
    ///
    /// Only the edit value blinks: while non-interactive, as long as the
    /// buffered value differs from the device. Other ids return `None`.
    pub fn is_blinking<B: DataBinding, H: TimeCriticalHint>(
        &self,
        edit: &EditMode<B, H>,
        id: DataId,
    ) -> Option<bool> {
        if id != DataId::EditValue {
            return None;
        }
        let pending = edit
            .current_value()
            .is_some_and(|current| current != self.edit_value);
        Some(self.interactive_mode_selector == 1 && pending)
    }
}
