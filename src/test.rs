// src/test.rs
//
// End-to-end edit sessions against the simulated power supply.

use proptest::prelude::*;

use crate::binding::{Cursor, DataBinding, ParamKind, WidgetRef};
use crate::config::EditConfig;
use crate::edit_mode::{EditMode, Page};
use crate::sim::{SimulatedPsu, TimeCriticalFlag};
use crate::snapshot::{DataId, Snapshot};
use crate::state::{InputMode, Value};
use crate::widgets::KeypadError;

const CH1_VOLTAGE: WidgetRef = WidgetRef::new(Cursor::channel(0), ParamKind::Voltage);

/// Channel 1 at 5 V with a 0..20 V range.
fn front_panel(interactive: bool) -> EditMode<SimulatedPsu, TimeCriticalFlag> {
    let mut psu = SimulatedPsu::default();
    if let Some(ch) = psu.channel_mut(0) {
        ch.u_set = 5.0;
        ch.u_max = 20.0;
        ch.u_limit = 20.0;
    }
    let config = EditConfig::new().interactive(interactive);
    EditMode::with_config(psu, TimeCriticalFlag::default(), config)
}

fn device_volts(edit: &EditMode<SimulatedPsu, TimeCriticalFlag>) -> Value {
    edit.binding().current_value(&CH1_VOLTAGE.parameter())
}

#[test]
fn test_step_commit_scenario() {
    let mut edit = front_panel(false);
    let mut snapshot = Snapshot::new();

    edit.enter(Some(InputMode::Step), Some(&CH1_VOLTAGE));
    assert!(edit.hint().is_active());

    edit.editor().unwrap().set_value(7.0);
    snapshot.take(&edit);
    assert_eq!(snapshot.edit_value, Value::volts(7.0));
    assert_eq!(device_volts(&edit), Value::volts(5.0));
    assert_eq!(snapshot.is_blinking(&edit, DataId::EditValue), Some(true));

    edit.editor().unwrap().non_interactive_set();
    snapshot.take(&edit);
    assert_eq!(device_volts(&edit), Value::volts(7.0));
    assert_eq!(snapshot.is_blinking(&edit, DataId::EditValue), Some(false));

    edit.exit();
    assert_eq!(edit.active_page(), Page::Main);
    assert!(!edit.hint().is_active());
    assert_eq!(edit.hint().transitions(), 2);
}

#[test]
fn test_out_of_range_candidate_is_clamped() {
    let mut edit = front_panel(false);
    edit.enter(Some(InputMode::Slider), Some(&CH1_VOLTAGE));

    edit.editor().unwrap().set_value(25.0);
    assert_eq!(edit.editor().unwrap().edit_value(), Value::volts(20.0));
    assert_eq!(device_volts(&edit), Value::volts(5.0));
}

#[test]
fn test_keypad_rejected_push() {
    let mut edit = front_panel(false);
    edit.enter(Some(InputMode::Keypad), Some(&CH1_VOLTAGE));
    if let Some(ch) = edit.binding_mut().channel_mut(0) {
        ch.u_limit = 2.0;
    }

    edit.editor().unwrap().set_value(3.0);

    assert_eq!(edit.editor().unwrap().edit_value(), Value::volts(5.0));
    assert_eq!(device_volts(&edit), Value::volts(5.0));
}

#[test]
fn test_keypad_entry_rejected_keeps_typed_text() {
    let mut edit = front_panel(false);
    let mut snapshot = Snapshot::new();
    edit.enter(Some(InputMode::Keypad), Some(&CH1_VOLTAGE));
    if let Some(ch) = edit.binding_mut().channel_mut(0) {
        ch.u_limit = 2.0;
    }

    let mut editor = edit.editor().unwrap();
    editor.keypad_mut().push_digit(3);
    assert_eq!(editor.keypad_ok(), Ok(false));

    snapshot.take(&edit);
    assert_eq!(snapshot.keypad_text, "3");
    assert_eq!(snapshot.edit_value, Value::volts(5.0));
    assert_eq!(device_volts(&edit), Value::volts(5.0));
}

#[test]
fn test_keypad_unit_from_earlier_session_is_not_used() {
    const CH1_CURRENT: WidgetRef = WidgetRef::new(Cursor::channel(0), ParamKind::Current);

    let mut edit = front_panel(false);
    edit.enter(Some(InputMode::Keypad), Some(&CH1_CURRENT));
    edit.editor().unwrap().keypad_mut().switch_unit();
    edit.exit();

    edit.enter(Some(InputMode::Step), Some(&CH1_VOLTAGE));
    let mut editor = edit.editor().unwrap();
    for digit in [5, 0, 0] {
        editor.keypad_mut().push_digit(digit);
    }
    assert_eq!(editor.keypad_ok(), Err(KeypadError::NotOpen));
    assert_eq!(editor.edit_value(), Value::volts(5.0));

    edit.enter(Some(InputMode::Keypad), None);
    let mut snapshot = Snapshot::new();
    snapshot.take(&edit);
    assert_eq!(snapshot.unit_label, "mV");
    assert_eq!(snapshot.keypad_text, "");
}

#[test]
fn test_interactive_slider_follows_device() {
    let mut edit = front_panel(true);
    let mut snapshot = Snapshot::new();
    edit.enter(Some(InputMode::Slider), Some(&CH1_VOLTAGE));

    edit.editor().unwrap().slide_to(0.75);
    snapshot.take(&edit);
    assert_eq!(device_volts(&edit), Value::volts(15.0));
    assert_eq!(snapshot.is_blinking(&edit, DataId::EditValue), Some(false));
}

#[test]
fn test_exit_is_idempotent() {
    let mut edit = front_panel(true);
    edit.enter(Some(InputMode::Slider), Some(&CH1_VOLTAGE));
    edit.exit();
    let after_first = edit.hint().transitions();
    edit.exit();
    assert_eq!(edit.hint().transitions(), after_first);
    assert!(!edit.is_active());
}

#[test]
fn test_independent_sessions() {
    let mut left = front_panel(false);
    let mut right = front_panel(true);

    left.enter(Some(InputMode::Step), Some(&CH1_VOLTAGE));
    assert!(left.is_active());
    assert!(!right.is_active());

    right.enter(Some(InputMode::Slider), Some(&CH1_VOLTAGE));
    right.editor().unwrap().set_value(9.0);
    assert_eq!(device_volts(&right), Value::volts(9.0));
    assert_eq!(device_volts(&left), Value::volts(5.0));
}

proptest! {
    #[test]
    fn edit_value_stays_within_bounds(
        candidates in prop::collection::vec(-100.0f32..100.0, 1..16),
        mode in prop::sample::select(vec![InputMode::Slider, InputMode::Step, InputMode::Keypad]),
        interactive in any::<bool>(),
    ) {
        let mut edit = front_panel(interactive);
        edit.enter(Some(mode), Some(&CH1_VOLTAGE));
        for candidate in candidates {
            let mut editor = edit.editor().unwrap();
            editor.set_value(candidate);
            let state = editor.state();
            prop_assert!(state.edit_value.is_within(state.min, state.max));
        }
    }

    #[test]
    fn discard_restores_value_at_entry(
        candidates in prop::collection::vec(0.0f32..20.0, 0..16),
        mode in prop::sample::select(vec![InputMode::Slider, InputMode::Step]),
    ) {
        let mut edit = front_panel(false);
        edit.enter(Some(mode), Some(&CH1_VOLTAGE));
        let at_entry = device_volts(&edit);

        let mut editor = edit.editor().unwrap();
        for candidate in candidates {
            editor.set_value(candidate);
        }
        editor.non_interactive_discard();

        prop_assert_eq!(device_volts(&edit), at_entry);
    }

    #[test]
    fn commit_applies_last_buffered_value(
        candidates in prop::collection::vec(-5.0f32..30.0, 1..16),
    ) {
        let mut edit = front_panel(false);
        edit.enter(Some(InputMode::Step), Some(&CH1_VOLTAGE));

        let mut editor = edit.editor().unwrap();
        for candidate in candidates {
            editor.set_value(candidate);
        }
        let buffered = editor.edit_value();
        editor.non_interactive_set();

        prop_assert_eq!(device_volts(&edit), buffered);
    }

    #[test]
    fn toggle_resets_to_device_value(
        candidates in prop::collection::vec(0.0f32..20.0, 0..8),
        interactive in any::<bool>(),
    ) {
        let mut edit = front_panel(interactive);
        edit.enter(Some(InputMode::Slider), Some(&CH1_VOLTAGE));

        let mut editor = edit.editor().unwrap();
        for candidate in candidates {
            editor.set_value(candidate);
        }
        editor.toggle_interactive_mode();
        let state = editor.state().clone();

        let current = device_volts(&edit);
        prop_assert_eq!(state.edit_value, current);
        prop_assert_eq!(state.undo_value, current);
    }
}
