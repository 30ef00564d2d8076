// src/main.rs
//
// Scripted front-panel session against the simulated power supply.

use psu_edit::{
    Cursor, DataBinding, DataId, EditConfig, EditMode, InputMode, ParamKind, SimulatedPsu,
    Snapshot, TimeCriticalFlag, WidgetRef,
};

/// ===============================
/// Helpers
/// ===============================

fn tick(label: &str, edit: &EditMode<SimulatedPsu, TimeCriticalFlag>, snapshot: &mut Snapshot) {
    snapshot.take(edit);

    let device = edit
        .current_value()
        .map_or_else(|| "-".to_string(), |v| v.to_string());
    let blinking = snapshot
        .is_blinking(edit, DataId::EditValue)
        .unwrap_or(false);

    println!(
        "[{:<10}] page={:?} edit={} device={} blink={} info=\"{}\" unit={} keypad=\"{}\"",
        label,
        edit.active_page(),
        snapshot.edit_value,
        device,
        blinking,
        snapshot.info_text,
        snapshot.unit_label,
        snapshot.keypad_text,
    );
}

/// ===============================
/// Main
/// ===============================

fn main() {
    let mut psu = SimulatedPsu::default();
    if let Some(ch) = psu.channel_mut(0) {
        ch.u_set = 5.0;
        ch.u_max = 20.0;
        ch.u_limit = 20.0;
    }

    let config = EditConfig::new().interactive(false);
    let mut edit = EditMode::with_config(psu, TimeCriticalFlag::default(), config);
    let mut snapshot = Snapshot::new();

    let ch1_voltage = WidgetRef::new(Cursor::channel(0), ParamKind::Voltage);
    let ch1_current = WidgetRef::new(Cursor::channel(0), ParamKind::Current);

    println!("Starting edit mode sanity run…");

    // --------------------------------
    // Step edit, buffered then committed
    // --------------------------------

    edit.enter(Some(InputMode::Step), Some(&ch1_voltage));
    tick("enter", &edit, &mut snapshot);

    if let Some(mut editor) = edit.editor() {
        editor.step(2);
    }
    tick("step +2", &edit, &mut snapshot);

    if let Some(mut editor) = edit.editor() {
        editor.non_interactive_set();
    }
    tick("commit", &edit, &mut snapshot);

    // --------------------------------
    // Slider edit, discarded
    // --------------------------------

    edit.enter(Some(InputMode::Slider), None);
    if let Some(mut editor) = edit.editor() {
        editor.slide_to(0.9);
    }
    tick("slide", &edit, &mut snapshot);

    if let Some(mut editor) = edit.editor() {
        editor.non_interactive_discard();
    }
    tick("discard", &edit, &mut snapshot);

    edit.exit();
    println!("time critical active after exit: {}", edit.hint().is_active());

    // --------------------------------
    // Keypad entry in milliamps
    // --------------------------------

    edit.enter(Some(InputMode::Keypad), Some(&ch1_current));
    if let Some(mut editor) = edit.editor() {
        let keypad = editor.keypad_mut();
        keypad.switch_unit();
        for digit in [7, 5, 0] {
            keypad.push_digit(digit);
        }
    }
    tick("typing", &edit, &mut snapshot);

    if let Some(mut editor) = edit.editor() {
        match editor.keypad_ok() {
            Ok(true) => {}
            Ok(false) => println!("keypad entry rejected by the supply"),
            Err(e) => println!("keypad error: {}", e),
        }
    }
    tick("keypad ok", &edit, &mut snapshot);

    edit.exit();

    let current = edit.binding().current_value(&ch1_current.parameter());
    println!("Ch1 current after session: {}", current);
    println!("Sanity run completed.");
}
