// C-compatible FFI bindings for Swift/iOS integration.
//
// Safety requirements:
// - All pointers must be non-null unless documented otherwise
// - All handles must be created by this module and not fabricated
// - Caller must call psu_edit_destroy for each psu_edit_create

use std::ffi::c_char;

use crate::binding::{Cursor, ParamKind, WidgetRef};
use crate::config::EditConfig;
use crate::edit_mode::{EditMode, Page};
use crate::sim::{SimulatedPsu, TimeCriticalFlag};
use crate::snapshot::{DataId, Snapshot};
use crate::state::{InputMode, Unit};

use log::{LevelFilter, debug};
use oslog::OsLogger;

// Logger subsystem identifier
const LOG_SUBSYSTEM: &str = "com.psu.editmode";

// ═══════════════════════════════════════════════════════════════════════════
// Logger Initialization
// ═══════════════════════════════════════════════════════════════════════════

/// Initialize the oslog logger.
///
/// Call once at application startup before using any other FFI function.
#[unsafe(no_mangle)]
pub extern "C" fn psu_edit_init_logger() {
    OsLogger::new(LOG_SUBSYSTEM)
        .level_filter(LevelFilter::Debug)
        .init()
        .ok();
}

// ═══════════════════════════════════════════════════════════════════════════
// Opaque Handle Types
// ═══════════════════════════════════════════════════════════════════════════

/// Opaque handle to a front panel: edit mode plus its render snapshot.
pub struct PsuEditPanel {
    edit: EditMode<SimulatedPsu, TimeCriticalFlag>,
    snapshot: Snapshot,
}

// ═══════════════════════════════════════════════════════════════════════════
// FFI Value Types
// ═══════════════════════════════════════════════════════════════════════════

/// Input mode codes: 0 = slider, 1 = step, 2 = keypad. Anything else
/// means "last used mode".
fn mode_from_code(code: u32) -> Option<InputMode> {
    match code {
        0 => Some(InputMode::Slider),
        1 => Some(InputMode::Step),
        2 => Some(InputMode::Keypad),
        _ => None,
    }
}

/// Page codes: 0 = main, 1 = slider, 2 = step, 3 = keypad.
fn page_code(page: Page) -> u32 {
    match page {
        Page::Main => 0,
        Page::EditSlider => 1,
        Page::EditStep => 2,
        Page::EditKeypad => 3,
    }
}

fn unit_code(unit: Unit) -> u32 {
    match unit {
        Unit::None => 0,
        Unit::Volt => 1,
        Unit::MilliVolt => 2,
        Unit::Amper => 3,
        Unit::MilliAmper => 4,
    }
}

/// Snapshot data for the Swift renderer.
#[repr(C)]
pub struct PsuEditSnapshot {
    pub page: u32,
    pub edit_value: f32,
    pub edit_unit: u32,
    pub interactive_mode_selector: u32,
    pub step_index: u32,
    pub blinking: bool,
}

// ═══════════════════════════════════════════════════════════════════════════
// Lifecycle
// ═══════════════════════════════════════════════════════════════════════════

/// Create a front panel over a simulated supply with `num_channels` channels.
///
/// Returns an opaque pointer that must be freed with `psu_edit_destroy`.
#[unsafe(no_mangle)]
pub extern "C" fn psu_edit_create(num_channels: u32, interactive: bool) -> *mut PsuEditPanel {
    let psu = SimulatedPsu::new(num_channels as usize);
    let config = EditConfig::new().interactive(interactive);
    let panel = PsuEditPanel {
        edit: EditMode::with_config(psu, TimeCriticalFlag::default(), config),
        snapshot: Snapshot::new(),
    };
    debug!("psu_edit_create: channels={}", num_channels);
    Box::into_raw(Box::new(panel))
}

/// Destroy a front panel.
///
/// # Safety
/// `panel` must be a pointer returned by `psu_edit_create`, or null.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn psu_edit_destroy(panel: *mut PsuEditPanel) {
    if !panel.is_null() {
        drop(unsafe { Box::from_raw(panel) });
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Navigation
// ═══════════════════════════════════════════════════════════════════════════

/// Open the edit page for a touched widget, or switch the open page.
///
/// `param` is 0 for voltage and 1 for current.
///
/// # Safety
/// `panel` must be a valid pointer from `psu_edit_create`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn psu_edit_enter(
    panel: *mut PsuEditPanel,
    mode: u32,
    channel: u32,
    param: u32,
) {
    if panel.is_null() {
        return;
    }
    let data = if param == 0 {
        ParamKind::Voltage
    } else {
        ParamKind::Current
    };
    let widget = WidgetRef::new(Cursor::channel(channel as usize), data);
    unsafe { (*panel).edit.enter(mode_from_code(mode), Some(&widget)) };
}

/// Close the edit page.
///
/// # Safety
/// `panel` must be a valid pointer from `psu_edit_create`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn psu_edit_exit(panel: *mut PsuEditPanel) {
    if panel.is_null() {
        return;
    }
    unsafe { (*panel).edit.exit() };
}

// ═══════════════════════════════════════════════════════════════════════════
// Editing
// ═══════════════════════════════════════════════════════════════════════════

/// Offer a new value for the edited parameter.
///
/// # Safety
/// `panel` must be a valid pointer from `psu_edit_create`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn psu_edit_set_value(panel: *mut PsuEditPanel, value: f32) {
    if panel.is_null() {
        return;
    }
    if let Some(mut editor) = unsafe { (*panel).edit.editor() } {
        editor.set_value(value);
    }
}

/// Move the value by `direction` steps.
///
/// # Safety
/// `panel` must be a valid pointer from `psu_edit_create`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn psu_edit_step(panel: *mut PsuEditPanel, direction: i32) {
    if panel.is_null() {
        return;
    }
    if let Some(mut editor) = unsafe { (*panel).edit.editor() } {
        editor.step(direction);
    }
}

/// Follow the slider to `position` in [0, 1].
///
/// # Safety
/// `panel` must be a valid pointer from `psu_edit_create`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn psu_edit_slide(panel: *mut PsuEditPanel, position: f32) {
    if panel.is_null() {
        return;
    }
    if let Some(mut editor) = unsafe { (*panel).edit.editor() } {
        editor.slide_to(position);
    }
}

/// Flip between interactive and deferred apply.
///
/// # Safety
/// `panel` must be a valid pointer from `psu_edit_create`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn psu_edit_toggle_interactive(panel: *mut PsuEditPanel) {
    if panel.is_null() {
        return;
    }
    if let Some(mut editor) = unsafe { (*panel).edit.editor() } {
        editor.toggle_interactive_mode();
    }
}

/// Commit the buffered value.
///
/// # Safety
/// `panel` must be a valid pointer from `psu_edit_create`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn psu_edit_commit(panel: *mut PsuEditPanel) {
    if panel.is_null() {
        return;
    }
    if let Some(mut editor) = unsafe { (*panel).edit.editor() } {
        editor.non_interactive_set();
    }
}

/// Restore the value present when the page was opened.
///
/// # Safety
/// `panel` must be a valid pointer from `psu_edit_create`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn psu_edit_discard(panel: *mut PsuEditPanel) {
    if panel.is_null() {
        return;
    }
    if let Some(mut editor) = unsafe { (*panel).edit.editor() } {
        editor.non_interactive_discard();
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Rendering
// ═══════════════════════════════════════════════════════════════════════════

/// Take the per-tick snapshot and copy it to `out`.
///
/// # Safety
/// `panel` must be a valid pointer from `psu_edit_create`; `out` must point
/// to writable memory for one `PsuEditSnapshot`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn psu_edit_take_snapshot(
    panel: *mut PsuEditPanel,
    out: *mut PsuEditSnapshot,
) -> bool {
    if panel.is_null() || out.is_null() {
        return false;
    }
    let panel = unsafe { &mut *panel };
    panel.snapshot.take(&panel.edit);

    let snapshot = &panel.snapshot;
    let data = PsuEditSnapshot {
        page: page_code(panel.edit.active_page()),
        edit_value: snapshot.edit_value.magnitude,
        edit_unit: unit_code(snapshot.edit_value.unit),
        interactive_mode_selector: snapshot.interactive_mode_selector as u32,
        step_index: snapshot.step_index as u32,
        blinking: snapshot
            .is_blinking(&panel.edit, DataId::EditValue)
            .unwrap_or(false),
    };
    unsafe { out.write(data) };
    panel.edit.is_active()
}

/// Copy the snapshot's info text into `buf` as a NUL-terminated string.
///
/// Returns the number of bytes written, excluding the terminator.
///
/// # Safety
/// `panel` must be a valid pointer from `psu_edit_create`; `buf` must point
/// to `len` writable bytes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn psu_edit_info_text(
    panel: *const PsuEditPanel,
    buf: *mut c_char,
    len: usize,
) -> usize {
    if panel.is_null() || buf.is_null() || len == 0 {
        return 0;
    }
    let text = unsafe { &(*panel).snapshot.info_text };
    let n = text.len().min(len - 1);
    unsafe {
        std::ptr::copy_nonoverlapping(text.as_ptr().cast::<c_char>(), buf, n);
        *buf.add(n) = 0;
    }
    n
}
