//! WebAssembly bindings via wasm-bindgen for a browser front-panel simulator.
//!
//! This module is only compiled when the `web` feature is enabled.
//!
//! # Usage
//!
//! Build with wasm-pack:
//! ```bash
//! wasm-pack build --target web --features web
//! ```
//!
//! # JavaScript Example
//!
//! ```javascript
//! import init, { psu_edit_init, FrontPanel, PanelMode, PanelParam } from './psu_edit.js';
//!
//! await init();
//! psu_edit_init();
//!
//! const panel = new FrontPanel(2, false);
//! panel.enter(PanelMode.Step, 0, PanelParam.Voltage);
//! panel.step(1);
//!
//! // once per animation frame
//! const snap = panel.take_snapshot();
//! draw(snap.edit_value, panel.info_text(), snap.blinking);
//! ```

use wasm_bindgen::prelude::*;

use crate::binding::{Cursor, ParamKind, WidgetRef};
use crate::config::EditConfig;
use crate::edit_mode::{EditMode, Page};
use crate::sim::{SimulatedPsu, TimeCriticalFlag};
use crate::snapshot::{DataId, Snapshot};
use crate::state::InputMode;

/// Input method of the edit page.
#[wasm_bindgen]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PanelMode {
    Slider = 0,
    Step = 1,
    Keypad = 2,
}

impl From<PanelMode> for InputMode {
    fn from(mode: PanelMode) -> Self {
        match mode {
            PanelMode::Slider => InputMode::Slider,
            PanelMode::Step => InputMode::Step,
            PanelMode::Keypad => InputMode::Keypad,
        }
    }
}

/// Channel parameter a widget shows.
#[wasm_bindgen]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PanelParam {
    Voltage = 0,
    Current = 1,
}

impl From<PanelParam> for ParamKind {
    fn from(param: PanelParam) -> Self {
        match param {
            PanelParam::Voltage => ParamKind::Voltage,
            PanelParam::Current => ParamKind::Current,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Initialization
// ═══════════════════════════════════════════════════════════════════════════

/// Initialize the wasm module. Call this once before using any other functions.
/// Sets up panic hooks and console logging.
#[wasm_bindgen]
pub fn psu_edit_init() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Debug).ok();
}

// ═══════════════════════════════════════════════════════════════════════════
// Snapshot Data
// ═══════════════════════════════════════════════════════════════════════════

/// Per-frame render data.
#[wasm_bindgen]
#[derive(Clone, Copy, Default)]
pub struct FrontPanelSnapshot {
    /// Whether an edit page is open.
    pub active: bool,
    /// Edit value magnitude in the parameter's unit.
    pub edit_value: f32,
    /// 0 when interactive, 1 otherwise.
    pub interactive_mode_selector: u32,
    /// Selected step size.
    pub step_index: u32,
    /// Whether the edit value should blink (uncommitted change).
    pub blinking: bool,
}

// ═══════════════════════════════════════════════════════════════════════════
// Front Panel
// ═══════════════════════════════════════════════════════════════════════════

/// Edit mode over a simulated power supply.
#[wasm_bindgen]
pub struct FrontPanel {
    edit: EditMode<SimulatedPsu, TimeCriticalFlag>,
    snapshot: Snapshot,
}

#[wasm_bindgen]
impl FrontPanel {
    #[wasm_bindgen(constructor)]
    pub fn new(num_channels: u32, interactive: bool) -> FrontPanel {
        let config = EditConfig::new().interactive(interactive);
        FrontPanel {
            edit: EditMode::with_config(
                SimulatedPsu::new(num_channels as usize),
                TimeCriticalFlag::default(),
                config,
            ),
            snapshot: Snapshot::new(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────────────────────

    /// Open the edit page for a touched widget, or switch the open page.
    pub fn enter(&mut self, mode: PanelMode, channel: u32, param: PanelParam) {
        let widget = WidgetRef::new(Cursor::channel(channel as usize), param.into());
        self.edit.enter(Some(mode.into()), Some(&widget));
    }

    /// Like `enter`, with the last used input method.
    pub fn enter_last_mode(&mut self, channel: u32, param: PanelParam) {
        let widget = WidgetRef::new(Cursor::channel(channel as usize), param.into());
        self.edit.enter(None, Some(&widget));
    }

    pub fn exit(&mut self) {
        self.edit.exit();
    }

    pub fn is_active(&self) -> bool {
        self.edit.is_active()
    }

    /// Whether the main page is showing.
    pub fn on_main_page(&self) -> bool {
        self.edit.active_page() == Page::Main
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Editing
    // ─────────────────────────────────────────────────────────────────────────

    pub fn set_value(&mut self, value: f32) {
        if let Some(mut editor) = self.edit.editor() {
            editor.set_value(value);
        }
    }

    pub fn step(&mut self, direction: i32) {
        if let Some(mut editor) = self.edit.editor() {
            editor.step(direction);
        }
    }

    pub fn select_step(&mut self, index: u32) {
        if let Some(mut editor) = self.edit.editor() {
            editor.select_step(index as usize);
        }
    }

    pub fn slide(&mut self, position: f32) {
        if let Some(mut editor) = self.edit.editor() {
            editor.slide_to(position);
        }
    }

    /// Current slider position of the edit value, 0 when no page is open.
    pub fn slider_position(&mut self) -> f32 {
        self.edit
            .editor()
            .map_or(0.0, |editor| editor.slider_position())
    }

    /// Type a key on the keypad: '0'..'9', '.', 'b' (backspace), 'u' (unit).
    pub fn keypad_key(&mut self, key: char) {
        if let Some(mut editor) = self.edit.editor() {
            let keypad = editor.keypad_mut();
            match key {
                '.' => keypad.push_point(),
                'b' => keypad.backspace(),
                'u' => keypad.switch_unit(),
                c => {
                    if let Some(digit) = c.to_digit(10) {
                        keypad.push_digit(digit as u8);
                    }
                }
            }
        }
    }

    /// Apply the keypad entry. Returns whether the supply accepted the
    /// value, or an error message for bad input.
    pub fn keypad_ok(&mut self) -> Result<bool, JsValue> {
        match self.edit.editor() {
            Some(mut editor) => editor
                .keypad_ok()
                .map_err(|e| JsValue::from_str(&e.to_string())),
            None => Ok(false),
        }
    }

    pub fn toggle_interactive(&mut self) {
        if let Some(mut editor) = self.edit.editor() {
            editor.toggle_interactive_mode();
        }
    }

    pub fn commit(&mut self) {
        if let Some(mut editor) = self.edit.editor() {
            editor.non_interactive_set();
        }
    }

    pub fn discard(&mut self) {
        if let Some(mut editor) = self.edit.editor() {
            editor.non_interactive_discard();
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Rendering
    // ─────────────────────────────────────────────────────────────────────────

    /// Take the per-frame snapshot.
    pub fn take_snapshot(&mut self) -> FrontPanelSnapshot {
        self.snapshot.take(&self.edit);
        FrontPanelSnapshot {
            active: self.edit.is_active(),
            edit_value: self.snapshot.edit_value.magnitude,
            interactive_mode_selector: self.snapshot.interactive_mode_selector as u32,
            step_index: self.snapshot.step_index as u32,
            blinking: self
                .snapshot
                .is_blinking(&self.edit, DataId::EditValue)
                .unwrap_or(false),
        }
    }

    pub fn info_text(&self) -> String {
        self.snapshot.info_text.clone()
    }

    pub fn unit_label(&self) -> String {
        self.snapshot.unit_label.to_string()
    }

    pub fn keypad_text(&self) -> String {
        self.snapshot.keypad_text.clone()
    }
}
