//! Edit mode controller.
//!
//! [`EditMode`] owns the edit session for one front panel. The navigation
//! layer calls [`EditMode::enter`] and [`EditMode::exit`]; input handlers
//! obtain an [`Editor`] through [`EditMode::editor`], which only exists
//! while a parameter is bound.
//!
//! # Apply policy
//!
//! - **Interactive**: every slider/step change is pushed to the device.
//! - **Non-interactive**: slider/step changes are buffered until
//!   [`Editor::non_interactive_set`] or [`Editor::non_interactive_discard`].
//! - Keypad entries are always pushed immediately.
//!
//! # Usage
//!
//! ```ignore
//! let mut edit = EditMode::new(psu, ());
//! edit.enter(Some(InputMode::Step), Some(&touched));
//! if let Some(mut editor) = edit.editor() {
//!     editor.step(1);
//! }
//! edit.exit();
//! ```

use log::{debug, warn};

use crate::binding::{DataBinding, TimeCriticalHint, WidgetRef};
use crate::config::EditConfig;
use crate::state::{ActiveEdit, EditSession, InputMode, Value};
use crate::widgets::{Keypad, KeypadError, KeypadResult, StepSelector, slider};

/// Page the navigation layer should be showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Main,
    EditSlider,
    EditStep,
    EditKeypad,
}

impl From<InputMode> for Page {
    fn from(mode: InputMode) -> Self {
        match mode {
            InputMode::Slider => Page::EditSlider,
            InputMode::Step => Page::EditStep,
            InputMode::Keypad => Page::EditKeypad,
        }
    }
}

/// Owner of the edit session and its input sub-widgets.
pub struct EditMode<B, H = ()> {
    /// Device data access.
    binding: B,

    /// Scheduling hint, entered while a session is open.
    hint: H,

    session: EditSession,

    /// Apply-immediately policy. Persists across sessions.
    interactive: bool,

    /// Mode used when `enter` is called without one.
    last_mode: InputMode,

    keypad: Keypad,
    steps: StepSelector,
}

impl<B: DataBinding, H: TimeCriticalHint> EditMode<B, H> {
    pub fn new(binding: B, hint: H) -> Self {
        Self::with_config(binding, hint, EditConfig::default())
    }

    pub fn with_config(binding: B, hint: H, config: EditConfig) -> Self {
        Self {
            binding,
            hint,
            session: EditSession::Inactive,
            interactive: config.interactive,
            last_mode: config.initial_mode,
            keypad: Keypad::new(),
            steps: StepSelector::new(config.step_index),
        }
    }

    // ═══════════════════════════════════════════════════════════════════
    // Navigation
    // ═══════════════════════════════════════════════════════════════════

    /// Open the edit page in `mode`, or switch the open page to it.
    ///
    /// `None` re-uses the last requested mode. When no session is open the
    /// parameter is taken from the `touched` widget. Values and bounds are
    /// (re)fetched from the device each time the page changes.
    pub fn enter(&mut self, mode: Option<InputMode>, touched: Option<&WidgetRef>) {
        let mode = mode.unwrap_or(self.last_mode);
        self.last_mode = mode;

        if self.active_page() == Page::from(mode) {
            return;
        }

        let (target, opening) = match (&self.session, touched) {
            (EditSession::Active(edit), _) => (edit.target, false),
            (EditSession::Inactive, Some(widget)) => (widget.parameter(), true),
            (EditSession::Inactive, None) => {
                warn!("edit mode: enter({}) without a touched widget", mode);
                return;
            }
        };

        let current = self.binding.current_value(&target);
        let edit = ActiveEdit {
            target,
            mode,
            edit_value: current,
            undo_value: current,
            min: self.binding.min(&target),
            max: self.binding.max(&target),
        };
        debug!(
            "edit mode: {} {} = {} [{} .. {}]",
            mode, target, edit.edit_value, edit.min, edit.max
        );

        if mode == InputMode::Keypad {
            self.keypad.reset(current.unit);
        }

        self.session = EditSession::Active(edit);

        if opening {
            self.hint.enter_time_critical_mode();
        }
    }

    /// Close the edit page. Does nothing when no session is open.
    pub fn exit(&mut self) {
        if let EditSession::Active(edit) = &self.session {
            debug!("edit mode: exit {}", edit.target);
            self.session = EditSession::Inactive;
            self.hint.leave_time_critical_mode();
        }
    }

    /// Access to the active session, if any.
    pub fn editor(&mut self) -> Option<Editor<'_, B>> {
        let EditSession::Active(edit) = &mut self.session else {
            return None;
        };
        Some(Editor {
            edit,
            binding: &mut self.binding,
            interactive: &mut self.interactive,
            keypad: &mut self.keypad,
            steps: &mut self.steps,
        })
    }

    // ═══════════════════════════════════════════════════════════════════
    // Queries
    // ═══════════════════════════════════════════════════════════════════

    pub fn is_active(&self) -> bool {
        self.session.is_active()
    }

    pub fn session(&self) -> &EditSession {
        &self.session
    }

    pub fn active_page(&self) -> Page {
        match &self.session {
            EditSession::Active(edit) => Page::from(edit.mode),
            EditSession::Inactive => Page::Main,
        }
    }

    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    /// Live device value of the bound parameter.
    pub fn current_value(&self) -> Option<Value> {
        self.session
            .target()
            .map(|target| self.binding.current_value(target))
    }

    /// Whether `widget` shows the parameter being edited.
    pub fn is_edit_widget(&self, widget: &WidgetRef) -> bool {
        self.session
            .target()
            .is_some_and(|target| *target == widget.parameter())
    }

    pub fn keypad(&self) -> &Keypad {
        &self.keypad
    }

    pub fn steps(&self) -> &StepSelector {
        &self.steps
    }

    pub fn binding(&self) -> &B {
        &self.binding
    }

    pub fn binding_mut(&mut self) -> &mut B {
        &mut self.binding
    }

    pub fn hint(&self) -> &H {
        &self.hint
    }
}

/// Operations on an open edit session.
///
/// Borrowed from [`EditMode::editor`]; holding one proves a parameter is
/// bound.
pub struct Editor<'a, B> {
    edit: &'a mut ActiveEdit,
    binding: &'a mut B,
    interactive: &'a mut bool,
    keypad: &'a mut Keypad,
    steps: &'a mut StepSelector,
}

impl<B: DataBinding> Editor<'_, B> {
    pub fn state(&self) -> &ActiveEdit {
        self.edit
    }

    pub fn edit_value(&self) -> Value {
        self.edit.edit_value
    }

    pub fn is_interactive(&self) -> bool {
        *self.interactive
    }

    /// Offer a new value.
    ///
    /// The candidate is clamped to the session bounds. It is pushed to the
    /// device right away in interactive mode and always in keypad mode; a
    /// rejected push leaves the edit value unchanged. Otherwise the value
    /// is only buffered.
    ///
    /// Returns `false` when the device rejected the value.
    pub fn set_value(&mut self, candidate: f32) -> bool {
        let value = self.edit.candidate(candidate);

        if *self.interactive || self.edit.mode == InputMode::Keypad {
            if !self.binding.try_set(&self.edit.target, value) {
                debug!("edit mode: {} rejected {}", self.edit.target, value);
                return false;
            }
        }

        self.edit.edit_value = value;
        true
    }

    /// Flip the apply policy and drop any buffered edit.
    pub fn toggle_interactive_mode(&mut self) {
        *self.interactive = !*self.interactive;
        let current = self.binding.current_value(&self.edit.target);
        self.edit.reset_to(current);
        debug!(
            "edit mode: interactive={} {} = {}",
            *self.interactive, self.edit.target, current
        );
    }

    /// Commit the buffered value to the device.
    pub fn non_interactive_set(&mut self) {
        debug!("edit mode: commit {} = {}", self.edit.target, self.edit.edit_value);
        if !self.binding.try_set(&self.edit.target, self.edit.edit_value) {
            debug!("edit mode: {} rejected commit", self.edit.target);
        }
    }

    /// Restore the value present when the session was entered.
    pub fn non_interactive_discard(&mut self) {
        debug!("edit mode: discard {} -> {}", self.edit.target, self.edit.undo_value);
        self.edit.edit_value = self.edit.undo_value;
        if !self.binding.try_set(&self.edit.target, self.edit.undo_value) {
            debug!("edit mode: {} rejected discard", self.edit.target);
        }
    }

    // ═══════════════════════════════════════════════════════════════════
    // Input sub-widgets
    // ═══════════════════════════════════════════════════════════════════

    /// Move the value by `direction` steps of the selected size.
    pub fn step(&mut self, direction: i32) -> bool {
        let value = self.edit.edit_value;
        let next = self.steps.apply(value.magnitude, value.unit, direction);
        self.set_value(next)
    }

    pub fn select_step(&mut self, index: usize) {
        self.steps.select(index);
    }

    /// Follow the slider to `position` in `[0, 1]`.
    pub fn slide_to(&mut self, position: f32) -> bool {
        let value = slider::position_to_value(position, self.edit.min, self.edit.max);
        self.set_value(value)
    }

    /// Slider position of the edit value.
    pub fn slider_position(&self) -> f32 {
        slider::value_to_position(self.edit.edit_value, self.edit.min, self.edit.max)
    }

    pub fn keypad_mut(&mut self) -> &mut Keypad {
        self.keypad
    }

    /// Apply the keypad entry.
    ///
    /// Only valid on the keypad page. The typed text is converted to the
    /// session unit and goes through [`Editor::set_value`]. The buffer is
    /// cleared once the device accepts the value; a parse error or a
    /// rejected value leaves everything unchanged. Returns whether the
    /// device accepted the value.
    pub fn keypad_ok(&mut self) -> KeypadResult<bool> {
        if self.edit.mode != InputMode::Keypad {
            return Err(KeypadError::NotOpen);
        }
        let value = self.keypad.value(self.edit.edit_value.unit)?;
        if !self.set_value(value) {
            return Ok(false);
        }
        self.keypad.clear();
        Ok(true)
    }
}
