// src/widgets/step.rs
//
// Step-size selector for the step buttons.

use crate::state::Unit;

/// Step sizes offered for voltage parameters, largest first.
pub const VOLTAGE_STEPS: [f32; 4] = [1.0, 0.5, 0.1, 0.01];

/// Step sizes offered for current parameters, largest first.
pub const CURRENT_STEPS: [f32; 4] = [0.5, 0.25, 0.1, 0.01];

/// Selected entry in the step table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepSelector {
    index: usize,
}

impl StepSelector {
    pub fn new(index: usize) -> Self {
        let mut selector = Self::default();
        selector.select(index);
        selector
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Select a step size; out-of-range indices pick the finest step.
    pub fn select(&mut self, index: usize) {
        self.index = index.min(VOLTAGE_STEPS.len() - 1);
    }

    /// Step table for values stored in `unit`.
    pub fn steps(unit: Unit) -> &'static [f32] {
        match unit.base() {
            Unit::Amper => &CURRENT_STEPS,
            _ => &VOLTAGE_STEPS,
        }
    }

    /// Size of one step for values stored in `unit`.
    pub fn step_size(&self, unit: Unit) -> f32 {
        let steps = Self::steps(unit);
        steps[self.index.min(steps.len() - 1)] / unit.to_base_factor()
    }

    /// Move `from` by `direction` steps.
    pub fn apply(&self, from: f32, unit: Unit, direction: i32) -> f32 {
        from + direction as f32 * self.step_size(unit)
    }
}
