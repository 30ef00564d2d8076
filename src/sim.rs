// src/sim.rs
//
// In-memory power supply model.
//
// Stands in for the firmware's channel data layer in the demo binary,
// the platform bindings and tests.

use log::debug;

use crate::binding::{DataBinding, ParamKind, ParameterRef, TimeCriticalHint};
use crate::state::Value;

// Default channel configuration
pub const DEFAULT_CHANNELS: usize = 2;
pub const DEFAULT_U_MAX: f32 = 40.0;
pub const DEFAULT_I_MAX: f32 = 5.0;

/// One output channel.
#[derive(Debug, Clone, PartialEq)]
pub struct SimChannel {
    /// Voltage set point (V).
    pub u_set: f32,
    /// Current set point (A).
    pub i_set: f32,
    /// Largest settable voltage (V).
    pub u_max: f32,
    /// Largest settable current (A).
    pub i_max: f32,
    /// Software voltage limit; pushes above it are rejected.
    pub u_limit: f32,
    /// Software current limit; pushes above it are rejected.
    pub i_limit: f32,
}

impl Default for SimChannel {
    fn default() -> Self {
        Self {
            u_set: 0.0,
            i_set: 0.0,
            u_max: DEFAULT_U_MAX,
            i_max: DEFAULT_I_MAX,
            u_limit: DEFAULT_U_MAX,
            i_limit: DEFAULT_I_MAX,
        }
    }
}

impl SimChannel {
    fn value(&self, param: ParamKind) -> f32 {
        match param {
            ParamKind::Voltage => self.u_set,
            ParamKind::Current => self.i_set,
        }
    }

    fn max(&self, param: ParamKind) -> f32 {
        match param {
            ParamKind::Voltage => self.u_max,
            ParamKind::Current => self.i_max,
        }
    }

    fn limit(&self, param: ParamKind) -> f32 {
        match param {
            ParamKind::Voltage => self.u_limit,
            ParamKind::Current => self.i_limit,
        }
    }
}

/// A power supply with a fixed set of channels.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulatedPsu {
    channels: Vec<SimChannel>,
}

impl SimulatedPsu {
    pub fn new(num_channels: usize) -> Self {
        Self {
            channels: vec![SimChannel::default(); num_channels],
        }
    }

    pub fn channels(&self) -> &[SimChannel] {
        &self.channels
    }

    pub fn channel(&self, index: usize) -> Option<&SimChannel> {
        self.channels.get(index)
    }

    pub fn channel_mut(&mut self, index: usize) -> Option<&mut SimChannel> {
        self.channels.get_mut(index)
    }
}

impl Default for SimulatedPsu {
    fn default() -> Self {
        Self::new(DEFAULT_CHANNELS)
    }
}

impl DataBinding for SimulatedPsu {
    fn current_value(&self, target: &ParameterRef) -> Value {
        let magnitude = self
            .channel(target.cursor.channel)
            .map_or(0.0, |ch| ch.value(target.param));
        Value::new(magnitude, target.param.unit())
    }

    fn min(&self, target: &ParameterRef) -> Value {
        Value::new(0.0, target.param.unit())
    }

    fn max(&self, target: &ParameterRef) -> Value {
        let magnitude = self
            .channel(target.cursor.channel)
            .map_or(0.0, |ch| ch.max(target.param));
        Value::new(magnitude, target.param.unit())
    }

    fn try_set(&mut self, target: &ParameterRef, value: Value) -> bool {
        let Some(channel) = self.channels.get_mut(target.cursor.channel) else {
            debug!("sim: no channel for {}", target);
            return false;
        };
        if value.unit != target.param.unit() || !value.magnitude.is_finite() {
            debug!("sim: {} cannot take {}", target, value);
            return false;
        }
        if value.magnitude < 0.0 || value.magnitude > channel.limit(target.param) {
            debug!("sim: {} = {} outside limit", target, value);
            return false;
        }
        match target.param {
            ParamKind::Voltage => channel.u_set = value.magnitude,
            ParamKind::Current => channel.i_set = value.magnitude,
        }
        true
    }
}

/// Records the time-critical scheduling hint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeCriticalFlag {
    active: bool,
    transitions: u32,
}

impl TimeCriticalFlag {
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Number of enter and leave signals that changed the flag.
    pub fn transitions(&self) -> u32 {
        self.transitions
    }
}

impl TimeCriticalHint for TimeCriticalFlag {
    fn enter_time_critical_mode(&mut self) {
        if !self.active {
            self.active = true;
            self.transitions += 1;
        }
    }

    fn leave_time_critical_mode(&mut self) {
        if self.active {
            self.active = false;
            self.transitions += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::Cursor;
    use crate::state::Unit;

    fn voltage(channel: usize) -> ParameterRef {
        ParameterRef::new(Cursor::channel(channel), ParamKind::Voltage)
    }

    #[test]
    fn test_defaults() {
        let psu = SimulatedPsu::default();
        assert_eq!(psu.channels().len(), DEFAULT_CHANNELS);
        assert_eq!(psu.max(&voltage(0)), Value::volts(DEFAULT_U_MAX));
        assert_eq!(psu.min(&voltage(1)), Value::volts(0.0));
        assert_eq!(psu.current_value(&voltage(0)), Value::volts(0.0));
    }

    #[test]
    fn test_try_set_accepts_within_limit() {
        let mut psu = SimulatedPsu::default();
        assert!(psu.try_set(&voltage(0), Value::volts(12.0)));
        assert_eq!(psu.channel(0).unwrap().u_set, 12.0);
        assert_eq!(psu.channel(1).unwrap().u_set, 0.0);
    }

    #[test]
    fn test_try_set_rejections() {
        let mut psu = SimulatedPsu::default();
        psu.channel_mut(0).unwrap().u_limit = 10.0;

        assert!(!psu.try_set(&voltage(0), Value::volts(10.5)));
        assert!(!psu.try_set(&voltage(0), Value::volts(f32::NAN)));
        assert!(!psu.try_set(&voltage(0), Value::new(1.0, Unit::Amper)));
        assert!(!psu.try_set(&voltage(5), Value::volts(1.0)));
        assert_eq!(psu.channel(0).unwrap().u_set, 0.0);
    }

    #[test]
    fn test_time_critical_flag_pairs() {
        let mut flag = TimeCriticalFlag::default();
        flag.leave_time_critical_mode();
        assert_eq!(flag.transitions(), 0);

        flag.enter_time_critical_mode();
        flag.enter_time_critical_mode();
        assert!(flag.is_active());
        flag.leave_time_critical_mode();
        flag.leave_time_critical_mode();
        assert!(!flag.is_active());
        assert_eq!(flag.transitions(), 2);
    }
}
