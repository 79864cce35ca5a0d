// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Ordering of state writes for a climate change.

use tracing::debug;

use crate::state::DeviceState;
use crate::types::{ClimateMode, FanSpeed, GatePosition};

/// Desired climate settings requested by the host.
///
/// # Examples
///
/// ```
/// use tion_lib::command::ClimateControl;
/// use tion_lib::state::DeviceState;
/// use tion_lib::types::ClimateMode;
///
/// let control = ClimateControl::from_state(&DeviceState::new()).with_mode(ClimateMode::Heat);
/// assert_eq!(control.mode, ClimateMode::Heat);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClimateControl {
    /// Requested mode; power and heater follow from it.
    pub mode: ClimateMode,
    /// Requested fan speed, `None` keeps the current raw value.
    pub fan_speed: Option<FanSpeed>,
    /// Requested heater target temperature.
    pub target_temperature: i8,
    /// Requested buzzer state.
    pub buzzer: bool,
    /// Requested gate position, `None` keeps the current raw value.
    pub gate_position: Option<GatePosition>,
}

impl ClimateControl {
    /// Captures the settings currently applied on the device.
    #[must_use]
    pub fn from_state(state: &DeviceState) -> Self {
        let mode = if !state.flags.power_state {
            ClimateMode::Off
        } else if state.flags.heater_state {
            ClimateMode::Heat
        } else {
            ClimateMode::FanOnly
        };

        Self {
            mode,
            fan_speed: FanSpeed::new(state.fan_speed).ok(),
            target_temperature: state.target_temperature,
            buzzer: state.flags.sound_state,
            gate_position: state.gate(),
        }
    }

    /// Sets the mode.
    #[must_use]
    pub fn with_mode(mut self, mode: ClimateMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the fan speed.
    #[must_use]
    pub fn with_fan_speed(mut self, fan_speed: FanSpeed) -> Self {
        self.fan_speed = Some(fan_speed);
        self
    }

    /// Sets the target temperature.
    #[must_use]
    pub fn with_target_temperature(mut self, target_temperature: i8) -> Self {
        self.target_temperature = target_temperature;
        self
    }

    /// Sets the buzzer.
    #[must_use]
    pub fn with_buzzer(mut self, buzzer: bool) -> Self {
        self.buzzer = buzzer;
        self
    }

    /// Sets the gate position.
    #[must_use]
    pub fn with_gate_position(mut self, gate: GatePosition) -> Self {
        self.gate_position = Some(gate);
        self
    }
}

/// Computes the ordered state writes that move `current` to `desired`.
///
/// The firmware mishandles a write that enables the heater while the fan
/// stays powered. When the heater is newly enabled on a powered fan, the
/// target state is written twice: first with power off, then with power on.
/// Every other change is a single write.
///
/// # Examples
///
/// ```
/// use tion_lib::command::{ClimateControl, build_commands};
/// use tion_lib::state::DeviceState;
/// use tion_lib::types::ClimateMode;
///
/// let mut current = DeviceState::new();
/// current.flags.power_state = true;
///
/// let desired = ClimateControl::from_state(&current).with_mode(ClimateMode::Heat);
/// let writes = build_commands(&current, &desired);
///
/// assert_eq!(writes.len(), 2);
/// assert!(!writes[0].flags.power_state);
/// assert!(writes[1].flags.power_state && writes[1].flags.heater_state);
/// ```
#[must_use]
pub fn build_commands(current: &DeviceState, desired: &ClimateControl) -> Vec<DeviceState> {
    let mut target = current.clone();

    target.flags.power_state = desired.mode.is_on();
    if current.flags.power_state != target.flags.power_state {
        debug!(power = target.flags.power_state, "New power state");
    }

    if let Some(speed) = desired.fan_speed {
        target.fan_speed = speed.value();
    }
    if current.fan_speed != target.fan_speed {
        debug!(fan_speed = target.fan_speed, "New fan speed");
    }

    target.target_temperature = desired.target_temperature;
    if current.target_temperature != target.target_temperature {
        debug!(
            target_temperature = target.target_temperature,
            "New target temperature"
        );
    }

    target.flags.sound_state = desired.buzzer;
    if current.flags.sound_state != target.flags.sound_state {
        debug!(sound = target.flags.sound_state, "New sound state");
    }

    if let Some(gate) = desired.gate_position {
        target.set_gate(gate);
    }
    if current.gate_position != target.gate_position {
        debug!(gate_position = target.gate_position, "New gate position");
    }

    target.flags.heater_state = desired.mode == ClimateMode::Heat;
    if current.flags.heater_state != target.flags.heater_state {
        debug!(heater = target.flags.heater_state, "New heater state");
    }

    if current.flags.power_state && !current.flags.heater_state && target.flags.heater_state {
        debug!("Switching to heat through a power-off write");
        let mut power_off = target.clone();
        power_off.flags.power_state = false;
        return vec![power_off, target];
    }

    vec![target]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(power: bool, heater: bool) -> DeviceState {
        let mut state = DeviceState::new();
        state.flags.power_state = power;
        state.flags.heater_state = heater;
        state.fan_speed = 2;
        state.target_temperature = 18;
        state
    }

    #[test]
    fn fan_to_heat_goes_through_power_off() {
        let current = state(true, false);
        let desired = ClimateControl::from_state(&current).with_mode(ClimateMode::Heat);

        let writes = build_commands(&current, &desired);

        assert_eq!(writes.len(), 2);
        assert!(!writes[0].flags.power_state);
        assert!(writes[0].flags.heater_state);
        assert!(writes[1].flags.power_state);
        assert!(writes[1].flags.heater_state);
    }

    #[test]
    fn off_to_heat_is_single_write() {
        let current = state(false, false);
        let desired = ClimateControl::from_state(&current).with_mode(ClimateMode::Heat);

        let writes = build_commands(&current, &desired);

        assert_eq!(writes.len(), 1);
        assert!(writes[0].flags.power_state);
        assert!(writes[0].flags.heater_state);
    }

    #[test]
    fn intermediate_write_carries_all_other_changes() {
        let current = state(true, false);
        let desired = ClimateControl::from_state(&current)
            .with_mode(ClimateMode::Heat)
            .with_fan_speed(FanSpeed::new(5).unwrap())
            .with_target_temperature(22)
            .with_buzzer(true)
            .with_gate_position(GatePosition::Indoor);

        let writes = build_commands(&current, &desired);

        assert_eq!(writes.len(), 2);
        for write in &writes {
            assert_eq!(write.fan_speed, 5);
            assert_eq!(write.target_temperature, 22);
            assert!(write.flags.sound_state);
            assert_eq!(write.gate(), Some(GatePosition::Indoor));
        }
        let mut restored = writes[0].clone();
        restored.flags.power_state = true;
        assert_eq!(restored, writes[1]);
    }

    #[test]
    fn heat_to_fan_is_single_write() {
        let current = state(true, true);
        let desired = ClimateControl::from_state(&current).with_mode(ClimateMode::FanOnly);

        let writes = build_commands(&current, &desired);

        assert_eq!(writes.len(), 1);
        assert!(writes[0].flags.power_state);
        assert!(!writes[0].flags.heater_state);
    }

    #[test]
    fn off_clears_power_and_heater() {
        let current = state(true, true);
        let desired = ClimateControl::from_state(&current).with_mode(ClimateMode::Off);

        let writes = build_commands(&current, &desired);

        assert_eq!(writes.len(), 1);
        assert!(!writes[0].flags.power_state);
        assert!(!writes[0].flags.heater_state);
    }

    #[test]
    fn unchanged_control_rewrites_current_state() {
        let mut current = state(true, true);
        current.firmware_version = 0x0040;
        current.outdoor_temperature = -5;

        let writes = build_commands(&current, &ClimateControl::from_state(&current));

        assert_eq!(writes, vec![current]);
    }

    #[test]
    fn unknown_fan_speed_is_kept() {
        let mut current = state(true, false);
        current.fan_speed = 12;
        current.gate_position = 9;

        let control = ClimateControl::from_state(&current);
        assert_eq!(control.fan_speed, None);

        let writes = build_commands(&current, &control.clone().with_buzzer(true));
        assert_eq!(writes.len(), 1);
        assert_eq!(writes[0].fan_speed, 12);
        assert_eq!(writes[0].gate_position, 9);
        assert!(writes[0].flags.sound_state);

        let writes = build_commands(&current, &control.with_fan_speed(FanSpeed::new(4).unwrap()));
        assert_eq!(writes[0].fan_speed, 4);
    }

    #[test]
    fn unmapped_gate_is_kept() {
        let mut current = state(true, false);
        current.gate_position = 9;

        let control = ClimateControl::from_state(&current);
        assert_eq!(control.gate_position, None);

        let writes = build_commands(&current, &control.with_fan_speed(FanSpeed::new(3).unwrap()));
        assert_eq!(writes[0].gate_position, 9);
    }
}
