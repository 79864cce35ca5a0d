// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device state tracking.

use crate::types::{FanSpeed, GatePosition};

use super::StateFlags;

/// Decoded register snapshot of a Tion 3S breezer.
///
/// One instance exists per connected unit. It starts zeroed and is replaced
/// wholesale every time a state frame is decoded.
///
/// Temperatures are whole degrees Celsius as reported by the device. The fan
/// speed and gate position are 4-bit fields on the wire, so values up to 15
/// survive encoding even though only 0-9 and 0-3 are meaningful.
///
/// # Examples
///
/// ```
/// use tion_lib::state::DeviceState;
/// use tion_lib::types::GatePosition;
///
/// let mut state = DeviceState::new();
/// state.set_gate(GatePosition::Indoor);
/// assert_eq!(state.gate(), Some(GatePosition::Indoor));
///
/// state.gate_position = 7;
/// assert_eq!(state.gate(), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DeviceState {
    /// Raw fan speed level.
    pub fan_speed: u8,
    /// Raw air intake gate position.
    pub gate_position: u8,
    /// Heater target temperature.
    pub target_temperature: i8,
    /// Boolean flags.
    pub flags: StateFlags,
    /// Undocumented temperature sensor.
    pub unknown_temperature: i8,
    /// Temperature of the incoming outdoor air.
    pub outdoor_temperature: i8,
    /// Temperature of the supplied air.
    pub current_temperature: i8,
    /// Days until the filter must be replaced.
    pub filter_time_left: u16,
    /// Timer hours.
    pub hours: u8,
    /// Timer minutes.
    pub minutes: u8,
    /// Last error code, 0 if none.
    pub last_error: u8,
    /// Airflow counter.
    pub productivity: u8,
    /// Days the filter has been in use.
    pub filter_days: u16,
    /// Firmware version, e.g. `0x003C`.
    pub firmware_version: u16,
}

impl DeviceState {
    /// Creates a new zeroed device state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the gate position, or `None` if the raw value has no mapping.
    #[must_use]
    pub fn gate(&self) -> Option<GatePosition> {
        GatePosition::try_from(self.gate_position).ok()
    }

    /// Sets the gate position.
    pub fn set_gate(&mut self, gate: GatePosition) {
        self.gate_position = gate.raw();
    }

    /// Returns the fan speed as a climate level.
    #[must_use]
    pub fn speed(&self) -> FanSpeed {
        FanSpeed::from_raw(self.fan_speed)
    }

    /// Returns `true` if the fan is powered.
    #[must_use]
    pub fn is_on(&self) -> bool {
        self.flags.power_state
    }

    /// Returns `true` if the heater is enabled on a powered fan.
    #[must_use]
    pub fn is_heating_enabled(&self) -> bool {
        self.flags.power_state && self.flags.heater_state
    }

    /// Clears all state, resetting to zero.
    pub fn clear(&mut self) {
        *self = Self::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_state_is_zeroed() {
        let state = DeviceState::new();
        assert!(!state.is_on());
        assert_eq!(state.firmware_version, 0);
        assert_eq!(state.gate(), Some(GatePosition::None));
        assert_eq!(state.speed(), FanSpeed::UNKNOWN);
    }

    #[test]
    fn heater_needs_power() {
        let mut state = DeviceState::new();
        state.flags.heater_state = true;
        assert!(!state.is_heating_enabled());

        state.flags.power_state = true;
        assert!(state.is_heating_enabled());
    }

    #[test]
    fn unmapped_gate_has_no_position() {
        let mut state = DeviceState::new();
        state.gate_position = 4;
        assert_eq!(state.gate(), None);
    }

    #[test]
    fn clear_resets_state() {
        let mut state = DeviceState::new();
        state.fan_speed = 3;
        state.flags.power_state = true;

        state.clear();

        assert_eq!(state, DeviceState::new());
    }
}
