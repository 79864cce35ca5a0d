// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Climate projection of the device state.

use crate::state::DeviceState;
use crate::types::{ClimateAction, ClimateMode, FanSpeed};

/// Minimum difference between target and outdoor temperature, in degrees,
/// for the heater to count as actually heating.
pub const HEATING_MARGIN: i16 = 3;

/// Read-only climate view derived from a [`DeviceState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ClimateView {
    /// Operating mode.
    pub mode: ClimateMode,
    /// Current action.
    pub action: ClimateAction,
    /// Supplied air temperature.
    pub current_temperature: i8,
    /// Heater target temperature.
    pub target_temperature: i8,
    /// Fan speed level.
    pub fan_speed: FanSpeed,
}

impl ClimateView {
    /// Returns the fan mode token shown by the climate entity.
    #[must_use]
    pub fn fan_mode(&self) -> String {
        self.fan_speed.token()
    }
}

/// Projects a device state onto the climate entity.
///
/// The heater counts as heating only when the target is more than
/// [`HEATING_MARGIN`] degrees above the outdoor air and the supplied air is
/// warmer than the outdoor air.
///
/// # Examples
///
/// ```
/// use tion_lib::climate::to_view;
/// use tion_lib::state::DeviceState;
/// use tion_lib::types::{ClimateAction, ClimateMode};
///
/// let mut state = DeviceState::new();
/// state.flags.power_state = true;
/// state.flags.heater_state = true;
/// state.target_temperature = 25;
/// state.outdoor_temperature = 10;
/// state.current_temperature = 20;
///
/// let view = to_view(&state);
/// assert_eq!(view.mode, ClimateMode::Heat);
/// assert_eq!(view.action, ClimateAction::Heating);
/// ```
#[must_use]
pub fn to_view(state: &DeviceState) -> ClimateView {
    let flags = &state.flags;

    let mode = if !flags.power_state {
        ClimateMode::Off
    } else if flags.heater_state {
        ClimateMode::Heat
    } else {
        ClimateMode::FanOnly
    };

    let is_heating = i16::from(state.target_temperature) - i16::from(state.outdoor_temperature)
        > HEATING_MARGIN
        && state.current_temperature > state.outdoor_temperature;

    let action = if mode == ClimateMode::Off {
        ClimateAction::Off
    } else if is_heating {
        ClimateAction::Heating
    } else {
        ClimateAction::Fan
    };

    ClimateView {
        mode,
        action,
        current_temperature: state.current_temperature,
        target_temperature: state.target_temperature,
        fan_speed: state.speed(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(power: bool, heater: bool, target: i8, outdoor: i8, current: i8) -> DeviceState {
        let mut state = DeviceState::new();
        state.flags.power_state = power;
        state.flags.heater_state = heater;
        state.target_temperature = target;
        state.outdoor_temperature = outdoor;
        state.current_temperature = current;
        state
    }

    #[test]
    fn mode_follows_power_and_heater() {
        assert_eq!(to_view(&state(false, false, 0, 0, 0)).mode, ClimateMode::Off);
        assert_eq!(to_view(&state(false, true, 0, 0, 0)).mode, ClimateMode::Off);
        assert_eq!(to_view(&state(true, true, 0, 0, 0)).mode, ClimateMode::Heat);
        assert_eq!(to_view(&state(true, false, 0, 0, 0)).mode, ClimateMode::FanOnly);
    }

    #[test]
    fn heating_above_margin() {
        let view = to_view(&state(true, true, 25, 10, 20));
        assert_eq!(view.action, ClimateAction::Heating);
    }

    #[test]
    fn fan_within_margin() {
        let view = to_view(&state(true, true, 12, 10, 20));
        assert_eq!(view.action, ClimateAction::Fan);
    }

    #[test]
    fn margin_is_exclusive() {
        assert_eq!(to_view(&state(true, true, 13, 10, 20)).action, ClimateAction::Fan);
        assert_eq!(to_view(&state(true, true, 14, 10, 20)).action, ClimateAction::Heating);
    }

    #[test]
    fn fan_when_supply_not_warmer_than_outdoor() {
        let view = to_view(&state(true, true, 25, 10, 10));
        assert_eq!(view.action, ClimateAction::Fan);
    }

    #[test]
    fn heuristic_applies_in_fan_only_mode() {
        let view = to_view(&state(true, false, 25, 10, 20));
        assert_eq!(view.mode, ClimateMode::FanOnly);
        assert_eq!(view.action, ClimateAction::Heating);
    }

    #[test]
    fn off_action_when_off() {
        let view = to_view(&state(false, true, 25, 10, 20));
        assert_eq!(view.action, ClimateAction::Off);
    }

    #[test]
    fn extreme_temperatures_do_not_overflow() {
        let view = to_view(&state(true, true, i8::MAX, i8::MIN, 0));
        assert_eq!(view.action, ClimateAction::Heating);
    }

    #[test]
    fn fan_mode_token() {
        let mut s = state(true, false, 0, 0, 0);
        s.fan_speed = 6;
        assert_eq!(to_view(&s).fan_mode(), "6");

        s.fan_speed = 11;
        assert_eq!(to_view(&s).fan_mode(), "0");
    }
}
