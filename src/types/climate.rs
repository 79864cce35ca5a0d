// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Climate entity enumerations.

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

/// Operating mode exposed by the climate entity.
///
/// # Examples
///
/// ```
/// use tion_lib::types::ClimateMode;
///
/// assert_eq!("fan_only".parse::<ClimateMode>().unwrap(), ClimateMode::FanOnly);
/// assert!(ClimateMode::Heat.is_on());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClimateMode {
    /// Breezer is off.
    #[default]
    Off,
    /// Ventilation with the heater enabled.
    Heat,
    /// Ventilation only.
    FanOnly,
}

impl ClimateMode {
    /// Returns the mode name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Heat => "heat",
            Self::FanOnly => "fan_only",
        }
    }

    /// Returns whether the fan is powered in this mode.
    #[must_use]
    pub const fn is_on(&self) -> bool {
        !matches!(self, Self::Off)
    }
}

impl fmt::Display for ClimateMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClimateMode {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "off" => Ok(Self::Off),
            "heat" => Ok(Self::Heat),
            "fan_only" => Ok(Self::FanOnly),
            _ => Err(ValueError::UnknownLabel {
                kind: "climate mode",
                label: s.to_string(),
            }),
        }
    }
}

/// What the breezer is currently doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClimateAction {
    /// Breezer is off.
    Off,
    /// Heater is warming the airflow.
    Heating,
    /// Air is moved without effective heating.
    Fan,
}

impl ClimateAction {
    /// Returns the action name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Heating => "heating",
            Self::Fan => "fan",
        }
    }
}

impl fmt::Display for ClimateAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Named presets a host can offer on the climate entity.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ClimatePreset {
    /// At home.
    Home,
    /// Nobody home.
    Away,
    /// Maximum airflow.
    Boost,
    /// Comfort settings.
    Comfort,
    /// Energy saving.
    Eco,
    /// Night time.
    Sleep,
    /// Activity in the room.
    Activity,
}

impl ClimatePreset {
    /// Returns the preset name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Away => "away",
            Self::Boost => "boost",
            Self::Comfort => "comfort",
            Self::Eco => "eco",
            Self::Sleep => "sleep",
            Self::Activity => "activity",
        }
    }
}

impl fmt::Display for ClimatePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
