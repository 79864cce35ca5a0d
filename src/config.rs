// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Component configuration.
//!
//! Settings are plain serde types so hosts can load them from JSON or any
//! other serde format. Which output channels exist is decided by the
//! builder, not here.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::{ClimateMode, ClimatePreset};

/// Lowest fan speed accepted in a preset.
pub const PRESET_FAN_SPEED_MIN: u8 = 1;
/// Highest fan speed accepted in a preset.
pub const PRESET_FAN_SPEED_MAX: u8 = 6;
/// Lowest target temperature accepted in a preset.
pub const PRESET_TEMPERATURE_MIN: i8 = 1;
/// Highest target temperature accepted in a preset.
pub const PRESET_TEMPERATURE_MAX: i8 = 25;
/// Shortest boost, in minutes.
pub const BOOST_TIME_MIN: u8 = 1;
/// Longest boost, in minutes.
pub const BOOST_TIME_MAX: u8 = 60;
/// Boost length used when none is configured, in minutes.
pub const DEFAULT_BOOST_TIME: u8 = 20;

fn default_name() -> String {
    "Tion 3S".to_string()
}

/// Settings applied when a preset is activated.
///
/// A field left as `None` keeps the value currently applied on the device.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PresetConfig {
    /// Mode to switch to.
    pub mode: Option<ClimateMode>,
    /// Fan speed, 1 to 6.
    pub fan_speed: Option<u8>,
    /// Heater target temperature, 1 to 25.
    pub target_temperature: Option<i8>,
}

impl PresetConfig {
    /// Sets the mode.
    #[must_use]
    pub fn with_mode(mut self, mode: ClimateMode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Sets the fan speed.
    #[must_use]
    pub fn with_fan_speed(mut self, fan_speed: u8) -> Self {
        self.fan_speed = Some(fan_speed);
        self
    }

    /// Sets the target temperature.
    #[must_use]
    pub fn with_target_temperature(mut self, target_temperature: i8) -> Self {
        self.target_temperature = Some(target_temperature);
        self
    }

    fn validate(&self, preset: ClimatePreset) -> Result<(), ConfigError> {
        if let Some(speed) = self.fan_speed
            && !(PRESET_FAN_SPEED_MIN..=PRESET_FAN_SPEED_MAX).contains(&speed)
        {
            return Err(ConfigError::Invalid {
                field: format!("presets.{preset}.fan_speed"),
                message: format!(
                    "{speed} is outside {PRESET_FAN_SPEED_MIN}..={PRESET_FAN_SPEED_MAX}"
                ),
            });
        }
        if let Some(temperature) = self.target_temperature
            && !(PRESET_TEMPERATURE_MIN..=PRESET_TEMPERATURE_MAX).contains(&temperature)
        {
            return Err(ConfigError::Invalid {
                field: format!("presets.{preset}.target_temperature"),
                message: format!(
                    "{temperature} is outside {PRESET_TEMPERATURE_MIN}..={PRESET_TEMPERATURE_MAX}"
                ),
            });
        }
        Ok(())
    }
}

/// Configuration of a Tion 3S component.
///
/// # Examples
///
/// ```
/// use tion_lib::config::Tion3sConfig;
/// use tion_lib::types::ClimatePreset;
///
/// let config = Tion3sConfig::from_json(
///     r#"{
///         "name": "Bedroom breezer",
///         "presets": {
///             "sleep": { "mode": "fan_only", "fan_speed": 1 },
///             "boost": { "fan_speed": 6 }
///         }
///     }"#,
/// )?;
///
/// assert_eq!(config.name, "Bedroom breezer");
/// assert!(config.preset(ClimatePreset::Sleep).is_some());
/// # Ok::<(), tion_lib::error::ConfigError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Tion3sConfig {
    /// Friendly name used in logs.
    #[serde(default = "default_name")]
    pub name: String,
    /// Preset settings keyed by preset.
    #[serde(default)]
    pub presets: BTreeMap<ClimatePreset, PresetConfig>,
    /// Length of the boost preset in minutes, 1 to 60. Requires a boost
    /// preset.
    #[serde(default)]
    pub boost_time: Option<u8>,
}

impl Tion3sConfig {
    /// Parses and validates a JSON configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] if the document does not parse and
    /// [`ConfigError::Invalid`] if a preset value is out of range.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Sets the friendly name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Adds or replaces a preset.
    #[must_use]
    pub fn with_preset(mut self, preset: ClimatePreset, settings: PresetConfig) -> Self {
        self.presets.insert(preset, settings);
        self
    }

    /// Sets the boost length in minutes.
    #[must_use]
    pub fn with_boost_time(mut self, minutes: u8) -> Self {
        self.boost_time = Some(minutes);
        self
    }

    /// Returns the boost length in minutes, or the default.
    #[must_use]
    pub fn boost_minutes(&self) -> u8 {
        self.boost_time.unwrap_or(DEFAULT_BOOST_TIME)
    }

    /// Returns the settings of `preset`, if configured.
    #[must_use]
    pub fn preset(&self, preset: ClimatePreset) -> Option<&PresetConfig> {
        self.presets.get(&preset)
    }

    /// Checks every preset against its allowed ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending setting.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "name".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        if let Some(minutes) = self.boost_time {
            if !(BOOST_TIME_MIN..=BOOST_TIME_MAX).contains(&minutes) {
                return Err(ConfigError::Invalid {
                    field: "boost_time".to_string(),
                    message: format!("{minutes} is outside {BOOST_TIME_MIN}..={BOOST_TIME_MAX}"),
                });
            }
            if !self.presets.contains_key(&ClimatePreset::Boost) {
                return Err(ConfigError::Invalid {
                    field: "boost_time".to_string(),
                    message: "requires a boost preset".to_string(),
                });
            }
        }
        self.presets
            .iter()
            .try_for_each(|(preset, settings)| settings.validate(*preset))
    }
}

impl Default for Tion3sConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            presets: BTreeMap::new(),
            boost_time: None,
        }
    }
}
