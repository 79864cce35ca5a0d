// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Tion 3S component builder.

use crate::climate::{
    Channels, ClimateAdapter, ClimateSink, SelectSink, SensorSink, SwitchSink, TextSensorSink,
};
use crate::config::{PresetConfig, Tion3sConfig};
use crate::device::Tion3s;
use crate::error::Error;
use crate::protocol::Transport;
use crate::types::ClimatePreset;

/// Builder for [`Tion3s`] components.
///
/// The climate sink is required; every other output channel is optional and
/// fixed once the component is built.
///
/// # Examples
///
/// ```
/// use tion_lib::climate::ClimateView;
/// use tion_lib::config::PresetConfig;
/// use tion_lib::device::Tion3s;
/// use tion_lib::protocol::FramedTransport;
/// use tion_lib::types::ClimatePreset;
///
/// let (port, _device_end) = tokio::io::duplex(64);
/// let breezer = Tion3s::builder(FramedTransport::ble(port), |_: &ClimateView| {})
///     .with_name("Kitchen")
///     .with_buzzer(|on: bool| println!("buzzer: {on}"))
///     .with_preset(ClimatePreset::Boost, PresetConfig::default().with_fan_speed(6))
///     .build()?;
///
/// assert_eq!(breezer.name(), "Kitchen");
/// # Ok::<(), tion_lib::Error>(())
/// ```
pub struct Tion3sBuilder<T: Transport> {
    transport: T,
    climate: Box<dyn ClimateSink>,
    channels: Channels,
    config: Tion3sConfig,
}

impl<T: Transport> Tion3sBuilder<T> {
    pub(crate) fn new(transport: T, climate: Box<dyn ClimateSink>) -> Self {
        Self {
            transport,
            climate,
            channels: Channels::default(),
            config: Tion3sConfig::default(),
        }
    }

    /// Replaces the name and presets with a loaded configuration.
    #[must_use]
    pub fn with_config(mut self, config: Tion3sConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the friendly name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.config.name = name.into();
        self
    }

    /// Adds or replaces a preset.
    #[must_use]
    pub fn with_preset(mut self, preset: ClimatePreset, settings: PresetConfig) -> Self {
        self.config.presets.insert(preset, settings);
        self
    }

    /// Publishes the firmware version.
    #[must_use]
    pub fn with_version(mut self, sink: impl TextSensorSink + 'static) -> Self {
        self.channels.version = Some(Box::new(sink));
        self
    }

    /// Publishes the buzzer state.
    #[must_use]
    pub fn with_buzzer(mut self, sink: impl SwitchSink + 'static) -> Self {
        self.channels.buzzer = Some(Box::new(sink));
        self
    }

    /// Publishes the outdoor air temperature.
    #[must_use]
    pub fn with_outdoor_temperature(mut self, sink: impl SensorSink + 'static) -> Self {
        self.channels.outdoor_temperature = Some(Box::new(sink));
        self
    }

    /// Publishes the days left until filter replacement.
    #[must_use]
    pub fn with_filter_time_left(mut self, sink: impl SensorSink + 'static) -> Self {
        self.channels.filter_time_left = Some(Box::new(sink));
        self
    }

    /// Publishes the air intake position.
    #[must_use]
    pub fn with_air_intake(mut self, sink: impl SelectSink + 'static) -> Self {
        self.channels.air_intake = Some(Box::new(sink));
        self
    }

    /// Publishes the airflow counter.
    #[must_use]
    pub fn with_productivity(mut self, sink: impl SensorSink + 'static) -> Self {
        self.channels.productivity = Some(Box::new(sink));
        self
    }

    /// Publishes the configured boost length in minutes.
    #[must_use]
    pub fn with_boost_time(mut self, sink: impl SensorSink + 'static) -> Self {
        self.channels.boost_time = Some(Box::new(sink));
        self
    }

    /// Publishes the seconds left in a running boost.
    #[must_use]
    pub fn with_boost_time_left(mut self, sink: impl SensorSink + 'static) -> Self {
        self.channels.boost_time_left = Some(Box::new(sink));
        self
    }

    /// Builds the component.
    ///
    /// The component starts disconnected; call
    /// [`Tion3s::connect`] once the link is up.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the configuration is invalid.
    pub fn build(self) -> Result<Tion3s<T>, Error> {
        self.config.validate()?;
        let boost_minutes = self.config.boost_minutes();
        let adapter = ClimateAdapter::new(self.climate, self.channels);
        Ok(Tion3s::new(
            self.config.name,
            self.transport,
            adapter,
            self.config.presets,
            boost_minutes,
        ))
    }
}

impl<T: Transport + std::fmt::Debug> std::fmt::Debug for Tion3sBuilder<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tion3sBuilder")
            .field("transport", &self.transport)
            .field("channels", &self.channels)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
