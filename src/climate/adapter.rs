// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Publishing device state to host entities.

use std::fmt;
use std::time::Duration;

use crate::state::DeviceState;
use crate::types::GatePosition;

use super::{
    ClimateSink, ClimateView, SelectSink, SensorSink, SwitchSink, TextSensorSink, to_view,
};

/// Optional output channels, fixed when the component is built.
///
/// A channel left as `None` is simply never published.
#[derive(Default)]
pub struct Channels {
    /// Firmware version as four hex digits.
    pub version: Option<Box<dyn TextSensorSink>>,
    /// Buzzer switch.
    pub buzzer: Option<Box<dyn SwitchSink>>,
    /// Outdoor air temperature.
    pub outdoor_temperature: Option<Box<dyn SensorSink>>,
    /// Days until filter replacement.
    pub filter_time_left: Option<Box<dyn SensorSink>>,
    /// Air intake select.
    pub air_intake: Option<Box<dyn SelectSink>>,
    /// Airflow counter.
    pub productivity: Option<Box<dyn SensorSink>>,
    /// Configured boost length, in minutes.
    pub boost_time: Option<Box<dyn SensorSink>>,
    /// Time left in the running boost, in seconds.
    pub boost_time_left: Option<Box<dyn SensorSink>>,
}

impl Channels {
    /// Returns the names of the configured channels.
    #[must_use]
    pub fn configured(&self) -> Vec<&'static str> {
        [
            ("version", self.version.is_some()),
            ("buzzer", self.buzzer.is_some()),
            ("outdoor_temperature", self.outdoor_temperature.is_some()),
            ("filter_time_left", self.filter_time_left.is_some()),
            ("air_intake", self.air_intake.is_some()),
            ("productivity", self.productivity.is_some()),
            ("boost_time", self.boost_time.is_some()),
            ("boost_time_left", self.boost_time_left.is_some()),
        ]
        .into_iter()
        .filter_map(|(name, present)| present.then_some(name))
        .collect()
    }
}

impl fmt::Debug for Channels {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.configured()).finish()
    }
}

/// Maps device states onto the host's climate entity and optional channels.
pub struct ClimateAdapter {
    climate: Box<dyn ClimateSink>,
    channels: Channels,
}

impl ClimateAdapter {
    /// Creates an adapter publishing to `climate` and the given channels.
    #[must_use]
    pub fn new(climate: Box<dyn ClimateSink>, channels: Channels) -> Self {
        Self { climate, channels }
    }

    /// Returns the configured channels.
    #[must_use]
    pub fn channels(&self) -> &Channels {
        &self.channels
    }

    /// Publishes `state` to every configured entity and returns the view.
    ///
    /// The firmware version is skipped while unknown (zero), and the air
    /// intake is skipped when the gate position has no mapping.
    pub fn publish(&self, state: &DeviceState) -> ClimateView {
        let view = to_view(state);
        self.climate.publish_climate(&view);

        let channels = &self.channels;
        if let Some(version) = &channels.version
            && state.firmware_version > 0
        {
            version.publish_text(&format!("{:04X}", state.firmware_version));
        }
        if let Some(buzzer) = &channels.buzzer {
            buzzer.publish_switch(state.flags.sound_state);
        }
        if let Some(outdoor) = &channels.outdoor_temperature {
            outdoor.publish_value(f32::from(state.outdoor_temperature));
        }
        if let Some(filter) = &channels.filter_time_left {
            filter.publish_value(f32::from(state.filter_time_left));
        }
        if let Some(gate) = state.gate() {
            self.publish_air_intake(gate);
        }
        if let Some(productivity) = &channels.productivity {
            productivity.publish_value(f32::from(state.productivity));
        }

        view
    }

    /// Publishes the air intake label.
    ///
    /// Returns `false` if no air intake channel is configured.
    pub fn publish_air_intake(&self, gate: GatePosition) -> bool {
        match &self.channels.air_intake {
            Some(select) => {
                select.publish_option(gate.label());
                true
            }
            None => false,
        }
    }

    /// Publishes the boost length in minutes.
    pub fn publish_boost_time(&self, minutes: u8) {
        if let Some(sensor) = &self.channels.boost_time {
            sensor.publish_value(f32::from(minutes));
        }
    }

    /// Publishes the time left in the boost, in seconds to one decimal.
    pub fn publish_boost_time_left(&self, left: Duration) {
        if let Some(sensor) = &self.channels.boost_time_left {
            sensor.publish_value((left.as_secs_f32() * 10.0).round() / 10.0);
        }
    }
}

impl fmt::Debug for ClimateAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClimateAdapter")
            .field("channels", &self.channels)
            .finish_non_exhaustive()
    }
}
