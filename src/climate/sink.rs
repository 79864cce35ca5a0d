// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Host entity sinks.
//!
//! The host's climate, select, sensor, text sensor and switch entities are
//! reached through these traits. Each is implemented for plain closures, so
//! a host can pass a callback instead of writing a type.
//!
//! # Examples
//!
//! ```
//! use tion_lib::climate::{ClimateView, SensorSink};
//!
//! let sink = |value: f32| println!("outdoor temperature: {value}");
//! sink.publish_value(-4.0);
//! ```

use super::ClimateView;

/// Climate entity receiving the projected view.
pub trait ClimateSink {
    /// Publishes a new climate view.
    fn publish_climate(&self, view: &ClimateView);
}

impl<F> ClimateSink for F
where
    F: Fn(&ClimateView),
{
    fn publish_climate(&self, view: &ClimateView) {
        self(view);
    }
}

/// Select entity receiving the active option label.
pub trait SelectSink {
    /// Publishes the active option.
    fn publish_option(&self, option: &str);
}

impl<F> SelectSink for F
where
    F: Fn(&str),
{
    fn publish_option(&self, option: &str) {
        self(option);
    }
}

/// Numeric sensor entity.
pub trait SensorSink {
    /// Publishes a reading.
    fn publish_value(&self, value: f32);
}

impl<F> SensorSink for F
where
    F: Fn(f32),
{
    fn publish_value(&self, value: f32) {
        self(value);
    }
}

/// Text sensor entity.
pub trait TextSensorSink {
    /// Publishes a text value.
    fn publish_text(&self, text: &str);
}

impl<F> TextSensorSink for F
where
    F: Fn(&str),
{
    fn publish_text(&self, text: &str) {
        self(text);
    }
}

/// Switch entity.
pub trait SwitchSink {
    /// Publishes the switch state.
    fn publish_switch(&self, on: bool);
}

impl<F> SwitchSink for F
where
    F: Fn(bool),
{
    fn publish_switch(&self, on: bool) {
        self(on);
    }
}
