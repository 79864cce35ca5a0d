// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Climate entity mapping.
//!
//! [`to_view`] is a pure projection of a [`DeviceState`](crate::state::DeviceState)
//! onto a [`ClimateView`]. [`ClimateAdapter`] publishes that view, and the
//! auxiliary readings, to host entities through the sink traits.
//!
//! # Examples
//!
//! ```
//! use tion_lib::climate::{Channels, ClimateAdapter, ClimateView};
//! use tion_lib::state::DeviceState;
//!
//! let adapter = ClimateAdapter::new(
//!     Box::new(|view: &ClimateView| println!("mode: {}", view.mode)),
//!     Channels {
//!         outdoor_temperature: Some(Box::new(|t: f32| println!("outdoor: {t}"))),
//!         ..Channels::default()
//!     },
//! );
//!
//! adapter.publish(&DeviceState::new());
//! ```

mod adapter;
mod sink;
mod view;

pub use adapter::{Channels, ClimateAdapter};
pub use sink::{ClimateSink, SelectSink, SensorSink, SwitchSink, TextSensorSink};
pub use view::{ClimateView, HEATING_MARGIN, to_view};
