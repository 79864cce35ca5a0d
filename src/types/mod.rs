// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for breezer control.
//!
//! Each type ensures values are within their valid ranges at construction
//! time.
//!
//! # Types
//!
//! - [`FanSpeed`] - Fan speed level (0-9, 0 = unknown)
//! - [`GatePosition`] - Air intake valve position
//! - [`ClimateMode`] / [`ClimateAction`] - Climate entity mode and action
//! - [`ClimatePreset`] - Named presets

mod climate;
mod fan_speed;
mod gate;

pub use climate::{ClimateAction, ClimateMode, ClimatePreset};
pub use fan_speed::FanSpeed;
pub use gate::GatePosition;
