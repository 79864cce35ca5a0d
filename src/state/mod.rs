// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device state types.
//!
//! [`DeviceState`] is the decoded register snapshot of a breezer and
//! [`StateFlags`] its packed boolean flags.
//!
//! # Examples
//!
//! ```
//! use tion_lib::state::DeviceState;
//!
//! let mut state = DeviceState::new();
//! state.flags.power_state = true;
//! state.fan_speed = 2;
//!
//! assert!(state.is_on());
//! assert_eq!(state.speed().token(), "2");
//! ```

mod device_state;
mod flags;

pub use device_state::DeviceState;
pub use flags::StateFlags;
