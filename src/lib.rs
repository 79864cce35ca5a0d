// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `Tion` Lib - A Rust library to drive Tion 3S breezers.
//!
//! This library talks to a Tion 3S supply ventilation unit over its serial
//! (UART) or Bluetooth (BLE) link, decodes the state reports it sends, and
//! maps them onto a host's climate entity and auxiliary sensors.
//!
//! # Supported Features
//!
//! - **Frame codec**: 21-byte frames with checksum, state encoding and decoding
//! - **Climate mapping**: mode, action and fan speed derived from the raw state
//! - **Control**: mode, fan speed, target temperature, buzzer and air intake
//! - **Presets**: named settings loaded from JSON
//! - **Boost**: timed boost preset that restores the previous settings
//! - **Sensors**: firmware version, outdoor temperature, filter life, airflow
//!
//! # Quick Start
//!
//! ```no_run
//! use tion_lib::climate::ClimateView;
//! use tion_lib::device::Tion3s;
//! use tion_lib::protocol::FramedTransport;
//! use tion_lib::types::{ClimateMode, FanSpeed};
//!
//! # async fn example(port: tokio::io::DuplexStream) -> tion_lib::Result<()> {
//! let mut breezer = Tion3s::builder(FramedTransport::uart(port), |view: &ClimateView| {
//!     println!("{} ({}), fan {}", view.mode, view.action, view.fan_mode());
//! })
//! .with_air_intake(|option: &str| println!("air intake: {option}"))
//! .build()?;
//!
//! breezer.connect().await?;
//!
//! // Handle one report, then send any follow-up it requires
//! breezer.poll().await?;
//!
//! let control = breezer
//!     .climate_control()
//!     .with_mode(ClimateMode::Heat)
//!     .with_fan_speed(FanSpeed::new(3)?)
//!     .with_target_temperature(21);
//! breezer.control(&control).await?;
//!
//! breezer.select_air_intake("Mixed").await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Logging
//!
//! Diagnostics are emitted through [`tracing`]; the library installs no
//! subscriber.

pub mod climate;
pub mod command;
pub mod config;
pub mod deferred;
pub mod device;
pub mod error;
pub mod protocol;
pub mod state;
pub mod types;

pub use climate::{ClimateAdapter, ClimateView, to_view};
pub use command::{ClimateControl, Command, build_commands};
pub use config::{PresetConfig, Tion3sConfig};
pub use device::{Tion3s, Tion3sBuilder};
pub use error::{
    ConfigError, DecodeError, Error, FrameFault, Result, TransportError, ValueError,
};
pub use protocol::{FramedTransport, Transport, TransportKind, codec};
pub use state::{DeviceState, StateFlags};
pub use types::{ClimateAction, ClimateMode, ClimatePreset, FanSpeed, GatePosition};
