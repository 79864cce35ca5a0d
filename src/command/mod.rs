// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Tion 3S command definitions.
//!
//! This module provides typed representations of the frames the host sends
//! to a breezer, and the [`build_commands`] sequencer that turns a desired
//! climate setting into ordered state writes.
//!
//! # Available Commands
//!
//! | Command Type | Purpose |
//! |-------------|---------|
//! | [`RequestStateCommand`] | Ask for a state report |
//! | [`RequestAfterStateCommand`] | Follow-up old serial firmware expects after a report |
//! | [`WriteStateCommand`] | Write a full device state |
//!
//! # Examples
//!
//! ```
//! use tion_lib::command::{Command, WriteStateCommand};
//! use tion_lib::protocol::codec;
//! use tion_lib::state::DeviceState;
//!
//! let cmd = WriteStateCommand::new(DeviceState::new());
//! assert_eq!(cmd.name(), "write_state");
//! assert_eq!(cmd.to_frame(), codec::encode(&DeviceState::new()));
//! ```

mod sequencer;

pub use sequencer::{ClimateControl, build_commands};

use crate::protocol::codec::{
    self, CMD_REQUEST_AFTER_STATE, CMD_REQUEST_STATE, CMD_SET_STATE, FRAME_SIZE, Frame,
    PAYLOAD_SIZE,
};
use crate::state::DeviceState;

/// A command that can be sent to a breezer.
///
/// Commands are serialized into request frames.
pub trait Command {
    /// Returns the command byte.
    fn id(&self) -> u8;

    /// Returns a short name for diagnostics.
    fn name(&self) -> &'static str;

    /// Returns the command payload.
    ///
    /// Requests without data carry an all-zero payload.
    fn payload(&self) -> [u8; PAYLOAD_SIZE] {
        [0; PAYLOAD_SIZE]
    }

    /// Returns the raw request frame.
    fn to_frame(&self) -> [u8; FRAME_SIZE] {
        Frame::request(self.id(), self.payload()).to_bytes()
    }
}

/// Asks the breezer to report its state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestStateCommand;

impl Command for RequestStateCommand {
    fn id(&self) -> u8 {
        CMD_REQUEST_STATE
    }

    fn name(&self) -> &'static str {
        "request_state"
    }
}

/// Follow-up request sent after each state report on old serial firmware.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestAfterStateCommand;

impl Command for RequestAfterStateCommand {
    fn id(&self) -> u8 {
        CMD_REQUEST_AFTER_STATE
    }

    fn name(&self) -> &'static str {
        "request_after_state"
    }
}

/// Writes a full state to the breezer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteStateCommand {
    state: DeviceState,
}

impl WriteStateCommand {
    /// Creates a write of `state`.
    #[must_use]
    pub fn new(state: DeviceState) -> Self {
        Self { state }
    }

    /// Returns the state to write.
    #[must_use]
    pub fn state(&self) -> &DeviceState {
        &self.state
    }
}

impl Command for WriteStateCommand {
    fn id(&self) -> u8 {
        CMD_SET_STATE
    }

    fn name(&self) -> &'static str {
        "write_state"
    }

    fn payload(&self) -> [u8; PAYLOAD_SIZE] {
        codec::state_payload(&self.state)
    }
}
