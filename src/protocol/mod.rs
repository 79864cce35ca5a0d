// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Link layer for communicating with Tion breezers.
//!
//! - [`codec`]: frame layout, checksum and state encoding
//! - [`Transport`]: the link the device component talks through
//! - [`FramedTransport`]: a [`Transport`] over any async byte stream
//!
//! The serial (UART) and wireless (BLE) links carry the same frames; the
//! link kind only matters for the follow-up request old serial firmware
//! needs after each state report.

pub mod codec;
mod framed;

pub use codec::{Frame, FrameCodec};
pub use framed::FramedTransport;

use crate::error::TransportError;

/// Kind of link to the breezer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportKind {
    /// Wired serial link.
    Uart,
    /// Bluetooth Low Energy link.
    Ble,
}

impl TransportKind {
    /// Returns the link name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Uart => "uart",
            Self::Ble => "ble",
        }
    }
}

impl std::fmt::Display for TransportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trait for links that carry frames to and from a breezer.
#[allow(async_fn_in_trait)]
pub trait Transport {
    /// Returns the kind of link.
    fn kind(&self) -> TransportKind;

    /// Waits for the next raw frame from the device.
    ///
    /// # Errors
    ///
    /// Returns `TransportError` if the link fails, closes, or times out.
    async fn receive_frame(&mut self) -> Result<Vec<u8>, TransportError>;

    /// Sends a raw frame to the device.
    ///
    /// # Errors
    ///
    /// Returns `TransportError` if the frame could not be written.
    async fn send_frame(&mut self, frame: &[u8]) -> Result<(), TransportError>;
}
