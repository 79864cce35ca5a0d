// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `tion_lib` library.
//!
//! This module provides the error hierarchy used across the library: frame
//! decoding, transport communication, value validation and configuration.

use thiserror::Error;

use crate::types::ClimatePreset;

/// The main error type for this library.
///
/// This enum encompasses all possible errors that can occur when talking to
/// a Tion breezer.
#[derive(Debug, Error)]
pub enum Error {
    /// Error occurred during value validation.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// A received frame could not be decoded.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Error occurred on the link to the device.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Configuration could not be loaded or is invalid.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// Device is not connected.
    #[error("device is not connected")]
    NotConnected,

    /// The requested preset has no settings configured.
    #[error("preset {0} is not configured")]
    PresetNotConfigured(ClimatePreset),
}

/// Structural faults that make a frame unusable.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum FrameFault {
    /// Frame does not have the fixed frame size.
    #[error("invalid length (expected {expected}, actual {actual})")]
    Length {
        /// Required frame size.
        expected: usize,
        /// Size of the received buffer.
        actual: usize,
    },

    /// First byte is neither the request nor the response magic.
    #[error("invalid magic byte 0x{0:02X}")]
    Magic(u8),

    /// Last byte is not the end-of-frame marker.
    #[error("invalid end marker 0x{0:02X}")]
    EndMarker(u8),

    /// Checksum byte does not match the frame contents.
    #[error("invalid checksum (expected 0x{expected:02X}, actual 0x{actual:02X})")]
    Checksum {
        /// Checksum computed over the frame.
        expected: u8,
        /// Checksum carried by the frame.
        actual: u8,
    },
}

/// Errors produced while decoding a raw frame into a device state.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// Frame failed length, marker or checksum validation.
    #[error("malformed frame: {0}")]
    Malformed(FrameFault),

    /// Frame is well formed but does not carry a device state.
    #[error("frame command 0x{command:02X} does not carry a state")]
    UnexpectedCommand {
        /// Command byte of the frame.
        command: u8,
    },
}

impl From<FrameFault> for DecodeError {
    fn from(fault: FrameFault) -> Self {
        Self::Malformed(fault)
    }
}

/// Errors related to the physical link (UART or BLE).
#[derive(Debug, Error)]
pub enum TransportError {
    /// Underlying I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The link was closed by the peer.
    #[error("link closed")]
    Closed,

    /// No frame arrived in time.
    #[error("receive timed out after {0} ms")]
    Timeout(u64),
}

/// Errors related to value validation and constraints.
///
/// These errors occur when attempting to create constrained types
/// with invalid values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// A numeric value is outside the allowed range.
    #[error("value {actual} is out of range [{min}, {max}]")]
    OutOfRange {
        /// Minimum allowed value.
        min: i16,
        /// Maximum allowed value.
        max: i16,
        /// The actual value that was provided.
        actual: i16,
    },

    /// A fan mode token is not a single decimal digit.
    #[error("invalid fan mode: {0:?}")]
    InvalidFanMode(String),

    /// A value has no counterpart in a closed enumeration.
    #[error("{kind} value {value} has no mapping")]
    Unmapped {
        /// Name of the enumeration.
        kind: &'static str,
        /// The unmapped raw value.
        value: u8,
    },

    /// A label does not name any option of a closed enumeration.
    #[error("unknown {kind} label: {label}")]
    UnknownLabel {
        /// Name of the enumeration.
        kind: &'static str,
        /// The offending label.
        label: String,
    },
}

/// Errors related to loading the component configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// A setting is outside its allowed range.
    #[error("invalid setting {field}: {message}")]
    Invalid {
        /// The offending setting.
        field: String,
        /// Description of the failure.
        message: String,
    },
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
