// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Tion 3S frame codec.
//!
//! Every frame has the same fixed size:
//!
//! | offset | size | content |
//! |--------|------|---------|
//! | 0      | 1    | magic: [`MAGIC_REQUEST`] or [`MAGIC_RESPONSE`] |
//! | 1      | 1    | command |
//! | 2      | 17   | payload |
//! | 19     | 1    | XOR of bytes 0..19 |
//! | 20     | 1    | [`FRAME_END`] |
//!
//! The state payload is laid out as follows (multi-byte fields little endian):
//!
//! | offset | content |
//! |--------|---------|
//! | 0      | fan speed (bits 0-3), gate position (bits 4-7) |
//! | 1      | target temperature |
//! | 2      | flags, see [`StateFlags`] |
//! | 3      | reserved |
//! | 4      | unknown temperature |
//! | 5      | outdoor temperature |
//! | 6      | current temperature |
//! | 7..9   | filter time left |
//! | 9      | timer hours |
//! | 10     | timer minutes |
//! | 11     | last error |
//! | 12     | productivity |
//! | 13..15 | filter days |
//! | 15..17 | firmware version |
//!
//! [`decode`] and [`encode`] are pure: no I/O, no logging. [`FrameCodec`]
//! splits a byte stream into structurally valid frames and leaves the
//! command check to [`decode`].

use bytes::{Buf, BufMut, BytesMut};
use tokio_util::codec::{Decoder, Encoder};

use crate::error::{DecodeError, FrameFault};
use crate::state::{DeviceState, StateFlags};

/// Size of every frame in bytes.
pub const FRAME_SIZE: usize = 21;

/// Size of the frame payload in bytes.
pub const PAYLOAD_SIZE: usize = 17;

/// Magic byte of frames sent to the device.
pub const MAGIC_REQUEST: u8 = 0x3D;

/// Magic byte of frames sent by the device.
pub const MAGIC_RESPONSE: u8 = 0xB3;

/// End-of-frame marker.
pub const FRAME_END: u8 = 0x5A;

/// Command: ask the device to report its state.
pub const CMD_REQUEST_STATE: u8 = 0x01;

/// Command: write a full state to the device.
pub const CMD_SET_STATE: u8 = 0x02;

/// Command: follow-up request old serial firmware expects after each report.
pub const CMD_REQUEST_AFTER_STATE: u8 = 0x04;

/// Command: state report from the device.
pub const CMD_STATE: u8 = 0x10;

const CHECKSUM_INDEX: usize = FRAME_SIZE - 2;

trait Checksum {
    fn checksum(&mut self) -> u8;
}

impl Checksum for std::slice::Iter<'_, u8> {
    fn checksum(&mut self) -> u8 {
        self.fold(0, |acc, byte| acc ^ byte)
    }
}

/// A structurally valid frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// [`MAGIC_REQUEST`] or [`MAGIC_RESPONSE`].
    pub magic: u8,
    /// Command byte.
    pub command: u8,
    /// Command payload.
    pub payload: [u8; PAYLOAD_SIZE],
}

impl Frame {
    /// Creates a host-to-device frame.
    #[must_use]
    pub const fn request(command: u8, payload: [u8; PAYLOAD_SIZE]) -> Self {
        Self {
            magic: MAGIC_REQUEST,
            command,
            payload,
        }
    }

    /// Creates a device-to-host frame.
    #[must_use]
    pub const fn response(command: u8, payload: [u8; PAYLOAD_SIZE]) -> Self {
        Self {
            magic: MAGIC_RESPONSE,
            command,
            payload,
        }
    }

    /// Validates and splits a raw frame.
    ///
    /// # Errors
    ///
    /// Returns the first [`FrameFault`] found: length, magic, end marker,
    /// then checksum.
    pub fn parse(raw: &[u8]) -> Result<Self, FrameFault> {
        if raw.len() != FRAME_SIZE {
            return Err(FrameFault::Length {
                expected: FRAME_SIZE,
                actual: raw.len(),
            });
        }

        let magic = raw[0];
        if magic != MAGIC_REQUEST && magic != MAGIC_RESPONSE {
            return Err(FrameFault::Magic(magic));
        }

        let end = raw[FRAME_SIZE - 1];
        if end != FRAME_END {
            return Err(FrameFault::EndMarker(end));
        }

        let expected = raw[..CHECKSUM_INDEX].iter().checksum();
        let actual = raw[CHECKSUM_INDEX];
        if expected != actual {
            return Err(FrameFault::Checksum { expected, actual });
        }

        let mut body = &raw[1..CHECKSUM_INDEX];
        let command = body.get_u8();
        let mut payload = [0; PAYLOAD_SIZE];
        body.copy_to_slice(&mut payload);

        Ok(Self {
            magic,
            command,
            payload,
        })
    }

    /// Serializes the frame, computing the checksum.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; FRAME_SIZE] {
        let mut raw = [0; FRAME_SIZE];
        {
            let mut buf = &mut raw[..];
            buf.put_u8(self.magic);
            buf.put_u8(self.command);
            buf.put_slice(&self.payload);
        }
        raw[CHECKSUM_INDEX] = raw[..CHECKSUM_INDEX].iter().checksum();
        raw[FRAME_SIZE - 1] = FRAME_END;
        raw
    }

    /// Returns `true` if the frame carries a state payload.
    #[must_use]
    pub const fn carries_state(&self) -> bool {
        matches!(
            (self.magic, self.command),
            (MAGIC_RESPONSE, CMD_STATE) | (MAGIC_REQUEST, CMD_SET_STATE)
        )
    }
}

/// Decodes a state report (or an echoed state write) into a [`DeviceState`].
///
/// # Errors
///
/// Returns `DecodeError::Malformed` for a structurally invalid frame and
/// `DecodeError::UnexpectedCommand` for a valid frame without a state.
///
/// # Examples
///
/// ```
/// use tion_lib::protocol::codec;
/// use tion_lib::state::DeviceState;
///
/// let mut state = DeviceState::new();
/// state.fan_speed = 3;
/// state.target_temperature = 18;
///
/// let frame = codec::encode(&state);
/// assert_eq!(codec::decode(&frame).unwrap(), state);
/// ```
pub fn decode(raw: &[u8]) -> Result<DeviceState, DecodeError> {
    let frame = Frame::parse(raw)?;
    if !frame.carries_state() {
        return Err(DecodeError::UnexpectedCommand {
            command: frame.command,
        });
    }
    Ok(state_from_payload(&frame.payload))
}

/// Encodes a state write frame.
#[must_use]
pub fn encode(state: &DeviceState) -> [u8; FRAME_SIZE] {
    Frame::request(CMD_SET_STATE, state_payload(state)).to_bytes()
}

/// Encodes a state report as the device sends it.
#[must_use]
pub fn encode_report(state: &DeviceState) -> [u8; FRAME_SIZE] {
    Frame::response(CMD_STATE, state_payload(state)).to_bytes()
}

/// Packs a state into its payload.
#[must_use]
pub fn state_payload(state: &DeviceState) -> [u8; PAYLOAD_SIZE] {
    let mut payload = [0; PAYLOAD_SIZE];
    let mut buf = &mut payload[..];

    buf.put_u8((state.fan_speed & 0x0F) | ((state.gate_position & 0x0F) << 4));
    buf.put_i8(state.target_temperature);
    buf.put_u8(state.flags.bits());
    buf.put_u8(state.flags.reserved);
    buf.put_i8(state.unknown_temperature);
    buf.put_i8(state.outdoor_temperature);
    buf.put_i8(state.current_temperature);
    buf.put_u16_le(state.filter_time_left);
    buf.put_u8(state.hours);
    buf.put_u8(state.minutes);
    buf.put_u8(state.last_error);
    buf.put_u8(state.productivity);
    buf.put_u16_le(state.filter_days);
    buf.put_u16_le(state.firmware_version);

    payload
}

fn state_from_payload(payload: &[u8; PAYLOAD_SIZE]) -> DeviceState {
    let mut buf = &payload[..];

    let speed_gate = buf.get_u8();
    let target_temperature = buf.get_i8();
    let flag_bits = buf.get_u8();
    let reserved = buf.get_u8();

    DeviceState {
        fan_speed: speed_gate & 0x0F,
        gate_position: speed_gate >> 4,
        target_temperature,
        flags: StateFlags::from_bits(flag_bits, reserved),
        unknown_temperature: buf.get_i8(),
        outdoor_temperature: buf.get_i8(),
        current_temperature: buf.get_i8(),
        filter_time_left: buf.get_u16_le(),
        hours: buf.get_u8(),
        minutes: buf.get_u8(),
        last_error: buf.get_u8(),
        productivity: buf.get_u8(),
        filter_days: buf.get_u16_le(),
        firmware_version: buf.get_u16_le(),
    }
}

/// Stream codec splitting a serial byte stream into frames.
///
/// The decoder resynchronises on the magic byte and yields every 21-byte run
/// that passes [`Frame::parse`]. A candidate with a wrong end marker or
/// checksum is not a frame: only its first byte is dropped, so a stray magic
/// byte in junk cannot swallow the start of the real frame behind it.
#[derive(Debug, Default, Clone, Copy)]
pub struct FrameCodec;

impl FrameCodec {
    /// Creates a new codec.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Decoder for FrameCodec {
    type Item = Vec<u8>;

    type Error = std::io::Error;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        loop {
            match src
                .iter()
                .position(|b| *b == MAGIC_REQUEST || *b == MAGIC_RESPONSE)
            {
                Some(start) => src.advance(start),
                None => {
                    src.clear();
                    return Ok(None);
                }
            }

            if src.len() < FRAME_SIZE {
                src.reserve(FRAME_SIZE - src.len());
                return Ok(None);
            }

            if Frame::parse(&src[..FRAME_SIZE]).is_err() {
                // magic byte inside junk, a truncated or a corrupted frame
                src.advance(1);
                continue;
            }

            return Ok(Some(src.split_to(FRAME_SIZE).to_vec()));
        }
    }
}

impl Encoder<&[u8]> for FrameCodec {
    type Error = std::io::Error;

    fn encode(&mut self, frame: &[u8], dst: &mut BytesMut) -> Result<(), Self::Error> {
        dst.reserve(frame.len());
        dst.put_slice(frame);
        Ok(())
    }
}
