// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Integration tests running the component over an in-memory byte stream.

use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt, duplex};
use tion_lib::climate::ClimateView;
use tion_lib::codec::{self, CMD_REQUEST_STATE, FRAME_SIZE, Frame, encode_report};
use tion_lib::{
    ClimateMode, DeviceState, Error, FramedTransport, Tion3s, TransportError, TransportKind,
};

fn report() -> DeviceState {
    let mut state = DeviceState::new();
    state.flags.power_state = true;
    state.flags.heater_state = true;
    state.fan_speed = 4;
    state.target_temperature = 21;
    state.outdoor_temperature = -3;
    state.current_temperature = 19;
    state.firmware_version = 0x0042;
    state
}

#[tokio::test]
async fn connect_and_receive_report_after_junk() {
    let (port, mut device_end) = duplex(256);
    let mut breezer = Tion3s::builder(FramedTransport::uart(port), |_: &ClimateView| {})
        .build()
        .unwrap();

    breezer.connect().await.unwrap();

    let mut request = [0u8; FRAME_SIZE];
    device_end.read_exact(&mut request).await.unwrap();
    let frame = Frame::parse(&request).unwrap();
    assert_eq!(frame.command, CMD_REQUEST_STATE);

    device_end.write_all(&[0x00, 0x5A, 0xFF]).await.unwrap();
    device_end.write_all(&encode_report(&report())).await.unwrap();

    let view = breezer.poll().await.unwrap().unwrap();

    assert_eq!(view.mode, ClimateMode::Heat);
    assert_eq!(breezer.state(), &report());
    assert_eq!(breezer.transport_kind(), TransportKind::Uart);
}

#[tokio::test]
async fn corrupt_frame_is_skipped_by_the_stream() {
    let (port, mut device_end) = duplex(256);
    let mut breezer = Tion3s::builder(FramedTransport::ble(port), |_: &ClimateView| {})
        .build()
        .unwrap();

    let mut corrupt = encode_report(&report());
    corrupt[3] ^= 0x10;
    device_end.write_all(&corrupt).await.unwrap();
    device_end.write_all(&encode_report(&report())).await.unwrap();

    assert!(breezer.poll().await.unwrap().is_some());
    assert_eq!(breezer.state(), &report());
    assert_eq!(codec::encode_report(breezer.state()), encode_report(&report()));
}

#[tokio::test]
async fn stray_magic_byte_does_not_hide_report() {
    let (port, mut device_end) = duplex(256);
    let mut breezer = Tion3s::builder(FramedTransport::ble(port), |_: &ClimateView| {})
        .build()
        .unwrap();

    // pick a report whose checksum byte equals the end marker
    let mut state = report();
    let raw = (0..=u8::MAX)
        .map(|productivity| {
            state.productivity = productivity;
            encode_report(&state)
        })
        .find(|raw| raw[FRAME_SIZE - 2] == 0x5A)
        .unwrap();

    device_end.write_all(&[0x3D]).await.unwrap();
    device_end.write_all(&raw).await.unwrap();

    assert!(breezer.poll().await.unwrap().is_some());
    assert_eq!(codec::encode_report(breezer.state()), raw);
}

#[tokio::test(start_paused = true)]
async fn silent_device_times_out() {
    let (port, _device_end) = duplex(256);
    let transport = FramedTransport::ble(port).with_receive_timeout(Duration::from_secs(15));
    let mut breezer = Tion3s::builder(transport, |_: &ClimateView| {})
        .build()
        .unwrap();

    let err = breezer.poll().await.unwrap_err();

    assert!(matches!(
        err,
        Error::Transport(TransportError::Timeout(15_000))
    ));
}
