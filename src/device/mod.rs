// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Tion 3S device component.
//!
//! [`Tion3s`] owns the link, the last reported state and the host entity
//! sinks. It is driven from a single task: every operation takes
//! `&mut self`, and follow-up requests queued while handling a frame are
//! sent by [`Tion3s::run_deferred`] once the handler has returned.
//!
//! The boost preset runs for [`Tion3s::boost_time`] minutes. When it runs
//! out, the next [`Tion3s::poll`] or [`Tion3s::tick`] queues a job that
//! restores the settings active before the boost.
//!
//! # Examples
//!
//! ```no_run
//! use tion_lib::device::Tion3s;
//! use tion_lib::climate::ClimateView;
//! use tion_lib::protocol::FramedTransport;
//! use tion_lib::types::ClimateMode;
//!
//! # async fn example(port: tokio::io::DuplexStream) -> tion_lib::Result<()> {
//! let mut breezer = Tion3s::builder(
//!     FramedTransport::uart(port),
//!     |view: &ClimateView| println!("{} / {}", view.mode, view.action),
//! )
//! .with_outdoor_temperature(|t: f32| println!("outdoor: {t}"))
//! .build()?;
//!
//! breezer.connect().await?;
//! breezer.poll().await?;
//!
//! let control = breezer.climate_control().with_mode(ClimateMode::Heat);
//! breezer.control(&control).await?;
//! # Ok(())
//! # }
//! ```

mod boost;
mod builder;

pub use builder::Tion3sBuilder;

use std::collections::BTreeMap;
use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, info, trace, warn};

use boost::BoostTimer;

use crate::climate::{ClimateAdapter, ClimateSink, ClimateView, to_view};
use crate::command::{
    ClimateControl, Command, RequestAfterStateCommand, RequestStateCommand, WriteStateCommand,
    build_commands,
};
use crate::config::{BOOST_TIME_MAX, BOOST_TIME_MIN, PresetConfig};
use crate::deferred::{Deferred, TaskQueue};
use crate::error::{DecodeError, Error, ValueError};
use crate::protocol::{Transport, TransportKind, codec};
use crate::state::DeviceState;
use crate::types::{ClimatePreset, FanSpeed, GatePosition};

/// First firmware version that reports state without a follow-up request
/// on the serial link.
pub const FIRMWARE_WITHOUT_FOLLOW_UP: u16 = 0x003C;

/// A Tion 3S breezer reached through a [`Transport`].
#[derive(Debug)]
pub struct Tion3s<T: Transport> {
    name: String,
    transport: T,
    state: DeviceState,
    adapter: ClimateAdapter,
    presets: BTreeMap<ClimatePreset, PresetConfig>,
    deferred: TaskQueue<Deferred>,
    boost: BoostTimer,
    connected: bool,
}

impl<T: Transport> Tion3s<T> {
    /// Starts building a component talking through `transport` and
    /// publishing to `climate`.
    pub fn builder(transport: T, climate: impl ClimateSink + 'static) -> Tion3sBuilder<T> {
        Tion3sBuilder::new(transport, Box::new(climate))
    }

    pub(crate) fn new(
        name: String,
        transport: T,
        adapter: ClimateAdapter,
        presets: BTreeMap<ClimatePreset, PresetConfig>,
        boost_minutes: u8,
    ) -> Self {
        Self {
            name,
            transport,
            state: DeviceState::new(),
            adapter,
            presets,
            deferred: TaskQueue::new(),
            boost: BoostTimer::new(boost_minutes),
            connected: false,
        }
    }

    /// Returns the friendly name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the last reported state.
    #[must_use]
    pub fn state(&self) -> &DeviceState {
        &self.state
    }

    /// Returns the climate view of the last reported state.
    #[must_use]
    pub fn view(&self) -> ClimateView {
        to_view(&self.state)
    }

    /// Returns the current settings as a starting point for a change.
    #[must_use]
    pub fn climate_control(&self) -> ClimateControl {
        ClimateControl::from_state(&self.state)
    }

    /// Returns the kind of link.
    #[must_use]
    pub fn transport_kind(&self) -> TransportKind {
        self.transport.kind()
    }

    /// Returns a reference to the link.
    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Returns true while the link is up.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Returns the number of queued follow-up jobs.
    #[must_use]
    pub fn pending_tasks(&self) -> usize {
        self.deferred.len()
    }

    /// Returns the boost length in minutes.
    #[must_use]
    pub fn boost_time(&self) -> u8 {
        self.boost.minutes()
    }

    /// Changes the boost length and publishes it. A running boost keeps
    /// its deadline.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::OutOfRange`] unless `minutes` is 1 to 60.
    pub fn set_boost_time(&mut self, minutes: u8) -> Result<(), Error> {
        if !(BOOST_TIME_MIN..=BOOST_TIME_MAX).contains(&minutes) {
            return Err(ValueError::OutOfRange {
                min: i16::from(BOOST_TIME_MIN),
                max: i16::from(BOOST_TIME_MAX),
                actual: i16::from(minutes),
            }
            .into());
        }
        self.boost.set_minutes(minutes);
        self.adapter.publish_boost_time(minutes);
        Ok(())
    }

    /// Returns the time left in the running boost.
    #[must_use]
    pub fn boost_time_left(&self) -> Option<Duration> {
        self.boost.remaining(Instant::now())
    }

    /// Returns true while a boost runs.
    #[must_use]
    pub fn is_boosting(&self) -> bool {
        self.boost.is_active()
    }

    /// Marks the link as up and asks for a state report.
    ///
    /// # Errors
    ///
    /// Returns error if the request cannot be sent.
    pub async fn connect(&mut self) -> Result<(), Error> {
        self.connected = true;
        debug!(device = %self.name, link = %self.transport.kind(), "Connected");
        self.request_state().await
    }

    /// Marks the link as down and forgets the last reported state.
    ///
    /// Queued follow-up jobs belong to the old link and are dropped. A
    /// running boost is abandoned without restoring anything.
    pub fn disconnect(&mut self) {
        self.connected = false;
        self.state.clear();
        for job in self.deferred.take() {
            trace!(device = %self.name, job = job.name(), "Dropping deferred job");
        }
        if self.boost.cancel().is_some() {
            self.adapter.publish_boost_time_left(Duration::ZERO);
        }
        debug!(device = %self.name, "Disconnected");
    }

    /// Logs the component configuration.
    pub fn dump_config(&self) {
        info!(
            device = %self.name,
            link = %self.transport.kind(),
            channels = ?self.adapter.channels(),
            presets = ?self.presets.keys().collect::<Vec<_>>(),
            boost_time = self.boost.minutes(),
            "Tion 3S"
        );
    }

    /// Handles one raw frame received from the device.
    ///
    /// A frame that does not decode is dropped and leaves the state
    /// untouched. Otherwise the state is replaced, published to the host,
    /// and on old serial firmware a follow-up request is queued. An expired
    /// boost queues its restore job.
    ///
    /// # Errors
    ///
    /// Returns the [`DecodeError`] of a dropped frame.
    pub fn handle_frame(&mut self, frame: &[u8]) -> Result<ClimateView, DecodeError> {
        let state = codec::decode(frame).inspect_err(|err| {
            warn!(device = %self.name, error = %err, "Dropping frame");
        })?;

        self.state = state;
        let view = self.adapter.publish(&self.state);
        trace!(device = %self.name, state = ?self.state, "State updated");

        if self.transport.kind() == TransportKind::Uart
            && self.state.firmware_version < FIRMWARE_WITHOUT_FOLLOW_UP
        {
            self.deferred.defer(Deferred::RequestAfterState);
        }
        self.update_boost();

        Ok(view)
    }

    /// Sends every queued follow-up job, oldest first.
    ///
    /// While disconnected the jobs are dropped instead. Returns the number
    /// of jobs sent.
    ///
    /// # Errors
    ///
    /// Returns error if a job cannot be sent; later jobs stay queued.
    pub async fn run_deferred(&mut self) -> Result<usize, Error> {
        if !self.connected {
            for job in self.deferred.take() {
                trace!(device = %self.name, job = job.name(), "Dropping deferred job");
            }
            return Ok(0);
        }

        let mut sent = 0;
        while let Some(job) = self.deferred.pop() {
            match job {
                Deferred::RequestAfterState => self.send(&RequestAfterStateCommand).await?,
                Deferred::EndBoost => self.end_boost().await?,
            }
            sent += 1;
        }
        Ok(sent)
    }

    /// Receives and handles one frame, then runs the queued jobs.
    ///
    /// Returns the published view, or `None` if the frame was dropped.
    ///
    /// # Errors
    ///
    /// Returns error if the link fails. Undecodable frames are not errors.
    pub async fn poll(&mut self) -> Result<Option<ClimateView>, Error> {
        let frame = self.transport.receive_frame().await?;
        let view = match self.handle_frame(&frame) {
            Ok(view) => Some(view),
            Err(_) => {
                self.update_boost();
                None
            }
        };
        self.run_deferred().await?;
        Ok(view)
    }

    /// Checks the boost deadline and runs the queued jobs without waiting
    /// for a frame.
    ///
    /// Returns the number of jobs sent.
    ///
    /// # Errors
    ///
    /// Returns error if a job cannot be sent.
    pub async fn tick(&mut self) -> Result<usize, Error> {
        self.update_boost();
        self.run_deferred().await
    }

    /// Asks the device for a state report.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotConnected`] while disconnected, or the link error.
    pub async fn request_state(&mut self) -> Result<(), Error> {
        self.send(&RequestStateCommand).await
    }

    /// Applies a climate change.
    ///
    /// The owned state is not updated; the device's next report is. A
    /// running boost is cancelled and its saved settings are discarded.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotConnected`] while disconnected, or the link error.
    pub async fn control(&mut self, control: &ClimateControl) -> Result<(), Error> {
        if !self.connected {
            return Err(Error::NotConnected);
        }
        self.drop_boost();
        self.write_control(control).await
    }

    /// Selects the air intake by its label and writes it to the device.
    ///
    /// # Errors
    ///
    /// Returns a [`ValueError`](crate::error::ValueError) for an unknown
    /// label, [`Error::NotConnected`] while disconnected, or the link error.
    pub async fn select_air_intake(&mut self, label: &str) -> Result<(), Error> {
        let gate: GatePosition = label.parse()?;
        if !self.connected {
            return Err(Error::NotConnected);
        }
        self.adapter.publish_air_intake(gate);
        let control = self.climate_control().with_gate_position(gate);
        self.write_control(&control).await
    }

    /// Switches the buzzer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotConnected`] while disconnected, or the link error.
    pub async fn set_buzzer(&mut self, on: bool) -> Result<(), Error> {
        let control = self.climate_control().with_buzzer(on);
        self.write_control(&control).await
    }

    /// Applies the settings of a configured preset.
    ///
    /// Settings the preset leaves out keep their current value. The boost
    /// preset starts a boost that restores the previous settings after
    /// [`boost_time`](Self::boost_time) minutes; re-applying it restarts the
    /// countdown. Any other preset cancels a running boost.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PresetNotConfigured`] for an unknown preset,
    /// [`Error::NotConnected`] while disconnected, or the link error.
    pub async fn apply_preset(&mut self, preset: ClimatePreset) -> Result<(), Error> {
        let settings = *self
            .presets
            .get(&preset)
            .ok_or(Error::PresetNotConfigured(preset))?;
        if !self.connected {
            return Err(Error::NotConnected);
        }

        let restore = self.climate_control();
        let mut control = restore.clone();
        if let Some(mode) = settings.mode {
            control = control.with_mode(mode);
        }
        if let Some(speed) = settings.fan_speed {
            control = control.with_fan_speed(FanSpeed::new(speed)?);
        }
        if let Some(temperature) = settings.target_temperature {
            control = control.with_target_temperature(temperature);
        }

        debug!(device = %self.name, preset = %preset, "Applying preset");
        if preset != ClimatePreset::Boost {
            self.drop_boost();
            return self.write_control(&control).await;
        }

        self.write_control(&control).await?;
        self.boost.start(restore, Instant::now());
        debug!(device = %self.name, minutes = self.boost.minutes(), "Boost started");
        self.adapter.publish_boost_time_left(self.boost.duration());
        Ok(())
    }

    /// Stops a running boost and restores the settings it replaced.
    ///
    /// Returns `false` if no boost was running.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotConnected`] while disconnected, or the link error.
    pub async fn cancel_boost(&mut self) -> Result<bool, Error> {
        if !self.connected {
            return Err(Error::NotConnected);
        }
        match self.boost.cancel() {
            Some(restore) => {
                debug!(device = %self.name, "Boost cancelled");
                self.restore(&restore).await?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn update_boost(&mut self) {
        let now = Instant::now();
        if self.boost.is_due(now) && !self.deferred.contains(&Deferred::EndBoost) {
            self.deferred.defer(Deferred::EndBoost);
        }
        if let Some(left) = self.boost.remaining(now) {
            self.adapter.publish_boost_time_left(left);
        }
    }

    async fn end_boost(&mut self) -> Result<(), Error> {
        // cancelled after the job was queued
        let Some(restore) = self.boost.cancel() else {
            return Ok(());
        };
        debug!(device = %self.name, "Boost finished");
        self.restore(&restore).await
    }

    // Mode, fan and temperature come back; buzzer and gate stay as they are.
    async fn restore(&mut self, saved: &ClimateControl) -> Result<(), Error> {
        self.adapter.publish_boost_time_left(Duration::ZERO);
        let mut control = self
            .climate_control()
            .with_mode(saved.mode)
            .with_target_temperature(saved.target_temperature);
        if let Some(speed) = saved.fan_speed {
            control = control.with_fan_speed(speed);
        }
        self.write_control(&control).await
    }

    fn drop_boost(&mut self) {
        if self.boost.cancel().is_some() {
            debug!(device = %self.name, "Boost overridden");
            self.adapter.publish_boost_time_left(Duration::ZERO);
        }
    }

    async fn write_control(&mut self, control: &ClimateControl) -> Result<(), Error> {
        for state in build_commands(&self.state, control) {
            self.send(&WriteStateCommand::new(state)).await?;
        }
        Ok(())
    }

    async fn send<C: Command>(&mut self, command: &C) -> Result<(), Error> {
        if !self.connected {
            return Err(Error::NotConnected);
        }
        debug!(device = %self.name, command = command.name(), "Sending command");
        self.transport.send_frame(&command.to_frame()).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::rc::Rc;

    use super::*;
    use crate::error::TransportError;
    use crate::protocol::codec::{
        CMD_REQUEST_AFTER_STATE, CMD_REQUEST_STATE, CMD_SET_STATE, Frame, encode_report,
    };
    use crate::types::ClimateMode;

    #[derive(Debug)]
    struct ScriptedLink {
        kind: TransportKind,
        inbound: VecDeque<Vec<u8>>,
        sent: Vec<Vec<u8>>,
    }

    impl ScriptedLink {
        fn new(kind: TransportKind) -> Self {
            Self {
                kind,
                inbound: VecDeque::new(),
                sent: Vec::new(),
            }
        }

        fn commands(&self) -> Vec<u8> {
            self.sent.iter().map(|frame| frame[1]).collect()
        }
    }

    impl Transport for ScriptedLink {
        fn kind(&self) -> TransportKind {
            self.kind
        }

        async fn receive_frame(&mut self) -> Result<Vec<u8>, TransportError> {
            self.inbound.pop_front().ok_or(TransportError::Closed)
        }

        async fn send_frame(&mut self, frame: &[u8]) -> Result<(), TransportError> {
            self.sent.push(frame.to_vec());
            Ok(())
        }
    }

    fn device(kind: TransportKind) -> (Tion3s<ScriptedLink>, Rc<RefCell<Vec<ClimateView>>>) {
        let views = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&views);
        let device = Tion3s::builder(ScriptedLink::new(kind), move |view: &ClimateView| {
            sink.borrow_mut().push(*view);
        })
        .build()
        .unwrap();
        (device, views)
    }

    fn report(firmware: u16) -> DeviceState {
        let mut state = DeviceState::new();
        state.flags.power_state = true;
        state.fan_speed = 3;
        state.target_temperature = 20;
        state.firmware_version = firmware;
        state
    }

    #[tokio::test]
    async fn connect_requests_state() {
        let (mut device, _) = device(TransportKind::Ble);
        device.connect().await.unwrap();

        assert!(device.is_connected());
        assert_eq!(device.transport().commands(), [CMD_REQUEST_STATE]);
    }

    #[tokio::test]
    async fn handle_frame_replaces_state_and_publishes() {
        let (mut device, views) = device(TransportKind::Ble);

        let view = device.handle_frame(&encode_report(&report(0x0040))).unwrap();

        assert_eq!(device.state(), &report(0x0040));
        assert_eq!(view.mode, ClimateMode::FanOnly);
        assert_eq!(views.borrow().as_slice(), [view]);
        assert_eq!(device.pending_tasks(), 0);
    }

    #[tokio::test]
    async fn old_uart_firmware_queues_follow_up() {
        let (mut device, _) = device(TransportKind::Uart);
        device.connect().await.unwrap();

        device.handle_frame(&encode_report(&report(0x0030))).unwrap();
        assert_eq!(device.pending_tasks(), 1);
        assert_eq!(device.transport().sent.len(), 1);

        assert_eq!(device.run_deferred().await.unwrap(), 1);
        assert_eq!(
            device.transport().commands(),
            [CMD_REQUEST_STATE, CMD_REQUEST_AFTER_STATE]
        );
        assert_eq!(device.pending_tasks(), 0);
    }

    #[tokio::test]
    async fn new_uart_firmware_needs_no_follow_up() {
        let (mut device, _) = device(TransportKind::Uart);
        device
            .handle_frame(&encode_report(&report(FIRMWARE_WITHOUT_FOLLOW_UP)))
            .unwrap();
        assert_eq!(device.pending_tasks(), 0);
    }

    #[tokio::test]
    async fn ble_link_needs_no_follow_up() {
        let (mut device, _) = device(TransportKind::Ble);
        device.handle_frame(&encode_report(&report(0x0010))).unwrap();
        assert_eq!(device.pending_tasks(), 0);
    }

    #[tokio::test]
    async fn bad_frame_keeps_state() {
        let (mut device, views) = device(TransportKind::Ble);
        device.handle_frame(&encode_report(&report(0x0040))).unwrap();

        let mut corrupt = encode_report(&report(0x0041));
        corrupt[5] ^= 0xFF;
        assert!(device.handle_frame(&corrupt).is_err());

        let request = Frame::request(CMD_REQUEST_STATE, [0; 17]).to_bytes();
        assert!(matches!(
            device.handle_frame(&request),
            Err(DecodeError::UnexpectedCommand { .. })
        ));

        assert_eq!(device.state(), &report(0x0040));
        assert_eq!(views.borrow().len(), 1);
    }

    #[tokio::test]
    async fn deferred_jobs_dropped_while_disconnected() {
        let (mut device, _) = device(TransportKind::Uart);
        device.handle_frame(&encode_report(&report(0x0030))).unwrap();

        assert_eq!(device.run_deferred().await.unwrap(), 0);
        assert_eq!(device.pending_tasks(), 0);
        assert!(device.transport().sent.is_empty());
    }

    #[tokio::test]
    async fn disconnect_drops_queued_follow_up() {
        let (mut device, _) = device(TransportKind::Uart);
        device.connect().await.unwrap();
        device.handle_frame(&encode_report(&report(0x0030))).unwrap();
        assert_eq!(device.pending_tasks(), 1);

        device.disconnect();
        assert_eq!(device.pending_tasks(), 0);

        device.connect().await.unwrap();
        assert_eq!(device.run_deferred().await.unwrap(), 0);
        assert_eq!(
            device.transport().commands(),
            [CMD_REQUEST_STATE, CMD_REQUEST_STATE]
        );
    }

    #[tokio::test]
    async fn boost_time_range() {
        let (mut device, _) = device(TransportKind::Ble);

        device.set_boost_time(60).unwrap();
        assert_eq!(device.boost_time(), 60);
        for minutes in [0, 61] {
            assert!(matches!(
                device.set_boost_time(minutes),
                Err(Error::Value(ValueError::OutOfRange { min: 1, max: 60, .. }))
            ));
        }
        assert_eq!(device.boost_time(), 60);
    }

    #[tokio::test]
    async fn control_requires_connection() {
        let (mut device, _) = device(TransportKind::Ble);
        let control = device.climate_control().with_mode(ClimateMode::Heat);

        assert!(matches!(
            device.control(&control).await,
            Err(Error::NotConnected)
        ));
    }

    #[tokio::test]
    async fn control_writes_full_state() {
        let (mut device, _) = device(TransportKind::Ble);
        device.connect().await.unwrap();
        device.handle_frame(&encode_report(&report(0x0040))).unwrap();

        let control = device.climate_control().with_target_temperature(22);
        device.control(&control).await.unwrap();

        let sent = &device.transport().sent;
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[1][1], CMD_SET_STATE);
        let written = codec::decode(&sent[1]).unwrap();
        assert_eq!(written.target_temperature, 22);
        assert_eq!(written.fan_speed, 3);
        assert_eq!(device.state().target_temperature, 20);
    }

    #[tokio::test]
    async fn poll_on_closed_link_fails() {
        let (mut device, _) = device(TransportKind::Ble);
        assert!(matches!(
            device.poll().await,
            Err(Error::Transport(TransportError::Closed))
        ));
    }

    #[tokio::test]
    async fn disconnect_clears_state() {
        let (mut device, _) = device(TransportKind::Ble);
        device.connect().await.unwrap();
        device.handle_frame(&encode_report(&report(0x0040))).unwrap();

        device.disconnect();

        assert!(!device.is_connected());
        assert_eq!(device.state(), &DeviceState::new());
        assert_eq!(device.view().mode, ClimateMode::Off);
    }
}
