// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Frame transport over an async byte stream.

use std::time::Duration;

use futures::{SinkExt, StreamExt};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio_util::codec::Framed;

use super::codec::FrameCodec;
use super::{Transport, TransportKind};
use crate::error::TransportError;

/// A [`Transport`] over any `AsyncRead + AsyncWrite` stream.
///
/// Wraps the stream in a [`Framed`] with [`FrameCodec`], so a serial port,
/// a TCP bridge or an in-memory pipe can all drive a breezer.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use tion_lib::protocol::{FramedTransport, Transport, TransportKind};
///
/// let (stream, _peer) = tokio::io::duplex(64);
/// let transport = FramedTransport::uart(stream)
///     .with_receive_timeout(Duration::from_secs(15));
/// assert_eq!(transport.kind(), TransportKind::Uart);
/// ```
#[derive(Debug)]
pub struct FramedTransport<S> {
    framed: Framed<S, FrameCodec>,
    kind: TransportKind,
    receive_timeout: Option<Duration>,
}

impl<S> FramedTransport<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Creates a transport of the given kind.
    pub fn new(stream: S, kind: TransportKind) -> Self {
        Self {
            framed: Framed::new(stream, FrameCodec::new()),
            kind,
            receive_timeout: None,
        }
    }

    /// Creates a serial transport.
    pub fn uart(stream: S) -> Self {
        Self::new(stream, TransportKind::Uart)
    }

    /// Creates a wireless transport.
    pub fn ble(stream: S) -> Self {
        Self::new(stream, TransportKind::Ble)
    }

    /// Fails receives that wait longer than `timeout`.
    #[must_use]
    pub fn with_receive_timeout(mut self, timeout: Duration) -> Self {
        self.receive_timeout = Some(timeout);
        self
    }

    /// Returns the underlying stream.
    pub fn into_inner(self) -> S {
        self.framed.into_inner()
    }
}

impl<S> Transport for FramedTransport<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    fn kind(&self) -> TransportKind {
        self.kind
    }

    async fn receive_frame(&mut self) -> Result<Vec<u8>, TransportError> {
        let next = match self.receive_timeout {
            Some(timeout) => tokio::time::timeout(timeout, self.framed.next())
                .await
                .map_err(|_| {
                    TransportError::Timeout(u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX))
                })?,
            None => self.framed.next().await,
        };

        match next {
            Some(Ok(frame)) => Ok(frame),
            Some(Err(err)) => Err(TransportError::Io(err)),
            None => Err(TransportError::Closed),
        }
    }

    async fn send_frame(&mut self, frame: &[u8]) -> Result<(), TransportError> {
        self.framed.send(frame).await?;
        Ok(())
    }
}
