// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Deferred work run after the current handler returns.
//!
//! A frame handler must not write to the link while it is still processing
//! the frame it received, so follow-up requests are queued here and drained
//! by the owner on the same task once the handler is done.

use std::collections::VecDeque;

/// Follow-up jobs scheduled while handling a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Deferred {
    /// Ask the device to send a state report after the current one.
    RequestAfterState,
    /// End an expired boost and restore the settings it replaced.
    EndBoost,
}

impl Deferred {
    /// Returns the job name used in logs.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::RequestAfterState => "request_after_state",
            Self::EndBoost => "end_boost",
        }
    }
}

/// First-in first-out queue of deferred jobs.
///
/// # Examples
///
/// ```
/// use tion_lib::deferred::{Deferred, TaskQueue};
///
/// let mut queue = TaskQueue::new();
/// queue.defer(Deferred::RequestAfterState);
///
/// assert_eq!(queue.len(), 1);
/// assert_eq!(queue.pop(), Some(Deferred::RequestAfterState));
/// assert!(queue.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct TaskQueue<T> {
    jobs: VecDeque<T>,
}

impl<T> TaskQueue<T> {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self {
            jobs: VecDeque::new(),
        }
    }

    /// Schedules a job behind the ones already queued.
    pub fn defer(&mut self, job: T) {
        self.jobs.push_back(job);
    }

    /// Removes and returns the oldest job.
    pub fn pop(&mut self) -> Option<T> {
        self.jobs.pop_front()
    }

    /// Removes all queued jobs, oldest first.
    pub fn take(&mut self) -> Vec<T> {
        self.jobs.drain(..).collect()
    }

    /// Returns the number of queued jobs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    /// Returns true if nothing is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Drops every queued job.
    pub fn clear(&mut self) {
        self.jobs.clear();
    }
}

impl<T: PartialEq> TaskQueue<T> {
    /// Returns true if `job` is already queued.
    #[must_use]
    pub fn contains(&self, job: &T) -> bool {
        self.jobs.contains(job)
    }
}

impl<T> Default for TaskQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
