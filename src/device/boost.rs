// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Boost preset timer.
//!
//! A boost runs the boost preset for a fixed number of minutes and then
//! puts back the settings that were active before it started.

use std::time::Duration;

use tokio::time::Instant;

use crate::command::ClimateControl;

#[derive(Debug, Clone)]
struct ActiveBoost {
    restore: ClimateControl,
    deadline: Instant,
}

/// Tracks a running boost and the settings it replaced.
#[derive(Debug, Clone)]
pub(crate) struct BoostTimer {
    minutes: u8,
    active: Option<ActiveBoost>,
}

impl BoostTimer {
    pub(crate) fn new(minutes: u8) -> Self {
        Self {
            minutes,
            active: None,
        }
    }

    pub(crate) fn minutes(&self) -> u8 {
        self.minutes
    }

    /// Changes the length of the next boost; a running one keeps its
    /// deadline.
    pub(crate) fn set_minutes(&mut self, minutes: u8) {
        self.minutes = minutes;
    }

    pub(crate) fn duration(&self) -> Duration {
        Duration::from_secs(u64::from(self.minutes) * 60)
    }

    pub(crate) fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Starts a boost ending one boost length after `now`.
    ///
    /// Restarting a running boost only moves the deadline; the settings
    /// saved by the first start are kept.
    pub(crate) fn start(&mut self, restore: ClimateControl, now: Instant) {
        let deadline = now + self.duration();
        match &mut self.active {
            Some(active) => active.deadline = deadline,
            None => self.active = Some(ActiveBoost { restore, deadline }),
        }
    }

    /// Returns the time left, or `None` when no boost runs.
    pub(crate) fn remaining(&self, now: Instant) -> Option<Duration> {
        self.active
            .as_ref()
            .map(|active| active.deadline.saturating_duration_since(now))
    }

    pub(crate) fn is_due(&self, now: Instant) -> bool {
        self.active
            .as_ref()
            .is_some_and(|active| now >= active.deadline)
    }

    /// Stops the boost and returns the settings it replaced.
    pub(crate) fn cancel(&mut self) -> Option<ClimateControl> {
        self.active.take().map(|active| active.restore)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::DeviceState;
    use crate::types::ClimateMode;

    fn control(mode: ClimateMode) -> ClimateControl {
        ClimateControl::from_state(&DeviceState::new()).with_mode(mode)
    }

    #[test]
    fn idle_timer() {
        let timer = BoostTimer::new(20);
        let now = Instant::now();

        assert!(!timer.is_active());
        assert!(!timer.is_due(now));
        assert_eq!(timer.remaining(now), None);
        assert_eq!(timer.duration(), Duration::from_secs(1200));
    }

    #[test]
    fn expires_after_duration() {
        let mut timer = BoostTimer::new(1);
        let now = Instant::now();
        timer.start(control(ClimateMode::Heat), now);

        assert_eq!(timer.remaining(now), Some(Duration::from_secs(60)));
        assert!(!timer.is_due(now + Duration::from_secs(59)));
        assert!(timer.is_due(now + Duration::from_secs(60)));
        assert_eq!(
            timer.remaining(now + Duration::from_secs(90)),
            Some(Duration::ZERO)
        );
    }

    #[test]
    fn restart_keeps_first_restore_point() {
        let mut timer = BoostTimer::new(1);
        let now = Instant::now();
        timer.start(control(ClimateMode::Heat), now);
        timer.start(control(ClimateMode::FanOnly), now + Duration::from_secs(30));

        assert!(!timer.is_due(now + Duration::from_secs(60)));
        assert_eq!(
            timer.cancel().map(|restore| restore.mode),
            Some(ClimateMode::Heat)
        );
        assert!(!timer.is_active());
        assert!(timer.cancel().is_none());
    }

    #[test]
    fn new_length_applies_to_next_boost() {
        let mut timer = BoostTimer::new(1);
        let now = Instant::now();
        timer.start(control(ClimateMode::Heat), now);
        timer.set_minutes(5);

        assert_eq!(timer.minutes(), 5);
        assert_eq!(timer.remaining(now), Some(Duration::from_secs(60)));
    }
}
