// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Fan speed level type.
//!
//! The climate entity exposes the fan speed as a fan mode token: a single
//! ASCII digit `'0'..='9'`. Speed 0 means the level is unknown or unset.

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

/// Discrete fan speed level (0-9).
///
/// # Examples
///
/// ```
/// use tion_lib::types::FanSpeed;
///
/// let speed = FanSpeed::new(4).unwrap();
/// assert_eq!(speed.token(), "4");
///
/// // An absent fan mode maps to speed 0
/// assert_eq!(FanSpeed::from_token(None).unwrap(), FanSpeed::UNKNOWN);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, serde::Serialize, serde::Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct FanSpeed(u8);

impl FanSpeed {
    /// Highest speed level representable by a single digit.
    pub const MAX: u8 = 9;

    /// Unknown or unset speed.
    pub const UNKNOWN: Self = Self(0);

    /// Creates a new fan speed.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if value is greater than 9.
    pub fn new(value: u8) -> Result<Self, ValueError> {
        if value > Self::MAX {
            return Err(ValueError::OutOfRange {
                min: 0,
                max: i16::from(Self::MAX),
                actual: i16::from(value),
            });
        }
        Ok(Self(value))
    }

    /// Maps a raw device level to a speed, treating anything above 9 as unknown.
    #[must_use]
    pub const fn from_raw(value: u8) -> Self {
        if value > Self::MAX {
            Self::UNKNOWN
        } else {
            Self(value)
        }
    }

    /// Parses an optional fan mode token.
    ///
    /// `None` and the empty string map to [`FanSpeed::UNKNOWN`].
    ///
    /// # Errors
    ///
    /// Returns `ValueError::InvalidFanMode` if the token is not one digit.
    pub fn from_token(token: Option<&str>) -> Result<Self, ValueError> {
        match token {
            None | Some("") => Ok(Self::UNKNOWN),
            Some(s) => s.parse(),
        }
    }

    /// Returns the speed level.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.0
    }

    /// Returns whether the level is known.
    #[must_use]
    pub const fn is_known(&self) -> bool {
        self.0 != 0
    }

    /// Returns the single-digit fan mode token.
    #[must_use]
    pub fn token(&self) -> String {
        char::from(b'0' + self.0).to_string()
    }
}

impl fmt::Display for FanSpeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for FanSpeed {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.as_bytes() {
            [digit @ b'0'..=b'9'] => Ok(Self(digit - b'0')),
            _ => Err(ValueError::InvalidFanMode(s.to_string())),
        }
    }
}

impl TryFrom<u8> for FanSpeed {
    type Error = ValueError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<FanSpeed> for u8 {
    fn from(speed: FanSpeed) -> Self {
        speed.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fan_speed_valid() {
        for v in 0..=9 {
            assert_eq!(FanSpeed::new(v).unwrap().value(), v);
        }
    }

    #[test]
    fn fan_speed_invalid() {
        assert!(FanSpeed::new(10).is_err());
    }

    #[test]
    fn token_round_trip() {
        let speed: FanSpeed = "6".parse().unwrap();
        assert_eq!(speed.value(), 6);
        assert_eq!(speed.token(), "6");
    }

    #[test]
    fn absent_token_is_unknown() {
        assert_eq!(FanSpeed::from_token(None).unwrap(), FanSpeed::UNKNOWN);
        assert_eq!(FanSpeed::from_token(Some("")).unwrap(), FanSpeed::UNKNOWN);
        assert!(!FanSpeed::UNKNOWN.is_known());
    }

    #[test]
    fn bad_tokens_rejected() {
        assert!(FanSpeed::from_token(Some("12")).is_err());
        assert!(FanSpeed::from_token(Some("a")).is_err());
        assert!("-1".parse::<FanSpeed>().is_err());
    }

    #[test]
    fn raw_above_nine_is_unknown() {
        assert_eq!(FanSpeed::from_raw(3).value(), 3);
        assert_eq!(FanSpeed::from_raw(12), FanSpeed::UNKNOWN);
    }
}
