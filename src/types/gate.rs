// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Air intake gate position.

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

/// Physical position of the air intake valve.
///
/// The discriminants are the raw values carried in the state frame. Any
/// other raw value has no mapping.
///
/// # Examples
///
/// ```
/// use tion_lib::types::GatePosition;
///
/// assert_eq!(GatePosition::try_from(1).unwrap(), GatePosition::Outdoor);
/// assert!(GatePosition::try_from(4).is_err());
/// assert_eq!("mixed".parse::<GatePosition>().unwrap(), GatePosition::Mixed);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum GatePosition {
    /// Valve closed.
    None = 0,
    /// Fresh air from outside.
    Outdoor = 1,
    /// Recirculation of room air.
    Indoor = 2,
    /// Mix of outdoor and room air.
    Mixed = 3,
}

impl GatePosition {
    /// All positions, in raw value order.
    pub const ALL: [Self; 4] = [Self::None, Self::Outdoor, Self::Indoor, Self::Mixed];

    /// Returns the label shown by the air intake select.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Outdoor => "Outdoor",
            Self::Indoor => "Indoor",
            Self::Mixed => "Mixed",
        }
    }

    /// Returns the raw frame value.
    #[must_use]
    pub const fn raw(&self) -> u8 {
        *self as u8
    }

    /// Returns the select options, in raw value order.
    #[must_use]
    pub fn labels() -> Vec<&'static str> {
        Self::ALL.iter().map(Self::label).collect()
    }
}

impl fmt::Display for GatePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl TryFrom<u8> for GatePosition {
    type Error = ValueError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(usize::from(value))
            .copied()
            .ok_or(ValueError::Unmapped {
                kind: "gate position",
                value,
            })
    }
}

impl FromStr for GatePosition {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|gate| gate.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| ValueError::UnknownLabel {
                kind: "gate position",
                label: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_values_map() {
        for gate in GatePosition::ALL {
            assert_eq!(GatePosition::try_from(gate.raw()).unwrap(), gate);
        }
    }

    #[test]
    fn out_of_range_is_unmapped() {
        assert_eq!(
            GatePosition::try_from(4),
            Err(ValueError::Unmapped {
                kind: "gate position",
                value: 4
            })
        );
    }

    #[test]
    fn labels_parse_case_insensitive() {
        assert_eq!("OUTDOOR".parse::<GatePosition>().unwrap(), GatePosition::Outdoor);
        assert_eq!("indoor".parse::<GatePosition>().unwrap(), GatePosition::Indoor);
        assert!("window".parse::<GatePosition>().is_err());
    }

    #[test]
    fn labels_in_raw_order() {
        assert_eq!(GatePosition::labels(), ["None", "Outdoor", "Indoor", "Mixed"]);
    }
}
