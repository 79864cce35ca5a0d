// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Packed state flags.

/// Heater element enabled.
const HEATER: u8 = 1 << 0;
/// Fan powered.
const POWER: u8 = 1 << 1;
/// Timer running.
const TIMER: u8 = 1 << 2;
/// Buzzer enabled.
const SOUND: u8 = 1 << 3;
/// Automatic mode.
const AUTO: u8 = 1 << 4;
/// `MagicAir` base station connected.
const MA_CONNECT: u8 = 1 << 5;
/// Settings saved.
const SAVE: u8 = 1 << 6;
/// `MagicAir` pairing in progress.
const MA_PAIRING: u8 = 1 << 7;

/// Boolean state flags of the breezer.
///
/// On the wire the named flags share one byte (bit 0 is the heater, bit 7
/// the `MagicAir` pairing flag); the following byte is reserved and kept
/// verbatim in [`StateFlags::reserved`].
///
/// # Examples
///
/// ```
/// use tion_lib::state::StateFlags;
///
/// let flags = StateFlags::from_bits(0b0000_0011, 0);
/// assert!(flags.heater_state);
/// assert!(flags.power_state);
/// assert_eq!(flags.bits(), 0b0000_0011);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
// Each boolean mirrors one hardware bit.
#[allow(clippy::struct_excessive_bools)]
pub struct StateFlags {
    /// Heater element enabled.
    pub heater_state: bool,
    /// Fan powered.
    pub power_state: bool,
    /// Timer running.
    pub timer_state: bool,
    /// Buzzer enabled.
    pub sound_state: bool,
    /// Automatic mode.
    pub auto_state: bool,
    /// `MagicAir` base station connected.
    pub ma_connect: bool,
    /// Settings saved.
    pub save: bool,
    /// `MagicAir` pairing in progress.
    pub ma_pairing: bool,
    /// Reserved byte, carried through unchanged.
    pub reserved: u8,
}

impl StateFlags {
    /// Unpacks the flag byte and the reserved byte.
    #[must_use]
    pub const fn from_bits(bits: u8, reserved: u8) -> Self {
        Self {
            heater_state: bits & HEATER != 0,
            power_state: bits & POWER != 0,
            timer_state: bits & TIMER != 0,
            sound_state: bits & SOUND != 0,
            auto_state: bits & AUTO != 0,
            ma_connect: bits & MA_CONNECT != 0,
            save: bits & SAVE != 0,
            ma_pairing: bits & MA_PAIRING != 0,
            reserved,
        }
    }

    /// Packs the named flags into the flag byte.
    #[must_use]
    pub const fn bits(&self) -> u8 {
        let mut bits = 0;
        if self.heater_state {
            bits |= HEATER;
        }
        if self.power_state {
            bits |= POWER;
        }
        if self.timer_state {
            bits |= TIMER;
        }
        if self.sound_state {
            bits |= SOUND;
        }
        if self.auto_state {
            bits |= AUTO;
        }
        if self.ma_connect {
            bits |= MA_CONNECT;
        }
        if self.save {
            bits |= SAVE;
        }
        if self.ma_pairing {
            bits |= MA_PAIRING;
        }
        bits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_bit_round_trips() {
        for bits in 0..=u8::MAX {
            assert_eq!(StateFlags::from_bits(bits, 0).bits(), bits);
        }
    }

    #[test]
    fn bit_positions() {
        let flags = StateFlags::from_bits(SOUND | MA_PAIRING, 0x5A);
        assert!(flags.sound_state);
        assert!(flags.ma_pairing);
        assert!(!flags.power_state);
        assert_eq!(flags.reserved, 0x5A);
    }
}
