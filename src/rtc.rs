//! Real-time-clock collaborator and BCD conversion.
//!
//! The RTC chip (a DS1307 or register-compatible part) exchanges its time
//! fields as binary-coded decimal. The bus protocol belongs to the driver
//! behind [`RealTimeClock`]; this module only decodes and encodes the
//! register block.

use crate::types::ClockError;

/// DS1307 clock-halt bit in the seconds register. Set means the oscillator
/// is stopped.
pub const CLOCK_HALT: u8 = 0x80;

/// Hours register flag selecting 12-hour mode.
pub const HOUR_MODE_12: u8 = 0x40;

/// Hours register PM flag (12-hour mode only).
pub const HOUR_PM: u8 = 0x20;

/// Converts a packed BCD byte to binary: high nibble tens, low nibble units.
#[inline]
pub const fn bcd_to_bin(bcd: u8) -> u8 {
    (bcd >> 4) * 10 + (bcd & 0x0F)
}

/// Converts a binary value in `0..=99` to packed BCD.
#[inline]
pub const fn bin_to_bcd(bin: u8) -> u8 {
    ((bin / 10) << 4) | (bin % 10)
}

/// The seven raw time registers, in chip order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RtcRegisters {
    pub seconds: u8,
    pub minutes: u8,
    pub hours: u8,
    pub weekday: u8,
    pub date: u8,
    pub month: u8,
    pub year: u8,
}

impl RtcRegisters {
    /// Registers as a byte block starting at register 0x00.
    pub const fn to_bytes(&self) -> [u8; 7] {
        [
            self.seconds,
            self.minutes,
            self.hours,
            self.weekday,
            self.date,
            self.month,
            self.year,
        ]
    }

    /// Registers from a byte block starting at register 0x00.
    pub const fn from_bytes(bytes: [u8; 7]) -> Self {
        Self {
            seconds: bytes[0],
            minutes: bytes[1],
            hours: bytes[2],
            weekday: bytes[3],
            date: bytes[4],
            month: bytes[5],
            year: bytes[6],
        }
    }
}

/// Reads and writes the RTC time registers.
///
/// Bus errors are the driver's concern; implementations return their best
/// reading and never fail.
pub trait RealTimeClock {
    /// Reads the time registers.
    fn read(&mut self) -> RtcRegisters;

    /// Writes the time registers.
    fn write(&mut self, registers: &RtcRegisters);
}

/// A decoded wall-clock snapshot.
///
/// Hours are kept on the clock face's 1..=12 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WallClock {
    pub seconds: u8,
    pub minutes: u8,
    pub hours: u8,
    /// 1..=7, as counted by the RTC's day register.
    pub weekday: u8,
    /// 1..=31.
    pub date: u8,
    /// 1..=12.
    pub month: u8,
    /// 0..=99.
    pub year: u8,
}

impl WallClock {
    /// Twelve o'clock on the first of January, year 00.
    pub const MIDNIGHT: Self = Self {
        seconds: 0,
        minutes: 0,
        hours: 12,
        weekday: 1,
        date: 1,
        month: 1,
        year: 0,
    };

    /// Decodes a register block.
    ///
    /// The clock-halt bit is ignored, both 12- and 24-hour register modes
    /// are accepted, and the hour is folded onto 1..=12.
    pub const fn from_registers(registers: &RtcRegisters) -> Self {
        let hours = if registers.hours & HOUR_MODE_12 != 0 {
            bcd_to_bin(registers.hours & 0x1F)
        } else {
            bcd_to_bin(registers.hours & 0x3F)
        };

        Self {
            seconds: bcd_to_bin(registers.seconds & !CLOCK_HALT),
            minutes: bcd_to_bin(registers.minutes & 0x7F),
            hours: fold_hour(hours),
            weekday: registers.weekday & 0x07,
            date: bcd_to_bin(registers.date & 0x3F),
            month: bcd_to_bin(registers.month & 0x1F),
            year: bcd_to_bin(registers.year),
        }
    }

    /// Encodes a register block with the oscillator running and the hour in
    /// 24-hour encoding.
    pub const fn to_registers(&self) -> RtcRegisters {
        RtcRegisters {
            seconds: bin_to_bcd(self.seconds) & !CLOCK_HALT,
            minutes: bin_to_bcd(self.minutes),
            hours: bin_to_bcd(self.hours),
            weekday: self.weekday,
            date: bin_to_bcd(self.date),
            month: bin_to_bcd(self.month),
            year: bin_to_bcd(self.year),
        }
    }

    /// Checks the hour, minute and second against the clock face.
    ///
    /// # Errors
    /// `InvalidTime` if any of the three is out of range.
    pub const fn validate_time(&self) -> Result<(), ClockError> {
        if self.seconds > 59 || self.minutes > 59 || self.hours < 1 || self.hours > 12 {
            return Err(ClockError::InvalidTime);
        }
        Ok(())
    }

    /// Checks every field against its domain.
    ///
    /// # Errors
    /// `InvalidTime` if any field is out of range.
    pub const fn validate(&self) -> Result<(), ClockError> {
        if self.validate_time().is_err()
            || self.weekday < 1
            || self.weekday > 7
            || self.date < 1
            || self.date > 31
            || self.month < 1
            || self.month > 12
            || self.year > 99
        {
            return Err(ClockError::InvalidTime);
        }
        Ok(())
    }
}

impl Default for WallClock {
    fn default() -> Self {
        Self::MIDNIGHT
    }
}

/// Folds 0..=23 onto the 1..=12 face.
const fn fold_hour(hour: u8) -> u8 {
    match hour % 12 {
        0 => 12,
        folded => folded,
    }
}
