//! Errors and small shared types.

/// Angular slices per revolution.
pub const RESOLUTION: u16 = 180;

/// An angular slice index in `0..RESOLUTION`.
pub type Sector = u8;

/// Validation errors for values entering the core from outside (settings
/// bytes, RTC registers, user-supplied times).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockError {
    /// Palette index outside `0..NUM_COLORS`.
    InvalidColor(u8),

    /// Background index outside `0..NUM_BACKGROUNDS`.
    InvalidBackground(u8),

    /// A wall-clock field is outside its domain.
    InvalidTime,
}

impl core::fmt::Display for ClockError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ClockError::InvalidColor(index) => {
                write!(f, "color index {} is outside the palette", index)
            }
            ClockError::InvalidBackground(index) => {
                write!(f, "background index {} does not exist", index)
            }
            ClockError::InvalidTime => {
                write!(f, "time field out of range")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ClockError {}
