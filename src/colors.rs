//! The fixed LED color palette.
//!
//! The rotor carries three color-enable lines (red, blue, green). Every
//! displayable color is a combination of those lines, so a [`Color`] is a
//! 3-bit mask. For full-color back ends and host simulators, colors convert
//! to `palette::Srgb`.

use crate::types::ClockError;
use palette::Srgb;

/// Number of selectable hand colors.
pub const NUM_COLORS: usize = 8;

/// Red enable line.
pub const RED_BIT: u8 = 0b001;
/// Blue enable line.
pub const BLUE_BIT: u8 = 0b010;
/// Green enable line.
pub const GREEN_BIT: u8 = 0b100;

/// A color the rotor LEDs can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Color {
    Off = 0,
    Red = RED_BIT,
    Blue = BLUE_BIT,
    Green = GREEN_BIT,
    Purple = RED_BIT | BLUE_BIT,
    Yellow = RED_BIT | GREEN_BIT,
    Cyan = BLUE_BIT | GREEN_BIT,
    White = RED_BIT | BLUE_BIT | GREEN_BIT,
}

/// Hand color choices, in the order the color button cycles through them.
///
/// The last slot is `Off`, which hides the hand.
pub const PALETTE: [Color; NUM_COLORS] = [
    Color::Red,
    Color::Purple,
    Color::Blue,
    Color::Cyan,
    Color::Green,
    Color::Yellow,
    Color::White,
    Color::Off,
];

impl Color {
    /// Returns the enable-line mask for this color.
    #[inline]
    pub const fn bits(self) -> u8 {
        self as u8
    }

    /// Builds a color from an enable-line mask. Bits above the three color
    /// lines are ignored.
    #[inline]
    pub const fn from_bits(bits: u8) -> Self {
        match bits & (RED_BIT | BLUE_BIT | GREEN_BIT) {
            RED_BIT => Color::Red,
            BLUE_BIT => Color::Blue,
            GREEN_BIT => Color::Green,
            0b011 => Color::Purple,
            0b101 => Color::Yellow,
            0b110 => Color::Cyan,
            0b111 => Color::White,
            _ => Color::Off,
        }
    }

    /// True when the red line is driven.
    #[inline]
    pub const fn red(self) -> bool {
        self.bits() & RED_BIT != 0
    }

    /// True when the blue line is driven.
    #[inline]
    pub const fn blue(self) -> bool {
        self.bits() & BLUE_BIT != 0
    }

    /// True when the green line is driven.
    #[inline]
    pub const fn green(self) -> bool {
        self.bits() & GREEN_BIT != 0
    }

    /// Converts to an sRGB value with each line fully on or off.
    pub fn to_srgb(self) -> Srgb {
        let level = |on: bool| if on { 1.0 } else { 0.0 };
        Srgb::new(level(self.red()), level(self.green()), level(self.blue()))
    }
}

impl From<Color> for Srgb {
    fn from(color: Color) -> Self {
        color.to_srgb()
    }
}

/// Index into [`PALETTE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ColorIndex(u8);

impl ColorIndex {
    /// Creates an index, returning `None` when it is outside the palette.
    pub const fn new(index: u8) -> Option<Self> {
        if (index as usize) < NUM_COLORS {
            Some(Self(index))
        } else {
            None
        }
    }

    /// Creates an index, reducing `index` modulo the palette size.
    pub const fn wrapping(index: u8) -> Self {
        Self(index % NUM_COLORS as u8)
    }

    /// Raw index value, as stored in settings.
    #[inline]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// The palette color at this index.
    #[inline]
    pub const fn color(self) -> Color {
        PALETTE[self.0 as usize]
    }

    /// The next palette entry, wrapping after the last one.
    #[inline]
    pub const fn next(self) -> Self {
        Self((self.0 + 1) % NUM_COLORS as u8)
    }
}

impl TryFrom<u8> for ColorIndex {
    type Error = ClockError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(ClockError::InvalidColor(value))
    }
}
