//! Static background images.
//!
//! Each background is one color per sector, built at compile time and kept in
//! flash. The hands are drawn over whichever background is selected.

use crate::colors::Color;
use crate::types::{ClockError, RESOLUTION, Sector};

/// Number of selectable backgrounds.
pub const NUM_BACKGROUNDS: usize = 10;

const N: usize = RESOLUTION as usize;

/// One color per sector.
pub type BackgroundImage = [Color; N];

const fn solid(color: Color) -> BackgroundImage {
    [color; N]
}

/// Splits the face into equal arcs, one per color, starting at sector 0.
const fn arcs(colors: &[Color]) -> BackgroundImage {
    let mut image = [Color::Off; N];
    let mut sector = 0;
    while sector < N {
        image[sector] = colors[sector * colors.len() / N];
        sector += 1;
    }
    image
}

/// Paints `mark` on every `every`-th sector of `image`.
const fn ticks(mut image: BackgroundImage, mark: Color, every: usize) -> BackgroundImage {
    let mut sector = 0;
    while sector < N {
        image[sector] = mark;
        sector += every;
    }
    image
}

/// Sectors between hour marks.
const HOUR: usize = N / 12;
/// Sectors between quarter marks.
const QUARTER: usize = N / 4;

/// The background table, indexed by [`Background`].
pub static BACKGROUNDS: [BackgroundImage; NUM_BACKGROUNDS] = [
    arcs(&[Color::Red, Color::Blue, Color::Green]),
    solid(Color::Off),
    ticks(solid(Color::Off), Color::White, HOUR),
    ticks(ticks(solid(Color::Off), Color::Blue, HOUR), Color::White, QUARTER),
    arcs(&[
        Color::Red,
        Color::Yellow,
        Color::Green,
        Color::Cyan,
        Color::Blue,
        Color::Purple,
    ]),
    solid(Color::Blue),
    arcs(&[Color::Purple, Color::Off, Color::Purple, Color::Off]),
    ticks(solid(Color::Blue), Color::Yellow, HOUR),
    arcs(&[Color::Off, Color::Cyan]),
    ticks(solid(Color::Green), Color::Off, 2),
];

/// Index of the selected background.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Background(u8);

impl Background {
    /// Creates a selection, returning `None` if no such background exists.
    pub const fn new(index: u8) -> Option<Self> {
        if (index as usize) < NUM_BACKGROUNDS {
            Some(Self(index))
        } else {
            None
        }
    }

    /// Creates a selection, reducing `index` modulo the table size.
    pub const fn wrapping(index: u8) -> Self {
        Self(index % NUM_BACKGROUNDS as u8)
    }

    /// Raw index, as stored in settings.
    #[inline]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// The next background, wrapping after the last.
    #[inline]
    pub const fn next(self) -> Self {
        Self((self.0 + 1) % NUM_BACKGROUNDS as u8)
    }

    /// The full image for this background.
    #[inline]
    pub fn image(self) -> &'static BackgroundImage {
        &BACKGROUNDS[usize::from(self.0) % NUM_BACKGROUNDS]
    }

    /// The color at `sector`; `Off` for sectors outside the face.
    #[inline]
    pub fn color_at(self, sector: Sector) -> Color {
        self.image()
            .get(usize::from(sector))
            .copied()
            .unwrap_or(Color::Off)
    }
}

impl TryFrom<u8> for Background {
    type Error = ClockError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(ClockError::InvalidBackground(value))
    }
}
