//! Clock hands and their angular positions.
//!
//! A hand is drawn as a two-sector wedge so it stays visible at typical
//! rotor speeds. `pos2` is the sector the hand points at and `pos1` the one
//! just before it:
//!
//! ```text
//! pos2 = floor(fraction * RESOLUTION) mod RESOLUTION
//! pos1 = pos2 - 1, wrapping to RESOLUTION - 1 when pos2 == 0
//! ```
//!
//! Fractions are exact rationals, so the floor is computed in integers and
//! never suffers from float rounding.

use crate::colors::ColorIndex;
use crate::types::{ClockError, RESOLUTION, Sector};

/// Which time component a hand shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HandKind {
    Hour,
    Minute,
    Second,
}

impl HandKind {
    /// All hands, in overlay order (each later hand draws over the earlier).
    pub const ALL: [HandKind; 3] = [HandKind::Hour, HandKind::Minute, HandKind::Second];

    /// Smallest value the hand shows.
    #[inline]
    pub const fn min(self) -> u8 {
        match self {
            HandKind::Hour => 1,
            HandKind::Minute | HandKind::Second => 0,
        }
    }

    /// Largest value the hand shows.
    #[inline]
    pub const fn max(self) -> u8 {
        match self {
            HandKind::Hour => 12,
            HandKind::Minute | HandKind::Second => 59,
        }
    }

    /// Position of this hand in [`HandKind::ALL`].
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            HandKind::Hour => 0,
            HandKind::Minute => 1,
            HandKind::Second => 2,
        }
    }

    /// True if `value` lies in `min()..=max()`.
    #[inline]
    pub const fn contains(self, value: u8) -> bool {
        value >= self.min() && value <= self.max()
    }
}

/// Returns `(pos1, pos2)` for a hand pointing at `numerator / denominator`
/// of a revolution.
///
/// Whole revolutions in `numerator` are dropped first. A zero denominator
/// points the hand at sector 0.
pub const fn wedge(numerator: u32, denominator: u32) -> (Sector, Sector) {
    let resolution = RESOLUTION as u64;
    let pos2 = match numerator.checked_rem(denominator) {
        Some(fraction) => fraction as u64 * resolution / denominator as u64,
        None => 0,
    };
    let pos1 = (pos2 + resolution - 1) % resolution;
    (pos1 as Sector, pos2 as Sector)
}

/// One clock hand: its value, its color and the two sectors it covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Hand {
    kind: HandKind,
    value: u8,
    color: ColorIndex,
    pos1: Sector,
    pos2: Sector,
}

impl Hand {
    /// Creates a hand at its minimum value with positions already computed.
    pub const fn new(kind: HandKind, color: ColorIndex) -> Self {
        let mut hand = Self {
            kind,
            value: kind.min(),
            color,
            pos1: 0,
            pos2: 0,
        };
        let (numerator, denominator) = match kind {
            HandKind::Hour => ((kind.min() as u32 % 12) * 60, 720),
            HandKind::Minute | HandKind::Second => (kind.min() as u32, 60),
        };
        let (pos1, pos2) = wedge(numerator, denominator);
        hand.pos1 = pos1;
        hand.pos2 = pos2;
        hand
    }

    /// Which component this hand shows.
    #[inline]
    pub const fn kind(&self) -> HandKind {
        self.kind
    }

    /// Current wall-clock value.
    #[inline]
    pub const fn value(&self) -> u8 {
        self.value
    }

    /// Current palette index.
    #[inline]
    pub const fn color(&self) -> ColorIndex {
        self.color
    }

    /// Sector just behind the hand.
    #[inline]
    pub const fn pos1(&self) -> Sector {
        self.pos1
    }

    /// Sector the hand points at.
    #[inline]
    pub const fn pos2(&self) -> Sector {
        self.pos2
    }

    /// True if the hand's wedge covers `sector`.
    #[inline]
    pub const fn covers(&self, sector: Sector) -> bool {
        sector == self.pos1 || sector == self.pos2
    }

    /// Sets the wall-clock value. Positions are not touched until the next
    /// angle recomputation.
    ///
    /// # Errors
    /// `InvalidTime` if `value` is outside the hand's domain.
    pub fn set_value(&mut self, value: u8) -> Result<(), ClockError> {
        if !self.kind.contains(value) {
            return Err(ClockError::InvalidTime);
        }
        self.value = value;
        Ok(())
    }

    /// Puts the value back to `min()`.
    #[inline]
    pub fn reset_value(&mut self) {
        self.value = self.kind.min();
    }

    /// Sets the palette index.
    #[inline]
    pub fn set_color(&mut self, color: ColorIndex) {
        self.color = color;
    }

    /// Points the hand at `numerator / denominator` of a revolution.
    pub fn recompute_angle(&mut self, numerator: u32, denominator: u32) {
        let (pos1, pos2) = wedge(numerator, denominator);
        self.pos1 = pos1;
        self.pos2 = pos2;
    }

    /// Advances the value by one, wrapping from `max()` back to `min()`.
    ///
    /// Hours run 12 → 1, minutes and seconds 59 → 0.
    pub fn increment_value(&mut self) {
        self.value = if self.value >= self.kind.max() {
            self.kind.min()
        } else {
            self.value + 1
        };
    }

    /// Steps to the next palette color and returns it.
    pub fn cycle_color(&mut self) -> ColorIndex {
        self.color = self.color.next();
        self.color
    }
}

/// The hour, minute and second hands together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Hands {
    hands: [Hand; 3],
}

impl Hands {
    /// Creates the three hands at their minimum values.
    pub const fn new(hour: ColorIndex, minute: ColorIndex, second: ColorIndex) -> Self {
        Self {
            hands: [
                Hand::new(HandKind::Hour, hour),
                Hand::new(HandKind::Minute, minute),
                Hand::new(HandKind::Second, second),
            ],
        }
    }

    /// The hand for `kind`.
    #[inline]
    pub fn get(&self, kind: HandKind) -> &Hand {
        &self.hands[kind.index()]
    }

    /// Mutable access to the hand for `kind`.
    #[inline]
    pub fn get_mut(&mut self, kind: HandKind) -> &mut Hand {
        &mut self.hands[kind.index()]
    }

    /// Iterates hour, minute, second.
    pub fn iter(&self) -> impl Iterator<Item = &Hand> {
        self.hands.iter()
    }

    /// Sets all three values at once.
    ///
    /// # Errors
    /// `InvalidTime` if any value is outside its domain; no hand is changed
    /// in that case.
    pub fn set_time(&mut self, hours: u8, minutes: u8, seconds: u8) -> Result<(), ClockError> {
        if !HandKind::Hour.contains(hours)
            || !HandKind::Minute.contains(minutes)
            || !HandKind::Second.contains(seconds)
        {
            return Err(ClockError::InvalidTime);
        }
        self.hands[HandKind::Hour.index()].value = hours;
        self.hands[HandKind::Minute.index()].value = minutes;
        self.hands[HandKind::Second.index()].value = seconds;
        Ok(())
    }

    /// Recomputes every hand's sectors from the current values.
    ///
    /// The hour hand advances smoothly with the minutes:
    /// `((hour mod 12) + minute / 60) / 12` of a revolution.
    pub fn recompute_angles(&mut self) {
        let hour = u32::from(self.get(HandKind::Hour).value) % 12;
        let minute = u32::from(self.get(HandKind::Minute).value);
        let second = u32::from(self.get(HandKind::Second).value);

        self.get_mut(HandKind::Hour).recompute_angle(hour * 60 + minute, 720);
        self.get_mut(HandKind::Minute).recompute_angle(minute, 60);
        self.get_mut(HandKind::Second).recompute_angle(second, 60);
    }
}

impl Default for Hands {
    fn default() -> Self {
        Self::new(ColorIndex::default(), ColorIndex::default(), ColorIndex::default())
    }
}
