//! User preferences kept in byte-addressed non-volatile storage.

use crate::background::Background;
use crate::colors::ColorIndex;
use crate::hand::HandKind;

/// Address of the background index.
pub const BACKGROUND_ADDR: u8 = 0x00;
/// Address of the hour hand color.
pub const HOUR_COLOR_ADDR: u8 = 0x01;
/// Address of the minute hand color.
pub const MINUTE_COLOR_ADDR: u8 = 0x02;
/// Address of the second hand color.
pub const SECOND_COLOR_ADDR: u8 = 0x03;

/// Byte-addressed non-volatile store (EEPROM or emulated flash).
pub trait SettingsStore {
    /// Reads the byte at `addr`.
    fn read_byte(&mut self, addr: u8) -> u8;

    /// Writes `value` at `addr`.
    fn write_byte(&mut self, addr: u8, value: u8);
}

/// Settings address for a hand's color.
pub const fn color_addr(kind: HandKind) -> u8 {
    match kind {
        HandKind::Hour => HOUR_COLOR_ADDR,
        HandKind::Minute => MINUTE_COLOR_ADDR,
        HandKind::Second => SECOND_COLOR_ADDR,
    }
}

/// Persisted display preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Settings {
    pub background: Background,
    pub hour_color: ColorIndex,
    pub minute_color: ColorIndex,
    pub second_color: ColorIndex,
}

impl Settings {
    /// Thirds background; red, blue and white hands.
    pub const DEFAULT: Self = Self {
        background: Background::wrapping(0),
        hour_color: ColorIndex::wrapping(0),
        minute_color: ColorIndex::wrapping(2),
        second_color: ColorIndex::wrapping(6),
    };

    /// Loads every field from `store`.
    ///
    /// A byte outside its valid range (an erased cell reads 0xFF) falls
    /// back to that field's default.
    pub fn load<S: SettingsStore>(store: &mut S) -> Self {
        let raw = store.read_byte(BACKGROUND_ADDR);
        let background = Background::new(raw).unwrap_or_else(|| {
            warn!("stored background {=u8} invalid, using default", raw);
            Self::DEFAULT.background
        });

        Self {
            background,
            hour_color: load_color(store, HandKind::Hour, Self::DEFAULT.hour_color),
            minute_color: load_color(store, HandKind::Minute, Self::DEFAULT.minute_color),
            second_color: load_color(store, HandKind::Second, Self::DEFAULT.second_color),
        }
    }

    /// Color for `kind`.
    pub const fn color(&self, kind: HandKind) -> ColorIndex {
        match kind {
            HandKind::Hour => self.hour_color,
            HandKind::Minute => self.minute_color,
            HandKind::Second => self.second_color,
        }
    }

    /// Persists the background index.
    pub fn save_background<S: SettingsStore>(store: &mut S, background: Background) {
        store.write_byte(BACKGROUND_ADDR, background.get());
    }

    /// Persists a hand color.
    pub fn save_color<S: SettingsStore>(store: &mut S, kind: HandKind, color: ColorIndex) {
        store.write_byte(color_addr(kind), color.get());
    }

    /// Persists every field.
    pub fn save<S: SettingsStore>(&self, store: &mut S) {
        Self::save_background(store, self.background);
        for kind in HandKind::ALL {
            Self::save_color(store, kind, self.color(kind));
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::DEFAULT
    }
}

fn load_color<S: SettingsStore>(store: &mut S, kind: HandKind, fallback: ColorIndex) -> ColorIndex {
    let raw = store.read_byte(color_addr(kind));
    ColorIndex::new(raw).unwrap_or_else(|| {
        warn!("stored {} color {=u8} invalid, using default", kind, raw);
        fallback
    })
}
