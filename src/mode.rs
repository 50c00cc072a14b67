//! Display modes and the button action table.

use crate::buttons::{Button, NUM_BUTTONS};

/// Number of modes.
pub const NUM_MODES: usize = 5;

/// What the buttons currently edit. The mode button steps through these in
/// declaration order and wraps back to `Normal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    #[default]
    Normal,
    BackgroundEdit,
    HourEdit,
    MinuteEdit,
    SecondEdit,
}

/// A configuration change bound to a button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Action {
    NoOp,
    NextMode,
    CycleBackground,
    IncrementHour,
    IncrementMinute,
    CycleHourColor,
    CycleMinuteColor,
    CycleSecondColor,
}

use Action::{
    CycleBackground, CycleHourColor, CycleMinuteColor, CycleSecondColor, IncrementHour,
    IncrementMinute, NextMode, NoOp,
};

/// Button bindings, indexed by `[mode][button]`.
const ACTIONS: [[Action; NUM_BUTTONS]; NUM_MODES] = [
    // Normal
    [NextMode, NoOp, NoOp],
    // BackgroundEdit
    [NextMode, NoOp, CycleBackground],
    // HourEdit
    [NextMode, IncrementHour, CycleHourColor],
    // MinuteEdit
    [NextMode, IncrementMinute, CycleMinuteColor],
    // SecondEdit
    [NextMode, NoOp, CycleSecondColor],
];

impl Mode {
    /// All modes, in cycle order.
    pub const ALL: [Mode; NUM_MODES] = [
        Mode::Normal,
        Mode::BackgroundEdit,
        Mode::HourEdit,
        Mode::MinuteEdit,
        Mode::SecondEdit,
    ];

    /// Position in [`Mode::ALL`].
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Mode::Normal => 0,
            Mode::BackgroundEdit => 1,
            Mode::HourEdit => 2,
            Mode::MinuteEdit => 3,
            Mode::SecondEdit => 4,
        }
    }

    /// The mode after this one.
    pub const fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % NUM_MODES]
    }

    /// The action `button` triggers in this mode.
    #[inline]
    pub const fn action(self, button: Button) -> Action {
        ACTIONS[self.index()][button.index()]
    }
}
