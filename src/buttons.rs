//! Button inputs and debouncing.

use embedded_hal::digital::InputPin;

/// Number of front-panel buttons.
pub const NUM_BUTTONS: usize = 3;

/// A front-panel button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    /// Button 1: cycles the mode.
    Mode,
    /// Button 2: adjusts the value being edited.
    Adjust,
    /// Button 3: cycles the color or background being edited.
    Select,
}

impl Button {
    /// All buttons, in polling order.
    pub const ALL: [Button; NUM_BUTTONS] = [Button::Mode, Button::Adjust, Button::Select];

    /// Position in [`Button::ALL`].
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Button::Mode => 0,
            Button::Adjust => 1,
            Button::Select => 2,
        }
    }
}

/// Reads the button levels.
pub trait ButtonInputs {
    /// True while `button` is held down.
    fn is_pressed(&mut self, button: Button) -> bool;
}

/// Press-then-release detector sampled at the main-loop poll rate.
///
/// A click registers on the first poll that reads released after at least
/// one poll that read pressed. Contact bounce shorter than a poll interval
/// is never seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Debouncer {
    held: bool,
}

impl Debouncer {
    /// Creates a debouncer in the released state.
    pub const fn new() -> Self {
        Self { held: false }
    }

    /// Feeds one sample. Returns `true` when a full click completes.
    pub fn update(&mut self, pressed: bool) -> bool {
        if pressed {
            self.held = true;
            false
        } else if self.held {
            self.held = false;
            true
        } else {
            false
        }
    }

    /// True if the last sample read pressed.
    #[inline]
    pub fn is_held(&self) -> bool {
        self.held
    }
}

/// Three active-low buttons with pull-ups.
///
/// A pin that fails to read is treated as released.
pub struct ActiveLowButtons<M, A, S> {
    mode: M,
    adjust: A,
    select: S,
}

impl<M: InputPin, A: InputPin, S: InputPin> ActiveLowButtons<M, A, S> {
    /// Wraps the three button pins.
    pub fn new(mode: M, adjust: A, select: S) -> Self {
        Self {
            mode,
            adjust,
            select,
        }
    }

    /// Returns the pins.
    pub fn release(self) -> (M, A, S) {
        (self.mode, self.adjust, self.select)
    }
}

impl<M: InputPin, A: InputPin, S: InputPin> ButtonInputs for ActiveLowButtons<M, A, S> {
    fn is_pressed(&mut self, button: Button) -> bool {
        match button {
            Button::Mode => self.mode.is_low().unwrap_or(false),
            Button::Adjust => self.adjust.is_low().unwrap_or(false),
            Button::Select => self.select.is_low().unwrap_or(false),
        }
    }
}
