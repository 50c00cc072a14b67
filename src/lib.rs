#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`Tracker`**: Sector counter and speed governor, driven by the sector-tick and revolution-edge interrupts
//! - **`FrameState`**: Display state shared between the main loop and the sector interrupt
//! - **`render`**: Picks the color for one sector (background, then hands)
//! - **`Hand` / `Hands`**: Hour, minute and second values, colors and sector positions
//! - **`Background`**: Selection from the static per-sector background table
//! - **`Clock`**: Main-loop context: time sync, button handling, mode changes
//! - **`Mode` / `Action`**: Button bindings per mode
//! - **`SectorTimer`**, **`ColorOutput`**, **`RealTimeClock`**, **`SettingsStore`**,
//!   **`ButtonInputs`**, **`MotorDriver`**: Traits to implement for your hardware
//!
//! Colors are 3-bit masks over the red, blue and green enable lines. They
//! convert to `palette::Srgb` for full-color back ends and simulators.

// Re-export Srgb from palette for user convenience
pub use palette::Srgb;

#[macro_use]
mod fmt;

pub mod background;
pub mod buttons;
pub mod clock;
pub mod colors;
pub mod frame;
pub mod hand;
pub mod mode;
pub mod motor;
pub mod rtc;
pub mod settings;
pub mod tracker;
pub mod types;

pub use background::{BACKGROUNDS, Background, NUM_BACKGROUNDS};
pub use buttons::{ActiveLowButtons, Button, ButtonInputs, Debouncer};
pub use clock::{Clock, ClockConfig};
pub use colors::{Color, ColorIndex, NUM_COLORS, PALETTE};
pub use frame::{FrameState, render};
pub use hand::{Hand, HandKind, Hands};
pub use mode::{Action, Mode};
pub use motor::{EscConfig, MotorDriver, PwmEsc, arm_esc};
pub use rtc::{RealTimeClock, RtcRegisters, WallClock, bcd_to_bin, bin_to_bcd};
pub use settings::{Settings, SettingsStore};
pub use tracker::{
    ColorOutput, Correction, EdgeOutcome, GovernorConfig, SectorTimer, Tracker, correct_period,
};
pub use types::{ClockError, RESOLUTION, Sector};
