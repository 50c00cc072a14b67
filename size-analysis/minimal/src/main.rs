#![no_std]
#![no_main]

use cortex_m_rt::entry;
use panic_halt as _;
use pov_clock::{
    Button, ButtonInputs, Clock, ClockConfig, Color, ColorOutput, FrameState, GovernorConfig,
    RealTimeClock, RtcRegisters, SectorTimer, SettingsStore, Tracker,
};

// ============================================================================
// Minimal Collaborators
// ============================================================================

/// Zero-size sector timer for measuring library overhead
pub struct MinimalTimer;

impl SectorTimer for MinimalTimer {
    fn disable_tick(&mut self) {
        core::hint::black_box(());
    }

    fn reset_counter(&mut self) {
        core::hint::black_box(());
    }

    fn enable_tick(&mut self) {
        core::hint::black_box(());
    }

    fn set_period(&mut self, ticks: u16) {
        core::hint::black_box(ticks);
    }
}

/// Zero-size color lines
pub struct MinimalOutput;

impl ColorOutput for MinimalOutput {
    fn set_color(&mut self, color: Color) {
        core::hint::black_box(color);
    }
}

pub struct MinimalRtc;

impl RealTimeClock for MinimalRtc {
    fn read(&mut self) -> RtcRegisters {
        core::hint::black_box(RtcRegisters::from_bytes([0, 0x30, 0x12, 0, 0x01, 0x01, 0]))
    }

    fn write(&mut self, registers: &RtcRegisters) {
        core::hint::black_box(registers);
    }
}

pub struct MinimalStore;

impl SettingsStore for MinimalStore {
    fn read_byte(&mut self, addr: u8) -> u8 {
        core::hint::black_box(addr)
    }

    fn write_byte(&mut self, addr: u8, value: u8) {
        core::hint::black_box((addr, value));
    }
}

pub struct MinimalButtons;

impl ButtonInputs for MinimalButtons {
    fn is_pressed(&mut self, button: Button) -> bool {
        core::hint::black_box(button) == Button::Mode
    }
}

pub struct MinimalDelay;

impl embedded_hal::delay::DelayNs for MinimalDelay {
    fn delay_ns(&mut self, ns: u32) {
        core::hint::black_box(ns);
    }
}

static FRAME: FrameState = FrameState::new();

// This function uses the library to prevent optimizer from removing code
#[inline(never)]
fn exercise_clock() {
    let mut tracker = Tracker::new(MinimalTimer, MinimalOutput, &FRAME, GovernorConfig::DEFAULT);
    let mut clock = Clock::new(
        &FRAME,
        MinimalRtc,
        MinimalStore,
        MinimalButtons,
        MinimalOutput,
        MinimalDelay,
        ClockConfig::DEFAULT,
    );

    let _ = tracker.on_revolution_edge();
    for _ in 0..180 {
        tracker.on_periodic_tick();
    }
    clock.service();
    clock.service();

    core::hint::black_box(tracker);
    core::hint::black_box(clock);
}

#[entry]
fn main() -> ! {
    exercise_clock();

    // Halt - this is a size analysis binary, not meant to run
    loop {
        cortex_m::asm::nop();
    }
}
