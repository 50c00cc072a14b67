//! Shared test infrastructure for pov-clock integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use core::cell::RefCell;

use embedded_hal::delay::DelayNs;
use pov_clock::{
    Button, ButtonInputs, Color, ColorOutput, FrameState, RealTimeClock, RtcRegisters,
    SectorTimer, SettingsStore,
};

// ============================================================================
// Mock Sector Timer
// ============================================================================

/// A register-level operation on the sector timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerOp {
    DisableTick,
    ResetCounter,
    EnableTick,
    SetPeriod(u16),
}

/// Mock timer that records every operation in order
pub struct MockTimer {
    ops: heapless::Vec<TimerOp, 64>,
    tick_enabled: bool,
    period: Option<u16>,
}

impl MockTimer {
    pub fn new() -> Self {
        Self {
            ops: heapless::Vec::new(),
            tick_enabled: true,
            period: None,
        }
    }

    pub fn ops(&self) -> &[TimerOp] {
        &self.ops
    }

    pub fn period(&self) -> Option<u16> {
        self.period
    }

    pub fn tick_enabled(&self) -> bool {
        self.tick_enabled
    }
}

impl SectorTimer for MockTimer {
    fn disable_tick(&mut self) {
        self.tick_enabled = false;
        let _ = self.ops.push(TimerOp::DisableTick);
    }

    fn reset_counter(&mut self) {
        // Resetting with the tick unmasked is the race the edge handler must avoid
        assert!(!self.tick_enabled, "counter reset while tick enabled");
        let _ = self.ops.push(TimerOp::ResetCounter);
    }

    fn enable_tick(&mut self) {
        self.tick_enabled = true;
        let _ = self.ops.push(TimerOp::EnableTick);
    }

    fn set_period(&mut self, ticks: u16) {
        self.period = Some(ticks);
        let _ = self.ops.push(TimerOp::SetPeriod(ticks));
    }
}

// ============================================================================
// Mock Color Outputs
// ============================================================================

/// Mock output that records all color writes
pub struct MockOutput {
    current_color: Color,
    writes: usize,
    color_history: heapless::Vec<Color, 256>,
}

impl MockOutput {
    pub fn new() -> Self {
        Self {
            current_color: Color::Off,
            writes: 0,
            color_history: heapless::Vec::new(),
        }
    }

    pub fn last_color(&self) -> Color {
        self.current_color
    }

    pub fn writes(&self) -> usize {
        self.writes
    }

    pub fn color_history(&self) -> &[Color] {
        &self.color_history
    }
}

impl ColorOutput for MockOutput {
    fn set_color(&mut self, color: Color) {
        self.current_color = color;
        self.writes += 1;
        let _ = self.color_history.push(color);
    }
}

/// One write seen by a [`ProbeOutput`], with the suppression flag at that moment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbedWrite {
    pub color: Color,
    pub suppressed: bool,
}

pub type ProbeLog = RefCell<heapless::Vec<ProbedWrite, 64>>;

/// Output handle that logs each write together with the frame's
/// suppression flag; several handles can share one log
pub struct ProbeOutput<'a> {
    frame: &'a FrameState,
    log: &'a ProbeLog,
}

impl<'a> ProbeOutput<'a> {
    pub fn new(frame: &'a FrameState, log: &'a ProbeLog) -> Self {
        Self { frame, log }
    }
}

impl ColorOutput for ProbeOutput<'_> {
    fn set_color(&mut self, color: Color) {
        let _ = self.log.borrow_mut().push(ProbedWrite {
            color,
            suppressed: self.frame.is_suppressed(),
        });
    }
}

// ============================================================================
// Mock RTC
// ============================================================================

/// Mock RTC holding a register block and recording writes
pub struct MockRtc {
    registers: RtcRegisters,
    writes: heapless::Vec<RtcRegisters, 16>,
}

impl MockRtc {
    pub fn new(registers: RtcRegisters) -> Self {
        Self {
            registers,
            writes: heapless::Vec::new(),
        }
    }

    /// An RTC reading hh:mm:ss in 24-hour BCD, on 2018-08-12
    pub fn at(hours: u8, minutes: u8, seconds: u8) -> Self {
        Self::new(registers(hours, minutes, seconds))
    }

    pub fn set_registers(&mut self, registers: RtcRegisters) {
        self.registers = registers;
    }

    pub fn writes(&self) -> &[RtcRegisters] {
        &self.writes
    }
}

impl RealTimeClock for MockRtc {
    fn read(&mut self) -> RtcRegisters {
        self.registers
    }

    fn write(&mut self, registers: &RtcRegisters) {
        self.registers = *registers;
        let _ = self.writes.push(*registers);
    }
}

/// Register block for hh:mm:ss in 24-hour BCD, on 2018-08-12 (a Sunday,
/// day 1)
pub fn registers(hours: u8, minutes: u8, seconds: u8) -> RtcRegisters {
    RtcRegisters {
        seconds: pov_clock::bin_to_bcd(seconds),
        minutes: pov_clock::bin_to_bcd(minutes),
        hours: pov_clock::bin_to_bcd(hours),
        weekday: 1,
        date: 0x12,
        month: 0x08,
        year: 0x18,
    }
}

// ============================================================================
// Mock Settings Store
// ============================================================================

/// Mock non-volatile store; erased cells read 0xFF
pub struct MockStore {
    memory: [u8; 16],
    writes: heapless::Vec<(u8, u8), 32>,
}

impl MockStore {
    pub fn erased() -> Self {
        Self {
            memory: [0xFF; 16],
            writes: heapless::Vec::new(),
        }
    }

    pub fn with(contents: &[(u8, u8)]) -> Self {
        let mut store = Self::erased();
        for &(addr, value) in contents {
            store.memory[addr as usize] = value;
        }
        store
    }

    pub fn byte(&self, addr: u8) -> u8 {
        self.memory[addr as usize]
    }

    pub fn writes(&self) -> &[(u8, u8)] {
        &self.writes
    }
}

impl SettingsStore for MockStore {
    fn read_byte(&mut self, addr: u8) -> u8 {
        self.memory[addr as usize]
    }

    fn write_byte(&mut self, addr: u8, value: u8) {
        self.memory[addr as usize] = value;
        let _ = self.writes.push((addr, value));
    }
}

// ============================================================================
// Scripted Buttons
// ============================================================================

/// Button levels set directly by the test
pub struct ScriptedButtons {
    pressed: [bool; 3],
}

impl ScriptedButtons {
    pub fn new() -> Self {
        Self { pressed: [false; 3] }
    }

    pub fn set(&mut self, button: Button, pressed: bool) {
        self.pressed[button.index()] = pressed;
    }
}

impl ButtonInputs for ScriptedButtons {
    fn is_pressed(&mut self, button: Button) -> bool {
        self.pressed[button.index()]
    }
}

// ============================================================================
// Mock Delay
// ============================================================================

/// Delay that returns immediately and accumulates the requested time
pub struct MockDelay {
    total_ns: u64,
}

impl MockDelay {
    pub fn new() -> Self {
        Self { total_ns: 0 }
    }

    pub fn total_ms(&self) -> u64 {
        self.total_ns / 1_000_000
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += u64::from(ns);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.total_ns += u64::from(ms) * 1_000_000;
    }
}

// ============================================================================
// Mock PWM and Pins
// ============================================================================

/// PWM write failure
#[derive(Debug)]
pub struct PwmFault;

impl embedded_hal::pwm::Error for PwmFault {
    fn kind(&self) -> embedded_hal::pwm::ErrorKind {
        embedded_hal::pwm::ErrorKind::Other
    }
}

/// Mock PWM channel with a 16-bit duty range
pub struct MockPwm {
    max_duty: u16,
    duty: u16,
    failing: bool,
    attempts: usize,
}

impl MockPwm {
    pub fn new(max_duty: u16) -> Self {
        Self {
            max_duty,
            duty: 0,
            failing: false,
            attempts: 0,
        }
    }

    /// A channel whose every write fails
    pub fn failing(max_duty: u16) -> Self {
        Self {
            failing: true,
            ..Self::new(max_duty)
        }
    }

    pub fn duty(&self) -> u16 {
        self.duty
    }

    pub fn attempts(&self) -> usize {
        self.attempts
    }
}

impl embedded_hal::pwm::ErrorType for MockPwm {
    type Error = PwmFault;
}

impl embedded_hal::pwm::SetDutyCycle for MockPwm {
    fn max_duty_cycle(&self) -> u16 {
        self.max_duty
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
        self.attempts += 1;
        if self.failing {
            return Err(PwmFault);
        }
        self.duty = duty;
        Ok(())
    }
}

/// Pin read failure
#[derive(Debug)]
pub struct PinFault;

impl embedded_hal::digital::Error for PinFault {
    fn kind(&self) -> embedded_hal::digital::ErrorKind {
        embedded_hal::digital::ErrorKind::Other
    }
}

/// Mock input pin
pub struct MockPin {
    low: bool,
    faulty: bool,
}

impl MockPin {
    pub fn high() -> Self {
        Self { low: false, faulty: false }
    }

    pub fn low() -> Self {
        Self { low: true, faulty: false }
    }

    pub fn faulty() -> Self {
        Self { low: true, faulty: true }
    }
}

impl embedded_hal::digital::ErrorType for MockPin {
    type Error = PinFault;
}

impl embedded_hal::digital::InputPin for MockPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        if self.faulty {
            return Err(PinFault);
        }
        Ok(!self.low)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        if self.faulty {
            return Err(PinFault);
        }
        Ok(self.low)
    }
}
