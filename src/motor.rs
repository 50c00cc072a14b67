//! Rotor motor (ESC) control.
//!
//! The rotor is spun by a hobby electronic speed controller driven by a
//! fixed-frequency servo-style pulse. The core only touches it at startup:
//! the ESC is armed with a low pulse, held there while the LEDs run a color
//! self test, then switched to the fixed run pulse. The tracker's governor
//! follows whatever speed results; it never changes the pulse.

use embedded_hal::delay::DelayNs;
use embedded_hal::pwm::SetDutyCycle;

use crate::colors::{Color, PALETTE};
use crate::tracker::ColorOutput;

/// Sets the ESC control pulse width.
pub trait MotorDriver {
    /// Sets the high time of each control pulse, in microseconds.
    fn set_pulse_width_us(&mut self, width_us: u16);
}

/// Startup pulse widths and self-test pacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EscConfig {
    /// Pulse that arms the ESC without spinning the motor.
    pub arm_pulse_us: u16,
    /// Pulse held for the rest of the run.
    pub run_pulse_us: u16,
    /// How long each self-test color is shown, in milliseconds.
    pub self_test_step_ms: u32,
}

impl EscConfig {
    /// 500 µs arm pulse, 1200 µs run pulse, one second per test color.
    pub const DEFAULT: Self = Self {
        arm_pulse_us: 500,
        run_pulse_us: 1200,
        self_test_step_ms: 1000,
    };
}

impl Default for EscConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Arms the ESC and brings the rotor up to its run speed.
///
/// Blocks for the length of the self test. Run this before the sector
/// interrupts are enabled: it drives `output` directly.
pub fn arm_esc<M, O, D>(motor: &mut M, output: &mut O, delay: &mut D, config: &EscConfig)
where
    M: MotorDriver,
    O: ColorOutput,
    D: DelayNs,
{
    info!("arming ESC at {=u16} us", config.arm_pulse_us);
    motor.set_pulse_width_us(config.arm_pulse_us);

    for color in PALETTE.iter().copied().filter(|color| *color != Color::Off) {
        output.set_color(color);
        delay.delay_ms(config.self_test_step_ms);
    }
    output.set_color(Color::Off);

    info!("ESC run pulse {=u16} us", config.run_pulse_us);
    motor.set_pulse_width_us(config.run_pulse_us);
}

/// [`MotorDriver`] over any PWM channel.
///
/// The channel must already run at the ESC frame rate; `frame_us` is its
/// period. Pulse widths longer than the frame saturate at 100% duty.
pub struct PwmEsc<P> {
    pwm: P,
    frame_us: u16,
}

impl<P: SetDutyCycle> PwmEsc<P> {
    /// Wraps a PWM channel whose period is `frame_us` microseconds.
    pub fn new(pwm: P, frame_us: u16) -> Self {
        Self { pwm, frame_us }
    }

    /// Returns the PWM channel.
    pub fn release(self) -> P {
        self.pwm
    }
}

impl<P: SetDutyCycle> MotorDriver for PwmEsc<P> {
    fn set_pulse_width_us(&mut self, width_us: u16) {
        if self.frame_us == 0 {
            return;
        }
        let width_us = width_us.min(self.frame_us);
        // The ESC holds its last pulse on a failed write.
        if self.pwm.set_duty_cycle_fraction(width_us, self.frame_us).is_err() {
            warn!("ESC pulse of {=u16} us not applied", width_us);
        }
    }
}
