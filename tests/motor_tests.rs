//! Integration tests for ESC arming and the PWM motor driver

mod common;
use common::*;

use pov_clock::{Color, EscConfig, MotorDriver, PwmEsc, arm_esc};

/// Motor that records every pulse width
struct RecordingMotor {
    pulses: heapless::Vec<u16, 8>,
}

impl RecordingMotor {
    fn new() -> Self {
        Self {
            pulses: heapless::Vec::new(),
        }
    }
}

impl MotorDriver for RecordingMotor {
    fn set_pulse_width_us(&mut self, width_us: u16) {
        let _ = self.pulses.push(width_us);
    }
}

#[test]
fn arm_sequence_runs_self_test_between_pulses() {
    let mut motor = RecordingMotor::new();
    let mut output = MockOutput::new();
    let mut delay = MockDelay::new();

    arm_esc(&mut motor, &mut output, &mut delay, &EscConfig::DEFAULT);

    assert_eq!(motor.pulses.as_slice(), &[500, 1200]);
    assert_eq!(
        output.color_history(),
        &[
            Color::Red,
            Color::Purple,
            Color::Blue,
            Color::Cyan,
            Color::Green,
            Color::Yellow,
            Color::White,
            Color::Off,
        ]
    );
    assert_eq!(delay.total_ms(), 7000);
}

#[test]
fn arm_sequence_uses_config() {
    let mut motor = RecordingMotor::new();
    let mut output = MockOutput::new();
    let mut delay = MockDelay::new();
    let config = EscConfig {
        arm_pulse_us: 1000,
        run_pulse_us: 1500,
        self_test_step_ms: 10,
    };

    arm_esc(&mut motor, &mut output, &mut delay, &config);

    assert_eq!(motor.pulses.as_slice(), &[1000, 1500]);
    assert_eq!(delay.total_ms(), 70);
    assert_eq!(output.last_color(), Color::Off);
}

#[test]
fn pwm_esc_scales_pulse_to_duty() {
    let mut esc = PwmEsc::new(MockPwm::new(1000), 20_000);

    esc.set_pulse_width_us(1200);
    let pwm = esc.release();
    assert_eq!(pwm.duty(), 60);

    let mut esc = PwmEsc::new(pwm, 20_000);
    esc.set_pulse_width_us(500);
    assert_eq!(esc.release().duty(), 25);
}

#[test]
fn pwm_esc_saturates_at_full_frame() {
    let mut esc = PwmEsc::new(MockPwm::new(1000), 2_000);

    esc.set_pulse_width_us(5_000);
    assert_eq!(esc.release().duty(), 1000);
}

#[test]
fn pwm_esc_with_zero_frame_writes_nothing() {
    let mut esc = PwmEsc::new(MockPwm::new(1000), 0);

    esc.set_pulse_width_us(1200);
    assert_eq!(esc.release().duty(), 0);
}

#[test]
fn pwm_esc_survives_a_failed_write() {
    let mut esc = PwmEsc::new(MockPwm::failing(1000), 20_000);

    esc.set_pulse_width_us(500);
    esc.set_pulse_width_us(1200);

    let pwm = esc.release();
    assert_eq!(pwm.attempts(), 2);
    assert_eq!(pwm.duty(), 0);
}
