//! The cooperative main loop.
//!
//! [`Clock`] owns everything that runs outside interrupt context: the
//! hands, the selected background, the current mode and the RTC, settings,
//! button and delay collaborators. Each control cycle it pulls the time
//! from the RTC, points the hands, and services the buttons. Whatever the
//! sector interrupt needs is published to the shared [`FrameState`].

use embedded_hal::delay::DelayNs;

use crate::background::Background;
use crate::buttons::{Button, ButtonInputs, Debouncer, NUM_BUTTONS};
use crate::colors::{Color, ColorIndex};
use crate::frame::FrameState;
use crate::hand::{HandKind, Hands};
use crate::mode::{Action, Mode};
use crate::rtc::{RealTimeClock, WallClock};
use crate::settings::{Settings, SettingsStore};
use crate::tracker::ColorOutput;
use crate::types::ClockError;

/// Main-loop pacing and mode-change feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockConfig {
    /// White flashes shown on a mode change.
    pub blink_count: u8,
    /// On time and off time of each flash, in milliseconds.
    pub blink_half_period_ms: u32,
    /// Pause between control cycles in [`Clock::run`], in milliseconds.
    pub poll_interval_ms: u32,
}

impl ClockConfig {
    /// Two 150 ms flashes, 20 ms control cycle.
    pub const DEFAULT: Self = Self {
        blink_count: 2,
        blink_half_period_ms: 150,
        poll_interval_ms: 20,
    };
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Main-loop context.
///
/// # Type Parameters
/// * `R` - RTC driver
/// * `S` - settings store
/// * `B` - button inputs
/// * `O` - color output handle, used only while rendering is suppressed
/// * `D` - blocking delay
pub struct Clock<'a, R, S, B, O, D>
where
    R: RealTimeClock,
    S: SettingsStore,
    B: ButtonInputs,
    O: ColorOutput,
    D: DelayNs,
{
    frame: &'a FrameState,
    rtc: R,
    store: S,
    buttons: B,
    output: O,
    delay: D,
    config: ClockConfig,
    hands: Hands,
    background: Background,
    mode: Mode,
    debouncers: [Debouncer; NUM_BUTTONS],
    now: WallClock,
}

impl<'a, R, S, B, O, D> Clock<'a, R, S, B, O, D>
where
    R: RealTimeClock,
    S: SettingsStore,
    B: ButtonInputs,
    O: ColorOutput,
    D: DelayNs,
{
    /// Loads settings, reads the time and publishes the first frame.
    pub fn new(
        frame: &'a FrameState,
        rtc: R,
        mut store: S,
        buttons: B,
        output: O,
        delay: D,
        config: ClockConfig,
    ) -> Self {
        let settings = Settings::load(&mut store);
        frame.set_background(settings.background);

        let mut clock = Self {
            frame,
            rtc,
            store,
            buttons,
            output,
            delay,
            config,
            hands: Hands::new(
                settings.hour_color,
                settings.minute_color,
                settings.second_color,
            ),
            background: settings.background,
            mode: Mode::Normal,
            debouncers: [Debouncer::new(); NUM_BUTTONS],
            now: WallClock::MIDNIGHT,
        };

        clock.hands.recompute_angles();
        clock.frame.publish_hands(&clock.hands);
        clock.sync_time();
        clock
    }

    /// Pulls the time from the RTC and repoints the hands.
    ///
    /// Only the hour, minute and second are checked. A snapshot with any of
    /// them out of range is dropped and the hands keep their previous
    /// position. Calendar fields are carried along untouched.
    pub fn sync_time(&mut self) {
        let now = WallClock::from_registers(&self.rtc.read());
        if now.validate_time().is_err() {
            warn!("RTC returned an invalid time, keeping previous");
            return;
        }
        self.now = now;
        self.show(now);
    }

    /// Writes `time` to the RTC and shows it.
    ///
    /// # Errors
    /// `InvalidTime` if any field is out of range; nothing is written.
    pub fn set_time(&mut self, time: WallClock) -> Result<(), ClockError> {
        time.validate()?;
        info!("setting time {=u8}:{=u8}:{=u8}", time.hours, time.minutes, time.seconds);
        self.rtc.write(&time.to_registers());
        self.now = time;
        self.show(time);
        Ok(())
    }

    /// Points the hands at `time` and publishes them.
    fn show(&mut self, time: WallClock) {
        if self.hands.set_time(time.hours, time.minutes, time.seconds).is_ok() {
            self.hands.recompute_angles();
            self.frame.publish_hands(&self.hands);
        }
    }

    /// Samples every button once and runs the action of each completed
    /// click.
    pub fn poll_buttons(&mut self) {
        for button in Button::ALL {
            let pressed = self.buttons.is_pressed(button);
            if self.debouncers[button.index()].update(pressed) {
                self.on_click(button);
            }
        }
    }

    /// Runs the action bound to `button` in the current mode.
    pub fn on_click(&mut self, button: Button) {
        let action = self.mode.action(button);
        debug!("{} click in {}: {}", button, self.mode, action);
        self.dispatch(action);
    }

    /// Runs one action.
    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::NoOp => {}
            Action::NextMode => self.advance_mode(),
            Action::CycleBackground => self.cycle_background(),
            Action::IncrementHour => self.increment(HandKind::Hour),
            Action::IncrementMinute => self.increment(HandKind::Minute),
            Action::CycleHourColor => self.cycle_color(HandKind::Hour),
            Action::CycleMinuteColor => self.cycle_color(HandKind::Minute),
            Action::CycleSecondColor => self.cycle_color(HandKind::Second),
        }
    }

    /// Flashes white and moves to the next mode.
    ///
    /// Rendering is suppressed for the whole flash sequence so the sector
    /// interrupt and the flashes don't overwrite each other. The sector
    /// interrupt keeps tracking rotation meanwhile.
    pub fn advance_mode(&mut self) {
        self.frame.set_suppressed(true);

        for _ in 0..self.config.blink_count {
            self.output.set_color(Color::White);
            self.delay.delay_ms(self.config.blink_half_period_ms);
            self.output.set_color(Color::Off);
            self.delay.delay_ms(self.config.blink_half_period_ms);
        }
        self.mode = self.mode.next();

        self.frame.set_suppressed(false);
        info!("mode {}", self.mode);
    }

    fn cycle_background(&mut self) {
        self.background = self.background.next();
        self.frame.set_background(self.background);
        Settings::save_background(&mut self.store, self.background);
    }

    /// Bumps the hour or minute, restarts the seconds and writes the new
    /// time to the RTC.
    fn increment(&mut self, kind: HandKind) {
        self.hands.get_mut(kind).increment_value();
        self.hands.get_mut(HandKind::Second).reset_value();

        self.now.hours = self.hands.get(HandKind::Hour).value();
        self.now.minutes = self.hands.get(HandKind::Minute).value();
        self.now.seconds = self.hands.get(HandKind::Second).value();
        debug!("{} adjusted, writing {=u8}:{=u8} to RTC", kind, self.now.hours, self.now.minutes);
        self.rtc.write(&self.now.to_registers());

        self.hands.recompute_angles();
        self.frame.publish_hands(&self.hands);
    }

    fn cycle_color(&mut self, kind: HandKind) {
        let color = self.hands.get_mut(kind).cycle_color();
        self.frame.publish_hand_color(kind, color);
        Settings::save_color(&mut self.store, kind, color);
    }

    /// One control cycle: time sync, then buttons.
    pub fn service(&mut self) {
        self.sync_time();
        self.poll_buttons();
    }

    /// Runs control cycles forever.
    pub fn run(&mut self) -> ! {
        loop {
            self.service();
            self.delay.delay_ms(self.config.poll_interval_ms);
        }
    }

    /// Current mode.
    #[inline]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// The hands as last computed.
    #[inline]
    pub fn hands(&self) -> &Hands {
        &self.hands
    }

    /// Selected background.
    #[inline]
    pub fn background(&self) -> Background {
        self.background
    }

    /// Palette index of a hand.
    #[inline]
    pub fn hand_color(&self, kind: HandKind) -> ColorIndex {
        self.hands.get(kind).color()
    }

    /// Last accepted wall-clock snapshot.
    #[inline]
    pub fn now(&self) -> WallClock {
        self.now
    }

    /// Main-loop configuration.
    #[inline]
    pub fn config(&self) -> &ClockConfig {
        &self.config
    }

    /// The RTC driver.
    pub fn rtc(&self) -> &R {
        &self.rtc
    }

    /// The RTC driver, mutably.
    pub fn rtc_mut(&mut self) -> &mut R {
        &mut self.rtc
    }

    /// The settings store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The delay provider.
    pub fn delay(&self) -> &D {
        &self.delay
    }

    /// The button inputs, e.g. to script them in a simulator.
    pub fn buttons_mut(&mut self) -> &mut B {
        &mut self.buttons
    }
}
