//! Angular position tracking and rotor speed governing.
//!
//! The rotor is divided into [`RESOLUTION`] sectors. A compare-match timer
//! fires once per expected sector and [`Tracker::on_periodic_tick`] advances
//! the sector index and paints it. Once per revolution a position sensor
//! fires [`Tracker::on_revolution_edge`], which restarts the timer, nudges
//! the timer period toward the measured rotor speed, and rewinds the index
//! to sector 0.
//!
//! The governor is integral-only: one timer tick of correction per
//! revolution, in whichever direction brings the count of sectors per
//! revolution toward [`RESOLUTION`]. A period outside the configured window
//! is snapped back to the nominal value instead of being walked back.

use crate::colors::Color;
use crate::frame::{FrameState, render};
use crate::types::RESOLUTION;

/// The compare-match timer that produces sector ticks.
///
/// Implementations write timer registers directly and must not block.
pub trait SectorTimer {
    /// Masks the sector-tick interrupt.
    fn disable_tick(&mut self);

    /// Zeroes the timer counter.
    fn reset_counter(&mut self);

    /// Unmasks the sector-tick interrupt.
    fn enable_tick(&mut self);

    /// Programs the compare value, in timer ticks per sector.
    fn set_period(&mut self, ticks: u16);
}

/// The three color-enable lines on the rotor.
pub trait ColorOutput {
    /// Drives the lines for `color`. Must not block or fail.
    fn set_color(&mut self, color: Color);
}

/// Speed governor tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GovernorConfig {
    /// Period restored when the current one leaves the window.
    pub nominal_period: u16,
    /// Smallest acceptable period (inclusive).
    pub min_period: u16,
    /// Largest acceptable period (inclusive).
    pub max_period: u16,
    /// Edges arriving fewer than this many sectors after the previous
    /// accepted edge are treated as sensor bounce and dropped. Zero accepts
    /// every edge.
    pub edge_holdoff_sectors: u16,
}

impl GovernorConfig {
    /// Nominal 179, window 160..=200, no edge hold-off.
    pub const DEFAULT: Self = Self {
        nominal_period: 179,
        min_period: 160,
        max_period: 200,
        edge_holdoff_sectors: 0,
    };

    /// Returns this config with the given edge hold-off.
    pub const fn with_edge_holdoff(mut self, sectors: u16) -> Self {
        self.edge_holdoff_sectors = sectors;
        self
    }

    /// True if `period` lies inside the operating window.
    #[inline]
    pub const fn in_window(&self, period: u16) -> bool {
        period >= self.min_period && period <= self.max_period
    }
}

impl Default for GovernorConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// What the governor did at a revolution edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Correction {
    /// Period was out of the window and was reset to nominal.
    Clamped,
    /// Too many sectors counted; period lengthened by one tick.
    Lengthened,
    /// Too few sectors counted; period shortened by one tick.
    Shortened,
    /// Exactly one revolution's worth of sectors; period unchanged.
    Held,
}

/// Result of a revolution edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EdgeOutcome {
    /// The tracker resynchronized and the governor applied a correction.
    Synchronized(Correction),
    /// The edge fell inside the hold-off window and was dropped.
    Ignored,
}

/// One governor step.
///
/// `sectors_counted` is the sector index reached when the revolution edge
/// arrived. Returns the period to use for the next revolution.
pub const fn correct_period(
    config: &GovernorConfig,
    period: u16,
    sectors_counted: u16,
) -> (u16, Correction) {
    if !config.in_window(period) {
        return (config.nominal_period, Correction::Clamped);
    }
    if sectors_counted > RESOLUTION {
        (period.saturating_add(1), Correction::Lengthened)
    } else if sectors_counted < RESOLUTION {
        (period.saturating_sub(1), Correction::Shortened)
    } else {
        (period, Correction::Held)
    }
}

/// Sector counter driven by the two rotor interrupts.
///
/// Owned by interrupt context. Both handlers are O(1), allocation-free and
/// must not be re-entered; firmware typically keeps the tracker in a
/// `critical_section::Mutex<RefCell<Option<Tracker>>>` shared by the two
/// interrupt vectors.
pub struct Tracker<'a, T: SectorTimer, O: ColorOutput> {
    timer: T,
    output: O,
    frame: &'a FrameState,
    config: GovernorConfig,
    sector: u16,
    period: u16,
    revolutions: u32,
    locked: bool,
}

impl<'a, T: SectorTimer, O: ColorOutput> Tracker<'a, T, O> {
    /// Creates a tracker and programs the nominal period into the timer.
    ///
    /// The tracker starts unsynchronized: nothing is rendered until the
    /// first revolution edge.
    pub fn new(mut timer: T, output: O, frame: &'a FrameState, config: GovernorConfig) -> Self {
        timer.set_period(config.nominal_period);

        Self {
            timer,
            output,
            frame,
            config,
            sector: RESOLUTION,
            period: config.nominal_period,
            revolutions: 0,
            locked: false,
        }
    }

    /// Sector-tick interrupt handler.
    ///
    /// Advances the sector index and paints the new sector, unless the index
    /// has run off the end of the face (missed revolution edge) or the main
    /// loop has suppressed rendering.
    pub fn on_periodic_tick(&mut self) {
        self.sector = self.sector.saturating_add(1);

        if self.sector < RESOLUTION && !self.frame.is_suppressed() {
            let color = render(self.frame, self.sector as u8);
            self.output.set_color(color);
        }
    }

    /// Revolution-edge interrupt handler.
    ///
    /// The tick source is masked while its counter is zeroed so a tick can
    /// never fire against a half-reset counter. The edge hold-off only
    /// applies once the first edge has been accepted.
    pub fn on_revolution_edge(&mut self) -> EdgeOutcome {
        if self.locked && self.sector < self.config.edge_holdoff_sectors {
            debug!("edge ignored at sector {=u16}", self.sector);
            return EdgeOutcome::Ignored;
        }

        self.timer.disable_tick();
        self.timer.reset_counter();
        self.timer.enable_tick();

        let (period, correction) = correct_period(&self.config, self.period, self.sector);
        if correction == Correction::Clamped {
            warn!("sector period {=u16} out of window, reset to {=u16}", self.period, period);
        }
        self.period = period;
        self.timer.set_period(period);

        self.revolutions = self.revolutions.wrapping_add(1);
        self.locked = true;
        self.sector = 0;

        EdgeOutcome::Synchronized(correction)
    }

    /// Current sector index. Values at or above [`RESOLUTION`] mean the
    /// revolution edge is overdue.
    #[inline]
    pub fn sector(&self) -> u16 {
        self.sector
    }

    /// Current timer ticks per sector.
    #[inline]
    pub fn period(&self) -> u16 {
        self.period
    }

    /// Accepted revolution edges since startup (wrapping).
    #[inline]
    pub fn revolutions(&self) -> u32 {
        self.revolutions
    }

    /// True while the sector index is on the face.
    #[inline]
    pub fn is_synchronized(&self) -> bool {
        self.sector < RESOLUTION
    }

    /// Governor configuration in use.
    #[inline]
    pub fn config(&self) -> &GovernorConfig {
        &self.config
    }

    /// Overrides the current period, e.g. from a calibration value. The
    /// timer is reprogrammed at the next revolution edge.
    pub fn set_period(&mut self, period: u16) {
        self.period = period;
    }

    /// The sector timer.
    pub fn timer(&self) -> &T {
        &self.timer
    }

    /// The color output.
    pub fn output(&self) -> &O {
        &self.output
    }
}
