//! Frame state shared with the sector interrupt, and the frame renderer.
//!
//! [`FrameState`] holds everything the per-sector tick needs to pick a
//! color. It is built from atomics so it can live in a `static` and be read
//! from interrupt context without locking.
//!
//! Every field has exactly one writer, the main loop. The tick handler only
//! reads. The one multi-field hazard, a hand's `pos1`/`pos2` pair, is written
//! inside a critical section so the tick never observes half an update.

use core::sync::atomic::{AtomicBool, AtomicU8, Ordering};

use crate::background::Background;
use crate::colors::{Color, ColorIndex};
use crate::hand::{Hand, HandKind, Hands};
use crate::types::Sector;

/// Sector a hand slot holds before its first publish. Never reached by the
/// tick, so an unpublished hand draws nothing.
pub const OFF_FACE: Sector = u8::MAX;

struct HandSlot {
    pos1: AtomicU8,
    pos2: AtomicU8,
    color: AtomicU8,
}

impl HandSlot {
    const fn new() -> Self {
        Self {
            pos1: AtomicU8::new(OFF_FACE),
            pos2: AtomicU8::new(OFF_FACE),
            color: AtomicU8::new(Color::Off.bits()),
        }
    }
}

/// Display state read by the sector interrupt.
pub struct FrameState {
    suppressed: AtomicBool,
    background: AtomicU8,
    hands: [HandSlot; 3],
}

impl FrameState {
    /// Creates a blank frame: background 0, hands off the face, rendering
    /// enabled.
    pub const fn new() -> Self {
        Self {
            suppressed: AtomicBool::new(false),
            background: AtomicU8::new(0),
            hands: [HandSlot::new(), HandSlot::new(), HandSlot::new()],
        }
    }

    /// Publishes one hand's sectors and color.
    pub fn publish_hand(&self, hand: &Hand) {
        let slot = &self.hands[hand.kind().index()];
        critical_section::with(|_| {
            slot.pos1.store(hand.pos1(), Ordering::Relaxed);
            slot.pos2.store(hand.pos2(), Ordering::Relaxed);
            slot.color.store(hand.color().color().bits(), Ordering::Relaxed);
        });
    }

    /// Publishes all three hands.
    pub fn publish_hands(&self, hands: &Hands) {
        for hand in hands.iter() {
            self.publish_hand(hand);
        }
    }

    /// Publishes just a hand's color, leaving its sectors alone.
    pub fn publish_hand_color(&self, kind: HandKind, color: ColorIndex) {
        self.hands[kind.index()]
            .color
            .store(color.color().bits(), Ordering::Relaxed);
    }

    /// Selects the background layer.
    pub fn set_background(&self, background: Background) {
        self.background.store(background.get(), Ordering::Relaxed);
    }

    /// The selected background layer.
    pub fn background(&self) -> Background {
        Background::new(self.background.load(Ordering::Relaxed)).unwrap_or_default()
    }

    /// Engages or releases render suppression.
    ///
    /// While suppressed, the sector tick leaves the color output alone so the
    /// main loop can drive it directly.
    pub fn set_suppressed(&self, suppressed: bool) {
        self.suppressed.store(suppressed, Ordering::Release);
    }

    /// True while the main loop owns the color output.
    #[inline]
    pub fn is_suppressed(&self) -> bool {
        self.suppressed.load(Ordering::Acquire)
    }

    /// The `(pos1, pos2)` pair last published for `kind`.
    pub fn hand_positions(&self, kind: HandKind) -> (Sector, Sector) {
        let slot = &self.hands[kind.index()];
        critical_section::with(|_| {
            (
                slot.pos1.load(Ordering::Relaxed),
                slot.pos2.load(Ordering::Relaxed),
            )
        })
    }

    /// The color last published for `kind`.
    pub fn hand_color(&self, kind: HandKind) -> Color {
        Color::from_bits(self.hands[kind.index()].color.load(Ordering::Relaxed))
    }
}

impl Default for FrameState {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolves the color for `sector`.
///
/// Starts from the background, then lets the hour, minute and second hands
/// overwrite it in that order, so the second hand wins any overlap. Constant
/// work and no locking: this runs inside the sector interrupt, which the
/// main loop cannot preempt.
pub fn render(frame: &FrameState, sector: Sector) -> Color {
    let mut color = frame.background().color_at(sector);

    for kind in HandKind::ALL {
        let slot = &frame.hands[kind.index()];
        if sector == slot.pos1.load(Ordering::Relaxed) || sector == slot.pos2.load(Ordering::Relaxed)
        {
            color = Color::from_bits(slot.color.load(Ordering::Relaxed));
        }
    }

    color
}
