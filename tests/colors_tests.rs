//! Integration tests for colors module

use palette::Srgb;
use pov_clock::{ClockError, Color, ColorIndex, NUM_COLORS, PALETTE};

fn colors_equal(a: Srgb, b: Srgb) -> bool {
    const EPSILON: f32 = 0.01;
    (a.red - b.red).abs() < EPSILON
        && (a.green - b.green).abs() < EPSILON
        && (a.blue - b.blue).abs() < EPSILON
}

#[test]
fn primaries_drive_one_line_each() {
    assert!(Color::Red.red() && !Color::Red.blue() && !Color::Red.green());
    assert!(!Color::Blue.red() && Color::Blue.blue() && !Color::Blue.green());
    assert!(!Color::Green.red() && !Color::Green.blue() && Color::Green.green());
}

#[test]
fn mixes_combine_lines() {
    assert_eq!(Color::Purple.bits(), Color::Red.bits() | Color::Blue.bits());
    assert_eq!(Color::Yellow.bits(), Color::Red.bits() | Color::Green.bits());
    assert_eq!(Color::Cyan.bits(), Color::Blue.bits() | Color::Green.bits());
    assert_eq!(Color::White.bits(), 0b111);
    assert_eq!(Color::Off.bits(), 0);
}

#[test]
fn srgb_conversion_is_full_on_or_off() {
    assert!(colors_equal(Color::Red.into(), Srgb::new(1.0, 0.0, 0.0)));
    assert!(colors_equal(Color::Green.into(), Srgb::new(0.0, 1.0, 0.0)));
    assert!(colors_equal(Color::Blue.into(), Srgb::new(0.0, 0.0, 1.0)));
    assert!(colors_equal(Color::Yellow.into(), Srgb::new(1.0, 1.0, 0.0)));
    assert!(colors_equal(Color::White.to_srgb(), Srgb::new(1.0, 1.0, 1.0)));
    assert!(colors_equal(Color::Off.to_srgb(), Srgb::new(0.0, 0.0, 0.0)));
}

#[test]
fn palette_holds_every_color_once() {
    assert_eq!(PALETTE.len(), NUM_COLORS);
    for (i, a) in PALETTE.iter().enumerate() {
        for b in &PALETTE[i + 1..] {
            assert_ne!(a, b);
        }
    }
    assert_eq!(PALETTE[NUM_COLORS - 1], Color::Off);
}

#[test]
fn color_index_maps_into_palette() {
    assert_eq!(ColorIndex::default().color(), Color::Red);
    assert_eq!(ColorIndex::new(2).unwrap().color(), Color::Blue);
    assert_eq!(ColorIndex::new(6).unwrap().color(), Color::White);
    assert_eq!(ColorIndex::new(7).unwrap().color(), Color::Off);
}

#[test]
fn color_index_rejects_out_of_range() {
    assert!(ColorIndex::new(8).is_none());
    assert!(ColorIndex::new(0xFF).is_none());
    assert_eq!(ColorIndex::try_from(8u8), Err(ClockError::InvalidColor(8)));
    assert_eq!(ColorIndex::try_from(3u8).map(ColorIndex::get), Ok(3));
}

#[test]
fn color_index_next_wraps() {
    let mut index = ColorIndex::default();
    for expected in [1, 2, 3, 4, 5, 6, 7, 0] {
        index = index.next();
        assert_eq!(index.get(), expected);
    }
    assert_eq!(ColorIndex::wrapping(9).get(), 1);
}
