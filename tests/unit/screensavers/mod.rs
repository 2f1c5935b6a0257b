use super::*;
use crate::program::core::Program;
use crate::raster::font::BlockFont;
use crate::screensavers::burn::BurnProgram;
use crate::screensavers::care_bears::{CareBearsProgram, MARQUEE_TEXT};
use crate::screensavers::gnome::GnomeProgram;
use crate::screensavers::teeth::TeethProgram;
use crate::test_support::manual_clock;

fn no_artwork() -> ImageStore {
    ImageStore::new("/nonexistent/workshop-sign-assets", LogHandle::disabled())
}

fn block() -> Arc<dyn Font> {
    Arc::new(BlockFont::default())
}

fn lit_in_rows(s: &Surface, rows: std::ops::Range<i32>) -> usize {
    rows.flat_map(|y| (0..s.width() as i32).map(move |x| (x, y)))
        .filter(|&(x, y)| s.get_pixel(x, y).is_some_and(|c| !c.is_black()))
        .count()
}

#[test]
fn missing_artwork_is_reported_as_none() {
    assert!(load_artwork(&no_artwork(), "gnome", None, None, &LogHandle::disabled()).is_none());
}

#[test]
fn centered_text_straddles_the_center() {
    let mut s = Surface::new(20, 10);
    draw_centered(&mut s, &BlockFont::default(), 10, 8, Color::RED, "ab");
    // Two 5 px cells starting at x = 5.
    assert_eq!(s.get_pixel(5, 4), Some(Color::RED));
    assert_eq!(s.get_pixel(4, 4), Some(Color::BLACK));
    assert_eq!(s.get_pixel(13, 4), Some(Color::RED));
    assert_eq!(s.get_pixel(14, 4), Some(Color::BLACK));
}

#[test]
fn gnome_falls_back_to_two_lines_of_text() {
    let mut gnome = GnomeProgram::new(&no_artwork(), block(), &LogHandle::disabled());
    let mut s = Surface::new(128, 64);
    assert!(!gnome.render(&mut s).finished);
    assert!(gnome.is_screensaver());
    assert_eq!(gnome.play_duration(), Some(30.0));
    // Baselines at 30 and 41.
    assert!(lit_in_rows(&s, 23..30) > 0);
    assert!(lit_in_rows(&s, 34..41) > 0);
    assert_eq!(lit_in_rows(&s, 0..23), 0);
}

#[test]
fn teeth_uses_the_default_duration() {
    let mut teeth = TeethProgram::new(&no_artwork(), block(), 128, 64, &LogHandle::disabled());
    let mut s = Surface::new(128, 64);
    teeth.render(&mut s);
    assert!(s.pixels().iter().any(|c| *c == Color::BLUE));
    assert!(teeth.is_screensaver());
    assert_eq!(
        teeth.play_duration(),
        Some(crate::program::core::DEFAULT_PLAY_DURATION_SECS)
    );
}

#[test]
fn care_bears_marquees_move_in_opposite_directions() {
    let (src, clock) = manual_clock();
    let mut bears = CareBearsProgram::new(
        &no_artwork(),
        block(),
        128,
        Arc::clone(&clock),
        &LogHandle::disabled(),
    );
    let period = text_width(&BlockFont::default(), MARQUEE_TEXT);
    assert_eq!(bears.marquee_offset(0.0), 0);
    assert_eq!(bears.marquee_offset(1.0), 10);
    assert_eq!(bears.marquee_offset(f64::from(period) / 10.0), 0);

    let mut s = Surface::new(128, 64);
    bears.render(&mut s);
    // Words alternate through the palette.
    assert_eq!(s.get_pixel(0, 5), Some(Color::GREEN));
    assert_eq!(s.get_pixel(25, 5), Some(Color::YELLOW));
    let before = s.clone();

    src.advance(0.5);
    bears.render(&mut s);
    // Top band shifted left by 5 px, bottom band right by 5 px.
    assert_eq!(s.get_pixel(0, 5), before.get_pixel(5, 5));
    let dark = |surface: &Surface, x, y| surface.get_pixel(x, y).is_some_and(Color::is_black);
    assert!(dark(&s, 15, 5) && !dark(&before, 15, 5));
    assert!(dark(&s, 25, 55) && !dark(&before, 25, 55));
    assert!(bears.is_screensaver());
}

#[test]
fn burn_alternates_and_inverts_on_schedule() {
    let (src, clock) = manual_clock();
    let mut burn = BurnProgram::new(
        &no_artwork(),
        block(),
        block(),
        64,
        Arc::clone(&clock),
        &LogHandle::disabled(),
    );
    burn.on_activate(0.0);
    assert!(!burn.is_screensaver());
    assert_eq!(burn.play_duration(), Some(60.0));
    assert_eq!(burn.image_index(0.5), 0);
    assert_eq!(burn.image_index(1.5), 1);
    assert_eq!(burn.image_index(2.0), 0);
    assert!(!burn.is_inverted(0.5));
    assert!(!burn.is_inverted(4.9));
    assert!(burn.is_inverted(5.2));
    assert!(!burn.is_inverted(6.0));
    assert!(burn.is_inverted(10.5));

    let mut s = Surface::new(128, 64);
    burn.render(&mut s);
    assert_eq!(s.get_pixel(0, 0), Some(Color::BLACK));
    assert!(s.pixels().iter().any(|c| *c == Color::RED));

    src.advance(5.5);
    burn.render(&mut s);
    assert_eq!(s.get_pixel(0, 0), Some(Color::RED));
    assert!(s.pixels().iter().any(|c| *c == Color::BLACK));

    // Re-activation restarts the schedule.
    burn.on_activate(clock.virtual_seconds());
    burn.render(&mut s);
    assert_eq!(s.get_pixel(0, 0), Some(Color::BLACK));
}
