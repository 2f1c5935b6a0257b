use super::*;
use crate::test_support::manual_clock;

fn no_artwork() -> ImageStore {
    ImageStore::new("/nonexistent/workshop-sign-assets", LogHandle::disabled())
}

#[test]
fn blinks_once_then_finishes_and_restarts() {
    let (src, clock) = manual_clock();
    let mut eye = EyeProgram::new(&no_artwork(), 32, Arc::clone(&clock), LogHandle::disabled());
    eye.on_activate(clock.virtual_seconds());
    let mut s = Surface::new(64, 32);

    let mut finished_at = Vec::new();
    for step in 0..10 {
        let res = eye.render(&mut s);
        if res.finished {
            finished_at.push(step);
        }
        src.advance(0.5);
    }
    // Four images at 1 s each; the ninth frame (t = 4 s) is the one after the closed eye.
    assert_eq!(finished_at, vec![8]);
    assert_eq!(eye.frame_index(clock.virtual_seconds()), 1);
}

#[test]
fn fallback_draws_outline_and_closed_lid() {
    let (src, clock) = manual_clock();
    let mut eye = EyeProgram::new(&no_artwork(), 32, Arc::clone(&clock), LogHandle::disabled());
    let mut s = Surface::new(64, 32);

    eye.render(&mut s);
    let open = s.lit_pixel_count();
    assert!(open > 0);
    assert_eq!(s.get_pixel(32, 16), Some(Color::RED));

    src.advance(3.0);
    eye.render(&mut s);
    // The closed eye is one horizontal line across the diameter.
    assert_eq!(s.lit_pixel_count(), 2 * 14 + 1);
    assert_eq!(s.get_pixel(32, 10), Some(Color::BLACK));
}

#[test]
fn artwork_is_tinted_red_and_centered() {
    let dir = std::env::temp_dir().join(format!("workshop-sign-eye-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    for name in EYE_SEQUENCE {
        image::RgbaImage::from_pixel(4, 4, image::Rgba([255, 255, 255, 255]))
            .save(dir.join(format!("{name}.png")))
            .unwrap();
    }
    let store = ImageStore::new(&dir, LogHandle::disabled());
    let (_src, clock) = manual_clock();
    let mut eye = EyeProgram::new(&store, 8, clock, LogHandle::disabled());
    let mut s = Surface::new(16, 8);
    eye.render(&mut s);
    assert_eq!(s.lit_pixel_count(), 64);
    assert_eq!(s.get_pixel(8, 4), Some(Color::RED));
    assert_eq!(s.get_pixel(3, 4), Some(Color::BLACK));
}

#[test]
fn is_a_self_terminating_screensaver() {
    let (_src, clock) = manual_clock();
    let eye = EyeProgram::new(&no_artwork(), 32, clock, LogHandle::disabled());
    assert!(eye.is_screensaver());
    assert_eq!(eye.play_duration(), None);
    assert_eq!(eye.tag().as_str(), "eye");
}
