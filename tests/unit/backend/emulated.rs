use super::*;
use crate::raster::color::Color;

#[test]
fn preview_draws_round_leds_with_gutters() {
    let mut s = Surface::new(2, 1);
    s.set_pixel(0, 0, Color::RED);
    let img = led_preview(&s, 8);
    assert_eq!(img.dimensions(), (16, 8));
    assert_eq!(img.get_pixel(4, 4).0, [255, 0, 0]);
    assert_eq!(img.get_pixel(0, 0).0, BOARD);
    assert_ne!(img.get_pixel(12, 4).0, [255, 0, 0]);
}

#[test]
fn snapshots_are_written_every_n_frames() {
    let dir = std::env::temp_dir().join(format!("workshop-sign-emu-{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);

    let mut backend =
        EmulatedBackend::new(4, 4, 1.0, LogHandle::disabled()).with_snapshots(&dir, 2);
    for _ in 0..4 {
        let frame = backend.create_surface();
        backend.present(frame).unwrap();
    }
    assert_eq!(backend.frame_count(), 4);
    assert!(dir.join("frame-000002.png").exists());
    assert!(dir.join("frame-000004.png").exists());
    assert!(!dir.join("frame-000001.png").exists());
}

#[test]
fn unwritable_snapshot_dir_is_not_fatal() {
    let file = std::env::temp_dir().join(format!("workshop-sign-emu-file-{}", std::process::id()));
    std::fs::write(&file, b"x").unwrap();
    let mut backend =
        EmulatedBackend::new(2, 2, 1.0, LogHandle::disabled()).with_snapshots(&file, 1);
    let frame = backend.create_surface();
    assert!(backend.present(frame).is_ok());
}
