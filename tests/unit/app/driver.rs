use super::*;
use crate::agenda::workshop::{StaticWorkshops, Workshop};
use crate::backend::memory::MemoryBackend;
use crate::program::core::ProgramTag;
use crate::test_support::wall_origin;

fn config(override_delay: f64) -> SignConfig {
    SignConfig {
        fps: Some(10.0),
        assets_dir: Some("/nonexistent/workshop-sign/assets".into()),
        fonts_dir: Some("/nonexistent/workshop-sign/fonts".into()),
        override_delay_secs: Some(override_delay),
        ..SignConfig::default()
    }
}

fn app(cfg: &SignConfig) -> (ManualTimeSource, SignApp<MemoryBackend>) {
    let time = ManualTimeSource::new(wall_origin());
    let workshops = StaticWorkshops::new(vec![Workshop::new("Soldering", Some("2026-06-01T10:45:00"))]);
    let app = SignApp::new(
        cfg,
        time.clone(),
        MemoryBackend::new(cfg.total_width(), cfg.total_height()),
        Box::new(workshops),
        LogHandle::disabled(),
    )
    .unwrap();
    (time, app)
}

fn active(app: &SignApp<MemoryBackend>) -> Option<&'static str> {
    app.manager().active_tag().map(ProgramTag::as_str)
}

#[test]
fn assembles_all_programs_and_starts_on_the_agenda() {
    let (_time, mut app) = app(&config(1e9));
    let tags: Vec<&str> = app.manager().tags().iter().map(|t| t.as_str()).collect();
    assert_eq!(tags, vec!["agenda", "eye", "gnome", "teeth", "care-bears", "burn"]);
    assert_eq!(active(&app), Some("agenda"));
    assert_eq!(app.frame_interval(), Duration::from_millis(100));

    app.step().unwrap();
    let frame = app.backend().last_frame().unwrap();
    assert_eq!((frame.width(), frame.height()), (128, 64));
    assert!(frame.lit_pixel_count() > 0);
    assert_eq!(app.backend().presented_count(), 1);
}

#[test]
fn idle_agenda_hands_over_to_the_first_screensaver() {
    let (time, mut app) = app(&config(1e9));
    app.run_until(&time, 29.0).unwrap();
    assert_eq!(active(&app), Some("agenda"));
    app.run_until(&time, 31.0).unwrap();
    assert_eq!(active(&app), Some("eye"));

    // The eye ends itself after its blink and the agenda comes back.
    app.run_until(&time, 36.0).unwrap();
    assert_eq!(active(&app), Some("agenda"));
    assert_eq!(app.scheduler().screensaver_cursor(), 1);
}

#[test]
fn override_window_runs_burn_then_returns_to_the_agenda() {
    let (time, mut app) = app(&config(5.0));
    app.run_until(&time, 6.0).unwrap();
    assert_eq!(active(&app), Some("burn"));
    // Idle rule does not interrupt the override.
    app.run_until(&time, 40.0).unwrap();
    assert_eq!(active(&app), Some("burn"));
    app.run_until(&time, 66.0).unwrap();
    assert_eq!(active(&app), Some("agenda"));
}

#[test]
fn timescale_speeds_up_virtual_time() {
    let cfg = SignConfig {
        timescale: Some(4.0),
        ..config(1e9)
    };
    let (time, mut app) = app(&cfg);
    let frames = app.run_until(&time, 8.0).unwrap();
    // 2 real seconds at 10 fps.
    assert!((20..=22).contains(&frames), "{frames}");
    assert!(time.elapsed() < 2.2);
}

#[test]
fn invalid_config_is_rejected() {
    let cfg = SignConfig {
        fps: Some(0.0),
        ..SignConfig::default()
    };
    let err = SignApp::new(
        &cfg,
        ManualTimeSource::new(wall_origin()),
        MemoryBackend::new(8, 8),
        Box::new(StaticWorkshops::default()),
        LogHandle::disabled(),
    )
    .err()
    .unwrap();
    assert!(matches!(err, crate::foundation::error::SignError::InvalidArgument(_)));
}

#[test]
fn unrepresentable_frame_interval_fails_construction() {
    let cfg = SignConfig {
        fps: Some(1e-310),
        ..SignConfig::default()
    };
    let result = SignApp::new(
        &cfg,
        ManualTimeSource::new(wall_origin()),
        MemoryBackend::new(8, 8),
        Box::new(StaticWorkshops::default()),
        LogHandle::disabled(),
    );
    assert!(matches!(
        result.err(),
        Some(crate::foundation::error::SignError::InvalidArgument(_))
    ));
}
