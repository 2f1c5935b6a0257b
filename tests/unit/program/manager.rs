use super::*;
use crate::test_support::{ScriptedProgram, manual_clock};

#[test]
fn run_frame_without_active_program_clears_and_reports_nothing() {
    let (_src, clock) = manual_clock();
    let mut mgr = ProgramManager::new(clock, LogHandle::disabled());
    let mut s = Surface::new(4, 4);
    s.set_pixel(0, 0, crate::raster::color::Color::RED);

    let res = mgr.run_frame(&mut s);
    assert_eq!(res, RunResult::continuing());
    assert_eq!(s.lit_pixel_count(), 0);
    assert_eq!(mgr.active_tag(), None);
}

#[test]
fn duplicate_tags_are_rejected() {
    let (_src, clock) = manual_clock();
    let mut mgr = ProgramManager::new(clock, LogHandle::disabled());
    mgr.register(Box::new(ScriptedProgram::new("a"))).unwrap();
    let err = mgr
        .register(Box::new(ScriptedProgram::new("a")))
        .unwrap_err();
    assert!(matches!(err, SignError::InvalidArgument(_)));
}

#[test]
fn unknown_tag_leaves_active_program_unchanged() {
    let (src, clock) = manual_clock();
    let mut mgr = ProgramManager::new(clock, LogHandle::disabled());
    mgr.register(Box::new(ScriptedProgram::new("a"))).unwrap();
    assert!(mgr.set_active(ProgramTag::new("a")));
    src.advance(3.0);
    assert!(!mgr.set_active(ProgramTag::new("missing")));
    assert_eq!(mgr.active_tag(), Some(ProgramTag::new("a")));
    assert_eq!(mgr.active_start_time(), 0.0);
}

#[test]
fn duration_expires_on_the_frame_that_crosses_the_threshold() {
    let (src, clock) = manual_clock();
    let mut mgr = ProgramManager::new(clock, LogHandle::disabled());
    mgr.register(Box::new(ScriptedProgram::new("timed").lasting(10.0)))
        .unwrap();
    mgr.set_active(ProgramTag::new("timed"));
    let mut s = Surface::new(2, 2);

    for _ in 0..9 {
        src.advance(1.0);
        assert_eq!(mgr.run_frame(&mut s).end_reason, None);
    }
    src.advance(0.5);
    assert_eq!(mgr.run_frame(&mut s).end_reason, None);
    src.advance(0.5);
    let res = mgr.run_frame(&mut s);
    assert_eq!(res.end_reason, Some(EndReason::DurationExpired));
    assert_eq!(res.ended, Some(ProgramTag::new("timed")));
}

#[test]
fn self_termination_wins_over_expired_duration() {
    let (src, clock) = manual_clock();
    let mut mgr = ProgramManager::new(clock, LogHandle::disabled());
    let program = ScriptedProgram::new("short").lasting(1.0);
    let finish = Arc::clone(&program.finish);
    mgr.register(Box::new(program)).unwrap();
    mgr.set_active(ProgramTag::new("short"));

    src.advance(5.0);
    *finish.lock().unwrap() = true;
    let res = mgr.run_frame(&mut Surface::new(2, 2));
    assert_eq!(res.end_reason, Some(EndReason::SelfTerminated));
    assert!(res.is_finished());
}

#[test]
fn unset_duration_runs_forever() {
    let (src, clock) = manual_clock();
    let mut mgr = ProgramManager::new(clock, LogHandle::disabled());
    let program = ScriptedProgram::new("forever");
    let frames = Arc::clone(&program.frames);
    mgr.register(Box::new(program)).unwrap();
    mgr.set_active(ProgramTag::new("forever"));

    let mut s = Surface::new(2, 2);
    for _ in 0..100 {
        src.advance(60.0);
        assert!(!mgr.run_frame(&mut s).is_finished());
    }
    assert_eq!(*frames.lock().unwrap(), 100);
}

#[test]
fn screensavers_keep_registration_order() {
    let (_src, clock) = manual_clock();
    let mut mgr = ProgramManager::new(clock, LogHandle::disabled());
    for (name, saver) in [("base", false), ("s1", true), ("over", false), ("s2", true)] {
        let mut p = ScriptedProgram::new(name);
        p.screensaver = saver;
        mgr.register(Box::new(p)).unwrap();
    }
    assert_eq!(
        mgr.screensaver_programs(),
        vec![ProgramTag::new("s1"), ProgramTag::new("s2")]
    );
    mgr.set_active(ProgramTag::new("s2"));
    assert!(mgr.active_is_screensaver());
}

#[test]
fn each_activation_notifies_the_program() {
    let (src, clock) = manual_clock();
    let mut mgr = ProgramManager::new(clock, LogHandle::disabled());
    let program = ScriptedProgram::new("a");
    let seen = Arc::clone(&program.activations);
    mgr.register(Box::new(program)).unwrap();
    mgr.register(Box::new(ScriptedProgram::new("b"))).unwrap();

    mgr.set_active(ProgramTag::new("a"));
    src.advance(2.0);
    mgr.set_active(ProgramTag::new("b"));
    src.advance(1.0);
    mgr.set_active(ProgramTag::new("a"));
    assert_eq!(*seen.lock().unwrap(), vec![0.0, 3.0]);
}
