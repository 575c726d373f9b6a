use super::*;

fn recorded(cue: &mut BasicCue) -> Rc<RefCell<Vec<CueEvent>>> {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    cue.add_observer(move |e| sink.borrow_mut().push(*e));
    log
}

fn kinds(log: &[CueEvent]) -> Vec<&'static str> {
    log.iter()
        .map(|e| match e {
            CueEvent::Start(_) => "start",
            CueEvent::Tick(_) => "tick",
            CueEvent::End(_) => "end",
        })
        .collect()
}

#[test]
fn defaults() {
    let cue = BasicCue::default();
    assert_eq!(cue.time_mode(), TimeMode::Relative);
    assert_eq!(cue.cue_state(), CueState::Uninitialized);
    assert_eq!((cue.start_time(), cue.end_time()), (0.0, 1.0));
}

#[test]
fn waits_for_start_time() {
    let mut cue = BasicCue::new(2.0, 4.0);
    let log = recorded(&mut cue);
    cue.tick(1.0, 0.0, 1.0);
    assert_eq!(cue.cue_state(), CueState::Uninitialized);
    assert!(log.borrow().is_empty());
}

#[test]
fn runs_start_tick_end() {
    let mut cue = BasicCue::new(0.0, 1.0);
    let log = recorded(&mut cue);
    cue.tick(0.0, 0.0, 0.0);
    cue.tick(0.5, 0.5, 0.5);
    assert_eq!(cue.cue_state(), CueState::Active);
    cue.tick(1.0, 0.5, 1.0);
    assert_eq!(cue.cue_state(), CueState::Inactive);
    assert_eq!(
        kinds(&log.borrow()),
        vec!["start", "tick", "tick", "tick", "end"]
    );

    // Inactive cues ignore further ticks.
    cue.tick(0.5, 0.0, 0.5);
    assert_eq!(log.borrow().len(), 5);
}

#[test]
fn overshooting_end_skips_tick() {
    let mut cue = BasicCue::new(0.0, 1.0);
    let log = recorded(&mut cue);
    cue.tick(0.9, 0.0, 0.9);
    cue.tick(1.3, 0.4, 1.3);
    assert_eq!(kinds(&log.borrow()), vec!["start", "tick", "end"]);
    assert_eq!(cue.core().animation_time(), 0.9);
}

#[test]
fn tick_records_times() {
    let mut cue = BasicCue::new(0.0, 10.0);
    let log = recorded(&mut cue);
    cue.tick(3.0, 0.25, 7.0);
    let core = cue.core();
    assert_eq!(
        (core.animation_time(), core.delta_time(), core.clock_time()),
        (3.0, 0.25, 7.0)
    );
    let CueEvent::Tick(info) = log.borrow()[1] else {
        panic!("expected tick event");
    };
    assert_eq!(info.animation_time, 3.0);
}

#[test]
fn finalize_ends_active_cue_once() {
    let mut cue = BasicCue::new(0.0, 1.0);
    let log = recorded(&mut cue);
    cue.tick(0.5, 0.0, 0.5);
    cue.finalize();
    cue.finalize();
    assert_eq!(cue.cue_state(), CueState::Inactive);
    assert_eq!(kinds(&log.borrow()), vec!["start", "tick", "end"]);
}

#[test]
fn finalize_without_start_is_silent() {
    let mut cue = BasicCue::new(5.0, 6.0);
    let log = recorded(&mut cue);
    cue.finalize();
    assert_eq!(cue.cue_state(), CueState::Inactive);
    assert!(log.borrow().is_empty());
}

#[test]
fn initialize_rewinds() {
    let mut cue = BasicCue::new(0.0, 1.0);
    cue.tick(1.0, 0.0, 1.0);
    assert_eq!(cue.cue_state(), CueState::Inactive);
    cue.initialize();
    assert_eq!(cue.cue_state(), CueState::Uninitialized);
}

#[test]
fn events_serialize_tagged() {
    let v = serde_json::to_value(CueEvent::End(CueInfo::default())).unwrap();
    assert_eq!(v["event"], "end");
}
