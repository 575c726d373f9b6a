use std::cell::RefCell;
use std::rc::Rc;

use crate::foundation::error::CueTreeResult;

/// How a parent scene maps its own time onto a child cue.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeMode {
    /// Time measured from the parent's start time, in the parent's units.
    #[default]
    Relative,
    /// Time scaled so the parent's `[start, end]` span maps to `[0, 1]`.
    Normalized,
}

/// Lifecycle state of a cue within one pass of its parent's clock.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CueState {
    /// Start time not reached yet in this pass.
    #[default]
    Uninitialized,
    /// Between start and end time.
    Active,
    /// Past end time, or finalized.
    Inactive,
}

/// Snapshot of a cue's timing, carried by every [`CueEvent`].
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
pub struct CueInfo {
    pub start_time: f64,
    pub end_time: f64,
    pub animation_time: f64,
    pub delta_time: f64,
    pub clock_time: f64,
}

/// Notification emitted by the base cue hooks.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum CueEvent {
    Start(CueInfo),
    Tick(CueInfo),
    End(CueInfo),
}

/// Callback registered on a cue.
pub type CueObserver = Box<dyn FnMut(&CueEvent)>;

/// Shared handle to any cue; scenes hold their children this way.
pub type SharedCue = Rc<RefCell<dyn Cue>>;

/// Timing and state common to every cue.
pub struct CueCore {
    start_time: f64,
    end_time: f64,
    time_mode: TimeMode,
    state: CueState,
    animation_time: f64,
    delta_time: f64,
    clock_time: f64,
    observers: Vec<CueObserver>,
}

impl std::fmt::Debug for CueCore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CueCore")
            .field("start_time", &self.start_time)
            .field("end_time", &self.end_time)
            .field("time_mode", &self.time_mode)
            .field("state", &self.state)
            .field("animation_time", &self.animation_time)
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}

impl Default for CueCore {
    fn default() -> Self {
        Self::new(0.0, 1.0, TimeMode::Relative)
    }
}

impl CueCore {
    pub fn new(start_time: f64, end_time: f64, time_mode: TimeMode) -> Self {
        Self {
            start_time,
            end_time,
            time_mode,
            state: CueState::Uninitialized,
            animation_time: 0.0,
            delta_time: 0.0,
            clock_time: 0.0,
            observers: Vec::new(),
        }
    }

    pub fn start_time(&self) -> f64 {
        self.start_time
    }

    pub fn end_time(&self) -> f64 {
        self.end_time
    }

    pub fn set_start_time(&mut self, t: f64) {
        self.start_time = t;
    }

    pub fn set_end_time(&mut self, t: f64) {
        self.end_time = t;
    }

    pub fn time_mode(&self) -> TimeMode {
        self.time_mode
    }

    pub(crate) fn set_time_mode_unchecked(&mut self, mode: TimeMode) {
        self.time_mode = mode;
    }

    pub fn state(&self) -> CueState {
        self.state
    }

    /// Local time passed to the most recent tick.
    pub fn animation_time(&self) -> f64 {
        self.animation_time
    }

    pub fn delta_time(&self) -> f64 {
        self.delta_time
    }

    pub fn clock_time(&self) -> f64 {
        self.clock_time
    }

    pub fn add_observer(&mut self, observer: impl FnMut(&CueEvent) + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn info(&self) -> CueInfo {
        CueInfo {
            start_time: self.start_time,
            end_time: self.end_time,
            animation_time: self.animation_time,
            delta_time: self.delta_time,
            clock_time: self.clock_time,
        }
    }

    fn emit(&mut self, event: CueEvent) {
        for obs in &mut self.observers {
            obs(&event);
        }
    }

    /// Base start hook: notify observers.
    pub fn notify_start(&mut self) {
        let info = self.info();
        self.emit(CueEvent::Start(info));
    }

    /// Base tick hook: record the tick times and notify observers.
    pub fn record_tick(&mut self, current_time: f64, delta_time: f64, clock_time: f64) {
        self.animation_time = current_time;
        self.delta_time = delta_time;
        self.clock_time = clock_time;
        let info = self.info();
        self.emit(CueEvent::Tick(info));
    }

    /// Base end hook: notify observers.
    pub fn notify_end(&mut self) {
        let info = self.info();
        self.emit(CueEvent::End(info));
    }
}

/// A unit of animation active over `[start_time, end_time]`.
///
/// Implementors provide access to their [`CueCore`] and may override the three
/// `*_internal` hooks; `tick`, `initialize` and `finalize` drive the state
/// machine and should normally be left alone.
pub trait Cue {
    fn core(&self) -> &CueCore;
    fn core_mut(&mut self) -> &mut CueCore;

    /// Called once when the cue becomes active.
    fn start_cue_internal(&mut self) {
        self.core_mut().notify_start();
    }

    /// Called for every tick inside the active interval.
    fn tick_internal(&mut self, current_time: f64, delta_time: f64, clock_time: f64) {
        self.core_mut()
            .record_tick(current_time, delta_time, clock_time);
    }

    /// Called once when the cue leaves the active state.
    fn end_cue_internal(&mut self) {
        self.core_mut().notify_end();
    }

    /// Advance the cue to `current_time` (in the cue's own time frame).
    fn tick(&mut self, current_time: f64, delta_time: f64, clock_time: f64) {
        let (start, end) = (self.core().start_time, self.core().end_time);

        if current_time >= start && self.core().state == CueState::Uninitialized {
            self.core_mut().state = CueState::Active;
            tracing::debug!(start, end, current_time, "cue started");
            self.start_cue_internal();
        }

        if self.core().state == CueState::Active {
            if current_time <= end {
                self.tick_internal(current_time, delta_time, clock_time);
            }
            if current_time >= end {
                self.end_cue_internal();
                self.core_mut().state = CueState::Inactive;
                tracing::debug!(start, end, current_time, "cue ended");
            }
        }
    }

    /// Rewind to the uninitialized state for a new pass.
    fn initialize(&mut self) {
        self.core_mut().state = CueState::Uninitialized;
    }

    /// Close the current pass, ending the cue if it is still active.
    fn finalize(&mut self) {
        if self.core().state == CueState::Active {
            self.end_cue_internal();
        }
        self.core_mut().state = CueState::Inactive;
    }

    fn time_mode(&self) -> TimeMode {
        self.core().time_mode
    }

    fn set_time_mode(&mut self, mode: TimeMode) -> CueTreeResult<()> {
        self.core_mut().set_time_mode_unchecked(mode);
        Ok(())
    }

    fn cue_state(&self) -> CueState {
        self.core().state
    }

    fn start_time(&self) -> f64 {
        self.core().start_time
    }

    fn end_time(&self) -> f64 {
        self.core().end_time
    }
}

/// A cue with only the base behavior: it reports its events to observers.
#[derive(Debug, Default)]
pub struct BasicCue {
    core: CueCore,
}

impl BasicCue {
    pub fn new(start_time: f64, end_time: f64) -> Self {
        Self {
            core: CueCore::new(start_time, end_time, TimeMode::Relative),
        }
    }

    pub fn with_time_mode(mut self, mode: TimeMode) -> Self {
        self.core.time_mode = mode;
        self
    }

    /// Wrap into a shared handle suitable for [`AnimationScene::add_cue`].
    ///
    /// [`AnimationScene::add_cue`]: crate::AnimationScene::add_cue
    pub fn shared(self) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(self))
    }

    pub fn add_observer(&mut self, observer: impl FnMut(&CueEvent) + 'static) {
        self.core.add_observer(observer);
    }
}

impl Cue for BasicCue {
    fn core(&self) -> &CueCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut CueCore {
        &mut self.core
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/cue.rs"]
mod tests;
