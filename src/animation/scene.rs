//! Composite cue that drives child cues from a global clock.
//!
//! A scene is itself a [`Cue`]: ticking it maps the scene time onto every child
//! according to the child's [`TimeMode`] and then runs the base cue machinery.
//! [`AnimationScene::play`] runs that tick loop on the calling thread until the
//! scene ends or a stop is requested through [`PlaybackHandle`].

use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::animation::clock::{Clock, SystemClock};
use crate::animation::cue::{Cue, CueCore, CueEvent, CueState, SharedCue, TimeMode};
use crate::foundation::error::{CueTreeError, CueTreeResult};

/// How [`AnimationScene::play`] advances time between ticks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayMode {
    /// Fixed steps of `1 / frame_rate` per tick, regardless of wall time.
    #[default]
    Sequence,
    /// Scene time follows the elapsed time of the scene clock.
    RealTime,
}

/// Playback notifications, one of each per running [`AnimationScene::play`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SceneEvent {
    StartPlay,
    EndPlay,
}

type SceneObserver = Box<dyn FnMut(SceneEvent)>;

/// Cloneable, thread-safe handle for stopping a playing scene.
#[derive(Clone, Debug)]
pub struct PlaybackHandle {
    in_play: Arc<AtomicBool>,
    stop_play: Arc<AtomicBool>,
}

impl PlaybackHandle {
    /// Ask the running play loop to finish after its current tick.
    ///
    /// Does nothing when the scene is not playing.
    pub fn stop(&self) {
        if self.in_play.load(Ordering::Acquire) {
            self.stop_play.store(true, Ordering::Release);
        }
    }

    pub fn is_playing(&self) -> bool {
        self.in_play.load(Ordering::Acquire)
    }

    fn stop_requested(&self) -> bool {
        self.stop_play.load(Ordering::Acquire)
    }
}

/// Ordered collection of child cues played against a shared clock.
pub struct AnimationScene {
    core: CueCore,
    cues: Vec<SharedCue>,
    play_mode: PlayMode,
    frame_rate: f64,
    loop_playback: bool,
    playback: PlaybackHandle,
    clock: Box<dyn Clock>,
    observers: Vec<SceneObserver>,
}

impl std::fmt::Debug for AnimationScene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimationScene")
            .field("core", &self.core)
            .field("cues", &self.cues.len())
            .field("play_mode", &self.play_mode)
            .field("frame_rate", &self.frame_rate)
            .field("loop_playback", &self.loop_playback)
            .field("in_play", &self.playback.is_playing())
            .finish_non_exhaustive()
    }
}

impl Default for AnimationScene {
    fn default() -> Self {
        Self::new(0.0, 1.0)
    }
}

impl AnimationScene {
    /// Sequence-mode scene over `[start_time, end_time]` at 10 frames per second.
    pub fn new(start_time: f64, end_time: f64) -> Self {
        Self {
            core: CueCore::new(start_time, end_time, TimeMode::Relative),
            cues: Vec::new(),
            play_mode: PlayMode::Sequence,
            frame_rate: 10.0,
            loop_playback: false,
            playback: PlaybackHandle {
                in_play: Arc::new(AtomicBool::new(false)),
                stop_play: Arc::new(AtomicBool::new(false)),
            },
            clock: Box::new(SystemClock::default()),
            observers: Vec::new(),
        }
    }

    /// Append `cue`, keeping insertion order.
    ///
    /// Rejected when the cue is already present, or when this scene is
    /// normalized and the cue is not.
    pub fn add_cue(&mut self, cue: SharedCue) -> CueTreeResult<()> {
        if self.cues.iter().any(|c| Rc::ptr_eq(c, &cue)) {
            tracing::warn!("animation cue already present in the scene");
            return Err(CueTreeError::validation(
                "animation cue already present in the scene",
            ));
        }
        let Ok(mode) = cue.try_borrow().map(|c| c.time_mode()) else {
            tracing::warn!("animation cue is mutably borrowed");
            return Err(CueTreeError::validation(
                "animation cue is mutably borrowed (a scene cannot contain itself)",
            ));
        };
        if self.core.time_mode() == TimeMode::Normalized && mode != TimeMode::Normalized {
            tracing::warn!(?mode, "cue time mode incompatible with normalized scene");
            return Err(CueTreeError::validation(
                "a scene with normalized time mode can only contain normalized cues",
            ));
        }
        self.cues.push(cue);
        Ok(())
    }

    /// Remove `cue`; returns `false` when it was not part of the scene.
    pub fn remove_cue(&mut self, cue: &SharedCue) -> bool {
        let before = self.cues.len();
        self.cues.retain(|c| !Rc::ptr_eq(c, cue));
        self.cues.len() != before
    }

    pub fn remove_all_cues(&mut self) {
        self.cues.clear();
    }

    pub fn number_of_cues(&self) -> usize {
        self.cues.len()
    }

    pub fn cues(&self) -> &[SharedCue] {
        &self.cues
    }

    pub fn set_time_range(&mut self, start_time: f64, end_time: f64) {
        self.core.set_start_time(start_time);
        self.core.set_end_time(end_time);
    }

    pub fn play_mode(&self) -> PlayMode {
        self.play_mode
    }

    pub fn set_play_mode(&mut self, mode: PlayMode) {
        self.play_mode = mode;
    }

    pub fn frame_rate(&self) -> f64 {
        self.frame_rate
    }

    /// Frames per second used by [`PlayMode::Sequence`].
    ///
    /// Zero is accepted and treated as 1 when playback starts.
    pub fn set_frame_rate(&mut self, fps: f64) -> CueTreeResult<()> {
        if !fps.is_finite() || fps < 0.0 {
            return Err(CueTreeError::validation(format!(
                "frame rate must be finite and >= 0, got {fps}"
            )));
        }
        self.frame_rate = fps;
        Ok(())
    }

    pub fn is_looping(&self) -> bool {
        self.loop_playback
    }

    pub fn set_loop(&mut self, enabled: bool) {
        self.loop_playback = enabled;
    }

    /// Replace the clock used by [`PlayMode::RealTime`].
    pub fn set_clock(&mut self, clock: impl Clock + 'static) {
        self.clock = Box::new(clock);
    }

    pub fn add_play_observer(&mut self, observer: impl FnMut(SceneEvent) + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn add_cue_observer(&mut self, observer: impl FnMut(&CueEvent) + 'static) {
        self.core.add_observer(observer);
    }

    pub fn playback_handle(&self) -> PlaybackHandle {
        self.playback.clone()
    }

    pub fn is_in_play(&self) -> bool {
        self.playback.is_playing()
    }

    /// Scene time of the most recent tick.
    pub fn animation_time(&self) -> f64 {
        self.core.animation_time()
    }

    /// Request the play loop to stop; see [`PlaybackHandle::stop`].
    pub fn stop(&self) {
        self.playback.stop();
    }

    fn emit(&mut self, event: SceneEvent) {
        for obs in &mut self.observers {
            obs(event);
        }
    }

    /// Play the scene on the calling thread.
    ///
    /// Returns immediately when already playing. Fails for a normalized scene
    /// or when `end_time <= start_time`. Otherwise ticks until the scene ends
    /// (repeating while looping) or a stop is requested, emitting exactly one
    /// [`SceneEvent::StartPlay`] and one [`SceneEvent::EndPlay`].
    #[tracing::instrument(skip(self), fields(mode = ?self.play_mode, looping = self.loop_playback))]
    pub fn play(&mut self) -> CueTreeResult<()> {
        if self.is_in_play() {
            tracing::debug!("play requested while already playing");
            return Ok(());
        }
        if self.core.time_mode() == TimeMode::Normalized {
            tracing::warn!("cannot play a scene with normalized time mode");
            return Err(CueTreeError::playback(
                "cannot play a scene with normalized time mode",
            ));
        }
        let (start, end) = (self.core.start_time(), self.core.end_time());
        if end <= start {
            tracing::warn!(start, end, "scene times are not suitable for playing");
            return Err(CueTreeError::playback(format!(
                "scene end time {end} must be greater than start time {start}"
            )));
        }
        self.ensure_children_free()?;

        self.emit(SceneEvent::StartPlay);
        self.playback.in_play.store(true, Ordering::Release);
        self.playback.stop_play.store(false, Ordering::Release);

        if self.frame_rate == 0.0 {
            self.frame_rate = 1.0;
        }
        let time_per_frame = 1.0 / self.frame_rate;

        let mut current = self.core.animation_time();
        if current < start || current >= end {
            current = start;
        }

        let mut passes = 0u64;
        loop {
            self.initialize();
            self.clock.start();
            let timer_start = current;
            let mut delta = 0.0;
            loop {
                self.tick(current, delta, current);
                let previous = current;
                current = match self.play_mode {
                    PlayMode::RealTime => self.clock.elapsed_secs() + timer_start,
                    PlayMode::Sequence => current + time_per_frame,
                };
                delta = (current - previous).abs();
                if self.playback.stop_requested() || self.core.state() == CueState::Inactive {
                    break;
                }
            }
            passes += 1;
            current = start;
            if !self.loop_playback || self.playback.stop_requested() {
                break;
            }
        }

        tracing::debug!(passes, "play finished");
        self.playback.stop_play.store(false, Ordering::Release);
        self.playback.in_play.store(false, Ordering::Release);
        self.emit(SceneEvent::EndPlay);
        Ok(())
    }

    /// Jump to `time` without running the play loop.
    #[tracing::instrument(skip(self))]
    pub fn set_animation_time(&mut self, time: f64) -> CueTreeResult<()> {
        if self.is_in_play() {
            tracing::warn!("seek rejected while playing");
            return Err(CueTreeError::playback(
                "animation time cannot be set while playing",
            ));
        }
        self.ensure_children_free()?;
        self.initialize();
        self.tick(time, 0.0, time);
        if self.core.state() == CueState::Inactive {
            self.finalize();
        }
        Ok(())
    }

    /// Fails if any child is borrowed elsewhere, so dispatch would have to skip it.
    fn ensure_children_free(&self) -> CueTreeResult<()> {
        if self.cues.iter().any(|c| c.try_borrow_mut().is_err()) {
            tracing::warn!("child cue is borrowed elsewhere");
            return Err(CueTreeError::playback(
                "a child cue is borrowed elsewhere and cannot be driven",
            ));
        }
        Ok(())
    }

    fn for_each_child(&self, mut f: impl FnMut(&mut dyn Cue)) {
        for cue in &self.cues {
            match cue.try_borrow_mut() {
                Ok(mut c) => f(&mut *c),
                Err(_) => tracing::error!("child cue is already borrowed; skipped"),
            }
        }
    }
}

/// Map scene time onto a child in `mode`; returns `(time, delta)`.
///
/// A zero-length scene maps normalized time to 0 before its end and 1 at it.
pub(crate) fn remap_time(
    mode: TimeMode,
    current_time: f64,
    delta_time: f64,
    start_time: f64,
    end_time: f64,
) -> (f64, f64) {
    match mode {
        TimeMode::Relative => (current_time - start_time, delta_time),
        TimeMode::Normalized => {
            let span = end_time - start_time;
            if span > 0.0 {
                ((current_time - start_time) / span, delta_time / span)
            } else if current_time >= end_time {
                (1.0, 0.0)
            } else {
                (0.0, 0.0)
            }
        }
    }
}

impl Cue for AnimationScene {
    fn core(&self) -> &CueCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut CueCore {
        &mut self.core
    }

    fn start_cue_internal(&mut self) {
        self.core.notify_start();
        self.for_each_child(|c| c.initialize());
    }

    fn tick_internal(&mut self, current_time: f64, delta_time: f64, clock_time: f64) {
        let (start, end) = (self.core.start_time(), self.core.end_time());
        self.for_each_child(|c| {
            let (t, dt) = remap_time(c.time_mode(), current_time, delta_time, start, end);
            c.tick(t, dt, clock_time);
        });
        self.core.record_tick(current_time, delta_time, clock_time);
    }

    fn end_cue_internal(&mut self) {
        self.for_each_child(|c| c.finalize());
        self.core.notify_end();
    }

    /// Switching to [`TimeMode::Normalized`] is rejected while any child is
    /// not normalized.
    fn set_time_mode(&mut self, mode: TimeMode) -> CueTreeResult<()> {
        if mode == TimeMode::Normalized {
            let mut blocked = false;
            for cue in &self.cues {
                match cue.try_borrow() {
                    Ok(c) => blocked |= c.time_mode() != TimeMode::Normalized,
                    Err(_) => {
                        tracing::warn!("child cue is mutably borrowed; time mode unknown");
                        return Err(CueTreeError::validation(
                            "cannot switch to normalized time mode: a child cue is borrowed",
                        ));
                    }
                }
            }
            if blocked {
                tracing::warn!("scene contains non-normalized cues");
                return Err(CueTreeError::validation(
                    "cannot switch to normalized time mode: scene contains non-normalized cues",
                ));
            }
        }
        self.core.set_time_mode_unchecked(mode);
        Ok(())
    }
}

impl Drop for AnimationScene {
    fn drop(&mut self) {
        if self.is_in_play() {
            self.stop();
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/scene.rs"]
mod tests;
