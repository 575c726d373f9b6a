use std::cell::Cell;
use std::time::Instant;

/// Elapsed-time source for real-time playback.
pub trait Clock {
    /// Reset the elapsed time to zero.
    fn start(&mut self);

    /// Seconds since the last [`start`](Clock::start).
    fn elapsed_secs(&self) -> f64;
}

/// Wall clock backed by [`Instant`].
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock {
    started: Option<Instant>,
}

impl Clock for SystemClock {
    fn start(&mut self) {
        self.started = Some(Instant::now());
    }

    fn elapsed_secs(&self) -> f64 {
        self.started
            .map(|t| t.elapsed().as_secs_f64())
            .unwrap_or(0.0)
    }
}

/// Deterministic clock that advances by a fixed step on every read.
#[derive(Clone, Debug)]
pub struct ManualClock {
    step: f64,
    now: Cell<f64>,
}

impl ManualClock {
    pub fn new(step_secs: f64) -> Self {
        Self {
            step: step_secs,
            now: Cell::new(0.0),
        }
    }
}

impl Clock for ManualClock {
    fn start(&mut self) {
        self.now.set(0.0);
    }

    fn elapsed_secs(&self) -> f64 {
        let t = self.now.get() + self.step;
        self.now.set(t);
        t
    }
}
