use std::sync::{Condvar, Mutex};
use std::time::{Duration, Instant};

/// Shared pause latch between a running interpreter and a controlling
/// thread. The run thread parks itself with `wait_released`; the controller
/// calls `release` to let it continue.
#[derive(Debug, Default)]
pub struct PauseGate {
    paused: Mutex<bool>,
    resumed: Condvar,
}

impl PauseGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pause(&self) {
        let mut paused = self.paused.lock().expect("pause lock poisoned");
        *paused = true;
    }

    pub fn release(&self) {
        let mut paused = self.paused.lock().expect("pause lock poisoned");
        *paused = false;
        self.resumed.notify_all();
    }

    pub fn is_paused(&self) -> bool {
        *self.paused.lock().expect("pause lock poisoned")
    }

    /// Blocks until `release` is called or `timeout` elapses. Returns true
    /// when released, false on timeout; the latch stays set on timeout so the
    /// caller can report it.
    pub fn wait_released(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let mut paused = self.paused.lock().expect("pause lock poisoned");
        while *paused {
            let now = Instant::now();
            if now >= deadline {
                return false;
            }
            let (guard, _) = self
                .resumed
                .wait_timeout(paused, deadline - now)
                .expect("pause lock poisoned");
            paused = guard;
        }
        true
    }
}
