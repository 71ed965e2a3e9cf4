//! Repeating spawn timer
//!
//! Time is pushed in by the host loop through [`SpawnScheduler::advance`];
//! nothing here blocks or sleeps.

use crate::consts::MAX_CATCHUP_FIRINGS;
use crate::error::GameError;

#[derive(Debug, Clone)]
pub struct SpawnScheduler {
    interval_ms: u32,
    /// Time accumulated since the last firing
    elapsed_ms: f64,
    armed: bool,
}

impl SpawnScheduler {
    pub fn new(interval_ms: u32) -> Self {
        Self {
            interval_ms: interval_ms.max(1),
            elapsed_ms: 0.0,
            armed: false,
        }
    }

    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Arm the timer. A second start is rejected rather than creating another timer.
    pub fn start(&mut self) -> Result<(), GameError> {
        if self.armed {
            return Err(GameError::AlreadySpawning);
        }
        self.armed = true;
        self.elapsed_ms = 0.0;
        Ok(())
    }

    /// Disarm the timer; no-op when already stopped
    pub fn stop(&mut self) {
        self.armed = false;
        self.elapsed_ms = 0.0;
    }

    /// Feed elapsed wall time, returning how many firings are due
    pub fn advance(&mut self, elapsed_ms: f64) -> u32 {
        if !self.armed || !elapsed_ms.is_finite() || elapsed_ms <= 0.0 {
            return 0;
        }
        self.elapsed_ms += elapsed_ms;

        let interval = self.interval_ms as f64;
        let mut firings = 0;
        while self.elapsed_ms >= interval && firings < MAX_CATCHUP_FIRINGS {
            self.elapsed_ms -= interval;
            firings += 1;
        }

        if self.elapsed_ms >= interval {
            log::warn!(
                "Spawn scheduler fell behind, dropping {:.0} ms",
                self.elapsed_ms - self.elapsed_ms % interval
            );
            self.elapsed_ms %= interval;
        }
        firings
    }
}
