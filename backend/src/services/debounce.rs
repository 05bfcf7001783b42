//! Per-field debounce controller
//!
//! Each text input that triggers lookups owns one controller. Every
//! keystroke begins a new generation; a pending attempt whose generation is
//! no longer the latest has been superseded and must discard its outcome,
//! even when its network response arrives after a newer attempt started.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Token identifying one resolution attempt
pub type Generation = u64;

/// Debounce state for a single input field
pub struct DebounceController {
    generation: AtomicU64,
    quiet_period: Duration,
}

impl DebounceController {
    pub fn new(quiet_period: Duration) -> Self {
        Self {
            generation: AtomicU64::new(0),
            quiet_period,
        }
    }

    /// Start a new attempt, superseding any pending one
    pub fn begin(&self) -> Generation {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Whether `generation` is still the most recent attempt
    pub fn is_current(&self, generation: Generation) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    /// Wait out the quiet period, then report whether this attempt survived.
    ///
    /// Returns false when a newer keystroke arrived during the wait.
    pub async fn quiet_elapsed(&self, generation: Generation) -> bool {
        tokio::time::sleep(self.quiet_period).await;
        self.is_current(generation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generations_are_monotonic() {
        let ctl = DebounceController::new(Duration::from_millis(10));
        let g1 = ctl.begin();
        let g2 = ctl.begin();
        assert!(g2 > g1);
        assert!(!ctl.is_current(g1));
        assert!(ctl.is_current(g2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_superseded_attempt_does_not_survive_quiet_period() {
        let ctl = DebounceController::new(Duration::from_millis(1000));
        let g1 = ctl.begin();
        let g2 = ctl.begin();
        assert!(!ctl.quiet_elapsed(g1).await);
        assert!(ctl.quiet_elapsed(g2).await);
    }
}
