//! # Stage Sequencer
//!
//! Drives the verification progression forward one stage per tick, fires a
//! completion handler exactly once when the terminal stage is reached, and
//! accepts external failure injection and reset at any time.
//!
//! ## Driver contract
//!
//! The sequencer owns no timer. A driver (CLI loop, test harness) calls
//! [`Sequencer::start`], captures the returned [`Generation`], and delivers
//! one [`Sequencer::tick`] per interval stamped with that generation. A
//! [`Sequencer::reset`] bumps the generation, so a tick scheduled before the
//! reset and delivered after it is inert — cancellation races cannot
//! double-advance the stage.
//!
//! ## Failure semantics
//!
//! There is no failure *detection* here. [`Sequencer::fail`] is a pure
//! external signal (the reference behavior only triggers it from a manual
//! debug control); `tick` can never produce [`VerificationStage::Failed`].

use crate::stage::VerificationStage;

// =============================================================================
// GENERATION
// =============================================================================

/// Monotonic counter identifying one run of the sequencer.
///
/// Bumped on every reset. Scheduled work captures the generation it was
/// scheduled under; stale work is discarded instead of applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Generation(pub u64);

impl Generation {
    /// The successor generation, saturating at the maximum.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

// =============================================================================
// TICK OUTCOME
// =============================================================================

/// What a single tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Moved to the given non-terminal stage.
    Advanced(VerificationStage),
    /// Reached `Completed`; the completion handler fired and advancement
    /// halted permanently for this generation.
    Completed,
    /// The tick carried a stale generation and was discarded.
    Stale,
    /// The sequencer is not advancing (never started, already terminal).
    Halted,
}

// =============================================================================
// SEQUENCER
// =============================================================================

/// Completion callback type. Boxed so the host decides what completion
/// unlocks; the sequencer only guarantees at-most-once invocation per run.
pub type CompletionHandler = Box<dyn FnMut() + Send>;

/// The verification stage sequencer.
///
/// Single-threaded and cooperative: exactly one `&mut` owner, no interior
/// mutability, no blocking operations.
pub struct Sequencer {
    stage: VerificationStage,
    generation: Generation,
    running: bool,
    completion_fired: bool,
    on_complete: Option<CompletionHandler>,
}

impl Default for Sequencer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Sequencer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sequencer")
            .field("stage", &self.stage)
            .field("generation", &self.generation)
            .field("running", &self.running)
            .field("completion_fired", &self.completion_fired)
            .finish()
    }
}

impl Sequencer {
    /// Create a sequencer at `Idle`, not yet advancing.
    #[must_use]
    pub fn new() -> Self {
        Self {
            stage: VerificationStage::Idle,
            generation: Generation::default(),
            running: false,
            completion_fired: false,
            on_complete: None,
        }
    }

    /// Install a completion handler, invoked at most once per run when the
    /// terminal `Completed` stage is reached.
    #[must_use]
    pub fn with_completion(mut self, handler: CompletionHandler) -> Self {
        self.on_complete = Some(handler);
        self
    }

    /// Replace the completion handler.
    pub fn set_completion(&mut self, handler: CompletionHandler) {
        self.on_complete = Some(handler);
    }

    // =========================================================================
    // CONTROL
    // =========================================================================

    /// Begin automatic advancement from the current stage.
    ///
    /// Returns the [`Generation`] the driver must stamp on every tick it
    /// schedules, or `None` if the call was ignored (already advancing, or
    /// already in a terminal state).
    pub fn start(&mut self) -> Option<Generation> {
        if self.running || self.stage.is_terminal() {
            return None;
        }
        self.running = true;
        Some(self.generation)
    }

    /// Begin advancement from an explicit starting stage.
    ///
    /// Same ignore rules as [`Sequencer::start`]; the supplied stage itself
    /// must not be terminal.
    pub fn start_from(&mut self, stage: VerificationStage) -> Option<Generation> {
        if self.running || self.stage.is_terminal() || stage.is_terminal() {
            return None;
        }
        self.stage = stage;
        self.running = true;
        Some(self.generation)
    }

    /// Apply one scheduled advancement.
    ///
    /// `generation` is the value captured when the tick was scheduled. A
    /// mismatch means a reset happened in between; the tick is discarded
    /// without touching state.
    pub fn tick(&mut self, generation: Generation) -> TickOutcome {
        if generation != self.generation {
            return TickOutcome::Stale;
        }
        if !self.running || self.stage.is_terminal() {
            return TickOutcome::Halted;
        }

        // Forward edge only. Stages without a successor were caught by the
        // terminal check above.
        let next = self.stage.next().unwrap_or(VerificationStage::Completed);
        self.stage = next;

        if next == VerificationStage::Completed {
            self.running = false;
            if !self.completion_fired {
                self.completion_fired = true;
                if let Some(handler) = self.on_complete.as_mut() {
                    handler();
                }
            }
            TickOutcome::Completed
        } else {
            TickOutcome::Advanced(next)
        }
    }

    /// External failure signal: enter `Failed` and halt advancement.
    ///
    /// Callable from any state; only a [`Sequencer::reset`] leaves `Failed`.
    pub fn fail(&mut self) {
        self.stage = VerificationStage::Failed;
        self.running = false;
    }

    /// Return to `Idle`, invalidate in-flight ticks, and restart
    /// advancement from the first sequence entry.
    ///
    /// Returns the fresh [`Generation`] for the new run.
    pub fn reset(&mut self) -> Generation {
        self.stage = VerificationStage::Idle;
        self.generation = self.generation.next();
        self.completion_fired = false;
        self.running = true;
        self.generation
    }

    // =========================================================================
    // OBSERVABLES
    // =========================================================================

    /// Current stage, for rendering.
    #[must_use]
    pub fn stage(&self) -> VerificationStage {
        self.stage
    }

    /// Current generation.
    #[must_use]
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Whether automatic advancement is active.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Progress-bar fill for the current stage, in per-mille.
    #[must_use]
    pub fn progress_per_mille(&self) -> u64 {
        self.stage.progress_per_mille()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting_sequencer() -> (Sequencer, Arc<AtomicUsize>) {
        let count = Arc::new(AtomicUsize::new(0));
        let handle = Arc::clone(&count);
        let seq = Sequencer::new().with_completion(Box::new(move || {
            handle.fetch_add(1, Ordering::SeqCst);
        }));
        (seq, count)
    }

    #[test]
    fn four_ticks_run_idle_to_completed() {
        let (mut seq, completions) = counting_sequencer();
        let generation = seq.start().expect("start");

        assert_eq!(
            seq.tick(generation),
            TickOutcome::Advanced(VerificationStage::Scanning)
        );
        assert_eq!(
            seq.tick(generation),
            TickOutcome::Advanced(VerificationStage::Liveness)
        );
        assert_eq!(
            seq.tick(generation),
            TickOutcome::Advanced(VerificationStage::Analyzing)
        );
        assert_eq!(seq.tick(generation), TickOutcome::Completed);

        assert_eq!(seq.stage(), VerificationStage::Completed);
        assert_eq!(completions.load(Ordering::SeqCst), 1);
        assert!(!seq.is_running());
    }

    #[test]
    fn ticks_after_completed_are_noops() {
        let (mut seq, completions) = counting_sequencer();
        let generation = seq.start().expect("start");
        for _ in 0..4 {
            seq.tick(generation);
        }

        assert_eq!(seq.tick(generation), TickOutcome::Halted);
        assert_eq!(seq.stage(), VerificationStage::Completed);
        // Handler did not fire a second time.
        assert_eq!(completions.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn stale_generation_tick_does_not_mutate() {
        let mut seq = Sequencer::new();
        let old_generation = seq.start().expect("start");
        seq.tick(old_generation);
        assert_eq!(seq.stage(), VerificationStage::Scanning);

        let new_generation = seq.reset();
        assert_eq!(seq.stage(), VerificationStage::Idle);

        // A tick scheduled before the reset arrives late.
        assert_eq!(seq.tick(old_generation), TickOutcome::Stale);
        assert_eq!(seq.stage(), VerificationStage::Idle);

        // The new run is unaffected.
        assert_eq!(
            seq.tick(new_generation),
            TickOutcome::Advanced(VerificationStage::Scanning)
        );
    }

    #[test]
    fn fail_is_terminal_until_reset() {
        let mut seq = Sequencer::new();
        let generation = seq.start().expect("start");
        seq.tick(generation);
        seq.tick(generation);
        assert_eq!(seq.stage(), VerificationStage::Liveness);

        seq.fail();
        assert_eq!(seq.stage(), VerificationStage::Failed);
        assert_eq!(seq.tick(generation), TickOutcome::Halted);
        assert_eq!(seq.stage(), VerificationStage::Failed);

        // Reset recovers; a fresh run completes normally.
        let fresh = seq.reset();
        assert_eq!(seq.stage(), VerificationStage::Idle);
        for _ in 0..4 {
            seq.tick(fresh);
        }
        assert_eq!(seq.stage(), VerificationStage::Completed);
    }

    #[test]
    fn fail_callable_from_any_state() {
        let mut seq = Sequencer::new();
        seq.fail();
        assert_eq!(seq.stage(), VerificationStage::Failed);

        // Even after completion.
        let mut seq = Sequencer::new();
        let generation = seq.start().expect("start");
        for _ in 0..4 {
            seq.tick(generation);
        }
        seq.fail();
        assert_eq!(seq.stage(), VerificationStage::Failed);
    }

    #[test]
    fn start_while_running_is_ignored() {
        let mut seq = Sequencer::new();
        assert!(seq.start().is_some());
        // Second driver must not be granted a generation.
        assert!(seq.start().is_none());
    }

    #[test]
    fn start_in_terminal_state_is_ignored() {
        let mut seq = Sequencer::new();
        seq.fail();
        assert!(seq.start().is_none());
        assert!(seq.start_from(VerificationStage::Scanning).is_none());
    }

    #[test]
    fn start_from_skips_earlier_stages() {
        let mut seq = Sequencer::new();
        let generation = seq
            .start_from(VerificationStage::Analyzing)
            .expect("start_from");
        assert_eq!(seq.tick(generation), TickOutcome::Completed);
    }

    #[test]
    fn start_from_rejects_terminal_target() {
        let mut seq = Sequencer::new();
        assert!(seq.start_from(VerificationStage::Completed).is_none());
        assert!(seq.start_from(VerificationStage::Failed).is_none());
    }

    #[test]
    fn tick_before_start_is_noop() {
        let mut seq = Sequencer::new();
        assert_eq!(seq.tick(Generation::default()), TickOutcome::Halted);
        assert_eq!(seq.stage(), VerificationStage::Idle);
    }

    #[test]
    fn reset_bumps_generation_and_rearms_completion() {
        let (mut seq, completions) = counting_sequencer();
        let first = seq.start().expect("start");
        for _ in 0..4 {
            seq.tick(first);
        }
        assert_eq!(completions.load(Ordering::SeqCst), 1);

        let second = seq.reset();
        assert_eq!(second, Generation(first.0 + 1));
        for _ in 0..4 {
            seq.tick(second);
        }
        // Fresh run fires the handler again, exactly once.
        assert_eq!(completions.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn observed_stage_sequence_matches_reference() {
        let mut seq = Sequencer::new();
        let generation = seq.start().expect("start");
        let mut observed = Vec::new();
        for _ in 0..3 {
            seq.tick(generation);
            observed.push(seq.stage());
        }
        assert_eq!(
            observed,
            vec![
                VerificationStage::Scanning,
                VerificationStage::Liveness,
                VerificationStage::Analyzing,
            ]
        );
        assert_eq!(seq.tick(generation), TickOutcome::Completed);
    }
}
