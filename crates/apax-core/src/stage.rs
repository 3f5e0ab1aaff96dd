//! # Verification Stages
//!
//! The fixed, ordered progression of the identity-verification flow:
//!
//! | Stage | Label | Role |
//! |-----------|----------|---------------------------|
//! | Idle      | Idle     | Not yet started           |
//! | Scanning  | ID Scan  | Active stage 0            |
//! | Liveness  | Liveness | Active stage 1            |
//! | Analyzing | Analysis | Active stage 2            |
//! | Completed | Verified | Terminal (success)        |
//! | Failed    | Failed   | Terminal (caller-injected)|
//!
//! Stages only move forward along the sequence; `Failed` has no forward
//! edge and is never produced by automatic advancement — it exists solely
//! for an external signal (see [`crate::Sequencer::fail`]).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::primitives::ACTIVE_STAGE_COUNT;
use crate::types::ApaxError;

// =============================================================================
// STAGE ENUM
// =============================================================================

/// One named step of the verification progression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationStage {
    /// Not started. First tick moves to `Scanning`.
    Idle,
    /// Document scan.
    Scanning,
    /// Biometric liveness check.
    Liveness,
    /// Match analysis.
    Analyzing,
    /// Terminal success state.
    Completed,
    /// Terminal failure state. Reachable only via an explicit external
    /// signal, never from automatic advancement.
    Failed,
}

impl VerificationStage {
    /// Get the human-readable stage label.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            VerificationStage::Idle => "Idle",
            VerificationStage::Scanning => "ID Scan",
            VerificationStage::Liveness => "Liveness",
            VerificationStage::Analyzing => "Analysis",
            VerificationStage::Completed => "Verified",
            VerificationStage::Failed => "Failed",
        }
    }

    /// Get the next stage along the fixed sequence, if any.
    ///
    /// `Completed` and `Failed` have no successor. `Failed` is not on the
    /// sequence at all; it is only entered by an external signal.
    #[must_use]
    pub fn next(&self) -> Option<VerificationStage> {
        match self {
            VerificationStage::Idle => Some(VerificationStage::Scanning),
            VerificationStage::Scanning => Some(VerificationStage::Liveness),
            VerificationStage::Liveness => Some(VerificationStage::Analyzing),
            VerificationStage::Analyzing => Some(VerificationStage::Completed),
            VerificationStage::Completed | VerificationStage::Failed => None,
        }
    }

    /// Check if this stage is terminal (`Completed` or `Failed`).
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            VerificationStage::Completed | VerificationStage::Failed
        )
    }

    /// Derived index into the active progression (`Scanning` = 0,
    /// `Liveness` = 1, `Analyzing` = 2). `None` for every other stage.
    #[must_use]
    pub fn sequence_position(&self) -> Option<usize> {
        match self {
            VerificationStage::Scanning => Some(0),
            VerificationStage::Liveness => Some(1),
            VerificationStage::Analyzing => Some(2),
            _ => None,
        }
    }

    /// Presentation step index used by the progress bar.
    ///
    /// `Failed` maps back to the liveness step: the reference UI renders a
    /// failed run as if it stalled at biometrics.
    #[must_use]
    pub fn step_index(&self) -> usize {
        match self {
            VerificationStage::Idle | VerificationStage::Scanning => 0,
            VerificationStage::Liveness | VerificationStage::Failed => 1,
            VerificationStage::Analyzing => 2,
            VerificationStage::Completed => 3,
        }
    }

    /// Progress-bar fill, in per-mille.
    ///
    /// Integer form of `(step + (idle ? 0 : 1)) / (stage_count + 1)`.
    /// `Idle` is 0‰, `Scanning` 250‰, `Completed` 1000‰.
    #[must_use]
    pub fn progress_per_mille(&self) -> u64 {
        let started = u64::from(!matches!(self, VerificationStage::Idle));
        let step = self.step_index() as u64;
        step.saturating_add(started)
            .saturating_mul(1000)
            .checked_div(ACTIVE_STAGE_COUNT as u64 + 1)
            .unwrap_or(0)
    }
}

impl fmt::Display for VerificationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

impl FromStr for VerificationStage {
    type Err = ApaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "idle" => Ok(VerificationStage::Idle),
            "scanning" => Ok(VerificationStage::Scanning),
            "liveness" => Ok(VerificationStage::Liveness),
            "analyzing" => Ok(VerificationStage::Analyzing),
            "completed" => Ok(VerificationStage::Completed),
            "failed" => Ok(VerificationStage::Failed),
            other => Err(ApaxError::UnknownStage(other.to_string())),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_runs_idle_to_completed() {
        let mut stage = VerificationStage::Idle;
        let mut seen = vec![stage];
        while let Some(next) = stage.next() {
            stage = next;
            seen.push(stage);
        }
        assert_eq!(
            seen,
            vec![
                VerificationStage::Idle,
                VerificationStage::Scanning,
                VerificationStage::Liveness,
                VerificationStage::Analyzing,
                VerificationStage::Completed,
            ]
        );
    }

    #[test]
    fn terminal_stages_have_no_successor() {
        assert_eq!(VerificationStage::Completed.next(), None);
        assert_eq!(VerificationStage::Failed.next(), None);
        assert!(VerificationStage::Completed.is_terminal());
        assert!(VerificationStage::Failed.is_terminal());
        assert!(!VerificationStage::Analyzing.is_terminal());
    }

    #[test]
    fn sequence_position_covers_active_stages_only() {
        assert_eq!(VerificationStage::Scanning.sequence_position(), Some(0));
        assert_eq!(VerificationStage::Liveness.sequence_position(), Some(1));
        assert_eq!(VerificationStage::Analyzing.sequence_position(), Some(2));
        assert_eq!(VerificationStage::Idle.sequence_position(), None);
        assert_eq!(VerificationStage::Completed.sequence_position(), None);
        assert_eq!(VerificationStage::Failed.sequence_position(), None);
    }

    #[test]
    fn failed_renders_at_liveness_step() {
        assert_eq!(VerificationStage::Failed.step_index(), 1);
    }

    #[test]
    fn progress_per_mille_values() {
        assert_eq!(VerificationStage::Idle.progress_per_mille(), 0);
        assert_eq!(VerificationStage::Scanning.progress_per_mille(), 250);
        assert_eq!(VerificationStage::Liveness.progress_per_mille(), 500);
        assert_eq!(VerificationStage::Analyzing.progress_per_mille(), 750);
        assert_eq!(VerificationStage::Completed.progress_per_mille(), 1000);
    }

    #[test]
    fn stage_parse_roundtrip() {
        for stage in [
            VerificationStage::Idle,
            VerificationStage::Scanning,
            VerificationStage::Liveness,
            VerificationStage::Analyzing,
            VerificationStage::Completed,
            VerificationStage::Failed,
        ] {
            let name = format!("{:?}", stage).to_ascii_lowercase();
            assert_eq!(name.parse::<VerificationStage>().expect("parse"), stage);
        }
    }
}
