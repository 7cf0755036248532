//! Consensus rule: when is a noisy tally trustworthy enough to accept?
//!
//! - **Unanimous**: a single distinct candidate is accepted once seen
//!   `min_single` times.
//! - **Contested**: with two or more candidates the leader must reach
//!   `saturated` and lead the runner-up by at least `saturated / 2`.
//!   Two candidates both sitting exactly at `saturated` is treated as
//!   oscillation between two stable misreads and rejected.
//!
//! Equal counts rank in first-seen order (see [`TallySnapshot::ranked`]).

use serde::{Deserialize, Serialize};

use crate::tally::TallySnapshot;
use crate::types::{Candidate, Decision};

/// Default sightings required when no competitor exists.
pub const DEFAULT_MIN_SINGLE: u32 = 5;

/// Default absolute count a contested leader must reach.
pub const DEFAULT_SATURATED: u32 = 20;

// ─── Policy ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConsensusPolicy {
    pub min_single: u32,
    pub saturated: u32,
}

impl Default for ConsensusPolicy {
    fn default() -> Self {
        Self {
            min_single: DEFAULT_MIN_SINGLE,
            saturated: DEFAULT_SATURATED,
        }
    }
}

impl ConsensusPolicy {
    /// Minimum lead over the runner-up.
    pub fn margin(&self) -> u32 {
        self.saturated / 2
    }

    pub fn validate(&self) -> Result<(), PolicyError> {
        if self.min_single == 0 {
            return Err(PolicyError::ZeroMinSingle);
        }
        if self.saturated < 2 {
            return Err(PolicyError::SaturatedTooSmall(self.saturated));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PolicyError {
    #[error("min_single must be at least 1")]
    ZeroMinSingle,

    #[error("saturated must be at least 2, got {0}")]
    SaturatedTooSmall(u32),
}

// ─── Evaluation ───────────────────────────────────────────────────

/// Why the decider reached its decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reason {
    /// Tally is empty.
    NoEvidence,
    /// Lone candidate, not yet seen `min_single` times.
    BelowMinimum,
    /// Top two both sit exactly at `saturated`.
    BothSaturated,
    /// Leader has not reached `saturated`.
    BelowSaturation,
    /// Leader's margin over the runner-up is under `saturated / 2`.
    CloseRace,
    /// Lone candidate confirmed.
    Unanimous,
    /// Leader cleared both absolute and relative thresholds.
    Dominant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    pub decision: Decision,
    pub reason: Reason,
    /// Leading candidate and its count, if any.
    pub leader: Option<(Candidate, u32)>,
    /// Runner-up count (0 when uncontested).
    pub runner_up: u32,
}

impl Evaluation {
    fn undecided(reason: Reason, leader: Option<(Candidate, u32)>, runner_up: u32) -> Self {
        Self {
            decision: Decision::Undecided,
            reason,
            leader,
            runner_up,
        }
    }
}

// ─── Decider ──────────────────────────────────────────────────────

/// Pure decision function over tally snapshots.
#[derive(Debug, Clone, Default)]
pub struct ConsensusDecider {
    policy: ConsensusPolicy,
}

impl ConsensusDecider {
    pub fn new(policy: ConsensusPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &ConsensusPolicy {
        &self.policy
    }

    pub fn decide(&self, snapshot: &TallySnapshot) -> Decision {
        self.evaluate(snapshot).decision
    }

    pub fn evaluate(&self, snapshot: &TallySnapshot) -> Evaluation {
        let ranked = snapshot.ranked();
        let Some(top) = ranked.first() else {
            return Evaluation::undecided(Reason::NoEvidence, None, 0);
        };
        let leader = Some((top.candidate.clone(), top.count));

        let Some(second) = ranked.get(1) else {
            if top.count >= self.policy.min_single {
                return Evaluation {
                    decision: Decision::Accepted(top.candidate.clone()),
                    reason: Reason::Unanimous,
                    leader,
                    runner_up: 0,
                };
            }
            return Evaluation::undecided(Reason::BelowMinimum, leader, 0);
        };

        let saturated = self.policy.saturated;
        if top.count == saturated && second.count == saturated {
            return Evaluation::undecided(Reason::BothSaturated, leader, second.count);
        }
        if top.count < saturated {
            return Evaluation::undecided(Reason::BelowSaturation, leader, second.count);
        }
        if top.count - second.count < self.policy.margin() {
            return Evaluation::undecided(Reason::CloseRace, leader, second.count);
        }

        Evaluation {
            decision: Decision::Accepted(top.candidate.clone()),
            reason: Reason::Dominant,
            leader,
            runner_up: second.count,
        }
    }
}
