//! Session: the scope of one convergence attempt.
//!
//! Owns the tally and the frame counters. Created when the loop starts,
//! reset on acceptance so a restarted loop never inherits stale counts.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::consensus::{ConsensusDecider, Evaluation};
use crate::tally::{Tally, TallySnapshot};
use crate::types::{Candidate, Decision};

/// Monotonic per-process session number.
pub type SessionId = u64;

#[derive(Debug)]
pub struct Session {
    id: SessionId,
    started_at: DateTime<Utc>,
    tally: Tally,
    frames: u64,
    empty_frames: u64,
}

/// Summary of a finished session, handed to sinks and logs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSummary {
    pub session_id: SessionId,
    pub started_at: DateTime<Utc>,
    pub frames: u64,
    pub empty_frames: u64,
}

impl Session {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self::with_id(1, now)
    }

    fn with_id(id: SessionId, now: DateTime<Utc>) -> Self {
        Self {
            id,
            started_at: now,
            tally: Tally::new(),
            frames: 0,
            empty_frames: 0,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn tally(&self) -> &Tally {
        &self.tally
    }

    pub fn snapshot(&self) -> TallySnapshot {
        self.tally.snapshot()
    }

    /// Frames observed in this session, with or without a candidate.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Frames that produced no candidate (malformed text or recognizer failure).
    pub fn empty_frames(&self) -> u64 {
        self.empty_frames
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            session_id: self.id,
            started_at: self.started_at,
            frames: self.frames,
            empty_frames: self.empty_frames,
        }
    }

    /// Record one frame's result and run the decider.
    ///
    /// On acceptance the tally is cleared before returning; the caller is
    /// expected to [`restart`](Self::restart) before sampling again.
    pub fn observe(&mut self, candidate: Option<Candidate>, decider: &ConsensusDecider) -> Evaluation {
        self.frames += 1;
        match candidate {
            Some(c) => {
                self.tally.record(c);
            }
            None => self.empty_frames += 1,
        }

        let eval = decider.evaluate(&self.tally.snapshot());
        if let Decision::Accepted(_) = eval.decision {
            self.tally.clear();
        }
        eval
    }

    /// Begin the next session with a fresh id and empty tally.
    pub fn restart(&mut self, now: DateTime<Utc>) {
        *self = Self::with_id(self.id + 1, now);
    }
}
