//! `codescan decide`: offline replay of recorded recognizer output.
//! Each stdin line is one frame's raw text; stops at the first acceptance.

use std::io::BufRead;

use chrono::Utc;
use serde::Serialize;

use codescan_core::{Candidate, ConsensusDecider, ConsensusPolicy, Evaluation, Session};

#[derive(Debug, Serialize)]
pub struct ReplayReport {
    pub lines: u64,
    #[serde(flatten)]
    pub evaluation: Evaluation,
}

pub fn replay<R: BufRead>(input: R, policy: ConsensusPolicy) -> std::io::Result<ReplayReport> {
    let decider = ConsensusDecider::new(policy);
    let mut session = Session::new(Utc::now());
    let mut evaluation = decider.evaluate(&session.snapshot());
    let mut lines = 0;

    for line in input.lines() {
        let line = line?;
        lines += 1;
        evaluation = session.observe(Candidate::normalize(&line), &decider);
        if evaluation.decision.is_accepted() {
            break;
        }
    }

    Ok(ReplayReport { lines, evaluation })
}

/// Entry point for `codescan decide`. Returns the process exit code:
/// 0 when a code was accepted, 1 otherwise.
pub fn cmd_decide(policy: ConsensusPolicy, json: bool) -> anyhow::Result<i32> {
    let stdin = std::io::stdin();
    let report = replay(stdin.lock(), policy)?;

    if json {
        println!("{}", serde_json::to_string(&report)?);
    } else {
        match report.evaluation.decision.accepted() {
            Some(code) => println!("{}", code.grouped()),
            None => println!(
                "undecided after {} lines ({:?})",
                report.lines, report.evaluation.reason
            ),
        }
    }

    Ok(if report.evaluation.decision.is_accepted() { 0 } else { 1 })
}
