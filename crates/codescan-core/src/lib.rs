//! codescan-core: streaming consensus over noisy 6-digit readings.
//! Pure decision logic: the tally, the acceptance rule and the session lifecycle.
//! No IO, no async, no image handling.

pub mod consensus;
pub mod format;
pub mod session;
pub mod tally;
pub mod types;

pub use consensus::{ConsensusDecider, ConsensusPolicy, Evaluation, PolicyError, Reason};
pub use format::format_grouped;
pub use session::{Session, SessionId, SessionSummary};
pub use tally::{Tally, TallyEntry, TallySnapshot};
pub use types::{CODE_LEN, Candidate, CandidateError, Decision};
