//! Recognition loop: frame source → recognizer → session → decider.
//! One recognition in flight at a time; the next frame is drawn only after
//! the previous recognition has completed or failed.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use codescan_core::{Candidate, ConsensusDecider, ConsensusPolicy, Decision, Evaluation, Session};
use codescan_core::session::SessionSummary;
use codescan_frame::{FrameError, FrameSource, RecognitionError, Recognizer, Region, RgbaImage, Surface};

use crate::sink::Sink;

/// Loop lifecycle. `Deciding` covers the post-recognition bookkeeping of a
/// single iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Idle,
    Running,
    Deciding,
    Accepted,
    Stopped,
}

#[derive(Debug, Clone)]
pub struct LoopConfig {
    pub policy: ConsensusPolicy,
    pub region: Region,
    pub canvas: (u32, u32),
    /// Pause between iterations (roughly one display refresh by default).
    pub frame_interval: Duration,
    /// Bound on a single recognition; expiry counts as a failed frame.
    pub recognize_timeout: Option<Duration>,
    /// Give up after this many frames without consensus.
    pub max_frames: Option<u64>,
    /// Write the marked surface here after each undecided frame.
    pub preview: Option<PathBuf>,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            policy: ConsensusPolicy::default(),
            region: Region::default(),
            canvas: codescan_frame::DEFAULT_CANVAS,
            frame_interval: Duration::from_millis(33),
            recognize_timeout: None,
            max_frames: None,
            preview: None,
        }
    }
}

/// An accepted code plus the session that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Accepted {
    pub code: Candidate,
    pub grouped: String,
    #[serde(flatten)]
    pub session: SessionSummary,
    pub accepted_at: DateTime<Utc>,
}

#[derive(Debug)]
pub enum StepOutcome {
    Continue(Evaluation),
    Accepted(Accepted),
}

/// How `run` ended. Cancelled and exhausted scans carry the summary of the
/// session they discarded.
#[derive(Debug)]
pub enum Outcome {
    Accepted(Accepted),
    Cancelled(SessionSummary),
    Exhausted(SessionSummary),
}

#[derive(Debug, thiserror::Error)]
pub enum LoopError {
    #[error("video source unavailable: {0}")]
    SourceUnavailable(#[from] FrameError),
}

pub struct RecognitionLoop<S, R> {
    source: S,
    recognizer: Arc<R>,
    surface: Surface,
    session: Session,
    decider: ConsensusDecider,
    config: LoopConfig,
    state: LoopState,
    /// Recognition abandoned by a timeout that may still be running.
    abandoned: Option<JoinHandle<Result<String, RecognitionError>>>,
}

impl<S, R> RecognitionLoop<S, R>
where
    S: FrameSource,
    R: Recognizer + 'static,
{
    pub fn new(source: S, recognizer: R, config: LoopConfig) -> Self {
        let (w, h) = config.canvas;
        Self {
            source,
            recognizer: Arc::new(recognizer),
            surface: Surface::new(w, h),
            session: Session::new(Utc::now()),
            decider: ConsensusDecider::new(config.policy),
            config,
            state: LoopState::Idle,
            abandoned: None,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    #[cfg(test)]
    pub fn session(&self) -> &Session {
        &self.session
    }

    #[cfg(test)]
    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    #[cfg(test)]
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Swap in a fresh video source after the previous one was released,
    /// so an accepted or stopped loop can `run` again.
    pub fn replace_source(&mut self, source: S) {
        self.source.release();
        self.source = source;
        self.state = LoopState::Idle;
    }

    /// One capture → recognize → record → decide iteration.
    pub async fn step(&mut self) -> Result<StepOutcome, LoopError> {
        self.state = LoopState::Running;

        if let Err(e) = self.source.draw(&mut self.surface) {
            let summary = self.stop().await;
            tracing::warn!(
                session = summary.session_id,
                frames = summary.frames,
                "frame source failed: {e}"
            );
            return Err(LoopError::SourceUnavailable(e));
        }

        let frame = self.surface.snapshot();
        let recognized = self.recognize(frame).await;
        self.state = LoopState::Deciding;

        let candidate = match recognized {
            Ok(text) => {
                tracing::debug!(raw = %text.trim(), "recognized");
                Candidate::normalize(&text)
            }
            Err(e) => {
                tracing::debug!("recognition failed, skipping frame: {e}");
                None
            }
        };

        let eval = self.session.observe(candidate, &self.decider);
        tracing::trace!(
            session = self.session.id(),
            frame = self.session.frames(),
            reason = ?eval.reason,
            leader = ?eval.leader,
            runner_up = eval.runner_up,
            "evaluated"
        );

        match eval.decision {
            Decision::Undecided => {
                self.surface.mark(self.config.region);
                self.write_preview();
                Ok(StepOutcome::Continue(eval))
            }
            Decision::Accepted(code) => {
                self.source.release();
                self.settle_abandoned().await;
                self.state = LoopState::Accepted;
                let accepted = Accepted {
                    grouped: code.grouped(),
                    code,
                    session: self.session.summary(),
                    accepted_at: Utc::now(),
                };
                tracing::info!(
                    session = accepted.session.session_id,
                    frames = accepted.session.frames,
                    reason = ?eval.reason,
                    "accepted {}",
                    accepted.grouped
                );
                Ok(StepOutcome::Accepted(accepted))
            }
        }
    }

    /// Drive `step` until acceptance, cancellation, frame budget exhaustion
    /// or source failure. The sink is called exactly once, on acceptance.
    ///
    /// A dropped stop sender is treated as cancellation.
    pub async fn run(
        &mut self,
        mut stop: watch::Receiver<bool>,
        sink: &mut dyn Sink,
    ) -> Result<Outcome, LoopError> {
        tracing::info!(
            session = self.session.id(),
            region = %self.config.region,
            "scan session started"
        );

        loop {
            if *stop.borrow() {
                return Ok(self.cancel().await);
            }
            if let Some(max) = self.config.max_frames
                && self.session.frames() >= max
            {
                let summary = self.stop().await;
                tracing::info!(
                    session = summary.session_id,
                    empty_frames = summary.empty_frames,
                    "no consensus after {max} frames"
                );
                return Ok(Outcome::Exhausted(summary));
            }

            if let StepOutcome::Accepted(accepted) = self.step().await? {
                sink.deliver(&accepted);
                self.session.restart(Utc::now());
                self.state = LoopState::Idle;
                return Ok(Outcome::Accepted(accepted));
            }

            tokio::select! {
                () = tokio::time::sleep(self.config.frame_interval) => {}
                changed = stop.changed() => {
                    if changed.is_err() || *stop.borrow() {
                        return Ok(self.cancel().await);
                    }
                }
            }
        }
    }

    async fn cancel(&mut self) -> Outcome {
        let summary = self.stop().await;
        tracing::info!(
            session = summary.session_id,
            frames = summary.frames,
            "scan cancelled"
        );
        Outcome::Cancelled(summary)
    }

    /// Release the source and end the session. The tally does not outlive
    /// an external stop; the returned summary is all that is kept.
    async fn stop(&mut self) -> SessionSummary {
        self.source.release();
        self.settle_abandoned().await;
        let summary = self.session.summary();
        self.session.restart(Utc::now());
        self.state = LoopState::Stopped;
        summary
    }

    /// Give a timed-out recognition one more timeout period to finish once
    /// the loop is ending; past that it is left to run out on its own.
    async fn settle_abandoned(&mut self) {
        let Some(mut pending) = self.abandoned.take() else {
            return;
        };
        let limit = self.config.recognize_timeout.unwrap_or_default();
        if tokio::time::timeout(limit, &mut pending).await.is_err() {
            tracing::warn!(
                timeout_ms = limit.as_millis() as u64,
                "abandoned recognition still running, detaching it"
            );
        }
    }

    async fn recognize(&mut self, frame: RgbaImage) -> Result<String, RecognitionError> {
        // A timed-out call still occupies the recognizer; wait for it
        // before submitting another so at most one runs at a time.
        if let Some(pending) = self.abandoned.take() {
            match self.config.recognize_timeout {
                Some(limit) => {
                    let mut pending = pending;
                    if tokio::time::timeout(limit, &mut pending).await.is_err() {
                        self.abandoned = Some(pending);
                        return Err(RecognitionError::Timeout(limit));
                    }
                }
                None => {
                    let _ = pending.await;
                }
            }
        }

        let recognizer = Arc::clone(&self.recognizer);
        let region = self.config.region;
        let mut task = tokio::task::spawn_blocking(move || recognizer.recognize(&frame, region));

        let joined = match self.config.recognize_timeout {
            Some(limit) => match tokio::time::timeout(limit, &mut task).await {
                Ok(joined) => joined,
                Err(_) => {
                    self.abandoned = Some(task);
                    return Err(RecognitionError::Timeout(limit));
                }
            },
            None => task.await,
        };

        joined.map_err(|e| RecognitionError::CommandFailed(format!("recognition task failed: {e}")))?
    }

    fn write_preview(&self) {
        if let Some(ref path) = self.config.preview
            && let Err(e) = self.surface.save_png(path)
        {
            tracing::debug!("preview write failed for {}: {e}", path.display());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use codescan_core::consensus::Reason;

    /// Fake video source: a fixed number of blank frames, then a failure.
    struct FakeSource {
        remaining: Option<usize>,
        draws: Arc<AtomicUsize>,
        releases: Arc<AtomicUsize>,
        live: bool,
    }

    impl FakeSource {
        fn unlimited() -> Self {
            Self {
                remaining: None,
                draws: Arc::new(AtomicUsize::new(0)),
                releases: Arc::new(AtomicUsize::new(0)),
                live: true,
            }
        }

        fn limited(frames: usize) -> Self {
            Self {
                remaining: Some(frames),
                ..Self::unlimited()
            }
        }
    }

    impl FrameSource for FakeSource {
        fn draw(&mut self, surface: &mut Surface) -> Result<(), FrameError> {
            if !self.live {
                return Err(FrameError::Released);
            }
            if let Some(ref mut n) = self.remaining {
                if *n == 0 {
                    return Err(FrameError::Exhausted);
                }
                *n -= 1;
            }
            self.draws.fetch_add(1, Ordering::SeqCst);
            let (w, h) = surface.dimensions();
            surface.draw(&RgbaImage::new(w, h));
            Ok(())
        }

        fn release(&mut self) {
            if self.live {
                self.releases.fetch_add(1, Ordering::SeqCst);
                self.live = false;
            }
        }

        fn is_live(&self) -> bool {
            self.live
        }
    }

    /// Fake recognizer: scripted responses, repeating the last one.
    struct ScriptedRecognizer {
        script: Mutex<VecDeque<Result<String, String>>>,
        last: Mutex<Result<String, String>>,
        in_flight: AtomicUsize,
        max_in_flight: AtomicUsize,
        delay: Duration,
    }

    impl ScriptedRecognizer {
        fn new(script: Vec<Result<&str, &str>>) -> Self {
            let script: VecDeque<Result<String, String>> = script
                .into_iter()
                .map(|r| r.map(str::to_string).map_err(str::to_string))
                .collect();
            Self {
                script: Mutex::new(script),
                last: Mutex::new(Ok(String::new())),
                in_flight: AtomicUsize::new(0),
                max_in_flight: AtomicUsize::new(0),
                delay: Duration::ZERO,
            }
        }

        fn always(text: &str) -> Self {
            Self::new(vec![Ok(text)])
        }

        fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = delay;
            self
        }
    }

    impl Recognizer for ScriptedRecognizer {
        fn recognize(&self, _image: &RgbaImage, _region: Region) -> Result<String, RecognitionError> {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(now, Ordering::SeqCst);
            if !self.delay.is_zero() {
                std::thread::sleep(self.delay);
            }
            let next = {
                let mut script = self.script.lock().unwrap();
                let mut last = self.last.lock().unwrap();
                if let Some(r) = script.pop_front() {
                    *last = r;
                }
                last.clone()
            };
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            next.map_err(RecognitionError::CommandFailed)
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        delivered: Vec<Accepted>,
    }

    impl Sink for RecordingSink {
        fn deliver(&mut self, accepted: &Accepted) {
            self.delivered.push(accepted.clone());
        }
    }

    fn fast_config() -> LoopConfig {
        LoopConfig {
            frame_interval: Duration::ZERO,
            canvas: (64, 48),
            region: Region::new(8, 8, 32, 16),
            ..LoopConfig::default()
        }
    }

    #[tokio::test]
    async fn converges_after_five_clean_reads() {
        let source = FakeSource::unlimited();
        let draws = Arc::clone(&source.draws);
        let releases = Arc::clone(&source.releases);
        let mut lp = RecognitionLoop::new(source, ScriptedRecognizer::always("123456"), fast_config());
        let (_tx, rx) = watch::channel(false);
        let mut sink = RecordingSink::default();

        let outcome = lp.run(rx, &mut sink).await.expect("no source failure");

        let Outcome::Accepted(acc) = outcome else {
            panic!("expected acceptance, got {outcome:?}");
        };
        assert_eq!(acc.code.as_str(), "123456");
        assert_eq!(acc.grouped, "123 456");
        assert_eq!(acc.session.frames, 5);
        assert_eq!(sink.delivered.len(), 1);
        assert_eq!(draws.load(Ordering::SeqCst), 5);
        assert_eq!(releases.load(Ordering::SeqCst), 1);
        assert!(!lp.source().is_live());
        assert_eq!(lp.state(), LoopState::Idle);
        assert!(lp.session().tally().is_empty());
        assert_eq!(lp.session().id(), 2);
    }

    #[tokio::test]
    async fn malformed_and_failed_frames_are_skipped() {
        let recognizer = ScriptedRecognizer::new(vec![
            Ok("Code: 12-34-56!"),
            Ok("1234"),
            Err("engine crashed"),
            Ok("123 456"),
            Ok(""),
            Ok("123456"),
            Err("timeout"),
            Ok("12345 6"),
            Ok("123456"),
        ]);
        let mut lp = RecognitionLoop::new(FakeSource::unlimited(), recognizer, fast_config());
        let (_tx, rx) = watch::channel(false);
        let mut sink = RecordingSink::default();

        let outcome = lp.run(rx, &mut sink).await.expect("no source failure");

        let Outcome::Accepted(acc) = outcome else {
            panic!("expected acceptance, got {outcome:?}");
        };
        assert_eq!(acc.code.as_str(), "123456");
        assert_eq!(acc.session.frames, 9);
        assert_eq!(acc.session.empty_frames, 4);
    }

    #[tokio::test]
    async fn step_marks_surface_while_undecided() {
        let mut lp = RecognitionLoop::new(
            FakeSource::unlimited(),
            ScriptedRecognizer::always("555555"),
            fast_config(),
        );

        let outcome = lp.step().await.expect("frame");
        let StepOutcome::Continue(eval) = outcome else {
            panic!("one read must not converge");
        };
        assert_eq!(eval.reason, Reason::BelowMinimum);
        assert_eq!(lp.state(), LoopState::Deciding);
        assert_eq!(lp.surface().marked(), Some(Region::new(8, 8, 32, 16)));
    }

    #[tokio::test]
    async fn source_failure_stops_loop() {
        let source = FakeSource::limited(3);
        let releases = Arc::clone(&source.releases);
        let mut lp = RecognitionLoop::new(source, ScriptedRecognizer::always("999999"), fast_config());
        let (_tx, rx) = watch::channel(false);
        let mut sink = RecordingSink::default();

        let err = lp.run(rx, &mut sink).await.expect_err("source runs dry");

        assert!(matches!(err, LoopError::SourceUnavailable(FrameError::Exhausted)));
        assert_eq!(lp.state(), LoopState::Stopped);
        assert_eq!(releases.load(Ordering::SeqCst), 1);
        assert!(sink.delivered.is_empty());
        assert_eq!(lp.session().frames(), 0);
        assert!(lp.session().tally().is_empty());
        assert_eq!(lp.session().id(), 2);
    }

    #[tokio::test]
    async fn cancellation_before_start_captures_nothing() {
        let source = FakeSource::unlimited();
        let draws = Arc::clone(&source.draws);
        let mut lp = RecognitionLoop::new(source, ScriptedRecognizer::always("123456"), fast_config());
        let (_tx, rx) = watch::channel(true);
        let mut sink = RecordingSink::default();

        let outcome = lp.run(rx, &mut sink).await.expect("cancel is not an error");

        assert!(matches!(outcome, Outcome::Cancelled(_)));
        assert_eq!(draws.load(Ordering::SeqCst), 0);
        assert_eq!(lp.state(), LoopState::Stopped);
        assert!(!lp.source().is_live());
    }

    #[tokio::test]
    async fn cancellation_between_frames() {
        let source = FakeSource::unlimited();
        let draws = Arc::clone(&source.draws);
        let config = LoopConfig {
            frame_interval: Duration::from_secs(60),
            ..fast_config()
        };
        let mut lp = RecognitionLoop::new(source, ScriptedRecognizer::always("123456"), config);
        let (tx, rx) = watch::channel(false);
        let mut sink = RecordingSink::default();

        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            let _ = tx.send(true);
        });
        let outcome = lp.run(rx, &mut sink).await.expect("cancel is not an error");

        assert!(matches!(outcome, Outcome::Cancelled(_)));
        assert_eq!(draws.load(Ordering::SeqCst), 1);
        assert!(sink.delivered.is_empty());
    }

    #[tokio::test]
    async fn cancellation_resets_tally() {
        let config = LoopConfig {
            frame_interval: Duration::from_secs(60),
            ..fast_config()
        };
        let mut lp = RecognitionLoop::new(
            FakeSource::unlimited(),
            ScriptedRecognizer::always("123456"),
            config,
        );
        let (tx, rx) = watch::channel(false);
        let mut sink = RecordingSink::default();

        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            let _ = tx.send(true);
        });
        let outcome = lp.run(rx, &mut sink).await.expect("cancel is not an error");

        let Outcome::Cancelled(summary) = outcome else {
            panic!("expected cancellation, got {outcome:?}");
        };
        assert_eq!(summary.session_id, 1);
        assert_eq!(summary.frames, 1);
        assert_eq!(lp.state(), LoopState::Stopped);
        assert!(lp.session().tally().is_empty());
        assert_eq!(lp.session().id(), 2);
    }

    #[tokio::test]
    async fn replaced_source_runs_next_session() {
        let mut lp = RecognitionLoop::new(
            FakeSource::unlimited(),
            ScriptedRecognizer::always("123456"),
            fast_config(),
        );
        let (_tx, rx) = watch::channel(false);
        let mut sink = RecordingSink::default();

        let first = lp.run(rx.clone(), &mut sink).await.expect("no source failure");
        assert!(matches!(first, Outcome::Accepted(_)));

        // The released source would fail the next draw.
        let fresh = FakeSource::unlimited();
        let draws = Arc::clone(&fresh.draws);
        lp.replace_source(fresh);
        assert_eq!(lp.state(), LoopState::Idle);

        let second = lp.run(rx, &mut sink).await.expect("fresh source draws");
        let Outcome::Accepted(acc) = second else {
            panic!("expected acceptance, got {second:?}");
        };
        assert_eq!(acc.session.session_id, 2);
        assert_eq!(acc.session.frames, 5);
        assert_eq!(draws.load(Ordering::SeqCst), 5);
        assert_eq!(sink.delivered.len(), 2);
    }

    #[tokio::test]
    async fn dropped_stop_sender_cancels() {
        let mut lp = RecognitionLoop::new(
            FakeSource::unlimited(),
            ScriptedRecognizer::always("1"),
            fast_config(),
        );
        let (tx, rx) = watch::channel(false);
        drop(tx);
        let mut sink = RecordingSink::default();

        let outcome = lp.run(rx, &mut sink).await.expect("cancel is not an error");
        assert!(matches!(outcome, Outcome::Cancelled(_)));
    }

    #[tokio::test]
    async fn frame_budget_exhausts() {
        let config = LoopConfig {
            max_frames: Some(7),
            ..fast_config()
        };
        let mut lp = RecognitionLoop::new(
            FakeSource::unlimited(),
            ScriptedRecognizer::always("no digits here"),
            config,
        );
        let (_tx, rx) = watch::channel(false);
        let mut sink = RecordingSink::default();

        let outcome = lp.run(rx, &mut sink).await.expect("no source failure");
        let Outcome::Exhausted(summary) = outcome else {
            panic!("expected exhaustion, got {outcome:?}");
        };
        assert_eq!(summary.frames, 7);
        assert_eq!(summary.empty_frames, 7);
        assert_eq!(lp.state(), LoopState::Stopped);
        assert_eq!(lp.session().frames(), 0);
    }

    #[tokio::test]
    async fn slow_recognizer_timeout_counts_as_empty_frame() {
        let config = LoopConfig {
            recognize_timeout: Some(Duration::from_millis(20)),
            ..fast_config()
        };
        let recognizer = ScriptedRecognizer::always("123456").with_delay(Duration::from_millis(200));
        let mut lp = RecognitionLoop::new(FakeSource::unlimited(), recognizer, config);

        let outcome = lp.step().await.expect("frame");
        assert!(matches!(outcome, StepOutcome::Continue(_)));
        assert_eq!(lp.session().empty_frames(), 1);

        // Previous call still running: this frame waits on it, not a new one.
        lp.step().await.expect("frame");
        assert!(lp.recognizer.max_in_flight.load(Ordering::SeqCst) <= 1);
    }

    #[tokio::test]
    async fn timed_out_recognition_settles_before_stop_returns() {
        let config = LoopConfig {
            recognize_timeout: Some(Duration::from_millis(100)),
            max_frames: Some(1),
            ..fast_config()
        };
        let recognizer = ScriptedRecognizer::always("123456").with_delay(Duration::from_millis(150));
        let mut lp = RecognitionLoop::new(FakeSource::unlimited(), recognizer, config);
        let (_tx, rx) = watch::channel(false);
        let mut sink = RecordingSink::default();

        let outcome = lp.run(rx, &mut sink).await.expect("no source failure");

        let Outcome::Exhausted(summary) = outcome else {
            panic!("expected exhaustion, got {outcome:?}");
        };
        assert_eq!(summary.empty_frames, 1);
        assert!(lp.abandoned.is_none());
        assert_eq!(lp.recognizer.in_flight.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn recognitions_never_overlap() {
        let recognizer = ScriptedRecognizer::always("123456").with_delay(Duration::from_millis(5));
        let mut lp = RecognitionLoop::new(FakeSource::unlimited(), recognizer, fast_config());
        let (_tx, rx) = watch::channel(false);
        let mut sink = RecordingSink::default();

        lp.run(rx, &mut sink).await.expect("no source failure");
        assert_eq!(lp.recognizer.max_in_flight.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn contested_reads_need_dominance() {
        // 111111 and 222222 alternate twenty times each, then 111111 pulls away.
        let mut script = Vec::new();
        for _ in 0..20 {
            script.push(Ok("111111"));
            script.push(Ok("222222"));
        }
        script.push(Ok("111111"));
        let mut lp = RecognitionLoop::new(
            FakeSource::unlimited(),
            ScriptedRecognizer::new(script),
            fast_config(),
        );
        let (_tx, rx) = watch::channel(false);
        let mut sink = RecordingSink::default();

        let outcome = lp.run(rx, &mut sink).await.expect("no source failure");
        let Outcome::Accepted(acc) = outcome else {
            panic!("expected acceptance, got {outcome:?}");
        };
        assert_eq!(acc.code.as_str(), "111111");
        // 40 alternating frames + 10 more to open a 10-frame lead.
        assert_eq!(acc.session.frames, 50);
    }
}
