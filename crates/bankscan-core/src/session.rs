//! Upload session state machine
//!
//! Tracks a single statement through the extraction cycle. Every `begin()`
//! issues a fresh monotonic request token, and `complete()` only applies a
//! completion that carries the latest token, so the response of a superseded
//! upload can never overwrite the one that replaced it.

use tracing::{debug, warn};

use crate::error::Result;
use crate::models::ExtractionResult;

/// The user-facing message for any failed extraction. Transport errors and
/// malformed responses collapse into this one line; detail goes to the log.
pub const EXTRACTION_FAILED_MESSAGE: &str =
    "Failed to process the statement. Please ensure it's a clear image or text-based PDF.";

/// Phase of an upload session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    /// No statement processed yet
    #[default]
    Idle,
    /// Extraction request in flight
    Loading,
    /// Extraction completed, result available
    Success,
    /// Extraction failed, generic message set
    Failed,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Loading => "loading",
            Phase::Success => "success",
            Phase::Failed => "failed",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Token identifying one extraction request within a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken(u64);

/// State for one statement-upload flow
#[derive(Debug, Default)]
pub struct UploadSession {
    phase: Phase,
    latest: u64,
    result: Option<ExtractionResult>,
    error: Option<&'static str>,
}

impl UploadSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new extraction attempt.
    ///
    /// Clears any previous result and error, moves to Loading, and returns
    /// the token the eventual completion must present. Beginning again while
    /// Loading supersedes the outstanding token; the old request is not
    /// cancelled, its completion is simply discarded.
    pub fn begin(&mut self) -> RequestToken {
        self.latest += 1;
        self.phase = Phase::Loading;
        self.result = None;
        self.error = None;
        RequestToken(self.latest)
    }

    /// Apply the outcome of an extraction attempt.
    ///
    /// Returns false (leaving the session untouched) when `token` is not the
    /// latest one issued. Otherwise Ok stores the result and moves to
    /// Success; Err clears the result and moves to Failed with the generic
    /// message, so a stale table can never be shown next to an error.
    pub fn complete(&mut self, token: RequestToken, outcome: Result<ExtractionResult>) -> bool {
        if token.0 != self.latest {
            debug!(
                token = token.0,
                latest = self.latest,
                "Discarding stale extraction completion"
            );
            return false;
        }

        match outcome {
            Ok(result) => {
                self.phase = Phase::Success;
                self.result = Some(result);
                self.error = None;
            }
            Err(err) => {
                warn!("Extraction failed: {}", err);
                self.phase = Phase::Failed;
                self.result = None;
                self.error = Some(EXTRACTION_FAILED_MESSAGE);
            }
        }
        true
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }

    pub fn result(&self) -> Option<&ExtractionResult> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&'static str> {
        self.error
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::extract::MockBackend;

    fn boom(detail: &str) -> Error {
        Error::Extraction(detail.to_string())
    }

    #[test]
    fn test_phase_display() {
        assert_eq!(Phase::Idle.as_str(), "idle");
        assert_eq!(Phase::Loading.to_string(), "loading");
        assert_eq!(Phase::Success.as_str(), "success");
        assert_eq!(Phase::Failed.as_str(), "failed");
    }

    #[test]
    fn test_new_session_is_idle() {
        let session = UploadSession::new();
        assert_eq!(session.phase(), Phase::Idle);
        assert!(!session.is_loading());
        assert!(session.result().is_none());
        assert!(session.error().is_none());
    }

    #[test]
    fn test_begin_moves_to_loading() {
        let mut session = UploadSession::new();
        session.begin();
        assert_eq!(session.phase(), Phase::Loading);
        assert!(session.is_loading());
    }

    #[test]
    fn test_tokens_are_monotonic() {
        let mut session = UploadSession::new();
        let first = session.begin();
        let second = session.begin();
        assert_ne!(first, second);
    }

    #[test]
    fn test_complete_success_stores_result() {
        let mut session = UploadSession::new();
        let token = session.begin();
        let applied = session.complete(token, Ok(MockBackend::canned_result()));
        assert!(applied);
        assert_eq!(session.phase(), Phase::Success);
        assert_eq!(session.result().unwrap().transactions.len(), 2);
        assert!(session.error().is_none());
    }

    #[test]
    fn test_complete_failure_sets_generic_message() {
        let mut session = UploadSession::new();
        let token = session.begin();
        let applied = session.complete(token, Err(boom("service exploded")));
        assert!(applied);
        assert_eq!(session.phase(), Phase::Failed);
        assert_eq!(session.error(), Some(EXTRACTION_FAILED_MESSAGE));
        // No stale table next to the error
        assert!(session.result().is_none());
    }

    #[test]
    fn test_stale_completion_is_discarded() {
        let mut session = UploadSession::new();
        let stale = session.begin();
        let current = session.begin();

        let applied = session.complete(stale, Ok(MockBackend::canned_result()));
        assert!(!applied);
        assert_eq!(session.phase(), Phase::Loading);
        assert!(session.result().is_none());

        let applied = session.complete(current, Ok(MockBackend::canned_result()));
        assert!(applied);
        assert_eq!(session.phase(), Phase::Success);
    }

    #[test]
    fn test_stale_failure_does_not_clobber_success() {
        let mut session = UploadSession::new();
        let stale = session.begin();
        let current = session.begin();

        assert!(session.complete(current, Ok(MockBackend::canned_result())));
        assert!(!session.complete(stale, Err(boom("late timeout"))));

        assert_eq!(session.phase(), Phase::Success);
        assert!(session.result().is_some());
        assert!(session.error().is_none());
    }

    #[test]
    fn test_begin_after_failure_clears_error() {
        let mut session = UploadSession::new();
        let token = session.begin();
        session.complete(token, Err(boom("bad upload")));
        assert_eq!(session.phase(), Phase::Failed);

        session.begin();
        assert_eq!(session.phase(), Phase::Loading);
        assert!(session.error().is_none());
        assert!(session.result().is_none());
    }
}
