use std::future::Future;

use tracing::debug;

use crate::error::CaptureError;

/// Event delivered by a platform recognizer during one capture session.
#[derive(Debug, Clone, PartialEq)]
pub enum CaptureEvent {
    /// The single final transcript of this session (non-interim).
    Transcript(String),
    /// The session ended, naturally or after a cancel request.
    Ended,
    /// The session failed; terminal for this session.
    Failed(CaptureError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureState {
    Idle,
    Listening,
}

/// Terminal result of one capture session.
#[derive(Debug, Clone, PartialEq)]
pub enum CaptureOutcome {
    Transcript(String),
    /// The session ended without a transcript (silence or user cancel).
    Cancelled,
    Failed(CaptureError),
}

/// Platform seam. Implementations deliver at most one final transcript per
/// session, followed by an `Ended` event; `cancel` is a request, honored by
/// a later terminal event rather than synchronously.
pub trait Recognizer: Send {
    fn is_available(&self) -> bool;

    fn begin(&mut self) -> Result<(), CaptureError>;

    fn cancel(&mut self);

    fn next_event(&mut self) -> impl Future<Output = CaptureEvent> + Send;
}

/// Session state machine over a [`Recognizer`].
///
/// Cooperative and single-threaded: callers must not `start()` again before
/// the prior session's terminal event has been consumed via
/// [`SpeechCapture::next_outcome`].
pub struct SpeechCapture<R> {
    recognizer: R,
    state: CaptureState,
    transcript: Option<String>,
    error: Option<CaptureError>,
}

impl<R: Recognizer> SpeechCapture<R> {
    pub fn new(recognizer: R) -> Self {
        let error = (!recognizer.is_available()).then_some(CaptureError::NotSupported);
        Self {
            recognizer,
            state: CaptureState::Idle,
            transcript: None,
            error,
        }
    }

    pub fn is_supported(&self) -> bool {
        self.recognizer.is_available()
    }

    pub fn state(&self) -> CaptureState {
        self.state
    }

    pub fn transcript(&self) -> Option<&str> {
        self.transcript.as_deref()
    }

    pub fn error(&self) -> Option<&CaptureError> {
        self.error.as_ref()
    }

    /// Begin a capture session. Returns without effect when the capability
    /// is absent or a session is already listening; otherwise clears the
    /// previous transcript and error.
    pub fn start(&mut self) {
        if !self.recognizer.is_available() {
            debug!("speech capability absent, start ignored");
            return;
        }
        if self.state == CaptureState::Listening {
            debug!("already listening, start ignored");
            return;
        }

        self.transcript = None;
        self.error = None;

        match self.recognizer.begin() {
            Ok(()) => self.state = CaptureState::Listening,
            Err(e) => {
                debug!(error = %e, "recognizer refused to start");
                self.error = Some(e);
            }
        }
    }

    /// Request cancellation of the running session. The transition back to
    /// `Idle` happens when the recognizer's terminal event arrives.
    pub fn stop(&mut self) {
        if self.state == CaptureState::Listening {
            self.recognizer.cancel();
        }
    }

    /// Drive the running session to its terminal event.
    pub async fn next_outcome(&mut self) -> CaptureOutcome {
        if self.state != CaptureState::Listening {
            return match self.error.clone() {
                Some(e) => CaptureOutcome::Failed(e),
                None => CaptureOutcome::Cancelled,
            };
        }

        loop {
            match self.recognizer.next_event().await {
                CaptureEvent::Transcript(text) => {
                    debug!(%text, "final transcript");
                    self.transcript = Some(text);
                    // speech end is an implicit stop; wait for Ended
                }
                CaptureEvent::Ended => {
                    self.state = CaptureState::Idle;
                    return match self.transcript.clone() {
                        Some(text) => CaptureOutcome::Transcript(text),
                        None => CaptureOutcome::Cancelled,
                    };
                }
                CaptureEvent::Failed(e) => {
                    self.state = CaptureState::Idle;
                    self.error = Some(e.clone());
                    return CaptureOutcome::Failed(e);
                }
            }
        }
    }

    pub fn recognizer_mut(&mut self) -> &mut R {
        &mut self.recognizer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockRecognizer;

    #[tokio::test]
    async fn transcript_session_returns_to_idle() {
        let mut capture = SpeechCapture::new(MockRecognizer::speaking("add two milk"));
        capture.start();
        assert_eq!(capture.state(), CaptureState::Listening);

        let outcome = capture.next_outcome().await;
        assert_eq!(outcome, CaptureOutcome::Transcript("add two milk".into()));
        assert_eq!(capture.state(), CaptureState::Idle);
        assert_eq!(capture.transcript(), Some("add two milk"));
    }

    #[tokio::test]
    async fn start_while_listening_is_silent() {
        let mut capture = SpeechCapture::new(MockRecognizer::speaking("hello"));
        capture.start();
        capture.start();
        assert_eq!(capture.recognizer_mut().begin_count(), 1);
    }

    #[tokio::test]
    async fn unsupported_platform_degrades_without_panic() {
        let mut capture = SpeechCapture::new(MockRecognizer::unavailable());
        assert!(!capture.is_supported());
        assert_eq!(capture.error(), Some(&CaptureError::NotSupported));

        capture.start();
        assert_eq!(capture.state(), CaptureState::Idle);
        assert_eq!(
            capture.next_outcome().await,
            CaptureOutcome::Failed(CaptureError::NotSupported)
        );
    }

    #[tokio::test]
    async fn stop_requests_cancel_and_session_ends_without_transcript() {
        let mut capture = SpeechCapture::new(MockRecognizer::speaking("never delivered"));
        capture.start();
        capture.stop();
        // not synchronous: still listening until the terminal event
        assert_eq!(capture.state(), CaptureState::Listening);
        assert_eq!(capture.next_outcome().await, CaptureOutcome::Cancelled);
        assert_eq!(capture.state(), CaptureState::Idle);
    }

    #[tokio::test]
    async fn permission_denied_is_terminal_and_stored() {
        let mut capture =
            SpeechCapture::new(MockRecognizer::failing(CaptureError::PermissionDenied));
        capture.start();
        assert_eq!(
            capture.next_outcome().await,
            CaptureOutcome::Failed(CaptureError::PermissionDenied)
        );
        assert_eq!(capture.error(), Some(&CaptureError::PermissionDenied));
    }

    #[tokio::test]
    async fn restart_clears_previous_error_and_transcript() {
        let mut capture =
            SpeechCapture::new(MockRecognizer::failing(CaptureError::Other("mic".into())));
        capture.start();
        let _ = capture.next_outcome().await;
        assert!(capture.error().is_some());

        capture.recognizer_mut().enqueue_session("second try");
        capture.start();
        assert_eq!(capture.error(), None);
        assert_eq!(capture.transcript(), None);
        assert_eq!(
            capture.next_outcome().await,
            CaptureOutcome::Transcript("second try".into())
        );
    }

    #[tokio::test]
    async fn silence_ends_as_cancelled() {
        let mut capture = SpeechCapture::new(MockRecognizer::silent());
        capture.start();
        assert_eq!(capture.next_outcome().await, CaptureOutcome::Cancelled);
    }
}
