//! Scripted recognizer for platforms without speech support and for tests.

use std::collections::VecDeque;

use crate::capture::{CaptureEvent, Recognizer};
use crate::error::CaptureError;

/// Plays back a scripted event sequence instead of listening to a
/// microphone. Ships in the crate (not test-gated) so drivers can run the
/// full pipeline on platforms with no speech capability.
pub struct MockRecognizer {
    available: bool,
    events: VecDeque<CaptureEvent>,
    begins: usize,
    cancels: usize,
}

impl MockRecognizer {
    /// A session that hears `text` and ends.
    pub fn speaking(text: impl Into<String>) -> Self {
        Self::with_events(vec![
            CaptureEvent::Transcript(text.into()),
            CaptureEvent::Ended,
        ])
    }

    /// A session that hears nothing.
    pub fn silent() -> Self {
        Self::with_events(vec![CaptureEvent::Ended])
    }

    /// A session that fails with `error`.
    pub fn failing(error: CaptureError) -> Self {
        Self::with_events(vec![CaptureEvent::Failed(error)])
    }

    /// A platform with no speech capability at all.
    pub fn unavailable() -> Self {
        Self {
            available: false,
            events: VecDeque::new(),
            begins: 0,
            cancels: 0,
        }
    }

    pub fn with_events(events: Vec<CaptureEvent>) -> Self {
        Self {
            available: true,
            events: events.into(),
            begins: 0,
            cancels: 0,
        }
    }

    /// Append a follow-up session to the script.
    pub fn enqueue_session(&mut self, text: impl Into<String>) {
        self.events.push_back(CaptureEvent::Transcript(text.into()));
        self.events.push_back(CaptureEvent::Ended);
    }

    pub fn begin_count(&self) -> usize {
        self.begins
    }

    pub fn cancel_count(&self) -> usize {
        self.cancels
    }
}

impl Recognizer for MockRecognizer {
    fn is_available(&self) -> bool {
        self.available
    }

    fn begin(&mut self) -> Result<(), CaptureError> {
        if !self.available {
            return Err(CaptureError::NotSupported);
        }
        self.begins += 1;
        Ok(())
    }

    fn cancel(&mut self) {
        self.cancels += 1;
        // drop whatever was scripted; the session ends without a transcript
        self.events.clear();
        self.events.push_back(CaptureEvent::Ended);
    }

    async fn next_event(&mut self) -> CaptureEvent {
        self.events.pop_front().unwrap_or(CaptureEvent::Ended)
    }
}
