//! Single-shot speech capture behind a platform seam.
//!
//! The platform's recognizer (browser speech API, OS speech framework) sits
//! behind the [`Recognizer`] trait; [`SpeechCapture`] layers the session
//! state machine on top: `Idle → Listening → {result | error} → Idle`, one
//! final transcript per session, speech end as an implicit stop.

mod capture;
mod error;
mod mock;

pub use capture::{CaptureEvent, CaptureOutcome, CaptureState, Recognizer, SpeechCapture};
pub use error::CaptureError;
pub use mock::MockRecognizer;
