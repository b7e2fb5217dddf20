//! The voice-turn state machine.
//!
//! One turn: capture → transliterate → parse → (confirm) → apply →
//! reconcile. Steps are strictly sequential; exactly one turn is in flight
//! at a time (the view disables the trigger while one runs). Every failure
//! is absorbed into the `Errored` phase with a human-readable message; the
//! view observes a [`TurnSnapshot`], never an error stack.

mod notify;
mod processor;
mod state;

pub use notify::{Notify, Silent};
pub use processor::{APPLIED_CLEAR_DELAY, CommandProcessor};
pub use state::{TurnPhase, TurnSnapshot};
