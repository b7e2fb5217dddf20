use std::time::Duration;

use tracing::{debug, warn};
use uuid::Uuid;
use vc_basket::Reconciler;
use vc_http::HttpClient;
use vc_listen::{CaptureOutcome, Recognizer, SpeechCapture};
use vc_shop_api::{ApplyRequest, ParsedIntent, ProductMatch, VoiceApi};

use crate::notify::Notify;
use crate::state::{TurnPhase, TurnSnapshot};

/// How long an applied result stays visible before the machine returns to
/// `Idle`. A UX debounce, freely tunable; the driver owns the timer and
/// calls [`CommandProcessor::finish_turn`] when it elapses.
pub const APPLIED_CLEAR_DELAY: Duration = Duration::from_millis(800);

/// Orchestrates one voice turn end to end and owns its observable state.
///
/// The reconciler target is whichever container the surrounding page wired
/// in: the ephemeral list on home/search flows. The cart page syncs with
/// the backend directly and never goes through here. The target is only ever
/// invoked with ops classified from a successful apply response, never
/// speculatively.
pub struct CommandProcessor<R, C, T, N> {
    capture: SpeechCapture<R>,
    voice: VoiceApi<C>,
    target: T,
    notify: N,
    phase: TurnPhase,
    turn_id: Uuid,
    recognized: Option<String>,
    last_raw: Option<String>,
    result: Option<ParsedIntent>,
    error: Option<String>,
    applied: Option<serde_json::Value>,
}

impl<R, C, T, N> CommandProcessor<R, C, T, N>
where
    R: Recognizer,
    C: HttpClient,
    T: Reconciler,
    N: Notify,
{
    pub fn new(capture: SpeechCapture<R>, voice: VoiceApi<C>, target: T, notify: N) -> Self {
        Self {
            capture,
            voice,
            target,
            notify,
            phase: TurnPhase::Idle,
            turn_id: Uuid::nil(),
            recognized: None,
            last_raw: None,
            result: None,
            error: None,
            applied: None,
        }
    }

    pub fn snapshot(&self) -> TurnSnapshot {
        TurnSnapshot {
            phase: self.phase,
            recognized: self.recognized.clone(),
            result: self.result.clone(),
            error: self.error.clone(),
            applied: self.applied.is_some(),
        }
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    /// The container this processor reconciles into. Reads are snapshots;
    /// only the reconciler mutates during a turn.
    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn target_mut(&mut self) -> &mut T {
        &mut self.target
    }

    /// The transcript exactly as the recognizer delivered it, before
    /// transliteration. Kept for display and debugging.
    pub fn last_raw(&self) -> Option<&str> {
        self.last_raw.as_deref()
    }

    /// Begin a new turn: clear the previous turn's text, result, and error,
    /// then start capture.
    pub fn start_listening(&mut self) {
        self.recognized = None;
        self.result = None;
        self.error = None;
        self.applied = None;
        self.turn_id = Uuid::new_v4();

        if !self.capture.is_supported() {
            let message = vc_listen::CaptureError::NotSupported.to_string();
            self.fail(message);
            return;
        }

        self.capture.start();
        if let Some(e) = self.capture.error() {
            let message = e.to_string();
            self.fail(message);
            return;
        }

        debug!(turn = %self.turn_id, "listening");
        self.phase = TurnPhase::Listening;
    }

    /// Cancel the capture phase only. State is not cleared here: a
    /// user-cancel must stay distinguishable from natural completion. Once
    /// parse or apply is in flight there is nothing to cancel; the turn runs
    /// to completion or failure.
    pub fn stop_listening(&mut self) {
        self.capture.stop();
    }

    /// Drive the capture session to its terminal event and, when it yields a
    /// transcript, run translate → parse.
    pub async fn run_capture(&mut self) {
        if self.phase != TurnPhase::Listening {
            return;
        }

        match self.capture.next_outcome().await {
            CaptureOutcome::Transcript(text) => {
                debug!(turn = %self.turn_id, %text, "transcribed");
                self.recognized = Some(text.clone());
                self.last_raw = Some(text.clone());
                self.phase = TurnPhase::Transcribed;
                self.process_speech(&text).await;
            }
            CaptureOutcome::Cancelled => {
                debug!(turn = %self.turn_id, "capture ended without transcript");
                self.phase = TurnPhase::Idle;
            }
            CaptureOutcome::Failed(e) => {
                let message = e.to_string();
                self.fail(message);
            }
        }
    }

    async fn process_speech(&mut self, text: &str) {
        self.phase = TurnPhase::Parsing;

        let normalized = vc_language::detect_and_normalize(text);
        debug!(
            turn = %self.turn_id,
            lang = %normalized.detected_lang,
            text = %normalized.text,
            "normalized"
        );

        match self.voice.parse(&normalized.text).await {
            Ok(parsed) => {
                self.phase = if parsed.matches.len() > 1 {
                    TurnPhase::Confirming
                } else {
                    TurnPhase::Parsed
                };
                self.result = Some(parsed);
            }
            Err(e) => self.fail(e.to_string()),
        }
    }

    /// Apply the parsed (or caller-supplied) intent. With a chosen match the
    /// request carries only that candidate; otherwise the full normalized
    /// list. On success the response is classified and dispatched into the
    /// target in order; on failure the target is left untouched.
    pub async fn confirm_action(
        &mut self,
        payload: Option<ParsedIntent>,
        chosen: Option<&ProductMatch>,
    ) {
        let Some(body) = payload.or_else(|| self.result.clone()) else {
            self.fail("Nothing to apply".to_string());
            return;
        };

        self.phase = TurnPhase::Applying;
        self.error = None;

        let request = ApplyRequest::new(&body, chosen);
        match self.voice.apply(&request).await {
            Ok(raw) => {
                debug!(turn = %self.turn_id, response = %raw, "applied");
                self.target.apply_response(&raw);
                self.applied = Some(raw);
                self.phase = TurnPhase::Applied;
                self.notify.notify("Action applied");
            }
            Err(e) => self.fail(format!("Action failed: {e}")),
        }
    }

    /// Clear the applied result and return to `Idle`, ready for the next
    /// turn. Called by the driver after [`APPLIED_CLEAR_DELAY`].
    pub fn finish_turn(&mut self) {
        self.result = None;
        self.applied = None;
        if self.phase == TurnPhase::Applied {
            self.phase = TurnPhase::Idle;
        }
    }

    fn fail(&mut self, message: String) {
        warn!(turn = %self.turn_id, %message, "turn failed");
        self.notify.notify(&message);
        self.error = Some(message);
        self.phase = TurnPhase::Errored;
    }
}
