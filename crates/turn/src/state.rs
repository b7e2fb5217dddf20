use vc_shop_api::ParsedIntent;

/// Observable phase of the turn machine.
///
/// `Confirming` is entered when a parse produced more than one candidate and
/// the user must disambiguate; a single or empty match list goes straight to
/// `Parsed`. Both accept `confirm_action`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum TurnPhase {
    Idle,
    Listening,
    Transcribed,
    Parsing,
    Parsed,
    Confirming,
    Applying,
    Applied,
    Errored,
}

/// Everything the view layer needs to draw one frame of the voice UI.
#[derive(Debug, Clone)]
pub struct TurnSnapshot {
    pub phase: TurnPhase,
    pub recognized: Option<String>,
    pub result: Option<ParsedIntent>,
    pub error: Option<String>,
    pub applied: bool,
}

impl TurnSnapshot {
    pub fn is_loading(&self) -> bool {
        matches!(self.phase, TurnPhase::Parsing | TurnPhase::Applying)
    }
}
