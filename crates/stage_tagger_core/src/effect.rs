use crate::EntryId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Ask the suggestion service for a stage. The response must come back as
    /// `Msg::SuggestionResolved` carrying the same `entry_id` and `generation`.
    RequestSuggestion {
        entry_id: EntryId,
        generation: u64,
        request: SuggestionRequest,
    },
    /// Move keyboard focus to the row's stage input on the next render pass.
    FocusStageInput { index: usize },
}

/// Everything the suggestion service needs to propose a stage for one question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionRequest {
    pub question: String,
    pub objective: String,
    /// Non-empty stages of every other entry, in list order.
    pub existing_journey_stages: Vec<String>,
}
