use crate::EntryId;

/// Outcome of a suggestion request as seen by the core: the suggested label
/// (possibly missing or blank) or a failure description.
pub type SuggestionResult = Result<Option<String>, String>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the research objective.
    ObjectiveChanged(String),
    /// User edited the question text of a row.
    QuestionEdited { index: usize, text: String },
    /// User pressed Enter in a question box.
    QuestionSubmitted { index: usize },
    /// User clicked the suggest button of a row.
    SuggestionRequested { index: usize },
    /// Suggestion service finished for an entry.
    SuggestionResolved {
        entry_id: EntryId,
        generation: u64,
        result: SuggestionResult,
    },
    /// User focused the stage input of a row.
    StageInputFocused { index: usize },
    /// User typed into the stage input, or picked a label from the dropdown.
    StageEdited { index: usize, text: String },
    /// Stage input lost focus.
    StageConfirmed { index: usize },
    /// User clicked the edit marker on a confirmed stage.
    EditStageClicked { index: usize },
    /// User edited the "add new stage" input.
    NewStageChanged(String),
    /// User clicked Add next to the "add new stage" input.
    NewStageSubmitted,
    /// UI/render tick.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
