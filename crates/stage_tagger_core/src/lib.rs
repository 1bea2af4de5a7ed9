//! Stage tagger core: pure question-list state machine and view-model helpers.
mod effect;
mod msg;
mod stage_set;
mod state;
mod update;
mod view_model;

pub use effect::{Effect, SuggestionRequest};
pub use msg::{Msg, SuggestionResult};
pub use stage_set::StageSet;
pub use state::{AppState, EntryId, QuestionEntry, StageSource, MANUAL_ENTRY_ERROR};
pub use update::update;
pub use view_model::{AppViewModel, QuestionRowView, StageControl};
