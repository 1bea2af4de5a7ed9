//! Stage tagger engine: suggestion client and background effect execution.
mod engine;
mod suggest;
mod types;

pub use engine::{EngineError, EngineHandle};
pub use suggest::{ReqwestSuggester, SuggestSettings, Suggester, DEFAULT_ENDPOINT};
pub use types::{
    EngineEvent, EntryId, FailureKind, RequestTicket, SuggestError, SuggestionRequest,
};
