use std::time::Duration;

use stage_tagger_core::{Effect, Msg, SuggestionRequest};
use stage_tagger_engine::{EngineEvent, EngineHandle, RequestTicket};
use tagger_logging::tagger_info;

/// Executes core effects against the engine and turns engine events back
/// into messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle) -> Self {
        Self { engine }
    }

    /// Runs `effects` and returns the row that should receive focus, if any.
    pub fn run(&self, effects: Vec<Effect>) -> Option<usize> {
        let mut focus = None;
        for effect in effects {
            match effect {
                Effect::RequestSuggestion {
                    entry_id,
                    generation,
                    request,
                } => {
                    tagger_info!(
                        "RequestSuggestion entry_id={} generation={} question_len={}",
                        entry_id,
                        generation,
                        request.question.len()
                    );
                    self.engine.suggest(
                        RequestTicket {
                            entry_id,
                            generation,
                        },
                        to_wire(request),
                    );
                }
                Effect::FocusStageInput { index } => {
                    focus = Some(index);
                }
            }
        }
        focus
    }

    /// Drains finished engine work without blocking.
    pub fn poll(&self) -> Vec<Msg> {
        std::iter::from_fn(|| self.engine.try_recv())
            .map(event_to_msg)
            .collect()
    }

    /// Waits up to `timeout` for the next finished request.
    pub fn wait(&self, timeout: Duration) -> Option<Msg> {
        self.engine.recv_timeout(timeout).map(event_to_msg)
    }
}

fn to_wire(request: SuggestionRequest) -> stage_tagger_engine::SuggestionRequest {
    stage_tagger_engine::SuggestionRequest {
        question: request.question,
        objective: request.objective,
        existing_journey_stages: request.existing_journey_stages,
    }
}

fn event_to_msg(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::SuggestionCompleted { ticket, result } => Msg::SuggestionResolved {
            entry_id: ticket.entry_id,
            generation: ticket.generation,
            result: result.map_err(|err| err.to_string()),
        },
    }
}
