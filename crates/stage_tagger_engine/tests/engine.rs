use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use stage_tagger_engine::{
    EngineEvent, EngineHandle, FailureKind, RequestTicket, SuggestError, Suggester,
    SuggestionRequest,
};

/// Answers from a fixed table keyed by question; unknown questions fail.
struct TableSuggester {
    answers: HashMap<String, String>,
}

#[async_trait::async_trait]
impl Suggester for TableSuggester {
    async fn suggest(&self, request: &SuggestionRequest) -> Result<Option<String>, SuggestError> {
        match self.answers.get(&request.question) {
            Some(stage) => Ok(Some(stage.clone())),
            None => Err(SuggestError {
                kind: FailureKind::HttpStatus(404),
                message: "unknown question".to_string(),
            }),
        }
    }
}

fn request(question: &str) -> SuggestionRequest {
    SuggestionRequest {
        question: question.to_string(),
        objective: String::new(),
        existing_journey_stages: Vec::new(),
    }
}

fn collect(engine: &EngineHandle, count: usize) -> HashMap<RequestTicket, EngineEvent> {
    let mut events = HashMap::new();
    while events.len() < count {
        let event = engine
            .recv_timeout(Duration::from_secs(5))
            .expect("engine event before timeout");
        let EngineEvent::SuggestionCompleted { ticket, .. } = &event;
        events.insert(*ticket, event);
    }
    events
}

#[test]
fn engine_reports_each_request_with_its_ticket() {
    tagger_logging::initialize_for_tests();
    let suggester = TableSuggester {
        answers: HashMap::from([("Q1".to_string(), "Awareness".to_string())]),
    };
    let engine = EngineHandle::with_suggester(Arc::new(suggester)).expect("engine");

    let ok_ticket = RequestTicket {
        entry_id: 1,
        generation: 1,
    };
    let err_ticket = RequestTicket {
        entry_id: 2,
        generation: 3,
    };
    engine.suggest(ok_ticket, request("Q1"));
    engine.suggest(err_ticket, request("unknown"));

    let events = collect(&engine, 2);
    assert_eq!(
        events[&ok_ticket],
        EngineEvent::SuggestionCompleted {
            ticket: ok_ticket,
            result: Ok(Some("Awareness".to_string())),
        }
    );
    let EngineEvent::SuggestionCompleted { result, .. } = &events[&err_ticket];
    assert_eq!(
        result.as_ref().unwrap_err().kind,
        FailureKind::HttpStatus(404)
    );
    assert!(engine.try_recv().is_none());
}

#[test]
fn idle_engine_has_no_events() {
    let engine = EngineHandle::with_suggester(Arc::new(TableSuggester {
        answers: HashMap::new(),
    }))
    .expect("engine");
    assert!(engine.try_recv().is_none());
    assert!(engine.recv_timeout(Duration::from_millis(20)).is_none());
}
