use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use tagger_logging::{tagger_info, tagger_warn};
use thiserror::Error;

use crate::suggest::{ReqwestSuggester, SuggestSettings, Suggester};
use crate::{EngineEvent, RequestTicket, SuggestError, SuggestionRequest};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("suggestion client: {0}")]
    Client(#[from] SuggestError),
    #[error("async runtime: {0}")]
    Runtime(#[from] std::io::Error),
}

enum EngineCommand {
    Suggest {
        ticket: RequestTicket,
        request: SuggestionRequest,
    },
}

/// Runs suggestion requests on a background tokio runtime.
///
/// Requests are independent of each other; results arrive in completion
/// order through `try_recv` / `recv_timeout`.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: SuggestSettings) -> Result<Self, EngineError> {
        let suggester = ReqwestSuggester::new(settings)?;
        tagger_info!("Suggestion endpoint: {}", suggester.endpoint());
        Self::with_suggester(Arc::new(suggester))
    }

    pub fn with_suggester(suggester: Arc<dyn Suggester>) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let suggester = suggester.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(suggester.as_ref(), command, event_tx).await;
                });
            }
        });

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn suggest(&self, ticket: RequestTicket, request: SuggestionRequest) {
        let _ = self.cmd_tx.send(EngineCommand::Suggest { ticket, request });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

async fn handle_command(
    suggester: &dyn Suggester,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Suggest { ticket, request } => {
            let result = suggester.suggest(&request).await;
            if let Err(err) = &result {
                tagger_warn!(
                    "Suggestion for entry {} (generation {}) failed: {}",
                    ticket.entry_id,
                    ticket.generation,
                    err
                );
            }
            let _ = event_tx.send(EngineEvent::SuggestionCompleted { ticket, result });
        }
    }
}
