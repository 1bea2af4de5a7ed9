use crate::{AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
///
/// After every message the trailing placeholder row is re-derived, so the
/// list always ends with a blank question.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::ObjectiveChanged(text) => {
            state.set_objective(text);
            Vec::new()
        }
        Msg::QuestionEdited { index, text } => {
            state.edit_question(index, text);
            Vec::new()
        }
        Msg::QuestionSubmitted { index } => {
            if state.can_submit(index) {
                request_suggestion(&mut state, index)
            } else {
                Vec::new()
            }
        }
        Msg::SuggestionRequested { index } => {
            if state.can_suggest(index) {
                request_suggestion(&mut state, index)
            } else {
                Vec::new()
            }
        }
        Msg::SuggestionResolved {
            entry_id,
            generation,
            result,
        } => {
            // Stale responses are dropped silently.
            state.resolve_suggestion(entry_id, generation, result);
            Vec::new()
        }
        Msg::StageInputFocused { index } => {
            state.open_dropdown(index);
            Vec::new()
        }
        Msg::StageEdited { index, text } => {
            state.set_stage_manually(index, text);
            Vec::new()
        }
        Msg::StageConfirmed { index } => {
            state.confirm_stage(index);
            Vec::new()
        }
        Msg::EditStageClicked { index } => {
            if state.enable_edit(index) {
                vec![Effect::FocusStageInput { index }]
            } else {
                Vec::new()
            }
        }
        Msg::NewStageChanged(text) => {
            state.set_new_stage_draft(text);
            Vec::new()
        }
        Msg::NewStageSubmitted => {
            state.submit_new_stage();
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    state.ensure_trailing_placeholder();
    (state, effects)
}

fn request_suggestion(state: &mut AppState, index: usize) -> Vec<Effect> {
    match state.begin_suggestion(index) {
        Some((entry_id, generation, request)) => vec![Effect::RequestSuggestion {
            entry_id,
            generation,
            request,
        }],
        None => Vec::new(),
    }
}
