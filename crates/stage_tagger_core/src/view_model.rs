use crate::{AppState, EntryId, StageSource};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub objective: String,
    pub rows: Vec<QuestionRowView>,
    /// All known stages, in display order.
    pub stages: Vec<String>,
    pub new_stage_draft: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionRowView {
    pub index: usize,
    pub entry_id: EntryId,
    pub question: String,
    pub control: StageControl,
    pub error: Option<String>,
}

/// What the stage column of a row shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageControl {
    /// Accepted stage with an edit marker.
    Confirmed {
        stage: String,
        source: Option<StageSource>,
    },
    /// Editable stage input. `dropdown` lists the known stages when the
    /// dropdown is open and there is something to pick.
    Input {
        stage: String,
        disabled: bool,
        dropdown: Option<Vec<String>>,
    },
    /// Button asking for a suggestion.
    Suggest,
    Loading,
    Hidden,
}

impl AppState {
    pub fn view(&self) -> AppViewModel {
        let stages = self.stages().to_vec();
        let rows = self
            .entries()
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                let control = if entry.confirmed {
                    StageControl::Confirmed {
                        stage: entry.stage.clone(),
                        source: entry.source,
                    }
                } else if entry.error.is_some() || entry.manually_editing {
                    let dropdown = (self.dropdown_open() == Some(index) && !stages.is_empty())
                        .then(|| stages.clone());
                    StageControl::Input {
                        stage: entry.stage.clone(),
                        disabled: entry.disabled,
                        dropdown,
                    }
                } else if !entry.loading && !entry.is_blank() {
                    StageControl::Suggest
                } else if entry.loading {
                    StageControl::Loading
                } else {
                    StageControl::Hidden
                };

                QuestionRowView {
                    index,
                    entry_id: entry.id,
                    question: entry.question.clone(),
                    control,
                    error: entry.error.clone(),
                }
            })
            .collect();

        AppViewModel {
            objective: self.objective().to_owned(),
            rows,
            stages,
            new_stage_draft: self.new_stage_draft().to_owned(),
        }
    }
}
