use crate::effect::SuggestionRequest;
use crate::msg::SuggestionResult;
use crate::StageSet;

pub type EntryId = u64;

/// Inline message shown whenever a stage has to be typed in by hand.
pub const MANUAL_ENTRY_ERROR: &str = "Enter stage manually.";

/// Who produced the current stage of an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageSource {
    Suggested,
    Manual,
}

/// One row of the question list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionEntry {
    pub id: EntryId,
    pub question: String,
    /// Empty string means unset.
    pub stage: String,
    pub confirmed: bool,
    /// A suggestion request is in flight.
    pub loading: bool,
    pub error: Option<String>,
    /// Stage input is locked.
    pub disabled: bool,
    pub manually_editing: bool,
    pub source: Option<StageSource>,
    generation: u64,
}

impl QuestionEntry {
    fn blank(id: EntryId) -> Self {
        Self {
            id,
            question: String::new(),
            stage: String::new(),
            confirmed: false,
            loading: false,
            error: None,
            disabled: true,
            manually_editing: false,
            source: None,
            generation: 0,
        }
    }

    /// Counter of suggestion requests issued for this entry; responses
    /// tagged with an older value are stale.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_blank(&self) -> bool {
        self.question.trim().is_empty()
    }

    fn cancel_pending_suggestion(&mut self) {
        if self.loading {
            self.generation += 1;
            self.loading = false;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    objective: String,
    entries: Vec<QuestionEntry>,
    stages: StageSet,
    dropdown_open: Option<usize>,
    new_stage_draft: String,
    next_id: EntryId,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            objective: String::new(),
            entries: vec![QuestionEntry::blank(1)],
            stages: StageSet::new(),
            dropdown_open: None,
            new_stage_draft: String::new(),
            next_id: 2,
            dirty: false,
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn objective(&self) -> &str {
        &self.objective
    }

    pub fn entries(&self) -> &[QuestionEntry] {
        &self.entries
    }

    pub fn entry(&self, index: usize) -> Option<&QuestionEntry> {
        self.entries.get(index)
    }

    pub fn stages(&self) -> &StageSet {
        &self.stages
    }

    /// Row whose stage dropdown is open, if any.
    pub fn dropdown_open(&self) -> Option<usize> {
        self.dropdown_open
    }

    pub fn new_stage_draft(&self) -> &str {
        &self.new_stage_draft
    }

    /// Returns whether anything changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_objective(&mut self, text: String) {
        if self.objective != text {
            self.objective = text;
            self.mark_dirty();
        }
    }

    pub(crate) fn edit_question(&mut self, index: usize, text: String) -> bool {
        let Some(entry) = self.entries.get_mut(index) else {
            return false;
        };
        entry.cancel_pending_suggestion();
        entry.question = text;
        entry.stage.clear();
        entry.confirmed = false;
        entry.disabled = true;
        entry.error = None;
        entry.manually_editing = false;
        entry.source = None;
        self.mark_dirty();
        true
    }

    /// Manual stage edit. The previous label is dropped from the stage set
    /// without checking whether other entries still hold it.
    pub(crate) fn set_stage_manually(&mut self, index: usize, text: String) -> bool {
        let Some(entry) = self.entries.get_mut(index) else {
            return false;
        };
        entry.cancel_pending_suggestion();
        let previous = std::mem::replace(&mut entry.stage, text);
        entry.confirmed = false;
        entry.manually_editing = true;
        entry.error = None;
        entry.source = Some(StageSource::Manual);
        if previous != entry.stage {
            self.stages.remove(&previous);
        }
        self.mark_dirty();
        true
    }

    pub(crate) fn confirm_stage(&mut self, index: usize) -> bool {
        let Some(entry) = self.entries.get_mut(index) else {
            return false;
        };
        if entry.stage.trim().is_empty() {
            entry.error = Some(MANUAL_ENTRY_ERROR.to_owned());
        } else {
            entry.confirmed = true;
            self.stages.insert(&entry.stage);
        }
        self.dropdown_open = None;
        self.mark_dirty();
        true
    }

    pub(crate) fn enable_edit(&mut self, index: usize) -> bool {
        let Some(entry) = self.entries.get_mut(index) else {
            return false;
        };
        entry.cancel_pending_suggestion();
        entry.confirmed = false;
        entry.manually_editing = true;
        entry.disabled = false;
        self.mark_dirty();
        true
    }

    pub(crate) fn open_dropdown(&mut self, index: usize) -> bool {
        if index >= self.entries.len() {
            return false;
        }
        if self.dropdown_open != Some(index) {
            self.dropdown_open = Some(index);
            self.mark_dirty();
        }
        true
    }

    /// Enter in a question box only asks for a suggestion when the row has
    /// text and nothing else is going on for it.
    pub(crate) fn can_submit(&self, index: usize) -> bool {
        self.entries.get(index).is_some_and(|entry| {
            !entry.is_blank() && !entry.confirmed && !entry.loading && !entry.manually_editing
        })
    }

    /// The suggest button is only offered for an idle row with text that has
    /// no stage decided yet.
    pub(crate) fn can_suggest(&self, index: usize) -> bool {
        self.entries.get(index).is_some_and(|entry| {
            !entry.is_blank()
                && !entry.loading
                && !entry.confirmed
                && entry.error.is_none()
                && !entry.manually_editing
        })
    }

    /// Marks the entry as loading and builds the request to send.
    pub(crate) fn begin_suggestion(
        &mut self,
        index: usize,
    ) -> Option<(EntryId, u64, SuggestionRequest)> {
        let existing_journey_stages = self
            .entries
            .iter()
            .enumerate()
            .filter(|(i, entry)| *i != index && !entry.stage.is_empty())
            .map(|(_, entry)| entry.stage.clone())
            .collect();

        let entry = self.entries.get_mut(index)?;
        entry.loading = true;
        entry.confirmed = false;
        entry.error = None;
        entry.manually_editing = false;
        entry.generation += 1;

        let request = SuggestionRequest {
            question: entry.question.clone(),
            objective: self.objective.clone(),
            existing_journey_stages,
        };
        let ticket = (entry.id, entry.generation, request);
        self.mark_dirty();
        Some(ticket)
    }

    /// Applies a suggestion outcome. Returns false when the response is stale
    /// (unknown entry, superseded generation, or the entry is no longer loading).
    pub(crate) fn resolve_suggestion(
        &mut self,
        entry_id: EntryId,
        generation: u64,
        result: SuggestionResult,
    ) -> bool {
        let Some(entry) = self.entries.iter_mut().find(|entry| entry.id == entry_id) else {
            return false;
        };
        if entry.generation != generation || !entry.loading {
            return false;
        }

        match result {
            Ok(Some(stage)) if !stage.trim().is_empty() => {
                entry.confirmed = true;
                entry.disabled = true;
                entry.source = Some(StageSource::Suggested);
                self.stages.insert(&stage);
                entry.stage = stage;
            }
            Ok(_) | Err(_) => {
                entry.error = Some(MANUAL_ENTRY_ERROR.to_owned());
                entry.disabled = false;
            }
        }
        entry.loading = false;
        self.mark_dirty();
        true
    }

    pub(crate) fn set_new_stage_draft(&mut self, text: String) {
        if self.new_stage_draft != text {
            self.new_stage_draft = text;
            self.mark_dirty();
        }
    }

    /// Adds the draft label to the stage set when it is non-blank and new.
    pub(crate) fn submit_new_stage(&mut self) -> bool {
        if self.new_stage_draft.trim().is_empty() || self.stages.contains(&self.new_stage_draft) {
            return false;
        }
        let label = std::mem::take(&mut self.new_stage_draft);
        self.stages.insert(&label);
        self.mark_dirty();
        true
    }

    /// Keeps a blank row at the end of the list to type into.
    pub(crate) fn ensure_trailing_placeholder(&mut self) {
        let needs_placeholder = self.entries.last().map_or(true, |last| !last.is_blank());
        if needs_placeholder {
            let id = self.next_id;
            self.next_id += 1;
            self.entries.push(QuestionEntry::blank(id));
            self.mark_dirty();
        }
    }
}
