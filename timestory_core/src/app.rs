//! The top-level container: owns the store and wires the form, the list and
//! the timeline to it.

use chrono::NaiveDate;
use log::debug;

use crate::{
    config::TimelineConfig,
    data::{CategoryKey, EventId, EventRecord, EventStore, StoreAction},
    dialog::ConfirmDialog,
    error::{TimestoryError, TimestoryResult},
    form::{EventForm, FormOutput},
    list::{EventListView, ListAction},
    timeline::{RangeNotice, TimelineModel, TimelineView},
};

pub const DELETE_PROMPT: &str = "Are you sure you want to delete this event?";

/// An entry of the category filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOption {
    /// `None` shows all categories.
    pub value: Option<CategoryKey>,
    pub label: String,
}

#[derive(Debug)]
pub struct App {
    config: TimelineConfig,
    store: EventStore,
    form: EventForm,
    timeline: TimelineView,
    delete_dialog: ConfirmDialog<EventId>,
}

impl App {
    pub fn new(config: TimelineConfig, viewport_width: f64) -> Self {
        App {
            store: EventStore::new(),
            form: EventForm::new(&config),
            timeline: TimelineView::new(viewport_width, config.recent_anchor),
            delete_dialog: ConfirmDialog::new(),
            config,
        }
    }

    pub fn config(&self) -> &TimelineConfig {
        &self.config
    }

    pub fn store(&self) -> &EventStore {
        &self.store
    }

    pub fn form(&self) -> &EventForm {
        &self.form
    }

    /// For plain field edits (description, date, focus). Anything that
    /// creates categories goes through `App` so the store stays in sync.
    pub fn form_mut(&mut self) -> &mut EventForm {
        &mut self.form
    }

    pub fn timeline_view(&self) -> &TimelineView {
        &self.timeline
    }

    pub fn delete_dialog(&self) -> &ConfirmDialog<EventId> {
        &self.delete_dialog
    }

    pub fn open_create_form(&mut self) {
        self.form.open_create();
    }

    pub fn open_edit_form(&mut self, id: EventId) -> TimestoryResult<()> {
        let record = self.store.event(id).ok_or(TimestoryError::EventNotFound(id))?;
        self.form.open_edit(record, self.store.categories());
        Ok(())
    }

    pub fn cancel_form(&mut self) {
        self.form.close();
    }

    pub fn set_category_search(&mut self, text: impl Into<String>) {
        self.form.set_category_search(text, self.store.categories());
    }

    pub fn select_category(&mut self, key: &CategoryKey) -> TimestoryResult<()> {
        let category = self
            .store
            .categories()
            .get(key)
            .ok_or_else(|| TimestoryError::UnknownCategory(key.clone()))?;
        self.form.select_category(category);
        Ok(())
    }

    /// Creates a category from the form's search text, adds it to the store
    /// and selects it in the form. Returns the new key, or `None` if the
    /// search text does not call for a new category. If the store refuses the
    /// category, the form's previous selection is restored.
    pub fn accept_new_category(&mut self) -> TimestoryResult<Option<CategoryKey>> {
        let Some(output) = self.form.accept_new_category(self.store.categories()) else {
            return Ok(None);
        };
        let key = self.form.category().clone();
        match self.apply_form_output(output) {
            Ok(()) => {
                self.form.category_committed(&key);
                Ok(Some(key))
            }
            Err(err) => {
                self.form.category_rejected(self.store.categories());
                Err(err)
            }
        }
    }

    /// Submits the form. Returns the ID of the saved event, or `None` if the
    /// form is incomplete, in which case nothing changes.
    pub fn submit_form(&mut self) -> TimestoryResult<Option<EventId>> {
        let Some(output) = self.form.submit() else {
            return Ok(None);
        };
        let id = match &output {
            FormOutput::Add { record, .. } | FormOutput::Update { record, .. } => record.id,
            FormOutput::AddCategory(_) => return Ok(None),
        };
        self.apply_form_output(output)?;
        Ok(Some(id))
    }

    /// Commits everything the output asks for, or nothing. Saving an event
    /// closes the form; adding a category leaves it open.
    pub fn apply_form_output(&mut self, output: FormOutput) -> TimestoryResult<()> {
        let closes_form = !matches!(output, FormOutput::AddCategory(_));
        self.store.apply_all(output.into_actions())?;
        if closes_form {
            self.form.close();
        }
        Ok(())
    }

    pub fn handle_list_action(&mut self, action: ListAction) -> TimestoryResult<()> {
        match action {
            ListAction::Edit(id) => self.open_edit_form(id),
            ListAction::Delete(id) => self.request_delete(id),
        }
    }

    /// Asks the user to confirm the deletion of an event.
    pub fn request_delete(&mut self, id: EventId) -> TimestoryResult<()> {
        debug!("asking to delete event {id}");
        self.delete_dialog.ask(id, DELETE_PROMPT)
    }

    /// Answers the pending delete confirmation. Returns the removed event, if
    /// the deletion was accepted and the event still existed.
    pub fn resolve_delete(&mut self, accept: bool) -> TimestoryResult<Option<EventRecord>> {
        let Some(id) = self.delete_dialog.resolve(accept) else {
            return Ok(None);
        };
        let removed = self.store.event(id).cloned();
        self.store.apply(StoreAction::RemoveEvent(id))?;
        Ok(removed)
    }

    pub fn set_filter(&mut self, filter: Option<CategoryKey>) -> TimestoryResult<()> {
        self.store.apply(StoreAction::SetFilter(filter))
    }

    /// "All Categories" followed by every built-in and custom category.
    pub fn filter_options(&self) -> Vec<FilterOption> {
        let all = FilterOption { value: None, label: "All Categories".to_string() };
        std::iter::once(all)
            .chain(self.store.categories().iter().map(|category| FilterOption {
                value: Some(category.key.clone()),
                label: category.label.to_string(),
            }))
            .collect()
    }

    pub fn list_view(&self) -> EventListView {
        EventListView::project(&self.store)
    }

    pub fn timeline_model(&self, today: NaiveDate) -> TimelineModel {
        TimelineModel::build(&self.store, &self.config, today)
    }

    /// Builds the timeline and lets the viewport follow the most recent event
    /// if the displayed events changed since the last refresh.
    pub fn refresh_timeline(&mut self, today: NaiveDate) -> TimelineModel {
        let model = self.timeline_model(today);
        self.timeline.follow(&model);
        model
    }

    pub fn set_viewport_width(&mut self, width: f64) {
        self.timeline.set_viewport_width(width);
    }

    pub fn jump_to_date(&mut self, date: NaiveDate, today: NaiveDate) -> Result<f64, RangeNotice> {
        let model = self.timeline_model(today);
        self.timeline.jump_to(date, model.track())
    }
}

impl Default for App {
    fn default() -> Self {
        App::new(TimelineConfig::default(), 800.0)
    }
}
