//! State of the add/edit event form.
//!
//! The form never touches the store. It reads categories from it and hands
//! back `FormOutput`s describing what should change; the caller applies them.

use std::time::{Duration, Instant};

use chrono::NaiveDate;
use log::debug;

use crate::{
    config::TimelineConfig,
    data::{
        category::PERSONAL, CategoriesTable, Category, CategoryKey, Color, EventId, EventRecord,
        Icon, StoreAction,
    },
};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FormMode {
    Closed,
    Create,
    Edit(EventId),
}

/// What the form asks the store to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormOutput {
    /// A category was created from the search text and should be added right
    /// away, so that it can be picked elsewhere too.
    AddCategory(Category),
    Add {
        record: EventRecord,
        /// A category created by this form that the store has not confirmed
        /// yet. It must be committed together with the record.
        new_category: Option<Category>,
    },
    Update { record: EventRecord, new_category: Option<Category> },
}

impl FormOutput {
    /// The store actions that carry out this output. They must be applied
    /// together.
    pub fn into_actions(self) -> Vec<StoreAction> {
        match self {
            FormOutput::AddCategory(category) => vec![StoreAction::AddCategory(category)],
            FormOutput::Add { record, new_category } => new_category
                .map(StoreAction::AddCategory)
                .into_iter()
                .chain([StoreAction::AddEvent(record)])
                .collect(),
            FormOutput::Update { record, new_category } => new_category
                .map(StoreAction::AddCategory)
                .into_iter()
                .chain([StoreAction::UpdateEvent(record)])
                .collect(),
        }
    }
}

/// An entry of the category dropdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategorySuggestion<'a> {
    Existing(&'a Category),
    /// Offer to create a category with this label.
    AddNew(String),
    /// Nothing matched and there is nothing to create.
    NoResults,
}

impl CategorySuggestion<'_> {
    pub fn label(&self) -> String {
        match self {
            CategorySuggestion::Existing(category) => category.label.to_string(),
            CategorySuggestion::AddNew(text) => format!("Add \"{text}\""),
            CategorySuggestion::NoResults => "No categories found".to_string(),
        }
    }

    /// Color and icon of an existing category. The other entries are drawn
    /// with a plain "+" or nothing.
    pub fn swatch(&self) -> Option<(&Color, &Icon)> {
        match self {
            CategorySuggestion::Existing(category) => Some((&category.color, &category.icon)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct EventForm {
    mode: FormMode,
    description: String,
    date: Option<NaiveDate>,
    /// The category the event will be saved with.
    category: CategoryKey,
    /// Text typed into the category field. Not necessarily the label of
    /// `category`.
    category_search: String,
    dropdown_open: bool,
    close_dropdown_at: Option<Instant>,
    close_delay: Duration,
    /// Created from the search text, but not yet confirmed by the store.
    pending_category: Option<Category>,
    /// What `category` was before the pending category was selected.
    category_before_pending: Option<CategoryKey>,
}

impl Default for EventForm {
    fn default() -> Self {
        EventForm::new(&TimelineConfig::default())
    }
}

impl EventForm {
    pub fn new(config: &TimelineConfig) -> Self {
        EventForm {
            mode: FormMode::Closed,
            description: String::new(),
            date: None,
            category: PERSONAL.key,
            category_search: PERSONAL.label.to_string(),
            dropdown_open: false,
            close_dropdown_at: None,
            close_delay: config.dropdown_close_delay(),
            pending_category: None,
            category_before_pending: None,
        }
    }

    // Clears everything the user typed.
    fn reset(&mut self, mode: FormMode) {
        *self = EventForm { mode, close_delay: self.close_delay, ..EventForm::default() };
    }

    pub fn open_create(&mut self) {
        debug!("opening form to add an event");
        self.reset(FormMode::Create);
    }

    /// Opens the form pre-filled with an existing event. The category field
    /// shows the category's label, or the raw key if the category is unknown.
    pub fn open_edit(&mut self, record: &EventRecord, categories: &CategoriesTable) {
        debug!("opening form to edit event {}", record.id);
        self.reset(FormMode::Edit(record.id));
        self.description = record.description.clone();
        self.date = Some(record.date);
        self.category = record.category.clone();
        self.category_search = match categories.get(&record.category) {
            Some(category) => category.label.to_string(),
            None => record.category.to_string(),
        };
    }

    pub fn close(&mut self) {
        self.reset(FormMode::Closed);
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn is_open(&self) -> bool {
        self.mode != FormMode::Closed
    }

    pub fn title(&self) -> &'static str {
        match self.mode {
            FormMode::Edit(_) => "Edit Event",
            _ => "Add New Event",
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match self.mode {
            FormMode::Edit(_) => "Update Event",
            _ => "Add Event",
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn set_date(&mut self, date: Option<NaiveDate>) {
        self.date = date;
    }

    pub fn category(&self) -> &CategoryKey {
        &self.category
    }

    pub fn category_search(&self) -> &str {
        &self.category_search
    }

    pub fn is_dropdown_open(&self) -> bool {
        self.dropdown_open
    }

    pub fn pending_category(&self) -> Option<&Category> {
        self.pending_category.as_ref()
    }

    /// Updates the category search text and opens the dropdown. If the text
    /// is exactly the label of an existing category (ignoring case), that
    /// category is selected right away.
    pub fn set_category_search(&mut self, text: impl Into<String>, categories: &CategoriesTable) {
        self.category_search = text.into();
        self.open_dropdown();
        if let Some(category) = categories.find_by_label(&self.category_search) {
            self.category = category.key.clone();
        }
    }

    /// The dropdown entries for the current search text: every category whose
    /// label contains the text, then an offer to create a category when the
    /// text matches no label exactly and its key is not taken.
    pub fn suggestions<'c>(&self, categories: &'c CategoriesTable) -> Vec<CategorySuggestion<'c>> {
        let mut suggestions: Vec<_> =
            categories.search(&self.category_search).map(CategorySuggestion::Existing).collect();
        if self.can_add_category(categories) {
            suggestions.push(CategorySuggestion::AddNew(self.category_search.clone()));
        }
        if suggestions.is_empty() {
            suggestions.push(CategorySuggestion::NoResults);
        }
        suggestions
    }

    // The derived key must be free too, or the store would refuse the category.
    fn can_add_category(&self, categories: &CategoriesTable) -> bool {
        CategoryKey::from_label(&self.category_search).is_some_and(|key| !categories.contains(&key))
            && categories.find_by_label(&self.category_search).is_none()
    }

    pub fn select_category(&mut self, category: &Category) {
        self.category = category.key.clone();
        self.category_search = category.label.to_string();
        self.close_dropdown();
    }

    /// Creates a category from the search text and selects it. Returns the
    /// output that adds the category to the store, or `None` if the text is
    /// blank or already names a category.
    ///
    /// Until `category_committed` is called, the new category is also
    /// attached to whatever `submit` returns, so a submitted record never
    /// refers to a category the store does not have.
    pub fn accept_new_category(&mut self, categories: &CategoriesTable) -> Option<FormOutput> {
        if !self.can_add_category(categories) {
            return None;
        }
        let category = Category::custom(&self.category_search)?;
        debug!("form created category {}", category.key);
        if self.pending_category.is_none() {
            self.category_before_pending = Some(self.category.clone());
        }
        self.category = category.key.clone();
        self.pending_category = Some(category.clone());
        self.close_dropdown();
        Some(FormOutput::AddCategory(category))
    }

    /// The store now holds the pending category.
    pub fn category_committed(&mut self, key: &CategoryKey) {
        if self.pending_category.as_ref().is_some_and(|category| &category.key == key) {
            self.pending_category = None;
            self.category_before_pending = None;
        }
    }

    /// The store refused the pending category. The previous selection is
    /// restored.
    pub fn category_rejected(&mut self, categories: &CategoriesTable) {
        if self.pending_category.take().is_none() {
            return;
        }
        if let Some(previous) = self.category_before_pending.take() {
            self.category_search = match categories.get(&previous) {
                Some(category) => category.label.to_string(),
                None => previous.to_string(),
            };
            self.category = previous;
        }
    }

    pub fn focus_category_search(&mut self) {
        self.open_dropdown();
    }

    /// The search field lost focus. The dropdown closes after a short delay
    /// so that a click on one of its entries still registers; call `tick` to
    /// let it close.
    pub fn blur_category_search(&mut self, now: Instant) {
        self.close_dropdown_at = Some(now + self.close_delay);
    }

    /// Closes the dropdown if its close delay has elapsed. Returns whether it
    /// closed.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.close_dropdown_at {
            Some(deadline) if deadline <= now => {
                self.close_dropdown();
                true
            }
            _ => false,
        }
    }

    fn open_dropdown(&mut self) {
        self.dropdown_open = true;
        self.close_dropdown_at = None;
    }

    fn close_dropdown(&mut self) {
        self.dropdown_open = false;
        self.close_dropdown_at = None;
    }

    /// Builds the record described by the form. Returns `None`, and changes
    /// nothing, if the form is closed, the description is blank or no date
    /// is set. A new event gets a fresh ID; an edited event keeps its ID.
    pub fn submit(&self) -> Option<FormOutput> {
        let description = self.description.trim();
        let date = self.date?;
        if description.is_empty() {
            return None;
        }
        let new_category = self.pending_category.clone();
        match self.mode {
            FormMode::Closed => None,
            FormMode::Create => Some(FormOutput::Add {
                record: EventRecord::new(
                    EventId::generate(),
                    description,
                    date,
                    self.category.clone(),
                ),
                new_category,
            }),
            FormMode::Edit(id) => Some(FormOutput::Update {
                record: EventRecord::new(id, description, date, self.category.clone()),
                new_category,
            }),
        }
    }
}
