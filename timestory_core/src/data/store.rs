use log::{debug, warn};

use super::{
    category::{CategoriesTable, Category, CategoryKey},
    event::{EventId, EventRecord},
    transaction::{execute_all_or_roll_back, Rollback, Transaction},
};
use crate::error::{TimestoryError, TimestoryResult};

/// Owns every event and every custom category for the session, along with
/// the category filter that the list and the timeline share.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EventStore {
    categories: CategoriesTable,
    /// Events in the order they were added.
    events: Vec<EventRecord>,
    filter: Option<CategoryKey>,
}

/// A single mutation of the store. Every change to the store can be expressed
/// as one of these, which lets several changes be committed atomically with
/// `EventStore::apply_all`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreAction {
    AddEvent(EventRecord),
    /// Replaces the event with the same ID.
    UpdateEvent(EventRecord),
    RemoveEvent(EventId),
    AddCategory(Category),
    SetFilter(Option<CategoryKey>),
}

impl EventStore {
    pub fn new() -> Self {
        EventStore::default()
    }

    /// Adds an event. The description is stored trimmed. Fails if the ID is
    /// already taken, the description is blank, or the category does not
    /// exist.
    pub fn add_event(&mut self, record: EventRecord) -> TimestoryResult<EventId> {
        let record = self.check_record(record).inspect_err(|err| warn!("rejected event: {err}"))?;
        if self.position(record.id).is_some() {
            warn!("rejected event: duplicate id {}", record.id);
            return Err(TimestoryError::DuplicateEventId(record.id));
        }
        debug!("adding event {} on {}", record.id, record.date);
        let id = record.id;
        self.events.push(record);
        Ok(id)
    }

    /// Replaces the event that has the same ID as `record`, returning the
    /// previous version.
    pub fn update_event(&mut self, record: EventRecord) -> TimestoryResult<EventRecord> {
        let record = self.check_record(record).inspect_err(|err| warn!("rejected update: {err}"))?;
        let Some(index) = self.position(record.id) else {
            warn!("rejected update: no event {}", record.id);
            return Err(TimestoryError::EventNotFound(record.id));
        };
        debug!("updating event {}", record.id);
        Ok(std::mem::replace(&mut self.events[index], record))
    }

    /// Removes an event, returning it. Removing an event that is not in the
    /// store does nothing.
    pub fn remove_event(&mut self, id: EventId) -> Option<EventRecord> {
        self.take_event(id).map(|(_, record)| record)
    }

    /// Adds a custom category. Fails if the key is already used by a built-in
    /// or custom category.
    pub fn add_category(&mut self, category: Category) -> TimestoryResult<()> {
        self.categories.insert(category).inspect_err(|err| warn!("rejected category: {err}"))
    }

    /// Sets the category that the list and the timeline are restricted to, or
    /// `None` to show everything. Returns the previous filter.
    pub fn set_filter(&mut self, filter: Option<CategoryKey>) -> Option<CategoryKey> {
        debug!("filter set to {filter:?}");
        std::mem::replace(&mut self.filter, filter)
    }

    pub fn apply(&mut self, action: StoreAction) -> TimestoryResult<()> {
        action.execute(self).map(|_| ())
    }

    /// Applies all actions, or none of them if any fails.
    pub fn apply_all(
        &mut self,
        actions: impl IntoIterator<Item = StoreAction>,
    ) -> TimestoryResult<Vec<StoreAction>> {
        execute_all_or_roll_back(self, actions).map_err(|(err, index)| {
            TimestoryError::ActionRejected { index, source: Box::new(err) }
        })
    }

    pub fn events(&self) -> &[EventRecord] {
        &self.events
    }

    pub fn event(&self, id: EventId) -> Option<&EventRecord> {
        self.events.iter().find(|record| record.id == id)
    }

    pub fn categories(&self) -> &CategoriesTable {
        &self.categories
    }

    pub fn filter(&self) -> Option<&CategoryKey> {
        self.filter.as_ref()
    }

    /// The events that pass the current filter, in insertion order.
    pub fn filtered_events(&self) -> impl Iterator<Item = &EventRecord> {
        self.events
            .iter()
            .filter(|record| self.filter.as_ref().map_or(true, |key| &record.category == key))
    }

    fn check_record(&self, record: EventRecord) -> TimestoryResult<EventRecord> {
        let record = record.normalized()?;
        if !self.categories.contains(&record.category) {
            return Err(TimestoryError::UnknownCategory(record.category));
        }
        Ok(record)
    }

    fn position(&self, id: EventId) -> Option<usize> {
        self.events.iter().position(|record| record.id == id)
    }

    fn take_event(&mut self, id: EventId) -> Option<(usize, EventRecord)> {
        let index = self.position(id)?;
        debug!("removing event {id}");
        Some((index, self.events.remove(index)))
    }
}

impl Transaction<EventStore> for StoreAction {
    fn execute(&self, store: &mut EventStore) -> Result<Rollback<EventStore>, TimestoryError> {
        match self {
            StoreAction::AddEvent(record) => {
                let id = store.add_event(record.clone())?;
                Ok(Box::new(move |store| {
                    store.take_event(id);
                }))
            }
            StoreAction::UpdateEvent(record) => {
                let previous = store.update_event(record.clone())?;
                Ok(Box::new(move |store| {
                    if let Some(index) = store.position(previous.id) {
                        store.events[index] = previous.clone();
                    }
                }))
            }
            StoreAction::RemoveEvent(id) => {
                let removed = store.take_event(*id);
                Ok(Box::new(move |store| {
                    if let Some((index, record)) = &removed {
                        store.events.insert(*index, record.clone());
                    }
                }))
            }
            StoreAction::AddCategory(category) => {
                store.add_category(category.clone())?;
                let key = category.key.clone();
                Ok(Box::new(move |store| {
                    store.categories.remove_custom(&key);
                }))
            }
            StoreAction::SetFilter(filter) => {
                let previous = store.set_filter(filter.clone());
                Ok(Box::new(move |store| {
                    store.filter = previous.clone();
                }))
            }
        }
    }
}
