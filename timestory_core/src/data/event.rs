use std::fmt;

use chrono::NaiveDate;

use super::category::CategoryKey;
use crate::error::{TimestoryError, TimestoryResult};

/// A unique ID that can used to refer to an event. It carries no meaning
/// beyond identity.
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone, PartialOrd, Ord)]
pub struct EventId(pub u64);

impl EventId {
    /// Mints a fresh random ID. Collisions are astronomically unlikely, and
    /// the store refuses to insert a duplicate anyway.
    pub fn generate() -> Self {
        EventId(rand::random())
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

/// A single entry on the timeline.
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub struct EventRecord {
    pub id: EventId,
    /// A short description of the event, e.g. "Moved to Berlin". Never blank
    /// once the record is in the store.
    pub description: String,
    pub date: NaiveDate,
    pub category: CategoryKey,
}

impl EventRecord {
    pub fn new(
        id: EventId,
        description: impl Into<String>,
        date: NaiveDate,
        category: CategoryKey,
    ) -> Self {
        EventRecord { id, description: description.into(), date, category }
    }

    /// Checks the invariants that do not depend on the rest of the store and
    /// trims the description.
    pub(crate) fn normalized(mut self) -> TimestoryResult<Self> {
        let trimmed = self.description.trim();
        if trimmed.is_empty() {
            return Err(TimestoryError::EmptyDescription);
        }
        if trimmed.len() != self.description.len() {
            self.description = trimmed.to_string();
        }
        Ok(self)
    }
}

/// Returns the earliest and the latest date among the events, or `None` if
/// there are no events.
pub fn date_bounds<'a>(
    events: impl IntoIterator<Item = &'a EventRecord>,
) -> Option<(NaiveDate, NaiveDate)> {
    events.into_iter().fold(None, |bounds, event| match bounds {
        None => Some((event.date, event.date)),
        Some((earliest, latest)) => Some((earliest.min(event.date), latest.max(event.date))),
    })
}

/// Sorts events by date, most recent first. Events on the same date keep
/// their relative order.
pub fn sort_newest_first(events: &mut [&EventRecord]) {
    events.sort_by(|a, b| b.date.cmp(&a.date));
}
