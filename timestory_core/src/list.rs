use chrono::NaiveDate;

use crate::data::{
    event::sort_newest_first, time::format_long_date, CategoryKey, Color, EventId, EventStore,
};

/// The event list as it should be shown: the events that pass the store's
/// filter, newest first.
#[derive(Debug, Clone, PartialEq)]
pub struct EventListView {
    pub filter: Option<CategoryKey>,
    pub items: Vec<ListItem>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListItem {
    pub id: EventId,
    pub description: String,
    pub date: NaiveDate,
    /// e.g. "January 15, 2024"
    pub date_label: String,
    pub category: CategoryKey,
    pub color: Color,
}

/// What a row of the list lets the user do.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ListAction {
    Edit(EventId),
    Delete(EventId),
}

impl EventListView {
    pub fn project(store: &EventStore) -> Self {
        let mut events: Vec<_> = store.filtered_events().collect();
        sort_newest_first(&mut events);
        let items = events
            .into_iter()
            .map(|event| ListItem {
                id: event.id,
                description: event.description.clone(),
                date: event.date,
                date_label: format_long_date(event.date),
                category: event.category.clone(),
                color: store.categories().resolve_appearance(&event.category).color,
            })
            .collect();
        EventListView { filter: store.filter().cloned(), items }
    }

    pub fn header(&self) -> String {
        match &self.filter {
            Some(key) => format!("Events ({key})"),
            None => "Events".to_string(),
        }
    }

    pub fn count_label(&self) -> String {
        match self.items.len() {
            1 => "1 event".to_string(),
            n => format!("{n} events"),
        }
    }

    /// The message shown in place of the list when it is empty.
    pub fn empty_message(&self) -> Option<String> {
        if !self.items.is_empty() {
            return None;
        }
        Some(match &self.filter {
            Some(key) => format!("No events found in \"{key}\" category."),
            None => "No events added yet. Click \"Add Event\" to get started.".to_string(),
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::data::{Category, EventRecord};

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn add(store: &mut EventStore, id: u64, description: &str, date: NaiveDate, category: &str) {
        store
            .add_event(EventRecord::new(EventId(id), description, date, CategoryKey::from(category)))
            .unwrap();
    }

    #[test]
    fn single_event_projection() {
        let mut store = EventStore::new();
        add(&mut store, 1, "Launch", date(2024, 1, 15), "work");

        let view = EventListView::project(&store);
        assert_eq!(view.items.len(), 1);
        let item = &view.items[0];
        assert_eq!(item.description, "Launch");
        assert_eq!(item.date_label, "January 15, 2024");
        assert_eq!(item.category.as_str(), "work");
        assert_eq!(item.color.as_str(), "#3b82f6");
        assert_eq!(view.header(), "Events");
        assert_eq!(view.count_label(), "1 event");
        assert_eq!(view.empty_message(), None);
    }

    #[test]
    fn sorted_newest_first_and_filtered() {
        let mut store = EventStore::new();
        store.add_category(Category::custom("Trip").unwrap()).unwrap();
        add(&mut store, 1, "Launch", date(2024, 1, 15), "work");
        add(&mut store, 2, "Lisbon", date(2024, 5, 1), "trip");
        add(&mut store, 3, "Review", date(2023, 11, 2), "work");

        let view = EventListView::project(&store);
        let ids: Vec<_> = view.items.iter().map(|item| item.id.0).collect();
        assert_eq!(ids, vec![2, 1, 3]);
        assert_eq!(view.items[0].color.as_str(), "#64748b");
        assert_eq!(view.count_label(), "3 events");

        store.set_filter(Some(CategoryKey::from("work")));
        let view = EventListView::project(&store);
        let ids: Vec<_> = view.items.iter().map(|item| item.id.0).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(view.header(), "Events (work)");
    }

    #[test]
    fn empty_messages() {
        let mut store = EventStore::new();
        let view = EventListView::project(&store);
        assert_eq!(view.count_label(), "0 events");
        assert_eq!(
            view.empty_message().as_deref(),
            Some("No events added yet. Click \"Add Event\" to get started.")
        );

        add(&mut store, 1, "Launch", date(2024, 1, 15), "work");
        store.set_filter(Some(CategoryKey::from("holiday")));
        let view = EventListView::project(&store);
        assert_eq!(
            view.empty_message().as_deref(),
            Some("No events found in \"holiday\" category.")
        );
    }
}
