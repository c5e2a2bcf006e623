use chrono::NaiveDate;

use super::range::VisibleInterval;
use crate::data::{
    time::{format_long_date, format_short_date},
    CategoriesTable, CategoryKey, Color, EventId, EventRecord, Icon, YearMonth,
};

/// Maps dates onto the horizontal track of the timeline. Every month of the
/// visible interval takes `month_width` pixels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TimelineTrack {
    interval: VisibleInterval,
    month_width: f64,
}

/// A month column on the track.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthMarker {
    pub month: YearMonth,
    /// Left edge of the column, in pixels from the start of the track.
    pub x: f64,
    /// Abbreviated month name, e.g. "Jan".
    pub label: String,
    /// Set for January columns, which also start a new year.
    pub year_label: Option<String>,
}

/// An event placed on the track.
#[derive(Debug, Clone, PartialEq)]
pub struct Pin {
    pub event_id: EventId,
    pub x: f64,
    pub description: String,
    pub date: NaiveDate,
    /// e.g. "January 15, 2024"
    pub date_label: String,
    pub category: CategoryKey,
    pub color: Color,
    pub icon: Icon,
}

impl Pin {
    /// Hover text, e.g. "Launch - 1/15/2024".
    pub fn title(&self) -> String {
        format!("{} - {}", self.description, format_short_date(self.date))
    }
}

impl TimelineTrack {
    pub fn new(interval: VisibleInterval, month_width: f64) -> Self {
        TimelineTrack { interval, month_width }
    }

    pub fn interval(&self) -> &VisibleInterval {
        &self.interval
    }

    pub fn month_width(&self) -> f64 {
        self.month_width
    }

    pub fn total_width(&self) -> f64 {
        self.interval.month_count() as f64 * self.month_width
    }

    /// The horizontal position of a date, interpolated linearly between the
    /// start (0) and the end (`total_width`) of the interval. Returns `None`
    /// for dates outside the interval.
    pub fn offset(&self, date: NaiveDate) -> Option<f64> {
        if !self.interval.contains(date) {
            return None;
        }
        let span = self.interval.span_days();
        if span == 0 {
            return Some(0.0);
        }
        let elapsed = (date - self.interval.start()).num_days();
        Some(elapsed as f64 / span as f64 * self.total_width())
    }

    pub fn month_markers(&self) -> impl Iterator<Item = MonthMarker> {
        let month_width = self.month_width;
        self.interval.months().enumerate().map(move |(index, month)| MonthMarker {
            month,
            x: index as f64 * month_width,
            label: month.short_name(),
            year_label: month.is_january().then(|| month.year().to_string()),
        })
    }

    /// Places a pin for every event that falls inside the interval. Events
    /// outside it are skipped.
    pub fn pins<'a>(
        &self,
        events: impl IntoIterator<Item = &'a EventRecord>,
        categories: &CategoriesTable,
    ) -> Vec<Pin> {
        events
            .into_iter()
            .filter_map(|event| {
                let x = self.offset(event.date)?;
                let appearance = categories.resolve_appearance(&event.category);
                Some(Pin {
                    event_id: event.id,
                    x,
                    description: event.description.clone(),
                    date: event.date,
                    date_label: format_long_date(event.date),
                    category: event.category.clone(),
                    color: appearance.color,
                    icon: appearance.icon,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::data::{Category, DEFAULT_APPEARANCE};

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn event(id: u64, date: NaiveDate, category: &'static str) -> EventRecord {
        EventRecord::new(EventId(id), "Launch", date, CategoryKey::from_static(category))
    }

    fn track_for(events: &[EventRecord]) -> TimelineTrack {
        TimelineTrack::new(VisibleInterval::around_events(events, date(2024, 1, 1), 1), 120.0)
    }

    #[test]
    fn offsets_span_the_whole_track() {
        let track = track_for(&[event(1, date(2024, 1, 15), "work")]);
        assert_eq!(track.total_width(), 360.0);
        assert_eq!(track.offset(date(2023, 12, 1)), Some(0.0));
        assert_eq!(track.offset(date(2024, 2, 29)), Some(360.0));

        // 45 of 90 days
        assert_eq!(track.offset(date(2024, 1, 15)), Some(180.0));
    }

    #[test]
    fn offsets_outside_the_interval_are_absent() {
        let track = track_for(&[event(1, date(2024, 1, 15), "work")]);
        assert_eq!(track.offset(date(2023, 11, 30)), None);
        assert_eq!(track.offset(date(2024, 3, 1)), None);
        assert_eq!(track.offset(date(2025, 1, 15)), None);
    }

    #[test]
    fn offsets_are_monotonic() {
        let track =
            track_for(&[event(1, date(2023, 3, 3), "work"), event(2, date(2024, 9, 9), "work")]);
        let mut day = track.interval().start();
        let mut previous = -1.0;
        while day <= track.interval().end() {
            let x = track.offset(day).unwrap();
            assert!(x >= previous);
            assert!(x <= track.total_width());
            previous = x;
            day = day.succ_opt().unwrap();
        }
    }

    #[test]
    fn markers_label_months_and_years() {
        let track = track_for(&[event(1, date(2024, 1, 15), "work")]);
        let markers: Vec<_> = track.month_markers().collect();
        assert_eq!(markers.len(), 3);
        assert_eq!(markers[0].label, "Dec");
        assert_eq!(markers[0].year_label, None);
        assert_eq!(markers[1].label, "Jan");
        assert_eq!(markers[1].x, 120.0);
        assert_eq!(markers[1].year_label.as_deref(), Some("2024"));
        assert_eq!(markers[2].label, "Feb");
        assert_eq!(markers[2].x, 240.0);
    }

    #[test]
    fn pins_resolve_appearance_and_skip_outside_events() {
        let mut categories = CategoriesTable::new();
        categories.insert(Category::custom("Trip").unwrap()).unwrap();

        let inside = [
            event(1, date(2024, 1, 15), "work"),
            event(2, date(2024, 1, 20), "trip"),
            event(3, date(2024, 1, 25), "unheard-of"),
        ];
        let track = track_for(&inside);
        let outside = event(4, date(2030, 1, 1), "work");

        let pins = track.pins(inside.iter().chain([&outside]), &categories);
        assert_eq!(pins.len(), 3);
        assert_eq!(pins[0].color.as_str(), "#3b82f6");
        assert_eq!(pins[0].icon.as_str(), "💼");
        assert_eq!(pins[0].date_label, "January 15, 2024");
        assert_eq!(pins[0].title(), "Launch - 1/15/2024");
        assert_eq!(pins[1].color, DEFAULT_APPEARANCE.color);
        assert_eq!(pins[2].icon, DEFAULT_APPEARANCE.icon);
    }
}
