use std::fmt;

use chrono::NaiveDate;
use log::debug;

use super::{track::TimelineTrack, TimelineModel};
use crate::{data::time::format_short_date, digest::DigestOutput};

/// Raised when the user asks to jump to a date that the timeline does not
/// currently show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeNotice {
    pub date: NaiveDate,
    pub start_year: i32,
    pub end_year: i32,
}

impl fmt::Display for RangeNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Date {} is outside the timeline range ({} - {}). Please add events in this time \
             period first.",
            format_short_date(self.date),
            self.start_year,
            self.end_year
        )
    }
}

/// The scrollable window onto the timeline track.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineView {
    /// Distance in pixels between the start of the track and the left edge of
    /// the viewport.
    scroll_left: f64,
    viewport_width: f64,
    /// Where the most recent event should sit after an automatic scroll, as a
    /// fraction of the viewport width.
    recent_anchor: f64,
    /// Digest of the events that were on the track when it last auto-scrolled.
    /// `None` until the first model has been shown.
    shown_digest: Option<DigestOutput>,
    /// Width of the last track the view was used with.
    track_width: f64,
}

impl TimelineView {
    pub fn new(viewport_width: f64, recent_anchor: f64) -> Self {
        TimelineView {
            scroll_left: 0.0,
            viewport_width,
            recent_anchor,
            shown_digest: None,
            track_width: 0.0,
        }
    }

    pub fn scroll_left(&self) -> f64 {
        self.scroll_left
    }

    pub fn viewport_width(&self) -> f64 {
        self.viewport_width
    }

    /// Resizes the viewport, pulling the scroll position back onto the track
    /// if the wider viewport would run past its end.
    pub fn set_viewport_width(&mut self, width: f64) {
        self.viewport_width = width.max(0.0);
        self.scroll_left = self.clamp(self.scroll_left);
    }

    /// Records a scroll made by the user.
    pub fn scroll_to(&mut self, scroll_left: f64, track: &TimelineTrack) {
        self.track_width = track.total_width();
        self.scroll_left = self.clamp(scroll_left);
    }

    /// Brings the most recent event into view near the right edge of the
    /// viewport. Only scrolls the first time a model is shown and whenever
    /// the set of displayed events has changed since then. Returns whether the
    /// view scrolled.
    pub fn follow(&mut self, model: &TimelineModel) -> bool {
        self.track_width = model.total_width();
        if self.shown_digest == Some(model.digest()) {
            return false;
        }
        self.shown_digest = Some(model.digest());

        let Some(x) = model.latest().and_then(|date| model.track().offset(date)) else {
            return false;
        };
        let target = x - self.viewport_width * self.recent_anchor;
        self.scroll_left = self.clamp(target);
        debug!("auto-scrolled timeline to {}", self.scroll_left);
        true
    }

    /// Centers the viewport on the date. If the date is outside the visible
    /// interval, the scroll position is left untouched and a notice naming
    /// the visible years is returned instead.
    pub fn jump_to(&mut self, date: NaiveDate, track: &TimelineTrack) -> Result<f64, RangeNotice> {
        self.track_width = track.total_width();
        let Some(x) = track.offset(date) else {
            debug!("jump target {date} is outside the timeline");
            return Err(RangeNotice {
                date,
                start_year: track.interval().start_year(),
                end_year: track.interval().end_year(),
            });
        };
        self.scroll_left = self.clamp(x - self.viewport_width / 2.0);
        Ok(self.scroll_left)
    }

    fn clamp(&self, scroll_left: f64) -> f64 {
        let max = (self.track_width - self.viewport_width).max(0.0);
        scroll_left.clamp(0.0, max)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        config::TimelineConfig,
        data::{CategoryKey, EventId, EventRecord, EventStore},
    };

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn store_with(dates: &[NaiveDate]) -> EventStore {
        let mut store = EventStore::new();
        for (i, &date) in dates.iter().enumerate() {
            store
                .add_event(EventRecord::new(
                    EventId(i as u64),
                    "event",
                    date,
                    CategoryKey::from_static("work"),
                ))
                .unwrap();
        }
        store
    }

    fn model(store: &EventStore) -> TimelineModel {
        TimelineModel::build(store, &TimelineConfig::default(), date(2024, 6, 1))
    }

    #[test]
    fn jump_centers_and_clamps() {
        // Jan 2023 .. Dec 2024 is 24 months, 2880 px
        let store = store_with(&[date(2023, 2, 1), date(2024, 11, 30)]);
        let model = model(&store);
        let track = model.track();
        assert_eq!(track.total_width(), 2880.0);

        let mut view = TimelineView::new(600.0, 0.8);
        let target = date(2024, 1, 1);
        let x = track.offset(target).unwrap();
        assert_eq!(view.jump_to(target, track), Ok(x - 300.0));

        assert_eq!(view.jump_to(date(2023, 1, 2), track), Ok(0.0));
        assert_eq!(view.jump_to(date(2024, 12, 31), track), Ok(2280.0));
    }

    #[test]
    fn jump_outside_range_keeps_scroll_position() {
        let store = store_with(&[date(2024, 1, 15)]);
        let model = model(&store);
        let mut view = TimelineView::new(100.0, 0.8);
        view.jump_to(date(2024, 1, 15), model.track()).unwrap();
        let before = view.scroll_left();

        let notice = view.jump_to(date(2025, 1, 15), model.track()).unwrap_err();
        assert_eq!(notice, RangeNotice { date: date(2025, 1, 15), start_year: 2023, end_year: 2024 });
        assert_eq!(
            notice.to_string(),
            "Date 1/15/2025 is outside the timeline range (2023 - 2024). Please add events in \
             this time period first."
        );
        assert_eq!(view.scroll_left(), before);
    }

    #[test]
    fn narrow_track_never_scrolls() {
        let store = store_with(&[date(2024, 1, 15)]);
        let model = model(&store);
        let mut view = TimelineView::new(1000.0, 0.8);
        assert_eq!(view.jump_to(date(2024, 2, 1), model.track()), Ok(0.0));
    }

    #[test]
    fn follows_most_recent_event_only_when_events_change() {
        let mut store = store_with(&[date(2023, 2, 1), date(2024, 11, 30)]);
        let mut view = TimelineView::new(600.0, 0.8);

        let first = model(&store);
        assert!(view.follow(&first));
        let x = first.track().offset(date(2024, 11, 30)).unwrap();
        assert_eq!(view.scroll_left(), (x - 600.0 * 0.8).min(2880.0 - 600.0));

        // the user scrolls away; re-rendering the same events keeps the position
        view.scroll_to(10.0, first.track());
        assert!(!view.follow(&model(&store)));
        assert_eq!(view.scroll_left(), 10.0);

        store.remove_event(EventId(1));
        assert!(view.follow(&model(&store)));
        assert_eq!(view.scroll_left(), 0.0);
    }

    #[test]
    fn widening_the_viewport_pulls_scroll_back() {
        let store = store_with(&[date(2023, 2, 1), date(2024, 11, 30)]);
        let model = model(&store);
        let mut view = TimelineView::new(600.0, 0.8);
        view.scroll_to(2280.0, model.track());
        assert_eq!(view.scroll_left(), 2280.0);

        view.set_viewport_width(1000.0);
        assert_eq!(view.scroll_left(), 1880.0);

        view.set_viewport_width(4000.0);
        assert_eq!(view.scroll_left(), 0.0);

        // narrowing again leaves the position where it is
        view.set_viewport_width(600.0);
        assert_eq!(view.scroll_left(), 0.0);
    }

    #[test]
    fn following_an_empty_timeline_leaves_scroll_alone() {
        let store = EventStore::new();
        let mut view = TimelineView::new(600.0, 0.8);
        assert!(!view.follow(&model(&store)));
        assert_eq!(view.scroll_left(), 0.0);
    }
}
