//! The horizontal timeline: which dates are visible, where each month and
//! each event sits on the track, and how the viewport scrolls over it.

pub mod range;
pub mod track;
pub mod viewport;

use chrono::NaiveDate;

pub use range::{Months, VisibleInterval};
pub use track::{MonthMarker, Pin, TimelineTrack};
pub use viewport::{RangeNotice, TimelineView};

use crate::{
    config::TimelineConfig,
    data::{event::date_bounds, EventRecord, EventStore},
    digest::{DigestOutput, Digestible},
};

/// Everything the timeline draws for the current state of the store.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineModel {
    track: TimelineTrack,
    markers: Vec<MonthMarker>,
    pins: Vec<Pin>,
    latest: Option<NaiveDate>,
    digest: DigestOutput,
}

impl TimelineModel {
    /// Lays out the events that pass the store's filter. `today` is only used
    /// when there are no such events.
    pub fn build(store: &EventStore, config: &TimelineConfig, today: NaiveDate) -> Self {
        let events: Vec<&EventRecord> = store.filtered_events().collect();
        let interval =
            VisibleInterval::around_events(events.iter().copied(), today, config.buffer_months);
        let track = TimelineTrack::new(interval, config.month_width);
        TimelineModel {
            markers: track.month_markers().collect(),
            pins: track.pins(events.iter().copied(), store.categories()),
            latest: date_bounds(events.iter().copied()).map(|(_, latest)| latest),
            digest: events.as_slice().digest(),
            track,
        }
    }

    pub fn track(&self) -> &TimelineTrack {
        &self.track
    }

    pub fn interval(&self) -> &VisibleInterval {
        self.track.interval()
    }

    pub fn total_width(&self) -> f64 {
        self.track.total_width()
    }

    pub fn markers(&self) -> &[MonthMarker] {
        &self.markers
    }

    pub fn pins(&self) -> &[Pin] {
        &self.pins
    }

    /// The date of the most recent displayed event.
    pub fn latest(&self) -> Option<NaiveDate> {
        self.latest
    }

    /// Identifies the set of displayed events, so that a view can tell when it
    /// has changed.
    pub fn digest(&self) -> DigestOutput {
        self.digest
    }
}
