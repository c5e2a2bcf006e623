use chrono::NaiveDate;
use log::debug;

use crate::data::{event::date_bounds, EventRecord, YearMonth};

/// The closed range of dates that the timeline renders. Both ends fall on
/// month boundaries: `start` is the first day of a month and `end` is the last
/// day of a month.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct VisibleInterval {
    start: NaiveDate,
    end: NaiveDate,
}

impl VisibleInterval {
    /// Computes the interval for a set of events, padded by `buffer_months`
    /// whole months on each side of the earliest and latest event. With no
    /// events, the interval is centered on the month containing `today`.
    pub fn around_events<'a>(
        events: impl IntoIterator<Item = &'a EventRecord>,
        today: NaiveDate,
        buffer_months: u32,
    ) -> Self {
        let (earliest, latest) = date_bounds(events).unwrap_or((today, today));
        let buffer = i32::try_from(buffer_months).unwrap_or(i32::MAX);
        let interval = VisibleInterval {
            start: YearMonth::of(earliest).shift_saturating(-buffer).first_day(),
            end: YearMonth::of(latest).shift_saturating(buffer).last_day(),
        };
        debug!("visible interval is {} to {}", interval.start, interval.end);
        interval
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// The number of days from `start` to `end`.
    pub fn span_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    pub fn start_year(&self) -> i32 {
        self.start_month().year()
    }

    pub fn end_year(&self) -> i32 {
        self.end_month().year()
    }

    fn start_month(&self) -> YearMonth {
        YearMonth::of(self.start)
    }

    fn end_month(&self) -> YearMonth {
        YearMonth::of(self.end)
    }

    /// The months that the interval spans, in order. The iterator can be
    /// recreated at any time and always yields the same months.
    pub fn months(&self) -> Months {
        Months { next: Some(self.start_month()), last: self.end_month() }
    }

    pub fn month_count(&self) -> usize {
        self.months().len()
    }
}

/// Iterator over consecutive calendar months, both ends included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Months {
    next: Option<YearMonth>,
    last: YearMonth,
}

impl Iterator for Months {
    type Item = YearMonth;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.filter(|month| *month <= self.last)?;
        self.next = current.succ();
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = match self.next {
            Some(next) => usize::try_from(next.months_until(&self.last) + 1).unwrap_or(0),
            None => 0,
        };
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Months {}

impl std::iter::FusedIterator for Months {}
