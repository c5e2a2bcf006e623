use chrono::{Datelike, Months, NaiveDate};

/// A single calendar month. Internally this is the first day of the month, so
/// every `YearMonth` is guaranteed to be representable as a `NaiveDate`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth(NaiveDate);

impl YearMonth {
    /// Returns the month with the given year and month number (1 to 12), or
    /// `None` if it does not exist or is outside the supported date range.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(YearMonth)
    }

    /// Returns the month that contains the date.
    pub fn of(date: NaiveDate) -> Self {
        // day 1 always exists for a month that contains a valid date
        YearMonth(date.with_day(1).unwrap_or(date))
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// The month number, from 1 (January) to 12 (December).
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.0
    }

    pub fn last_day(&self) -> NaiveDate {
        // adding a month only fails for the very last representable month, in
        // which case the last day of the month is the last representable date
        self.0
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .unwrap_or(NaiveDate::MAX)
    }

    /// Moves the month forwards (positive) or backwards (negative) by the
    /// given number of months. Returns `None` if the result is outside the
    /// supported date range.
    pub fn shift(&self, months: i32) -> Option<Self> {
        let magnitude = Months::new(months.unsigned_abs());
        let shifted = if months >= 0 {
            self.0.checked_add_months(magnitude)
        } else {
            self.0.checked_sub_months(magnitude)
        };
        shifted.map(YearMonth)
    }

    /// Same as `shift`, but stops at the first or last supported month
    /// instead of failing.
    pub fn shift_saturating(&self, months: i32) -> Self {
        self.shift(months).unwrap_or_else(|| {
            if months >= 0 {
                YearMonth::of(NaiveDate::MAX)
            } else {
                YearMonth::of(NaiveDate::MIN)
            }
        })
    }

    pub fn succ(&self) -> Option<Self> {
        self.shift(1)
    }

    /// The number of months from `self` to `other`. Negative if `other` comes
    /// before `self`.
    pub fn months_until(&self, other: &YearMonth) -> i64 {
        (other.year() as i64 - self.year() as i64) * 12 + other.month() as i64
            - self.month() as i64
    }

    /// Abbreviated English month name, e.g. "Jan".
    pub fn short_name(&self) -> String {
        self.0.format("%b").to_string()
    }

    pub fn is_january(&self) -> bool {
        self.month() == 1
    }
}

/// Formats a date the way event lists and tooltips show it, e.g.
/// "January 15, 2024".
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Formats a date in numeric month/day/year form, e.g. "1/15/2024".
pub fn format_short_date(date: NaiveDate) -> String {
    date.format("%-m/%-d/%Y").to_string()
}

#[cfg(test)]
mod test {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn month_boundaries() {
        let feb_2024 = YearMonth::new(2024, 2).unwrap();
        assert_eq!(feb_2024.first_day(), date(2024, 2, 1));
        assert_eq!(feb_2024.last_day(), date(2024, 2, 29));

        let feb_2023 = YearMonth::new(2023, 2).unwrap();
        assert_eq!(feb_2023.last_day(), date(2023, 2, 28));

        let dec = YearMonth::of(date(2023, 12, 25));
        assert_eq!(dec.first_day(), date(2023, 12, 1));
        assert_eq!(dec.last_day(), date(2023, 12, 31));

        assert_eq!(YearMonth::new(2024, 13), None);
        assert_eq!(YearMonth::new(2024, 0), None);
    }

    #[test]
    fn shifting_crosses_year_boundaries() {
        let jan = YearMonth::new(2024, 1).unwrap();
        assert_eq!(jan.shift(-1), YearMonth::new(2023, 12));
        assert_eq!(jan.shift(1), YearMonth::new(2024, 2));
        assert_eq!(jan.shift(12), YearMonth::new(2025, 1));
        assert_eq!(jan.shift(-13), YearMonth::new(2022, 12));
        assert_eq!(jan.shift(0), Some(jan));
    }

    #[test]
    fn shifting_saturates_at_the_supported_range() {
        let last = YearMonth::of(NaiveDate::MAX);
        assert_eq!(last.shift(1), None);
        assert_eq!(last.shift_saturating(1), last);
        assert_eq!(last.last_day(), NaiveDate::MAX);

        let first = YearMonth::of(NaiveDate::MIN);
        assert_eq!(first.shift_saturating(-3), first);
    }

    #[test]
    fn months_until_counts_signed_distance() {
        let a = YearMonth::new(2023, 11).unwrap();
        let b = YearMonth::new(2024, 2).unwrap();
        assert_eq!(a.months_until(&b), 3);
        assert_eq!(b.months_until(&a), -3);
        assert_eq!(a.months_until(&a), 0);
    }

    #[test]
    fn date_formatting() {
        assert_eq!(format_long_date(date(2024, 1, 15)), "January 15, 2024");
        assert_eq!(format_long_date(date(2023, 9, 3)), "September 3, 2023");
        assert_eq!(format_short_date(date(2024, 1, 5)), "1/5/2024");
        assert_eq!(YearMonth::new(2024, 3).unwrap().short_name(), "Mar");
    }
}
