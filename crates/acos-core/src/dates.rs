//! Reference dates for a cost report
//!
//! A report covers the whole previous month plus the current month up to
//! (but excluding) the as-of date. All dates are UTC calendar days, which is
//! how Cost Explorer buckets daily results.

use crate::error::{AcosError, Result};
use chrono::{Datelike, Days, Months, NaiveDate};

/// Date format used by Cost Explorer and the `--asOf` flag
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// The dates a report is classified against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportDates {
    /// Exclusive end of the query window
    pub as_of: NaiveDate,
    /// Seven days before `as_of`
    pub one_week_ago: NaiveDate,
    /// Inclusive start of the query window
    pub first_day_of_last_month: NaiveDate,
    /// Boundary between last-month and this-month buckets
    pub first_day_of_this_month: NaiveDate,
}

impl ReportDates {
    /// Compute the reference dates for the given as-of date
    ///
    /// # Example
    ///
    /// ```
    /// use acos_core::ReportDates;
    /// use chrono::NaiveDate;
    ///
    /// let dates = ReportDates::new(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()).unwrap();
    /// assert_eq!(dates.first_day_of_this_month, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    /// assert_eq!(dates.first_day_of_last_month, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
    /// assert_eq!(dates.one_week_ago, NaiveDate::from_ymd_opt(2024, 3, 8).unwrap());
    /// ```
    pub fn new(as_of: NaiveDate) -> Result<Self> {
        let out_of_range = || AcosError::InvalidDate(format!("{as_of} is out of range"));

        let first_day_of_this_month = as_of
            .checked_sub_days(Days::new(u64::from(as_of.day0())))
            .ok_or_else(out_of_range)?;
        let first_day_of_last_month = first_day_of_this_month
            .checked_sub_months(Months::new(1))
            .ok_or_else(out_of_range)?;
        let one_week_ago = as_of
            .checked_sub_days(Days::new(7))
            .ok_or_else(out_of_range)?;

        Ok(Self {
            as_of,
            one_week_ago,
            first_day_of_last_month,
            first_day_of_this_month,
        })
    }

    /// Whether the as-of date is the first day of its month
    ///
    /// On that day the query window holds no this-month buckets, so the
    /// daily delta is left at zero.
    pub fn is_first_day_of_month(&self) -> bool {
        self.as_of == self.first_day_of_this_month
    }

    /// Start of the weekly delta window, if it lies in the current month
    ///
    /// During the first seven days of a month the week reaches back into the
    /// previous month and no weekly delta is reported.
    pub fn weekly_boundary(&self) -> Option<NaiveDate> {
        (self.one_week_ago >= self.first_day_of_this_month).then_some(self.one_week_ago)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_mid_month() {
        let dates = ReportDates::new(date(2024, 3, 15)).unwrap();
        assert_eq!(dates.as_of, date(2024, 3, 15));
        assert_eq!(dates.first_day_of_this_month, date(2024, 3, 1));
        assert_eq!(dates.first_day_of_last_month, date(2024, 2, 1));
        assert_eq!(dates.one_week_ago, date(2024, 3, 8));
        assert!(!dates.is_first_day_of_month());
        assert_eq!(dates.weekly_boundary(), Some(date(2024, 3, 8)));
    }

    #[test]
    fn test_january_reaches_into_previous_year() {
        let dates = ReportDates::new(date(2025, 1, 20)).unwrap();
        assert_eq!(dates.first_day_of_this_month, date(2025, 1, 1));
        assert_eq!(dates.first_day_of_last_month, date(2024, 12, 1));
    }

    #[test]
    fn test_first_day_of_month() {
        let dates = ReportDates::new(date(2024, 3, 1)).unwrap();
        assert!(dates.is_first_day_of_month());
        assert_eq!(dates.first_day_of_last_month, date(2024, 2, 1));
        assert_eq!(dates.one_week_ago, date(2024, 2, 23));
        assert_eq!(dates.weekly_boundary(), None);
    }

    #[test]
    fn test_weekly_boundary_on_the_eighth() {
        // 2024-03-08 minus seven days is exactly the first of the month
        let dates = ReportDates::new(date(2024, 3, 8)).unwrap();
        assert_eq!(dates.weekly_boundary(), Some(date(2024, 3, 1)));

        let dates = ReportDates::new(date(2024, 3, 7)).unwrap();
        assert_eq!(dates.weekly_boundary(), None);
    }

    #[test]
    fn test_end_of_month_after_short_month() {
        let dates = ReportDates::new(date(2024, 3, 31)).unwrap();
        assert_eq!(dates.first_day_of_last_month, date(2024, 2, 1));
        assert_eq!(dates.one_week_ago, date(2024, 3, 24));
    }

    #[test]
    fn test_out_of_range() {
        assert!(matches!(
            ReportDates::new(NaiveDate::MIN),
            Err(AcosError::InvalidDate(_))
        ));
    }
}
