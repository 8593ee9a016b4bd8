use chrono::{Datelike, Local, NaiveDate};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::AppError;

/// Share of calendar days assumed to be working days.
pub const WORKING_DAY_RATIO: f64 = 0.75;

const MIN_YEAR: i32 = 1970;
const MAX_YEAR: i32 = 9999;

/// Calendar month used as the aggregation window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct Period {
    #[schema(example = 2024)]
    year: i32,
    #[schema(example = 3)]
    month: u32,
}

impl Period {
    pub fn new(year: i32, month: u32) -> Result<Self, AppError> {
        if !(1..=12).contains(&month) {
            return Err(AppError::InvalidPeriod(format!(
                "month must be between 1 and 12, got {month}"
            )));
        }
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(AppError::InvalidPeriod(format!(
                "year must be between {MIN_YEAR} and {MAX_YEAR}, got {year}"
            )));
        }
        Ok(Self { year, month })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Period containing today's local date.
    pub fn current() -> Self {
        let today = Local::now().date_naive();
        Self {
            year: today.year(),
            month: today.month(),
        }
    }

    pub fn first_day(&self) -> NaiveDate {
        // year and month are validated in `new`
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    /// First day of the following month; December rolls into January.
    pub fn next_first_day(&self) -> NaiveDate {
        let (year, month) = if self.month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 1)
        };
        NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(NaiveDate::MAX)
    }

    /// Half-open date range `[start, end)` covering the month.
    pub fn bounds(&self) -> (NaiveDate, NaiveDate) {
        (self.first_day(), self.next_first_day())
    }

    pub fn days_in_month(&self) -> u32 {
        let (start, end) = self.bounds();
        (end - start).num_days() as u32
    }

    /// Heuristic working-day count, identical for everyone in the period.
    pub fn expected_working_days(&self) -> u32 {
        (self.days_in_month() as f64 * WORKING_DAY_RATIO).floor() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_out_of_range_month() {
        assert!(Period::new(2024, 0).is_err());
        assert!(Period::new(2024, 13).is_err());
        assert!(Period::new(1969, 5).is_err());
    }

    #[test]
    fn days_in_month_handles_leap_years() {
        assert_eq!(Period::new(2024, 2).unwrap().days_in_month(), 29);
        assert_eq!(Period::new(2023, 2).unwrap().days_in_month(), 28);
        assert_eq!(Period::new(2024, 3).unwrap().days_in_month(), 31);
        assert_eq!(Period::new(2024, 4).unwrap().days_in_month(), 30);
    }

    #[test]
    fn expected_working_days_is_three_quarters_floored() {
        assert_eq!(Period::new(2024, 3).unwrap().expected_working_days(), 23);
        assert_eq!(Period::new(2024, 4).unwrap().expected_working_days(), 22);
        assert_eq!(Period::new(2024, 2).unwrap().expected_working_days(), 21);
        assert_eq!(Period::new(2023, 2).unwrap().expected_working_days(), 21);
    }

    #[test]
    fn december_bounds_roll_into_next_year() {
        let (start, end) = Period::new(2024, 12).unwrap().bounds();
        assert_eq!(start, NaiveDate::from_ymd_opt(2024, 12, 1).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
    }

    #[test]
    fn current_period_is_valid() {
        let current = Period::current();
        assert!(Period::new(current.year(), current.month()).is_ok());
    }

    #[test]
    fn accessors_expose_validated_fields() {
        let period = Period::new(2023, 11).unwrap();
        assert_eq!((period.year(), period.month()), (2023, 11));
        assert_eq!(period.days_in_month(), 30);
        assert_eq!(
            serde_json::to_value(period).unwrap(),
            serde_json::json!({ "year": 2023, "month": 11 })
        );
    }
}
