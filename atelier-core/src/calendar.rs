use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

pub const GRID_CELLS: usize = 42;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub in_current_month: bool,
    pub is_today: bool,
}

/// Six full weeks starting from the Sunday on or before the 1st of the
/// month. `None` for an invalid year/month, or when the six weeks run
/// past the representable date range.
pub fn month_grid(year: i32, month: u32, today: NaiveDate) -> Option<Vec<CalendarDay>> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let offset = first.weekday().num_days_from_sunday() as i64;
    let start = first.checked_sub_signed(Duration::days(offset))?;

    (0..GRID_CELLS as i64)
        .map(|i| {
            let date = start.checked_add_signed(Duration::days(i))?;
            Some(CalendarDay {
                date,
                in_current_month: date.month() == month && date.year() == year,
                is_today: date == today,
            })
        })
        .collect()
}

/// Moves a (year, month) pair by `delta` months
pub fn shift_month(year: i32, month: u32, delta: i32) -> (i32, u32) {
    let index = year * 12 + month as i32 - 1 + delta;
    (index.div_euclid(12), index.rem_euclid(12) as u32 + 1)
}

pub fn month_title(year: i32, month: u32) -> Option<String> {
    NaiveDate::from_ymd_opt(year, month, 1).map(|d| d.format("%B %Y").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    #[test]
    fn test_grid_starts_on_sunday_and_has_42_cells() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let grid = month_grid(2024, 3, today).unwrap();

        assert_eq!(grid.len(), 42);
        assert_eq!(grid[0].date, NaiveDate::from_ymd_opt(2024, 2, 25).unwrap());
        assert_eq!(grid[0].date.weekday(), Weekday::Sun);
        assert!(!grid[0].in_current_month);
        assert_eq!(grid.iter().filter(|d| d.in_current_month).count(), 31);
        assert_eq!(grid.iter().filter(|d| d.is_today).count(), 1);
    }

    #[test]
    fn test_month_starting_on_sunday() {
        let today = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
        // September 2024 begins on a Sunday
        let grid = month_grid(2024, 9, today).unwrap();
        assert_eq!(grid[0].date, NaiveDate::from_ymd_opt(2024, 9, 1).unwrap());
        assert_eq!(grid[41].date, NaiveDate::from_ymd_opt(2024, 10, 12).unwrap());
    }

    #[test]
    fn test_february_in_leap_year() {
        let today = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        let grid = month_grid(2024, 2, today).unwrap();
        assert_eq!(grid.iter().filter(|d| d.in_current_month).count(), 29);
        assert!(grid.iter().any(|d| d.is_today && d.in_current_month));
    }

    #[test]
    fn test_invalid_month() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert!(month_grid(2024, 13, today).is_none());
    }

    #[test]
    fn test_grid_at_date_range_limits() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert!(month_grid(NaiveDate::MAX.year(), NaiveDate::MAX.month(), today).is_none());
        assert!(month_grid(262142, 11, today).is_some());
    }

    #[test]
    fn test_shift_month_wraps_years() {
        assert_eq!(shift_month(2024, 1, -1), (2023, 12));
        assert_eq!(shift_month(2024, 12, 1), (2025, 1));
        assert_eq!(shift_month(2024, 6, 0), (2024, 6));
        assert_eq!(month_title(2024, 3).as_deref(), Some("March 2024"));
    }
}
