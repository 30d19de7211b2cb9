//! Date Classification
//!
//! Pure calendar-date helpers for due-date labels and overdue checks. The
//! current date is always passed in by the caller (and re-read from the
//! clock on every render) so classification never goes stale.

use chrono::{Days, Local, NaiveDate};

/// Current calendar date from the local wall clock.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Display label for a due date: "Today", "Tomorrow", or e.g. "16 Jun".
pub fn due_label(due: NaiveDate, today: NaiveDate) -> String {
    if due == today {
        return "Today".to_string();
    }
    if Some(due) == today.succ_opt() {
        return "Tomorrow".to_string();
    }
    due.format("%-d %b").to_string()
}

/// A due date is overdue iff it is strictly before the current date. A task
/// with no due date is never overdue.
pub fn is_overdue(due: Option<NaiveDate>, today: NaiveDate) -> bool {
    due.is_some_and(|due| due < today)
}

/// Last day of the "upcoming" window, inclusive.
pub fn upcoming_end(today: NaiveDate) -> NaiveDate {
    today + Days::new(7)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn label_for_current_date_is_today() {
        let today = date(2024, 6, 10);
        assert_eq!(due_label(today, today), "Today");
    }

    #[test]
    fn label_for_next_date_is_tomorrow() {
        let today = date(2024, 6, 10);
        assert_eq!(due_label(date(2024, 6, 11), today), "Tomorrow");
    }

    #[test]
    fn label_crosses_month_boundary() {
        let today = date(2024, 6, 30);
        assert_eq!(due_label(date(2024, 7, 1), today), "Tomorrow");
    }

    #[test]
    fn other_dates_format_as_day_month() {
        let today = date(2024, 6, 10);
        assert_eq!(due_label(date(2024, 6, 16), today), "16 Jun");
        assert_eq!(due_label(date(2024, 12, 1), today), "1 Dec");
        assert_eq!(due_label(date(2024, 6, 9), today), "9 Jun");
    }

    #[test]
    fn overdue_is_strictly_before_today() {
        let today = date(2024, 6, 10);
        assert!(is_overdue(Some(date(2024, 6, 9)), today));
        assert!(!is_overdue(Some(today), today));
        assert!(!is_overdue(Some(date(2024, 6, 11)), today));
    }

    #[test]
    fn absent_due_date_is_never_overdue() {
        assert!(!is_overdue(None, date(2024, 6, 10)));
        assert!(!is_overdue(None, date(1970, 1, 1)));
    }

    #[test]
    fn upcoming_window_ends_seven_days_out() {
        assert_eq!(upcoming_end(date(2024, 6, 10)), date(2024, 6, 17));
        assert_eq!(upcoming_end(date(2024, 12, 28)), date(2025, 1, 4));
    }
}
