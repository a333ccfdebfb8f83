use chrono::{Datelike, Days, Months, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Weekday};

/// Minutes in a calendar day. Every day is treated as having a canonical
/// midnight; there is no DST correction anywhere in this module.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

pub fn start_of_month(d: NaiveDate) -> NaiveDate {
    d.with_day(1).unwrap_or(d)
}

pub fn start_of_day(dt: NaiveDateTime) -> NaiveDateTime {
    dt.date().and_time(NaiveTime::MIN)
}

/// Most recent `week_start` weekday at or before `d`.
pub fn start_of_week(d: NaiveDate, week_start: Weekday) -> NaiveDate {
    let offset =
        (d.weekday().num_days_from_sunday() + 7 - week_start.num_days_from_sunday()) % 7;
    d.checked_sub_days(Days::new(offset as u64)).unwrap_or(d)
}

pub fn add_days(d: NaiveDate, n: i64) -> NaiveDate {
    let shifted = if n >= 0 {
        d.checked_add_days(Days::new(n as u64))
    } else {
        d.checked_sub_days(Days::new(n.unsigned_abs()))
    };
    shifted.unwrap_or(d)
}

/// Month offset that rolls over year boundaries and lands on day 1 of the
/// target month. Day-of-month is deliberately not preserved so that grid
/// anchors stay stable.
pub fn add_months(d: NaiveDate, n: i32) -> NaiveDate {
    let first = start_of_month(d);
    let shifted = if n >= 0 {
        first.checked_add_months(Months::new(n as u32))
    } else {
        first.checked_sub_months(Months::new(n.unsigned_abs()))
    };
    shifted.unwrap_or(first)
}

pub fn is_same_day(a: NaiveDateTime, b: NaiveDateTime) -> bool {
    a.date() == b.date()
}

pub fn is_same_month(a: NaiveDateTime, b: NaiveDateTime) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

/// Minutes since midnight, in `[0, 1440)`.
pub fn minutes_since_start_of_day(dt: NaiveDateTime) -> u32 {
    dt.hour() * 60 + dt.minute()
}

/// Rounds to the nearest multiple of `step`, clamped to `[0, 1440 - step]`.
/// Input is fractional because callers quantize pixel offsets from a pressed
/// position in the week grid.
pub fn snap_minutes(mins: f64, step: u32) -> u32 {
    let step = step.max(1);
    let snapped = (mins / step as f64).round() as i64 * step as i64;
    let upper = (MINUTES_PER_DAY as i64 - step as i64).max(0);
    snapped.clamp(0, upper) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn start_of_month_returns_first_day() {
        assert_eq!(start_of_month(date(2026, 1, 15)), date(2026, 1, 1));
        assert_eq!(start_of_month(date(2026, 1, 1)), date(2026, 1, 1));
    }

    #[test]
    fn start_of_day_drops_time() {
        let dt = date(2026, 1, 15).and_hms_opt(9, 30, 45).unwrap();
        assert_eq!(start_of_day(dt), date(2026, 1, 15).and_hms_opt(0, 0, 0).unwrap());
    }

    #[test]
    fn start_of_week_sunday_based() {
        // 2026-01-15 is a Thursday.
        assert_eq!(start_of_week(date(2026, 1, 15), Weekday::Sun), date(2026, 1, 11));
    }

    #[test]
    fn start_of_week_monday_based() {
        assert_eq!(start_of_week(date(2026, 1, 15), Weekday::Mon), date(2026, 1, 12));
    }

    #[test]
    fn start_of_week_on_boundary_is_identity() {
        let sunday = date(2026, 1, 11);
        assert_eq!(start_of_week(sunday, Weekday::Sun), sunday);
    }

    #[test]
    fn start_of_week_spans_year_boundary() {
        // 2026-01-01 is a Thursday; the Sunday before is in December.
        assert_eq!(start_of_week(date(2026, 1, 1), Weekday::Sun), date(2025, 12, 28));
    }

    #[test]
    fn add_days_forward_and_back() {
        assert_eq!(add_days(date(2026, 1, 30), 3), date(2026, 2, 2));
        assert_eq!(add_days(date(2026, 1, 2), -3), date(2025, 12, 30));
    }

    #[test]
    fn add_months_clamps_to_first_of_month() {
        assert_eq!(add_months(date(2026, 1, 31), 1), date(2026, 2, 1));
    }

    #[test]
    fn add_months_rolls_over_year() {
        assert_eq!(add_months(date(2026, 11, 15), 3), date(2027, 2, 1));
        assert_eq!(add_months(date(2026, 2, 15), -3), date(2025, 11, 1));
    }

    #[test]
    fn add_months_round_trips_to_month_start() {
        let d = date(2026, 1, 31);
        assert_eq!(add_months(add_months(d, 7), -7), date(2026, 1, 1));
    }

    #[test]
    fn same_day_ignores_time() {
        let a = date(2026, 1, 15).and_hms_opt(0, 0, 0).unwrap();
        let b = date(2026, 1, 15).and_hms_opt(23, 59, 0).unwrap();
        assert!(is_same_day(a, b));
        assert!(!is_same_day(a, date(2026, 1, 16).and_hms_opt(0, 0, 0).unwrap()));
    }

    #[test]
    fn same_month_ignores_day() {
        let a = date(2026, 1, 1).and_hms_opt(9, 0, 0).unwrap();
        let b = date(2026, 1, 31).and_hms_opt(18, 0, 0).unwrap();
        assert!(is_same_month(a, b));
        assert!(!is_same_month(a, date(2026, 2, 1).and_hms_opt(9, 0, 0).unwrap()));
    }

    #[test]
    fn minutes_since_start_of_day_at_nine_thirty() {
        let dt = date(2026, 1, 15).and_hms_opt(9, 30, 0).unwrap();
        assert_eq!(minutes_since_start_of_day(dt), 570);
    }

    #[test]
    fn snap_rounds_to_nearest_step() {
        assert_eq!(snap_minutes(572.0, 30), 570);
        assert_eq!(snap_minutes(585.0, 30), 600);
    }

    #[test]
    fn snap_clamps_to_day_bounds() {
        assert_eq!(snap_minutes(-15.0, 30), 0);
        assert_eq!(snap_minutes(1439.0, 30), 1410);
    }

    #[test]
    fn snap_degrades_to_zero_when_step_exceeds_day() {
        assert_eq!(snap_minutes(100.0, 2000), 0);
        assert_eq!(snap_minutes(1439.0, MINUTES_PER_DAY), 0);
    }

    #[test]
    fn snap_is_idempotent() {
        for mins in [0.0, 17.0, 570.0, 572.0, 1439.9] {
            let once = snap_minutes(mins, 30);
            assert_eq!(snap_minutes(once as f64, 30), once);
        }
    }
}
