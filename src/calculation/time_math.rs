//! Minute arithmetic over clock-time intervals.
//!
//! All interval math anchors both endpoints to a reference day and adds a
//! day to an end time that is textually earlier than its start. This models
//! shifts and breaks that cross midnight without carrying real dates
//! through the calculation.

use crate::models::{TimeOfDay, MINUTES_PER_DAY};

/// Returns the interval endpoints as minutes from the reference midnight,
/// with the end pushed to the following day when it precedes the start.
fn normalized(start: TimeOfDay, end: TimeOfDay) -> (i64, i64) {
    let start_min = start.minutes_from_midnight();
    let mut end_min = end.minutes_from_midnight();
    if end_min < start_min {
        end_min += MINUTES_PER_DAY;
    }
    (start_min, end_min)
}

/// Whether the interval's end falls on the day after its start.
pub fn crosses_midnight(start: TimeOfDay, end: TimeOfDay) -> bool {
    end.minutes_from_midnight() < start.minutes_from_midnight()
}

/// Elapsed minutes from `start` to `end`.
///
/// An end earlier than the start is treated as next-day, so the result is
/// never negative. No upper bound is enforced; a nonsensical 30-hour span
/// cannot arise because both endpoints are clock times on adjacent days.
///
/// # Example
///
/// ```
/// use salary_engine::calculation::duration_minutes;
/// use salary_engine::models::TimeOfDay;
///
/// let start = TimeOfDay::parse("23:00").unwrap();
/// let end = TimeOfDay::parse("02:00").unwrap();
/// assert_eq!(duration_minutes(start, end), 180);
/// ```
pub fn duration_minutes(start: TimeOfDay, end: TimeOfDay) -> i64 {
    let (start_min, end_min) = normalized(start, end);
    end_min - start_min
}

/// Overlap in minutes between two clock-time intervals.
///
/// Each interval is independently normalized for midnight crossing before
/// the overlap `max(0, min(ends) - max(starts))` is taken.
///
/// # Example
///
/// ```
/// use salary_engine::calculation::overlap_minutes;
/// use salary_engine::models::TimeOfDay;
///
/// let t = |s: &str| TimeOfDay::parse(s).unwrap();
/// assert_eq!(overlap_minutes(t("08:30"), t("17:30"), t("10:40"), t("11:25")), 45);
/// assert_eq!(overlap_minutes(t("08:30"), t("17:30"), t("17:20"), t("17:35")), 10);
/// assert_eq!(overlap_minutes(t("08:30"), t("17:30"), t("18:00"), t("18:30")), 0);
/// ```
pub fn overlap_minutes(
    a_start: TimeOfDay,
    a_end: TimeOfDay,
    b_start: TimeOfDay,
    b_end: TimeOfDay,
) -> i64 {
    let (a_start_min, a_end_min) = normalized(a_start, a_end);
    let (b_start_min, b_end_min) = normalized(b_start, b_end);

    let overlap = a_end_min.min(b_end_min) - a_start_min.max(b_start_min);
    overlap.max(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> TimeOfDay {
        TimeOfDay::parse(s).unwrap()
    }

    // ==========================================================================
    // TM-001: plain same-day duration
    // ==========================================================================
    #[test]
    fn test_tm_001_same_day_duration() {
        assert_eq!(duration_minutes(t("08:30"), t("17:30")), 540);
    }

    // ==========================================================================
    // TM-002: midnight-crossing duration is positive
    // ==========================================================================
    #[test]
    fn test_tm_002_midnight_crossing_duration() {
        assert_eq!(duration_minutes(t("23:00"), t("02:00")), 180);
        assert_eq!(duration_minutes(t("16:45"), t("01:25")), 520);
    }

    // ==========================================================================
    // TM-003: zero-length interval
    // ==========================================================================
    #[test]
    fn test_tm_003_zero_duration() {
        assert_eq!(duration_minutes(t("10:00"), t("10:00")), 0);
    }

    #[test]
    fn test_crosses_midnight() {
        assert!(crosses_midnight(t("16:45"), t("01:25")));
        assert!(!crosses_midnight(t("08:30"), t("17:30")));
        assert!(!crosses_midnight(t("10:00"), t("10:00")));
    }

    // ==========================================================================
    // TM-004: overlap of nested interval equals its full length
    // ==========================================================================
    #[test]
    fn test_tm_004_nested_overlap() {
        assert_eq!(overlap_minutes(t("08:30"), t("17:30"), t("10:40"), t("11:25")), 45);
    }

    // ==========================================================================
    // TM-005: partial overlap at the work-interval edge
    // ==========================================================================
    #[test]
    fn test_tm_005_partial_overlap_at_edge() {
        // Break 17:20-17:35 against work ending 17:30: only 10 minutes count.
        assert_eq!(overlap_minutes(t("08:30"), t("17:30"), t("17:20"), t("17:35")), 10);
    }

    // ==========================================================================
    // TM-006: disjoint intervals have zero overlap
    // ==========================================================================
    #[test]
    fn test_tm_006_disjoint_intervals() {
        assert_eq!(overlap_minutes(t("08:30"), t("12:00"), t("13:00"), t("13:30")), 0);
    }

    #[test]
    fn test_touching_intervals_have_zero_overlap() {
        assert_eq!(overlap_minutes(t("08:00"), t("12:00"), t("12:00"), t("12:30")), 0);
    }

    #[test]
    fn test_overnight_work_against_evening_break() {
        // Night shift 16:45-01:25 against the 20:55-21:40 break.
        assert_eq!(overlap_minutes(t("16:45"), t("01:25"), t("20:55"), t("21:40")), 45);
    }

    #[test]
    fn test_overnight_work_against_pre_midnight_break() {
        assert_eq!(overlap_minutes(t("16:45"), t("01:25"), t("23:10"), t("23:20")), 10);
    }

    #[test]
    fn test_post_midnight_break_does_not_wrap_on_its_own() {
        // A break lying entirely after midnight (00:50-01:00) stays on the
        // reference day under independent normalization, so it falls before
        // the overnight work interval and contributes nothing.
        assert_eq!(overlap_minutes(t("16:45"), t("01:25"), t("00:50"), t("01:00")), 0);
    }

    #[test]
    fn test_wrapping_break_is_normalized() {
        // A break spanning midnight overlaps both sides of an overnight
        // work interval.
        assert_eq!(overlap_minutes(t("22:00"), t("06:00"), t("23:50"), t("00:10")), 20);
    }

    #[test]
    fn test_overlap_is_bounded_by_duration() {
        let cases = [
            ("08:30", "17:30", "00:00", "23:59"),
            ("16:45", "01:25", "20:55", "21:40"),
            ("23:00", "02:00", "22:00", "03:00"),
        ];
        for (ws, we, bs, be) in cases {
            let overlap = overlap_minutes(t(ws), t(we), t(bs), t(be));
            let duration = duration_minutes(t(ws), t(we));
            assert!(overlap >= 0);
            assert!(overlap <= duration, "{ws}-{we} vs {bs}-{be}");
        }
    }
}
