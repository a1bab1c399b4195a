//! Break-overlap deduction.
//!
//! Sums the minutes of each scheduled break that fall inside the work
//! interval, recording an itemized entry per non-zero overlap.

use crate::models::{BreakInterval, BreakOverlap, TimeOfDay};

use super::time_math::overlap_minutes;

/// Computes the total break deduction and the itemized non-zero overlaps
/// for a work interval against a shift's break schedule.
///
/// Each overlap is bounded by the work interval, so a break straddling the
/// clock-out time is only partially deducted.
///
/// # Example
///
/// ```
/// use salary_engine::calculation::{deduct_breaks, ShiftCatalog};
/// use salary_engine::models::{ShiftKind, TimeOfDay};
///
/// let catalog = ShiftCatalog::default();
/// let start = TimeOfDay::parse("08:30").unwrap();
/// let end = TimeOfDay::parse("17:30").unwrap();
///
/// let (total, overlaps) = deduct_breaks(start, end, catalog.breaks_for(ShiftKind::Day));
/// assert_eq!(total, 95);
/// assert_eq!(overlaps.len(), 6);
/// ```
pub fn deduct_breaks(
    start: TimeOfDay,
    end: TimeOfDay,
    breaks: &[BreakInterval],
) -> (i64, Vec<BreakOverlap>) {
    let mut total = 0;
    let mut itemized = Vec::new();

    for interval in breaks {
        let minutes = overlap_minutes(start, end, interval.start, interval.end);
        if minutes > 0 {
            total += minutes;
            itemized.push(BreakOverlap {
                start: interval.start,
                end: interval.end,
                minutes,
            });
        }
    }

    (total, itemized)
}
