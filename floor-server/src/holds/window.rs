//! Reservation time-window arithmetic
//!
//! Pure minute math over `HH:MM` wall-clock times. Used by the hold
//! applier and by day-view rendering endpoints; intervals are half-open,
//! so touching endpoints never count as overlapping.

use chrono::NaiveDate;

use shared::models::reservation::Reservation;
pub use shared::util::to_minutes_opt as to_minutes;

/// Does a reservation starting at `res_start` (occupying `block` minutes)
/// overlap the window `[window_start, window_end)`?
///
/// Standard half-open overlap test:
/// `max(resStart, windowStart) < min(resStart + block, windowEnd)`.
/// Malformed start times never overlap.
pub fn overlaps_window(
    res_start: &str,
    window_start: i32,
    window_end: i32,
    block: i32,
) -> bool {
    let Some(res_start) = to_minutes(res_start) else {
        return false;
    };
    let res_end = res_start + block;
    res_start.max(window_start) < res_end.min(window_end)
}

/// Reservations on `date` that are active (not canceled) and overlap the
/// window starting at `time` (`HH:MM`) of length `block` minutes.
///
/// Order of the input list is preserved.
pub fn reservations_in_window<'a>(
    reservations: &'a [Reservation],
    date: NaiveDate,
    time: &str,
    block: i32,
) -> Vec<&'a Reservation> {
    let Some(window_start) = to_minutes(time) else {
        return Vec::new();
    };
    let window_end = window_start + block;

    reservations
        .iter()
        .filter(|r| r.reservation_date == date)
        .filter(|r| r.status.is_active())
        .filter(|r| overlaps_window(&r.start_time, window_start, window_end, block))
        .collect()
}
