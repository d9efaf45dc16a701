//! Reservation Model
//!
//! Booked future seatings. The floor server only ever reads reservations;
//! the associated table is what gets written (hold application).

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::util::{day, to_minutes_opt};

/// Reservation booking status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ReservationStatus {
    Booked,
    Seated,
    Canceled,
    Completed,
    NoShow,
}

impl ReservationStatus {
    /// Active = anything that still occupies its slot. Only canceled
    /// reservations drop out of window math and hold application.
    pub fn is_active(self) -> bool {
        !matches!(self, ReservationStatus::Canceled)
    }
}

/// Reservation entity (read-only to this server)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reservation {
    pub id: String,
    /// Calendar day of the seating (time-of-day zeroed by the store)
    #[serde(with = "day")]
    pub reservation_date: NaiveDate,
    /// Start of the seating, `HH:MM` 24h local
    pub start_time: String,
    pub status: ReservationStatus,
    #[serde(default)]
    pub party_size: i32,
    /// Nullable: walk-in-list entries have no table yet
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_id: Option<String>,
    #[serde(default)]
    pub customer_name: String,
}

impl Reservation {
    /// Local wall-clock start (`reservation_date` + `start_time`).
    ///
    /// `None` when `start_time` is not a valid `HH:MM`.
    pub fn start_at(&self) -> Option<NaiveDateTime> {
        let minutes = to_minutes_opt(&self.start_time)?;
        self.reservation_date
            .and_hms_opt(minutes as u32 / 60, minutes as u32 % 60, 0)
    }
}
