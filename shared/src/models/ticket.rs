//! Ticket Model
//!
//! A ticket is one dine-in order and its billing state. Status changes are
//! constrained by a fixed directed transition graph; `closed` is terminal.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::util::{naive_dt, naive_dt_opt};

/// Maximum length of the special-instructions note
pub const MAX_SPECIAL_INSTRUCTIONS: usize = 500;

/// Ticket lifecycle status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    #[default]
    Open,
    SentToKitchen,
    Preparing,
    Ready,
    Served,
    PaymentProcessing,
    Closed,
}

impl TicketStatus {
    /// All statuses, in lifecycle order
    pub const ALL: [TicketStatus; 7] = [
        TicketStatus::Open,
        TicketStatus::SentToKitchen,
        TicketStatus::Preparing,
        TicketStatus::Ready,
        TicketStatus::Served,
        TicketStatus::PaymentProcessing,
        TicketStatus::Closed,
    ];

    /// Legal targets from this status.
    ///
    /// Each non-terminal status allows one step forward and one step back;
    /// `open` may also close directly (void before anything was fired).
    /// `closed` has no outgoing transitions.
    pub fn allowed_targets(self) -> &'static [TicketStatus] {
        use TicketStatus::*;
        match self {
            Open => &[SentToKitchen, Closed],
            SentToKitchen => &[Preparing, Open],
            Preparing => &[Ready, SentToKitchen],
            Ready => &[Served, Preparing],
            Served => &[PaymentProcessing, Ready],
            PaymentProcessing => &[Closed, Served],
            Closed => &[],
        }
    }

    pub fn can_transition_to(self, target: TicketStatus) -> bool {
        self.allowed_targets().contains(&target)
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, TicketStatus::Closed)
    }

    /// Wire name (matches the serde rendition)
    pub fn as_str(self) -> &'static str {
        match self {
            TicketStatus::Open => "open",
            TicketStatus::SentToKitchen => "sent_to_kitchen",
            TicketStatus::Preparing => "preparing",
            TicketStatus::Ready => "ready",
            TicketStatus::Served => "served",
            TicketStatus::PaymentProcessing => "payment_processing",
            TicketStatus::Closed => "closed",
        }
    }
}

impl std::fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ticket domain errors
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TicketError {
    /// Requested status change is not in the transition graph
    #[error("invalid transition: {from} -> {to}")]
    InvalidTransition {
        from: TicketStatus,
        to: TicketStatus,
    },

    /// Malformed ticket input
    #[error("validation failed: {0}")]
    Validation(String),
}

/// Ticket entity (one dine-in order)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Ticket {
    pub id: String,
    /// Unique display code (e.g. "T-0042")
    pub ticket_number: String,
    #[serde(default)]
    pub table_id: String,
    #[serde(default)]
    pub server_id: String,
    pub customer_count: i32,
    pub status: TicketStatus,
    #[serde(default)]
    pub subtotal_amount: f64,
    #[serde(default)]
    pub tax_amount: f64,
    #[serde(default)]
    pub tip_amount: f64,
    #[serde(default)]
    pub total_amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_instructions: Option<String>,
    #[serde(with = "naive_dt")]
    pub created: NaiveDateTime,
    #[serde(with = "naive_dt")]
    pub updated: NaiveDateTime,
    /// Stamped when the ticket enters `preparing`
    #[serde(default, with = "naive_dt_opt")]
    pub kitchen_start_time: Option<NaiveDateTime>,
    /// Stamped when the ticket enters `ready`
    #[serde(default, with = "naive_dt_opt")]
    pub kitchen_ready_time: Option<NaiveDateTime>,
}

impl Ticket {
    /// Create a new ticket in `open` state with zeroed monetary fields.
    pub fn open(
        id: impl Into<String>,
        ticket_number: impl Into<String>,
        table_id: impl Into<String>,
        server_id: impl Into<String>,
        customer_count: i32,
        now: NaiveDateTime,
    ) -> Result<Self, TicketError> {
        if customer_count <= 0 {
            return Err(TicketError::Validation(format!(
                "customer_count must be positive, got {customer_count}"
            )));
        }
        Ok(Self {
            id: id.into(),
            ticket_number: ticket_number.into(),
            table_id: table_id.into(),
            server_id: server_id.into(),
            customer_count,
            status: TicketStatus::Open,
            subtotal_amount: 0.0,
            tax_amount: 0.0,
            tip_amount: 0.0,
            total_amount: 0.0,
            special_instructions: None,
            created: now,
            updated: now,
            kitchen_start_time: None,
            kitchen_ready_time: None,
        })
    }

    /// Apply a status transition.
    ///
    /// Rejects targets outside the graph with [`TicketError::InvalidTransition`]
    /// (the error names the rejected target) and leaves the ticket unchanged.
    /// On success the status and `updated` stamp change; entering `preparing`
    /// stamps `kitchen_start_time` (unconditionally, on every entry) and
    /// entering `ready` stamps `kitchen_ready_time`.
    pub fn transition(
        &mut self,
        target: TicketStatus,
        now: NaiveDateTime,
    ) -> Result<(), TicketError> {
        if !self.status.can_transition_to(target) {
            return Err(TicketError::InvalidTransition {
                from: self.status,
                to: target,
            });
        }

        self.status = target;
        self.updated = now;
        match target {
            TicketStatus::Preparing => self.kitchen_start_time = Some(now),
            TicketStatus::Ready => self.kitchen_ready_time = Some(now),
            _ => {}
        }
        Ok(())
    }

    /// Kitchen cook time in milliseconds; `None` when either stamp is missing.
    pub fn cooking_duration_ms(&self) -> Option<i64> {
        let start = self.kitchen_start_time?;
        let ready = self.kitchen_ready_time?;
        Some(ready.signed_duration_since(start).num_milliseconds())
    }
}

/// Create ticket payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketCreate {
    pub table_id: String,
    pub server_id: String,
    pub customer_count: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_instructions: Option<String>,
}

impl TicketCreate {
    pub fn validate(&self) -> Result<(), TicketError> {
        if self.customer_count <= 0 {
            return Err(TicketError::Validation(format!(
                "customer_count must be positive, got {}",
                self.customer_count
            )));
        }
        if self.table_id.trim().is_empty() {
            return Err(TicketError::Validation("table_id is required".into()));
        }
        if let Some(note) = &self.special_instructions
            && note.len() > MAX_SPECIAL_INSTRUCTIONS
        {
            return Err(TicketError::Validation(format!(
                "special_instructions exceeds {MAX_SPECIAL_INSTRUCTIONS} characters"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 8, 31)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn ticket(status: TicketStatus) -> Ticket {
        let mut t = Ticket::open("t1", "T-0001", "tbl1", "srv1", 2, at(12, 0)).unwrap();
        t.status = status;
        t
    }

    #[test]
    fn transition_succeeds_iff_target_allowed() {
        for from in TicketStatus::ALL {
            for to in TicketStatus::ALL {
                let mut t = ticket(from);
                let before = t.clone();
                let result = t.transition(to, at(13, 0));
                if from.allowed_targets().contains(&to) {
                    assert!(result.is_ok(), "{from} -> {to} should be legal");
                    assert_eq!(t.status, to);
                } else {
                    assert_eq!(
                        result,
                        Err(TicketError::InvalidTransition { from, to }),
                        "{from} -> {to} should be rejected"
                    );
                    assert_eq!(t, before, "rejected transition must not mutate the ticket");
                }
            }
        }
    }

    #[test]
    fn closed_is_terminal() {
        assert!(TicketStatus::Closed.allowed_targets().is_empty());
        let mut t = ticket(TicketStatus::Closed);
        for to in TicketStatus::ALL {
            assert!(t.transition(to, at(13, 0)).is_err());
        }
    }

    #[test]
    fn rejection_names_target_status() {
        let mut t = ticket(TicketStatus::Open);
        let err = t.transition(TicketStatus::Ready, at(13, 0)).unwrap_err();
        assert!(err.to_string().contains("ready"), "error was: {err}");
    }

    #[test]
    fn entering_preparing_stamps_kitchen_start() {
        let mut t = ticket(TicketStatus::SentToKitchen);
        t.transition(TicketStatus::Preparing, at(12, 5)).unwrap();
        assert_eq!(t.kitchen_start_time, Some(at(12, 5)));
        assert_eq!(t.kitchen_ready_time, None);
    }

    #[test]
    fn reentering_preparing_restamps_kitchen_start() {
        let mut t = ticket(TicketStatus::SentToKitchen);
        t.transition(TicketStatus::Preparing, at(12, 5)).unwrap();
        t.transition(TicketStatus::SentToKitchen, at(12, 6)).unwrap();
        t.transition(TicketStatus::Preparing, at(12, 10)).unwrap();
        // Stamped per entry, not preserved from the first pass
        assert_eq!(t.kitchen_start_time, Some(at(12, 10)));
    }

    #[test]
    fn cooking_duration_requires_both_stamps() {
        let mut t = ticket(TicketStatus::SentToKitchen);
        assert_eq!(t.cooking_duration_ms(), None);
        t.transition(TicketStatus::Preparing, at(12, 5)).unwrap();
        assert_eq!(t.cooking_duration_ms(), None);
        t.transition(TicketStatus::Ready, at(12, 19)).unwrap();
        assert_eq!(t.cooking_duration_ms(), Some(14 * 60 * 1000));
    }

    #[test]
    fn open_ticket_starts_with_zero_money() {
        let t = ticket(TicketStatus::Open);
        assert_eq!(t.subtotal_amount, 0.0);
        assert_eq!(t.total_amount, 0.0);
    }

    #[test]
    fn open_rejects_non_positive_party() {
        assert!(Ticket::open("t", "T-1", "tbl", "srv", 0, at(12, 0)).is_err());
        assert!(Ticket::open("t", "T-1", "tbl", "srv", -3, at(12, 0)).is_err());
    }

    #[test]
    fn status_serde_uses_snake_case() {
        let s = serde_json::to_string(&TicketStatus::SentToKitchen).unwrap();
        assert_eq!(s, "\"sent_to_kitchen\"");
        let back: TicketStatus = serde_json::from_str("\"payment_processing\"").unwrap();
        assert_eq!(back, TicketStatus::PaymentProcessing);
    }
}
