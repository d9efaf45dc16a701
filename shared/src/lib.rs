//! Shared domain types for the floor server
//!
//! Pure models and policy tables used across the workspace: tickets,
//! tables, reservations, and the staff role/capability matrix. No I/O
//! happens in this crate.

pub mod models;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use models::reservation::{Reservation, ReservationStatus};
pub use models::role::{Capability, StaffRole};
pub use models::table::{Table, TableAction, TableStatus, TableUpdate};
pub use models::ticket::{Ticket, TicketError, TicketStatus};
