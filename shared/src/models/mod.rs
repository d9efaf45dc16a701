//! Domain models
//!
//! - [`ticket`] - dine-in orders and the status transition graph
//! - [`table`] - physical tables and table-update audit actions
//! - [`reservation`] - booked seatings (read-only to the server)
//! - [`role`] - staff roles and the capability matrix

pub mod reservation;
pub mod role;
pub mod table;
pub mod ticket;

pub use reservation::{Reservation, ReservationStatus};
pub use role::{Capability, StaffRole};
pub use table::{Table, TableAction, TableStatus, TableUpdate};
pub use ticket::{Ticket, TicketError, TicketStatus};
