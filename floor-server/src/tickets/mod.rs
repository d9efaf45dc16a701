//! Ticket lifecycle
//!
//! - [`money`] - decimal-precise tax/total arithmetic
//! - [`service`] - store-backed ticket operations

pub mod money;
pub mod service;

pub use service::{AmountsPatch, TicketService};
