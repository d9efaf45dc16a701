//! Reservation hold windows and the table-hold applier

pub mod applier;
pub mod window;

pub use applier::{HoldConfig, HoldOutcome, HoldReport, RESERVATIONS, apply_holds};
pub use window::{overlaps_window, reservations_in_window};
