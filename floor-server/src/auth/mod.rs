//! Staff identity and capability gating
//!
//! Identity is asserted by the trusted front-of-house client through the
//! `x-staff-role` header; there is no credential handling here. The
//! middleware layer turns the header into a [`CurrentStaff`] request
//! extension, and [`require_capability`] gates route groups on the role
//! capability matrix.

mod middleware;

pub use middleware::{CurrentStaff, extract_staff, require_capability};
