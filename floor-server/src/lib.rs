//! Floor Server - restaurant front-of-house service logic
//!
//! # Overview
//!
//! Server-side logic for a point-of-service floor system:
//!
//! - **Tickets** (`tickets`): order ticket lifecycle with kitchen timing
//! - **Tables** (`tables`): table state, audit actions, fallback writes
//! - **Holds** (`holds`): reservation hold windows and the table-hold applier
//! - **Auth** (`auth`): staff role extraction and capability gating
//! - **Store** (`store`): document store client (HTTP backend or in-memory)
//! - **HTTP API** (`api`): RESTful interface
//!
//! # Module structure
//!
//! ```text
//! floor-server/src/
//! ├── core/          # configuration, state, server
//! ├── auth/          # role extraction, capability middleware
//! ├── store/         # document store clients
//! ├── tickets/       # ticket lifecycle and money arithmetic
//! ├── tables/        # table state and audit trail
//! ├── holds/         # reservation hold application
//! ├── api/           # HTTP routes and handlers
//! └── utils/         # errors, logging
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod holds;
pub mod store;
pub mod tables;
pub mod tickets;
pub mod utils;

// Re-export common types
pub use auth::CurrentStaff;
pub use core::{Config, Server, ServerState};
pub use store::{DocumentStore, HttpStore, MemoryStore, StoreError};
pub use utils::{AppError, AppResponse, AppResult};

// Re-export logger setup
pub use utils::logger::init_logger_with_file;
