//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Runtime / proxy command:
//!     → timeouts.rs (enforce deadline, capture diagnostics)
//!     → caller maps CommandError into the per-tenant error taxonomy
//! ```
//!
//! # Design Decisions
//! - Every external call has a deadline; a hung runtime must not stall the
//!   cycle forever
//! - No retries inside a cycle: the next cycle re-applies everything

pub mod timeouts;

pub use timeouts::{run_with_timeout, CommandError};
