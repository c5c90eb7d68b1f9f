//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Settings → runtime + reloader → Reconciler
//!     → initial cycle → document watcher → trigger loop
//!
//! Shutdown (shutdown.rs):
//!     Signal received → trigger loop finishes its cycle → watcher dropped → exit
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger graceful shutdown
//! ```
//!
//! # Design Decisions
//! - The initial cycle runs before watching begins, unconditionally
//! - Fail fast at startup: a watcher that cannot start is fatal
//! - A cycle is never interrupted midway by shutdown

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::{Shutdown, ShutdownSignal};
