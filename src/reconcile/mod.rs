//! Reconciliation cycle.
//!
//! # Data Flow
//! ```text
//! trigger (startup or debounced document change)
//!     → permissions::load_desired_state        (abort cycle on failure)
//!     → linkfarm::LinkFarm::sync_all           (every tenant)
//!     → per non-reserved tenant:
//!         workload::WorkloadManager::recreate
//!         routing::RouteGenerator::write
//!     → reaper::reap_orphans
//!     → reload::ProxyReloader::reload
//!     → CycleReport (logged + recorded as metrics by the caller)
//! ```
//!
//! # Design Decisions
//! - Steps run sequentially in this order; the reaper always sees the rule
//!   files this cycle just wrote
//! - Per-tenant and per-entry failures are collected, never escalated
//! - Nothing is persisted between cycles: each one re-derives everything
//!   from the document

pub mod cycle;
pub mod report;

pub use cycle::Reconciler;
pub use report::CycleReport;
