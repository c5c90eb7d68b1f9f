//! Librarian: keeps per-tenant spaces, workloads and proxy routes converged
//! to a declarative permissions document.

pub mod config;
pub mod error;
pub mod lifecycle;
pub mod linkfarm;
pub mod observability;
pub mod permissions;
pub mod reaper;
pub mod reconcile;
pub mod reload;
pub mod resilience;
pub mod routing;
pub mod trigger;
pub mod workload;

pub use config::Settings;
pub use error::ReconcileError;
pub use lifecycle::Shutdown;
pub use permissions::{DesiredState, TenantSpec};
pub use reconcile::{CycleReport, Reconciler};
