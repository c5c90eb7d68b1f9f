//! Workload lifecycle subsystem.
//!
//! # Data Flow
//! ```text
//! TenantSpec (non-reserved)
//!     → WorkloadRecord::derive (identity, mounts, credential)
//!     → manager.rs: runtime.remove(identity)   (absent is fine)
//!     → manager.rs: runtime.run(record)
//!     → docker.rs (CLI invocation under a deadline)
//! ```
//!
//! # Design Decisions
//! - Destructive recreate on every cycle: credential and mount changes
//!   always take effect, at the cost of a short gap per tenant
//! - Identity is a pure function of the tenant name, so the reaper can find
//!   a workload without any persisted record
//! - `ContainerRuntime` is the seam for tests and alternative runtimes

pub mod docker;
pub mod manager;
pub mod runtime;

pub use docker::DockerCli;
pub use manager::WorkloadManager;
pub use runtime::{ContainerRuntime, Mount, RuntimeError, WorkloadRecord};
