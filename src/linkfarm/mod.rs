//! Link-farm subsystem.
//!
//! # Data Flow
//! ```text
//! DesiredState
//!     → ensure shared resources exist under the content root
//!     → per tenant (reserved tenants included):
//!         create space dir → wipe every entry → plan.rs (LinkEntry list)
//!         → create relative symlinks
//! ```
//!
//! # Design Decisions
//! - Every space is rebuilt from scratch each cycle; nothing is diffed
//! - Link targets are relative, so they survive relocating the content
//!   root on the host
//! - Failures are per entry: one broken link never stops the rest

pub mod plan;
pub mod sync;

pub use plan::{relative_path, LinkEntry};
pub use sync::{LinkFarm, LinkFarmReport};
