//! Declarative document subsystem.
//!
//! # Data Flow
//! ```text
//! permissions.yaml
//!     → loader.rs (read & deserialize)
//!     → validation.rs (tenant names, declared paths)
//!     → DesiredState (rebuilt in full, never patched)
//!     → consumed by one reconciliation cycle
//! ```
//!
//! # Design Decisions
//! - A document that cannot be read, parsed or validated aborts the cycle;
//!   whatever was applied before stays in place
//! - Reserved tenants are ordinary entries in the model; callers decide what
//!   to skip via `TenantSpec::is_reserved`

pub mod loader;
pub mod model;
pub mod validation;

pub use loader::load_desired_state;
pub use model::{DesiredState, TenantSpec, PRIVILEGED_TENANT, PUBLIC_TENANT, ROOT_EXPOSURE};
