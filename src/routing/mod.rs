//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! TenantSpec (non-reserved)
//!     → RouteRecord::derive (hostname, upstream)
//!     → render.rs (nginx server block)
//!     → generator.rs (write <routing_dir>/space-<tenant>.conf)
//!
//! Reaper:
//!     generator.rs lists space-*.conf → tenant names
//! ```
//!
//! # Design Decisions
//! - Hostname, upstream and file name are pure functions of the tenant
//!   name; the file name can be inverted back to the tenant
//! - Files are overwritten unconditionally (no diffing)
//! - Only files matching the rule-file pattern are ever listed, so other
//!   configs in the same directory are left alone

pub mod generator;
pub mod render;

pub use generator::{route_file_name, tenant_from_file_name, RouteGenerator};
pub use render::RouteRecord;
