//! Daemon settings subsystem.
//!
//! # Data Flow
//! ```text
//! settings file (TOML, optional) + CLI flags / environment
//!     → loader.rs (parse & deserialize, apply host root)
//!     → validation.rs (semantic checks)
//!     → Settings (validated, immutable)
//!     → shared via Arc with every reconciliation component
//! ```
//!
//! # Design Decisions
//! - Settings are immutable once loaded; changes require a restart
//! - All fields have defaults, so no settings file is needed at all
//! - The declarative document is not a setting: it is re-read every cycle
//!   by `crate::permissions`

pub mod loader;
pub mod schema;
pub mod validation;

pub use schema::Settings;
pub use schema::PathsConfig;
pub use schema::WorkloadConfig;
pub use schema::RoutingConfig;
pub use schema::ReloadConfig;
pub use schema::TriggerConfig;
pub use schema::TimeoutConfig;
pub use schema::ObservabilityConfig;
pub use schema::LogFormat;
