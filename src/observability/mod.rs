//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Reconciler / trigger loop produce:
//!     → logging.rs (structured log events, one span per cycle)
//!     → metrics.rs (cycle counters, duration histogram, tenant gauge)
//!
//! Consumers:
//!     → stdout (pretty or JSON)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - Components return errors; only the cycle layer logs them
//! - Each cycle carries a UUID so its log lines can be grouped
//! - Metrics are recorded through the `metrics` facade and are no-ops
//!   unless the exporter is installed

pub mod logging;
pub mod metrics;
