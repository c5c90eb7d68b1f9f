//! Metrics collection and exposition.
//!
//! # Metrics
//! - `librarian_cycles_total` (counter): cycles by outcome (clean, partial, aborted)
//! - `librarian_cycle_duration_seconds` (histogram): wall time per cycle
//! - `librarian_tenants` (gauge): declared tenants in the last applied document
//! - `librarian_failures_total` (counter): failures by error kind
//! - `librarian_orphans_reaped_total` (counter)

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

use crate::error::ReconcileError;
use crate::reconcile::CycleReport;

/// Install the Prometheus exporter listening on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_cycle(report: &CycleReport, started: Instant) {
    let outcome = if report.is_clean() { "clean" } else { "partial" };
    counter!("librarian_cycles_total", "outcome" => outcome).increment(1);
    histogram!("librarian_cycle_duration_seconds").record(started.elapsed().as_secs_f64());
    gauge!("librarian_tenants").set(report.tenants as f64);
    counter!("librarian_orphans_reaped_total").increment(report.reaped.len() as u64);

    for error in &report.errors {
        counter!("librarian_failures_total", "kind" => error.kind()).increment(1);
    }
}

pub fn record_aborted_cycle(error: &ReconcileError, started: Instant) {
    counter!("librarian_cycles_total", "outcome" => "aborted").increment(1);
    histogram!("librarian_cycle_duration_seconds").record(started.elapsed().as_secs_f64());
    counter!("librarian_failures_total", "kind" => error.kind()).increment(1);
}
