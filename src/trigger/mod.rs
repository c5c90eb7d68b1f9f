//! Change trigger subsystem.
//!
//! # Data Flow
//! ```text
//! notify backend thread
//!     → watcher.rs (filter: document base name, create/write only)
//!     → unbounded mpsc channel (buffers while a cycle runs)
//!     → debounce.rs (quiet window restarts on every event)
//!     → one reconciliation cycle per burst
//! ```
//!
//! # Design Decisions
//! - The listener only enqueues; reconciliation runs on the single
//!   consumer, so cycles never overlap and need no locks
//! - Events that arrive during a cycle are drained afterwards and collapse
//!   into at most one more cycle
//! - Notification errors are logged and never stop the daemon

pub mod debounce;
pub mod watcher;

pub use debounce::{run_trigger_loop, Debouncer};
pub use watcher::{is_document_event, ChangeEvent, DocumentWatcher};
