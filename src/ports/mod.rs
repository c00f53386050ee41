//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the snapshot core and the outside world. Adapters implement these ports.
//!
//! - `ContextStore` - Persists the latest encoded snapshot (atomic replace)
//! - `CrashReportSender` - Uploads crash reports with their context

mod context_store;
mod crash_report_sender;

pub use context_store::{ContextStore, StoreError};
pub use crash_report_sender::{CrashReport, CrashReportSender, SendError};
