//! Crash Report Sender Port - Interface for uploading crash reports.
//!
//! The sender receives each report together with the context captured
//! before the crash. The context is either bytes that decode to a valid
//! snapshot or `None`, the "no context" sentinel.

use crate::domain::foundation::Timestamp;

/// Errors that can occur while sending a crash report
#[derive(Debug, thiserror::Error)]
pub enum SendError {
    #[error("Crash report upload failed: {0}")]
    UploadFailed(String),
}

/// A crash captured by the platform crash handler.
#[derive(Debug, Clone, PartialEq)]
pub struct CrashReport {
    /// Signal or exception type, e.g. `SIGSEGV`
    pub kind: String,
    pub message: String,
    pub stack: String,
    pub date: Timestamp,
}

impl CrashReport {
    pub fn new(
        kind: impl Into<String>,
        message: impl Into<String>,
        stack: impl Into<String>,
        date: Timestamp,
    ) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
            stack: stack.into(),
            date,
        }
    }
}

/// Port for delivering crash reports with their context
pub trait CrashReportSender: Send + Sync {
    /// Send a crash report
    ///
    /// # Arguments
    /// * `report` - The crash report
    /// * `context` - Encoded context snapshot, or `None` if unavailable
    ///
    /// # Errors
    /// Returns `SendError` if the report could not be delivered
    fn send(&self, report: CrashReport, context: Option<Vec<u8>>) -> Result<(), SendError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Compile-time check that trait is object-safe
    #[allow(dead_code)]
    fn assert_object_safe(_: &dyn CrashReportSender) {}

    #[test]
    fn test_crash_report_new() {
        let date = Timestamp::now();
        let report = CrashReport::new("SIGABRT", "abort()", "0 main", date);
        assert_eq!(report.kind, "SIGABRT");
        assert_eq!(report.date, date);
    }

    #[test]
    fn test_send_error_display() {
        let err = SendError::UploadFailed("timeout".to_string());
        assert!(err.to_string().contains("timeout"));
    }
}
