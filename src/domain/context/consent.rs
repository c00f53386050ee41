//! TrackingConsent enum for the user's data-collection decision.

use std::fmt;

/// Whether the user allowed telemetry collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TrackingConsent {
    Granted,
    NotGranted,
    /// No decision yet; data is buffered but not uploaded.
    #[default]
    Pending,
}

impl fmt::Display for TrackingConsent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TrackingConsent::Granted => "Granted",
            TrackingConsent::NotGranted => "NotGranted",
            TrackingConsent::Pending => "Pending",
        };
        write!(f, "{}", s)
    }
}
