//! Crash Context - versioned application-context snapshots for crash reports
//!
//! This crate captures the last known application state (tracking consent,
//! last view, user, network) as a compact self-describing snapshot, so that a
//! crash report sent after a restart can carry the context of the crash.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
