//! CrashContextReader - restart-time access to the previous context.
//!
//! Takes the previous run's snapshot out of the store before the tracker of
//! the new run starts writing, and holds it until the crash report it
//! belongs to has been sent. Snapshots written by the new run are never
//! touched. A snapshot that fails to decode is reported and treated as
//! "no prior context".

use tracing::{debug, warn};

use crate::application::restore_snapshot;
use crate::domain::context::ContextState;
use crate::ports::{ContextStore, CrashReport, CrashReportSender, SendError, StoreError};

#[derive(Debug, Clone, Default)]
pub struct CrashContextReader {
    previous: Option<Vec<u8>>,
}

impl CrashContextReader {
    /// Takes the previous snapshot out of `store`.
    ///
    /// Call this before the new run's [`ContextTracker`](super::ContextTracker)
    /// writes its first snapshot.
    ///
    /// # Errors
    /// Returns `StoreError` if the store cannot be read. The snapshot then
    /// stays stored; use [`CrashContextReader::default`] to go on without
    /// context.
    pub fn take_from<S: ContextStore + ?Sized>(store: &S) -> Result<Self, StoreError> {
        let previous = store.take()?;
        if let Some(bytes) = &previous {
            debug!(bytes = bytes.len(), "Took previous context snapshot");
        }
        Ok(Self { previous })
    }

    /// Returns true while a previous snapshot is held.
    pub fn has_previous(&self) -> bool {
        self.previous.is_some()
    }

    /// Restores the context captured before the last termination.
    ///
    /// Returns `None` when there was no snapshot or it does not decode.
    pub fn restore_previous(&self) -> Option<ContextState> {
        let bytes = self.previous.as_deref()?;
        match restore_snapshot(bytes) {
            Ok(state) => {
                debug!(bytes = bytes.len(), "Restored previous context");
                Some(state)
            }
            Err(e) => {
                warn!(error = %e, "Discarding unreadable context snapshot");
                None
            }
        }
    }

    /// Sends a crash report together with the previous context.
    ///
    /// The sender receives the held bytes only if they decode; otherwise it
    /// receives `None`. The held snapshot is dropped once the report has
    /// been delivered and kept for a retry if delivery fails.
    pub fn send_pending(
        &mut self,
        report: CrashReport,
        sender: &dyn CrashReportSender,
    ) -> Result<(), SendError> {
        let context = self
            .previous
            .clone()
            .filter(|bytes| match restore_snapshot(bytes) {
                Ok(_) => true,
                Err(e) => {
                    warn!(error = %e, "Sending crash report without context");
                    false
                }
            });

        sender.send(report, context)?;
        self.previous = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemoryContextStore;
    use crate::application::ContextTracker;
    use crate::domain::context::TrackingConsent;
    use crate::domain::foundation::Timestamp;
    use crate::domain::value::AttributePolicy;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingSender {
        sent: Mutex<Vec<(CrashReport, Option<Vec<u8>>)>>,
        fail: bool,
    }

    impl CrashReportSender for RecordingSender {
        fn send(&self, report: CrashReport, context: Option<Vec<u8>>) -> Result<(), SendError> {
            if self.fail {
                return Err(SendError::UploadFailed("offline".to_string()));
            }
            self.sent.lock().unwrap().push((report, context));
            Ok(())
        }
    }

    fn report() -> CrashReport {
        CrashReport::new("SIGSEGV", "segfault", "0 main", Timestamp::now())
    }

    fn reader_over(bytes: &str) -> CrashContextReader {
        CrashContextReader::take_from(&InMemoryContextStore::with_snapshot(bytes)).unwrap()
    }

    #[test]
    fn restore_previous_returns_none_when_empty() {
        let reader = CrashContextReader::take_from(&InMemoryContextStore::new()).unwrap();
        assert!(!reader.has_previous());
        assert!(reader.restore_previous().is_none());
    }

    #[test]
    fn restore_previous_decodes_taken_snapshot() {
        let store = InMemoryContextStore::with_snapshot(r#"{"ctc":0}"#);
        let reader = CrashContextReader::take_from(&store).unwrap();

        let state = reader.restore_previous().unwrap();

        assert_eq!(state.tracking_consent, TrackingConsent::Granted);
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn restore_previous_treats_truncated_bytes_as_no_context() {
        assert!(reader_over(r#"{"ctc":0,"#).restore_previous().is_none());
    }

    #[test]
    fn send_pending_forwards_valid_context() {
        let mut reader = reader_over(r#"{"ctc":1}"#);
        let sender = RecordingSender::default();

        reader.send_pending(report(), &sender).unwrap();

        let sent = sender.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].1, Some(br#"{"ctc":1}"#.to_vec()));
        assert!(!reader.has_previous());
    }

    #[test]
    fn send_pending_uses_sentinel_for_invalid_context() {
        let mut reader = reader_over(r#"{"ctc":99}"#);
        let sender = RecordingSender::default();

        reader.send_pending(report(), &sender).unwrap();

        assert_eq!(sender.sent.lock().unwrap()[0].1, None);
    }

    #[test]
    fn send_pending_keeps_snapshot_when_upload_fails() {
        let mut reader = reader_over(r#"{"ctc":1}"#);
        let sender = RecordingSender {
            fail: true,
            ..RecordingSender::default()
        };

        let result = reader.send_pending(report(), &sender);

        assert!(matches!(result, Err(SendError::UploadFailed(_))));
        assert!(reader.has_previous());
    }

    /// Sender that lets the new run's tracker write while the upload runs.
    struct TrackingSender {
        tracker: Mutex<ContextTracker<InMemoryContextStore>>,
    }

    impl CrashReportSender for TrackingSender {
        fn send(&self, _report: CrashReport, _context: Option<Vec<u8>>) -> Result<(), SendError> {
            self.tracker.lock().unwrap().set_consent(TrackingConsent::Granted);
            Ok(())
        }
    }

    #[test]
    fn send_pending_leaves_snapshot_of_new_run_alone() {
        let store = InMemoryContextStore::with_snapshot(r#"{"ctc":1}"#);
        let mut reader = CrashContextReader::take_from(&store).unwrap();
        let sender = TrackingSender {
            tracker: Mutex::new(ContextTracker::new(
                store.clone(),
                TrackingConsent::Pending,
                AttributePolicy::default(),
            )),
        };

        reader.send_pending(report(), &sender).unwrap();

        assert_eq!(store.load().unwrap(), Some(br#"{"ctc":0}"#.to_vec()));
    }

    /// Store holding a snapshot it cannot hand out.
    struct UnreadableStore {
        inner: InMemoryContextStore,
    }

    impl ContextStore for UnreadableStore {
        fn store(&self, bytes: &[u8]) -> Result<(), StoreError> {
            self.inner.store(bytes)
        }

        fn load(&self) -> Result<Option<Vec<u8>>, StoreError> {
            Err(StoreError::IoError("EIO".to_string()))
        }

        fn clear(&self) -> Result<(), StoreError> {
            self.inner.clear()
        }

        fn take(&self) -> Result<Option<Vec<u8>>, StoreError> {
            Err(StoreError::IoError("EIO".to_string()))
        }
    }

    #[test]
    fn read_error_keeps_stored_snapshot() {
        let store = UnreadableStore {
            inner: InMemoryContextStore::with_snapshot(r#"{"ctc":0}"#),
        };

        let result = CrashContextReader::take_from(&store);

        assert!(matches!(result, Err(StoreError::IoError(_))));
        assert_eq!(store.inner.load().unwrap(), Some(br#"{"ctc":0}"#.to_vec()));
    }
}
