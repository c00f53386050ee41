//! ContextTracker - single writer of the tracked context.
//!
//! Owns the live [`ContextState`]. Every mutation rebuilds the snapshot from
//! scratch and hands the complete buffer to the [`ContextStore`]. Failures
//! never reach the caller: a snapshot that cannot be encoded degrades to a
//! consent-only snapshot, and if even that fails the stored snapshot is
//! cleared.

use tracing::{debug, warn};

use crate::config::EncodingConfig;
use crate::domain::context::{ContextState, NetworkInfo, TrackingConsent, UserInfo, ViewEvent};
use crate::domain::snapshot::ContextSnapshot;
use crate::domain::value::AttributePolicy;
use crate::ports::ContextStore;

/// What ended up in the store after a mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistOutcome {
    /// The full state was stored
    Complete,
    /// Only the consent decision was stored
    ConsentOnly,
    /// Nothing could be stored; the previous snapshot was discarded
    Cleared,
    /// The store rejected the write
    StoreFailed,
}

pub struct ContextTracker<S: ContextStore> {
    store: S,
    state: ContextState,
    policy: AttributePolicy,
}

impl<S: ContextStore> ContextTracker<S> {
    pub fn new(store: S, consent: TrackingConsent, policy: AttributePolicy) -> Self {
        Self {
            store,
            state: ContextState::new(consent),
            policy,
        }
    }

    /// Creates a tracker using the configured attribute policy.
    pub fn from_config(store: S, consent: TrackingConsent, encoding: &EncodingConfig) -> Self {
        Self::new(store, consent, encoding.attribute_policy)
    }

    /// Current domain state.
    pub fn state(&self) -> &ContextState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn set_consent(&mut self, consent: TrackingConsent) -> PersistOutcome {
        self.state.tracking_consent = consent;
        self.persist()
    }

    pub fn set_view_event(&mut self, event: Option<ViewEvent>) -> PersistOutcome {
        self.state.last_view_event = event;
        self.persist()
    }

    pub fn set_user_info(&mut self, info: Option<UserInfo>) -> PersistOutcome {
        self.state.last_user_info = info;
        self.persist()
    }

    pub fn set_network_info(&mut self, info: Option<NetworkInfo>) -> PersistOutcome {
        self.state.last_network_info = info;
        self.persist()
    }

    pub fn set_app_in_foreground(&mut self, in_foreground: bool) -> PersistOutcome {
        self.state.last_is_app_in_foreground = Some(in_foreground);
        self.persist()
    }

    /// Rebuilds and stores the snapshot for the current state.
    pub fn persist(&self) -> PersistOutcome {
        let (bytes, outcome) = match self.encode_degrading() {
            Some(encoded) => encoded,
            None => {
                if let Err(e) = self.store.clear() {
                    warn!(error = %e, "Failed to clear context snapshot");
                }
                return PersistOutcome::Cleared;
            }
        };

        match self.store.store(&bytes) {
            Ok(()) => {
                debug!(
                    consent = %self.state.tracking_consent,
                    bytes = bytes.len(),
                    outcome = ?outcome,
                    "Context snapshot persisted"
                );
                outcome
            }
            Err(e) => {
                warn!(error = %e, "Failed to persist context snapshot");
                PersistOutcome::StoreFailed
            }
        }
    }

    fn encode_degrading(&self) -> Option<(Vec<u8>, PersistOutcome)> {
        let full = ContextSnapshot::capture(&self.state, self.policy).and_then(|s| s.encode());
        match full {
            Ok(bytes) => return Some((bytes, PersistOutcome::Complete)),
            Err(e) => warn!(error = %e, "Context snapshot failed, falling back to consent only"),
        }

        let fallback = ContextSnapshot::capture(&self.state.consent_only(), self.policy)
            .and_then(|s| s.encode());
        match fallback {
            Ok(bytes) => Some((bytes, PersistOutcome::ConsentOnly)),
            Err(e) => {
                warn!(error = %e, "Consent-only snapshot failed");
                None
            }
        }
    }
}
