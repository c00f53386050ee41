//! ContextState - the full set of tracked values at one point in time.

use super::{NetworkInfo, TrackingConsent, UserInfo, ViewEvent};

/// Everything a snapshot captures, in domain form.
///
/// Used both as the input of a snapshot build and as the result of a
/// restore.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContextState {
    pub tracking_consent: TrackingConsent,
    pub last_view_event: Option<ViewEvent>,
    pub last_user_info: Option<UserInfo>,
    pub last_network_info: Option<NetworkInfo>,
    pub last_is_app_in_foreground: Option<bool>,
}

impl ContextState {
    /// Creates a state holding only a consent decision.
    pub fn new(tracking_consent: TrackingConsent) -> Self {
        Self {
            tracking_consent,
            ..Self::default()
        }
    }

    /// Returns a copy reduced to the consent decision.
    pub fn consent_only(&self) -> Self {
        Self::new(self.tracking_consent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_leaves_optional_slots_empty() {
        let state = ContextState::new(TrackingConsent::Granted);
        assert_eq!(state.tracking_consent, TrackingConsent::Granted);
        assert!(state.last_view_event.is_none());
        assert!(state.last_user_info.is_none());
        assert!(state.last_network_info.is_none());
        assert!(state.last_is_app_in_foreground.is_none());
    }

    #[test]
    fn consent_only_drops_everything_else() {
        let mut state = ContextState::new(TrackingConsent::NotGranted);
        state.last_user_info = Some(UserInfo::with_id("u1"));
        state.last_is_app_in_foreground = Some(true);

        assert_eq!(state.consent_only(), ContextState::new(TrackingConsent::NotGranted));
    }
}
