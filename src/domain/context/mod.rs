//! Context module - mutable domain state tracked by the application.
//!
//! These types are owned by the state-tracking side and change freely;
//! the snapshot module copies them into wire-stable counterparts.

mod consent;
mod network_info;
mod state;
mod user_info;
mod view_event;

pub use consent::TrackingConsent;
pub use network_info::{Interface, NetworkInfo, Reachability};
pub use state::ContextState;
pub use user_info::UserInfo;
pub use view_event::{
    ApplicationRef, SessionKind, SessionRef, ViewDetails, ViewEvent, ViewEventModel,
};
