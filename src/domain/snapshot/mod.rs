//! Snapshot module - the wire-stable context aggregate and its bridges.
//!
//! Each tracked slot has a wire type with short, fixed keys and a pure
//! bridge to and from its domain type:
//!
//! | key   | slot                  | bridge            |
//! |-------|-----------------------|-------------------|
//! | `ctc` | tracking consent      | `ConsentWire`     |
//! | `lre` | last view event       | `ViewEventWire`   |
//! | `lui` | last user info        | `UserInfoWire`    |
//! | `lni` | last network info     | `NetworkInfoWire` |
//! | `aif` | last foreground state | plain bool        |

mod aggregate;
mod consent;
mod field;
mod network_info;
mod user_info;
mod view_event;

pub use aggregate::{keys, ContextSnapshot};
pub use consent::ConsentWire;
pub use field::WireField;
pub use network_info::{InterfaceWire, NetworkInfoWire, ReachabilityWire};
pub use user_info::UserInfoWire;
pub use view_event::ViewEventWire;
