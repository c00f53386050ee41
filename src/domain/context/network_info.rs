//! Network connection state as reported by the platform.

/// Whether the network is reachable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reachability {
    Yes,
    Maybe,
    No,
}

/// Network interface kinds that may be available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Interface {
    Wifi,
    WiredEthernet,
    Cellular,
    Loopback,
    Other,
}

/// Network connection info.
///
/// Capability flags are `None` when the platform cannot report them, which
/// is different from `Some(false)`.
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkInfo {
    pub reachability: Reachability,
    pub available_interfaces: Option<Vec<Interface>>,
    pub supports_ipv4: Option<bool>,
    pub supports_ipv6: Option<bool>,
    pub is_expensive: Option<bool>,
    pub is_constrained: Option<bool>,
}

impl NetworkInfo {
    /// Creates network info with only reachability known.
    pub fn new(reachability: Reachability) -> Self {
        Self {
            reachability,
            available_interfaces: None,
            supports_ipv4: None,
            supports_ipv6: None,
            is_expensive: None,
            is_constrained: None,
        }
    }
}
