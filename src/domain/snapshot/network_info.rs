//! Network-info bridge.
//!
//! Keys: `rcb` reachability code, `abi` available interfaces, `si4`/`si6`
//! IPv4/IPv6 support, `ise` expensive, `isc` constrained.

use serde::{Serialize, Serializer};
use serde_json::Value as JsonValue;

use super::field::{expect_bool, expect_enum_code, expect_object, mismatch, read_field, WireField};
use crate::domain::context::{Interface, NetworkInfo, Reachability};
use crate::domain::foundation::{CodecError, ValuePath};

/// Wire form of [`NetworkInfo`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkInfoWire {
    #[serde(rename = "rcb")]
    pub reachability: ReachabilityWire,
    #[serde(rename = "abi", skip_serializing_if = "WireField::is_absent")]
    pub available_interfaces: WireField<Vec<InterfaceWire>>,
    #[serde(rename = "si4", skip_serializing_if = "WireField::is_absent")]
    pub supports_ipv4: WireField<bool>,
    #[serde(rename = "si6", skip_serializing_if = "WireField::is_absent")]
    pub supports_ipv6: WireField<bool>,
    #[serde(rename = "ise", skip_serializing_if = "WireField::is_absent")]
    pub is_expensive: WireField<bool>,
    #[serde(rename = "isc", skip_serializing_if = "WireField::is_absent")]
    pub is_constrained: WireField<bool>,
}

impl From<&NetworkInfo> for NetworkInfoWire {
    fn from(info: &NetworkInfo) -> Self {
        Self {
            reachability: info.reachability.into(),
            available_interfaces: WireField::from_option(
                info.available_interfaces
                    .as_ref()
                    .map(|list| list.iter().copied().map(InterfaceWire::from).collect()),
            ),
            supports_ipv4: WireField::from_option(info.supports_ipv4),
            supports_ipv6: WireField::from_option(info.supports_ipv6),
            is_expensive: WireField::from_option(info.is_expensive),
            is_constrained: WireField::from_option(info.is_constrained),
        }
    }
}

impl NetworkInfoWire {
    pub(crate) fn from_json(json: &JsonValue, path: &ValuePath) -> Result<Self, CodecError> {
        let object = expect_object(json, path)?;

        let reachability_path = path.key("rcb");
        let reachability = match read_field(object, "rcb") {
            WireField::Present(value) => ReachabilityWire::from_json(value, &reachability_path)?,
            _ => return Err(CodecError::schema_mismatch(reachability_path, "reachability code")),
        };

        let interfaces_path = path.key("abi");
        let available_interfaces = read_field(object, "abi").try_map(|value| {
            let items = value
                .as_array()
                .ok_or_else(|| mismatch(&interfaces_path, "array", value))?;
            items
                .iter()
                .enumerate()
                .map(|(i, item)| InterfaceWire::from_json(item, &interfaces_path.index(i)))
                .collect::<Result<Vec<_>, CodecError>>()
        })?;

        let flag = |key: &str| {
            let flag_path = path.key(key);
            read_field(object, key).try_map(|value| expect_bool(value, &flag_path))
        };

        Ok(Self {
            reachability,
            available_interfaces,
            supports_ipv4: flag("si4")?,
            supports_ipv6: flag("si6")?,
            is_expensive: flag("ise")?,
            is_constrained: flag("isc")?,
        })
    }

    pub fn into_domain(self) -> NetworkInfo {
        NetworkInfo {
            reachability: self.reachability.into_domain(),
            available_interfaces: self
                .available_interfaces
                .into_option()
                .map(|list| list.into_iter().map(InterfaceWire::into_domain).collect()),
            supports_ipv4: self.supports_ipv4.into_option(),
            supports_ipv6: self.supports_ipv6.into_option(),
            is_expensive: self.is_expensive.into_option(),
            is_constrained: self.is_constrained.into_option(),
        }
    }
}

/// Reachability code: `0` yes, `1` maybe, `2` no.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReachabilityWire {
    Yes = 0,
    Maybe = 1,
    No = 2,
}

impl ReachabilityWire {
    fn from_json(json: &JsonValue, path: &ValuePath) -> Result<Self, CodecError> {
        match expect_enum_code(json, path)? {
            0 => Ok(ReachabilityWire::Yes),
            1 => Ok(ReachabilityWire::Maybe),
            2 => Ok(ReachabilityWire::No),
            unknown => Err(CodecError::unknown_enum(path.clone(), unknown)),
        }
    }

    fn into_domain(self) -> Reachability {
        match self {
            ReachabilityWire::Yes => Reachability::Yes,
            ReachabilityWire::Maybe => Reachability::Maybe,
            ReachabilityWire::No => Reachability::No,
        }
    }
}

impl From<Reachability> for ReachabilityWire {
    fn from(reachability: Reachability) -> Self {
        match reachability {
            Reachability::Yes => ReachabilityWire::Yes,
            Reachability::Maybe => ReachabilityWire::Maybe,
            Reachability::No => ReachabilityWire::No,
        }
    }
}

impl Serialize for ReachabilityWire {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(*self as u8)
    }
}

/// Interface name as written on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterfaceWire(Interface);

impl InterfaceWire {
    const NAMES: [(&'static str, Interface); 5] = [
        ("wifi", Interface::Wifi),
        ("wiredEthernet", Interface::WiredEthernet),
        ("cellular", Interface::Cellular),
        ("loopback", Interface::Loopback),
        ("other", Interface::Other),
    ];

    fn name(self) -> &'static str {
        Self::NAMES
            .iter()
            .find(|(_, interface)| *interface == self.0)
            .map(|(name, _)| *name)
            .unwrap_or("other")
    }

    fn from_json(json: &JsonValue, path: &ValuePath) -> Result<Self, CodecError> {
        let name = json
            .as_str()
            .ok_or_else(|| mismatch(path, "interface name", json))?;
        Self::NAMES
            .iter()
            .find(|(known, _)| *known == name)
            .map(|(_, interface)| InterfaceWire(*interface))
            .ok_or_else(|| CodecError::unknown_enum(path.clone(), name))
    }

    fn into_domain(self) -> Interface {
        self.0
    }
}

impl From<Interface> for InterfaceWire {
    fn from(interface: Interface) -> Self {
        InterfaceWire(interface)
    }
}

impl Serialize for InterfaceWire {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}
