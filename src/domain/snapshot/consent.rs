//! Consent bridge: `TrackingConsent` <-> compact integer code.

use serde::{Serialize, Serializer};
use serde_json::Value as JsonValue;

use super::field::expect_enum_code;
use crate::domain::context::TrackingConsent;
use crate::domain::foundation::{CodecError, ValuePath};

/// Wire form of the consent decision. Codes are fixed once shipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsentWire {
    Granted = 0,
    NotGranted = 1,
    Pending = 2,
}

impl ConsentWire {
    pub fn code(self) -> u8 {
        self as u8
    }

    pub(crate) fn from_json(json: &JsonValue, path: &ValuePath) -> Result<Self, CodecError> {
        let code = expect_enum_code(json, path)?;
        Self::try_from(code).map_err(|unknown| CodecError::unknown_enum(path.clone(), unknown))
    }

    pub fn into_domain(self) -> TrackingConsent {
        match self {
            ConsentWire::Granted => TrackingConsent::Granted,
            ConsentWire::NotGranted => TrackingConsent::NotGranted,
            ConsentWire::Pending => TrackingConsent::Pending,
        }
    }
}

impl From<TrackingConsent> for ConsentWire {
    fn from(consent: TrackingConsent) -> Self {
        match consent {
            TrackingConsent::Granted => ConsentWire::Granted,
            TrackingConsent::NotGranted => ConsentWire::NotGranted,
            TrackingConsent::Pending => ConsentWire::Pending,
        }
    }
}

impl TryFrom<u64> for ConsentWire {
    type Error = u64;

    fn try_from(code: u64) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(ConsentWire::Granted),
            1 => Ok(ConsentWire::NotGranted),
            2 => Ok(ConsentWire::Pending),
            unknown => Err(unknown),
        }
    }
}

impl Serialize for ConsentWire {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}
