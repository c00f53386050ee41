//! Snapshot encoding configuration

use serde::Deserialize;

use crate::domain::value::AttributePolicy;

/// Encoding behavior of the snapshot writer
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EncodingConfig {
    /// What to do with an attribute that cannot be encoded
    /// (`drop_invalid` or `fail_snapshot`)
    #[serde(default)]
    pub attribute_policy: AttributePolicy,
}
