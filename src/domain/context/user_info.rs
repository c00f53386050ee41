//! Identity of the current user.

use crate::domain::value::{AttributeMap, AttributeValue};

/// User identity; every field is independently optional.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserInfo {
    pub id: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub extra_info: AttributeMap,
}

impl UserInfo {
    /// Creates a user info carrying only an id.
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Adds an extra attribute.
    pub fn extra(mut self, key: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.extra_info.insert(key.into(), value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_fields() {
        let info = UserInfo::with_id("u1").email("u1@example.com").extra("plan", "pro");
        assert_eq!(info.id.as_deref(), Some("u1"));
        assert_eq!(info.name, None);
        assert_eq!(info.email.as_deref(), Some("u1@example.com"));
        assert_eq!(info.extra_info.len(), 1);
    }
}
