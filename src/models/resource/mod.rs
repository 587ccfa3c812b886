// Resource module
// Bookable entity (person, room, equipment) appointments attach to

use serde::{Deserialize, Serialize};

/// Kind of bookable entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    Person,
    Room,
    Equipment,
    Service,
    Other,
}

impl Default for ResourceType {
    fn default() -> Self {
        ResourceType::Other
    }
}

/// An entity that can hold appointments.
///
/// Identity is by `id`; the record is immutable during a session except
/// through the external update channel (a resource reload).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub id: String,
    pub name: String,
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: ResourceType,
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub details: serde_json::Map<String, serde_json::Value>,
}

impl Resource {
    /// Create a new resource with required fields
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        role: impl Into<String>,
    ) -> Result<Self, String> {
        let resource = Self {
            id: id.into(),
            name: name.into(),
            role: role.into(),
            avatar: None,
            kind: ResourceType::default(),
            details: serde_json::Map::new(),
        };

        resource.validate()?;
        Ok(resource)
    }

    /// Set the resource kind
    pub fn with_kind(mut self, kind: ResourceType) -> Self {
        self.kind = kind;
        self
    }

    /// Set the avatar URL
    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = Some(avatar.into());
        self
    }

    /// Attach an opaque detail entry
    pub fn with_detail(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    /// Validate the resource
    pub fn validate(&self) -> Result<(), String> {
        if self.id.trim().is_empty() {
            return Err("Resource id cannot be empty".to_string());
        }

        if self.name.trim().is_empty() {
            return Err("Resource name cannot be empty".to_string());
        }

        Ok(())
    }

    /// Case-insensitive match against name or role, used by the
    /// resource list search box.
    pub fn matches_search(&self, term: &str) -> bool {
        if term.trim().is_empty() {
            return true;
        }
        let term = term.to_lowercase();
        self.name.to_lowercase().contains(&term) || self.role.to_lowercase().contains(&term)
    }
}
