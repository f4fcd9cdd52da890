use crate::error::ModelError;

/// Opaque identifier of a classified ad.
///
/// Every piece of acquisition state is keyed by this value. The key is
/// compared by identity only; its contents are never interpreted.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct EntityKey(String);

impl EntityKey {
    pub fn new(raw: impl Into<String>) -> Result<Self, ModelError> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ModelError::InvalidKey(
                "entity key cannot be empty".to_string(),
            ));
        }
        if trimmed.contains('/') {
            return Err(ModelError::InvalidKey(format!(
                "entity key '{trimmed}' cannot contain '/'"
            )));
        }
        Ok(EntityKey(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for EntityKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::str::FromStr for EntityKey {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EntityKey::new(s)
    }
}

impl TryFrom<String> for EntityKey {
    type Error = ModelError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        EntityKey::new(raw)
    }
}

impl From<EntityKey> for String {
    fn from(value: EntityKey) -> Self {
        value.0
    }
}

impl std::fmt::Display for EntityKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_surrounding_whitespace() {
        let key = EntityKey::new("  202405123456789 ").unwrap();
        assert_eq!(key.as_str(), "202405123456789");
    }

    #[test]
    fn rejects_empty_and_path_like_keys() {
        assert!(matches!(
            EntityKey::new("   "),
            Err(ModelError::InvalidKey(_))
        ));
        assert!(matches!(
            EntityKey::new("../etc"),
            Err(ModelError::InvalidKey(_))
        ));
    }
}
