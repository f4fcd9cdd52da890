use crate::error::ModelError;
use crate::ids::EntityKey;

/// Opaque locator the backend needs to run an acquisition job, usually the
/// originating listing URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct SourceRef(String);

impl SourceRef {
    pub fn new(raw: impl Into<String>) -> Result<Self, ModelError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(ModelError::InvalidSourceRef(
                "source reference cannot be empty".to_string(),
            ));
        }
        Ok(SourceRef(raw.trim().to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for SourceRef {
    type Error = ModelError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        SourceRef::new(raw)
    }
}

impl From<SourceRef> for String {
    fn from(value: SourceRef) -> Self {
        value.0
    }
}

impl std::fmt::Display for SourceRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The slice of a scraped ad the acquisition pipeline cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AdSummary {
    pub key: EntityKey,
    pub source_ref: SourceRef,
    #[cfg_attr(feature = "serde", serde(default))]
    pub title: Option<String>,
}

impl AdSummary {
    pub fn new(key: EntityKey, source_ref: SourceRef) -> Self {
        Self {
            key,
            source_ref,
            title: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}
