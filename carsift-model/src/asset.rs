use crate::error::ModelError;
use crate::ids::EntityKey;

/// 1-based position of an asset inside an entity's gallery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AssetIndex(u32);

impl AssetIndex {
    pub const FIRST: AssetIndex = AssetIndex(1);

    pub fn new(index: u32) -> Result<Self, ModelError> {
        if index == 0 {
            return Err(ModelError::InvalidAssetIndex(index));
        }
        Ok(AssetIndex(index))
    }

    /// Convert a 0-based cursor position into an asset index.
    pub fn from_position(position: usize) -> Self {
        AssetIndex(u32::try_from(position).unwrap_or(u32::MAX - 1) + 1)
    }

    pub fn get(&self) -> u32 {
        self.0
    }

    /// Path segment form used by the asset routes: `01`, `02`, ... `10`.
    pub fn to_path_segment(&self) -> String {
        format!("{:02}", self.0)
    }
}

impl std::fmt::Display for AssetIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque handle to one derived image of an entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssetHandle {
    pub key: EntityKey,
    pub index: AssetIndex,
    pub url: String,
}
