use carsift_model::prelude::AssetIndex;

use super::navigation::NavigationInput;

#[derive(Debug, Clone)]
pub enum GalleryMessage {
    /// Thumbnail clicked: open the gallery and activate acquisition.
    Open,
    Close,
    Navigate(NavigationInput),
    /// Restart acquisition from `Empty` or `Failed`.
    Retry,
    /// The image at this index failed to load.
    AssetFailed(AssetIndex),
    /// Platform back action (history pop).
    BackRequested,
}

impl GalleryMessage {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Open => "Gallery::Open",
            Self::Close => "Gallery::Close",
            Self::Navigate(_) => "Gallery::Navigate",
            Self::Retry => "Gallery::Retry",
            Self::AssetFailed(_) => "Gallery::AssetFailed",
            Self::BackRequested => "Gallery::BackRequested",
        }
    }
}
