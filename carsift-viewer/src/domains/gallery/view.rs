use carsift_model::prelude::{AssetHandle, AssetIndex};

pub const PREPARING_MESSAGE: &str = "Preparing images...";
pub const EMPTY_MESSAGE: &str = "No images found.";
pub const JOB_FAILED_MESSAGE: &str = "Download failed.";
pub const TRANSPORT_FAILED_MESSAGE: &str = "Could not reach the server.";

/// Render model for the gallery overlay.
#[derive(Debug, Clone, PartialEq)]
pub enum GalleryView {
    /// Acquisition is not finished. `progress` is the `"current/total"`
    /// label once polling has started.
    Preparing {
        message: &'static str,
        progress: Option<String>,
    },
    Ready {
        asset: AssetView,
        /// 1-based position of the visible asset.
        position: u32,
        count: u32,
        can_previous: bool,
        can_next: bool,
    },
    Empty {
        message: &'static str,
    },
    Failed {
        message: &'static str,
        retryable: bool,
    },
}

impl GalleryView {
    /// Status line shown under the viewer.
    pub fn status_line(&self) -> String {
        match self {
            Self::Preparing {
                progress: Some(progress),
                ..
            } => format!("Downloading images {progress}"),
            Self::Preparing { message, .. } => message.to_string(),
            Self::Ready {
                position, count, ..
            } => format!("{position} / {count}"),
            Self::Empty { message } | Self::Failed { message, .. } => {
                message.to_string()
            }
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetView {
    Image(AssetHandle),
    /// The asset failed to load; a placeholder is shown in its slot.
    Placeholder { index: AssetIndex },
}

impl AssetView {
    pub fn index(&self) -> AssetIndex {
        match self {
            Self::Image(handle) => handle.index,
            Self::Placeholder { index } => *index,
        }
    }
}
