//! Gallery domain - renders coordinator state and pages through assets

pub mod messages;
pub mod navigation;
pub mod presenter;
pub mod view;

pub use self::messages::GalleryMessage;
pub use self::navigation::{NavKey, NavigationInput, NavigationIntent};
pub use self::presenter::{GalleryPresenter, NavigationOutcome};
pub use self::view::{AssetView, GalleryView};
