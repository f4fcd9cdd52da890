use carsift_model::ad::AdSummary;

use crate::domains::acquisition::messages::AcquisitionMessage;
use crate::domains::gallery::messages::GalleryMessage;

/// Root message routed by [`crate::App`].
#[derive(Debug, Clone)]
pub enum Message {
    Card(CardMessage),
    Gallery(GalleryMessage),
    Acquisition(AcquisitionMessage),
}

impl Message {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Card(message) => message.name(),
            Self::Gallery(message) => message.name(),
            Self::Acquisition(message) => message.name(),
        }
    }
}

/// Card lifecycle driven by the surrounding list view.
#[derive(Debug, Clone)]
pub enum CardMessage {
    /// Bind the card to an ad (mount or entity change).
    Show(AdSummary),
    /// Unmount the card.
    Clear,
}

impl CardMessage {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Show(_) => "Card::Show",
            Self::Clear => "Card::Clear",
        }
    }
}

impl From<CardMessage> for Message {
    fn from(message: CardMessage) -> Self {
        Self::Card(message)
    }
}

impl From<GalleryMessage> for Message {
    fn from(message: GalleryMessage) -> Self {
        Self::Gallery(message)
    }
}

impl From<AcquisitionMessage> for Message {
    fn from(message: AcquisitionMessage) -> Self {
        Self::Acquisition(message)
    }
}
