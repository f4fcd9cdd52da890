use std::sync::Arc;

use carsift_model::prelude::{AdSummary, AssetHandle, AssetIndex, EntityKey};
use log::{debug, info};

use super::registry::CoordinatorRegistry;
use crate::common::task::Task;
use crate::domains::acquisition::{
    AcquisitionMessage, AcquisitionSnapshot, AcquisitionStatus, PollPolicy,
};
use crate::infra::services::acquisition::AcquisitionApiService;

/// Image shown on the card itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardFace {
    /// Pre-acquisition thumbnail served by the backend.
    Thumbnail(String),
    /// A gallery asset, once one exists.
    Asset(AssetHandle),
}

impl CardFace {
    pub fn url(&self) -> &str {
        match self {
            Self::Thumbnail(url) => url,
            Self::Asset(handle) => &handle.url,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub key: EntityKey,
    pub title: Option<String>,
    pub face: CardFace,
    pub acquisition: Option<AcquisitionSnapshot>,
}

#[derive(Debug)]
struct BoundCard {
    ad: AdSummary,
    face: CardFace,
}

/// One ad card and the coordinator behind its gallery.
#[derive(Debug)]
pub struct CardController {
    registry: CoordinatorRegistry,
    current: Option<BoundCard>,
}

impl CardController {
    pub fn new(service: Arc<dyn AcquisitionApiService>, policy: PollPolicy) -> Self {
        Self {
            registry: CoordinatorRegistry::new(service, policy),
            current: None,
        }
    }

    pub fn registry(&self) -> &CoordinatorRegistry {
        &self.registry
    }

    pub fn service(&self) -> &Arc<dyn AcquisitionApiService> {
        self.registry.service()
    }

    pub fn current(&self) -> Option<&AdSummary> {
        self.current.as_ref().map(|card| &card.ad)
    }

    pub fn current_key(&self) -> Option<&EntityKey> {
        self.current().map(|ad| &ad.key)
    }

    /// Bind the card to `ad`. Showing the same key again is a no-op;
    /// a different key discards the previous coordinator first.
    ///
    /// Returns whether the binding changed.
    pub fn show(&mut self, ad: AdSummary) -> bool {
        if self.current_key() == Some(&ad.key) {
            return false;
        }

        if let Some(previous) = self.current.take() {
            self.registry.discard(&previous.ad.key);
        }

        info!("[Card] showing {}", ad.key);
        let face = CardFace::Thumbnail(self.service().thumbnail_url(&ad.key));
        self.registry.ensure(&ad);
        self.current = Some(BoundCard { ad, face });
        true
    }

    /// Unmount: discard the coordinator and forget the ad.
    pub fn clear(&mut self) {
        if let Some(previous) = self.current.take() {
            debug!("[Card] clearing {}", previous.ad.key);
            self.registry.discard(&previous.ad.key);
        }
    }

    /// Activate acquisition for the bound ad.
    pub fn activate(&mut self) -> Task<AcquisitionMessage> {
        let Some(card) = self.current.as_ref() else {
            debug!("[Card] activate without a bound ad");
            return Task::none();
        };
        let task = self.registry.ensure(&card.ad).activate();
        self.refresh_face();
        task
    }

    /// Stop acquisition for the bound ad. The card face is kept.
    pub fn deactivate(&mut self) {
        if let Some(key) = self.current_key().cloned() {
            self.registry.discard(&key);
        }
    }

    /// Route a response to its coordinator.
    pub fn handle(
        &mut self,
        message: AcquisitionMessage,
    ) -> Task<AcquisitionMessage> {
        let task = self.registry.route(message);
        self.refresh_face();
        task
    }

    pub fn snapshot(&self) -> Option<AcquisitionSnapshot> {
        let key = self.current_key()?;
        self.registry.get(key).map(|coordinator| coordinator.snapshot())
    }

    pub fn status(&self) -> Option<&AcquisitionStatus> {
        let key = self.current_key()?;
        self.registry.get(key).map(|coordinator| coordinator.status())
    }

    /// Use `handle` as the card face if it belongs to the bound ad.
    pub fn adopt_face(&mut self, handle: AssetHandle) {
        if let Some(card) = self.current.as_mut()
            && card.ad.key == handle.key
        {
            card.face = CardFace::Asset(handle);
        }
    }

    pub fn face(&self) -> Option<&CardFace> {
        self.current.as_ref().map(|card| &card.face)
    }

    pub fn view(&self) -> Option<CardView> {
        let card = self.current.as_ref()?;
        Some(CardView {
            key: card.ad.key.clone(),
            title: card.ad.title.clone(),
            face: card.face.clone(),
            acquisition: self.snapshot(),
        })
    }

    /// First ready asset replaces the thumbnail.
    fn refresh_face(&mut self) {
        let ready = matches!(self.status(), Some(AcquisitionStatus::Ready(_)));
        let service = Arc::clone(self.service());
        if let Some(card) = self.current.as_mut()
            && ready
            && matches!(card.face, CardFace::Thumbnail(_))
        {
            card.face = CardFace::Asset(service.asset(&card.ad.key, AssetIndex::FIRST));
        }
    }
}
