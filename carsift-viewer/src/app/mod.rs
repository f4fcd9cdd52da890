use std::sync::Arc;

use carsift_config::{GalleryConfig, ViewerConfig};

use crate::common::focus::ModalStack;
use crate::common::messages::Message;
use crate::common::task::Task;
use crate::domains::acquisition::{AcquisitionSnapshot, PollPolicy};
use crate::domains::card::{CardController, CardView};
use crate::domains::gallery::{GalleryPresenter, GalleryView};
use crate::infra::services::acquisition::AcquisitionApiService;
use crate::runtime::Program;

pub mod bootstrap;
mod update;

pub use bootstrap::build_service;

/// One ad card plus its gallery overlay.
#[derive(Debug)]
pub struct App {
    pub(crate) controller: CardController,
    pub(crate) gallery: Option<GalleryPresenter>,
    pub(crate) modals: ModalStack,
    gallery_config: GalleryConfig,
}

/// Everything a renderer needs after a message was applied.
#[derive(Debug, Clone, PartialEq)]
pub struct AppView {
    pub card: Option<CardView>,
    pub gallery: Option<GalleryView>,
    pub acquisition: Option<AcquisitionSnapshot>,
}

impl App {
    pub fn new(
        service: Arc<dyn AcquisitionApiService>,
        config: &ViewerConfig,
    ) -> Self {
        Self::with_parts(service, config.acquisition.into(), config.gallery)
    }

    pub fn with_parts(
        service: Arc<dyn AcquisitionApiService>,
        policy: PollPolicy,
        gallery_config: GalleryConfig,
    ) -> Self {
        Self {
            controller: CardController::new(service, policy),
            gallery: None,
            modals: ModalStack::default(),
            gallery_config,
        }
    }

    pub fn controller(&self) -> &CardController {
        &self.controller
    }

    pub fn gallery(&self) -> Option<&GalleryPresenter> {
        self.gallery.as_ref()
    }

    pub fn modals(&self) -> &ModalStack {
        &self.modals
    }

    /// Mutable access for sibling overlays sharing the stack.
    pub fn modals_mut(&mut self) -> &mut ModalStack {
        &mut self.modals
    }

    pub fn is_gallery_open(&self) -> bool {
        self.gallery.is_some()
    }

    pub fn acquisition(&self) -> Option<AcquisitionSnapshot> {
        self.controller.snapshot()
    }
}

impl Program for App {
    type Message = Message;
    type View = AppView;

    fn update(&mut self, message: Message) -> Task<Message> {
        update::update(self, message)
    }

    fn view(&self) -> AppView {
        let acquisition = self.controller.snapshot();
        let gallery = self.gallery.as_ref().map(|presenter| {
            presenter.view(acquisition.as_ref(), &**self.controller.service())
        });
        AppView {
            card: self.controller.view(),
            gallery,
            acquisition,
        }
    }
}
