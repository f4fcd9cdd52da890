use log::{debug, info};

use super::App;
use crate::common::focus::ModalKind;
use crate::common::messages::{CardMessage, Message};
use crate::common::task::Task;
use crate::domains::gallery::{
    GalleryMessage, GalleryPresenter, NavigationInput, NavigationOutcome,
};

pub(super) fn update(app: &mut App, message: Message) -> Task<Message> {
    debug!("[App] {}", message.name());
    match message {
        Message::Card(message) => update_card(app, message),
        Message::Gallery(message) => update_gallery(app, message),
        Message::Acquisition(message) => {
            let task = app.controller.handle(message);
            sync_gallery(app);
            task.map(Message::Acquisition)
        }
    }
}

fn update_card(app: &mut App, message: CardMessage) -> Task<Message> {
    match message {
        CardMessage::Show(ad) => {
            if app.controller.current_key() != Some(&ad.key) {
                // The gallery belongs to the previous ad.
                close_gallery(app);
            }
            app.controller.show(ad);
        }
        CardMessage::Clear => {
            close_gallery(app);
            app.controller.clear();
        }
    }
    Task::none()
}

fn update_gallery(app: &mut App, message: GalleryMessage) -> Task<Message> {
    match message {
        GalleryMessage::Open => open_gallery(app),
        GalleryMessage::Close => {
            close_gallery(app);
            Task::none()
        }
        GalleryMessage::Navigate(input) => navigate(app, &input),
        GalleryMessage::Retry => {
            let retryable = app
                .controller
                .status()
                .is_some_and(|status| status.is_retryable());
            if app.gallery.is_none() || !retryable {
                return Task::none();
            }
            info!("[App] retrying acquisition");
            let task = app.controller.activate();
            sync_gallery(app);
            task.map(Message::Acquisition)
        }
        GalleryMessage::AssetFailed(index) => {
            if let Some(gallery) = app.gallery.as_mut() {
                gallery.mark_broken(index);
            }
            Task::none()
        }
        GalleryMessage::BackRequested => {
            if app.modals.is_top(ModalKind::Gallery) {
                close_gallery(app);
            }
            Task::none()
        }
    }
}

fn open_gallery(app: &mut App) -> Task<Message> {
    let Some(key) = app.controller.current_key().cloned() else {
        debug!("[App] gallery requested without a card");
        return Task::none();
    };

    if app.gallery.as_ref().is_none_or(|gallery| gallery.key() != &key) {
        app.gallery = Some(GalleryPresenter::new(key, &app.gallery_config));
    }
    app.modals.push(ModalKind::Gallery);

    let task = app.controller.activate();
    sync_gallery(app);
    task.map(Message::Acquisition)
}

fn close_gallery(app: &mut App) {
    let Some(gallery) = app.gallery.take() else {
        return;
    };
    app.modals.remove(ModalKind::Gallery);

    // The image the user was looking at becomes the card face.
    if let Some(index) = gallery.current_index()
        && !gallery.is_broken(index)
    {
        let handle = app.controller.service().asset(gallery.key(), index);
        app.controller.adopt_face(handle);
    }
    app.controller.deactivate();
    debug!("[App] gallery for {} closed", gallery.key());
}

fn navigate(app: &mut App, input: &NavigationInput) -> Task<Message> {
    let focus = app.modals.focus_for(ModalKind::Gallery);
    let Some(gallery) = app.gallery.as_mut() else {
        return Task::none();
    };
    if gallery.handle_input(input, focus) == NavigationOutcome::Close {
        close_gallery(app);
    }
    Task::none()
}

fn sync_gallery(app: &mut App) {
    let Some(snapshot) = app.controller.snapshot() else {
        return;
    };
    if let Some(gallery) = app.gallery.as_mut() {
        gallery.sync(&snapshot);
    }
}
