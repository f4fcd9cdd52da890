#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use carsift_config::GalleryConfig;
use carsift_model::prelude::{AdSummary, EntityKey, SourceRef};
use carsift_viewer::common::messages::{CardMessage, Message};
use carsift_viewer::domains::acquisition::{AcquisitionStatus, PollPolicy};
use carsift_viewer::domains::gallery::{GalleryMessage, GalleryView, NavigationInput};
use carsift_viewer::infra::testing::ScriptedAcquisitionService;
use carsift_viewer::{App, Runtime};

pub const INTERVAL: Duration = Duration::from_millis(500);

pub fn key(raw: &str) -> EntityKey {
    EntityKey::new(raw).unwrap()
}

pub fn ad(key: &EntityKey) -> AdSummary {
    AdSummary::new(
        key.clone(),
        SourceRef::new(format!("https://listings.test/ad/{key}")).unwrap(),
    )
}

pub fn runtime(stub: &ScriptedAcquisitionService) -> Runtime<App> {
    runtime_with_attempts(stub, 20)
}

pub fn runtime_with_attempts(
    stub: &ScriptedAcquisitionService,
    max_attempts: u32,
) -> Runtime<App> {
    let app = App::with_parts(
        Arc::new(stub.clone()),
        PollPolicy {
            interval: INTERVAL,
            max_attempts,
        },
        GalleryConfig::default(),
    );
    Runtime::new(app)
}

pub fn show(runtime: &mut Runtime<App>, key: &EntityKey) {
    runtime.dispatch(Message::Card(CardMessage::Show(ad(key))));
}

pub fn gallery(runtime: &mut Runtime<App>, message: GalleryMessage) {
    runtime.dispatch(Message::Gallery(message));
}

pub fn navigate(runtime: &mut Runtime<App>, input: NavigationInput) {
    gallery(runtime, GalleryMessage::Navigate(input));
}

pub fn status(runtime: &Runtime<App>) -> Option<AcquisitionStatus> {
    runtime.program().acquisition().map(|snapshot| snapshot.status)
}

pub fn gallery_view(runtime: &Runtime<App>) -> GalleryView {
    runtime.view().gallery.expect("gallery is open")
}

/// Show `key`, open its gallery and wait for the coordinator to settle.
pub async fn open_settled(runtime: &mut Runtime<App>, key: &EntityKey) {
    show(runtime, key);
    gallery(runtime, GalleryMessage::Open);
    runtime.run_until_idle().await;
}
