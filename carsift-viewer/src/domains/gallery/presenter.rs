use std::collections::HashSet;

use carsift_config::GalleryConfig;
use carsift_model::prelude::{AcquisitionFailure, AssetIndex, EntityKey};
use log::debug;

use super::navigation::{NavigationInput, NavigationIntent};
use super::view::{
    AssetView, EMPTY_MESSAGE, GalleryView, JOB_FAILED_MESSAGE,
    PREPARING_MESSAGE, TRANSPORT_FAILED_MESSAGE,
};
use crate::common::focus::{FocusContext, ModalKind};
use crate::domains::acquisition::{AcquisitionSnapshot, AcquisitionStatus};
use crate::infra::services::acquisition::AcquisitionApiService;

/// What an input did to the presenter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationOutcome {
    Moved,
    Unchanged,
    /// The user asked to close the gallery.
    Close,
    /// Another overlay owns input.
    Ignored,
}

/// Paging state for one open gallery.
///
/// The cursor only moves inside `[0, count)`; while the coordinator is not
/// `Ready` the count is zero and navigation is a no-op.
#[derive(Debug, Clone)]
pub struct GalleryPresenter {
    key: EntityKey,
    position: usize,
    count: u32,
    broken: HashSet<AssetIndex>,
    swipe_threshold: f32,
}

impl GalleryPresenter {
    pub fn new(key: EntityKey, config: &GalleryConfig) -> Self {
        Self {
            key,
            position: 0,
            count: 0,
            broken: HashSet::new(),
            swipe_threshold: config.swipe_threshold_px,
        }
    }

    pub fn key(&self) -> &EntityKey {
        &self.key
    }

    /// Zero-based cursor.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn current_index(&self) -> Option<AssetIndex> {
        (self.count > 0).then(|| AssetIndex::from_position(self.position))
    }

    /// Follow the coordinator. Snapshots for another key are ignored.
    pub fn sync(&mut self, snapshot: &AcquisitionSnapshot) {
        if snapshot.key != self.key {
            return;
        }
        self.count = snapshot
            .status
            .ready_count()
            .map(|count| count.get())
            .unwrap_or(0);
        if self.count == 0 {
            self.position = 0;
            self.broken.clear();
        } else {
            self.position = self.position.min(self.last());
        }
    }

    fn last(&self) -> usize {
        (self.count as usize).saturating_sub(1)
    }

    pub fn next(&mut self) -> bool {
        if self.count == 0 || self.position >= self.last() {
            return false;
        }
        self.position += 1;
        true
    }

    pub fn previous(&mut self) -> bool {
        if self.count == 0 || self.position == 0 {
            return false;
        }
        self.position -= 1;
        true
    }

    /// Jump to a zero-based position, clamped into range.
    pub fn go_to(&mut self, position: usize) -> bool {
        if self.count == 0 {
            return false;
        }
        let target = position.min(self.last());
        let moved = target != self.position;
        self.position = target;
        moved
    }

    pub fn handle_input(
        &mut self,
        input: &NavigationInput,
        focus: FocusContext,
    ) -> NavigationOutcome {
        if focus.kind != ModalKind::Gallery || !focus.is_top {
            debug!(
                "[Gallery] {} input ignored, {} is not on top",
                self.key,
                focus.kind.name()
            );
            return NavigationOutcome::Ignored;
        }

        let moved = match input.intent(self.swipe_threshold) {
            NavigationIntent::Close => return NavigationOutcome::Close,
            NavigationIntent::Nothing => false,
            NavigationIntent::Next => self.next(),
            NavigationIntent::Previous => self.previous(),
            NavigationIntent::GoTo(position) => self.go_to(position),
        };
        if moved {
            NavigationOutcome::Moved
        } else {
            NavigationOutcome::Unchanged
        }
    }

    /// Remember that an asset failed to load so it renders as a placeholder.
    pub fn mark_broken(&mut self, index: AssetIndex) {
        if self.broken.insert(index) {
            debug!("[Gallery] {} asset {} marked broken", self.key, index);
        }
    }

    pub fn is_broken(&self, index: AssetIndex) -> bool {
        self.broken.contains(&index)
    }

    pub fn view(
        &self,
        snapshot: Option<&AcquisitionSnapshot>,
        service: &dyn AcquisitionApiService,
    ) -> GalleryView {
        let Some(snapshot) = snapshot.filter(|s| s.key == self.key) else {
            return GalleryView::Preparing {
                message: PREPARING_MESSAGE,
                progress: None,
            };
        };

        match &snapshot.status {
            AcquisitionStatus::NotStarted
            | AcquisitionStatus::Checking
            | AcquisitionStatus::Triggering
            | AcquisitionStatus::Polling => GalleryView::Preparing {
                message: PREPARING_MESSAGE,
                progress: snapshot.progress_label(),
            },
            AcquisitionStatus::Ready(count) => {
                let count = count.get();
                let position = self.position.min(self.last());
                let index = AssetIndex::from_position(position);
                let asset = if self.is_broken(index) {
                    AssetView::Placeholder { index }
                } else {
                    AssetView::Image(service.asset(&self.key, index))
                };
                GalleryView::Ready {
                    asset,
                    position: index.get(),
                    count,
                    can_previous: position > 0,
                    can_next: index.get() < count,
                }
            }
            AcquisitionStatus::Empty => GalleryView::Empty {
                message: EMPTY_MESSAGE,
            },
            AcquisitionStatus::Failed(failure) => GalleryView::Failed {
                message: match failure {
                    AcquisitionFailure::Transport(_) => TRANSPORT_FAILED_MESSAGE,
                    AcquisitionFailure::Job => JOB_FAILED_MESSAGE,
                },
                retryable: true,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use carsift_model::MediaCount;

    use super::*;
    use crate::common::focus::ModalStack;
    use crate::infra::testing::ScriptedAcquisitionService;

    fn ready(key: &EntityKey, count: u32) -> AcquisitionSnapshot {
        AcquisitionSnapshot {
            key: key.clone(),
            status: AcquisitionStatus::Ready(MediaCount::new(count)),
            attempts: 0,
            max_attempts: 20,
            progress: None,
        }
    }

    fn presenter(count: u32) -> GalleryPresenter {
        let key = EntityKey::new("300").unwrap();
        let mut presenter =
            GalleryPresenter::new(key.clone(), &GalleryConfig::default());
        presenter.sync(&ready(&key, count));
        presenter
    }

    #[test]
    fn cursor_stays_in_bounds() {
        let mut gallery = presenter(3);
        assert!(!gallery.previous());
        assert!(gallery.next());
        assert!(gallery.next());
        assert!(!gallery.next());
        assert_eq!(gallery.position(), 2);

        assert!(gallery.go_to(0));
        assert!(gallery.go_to(99));
        assert_eq!(gallery.position(), 2);
    }

    #[test]
    fn navigation_is_inert_before_ready() {
        let key = EntityKey::new("301").unwrap();
        let mut gallery = GalleryPresenter::new(key, &GalleryConfig::default());
        assert!(!gallery.next());
        assert!(!gallery.go_to(4));
        assert_eq!(gallery.current_index(), None);
    }

    #[test]
    fn input_requires_gallery_on_top() {
        let mut gallery = presenter(4);
        let mut modals = ModalStack::default();
        modals.push(ModalKind::Gallery);
        modals.push(ModalKind::Dialog("caz-lookup"));

        let outcome = gallery
            .handle_input(&NavigationInput::Next, modals.focus_for(ModalKind::Gallery));
        assert_eq!(outcome, NavigationOutcome::Ignored);
        assert_eq!(gallery.position(), 0);

        modals.pop();
        let outcome = gallery
            .handle_input(&NavigationInput::Next, modals.focus_for(ModalKind::Gallery));
        assert_eq!(outcome, NavigationOutcome::Moved);
        assert_eq!(gallery.position(), 1);
    }

    #[test]
    fn broken_asset_renders_placeholder() {
        let mut gallery = presenter(2);
        let stub = ScriptedAcquisitionService::new();
        let snapshot = ready(gallery.key(), 2);

        gallery.mark_broken(AssetIndex::FIRST);
        match gallery.view(Some(&snapshot), &stub) {
            GalleryView::Ready { asset, position, .. } => {
                assert_eq!(asset, AssetView::Placeholder { index: AssetIndex::FIRST });
                assert_eq!(position, 1);
            }
            other => panic!("unexpected view {other:?}"),
        }

        gallery.next();
        match gallery.view(Some(&snapshot), &stub) {
            GalleryView::Ready {
                asset: AssetView::Image(handle),
                can_next,
                can_previous,
                ..
            } => {
                assert_eq!(handle.url, "memory://media-asset/300/02");
                assert!(!can_next);
                assert!(can_previous);
            }
            other => panic!("unexpected view {other:?}"),
        }
    }

    #[test]
    fn shrinking_count_clamps_cursor() {
        let mut gallery = presenter(5);
        gallery.go_to(4);
        let key = gallery.key().clone();
        gallery.sync(&ready(&key, 2));
        assert_eq!(gallery.position(), 1);
    }
}
