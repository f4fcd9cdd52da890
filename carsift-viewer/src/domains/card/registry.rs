use std::collections::HashMap;
use std::sync::Arc;

use carsift_model::prelude::{AdSummary, EntityKey};
use log::debug;

use crate::common::task::Task;
use crate::domains::acquisition::{
    AcquisitionCoordinator, AcquisitionMessage, EpochSource, PollPolicy,
};
use crate::infra::services::acquisition::AcquisitionApiService;

/// Coordinators keyed by entity.
///
/// Read access is public; creating, discarding and routing are reserved to
/// the card domain.
#[derive(Debug)]
pub struct CoordinatorRegistry {
    coordinators: HashMap<EntityKey, AcquisitionCoordinator>,
    epochs: EpochSource,
    service: Arc<dyn AcquisitionApiService>,
    policy: PollPolicy,
}

impl CoordinatorRegistry {
    pub fn new(service: Arc<dyn AcquisitionApiService>, policy: PollPolicy) -> Self {
        Self {
            coordinators: HashMap::new(),
            epochs: EpochSource::new(),
            service,
            policy,
        }
    }

    pub fn get(&self, key: &EntityKey) -> Option<&AcquisitionCoordinator> {
        self.coordinators.get(key)
    }

    pub fn contains(&self, key: &EntityKey) -> bool {
        self.coordinators.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.coordinators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coordinators.is_empty()
    }

    pub fn service(&self) -> &Arc<dyn AcquisitionApiService> {
        &self.service
    }

    /// Coordinator for `ad`, created in `NotStarted` if absent.
    pub(super) fn ensure(&mut self, ad: &AdSummary) -> &mut AcquisitionCoordinator {
        self.coordinators.entry(ad.key.clone()).or_insert_with(|| {
            debug!("[Registry] creating coordinator for {}", ad.key);
            AcquisitionCoordinator::new(
                ad.key.clone(),
                ad.source_ref.clone(),
                Arc::clone(&self.service),
                self.policy,
                self.epochs.clone(),
            )
        })
    }

    /// Deactivate and drop the coordinator for `key`.
    pub(super) fn discard(&mut self, key: &EntityKey) -> bool {
        match self.coordinators.remove(key) {
            Some(mut coordinator) => {
                coordinator.deactivate();
                debug!("[Registry] discarded coordinator for {}", key);
                true
            }
            None => false,
        }
    }

    pub(super) fn route(
        &mut self,
        message: AcquisitionMessage,
    ) -> Task<AcquisitionMessage> {
        let key = message.ticket().key.clone();
        match self.coordinators.get_mut(&key) {
            Some(coordinator) => coordinator.update(message),
            None => {
                debug!(
                    "[Registry] no coordinator for {}, dropping {}",
                    key,
                    message.name()
                );
                Task::none()
            }
        }
    }
}
