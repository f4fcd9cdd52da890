use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, PoisonError, RwLock};

use async_trait::async_trait;
use carsift_model::prelude::{
    AssetHandle, AssetIndex, EntityKey, JobStatus, MediaCount, SourceRef,
};
use tokio::sync::Notify;

use crate::infra::errors::AcquisitionError;
use crate::infra::services::acquisition::{AcquisitionApiService, AssetFetch};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceCallKind {
    Count,
    Trigger,
    Progress,
    FetchAsset,
}

/// One recorded call against the stub.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceCall {
    Count(EntityKey),
    Trigger(EntityKey, SourceRef),
    Progress(EntityKey),
    FetchAsset(EntityKey, AssetIndex),
}

impl ServiceCall {
    pub fn kind(&self) -> ServiceCallKind {
        match self {
            Self::Count(_) => ServiceCallKind::Count,
            Self::Trigger(..) => ServiceCallKind::Trigger,
            Self::Progress(_) => ServiceCallKind::Progress,
            Self::FetchAsset(..) => ServiceCallKind::FetchAsset,
        }
    }

    pub fn key(&self) -> &EntityKey {
        match self {
            Self::Count(key)
            | Self::Trigger(key, _)
            | Self::Progress(key)
            | Self::FetchAsset(key, _) => key,
        }
    }
}

/// Scripted backend.
///
/// Count and progress responses are queues per key: each call pops the front
/// until one entry is left, which then repeats forever. Unscripted keys
/// report zero assets, accept triggers and stay `running 0/0`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedAcquisitionService {
    inner: Arc<RwLock<ScriptState>>,
}

#[derive(Debug, Default)]
struct ScriptState {
    counts: HashMap<EntityKey, VecDeque<Result<MediaCount, AcquisitionError>>>,
    progress: HashMap<EntityKey, VecDeque<Result<JobStatus, AcquisitionError>>>,
    triggers: HashMap<EntityKey, Result<(), AcquisitionError>>,
    assets: HashMap<(EntityKey, AssetIndex), Vec<u8>>,
    gates: HashMap<(EntityKey, ServiceCallKind), Arc<Notify>>,
    calls: Vec<ServiceCall>,
}

fn next_scripted<T: Clone>(queue: Option<&mut VecDeque<T>>) -> Option<T> {
    let queue = queue?;
    if queue.len() > 1 {
        queue.pop_front()
    } else {
        queue.front().cloned()
    }
}

impl ScriptedAcquisitionService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_counts(
        self,
        key: &EntityKey,
        counts: impl IntoIterator<Item = u32>,
    ) -> Self {
        self.with_count_results(key, counts.into_iter().map(|n| Ok(n.into())))
    }

    pub fn with_count_results(
        self,
        key: &EntityKey,
        results: impl IntoIterator<Item = Result<MediaCount, AcquisitionError>>,
    ) -> Self {
        self.write()
            .counts
            .insert(key.clone(), results.into_iter().collect());
        self
    }

    pub fn with_progress(
        self,
        key: &EntityKey,
        statuses: impl IntoIterator<Item = JobStatus>,
    ) -> Self {
        self.with_progress_results(key, statuses.into_iter().map(Ok))
    }

    pub fn with_progress_results(
        self,
        key: &EntityKey,
        results: impl IntoIterator<Item = Result<JobStatus, AcquisitionError>>,
    ) -> Self {
        self.write()
            .progress
            .insert(key.clone(), results.into_iter().collect());
        self
    }

    pub fn reject_trigger(self, key: &EntityKey, error: AcquisitionError) -> Self {
        self.write().triggers.insert(key.clone(), Err(error));
        self
    }

    pub fn with_asset(
        self,
        key: &EntityKey,
        index: AssetIndex,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        self.write()
            .assets
            .insert((key.clone(), index), bytes.into());
        self
    }

    /// Make every subsequent `kind` call for `key` wait for a permit on the
    /// returned [`Notify`]. Calls are still recorded before they block.
    pub fn gate(&self, key: &EntityKey, kind: ServiceCallKind) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.write()
            .gates
            .insert((key.clone(), kind), Arc::clone(&gate));
        gate
    }

    pub fn ungate(&self, key: &EntityKey, kind: ServiceCallKind) {
        if let Some(gate) = self.write().gates.remove(&(key.clone(), kind)) {
            gate.notify_waiters();
        }
    }

    pub fn calls(&self) -> Vec<ServiceCall> {
        self.read().calls.clone()
    }

    pub fn call_count(&self, key: &EntityKey, kind: ServiceCallKind) -> usize {
        self.read()
            .calls
            .iter()
            .filter(|call| call.kind() == kind && call.key() == key)
            .count()
    }

    pub fn total_calls(&self) -> usize {
        self.read().calls.len()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, ScriptState> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, ScriptState> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    async fn enter(&self, call: ServiceCall) {
        let gate = {
            let mut state = self.write();
            let gate = state.gates.get(&(call.key().clone(), call.kind())).cloned();
            state.calls.push(call);
            gate
        };
        if let Some(gate) = gate {
            gate.notified().await;
        }
    }
}

#[async_trait]
impl AcquisitionApiService for ScriptedAcquisitionService {
    async fn media_count(
        &self,
        key: &EntityKey,
    ) -> Result<MediaCount, AcquisitionError> {
        self.enter(ServiceCall::Count(key.clone())).await;
        next_scripted(self.write().counts.get_mut(key))
            .unwrap_or(Ok(MediaCount::ZERO))
    }

    async fn trigger(
        &self,
        key: &EntityKey,
        source_ref: &SourceRef,
    ) -> Result<(), AcquisitionError> {
        self.enter(ServiceCall::Trigger(key.clone(), source_ref.clone()))
            .await;
        self.read().triggers.get(key).cloned().unwrap_or(Ok(()))
    }

    async fn progress(
        &self,
        key: &EntityKey,
    ) -> Result<JobStatus, AcquisitionError> {
        self.enter(ServiceCall::Progress(key.clone())).await;
        next_scripted(self.write().progress.get_mut(key))
            .unwrap_or(Ok(JobStatus::running(0, 0)))
    }

    fn asset(&self, key: &EntityKey, index: AssetIndex) -> AssetHandle {
        AssetHandle {
            key: key.clone(),
            index,
            url: format!("memory://media-asset/{}/{}", key, index.to_path_segment()),
        }
    }

    fn thumbnail_url(&self, key: &EntityKey) -> String {
        format!("memory://thumbnail/{key}")
    }

    async fn fetch_asset(
        &self,
        key: &EntityKey,
        index: AssetIndex,
    ) -> Result<AssetFetch, AcquisitionError> {
        self.enter(ServiceCall::FetchAsset(key.clone(), index)).await;
        Ok(match self.read().assets.get(&(key.clone(), index)) {
            Some(bytes) => AssetFetch::Ready(bytes.clone()),
            None => AssetFetch::NotMaterialized,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn last_scripted_response_repeats() {
        let key = EntityKey::new("1").unwrap();
        let stub = ScriptedAcquisitionService::new().with_counts(&key, [0, 4]);
        assert_eq!(stub.media_count(&key).await, Ok(MediaCount::ZERO));
        assert_eq!(stub.media_count(&key).await, Ok(MediaCount::new(4)));
        assert_eq!(stub.media_count(&key).await, Ok(MediaCount::new(4)));
        assert_eq!(stub.call_count(&key, ServiceCallKind::Count), 3);
    }

    #[tokio::test]
    async fn unscripted_keys_use_defaults() {
        let key = EntityKey::new("2").unwrap();
        let source = SourceRef::new("https://example.test/2").unwrap();
        let stub = ScriptedAcquisitionService::new();
        assert_eq!(stub.trigger(&key, &source).await, Ok(()));
        assert_eq!(stub.progress(&key).await, Ok(JobStatus::running(0, 0)));
        assert_eq!(
            stub.fetch_asset(&key, AssetIndex::FIRST).await,
            Ok(AssetFetch::NotMaterialized)
        );
    }
}
