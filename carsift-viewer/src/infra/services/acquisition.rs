use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;
use carsift_contracts::prelude::{
    AcquireMediaRequest, AcquisitionProgressResponse, MediaCountResponse,
    utils, v1,
};
use carsift_model::prelude::{
    AssetHandle, AssetIndex, EntityKey, JobStatus, MediaCount, SourceRef,
};

use crate::infra::api_client::ApiClient;
use crate::infra::errors::AcquisitionError;

/// Result of fetching one derived image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetFetch {
    Ready(Vec<u8>),
    /// The index is not (yet) materialized on the backend.
    NotMaterialized,
}

/// Backend calls needed to make a gallery exist.
#[async_trait]
pub trait AcquisitionApiService: Send + Sync + Debug {
    /// Number of assets already available for `key`.
    async fn media_count(
        &self,
        key: &EntityKey,
    ) -> Result<MediaCount, AcquisitionError>;

    /// Ask the backend to start (or join) an acquisition job.
    async fn trigger(
        &self,
        key: &EntityKey,
        source_ref: &SourceRef,
    ) -> Result<(), AcquisitionError>;

    async fn progress(
        &self,
        key: &EntityKey,
    ) -> Result<JobStatus, AcquisitionError>;

    /// Locator for asset `index`; does not touch the network.
    fn asset(&self, key: &EntityKey, index: AssetIndex) -> AssetHandle;

    /// Locator for the card's pre-acquisition thumbnail.
    fn thumbnail_url(&self, key: &EntityKey) -> String;

    async fn fetch_asset(
        &self,
        key: &EntityKey,
        index: AssetIndex,
    ) -> Result<AssetFetch, AcquisitionError>;
}

/// HTTP implementation over [`ApiClient`].
#[derive(Debug, Clone)]
pub struct AcquisitionApiAdapter {
    client: Arc<ApiClient>,
}

impl AcquisitionApiAdapter {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    fn asset_path(key: &EntityKey, index: AssetIndex) -> String {
        utils::replace_params(
            v1::media::ASSET,
            &[
                ("{entity_key}", key_segment(key)),
                ("{index}", index.to_path_segment()),
            ],
        )
    }
}

/// Keys are opaque, so reserved characters must not leave the path segment.
fn key_segment(key: &EntityKey) -> String {
    urlencoding::encode(key.as_str()).into_owned()
}

#[async_trait]
impl AcquisitionApiService for AcquisitionApiAdapter {
    async fn media_count(
        &self,
        key: &EntityKey,
    ) -> Result<MediaCount, AcquisitionError> {
        let path = utils::replace_param(
            v1::media::COUNT,
            "{entity_key}",
            key_segment(key),
        );
        let response: MediaCountResponse = self.client.get(&path).await?;
        Ok(response.into())
    }

    async fn trigger(
        &self,
        key: &EntityKey,
        source_ref: &SourceRef,
    ) -> Result<(), AcquisitionError> {
        let body = AcquireMediaRequest {
            entity_key: key.clone(),
            source_ref: source_ref.clone(),
        };
        self.client
            .post_accepted(v1::acquisition::TRIGGER, &body)
            .await
    }

    async fn progress(
        &self,
        key: &EntityKey,
    ) -> Result<JobStatus, AcquisitionError> {
        let path = utils::replace_param(
            v1::acquisition::PROGRESS,
            "{entity_key}",
            key_segment(key),
        );
        let response: AcquisitionProgressResponse =
            self.client.get(&path).await?;
        Ok(response.into())
    }

    fn asset(&self, key: &EntityKey, index: AssetIndex) -> AssetHandle {
        AssetHandle {
            key: key.clone(),
            index,
            url: self.client.build_url(Self::asset_path(key, index)),
        }
    }

    fn thumbnail_url(&self, key: &EntityKey) -> String {
        self.client.build_url(utils::replace_param(
            v1::media::THUMBNAIL,
            "{entity_key}",
            key_segment(key),
        ))
    }

    async fn fetch_asset(
        &self,
        key: &EntityKey,
        index: AssetIndex,
    ) -> Result<AssetFetch, AcquisitionError> {
        let bytes = self.client.get_bytes(&Self::asset_path(key, index)).await?;
        Ok(match bytes {
            Some(bytes) => AssetFetch::Ready(bytes),
            None => AssetFetch::NotMaterialized,
        })
    }
}
