use std::sync::Arc;

use carsift_config::ServerConfig;

use crate::infra::api_client::ApiClient;
use crate::infra::errors::AcquisitionError;
use crate::infra::services::acquisition::{
    AcquisitionApiAdapter, AcquisitionApiService,
};

/// HTTP-backed service for `server`.
pub fn build_service(
    server: &ServerConfig,
) -> Result<Arc<dyn AcquisitionApiService>, AcquisitionError> {
    let client = ApiClient::from_config(server)?;
    Ok(Arc::new(AcquisitionApiAdapter::new(Arc::new(client))))
}
