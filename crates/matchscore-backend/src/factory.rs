use std::sync::Arc;

use crate::config::BackendClientConfig;
use crate::error::BackendError;
use crate::providers::HttpBackendClient;
use crate::traits::BackendClient;

pub fn build_backend_client(
    cfg: BackendClientConfig,
) -> Result<Arc<dyn BackendClient>, BackendError> {
    match cfg {
        BackendClientConfig::Http(c) => Ok(Arc::new(HttpBackendClient::new(c)?)),
        BackendClientConfig::InMemory(backend) => Ok(Arc::new(backend)),
    }
}
