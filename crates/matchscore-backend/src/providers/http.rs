use matchscore_core::{AnswerRecord, ControlsRecord, QuestionRecord};
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::{BackendConfig, USER_PLACEHOLDER};
use crate::error::BackendError;
use crate::traits::BackendClient;

#[derive(Clone)]
pub struct HttpBackendClient {
    config: BackendConfig,
    client: Client,
}

impl HttpBackendClient {
    pub fn new(config: BackendConfig) -> Result<Self, BackendError> {
        config.validate()?;
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { config, client })
    }

    fn answers_path(&self, user: &str) -> Result<String, BackendError> {
        let user = user.trim();
        if user.is_empty() || user == "." || user == ".." || user.contains(['/', '?', '#']) {
            return Err(BackendError::Config(format!("invalid user id: {user:?}")));
        }
        Ok(self.config.answers_path.replace(USER_PLACEHOLDER, user))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, BackendError> {
        let url = self.config.url(path);
        debug!(client = self.name(), %url, "fetching");

        let mut req = self.client.get(&url);
        if let Some(token) = &self.config.api_token {
            req = req.bearer_auth(token);
        }

        let res = req.send().await?;
        if !res.status().is_success() {
            let status = res.status().as_u16();
            let body = res.text().await.unwrap_or_default();
            return Err(BackendError::Api { status, body });
        }

        let body = res.text().await?;
        if body.trim().is_empty() {
            return Err(BackendError::InvalidResponse(format!("empty response body from {url}")));
        }
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait::async_trait]
impl BackendClient for HttpBackendClient {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn fetch_controls(&self) -> Result<ControlsRecord, BackendError> {
        self.get_json(&self.config.controls_path).await
    }

    async fn fetch_questions(&self) -> Result<Vec<QuestionRecord>, BackendError> {
        self.get_json(&self.config.questions_path).await
    }

    async fn fetch_answers(&self, user: &str) -> Result<Vec<AnswerRecord>, BackendError> {
        let path = self.answers_path(user)?;
        self.get_json(&path).await
    }
}
