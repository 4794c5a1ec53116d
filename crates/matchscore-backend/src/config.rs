use std::time::Duration;

use crate::error::BackendError;
use crate::providers::InMemoryBackend;

pub const USER_PLACEHOLDER: &str = "{user}";

#[derive(Debug, Clone)]
pub struct BackendConfig {
    pub base_url: String,
    pub api_token: Option<String>,
    pub timeout: Duration,
    pub controls_path: String,
    pub questions_path: String,
    pub answers_path: String,
}

impl BackendConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_token: None,
            timeout: Duration::from_secs(10),
            controls_path: "api/controls".to_string(),
            questions_path: "api/questions".to_string(),
            answers_path: format!("api/users/{USER_PLACEHOLDER}/answers"),
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    pub fn from_env() -> Result<Self, BackendError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub(crate) fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, BackendError> {
        let read = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let base_url = read("MATCHSCORE_API_URL")
            .ok_or_else(|| BackendError::Config("MATCHSCORE_API_URL is not set".to_string()))?;
        let mut cfg = Self::new(base_url);
        cfg.api_token = read("MATCHSCORE_API_TOKEN");

        if let Some(raw) = read("MATCHSCORE_TIMEOUT_MS") {
            let ms = raw.parse::<u64>().map_err(|_| {
                BackendError::Config(format!("MATCHSCORE_TIMEOUT_MS is not a number: {raw}"))
            })?;
            cfg.timeout = Duration::from_millis(ms.max(1));
        }
        if let Some(path) = read("MATCHSCORE_CONTROLS_PATH") {
            cfg.controls_path = path;
        }
        if let Some(path) = read("MATCHSCORE_QUESTIONS_PATH") {
            cfg.questions_path = path;
        }
        if let Some(path) = read("MATCHSCORE_ANSWERS_PATH") {
            cfg.answers_path = path;
        }

        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), BackendError> {
        let base = self.base_url.trim();
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(BackendError::Config(format!(
                "base url must be http(s): {base}"
            )));
        }
        if !self.answers_path.contains(USER_PLACEHOLDER) {
            return Err(BackendError::Config(format!(
                "answers path must contain {USER_PLACEHOLDER}: {}",
                self.answers_path
            )));
        }
        Ok(())
    }

    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[derive(Debug, Clone)]
pub enum BackendClientConfig {
    Http(BackendConfig),
    InMemory(InMemoryBackend),
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn requires_api_url() {
        let err = BackendConfig::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, BackendError::Config(_)));

        let err = BackendConfig::from_lookup(lookup(&[("MATCHSCORE_API_URL", "  ")])).unwrap_err();
        assert!(matches!(err, BackendError::Config(_)));
    }

    #[test]
    fn reads_overrides_and_ignores_blanks() {
        let cfg = BackendConfig::from_lookup(lookup(&[
            ("MATCHSCORE_API_URL", "https://dating.example/"),
            ("MATCHSCORE_API_TOKEN", "secret"),
            ("MATCHSCORE_TIMEOUT_MS", "2500"),
            ("MATCHSCORE_CONTROLS_PATH", "/v2/controls"),
            ("MATCHSCORE_QUESTIONS_PATH", ""),
        ]))
        .expect("valid config");

        assert_eq!(cfg.api_token.as_deref(), Some("secret"));
        assert_eq!(cfg.timeout, Duration::from_millis(2500));
        assert_eq!(cfg.url(&cfg.controls_path), "https://dating.example/v2/controls");
        assert_eq!(cfg.questions_path, "api/questions");
    }

    #[test]
    fn rejects_bad_timeout_and_answers_path() {
        let err = BackendConfig::from_lookup(lookup(&[
            ("MATCHSCORE_API_URL", "http://localhost:8000"),
            ("MATCHSCORE_TIMEOUT_MS", "soon"),
        ]))
        .unwrap_err();
        assert!(matches!(err, BackendError::Config(_)));

        let err = BackendConfig::from_lookup(lookup(&[
            ("MATCHSCORE_API_URL", "http://localhost:8000"),
            ("MATCHSCORE_ANSWERS_PATH", "api/answers"),
        ]))
        .unwrap_err();
        assert!(matches!(err, BackendError::Config(_)));
    }

    #[test]
    fn rejects_non_http_base_url() {
        assert!(BackendConfig::new("ftp://files").validate().is_err());
        assert!(BackendConfig::new("http://localhost:8000").validate().is_ok());
    }
}
