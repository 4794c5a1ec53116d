use std::fmt;

use matchscore_core::Controls;
use parking_lot::RwLock;
use tracing::{info, warn};

use crate::traits::BackendClient;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlsAdvisory {
    pub reason: String,
}

impl ControlsAdvisory {
    pub fn message(&self) -> String {
        format!("using default scoring controls because {}", self.reason)
    }
}

impl fmt::Display for ControlsAdvisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ControlsResolution {
    pub controls: Controls,
    pub advisory: Option<ControlsAdvisory>,
}

impl ControlsResolution {
    pub fn fetched(controls: Controls) -> Self {
        Self {
            controls,
            advisory: None,
        }
    }

    pub fn defaults(reason: impl Into<String>) -> Self {
        Self {
            controls: Controls::default(),
            advisory: Some(ControlsAdvisory {
                reason: reason.into(),
            }),
        }
    }

    pub fn is_default(&self) -> bool {
        self.advisory.is_some()
    }
}

pub async fn resolve_controls(client: &dyn BackendClient) -> ControlsResolution {
    let resolution = match client.fetch_controls().await {
        Ok(record) => {
            let controls = Controls::from(record);
            match controls.validate() {
                Ok(()) => ControlsResolution::fetched(controls),
                Err(reason) => ControlsResolution::defaults(format!(
                    "backend returned unusable controls: {reason}"
                )),
            }
        }
        Err(err) => ControlsResolution::defaults(format!("controls fetch failed: {err}")),
    };

    if let Some(advisory) = &resolution.advisory {
        warn!(
            client = client.name(),
            reason = %advisory.reason,
            "falling back to default controls"
        );
    }
    resolution
}

#[derive(Debug)]
pub struct ControlsCache {
    current: RwLock<ControlsResolution>,
}

impl Default for ControlsCache {
    fn default() -> Self {
        Self::new(ControlsResolution::defaults("controls have not been fetched yet"))
    }
}

impl ControlsCache {
    pub fn new(initial: ControlsResolution) -> Self {
        Self {
            current: RwLock::new(initial),
        }
    }

    pub fn snapshot(&self) -> ControlsResolution {
        self.current.read().clone()
    }

    pub fn store(&self, resolution: ControlsResolution) {
        *self.current.write() = resolution;
    }

    pub async fn refresh(&self, client: &dyn BackendClient) -> ControlsResolution {
        let resolution = resolve_controls(client).await;
        info!(
            adjust = resolution.controls.adjust,
            exponent = resolution.controls.exponent,
            ota = resolution.controls.ota,
            defaulted = resolution.is_default(),
            "controls refreshed"
        );
        self.store(resolution.clone());
        resolution
    }
}
