pub use matchscore_backend::{
    build_backend_client, resolve_controls, BackendClient, BackendClientConfig, BackendConfig,
    BackendError, ControlsAdvisory, ControlsCache, ControlsResolution, HttpBackendClient,
    InMemoryBackend, PairScore, ScoringSession,
};
pub use matchscore_core::*;
