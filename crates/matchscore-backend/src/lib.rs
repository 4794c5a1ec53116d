pub mod config;
pub mod controls;
pub mod error;
pub mod factory;
pub mod providers;
pub mod session;
pub mod traits;

pub use config::*;
pub use controls::*;
pub use error::BackendError;
pub use factory::*;
pub use providers::{HttpBackendClient, InMemoryBackend};
pub use session::*;
pub use traits::*;
