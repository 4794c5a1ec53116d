pub mod http;
pub mod in_memory;

pub use http::HttpBackendClient;
pub use in_memory::InMemoryBackend;
