pub mod config;
pub mod discovery;
pub mod http;
pub mod mem;
pub mod metrics;
pub mod traits;

pub use config::BackendConfig;
pub use discovery::{describe_datasets, discover_tools, list_dataset_descriptions};
pub use http::HttpBackend;
pub use mem::{Fixture, InMemoryBackend};
pub use traits::*;
