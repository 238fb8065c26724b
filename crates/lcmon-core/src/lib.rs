pub mod config;
pub mod logging;

pub mod error;
pub mod headers;
pub mod input;
pub mod key;
pub mod monitor;
pub mod report;
pub mod retry;
pub mod transport;

pub use error::FetchError;
pub use key::ResourceKey;
pub use monitor::{FetchResult, Monitor, MonitorSettings};
