//! HTTP access to the job-history service.
//!
//! [`MetadataClient`] issues JSON GETs against the history REST API,
//! [`LogFetcher`] retrieves HTML log pages from the log server.
//! Every transport failure is mapped into the closed [`ClientError`] taxonomy.

mod config;
pub use config::{ClientConfig, DEFAULT_LOG_PORT, DEFAULT_METADATA_URL, DEFAULT_TIMEOUT};

mod errors;
pub use errors::ClientError;

mod transport;

mod metadata;
pub use metadata::MetadataClient;

mod fetch;
pub use fetch::{LogFetcher, LogPage};
