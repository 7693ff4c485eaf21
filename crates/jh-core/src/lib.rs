//! Tool semantics of the job-history service.
//!
//! The log pipeline chains [`Resolver`] → [`build_log_url`] → [`jh_client::LogFetcher`] →
//! [`extract_pre`]; every other tool is a descriptor-driven pass-through executed by
//! [`ToolExecutor`].

mod error;
pub use error::ToolError;

pub mod extract;
pub use extract::extract_pre;

pub mod url;
pub use url::build_log_url;

pub mod resolve;
pub use resolve::{Resolver, split_node_address};

mod pipeline;
pub use pipeline::{LogPipeline, LogRetrieval};

pub mod ops;
pub use ops::{
    ArgValue, Args, Operation, OperationDescriptor, ParamDefault, ParamKind, ParamLocation, ParamSpec,
};

pub mod render;

mod metrics;
pub use metrics::{MetricsBackend, NoopMetrics};

mod executor;
pub use executor::{ToolExecutor, ToolOutput};
