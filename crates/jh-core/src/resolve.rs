//! Attempt → (container, node, user) resolution.

use jh_client::MetadataClient;
use jh_model::{AttemptRef, ResolvedLocation};
use serde_json::Value;
use tracing::{debug, instrument};

use crate::ToolError;

/// Resolves where an attempt ran using two sequential metadata calls.
///
/// Nothing is cached: every call hits the history server again.
#[derive(Debug, Clone)]
pub struct Resolver {
    metadata: MetadataClient,
}

impl Resolver {
    pub fn new(metadata: MetadataClient) -> Self {
        Self { metadata }
    }

    #[instrument(level = "debug", skip(self), fields(attempt = %attempt))]
    pub async fn resolve(&self, attempt: &AttemptRef) -> Result<ResolvedLocation, ToolError> {
        let attempt_json = self.metadata.get_json(&attempt.attempt_endpoint(), &[]).await?;
        let (container_id, node_address) = attempt_fields(&attempt_json)?;

        let job_json = self.metadata.get_json(&attempt.job_endpoint(), &[]).await?;
        let owning_user = job_user(&job_json)?;

        let (node_host, node_port) = split_node_address(&node_address);
        debug!(%container_id, %node_host, %owning_user, "attempt resolved");

        Ok(ResolvedLocation {
            container_id,
            node_host,
            node_port,
            owning_user,
        })
    }
}

/// Split `host:port` into its parts.
///
/// Only a trailing all-digit segment counts as a port; anything else is returned as the host.
pub fn split_node_address(address: &str) -> (String, Option<u16>) {
    match address.rsplit_once(':') {
        Some((host, port))
            if !host.is_empty() && !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit()) =>
        {
            (host.to_string(), port.parse().ok())
        }
        _ => (address.to_string(), None),
    }
}

fn attempt_fields(body: &Value) -> Result<(String, String), ToolError> {
    let attempt = body.get("taskAttempt").unwrap_or(&Value::Null);
    let container = non_empty(attempt, "assignedContainerId").ok_or(ToolError::Incomplete {
        field: "assignedContainerId",
        hint: "Check that attempt_id is correct.",
    })?;
    let node = non_empty(attempt, "nodeHttpAddress").ok_or(ToolError::Incomplete {
        field: "nodeHttpAddress",
        hint: "Check that attempt_id is correct.",
    })?;
    Ok((container, node))
}

fn job_user(body: &Value) -> Result<String, ToolError> {
    let job = body.get("job").unwrap_or(&Value::Null);
    non_empty(job, "user").ok_or(ToolError::Incomplete {
        field: "user",
        hint: "Check that job_id is correct.",
    })
}

fn non_empty(obj: &Value, key: &str) -> Option<String> {
    obj.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
