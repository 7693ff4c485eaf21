use serde::{Deserialize, Serialize};

/// Where a task attempt ran and who owns its logs.
///
/// Derived from two metadata calls and recomputed on every retrieval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedLocation {
    pub container_id: String,
    /// Host part of the node's HTTP address.
    pub node_host: String,
    /// Port part of the node's HTTP address, if it carried one.
    ///
    /// Informational only: the log server listens on a separately configured port.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_port: Option<u16>,
    pub owning_user: String,
}

impl ResolvedLocation {
    /// `host:port` of the log server for this location.
    pub fn log_server(&self, log_port: u16) -> String {
        format!("{}:{}", self.node_host, log_port)
    }
}
