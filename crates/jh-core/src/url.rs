//! Log-server URL construction.

use jh_model::{LogRequest, ResolvedLocation};

/// `{log_base}/{host}:{log_port}/{container}/{attempt}/{user}/{log_type}/?{range query}`.
///
/// Pure: identical inputs always produce the identical URL. The port comes from configuration,
/// never from the node's HTTP address.
pub fn build_log_url(
    log_base_url: &str,
    location: &ResolvedLocation,
    log_port: u16,
    request: &LogRequest,
) -> String {
    format!(
        "{}/{}/{}/{}/{}/{}/?{}",
        log_base_url.trim_end_matches('/'),
        location.log_server(log_port),
        location.container_id,
        request.attempt.attempt_id,
        location.owning_user,
        request.log_type.as_str(),
        request.range.query_string()
    )
}
