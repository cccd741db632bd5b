use crate::logging::LogFormat;

/// Protocol version assumed for sessions that have not negotiated one.
pub const DEFAULT_RPC_VERSION: u32 = 1;

/// Default log filter expression used by embedders.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Protocol version assumed for sessions that have not negotiated one.
#[must_use]
pub const fn default_rpc_version() -> u32 {
    DEFAULT_RPC_VERSION
}

/// Sessions are strict unless a client opts out during identification.
#[must_use]
pub const fn default_ignore_non_fatal_request_checks() -> bool {
    false
}

/// Default log filter expression used by embedders.
#[must_use]
pub const fn default_log_filter() -> &'static str {
    DEFAULT_LOG_FILTER
}

/// Owned log filter value used where allocation is required (e.g. serde).
#[must_use]
pub fn default_log_filter_string() -> String {
    DEFAULT_LOG_FILTER.to_owned()
}

/// Rejected request checks are only logged when asked for.
#[must_use]
pub const fn default_log_request_checks() -> bool {
    false
}

/// Default logging format.
#[must_use]
pub const fn default_log_format() -> LogFormat {
    LogFormat::Json
}
