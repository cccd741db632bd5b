//! Session values a request snapshots when it is constructed.

use studio_config::Config;

/// Read-only view of the client session that delivered a request.
///
/// The transport layer owns sessions and may update them between requests.
/// A [`Request`](crate::Request) copies both values once, at construction.
pub trait Session {
    /// Protocol version negotiated for this session.
    fn rpc_version(&self) -> u32;

    /// Whether handlers should let non-fatal check failures pass.
    fn ignore_non_fatal_request_checks(&self) -> bool;
}

/// Plain session state for embedders that track sessions themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionState {
    rpc_version: u32,
    ignore_non_fatal_request_checks: bool,
}

impl SessionState {
    /// Creates session state from explicit values.
    #[must_use]
    pub const fn new(rpc_version: u32, ignore_non_fatal_request_checks: bool) -> Self {
        Self {
            rpc_version,
            ignore_non_fatal_request_checks,
        }
    }

    /// Seeds session state from the shared configuration.
    #[must_use]
    pub const fn from_config(config: &Config) -> Self {
        Self::new(config.rpc_version, config.ignore_non_fatal_request_checks)
    }

    /// Replaces the negotiated protocol version.
    #[must_use]
    pub const fn with_rpc_version(mut self, rpc_version: u32) -> Self {
        self.rpc_version = rpc_version;
        self
    }

    /// Replaces the strictness flag.
    #[must_use]
    pub const fn with_ignore_non_fatal_request_checks(mut self, ignore: bool) -> Self {
        self.ignore_non_fatal_request_checks = ignore;
        self
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl Session for SessionState {
    fn rpc_version(&self) -> u32 {
        self.rpc_version
    }

    fn ignore_non_fatal_request_checks(&self) -> bool {
        self.ignore_non_fatal_request_checks
    }
}
