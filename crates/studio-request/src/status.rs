//! Status codes reported for rejected requests.

use serde::{Serialize, Serializer};
use strum::{Display, EnumIter};

/// Machine-readable reason a request check failed.
///
/// Codes are grouped by hundreds: 3xx for missing data, 4xx for malformed
/// parameters and 6xx for problems with the resources a request names. The
/// numeric values are part of the protocol and never change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[repr(u16)]
pub enum RequestStatus {
    /// A required parameter is absent or explicitly null.
    MissingRequestParameter = 300,
    /// The request payload is not an object.
    MissingRequestData = 301,
    /// A parameter is present but has the wrong JSON type.
    InvalidRequestParameterType = 401,
    /// A numeric parameter falls outside the accepted bounds.
    RequestParameterOutOfRange = 402,
    /// A string, object, or array parameter is empty where that is disallowed.
    RequestParameterEmpty = 403,
    /// A named source or scene item does not exist.
    ResourceNotFound = 600,
    /// A named resource exists but is of the wrong kind.
    InvalidResourceType = 602,
}

impl RequestStatus {
    /// Numeric code sent to clients.
    #[must_use]
    pub const fn code(self) -> u16 {
        self as u16
    }
}

impl Serialize for RequestStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u16(self.code())
    }
}
