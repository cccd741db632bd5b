use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// How request-check diagnostics are rendered.
#[derive(
    Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum LogFormat {
    /// One JSON object per event with fields flattened to the top level, so
    /// `request_type`, `key` and `status` can be queried directly.
    #[default]
    Json,
    /// One human-readable line per event.
    Compact,
    /// Multi-line output for reading individual rejected requests.
    Pretty,
}

impl LogFormat {
    /// Whether the format is meant for machines rather than people.
    #[must_use]
    pub const fn is_structured(self) -> bool {
        matches!(self, Self::Json)
    }
}

/// Errors encountered while parsing a [`LogFormat`] from text.
pub type LogFormatParseError = strum::ParseError;
