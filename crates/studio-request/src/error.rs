//! Failure values produced by request checks.

use std::fmt::Display;

use thiserror::Error;

use crate::status::RequestStatus;

/// A rejected request check: a status code plus a human-readable comment.
///
/// Errors are created once, at the check that detects the problem, and are
/// passed through composed checks unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{comment}")]
pub struct RequestError {
    status: RequestStatus,
    comment: String,
}

impl RequestError {
    /// Creates an error from its parts.
    #[must_use]
    pub fn new(status: RequestStatus, comment: impl Into<String>) -> Self {
        Self {
            status,
            comment: comment.into(),
        }
    }

    /// Status code describing the failure.
    #[must_use]
    pub const fn status(&self) -> RequestStatus {
        self.status
    }

    /// Human-readable description of the failure.
    #[must_use]
    pub const fn comment(&self) -> &str {
        self.comment.as_str()
    }

    /// Splits the error into its status and comment.
    #[must_use]
    pub fn into_parts(self) -> (RequestStatus, String) {
        (self.status, self.comment)
    }

    pub(crate) fn missing_request_data() -> Self {
        Self::new(
            RequestStatus::MissingRequestData,
            "Your request data is missing or invalid (non-object)",
        )
    }

    pub(crate) fn missing_parameter(key: &str) -> Self {
        Self::new(
            RequestStatus::MissingRequestParameter,
            format!("Your request is missing the `{key}` parameter."),
        )
    }

    pub(crate) fn invalid_type(key: &str, expected: ParameterType) -> Self {
        Self::new(
            RequestStatus::InvalidRequestParameterType,
            format!("The parameter `{key}` must be {}.", expected.description()),
        )
    }

    pub(crate) fn below_minimum(key: &str, minimum: impl Display) -> Self {
        Self::new(
            RequestStatus::RequestParameterOutOfRange,
            format!("The parameter `{key}` is below the minimum of `{minimum}`"),
        )
    }

    pub(crate) fn above_maximum(key: &str, maximum: impl Display) -> Self {
        Self::new(
            RequestStatus::RequestParameterOutOfRange,
            format!("The parameter `{key}` is above the maximum of `{maximum}`"),
        )
    }

    pub(crate) fn empty(key: &str) -> Self {
        Self::new(
            RequestStatus::RequestParameterEmpty,
            format!("The parameter `{key}` must not be empty."),
        )
    }

    pub(crate) fn source_not_found(name: &str) -> Self {
        Self::new(
            RequestStatus::ResourceNotFound,
            format!("No source was found by the name of `{name}`."),
        )
    }

    pub(crate) fn scene_item_not_found(scene: &str, item_id: i64) -> Self {
        Self::new(
            RequestStatus::ResourceNotFound,
            format!("No scene items were found in scene `{scene}` with the ID `{item_id}`."),
        )
    }

    pub(crate) fn wrong_resource(expected: ResourceType) -> Self {
        Self::new(
            RequestStatus::InvalidResourceType,
            format!("The specified source is not {}.", expected.description()),
        )
    }
}

/// JSON shapes a parameter check can insist on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ParameterType {
    Number,
    String,
    Boolean,
    Object,
    Array,
}

impl ParameterType {
    const fn description(self) -> &'static str {
        match self {
            Self::Number => "a number",
            Self::String => "a string",
            Self::Boolean => "boolean",
            Self::Object => "an object",
            Self::Array => "an array",
        }
    }
}

/// Resource kinds a resolver can insist on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ResourceType {
    Scene,
    Group,
    Input,
}

impl ResourceType {
    const fn description(self) -> &'static str {
        match self {
            Self::Scene => "a scene",
            Self::Group => "a group",
            Self::Input => "an input",
        }
    }
}
