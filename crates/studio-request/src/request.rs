//! Typed, validated access to one request's payload.
//!
//! A [`Request`] wraps the payload of a single remote call. Checks are layered:
//! [`Request::validate_basic`] establishes that a key is present and non-null,
//! the scalar and container checks build on it, and the entity resolvers in
//! `resolve` build on the string check. Each check returns the extracted value
//! on success and a [`RequestError`] on failure. Failures are logged once, where
//! they are detected, and then propagated unchanged.

use std::fmt;

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{ParameterType, RequestError};
use crate::session::Session;
use crate::telemetry::REQUEST_TARGET;

/// Inclusive bounds accepted by [`Request::validate_number`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumberRange {
    min: f64,
    max: f64,
}

impl NumberRange {
    /// Accepts any number.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self {
            min: f64::NEG_INFINITY,
            max: f64::INFINITY,
        }
    }

    /// Accepts numbers greater than or equal to `min`.
    #[must_use]
    pub const fn at_least(min: f64) -> Self {
        Self {
            min,
            max: f64::INFINITY,
        }
    }

    /// Accepts numbers less than or equal to `max`.
    #[must_use]
    pub const fn at_most(max: f64) -> Self {
        Self {
            min: f64::NEG_INFINITY,
            max,
        }
    }

    /// Accepts numbers in `[min, max]`.
    #[must_use]
    pub const fn between(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Lower bound, inclusive.
    #[must_use]
    pub const fn min(&self) -> f64 {
        self.min
    }

    /// Upper bound, inclusive.
    #[must_use]
    pub const fn max(&self) -> f64 {
        self.max
    }
}

impl Default for NumberRange {
    fn default() -> Self {
        Self::unbounded()
    }
}

/// A single remote call and its payload.
///
/// The protocol version and strictness flag are copied from the session when
/// the request is built, so later changes to the session do not affect checks
/// already in flight. The request borrows the session and cannot outlive it.
pub struct Request<'s> {
    session: &'s dyn Session,
    rpc_version: u32,
    ignore_non_fatal_request_checks: bool,
    request_type: String,
    request_data: Value,
}

impl<'s> Request<'s> {
    /// Builds a request, replacing any non-object payload with an empty object.
    pub fn new(
        session: &'s dyn Session,
        request_type: impl Into<String>,
        request_data: Value,
    ) -> Self {
        Self {
            session,
            rpc_version: session.rpc_version(),
            ignore_non_fatal_request_checks: session.ignore_non_fatal_request_checks(),
            request_type: request_type.into(),
            request_data: normalise_request_data(request_data),
        }
    }

    /// Session that delivered the request.
    #[must_use]
    pub fn session(&self) -> &'s dyn Session {
        self.session
    }
}

impl Request<'_> {
    /// Protocol version of the session when the request was built.
    #[must_use]
    pub const fn rpc_version(&self) -> u32 {
        self.rpc_version
    }

    /// Strictness flag of the session when the request was built.
    ///
    /// Checks never consult this flag; handlers do, typically through
    /// [`Request::non_fatal`].
    #[must_use]
    pub const fn ignore_non_fatal_request_checks(&self) -> bool {
        self.ignore_non_fatal_request_checks
    }

    /// Name of the requested operation.
    #[must_use]
    pub const fn request_type(&self) -> &str {
        self.request_type.as_str()
    }

    /// Normalised payload. Always an object.
    #[must_use]
    pub const fn request_data(&self) -> &Value {
        &self.request_data
    }

    /// Whether the payload is an object.
    #[must_use]
    pub fn has_request_data(&self) -> bool {
        self.request_data.is_object()
    }

    /// Whether `key` is present with a non-null value.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.request_data
            .get(key)
            .is_some_and(|value| !value.is_null())
    }

    /// Checks that `key` is present and not null.
    ///
    /// # Errors
    ///
    /// `MissingRequestData` if the payload is not an object, and
    /// `MissingRequestParameter` if the key is absent or null.
    pub fn validate_basic(&self, key: &str) -> Result<&Value, RequestError> {
        let Some(data) = self.request_data.as_object() else {
            return Err(self.reject(key, RequestError::missing_request_data()));
        };

        match data.get(key) {
            Some(value) if !value.is_null() => Ok(value),
            _ => Err(self.reject(key, RequestError::missing_parameter(key))),
        }
    }

    /// Extracts a number within `range`.
    ///
    /// # Errors
    ///
    /// Any [`Request::validate_basic`] failure, `InvalidRequestParameterType`
    /// if the value is not a number, and `RequestParameterOutOfRange` if it
    /// falls outside `range`.
    pub fn validate_number(&self, key: &str, range: NumberRange) -> Result<f64, RequestError> {
        let value = self.validate_basic(key)?;
        let Some(number) = value.as_f64() else {
            return Err(self.reject(key, RequestError::invalid_type(key, ParameterType::Number)));
        };

        if number < range.min() {
            return Err(self.reject(key, RequestError::below_minimum(key, range.min())));
        }
        if number > range.max() {
            return Err(self.reject(key, RequestError::above_maximum(key, range.max())));
        }

        Ok(number)
    }

    /// Extracts a string, rejecting the empty string unless `allow_empty`.
    ///
    /// # Errors
    ///
    /// Any [`Request::validate_basic`] failure, `InvalidRequestParameterType`
    /// if the value is not a string, and `RequestParameterEmpty` if it is
    /// empty and that is not allowed.
    pub fn validate_string(&self, key: &str, allow_empty: bool) -> Result<&str, RequestError> {
        let value = self.validate_basic(key)?;
        let Some(text) = value.as_str() else {
            return Err(self.reject(key, RequestError::invalid_type(key, ParameterType::String)));
        };

        if text.is_empty() && !allow_empty {
            return Err(self.reject(key, RequestError::empty(key)));
        }

        Ok(text)
    }

    /// Extracts a boolean.
    ///
    /// # Errors
    ///
    /// Any [`Request::validate_basic`] failure, and
    /// `InvalidRequestParameterType` if the value is not a boolean.
    pub fn validate_boolean(&self, key: &str) -> Result<bool, RequestError> {
        self.validate_basic(key)?
            .as_bool()
            .ok_or_else(|| self.reject(key, RequestError::invalid_type(key, ParameterType::Boolean)))
    }

    /// Extracts an object, rejecting `{}` unless `allow_empty`.
    ///
    /// Members whose value is null still count as entries.
    ///
    /// # Errors
    ///
    /// Any [`Request::validate_basic`] failure, `InvalidRequestParameterType`
    /// if the value is not an object, and `RequestParameterEmpty` if it has no
    /// members and that is not allowed.
    pub fn validate_object(
        &self,
        key: &str,
        allow_empty: bool,
    ) -> Result<&Map<String, Value>, RequestError> {
        let value = self.validate_basic(key)?;
        let Some(object) = value.as_object() else {
            return Err(self.reject(key, RequestError::invalid_type(key, ParameterType::Object)));
        };

        if object.is_empty() && !allow_empty {
            return Err(self.reject(key, RequestError::empty(key)));
        }

        Ok(object)
    }

    /// Extracts an array, rejecting `[]` unless `allow_empty`.
    ///
    /// # Errors
    ///
    /// Any [`Request::validate_basic`] failure, `InvalidRequestParameterType`
    /// if the value is not an array, and `RequestParameterEmpty` if it has no
    /// elements and that is not allowed.
    pub fn validate_array(&self, key: &str, allow_empty: bool) -> Result<&[Value], RequestError> {
        let value = self.validate_basic(key)?;
        let Some(array) = value.as_array() else {
            return Err(self.reject(key, RequestError::invalid_type(key, ParameterType::Array)));
        };

        if array.is_empty() && !allow_empty {
            return Err(self.reject(key, RequestError::empty(key)));
        }

        Ok(array.as_slice())
    }

    /// Like [`Request::validate_number`], but an absent or null key yields
    /// `Ok(None)`.
    ///
    /// # Errors
    ///
    /// The same errors as [`Request::validate_number`] for a present value.
    pub fn validate_optional_number(
        &self,
        key: &str,
        range: NumberRange,
    ) -> Result<Option<f64>, RequestError> {
        self.optional(key, |request| request.validate_number(key, range))
    }

    /// Like [`Request::validate_string`], but an absent or null key yields
    /// `Ok(None)`.
    ///
    /// # Errors
    ///
    /// The same errors as [`Request::validate_string`] for a present value.
    pub fn validate_optional_string(
        &self,
        key: &str,
        allow_empty: bool,
    ) -> Result<Option<&str>, RequestError> {
        self.optional(key, |request| request.validate_string(key, allow_empty))
    }

    /// Like [`Request::validate_boolean`], but an absent or null key yields
    /// `Ok(None)`.
    ///
    /// # Errors
    ///
    /// The same errors as [`Request::validate_boolean`] for a present value.
    pub fn validate_optional_boolean(&self, key: &str) -> Result<Option<bool>, RequestError> {
        self.optional(key, |request| request.validate_boolean(key))
    }

    /// Like [`Request::validate_object`], but an absent or null key yields
    /// `Ok(None)`.
    ///
    /// # Errors
    ///
    /// The same errors as [`Request::validate_object`] for a present value.
    pub fn validate_optional_object(
        &self,
        key: &str,
        allow_empty: bool,
    ) -> Result<Option<&Map<String, Value>>, RequestError> {
        self.optional(key, |request| request.validate_object(key, allow_empty))
    }

    /// Like [`Request::validate_array`], but an absent or null key yields
    /// `Ok(None)`.
    ///
    /// # Errors
    ///
    /// The same errors as [`Request::validate_array`] for a present value.
    pub fn validate_optional_array(
        &self,
        key: &str,
        allow_empty: bool,
    ) -> Result<Option<&[Value]>, RequestError> {
        self.optional(key, |request| request.validate_array(key, allow_empty))
    }

    /// Applies the session's strictness flag to the outcome of a check.
    ///
    /// When the session ignores non-fatal checks a failure is logged and
    /// becomes `Ok(None)`. Otherwise the failure is returned unchanged.
    ///
    /// # Errors
    ///
    /// The original error, when the session is strict.
    pub fn non_fatal<T>(&self, result: Result<T, RequestError>) -> Result<Option<T>, RequestError> {
        match result {
            Ok(value) => Ok(Some(value)),
            Err(error) if self.ignore_non_fatal_request_checks => {
                debug!(
                    target: REQUEST_TARGET,
                    request_type = %self.request_type,
                    status = %error.status(),
                    %error,
                    "ignoring non-fatal request check failure"
                );
                Ok(None)
            }
            Err(error) => Err(error),
        }
    }

    fn optional<'a, T>(
        &'a self,
        key: &str,
        check: impl FnOnce(&'a Self) -> Result<T, RequestError>,
    ) -> Result<Option<T>, RequestError> {
        if !self.contains(key) {
            return Ok(None);
        }
        check(self).map(Some)
    }

    /// Records a failed check and hands the error back for propagation.
    pub(crate) fn reject(&self, key: &str, error: RequestError) -> RequestError {
        debug!(
            target: REQUEST_TARGET,
            request_type = %self.request_type,
            key,
            status = %error.status(),
            "request check failed"
        );
        error
    }
}

impl fmt::Debug for Request<'_> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Request")
            .field("rpc_version", &self.rpc_version)
            .field(
                "ignore_non_fatal_request_checks",
                &self.ignore_non_fatal_request_checks,
            )
            .field("request_type", &self.request_type)
            .field("request_data", &self.request_data)
            .finish_non_exhaustive()
    }
}

/// Replaces anything but an object with `{}` so every check can index keys.
fn normalise_request_data(request_data: Value) -> Value {
    if request_data.is_object() {
        request_data
    } else {
        Value::Object(Map::new())
    }
}
