use std::fmt::Debug;

use http::{Method, StatusCode};

use super::output::Output;
use super::{AuthenticationError, ErrorMessages};
use crate::models::HttpValidationError;

/// Message used when a non-2xx status is not part of the error mapping.
pub const GENERIC_ERROR_MESSAGE: &str = "Generic Error";

/// Coarse classification of an [`ApiClientError`].
///
/// Callers branch on this to tell validation failures from transport failures
/// without matching every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ErrorKind {
    /// HTTP 422 returned by the server.
    #[display("validation")]
    Validation,
    /// Status code found in the effective error mapping.
    #[display("status-mapped")]
    StatusMapped,
    /// Any other non-2xx status.
    #[display("unmapped-http")]
    UnmappedHttp,
    /// Network failure: connect, DNS, reset, timeout, body read.
    #[display("transport")]
    Transport,
    /// The request could not be built.
    #[display("request")]
    Request,
    /// The response could not be decoded into the requested shape.
    #[display("decode")]
    Decode,
    /// The call was canceled.
    #[display("canceled")]
    Canceled,
    /// The task running the call vanished before settling.
    #[display("aborted")]
    Aborted,
}

/// Errors that can occur when using the [`ApiClient`](super::ApiClient).
///
/// All variants implement `std::error::Error`; use [`ApiClientError::kind`] to
/// classify them.
#[derive(Debug, derive_more::Error, derive_more::Display, derive_more::From)]
pub enum ApiClientError {
    /// HTTP client error from the underlying reqwest library.
    ///
    /// Network requests failing, timeouts, or connection issues.
    Transport(reqwest::Error),

    /// URL parsing error when constructing request URLs.
    UrlError(url::ParseError),

    /// HTTP protocol error from the http crate.
    HttpError(http::Error),

    /// Invalid URI while building the client base URI.
    InvalidUri(http::uri::InvalidUri),

    /// Invalid HTTP header name.
    InvalidHeaderName(http::header::InvalidHeaderName),

    /// Invalid HTTP header value.
    InvalidHeaderValue(http::header::InvalidHeaderValue),

    /// Authentication header could not be produced.
    Authentication(AuthenticationError),

    /// JSON serialization error of a request body or parameter.
    JsonValueError(serde_json::Error),

    /// The server answered with a status that is not a success.
    Api(ApiError),

    /// Invalid base path configuration.
    #[display("Invalid base path: {error}")]
    #[from(skip)]
    InvalidBasePath {
        /// Description of why the base path is invalid.
        error: String,
    },

    /// Invalid base URL configuration.
    #[display("Invalid base URL '{url}': {error}")]
    #[from(skip)]
    InvalidBaseUrl {
        /// The rejected URL.
        url: String,
        /// Description of why the URL is invalid.
        error: String,
    },

    /// JSON response deserialization failure.
    #[display("Failed to deserialize JSON at '{path}': {error}\n{body}")]
    #[from(skip)]
    JsonError {
        /// The JSON path where the error occurred.
        path: String,
        /// The underlying JSON parsing error.
        error: serde_json::Error,
        /// The response body that failed to parse.
        body: String,
    },

    /// Response output type is incompatible with JSON deserialization.
    #[display("Unsupported output for {name} as JSON:\n{output:?}")]
    #[from(skip)]
    UnsupportedJsonOutput {
        /// The actual response output received.
        output: Output,
        /// Name of the requested type.
        name: &'static str,
    },

    /// Response output type is incompatible with text extraction.
    #[display("Unsupported output for text:\n{output:?}")]
    #[from(skip)]
    UnsupportedTextOutput {
        /// The actual response output received.
        output: Output,
    },

    /// The requested response header is missing or not valid UTF-8.
    #[display("Missing response header '{name}'")]
    #[from(skip)]
    MissingHeader {
        /// The header name.
        name: String,
    },

    /// Path template contains unresolved parameters.
    #[display("Path '{path}' is missing required arguments: {missings:?}")]
    #[from(skip)]
    PathUnresolved {
        /// The path template that couldn't be resolved.
        path: String,
        /// List of missing parameter names.
        missings: Vec<String>,
    },

    /// Parameter value cannot be converted to the required format.
    #[display("Unsupported parameter value: {message}. Got: {value}")]
    #[from(skip)]
    UnsupportedParameterValue {
        /// Specific error message describing the conversion failure.
        message: String,
        /// The value that failed to convert.
        value: serde_json::Value,
    },

    /// Data serialization failed.
    #[display("Serialization error: {message}")]
    #[from(skip)]
    SerializationError {
        /// Description of the serialization failure.
        message: String,
    },

    /// The call was canceled before it settled.
    #[display("Request aborted")]
    #[from(skip)]
    Canceled,

    /// The task running the call ended without delivering an outcome.
    #[display("Call aborted before completion")]
    #[from(skip)]
    CallAborted,
}

impl ApiClientError {
    /// Classifies this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Transport(error) if error.is_builder() => ErrorKind::Request,
            Self::Transport(_) => ErrorKind::Transport,
            Self::Api(error) => error.kind(),
            Self::JsonError { .. }
            | Self::UnsupportedJsonOutput { .. }
            | Self::UnsupportedTextOutput { .. }
            | Self::MissingHeader { .. } => ErrorKind::Decode,
            Self::Canceled => ErrorKind::Canceled,
            Self::CallAborted => ErrorKind::Aborted,
            Self::UrlError(_)
            | Self::HttpError(_)
            | Self::InvalidUri(_)
            | Self::InvalidHeaderName(_)
            | Self::InvalidHeaderValue(_)
            | Self::Authentication(_)
            | Self::JsonValueError(_)
            | Self::InvalidBasePath { .. }
            | Self::InvalidBaseUrl { .. }
            | Self::PathUnresolved { .. }
            | Self::UnsupportedParameterValue { .. }
            | Self::SerializationError { .. } => ErrorKind::Request,
        }
    }

    /// The HTTP error, if the server answered with a rejected status.
    pub fn as_api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Api(error) => Some(error),
            _ => None,
        }
    }

    /// Shortcut for the HTTP status of an [`ApiError`].
    pub fn status(&self) -> Option<StatusCode> {
        self.as_api_error().map(ApiError::status)
    }
}

/// A response rejected because of its status code.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("{message} ({status} on {method} {url})")]
pub struct ApiError {
    method: Method,
    url: String,
    status: StatusCode,
    message: String,
    mapped: bool,
    body: Output,
    validation: Option<HttpValidationError>,
}

impl ApiError {
    pub(in crate::client) fn new(
        method: Method,
        url: impl Into<String>,
        status: StatusCode,
        body: Output,
        errors: &ErrorMessages,
    ) -> Self {
        let (message, mapped) = match errors.get(status) {
            Some(message) => (message.to_string(), true),
            None => (GENERIC_ERROR_MESSAGE.to_string(), false),
        };
        let validation = if status == StatusCode::UNPROCESSABLE_ENTITY {
            body.parse_json::<HttpValidationError>()
        } else {
            None
        };

        Self {
            method,
            url: url.into(),
            status,
            message,
            mapped,
            body,
            validation,
        }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The resolved request URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// The mapped message, or [`GENERIC_ERROR_MESSAGE`].
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Whether [`Self::message`] comes from the error mapping.
    pub fn is_mapped(&self) -> bool {
        self.mapped
    }

    /// The raw response body.
    pub fn body(&self) -> &Output {
        &self.body
    }

    /// Field-level detail of a 422 response, when the body matches the
    /// validation error shape.
    pub fn validation(&self) -> Option<&HttpValidationError> {
        self.validation.as_ref()
    }

    pub fn kind(&self) -> ErrorKind {
        if self.status == StatusCode::UNPROCESSABLE_ENTITY {
            ErrorKind::Validation
        } else if self.mapped {
            ErrorKind::StatusMapped
        } else {
            ErrorKind::UnmappedHttp
        }
    }
}
