use headers::ContentType;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::ApiClientError;

/// A response body, classified by its content type.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Output {
    Empty,
    Json(String),
    Text(String),
    Bytes(Vec<u8>),
}

impl Output {
    /// Classifies a fully read body.
    ///
    /// `application/json` and `+json` media types are JSON, `text/*` and XML
    /// are text, anything else is binary. Bodies that are not valid UTF-8 are
    /// kept as bytes.
    pub(in crate::client) fn classify(content_type: Option<&ContentType>, data: Vec<u8>) -> Self {
        if data.is_empty() {
            return Self::Empty;
        }

        let mime = content_type.map(|ct| mime::Mime::from(ct.clone()));
        let is_json = mime.as_ref().is_some_and(|mime| {
            mime.subtype() == mime::JSON || mime.suffix() == Some(mime::JSON)
        });
        let is_text = mime.as_ref().is_some_and(|mime| {
            mime.type_() == mime::TEXT || mime.subtype() == mime::XML || mime.suffix() == Some(mime::XML)
        });

        if !is_json && !is_text {
            return Self::Bytes(data);
        }

        match String::from_utf8(data) {
            Ok(text) if is_json => Self::Json(text),
            Ok(text) => Self::Text(text),
            Err(err) => {
                debug!(%err, "textual body is not valid UTF-8, keeping bytes");
                Self::Bytes(err.into_bytes())
            }
        }
    }

    /// Best-effort JSON parsing of a JSON or text body.
    pub(in crate::client) fn parse_json<T: DeserializeOwned>(&self) -> Option<T> {
        match self {
            Self::Json(text) | Self::Text(text) => serde_json::from_str(text).ok(),
            Self::Empty | Self::Bytes(_) => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// Untyped response body for endpoints without a declared response schema.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// No body.
    Empty,
    /// A JSON document.
    Json(serde_json::Value),
    /// A textual body that is not JSON.
    Text(String),
    /// Any other body.
    Binary(Vec<u8>),
}

impl Payload {
    /// The JSON document, if any.
    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Json(value) => Some(value),
            _ => None,
        }
    }

    /// The body as text, for JSON and text payloads.
    pub fn as_text(&self) -> Option<String> {
        match self {
            Self::Json(value) => Some(value.to_string()),
            Self::Text(text) => Some(text.clone()),
            Self::Empty | Self::Binary(_) => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

impl TryFrom<&Output> for Payload {
    type Error = ApiClientError;

    fn try_from(output: &Output) -> Result<Self, Self::Error> {
        let payload = match output {
            Output::Empty => Self::Empty,
            Output::Json(json) => {
                let value = serde_json::from_str(json).map_err(|error| ApiClientError::JsonError {
                    path: String::new(),
                    error,
                    body: json.clone(),
                })?;
                Self::Json(value)
            }
            Output::Text(text) => Self::Text(text.clone()),
            Output::Bytes(bytes) => Self::Binary(bytes.clone()),
        };
        Ok(payload)
    }
}
