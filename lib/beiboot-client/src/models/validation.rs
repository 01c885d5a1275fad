use std::fmt;

use serde::{Deserialize, Serialize};

/// Body of a `422 Unprocessable Entity` response.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HttpValidationError {
    /// One entry per rejected field.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub detail: Vec<ValidationError>,
}

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Location of the field, e.g. `["body", "name"]` or `["query", "ids", 0]`.
    pub loc: Vec<LocationItem>,
    /// Human readable message.
    pub msg: String,
    /// Machine readable error type, e.g. `value_error.missing`.
    #[serde(rename = "type")]
    pub kind: String,
}

/// One segment of a [`ValidationError::loc`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
#[serde(untagged)]
pub enum LocationItem {
    Name(String),
    Index(u64),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for item in &self.loc {
            if !first {
                write!(f, ".")?;
            }
            write!(f, "{item}")?;
            first = false;
        }
        write!(f, ": {}", self.msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_parse_fastapi_validation_body() {
        let body = r#"{
            "detail": [
                {"loc": ["header", "x-forwarded-user"], "msg": "field required", "type": "value_error.missing"},
                {"loc": ["body", "ports", 1], "msg": "str type expected", "type": "type_error.str"}
            ]
        }"#;

        let error: HttpValidationError = serde_json::from_str(body).expect("deserialize");

        let messages: Vec<_> = error.detail.iter().map(ToString::to_string).collect();
        insta::assert_debug_snapshot!(messages, @r#"
        [
            "header.x-forwarded-user: field required",
            "body.ports.1: str type expected",
        ]
        "#);
        assert_eq!(error.detail[0].kind, "value_error.missing");
    }

    #[test]
    fn should_accept_missing_detail() {
        let error: HttpValidationError = serde_json::from_str("{}").expect("deserialize");

        assert!(error.detail.is_empty());
    }
}
