use std::any::type_name;

use headers::{ContentType, HeaderMapExt};
use http::{HeaderMap, StatusCode};
use reqwest::Response;
use serde::de::DeserializeOwned;

use super::output::{Output, Payload};
use super::ApiClientError;

/// A response that went through the error mapping.
///
/// The body is fully read; decode it with one of the `as_*` methods.
#[derive(Debug, Clone)]
pub struct CallResult {
    status: StatusCode,
    headers: HeaderMap,
    content_type: Option<ContentType>,
    output: Output,
}

impl CallResult {
    pub(in crate::client) async fn read(response: Response) -> Result<Self, ApiClientError> {
        let status = response.status();
        let headers = response.headers().clone();
        let content_type = headers.typed_get::<ContentType>();
        let data = response.bytes().await?;
        let output = Output::classify(content_type.as_ref(), data.to_vec());

        Ok(Self {
            status,
            headers,
            content_type,
            output,
        })
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn content_type(&self) -> Option<&ContentType> {
        self.content_type.as_ref()
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// The value of a response header, if present and valid UTF-8.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }

    pub fn output(&self) -> &Output {
        &self.output
    }

    pub(in crate::client) fn into_output(self) -> Output {
        self.output
    }

    /// Deserializes a JSON (or textual) body.
    ///
    /// # Errors
    ///
    /// [`ApiClientError::JsonError`] carries the JSON path of the failure.
    pub fn as_json<T>(&self) -> Result<T, ApiClientError>
    where
        T: DeserializeOwned,
    {
        let (Output::Json(json) | Output::Text(json)) = &self.output else {
            return Err(ApiClientError::UnsupportedJsonOutput {
                output: self.output.clone(),
                name: type_name::<T>(),
            });
        };

        let deserializer = &mut serde_json::Deserializer::from_str(json);
        serde_path_to_error::deserialize(deserializer).map_err(|err| ApiClientError::JsonError {
            path: err.path().to_string(),
            error: err.into_inner(),
            body: json.clone(),
        })
    }

    /// The body as an untyped [`Payload`].
    pub fn as_payload(&self) -> Result<Payload, ApiClientError> {
        Payload::try_from(&self.output)
    }

    /// The body as text, empty for a response without body.
    pub fn as_text(&self) -> Result<&str, ApiClientError> {
        match &self.output {
            Output::Json(text) | Output::Text(text) => Ok(text),
            Output::Empty => Ok(""),
            output => Err(ApiClientError::UnsupportedTextOutput {
                output: output.clone(),
            }),
        }
    }

    /// The raw body, empty for a response without body.
    pub fn as_bytes(&self) -> &[u8] {
        match &self.output {
            Output::Json(text) | Output::Text(text) => text.as_bytes(),
            Output::Bytes(bytes) => bytes,
            Output::Empty => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;
    use crate::models::BeibootResponse;

    fn result(content_type: Option<ContentType>, body: &[u8]) -> CallResult {
        let mut headers = HeaderMap::new();
        if let Some(content_type) = &content_type {
            headers.typed_insert(content_type.clone());
        }
        headers.insert("x-request-id", "req-42".parse().expect("valid header"));
        let output = Output::classify(content_type.as_ref(), body.to_vec());
        CallResult {
            status: StatusCode::OK,
            headers,
            content_type,
            output,
        }
    }

    #[test]
    fn should_decode_json() {
        let result = result(
            Some(ContentType::json()),
            br#"{"name":"demo","namespace":"getdeck-bbt-demo","state":"RUNNING"}"#,
        );

        let cluster: BeibootResponse = result.as_json().expect("valid json");

        insta::assert_debug_snapshot!(cluster, @r#"
        BeibootResponse {
            name: "demo",
            namespace: Some(
                "getdeck-bbt-demo",
            ),
            state: Some(
                Running,
            ),
        }
        "#);
    }

    #[test]
    fn should_report_json_path_on_decode_error() {
        #[derive(Debug, Deserialize)]
        #[allow(dead_code)]
        struct Clusters {
            items: Vec<BeibootResponse>,
        }
        let result = result(Some(ContentType::json()), br#"{"items":[{"name":42}]}"#);

        let error = result.as_json::<Clusters>().expect_err("invalid json");

        assert!(matches!(
            error,
            ApiClientError::JsonError { ref path, .. } if path == "items[0].name"
        ));
    }

    #[test]
    fn should_reject_json_from_binary_body() {
        let result = result(Some(ContentType::octet_stream()), &[1, 2, 3]);

        let error = result.as_json::<serde_json::Value>().expect_err("binary");

        assert!(matches!(error, ApiClientError::UnsupportedJsonOutput { .. }));
        assert_eq!(result.as_bytes(), &[1, 2, 3]);
    }

    #[test]
    fn should_expose_text_and_headers() {
        let result = result(Some(ContentType::text_utf8()), b"apiVersion: v1");

        assert_eq!(result.as_text().expect("text"), "apiVersion: v1");
        assert_eq!(result.header("X-Request-Id"), Some("req-42"));
        assert_eq!(result.header("x-missing"), None);
        assert_eq!(
            result.as_payload().expect("payload"),
            Payload::Text("apiVersion: v1".to_string())
        );
    }

    #[test]
    fn should_read_empty_body_as_empty_text_and_bytes() {
        let result = result(None, b"");

        assert_eq!(result.as_text().expect("text"), "");
        assert!(result.as_bytes().is_empty());
        assert_eq!(result.as_payload().expect("payload"), Payload::Empty);
    }
}
