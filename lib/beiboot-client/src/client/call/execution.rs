use std::future::{Future, IntoFuture};
use std::pin::Pin;

use headers::HeaderMapExt;
use http::header::{ACCEPT, CONTENT_TYPE, HeaderName, HeaderValue};
use http::{HeaderMap, Method, Uri};
use reqwest::{Body, Request};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use super::ApiCall;
use crate::client::parameters::PathResolved;
use crate::client::{
    ApiClientError, ApiError, Authentication, CallHandle, CallHeaders, CallPath, CallQuery,
    CallResult, ErrorMessages, Payload,
};

impl ApiCall {
    pub(in crate::client) fn build(
        client: reqwest::Client,
        base_uri: Uri,
        method: Method,
        path: CallPath,
        authentication: Option<Authentication>,
        default_headers: CallHeaders,
        errors: ErrorMessages,
    ) -> Self {
        Self {
            client,
            base_uri,
            method,
            path,
            query: CallQuery::default(),
            default_headers,
            headers: None,
            body: None,
            authentication,
            errors,
        }
    }
}

impl ApiCall {
    /// Builds the request that would be sent, without sending it.
    ///
    /// The token resolver, if any, is invoked.
    ///
    /// # Errors
    ///
    /// Fails on unresolved path placeholders, unsupported parameter values,
    /// invalid headers, or authentication failures.
    pub async fn to_request(&self) -> Result<Request, ApiClientError> {
        let url = Self::build_url(&self.base_uri, &self.path, &self.query)?;
        let mut request = Request::new(self.method.clone(), url);

        let req_headers = request.headers_mut();
        req_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        Self::insert_headers(req_headers, &self.default_headers)?;

        if let Some(auth) = &self.authentication
            && let Some((header_name, header_value)) = auth.resolve_header().await?
        {
            req_headers.insert(header_name, header_value);
        }

        if let Some(headers) = &self.headers {
            Self::insert_headers(req_headers, headers)?;
        }

        if let Some(body) = &self.body {
            let content_type_overridden = self
                .headers
                .as_ref()
                .is_some_and(|headers| headers.contains(CONTENT_TYPE.as_str()));
            if !content_type_overridden {
                req_headers.typed_insert(body.content_type.clone());
            }
            *request.body_mut() = Some(Body::from(body.data.clone()));
        }

        Ok(request)
    }

    async fn exchange(self) -> Result<CallResult, ApiClientError> {
        let request = self.to_request().await?;
        let Self {
            client,
            method,
            errors,
            ..
        } = self;
        let url = request.url().to_string();

        // Execute HTTP request
        debug!(?request, "sending...");
        let response = client.execute(request).await?;
        debug!(?response, "...receiving");

        let result = CallResult::read(response).await?;
        let status = result.status();
        if errors.contains(status) || !status.is_success() {
            let error = ApiError::new(method, url, status, result.into_output(), &errors);
            debug!(%error, "call rejected");
            return Err(error.into());
        }

        Ok(result)
    }

    pub(super) fn build_url(
        base_uri: &Uri,
        path: &CallPath,
        query: &CallQuery,
    ) -> Result<Url, ApiClientError> {
        let path_resolved = PathResolved::try_from(path)?;
        let base_uri = base_uri.to_string();
        let url = format!(
            "{}/{}",
            base_uri.trim_end_matches('/'),
            path_resolved.path.trim_start_matches('/')
        );
        let mut url = url.parse::<Url>()?;

        if !query.is_empty() {
            let query_string = query.to_query_string()?;
            if !query_string.is_empty() {
                url.set_query(Some(&query_string));
            }
        }

        Ok(url)
    }

    fn insert_headers(target: &mut HeaderMap, headers: &CallHeaders) -> Result<(), ApiClientError> {
        for name in headers.absent_names() {
            target.remove(name);
        }
        for (name, value) in headers.to_http_headers()? {
            target.insert(
                HeaderName::from_bytes(name.as_bytes())?,
                HeaderValue::from_str(&value)?,
            );
        }
        Ok(())
    }
}

impl ApiCall {
    /// Spawns the call and decodes the successful response with `decode`.
    ///
    /// The other `send*` methods build on this one.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime, as [`CallHandle::spawn`] does.
    pub fn send_with<T, F>(self, decode: F) -> CallHandle<T>
    where
        T: Send + 'static,
        F: FnOnce(CallResult) -> Result<T, ApiClientError> + Send + 'static,
    {
        CallHandle::spawn(async move {
            let result = self.exchange().await?;
            decode(result)
        })
    }

    /// Spawns the call, the response being JSON deserialized into `T`.
    pub fn send<T>(self) -> CallHandle<T>
    where
        T: DeserializeOwned + Send + 'static,
    {
        self.send_with(|result| result.as_json())
    }

    /// Spawns the call, the response being kept untyped.
    pub fn send_payload(self) -> CallHandle<Payload> {
        self.send_with(|result| result.as_payload())
    }

    pub fn send_text(self) -> CallHandle<String> {
        self.send_with(|result| result.as_text().map(str::to_string))
    }

    pub fn send_bytes(self) -> CallHandle<Vec<u8>> {
        self.send_with(|result| Ok(result.as_bytes().to_vec()))
    }

    /// Spawns the call, discarding the response body.
    pub fn send_empty(self) -> CallHandle<()> {
        self.send_with(|_| Ok(()))
    }

    /// Spawns the call, fulfilling with one response header.
    pub fn send_header(self, name: impl Into<String>) -> CallHandle<String> {
        let name = name.into();
        self.send_with(move |result| {
            result
                .header(&name)
                .map(str::to_string)
                .ok_or(ApiClientError::MissingHeader { name })
        })
    }
}

/// Implement IntoFuture for ApiCall to enable direct .await syntax
///
/// ```rust,no_run
/// # async fn example() -> Result<(), beiboot_client::ApiClientError> {
/// # let client = beiboot_client::ApiClient::builder().build()?;
/// let response = client.get("/").await?;
/// let payload = response.as_payload()?;
/// # Ok(())
/// # }
/// ```
impl IntoFuture for ApiCall {
    type Output = Result<CallResult, ApiClientError>;
    type IntoFuture = Pin<Box<dyn Future<Output = Self::Output> + Send>>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(self.exchange())
    }
}
