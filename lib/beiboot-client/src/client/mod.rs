use http::{Method, Uri};

mod builder;
pub use self::builder::ApiClientBuilder;

mod call;
pub use self::call::ApiCall;

mod parameters;
pub use self::parameters::{
    CallBody, CallHeaders, CallPath, CallQuery, ParamStyle, ParamValue, ParameterValue,
};

mod auth;
pub use self::auth::{
    Authentication, AuthenticationError, SecureString, TokenFuture, TokenResolver,
};

mod output;
pub use self::output::{Output, Payload};

mod result;
pub use self::result::CallResult;

mod status;
pub use self::status::ErrorMessages;

mod handle;
pub use self::handle::{CallHandle, CallOutcome, CallState, CancelHandle};

mod error;
pub use self::error::{ApiClientError, ApiError, ErrorKind, GENERIC_ERROR_MESSAGE};

/// The client context shared by every call.
///
/// Holds the base URL, the `reqwest` connection pool, the authentication,
/// the default headers and the default error messages. It is immutable once
/// built and cheap to clone; each call gets its own copy of the context.
///
/// # Example
///
/// ```rust,no_run
/// use beiboot_client::ApiClient;
/// use beiboot_client::models::BeibootResponse;
///
/// # async fn example() -> Result<(), beiboot_client::ApiClientError> {
/// let client = ApiClient::builder()
///     .with_host("beiboot.example.com")
///     .build()?;
///
/// // typed service
/// let clusters = client.clusters().list(Some("jane")).result().await?;
///
/// // generic call
/// let cluster: BeibootResponse = client
///     .get("/clusters/demo/state")
///     .with_header("user-id", "jane")
///     .await?
///     .as_json()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_uri: Uri,
    authentication: Option<Authentication>,
    default_headers: CallHeaders,
    default_errors: ErrorMessages,
}

impl ApiClient {
    /// Creates a builder with the default configuration.
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::default()
    }

    /// The base URI every call path is appended to.
    pub fn base_uri(&self) -> &Uri {
        &self.base_uri
    }
}

impl ApiClient {
    /// Creates a call descriptor carrying this client context.
    pub fn call(&self, method: Method, path: CallPath) -> ApiCall {
        ApiCall::build(
            self.client.clone(),
            self.base_uri.clone(),
            method,
            path,
            self.authentication.clone(),
            self.default_headers.clone(),
            self.default_errors.clone(),
        )
    }

    pub fn get(&self, path: impl Into<CallPath>) -> ApiCall {
        self.call(Method::GET, path.into())
    }

    pub fn post(&self, path: impl Into<CallPath>) -> ApiCall {
        self.call(Method::POST, path.into())
    }

    pub fn put(&self, path: impl Into<CallPath>) -> ApiCall {
        self.call(Method::PUT, path.into())
    }

    pub fn delete(&self, path: impl Into<CallPath>) -> ApiCall {
        self.call(Method::DELETE, path.into())
    }

    pub fn patch(&self, path: impl Into<CallPath>) -> ApiCall {
        self.call(Method::PATCH, path.into())
    }
}
