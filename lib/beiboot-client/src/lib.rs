//! # Beiboot client
//!
//! Typed asynchronous client for the Beiboot cluster-management REST API.
//!
//! - **[`ApiClient`]** - the immutable client context (base URL, authentication,
//!   default headers, default error messages)
//! - **[`services`]** - one method per API endpoint
//! - **[`ApiCall`]** - generic request descriptor, for endpoints not covered by
//!   the services
//! - **[`CallHandle`]** - every spawned call, cancelable until it settles
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use beiboot_client::{ApiClient, CallOutcome};
//! use beiboot_client::models::BeibootRequest;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), beiboot_client::ApiClientError> {
//! let client = ApiClient::builder()
//!     .with_base_url("https://beiboot.example.com")?
//!     .build()?;
//!
//! let handle = client
//!     .clusters()
//!     .create(&BeibootRequest::new("demo"), Some("jane"));
//!
//! match handle.await {
//!     CallOutcome::Fulfilled(cluster) => println!("created {}", cluster.name),
//!     CallOutcome::Rejected(error) => eprintln!("{} error: {error}", error.kind()),
//!     CallOutcome::Canceled => {}
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Error mapping
//!
//! A response whose status is declared in the effective error messages (client
//! defaults merged with the call entries) is rejected with that message. Other
//! 2xx responses are fulfilled, any other status is rejected with
//! [`GENERIC_ERROR_MESSAGE`]. `422` responses expose the parsed field-level
//! detail with [`ApiError::validation`].
//!
//! ## Cancellation
//!
//! ```rust,no_run
//! # use beiboot_client::ApiClient;
//! # async fn example(client: ApiClient) {
//! let handle = client.clusters().list(None);
//! let canceler = handle.canceler();
//! canceler.cancel();
//! assert!(handle.await.is_canceled());
//! # }
//! ```

mod client;
pub use self::client::{
    ApiCall, ApiClient, ApiClientBuilder, ApiClientError, ApiError, Authentication,
    AuthenticationError, CallBody, CallHandle, CallHeaders, CallOutcome, CallPath, CallQuery,
    CallResult, CallState, CancelHandle, ErrorKind, ErrorMessages, GENERIC_ERROR_MESSAGE, Output,
    ParamStyle, ParamValue, ParameterValue, Payload, SecureString, TokenFuture, TokenResolver,
};

pub mod models;
pub mod services;
