use http::{Method, Uri};

use super::{Authentication, CallBody, CallHeaders, CallPath, CallQuery, ErrorMessages};

mod builder;
mod execution;

/// Declarative description of one HTTP call.
///
/// Created by [`ApiClient::call`](super::ApiClient::call) (or the `get`, `post`,
/// ... shortcuts) with the client context, refined with the builder methods,
/// then executed once.
///
/// # Method Groups
///
/// ## Parameters
/// - [`with_query(query)`](Self::with_query) / [`with_query_param(name, value)`](Self::with_query_param)
/// - [`with_headers(headers)`](Self::with_headers) / [`with_header(name, value)`](Self::with_header)
/// - [`with_authentication(auth)`](Self::with_authentication) / [`without_authentication()`](Self::without_authentication)
///
/// ## Body
/// - [`json(data)`](Self::json), [`form(data)`](Self::form), [`text(content)`](Self::text), [`raw(bytes, content_type)`](Self::raw)
///
/// ## Error mapping
/// - [`with_error(status, message)`](Self::with_error) / [`with_errors(errors)`](Self::with_errors)
///
/// ## Execution
/// - `.await` - resolves to the [`CallResult`](super::CallResult)
/// - [`send()`](Self::send), [`send_payload()`](Self::send_payload), [`send_text()`](Self::send_text),
///   [`send_bytes()`](Self::send_bytes), [`send_empty()`](Self::send_empty),
///   [`send_header(name)`](Self::send_header) - spawn the call and return a [`CallHandle`](super::CallHandle)
///
/// # Resolution
///
/// 1. path placeholders are substituted, a missing one fails before anything is sent;
/// 2. query parameters are appended, absent ones omitted;
/// 3. headers are merged, from lowest to highest precedence:
///    `Accept: application/json`, client defaults, authentication, call headers,
///    and the body content type unless the call sets `Content-Type`;
/// 4. a status found in the error mapping rejects with its message, a 2xx status
///    fulfills, any other status rejects with `Generic Error`.
#[derive(derive_more::Debug)]
pub struct ApiCall {
    pub(super) client: reqwest::Client,
    pub(super) base_uri: Uri,

    pub(super) method: Method,
    pub(super) path: CallPath,
    pub(super) query: CallQuery,
    pub(super) default_headers: CallHeaders,
    pub(super) headers: Option<CallHeaders>,

    #[debug(ignore)]
    pub(super) body: Option<CallBody>,

    pub(super) authentication: Option<Authentication>,
    /// Client defaults merged with the call entries
    pub(super) errors: ErrorMessages,
}
