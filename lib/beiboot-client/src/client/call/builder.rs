use http::StatusCode;
use serde::Serialize;

use super::ApiCall;
use crate::client::parameters::{ParamValue, ParameterValue};
use crate::client::{
    ApiClientError, Authentication, CallBody, CallHeaders, CallQuery, ErrorMessages,
};

impl ApiCall {
    // =============================================================================
    // Request Configuration Methods
    // =============================================================================

    /// Merges query parameters into the call, the new ones winning.
    pub fn with_query(mut self, query: CallQuery) -> Self {
        self.query = std::mem::take(&mut self.query).merge(query);
        self
    }

    pub fn with_query_param<T: ParameterValue>(
        self,
        name: impl Into<String>,
        value: impl Into<ParamValue<T>>,
    ) -> Self {
        let query = CallQuery::new().add_param(name, value);
        self.with_query(query)
    }

    /// Merges headers into the call headers, the new ones winning.
    pub fn with_headers(mut self, headers: CallHeaders) -> Self {
        self.headers = match self.headers.take() {
            Some(existing) => Some(existing.merge(headers)),
            None => Some(headers),
        };
        self
    }

    /// Adds a header.
    ///
    /// An absent value is not sent and removes a client default header with the same name.
    ///
    /// ```rust
    /// # use beiboot_client::ApiClient;
    /// # fn example() -> Result<(), beiboot_client::ApiClientError> {
    /// let client = ApiClient::builder().build()?;
    /// let call = client
    ///     .get("/clusters/")
    ///     .with_header("user-id", "jane")
    ///     .with_header("x-forwarded-groups", None::<&str>);
    /// # Ok(())
    /// # }
    /// ```
    pub fn with_header<T: ParameterValue>(
        self,
        name: impl Into<String>,
        value: impl Into<ParamValue<T>>,
    ) -> Self {
        let headers = CallHeaders::new().add_header(name, value);
        self.with_headers(headers)
    }

    /// Overrides the client authentication for this call.
    pub fn with_authentication(mut self, authentication: Authentication) -> Self {
        self.authentication = Some(authentication);
        self
    }

    pub fn without_authentication(mut self) -> Self {
        self.authentication = None;
        self
    }

    // =============================================================================
    // Error Mapping Methods
    // =============================================================================

    /// Rejects responses with `status` using `message`.
    pub fn with_error(mut self, status: StatusCode, message: impl Into<String>) -> Self {
        self.errors = std::mem::take(&mut self.errors).add(status, message);
        self
    }

    /// Merges entries into the error mapping, the new ones winning.
    pub fn with_errors(mut self, errors: ErrorMessages) -> Self {
        self.errors = std::mem::take(&mut self.errors).merge(errors);
        self
    }

    // =============================================================================
    // Request Body Methods
    // =============================================================================

    /// Sets an `application/json` body.
    pub fn json<T>(mut self, t: &T) -> Result<Self, ApiClientError>
    where
        T: Serialize + ?Sized,
    {
        self.body = Some(CallBody::json(t)?);
        Ok(self)
    }

    /// Sets an `application/x-www-form-urlencoded` body.
    pub fn form<T>(mut self, t: &T) -> Result<Self, ApiClientError>
    where
        T: Serialize + ?Sized,
    {
        self.body = Some(CallBody::form(t)?);
        Ok(self)
    }

    pub fn text(mut self, text: &str) -> Self {
        self.body = Some(CallBody::text(text));
        self
    }

    pub fn raw(mut self, data: Vec<u8>, content_type: headers::ContentType) -> Self {
        self.body = Some(CallBody::raw(data, content_type));
        self
    }

    pub fn with_body(mut self, body: CallBody) -> Self {
        self.body = Some(body);
        self
    }
}
