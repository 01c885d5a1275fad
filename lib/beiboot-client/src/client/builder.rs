use std::fmt::Debug;
use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;

use http::Uri;
use http::uri::{PathAndQuery, Scheme};
use tracing::debug;
use url::Url;

use super::{
    ApiClient, ApiClientError, Authentication, CallHeaders, ErrorMessages, ParamValue,
    ParameterValue,
};

/// Builder for [`ApiClient`] instances.
///
/// # Default Configuration
///
/// - **Scheme**: HTTP (use `with_scheme()` to change to HTTPS)
/// - **Host**: 127.0.0.1 (localhost)
/// - **Port**: 80 (standard HTTP port)
/// - **Base path**: None (requests go to root path)
/// - **Error messages**: [`ErrorMessages::standard`]
/// - **Authentication**: None
///
/// # Example
///
/// ```rust
/// use beiboot_client::{ApiClient, Authentication};
/// use std::time::Duration;
///
/// # fn example() -> Result<(), beiboot_client::ApiClientError> {
/// let client = ApiClient::builder()
///     .with_base_url("https://beiboot.example.com/api")?
///     .with_authentication(Authentication::Bearer("my-api-token".into()))
///     .with_default_header("x-client", "beiboot-rs")
///     .with_timeout(Duration::from_secs(30))
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ApiClientBuilder {
    client: Option<reqwest::Client>,
    scheme: Scheme,
    host: String,
    port: u16,
    base_path: Option<PathAndQuery>,
    authentication: Option<Authentication>,
    default_headers: CallHeaders,
    default_errors: ErrorMessages,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl ApiClientBuilder {
    /// Builds the [`ApiClient`].
    ///
    /// # Errors
    ///
    /// This method can fail if:
    /// - the base URI cannot be constructed from the scheme, host, port and base path
    /// - the underlying `reqwest::Client` cannot be created
    pub fn build(self) -> Result<ApiClient, ApiClientError> {
        let Self {
            client,
            scheme,
            host,
            port,
            base_path,
            authentication,
            default_headers,
            default_errors,
            timeout,
            connect_timeout,
            user_agent,
        } = self;

        let builder = Uri::builder()
            .scheme(scheme)
            .authority(format!("{host}:{port}"));
        let builder = if let Some(path) = &base_path {
            builder.path_and_query(path.path())
        } else {
            builder.path_and_query("/")
        };
        let base_uri = builder.build()?;

        let client = match client {
            Some(client) => client,
            None => {
                let mut builder = reqwest::Client::builder();
                if let Some(timeout) = timeout {
                    builder = builder.timeout(timeout);
                }
                if let Some(connect_timeout) = connect_timeout {
                    builder = builder.connect_timeout(connect_timeout);
                }
                if let Some(user_agent) = user_agent {
                    builder = builder.user_agent(user_agent);
                }
                builder.build()?
            }
        };
        debug!(%base_uri, "client built");

        Ok(ApiClient {
            client,
            base_uri,
            authentication,
            default_headers,
            default_errors,
        })
    }

    /// Sets the HTTP scheme, `http` by default.
    pub fn with_scheme(mut self, scheme: Scheme) -> Self {
        self.scheme = scheme;
        self
    }

    /// Sets the hostname, `127.0.0.1` by default.
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Sets the port, `80` by default.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets the base path prepended to every call path.
    ///
    /// ```rust
    /// use beiboot_client::ApiClient;
    ///
    /// # fn example() -> Result<(), beiboot_client::ApiClientError> {
    /// let client = ApiClient::builder()
    ///     .with_host("beiboot.example.com")
    ///     .with_base_path("/api")?
    ///     .build()?;
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    ///
    /// Returns `ApiClientError::InvalidBasePath` if the path contains invalid characters
    /// (such as spaces) or cannot be parsed as a valid URI path.
    pub fn with_base_path<P>(mut self, base_path: P) -> Result<Self, ApiClientError>
    where
        P: TryInto<PathAndQuery>,
        P::Error: Debug + 'static,
    {
        let base_path = base_path
            .try_into()
            .map_err(|err| ApiClientError::InvalidBasePath {
                error: format!("{err:?}"),
            })?;
        self.base_path = Some(base_path);
        Ok(self)
    }

    /// Sets scheme, host, port and base path from a full URL.
    ///
    /// The port defaults to the scheme's one when the URL has none.
    ///
    /// # Errors
    ///
    /// Returns `ApiClientError::InvalidBaseUrl` when the URL cannot be parsed,
    /// has no host, or uses a scheme other than `http`/`https`.
    pub fn with_base_url(self, base_url: &str) -> Result<Self, ApiClientError> {
        let invalid = |error: String| ApiClientError::InvalidBaseUrl {
            url: base_url.to_string(),
            error,
        };

        let url = Url::parse(base_url).map_err(|err| invalid(err.to_string()))?;
        let scheme = match url.scheme() {
            "http" => Scheme::HTTP,
            "https" => Scheme::HTTPS,
            other => return Err(invalid(format!("unsupported scheme '{other}'"))),
        };
        let host = url
            .host_str()
            .ok_or_else(|| invalid("missing host".to_string()))?;
        let port = url
            .port_or_known_default()
            .ok_or_else(|| invalid("missing port".to_string()))?;

        let builder = self.with_scheme(scheme).with_host(host).with_port(port);
        match url.path() {
            "" | "/" => Ok(builder),
            path => builder.with_base_path(path.trim_end_matches('/')),
        }
    }

    /// Sets the authentication applied to every call, unless overridden per call.
    pub fn with_authentication(mut self, authentication: Authentication) -> Self {
        self.authentication = Some(authentication);
        self
    }

    /// Adds a header sent with every call; an absent value removes it.
    pub fn with_default_header<T: ParameterValue>(
        mut self,
        name: impl Into<String>,
        value: impl Into<ParamValue<T>>,
    ) -> Self {
        self.default_headers = std::mem::take(&mut self.default_headers).add_header(name, value);
        self
    }

    /// Merges entries into the default error messages, the new ones winning.
    pub fn with_default_errors(mut self, errors: ErrorMessages) -> Self {
        self.default_errors = std::mem::take(&mut self.default_errors).merge(errors);
        self
    }

    /// Drops every default error message, including the standard ones.
    pub fn without_default_errors(mut self) -> Self {
        self.default_errors = ErrorMessages::new();
        self
    }

    /// Sets the total timeout of each call.
    ///
    /// Ignored when a client is given with [`Self::with_reqwest_client`].
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Ignored when a client is given with [`Self::with_reqwest_client`].
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Ignored when a client is given with [`Self::with_reqwest_client`].
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Uses a preconfigured `reqwest::Client`.
    pub fn with_reqwest_client(mut self, client: reqwest::Client) -> Self {
        self.client = Some(client);
        self
    }
}

impl Default for ApiClientBuilder {
    fn default() -> Self {
        Self {
            client: None,
            scheme: Scheme::HTTP,
            host: IpAddr::V4(Ipv4Addr::LOCALHOST).to_string(),
            port: 80,
            base_path: None,
            authentication: None,
            default_headers: CallHeaders::new(),
            default_errors: ErrorMessages::standard(),
            timeout: None,
            connect_timeout: None,
            user_agent: None,
        }
    }
}
