use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use http::HeaderValue;
use reqwest::header::{AUTHORIZATION, HeaderName};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Errors that can occur while producing the authentication header.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Error, derive_more::Display)]
pub enum AuthenticationError {
    /// Bearer token contains invalid characters for HTTP headers.
    #[display("Bearer token contains invalid characters: {message}")]
    InvalidBearerToken {
        /// Description of the invalid characters or format issue.
        message: String,
    },

    /// Basic authentication username contains invalid characters.
    #[display("Basic auth username contains invalid characters: {message}")]
    InvalidUsername {
        /// Description of the invalid characters or format issue.
        message: String,
    },

    /// Basic authentication password contains invalid characters.
    #[display("Basic auth password contains invalid characters: {message}")]
    InvalidPassword {
        /// Description of the invalid characters or format issue.
        message: String,
    },

    /// API key header name is invalid.
    #[display("Invalid API key header name '{header_name}': {message}")]
    InvalidHeaderName {
        /// The invalid header name that was provided.
        header_name: String,
        /// Description of why the header name is invalid.
        message: String,
    },

    /// API key value contains invalid characters for HTTP headers.
    #[display("API key contains invalid characters: {message}")]
    InvalidApiKey {
        /// Description of the invalid characters or format issue.
        message: String,
    },

    /// A token resolver must be awaited, see [`Authentication::resolve_header`].
    #[display("Token has not been resolved yet")]
    TokenNotResolved,

    /// The token resolver failed.
    #[display("Token resolution failed: {message}")]
    TokenResolution {
        /// Description of the failure.
        message: String,
    },
}

/// Secure wrapper for sensitive string data that zeroes its memory on drop.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct SecureString(String);

impl SecureString {
    pub fn new(value: String) -> Self {
        Self(value)
    }

    /// Returns a reference to the inner string value.
    ///
    /// Avoid keeping the returned reference around.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(mut self) -> String {
        std::mem::take(&mut self.0)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn mask_sensitive(value: &str) -> String {
        let chars: Vec<char> = value.chars().collect();
        if chars.len() <= 8 {
            "***".to_string()
        } else {
            let head: String = chars[..4].iter().collect();
            let tail: String = chars[chars.len() - 4..].iter().collect();
            format!("{head}...{tail}")
        }
    }
}

impl fmt::Debug for SecureString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecureString")
            .field("value", &"[REDACTED]")
            .finish()
    }
}

impl fmt::Display for SecureString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Self::mask_sensitive(&self.0))
    }
}

impl From<String> for SecureString {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for SecureString {
    fn from(value: &str) -> Self {
        Self::new(value.to_string())
    }
}

/// Future returned by a [`TokenResolver`].
pub type TokenFuture<'a> =
    Pin<Box<dyn Future<Output = Result<SecureString, AuthenticationError>> + Send + 'a>>;

/// Produces a bearer token each time a call is dispatched.
///
/// Any `Fn() -> impl Future<Output = Result<SecureString, AuthenticationError>>`
/// is a resolver. An empty token means the call is sent without an
/// `Authorization` header.
pub trait TokenResolver: Send + Sync {
    /// Resolves the token for the next call.
    fn resolve(&self) -> TokenFuture<'_>;
}

impl<F, Fut> TokenResolver for F
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = Result<SecureString, AuthenticationError>> + Send + 'static,
{
    fn resolve(&self) -> TokenFuture<'_> {
        Box::pin(self())
    }
}

/// Authentication configuration for API requests.
///
/// Set once on the [`ApiClientBuilder`](super::ApiClientBuilder), optionally
/// overridden per call.
///
/// - credentials are cleared from memory when dropped
/// - `Display` masks them, `Debug` redacts them
///
/// # Examples
///
/// ```rust
/// use beiboot_client::{Authentication, SecureString};
///
/// let auth = Authentication::Bearer("my-api-token".into());
///
/// let auth = Authentication::Basic {
///     username: "user".to_string(),
///     password: "pass".into(),
/// };
///
/// let auth = Authentication::ApiKey {
///     header_name: "X-API-Key".to_string(),
///     key: "secret-key".into(),
/// };
///
/// let auth = Authentication::token(|| async { Ok(SecureString::from("fresh-token")) });
/// ```
#[derive(Clone)]
pub enum Authentication {
    /// Adds `Authorization: Bearer <token>`.
    Bearer(SecureString),

    /// Adds `Authorization: Basic <base64(username:password)>`.
    Basic {
        /// The username, must not contain `:`.
        username: String,
        /// The password.
        password: SecureString,
    },

    /// Adds `<header_name>: <key>`.
    ApiKey {
        /// The header name for the API key.
        header_name: String,
        /// The API key value.
        key: SecureString,
    },

    /// Bearer token obtained from a resolver for every call.
    Token(Arc<dyn TokenResolver>),
}

impl Authentication {
    /// Builds a [`Authentication::Token`] from an async closure.
    ///
    /// Implementors of [`TokenResolver`] can be wrapped directly with
    /// `Authentication::Token(Arc::new(resolver))`.
    pub fn token<F, Fut>(resolver: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<SecureString, AuthenticationError>> + Send + 'static,
    {
        Self::Token(Arc::new(resolver))
    }

    /// Converts static credentials into an HTTP header.
    ///
    /// # Errors
    ///
    /// Fails when the credentials contain characters not allowed in headers,
    /// and with [`AuthenticationError::TokenNotResolved`] for a token resolver.
    pub fn to_header(&self) -> Result<(HeaderName, HeaderValue), AuthenticationError> {
        match self {
            Self::Bearer(token) => Self::bearer_header(token),

            Self::Basic { username, password } => {
                if username.contains(':') {
                    return Err(AuthenticationError::InvalidUsername {
                        message: "Username cannot contain colon (:) character".to_string(),
                    });
                }

                use base64::Engine;
                let credentials = SecureString::new(format!("{username}:{}", password.as_str()));
                let encoded = base64::engine::general_purpose::STANDARD.encode(credentials.as_str());

                let value = HeaderValue::from_str(&format!("Basic {encoded}")).map_err(|e| {
                    AuthenticationError::InvalidPassword {
                        message: e.to_string(),
                    }
                })?;
                Ok((AUTHORIZATION, value))
            }

            Self::ApiKey { header_name, key } => {
                let header = HeaderName::from_bytes(header_name.as_bytes()).map_err(|e| {
                    AuthenticationError::InvalidHeaderName {
                        header_name: header_name.clone(),
                        message: e.to_string(),
                    }
                })?;
                let value = HeaderValue::from_str(key.as_str()).map_err(|e| {
                    AuthenticationError::InvalidApiKey {
                        message: e.to_string(),
                    }
                })?;
                Ok((header, value))
            }

            Self::Token(_) => Err(AuthenticationError::TokenNotResolved),
        }
    }

    /// Produces the header for the next call, awaiting the resolver if any.
    ///
    /// Returns `None` when a resolver yields an empty token.
    pub async fn resolve_header(
        &self,
    ) -> Result<Option<(HeaderName, HeaderValue)>, AuthenticationError> {
        match self {
            Self::Token(resolver) => {
                let token = resolver.resolve().await?;
                if token.is_empty() {
                    return Ok(None);
                }
                Self::bearer_header(&token).map(Some)
            }
            _ => self.to_header().map(Some),
        }
    }

    fn bearer_header(token: &SecureString) -> Result<(HeaderName, HeaderValue), AuthenticationError> {
        let mut value = HeaderValue::from_str(&format!("Bearer {}", token.as_str())).map_err(|e| {
            AuthenticationError::InvalidBearerToken {
                message: e.to_string(),
            }
        })?;
        value.set_sensitive(true);
        Ok((AUTHORIZATION, value))
    }
}

impl fmt::Debug for Authentication {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bearer(_) => f.debug_tuple("Bearer").field(&"[REDACTED]").finish(),
            Self::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &"[REDACTED]")
                .finish(),
            Self::ApiKey { header_name, .. } => f
                .debug_struct("ApiKey")
                .field("header_name", header_name)
                .field("key", &"[REDACTED]")
                .finish(),
            Self::Token(_) => f.debug_tuple("Token").field(&"[RESOLVER]").finish(),
        }
    }
}

impl fmt::Display for Authentication {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bearer(token) => write!(f, "Bearer {token}"),
            Self::Basic { username, .. } => write!(f, "Basic (username: {username})"),
            Self::ApiKey { header_name, key } => write!(f, "ApiKey ({header_name}: {key})"),
            Self::Token(_) => write!(f, "Token (resolved per call)"),
        }
    }
}
