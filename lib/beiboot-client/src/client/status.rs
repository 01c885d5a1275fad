use http::StatusCode;
use indexmap::IndexMap;

/// Mapping from HTTP status code to the message of the rejected call.
///
/// A response whose status is in the mapping is rejected with that message,
/// whatever its body. The client holds default entries; each call can add or
/// override entries.
///
/// ```rust
/// use beiboot_client::ErrorMessages;
/// use http::StatusCode;
///
/// let errors = ErrorMessages::standard()
///     .add(StatusCode::UNPROCESSABLE_ENTITY, "Validation Error")
///     .add(StatusCode::NOT_FOUND, "No such cluster");
///
/// assert_eq!(errors.get(StatusCode::UNAUTHORIZED), Some("Unauthorized"));
/// assert_eq!(errors.get(StatusCode::NOT_FOUND), Some("No such cluster"));
/// assert_eq!(errors.get(StatusCode::CONFLICT), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorMessages {
    messages: IndexMap<u16, String>,
}

impl ErrorMessages {
    /// An empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// The messages every call rejects with unless told otherwise.
    pub fn standard() -> Self {
        [
            (StatusCode::BAD_REQUEST, "Bad Request"),
            (StatusCode::UNAUTHORIZED, "Unauthorized"),
            (StatusCode::FORBIDDEN, "Forbidden"),
            (StatusCode::NOT_FOUND, "Not Found"),
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error"),
            (StatusCode::BAD_GATEWAY, "Bad Gateway"),
            (StatusCode::SERVICE_UNAVAILABLE, "Service Unavailable"),
        ]
        .into_iter()
        .collect()
    }

    /// Adds an entry, replacing any previous message for the same status.
    pub fn add(mut self, status: StatusCode, message: impl Into<String>) -> Self {
        self.messages.insert(status.as_u16(), message.into());
        self
    }

    pub fn get(&self, status: StatusCode) -> Option<&str> {
        self.messages.get(&status.as_u16()).map(String::as_str)
    }

    pub fn contains(&self, status: StatusCode) -> bool {
        self.messages.contains_key(&status.as_u16())
    }

    /// Merges another mapping into this one, `other` winning on conflicts.
    pub fn merge(mut self, other: Self) -> Self {
        self.messages.extend(other.messages);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }
}

impl<M> FromIterator<(StatusCode, M)> for ErrorMessages
where
    M: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (StatusCode, M)>>(iter: I) -> Self {
        let messages = iter
            .into_iter()
            .map(|(status, message)| (status.as_u16(), message.into()))
            .collect();
        Self { messages }
    }
}
