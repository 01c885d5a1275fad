use indexmap::IndexMap;

use super::param::{ParamEntry, ParamValue, ParameterValue};
use crate::client::ApiClientError;

/// Request headers, kept in insertion order.
///
/// Names are case-insensitive and stored lowercase. An absent value is not
/// sent and removes the header from the layers below it (client defaults,
/// authentication).
#[derive(Debug, Clone, Default)]
pub struct CallHeaders {
    headers: IndexMap<String, ParamEntry>,
}

impl CallHeaders {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a header, replacing any previous value with the same name.
    ///
    /// An absent value (`None`) removes the header.
    ///
    /// ```rust
    /// use beiboot_client::CallHeaders;
    ///
    /// let headers = CallHeaders::new()
    ///     .add_header("user-id", "jane")
    ///     .add_header("X-Request-ID", "abc-123-def")
    ///     .add_header("x-forwarded-groups", None::<&str>);
    ///
    /// assert_eq!(headers.len(), 2);
    /// assert!(headers.contains("x-request-id"));
    /// ```
    pub fn add_header<T: ParameterValue>(
        mut self,
        name: impl Into<String>,
        value: impl Into<ParamValue<T>>,
    ) -> Self {
        let name = name.into().to_ascii_lowercase();
        self.headers.insert(name, value.into().entry());
        self
    }

    /// Merges another CallHeaders instance into this one, `other` winning on conflicts.
    ///
    /// Absent values in `other` are kept so they still remove the header.
    pub fn merge(mut self, other: Self) -> Self {
        self.headers.extend(other.headers);
        self
    }

    /// Whether a header with this name will be sent.
    pub fn contains(&self, name: &str) -> bool {
        self.headers
            .get(&name.to_ascii_lowercase())
            .is_some_and(|entry| !entry.is_absent())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The number of headers that will be sent.
    pub fn len(&self) -> usize {
        self.headers.values().filter(|entry| !entry.is_absent()).count()
    }

    /// Names given an absent value.
    pub(in crate::client) fn absent_names(&self) -> impl Iterator<Item = &str> {
        self.headers
            .iter()
            .filter(|(_, entry)| entry.is_absent())
            .map(|(name, _)| name.as_str())
    }

    pub(crate) fn to_http_headers(
        &self,
    ) -> Result<Vec<(String, String)>, ApiClientError> {
        let mut result = Vec::with_capacity(self.headers.len());
        for (name, entry) in &self.headers {
            if let Some(resolved) = entry.resolved()? {
                result.push((name.clone(), resolved.to_string_value()?));
            }
        }
        Ok(result)
    }
}
