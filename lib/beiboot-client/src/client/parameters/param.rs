use std::fmt::Debug;

use serde::Serialize;
use serde_json::Value;

use crate::client::ApiClientError;

/// Types that can be used as path, query, or header values.
pub trait ParameterValue: Serialize + Debug + Send + Sync {}

impl<T> ParameterValue for T where T: Serialize + Debug + Send + Sync {}

/// Serialization styles of parameters, as named by OpenAPI 3.
///
/// ```rust
/// use beiboot_client::{ParamStyle, ParamValue};
///
/// // Form style (query default): ?tags=a&tags=b
/// let tags = ParamValue::new(vec!["a", "b"]);
/// assert_eq!(tags.query_style(), ParamStyle::Form);
///
/// // Pipe delimited: ?tags=a|b
/// let tags = ParamValue::with_style(vec!["a", "b"], ParamStyle::PipeDelimited);
/// assert_eq!(tags.query_style(), ParamStyle::PipeDelimited);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParamStyle {
    /// Form for query parameters, simple for path and header parameters.
    #[default]
    Default,
    /// `param=value1&param=value2`
    Form,
    /// `value1,value2`
    Simple,
    /// `param=value1 value2`
    SpaceDelimited,
    /// `param=value1|value2`
    PipeDelimited,
    /// `/users/.value`
    Label,
    /// `/users/;name=value`
    Matrix,
    /// `?obj[key]=value`
    DeepObject,
}

/// A parameter value with its serialization style.
#[derive(Debug, Clone)]
pub struct ParamValue<T>
where
    T: ParameterValue,
{
    pub value: T,
    pub style: ParamStyle,
}

impl<T> ParamValue<T>
where
    T: ParameterValue,
{
    pub fn new(value: T) -> Self {
        Self {
            value,
            style: ParamStyle::Default,
        }
    }

    pub fn with_style(value: T, style: ParamStyle) -> Self {
        Self { value, style }
    }

    /// The style used when the value is sent in the query string.
    pub fn query_style(&self) -> ParamStyle {
        match self.style {
            ParamStyle::Default => ParamStyle::Form,
            style => style,
        }
    }

    /// The style used when the value is sent in the path or a header.
    pub fn path_style(&self) -> ParamStyle {
        match self.style {
            ParamStyle::Default => ParamStyle::Simple,
            style => style,
        }
    }

    /// Serializes the value.
    ///
    /// `None`, unit, and anything else serialized as JSON `null` is absent.
    /// A serialization failure is kept and reported when the request is built.
    pub(in crate::client) fn entry(&self) -> ParamEntry {
        match serde_json::to_value(&self.value) {
            Ok(Value::Null) => ParamEntry::Absent,
            Ok(value) => ParamEntry::Present(ResolvedParamValue {
                value,
                style: self.style,
            }),
            Err(error) => ParamEntry::Invalid {
                message: format!("failed to serialize parameter value: {error}"),
                value: Value::String(format!("{:?}", self.value)),
            },
        }
    }
}

impl<T> From<T> for ParamValue<T>
where
    T: ParameterValue,
{
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

/// A parameter as stored by the path, query and header collections.
#[derive(Debug, Clone, PartialEq)]
pub(in crate::client) enum ParamEntry {
    Present(ResolvedParamValue),
    Absent,
    Invalid { message: String, value: Value },
}

impl ParamEntry {
    pub(in crate::client) fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// The present value, `None` when absent.
    ///
    /// # Errors
    ///
    /// [`ApiClientError::UnsupportedParameterValue`] when the value could not be serialized.
    pub(in crate::client) fn resolved(&self) -> Result<Option<&ResolvedParamValue>, ApiClientError> {
        match self {
            Self::Present(resolved) => Ok(Some(resolved)),
            Self::Absent => Ok(None),
            Self::Invalid { message, value } => Err(ApiClientError::UnsupportedParameterValue {
                message: message.clone(),
                value: value.clone(),
            }),
        }
    }
}

/// A serialized, present, parameter value.
#[derive(Debug, Clone, PartialEq)]
pub(in crate::client) struct ResolvedParamValue {
    pub value: Value,
    pub style: ParamStyle,
}

impl ResolvedParamValue {
    fn scalar_to_string(value: &Value) -> Result<Option<String>, ApiClientError> {
        match value {
            Value::String(s) => Ok(Some(s.clone())),
            Value::Number(n) => Ok(Some(n.to_string())),
            Value::Bool(b) => Ok(Some(b.to_string())),
            Value::Null => Ok(None),
            Value::Array(_) | Value::Object(_) => Err(ApiClientError::UnsupportedParameterValue {
                message: "nested complex values not supported in parameters".to_string(),
                value: value.clone(),
            }),
        }
    }

    fn items_to_strings(items: &[Value]) -> Result<Vec<String>, ApiClientError> {
        let mut result = Vec::with_capacity(items.len());
        for item in items {
            if let Some(item) = Self::scalar_to_string(item)? {
                result.push(item);
            }
        }
        Ok(result)
    }

    fn delimiter(&self) -> &'static str {
        match self.style {
            ParamStyle::SpaceDelimited => " ",
            ParamStyle::PipeDelimited => "|",
            _ => ",",
        }
    }

    /// Single string representation, used in paths and headers.
    ///
    /// Arrays are joined with the style delimiter, objects are rejected.
    pub(in crate::client) fn to_string_value(&self) -> Result<String, ApiClientError> {
        match &self.value {
            Value::Array(items) => {
                let items = Self::items_to_strings(items)?;
                Ok(items.join(self.delimiter()))
            }
            Value::Object(_) => Err(ApiClientError::UnsupportedParameterValue {
                message: "object values are only supported in the query string".to_string(),
                value: self.value.clone(),
            }),
            scalar => Ok(Self::scalar_to_string(scalar)?.unwrap_or_default()),
        }
    }

    /// Key/value pairs for the query string.
    ///
    /// Form-style arrays repeat the key, other array styles are joined.
    /// Objects use the deep-object notation `key[field]=value`.
    pub(in crate::client) fn to_query_pairs(
        &self,
        name: &str,
    ) -> Result<Vec<(String, String)>, ApiClientError> {
        let mut pairs = Vec::new();
        match &self.value {
            Value::Array(items) => match self.style {
                ParamStyle::Default | ParamStyle::Form => {
                    for item in Self::items_to_strings(items)? {
                        pairs.push((name.to_string(), item));
                    }
                }
                _ => pairs.push((name.to_string(), self.to_string_value()?)),
            },
            Value::Object(_) => Self::deep_object_pairs(name, &self.value, &mut pairs)?,
            scalar => {
                if let Some(value) = Self::scalar_to_string(scalar)? {
                    pairs.push((name.to_string(), value));
                }
            }
        }
        Ok(pairs)
    }

    fn deep_object_pairs(
        prefix: &str,
        value: &Value,
        pairs: &mut Vec<(String, String)>,
    ) -> Result<(), ApiClientError> {
        match value {
            Value::Object(fields) => {
                for (field, value) in fields {
                    Self::deep_object_pairs(&format!("{prefix}[{field}]"), value, pairs)?;
                }
            }
            Value::Array(items) => {
                for item in items {
                    Self::deep_object_pairs(prefix, item, pairs)?;
                }
            }
            scalar => {
                if let Some(value) = Self::scalar_to_string(scalar)? {
                    pairs.push((prefix.to_string(), value));
                }
            }
        }
        Ok(())
    }
}
