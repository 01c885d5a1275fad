use indexmap::IndexMap;

use super::param::{ParamEntry, ParamValue, ParameterValue};
use crate::client::ApiClientError;

/// Query string parameters, kept in insertion order.
///
/// Absent values are never sent. Arrays repeat the key (form style) unless a
/// delimited style is chosen; objects use the deep-object notation.
///
/// ```rust
/// use beiboot_client::{CallQuery, ParamStyle, ParamValue};
///
/// let query = CallQuery::new()
///     .add_param("state", "RUNNING")
///     .add_param("label", vec!["team=infra", "env=dev"])
///     .add_param("ports", ParamValue::with_style(vec![80, 443], ParamStyle::PipeDelimited))
///     .add_param("limit", None::<u32>);
///
/// assert_eq!(query.len(), 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CallQuery {
    params: IndexMap<String, ParamEntry>,
}

impl CallQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a parameter; an absent value removes any previous one with the same name.
    pub fn add_param<T: ParameterValue>(
        mut self,
        name: impl Into<String>,
        param: impl Into<ParamValue<T>>,
    ) -> Self {
        let name = name.into();
        match param.into().entry() {
            ParamEntry::Absent => {
                self.params.shift_remove(&name);
            }
            entry => {
                self.params.insert(name, entry);
            }
        }
        self
    }

    /// Merges another query into this one, `other` winning on conflicts.
    pub fn merge(mut self, other: Self) -> Self {
        self.params.extend(other.params);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub(in crate::client) fn to_query_string(&self) -> Result<String, ApiClientError> {
        let mut pairs = Vec::new();
        for (name, entry) in &self.params {
            if let Some(resolved) = entry.resolved()? {
                pairs.extend(resolved.to_query_pairs(name)?);
            }
        }

        serde_urlencoded::to_string(&pairs).map_err(|err| ApiClientError::SerializationError {
            message: format!("Failed to encode query string: {err}"),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::client::ParamStyle;

    #[test]
    fn should_omit_absent_values() {
        let query = CallQuery::new()
            .add_param("name", "demo")
            .add_param("namespace", None::<String>)
            .add_param("nodes", Some(2));

        insta::assert_snapshot!(query.to_query_string().expect("encoded"), @"name=demo&nodes=2");
    }

    #[test]
    fn should_remove_previous_value_when_absent() {
        let query = CallQuery::new()
            .add_param("name", "demo")
            .add_param("name", None::<&str>);

        assert!(query.is_empty());
    }

    #[test]
    fn should_fail_on_unserializable_value() {
        let query = CallQuery::new()
            .add_param("name", "demo")
            .add_param("filter", BTreeMap::from([((1, 2), "pair")]));

        let error = query.to_query_string().expect_err("not serializable");

        assert!(matches!(error, ApiClientError::UnsupportedParameterValue { .. }));
    }

    #[test]
    fn should_repeat_form_arrays() {
        let query = CallQuery::new().add_param("port", vec!["8080:80", "8443:443"]);

        insta::assert_snapshot!(query.to_query_string().expect("encoded"), @"port=8080%3A80&port=8443%3A443");
    }

    #[test]
    fn should_join_delimited_arrays() {
        let query = CallQuery::new()
            .add_param(
                "space",
                ParamValue::with_style(vec!["a", "b"], ParamStyle::SpaceDelimited),
            )
            .add_param(
                "pipe",
                ParamValue::with_style(vec!["c", "d"], ParamStyle::PipeDelimited),
            );

        insta::assert_snapshot!(query.to_query_string().expect("encoded"), @"space=a+b&pipe=c%7Cd");
    }

    #[test]
    fn should_encode_objects_as_deep_objects() {
        let labels = BTreeMap::from([("env", "dev"), ("team", "infra")]);
        let query = CallQuery::new().add_param("labels", labels);

        insta::assert_snapshot!(query.to_query_string().expect("encoded"), @"labels%5Benv%5D=dev&labels%5Bteam%5D=infra");
    }

    #[test]
    fn should_merge_queries() {
        let defaults = CallQuery::new().add_param("a", 1).add_param("b", 2);
        let overrides = CallQuery::new().add_param("b", 3).add_param("c", 4);

        let query = defaults.merge(overrides);

        assert_eq!(query.len(), 3);
        assert_eq!(query.to_query_string().expect("encoded"), "a=1&b=3&c=4");
    }
}
