use std::sync::LazyLock;

use indexmap::{IndexMap, IndexSet};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use regex::Regex;
use tracing::warn;

use super::param::{ParamEntry, ParamStyle, ParamValue, ParameterValue};
use crate::client::ApiClientError;

/// Regular expression for matching path parameters in the format `{param_name}`.
static RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{(?<name>\w+)}").expect("a valid regex"));

/// Everything but the RFC 3986 unreserved characters.
const PATH_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

fn encode_path_param_value(value: &str) -> String {
    utf8_percent_encode(value, PATH_VALUE).to_string()
}

/// A path template with its arguments.
///
/// Placeholders use the `{name}` syntax; the same placeholder can appear
/// several times.
///
/// ```rust
/// use beiboot_client::{CallPath, ParamValue};
///
/// let path = CallPath::from("/clusters/{name}/state")
///     .add_param("name", "demo");
///
/// let path = CallPath::from("/configs/{config_name}/refresh/")
///     .add_param("config_name", ParamValue::new("default"));
/// ```
#[derive(Debug, Clone, Default, derive_more::Display)]
#[display("{path}")]
pub struct CallPath {
    pub(in crate::client) path: String,
    args: IndexMap<String, ParamEntry>,
}

impl CallPath {
    /// Sets the value of a placeholder.
    ///
    /// An absent value (`None`) leaves the placeholder unresolved, so the call
    /// fails before anything is sent.
    pub fn add_param<T: ParameterValue>(
        mut self,
        name: impl Into<String>,
        param: impl Into<ParamValue<T>>,
    ) -> Self {
        let name = name.into();
        match param.into().entry() {
            ParamEntry::Absent => {
                self.args.shift_remove(&name);
            }
            entry => {
                self.args.insert(name, entry);
            }
        }
        self
    }

    /// The placeholder names, in template order and without duplicates.
    pub fn placeholders(&self) -> Vec<&str> {
        let names: IndexSet<&str> = RE
            .captures_iter(&self.path)
            .filter_map(|caps| caps.name("name"))
            .map(|m| m.as_str())
            .collect();
        names.into_iter().collect()
    }
}

impl From<&str> for CallPath {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<String> for CallPath {
    fn from(path: String) -> Self {
        Self {
            path,
            args: IndexMap::new(),
        }
    }
}

#[derive(Debug)]
pub(in crate::client) struct PathResolved {
    pub(in crate::client) path: String,
}

impl TryFrom<&CallPath> for PathResolved {
    type Error = ApiClientError;

    fn try_from(value: &CallPath) -> Result<Self, Self::Error> {
        let placeholders = value.placeholders();

        for name in value.args.keys() {
            if !placeholders.contains(&name.as_str()) {
                warn!(?name, path = %value.path, "argument name not found");
            }
        }

        let mut path = value.path.clone();
        let mut missings = Vec::new();
        for name in placeholders {
            let resolved = value.args.get(name).map(ParamEntry::resolved).transpose()?;
            let Some(resolved) = resolved.flatten() else {
                missings.push(name.to_string());
                continue;
            };

            let encoded = encode_path_param_value(&resolved.to_string_value()?);
            let formatted = match resolved.style {
                ParamStyle::Label => format!(".{encoded}"),
                ParamStyle::Matrix => format!(";{name}={encoded}"),
                ParamStyle::DeepObject => {
                    return Err(ApiClientError::UnsupportedParameterValue {
                        message: "deep object style is not supported for path parameters"
                            .to_string(),
                        value: resolved.value.clone(),
                    });
                }
                _ => encoded,
            };

            path = path.replace(&["{", name, "}"].concat(), &formatted);
        }

        if !missings.is_empty() {
            return Err(ApiClientError::PathUnresolved {
                path: value.path.clone(),
                missings,
            });
        }

        Ok(Self { path })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(path: &CallPath) -> Result<String, ApiClientError> {
        PathResolved::try_from(path).map(|resolved| resolved.path)
    }

    #[test]
    fn should_resolve_cluster_state_path() {
        let path = CallPath::from("/clusters/{name}/state").add_param("name", "demo");

        insta::assert_snapshot!(resolve(&path).expect("resolved"), @"/clusters/demo/state");
    }

    #[test]
    fn should_keep_path_without_placeholder() {
        let path = CallPath::from("/clusters/");

        assert_eq!(resolve(&path).expect("resolved"), "/clusters/");
    }

    #[test]
    fn should_report_missing_parameters_in_template_order() {
        let path = CallPath::from("/connections/{cluster_name}/{kind}/{cluster_name}");

        let error = resolve(&path).expect_err("unresolved");

        insta::assert_snapshot!(error, @r#"Path '/connections/{cluster_name}/{kind}/{cluster_name}' is missing required arguments: ["cluster_name", "kind"]"#);
    }

    #[test]
    fn should_treat_absent_value_as_missing() {
        let path = CallPath::from("/clusters/{name}")
            .add_param("name", "demo")
            .add_param("name", None::<&str>);

        let result = resolve(&path);

        assert!(matches!(
            result,
            Err(ApiClientError::PathUnresolved { ref missings, .. }) if missings == &["name"]
        ));
    }

    #[test]
    fn should_fail_on_unserializable_argument() {
        let path = CallPath::from("/clusters/{name}")
            .add_param("name", std::collections::BTreeMap::from([((1, 2), "pair")]));

        let result = resolve(&path);

        assert!(matches!(
            result,
            Err(ApiClientError::UnsupportedParameterValue { .. })
        ));
    }

    #[test]
    fn should_encode_reserved_characters() {
        let path = CallPath::from("/clusters/{name}").add_param("name", "my cluster/1@dev");

        insta::assert_snapshot!(resolve(&path).expect("resolved"), @"/clusters/my%20cluster%2F1%40dev");
    }

    #[test]
    fn should_keep_unreserved_characters() {
        let path = CallPath::from("/clusters/{name}").add_param("name", "my-cluster_v1.2~x");

        assert_eq!(resolve(&path).expect("resolved"), "/clusters/my-cluster_v1.2~x");
    }

    #[test]
    fn should_replace_duplicated_placeholders() {
        let path = CallPath::from("/test/{id}/{id}").add_param("id", 123);

        assert_eq!(resolve(&path).expect("resolved"), "/test/123/123");
    }

    #[test]
    fn should_apply_path_styles() {
        let path = CallPath::from("/a/{ids}/b{label}/c{matrix}")
            .add_param("ids", vec![1, 2, 3])
            .add_param("label", ParamValue::with_style("x", ParamStyle::Label))
            .add_param("matrix", ParamValue::with_style("y", ParamStyle::Matrix));

        insta::assert_snapshot!(resolve(&path).expect("resolved"), @"/a/1%2C2%2C3/b.x/c;matrix=y");
    }

    #[test]
    fn should_ignore_unknown_arguments() {
        let path = CallPath::from("/clusters/").add_param("name", "unused");

        assert_eq!(resolve(&path).expect("resolved"), "/clusters/");
    }
}
