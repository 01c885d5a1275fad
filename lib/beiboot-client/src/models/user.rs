use crate::client::CallHeaders;

const X_FORWARDED_USER: &str = "x-forwarded-user";
const X_FORWARDED_GROUPS: &str = "x-forwarded-groups";
const X_FORWARDED_EMAIL: &str = "x-forwarded-email";
const X_FORWARDED_PREFERRED_USERNAME: &str = "x-forwarded-preferred-username";

/// Identity headers normally injected by the authenticating proxy in front of
/// the API (`x-forwarded-*`).
///
/// Only `x-forwarded-user` is mandatory; the other headers are not sent when unset.
///
/// ```rust
/// use beiboot_client::models::UserHeaders;
///
/// let user = UserHeaders::new("jane")
///     .with_groups("developers")
///     .with_email("jane@example.com");
/// assert_eq!(user.user, "jane");
/// assert_eq!(user.preferred_username, None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserHeaders {
    /// Value of `x-forwarded-user`.
    pub user: String,
    /// Value of `x-forwarded-groups`.
    pub groups: Option<String>,
    /// Value of `x-forwarded-email`.
    pub email: Option<String>,
    /// Value of `x-forwarded-preferred-username`.
    pub preferred_username: Option<String>,
}

impl UserHeaders {
    pub fn new(user: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            groups: None,
            email: None,
            preferred_username: None,
        }
    }

    pub fn with_groups(mut self, groups: impl Into<String>) -> Self {
        self.groups = Some(groups.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_preferred_username(mut self, preferred_username: impl Into<String>) -> Self {
        self.preferred_username = Some(preferred_username.into());
        self
    }

    pub(crate) fn to_call_headers(&self) -> CallHeaders {
        CallHeaders::new()
            .add_header(X_FORWARDED_USER, self.user.as_str())
            .add_header(X_FORWARDED_GROUPS, self.groups.as_deref())
            .add_header(X_FORWARDED_EMAIL, self.email.as_deref())
            .add_header(
                X_FORWARDED_PREFERRED_USERNAME,
                self.preferred_username.as_deref(),
            )
    }
}
