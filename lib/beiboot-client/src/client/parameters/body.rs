use headers::ContentType;
use serde::Serialize;

use crate::client::ApiClientError;

/// The body of a request, with its content type.
#[derive(Clone, derive_more::Debug)]
pub struct CallBody {
    pub(in crate::client) content_type: ContentType,
    #[debug(ignore)]
    pub(in crate::client) data: Vec<u8>,
}

impl CallBody {
    /// An `application/json` body.
    ///
    /// ```rust
    /// use beiboot_client::CallBody;
    /// use beiboot_client::models::BeibootRequest;
    ///
    /// # fn example() -> Result<(), beiboot_client::ApiClientError> {
    /// let body = CallBody::json(&BeibootRequest::new("demo"))?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn json<T>(t: &T) -> Result<Self, ApiClientError>
    where
        T: Serialize + ?Sized,
    {
        let data = serde_json::to_vec(t)?;
        Ok(Self {
            content_type: ContentType::json(),
            data,
        })
    }

    /// An `application/x-www-form-urlencoded` body.
    pub fn form<T>(t: &T) -> Result<Self, ApiClientError>
    where
        T: Serialize + ?Sized,
    {
        let data = serde_urlencoded::to_string(t)
            .map_err(|e| ApiClientError::SerializationError {
                message: format!("Failed to serialize form data: {e}"),
            })?
            .into_bytes();

        Ok(Self {
            content_type: ContentType::form_url_encoded(),
            data,
        })
    }

    /// A `text/plain; charset=utf-8` body.
    pub fn text(text: &str) -> Self {
        Self {
            content_type: ContentType::text_utf8(),
            data: text.as_bytes().to_vec(),
        }
    }

    /// Raw bytes with an explicit content type.
    pub fn raw(data: Vec<u8>, content_type: ContentType) -> Self {
        Self { content_type, data }
    }

    pub fn content_type(&self) -> &ContentType {
        &self.content_type
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
