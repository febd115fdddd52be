//! # Client Traits
//!
//! Capability interface for fetching Ambari REST documents.

use crate::error::AmbariResult;
use async_trait::async_trait;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Basic-auth credentials passed with every request
#[derive(Clone, PartialEq, Eq, Default)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[MASKED]")
            .finish()
    }
}

/// Issues a `GET` against a full Ambari URL and returns the decoded JSON body.
///
/// Implementations must not retry; transport failures and non-success
/// statuses are returned as errors for the caller to propagate.
#[async_trait]
pub trait AmbariApi: Send + Sync {
    async fn request(&self, url: &str, auth: &Credentials) -> AmbariResult<Value>;
}

#[async_trait]
impl<T: AmbariApi + ?Sized> AmbariApi for Arc<T> {
    async fn request(&self, url: &str, auth: &Credentials) -> AmbariResult<Value> {
        (**self).request(url, auth).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_masks_password() {
        let auth = Credentials::new("admin", "s3cret");
        let rendered = format!("{auth:?}");
        assert!(rendered.contains("admin"));
        assert!(!rendered.contains("s3cret"));
    }
}
