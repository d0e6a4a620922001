use async_trait::async_trait;
use cms_store::StoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("an email address is required to sign in")]
    MissingEmail,

    #[error("credentials rejected: {0}")]
    Rejected(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: Option<String>,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// What `Session::login` accepts: a token obtained elsewhere, or
/// credentials to exchange for one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginRequest {
    Token(String),
    Credentials(Credentials),
}

impl LoginRequest {
    pub fn email(email: impl Into<String>) -> Self {
        LoginRequest::Credentials(Credentials {
            email: email.into(),
            password: None,
        })
    }

    pub fn credentials(email: impl Into<String>, password: impl Into<String>) -> Self {
        LoginRequest::Credentials(Credentials {
            email: email.into(),
            password: Some(password.into()),
        })
    }
}

/// Exchanges credentials for an opaque session token.
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn authenticate(&self, credentials: &Credentials) -> Result<String, AuthError>;
}

/// Placeholder exchange: derives `demo-token-{email}` without verifying
/// anything. A deployment talking to a real identity endpoint supplies its
/// own [`Authenticator`].
#[derive(Debug, Default, Clone, Copy)]
pub struct DemoAuthenticator;

#[async_trait]
impl Authenticator for DemoAuthenticator {
    async fn authenticate(&self, credentials: &Credentials) -> Result<String, AuthError> {
        let email = credentials.email.trim();
        if email.is_empty() {
            return Err(AuthError::MissingEmail);
        }
        tracing::warn!(email, "issuing unverified demo token");
        Ok(format!("demo-token-{}", email))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn demo_token_embeds_email() {
        let token = DemoAuthenticator
            .authenticate(&Credentials {
                email: "a@b.com".into(),
                password: Some("secret".into()),
            })
            .await
            .unwrap();
        assert_eq!(token, "demo-token-a@b.com");
    }

    #[tokio::test]
    async fn demo_rejects_blank_email() {
        let err = DemoAuthenticator
            .authenticate(&Credentials {
                email: "  ".into(),
                password: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::MissingEmail));
    }

    #[test]
    fn debug_redacts_password() {
        let rendered = format!("{:?}", LoginRequest::credentials("a@b.com", "hunter2"));
        assert!(!rendered.contains("hunter2"));
    }
}
