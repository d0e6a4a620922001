use std::sync::Arc;

use cms_store::TokenStore;

use crate::authenticator::{AuthError, Authenticator, LoginRequest};
use crate::history::{NavigationType, Navigator};
use crate::routes::{DASHBOARD_PATH, LOGIN_PATH};

/// The console's session state.
///
/// Restored once from persisted storage; afterwards only [`Session::login`]
/// and [`Session::logout`] change it. Changes made to the storage by other
/// processes are not observed.
pub struct Session {
    tokens: TokenStore,
    authenticator: Arc<dyn Authenticator>,
    navigator: Arc<dyn Navigator>,
    token: Option<String>,
}

impl Session {
    pub fn restore(
        tokens: TokenStore,
        authenticator: Arc<dyn Authenticator>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self, AuthError> {
        let token = tokens.load()?;
        tracing::debug!(authenticated = token.is_some(), "session restored");
        Ok(Self {
            tokens,
            authenticator,
            navigator,
            token,
        })
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn navigator(&self) -> &Arc<dyn Navigator> {
        &self.navigator
    }

    /// Persist a token, mark the session authenticated, and replace the
    /// current location with the dashboard.
    pub async fn login(&mut self, request: LoginRequest) -> Result<(), AuthError> {
        let token = match request {
            LoginRequest::Token(token) => {
                let token = token.trim().to_string();
                if token.is_empty() {
                    return Err(AuthError::Rejected("empty token".to_string()));
                }
                token
            }
            LoginRequest::Credentials(credentials) => {
                self.authenticator.authenticate(&credentials).await?
            }
        };

        self.tokens.save(&token)?;
        self.token = Some(token);
        tracing::info!("signed in");
        self.navigator.navigate(DASHBOARD_PATH, NavigationType::Replace);
        Ok(())
    }

    /// Forget the token and replace the current location with the login view.
    pub fn logout(&mut self) -> Result<(), AuthError> {
        self.tokens.clear()?;
        self.token = None;
        tracing::info!("signed out");
        self.navigator.navigate(LOGIN_PATH, NavigationType::Replace);
        Ok(())
    }
}
