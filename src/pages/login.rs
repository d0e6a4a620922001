use cms_authz::LoginRequest;

use crate::console::Console;

const LOGIN_FAILED: &str = "Login failed";

/// The sign-in form.
#[derive(Debug, Default)]
pub struct LoginPage {
    pub email: String,
    pub password: String,
    error: Option<String>,
}

impl LoginPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Sign in through the console. On success the console is on the dashboard.
    pub async fn submit(&mut self, console: &mut Console) -> bool {
        self.error = None;
        let request = if self.password.is_empty() {
            LoginRequest::email(self.email.trim())
        } else {
            LoginRequest::credentials(self.email.trim(), self.password.clone())
        };
        match console.login(request).await {
            Ok(()) => {
                self.password.clear();
                true
            }
            Err(err) => {
                tracing::warn!(error = %err, "sign-in failed");
                self.error = Some(LOGIN_FAILED.to_string());
                false
            }
        }
    }
}
