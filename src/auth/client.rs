use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::error::AuthError;

/// Identity providers supported for OAuth sign-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Google,
}

impl Provider {
    pub fn as_str(self) -> &'static str {
        match self {
            Provider::Google => "google",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters for starting an OAuth redirect flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuthRequest {
    pub provider: Provider,
    /// Absolute URL the provider sends the browser back to.
    pub redirect_to: String,
}

/// Where the browser goes to continue an OAuth flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuthRedirect {
    pub provider: Provider,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PasswordCredentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// An authenticated session as issued by the hosted service.
#[derive(Debug, Clone, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub token_type: String,
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
}

/// What a successful sign-up produced. The service withholds the session
/// until the email address is confirmed, so it may be absent.
#[derive(Debug, Clone)]
pub struct SignUpConfirmation {
    pub user: Option<User>,
    pub session: Option<Session>,
}

/// The hosted identity service.
///
/// Every operation resolves to a payload or an [`AuthError`], whose two
/// variants separate backend-explained rejections from transport-level
/// surprises. Futures are deliberately not `Send`: the production
/// implementation runs on the browser's single-threaded executor.
#[async_trait(?Send)]
pub trait AuthClient: Send + Sync {
    /// Start an OAuth redirect flow with an external identity provider.
    async fn sign_in_with_oauth(&self, request: OAuthRequest) -> Result<OAuthRedirect, AuthError>;

    /// Authenticate an existing account with an email/password pair.
    async fn sign_in_with_password(
        &self,
        credentials: PasswordCredentials,
    ) -> Result<Session, AuthError>;

    /// Register a new account.
    async fn sign_up(&self, credentials: PasswordCredentials)
    -> Result<SignUpConfirmation, AuthError>;

    /// End the current session.
    async fn sign_out(&self) -> Result<(), AuthError>;
}
