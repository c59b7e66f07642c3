//! Shared doubles for exercising the auth flows without a backend.

use std::sync::Mutex;

use async_trait::async_trait;

use super::client::{
    AuthClient, OAuthRedirect, OAuthRequest, PasswordCredentials, Provider, Session,
    SignUpConfirmation, User,
};
use super::error::AuthError;
use crate::platform::{DiagnosticLog, Navigation, Notifier};

pub(crate) fn session(token: &str) -> Session {
    Session {
        access_token: token.to_string(),
        token_type: "bearer".to_string(),
        expires_in: Some(3600),
        refresh_token: None,
        user: Some(User {
            id: "user-1".to_string(),
            email: Some("test@example.com".to_string()),
        }),
    }
}

/// Records every request and answers with a preloaded result, or a benign
/// default when none was loaded.
#[derive(Default)]
pub(crate) struct StubAuthClient {
    pub oauth_requests: Mutex<Vec<OAuthRequest>>,
    pub password_requests: Mutex<Vec<PasswordCredentials>>,
    pub sign_up_requests: Mutex<Vec<PasswordCredentials>>,
    pub sign_out_calls: Mutex<usize>,
    pub oauth_result: Mutex<Option<Result<OAuthRedirect, AuthError>>>,
    pub password_result: Mutex<Option<Result<Session, AuthError>>>,
    pub sign_up_result: Mutex<Option<Result<SignUpConfirmation, AuthError>>>,
    pub sign_out_result: Mutex<Option<Result<(), AuthError>>>,
}

impl StubAuthClient {
    pub fn with_oauth_result(result: Result<OAuthRedirect, AuthError>) -> Self {
        let stub = Self::default();
        *stub.oauth_result.lock().unwrap() = Some(result);
        stub
    }

    pub fn with_password_result(result: Result<Session, AuthError>) -> Self {
        let stub = Self::default();
        *stub.password_result.lock().unwrap() = Some(result);
        stub
    }

    pub fn with_sign_up_result(result: Result<SignUpConfirmation, AuthError>) -> Self {
        let stub = Self::default();
        *stub.sign_up_result.lock().unwrap() = Some(result);
        stub
    }

    pub fn with_sign_out_result(result: Result<(), AuthError>) -> Self {
        let stub = Self::default();
        *stub.sign_out_result.lock().unwrap() = Some(result);
        stub
    }
}

#[async_trait(?Send)]
impl AuthClient for StubAuthClient {
    async fn sign_in_with_oauth(&self, request: OAuthRequest) -> Result<OAuthRedirect, AuthError> {
        self.oauth_requests.lock().unwrap().push(request);
        self.oauth_result.lock().unwrap().take().unwrap_or_else(|| {
            Ok(OAuthRedirect {
                provider: Provider::Google,
                url: "https://auth.example/authorize".to_string(),
            })
        })
    }

    async fn sign_in_with_password(
        &self,
        credentials: PasswordCredentials,
    ) -> Result<Session, AuthError> {
        self.password_requests.lock().unwrap().push(credentials);
        self.password_result
            .lock()
            .unwrap()
            .take()
            .unwrap_or_else(|| Ok(session("jwt-stub")))
    }

    async fn sign_up(
        &self,
        credentials: PasswordCredentials,
    ) -> Result<SignUpConfirmation, AuthError> {
        self.sign_up_requests.lock().unwrap().push(credentials);
        self.sign_up_result.lock().unwrap().take().unwrap_or_else(|| {
            Ok(SignUpConfirmation {
                user: Some(User {
                    id: "user-1".to_string(),
                    email: None,
                }),
                session: None,
            })
        })
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        *self.sign_out_calls.lock().unwrap() += 1;
        self.sign_out_result
            .lock()
            .unwrap()
            .take()
            .unwrap_or(Ok(()))
    }
}

#[derive(Default)]
pub(crate) struct RecordingLog {
    pub entries: Mutex<Vec<(String, String)>>,
}

impl DiagnosticLog for RecordingLog {
    fn error(&self, label: &str, detail: &str) {
        self.entries
            .lock()
            .unwrap()
            .push((label.to_string(), detail.to_string()));
    }
}

#[derive(Default)]
pub(crate) struct RecordingNotifier {
    pub alerts: Mutex<Vec<String>>,
}

impl Notifier for RecordingNotifier {
    fn alert(&self, message: &str) {
        self.alerts.lock().unwrap().push(message.to_string());
    }
}

#[derive(Default)]
pub(crate) struct RecordingNavigation {
    pub paths: Mutex<Vec<String>>,
}

impl Navigation for RecordingNavigation {
    fn push(&self, path: &str) {
        self.paths.lock().unwrap().push(path.to_string());
    }
}
