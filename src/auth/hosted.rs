use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use url::Url;

use super::client::{
    AuthClient, OAuthRedirect, OAuthRequest, PasswordCredentials, Session, SignUpConfirmation,
    User,
};
use super::error::{ApiError, AuthError};

/// Connection settings for the hosted identity service.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub base_url: String,
    /// Publishable per-project key, sent with every request.
    pub api_key: String,
}

impl AuthConfig {
    /// Values baked in at compile time. The WASM bundle has no runtime
    /// environment to read, so configuration travels with the build.
    pub fn from_build_env() -> Self {
        Self {
            base_url: option_env!("MYMEMORIES_AUTH_URL")
                .unwrap_or("http://127.0.0.1:54321")
                .to_string(),
            api_key: option_env!("MYMEMORIES_AUTH_KEY")
                .unwrap_or_default()
                .to_string(),
        }
    }
}

type RedirectHook = Arc<dyn Fn(&str) + Send + Sync>;

/// HTTP client for the hosted identity service's REST endpoints.
///
/// Speaks the GoTrue dialect under `/auth/v1/`: `signup`,
/// `token?grant_type=password`, `logout`, and `authorize` for OAuth.
/// The current session is kept in memory so sign-out can present its
/// bearer token; durable session storage stays the service's concern.
pub struct HostedAuthClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    session: Mutex<Option<Session>>,
    redirect: Option<RedirectHook>,
}

impl HostedAuthClient {
    pub fn new(config: AuthConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
            session: Mutex::new(None),
            redirect: None,
        }
    }

    /// Install the hook that sends the browser to the provider's consent
    /// page once an OAuth flow starts.
    pub fn with_redirect(mut self, redirect: RedirectHook) -> Self {
        self.redirect = Some(redirect);
        self
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/auth/v1/{path}", self.base_url)
    }

    fn authorize_url(&self, request: &OAuthRequest) -> Result<String, AuthError> {
        let mut url = Url::parse(&self.endpoint("authorize"))
            .map_err(|err| AuthError::Unexpected(err.to_string()))?;
        url.query_pairs_mut()
            .append_pair("provider", request.provider.as_str())
            .append_pair("redirect_to", &request.redirect_to);
        Ok(url.to_string())
    }

    fn lock_session(&self) -> MutexGuard<'_, Option<Session>> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn post(
        &self,
        url: &str,
        body: Option<&PasswordCredentials>,
        bearer: Option<&str>,
    ) -> Result<(StatusCode, String), AuthError> {
        let mut request = self
            .http
            .post(url)
            .header("apikey", &self.api_key)
            .bearer_auth(bearer.unwrap_or(self.api_key.as_str()));
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;
        Ok((status, text))
    }
}

/// Error payload spellings the service has used across endpoint
/// generations.
#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error_description: Option<String>,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

fn api_error(status: StatusCode, body: &str) -> AuthError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|parsed| {
            parsed
                .error_description
                .or(parsed.msg)
                .or(parsed.message)
                .or(parsed.error)
        })
        .unwrap_or_else(|| format!("authentication request failed with status {status}"));
    AuthError::Api(ApiError {
        message,
        status: Some(status.as_u16()),
    })
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, AuthError> {
    serde_json::from_str(body).map_err(|err| AuthError::Unexpected(format!("malformed auth response: {err}")))
}

#[async_trait(?Send)]
impl AuthClient for HostedAuthClient {
    async fn sign_in_with_oauth(&self, request: OAuthRequest) -> Result<OAuthRedirect, AuthError> {
        // The authorize endpoint is a redirect target, not an API call;
        // starting the flow means pointing the browser at it.
        let url = self.authorize_url(&request)?;
        if let Some(redirect) = &self.redirect {
            redirect(&url);
        }
        Ok(OAuthRedirect {
            provider: request.provider,
            url,
        })
    }

    async fn sign_in_with_password(
        &self,
        credentials: PasswordCredentials,
    ) -> Result<Session, AuthError> {
        let url = format!("{}?grant_type=password", self.endpoint("token"));
        let (status, body) = self.post(&url, Some(&credentials), None).await?;
        if !status.is_success() {
            return Err(api_error(status, &body));
        }
        let session: Session = decode(&body)?;
        *self.lock_session() = Some(session.clone());
        Ok(session)
    }

    async fn sign_up(
        &self,
        credentials: PasswordCredentials,
    ) -> Result<SignUpConfirmation, AuthError> {
        let (status, body) = self.post(&self.endpoint("signup"), Some(&credentials), None).await?;
        if !status.is_success() {
            return Err(api_error(status, &body));
        }
        // With autoconfirm the endpoint answers with a full session;
        // otherwise with a bare user record awaiting email confirmation.
        if let Ok(session) = serde_json::from_str::<Session>(&body) {
            *self.lock_session() = Some(session.clone());
            return Ok(SignUpConfirmation {
                user: session.user.clone(),
                session: Some(session),
            });
        }
        let user: User = decode(&body)?;
        Ok(SignUpConfirmation {
            user: Some(user),
            session: None,
        })
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        let session = self.lock_session().take();
        let Some(session) = session else {
            // Nothing to revoke; signing out of a signed-out client is fine.
            return Ok(());
        };
        let (status, body) = self
            .post(&self.endpoint("logout"), None, Some(&session.access_token))
            .await?;
        if !status.is_success() {
            return Err(api_error(status, &body));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Provider;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(base_url: &str) -> HostedAuthClient {
        HostedAuthClient::new(AuthConfig {
            base_url: base_url.to_string(),
            api_key: "publishable-key".to_string(),
        })
    }

    fn session_body() -> serde_json::Value {
        json!({
            "access_token": "jwt-1",
            "token_type": "bearer",
            "expires_in": 3600,
            "refresh_token": "refresh-1",
            "user": { "id": "user-1", "email": "test@example.com" }
        })
    }

    #[test]
    fn authorize_url_carries_provider_and_encoded_redirect() {
        let client = client("http://localhost:54321/");
        let url = client
            .authorize_url(&OAuthRequest {
                provider: Provider::Google,
                redirect_to: "http://localhost:3000/auth/callback".to_string(),
            })
            .expect("authorize url");
        assert_eq!(
            url,
            "http://localhost:54321/auth/v1/authorize?provider=google&redirect_to=http%3A%2F%2Flocalhost%3A3000%2Fauth%2Fcallback"
        );
    }

    #[tokio::test]
    async fn oauth_start_invokes_redirect_hook() {
        let seen = Arc::new(Mutex::new(Vec::<String>::new()));
        let sink = seen.clone();
        let client = client("http://localhost:54321")
            .with_redirect(Arc::new(move |url: &str| sink.lock().unwrap().push(url.to_string())));
        let redirect = client
            .sign_in_with_oauth(OAuthRequest {
                provider: Provider::Google,
                redirect_to: "http://localhost:3000/auth/callback".to_string(),
            })
            .await
            .expect("oauth start");
        assert_eq!(seen.lock().unwrap().as_slice(), &[redirect.url.clone()]);
        assert_eq!(redirect.provider, Provider::Google);
    }

    #[tokio::test]
    async fn password_sign_in_decodes_session_and_presents_it_on_sign_out() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/v1/token"))
            .and(query_param("grant_type", "password"))
            .and(header("apikey", "publishable-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(session_body()))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/auth/v1/logout"))
            .and(header("authorization", "Bearer jwt-1"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let client = client(&server.uri());
        let session = client
            .sign_in_with_password(PasswordCredentials {
                email: "test@example.com".to_string(),
                password: "password123".to_string(),
            })
            .await
            .expect("sign in");
        assert_eq!(session.access_token, "jwt-1");

        client.sign_out().await.expect("sign out");
    }

    #[tokio::test]
    async fn password_sign_in_maps_structured_rejection() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/v1/token"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": "invalid_grant",
                "error_description": "Invalid login credentials"
            })))
            .mount(&server)
            .await;

        let client = client(&server.uri());
        let error = client
            .sign_in_with_password(PasswordCredentials {
                email: "test@example.com".to_string(),
                password: "wrong".to_string(),
            })
            .await
            .expect_err("rejection");
        assert_eq!(
            error,
            AuthError::Api(ApiError {
                message: "Invalid login credentials".to_string(),
                status: Some(400),
            })
        );
    }

    #[tokio::test]
    async fn sign_up_without_autoconfirm_returns_bare_user() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/v1/signup"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "user-2",
                "email": "new@example.com"
            })))
            .mount(&server)
            .await;

        let client = client(&server.uri());
        let confirmation = client
            .sign_up(PasswordCredentials {
                email: "new@example.com".to_string(),
                password: "password123".to_string(),
            })
            .await
            .expect("sign up");
        assert!(confirmation.session.is_none());
        assert_eq!(
            confirmation.user,
            Some(User {
                id: "user-2".to_string(),
                email: Some("new@example.com".to_string()),
            })
        );
    }

    #[tokio::test]
    async fn sign_up_rejection_prefers_msg_spelling() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/v1/signup"))
            .respond_with(ResponseTemplate::new(422).set_body_json(json!({
                "code": 422,
                "msg": "User already registered"
            })))
            .mount(&server)
            .await;

        let client = client(&server.uri());
        let error = client
            .sign_up(PasswordCredentials {
                email: "taken@example.com".to_string(),
                password: "password123".to_string(),
            })
            .await
            .expect_err("rejection");
        assert_eq!(error.detail(), "User already registered");
    }

    #[tokio::test]
    async fn transport_failure_is_unexpected() {
        // Discard port; nothing listens there.
        let client = client("http://127.0.0.1:9");
        let error = client
            .sign_in_with_password(PasswordCredentials {
                email: "test@example.com".to_string(),
                password: "password123".to_string(),
            })
            .await
            .expect_err("connection refused");
        assert!(matches!(error, AuthError::Unexpected(_)));
    }

    #[tokio::test]
    async fn sign_out_without_session_skips_the_network() {
        let client = client("http://127.0.0.1:9");
        client.sign_out().await.expect("local sign out");
    }
}
