/// Collaborator seams around the auth flows: user notification,
/// diagnostics, and page navigation. The flows talk to these traits so
/// tests can substitute recorders and a non-browser target can swap the
/// blocking alert for something friendlier.
use std::sync::Arc;

use leptos::prelude::*;

use crate::auth::AuthClient;

/// Blocking, user-facing notification.
pub trait Notifier: Send + Sync {
    fn alert(&self, message: &str);
}

/// Diagnostic sink for failures that the form UI deliberately does not
/// spell out. `label` is a fixed context marker; `detail` is the raw
/// failure text, passed through verbatim.
pub trait DiagnosticLog: Send + Sync {
    fn error(&self, label: &str, detail: &str);
}

/// Fire-and-forget page transition.
pub trait Navigation {
    fn push(&self, path: &str);
}

/// Adapter over the router's navigate closure.
pub struct RouterNavigation<F>(pub F);

impl<F> Navigation for RouterNavigation<F>
where
    F: Fn(&str),
{
    fn push(&self, path: &str) {
        (self.0)(path)
    }
}

/// Writes through the framework logger: the browser console once
/// hydrated, stderr under server rendering.
pub struct ConsoleDiagnostics;

impl DiagnosticLog for ConsoleDiagnostics {
    fn error(&self, label: &str, detail: &str) {
        leptos::logging::error!("{label} {detail}");
    }
}

/// Everything the auth components need from their host environment.
#[derive(Clone)]
pub struct AuthContext {
    pub client: Arc<dyn AuthClient>,
    pub notifier: Arc<dyn Notifier>,
    pub diagnostics: Arc<dyn DiagnosticLog>,
}

pub fn use_auth_context() -> AuthContext {
    expect_context::<AuthContext>()
}

#[cfg(any(feature = "csr", feature = "hydrate"))]
mod browser {
    use super::*;
    use crate::auth::{AuthConfig, HostedAuthClient};

    /// `window.alert`.
    pub struct BrowserNotifier;

    impl Notifier for BrowserNotifier {
        fn alert(&self, message: &str) {
            if let Some(window) = web_sys::window() {
                let _ = window.alert_with_message(message);
            }
        }
    }

    pub fn context() -> AuthContext {
        let client =
            HostedAuthClient::new(AuthConfig::from_build_env()).with_redirect(Arc::new(|url: &str| {
                if let Some(window) = web_sys::window() {
                    let _ = window.location().set_href(url);
                }
            }));
        AuthContext {
            client: Arc::new(client),
            notifier: Arc::new(BrowserNotifier),
            diagnostics: Arc::new(ConsoleDiagnostics),
        }
    }

    pub fn origin() -> String {
        web_sys::window()
            .and_then(|window| window.location().origin().ok())
            .unwrap_or_default()
    }
}

#[cfg(not(any(feature = "csr", feature = "hydrate")))]
mod server {
    use super::*;
    use crate::auth::{
        AuthError, OAuthRedirect, OAuthRequest, PasswordCredentials, Session, SignUpConfirmation,
    };
    use async_trait::async_trait;

    /// Server-side rendering only paints the idle states; submit handlers
    /// run in the browser. Anything reaching this client is a wiring bug
    /// and resolves to an error outcome rather than a panic.
    struct InertAuthClient;

    fn unavailable() -> AuthError {
        AuthError::Unexpected("auth operations are only available in the browser".to_string())
    }

    #[async_trait(?Send)]
    impl AuthClient for InertAuthClient {
        async fn sign_in_with_oauth(
            &self,
            _request: OAuthRequest,
        ) -> Result<OAuthRedirect, AuthError> {
            Err(unavailable())
        }

        async fn sign_in_with_password(
            &self,
            _credentials: PasswordCredentials,
        ) -> Result<Session, AuthError> {
            Err(unavailable())
        }

        async fn sign_up(
            &self,
            _credentials: PasswordCredentials,
        ) -> Result<SignUpConfirmation, AuthError> {
            Err(unavailable())
        }

        async fn sign_out(&self) -> Result<(), AuthError> {
            Err(unavailable())
        }
    }

    struct SilentNotifier;

    impl Notifier for SilentNotifier {
        fn alert(&self, _message: &str) {}
    }

    pub fn context() -> AuthContext {
        AuthContext {
            client: Arc::new(InertAuthClient),
            notifier: Arc::new(SilentNotifier),
            diagnostics: Arc::new(ConsoleDiagnostics),
        }
    }

    pub fn origin() -> String {
        String::new()
    }
}

/// Install the default collaborators for the current build target.
pub fn provide_auth_context() {
    #[cfg(any(feature = "csr", feature = "hydrate"))]
    provide_context(browser::context());
    #[cfg(not(any(feature = "csr", feature = "hydrate")))]
    provide_context(server::context());
}

/// Origin of the page currently being shown, e.g. `http://localhost:3000`.
pub fn current_origin() -> String {
    #[cfg(any(feature = "csr", feature = "hydrate"))]
    {
        browser::origin()
    }
    #[cfg(not(any(feature = "csr", feature = "hydrate")))]
    {
        server::origin()
    }
}
