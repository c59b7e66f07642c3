use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::auth::{AuthClient, OAuthRequest, Provider};
use crate::platform::{DiagnosticLog, Notifier, current_origin, use_auth_context};

const BUTTON_CLASS: &str = "py-0.5 px-2 font-bold bg-slate-200 hover:bg-slate-400 disabled:opacity-50";

/// Start the hosted Google OAuth flow.
///
/// On success the auth client points the browser at the provider, so there
/// is nothing left to do here; only the failure path returns control to
/// the page. Structured rejections and transport surprises are surfaced
/// the same way, with the raw failure text in the alert.
pub(crate) async fn start_google_sign_in(
    client: &dyn AuthClient,
    diagnostics: &dyn DiagnosticLog,
    notifier: &dyn Notifier,
    origin: &str,
) {
    let request = OAuthRequest {
        provider: Provider::Google,
        redirect_to: format!("{origin}/auth/callback"),
    };
    if let Err(error) = client.sign_in_with_oauth(request).await {
        diagnostics.error("Google Sign In Error:", error.detail());
        notifier.alert(&format!("Error signing in with Google: {error}"));
    }
}

/// Button that hands authentication off to Google.
#[component]
pub fn GoogleSignIn(
    #[prop(default = String::from("Sign up with Google"), into)] button_text: String,
    #[prop(default = String::from("Connecting to Google..."), into)] loading_text: String,
    #[prop(optional, into)] class: Option<String>,
) -> impl IntoView {
    let context = use_auth_context();
    let connecting = RwSignal::new(false);

    let class = match class {
        Some(extra) => format!("{BUTTON_CLASS} {extra}"),
        None => BUTTON_CLASS.to_string(),
    };

    let on_click = move |_| {
        connecting.set(true);
        let context = context.clone();
        spawn_local(async move {
            start_google_sign_in(
                context.client.as_ref(),
                context.diagnostics.as_ref(),
                context.notifier.as_ref(),
                &current_origin(),
            )
            .await;
            connecting.set(false);
        });
    };

    view! {
        <button
            type="button"
            class=class
            disabled=move || connecting.get()
            on:click=on_click
        >
            {move || {
                if connecting.get() { loading_text.clone() } else { button_text.clone() }
            }}
        </button>
    }
}
