use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use super::{GoogleSignIn, SubmissionStatus};
use crate::auth::{AuthClient, AuthError, PasswordCredentials};
use crate::components::ui::*;
use crate::platform::{DiagnosticLog, Navigation, RouterNavigation, use_auth_context};

/// Shown when sign-in fails for a reason the backend did not explain.
const FALLBACK_ERROR: &str = "Invalid login credentials";

/// One password sign-in attempt.
///
/// Success hands off exactly once: to `on_success` when the caller gave
/// one, to `navigation` otherwise. A structured rejection comes back
/// verbatim for display; anything else is logged raw and replaced with
/// the generic fallback so transport details never reach the form.
pub(crate) async fn submit_sign_in(
    client: &dyn AuthClient,
    diagnostics: &dyn DiagnosticLog,
    navigation: &dyn Navigation,
    credentials: PasswordCredentials,
    on_success: Option<&dyn Fn()>,
    redirect_to: &str,
) -> SubmissionStatus {
    let credentials = PasswordCredentials {
        email: credentials.email.trim().to_string(),
        ..credentials
    };
    match client.sign_in_with_password(credentials).await {
        Ok(_session) => {
            match on_success {
                Some(callback) => callback(),
                None => navigation.push(redirect_to),
            }
            SubmissionStatus::Idle
        }
        Err(AuthError::Api(error)) => SubmissionStatus::Error(error.message),
        Err(AuthError::Unexpected(raw)) => {
            diagnostics.error("Error signing in:", &raw);
            SubmissionStatus::Error(FALLBACK_ERROR.to_string())
        }
    }
}

/// Email/password sign-in form, with Google as the secondary method.
#[component]
pub fn SignInForm(
    #[prop(optional, into)] on_success: Option<Callback<()>>,
    #[prop(default = String::from("/"), into)] redirect_to: String,
    #[prop(optional, into)] on_toggle_to_sign_up: Option<Callback<()>>,
) -> impl IntoView {
    let context = use_auth_context();
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let status = RwSignal::new(SubmissionStatus::Idle);
    let navigate = use_navigate();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        status.set(SubmissionStatus::Submitting);
        let context = context.clone();
        let navigate = navigate.clone();
        let redirect_to = redirect_to.clone();
        spawn_local(async move {
            let credentials = PasswordCredentials {
                email: email.get_untracked(),
                password: password.get_untracked(),
            };
            let callback = on_success.map(|callback| move || callback.run(()));
            let navigation =
                RouterNavigation(move |path: &str| navigate(path, NavigateOptions::default()));
            let next = submit_sign_in(
                context.client.as_ref(),
                context.diagnostics.as_ref(),
                &navigation,
                credentials,
                callback.as_ref().map(|callback| callback as &dyn Fn()),
                &redirect_to,
            )
            .await;
            status.set(next);
        });
    };

    view! {
        <div class="flex flex-col gap-4">
            <h2 class="text-2xl font-bold">"Sign in to your account"</h2>
            <form class="flex flex-col gap-2" on:submit=on_submit>
                <div class="flex gap-2 items-center">
                    <label for="email">"Email address"</label>
                    <input
                        type="email"
                        id="email"
                        name="email"
                        required
                        class="px-1 bg-gray-200 border border-gray-500 invalid:border-red-500"
                        bind:value=email
                    />
                </div>
                <div class="flex gap-2 items-center">
                    <label for="password">"Password"</label>
                    <input
                        type="password"
                        id="password"
                        name="password"
                        required
                        class="px-1 bg-gray-200 border border-gray-500 invalid:border-red-500"
                        bind:value=password
                    />
                </div>
                {move || match status.get() {
                    SubmissionStatus::Error(message) => {
                        Some(view! { <ErrorText message=message /> })
                    }
                    _ => None,
                }}
                <div class="flex gap-2 items-center">
                    <button
                        type="submit"
                        class="py-0.5 px-2 font-bold bg-green-200 hover:bg-green-400 disabled:opacity-50"
                        disabled=move || status.get().is_submitting()
                    >
                        {move || {
                            if status.get().is_submitting() { "Signing in..." } else { "Sign in" }
                        }}
                    </button>
                    <a href="#" class="text-blue-600 hover:text-blue-400 hover:underline">
                        "Forgot your password?"
                    </a>
                </div>
            </form>
            <GoogleSignIn button_text="Sign in with Google" loading_text="Signing in..." />
            <p>
                "Don't have an account? "
                <button
                    type="button"
                    class="text-blue-600 hover:text-blue-400 hover:underline"
                    on:click=move |_| {
                        if let Some(callback) = on_toggle_to_sign_up {
                            callback.run(());
                        }
                    }
                >
                    "Sign up"
                </button>
            </p>
        </div>
    }
}
