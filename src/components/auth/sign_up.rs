use leptos::prelude::*;
use leptos::task::spawn_local;

use super::{GoogleSignIn, SubmissionStatus};
use crate::auth::{AuthClient, AuthError, PasswordCredentials};
use crate::components::ui::*;
use crate::platform::{DiagnosticLog, use_auth_context};

const PASSWORD_MIN_CHARS: usize = 6;

/// Shown when sign-up fails for a reason the backend did not explain.
const FALLBACK_ERROR: &str = "An unknown error occurred during sign up";

/// How a sign-up attempt ended.
pub(crate) enum SignUpCompletion {
    /// The caller's success callback took over.
    Handled,
    /// No callback was given; the account now waits for email confirmation.
    ConfirmationPending,
    Rejected(String),
}

/// Local checks, in order, first failure wins. Runs before any network
/// traffic.
pub(crate) fn validate(password: &str, confirm_password: &str) -> Option<&'static str> {
    if password != confirm_password {
        return Some("Passwords do not match");
    }
    if password.chars().count() < PASSWORD_MIN_CHARS {
        return Some("Password must be at least 6 characters");
    }
    None
}

/// One sign-up attempt: validate locally, then register with the backend.
pub(crate) async fn submit_sign_up(
    client: &dyn AuthClient,
    diagnostics: &dyn DiagnosticLog,
    credentials: PasswordCredentials,
    confirm_password: &str,
    on_success: Option<&dyn Fn()>,
) -> SignUpCompletion {
    if let Some(message) = validate(&credentials.password, confirm_password) {
        return SignUpCompletion::Rejected(message.to_string());
    }
    match client.sign_up(credentials).await {
        Ok(_confirmation) => match on_success {
            Some(callback) => {
                callback();
                SignUpCompletion::Handled
            }
            None => SignUpCompletion::ConfirmationPending,
        },
        Err(AuthError::Api(error)) => SignUpCompletion::Rejected(error.message),
        Err(AuthError::Unexpected(raw)) => {
            diagnostics.error("Signup error:", &raw);
            SignUpCompletion::Rejected(FALLBACK_ERROR.to_string())
        }
    }
}

/// Email/password registration form, with Google as the secondary method.
#[component]
pub fn SignUpForm(
    #[prop(optional, into)] on_success: Option<Callback<()>>,
    #[prop(optional, into)] on_toggle_to_sign_in: Option<Callback<()>>,
) -> impl IntoView {
    // Stored behind a Copy handle so the submit handler can live inside
    // the re-runnable view closure below.
    let context = StoredValue::new(use_auth_context());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm_password = RwSignal::new(String::new());
    let status = RwSignal::new(SubmissionStatus::Idle);
    let confirmation_pending = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        // Local validation resolves synchronously, without a submitting
        // flash.
        if let Some(message) = validate(
            &password.get_untracked(),
            &confirm_password.get_untracked(),
        ) {
            status.set(SubmissionStatus::Error(message.to_string()));
            return;
        }
        status.set(SubmissionStatus::Submitting);
        spawn_local(async move {
            let context = context.get_value();
            let credentials = PasswordCredentials {
                email: email.get_untracked(),
                password: password.get_untracked(),
            };
            let callback = on_success.map(|callback| move || callback.run(()));
            let completion = submit_sign_up(
                context.client.as_ref(),
                context.diagnostics.as_ref(),
                credentials,
                &confirm_password.get_untracked(),
                callback.as_ref().map(|callback| callback as &dyn Fn()),
            )
            .await;
            match completion {
                SignUpCompletion::Handled => status.set(SubmissionStatus::Idle),
                SignUpCompletion::ConfirmationPending => {
                    status.set(SubmissionStatus::Idle);
                    confirmation_pending.set(true);
                }
                SignUpCompletion::Rejected(message) => {
                    status.set(SubmissionStatus::Error(message));
                }
            }
        });
    };

    view! {
        <Show
            when=move || !confirmation_pending.get()
            fallback=move || {
                view! {
                    <p>"Check your email to confirm your account before signing in."</p>
                }
            }
        >
            <div class="flex flex-col gap-4">
                <h2 class="text-2xl font-bold">"Create an account"</h2>
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
                    <div class="flex gap-2 items-center">
                        <label for="confirm-password">"Confirm Password"</label>
                        <input
                            type="password"
                            id="confirm-password"
                            name="confirm-password"
                            required
                            class="px-1 bg-gray-200 border border-gray-500 invalid:border-red-500"
                            bind:value=confirm_password
                        />
                    </div>
                    {move || match status.get() {
                        SubmissionStatus::Error(message) => {
                            Some(view! { <ErrorText message=message /> })
                        }
                        _ => None,
                    }}
                    <div>
                        <button
                            type="submit"
                            class="py-0.5 px-2 font-bold bg-green-200 hover:bg-green-400 disabled:opacity-50"
                            disabled=move || status.get().is_submitting()
                        >
                            {move || {
                                if status.get().is_submitting() { "Signing up..." } else { "Sign up" }
                            }}
                        </button>
                    </div>
                </form>
                <GoogleSignIn />
                <p>
                    "Already have an account? "
                    <button
                        type="button"
                        class="text-blue-600 hover:text-blue-400 hover:underline"
                        on:click=move |_| {
                            if let Some(callback) = on_toggle_to_sign_in {
                                callback.run(());
                            }
                        }
                    >
                        "Sign in"
                    </button>
                </p>
            </div>
        </Show>
    }
}
