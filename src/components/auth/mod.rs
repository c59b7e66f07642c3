/// All authentication-related components.
use leptos::prelude::*;
use leptos_router::components::*;
use leptos_router::{MatchNestedRoutes, path};

use crate::components::ui::*;

mod google;
mod logout;
mod sign_in;
mod sign_up;

pub use google::GoogleSignIn;
pub use logout::LogoutButton;
pub use sign_in::SignInForm;
pub use sign_up::SignUpForm;

/// Lifecycle of one asynchronous form submission.
///
/// A single tagged state instead of a loading flag plus a nullable
/// message, so a form cannot be submitting and showing a stale error at
/// the same time. There is no terminal success state: success navigates
/// away, hands off to a callback, or swaps the view.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Submitting,
    Error(String),
}

impl SubmissionStatus {
    pub fn is_submitting(&self) -> bool {
        matches!(self, SubmissionStatus::Submitting)
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            SubmissionStatus::Error(message) => Some(message),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AuthView {
    SignIn,
    SignUp,
}

/// Visual wrapper around all auth views.
#[component]
fn AuthWrapper() -> impl IntoView {
    view! {
        <div class="mx-auto max-w-md">
            <Outlet />
        </div>
    }
}

/// Route definitions for the /auth subtree.
#[component(transparent)]
pub fn AuthRoutes() -> impl MatchNestedRoutes + Clone {
    view! {
        <ParentRoute path=path!("auth") view=AuthWrapper>
            <Route path=path!("") view=AuthPage />
            <Route path=path!("callback") view=AuthCallback />
        </ParentRoute>
    }
    .into_inner()
}

/// Sign-in page that can flip to registration and back.
#[component]
pub fn AuthPage() -> impl IntoView {
    let view_mode = RwSignal::new(AuthView::SignIn);

    view! {
        <Show
            when=move || view_mode.get() == AuthView::SignIn
            fallback=move || {
                view! {
                    <SignUpForm on_toggle_to_sign_in=Callback::new(move |()| {
                        view_mode.set(AuthView::SignIn)
                    }) />
                }
            }
        >
            <SignInForm
                redirect_to="/"
                on_toggle_to_sign_up=Callback::new(move |()| view_mode.set(AuthView::SignUp))
            />
        </Show>
    }
}

/// Landing page for the OAuth redirect. The hosted service finishes the
/// exchange and sends the browser back here with a fresh session.
#[component]
fn AuthCallback() -> impl IntoView {
    view! {
        <p>"Completing sign-in..."</p>
        <p>
            <ANorm href="/">"Back to home"</ANorm>
        </p>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_starts_idle() {
        assert_eq!(SubmissionStatus::default(), SubmissionStatus::Idle);
        assert!(!SubmissionStatus::Idle.is_submitting());
    }

    #[test]
    fn only_the_error_state_carries_a_message() {
        assert_eq!(SubmissionStatus::Submitting.error_message(), None);
        assert_eq!(
            SubmissionStatus::Error("nope".to_string()).error_message(),
            Some("nope")
        );
    }
}
