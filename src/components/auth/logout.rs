use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::auth::AuthClient;
use crate::platform::{DiagnosticLog, Navigation, Notifier, RouterNavigation, use_auth_context};

/// End the session and leave for `redirect_to`.
///
/// Navigation only happens on success; a failed sign-out leaves the user
/// where they are, with an alert.
pub(crate) async fn submit_sign_out(
    client: &dyn AuthClient,
    diagnostics: &dyn DiagnosticLog,
    notifier: &dyn Notifier,
    navigation: &dyn Navigation,
    redirect_to: &str,
) {
    match client.sign_out().await {
        Ok(()) => navigation.push(redirect_to),
        Err(error) => {
            diagnostics.error("Error signing out:", error.detail());
            notifier.alert("Error signing out. Please try again.");
        }
    }
}

#[component]
pub fn LogoutButton(
    #[prop(default = String::from("/"), into)] redirect_to: String,
) -> impl IntoView {
    let context = use_auth_context();
    let signing_out = RwSignal::new(false);
    let navigate = use_navigate();

    let on_click = move |_| {
        signing_out.set(true);
        let context = context.clone();
        let navigate = navigate.clone();
        let redirect_to = redirect_to.clone();
        spawn_local(async move {
            let navigation =
                RouterNavigation(move |path: &str| navigate(path, NavigateOptions::default()));
            submit_sign_out(
                context.client.as_ref(),
                context.diagnostics.as_ref(),
                context.notifier.as_ref(),
                &navigation,
                &redirect_to,
            )
            .await;
            signing_out.set(false);
        });
    };

    view! {
        <button
            type="button"
            class="py-0.5 px-2 font-bold bg-slate-200 hover:bg-slate-400 disabled:opacity-50"
            disabled=move || signing_out.get()
            on:click=on_click
        >
            {move || if signing_out.get() { "Signing out..." } else { "Sign Out" }}
        </button>
    }
}
