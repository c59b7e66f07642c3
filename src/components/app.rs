use leptos::prelude::*;
use leptos_meta::{Body, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment, WildcardSegment,
    components::{Route, Router, Routes},
};

use crate::components::auth::{AuthRoutes, LogoutButton};
use crate::components::footer::Footer;
use crate::components::header::Header;
use crate::components::ui::*;
use crate::platform;

#[component]
pub fn App() -> impl IntoView {
    // Provides context that manages stylesheets, titles, meta tags, etc.
    provide_meta_context();
    // Default auth client and its notification/diagnostic collaborators.
    platform::provide_auth_context();

    view! {
        // injects a stylesheet into the document <head>
        // id=leptos means cargo-leptos will hot-reload this stylesheet
        <Stylesheet id="leptos" href="/pkg/mymemories.css" />

        // sets the document title
        <Title text="MyMemories" />

        <Router>
            <nav class="flex gap-2 justify-start">
                <div>
                    <ANorm href="/">Home</ANorm>
                </div>
                <div>
                    <ANorm href="/auth">"Sign in"</ANorm>
                </div>
            </nav>
            <main>
                <Routes fallback=move || "Not found.">
                    <Route path=StaticSegment("") view=HomePage />
                    <AuthRoutes />
                    <Route path=WildcardSegment("any") view=NotFound />
                </Routes>
                <Body {..} class="p-4 mx-auto max-w-7xl" />
            </main>
        </Router>
    }
}

/// Renders the home page of your application.
#[component]
fn HomePage() -> impl IntoView {
    view! {
        <Header />
        <section class="flex flex-col gap-2 items-start">
            <p>"Your shared memories live here."</p>
            <LogoutButton />
        </section>
        <Footer />
    }
}

/// 404 - Not Found
#[component]
fn NotFound() -> impl IntoView {
    // this is feature gated because the status code can only be set
    // during initial server-side rendering
    #[cfg(feature = "ssr")]
    {
        let resp = expect_context::<leptos_actix::ResponseOptions>();
        resp.set_status(actix_web::http::StatusCode::NOT_FOUND);
    }

    view! { <h1>"Not Found"</h1> }
}
