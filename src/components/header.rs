use leptos::prelude::*;

/// Site banner with the MyMemories logo.
#[component]
pub fn Header() -> impl IntoView {
    view! {
        <header class="flex flex-col items-center py-4">
            <div class="flex justify-center">
                <img src="/logo.jpg" alt="MyMemories Logo" width="175" height="175" />
            </div>
            <h1 class="text-4xl font-bold">"MyMemories"</h1>
        </header>
    }
}
