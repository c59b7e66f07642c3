use leptos::prelude::*;

#[component]
pub fn Footer() -> impl IntoView {
    view! {
        <footer class="py-4 mt-8 border-t-2 border-slate-300">
            <div class="flex justify-center">
                <p class="text-sm text-slate-600">
                    "Created with ❤️ by Kim, Chris, Shanti, Grace, Sam and Monika"
                </p>
            </div>
        </footer>
    }
}
