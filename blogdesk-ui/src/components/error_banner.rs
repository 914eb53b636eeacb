//! Error Banner Component

use leptos::*;

/// Inline error line; renders nothing while `error` is `None`
#[component]
pub fn ErrorBanner(
    #[prop(into)]
    error: Signal<Option<String>>,
) -> impl IntoView {
    move || {
        error.get().map(|message| view! {
            <div class="flex items-center space-x-3 bg-red-900/50 border border-red-700 text-red-200 px-4 py-3 rounded-lg">
                <span class="text-lg">"✕"</span>
                <span class="text-sm font-medium">{message}</span>
            </div>
        })
    }
}
