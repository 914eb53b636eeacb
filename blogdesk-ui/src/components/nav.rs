//! Navigation Component
//!
//! Header bar with the console sections and logout. Hidden while signed
//! out.

use leptos::*;
use leptos_router::*;

use crate::state::use_session;

/// Navigation header component
#[component]
pub fn Nav() -> impl IntoView {
    let session = use_session();
    let navigate = use_navigate();

    let logout = move |_| {
        session.clear();
        web_sys::console::log_1(&"Signed out".into());
        navigate("/login", Default::default());
    };

    view! {
        <Show when=move || session.is_signed_in()>
            <nav class="bg-gray-800 border-b border-gray-700">
                <div class="container mx-auto px-4">
                    <div class="flex items-center justify-between h-16">
                        <A href="/dashboard" class="flex items-center space-x-3">
                            <span class="text-2xl">"📝"</span>
                            <span class="text-xl font-bold text-white">"Blogdesk"</span>
                        </A>

                        <div class="flex items-center space-x-1">
                            <span class="px-3 text-sm text-gray-500">
                                {move || session.auth_id().unwrap_or_default()}
                            </span>
                            <NavLink href="/dashboard" label="Categories" />
                            <NavLink href="/dashboard/blogs" label="Blogs" />
                            <button
                                on:click=logout.clone()
                                class="px-4 py-2 rounded-lg text-gray-300 hover:text-white hover:bg-red-700 transition-colors"
                            >
                                "Logout"
                            </button>
                        </div>
                    </div>
                </div>
            </nav>
        </Show>
    }
}

/// Individual navigation link
#[component]
fn NavLink(
    href: &'static str,
    label: &'static str,
) -> impl IntoView {
    view! {
        <A
            href=href
            exact=true
            class="px-4 py-2 rounded-lg text-gray-300 hover:text-white hover:bg-gray-700 transition-colors"
            active_class="bg-gray-700 text-white"
        >
            {label}
        </A>
    }
}
