//! Login Page
//!
//! Email and password form. The session is written only once the service
//! returned a token.

use leptos::*;
use leptos_router::*;

use crate::api::{self, FailureText};
use crate::components::ErrorBanner;
use crate::state::use_session;

const LOGIN_TEXT: FailureText = FailureText {
    transport: "Login failed. Please check your credentials.",
    rejected: "Login failed. Please check your credentials.",
};

/// Login page component
#[component]
pub fn Login() -> impl IntoView {
    let session = use_session();
    let navigate = use_navigate();

    let (email, set_email) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let (error, set_error) = create_signal(None::<String>);
    let (submitting, set_submitting) = create_signal(false);

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }

        set_error.set(None);
        set_submitting.set(true);

        let navigate = navigate.clone();
        spawn_local(async move {
            let result = api::login(email.get_untracked().trim(), &password.get_untracked()).await;
            set_submitting.set(false);

            match result {
                Ok(login) => match session.establish(&login) {
                    Ok(()) => {
                        web_sys::console::log_1(&format!("Signed in as {}", login.auth_id).into());
                        navigate("/dashboard", Default::default());
                    }
                    Err(e) => set_error.set(Some(format!("Failed to save session: {}", e))),
                },
                Err(e) => set_error.set(Some(e.user_message(&LOGIN_TEXT))),
            }
        });
    };

    view! {
        <div class="flex items-center justify-center min-h-[70vh]">
            <form
                on:submit=on_submit
                class="w-full max-w-md bg-gray-800 rounded-xl p-8 space-y-6"
            >
                <div>
                    <h1 class="text-3xl font-bold">"Sign in"</h1>
                    <p class="text-gray-400 mt-1">"Manage your categories and blogs"</p>
                </div>

                <ErrorBanner error=error />

                <div>
                    <label class="block text-sm text-gray-400 mb-2">"Email"</label>
                    <input
                        type="email"
                        required
                        prop:value=move || email.get()
                        on:input=move |ev| set_email.set(event_target_value(&ev))
                        class="w-full bg-gray-700 rounded-lg px-4 py-3
                               border border-gray-600 focus:border-indigo-500 focus:outline-none"
                    />
                </div>

                <div>
                    <label class="block text-sm text-gray-400 mb-2">"Password"</label>
                    <input
                        type="password"
                        required
                        prop:value=move || password.get()
                        on:input=move |ev| set_password.set(event_target_value(&ev))
                        class="w-full bg-gray-700 rounded-lg px-4 py-3
                               border border-gray-600 focus:border-indigo-500 focus:outline-none"
                    />
                </div>

                <button
                    type="submit"
                    disabled=move || submitting.get()
                    class="w-full px-4 py-3 bg-indigo-600 hover:bg-indigo-700 disabled:bg-gray-700
                           rounded-lg font-medium transition-colors"
                >
                    {move || if submitting.get() { "Signing in..." } else { "Sign in" }}
                </button>
            </form>
        </div>
    }
}
