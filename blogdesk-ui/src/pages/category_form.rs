//! Category Form Pages
//!
//! Add and rename share one single-field form. The edit variant loads the
//! current name first and stays disabled until it arrives.

use leptos::*;
use leptos_router::*;

use crate::api::{self, FailureText};
use crate::components::ErrorBanner;
use crate::state::use_session;

const CREATE_TEXT: FailureText = FailureText {
    transport: "An error occurred while adding the category",
    rejected: "Failed to add category",
};

const LOAD_TEXT: FailureText = FailureText {
    transport: "An error occurred while fetching the category",
    rejected: "Failed to fetch category",
};

const UPDATE_TEXT: FailureText = FailureText {
    transport: "An error occurred while updating the category",
    rejected: "Failed to update category",
};

/// `/dashboard/AddCategory`
#[component]
pub fn AddCategory() -> impl IntoView {
    view! { <CategoryForm /> }
}

/// `/dashboard/UpdateCategory/:id`
#[component]
pub fn UpdateCategory() -> impl IntoView {
    let params = use_params_map();
    let id = move || params.with(|p| p.get("id").cloned().unwrap_or_default());

    move || view! { <CategoryForm id=id() /> }
}

#[component]
fn CategoryForm(
    #[prop(optional, into)]
    id: Option<String>,
) -> impl IntoView {
    let session = use_session();
    let editing = id.is_some();

    let (name, set_name) = create_signal(String::new());
    let (error, set_error) = create_signal(None::<String>);
    let (busy, set_busy) = create_signal(editing);
    let (saved, set_saved) = create_signal(false);
    let (redirect, set_redirect) = create_signal(false);

    if let Some(id) = id.clone() {
        match session.require_token(set_redirect) {
            Some(token) => spawn_local(async move {
                match api::fetch_category(&token, &id).await {
                    Ok(category) => set_name.set(category.name),
                    Err(e) => set_error.set(Some(e.user_message(&LOAD_TEXT))),
                }
                set_busy.set(false);
            }),
            None => set_busy.set(false),
        }
    }

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }

        let value = name.get_untracked();
        if value.trim().is_empty() {
            set_error.set(Some("Category name is required".to_string()));
            return;
        }
        let Some(token) = session.require_token(set_redirect) else {
            return;
        };

        set_error.set(None);
        set_busy.set(true);

        let id = id.clone();
        spawn_local(async move {
            let result = match id.as_deref() {
                Some(id) => api::update_category(&token, id, &value)
                    .await
                    .map_err(|e| e.user_message(&UPDATE_TEXT)),
                None => api::create_category(&token, &value)
                    .await
                    .map_err(|e| e.user_message(&CREATE_TEXT)),
            };
            set_busy.set(false);

            match result {
                Ok(category) => {
                    web_sys::console::log_1(&format!("Saved category {}", category.id).into());
                    set_saved.set(true);
                }
                Err(message) => set_error.set(Some(message)),
            }
        });
    };

    let (title, idle_label, busy_label) = if editing {
        ("Update Category", "Update Category", "Updating...")
    } else {
        ("Add New Category", "Add Category", "Adding...")
    };

    view! {
        {move || redirect.get().then(|| view! { <Redirect path="/login" /> })}
        {move || saved.get().then(|| view! { <Redirect path="/dashboard" /> })}

        <div class="max-w-xl mx-auto space-y-6">
            <div>
                <h1 class="text-3xl font-bold">{title}</h1>
                <A href="/dashboard" class="text-sm text-gray-400 hover:text-white">
                    "← Back to categories"
                </A>
            </div>

            <form on:submit=on_submit class="bg-gray-800 rounded-xl p-6 space-y-4">
                <ErrorBanner error=error />

                <div>
                    <label class="block text-sm text-gray-400 mb-2">"Category Name"</label>
                    <input
                        type="text"
                        prop:value=move || name.get()
                        on:input=move |ev| set_name.set(event_target_value(&ev))
                        class="w-full bg-gray-700 rounded-lg px-4 py-3
                               border border-gray-600 focus:border-indigo-500 focus:outline-none"
                    />
                </div>

                <button
                    type="submit"
                    disabled=move || busy.get()
                    class="w-full px-4 py-3 bg-indigo-600 hover:bg-indigo-700 disabled:bg-gray-700
                           rounded-lg font-medium transition-colors"
                >
                    {move || if busy.get() { busy_label } else { idle_label }}
                </button>
            </form>
        </div>
    }
}
