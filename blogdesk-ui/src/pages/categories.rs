//! Categories Page
//!
//! Category list with debounced search, edit links, and in-place delete.

use leptos::*;
use leptos_router::*;

use crate::api::{self, Category, FailureText};
use crate::components::{ErrorBanner, Loading};
use crate::state::{remove_by_id, use_session, Debouncer, SearchAction, MIN_SEARCH_LEN, SEARCH_DEBOUNCE_MS};

const FETCH_TEXT: FailureText = FailureText {
    transport: "An error occurred while fetching categories",
    rejected: "Failed to fetch categories",
};

const DELETE_TEXT: FailureText = FailureText {
    transport: "An error occurred while deleting the category",
    rejected: "Failed to delete category",
};

/// Categories page component
#[component]
pub fn Categories() -> impl IntoView {
    let session = use_session();

    let categories = create_rw_signal(Vec::<Category>::new());
    let (search, set_search) = create_signal(String::new());
    let (error, set_error) = create_signal(None::<String>);
    let (loading, set_loading) = create_signal(true);
    let (redirect, set_redirect) = create_signal(false);

    let load = move |term: Option<String>| {
        let Some(token) = session.require_token(set_redirect) else {
            categories.set(Vec::new());
            set_loading.set(false);
            return;
        };

        set_loading.set(true);
        spawn_local(async move {
            match api::fetch_categories(&token, term.as_deref()).await {
                Ok(list) => {
                    categories.set(list);
                    set_error.set(None);
                }
                Err(e) => {
                    web_sys::console::error_1(&format!("Failed to fetch categories: {}", e).into());
                    set_error.set(Some(e.user_message(&FETCH_TEXT)));
                }
            }
            set_loading.set(false);
        });
    };

    load(None);

    let debouncer = Debouncer::new(SEARCH_DEBOUNCE_MS);
    on_cleanup({
        let debouncer = debouncer.clone();
        move || debouncer.cancel()
    });

    let on_search = move |ev| {
        let value = event_target_value(&ev);
        set_search.set(value.clone());

        match SearchAction::for_input(&value, MIN_SEARCH_LEN) {
            SearchAction::FetchAll => {
                debouncer.cancel();
                load(None);
            }
            SearchAction::Debounce(term) => debouncer.schedule(move || load(Some(term))),
            SearchAction::Wait => {}
        }
    };

    let delete = move |id: String| {
        let Some(token) = session.require_token(set_redirect) else {
            return;
        };
        spawn_local(async move {
            match api::delete_category(&token, &id).await {
                Ok(()) => categories.update(|list| remove_by_id(list, &id)),
                Err(e) => set_error.set(Some(e.user_message(&DELETE_TEXT))),
            }
        });
    };

    view! {
        {move || redirect.get().then(|| view! { <Redirect path="/login" /> })}

        <div class="space-y-6">
            <div class="flex items-center justify-between">
                <div>
                    <h1 class="text-3xl font-bold">"Categories"</h1>
                    <p class="text-gray-400 mt-1">"Organize the topics your blogs belong to"</p>
                </div>
                <A
                    href="/dashboard/AddCategory"
                    class="px-4 py-3 bg-indigo-600 hover:bg-indigo-700 rounded-lg font-medium transition-colors"
                >
                    "Add Category"
                </A>
            </div>

            <input
                type="search"
                placeholder="Search categories..."
                prop:value=move || search.get()
                on:input=on_search
                class="w-full bg-gray-700 rounded-lg px-4 py-3
                       border border-gray-600 focus:border-indigo-500 focus:outline-none"
            />

            <ErrorBanner error=error />

            {move || {
                if loading.get() {
                    view! { <Loading /> }.into_view()
                } else if categories.with(Vec::is_empty) {
                    view! {
                        <p class="text-gray-400 text-center py-12">"No categories found"</p>
                    }.into_view()
                } else {
                    view! {
                        <CategoryTable categories=categories.read_only() on_delete=delete />
                    }.into_view()
                }
            }}
        </div>
    }
}

#[component]
fn CategoryTable<F>(
    categories: ReadSignal<Vec<Category>>,
    on_delete: F,
) -> impl IntoView
where
    F: Fn(String) + Copy + 'static,
{
    view! {
        <div class="bg-gray-800 rounded-xl overflow-hidden">
            <table class="w-full text-left">
                <thead class="bg-gray-700 text-gray-300 text-sm">
                    <tr>
                        <th class="px-6 py-3">"Name"</th>
                        <th class="px-6 py-3 text-right">"Actions"</th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=move || categories.get()
                        key=|category| (category.id.clone(), category.name.clone())
                        children=move |category| {
                            let id = category.id.clone();
                            view! {
                                <tr class="border-t border-gray-700">
                                    <td class="px-6 py-4">{category.name}</td>
                                    <td class="px-6 py-4 text-right space-x-2">
                                        <A
                                            href=format!("/dashboard/UpdateCategory/{}", category.id)
                                            class="px-3 py-1 bg-gray-600 hover:bg-gray-500 rounded-lg text-sm"
                                        >
                                            "Edit"
                                        </A>
                                        <button
                                            on:click=move |_| on_delete(id.clone())
                                            class="px-3 py-1 bg-red-700 hover:bg-red-600 rounded-lg text-sm"
                                        >
                                            "Delete"
                                        </button>
                                    </td>
                                </tr>
                            }
                        }
                    />
                </tbody>
            </table>
        </div>
    }
}
