//! Blogs Page
//!
//! Read-only card grid of the signed-in user's blogs. An unauthorized reply
//! ends the session.

use leptos::*;
use leptos_router::*;

use crate::api::{self, ApiError, Blog, FailureText};
use crate::components::{CardSkeleton, ErrorBanner};
use crate::state::{use_session, MissingTokenPolicy};

const BLOGS_TEXT: FailureText = FailureText {
    transport: "An error occurred while fetching blogs",
    rejected: "Failed to fetch blogs",
};

/// Blogs page component
#[component]
pub fn Blogs() -> impl IntoView {
    let session = use_session();

    let (blogs, set_blogs) = create_signal(Vec::<Blog>::new());
    let (error, set_error) = create_signal(None::<String>);
    let (loading, set_loading) = create_signal(true);
    let (redirect, set_redirect) = create_signal(false);

    match session.require_token(set_redirect) {
        Some(token) => spawn_local(async move {
            match api::fetch_blogs(&token).await {
                Ok(list) => set_blogs.set(list),
                Err(e) if e.is_unauthorized() => {
                    web_sys::console::warn_1(&"Unauthorized access, clearing session".into());
                    session.clear();
                    if session.policy == MissingTokenPolicy::Redirect {
                        set_redirect.set(true);
                    }
                }
                Err(ApiError::Rejected {
                    message: Some(message),
                }) => set_error.set(Some(format!("{}: {}", BLOGS_TEXT.rejected, message))),
                Err(e) => set_error.set(Some(e.user_message(&BLOGS_TEXT))),
            }
            set_loading.set(false);
        }),
        None => set_loading.set(false),
    }

    view! {
        {move || redirect.get().then(|| view! { <Redirect path="/login" /> })}

        <div class="space-y-6">
            <div>
                <h1 class="text-3xl font-bold">"Blogs"</h1>
                <p class="text-gray-400 mt-1">"Everything you have published"</p>
            </div>

            <ErrorBanner error=error />

            {move || {
                if loading.get() {
                    view! {
                        <div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-6">
                            <CardSkeleton />
                            <CardSkeleton />
                            <CardSkeleton />
                        </div>
                    }.into_view()
                } else if blogs.with(Vec::is_empty) {
                    view! {
                        <p class="text-gray-400 text-center py-12">"No blogs yet"</p>
                    }.into_view()
                } else {
                    view! {
                        <div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-6">
                            {blogs.get().into_iter().map(|blog| view! { <BlogCard blog=blog /> }).collect_view()}
                        </div>
                    }.into_view()
                }
            }}
        </div>
    }
}

#[component]
fn BlogCard(blog: Blog) -> impl IntoView {
    let category = blog
        .category
        .as_ref()
        .map(|c| c.label().to_string())
        .unwrap_or_default();
    let href = blog.detail_path();

    view! {
        <div class="bg-gray-800 rounded-xl overflow-hidden flex flex-col">
            {(!blog.img_url.is_empty()).then(|| view! {
                <img src=blog.img_url.clone() alt=blog.title.clone() class="h-40 w-full object-cover" />
            })}
            <div class="p-4 flex-1 flex flex-col space-y-2">
                <span class="text-xs uppercase tracking-wide text-indigo-300">{category}</span>
                <h2 class="text-lg font-semibold">{blog.title}</h2>
                <p class="text-sm text-gray-400 flex-1">{blog.description}</p>
                <A href=href class="text-sm text-indigo-400 hover:text-indigo-300">
                    "Read more →"
                </A>
            </div>
        </div>
    }
}
