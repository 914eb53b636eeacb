//! App Root Component
//!
//! Routing and the session provider.

use leptos::*;
use leptos_router::*;

use crate::components::Nav;
use crate::pages::{AddCategory, Blogs, Categories, Login, UpdateCategory};
use crate::state::{provide_session, use_session};

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    provide_session();

    view! {
        <Router>
            <div class="min-h-screen bg-gray-900 text-white flex flex-col">
                <Nav />

                <main class="flex-1 container mx-auto px-4 py-8">
                    <Routes>
                        <Route path="/" view=Home />
                        <Route path="/login" view=Login />
                        <Route path="/dashboard" view=Categories />
                        <Route path="/dashboard/AddCategory" view=AddCategory />
                        <Route path="/dashboard/UpdateCategory/:id" view=UpdateCategory />
                        <Route path="/dashboard/blogs" view=Blogs />
                        <Route path="/*any" view=NotFound />
                    </Routes>
                </main>
            </div>
        </Router>
    }
}

/// `/` sends signed-in users to the dashboard, everyone else to login
#[component]
fn Home() -> impl IntoView {
    let session = use_session();
    let target = if session.token().is_some() {
        "/dashboard"
    } else {
        "/login"
    };

    view! { <Redirect path=target /> }
}

/// 404 Not Found page
#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center min-h-[60vh] text-center">
            <div class="text-6xl mb-4">"🔍"</div>
            <h1 class="text-3xl font-bold mb-2">"Page Not Found"</h1>
            <p class="text-gray-400 mb-6">"The page you're looking for doesn't exist."</p>
            <A
                href="/"
                class="px-6 py-3 bg-indigo-600 hover:bg-indigo-700 rounded-lg font-medium transition-colors"
            >
                "Go to Dashboard"
            </A>
        </div>
    }
}
