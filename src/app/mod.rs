use crate::pages::{PageEditorPage, PageListPage};
use crate::state::{AppContext, AppState};
use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

#[component]
pub fn App() -> impl IntoView {
    provide_context(AppContext(AppState::new()));

    view! {
        <Router>
            <main class="min-h-screen bg-gray-900">
                <Routes fallback=|| view! { <div class="px-4 py-8 text-xs text-gray-400">"Not found"</div> }>
                    <Route path=path!("pages/:page_id") view=PageEditorPage />
                    <Route path=path!("") view=PageListPage />
                </Routes>
            </main>
        </Router>
    }
}
