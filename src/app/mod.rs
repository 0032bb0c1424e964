use crate::pages::{ConfirmDialog, HomePage, NotePage, NoticeStack, SettingsPage};
use crate::state::{AppContext, AppState};
use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

#[component]
pub fn App() -> impl IntoView {
    provide_context(AppContext(AppState::new()));

    // IMPORTANT:
    // - Leptos CSR requires the `csr` feature on `leptos`.
    // - Router hooks require a <Router> context.
    view! {
        <div class="min-h-screen bg-background text-foreground">
            <Router>
                <Routes fallback=|| view! { <div class="px-4 py-8 text-xs text-muted-foreground">"Not found"</div> }>
                    <Route path=path!("settings") view=SettingsPage />
                    <Route path=path!("note") view=NotePage />
                    <Route path=path!("") view=HomePage />
                </Routes>
            </Router>

            <NoticeStack />
            <ConfirmDialog />
        </div>
    }
}
