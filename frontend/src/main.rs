mod pages;
mod transport;

use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes, A};
use leptos_router::path;
use lucide_leptos::FlaskConical;

use crate::pages::{ExperimentDetail, ExperimentList, NotFound, RunDetail};

#[component]
fn App() -> impl IntoView {
    transport::provide_api();

    view! {
        <Router>
            <div class="flex flex-col h-screen bg-slate-950 text-slate-100 font-sans">
                <header class="flex items-center px-8 py-4 border-b border-slate-800 bg-slate-900/50">
                    <A href="/" attr:class="flex items-center space-x-3 text-white">
                        <div class="p-2 bg-blue-600 rounded-lg shadow-lg shadow-blue-900/20">
                            <FlaskConical size=20 />
                        </div>
                        <span class="text-xl font-bold tracking-tight">"mlview"</span>
                    </A>
                </header>

                <main class="flex-grow overflow-auto p-8">
                    <Routes fallback=|| view! { <NotFound /> }.into_any()>
                        <Route path=path!("/") view=|| view! { <ExperimentList /> } />
                        <Route path=path!("/experiments/:experiment_id") view=|| view! { <ExperimentDetail /> } />
                        <Route path=path!("/experiments/:experiment_id/runs/:run_id") view=|| view! { <RunDetail /> } />
                    </Routes>
                </main>
            </div>
        </Router>
    }
}

fn main() {
    let debug_enabled = web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .and_then(|s| s.get_item("debug_enabled").ok().flatten())
        .is_some_and(|v| v == "true");

    let level = if debug_enabled {
        log::Level::Debug
    } else {
        log::Level::Info
    };
    _ = console_log::init_with_level(level);
    console_error_panic_hook::set_once();
    log::info!("mlview using API prefix {}", transport::api_config().api_prefix());
    mount_to_body(App);
}
