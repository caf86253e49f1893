use std::future::Future;

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use leptos_router::hooks::use_params_map;
use lucide_leptos::{ChevronRight, TriangleAlert};

use mlview_core::routes::experiment_href;
use mlview_core::views::{
    experiment_rows, load_experiments, load_run, load_runs, run_rows, run_title, NAME_COLUMN,
};
use mlview_core::{Loader, TableRow, ViewState};

use crate::transport::use_api;

/// Fetches once per distinct value of `key` and keeps only the latest
/// response. `None` clears the view back to `Unloaded` without fetching.
fn use_loader<K, T, F, Fut>(
    key: impl Fn() -> Option<K> + 'static,
    fetch: F,
) -> RwSignal<Loader<K, T>>
where
    K: Clone + PartialEq + Send + Sync + 'static,
    T: Send + Sync + 'static,
    F: Fn(K) -> Fut + 'static,
    Fut: Future<Output = mlview_core::Result<T>> + 'static,
{
    let loader = RwSignal::new(Loader::new());

    Effect::new(move |_| {
        let key = key();
        let ticket = loader.try_update(|l| l.sync(key.clone())).flatten();
        if let (Some(ticket), Some(k)) = (ticket, key) {
            let pending = fetch(k);
            spawn_local(async move {
                let result = pending.await;
                loader.update(|l| {
                    l.resolve(ticket, result);
                });
            });
        }
    });

    loader
}

#[component]
pub fn ExperimentList() -> impl IntoView {
    let api = use_api();
    let loader = use_loader(
        || Some(()),
        move |_| {
            let api = api.clone();
            async move { load_experiments(&api, &Default::default()).await }
        },
    );
    let rows = Signal::derive(move || {
        loader.with(|l| l.state().map(|experiments| experiment_rows(experiments)))
    });

    view! {
        <div class="space-y-6">
            <h1 class="text-3xl font-bold">"Experiments"</h1>
            <RowsTable state=rows />
        </div>
    }
}

#[component]
pub fn ExperimentDetail() -> impl IntoView {
    let params = use_params_map();
    let api = use_api();

    // An absent id still searches, with an empty id list.
    let loader = use_loader(
        move || Some(params.read().get("experiment_id")),
        move |experiment_id: Option<String>| {
            let api = api.clone();
            async move { load_runs(&api, experiment_id.as_deref()).await }
        },
    );

    // Links are built from the id the loaded runs were fetched for.
    let rows = Signal::derive(move || {
        loader.with(|l| {
            let experiment_id = l.key().and_then(|k| k.clone()).unwrap_or_default();
            l.state().map(|runs| run_rows(&experiment_id, runs))
        })
    });
    let title = move || params.read().get("experiment_id").unwrap_or_default();

    view! {
        <div class="space-y-6">
            <div class="flex items-center space-x-2 text-sm text-slate-500">
                <A href="/" attr:class="hover:text-blue-400">"Experiments"</A>
                <ChevronRight size=14 />
                <span class="text-slate-300 font-mono">{title}</span>
            </div>
            <h1 class="text-3xl font-bold">"Runs"</h1>
            <RowsTable state=rows />
        </div>
    }
}

#[component]
pub fn RunDetail() -> impl IntoView {
    let params = use_params_map();
    let api = use_api();

    let loader = use_loader(
        move || params.read().get("run_id"),
        move |run_id: String| {
            let api = api.clone();
            async move { load_run(&api, &run_id).await }
        },
    );
    let experiment_id = move || params.read().get("experiment_id").unwrap_or_default();

    view! {
        <div class="space-y-6">
            <div class="flex items-center space-x-2 text-sm text-slate-500">
                <A href="/" attr:class="hover:text-blue-400">"Experiments"</A>
                <ChevronRight size=14 />
                <A href=move || experiment_href(&experiment_id()) attr:class="hover:text-blue-400 font-mono">
                    {experiment_id}
                </A>
            </div>
            {move || loader.with(|l| match l.state() {
                ViewState::Unloaded => view! { <Skeleton /> }.into_any(),
                ViewState::Loaded(run) => view! {
                    <div class="bg-slate-900 border border-slate-800 rounded-xl p-6">
                        <h1 class="text-2xl font-bold text-white">{run_title(run)}</h1>
                    </div>
                }.into_any(),
                ViewState::Errored(message) => view! { <ErrorNotice message=message.clone() /> }.into_any(),
            })}
        </div>
    }
}

#[component]
fn RowsTable(#[prop(into)] state: Signal<ViewState<Vec<TableRow>>>) -> impl IntoView {
    view! {
        <div class="bg-slate-900 border border-slate-800 rounded-xl overflow-hidden">
            <table class="w-full text-left border-collapse">
                <thead>
                    <tr class="bg-slate-800/50">
                        <th class="px-6 py-4 font-semibold text-slate-300">{NAME_COLUMN}</th>
                    </tr>
                </thead>
                <tbody class="divide-y divide-slate-800">
                    {move || match state.get() {
                        ViewState::Unloaded => view! {
                            <tr><td class="px-6 py-10 text-center text-slate-500">"Loading..."</td></tr>
                        }.into_any(),
                        ViewState::Errored(message) => view! {
                            <tr><td class="px-6 py-6"><ErrorNotice message=message /></td></tr>
                        }.into_any(),
                        ViewState::Loaded(rows) if rows.is_empty() => view! {
                            <tr><td class="px-6 py-10 text-center text-slate-500">"No data"</td></tr>
                        }.into_any(),
                        ViewState::Loaded(rows) => view! {
                            <For
                                each=move || rows.clone()
                                key=|row| row.key.clone()
                                children=|row| view! {
                                    <tr class="hover:bg-slate-800/30 transition-colors">
                                        <td class="px-6 py-4 font-medium">
                                            <A href=row.href attr:class="text-blue-400 hover:underline">{row.label}</A>
                                        </td>
                                    </tr>
                                }
                            />
                        }.into_any(),
                    }}
                </tbody>
            </table>
        </div>
    }
}

#[component]
fn Skeleton() -> impl IntoView {
    view! {
        <div class="animate-pulse space-y-4">
            <div class="bg-slate-900 h-8 w-1/3 rounded-lg"></div>
            <div class="bg-slate-900 h-4 w-2/3 rounded"></div>
            <div class="bg-slate-900 h-4 w-1/2 rounded"></div>
        </div>
    }
}

#[component]
fn ErrorNotice(message: String) -> impl IntoView {
    view! {
        <div class="flex items-center space-x-3 text-red-400 bg-red-950/30 border border-red-900/50 rounded-lg px-4 py-3">
            <TriangleAlert size=18 />
            <span class="text-sm">{message}</span>
        </div>
    }
}

#[component]
pub fn NotFound() -> impl IntoView {
    view! {
        <div class="p-12 text-center space-y-4">
            <h1 class="text-4xl font-bold text-white">"404"</h1>
            <p class="text-slate-400">"Page not found"</p>
            <A href="/" attr:class="text-blue-400 hover:underline">"Back to Experiments"</A>
        </div>
    }
}
