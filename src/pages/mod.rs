use crate::api::ApiErrorKind;
use crate::catalog::BlockOption;
use crate::components::ui::{
    Alert, AlertDescription, Button, Card, CardDescription, CardItem, CardList, CardTitle, Input,
};
use crate::editor::{BlockCanvas, BlockList};
use crate::models::{Block, Page, PageData, PageSummary};
use crate::state::autosave::{AutosaveController, AUTOSAVE_DELAY_MS};
use crate::state::AppContext;
use crate::util::{now_ms, relative_time, take_preloaded};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::params::Params;

/// Element ids the server uses for preloaded JSON in the HTML shell.
pub(crate) const PAGE_DATA_ID: &str = "page-data";
pub(crate) const PAGES_DATA_ID: &str = "pages-data";

#[derive(Params, PartialEq, Clone, Debug)]
pub struct PageRouteParams {
    pub page_id: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum SaveStatus {
    Idle,
    Saving,
    Saved,
    Failed(String),
}

fn load_pages(app_state: AppContext) {
    let rid = app_state
        .0
        .pages_request_id
        .get_untracked()
        .saturating_add(1);
    app_state.0.pages_request_id.set(rid);
    app_state.0.pages_loading.set(true);
    app_state.0.pages_error.set(None);

    let api_client = app_state.0.api_client.get_untracked();
    spawn_local(async move {
        let result = api_client.list_pages().await;

        // Ignore stale responses.
        if app_state.0.pages_request_id.get_untracked() != rid {
            return;
        }

        match result {
            Ok(pages) => app_state.0.pages.set(pages),
            Err(e) => app_state.0.pages_error.set(Some(e.to_string())),
        }
        app_state.0.pages_loading.set(false);
    });
}

#[component]
pub fn PageListPage() -> impl IntoView {
    let app_state = expect_context::<AppContext>();

    // First paint uses the list the server embedded; later visits fetch.
    match take_preloaded::<Vec<PageSummary>>(PAGES_DATA_ID) {
        Some(pages) => app_state.0.pages.set(pages),
        None => load_pages(app_state),
    }

    let now = now_ms();
    let rows = move || {
        app_state
            .0
            .pages
            .get()
            .into_iter()
            .map(|p| {
                let href = format!("/pages/{}", urlencoding::encode(&p.id));
                let title = if p.title.trim().is_empty() {
                    "Untitled Page".to_string()
                } else {
                    p.title.clone()
                };
                let meta = format!(
                    "{} block{} · updated {}",
                    p.block_count,
                    if p.block_count == 1 { "" } else { "s" },
                    relative_time(p.updated_at, now)
                );
                view! {
                    <CardItem>
                        <a href=href class="text-gray-100 hover:underline">{title}</a>
                        <span class="text-xs text-gray-400">{meta}</span>
                    </CardItem>
                }
            })
            .collect_view()
    };

    view! {
        <div class="max-w-4xl mx-auto p-4 space-y-4">
            <div class="flex items-center justify-between">
                <h1 class="text-2xl font-bold text-white">"Pages"</h1>
                // Plain form post: the server creates the page and redirects to its editor.
                <form method="post" action="/pages/new">
                    <Button attr:r#type="submit">"New Page"</Button>
                </form>
            </div>

            {move || {
                app_state.0.pages_error.get().map(|e| view! {
                    <Alert>
                        <AlertDescription>{e}</AlertDescription>
                    </Alert>
                })
            }}

            <Card>
                <CardTitle>"All pages"</CardTitle>
                <CardDescription>"Most recently updated first"</CardDescription>
                <Show
                    when=move || !app_state.0.pages.with(|p| p.is_empty())
                    fallback=move || view! {
                        <p class="text-sm text-gray-500">
                            {move || if app_state.0.pages_loading.get() { "Loading…" } else { "No pages yet." }}
                        </p>
                    }
                >
                    <CardList>{rows}</CardList>
                </Show>
            </Card>
        </div>
    }
}

#[component]
pub fn PageEditorPage() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let params = leptos_router::hooks::use_params::<PageRouteParams>();
    let page_id = move || {
        params
            .get()
            .ok()
            .and_then(|p| p.page_id)
            .unwrap_or_default()
    };

    let loaded_id: RwSignal<Option<String>> = RwSignal::new(None);
    let title: RwSignal<String> = RwSignal::new(String::new());
    let blocks_view: RwSignal<Vec<Block>> = RwSignal::new(vec![]);
    let not_found: RwSignal<bool> = RwSignal::new(false);
    let load_error: RwSignal<Option<String>> = RwSignal::new(None);
    let status: RwSignal<SaveStatus> = RwSignal::new(SaveStatus::Idle);

    let save = Callback::new(move |_: ()| {
        let Some(id) = loaded_id.get_untracked() else {
            return;
        };
        let data = PageData {
            id: Some(id.clone()),
            title: title.get_untracked(),
            blocks: blocks_view.get_untracked(),
        };

        status.set(SaveStatus::Saving);
        let api_client = app_state.0.api_client.get_untracked();
        spawn_local(async move {
            match api_client.save_page(&id, &data).await {
                Ok(()) => status.set(SaveStatus::Saved),
                Err(e) => {
                    web_sys::console::warn_1(&format!("save of page {id} failed: {e}").into());
                    status.set(SaveStatus::Failed(e.to_string()));
                }
            }
        });
    });

    let autosave = AutosaveController::new(AUTOSAVE_DELAY_MS, save);

    // The controller owns the blocks; the signal mirrors what it reports.
    let list = StoredValue::new_local(BlockList::new(vec![]));
    list.update_value(|l| {
        l.subscribe(move |bs: &[Block]| {
            blocks_view.set(bs.to_vec());
            autosave.on_user_change();
        })
    });

    on_cleanup(move || {
        autosave.flush_now();
        autosave.dispose();
    });

    let apply_page = move |page: Page| {
        autosave.reset();
        list.update_value(|l| l.set_blocks(page.blocks));
        blocks_view.set(list.with_value(|l| l.blocks().to_vec()));
        title.set(page.title);
        not_found.set(false);
        load_error.set(None);
        status.set(SaveStatus::Idle);
        loaded_id.set(Some(page.id));
    };

    // (Re)load whenever the route's page id changes.
    Effect::new(move |_| {
        let id = page_id();
        if id.trim().is_empty() {
            return;
        }
        if loaded_id.get_untracked().as_deref() == Some(id.as_str()) {
            return;
        }

        // Leaving a page with unsaved edits: push them out before switching.
        autosave.flush_now();

        if let Some(page) = take_preloaded::<Page>(PAGE_DATA_ID).filter(|p| p.id == id) {
            apply_page(page);
            return;
        }

        let api_client = app_state.0.api_client.get_untracked();
        spawn_local(async move {
            match api_client.get_page(&id).await {
                Ok(page) => apply_page(page),
                Err(e) if e.kind == ApiErrorKind::NotFound => not_found.set(true),
                Err(e) => load_error.set(Some(e.to_string())),
            }
        });
    });

    let on_select = Callback::new(move |option: &'static BlockOption| {
        list.update_value(|l| {
            l.select_block(option.block_type);
        });
    });
    let on_reorder = Callback::new(move |(active, over): (String, String)| {
        list.update_value(|l| {
            l.reorder(&active, &over);
        });
    });
    let on_content = Callback::new(move |(id, html): (String, String)| {
        list.update_value(|l| {
            l.update_content(&id, &html);
        });
    });
    let on_remove = Callback::new(move |id: String| {
        list.update_value(|l| {
            l.remove_block(&id);
        });
    });
    let on_title = Callback::new(move |_: String| autosave.on_user_change());

    let status_text = move || match status.get() {
        SaveStatus::Idle => String::new(),
        SaveStatus::Saving => "Saving…".to_string(),
        SaveStatus::Saved => "Saved".to_string(),
        SaveStatus::Failed(e) => e,
    };

    view! {
        <Show
            when=move || !not_found.get()
            fallback=|| view! {
                <div class="max-w-4xl mx-auto px-4 py-8 text-sm text-gray-400">
                    "Page not found. " <a href="/" class="underline">"Back to pages"</a>
                </div>
            }
        >
            <form class="max-w-4xl mx-auto p-4" on:submit=move |ev| ev.prevent_default()>
                <div class="mb-4 flex justify-between items-center gap-4">
                    <a href="/" class="text-sm text-gray-400 hover:underline">"← Pages"</a>
                    <Input
                        class="text-2xl font-bold bg-transparent border-none"
                        name="title"
                        placeholder="Untitled Page"
                        bind_value=title
                        on_user_input=on_title
                    />
                    <span class="text-xs text-gray-400 whitespace-nowrap">{status_text}</span>
                    <Button
                        attr:r#type="button"
                        on:click=move |_| {
                            // Explicit save skips the debounce; nothing to send if nothing changed.
                            if autosave.has_pending() {
                                autosave.flush_now();
                            }
                        }
                    >
                        "Save Changes"
                    </Button>
                </div>

                {move || load_error.get().map(|e| view! {
                    <Alert>
                        <AlertDescription>{e}</AlertDescription>
                    </Alert>
                })}

                <BlockCanvas
                    blocks=blocks_view
                    on_select=on_select
                    on_reorder=on_reorder
                    on_content=on_content
                    on_remove=on_remove
                />
            </form>
        </Show>
    }
}
