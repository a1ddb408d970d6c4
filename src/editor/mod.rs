pub mod blocks;
pub mod toolbar;

use crate::catalog::BlockOption;
use crate::components::ui::{Button, ButtonSize, ButtonVariant};
use crate::components::BlockMenu;
use crate::models::Block;
use leptos::html;
use leptos::prelude::*;
use wasm_bindgen::JsCast;
use toolbar::{accepted_url, inline_code_html, toolbar_for, FormatCommand, ToolbarItem};

pub use blocks::{neighbour_id, BlockList, Step};

/// `execCommand` and friends live on `HtmlDocument`, not `Document`.
fn html_document() -> Option<web_sys::HtmlDocument> {
    web_sys::window()?
        .document()?
        .dyn_into::<web_sys::HtmlDocument>()
        .ok()
}

fn command_is_active(cmd: FormatCommand) -> bool {
    let Some(doc) = html_document() else {
        return false;
    };

    if let FormatCommand::Heading(level) = cmd {
        return doc
            .query_command_value("formatBlock")
            .map(|v| v.eq_ignore_ascii_case(&format!("h{level}")))
            .unwrap_or(false);
    }

    cmd.state_query()
        .and_then(|q| doc.query_command_state(q).ok())
        .unwrap_or(false)
}

/// Apply `cmd` to the current selection. Returns false when nothing was done
/// (cancelled prompt, no document).
fn exec_format(cmd: FormatCommand) -> bool {
    let Some(win) = web_sys::window() else {
        return false;
    };
    let Some(doc) = html_document() else {
        return false;
    };

    let (name, value) = cmd.exec_args(command_is_active(cmd));

    let value = match cmd {
        FormatCommand::Link | FormatCommand::Image => {
            let prompt = cmd.prompt().unwrap_or_default();
            let Some(url) = accepted_url(win.prompt_with_message(prompt).ok().flatten()) else {
                return false;
            };
            Some(url)
        }
        FormatCommand::Code => {
            let selected = win
                .get_selection()
                .ok()
                .flatten()
                .map(|s| String::from(s.to_string()))
                .unwrap_or_default();
            if selected.is_empty() {
                return false;
            }
            Some(inline_code_html(&selected))
        }
        _ => value,
    };

    let res = match value {
        Some(v) => doc.exec_command_with_show_ui_and_value(name, false, &v),
        None => doc.exec_command(name),
    };
    res.unwrap_or(false)
}

/// Editable rich-text surface for one block plus its type-specific toolbar.
///
/// The surface is seeded once; afterwards the DOM owns the markup and every
/// edit is reported through `on_change` as serialized HTML.
#[component]
pub fn RichTextBlock(
    #[prop(into)] block_type: String,
    #[prop(into)] content: String,
    on_change: Callback<String>,
) -> impl IntoView {
    let surface: NodeRef<html::Div> = NodeRef::new();
    // Bumped on selection/format changes so active-state classes re-evaluate.
    let selection_tick: RwSignal<u32> = RwSignal::new(0);

    let emit = move || {
        if let Some(el) = surface.get_untracked() {
            on_change.run(el.inner_html());
        }
        selection_tick.update(|t| *t = t.wrapping_add(1));
    };

    let toolbar_buttons = toolbar_for(&block_type)
        .into_iter()
        .map(|ToolbarItem { icon, label, command }| {
            let class = move || {
                selection_tick.get();
                if command_is_active(command) {
                    "px-3 py-1.5 rounded text-sm font-medium transition-colors bg-blue-500 text-white"
                } else {
                    "px-3 py-1.5 rounded text-sm font-medium transition-colors bg-gray-700 text-gray-200 hover:bg-gray-600"
                }
            };

            view! {
                <button
                    type="button"
                    class=class
                    title=label
                    // mousedown + preventDefault keeps the caret inside the surface.
                    on:mousedown=move |ev: web_sys::MouseEvent| {
                        ev.prevent_default();
                        if let Some(el) = surface.get_untracked() {
                            let _ = el.focus();
                        }
                        if exec_format(command) {
                            emit();
                        }
                    }
                >
                    {icon}
                </button>
            }
        })
        .collect_view();

    view! {
        <div class="bg-gray-800 rounded-lg shadow-lg border border-gray-700">
            <div class="flex gap-2 p-2 bg-gray-800 rounded-t-lg border-b border-gray-700">
                {toolbar_buttons}
            </div>
            <div
                node_ref=surface
                contenteditable="true"
                class="prose prose-invert max-w-none p-4 min-h-[100px] text-gray-200 outline-none"
                data-block-type=block_type.clone()
                inner_html=content
                on:input=move |_| emit()
                on:keyup=move |_| selection_tick.update(|t| *t = t.wrapping_add(1))
                on:mouseup=move |_| selection_tick.update(|t| *t = t.wrapping_add(1))
            ></div>
        </div>
    }
}

/// Drag handle, drag styling and drop target for one block.
///
/// The drag session itself is the browser's; `drag_source` only mirrors which
/// block is in flight so the canvas can style it. The handle is also focusable:
/// ArrowUp/ArrowDown on it report a one-slot move through `on_step`.
#[component]
pub fn DraggableBlock(
    #[prop(into)] id: String,
    drag_source: RwSignal<Option<String>>,
    drop_target: RwSignal<Option<String>>,
    on_drop: Callback<(String, String)>,
    on_step: Callback<Step>,
    children: Children,
) -> impl IntoView {
    let wrapper: NodeRef<html::Div> = NodeRef::new();
    let id_sv = StoredValue::new(id);

    let class = move || {
        let id = id_sv.get_value();
        let mut c = "relative group bg-gray-900 rounded-lg border border-gray-700 hover:border-blue-500 transition-transform".to_string();
        if drag_source.get().as_deref() == Some(id.as_str()) {
            c.push_str(" opacity-50 scale-[0.98]");
        }
        if drop_target.get().as_deref() == Some(id.as_str())
            && drag_source.get().as_deref() != Some(id.as_str())
        {
            c.push_str(" ring-2 ring-blue-500");
        }
        c
    };

    view! {
        <div
            node_ref=wrapper
            class=class
            on:dragover=move |ev: web_sys::DragEvent| {
                ev.prevent_default();
                if let Some(dt) = ev.data_transfer() {
                    dt.set_drop_effect("move");
                }
                let id = id_sv.get_value();
                if drop_target.get_untracked().as_deref() != Some(id.as_str()) {
                    drop_target.set(Some(id));
                }
            }
            on:drop=move |ev: web_sys::DragEvent| {
                ev.prevent_default();

                let active_id = ev
                    .data_transfer()
                    .and_then(|dt| dt.get_data("text/plain").ok())
                    .filter(|s| !s.trim().is_empty())
                    .or_else(|| drag_source.get_untracked())
                    .unwrap_or_default();

                drag_source.set(None);
                drop_target.set(None);

                if active_id.trim().is_empty() {
                    return;
                }
                on_drop.run((active_id, id_sv.get_value()));
            }
        >
            <div
                class="absolute -left-4 top-1/2 -translate-y-1/2 hidden group-hover:flex group-focus-within:flex items-center justify-center w-8 h-8 bg-gray-700 text-gray-300 rounded cursor-move focus:outline-none focus:ring-2 focus:ring-blue-500"
                draggable="true"
                tabindex="0"
                role="button"
                title="Drag or use arrow keys to reorder"
                aria-label="Reorder block"
                on:keydown=move |ev: web_sys::KeyboardEvent| {
                    if let Some(step) = Step::from_key(&ev.key()) {
                        ev.prevent_default();
                        on_step.run(step);
                    }
                }
                on:dragstart=move |ev: web_sys::DragEvent| {
                    let id = id_sv.get_value();
                    if let Some(dt) = ev.data_transfer() {
                        let _ = dt.set_data("text/plain", &id);
                        dt.set_effect_allowed("move");
                        if let Some(el) = wrapper.get_untracked() {
                            dt.set_drag_image(&el, 16, 16);
                        }
                    }
                    drag_source.set(Some(id));
                }
                on:dragend=move |_ev: web_sys::DragEvent| {
                    drag_source.set(None);
                    drop_target.set(None);
                }
            >
                "⋮⋮"
            </div>
            {children()}
        </div>
    }
}

/// Block menu plus the sortable list of block editors.
#[component]
pub fn BlockCanvas(
    blocks: RwSignal<Vec<Block>>,
    on_select: Callback<&'static BlockOption>,
    on_reorder: Callback<(String, String)>,
    on_content: Callback<(String, String)>,
    on_remove: Callback<String>,
) -> impl IntoView {
    let drag_source: RwSignal<Option<String>> = RwSignal::new(None);
    let drop_target: RwSignal<Option<String>> = RwSignal::new(None);

    view! {
        <div class="max-w-4xl mx-auto p-4 bg-gray-900 min-h-screen">
            <div class="mb-4">
                <BlockMenu on_select=on_select />
            </div>

            <Show when=move || blocks.with(|b| b.is_empty()) fallback=|| ().into_view()>
                <div class="py-8 text-center text-sm text-gray-500">
                    "No blocks yet. Use \"Add Block +\" to start."
                </div>
            </Show>

            <div class="space-y-6">
                // Keyed by id: content edits don't remount editors; reorders move them.
                <For
                    each=move || blocks.get()
                    key=|b| b.id.clone()
                    children=move |b: Block| {
                        let id_for_change = b.id.clone();
                        let id_for_remove = b.id.clone();
                        let id_for_step = b.id.clone();
                        let on_step = Callback::new(move |step: Step| {
                            let over = blocks.with_untracked(|bs| neighbour_id(bs, &id_for_step, step));
                            if let Some(over) = over {
                                on_reorder.run((id_for_step.clone(), over));
                            }
                        });
                        view! {
                            <DraggableBlock
                                id=b.id.clone()
                                drag_source=drag_source
                                drop_target=drop_target
                                on_drop=on_reorder
                                on_step=on_step
                            >
                                <div class="absolute right-2 top-2 z-10 hidden group-hover:block">
                                    <Button
                                        variant=ButtonVariant::Destructive
                                        size=ButtonSize::Icon
                                        attr:r#type="button"
                                        attr:title="Delete block"
                                        on:click=move |_| on_remove.run(id_for_remove.clone())
                                    >
                                        "✕"
                                    </Button>
                                </div>
                                <RichTextBlock
                                    block_type=b.block_type.clone()
                                    content=b.content.clone()
                                    on_change=Callback::new(move |html: String| {
                                        on_content.run((id_for_change.clone(), html))
                                    })
                                />
                            </DraggableBlock>
                        }
                    }
                />
            </div>
        </div>
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn host() -> web_sys::HtmlElement {
        let doc = web_sys::window()
            .and_then(|w| w.document())
            .expect("document");
        let el = doc
            .create_element("div")
            .expect("div")
            .dyn_into::<web_sys::HtmlElement>()
            .expect("html element");
        doc.body().expect("body").append_child(&el).expect("append host");
        el
    }

    #[wasm_bindgen_test]
    fn test_format_state_reads_through_html_document() {
        assert!(html_document().is_some());
        // No selection inside an editable region: nothing is active.
        assert!(!command_is_active(FormatCommand::Bold));
        assert!(!command_is_active(FormatCommand::Italic));
    }

    #[wasm_bindgen_test]
    fn test_menu_toggle_is_not_a_submit_button() {
        let el = host();
        let _handle = leptos::mount::mount_to(el.clone(), || {
            view! { <BlockMenu on_select=Callback::new(|_: &'static BlockOption| {}) /> }
        });

        let button = el
            .query_selector("button[type='button']")
            .expect("selector")
            .expect("typed button");
        assert_eq!(button.text_content().as_deref().map(str::trim), Some("Add Block +"));
        assert!(el.query_selector("button[type='submit']").expect("selector").is_none());
    }

    #[wasm_bindgen_test]
    fn test_reorder_handle_is_focusable() {
        let el = host();
        let _handle = leptos::mount::mount_to(el.clone(), || {
            let blocks = RwSignal::new(vec![Block::new("a", "text", 0), Block::new("b", "text", 1)]);
            view! {
                <BlockCanvas
                    blocks=blocks
                    on_select=Callback::new(|_: &'static BlockOption| {})
                    on_reorder=Callback::new(|_: (String, String)| {})
                    on_content=Callback::new(|_: (String, String)| {})
                    on_remove=Callback::new(|_: String| {})
                />
            }
        });

        let handle = el
            .query_selector("[draggable='true'][tabindex='0']")
            .expect("selector")
            .expect("focusable handle");
        assert_eq!(handle.get_attribute("role").as_deref(), Some("button"));
    }
}
