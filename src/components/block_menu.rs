use crate::catalog::{featured, filter, BlockOption};
use crate::components::ui::{Button, Input};
use leptos::prelude::*;

/// "Add Block +" dropdown: featured grid, search box, categorized list.
///
/// Open state and search text belong to this instance only.
#[component]
pub fn BlockMenu(on_select: Callback<&'static BlockOption>) -> impl IntoView {
    let is_open: RwSignal<bool> = RwSignal::new(false);
    let search: RwSignal<String> = RwSignal::new(String::new());

    let pick = move |option: &'static BlockOption| {
        on_select.run(option);
        is_open.set(false);
    };

    let featured_view = move || {
        featured()
            .into_iter()
            .map(|option| {
                view! {
                    <button
                        type="button"
                        class="flex flex-col items-center p-2 rounded hover:bg-gray-700 text-gray-200"
                        on:click=move |_| pick(option)
                    >
                        <span class="text-xl mb-1">{option.icon}</span>
                        <span class="text-xs">{option.label}</span>
                    </button>
                }
            })
            .collect_view()
    };

    let grouped_view = move || {
        filter(&search.get())
            .into_iter()
            .map(|(category, options)| {
                view! {
                    <div class="p-2">
                        <div class="text-xs font-semibold text-gray-400 uppercase mb-1">
                            {category.to_string()}
                        </div>
                        {options
                            .into_iter()
                            .map(|option| {
                                view! {
                                    <button
                                        type="button"
                                        class="w-full flex items-center px-3 py-2 hover:bg-gray-700 rounded-md text-gray-200 text-sm"
                                        on:click=move |_| pick(option)
                                    >
                                        <span class="mr-2">{option.icon}</span>
                                        {option.label}
                                    </button>
                                }
                            })
                            .collect_view()}
                    </div>
                }
            })
            .collect_view()
    };

    view! {
        <div class="relative">
            <Button attr:r#type="button" on:click=move |_| is_open.update(|o| *o = !*o)>
                "Add Block +"
            </Button>

            <Show when=move || is_open.get() fallback=|| ().into_view()>
                <div class="absolute left-0 mt-2 w-72 bg-gray-800 rounded-lg shadow-xl border border-gray-700 z-50">
                    <div class="p-2 grid grid-cols-3 gap-1 border-b border-gray-700">
                        {featured_view}
                    </div>

                    <div class="p-2 border-b border-gray-700">
                        <Input placeholder="Search blocks..." bind_value=search autofocus=true />
                    </div>

                    <div class="max-h-64 overflow-y-auto">{grouped_view}</div>
                </div>
            </Show>
        </div>
    }
}
