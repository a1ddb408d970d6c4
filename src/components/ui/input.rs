use leptos::prelude::*;
use tw_merge::tw_merge;
use wasm_bindgen::JsCast;

#[component]
pub fn Input(
    #[prop(into, optional)] class: String,
    #[prop(into, optional)] placeholder: String,
    #[prop(into, optional)] name: String,
    #[prop(optional)] autofocus: bool,

    // Two-way binding, wired manually (no `bind:value`).
    #[prop(into)] bind_value: RwSignal<String>,

    /// Fires after `bind_value` took the typed text. Programmatic `set`s don't fire it.
    #[prop(optional)]
    on_user_input: Option<Callback<String>>,
) -> impl IntoView {
    let merged_class = tw_merge!(
        "flex h-9 w-full min-w-0 rounded-md border border-gray-700 bg-gray-900 px-3 py-1 text-sm text-gray-200 placeholder:text-gray-500 outline-none transition-colors",
        "focus-visible:border-blue-500",
        class
    );

    let on_input = move |ev: web_sys::Event| {
        let Some(input) = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
        else {
            return;
        };
        let value = input.value();
        bind_value.set(value.clone());
        if let Some(cb) = on_user_input {
            cb.run(value);
        }
    };

    view! {
        <input
            data-name="Input"
            type="text"
            class=merged_class
            placeholder=placeholder
            name=name
            autofocus=autofocus
            prop:value=move || bind_value.get()
            on:input=on_input
        />
    }
    .into_any()
}
