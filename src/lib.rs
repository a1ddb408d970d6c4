pub mod catalog;
pub mod editor;
pub mod models;

mod api;
mod app;
mod components;
mod pages;
mod state;
mod util;

use leptos::prelude::*;

pub use app::App;

// Needed for `#[wasm_bindgen(start)]` on the wasm entrypoint.
#[cfg(all(target_arch = "wasm32", not(test)))]
use wasm_bindgen::prelude::wasm_bindgen;

// WASM-only tests (run with `cargo test --target wasm32-unknown-unknown` + wasm-bindgen-test-runner)
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use crate::models::{Page, PageSummary};
    use crate::util::take_preloaded;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn install_script(id: &str, json: &str) {
        let doc = web_sys::window()
            .and_then(|w| w.document())
            .expect("document");
        let el = doc.create_element("script").expect("script element");
        el.set_id(id);
        el.set_attribute("type", "application/json").expect("type attr");
        el.set_text_content(Some(json));
        doc.body()
            .expect("body")
            .append_child(&el)
            .expect("append script");
    }

    #[wasm_bindgen_test]
    fn test_take_preloaded_page() {
        install_script(
            "page-data",
            r#"{"id":"p1","title":"A <b>","blocks":[{"id":"b1","type":"paragraph","content":"x","order":0}],"updatedAt":5}"#,
        );

        let page: Page = take_preloaded("page-data").expect("preloaded page");
        assert_eq!(page.id, "p1");
        assert_eq!(page.title, "A <b>");
        assert_eq!(page.blocks.len(), 1);

        // Consumed: a second read falls through to the API.
        assert!(take_preloaded::<Page>("page-data").is_none());
    }

    #[wasm_bindgen_test]
    fn test_take_preloaded_missing_or_garbled() {
        assert!(take_preloaded::<Vec<PageSummary>>("no-such-element").is_none());

        install_script("pages-data", "{not json");
        assert!(take_preloaded::<Vec<PageSummary>>("pages-data").is_none());
    }

    #[wasm_bindgen_test]
    fn test_api_client_from_env_uses_origin() {
        let client = crate::api::ApiClient::from_env();
        let origin = web_sys::window()
            .expect("window")
            .location()
            .origin()
            .expect("origin");
        assert_eq!(client.base_url, origin.trim_end_matches('/'));
    }
}

// Only register the WASM start function for normal builds (not for tests),
// otherwise wasm-bindgen-test will end up with multiple entry symbols.
#[cfg_attr(all(target_arch = "wasm32", not(test)), wasm_bindgen(start))]
pub fn main() {
    console_error_panic_hook::set_once();
    mount_to_body(App);
}
