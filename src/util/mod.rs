use serde::de::DeserializeOwned;

#[cfg(target_arch = "wasm32")]
pub(crate) fn now_ms() -> i64 {
    js_sys::Date::now().round() as i64
}

// Native builds (tests, server-side use of the model) have no JS clock.
#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn now_ms() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

/// Short "x ago" label for list views.
pub(crate) fn relative_time(updated_ms: i64, now_ms: i64) -> String {
    let secs = (now_ms - updated_ms).max(0) / 1000;
    match secs {
        0..=59 => "just now".to_string(),
        60..=3599 => format!("{}m ago", secs / 60),
        3600..=86_399 => format!("{}h ago", secs / 3600),
        _ => format!("{}d ago", secs / 86_400),
    }
}

/// Parse JSON the server embedded into the shell (`<script type="application/json">`).
///
/// One-shot: the element is removed, so later in-app navigations fetch fresh
/// data instead of reusing what the shell was served with.
pub(crate) fn take_preloaded<T: DeserializeOwned>(element_id: &str) -> Option<T> {
    let doc = web_sys::window()?.document()?;
    let el = doc.get_element_by_id(element_id)?;
    let text = el.text_content();
    el.remove();
    parse_preloaded(&text?)
}

pub(crate) fn parse_preloaded<T: DeserializeOwned>(text: &str) -> Option<T> {
    if text.trim().is_empty() {
        return None;
    }
    serde_json::from_str(text).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Page;
    use rstest::rstest;

    #[rstest]
    #[case(0, "just now")]
    #[case(59_000, "just now")]
    #[case(120_000, "2m ago")]
    #[case(7_200_000, "2h ago")]
    #[case(3 * 86_400_000, "3d ago")]
    fn test_relative_time(#[case] age_ms: i64, #[case] expected: &str) {
        let now = 10_000_000_000;
        assert_eq!(relative_time(now - age_ms, now), expected);
    }

    #[test]
    fn test_relative_time_clamps_future() {
        assert_eq!(relative_time(2_000, 1_000), "just now");
    }

    #[test]
    fn test_parse_preloaded_page() {
        // The server escapes `<` so markup can't close the script tag.
        let text = r#"{"id":"p1","title":"T","blocks":[{"id":"b","type":"text","content":"<p>hi</p>","order":0}],"updatedAt":5}"#;
        let page: Page = parse_preloaded(text).expect("should parse");
        assert_eq!(page.blocks[0].content, "<p>hi</p>");
    }

    #[test]
    fn test_parse_preloaded_blank_or_bad() {
        assert!(parse_preloaded::<Page>("  ").is_none());
        assert!(parse_preloaded::<Page>("{nope").is_none());
    }

    #[test]
    fn test_now_ms_is_positive() {
        assert!(now_ms() > 0);
    }
}
