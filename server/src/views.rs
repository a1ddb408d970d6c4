//! HTML shells for the client app.
//!
//! Each shell embeds the data its view needs as a JSON script element, so the
//! first paint does not wait on an API round-trip.

use askama::Template;
use pagesmith::models::{Page, PageSummary};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ViewError {
    #[error("failed to encode preload data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to render template: {0}")]
    Template(#[from] askama::Error),
}

/// JSON safe to place inside `<script type="application/json">`.
///
/// Block content is raw markup, so a literal `</script>` in it would end the
/// element early; `<` is written as its JSON unicode escape instead.
pub fn preload_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    Ok(serde_json::to_string(value)?.replace('<', "\\u003c"))
}

fn format_updated(updated_ms: i64) -> String {
    chrono::DateTime::from_timestamp_millis(updated_ms)
        .map(|t| t.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_default()
}

struct ListRow {
    id: String,
    title: String,
    block_count: usize,
    updated: String,
}

#[derive(Template)]
#[template(path = "page_list.html")]
struct PageListTemplate {
    preload: String,
    rows: Vec<ListRow>,
}

#[derive(Template)]
#[template(path = "editor.html")]
struct EditorTemplate<'a> {
    title: &'a str,
    preload: String,
}

#[derive(Template)]
#[template(path = "not_found.html")]
struct NotFoundTemplate<'a> {
    id: &'a str,
}

pub fn render_page_list(pages: &[PageSummary]) -> Result<String, ViewError> {
    let rows = pages
        .iter()
        .map(|p| ListRow {
            id: p.id.clone(),
            title: if p.title.trim().is_empty() {
                "Untitled Page".to_string()
            } else {
                p.title.clone()
            },
            block_count: p.block_count,
            updated: format_updated(p.updated_at),
        })
        .collect();

    let template = PageListTemplate {
        preload: preload_json(&pages)?,
        rows,
    };
    Ok(template.render()?)
}

pub fn render_editor(page: &Page) -> Result<String, ViewError> {
    let title = if page.title.trim().is_empty() {
        "Untitled Page"
    } else {
        page.title.as_str()
    };

    let template = EditorTemplate {
        title,
        preload: preload_json(page)?,
    };
    Ok(template.render()?)
}

pub fn render_not_found(id: &str) -> Result<String, ViewError> {
    Ok(NotFoundTemplate { id }.render()?)
}
