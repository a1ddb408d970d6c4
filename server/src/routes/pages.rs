use axum::extract::rejection::FormRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::{Form, Json};
use pagesmith::models::{Page, PageData, PageSummary, SaveResponse};
use serde::Deserialize;
use tracing::{info, warn};

use super::RouteError;
use crate::views;
use crate::AppState;

const NEW_PAGE_TITLE: &str = "New Page";
const UNTITLED_TITLE: &str = "Untitled Page";

/// The editor posts the whole page as one JSON-encoded form field.
#[derive(Debug, Deserialize)]
pub struct SaveForm {
    pub data: Option<String>,
}

fn parse_payload(form: SaveForm) -> Result<Option<PageData>, RouteError> {
    form.data
        .map(|raw| {
            serde_json::from_str::<PageData>(&raw)
                .map_err(|e| RouteError::MalformedPayload(e.to_string()))
        })
        .transpose()
}

async fn summaries(state: &AppState) -> Result<Vec<PageSummary>, RouteError> {
    let pages = state.store.list_pages().await?;
    Ok(pages.iter().map(PageSummary::from).collect())
}

pub async fn index(State(state): State<AppState>) -> Result<Html<String>, RouteError> {
    let pages = summaries(&state).await?;
    Ok(Html(views::render_page_list(&pages)?))
}

/// Browsers land here directly, so a missing page gets an HTML 404 rather
/// than the JSON error body the API routes use.
pub async fn editor(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, RouteError> {
    match state.store.load_page(&id).await.map_err(RouteError::from) {
        Ok(page) => Ok(Html(views::render_editor(&page)?).into_response()),
        Err(RouteError::NotFound(id)) => {
            warn!(page_id = %id, "editor requested for missing page");
            let html = views::render_not_found(&id)?;
            Ok((StatusCode::NOT_FOUND, Html(html)).into_response())
        }
        Err(e) => Err(e),
    }
}

pub async fn save(
    State(state): State<AppState>,
    Path(id): Path<String>,
    form: Result<Form<SaveForm>, FormRejection>,
) -> Result<Json<SaveResponse>, RouteError> {
    let Form(form) = form.map_err(|e| RouteError::MalformedPayload(e.body_text()))?;
    let data = parse_payload(form)?
        .ok_or_else(|| RouteError::MalformedPayload("missing `data` field".to_string()))?;

    let page = state.store.save_page(&id, &data).await?;
    info!(page_id = %page.id, blocks = page.blocks.len(), "page saved");
    Ok(Json(SaveResponse::ok()))
}

/// A bare POST (the "New Page" button) creates an empty page; a `data` field
/// seeds it instead.
pub async fn create(
    State(state): State<AppState>,
    form: Option<Form<SaveForm>>,
) -> Result<Redirect, RouteError> {
    let seeded = match form {
        Some(Form(form)) => parse_payload(form)?,
        None => None,
    };
    let data = match seeded {
        Some(mut data) => {
            if data.title.trim().is_empty() {
                data.title = UNTITLED_TITLE.to_string();
            }
            data
        }
        None => PageData {
            title: NEW_PAGE_TITLE.to_string(),
            ..PageData::default()
        },
    };

    let page = state.store.create_page(&data).await?;
    info!(page_id = %page.id, "page created");
    Ok(Redirect::to(&format!("/pages/{}", page.id)))
}

pub async fn api_list(State(state): State<AppState>) -> Result<Json<Vec<PageSummary>>, RouteError> {
    Ok(Json(summaries(&state).await?))
}

pub async fn api_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Page>, RouteError> {
    Ok(Json(state.store.load_page(&id).await?))
}
