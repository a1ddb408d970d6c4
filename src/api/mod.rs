use crate::models::{Page, PageData, PageSummary, SaveResponse};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum ApiErrorKind {
    NotFound,
    Network,
    Http,
    Parse,
}

#[derive(Clone, Debug)]
pub(crate) struct ApiError {
    pub kind: ApiErrorKind,
    pub message: String,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl ApiError {
    fn network(e: reqwest::Error) -> Self {
        Self {
            kind: ApiErrorKind::Network,
            message: e.to_string(),
        }
    }

    fn parse(e: impl std::fmt::Display) -> Self {
        Self {
            kind: ApiErrorKind::Parse,
            message: e.to_string(),
        }
    }

    fn not_found(path: &str) -> Self {
        Self {
            kind: ApiErrorKind::NotFound,
            message: format!("Not found: {path}"),
        }
    }

    fn http(status: reqwest::StatusCode, body: String, ctx: &str) -> Self {
        Self {
            kind: ApiErrorKind::Http,
            message: format!("{ctx} ({status}): {body}"),
        }
    }

    fn rejected(msg: Option<String>) -> Self {
        Self {
            kind: ApiErrorKind::Http,
            message: msg.unwrap_or_else(|| "Save rejected".to_string()),
        }
    }
}

pub(crate) type ApiResult<T> = Result<T, ApiError>;

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct EnvConfig {
    pub api_url: String,
}

impl EnvConfig {
    pub fn new() -> Self {
        let default_api_url = "http://localhost:3000".to_string();

        let Some(window) = web_sys::window() else {
            return Self {
                api_url: default_api_url,
            };
        };

        // Explicit override: `window.ENV.API_URL` (set by the hosting page).
        if let Some(env) = window.get("ENV") {
            if !env.is_undefined() && env.is_object() {
                if let Ok(api_url) = js_sys::Reflect::get(&env, &"API_URL".into()) {
                    if let Some(url_str) = api_url.as_string() {
                        return Self { api_url: url_str };
                    }
                }
            }
        }

        // The server that served the shell also serves the API.
        if let Ok(origin) = window.location().origin() {
            if !origin.trim().is_empty() && origin != "null" {
                return Self { api_url: origin };
            }
        }

        Self {
            api_url: default_api_url,
        }
    }
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone)]
pub(crate) struct ApiClient {
    pub(crate) base_url: String,
}

impl ApiClient {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_env() -> Self {
        Self::new(EnvConfig::new().api_url)
    }

    pub(crate) fn page_path(page_id: &str) -> String {
        format!("/pages/{}", urlencoding::encode(page_id))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// The editor posts the whole page as one JSON-encoded `data` form field.
    pub(crate) fn save_form(data: &PageData) -> Result<[(&'static str, String); 1], ApiError> {
        let json = serde_json::to_string(data).map_err(ApiError::parse)?;
        Ok([("data", json)])
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let client = reqwest::Client::new();
        let res = client
            .get(self.url(path))
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(ApiError::network)?;

        if res.status().is_success() {
            res.json().await.map_err(ApiError::parse)
        } else if res.status() == reqwest::StatusCode::NOT_FOUND {
            Err(ApiError::not_found(path))
        } else {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            Err(ApiError::http(status, body, "Request failed"))
        }
    }

    pub async fn list_pages(&self) -> ApiResult<Vec<PageSummary>> {
        self.get_json("/api/pages").await
    }

    pub async fn get_page(&self, page_id: &str) -> ApiResult<Page> {
        self.get_json(&format!("/api{}", Self::page_path(page_id)))
            .await
    }

    /// Full replace-save. Fire-and-forget from the editor's point of view: no retry.
    pub async fn save_page(&self, page_id: &str, data: &PageData) -> ApiResult<()> {
        let form = Self::save_form(data)?;
        let client = reqwest::Client::new();
        let res = client
            .post(self.url(&Self::page_path(page_id)))
            .form(&form)
            .send()
            .await
            .map_err(ApiError::network)?;

        let status = res.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ApiError::not_found(&Self::page_path(page_id)));
        }

        // Rejections (bad payload, empty save) still carry a JSON body.
        let text = res.text().await.map_err(ApiError::network)?;
        match serde_json::from_str::<SaveResponse>(&text) {
            Ok(SaveResponse { success: true, .. }) => Ok(()),
            Ok(SaveResponse { error, .. }) => Err(ApiError::rejected(error)),
            Err(_) if !status.is_success() => Err(ApiError::http(status, text, "Save failed")),
            Err(e) => Err(ApiError::parse(e)),
        }
    }
}
