//! REST surface for articles.
//!
//! | Method | Path                | Success | Failure  |
//! |--------|---------------------|---------|----------|
//! | GET    | `/api/articles`     | 200     | 500      |
//! | GET    | `/api/articles/:id` | 200     | 404      |
//! | POST   | `/api/articles`     | 201     | 400      |
//! | PATCH  | `/api/articles/:id` | 200     | 404, 400 |
//! | DELETE | `/api/articles/:id` | 204     | 404      |

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use folio_editor::{validate_forest, Article, ArticleDraft, ArticlePatch, Block, TreeIssue};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::any::Any;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::config::ServerConfig;
use crate::store::{ArticleStore, StoreError};

/// Errors surfaced by the API, each with its HTTP status
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid article data")]
    Validation(Vec<Value>),

    #[error("Article not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(details) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "Invalid article data", "details": details })),
            )
                .into_response(),
            ApiError::NotFound(_) => (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": "Article not found" })),
            )
                .into_response(),
            ApiError::Internal(detail) => {
                error!("Internal error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Internal server error" })),
                )
                    .into_response()
            }
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Validation(vec![json!({
            "issue": "malformedBody",
            "message": e.to_string(),
        })])
    }
}

impl From<Vec<TreeIssue>> for ApiError {
    fn from(issues: Vec<TreeIssue>) -> Self {
        ApiError::Validation(
            issues
                .iter()
                .map(|issue| {
                    serde_json::to_value(issue).unwrap_or_else(|_| Value::String(issue.to_string()))
                })
                .collect(),
        )
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(id) => ApiError::NotFound(id),
        }
    }
}

/// An absent or blank body reads as `{}`
fn parse_body<T: DeserializeOwned + Default>(body: &Bytes) -> Result<T, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    Ok(serde_json::from_slice(body)?)
}

fn check_blocks(blocks: Option<&Vec<Block>>) -> Result<(), ApiError> {
    match blocks {
        Some(blocks) => validate_forest(blocks).map_err(ApiError::from),
        None => Ok(()),
    }
}

/// API routes over the given store
pub fn router(store: ArticleStore) -> Router {
    Router::new()
        .route("/api/articles", get(list_articles).post(create_article))
        .route(
            "/api/articles/:id",
            get(get_article).patch(update_article).delete(delete_article),
        )
        .with_state(store)
}

/// Full application: API, optional static client, CORS, tracing and panic guard
pub fn app(store: ArticleStore, config: &ServerConfig) -> Router {
    let mut app = router(store);

    if let Some(static_dir) = &config.static_dir {
        info!("Serving static files from {}", static_dir.display());
        app = app.fallback_service(ServeDir::new(static_dir).append_index_html_on_directories(true));
    }

    if config.cors {
        app = app.layer(CorsLayer::permissive());
    }

    app.layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(handle_panic))
}

fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    ApiError::Internal(detail).into_response()
}

async fn list_articles(State(store): State<ArticleStore>) -> Json<Vec<Article>> {
    Json(store.list().await)
}

async fn get_article(
    State(store): State<ArticleStore>,
    Path(id): Path<String>,
) -> Result<Json<Article>, ApiError> {
    let article = store.get(&id).await;
    article.map(Json).ok_or(ApiError::NotFound(id))
}

async fn create_article(
    State(store): State<ArticleStore>,
    body: Bytes,
) -> Result<(StatusCode, Json<Article>), ApiError> {
    let draft: ArticleDraft = parse_body(&body)?;
    check_blocks(draft.blocks.as_ref())?;

    let article = store.create(draft).await;
    info!(article_id = %article.id, "Created article");
    Ok((StatusCode::CREATED, Json(article)))
}

async fn update_article(
    State(store): State<ArticleStore>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<Article>, ApiError> {
    let patch: ArticlePatch = parse_body(&body)?;
    check_blocks(patch.blocks.as_ref())?;

    let article = store.update(&id, patch).await?;
    info!(article_id = %article.id, "Updated article");
    Ok(Json(article))
}

async fn delete_article(
    State(store): State<ArticleStore>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    store.delete(&id).await?;
    info!(article_id = %id, "Deleted article");
    Ok(StatusCode::NO_CONTENT)
}
