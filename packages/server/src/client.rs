//! [`ArticleBackend`] over the REST API.

use async_trait::async_trait;
use axum::body::{Body, Bytes};
use folio_editor::{Article, ArticleBackend, ArticleDraft, ArticlePatch, BackendError};
use hyper::{header, Method, Request, StatusCode};
use hyper_util::client::legacy::{connect::HttpConnector, Client};
use hyper_util::rt::TokioExecutor;
use serde::de::DeserializeOwned;
use tracing::debug;

/// Talks to a running `folio-server`
#[derive(Clone)]
pub struct HttpBackend {
    client: Client<HttpConnector, Body>,
    base_url: String,
}

impl HttpBackend {
    /// `base_url` is the server root, e.g. `http://127.0.0.1:5000`
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: Client::builder(TokioExecutor::new()).build_http(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        json: Option<String>,
    ) -> Result<(StatusCode, Bytes), BackendError> {
        let uri = format!("{}{}", self.base_url, path);
        let mut builder = Request::builder().method(method.clone()).uri(&uri);

        let body = match json {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json)
            }
            None => Body::empty(),
        };

        let request = builder
            .body(body)
            .map_err(|e| BackendError::Transport(e.to_string()))?;

        let response = self
            .client
            .request(request)
            .await
            .map_err(|e| BackendError::Transport(e.to_string()))?;

        let status = response.status();
        let bytes = axum::body::to_bytes(Body::new(response.into_body()), usize::MAX)
            .await
            .map_err(|e| BackendError::Transport(e.to_string()))?;

        debug!(%method, uri, %status, "Backend response");
        Ok((status, bytes))
    }
}

/// Ids are percent-encoded as a single path segment
fn article_path(id: &str) -> String {
    format!("/api/articles/{}", urlencoding::encode(id))
}

fn encode<T: serde::Serialize>(value: &T) -> Result<String, BackendError> {
    serde_json::to_string(value).map_err(|e| BackendError::Invalid(e.to_string()))
}

fn decode<T: DeserializeOwned>(
    status: StatusCode,
    bytes: &Bytes,
    id: &str,
) -> Result<T, BackendError> {
    match status {
        s if s.is_success() => {
            serde_json::from_slice(bytes).map_err(|e| BackendError::Unexpected(e.to_string()))
        }
        other => Err(status_error(other, bytes, id)),
    }
}

fn status_error(status: StatusCode, bytes: &Bytes, id: &str) -> BackendError {
    let body = String::from_utf8_lossy(bytes).into_owned();
    match status {
        StatusCode::NOT_FOUND => BackendError::NotFound(id.to_string()),
        StatusCode::BAD_REQUEST => BackendError::Invalid(body),
        other => BackendError::Unexpected(format!("{}: {}", other, body)),
    }
}

#[async_trait]
impl ArticleBackend for HttpBackend {
    async fn list_articles(&self) -> Result<Vec<Article>, BackendError> {
        let (status, bytes) = self.send(Method::GET, "/api/articles", None).await?;
        decode(status, &bytes, "")
    }

    async fn get_article(&self, id: &str) -> Result<Article, BackendError> {
        let path = article_path(id);
        let (status, bytes) = self.send(Method::GET, &path, None).await?;
        decode(status, &bytes, id)
    }

    async fn create_article(&self, draft: ArticleDraft) -> Result<Article, BackendError> {
        let body = encode(&draft)?;
        let (status, bytes) = self.send(Method::POST, "/api/articles", Some(body)).await?;
        decode(status, &bytes, "")
    }

    async fn update_article(
        &self,
        id: &str,
        patch: ArticlePatch,
    ) -> Result<Article, BackendError> {
        let path = article_path(id);
        let body = encode(&patch)?;
        let (status, bytes) = self.send(Method::PATCH, &path, Some(body)).await?;
        decode(status, &bytes, id)
    }

    async fn delete_article(&self, id: &str) -> Result<(), BackendError> {
        let path = article_path(id);
        let (status, bytes) = self.send(Method::DELETE, &path, None).await?;
        if status == StatusCode::NO_CONTENT {
            Ok(())
        } else {
            Err(status_error(status, &bytes, id))
        }
    }
}
