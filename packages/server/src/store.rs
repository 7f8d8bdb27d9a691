//! In-memory article store.
//!
//! A map keyed by generated UUID. No transactions and no conflict detection:
//! the last write wins. Timestamps handed out by one store are strictly
//! increasing, so `updatedAt` always advances on update and list order is
//! stable.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use folio_editor::{
    normalize_title, Article, ArticleBackend, ArticleDraft, ArticlePatch, BackendError,
};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Article not found: {0}")]
    NotFound(String),
}

impl From<StoreError> for BackendError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(id) => BackendError::NotFound(id),
        }
    }
}

struct StoreState {
    articles: HashMap<String, Article>,
    last_stamp: DateTime<Utc>,
}

impl StoreState {
    fn stamp(&mut self) -> DateTime<Utc> {
        let now = Utc::now();
        self.last_stamp = if now > self.last_stamp {
            now
        } else {
            self.last_stamp + Duration::microseconds(1)
        };
        self.last_stamp
    }
}

/// Shared handle; clones refer to the same articles
#[derive(Clone)]
pub struct ArticleStore {
    state: Arc<RwLock<StoreState>>,
}

impl ArticleStore {
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(StoreState {
                articles: HashMap::new(),
                last_stamp: DateTime::<Utc>::MIN_UTC,
            })),
        }
    }

    /// Every article, most recently updated first
    pub async fn list(&self) -> Vec<Article> {
        let state = self.state.read().await;
        let mut articles: Vec<Article> = state.articles.values().cloned().collect();
        articles.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        articles
    }

    pub async fn get(&self, id: &str) -> Option<Article> {
        self.state.read().await.articles.get(id).cloned()
    }

    pub async fn create(&self, draft: ArticleDraft) -> Article {
        let mut state = self.state.write().await;
        let now = state.stamp();

        let article = Article {
            id: Uuid::new_v4().to_string(),
            title: normalize_title(draft.title),
            blocks: draft.blocks.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        };

        state.articles.insert(article.id.clone(), article.clone());
        article
    }

    /// Merge the given fields and refresh `updated_at`
    pub async fn update(&self, id: &str, patch: ArticlePatch) -> Result<Article, StoreError> {
        let mut state = self.state.write().await;
        let now = state.stamp();

        let article = state
            .articles
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        if let Some(title) = patch.title {
            article.title = normalize_title(Some(title));
        }
        if let Some(blocks) = patch.blocks {
            article.blocks = blocks;
        }
        article.updated_at = now;

        Ok(article.clone())
    }

    pub async fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.state
            .write()
            .await
            .articles
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    pub async fn len(&self) -> usize {
        self.state.read().await.articles.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for ArticleStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ArticleBackend for ArticleStore {
    async fn list_articles(&self) -> Result<Vec<Article>, BackendError> {
        Ok(self.list().await)
    }

    async fn get_article(&self, id: &str) -> Result<Article, BackendError> {
        self.get(id)
            .await
            .ok_or_else(|| BackendError::NotFound(id.to_string()))
    }

    async fn create_article(&self, draft: ArticleDraft) -> Result<Article, BackendError> {
        Ok(self.create(draft).await)
    }

    async fn update_article(
        &self,
        id: &str,
        patch: ArticlePatch,
    ) -> Result<Article, BackendError> {
        Ok(self.update(id, patch).await?)
    }

    async fn delete_article(&self, id: &str) -> Result<(), BackendError> {
        Ok(self.delete(id).await?)
    }
}
