//! # Persistence
//!
//! Client side of article storage: the backend contract, save/load against
//! it, and a recurring autosave task.
//!
//! ## Save semantics
//!
//! ```text
//! no article id yet  →  create  →  remember the assigned id
//! article id known   →  update (PATCH) that id
//! ```
//!
//! Saves are not serialized against each other. If a manual save and an
//! autosave race, the last response wins; only an id that is still unset is
//! ever written back into the session.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::document::{Article, ArticleDraft, ArticlePatch};
use crate::errors::{BackendError, EditorError};
use crate::session::EditSession;

pub const AUTOSAVE_INTERVAL: Duration = Duration::from_secs(30);

/// Session handle shared between the UI and the autosave task
pub type SharedSession = Arc<Mutex<EditSession>>;

/// Article storage as seen by the editor
#[async_trait]
pub trait ArticleBackend: Send + Sync {
    /// All articles, most recently updated first
    async fn list_articles(&self) -> Result<Vec<Article>, BackendError>;

    async fn get_article(&self, id: &str) -> Result<Article, BackendError>;

    async fn create_article(&self, draft: ArticleDraft) -> Result<Article, BackendError>;

    async fn update_article(&self, id: &str, patch: ArticlePatch)
        -> Result<Article, BackendError>;

    async fn delete_article(&self, id: &str) -> Result<(), BackendError>;
}

/// Outcome of a background save, for user notification
#[derive(Debug, Clone, PartialEq)]
pub enum SaveNotice {
    Saved {
        article_id: String,
        updated_at: DateTime<Utc>,
    },
    Failed {
        reason: String,
    },
}

/// Send the session's title and blocks to the backend
pub async fn save<B>(session: &SharedSession, backend: &B) -> Result<Article, EditorError>
where
    B: ArticleBackend + ?Sized,
{
    let (title, blocks, article_id) = {
        let session = session.lock().await;
        (
            session.title().to_string(),
            session.blocks().to_vec(),
            session.article_id().map(str::to_string),
        )
    };

    let saved = match article_id {
        Some(id) => {
            let patch = ArticlePatch {
                title: Some(title),
                blocks: Some(blocks),
            };
            backend.update_article(&id, patch).await?
        }
        None => {
            let draft = ArticleDraft {
                title: Some(title),
                blocks: Some(blocks),
            };
            backend.create_article(draft).await?
        }
    };

    {
        let mut session = session.lock().await;
        if session.article_id().is_none() {
            session.set_article_id(saved.id.clone());
        }
    }

    info!(article_id = %saved.id, "Saved article");
    Ok(saved)
}

/// Fetch an article and make it the session's current document
pub async fn load<B>(session: &SharedSession, backend: &B, id: &str) -> Result<(), EditorError>
where
    B: ArticleBackend + ?Sized,
{
    let article = backend.get_article(id).await?;
    let mut session = session.lock().await;
    session.load_article(article)?;
    info!(article_id = id, "Loaded article");
    Ok(())
}

/// Background task saving the session on a fixed period.
///
/// Empty forests are skipped. Failures are published and logged; the task
/// keeps running. Dropping the handle stops the task.
pub struct Autosave {
    handle: JoinHandle<()>,
    notices: broadcast::Sender<SaveNotice>,
}

impl Autosave {
    pub fn spawn(session: SharedSession, backend: Arc<dyn ArticleBackend>, period: Duration) -> Self {
        let (notices, _) = broadcast::channel(16);
        let tx = notices.clone();

        let handle = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;

                if session.lock().await.blocks().is_empty() {
                    debug!("Autosave skipped: nothing to save");
                    continue;
                }

                let notice = match save(&session, backend.as_ref()).await {
                    Ok(article) => SaveNotice::Saved {
                        article_id: article.id,
                        updated_at: article.updated_at,
                    },
                    Err(e) => {
                        warn!(error = %e, "Autosave failed");
                        SaveNotice::Failed {
                            reason: e.to_string(),
                        }
                    }
                };

                // No subscribers is fine
                let _ = tx.send(notice);
            }
        });

        Self { handle, notices }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SaveNotice> {
        self.notices.subscribe()
    }

    pub fn stop(self) {
        drop(self);
    }
}

impl Drop for Autosave {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
