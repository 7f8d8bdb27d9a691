//! Save / load / autosave against an in-memory backend

use async_trait::async_trait;
use chrono::Utc;
use folio_editor::{
    create_block, load, save, Article, ArticleBackend, ArticleDraft, ArticlePatch, Autosave,
    BackendError, BlockType, EditSession, EditorError, SaveNotice, SharedSession,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Default)]
struct MemoryBackend {
    articles: Mutex<HashMap<String, Article>>,
    creates: AtomicUsize,
    updates: AtomicUsize,
}

#[async_trait]
impl ArticleBackend for MemoryBackend {
    async fn list_articles(&self) -> Result<Vec<Article>, BackendError> {
        Ok(self.articles.lock().unwrap().values().cloned().collect())
    }

    async fn get_article(&self, id: &str) -> Result<Article, BackendError> {
        self.articles
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .ok_or_else(|| BackendError::NotFound(id.to_string()))
    }

    async fn create_article(&self, draft: ArticleDraft) -> Result<Article, BackendError> {
        self.creates.fetch_add(1, Ordering::SeqCst);
        let now = Utc::now();
        let article = Article {
            id: format!("article-{}", self.creates.load(Ordering::SeqCst)),
            title: draft.title.unwrap_or_default(),
            blocks: draft.blocks.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        };
        self.articles
            .lock()
            .unwrap()
            .insert(article.id.clone(), article.clone());
        Ok(article)
    }

    async fn update_article(
        &self,
        id: &str,
        patch: ArticlePatch,
    ) -> Result<Article, BackendError> {
        self.updates.fetch_add(1, Ordering::SeqCst);
        let mut articles = self.articles.lock().unwrap();
        let article = articles
            .get_mut(id)
            .ok_or_else(|| BackendError::NotFound(id.to_string()))?;
        if let Some(title) = patch.title {
            article.title = title;
        }
        if let Some(blocks) = patch.blocks {
            article.blocks = blocks;
        }
        article.updated_at = Utc::now();
        Ok(article.clone())
    }

    async fn delete_article(&self, id: &str) -> Result<(), BackendError> {
        self.articles
            .lock()
            .unwrap()
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| BackendError::NotFound(id.to_string()))
    }
}

struct OfflineBackend;

#[async_trait]
impl ArticleBackend for OfflineBackend {
    async fn list_articles(&self) -> Result<Vec<Article>, BackendError> {
        Err(BackendError::Transport("offline".to_string()))
    }

    async fn get_article(&self, _id: &str) -> Result<Article, BackendError> {
        Err(BackendError::Transport("offline".to_string()))
    }

    async fn create_article(&self, _draft: ArticleDraft) -> Result<Article, BackendError> {
        Err(BackendError::Transport("offline".to_string()))
    }

    async fn update_article(
        &self,
        _id: &str,
        _patch: ArticlePatch,
    ) -> Result<Article, BackendError> {
        Err(BackendError::Transport("offline".to_string()))
    }

    async fn delete_article(&self, _id: &str) -> Result<(), BackendError> {
        Err(BackendError::Transport("offline".to_string()))
    }
}

fn shared(session: EditSession) -> SharedSession {
    Arc::new(tokio::sync::Mutex::new(session))
}

#[tokio::test]
async fn test_first_save_creates_then_updates() {
    let backend = MemoryBackend::default();
    let session = shared(EditSession::new());
    session
        .lock()
        .await
        .add_block(create_block(BlockType::Paragraph), None);

    let first = save(&session, &backend).await.unwrap();
    assert_eq!(session.lock().await.article_id(), Some(first.id.as_str()));
    assert_eq!(first.title, "Untitled Article");

    session.lock().await.set_title("Renamed");
    let second = save(&session, &backend).await.unwrap();

    assert_eq!(second.id, first.id);
    assert_eq!(second.title, "Renamed");
    assert_eq!(backend.creates.load(Ordering::SeqCst), 1);
    assert_eq!(backend.updates.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_load_replaces_document_and_records_history() {
    let backend = MemoryBackend::default();
    let stored = backend
        .create_article(ArticleDraft {
            title: Some("Stored".to_string()),
            blocks: Some(vec![create_block(BlockType::H1), create_block(BlockType::Quote)]),
        })
        .await
        .unwrap();

    let session = shared(EditSession::new());
    load(&session, &backend, &stored.id).await.unwrap();

    let mut session = session.lock().await;
    assert_eq!(session.title(), "Stored");
    assert_eq!(session.blocks(), stored.blocks.as_slice());
    assert_eq!(session.article_id(), Some(stored.id.as_str()));
    assert!(session.undo());
    assert!(session.blocks().is_empty());
}

#[tokio::test]
async fn test_load_missing_article_reports_not_found() {
    let backend = MemoryBackend::default();
    let session = shared(EditSession::new());

    let err = load(&session, &backend, "nope").await.unwrap_err();
    assert!(matches!(
        err,
        EditorError::Backend(BackendError::NotFound(ref id)) if id == "nope"
    ));
    assert!(session.lock().await.article_id().is_none());
}

#[tokio::test(start_paused = true)]
async fn test_autosave_skips_empty_then_saves() {
    let backend = Arc::new(MemoryBackend::default());
    let session = shared(EditSession::new());

    let autosave = Autosave::spawn(session.clone(), backend.clone(), Duration::from_secs(30));
    let mut notices = autosave.subscribe();

    tokio::time::sleep(Duration::from_secs(31)).await;
    assert_eq!(backend.creates.load(Ordering::SeqCst), 0);

    session
        .lock()
        .await
        .add_block(create_block(BlockType::Caption), None);

    match notices.recv().await.unwrap() {
        SaveNotice::Saved { article_id, .. } => {
            assert_eq!(session.lock().await.article_id(), Some(article_id.as_str()));
        }
        other => panic!("Expected a successful save, got {:?}", other),
    }

    match notices.recv().await.unwrap() {
        SaveNotice::Saved { .. } => {}
        other => panic!("Expected a successful save, got {:?}", other),
    }
    assert_eq!(backend.creates.load(Ordering::SeqCst), 1);
    assert_eq!(backend.updates.load(Ordering::SeqCst), 1);

    autosave.stop();
}

#[tokio::test(start_paused = true)]
async fn test_autosave_failure_does_not_stop_task() {
    let session = shared(EditSession::new());
    session
        .lock()
        .await
        .add_block(create_block(BlockType::Paragraph), None);

    let autosave = Autosave::spawn(session.clone(), Arc::new(OfflineBackend), Duration::from_secs(5));
    let mut notices = autosave.subscribe();

    for _ in 0..2 {
        match notices.recv().await.unwrap() {
            SaveNotice::Failed { reason } => assert!(reason.contains("offline")),
            other => panic!("Expected a failure notice, got {:?}", other),
        }
    }

    // Editing still works while saves fail
    session
        .lock()
        .await
        .add_block(create_block(BlockType::H4), None);
    assert_eq!(session.lock().await.blocks().len(), 2);
}
