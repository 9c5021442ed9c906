//! Async article repository gated on a one-time load.
//!
//! [`ArticleRepository::new`] starts loading immediately on a blocking
//! Tokio task. Every accessor waits for that load to finish, so callers
//! never observe a partially built store. The load runs exactly once: a
//! discovery failure is final and every read reports it.

use crate::loader::load_articles;
use crate::models::{Article, ArticleMetadata, LoadReport};
use crate::source::{ContentSource, DiscoveryError};
use crate::store::ArticleStore;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::watch;

/// Number of entries `recent_articles` returns when callers have no preference
pub const DEFAULT_RECENT_COUNT: usize = 3;

#[derive(Error, Debug, Clone)]
pub enum RepositoryError {
    #[error("Failed to discover articles: {0}")]
    Discovery(Arc<DiscoveryError>),

    #[error("Article loader stopped before publishing a result")]
    LoaderStopped,
}

/// Coarse lifecycle state, for callers that render a loading indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    Loading,
    Ready,
    Failed,
}

#[derive(Debug, Clone)]
enum LoadState {
    Loading,
    Ready(Arc<ArticleStore>),
    Failed(Arc<DiscoveryError>),
}

/// Read-only article queries over a store that is loaded once.
///
/// Cloning is cheap; clones share the same load.
#[derive(Debug, Clone)]
pub struct ArticleRepository {
    state: watch::Receiver<LoadState>,
}

impl ArticleRepository {
    /// Start loading `source` in the background.
    ///
    /// # Panics
    ///
    /// Panics when called outside a Tokio runtime.
    pub fn new<S>(source: S) -> Self
    where
        S: ContentSource + 'static,
    {
        let (tx, rx) = watch::channel(LoadState::Loading);

        tokio::task::spawn_blocking(move || {
            let next = match load_articles(&source) {
                Ok(store) => LoadState::Ready(Arc::new(store)),
                Err(e) => {
                    tracing::error!("Article discovery failed for {}: {}", source.describe(), e);
                    LoadState::Failed(Arc::new(e))
                }
            };
            // Nobody listening is fine: all handles were dropped.
            let _ = tx.send(next);
        });

        Self { state: rx }
    }

    /// Wrap a store that is already loaded
    pub fn from_store(store: ArticleStore) -> Self {
        let (_tx, rx) = watch::channel(LoadState::Ready(Arc::new(store)));
        Self { state: rx }
    }

    /// Current lifecycle state, without waiting
    pub fn status(&self) -> LoadStatus {
        match &*self.state.borrow() {
            LoadState::Loading => LoadStatus::Loading,
            LoadState::Ready(_) => LoadStatus::Ready,
            LoadState::Failed(_) => LoadStatus::Failed,
        }
    }

    /// Wait for the load to finish and return the snapshot
    pub async fn store(&self) -> Result<Arc<ArticleStore>, RepositoryError> {
        let mut rx = self.state.clone();
        let state = rx
            .wait_for(|state| !matches!(state, LoadState::Loading))
            .await
            .map_err(|_| RepositoryError::LoaderStopped)?;

        match &*state {
            LoadState::Ready(store) => Ok(Arc::clone(store)),
            LoadState::Failed(e) => Err(RepositoryError::Discovery(Arc::clone(e))),
            LoadState::Loading => Err(RepositoryError::LoaderStopped),
        }
    }

    /// Every article with its body. Order is not part of the contract.
    pub async fn all_articles(&self) -> Result<Vec<Article>, RepositoryError> {
        let store = self.store().await?;
        Ok(store.all_articles().into_iter().cloned().collect())
    }

    /// Metadata for every article, newest first
    pub async fn all_metadata(&self) -> Result<Vec<ArticleMetadata>, RepositoryError> {
        let store = self.store().await?;
        Ok(store.all_metadata().to_vec())
    }

    /// The article stored under `slug`, if any
    pub async fn article_by_slug(&self, slug: &str) -> Result<Option<Article>, RepositoryError> {
        let store = self.store().await?;
        Ok(store.get(slug).cloned())
    }

    /// Metadata for articles tagged exactly `tag`, newest first
    pub async fn articles_by_tag(&self, tag: &str) -> Result<Vec<ArticleMetadata>, RepositoryError> {
        let store = self.store().await?;
        Ok(store.by_tag(tag).into_iter().cloned().collect())
    }

    /// The `count` most recent articles; fewer when the store is smaller
    pub async fn recent_articles(&self, count: usize) -> Result<Vec<ArticleMetadata>, RepositoryError> {
        let store = self.store().await?;
        Ok(store.recent(count).to_vec())
    }

    /// Outcome of the load: counts and skipped documents
    pub async fn load_report(&self) -> Result<LoadReport, RepositoryError> {
        let store = self.store().await?;
        Ok(store.report().clone())
    }
}
