//! One-shot load: discover documents, parse each, build the store.

use crate::frontmatter::{parse_frontmatter, FrontmatterError};
use crate::models::{Article, LoadReport, SkippedDocument};
use crate::source::{ContentSource, DiscoveryError, SourceDocument};
use crate::store::ArticleStore;
use pressroom_types::Slug;
use thiserror::Error;

/// Why a single document was left out of the store
#[derive(Error, Debug)]
pub enum ArticleError {
    #[error("Document is not valid UTF-8: {0}")]
    NotUtf8(#[from] std::str::Utf8Error),

    #[error("Cannot derive a slug from '{0}'")]
    NoSlug(String),

    #[error(transparent)]
    Frontmatter(#[from] FrontmatterError),
}

impl ArticleError {
    /// Stable reason code used in load reports
    pub fn code(&self) -> &'static str {
        match self {
            ArticleError::NotUtf8(_) => "document.not-utf8",
            ArticleError::NoSlug(_) => "document.no-slug",
            ArticleError::Frontmatter(e) => e.code(),
        }
    }
}

/// Parse one document into a full article
pub fn parse_document(document: &SourceDocument) -> Result<Article, ArticleError> {
    let slug = Slug::from_path(&document.path)
        .ok_or_else(|| ArticleError::NoSlug(document.path.clone()))?;
    let text = std::str::from_utf8(&document.contents)?;
    let (frontmatter, body) = parse_frontmatter(text)?;
    let metadata = frontmatter.into_metadata(slug)?;

    Ok(Article {
        metadata,
        content: body,
    })
}

/// Load every document from `source` into an immutable store.
///
/// Only a failure to enumerate the source is returned as an error. A
/// document that fails to parse is logged, recorded in the store's load
/// report and skipped.
pub fn load_articles<S: ContentSource + ?Sized>(source: &S) -> Result<ArticleStore, DiscoveryError> {
    let documents = source.discover()?;

    if documents.is_empty() {
        tracing::warn!("No article documents found in {}", source.describe());
    } else {
        tracing::info!(
            "Found {} article documents in {}",
            documents.len(),
            source.describe()
        );
    }

    let mut report = LoadReport {
        discovered: documents.len(),
        ..LoadReport::default()
    };
    let mut articles = Vec::with_capacity(documents.len());

    for document in &documents {
        match parse_document(document) {
            Ok(article) => {
                tracing::debug!("Parsed '{}' from {}", article.slug(), document.path);
                articles.push((document.path.clone(), article));
            }
            Err(e) => {
                tracing::warn!("Skipping {}: {}", document.path, e);
                report.skipped.push(SkippedDocument {
                    source: document.path.clone(),
                    slug: Slug::from_path(&document.path),
                    code: e.code().to_string(),
                    message: e.to_string(),
                });
            }
        }
    }

    let store = ArticleStore::from_articles(articles, report);
    tracing::info!(
        "Loaded {} articles ({} skipped)",
        store.len(),
        store.report().skipped.len()
    );

    Ok(store)
}
