//! Immutable, slug-indexed snapshot of loaded articles.

use crate::models::{Article, ArticleMetadata, LoadReport, SkippedDocument};
use pressroom_types::Slug;
use std::collections::HashMap;

/// Reason code for a document replaced by a later one with the same slug
pub const DUPLICATE_SLUG_CODE: &str = "document.duplicate-slug";

/// Articles keyed by slug, plus their metadata sorted newest first.
///
/// Built once by the loader and never mutated afterwards.
#[derive(Debug, Clone, Default)]
pub struct ArticleStore {
    articles: HashMap<Slug, Article>,
    metadata: Vec<ArticleMetadata>,
    report: LoadReport,
}

impl ArticleStore {
    /// Index `(source, article)` pairs in discovery order.
    ///
    /// A later article with an already-seen slug replaces the earlier one
    /// in both the index and the metadata list, and the replaced document
    /// is recorded in the report as skipped. The metadata list is then
    /// sorted by date, newest first; articles sharing a date keep their
    /// discovery order.
    pub fn from_articles(
        articles: impl IntoIterator<Item = (String, Article)>,
        mut report: LoadReport,
    ) -> Self {
        let mut by_slug: HashMap<Slug, Article> = HashMap::new();
        let mut sources: HashMap<Slug, String> = HashMap::new();
        let mut metadata: Vec<ArticleMetadata> = Vec::new();

        for (source, article) in articles {
            let meta = article.metadata.clone();
            by_slug.insert(meta.slug.clone(), article);

            if let Some(previous) = sources.insert(meta.slug.clone(), source.clone()) {
                tracing::warn!(
                    "Duplicate slug '{}': {} replaces {}",
                    meta.slug,
                    source,
                    previous
                );
                report.skipped.push(SkippedDocument {
                    source: previous,
                    slug: Some(meta.slug.clone()),
                    code: DUPLICATE_SLUG_CODE.to_string(),
                    message: format!(
                        "Slug '{}' is also used by {}, which wins",
                        meta.slug, source
                    ),
                });
                if let Some(existing) = metadata.iter_mut().find(|m| m.slug == meta.slug) {
                    *existing = meta;
                    continue;
                }
            }
            metadata.push(meta);
        }

        metadata.sort_by(|a, b| b.date.cmp(&a.date));
        report.loaded = by_slug.len();

        Self {
            articles: by_slug,
            metadata,
            report,
        }
    }

    /// Every full record, in metadata order
    pub fn all_articles(&self) -> Vec<&Article> {
        self.metadata
            .iter()
            .filter_map(|m| self.articles.get(&m.slug))
            .collect()
    }

    /// Metadata projections, newest first
    pub fn all_metadata(&self) -> &[ArticleMetadata] {
        &self.metadata
    }

    pub fn get(&self, slug: &str) -> Option<&Article> {
        self.articles.get(slug)
    }

    /// Metadata whose tags contain `tag` exactly
    pub fn by_tag(&self, tag: &str) -> Vec<&ArticleMetadata> {
        self.metadata.iter().filter(|m| m.has_tag(tag)).collect()
    }

    /// The first `count` entries of the sorted metadata list
    pub fn recent(&self, count: usize) -> &[ArticleMetadata] {
        &self.metadata[..count.min(self.metadata.len())]
    }

    pub fn report(&self) -> &LoadReport {
        &self.report
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }
}
