//! Content model structs for articles and load reports.

use chrono::NaiveDate;
use pressroom_types::{ArticleId, Slug};
use pulldown_cmark::{html, Options, Parser};
use serde::{Deserialize, Serialize};

/// Frontmatter fields recognised in article documents.
///
/// Every field is optional at this stage; required fields are enforced
/// when the frontmatter is turned into [`ArticleMetadata`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frontmatter {
    pub id: Option<String>,
    pub title: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub author: Option<String>,
    pub date: Option<String>,
    pub read_time: Option<String>,
    pub tags: Vec<String>,
    pub image: Option<String>,
}

/// Everything about an article except its body, used by list views
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleMetadata {
    pub id: ArticleId,

    /// Lookup key, derived from the source filename
    pub slug: Slug,

    pub title: String,

    pub description: String,

    pub author: String,

    /// Publication date, serialized as `YYYY-MM-DD`
    pub date: NaiveDate,

    pub read_time: String,

    pub tags: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl ArticleMetadata {
    /// Exact, case-sensitive tag membership
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// A fully parsed article: metadata plus trimmed markdown body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    #[serde(flatten)]
    pub metadata: ArticleMetadata,

    /// Markdown body with surrounding whitespace trimmed
    pub content: String,
}

impl Article {
    pub fn slug(&self) -> &Slug {
        &self.metadata.slug
    }

    /// Render the markdown body to HTML
    pub fn render_html(&self) -> String {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_FOOTNOTES);
        options.insert(Options::ENABLE_STRIKETHROUGH);

        let parser = Parser::new_ext(&self.content, options);
        let mut out = String::with_capacity(self.content.len() * 3 / 2);
        html::push_html(&mut out, parser);
        out
    }
}

/// A document that was discovered but left out of the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedDocument {
    /// Identifier the content source reported for the document
    pub source: String,

    pub slug: Option<Slug>,

    /// Stable machine-readable reason (e.g. "frontmatter.malformed")
    pub code: String,

    pub message: String,
}

/// Summary of the one-time load
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadReport {
    pub discovered: usize,
    pub loaded: usize,
    pub skipped: Vec<SkippedDocument>,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}
