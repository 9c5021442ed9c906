//! Shared JSON schema helpers for machine-consumable output.

use pressroom_core::Article;
use serde::Serialize;

pub const SCHEMA_VERSION: &str = "pressroom-v1";

/// Standard envelope for machine-consumable responses.
#[derive(Serialize)]
pub struct Envelope<T> {
    pub schema_version: &'static str,
    pub kind: &'static str,
    pub data: T,
}

pub fn envelope<T>(kind: &'static str, data: T) -> Envelope<T> {
    Envelope {
        schema_version: SCHEMA_VERSION,
        kind,
        data,
    }
}

/// A full article plus its rendered body
#[derive(Serialize)]
pub struct ArticlePayload {
    #[serde(flatten)]
    pub article: Article,
    pub content_html: String,
}

impl From<Article> for ArticlePayload {
    fn from(article: Article) -> Self {
        let content_html = article.render_html();
        Self {
            article,
            content_html,
        }
    }
}
