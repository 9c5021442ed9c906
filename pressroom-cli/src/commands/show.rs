//! Fetch a single article.

use crate::envelope::{envelope, ArticlePayload};
use crate::ArticleFormat;
use anyhow::{Context, Result};
use pressroom_core::frontmatter::render_document;
use pressroom_core::ArticleRepository;

/// Fetch one article by slug and print it in the requested format.
pub async fn show_article(
    repo: &ArticleRepository,
    slug: &str,
    format: ArticleFormat,
) -> Result<()> {
    let article = repo
        .article_by_slug(slug.trim())
        .await
        .context("Failed to load articles")?
        .with_context(|| format!("Article '{}' not found", slug))?;

    match format {
        ArticleFormat::Json => {
            let payload = envelope("article.full", ArticlePayload::from(article));
            println!("{}", serde_json::to_string_pretty(&payload)?);
        }
        ArticleFormat::Markdown => {
            print!("{}", render_document(&article));
        }
        ArticleFormat::Html => {
            println!("{}", article.render_html());
        }
        ArticleFormat::Raw => {
            println!("{}", article.content);
        }
    }

    Ok(())
}
