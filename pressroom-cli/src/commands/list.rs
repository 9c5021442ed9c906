//! Metadata listings: all articles, by tag, most recent.

use crate::envelope::envelope;
use anyhow::{Context, Result};
use pressroom_core::{ArticleMetadata, ArticleRepository};

/// Print metadata for every article, newest first
pub async fn list_articles(repo: &ArticleRepository, json: bool) -> Result<()> {
    let metadata = repo
        .all_metadata()
        .await
        .context("Failed to load articles")?;
    print_metadata("article.list", &metadata, json)
}

/// Print metadata for articles tagged exactly `tag`
pub async fn tagged_articles(repo: &ArticleRepository, tag: &str, json: bool) -> Result<()> {
    let metadata = repo
        .articles_by_tag(tag)
        .await
        .context("Failed to load articles")?;

    if metadata.is_empty() && !json {
        println!("No articles tagged '{}'", tag);
        return Ok(());
    }
    print_metadata("article.list", &metadata, json)
}

/// Print the `count` most recent articles
pub async fn recent_articles(repo: &ArticleRepository, count: usize, json: bool) -> Result<()> {
    let metadata = repo
        .recent_articles(count)
        .await
        .context("Failed to load articles")?;
    print_metadata("article.recent", &metadata, json)
}

fn print_metadata(kind: &'static str, metadata: &[ArticleMetadata], json: bool) -> Result<()> {
    if json {
        let payload = envelope(kind, metadata);
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    for meta in metadata {
        println!("{}", format_line(meta));
    }
    Ok(())
}

fn format_line(meta: &ArticleMetadata) -> String {
    let tags = if meta.tags.is_empty() {
        String::new()
    } else {
        format!("  [{}]", meta.tags.join(", "))
    };
    format!("{}  {:<36} {}{}", meta.date, meta.slug, meta.title, tags)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ArticleMetadata {
        serde_json::from_value(serde_json::json!({
            "id": "7",
            "slug": "launch",
            "title": "Launch",
            "description": "d",
            "author": "a",
            "date": "2024-09-20",
            "readTime": "1 min",
            "tags": ["product", "news"]
        }))
        .unwrap()
    }

    #[test]
    fn test_format_line() {
        let line = format_line(&sample());
        assert!(line.starts_with("2024-09-20  launch"));
        assert!(line.ends_with("Launch  [product, news]"));
    }

    #[test]
    fn test_format_line_without_tags() {
        let mut meta = sample();
        meta.tags.clear();
        assert!(format_line(&meta).ends_with("Launch"));
    }
}
