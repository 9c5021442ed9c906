//! Frontmatter parsing from article documents.
//!
//! The metadata block is a flat list of `key: value` lines between two
//! `---` delimiters at the very start of the document. It looks like YAML
//! but is not: there is no nesting, no multi-line values and no escaping
//! beyond stripping a pair of double quotes.

use crate::models::{Article, ArticleMetadata, Frontmatter};
use chrono::NaiveDate;
use pressroom_types::{ArticleId, Slug};
use regex::Regex;
use std::borrow::Cow;
use std::sync::OnceLock;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FrontmatterError {
    #[error("Document does not start with a ---delimited metadata block")]
    Malformed,

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid date '{value}' (expected YYYY-MM-DD): {source}")]
    InvalidDate {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}

impl FrontmatterError {
    /// Stable reason code used in load reports
    pub fn code(&self) -> &'static str {
        match self {
            FrontmatterError::Malformed => "frontmatter.malformed",
            FrontmatterError::MissingField(_) => "frontmatter.missing-field",
            FrontmatterError::InvalidDate { .. } => "frontmatter.invalid-date",
        }
    }
}

/// A parsed metadata value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Scalar(String),
    List(Vec<String>),
}

static FRONTMATTER_REGEX: OnceLock<Regex> = OnceLock::new();

fn frontmatter_regex() -> &'static Regex {
    FRONTMATTER_REGEX.get_or_init(|| Regex::new(r"(?s)\A---\n(.*?)\n---(?:\n(.*))?\z").unwrap())
}

/// Parse frontmatter from an article document
///
/// Returns a tuple of (frontmatter, body) where the body has leading and
/// trailing whitespace removed. Unlike a lenient markdown reader, a
/// document without the delimited block is an error.
///
/// # Example
///
/// ```
/// use pressroom_core::frontmatter::parse_frontmatter;
///
/// let content = "---\ntitle: \"Hello\"\ntags: [a, b]\n---\n\nBody\n";
///
/// let (fm, body) = parse_frontmatter(content).unwrap();
/// assert_eq!(fm.title.as_deref(), Some("Hello"));
/// assert_eq!(fm.tags, vec!["a", "b"]);
/// assert_eq!(body, "Body");
/// ```
pub fn parse_frontmatter(content: &str) -> Result<(Frontmatter, String), FrontmatterError> {
    let normalized: Cow<'_, str> = if content.contains("\r\n") {
        Cow::Owned(content.replace("\r\n", "\n"))
    } else {
        Cow::Borrowed(content)
    };

    let captures = frontmatter_regex()
        .captures(&normalized)
        .ok_or(FrontmatterError::Malformed)?;
    let block = captures.get(1).map_or("", |m| m.as_str());
    let body = captures.get(2).map_or("", |m| m.as_str());

    let mut frontmatter = Frontmatter::default();
    for (key, raw) in parse_fields(block) {
        frontmatter.assign(key, raw);
    }

    Ok((frontmatter, body.trim().to_string()))
}

/// Split metadata lines into ordered key/raw-value pairs.
///
/// Each line is split on its first `:`. Blank lines and lines without a
/// colon are ignored. Later duplicates are kept; the caller decides which
/// wins. Values are returned untrimmed; how they are read depends on the
/// key.
pub fn parse_fields(block: &str) -> Vec<(&str, &str)> {
    block
        .lines()
        .filter_map(|line| {
            let (key, value) = line.split_once(':')?;
            let key = key.trim();
            if key.is_empty() {
                return None;
            }
            Some((key, value))
        })
        .collect()
}

/// Interpret a raw list-capable metadata value
///
/// `[a, b]` becomes a list of trimmed items, `"x"` loses its quotes,
/// anything else is taken verbatim after trimming.
pub fn parse_value(raw: &str) -> FieldValue {
    let value = raw.trim();

    if let Some(inner) = value.strip_prefix('[').and_then(|v| v.strip_suffix(']')) {
        let items = inner
            .split(',')
            .map(|item| strip_quotes(item.trim()).to_string())
            .filter(|item| !item.is_empty())
            .collect();
        return FieldValue::List(items);
    }

    FieldValue::Scalar(strip_quotes(value).to_string())
}

/// Interpret a raw scalar metadata value: trimmed, one pair of quotes removed
pub fn scalar_value(raw: &str) -> &str {
    strip_quotes(raw.trim())
}

fn strip_quotes(value: &str) -> &str {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        &value[1..value.len() - 1]
    } else {
        value
    }
}

/// Parse a canonical `YYYY-MM-DD` date. Zero padding is optional.
pub fn parse_date(raw: &str) -> Result<NaiveDate, FrontmatterError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|source| {
        FrontmatterError::InvalidDate {
            value: raw.to_string(),
            source,
        }
    })
}

impl Frontmatter {
    /// Store a raw value under its schema field.
    ///
    /// Only `tags` understands list syntax; every other field keeps the
    /// value as text, brackets included.
    pub fn assign(&mut self, key: &str, raw: &str) {
        let slot = match key {
            "id" => &mut self.id,
            "title" => &mut self.title,
            "slug" => &mut self.slug,
            "description" => &mut self.description,
            "author" => &mut self.author,
            "date" => &mut self.date,
            "readTime" | "read_time" => &mut self.read_time,
            "image" | "imageUrl" => &mut self.image,
            "tags" => {
                self.tags = match parse_value(raw) {
                    FieldValue::List(items) => items,
                    FieldValue::Scalar(tag) if tag.is_empty() => Vec::new(),
                    FieldValue::Scalar(tag) => vec![tag],
                };
                return;
            }
            _ => {
                tracing::warn!("Ignoring unknown frontmatter key '{}'", key);
                return;
            }
        };

        *slot = Some(scalar_value(raw).to_string());
    }

    /// Validate required fields and build the metadata projection.
    ///
    /// `slug` comes from the document's filename and always wins over an
    /// explicit `slug` key.
    pub fn into_metadata(self, slug: Slug) -> Result<ArticleMetadata, FrontmatterError> {
        let title = required(self.title, "title")?;
        let description = required(self.description, "description")?;
        let date = parse_date(&required(self.date, "date")?)?;

        if let Some(explicit) = self.slug.as_deref() {
            if explicit != slug.as_str() {
                tracing::warn!(
                    "Frontmatter slug '{}' ignored; using filename slug '{}'",
                    explicit,
                    slug
                );
            }
        }

        Ok(ArticleMetadata {
            id: ArticleId::new(self.id.unwrap_or_default()),
            slug,
            title,
            description,
            author: self.author.unwrap_or_default(),
            date,
            read_time: self.read_time.unwrap_or_default(),
            tags: self.tags,
            image: self.image,
        })
    }
}

/// Render an article back into its source format
///
/// Every scalar is wrapped in one pair of quotes. The parser strips
/// exactly one pair, so any stored value reads back unchanged.
pub fn render_document(article: &Article) -> String {
    let meta = &article.metadata;
    let mut out = String::from("---\n");

    if !meta.id.as_str().is_empty() {
        push_scalar(&mut out, "id", meta.id.as_str());
    }
    push_scalar(&mut out, "title", &meta.title);
    push_scalar(&mut out, "description", &meta.description);
    if !meta.author.is_empty() {
        push_scalar(&mut out, "author", &meta.author);
    }
    out.push_str(&format!("date: {}\n", meta.date.format("%Y-%m-%d")));
    if !meta.read_time.is_empty() {
        push_scalar(&mut out, "readTime", &meta.read_time);
    }
    out.push_str(&format!("tags: [{}]\n", meta.tags.join(", ")));
    if let Some(image) = &meta.image {
        push_scalar(&mut out, "image", image);
    }

    out.push_str("---\n");
    out.push_str(&article.content);
    out.push('\n');
    out
}

fn push_scalar(out: &mut String, key: &str, value: &str) {
    out.push_str(&format!("{}: \"{}\"\n", key, value));
}

fn required(value: Option<String>, field: &'static str) -> Result<String, FrontmatterError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(FrontmatterError::MissingField(field)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HELLO: &str = r#"---
id: 1
title: "Hello World"
description: A test post
author: Jane
date: 2024-03-01
readTime: 2 min
tags: [test, demo]
---
Body text here."#;

    #[test]
    fn test_parse_full_frontmatter() {
        let (fm, body) = parse_frontmatter(HELLO).unwrap();
        assert_eq!(fm.id.as_deref(), Some("1"));
        assert_eq!(fm.title.as_deref(), Some("Hello World"));
        assert_eq!(fm.description.as_deref(), Some("A test post"));
        assert_eq!(fm.author.as_deref(), Some("Jane"));
        assert_eq!(fm.date.as_deref(), Some("2024-03-01"));
        assert_eq!(fm.read_time.as_deref(), Some("2 min"));
        assert_eq!(fm.tags, vec!["test", "demo"]);
        assert_eq!(body, "Body text here.");
    }

    #[test]
    fn test_body_is_trimmed() {
        let content = "---\ntitle: T\n---\n\n\n  # Heading\n\nText\n\n";
        let (_, body) = parse_frontmatter(content).unwrap();
        assert_eq!(body, "# Heading\n\nText");
    }

    #[test]
    fn test_missing_block_is_malformed() {
        let result = parse_frontmatter("# Just Content\n\nNo frontmatter here.");
        assert!(matches!(result, Err(FrontmatterError::Malformed)));
    }

    #[test]
    fn test_unclosed_block_is_malformed() {
        let result = parse_frontmatter("---\ntitle: T\ndescription: D\n\nBody");
        assert!(matches!(result, Err(FrontmatterError::Malformed)));
    }

    #[test]
    fn test_block_must_start_document() {
        let result = parse_frontmatter("\n---\ntitle: T\n---\nBody");
        assert!(matches!(result, Err(FrontmatterError::Malformed)));
    }

    #[test]
    fn test_closing_delimiter_at_end_of_document() {
        let (fm, body) = parse_frontmatter("---\ntitle: T\n---").unwrap();
        assert_eq!(fm.title.as_deref(), Some("T"));
        assert_eq!(body, "");
    }

    #[test]
    fn test_crlf_line_endings() {
        let content = "---\r\ntitle: Windows\r\ndescription: D\r\n---\r\nBody\r\n";
        let (fm, body) = parse_frontmatter(content).unwrap();
        assert_eq!(fm.title.as_deref(), Some("Windows"));
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_value_split_on_first_colon() {
        let fields = parse_fields("title: Launch: the sequel\nreadTime: 10:30");
        assert_eq!(
            fields,
            vec![("title", " Launch: the sequel"), ("readTime", " 10:30")]
        );
        assert_eq!(scalar_value(fields[0].1), "Launch: the sequel");
    }

    #[test]
    fn test_lines_without_colon_are_ignored() {
        let fields = parse_fields("title: T\njust some words\n\n: orphan value");
        assert_eq!(fields.len(), 1);
    }

    #[test]
    fn test_parse_value_variants() {
        assert_eq!(
            parse_value(" [ai,  automation , \"ml\"] "),
            FieldValue::List(vec!["ai".into(), "automation".into(), "ml".into()])
        );
        assert_eq!(parse_value("[]"), FieldValue::List(vec![]));
        assert_eq!(parse_value("\"quoted\""), FieldValue::Scalar("quoted".into()));
        assert_eq!(parse_value("'single'"), FieldValue::Scalar("'single'".into()));
        assert_eq!(parse_value("\""), FieldValue::Scalar("\"".into()));
        assert_eq!(parse_value("  plain  "), FieldValue::Scalar("plain".into()));
    }

    #[test]
    fn test_scalar_tags_become_single_tag() {
        let (fm, _) = parse_frontmatter("---\ntitle: T\ntags: solo\n---\nBody").unwrap();
        assert_eq!(fm.tags, vec!["solo"]);
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let (fm, _) = parse_frontmatter("---\ntitle: T\ncategory: news\n---\nBody").unwrap();
        assert_eq!(
            fm,
            Frontmatter {
                title: Some("T".into()),
                ..Frontmatter::default()
            }
        );
    }

    #[test]
    fn test_bracketed_scalar_kept_as_text() {
        let (fm, _) = parse_frontmatter(
            "---\ntitle: [Draft] Launch plan\nauthor: [Team]\ndescription: D\ndate: 2024-01-01\n---\nBody",
        )
        .unwrap();
        assert_eq!(fm.title.as_deref(), Some("[Draft] Launch plan"));
        assert_eq!(fm.author.as_deref(), Some("[Team]"));

        let meta = fm.into_metadata(Slug::new("draft")).unwrap();
        assert_eq!(meta.author, "[Team]");
    }

    #[test]
    fn test_image_url_alias() {
        let (fm, _) = parse_frontmatter("---\nimageUrl: /hero.png\n---\nBody").unwrap();
        assert_eq!(fm.image.as_deref(), Some("/hero.png"));
    }

    #[test]
    fn test_into_metadata() {
        let (fm, _) = parse_frontmatter(HELLO).unwrap();
        let meta = fm.into_metadata(Slug::new("hello-world")).unwrap();
        assert_eq!(meta.id.as_str(), "1");
        assert_eq!(meta.slug.as_str(), "hello-world");
        assert_eq!(meta.date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(meta.image, None);
    }

    #[test]
    fn test_missing_title() {
        let (fm, _) = parse_frontmatter("---\ndescription: D\ndate: 2024-01-01\n---\nBody").unwrap();
        match fm.into_metadata(Slug::new("x")) {
            Err(FrontmatterError::MissingField(field)) => assert_eq!(field, "title"),
            other => panic!("Expected MissingField error, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_title_counts_as_missing() {
        let (fm, _) =
            parse_frontmatter("---\ntitle: \"\"\ndescription: D\ndate: 2024-01-01\n---\nBody")
                .unwrap();
        assert!(matches!(
            fm.into_metadata(Slug::new("x")),
            Err(FrontmatterError::MissingField("title"))
        ));
    }

    #[test]
    fn test_missing_description() {
        let (fm, _) = parse_frontmatter("---\ntitle: T\ndate: 2024-01-01\n---\nBody").unwrap();
        assert!(matches!(
            fm.into_metadata(Slug::new("x")),
            Err(FrontmatterError::MissingField("description"))
        ));
    }

    #[test]
    fn test_missing_date() {
        let (fm, _) = parse_frontmatter("---\ntitle: T\ndescription: D\n---\nBody").unwrap();
        assert!(matches!(
            fm.into_metadata(Slug::new("x")),
            Err(FrontmatterError::MissingField("date"))
        ));
    }

    #[test]
    fn test_non_canonical_date_rejected() {
        let err = parse_date("Nov-2023").unwrap_err();
        assert_eq!(err.code(), "frontmatter.invalid-date");
        assert!(parse_date("03/01/2024").is_err());
    }

    #[test]
    fn test_unpadded_date_accepted() {
        assert_eq!(
            parse_date("2024-3-1").unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
        );
    }

    #[test]
    fn test_render_document_reparses() {
        let (fm, body) = parse_frontmatter(HELLO).unwrap();
        let article = Article {
            metadata: fm.into_metadata(Slug::new("hello-world")).unwrap(),
            content: body,
        };

        let rendered = render_document(&article);
        assert!(rendered.starts_with("---\nid: \"1\"\ntitle: \"Hello World\"\n"));

        let (fm, body) = parse_frontmatter(&rendered).unwrap();
        let reparsed = Article {
            metadata: fm.into_metadata(Slug::new("hello-world")).unwrap(),
            content: body,
        };
        assert_eq!(reparsed, article);
    }

    #[test]
    fn test_render_document_keeps_brackets_and_quotes() {
        let source = "---\nid: [7]\ntitle: T\ndescription: D\nauthor: \"[Team]\"\ndate: 2024-01-01\nreadTime: \"\"5 min\"\"\nimage: \"\"/hero.png\"\"\n---\nBody";
        let (fm, body) = parse_frontmatter(source).unwrap();
        let article = Article {
            metadata: fm.into_metadata(Slug::new("quirky")).unwrap(),
            content: body,
        };
        assert_eq!(article.metadata.id.as_str(), "[7]");
        assert_eq!(article.metadata.author, "[Team]");
        assert_eq!(article.metadata.read_time, "\"5 min\"");

        let (fm, body) = parse_frontmatter(&render_document(&article)).unwrap();
        let reparsed = Article {
            metadata: fm.into_metadata(Slug::new("quirky")).unwrap(),
            content: body,
        };
        assert_eq!(reparsed, article);
    }

    #[test]
    fn test_filename_slug_wins() {
        let (fm, _) = parse_frontmatter(
            "---\ntitle: T\ndescription: D\ndate: 2024-01-01\nslug: custom\n---\nBody",
        )
        .unwrap();
        let meta = fm.into_metadata(Slug::new("from-file")).unwrap();
        assert_eq!(meta.slug.as_str(), "from-file");
    }
}
