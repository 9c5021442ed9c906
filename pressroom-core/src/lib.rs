//! # pressroom-core
//!
//! Content core for the pressroom marketing site.
//!
//! Articles are markdown documents with a small frontmatter block. This
//! crate discovers them, parses each into a typed record, and serves
//! slug and tag queries from an immutable in-memory store that is built
//! exactly once.

pub mod config;
pub mod contact;
pub mod frontmatter;
pub mod loader;
pub mod models;
pub mod repository;
pub mod source;
pub mod store;

pub use config::Config;
pub use contact::{
    submit, ContactError, ContactForm, ContactOutcome, ContactRequest, ContactSender,
};
pub use loader::{load_articles, parse_document, ArticleError};
pub use models::{Article, ArticleMetadata, LoadReport, SkippedDocument};
pub use pressroom_types::{ArticleId, Slug};
pub use repository::{ArticleRepository, LoadStatus, RepositoryError, DEFAULT_RECENT_COUNT};
pub use source::{
    BundledSource, ContentSource, DirectorySource, DiscoveryError, MemorySource, SourceDocument,
};
pub use store::ArticleStore;
