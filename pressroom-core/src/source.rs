//! Content sources: where article documents come from.
//!
//! A [`ContentSource`] enumerates raw documents in one go. Parsing happens
//! later in the loader, so a source only fails for infrastructure faults
//! (a missing directory, an unreadable file), never for bad content.

use include_dir::{include_dir, Dir, DirEntry};
use regex::Regex;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use walkdir::WalkDir;

/// Articles compiled into the binary
static BUNDLED_ARTICLES: Dir<'static> = include_dir!("$CARGO_MANIFEST_DIR/content/articles");

pub const DEFAULT_EXTENSION: &str = "md";

#[derive(Error, Debug)]
pub enum DiscoveryError {
    #[error("Content directory not found: {0}")]
    MissingRoot(PathBuf),

    #[error("Failed to walk content directory: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Content source unavailable: {0}")]
    Unavailable(String),
}

/// One raw document as reported by a source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    /// Path-like identifier, e.g. `articles/hello-world.md`
    pub path: String,
    pub contents: Cow<'static, [u8]>,
}

impl SourceDocument {
    pub fn new(path: impl Into<String>, contents: impl Into<Vec<u8>>) -> Self {
        Self {
            path: path.into(),
            contents: Cow::Owned(contents.into()),
        }
    }

    pub fn from_static(path: impl Into<String>, contents: &'static [u8]) -> Self {
        Self {
            path: path.into(),
            contents: Cow::Borrowed(contents),
        }
    }
}

/// Enumerates article documents
pub trait ContentSource: Send + Sync {
    /// Human-readable origin for log messages
    fn describe(&self) -> String;

    /// Return every document, in source order
    fn discover(&self) -> Result<Vec<SourceDocument>, DiscoveryError>;
}

impl<T: ContentSource + ?Sized> ContentSource for Arc<T> {
    fn describe(&self) -> String {
        (**self).describe()
    }

    fn discover(&self) -> Result<Vec<SourceDocument>, DiscoveryError> {
        (**self).discover()
    }
}

impl<T: ContentSource + ?Sized> ContentSource for Box<T> {
    fn describe(&self) -> String {
        (**self).describe()
    }

    fn discover(&self) -> Result<Vec<SourceDocument>, DiscoveryError> {
        (**self).discover()
    }
}

/// Documents embedded at compile time
pub struct BundledSource {
    dir: &'static Dir<'static>,
    extension: String,
}

impl BundledSource {
    /// The articles shipped with this crate
    pub fn new() -> Self {
        Self::from_dir(&BUNDLED_ARTICLES)
    }

    /// Any directory embedded with `include_dir!`
    pub fn from_dir(dir: &'static Dir<'static>) -> Self {
        Self {
            dir,
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }

    pub fn with_extension(mut self, extension: &str) -> Self {
        self.extension = normalize_extension(extension);
        self
    }
}

impl Default for BundledSource {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentSource for BundledSource {
    fn describe(&self) -> String {
        "bundled articles".to_string()
    }

    fn discover(&self) -> Result<Vec<SourceDocument>, DiscoveryError> {
        let mut documents = Vec::new();
        collect_bundled(self.dir, &self.extension, &mut documents);
        documents.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(documents)
    }
}

fn collect_bundled(dir: &'static Dir<'static>, extension: &str, out: &mut Vec<SourceDocument>) {
    for entry in dir.entries() {
        match entry {
            DirEntry::Dir(sub) => collect_bundled(sub, extension, out),
            DirEntry::File(file) => {
                if has_extension(file.path(), extension) {
                    out.push(SourceDocument::from_static(
                        path_identifier(file.path()),
                        file.contents(),
                    ));
                }
            }
        }
    }
}

/// Documents read from a directory tree at load time
pub struct DirectorySource {
    root: PathBuf,
    extension: String,
    ignore_patterns: Vec<Regex>,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            extension: DEFAULT_EXTENSION.to_string(),
            ignore_patterns: Vec::new(),
        }
    }

    pub fn with_extension(mut self, extension: &str) -> Self {
        self.extension = normalize_extension(extension);
        self
    }

    /// Skip documents whose root-relative path matches any pattern.
    /// Invalid patterns are logged and dropped.
    pub fn with_ignore_patterns(mut self, patterns: &[String]) -> Self {
        self.ignore_patterns = compile_ignore_patterns(patterns);
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ContentSource for DirectorySource {
    fn describe(&self) -> String {
        format!("{}", self.root.display())
    }

    fn discover(&self) -> Result<Vec<SourceDocument>, DiscoveryError> {
        if !self.root.is_dir() {
            return Err(DiscoveryError::MissingRoot(self.root.clone()));
        }

        let mut documents = Vec::new();
        for entry in WalkDir::new(&self.root).sort_by_file_name() {
            let entry = entry?;
            if !entry.file_type().is_file() || !has_extension(entry.path(), &self.extension) {
                continue;
            }

            let rel = entry.path().strip_prefix(&self.root).unwrap_or(entry.path());
            let identifier = path_identifier(rel);
            if should_ignore(&identifier, &self.ignore_patterns) {
                tracing::debug!("Ignoring {} due to ignore_patterns", identifier);
                continue;
            }

            let contents = std::fs::read(entry.path()).map_err(|source| DiscoveryError::Read {
                path: entry.path().to_path_buf(),
                source,
            })?;
            documents.push(SourceDocument::new(identifier, contents));
        }

        Ok(documents)
    }
}

/// Documents held in memory
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    documents: Vec<SourceDocument>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(mut self, path: impl Into<String>, contents: impl Into<Vec<u8>>) -> Self {
        self.push(SourceDocument::new(path, contents));
        self
    }

    pub fn push(&mut self, document: SourceDocument) {
        self.documents.push(document);
    }
}

impl ContentSource for MemorySource {
    fn describe(&self) -> String {
        format!("{} in-memory documents", self.documents.len())
    }

    fn discover(&self) -> Result<Vec<SourceDocument>, DiscoveryError> {
        Ok(self.documents.clone())
    }
}

fn normalize_extension(extension: &str) -> String {
    extension.trim().trim_start_matches('.').to_string()
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
}

fn path_identifier(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

fn compile_ignore_patterns(patterns: &[String]) -> Vec<Regex> {
    let mut compiled = Vec::new();
    for pat in patterns {
        match Regex::new(pat) {
            Ok(re) => compiled.push(re),
            Err(err) => tracing::warn!("Invalid ignore pattern '{}': {}", pat, err),
        }
    }
    compiled
}

fn should_ignore(path: &str, ignores: &[Regex]) -> bool {
    ignores.iter().any(|re| re.is_match(path))
}
