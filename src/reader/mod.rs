//! Document readers: the page-text source for ranking runs.
//!
//! The pipeline asks a [`PageSource`] for the pages of each requested
//! document. [`ReaderRegistry`] resolves document identifiers to files and
//! dispatches on the file extension to a registered [`DocumentReader`].
//!
//! # Example
//!
//! ```no_run
//! use docrank::reader::{PageSource, ReadOptions, ReaderRegistry};
//!
//! fn main() -> docrank::Result<()> {
//!     let registry = ReaderRegistry::with_defaults(ReadOptions::new().with_base_dir("./docs"));
//!     for page in registry.read_pages("guide.pdf")? {
//!         println!("page {}: {} chars", page.page_number, page.raw_text.len());
//!     }
//!     Ok(())
//! }
//! ```

mod pdf;
mod text;

pub use pdf::{detect_format_from_bytes, detect_format_from_path, is_pdf, PdfFormat, PdfReader};
pub use text::TextReader;

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use unicode_normalization::UnicodeNormalization;

use crate::error::{Error, Result};
use crate::model::Page;
use crate::options::ErrorMode;

/// Yields the text of each page of a document.
pub trait PageSource {
    /// Read all pages of a document, in page order.
    ///
    /// A document that does not exist is reported as
    /// [`Error::MissingDocument`].
    fn read_pages(&self, document_id: &str) -> Result<Vec<Page>>;
}

/// Options for document readers.
#[derive(Debug, Clone)]
pub struct ReadOptions {
    /// Directory that relative document identifiers are resolved against
    pub base_dir: PathBuf,

    /// Apply Unicode NFKC normalization to page text (folds ligatures)
    pub normalize_unicode: bool,

    /// How per-page extraction failures are handled
    pub error_mode: ErrorMode,
}

impl ReadOptions {
    /// Create read options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base directory.
    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = dir.into();
        self
    }

    /// Enable or disable Unicode normalization.
    pub fn with_normalize_unicode(mut self, normalize: bool) -> Self {
        self.normalize_unicode = normalize;
        self
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Skip pages whose text cannot be extracted.
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("."),
            normalize_unicode: true,
            error_mode: ErrorMode::Strict,
        }
    }
}

/// A reader for one family of file formats.
pub trait DocumentReader: Send + Sync {
    /// Supported extensions, lower-case without the leading dot.
    fn supported_extensions(&self) -> &[&str];

    /// Name of this reader.
    fn name(&self) -> &str;

    /// Read the pages of the file at `path`, tagging them with `document_id`.
    fn read_path(&self, document_id: &str, path: &Path, options: &ReadOptions)
        -> Result<Vec<Page>>;

    /// Check if this reader supports the given extension.
    fn supports_extension(&self, ext: &str) -> bool {
        let ext_lower = ext.to_lowercase();
        self.supported_extensions().iter().any(|e| *e == ext_lower)
    }
}

/// Registry mapping file extensions to readers.
pub struct ReaderRegistry {
    readers: HashMap<String, Arc<dyn DocumentReader>>,
    by_name: HashMap<String, Arc<dyn DocumentReader>>,
    options: ReadOptions,
}

impl ReaderRegistry {
    /// Create an empty registry.
    pub fn new(options: ReadOptions) -> Self {
        Self {
            readers: HashMap::new(),
            by_name: HashMap::new(),
            options,
        }
    }

    /// Create a registry with the PDF and plain-text readers.
    pub fn with_defaults(options: ReadOptions) -> Self {
        let mut registry = Self::new(options);
        registry.register(Arc::new(PdfReader::new()));
        registry.register(Arc::new(TextReader::new()));
        registry
    }

    /// Register a reader for all of its extensions.
    pub fn register(&mut self, reader: Arc<dyn DocumentReader>) {
        for ext in reader.supported_extensions() {
            self.readers.insert(ext.to_lowercase(), reader.clone());
        }
        self.by_name.insert(reader.name().to_lowercase(), reader);
    }

    /// Get a reader by file extension.
    pub fn get_by_extension(&self, ext: &str) -> Option<Arc<dyn DocumentReader>> {
        self.readers.get(&ext.to_lowercase()).cloned()
    }

    /// Get a reader by name.
    pub fn get_by_name(&self, name: &str) -> Option<Arc<dyn DocumentReader>> {
        self.by_name.get(&name.to_lowercase()).cloned()
    }

    /// Check if an extension is supported.
    pub fn supports(&self, ext: &str) -> bool {
        self.readers.contains_key(&ext.to_lowercase())
    }

    /// Read options in effect.
    pub fn options(&self) -> &ReadOptions {
        &self.options
    }

    /// Resolve a document identifier to a path.
    pub fn resolve(&self, document_id: &str) -> PathBuf {
        let path = Path::new(document_id);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.options.base_dir.join(path)
        }
    }
}

impl Default for ReaderRegistry {
    fn default() -> Self {
        Self::with_defaults(ReadOptions::default())
    }
}

impl PageSource for ReaderRegistry {
    fn read_pages(&self, document_id: &str) -> Result<Vec<Page>> {
        let path = self.resolve(document_id);
        if !path.is_file() {
            return Err(Error::MissingDocument(document_id.to_string()));
        }

        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| Error::UnsupportedDocument(document_id.to_string()))?;
        let reader = self
            .get_by_extension(ext)
            .ok_or_else(|| Error::UnsupportedDocument(document_id.to_string()))?;

        log::debug!("Reading {} with the {} reader", path.display(), reader.name());
        let mut pages = reader.read_path(document_id, &path, &self.options)?;
        if self.options.normalize_unicode {
            for page in &mut pages {
                page.raw_text = normalize_text(&page.raw_text);
            }
        }
        Ok(pages)
    }
}

/// Pages already held in memory, keyed by document identifier.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    documents: HashMap<String, Vec<String>>,
}

impl InMemorySource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document given its page texts, first page first.
    pub fn with_document<I, S>(mut self, id: impl Into<String>, pages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert(id, pages);
        self
    }

    /// Add or replace a document.
    pub fn insert<I, S>(&mut self, id: impl Into<String>, pages: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.documents
            .insert(id.into(), pages.into_iter().map(Into::into).collect());
    }
}

impl PageSource for InMemorySource {
    fn read_pages(&self, document_id: &str) -> Result<Vec<Page>> {
        let texts = self
            .documents
            .get(document_id)
            .ok_or_else(|| Error::MissingDocument(document_id.to_string()))?;
        Ok(texts
            .iter()
            .enumerate()
            .map(|(i, text)| Page::new(document_id, i as u32 + 1, text.clone()))
            .collect())
    }
}

/// NFKC-normalize page text.
pub fn normalize_text(text: &str) -> String {
    text.nfkc().collect()
}
