//! Page-level types.

use serde::{Deserialize, Serialize};

/// Raw text of a single page, as produced by a reader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// Identifier of the owning document
    pub document_id: String,

    /// Page number (1-indexed)
    pub page_number: u32,

    /// Extracted page text, line breaks preserved
    pub raw_text: String,
}

impl Page {
    /// Create a new page.
    pub fn new(
        document_id: impl Into<String>,
        page_number: u32,
        raw_text: impl Into<String>,
    ) -> Self {
        Self {
            document_id: document_id.into(),
            page_number,
            raw_text: raw_text.into(),
        }
    }

    /// Check if the page carries no visible text.
    pub fn is_blank(&self) -> bool {
        self.raw_text.trim().is_empty()
    }
}

/// All pages of one document, in reading order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentPages {
    /// Document identifier (the request filename)
    pub id: String,

    /// Pages in ascending page order
    pub pages: Vec<Page>,
}

impl DocumentPages {
    /// Create an empty document.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            pages: Vec::new(),
        }
    }

    /// Build a document from page texts, numbering pages from 1.
    pub fn from_texts<I, S>(id: impl Into<String>, texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let id = id.into();
        let pages = texts
            .into_iter()
            .enumerate()
            .map(|(i, text)| Page::new(id.clone(), i as u32 + 1, text))
            .collect();
        Self { id, pages }
    }

    /// Append a page.
    pub fn add_page(&mut self, page: Page) {
        self.pages.push(page);
    }

    /// Get the number of pages.
    pub fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }
}
