//! Plain-text documents. A form feed (`\x0c`) separates pages.

use std::fs;
use std::path::Path;

use super::{DocumentReader, ReadOptions};
use crate::error::Result;
use crate::model::Page;

/// Page separator in plain-text documents.
pub const PAGE_BREAK: char = '\x0c';

/// Reads UTF-8 text files.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextReader;

impl TextReader {
    /// Create a text reader.
    pub fn new() -> Self {
        Self
    }

    /// Split text into pages. A trailing empty page is dropped.
    pub fn split_pages(&self, document_id: &str, text: &str) -> Vec<Page> {
        let mut parts: Vec<&str> = text.split(PAGE_BREAK).collect();
        if parts.len() > 1 && parts.last().is_some_and(|p| p.trim().is_empty()) {
            parts.pop();
        }
        parts
            .into_iter()
            .enumerate()
            .map(|(i, part)| Page::new(document_id, i as u32 + 1, part))
            .collect()
    }
}

impl DocumentReader for TextReader {
    fn supported_extensions(&self) -> &[&str] {
        &["txt", "text"]
    }

    fn name(&self) -> &str {
        "text"
    }

    fn read_path(
        &self,
        document_id: &str,
        path: &Path,
        _options: &ReadOptions,
    ) -> Result<Vec<Page>> {
        let text = fs::read_to_string(path)?;
        Ok(self.split_pages(document_id, &text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_page() {
        let pages = TextReader::new().split_pages("a.txt", "INTRO\nbody");
        assert_eq!(pages, vec![Page::new("a.txt", 1, "INTRO\nbody")]);
    }

    #[test]
    fn test_form_feed_pages() {
        let pages = TextReader::new().split_pages("a.txt", "one\x0ctwo\x0c\x0cfour\x0c\n");
        assert_eq!(pages.len(), 4);
        assert_eq!(pages[2].raw_text, "");
        assert_eq!(pages[3].page_number, 4);
        assert_eq!(pages[3].raw_text, "four");
    }

    #[test]
    fn test_empty_file_has_one_blank_page() {
        let pages = TextReader::new().split_pages("a.txt", "");
        assert_eq!(pages.len(), 1);
        assert!(pages[0].is_blank());
    }
}
