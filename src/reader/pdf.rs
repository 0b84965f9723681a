//! PDF page text via lopdf.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use lopdf::Document as LopdfDocument;

use super::{DocumentReader, ReadOptions};
use crate::error::{Error, Result};
use crate::model::Page;
use crate::options::ErrorMode;

/// PDF magic bytes: %PDF-
const PDF_MAGIC: &[u8] = b"%PDF-";
const PDF_MAGIC_LEN: usize = 5;
const VERSION_LEN: usize = 3;

/// PDF header information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfFormat {
    /// PDF version (e.g., "1.7", "2.0")
    pub version: String,
}

impl std::fmt::Display for PdfFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PDF {}", self.version)
    }
}

/// Read the header of a file and check that it is a PDF.
pub fn detect_format_from_path<P: AsRef<Path>>(path: P) -> Result<PdfFormat> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut header = [0u8; 16];
    let read = reader.read(&mut header)?;
    detect_format_from_bytes(&header[..read])
}

/// Check that `data` starts with a PDF header and return its version.
pub fn detect_format_from_bytes(data: &[u8]) -> Result<PdfFormat> {
    if data.len() < PDF_MAGIC_LEN + VERSION_LEN || !data.starts_with(PDF_MAGIC) {
        return Err(Error::UnknownFormat);
    }

    let version_bytes = &data[PDF_MAGIC_LEN..PDF_MAGIC_LEN + VERSION_LEN];
    let version = String::from_utf8_lossy(version_bytes).to_string();
    if !is_valid_version(&version) {
        return Err(Error::UnsupportedVersion(version));
    }

    Ok(PdfFormat { version })
}

fn is_valid_version(version: &str) -> bool {
    let bytes = version.as_bytes();
    bytes.len() == 3 && bytes[0].is_ascii_digit() && bytes[1] == b'.' && bytes[2].is_ascii_digit()
}

/// Check if a file is a PDF.
pub fn is_pdf<P: AsRef<Path>>(path: P) -> bool {
    detect_format_from_path(path).is_ok()
}

/// Reads PDF documents page by page.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfReader;

impl PdfReader {
    /// Create a PDF reader.
    pub fn new() -> Self {
        Self
    }

    /// Extract page texts from an already loaded document.
    pub fn read_document(
        &self,
        document_id: &str,
        doc: &LopdfDocument,
        options: &ReadOptions,
    ) -> Result<Vec<Page>> {
        let mut pages = Vec::new();
        for page_num in doc.get_pages().keys().copied() {
            match doc.extract_text(&[page_num]) {
                Ok(text) => pages.push(Page::new(document_id, page_num, text)),
                Err(e) => {
                    let err = Error::TextExtract(format!("Page {}: {}", page_num, e));
                    match options.error_mode {
                        ErrorMode::Strict => return Err(err),
                        ErrorMode::Lenient => {
                            log::warn!("Skipping page {} of {}: {}", page_num, document_id, err);
                        }
                    }
                }
            }
        }
        Ok(pages)
    }
}

impl DocumentReader for PdfReader {
    fn supported_extensions(&self) -> &[&str] {
        &["pdf"]
    }

    fn name(&self) -> &str {
        "pdf"
    }

    fn read_path(
        &self,
        document_id: &str,
        path: &Path,
        options: &ReadOptions,
    ) -> Result<Vec<Page>> {
        let format = detect_format_from_path(path)?;
        log::debug!("{} is {}", document_id, format);

        let doc = LopdfDocument::load(path)?;
        if doc.is_encrypted() {
            log::warn!("{} is encrypted; page text may be unreadable", document_id);
        }
        self.read_document(document_id, &doc, options)
    }
}
