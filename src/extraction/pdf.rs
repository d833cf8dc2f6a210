/*!
 * PDF first-page extraction backed by lopdf.
 */

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use log::debug;
use lopdf::Document;

use super::layout::read_page;
use super::model::ExtractedPage;
use super::DocumentExtractor;
use crate::errors::ExtractionError;

/// Reads the first page of a PDF with lopdf
#[derive(Debug, Clone, Default)]
pub struct PdfExtractor;

impl PdfExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Load a PDF from disk and read its first page
    pub fn extract_file(path: &Path) -> Result<ExtractedPage, ExtractionError> {
        let doc = Document::load(path).map_err(|e| {
            ExtractionError::UnreadableDocument(format!("{}: {}", path.display(), e))
        })?;
        Self::extract_from_document(&doc)
    }

    /// Read the first page of an in-memory PDF
    pub fn extract_bytes(bytes: &[u8]) -> Result<ExtractedPage, ExtractionError> {
        let doc = Document::load_mem(bytes)
            .map_err(|e| ExtractionError::UnreadableDocument(e.to_string()))?;
        Self::extract_from_document(&doc)
    }

    /// Read the first page of an already parsed document
    pub fn extract_from_document(doc: &Document) -> Result<ExtractedPage, ExtractionError> {
        if doc.is_encrypted() {
            return Err(ExtractionError::UnreadableDocument(
                "document is encrypted".to_string(),
            ));
        }

        let pages = doc.get_pages();
        let (&page_number, &page_id) = pages.iter().next().ok_or_else(|| {
            ExtractionError::UnreadableDocument("document has no pages".to_string())
        })?;

        let layout = read_page(doc, page_id)
            .map_err(|e| ExtractionError::UnreadableDocument(e.to_string()))?;

        debug!(
            "Extracted {} line(s) and {} font run(s) from page {}",
            layout.lines.len(),
            layout.runs.len(),
            page_number
        );

        Ok(ExtractedPage::new(layout.lines, Some(layout.runs)))
    }
}

#[async_trait]
impl DocumentExtractor for PdfExtractor {
    async fn extract(&self, path: &Path) -> Result<ExtractedPage, ExtractionError> {
        let path: PathBuf = path.to_path_buf();
        tokio::task::spawn_blocking(move || Self::extract_file(&path))
            .await
            .map_err(|e| ExtractionError::UnreadableDocument(format!("extraction task failed: {}", e)))?
    }
}
