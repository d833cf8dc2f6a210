/*!
 * Fixed-output extractor for testing.
 */

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use super::model::ExtractedPage;
use super::DocumentExtractor;
use crate::errors::ExtractionError;

/// Returns the same page (or the same error) for every document
#[derive(Debug, Clone)]
pub struct StaticExtractor {
    result: Result<ExtractedPage, ExtractionError>,
    call_count: Arc<AtomicUsize>,
}

impl StaticExtractor {
    /// Extractor that always yields `page`
    pub fn new(page: ExtractedPage) -> Self {
        Self {
            result: Ok(page),
            call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Extractor that always fails with `UnreadableDocument`
    pub fn unreadable(reason: &str) -> Self {
        Self {
            result: Err(ExtractionError::UnreadableDocument(reason.to_string())),
            call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of extractions performed so far
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DocumentExtractor for StaticExtractor {
    async fn extract(&self, _path: &Path) -> Result<ExtractedPage, ExtractionError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.result.clone()
    }
}
