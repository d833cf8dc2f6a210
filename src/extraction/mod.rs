/*!
 * First-page text extraction.
 *
 * The template checks never look at a document directly. They receive an
 * `ExtractedPage`: the non-empty trimmed lines of the first page in reading
 * order, plus the font runs found in its content stream.
 *
 * - `model`: `PageLines`, `FontRun` and `ExtractedPage`
 * - `pdf`: `PdfExtractor`, backed by lopdf
 * - `layout`: lines and font runs read from the page content stream
 * - `mock`: fixed-output extractor for tests and benchmarks
 */

use async_trait::async_trait;
use std::fmt::Debug;
use std::path::Path;

use crate::errors::ExtractionError;

pub mod layout;
pub mod mock;
pub mod model;
pub mod pdf;

pub use mock::StaticExtractor;
pub use model::{ExtractedPage, FontRun, PageLines};
pub use pdf::PdfExtractor;

/// Source of first-page content
///
/// The controller only talks to this trait, so the filing flow can be driven
/// by a real PDF reader or by a canned page.
#[async_trait]
pub trait DocumentExtractor: Send + Sync + Debug {
    /// Read the first page of the document at `path`
    ///
    /// # Returns
    /// * `Err(ExtractionError::UnreadableDocument)` if the document has no
    ///   pages or cannot be parsed
    async fn extract(&self, path: &Path) -> Result<ExtractedPage, ExtractionError>;
}
