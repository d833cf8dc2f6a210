/*!
 * Validation of first pages against the institutional template.
 *
 * # Architecture
 *
 * - `subject_code`: Subject code syntax and its branch/year/semester parts
 * - `header`: Department, program, semester and section checks (detailed template)
 * - `typography`: Font family, size and weight checks (minimal template)
 * - `verdict`: Classification record, rejection reasons and the verdict
 * - `service`: Orchestrates all checks in order
 */

pub mod header;
pub mod service;
pub mod subject_code;
pub mod typography;
pub mod verdict;

// Re-export main types
pub use service::TemplateValidator;
pub use subject_code::SubjectCode;
pub use verdict::{Branch, ClassificationRecord, Rejection, SemesterParity, ValidationVerdict, Year};
