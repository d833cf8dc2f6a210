/*!
 * # papersort - template checking and filing of course PDFs
 *
 * A Rust library that reads the first page of an uploaded PDF, checks it
 * against an institutional template and files it into a folder derived
 * from its subject code.
 *
 * ## Features
 *
 * - First-page text and font extraction with lopdf
 * - Two template variants:
 *   - minimal: institution line, subject code line and typography
 *   - detailed: department, program/year, semester and section headings
 * - Classification by branch, year and semester parity
 * - Deterministic folder routing with two layouts
 * - Safe, idempotent moves into the target folder
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `extraction`: First-page reading:
 *   - `extraction::pdf`: lopdf-backed extractor
 *   - `extraction::layout`: Lines and font runs from the page content stream
 * - `validation`: Template checks and verdicts
 * - `routing`: Target folder computation
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod extraction;
pub mod file_utils;
pub mod routing;
pub mod validation;

// Re-export main types for easier usage
pub use app_config::{Config, RoutingLayout, TemplateVariant};
pub use app_controller::{Controller, FilingOutcome, RunMode, RunSummary};
pub use errors::{AppError, ExtractionError, FileError};
pub use extraction::{DocumentExtractor, ExtractedPage, PdfExtractor};
pub use routing::Router;
pub use validation::{ClassificationRecord, Rejection, TemplateValidator, ValidationVerdict};
