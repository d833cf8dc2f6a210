/*!
 * Tests for error types and their messages
 */

use std::path::PathBuf;
use papersort::errors::{AppError, ExtractionError, FileError};
use papersort::validation::Rejection;

/// Test that rejections are wrapped transparently
#[test]
fn test_appError_fromRejection_shouldKeepMessage() {
    let rejection = Rejection::UnsupportedBranch { code: "XX".to_string() };
    let message = rejection.to_string();

    let error: AppError = rejection.into();

    assert_eq!(error.to_string(), message);
    assert!(matches!(error, AppError::Rejected(Rejection::UnsupportedBranch { .. })));
}

/// Test that extraction errors are wrapped transparently
#[test]
fn test_appError_fromExtractionError_shouldKeepMessage() {
    let error: AppError = ExtractionError::UnreadableDocument("document has no pages".to_string()).into();

    assert_eq!(error.to_string(), "Unreadable document: document has no pages");
}

/// Test the disallowed extension message names the allowed one
#[test]
fn test_disallowedExtension_message_shouldNameAllowedExtension() {
    let error = AppError::DisallowedExtension {
        path: PathBuf::from("notes.docx"),
        allowed: "pdf".to_string(),
    };

    assert!(error.to_string().starts_with("Only .pdf files are accepted"));
}

/// Test the move failure message carries both paths and the reason
#[test]
fn test_moveFailed_message_shouldContainPathsAndReason() {
    let error = FileError::MoveFailed {
        source_path: PathBuf::from("uploads/a.pdf"),
        target_dir: PathBuf::from("segregated_files/First Year"),
        reason: "source file does not exist".to_string(),
    };

    let message = error.to_string();
    assert!(message.contains("uploads/a.pdf"));
    assert!(message.contains("First Year"));
    assert!(message.contains("source file does not exist"));
}

/// Test the multi-section rejection message
#[test]
fn test_missingSections_message_shouldListAllHeadings() {
    let rejection = Rejection::MissingRequiredSections {
        missing: vec!["COURSE OBJECTIVES".to_string(), "COURSE OUTCOMES".to_string()],
    };

    assert_eq!(
        rejection.to_string(),
        "Missing required sections: COURSE OBJECTIVES, COURSE OUTCOMES"
    );
}
