/*!
 * Tests for the template check chain
 */

use papersort::app_config::TemplateConfig;
use papersort::extraction::{ExtractedPage, FontRun, PageLines};
use papersort::validation::{Rejection, SemesterParity, SubjectCode, TemplateValidator, ValidationVerdict};
use crate::common;

fn detailed_page(department: &str, program: &str, semester: &str, code_line: &str) -> ExtractedPage {
    ExtractedPage::text_only(PageLines::new(common::detailed_template_lines(
        department, program, semester, code_line,
    )))
}

fn detailed_validator() -> TemplateValidator {
    TemplateValidator::with_config(TemplateConfig::detailed())
}

/// Test that a template page classifies by table lookups
#[test]
fn test_validate_withTemplatePage_shouldClassify() {
    let validator = TemplateValidator::new();

    let verdict = validator.validate(&common::minimal_page("EC31234"));

    assert!(verdict.is_accepted());
    assert_eq!(verdict.reason(), None);
    let record = verdict.into_result().expect("accepted");
    assert_eq!(record.branch().code, "EC");
    assert_eq!(record.branch().name, "Electronics and Telecommunication Engineering");
    assert_eq!(record.year().digit, '3');
    assert_eq!(record.year().label, "Third Year");
    assert_eq!(record.semester(), SemesterParity::Odd);
}

/// Test that an unknown branch is rejected
#[test]
fn test_validate_withUnknownBranch_shouldRejectUnsupportedBranch() {
    let validator = TemplateValidator::new();

    let verdict = validator.validate(&common::minimal_page("XX12345"));

    assert_eq!(
        verdict,
        ValidationVerdict::Rejected(Rejection::UnsupportedBranch { code: "XX".to_string() })
    );
}

/// Test that a wrong first line is rejected before the code is looked at
#[test]
fn test_validate_withWrongInstitution_shouldRejectInstitutionMismatch() {
    let validator = TemplateValidator::new();
    let page = ExtractedPage::text_only(PageLines::new(["Some Other College", "not a code"]));

    assert_eq!(
        validator.validate(&page).rejection(),
        Some(&Rejection::InstitutionMismatch {
            found: "Some Other College".to_string()
        })
    );
}

/// Test that a malformed code wins over every later check
#[test]
fn test_validate_withMalformedCode_shouldRejectRegardlessOfFonts() {
    let validator = TemplateValidator::new();

    for code in ["CO1234", "CO123456", "C012345", "CO 12345", "1234567"] {
        let verdict = validator.validate(&common::minimal_page(code));
        assert!(
            matches!(verdict.rejection(), Some(Rejection::InvalidSubjectCodeFormat { .. })),
            "code {:?} should be malformed, got {:?}",
            code,
            verdict
        );
    }
}

/// Test that blank lines do not count toward the line minimum
#[test]
fn test_validate_withBlankLines_shouldRejectInsufficientContent() {
    let validator = TemplateValidator::new();
    let page = ExtractedPage::text_only(PageLines::from_text(&format!("\n  \n{}\n\n", common::INSTITUTION)));

    assert_eq!(
        validator.validate(&page).rejection(),
        Some(&Rejection::InsufficientContent { found: 1, required: 2 })
    );
}

/// Test that a regular-weight heading fails the typography check
#[test]
fn test_validate_withRegularHeading_shouldRejectFontMismatch() {
    let validator = TemplateValidator::new();
    let page = ExtractedPage::new(
        PageLines::new([common::INSTITUTION, "CO12345"]),
        Some(vec![
            FontRun::new("Calibri", 18.0, false),
            FontRun::new("Calibri", 16.0, true),
        ]),
    );

    assert!(matches!(
        validator.validate(&page).rejection(),
        Some(Rejection::FontOrSizeMismatch { segment: 0, .. })
    ));
}

/// Test that oversized body text fails the typography check
#[test]
fn test_validate_withLargeBodyText_shouldRejectFontMismatch() {
    let validator = TemplateValidator::new();
    let page = ExtractedPage::new(
        PageLines::new([common::INSTITUTION, "CO12345", "Body"]),
        Some(vec![
            FontRun::new("Calibri", 18.0, true),
            FontRun::new("Calibri", 16.0, true),
            FontRun::new("Calibri", 15.0, false),
        ]),
    );

    assert!(matches!(
        validator.validate(&page).rejection(),
        Some(Rejection::FontOrSizeMismatch { segment: 2, .. })
    ));
}

/// Test that sizes within a twentieth of a point are accepted
#[test]
fn test_validate_withRoundedSizes_shouldAccept() {
    let validator = TemplateValidator::new();
    let page = ExtractedPage::new(
        PageLines::new([common::INSTITUTION, "CO12345"]),
        Some(vec![
            FontRun::new("Calibri", 17.98, true),
            FontRun::new("Calibri", 16.02, true),
        ]),
    );

    assert!(validator.validate(&page).is_accepted());
}

/// Test that a different font family is rejected
#[test]
fn test_validate_withOtherFamily_shouldRejectFontMismatch() {
    let validator = TemplateValidator::new();
    let page = ExtractedPage::new(
        PageLines::new([common::INSTITUTION, "CO12345"]),
        Some(vec![
            FontRun::new("Arial", 18.0, true),
            FontRun::new("Calibri", 16.0, true),
        ]),
    );

    assert!(matches!(
        validator.validate(&page).rejection(),
        Some(Rejection::FontOrSizeMismatch { .. })
    ));
}

/// Test a complete detailed header
#[test]
fn test_validate_detailed_withMatchingHeader_shouldAccept() {
    let page = detailed_page(
        "DEPARTMENT OF COMPUTER ENGINEERING",
        "B.TECH. YEAR I",
        "SEMESTER- B",
        "CO13456: Programming Fundamentals",
    );

    let record = detailed_validator().validate(&page).into_result().expect("accepted");

    assert_eq!(record.branch().name, "Computer Engineering");
    assert_eq!(record.year().label, "YEAR I");
    assert_eq!(record.semester(), SemesterParity::Odd);
}

/// Test that an odd semester digit with the even label is rejected
#[test]
fn test_validate_detailed_withWrongSemesterLabel_shouldRejectSemesterMismatch() {
    let page = detailed_page(
        "DEPARTMENT OF COMPUTER ENGINEERING",
        "B.TECH. YEAR I",
        "SEMESTER- A",
        "CO13456: Programming Fundamentals",
    );

    assert_eq!(
        detailed_validator().validate(&page).rejection(),
        Some(&Rejection::SemesterMismatch {
            expected: "SEMESTER- B".to_string(),
            found: "SEMESTER- A".to_string(),
        })
    );
}

/// Test that information technology is not a detailed-template branch
#[test]
fn test_validate_detailed_withInformationTechnology_shouldRejectUnsupportedBranch() {
    let page = detailed_page(
        "DEPARTMENT OF INFORMATION TECHNOLOGY",
        "B.TECH. YEAR I",
        "SEMESTER- B",
        "IT11234: Web Systems",
    );

    assert_eq!(
        detailed_validator().validate(&page).rejection(),
        Some(&Rejection::UnsupportedBranch { code: "IT".to_string() })
    );
}

/// Test that the year on the program line must match the code
#[test]
fn test_validate_detailed_withOtherYear_shouldRejectProgramOrYearMismatch() {
    let page = detailed_page(
        "DEPARTMENT OF COMPUTER ENGINEERING",
        "B.TECH. YEAR II",
        "SEMESTER- B",
        "CO13456: Programming Fundamentals",
    );

    assert!(matches!(
        detailed_validator().validate(&page).rejection(),
        Some(Rejection::ProgramOrYearMismatch { year_label, .. }) if year_label == "YEAR I"
    ));
}

/// Test that a department line for another branch is rejected
#[test]
fn test_validate_detailed_withOtherDepartment_shouldRejectDepartmentMismatch() {
    let page = detailed_page(
        "DEPARTMENT OF CIVIL ENGINEERING",
        "B.TECH. YEAR I",
        "SEMESTER- B",
        "CO13456: Programming Fundamentals",
    );

    assert!(matches!(
        detailed_validator().validate(&page).rejection(),
        Some(Rejection::DepartmentMismatch { .. })
    ));
}

/// Test that missing section headings are all reported
#[test]
fn test_validate_detailed_withoutSections_shouldRejectMissingSections() {
    let page = ExtractedPage::text_only(PageLines::new([
        common::INSTITUTION,
        "DEPARTMENT OF COMPUTER ENGINEERING",
        "B.TECH. YEAR I",
        "SEMESTER- B",
        "CO13456: Programming Fundamentals",
        "UNIT I",
        "UNIT II",
    ]));

    assert_eq!(
        detailed_validator().validate(&page).rejection(),
        Some(&Rejection::MissingRequiredSections {
            missing: vec!["COURSE OBJECTIVES".to_string(), "COURSE OUTCOMES".to_string()],
        })
    );
}

/// Test that six lines are not enough for the detailed template
#[test]
fn test_validate_detailed_withSixLines_shouldRejectInsufficientContent() {
    let page = ExtractedPage::text_only(PageLines::new([
        common::INSTITUTION,
        "DEPARTMENT OF COMPUTER ENGINEERING",
        "B.TECH. YEAR I",
        "SEMESTER- B",
        "CO13456: Programming Fundamentals",
        "COURSE OBJECTIVES / COURSE OUTCOMES",
    ]));

    assert_eq!(
        detailed_validator().validate(&page).rejection(),
        Some(&Rejection::InsufficientContent { found: 6, required: 7 })
    );
}

/// Test the positional parts of a subject code
#[test]
fn test_subjectCode_parse_shouldExposeParts() {
    let code = SubjectCode::parse(" ME24101 ").expect("valid code");

    assert_eq!(code.as_str(), "ME24101");
    assert_eq!(code.branch_code(), "ME");
    assert_eq!(code.year_digit(), '2');
    assert_eq!(code.semester_digit(), '4');
    assert!(SubjectCode::parse("ME2410").is_none());
}
