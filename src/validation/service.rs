/*!
 * Template validator that runs the ordered check chain.
 *
 * The checks run cheapest and most discriminating first, and the first
 * failure is the reported reason:
 *
 * 1. minimum line count
 * 2. institution line
 * 3. subject code syntax
 * 4. branch lookup
 * 5. year lookup
 * 6-9. (detailed) department, program/year, semester, section headings
 * 10. (minimal) typography
 */

use log::debug;

use crate::app_config::{TemplateConfig, TemplateVariant};
use crate::extraction::{ExtractedPage, FontRun, PageLines};

use super::header::HeaderValidator;
use super::subject_code::SubjectCode;
use super::typography::TypographyValidator;
use super::verdict::{Branch, ClassificationRecord, Rejection, SemesterParity, ValidationVerdict, Year};

/// Validates first pages against one template
#[derive(Debug, Clone)]
pub struct TemplateValidator {
    template: TemplateConfig,
    header_validator: HeaderValidator,
    typography_validator: TypographyValidator,
}

impl TemplateValidator {
    /// Create a validator for the default (minimal) template
    pub fn new() -> Self {
        Self::with_config(TemplateConfig::default())
    }

    /// Create a validator for a custom template
    pub fn with_config(template: TemplateConfig) -> Self {
        Self {
            header_validator: HeaderValidator::from_template(&template),
            typography_validator: TypographyValidator::with_rules(template.typography.clone()),
            template,
        }
    }

    /// Validate an extracted first page
    pub fn validate(&self, page: &ExtractedPage) -> ValidationVerdict {
        self.validate_lines(&page.lines, page.font_runs())
    }

    /// Validate lines and optional font runs
    pub fn validate_lines(&self, lines: &PageLines, fonts: Option<&[FontRun]>) -> ValidationVerdict {
        let verdict = ValidationVerdict::from(self.run_checks(lines, fonts));

        match &verdict {
            ValidationVerdict::Accepted(record) => debug!(
                "Template check passed: {} / {} / {:?}",
                record.branch().code,
                record.year().label,
                record.semester()
            ),
            ValidationVerdict::Rejected(rejection) => debug!("Template check failed: {}", rejection),
        }

        verdict
    }

    fn run_checks(&self, lines: &PageLines, fonts: Option<&[FontRun]>) -> Result<ClassificationRecord, Rejection> {
        let template = &self.template;

        if lines.len() < template.min_lines {
            return Err(Rejection::InsufficientContent {
                found: lines.len(),
                required: template.min_lines,
            });
        }

        let institution = line_at(lines, template.lines.institution);
        if institution != template.institution_name.trim() {
            return Err(Rejection::InstitutionMismatch {
                found: institution.to_string(),
            });
        }

        let code = self.subject_code(lines)?;
        let branch = self.resolve_branch(&code)?;
        let year = self.resolve_year(&code)?;

        match template.variant {
            TemplateVariant::Detailed => {
                self.header_validator.check_department(lines, &branch)?;
                self.header_validator.check_program(lines, &year)?;
                self.header_validator.check_semester(lines, code.semester_digit())?;
                self.header_validator.check_sections(lines)?;
            }
            TemplateVariant::Minimal => {
                self.typography_validator.validate(fonts)?;
            }
        }

        let semester = SemesterParity::from_digit(code.semester_digit()).ok_or_else(|| {
            Rejection::SemesterMismatch {
                expected: "a semester digit".to_string(),
                found: code.as_str().to_string(),
            }
        })?;

        Ok(ClassificationRecord::new(branch, year, semester))
    }

    /// The subject code candidate: the whole line, or the part before ':'
    fn subject_code<'a>(&self, lines: &'a PageLines) -> Result<SubjectCode<'a>, Rejection> {
        let line = line_at(lines, self.template.lines.subject_code);
        let candidate = match self.template.variant {
            TemplateVariant::Minimal => line,
            TemplateVariant::Detailed => line.split_once(':').map_or(line, |(code, _)| code),
        };

        SubjectCode::parse(candidate).ok_or_else(|| Rejection::InvalidSubjectCodeFormat {
            found: candidate.trim().to_string(),
        })
    }

    fn resolve_branch(&self, code: &SubjectCode<'_>) -> Result<Branch, Rejection> {
        let branch_code = code.branch_code();
        self.template
            .branches
            .get(branch_code)
            .map(|name| Branch {
                code: branch_code.to_string(),
                name: name.trim().to_string(),
            })
            .ok_or_else(|| Rejection::UnsupportedBranch {
                code: branch_code.to_string(),
            })
    }

    fn resolve_year(&self, code: &SubjectCode<'_>) -> Result<Year, Rejection> {
        let digit = code.year_digit();
        self.template
            .years
            .get(digit.to_string().as_str())
            .map(|label| Year {
                digit,
                label: label.trim().to_string(),
            })
            .ok_or(Rejection::UnsupportedYear { digit })
    }
}

impl Default for TemplateValidator {
    fn default() -> Self {
        Self::new()
    }
}

fn line_at(lines: &PageLines, index: usize) -> &str {
    lines.get(index).unwrap_or_default()
}
