/*!
 * Cross-checks of the detailed template header against the subject code.
 *
 * Once the code is resolved, the department, program/year and semester
 * lines must agree with it, and the page must carry the required section
 * headings.
 */

use log::debug;

use crate::app_config::{LinePositions, SemesterLabels, TemplateConfig};
use crate::extraction::PageLines;

use super::verdict::{Branch, Rejection, SemesterParity, Year};

/// Checks for the header block of the detailed template
#[derive(Debug, Clone)]
pub struct HeaderValidator {
    positions: LinePositions,
    department_prefix: String,
    program_prefixes: Vec<String>,
    semester_prefix: String,
    semester_labels: SemesterLabels,
    required_headings: Vec<String>,
}

impl HeaderValidator {
    pub fn from_template(template: &TemplateConfig) -> Self {
        Self {
            positions: template.lines.clone(),
            department_prefix: template.department_prefix.clone(),
            program_prefixes: template.program_prefixes.clone(),
            semester_prefix: template.semester_prefix.clone(),
            semester_labels: template.semester_labels.clone(),
            required_headings: template.required_headings.clone(),
        }
    }

    /// Department line must read the prefix plus the upper-cased department name
    pub fn check_department(&self, lines: &PageLines, branch: &Branch) -> Result<(), Rejection> {
        let expected = format!("{}{}", self.department_prefix, branch.name.to_uppercase());
        let expected = expected.trim();
        let found = line_at(lines, self.positions.department);

        if found == expected {
            Ok(())
        } else {
            Err(Rejection::DepartmentMismatch {
                expected: expected.to_string(),
                found: found.to_string(),
            })
        }
    }

    /// Program line must start with an accepted program and name the year
    pub fn check_program(&self, lines: &PageLines, year: &Year) -> Result<(), Rejection> {
        let found = line_at(lines, self.positions.program);
        let year_label = year.label.trim();

        let known_program = self
            .program_prefixes
            .iter()
            .map(|prefix| prefix.trim())
            .any(|prefix| !prefix.is_empty() && found.starts_with(prefix));

        if known_program && contains_token(found, year_label) {
            Ok(())
        } else {
            debug!(
                "Program line {:?}: known program = {}, expected year {:?}",
                found, known_program, year_label
            );
            Err(Rejection::ProgramOrYearMismatch {
                found: found.to_string(),
                year_label: year_label.to_string(),
            })
        }
    }

    /// Semester line must carry the label matching the code's parity digit
    pub fn check_semester(&self, lines: &PageLines, semester_digit: char) -> Result<(), Rejection> {
        let found = line_at(lines, self.positions.semester);

        let Some(parity) = SemesterParity::from_digit(semester_digit) else {
            return Err(Rejection::SemesterMismatch {
                expected: format!("a semester digit, got {:?}", semester_digit),
                found: found.to_string(),
            });
        };

        let expected = format!("{}{}", self.semester_prefix, parity.label(&self.semester_labels));
        let expected = expected.trim();

        if found == expected {
            Ok(())
        } else {
            Err(Rejection::SemesterMismatch {
                expected: expected.to_string(),
                found: found.to_string(),
            })
        }
    }

    /// Every required heading must appear inside some line
    pub fn check_sections(&self, lines: &PageLines) -> Result<(), Rejection> {
        let missing: Vec<String> = self
            .required_headings
            .iter()
            .map(|heading| heading.trim())
            .filter(|heading| !heading.is_empty())
            .filter(|heading| !lines.iter().any(|line| line.contains(heading)))
            .map(str::to_string)
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(Rejection::MissingRequiredSections { missing })
        }
    }
}

fn line_at(lines: &PageLines, index: usize) -> &str {
    lines.get(index).unwrap_or_default()
}

/// Substring containment that does not match inside a longer word
///
/// `YEAR I` is found in `B.TECH. YEAR I (CO)` but not in `B.TECH. YEAR II`.
pub fn contains_token(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return false;
    }

    haystack.match_indices(needle).any(|(start, _)| {
        let before = haystack[..start].chars().next_back();
        let after = haystack[start + needle.len()..].chars().next();
        !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
    })
}
