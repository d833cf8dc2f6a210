/*!
 * Outcome types of a template validation run.
 */

use thiserror::Error;

use crate::app_config::SemesterLabels;

/// Department resolved from the branch code
#[derive(Debug, PartialEq, Eq)]
pub struct Branch {
    /// Two-letter code, e.g. `CO`
    pub code: String,
    /// Department display name, e.g. `Computer Engineering`
    pub name: String,
}

/// Academic year resolved from the year digit
#[derive(Debug, PartialEq, Eq)]
pub struct Year {
    pub digit: char,
    pub label: String,
}

/// Odd or even half of an academic year
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SemesterParity {
    Odd,
    Even,
}

impl SemesterParity {
    /// Parity of an ASCII digit, `None` for anything else
    pub fn from_digit(digit: char) -> Option<Self> {
        digit.to_digit(10).map(|value| {
            if value % 2 == 1 {
                Self::Odd
            } else {
                Self::Even
            }
        })
    }

    /// Label printed for this parity
    pub fn label<'a>(&self, labels: &'a SemesterLabels) -> &'a str {
        match self {
            Self::Odd => labels.odd.trim(),
            Self::Even => labels.even.trim(),
        }
    }
}

/// Classification extracted from an accepted first page
///
/// Has no setters and is not `Clone`: the router takes it by value.
#[derive(Debug, PartialEq, Eq)]
pub struct ClassificationRecord {
    branch: Branch,
    year: Year,
    semester: SemesterParity,
}

impl ClassificationRecord {
    pub fn new(branch: Branch, year: Year, semester: SemesterParity) -> Self {
        Self {
            branch,
            year,
            semester,
        }
    }

    pub fn branch(&self) -> &Branch {
        &self.branch
    }

    pub fn year(&self) -> &Year {
        &self.year
    }

    pub fn semester(&self) -> SemesterParity {
        self.semester
    }
}

/// Reason a first page does not match the template
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Rejection {
    #[error("First page has {found} line(s), the template needs at least {required}")]
    InsufficientContent { found: usize, required: usize },

    #[error("College name not found or incorrect on the first line: {found:?}")]
    InstitutionMismatch { found: String },

    #[error("Subject code is missing or invalid: {found:?}")]
    InvalidSubjectCodeFormat { found: String },

    #[error("Unsupported branch code: {code}")]
    UnsupportedBranch { code: String },

    #[error("Unsupported year digit: {digit}")]
    UnsupportedYear { digit: char },

    #[error("Department line should read {expected:?}, found {found:?}")]
    DepartmentMismatch { expected: String, found: String },

    #[error("Program line {found:?} does not name an accepted program and {year_label:?}")]
    ProgramOrYearMismatch { found: String, year_label: String },

    #[error("Semester line should read {expected:?}, found {found:?}")]
    SemesterMismatch { expected: String, found: String },

    #[error("Missing required sections: {}", .missing.join(", "))]
    MissingRequiredSections { missing: Vec<String> },

    #[error("Font or font size does not match the required format (segment {segment}: {detail})")]
    FontOrSizeMismatch { segment: usize, detail: String },
}

/// Result of one validation run
#[derive(Debug, PartialEq)]
pub enum ValidationVerdict {
    Accepted(ClassificationRecord),
    Rejected(Rejection),
}

impl ValidationVerdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }

    /// Rejection message, if any
    pub fn reason(&self) -> Option<String> {
        match self {
            Self::Accepted(_) => None,
            Self::Rejected(rejection) => Some(rejection.to_string()),
        }
    }

    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            Self::Accepted(_) => None,
            Self::Rejected(rejection) => Some(rejection),
        }
    }

    pub fn into_result(self) -> Result<ClassificationRecord, Rejection> {
        match self {
            Self::Accepted(record) => Ok(record),
            Self::Rejected(rejection) => Err(rejection),
        }
    }
}

impl From<Result<ClassificationRecord, Rejection>> for ValidationVerdict {
    fn from(result: Result<ClassificationRecord, Rejection>) -> Self {
        match result {
            Ok(record) => Self::Accepted(record),
            Err(rejection) => Self::Rejected(rejection),
        }
    }
}
