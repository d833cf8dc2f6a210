/*!
 * Subject code parsing.
 *
 * A subject code is exactly seven ASCII characters: two letters for the
 * branch, then five digits. The first digit is the year, the second one
 * carries the semester parity.
 */

use once_cell::sync::Lazy;
use regex::Regex;

/// Regex for a complete subject code
static SUBJECT_CODE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z]{2}[0-9]{5}$").expect("Invalid subject code regex")
});

/// A syntactically valid subject code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubjectCode<'a> {
    code: &'a str,
}

impl<'a> SubjectCode<'a> {
    /// Parse a trimmed candidate, `None` if it does not have the code shape
    pub fn parse(candidate: &'a str) -> Option<Self> {
        let code = candidate.trim();
        SUBJECT_CODE_REGEX
            .is_match(code)
            .then_some(Self { code })
    }

    pub fn as_str(&self) -> &'a str {
        self.code
    }

    /// Branch code, positions 0-1
    pub fn branch_code(&self) -> &'a str {
        &self.code[..2]
    }

    /// Year digit, position 2
    pub fn year_digit(&self) -> char {
        self.nth(2)
    }

    /// Semester parity digit, position 3
    pub fn semester_digit(&self) -> char {
        self.nth(3)
    }

    // All characters are ASCII once parsed
    fn nth(&self, index: usize) -> char {
        char::from(self.code.as_bytes()[index])
    }
}
