/*!
 * Typography rules for the minimal template.
 *
 * - Segment 0 (institution heading): template family, heading size, bold
 * - Segment 1 (subject code): template family, code size, bold
 * - Every other segment: template family, at most the body size
 */

use crate::app_config::TypographyRules;
use crate::extraction::FontRun;

use super::verdict::Rejection;

/// Allowed difference between a measured size and a configured one
const SIZE_TOLERANCE: f32 = 0.05;

/// Validator for font family, size and weight of the first page
#[derive(Debug, Clone)]
pub struct TypographyValidator {
    rules: TypographyRules,
}

impl TypographyValidator {
    pub fn with_rules(rules: TypographyRules) -> Self {
        Self { rules }
    }

    /// Check the font runs of a page
    ///
    /// Missing metadata, or fewer than the two header segments, is a mismatch.
    pub fn validate(&self, runs: Option<&[FontRun]>) -> Result<(), Rejection> {
        let runs = runs.ok_or_else(|| Rejection::FontOrSizeMismatch {
            segment: 0,
            detail: "no font information available".to_string(),
        })?;

        if runs.len() < 2 {
            return Err(Rejection::FontOrSizeMismatch {
                segment: runs.len(),
                detail: "expected an institution heading and a subject code segment".to_string(),
            });
        }

        self.check_heading(0, &runs[0], self.rules.heading_size)?;
        self.check_heading(1, &runs[1], self.rules.code_size)?;

        for (segment, run) in runs.iter().enumerate().skip(2) {
            self.check_family(segment, run)?;
            if run.size > self.rules.body_max_size + SIZE_TOLERANCE {
                return Err(Rejection::FontOrSizeMismatch {
                    segment,
                    detail: format!(
                        "body text is {}pt, at most {}pt allowed",
                        run.size, self.rules.body_max_size
                    ),
                });
            }
        }

        Ok(())
    }

    fn check_heading(&self, segment: usize, run: &FontRun, size: f32) -> Result<(), Rejection> {
        self.check_family(segment, run)?;

        if (run.size - size).abs() > SIZE_TOLERANCE {
            return Err(Rejection::FontOrSizeMismatch {
                segment,
                detail: format!("expected {}pt, found {}pt", size, run.size),
            });
        }

        if !run.bold {
            return Err(Rejection::FontOrSizeMismatch {
                segment,
                detail: "expected bold text".to_string(),
            });
        }

        Ok(())
    }

    fn check_family(&self, segment: usize, run: &FontRun) -> Result<(), Rejection> {
        let family = self.rules.font_family.trim();
        if run.font == family {
            Ok(())
        } else {
            Err(Rejection::FontOrSizeMismatch {
                segment,
                detail: format!("expected font {:?}, found {:?}", family, run.font),
            })
        }
    }
}

impl Default for TypographyValidator {
    fn default() -> Self {
        Self::with_rules(TypographyRules::default())
    }
}
