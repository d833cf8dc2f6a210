use serde::{Deserialize, Serialize};

/// Non-empty, trimmed lines of a first page in reading order
///
/// Built once per document and only exposed read-only.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageLines {
    lines: Vec<String>,
}

impl PageLines {
    /// Build from raw lines, trimming each and dropping blank ones
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let lines = lines
            .into_iter()
            .map(|line| line.as_ref().trim().to_string())
            .filter(|line| !line.is_empty())
            .collect();
        Self { lines }
    }

    /// Build from extracted page text
    pub fn from_text(text: &str) -> Self {
        Self::new(text.lines())
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Line at `index`, if present
    pub fn get(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }
}

/// Font used by one text segment of the page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontRun {
    /// Font family, without subset tag or style suffix
    pub font: String,
    /// Effective size in points
    pub size: f32,
    /// Whether the face is bold
    pub bold: bool,
}

impl FontRun {
    pub fn new(font: impl Into<String>, size: f32, bold: bool) -> Self {
        Self {
            font: font.into(),
            size,
            bold,
        }
    }
}

/// Everything the validator needs from a document
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExtractedPage {
    /// Text lines of the first page
    pub lines: PageLines,
    /// Font runs in content-stream order, `None` when they could not be read
    pub fonts: Option<Vec<FontRun>>,
}

impl ExtractedPage {
    pub fn new(lines: PageLines, fonts: Option<Vec<FontRun>>) -> Self {
        Self { lines, fonts }
    }

    /// Page with text only
    pub fn text_only(lines: PageLines) -> Self {
        Self { lines, fonts: None }
    }

    pub fn font_runs(&self) -> Option<&[FontRun]> {
        self.fonts.as_deref()
    }
}
