use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// First-page template the documents must match
    #[serde(default)]
    pub template: TemplateConfig,

    /// Where accepted documents are filed
    #[serde(default)]
    pub routing: RoutingConfig,

    /// Which documents are picked up
    #[serde(default)]
    pub intake: IntakeConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Template variant type
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TemplateVariant {
    // @variant: Institution line, bare subject code line and typography rules
    #[default]
    Minimal,
    // @variant: Full course header with department, program, semester and sections
    Detailed,
}

impl TemplateVariant {
    // @returns: Lowercase variant identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::Minimal => "minimal".to_string(),
            Self::Detailed => "detailed".to_string(),
        }
    }
}

impl std::fmt::Display for TemplateVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

impl std::str::FromStr for TemplateVariant {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "minimal" => Ok(Self::Minimal),
            "detailed" => Ok(Self::Detailed),
            _ => Err(anyhow!("Invalid template variant: {}", s)),
        }
    }
}

/// Zero-based positions of the designated lines on the first page
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct LinePositions {
    // @field: Institution heading
    #[serde(default)]
    pub institution: usize,

    // @field: Subject code (detailed variant reads the part before ':')
    #[serde(default = "default_subject_code_line")]
    pub subject_code: usize,

    // @field: "DEPARTMENT OF ..." line (detailed only)
    #[serde(default = "default_department_line")]
    pub department: usize,

    // @field: Program and year line (detailed only)
    #[serde(default = "default_program_line")]
    pub program: usize,

    // @field: "SEMESTER- X" line (detailed only)
    #[serde(default = "default_semester_line")]
    pub semester: usize,
}

impl LinePositions {
    /// Layout of the minimal template: institution then code
    pub fn minimal() -> Self {
        Self {
            institution: 0,
            subject_code: 1,
            department: default_department_line(),
            program: default_program_line(),
            semester: default_semester_line(),
        }
    }

    /// Layout of the detailed template: header block, then "CODE: Title"
    pub fn detailed() -> Self {
        Self {
            institution: 0,
            subject_code: 4,
            department: 1,
            program: 2,
            semester: 3,
        }
    }
}

impl Default for LinePositions {
    fn default() -> Self {
        Self::minimal()
    }
}

/// Labels printed on the semester line, by parity of the code's 4th digit
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct SemesterLabels {
    #[serde(default = "default_odd_semester_label")]
    pub odd: String,

    #[serde(default = "default_even_semester_label")]
    pub even: String,
}

impl Default for SemesterLabels {
    fn default() -> Self {
        Self {
            odd: default_odd_semester_label(),
            even: default_even_semester_label(),
        }
    }
}

/// Font rules for the minimal template
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TypographyRules {
    /// Font family every segment must use
    #[serde(default = "default_font_family")]
    pub font_family: String,

    /// Point size of the institution heading (bold)
    #[serde(default = "default_heading_size")]
    pub heading_size: f32,

    /// Point size of the subject code line (bold)
    #[serde(default = "default_code_size")]
    pub code_size: f32,

    /// Largest point size allowed for body text
    #[serde(default = "default_body_max_size")]
    pub body_max_size: f32,
}

impl Default for TypographyRules {
    fn default() -> Self {
        Self {
            font_family: default_font_family(),
            heading_size: default_heading_size(),
            code_size: default_code_size(),
            body_max_size: default_body_max_size(),
        }
    }
}

/// First-page template configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TemplateConfig {
    /// Which set of checks applies
    #[serde(default)]
    pub variant: TemplateVariant,

    /// Exact text of the institution line
    #[serde(default = "default_institution_name")]
    pub institution_name: String,

    /// Branch code -> department name
    #[serde(default = "default_branches")]
    pub branches: BTreeMap<String, String>,

    /// Year digit -> year label
    #[serde(default = "default_ordinal_years")]
    pub years: BTreeMap<String, String>,

    /// Minimum number of non-empty lines on the first page
    #[serde(default = "default_min_lines")]
    pub min_lines: usize,

    /// Positions of the designated lines
    #[serde(default)]
    pub lines: LinePositions,

    /// Accepted starts of the program/year line
    #[serde(default = "default_program_prefixes")]
    pub program_prefixes: Vec<String>,

    /// Text preceding the upper-cased department name
    #[serde(default = "default_department_prefix")]
    pub department_prefix: String,

    /// Text preceding the semester label
    #[serde(default = "default_semester_prefix")]
    pub semester_prefix: String,

    /// Semester labels by parity
    #[serde(default)]
    pub semester_labels: SemesterLabels,

    /// Headings that must appear somewhere on the page
    #[serde(default = "default_required_headings")]
    pub required_headings: Vec<String>,

    /// Font rules (minimal variant)
    #[serde(default)]
    pub typography: TypographyRules,
}

impl TemplateConfig {
    /// Built-in minimal template
    pub fn minimal() -> Self {
        Self {
            variant: TemplateVariant::Minimal,
            institution_name: default_institution_name(),
            branches: default_branches(),
            years: default_ordinal_years(),
            min_lines: default_min_lines(),
            lines: LinePositions::minimal(),
            program_prefixes: default_program_prefixes(),
            department_prefix: default_department_prefix(),
            semester_prefix: default_semester_prefix(),
            semester_labels: SemesterLabels::default(),
            required_headings: default_required_headings(),
            typography: TypographyRules::default(),
        }
    }

    /// Built-in detailed template
    pub fn detailed() -> Self {
        let mut branches = default_branches();
        branches.remove("IT");

        Self {
            variant: TemplateVariant::Detailed,
            branches,
            years: default_roman_years(),
            min_lines: 7,
            lines: LinePositions::detailed(),
            ..Self::minimal()
        }
    }

    /// Preset for a variant
    pub fn preset(variant: TemplateVariant) -> Self {
        match variant {
            TemplateVariant::Minimal => Self::minimal(),
            TemplateVariant::Detailed => Self::detailed(),
        }
    }

    /// Line indices the active variant reads
    pub fn designated_lines(&self) -> Vec<(&'static str, usize)> {
        let mut lines = vec![
            ("institution", self.lines.institution),
            ("subject_code", self.lines.subject_code),
        ];
        if self.variant == TemplateVariant::Detailed {
            lines.push(("department", self.lines.department));
            lines.push(("program", self.lines.program));
            lines.push(("semester", self.lines.semester));
        }
        lines
    }
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self::minimal()
    }
}

/// Folder hierarchy used for accepted documents
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum RoutingLayout {
    /// <root>/<year>/<department>
    #[default]
    YearBranch,
    /// <root>/<department>/<year>/Semester-<label>
    BranchYearSemester,
}

/// Routing configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RoutingConfig {
    /// Root of the filed document tree
    #[serde(default = "default_output_root")]
    pub output_root: PathBuf,

    /// Segment order below the root
    #[serde(default)]
    pub layout: RoutingLayout,

    /// Prefix of the semester folder name
    #[serde(default = "default_semester_folder_prefix")]
    pub semester_folder_prefix: String,
}

impl RoutingConfig {
    /// Routing that matches a template preset
    pub fn for_variant(variant: TemplateVariant) -> Self {
        let layout = match variant {
            TemplateVariant::Minimal => RoutingLayout::YearBranch,
            TemplateVariant::Detailed => RoutingLayout::BranchYearSemester,
        };
        Self {
            layout,
            ..Self::default()
        }
    }
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            output_root: default_output_root(),
            layout: RoutingLayout::default(),
            semester_folder_prefix: default_semester_folder_prefix(),
        }
    }
}

/// Intake configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct IntakeConfig {
    /// Folder processed when no input path is given
    #[serde(default = "default_upload_dir")]
    pub upload_dir: PathBuf,

    /// The only accepted file extension, without the dot
    #[serde(default = "default_allowed_extension")]
    pub allowed_extension: String,

    /// Documents processed at the same time in folder mode
    #[serde(default = "default_concurrent_documents")]
    pub concurrent_documents: usize,
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            upload_dir: default_upload_dir(),
            allowed_extension: default_allowed_extension(),
            concurrent_documents: default_concurrent_documents(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_subject_code_line() -> usize {
    1
}

fn default_department_line() -> usize {
    1
}

fn default_program_line() -> usize {
    2
}

fn default_semester_line() -> usize {
    3
}

fn default_min_lines() -> usize {
    2
}

fn default_odd_semester_label() -> String {
    "B".to_string()
}

fn default_even_semester_label() -> String {
    "A".to_string()
}

fn default_font_family() -> String {
    "Calibri".to_string()
}

fn default_heading_size() -> f32 {
    18.0
}

fn default_code_size() -> f32 {
    16.0
}

fn default_body_max_size() -> f32 {
    14.0
}

fn default_institution_name() -> String {
    "Shri G. S. Institute of Technology and Science".to_string()
}

fn default_branches() -> BTreeMap<String, String> {
    [
        ("CO", "Computer Engineering"),
        ("EE", "Electrical Engineering"),
        ("IT", "Information Technology"),
        ("ME", "Mechanical Engineering"),
        ("CE", "Civil Engineering"),
        ("EC", "Electronics and Telecommunication Engineering"),
    ]
    .into_iter()
    .map(|(code, name)| (code.to_string(), name.to_string()))
    .collect()
}

fn default_ordinal_years() -> BTreeMap<String, String> {
    [
        ("1", "First Year"),
        ("2", "Second Year"),
        ("3", "Third Year"),
        ("4", "Fourth Year"),
    ]
    .into_iter()
    .map(|(digit, label)| (digit.to_string(), label.to_string()))
    .collect()
}

fn default_roman_years() -> BTreeMap<String, String> {
    [("1", "YEAR I"), ("2", "YEAR II"), ("3", "YEAR III"), ("4", "YEAR IV")]
        .into_iter()
        .map(|(digit, label)| (digit.to_string(), label.to_string()))
        .collect()
}

fn default_program_prefixes() -> Vec<String> {
    vec!["B.TECH.".to_string(), "M.TECH.".to_string()]
}

fn default_department_prefix() -> String {
    "DEPARTMENT OF ".to_string()
}

fn default_semester_prefix() -> String {
    "SEMESTER- ".to_string()
}

fn default_required_headings() -> Vec<String> {
    vec!["COURSE OBJECTIVES".to_string(), "COURSE OUTCOMES".to_string()]
}

fn default_output_root() -> PathBuf {
    PathBuf::from("segregated_files")
}

fn default_semester_folder_prefix() -> String {
    "Semester-".to_string()
}

fn default_upload_dir() -> PathBuf {
    PathBuf::from("uploads")
}

fn default_allowed_extension() -> String {
    "pdf".to_string()
}

fn default_concurrent_documents() -> usize {
    4
}

/// A label that ends up as a single directory name
fn is_path_segment(label: &str) -> bool {
    let label = label.trim();
    !label.is_empty() && label != "." && label != ".." && !label.contains(['/', '\\'])
}

impl Config {
    /// Configuration using one of the built-in templates and its matching layout
    pub fn for_variant(variant: TemplateVariant) -> Self {
        Self {
            template: TemplateConfig::preset(variant),
            routing: RoutingConfig::for_variant(variant),
            ..Self::default()
        }
    }

    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {:?}", path))?;

        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// Write configuration as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let config_json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;

        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write config to file: {:?}", path))
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        let template = &self.template;

        if template.institution_name.trim().is_empty() {
            return Err(anyhow!("Institution name must not be empty"));
        }

        if template.branches.is_empty() {
            return Err(anyhow!("At least one branch must be configured"));
        }
        for (code, name) in &template.branches {
            if code.len() != 2 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
                return Err(anyhow!("Branch code must be two ASCII letters: {:?}", code));
            }
            if !is_path_segment(name) {
                return Err(anyhow!("Invalid department name for branch {}: {:?}", code, name));
            }
        }

        if template.years.is_empty() {
            return Err(anyhow!("At least one year must be configured"));
        }
        for (digit, label) in &template.years {
            if digit.len() != 1 || !digit.chars().all(|c| c.is_ascii_digit()) {
                return Err(anyhow!("Year key must be a single digit: {:?}", digit));
            }
            if !is_path_segment(label) {
                return Err(anyhow!("Invalid label for year {}: {:?}", digit, label));
            }
        }

        for (name, index) in template.designated_lines() {
            if index >= template.min_lines {
                return Err(anyhow!(
                    "Line position '{}' ({}) is outside the minimum line count ({})",
                    name, index, template.min_lines
                ));
            }
        }

        let labels = [&template.semester_labels.odd, &template.semester_labels.even];
        if labels.iter().any(|label| !is_path_segment(label)) {
            return Err(anyhow!("Semester labels must be non-empty folder names"));
        }

        match template.variant {
            TemplateVariant::Detailed => {
                if template.program_prefixes.iter().all(|p| p.trim().is_empty()) {
                    return Err(anyhow!("Detailed template requires at least one program prefix"));
                }
            }
            TemplateVariant::Minimal => {
                let typography = &template.typography;
                if typography.font_family.trim().is_empty() {
                    return Err(anyhow!("Typography font family must not be empty"));
                }
                let sizes = [typography.heading_size, typography.code_size, typography.body_max_size];
                if sizes.iter().any(|size| !size.is_finite() || *size <= 0.0) {
                    return Err(anyhow!("Typography sizes must be positive"));
                }
            }
        }

        if self.routing.output_root.as_os_str().is_empty() {
            return Err(anyhow!("Output root must not be empty"));
        }
        if self.routing.layout == RoutingLayout::BranchYearSemester
            && self.routing.semester_folder_prefix.contains(['/', '\\'])
        {
            return Err(anyhow!("Semester folder prefix must not contain path separators"));
        }

        let extension = &self.intake.allowed_extension;
        if extension.is_empty() || extension.contains('.') {
            return Err(anyhow!("Allowed extension must be non-empty and without a dot: {:?}", extension));
        }

        if self.intake.concurrent_documents == 0 {
            return Err(anyhow!("concurrent_documents must be at least 1"));
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            template: TemplateConfig::default(),
            routing: RoutingConfig::default(),
            intake: IntakeConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
