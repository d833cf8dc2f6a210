/*!
 * Common test utilities for the papersort test suite
 */

use std::fs;
use std::path::{Path, PathBuf};
use anyhow::Result;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use tempfile::TempDir;

use papersort::extraction::{ExtractedPage, FontRun, PageLines};

pub const INSTITUTION: &str = "Shri G. S. Institute of Technology and Science";

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Route log output through env_logger while a test runs
pub fn init_test_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// One line of text on a generated first page
#[derive(Debug, Clone)]
pub struct PdfLine {
    pub text: String,
    pub base_font: String,
    pub size: i64,
}

impl PdfLine {
    pub fn new(text: &str, base_font: &str, size: i64) -> Self {
        Self {
            text: text.to_string(),
            base_font: base_font.to_string(),
            size,
        }
    }
}

/// Lines of a first page that follows the minimal template's typography
pub fn minimal_template_lines(code: &str) -> Vec<PdfLine> {
    vec![
        PdfLine::new(INSTITUTION, "Calibri-Bold", 18),
        PdfLine::new(code, "Calibri-Bold", 16),
        PdfLine::new("Unit 1: Introduction to the course", "Calibri", 12),
    ]
}

/// Lines of a first page that follows the detailed template
pub fn detailed_template_lines(department: &str, program: &str, semester: &str, code_line: &str) -> Vec<String> {
    vec![
        INSTITUTION.to_string(),
        department.to_string(),
        program.to_string(),
        semester.to_string(),
        code_line.to_string(),
        "COURSE OBJECTIVES".to_string(),
        "COURSE OUTCOMES".to_string(),
    ]
}

/// Build a one-page PDF with one text object per line
///
/// Each distinct base font becomes its own Type1 font resource.
pub fn build_pdf(lines: &[PdfLine]) -> Result<Vec<u8>> {
    let mut font_names: Vec<&str> = Vec::new();
    for line in lines {
        if !font_names.contains(&line.base_font.as_str()) {
            font_names.push(line.base_font.as_str());
        }
    }

    let mut operations = Vec::new();
    let mut y = 780;
    for line in lines {
        let index = font_names.iter().position(|f| *f == line.base_font).unwrap_or(0) + 1;
        operations.push(Operation::new("BT", vec![]));
        operations.push(Operation::new(
            "Tf",
            vec![Object::Name(format!("F{}", index).into_bytes()), Object::Integer(line.size)],
        ));
        operations.push(Operation::new("Td", vec![Object::Integer(72), Object::Integer(y)]));
        operations.push(Operation::new("Tj", vec![Object::string_literal(line.text.as_str())]));
        operations.push(Operation::new("ET", vec![]));
        y -= 30;
    }

    build_raw_pdf(&font_names, operations, false)
}

/// Build a one-page PDF from raw content operations
///
/// `fonts[i]` is registered as resource `F{i + 1}`. With `inherit_resources`
/// the resources sit on the `Pages` node instead of the page itself.
pub fn build_raw_pdf(fonts: &[&str], operations: Vec<Operation>, inherit_resources: bool) -> Result<Vec<u8>> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let mut font_dict = lopdf::Dictionary::new();
    for (i, base_font) in fonts.iter().enumerate() {
        let font_id = doc.add_object(dictionary! {
            "Type" => Object::Name(b"Font".to_vec()),
            "Subtype" => Object::Name(b"Type1".to_vec()),
            "BaseFont" => Object::Name(base_font.as_bytes().to_vec()),
            "Encoding" => Object::Name(b"WinAnsiEncoding".to_vec()),
        });
        font_dict.set(format!("F{}", i + 1), Object::Reference(font_id));
    }
    let resources_id = doc.add_object(dictionary! {
        "Font" => Object::Dictionary(font_dict),
    });

    let content = Content { operations };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));

    let mut page = dictionary! {
        "Type" => Object::Name(b"Page".to_vec()),
        "Parent" => Object::Reference(pages_id),
        "Contents" => Object::Reference(content_id),
        "MediaBox" => vec![Object::Integer(0), Object::Integer(0), Object::Integer(595), Object::Integer(842)],
    };
    if !inherit_resources {
        page.set("Resources", Object::Reference(resources_id));
    }
    let page_id = doc.add_object(page);

    let mut pages = dictionary! {
        "Type" => Object::Name(b"Pages".to_vec()),
        "Kids" => vec![Object::Reference(page_id)],
        "Count" => Object::Integer(1),
    };
    if inherit_resources {
        pages.set("Resources", Object::Reference(resources_id));
    }
    doc.objects.insert(pages_id, Object::Dictionary(pages));
    let catalog_id = doc.add_object(dictionary! {
        "Type" => Object::Name(b"Catalog".to_vec()),
        "Pages" => Object::Reference(pages_id),
    });
    doc.trailer.set("Root", Object::Reference(catalog_id));

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)?;
    Ok(bytes)
}

/// Write a generated PDF into `dir`
pub fn create_test_pdf(dir: &Path, filename: &str, lines: &[PdfLine]) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, build_pdf(lines)?)?;
    Ok(file_path)
}

/// Extracted page carrying the minimal template's font runs
pub fn minimal_page(code: &str) -> ExtractedPage {
    ExtractedPage::new(
        PageLines::new([INSTITUTION, code, "Unit 1: Introduction to the course"]),
        Some(vec![
            FontRun::new("Calibri", 18.0, true),
            FontRun::new("Calibri", 16.0, true),
            FontRun::new("Calibri", 12.0, false),
        ]),
    )
}
