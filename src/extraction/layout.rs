/*!
 * Lines and font runs of a page, read from its content stream.
 *
 * One pass over the text operators yields both views of the page, so the
 * n-th line and the font runs shown on it always come from the same
 * operators.
 *
 * A line ends at every `ET`, at `T*`, `'` and `"`, and whenever `Td`, `TD`
 * or `Tm` moves the baseline. A run is a stretch of shown text on one line
 * that keeps the same font and size. The effective size is the `Tf` size
 * scaled by the vertical component of the text matrix; the CTM (`cm`) is
 * not taken into account.
 */

use std::collections::BTreeMap;

use log::debug;
use lopdf::content::Operation;
use lopdf::{Dictionary, Document, Object, ObjectId};

use super::model::{FontRun, PageLines};

/// Font weights at or above this value count as bold
const BOLD_FONT_WEIGHT: f32 = 600.0;

/// Style keywords that mark a bold face in a font name
const BOLD_MARKERS: [&str; 4] = ["bold", "black", "heavy", "semibold"];

/// Vendor suffixes glued to a family name (`ArialMT`, `TimesNewRomanPSMT`)
const FAMILY_SUFFIXES: [&str; 2] = ["MT", "PS"];

/// Baseline moves smaller than this stay on the same line
const BASELINE_EPSILON: f32 = 0.01;

/// TJ offsets below this (in thousandths of an em) read as a word gap
const WORD_GAP: i64 = -100;

/// Lines and font runs of one page
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PageLayout {
    pub lines: PageLines,
    pub runs: Vec<FontRun>,
}

/// Family, weight and text encoding of a font resource
#[derive(Debug, Clone, PartialEq)]
struct FontFace {
    family: String,
    bold: bool,
    encoding: String,
}

/// Text state tracked while walking the content stream
#[derive(Debug)]
struct TextState {
    face: Option<FontFace>,
    size: f32,
    matrix_scale: f32,
    vertical_scale: f32,
    leading: f32,
    baseline: f32,
}

impl Default for TextState {
    fn default() -> Self {
        Self {
            face: None,
            size: 0.0,
            matrix_scale: 1.0,
            vertical_scale: 1.0,
            leading: 0.0,
            baseline: 0.0,
        }
    }
}

impl TextState {
    fn run(&self) -> FontRun {
        let (family, bold) = self
            .face
            .as_ref()
            .map_or((String::new(), false), |face| (face.family.clone(), face.bold));
        FontRun::new(family, self.size * self.matrix_scale, bold)
    }

    fn encoding(&self) -> Option<&str> {
        self.face.as_ref().map(|face| face.encoding.as_str())
    }
}

/// Accumulates lines and runs over the operators of one page
#[derive(Debug, Default)]
struct LayoutWalker {
    state: TextState,
    lines: Vec<String>,
    line: String,
    runs: Vec<FontRun>,
    open: Option<FontRun>,
}

impl LayoutWalker {
    fn apply(&mut self, operation: &Operation, faces: &BTreeMap<Vec<u8>, FontFace>) {
        let operands = &operation.operands;

        match operation.operator.as_str() {
            "BT" => {
                self.break_line();
                self.state.matrix_scale = 1.0;
                self.state.vertical_scale = 1.0;
                self.state.baseline = 0.0;
            }
            "ET" => self.break_line(),
            "Tf" => {
                let name = operands.first().and_then(|o| o.as_name().ok());
                self.state.face = name.and_then(|name| faces.get(name).cloned());
                self.state.size = operand(operands, 1).unwrap_or(0.0);
            }
            "TL" => self.state.leading = operand(operands, 0).unwrap_or(0.0),
            "Td" | "TD" => {
                let ty = operand(operands, 1).unwrap_or(0.0);
                if operation.operator == "TD" {
                    self.state.leading = -ty;
                }
                self.move_baseline(self.state.baseline + ty * self.state.vertical_scale);
            }
            "Tm" => {
                let c = operand(operands, 2).unwrap_or(0.0);
                let d = operand(operands, 3).unwrap_or(1.0);
                self.state.matrix_scale = (c * c + d * d).sqrt();
                self.state.vertical_scale = d;
                self.move_baseline(operand(operands, 5).unwrap_or(0.0));
            }
            "T*" => self.next_line(),
            "'" => {
                self.next_line();
                self.show(operands);
            }
            "\"" => {
                self.next_line();
                self.show(operands.get(2..).unwrap_or_default());
            }
            "Tj" | "TJ" => self.show(operands),
            _ => {}
        }
    }

    fn finish(mut self) -> PageLayout {
        self.break_line();
        PageLayout {
            lines: PageLines::new(self.lines),
            runs: self.runs,
        }
    }

    fn show(&mut self, operands: &[Object]) {
        let encoding = self.state.encoding().map(str::to_string);
        collect_text(&mut self.line, encoding.as_deref(), operands, false);

        if shows_text(operands) {
            let run = self.state.run();
            match &self.open {
                Some(current) if *current == run => {}
                _ => {
                    self.close_run();
                    self.open = Some(run);
                }
            }
        }
    }

    fn move_baseline(&mut self, baseline: f32) {
        if (baseline - self.state.baseline).abs() > BASELINE_EPSILON {
            self.break_line();
        }
        self.state.baseline = baseline;
    }

    fn next_line(&mut self) {
        self.break_line();
        self.state.baseline -= self.state.leading * self.state.vertical_scale;
    }

    fn break_line(&mut self) {
        self.close_run();
        if !self.line.is_empty() {
            self.lines.push(std::mem::take(&mut self.line));
        }
    }

    fn close_run(&mut self) {
        if let Some(run) = self.open.take() {
            self.runs.push(run);
        }
    }
}

/// Read the lines and font runs of a page in content-stream order
pub fn read_page(doc: &Document, page_id: ObjectId) -> lopdf::Result<PageLayout> {
    let faces = page_fonts(doc, page_id);
    let content = doc.get_and_decode_page_content(page_id)?;

    let mut walker = LayoutWalker::default();
    for operation in &content.operations {
        walker.apply(operation, &faces);
    }
    let layout = walker.finish();

    debug!(
        "Read {} line(s) and {} font run(s) on page {:?}",
        layout.lines.len(),
        layout.runs.len(),
        page_id
    );
    Ok(layout)
}

fn operand(operands: &[Object], index: usize) -> Option<f32> {
    operands.get(index).and_then(|o| o.as_float().ok())
}

fn collect_text(line: &mut String, encoding: Option<&str>, operands: &[Object], in_array: bool) {
    for operand in operands {
        match operand {
            Object::String(bytes, _) => line.push_str(&Document::decode_text(encoding, bytes)),
            Object::Array(items) => collect_text(line, encoding, items, true),
            Object::Integer(offset) if in_array && *offset < WORD_GAP => line.push(' '),
            Object::Real(offset) if in_array && (*offset as i64) < WORD_GAP => line.push(' '),
            _ => {}
        }
    }
}

/// Whether text-showing operands contain anything but spaces
fn shows_text(operands: &[Object]) -> bool {
    operands.iter().any(|operand| match operand {
        Object::String(bytes, _) => bytes.iter().any(|b| !b.is_ascii_whitespace()),
        Object::Array(items) => shows_text(items),
        _ => false,
    })
}

fn resolve<'a>(doc: &'a Document, object: &'a Object) -> Option<&'a Object> {
    match object {
        Object::Reference(id) => doc.get_object(*id).ok(),
        other => Some(other),
    }
}

fn resolve_dict<'a>(doc: &'a Document, object: &'a Object) -> Option<&'a Dictionary> {
    resolve(doc, object).and_then(|o| o.as_dict().ok())
}

/// Font resources visible from a page, following inherited `Resources`
fn page_fonts(doc: &Document, page_id: ObjectId) -> BTreeMap<Vec<u8>, FontFace> {
    let mut faces = BTreeMap::new();
    let mut node = doc.get_object(page_id).ok().and_then(|o| o.as_dict().ok());

    while let Some(dict) = node {
        let fonts = dict
            .get(b"Resources")
            .ok()
            .and_then(|r| resolve_dict(doc, r))
            .and_then(|resources| resources.get(b"Font").ok())
            .and_then(|f| resolve_dict(doc, f));

        if let Some(fonts) = fonts {
            for (name, font) in fonts.iter() {
                if faces.contains_key(name) {
                    continue;
                }
                if let Some(font) = resolve_dict(doc, font) {
                    faces.insert(name.clone(), describe_font(doc, font));
                }
            }
        }

        node = dict.get(b"Parent").ok().and_then(|p| resolve_dict(doc, p));
    }

    faces
}

fn describe_font(doc: &Document, font: &Dictionary) -> FontFace {
    let base_font = font
        .get(b"BaseFont")
        .ok()
        .and_then(|o| o.as_name().ok())
        .map(|name| String::from_utf8_lossy(name).into_owned())
        .unwrap_or_default();

    let (family, named_bold) = parse_base_font(&base_font);

    let weight = font
        .get(b"FontDescriptor")
        .ok()
        .and_then(|d| resolve_dict(doc, d))
        .and_then(|descriptor| descriptor.get(b"FontWeight").ok())
        .and_then(|w| w.as_float().ok());

    FontFace {
        family,
        bold: named_bold || weight.is_some_and(|w| w >= BOLD_FONT_WEIGHT),
        encoding: font.get_font_encoding().to_string(),
    }
}

/// Split a `BaseFont` name into family and boldness
///
/// `ABCDEF+Calibri-Bold` gives `("Calibri", true)`, `Calibri,Italic` gives
/// `("Calibri", false)`, `ArialMT` gives `("Arial", false)`.
pub fn parse_base_font(base_font: &str) -> (String, bool) {
    let name = match base_font.split_once('+') {
        Some((tag, rest)) if tag.len() == 6 && tag.chars().all(|c| c.is_ascii_uppercase()) => rest,
        _ => base_font,
    };

    let mut family = name.split(['-', ',']).next().unwrap_or(name).trim();
    for suffix in FAMILY_SUFFIXES {
        family = match family.strip_suffix(suffix) {
            Some(stripped) if !stripped.is_empty() => stripped,
            _ => family,
        };
    }

    let lowered = name.to_lowercase();
    let bold = BOLD_MARKERS.iter().any(|marker| lowered.contains(marker));

    (family.to_string(), bold)
}
