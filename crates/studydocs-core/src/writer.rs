// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Serializing finished documents to PDF and handing them to a sink.

use std::fs::create_dir_all;
use std::fs::write;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

use lopdf::Object;
use lopdf::Stream;
use lopdf::StringFormat;
use lopdf::content::Content;
use lopdf::content::Operation;
use lopdf::dictionary;

use crate::canvas::Color;
use crate::canvas::Document;
use crate::canvas::DrawCommand;
use crate::canvas::Page;
use crate::canvas::metrics::FontWeight;
use crate::canvas::metrics::MM_PER_PT;
use crate::error::Fallible;
use crate::error::fail;
use crate::types::timestamp::Timestamp;

/// Bezier control distance for a quarter circle of radius 1.
const KAPPA: f32 = 0.552_284_8;
const BORDER_WIDTH_PT: f32 = 0.6;

/// Values for the PDF document information dictionary.
#[derive(Clone, Debug, PartialEq)]
pub struct DocumentInfo {
    pub title: String,
    pub creator: String,
    pub created_at: Timestamp,
}

/// Where rendered documents end up.
pub trait DocumentSink {
    fn save(&mut self, filename: &str, bytes: &[u8]) -> Fallible<()>;
}

/// Writes documents into a directory, creating it if needed.
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The path a document with this filename is written to.
    pub fn path_for(&self, filename: &str) -> PathBuf {
        self.dir.join(filename)
    }
}

impl DocumentSink for DirectorySink {
    fn save(&mut self, filename: &str, bytes: &[u8]) -> Fallible<()> {
        let mut components = Path::new(filename).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => {}
            _ => return fail(format!("invalid filename: '{filename}'")),
        }
        create_dir_all(&self.dir)?;
        let path = self.path_for(filename);
        write(&path, bytes)?;
        log::debug!("Wrote {} bytes to {}", bytes.len(), path.display());
        Ok(())
    }
}

/// Keeps saved documents in memory.
#[derive(Default)]
pub struct MemorySink {
    pub saved: Vec<(String, Vec<u8>)>,
}

impl DocumentSink for MemorySink {
    fn save(&mut self, filename: &str, bytes: &[u8]) -> Fallible<()> {
        self.saved.push((filename.to_string(), bytes.to_vec()));
        Ok(())
    }
}

/// Render `document` and pass the bytes to `sink`. Nothing reaches the sink
/// if rendering fails.
pub fn save(
    document: &Document,
    filename: &str,
    info: &DocumentInfo,
    sink: &mut dyn DocumentSink,
) -> Fallible<()> {
    let bytes = render(document, info)?;
    log::info!(
        "Saving {filename} ({} page(s), {} bytes)",
        document.page_count(),
        bytes.len()
    );
    sink.save(filename, &bytes)
}

/// Serialize `document` to PDF.
pub fn render(document: &Document, info: &DocumentInfo) -> Fallible<Vec<u8>> {
    let mut doc = lopdf::Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let regular_id = doc.add_object(font_dictionary(FontWeight::Normal));
    let bold_id = doc.add_object(font_dictionary(FontWeight::Bold));
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            font_resource(FontWeight::Normal) => regular_id,
            font_resource(FontWeight::Bold) => bold_id,
        },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(document.page_count());
    for page in document.pages() {
        let content = Content {
            operations: page_operations(page),
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
        let size = page.size();
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                pt(size.width).into(),
                pt(size.height).into(),
            ],
        });
        kids.push(page_id.into());
    }

    let pages = dictionary! {
        "Type" => "Pages",
        "Count" => Object::Integer(kids.len() as i64),
        "Kids" => kids,
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let created = info.created_at.into_inner().format("D:%Y%m%d%H%M%SZ").to_string();
    let info_id = doc.add_object(dictionary! {
        "Title" => Object::string_literal(encode_text(&info.title)),
        "Creator" => Object::string_literal(encode_text(&info.creator)),
        "Producer" => Object::string_literal(concat!("studydocs ", env!("CARGO_PKG_VERSION"))),
        "CreationDate" => Object::string_literal(created),
    });
    doc.trailer.set("Info", info_id);

    doc.compress();
    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)?;
    Ok(buffer)
}

fn font_resource(weight: FontWeight) -> &'static str {
    match weight {
        FontWeight::Normal => "F1",
        FontWeight::Bold => "F2",
    }
}

fn font_dictionary(weight: FontWeight) -> lopdf::Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => weight.base_font(),
        "Encoding" => "WinAnsiEncoding",
    }
}

fn pt(mm: f32) -> f32 {
    mm / MM_PER_PT
}

fn color_operands(color: Color) -> Vec<Object> {
    let (r, g, b) = color.unit();
    vec![r.into(), g.into(), b.into()]
}

fn page_operations(page: &Page) -> Vec<Operation> {
    let height = page.size().height;
    // Flip from top-left millimetres to bottom-left points.
    let y_pt = |y: f32| pt(height - y);
    let mut ops = Vec::new();
    for command in page.commands() {
        match command {
            DrawCommand::FilledRect { x, y, w, h, color } => {
                ops.push(Operation::new("rg", color_operands(*color)));
                ops.push(Operation::new(
                    "re",
                    vec![
                        pt(*x).into(),
                        y_pt(y + h).into(),
                        pt(*w).into(),
                        pt(*h).into(),
                    ],
                ));
                ops.push(Operation::new("f", vec![]));
            }
            DrawCommand::RoundedRect {
                x,
                y,
                w,
                h,
                radius,
                fill,
                border,
            } => {
                ops.push(Operation::new("rg", color_operands(*fill)));
                if let Some(border) = border {
                    ops.push(Operation::new("RG", color_operands(*border)));
                    ops.push(Operation::new("w", vec![BORDER_WIDTH_PT.into()]));
                }
                rounded_path(
                    &mut ops,
                    pt(*x),
                    y_pt(y + h),
                    pt(*w),
                    pt(*h),
                    pt(*radius),
                );
                let paint = if border.is_some() { "B" } else { "f" };
                ops.push(Operation::new(paint, vec![]));
            }
            DrawCommand::Text {
                text,
                x,
                y,
                size,
                weight,
                color,
            } => {
                ops.push(Operation::new("rg", color_operands(*color)));
                ops.push(Operation::new("BT", vec![]));
                ops.push(Operation::new(
                    "Tf",
                    vec![font_resource(*weight).into(), (*size).into()],
                ));
                ops.push(Operation::new(
                    "Tm",
                    vec![
                        Object::Integer(1),
                        Object::Integer(0),
                        Object::Integer(0),
                        Object::Integer(1),
                        pt(*x).into(),
                        y_pt(*y).into(),
                    ],
                ));
                ops.push(Operation::new(
                    "Tj",
                    vec![Object::String(encode_text(text), StringFormat::Literal)],
                ));
                ops.push(Operation::new("ET", vec![]));
            }
        }
    }
    ops
}

/// Rounded rectangle path with its lower-left corner at (`x`, `y`), in PDF
/// user space.
fn rounded_path(ops: &mut Vec<Operation>, x: f32, y: f32, w: f32, h: f32, r: f32) {
    let k = r * KAPPA;
    let (right, top) = (x + w, y + h);
    let op = |name: &str, values: &[f32]| {
        Operation::new(name, values.iter().map(|v| Object::from(*v)).collect())
    };
    ops.push(op("m", &[x + r, y]));
    ops.push(op("l", &[right - r, y]));
    ops.push(op("c", &[right - r + k, y, right, y + r - k, right, y + r]));
    ops.push(op("l", &[right, top - r]));
    ops.push(op("c", &[right, top - r + k, right - r + k, top, right - r, top]));
    ops.push(op("l", &[x + r, top]));
    ops.push(op("c", &[x + r - k, top, x, top - r + k, x, top - r]));
    ops.push(op("l", &[x, y + r]));
    ops.push(op("c", &[x, y + r - k, x + r - k, y, x + r, y]));
    ops.push(op("h", &[]));
}

/// Encode text for a WinAnsiEncoding simple font. Characters the encoding
/// lacks become `?`.
pub fn encode_text(text: &str) -> Vec<u8> {
    text.chars()
        .map(|ch| match ch {
            '\u{20}'..='\u{7E}' | '\u{A0}'..='\u{FF}' => ch as u8,
            '\u{20AC}' => 0x80,
            '\u{201A}' => 0x82,
            '\u{201E}' => 0x84,
            '\u{2026}' => 0x85,
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201C}' => 0x93,
            '\u{201D}' => 0x94,
            '\u{2022}' => 0x95,
            '\u{2013}' => 0x96,
            '\u{2014}' => 0x97,
            '\u{2122}' => 0x99,
            '\t' => b' ',
            _ => b'?',
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Canvas;
    use crate::canvas::PageSize;
    use crate::canvas::TextStyle;
    use crate::error::ErrorReport;

    fn info() -> DocumentInfo {
        DocumentInfo {
            title: "Algebra Flashcards".to_string(),
            creator: "Study Assistant".to_string(),
            created_at: Timestamp::from_millis(1_760_000_000_000).unwrap(),
        }
    }

    fn sample(pages: usize) -> Document {
        let mut canvas = Canvas::new(PageSize::A4);
        for i in 0..pages {
            if i > 0 {
                canvas.new_page();
            }
            canvas.fill_rect(0.0, 0.0, 210.0, 30.0, Color::rgb(59, 130, 246));
            canvas.rounded_rect(20.0, 60.0, 170.0, 70.0, 3.0, Color::rgb(248, 250, 252), Some(Color::rgb(0, 0, 0)));
            canvas.text(&format!("Page {}", i + 1), 20.0, 19.0, TextStyle::new(12.0, Color::rgb(0, 0, 0)).bold());
        }
        canvas.finish()
    }

    #[test]
    fn test_render_produces_loadable_pdf() -> Fallible<()> {
        let bytes = render(&sample(3), &info())?;
        assert!(bytes.starts_with(b"%PDF-1.5"));
        let loaded = lopdf::Document::load_mem(&bytes)?;
        assert_eq!(loaded.get_pages().len(), 3);
        Ok(())
    }

    #[test]
    fn test_encode_text() {
        assert_eq!(encode_text("Café"), vec![b'C', b'a', b'f', 0xE9]);
        assert_eq!(encode_text("\u{2022} \u{00BB}"), vec![0x95, b' ', 0xBB]);
        assert_eq!(encode_text("日本"), b"??".to_vec());
    }

    #[test]
    fn test_memory_sink() -> Fallible<()> {
        let mut sink = MemorySink::default();
        save(&sample(1), "algebra_flashcards.pdf", &info(), &mut sink)?;
        assert_eq!(sink.saved.len(), 1);
        assert_eq!(sink.saved[0].0, "algebra_flashcards.pdf");
        assert!(sink.saved[0].1.starts_with(b"%PDF"));
        Ok(())
    }

    #[test]
    fn test_directory_sink_creates_directory() -> Fallible<()> {
        let root = tempfile::tempdir()?;
        let dir = root.path().join("nested/exports");
        let mut sink = DirectorySink::new(&dir);
        save(&sample(2), "report.pdf", &info(), &mut sink)?;
        let bytes = std::fs::read(dir.join("report.pdf"))?;
        assert_eq!(lopdf::Document::load_mem(&bytes)?.get_pages().len(), 2);
        Ok(())
    }

    #[test]
    fn test_directory_sink_rejects_paths() -> Fallible<()> {
        let root = tempfile::tempdir()?;
        let mut sink = DirectorySink::new(root.path());
        for name in ["../escape.pdf", "a/b.pdf", ""] {
            assert!(sink.save(name, b"%PDF").is_err(), "{name} accepted");
        }
        Ok(())
    }

    struct FailingSink;

    impl DocumentSink for FailingSink {
        fn save(&mut self, _filename: &str, _bytes: &[u8]) -> Fallible<()> {
            fail("permission denied")
        }
    }

    #[test]
    fn test_sink_errors_propagate() {
        let result = save(&sample(1), "x.pdf", &info(), &mut FailingSink);
        assert_eq!(result, Err(ErrorReport::new("permission denied")));
    }
}
