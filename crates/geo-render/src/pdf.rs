//! # PDF Writer
//!
//! Serializes a [`DocumentLayout`] into PDF bytes with `lopdf`.
//!
//! ## Object Graph
//! ```text
//! Catalog ──► Pages ──┬──► Page 1 ──► Contents (stream)
//!                     ├──► Page 2 ──► Contents (stream)
//!                     └──► ...
//!             Pages.Resources ──► Font F1 (Helvetica)
//!                             └─► Font F2 (Helvetica-Bold)
//! ```
//!
//! Only the standard fonts are used, so nothing is embedded. The writer
//! sets no creation date, producer or document id: the same layout always
//! serializes to the same bytes.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream, StringFormat};

use crate::error::RenderResult;
use crate::layout::{Color, DocumentLayout, DrawOp, FontWeight, Page};
use crate::wrap::MM_PER_PT;

const FONT_REGULAR: &[u8] = b"F1";
const FONT_BOLD: &[u8] = b"F2";

fn real(value: f32) -> Object {
    // Two decimals keep the content streams stable and readable.
    Object::Real(((value * 100.0).round() / 100.0).into())
}

fn pt(mm: f32) -> f32 {
    mm / MM_PER_PT
}

fn color_ops(op: &str, color: Color) -> Operation {
    Operation::new(
        op,
        vec![
            real(f32::from(color.r) / 255.0),
            real(f32::from(color.g) / 255.0),
            real(f32::from(color.b) / 255.0),
        ],
    )
}

/// Encodes text for a WinAnsi standard font.
///
/// Latin-1 characters map to their byte; anything else becomes `?`.
fn encode_text(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match u32::from(c) {
            code @ 0x20..=0x7e | code @ 0xa0..=0xff => code as u8,
            _ => b'?',
        })
        .collect()
}

fn page_operations(page: &Page, page_height: f32) -> Vec<Operation> {
    let flip = |y: f32| pt(page_height - y);
    let mut ops = Vec::new();

    for op in &page.ops {
        match op {
            DrawOp::Rect {
                x,
                y,
                width,
                height,
                fill,
            } => {
                ops.push(color_ops("rg", *fill));
                ops.push(Operation::new(
                    "re",
                    vec![real(pt(*x)), real(flip(*y + *height)), real(pt(*width)), real(pt(*height))],
                ));
                ops.push(Operation::new("f", vec![]));
            }
            DrawOp::Line {
                x1,
                y1,
                x2,
                y2,
                width,
                color,
            } => {
                ops.push(color_ops("RG", *color));
                ops.push(Operation::new("w", vec![real(pt(*width))]));
                ops.push(Operation::new("m", vec![real(pt(*x1)), real(flip(*y1))]));
                ops.push(Operation::new("l", vec![real(pt(*x2)), real(flip(*y2))]));
                ops.push(Operation::new("S", vec![]));
            }
            DrawOp::Text {
                y,
                text,
                size,
                weight,
                color,
                ..
            } => {
                if text.is_empty() {
                    continue;
                }
                let font = match weight {
                    FontWeight::Regular => FONT_REGULAR,
                    FontWeight::Bold => FONT_BOLD,
                };
                ops.push(Operation::new("BT", vec![]));
                ops.push(color_ops("rg", *color));
                ops.push(Operation::new(
                    "Tf",
                    vec![Object::Name(font.to_vec()), real(*size)],
                ));
                ops.push(Operation::new("Td", vec![real(pt(op.left())), real(flip(*y))]));
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

/// Writes the layout as a PDF document.
pub fn write_pdf(layout: &DocumentLayout) -> RenderResult<Vec<u8>> {
    let mut doc = Document::with_version("1.5");
    let pages_id: ObjectId = doc.new_object_id();

    let regular_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let bold_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => regular_id,
            "F2" => bold_id,
        },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(layout.pages.len());
    for page in &layout.pages {
        let content = Content {
            operations: page_operations(page, layout.spec.height),
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let page_count = kids.len() as i64;
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => page_count,
        "Resources" => resources_id,
        "MediaBox" => vec![
            real(0.0),
            real(0.0),
            real(pt(layout.spec.width)),
            real(pt(layout.spec.height)),
        ],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let info_id = doc.add_object(dictionary! {
        "Title" => Object::String(encode_text(&layout.title), StringFormat::Literal),
    });
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)
        .map_err(|e| crate::error::RenderError::Pdf(e.to_string()))?;
    Ok(bytes)
}
