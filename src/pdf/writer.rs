use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};

use super::layout::PlacedText;
use crate::export::HostFailure;

const PDF_VERSION: &str = "1.5";

/// Serialize positioned text pages into a PDF with a Helvetica font.
pub(super) fn write_pdf(
    pages: &[Vec<PlacedText>],
    width: f32,
    height: f32,
) -> Result<Vec<u8>, HostFailure> {
    let mut doc = Document::with_version(PDF_VERSION);
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => Object::Reference(font_id),
        },
    });

    let mut kids = Vec::with_capacity(pages.len());
    for page in pages {
        let content = Content {
            operations: page_operations(page),
        };
        let encoded = content
            .encode()
            .map_err(|e| HostFailure::new("PdfError", format!("failed to encode page: {e}")))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => Object::Reference(pages_id),
            "Contents" => Object::Reference(content_id),
        });
        kids.push(Object::Reference(page_id));
    }

    let page_count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => Object::Integer(page_count),
            "Resources" => Object::Reference(resources_id),
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(width.round() as i64),
                Object::Integer(height.round() as i64),
            ],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => Object::Reference(pages_id),
    });
    doc.trailer.set("Root", Object::Reference(catalog_id));
    doc.compress();

    let mut output = Vec::new();
    doc.save_to(&mut output)
        .map_err(|e| HostFailure::new("PdfError", format!("failed to save PDF: {e}")))?;
    Ok(output)
}

fn page_operations(page: &[PlacedText]) -> Vec<Operation> {
    let mut ops = Vec::with_capacity(page.len() * 5);
    for text in page {
        ops.push(Operation::new("BT", vec![]));
        ops.push(Operation::new(
            "Tf",
            vec![Object::Name(b"F1".to_vec()), Object::Integer(text.size)],
        ));
        ops.push(Operation::new(
            "Td",
            vec![Object::Integer(text.x), Object::Integer(text.y)],
        ));
        ops.push(Operation::new(
            "Tj",
            vec![Object::string_literal(win_ansi(&text.text))],
        ));
        ops.push(Operation::new("ET", vec![]));
    }
    ops
}

/// Encode for the standard WinAnsi font encoding. Characters outside
/// Latin-1 become `?`.
fn win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
        .collect()
}
