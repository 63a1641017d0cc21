//! # Folio
//!
//! A page-native table engine.
//!
//! Give it a header row and any number of body rows and it flows them onto
//! pages: columns share the available width, every row is as tall as its
//! tallest wrapped cell, and a row that would crowd the bottom margin moves
//! to a fresh page instead of being sliced.
//!
//! The engine draws through the [`Surface`](surface::Surface) trait, so the
//! same layout runs against the in-memory
//! [`RecordingSurface`](surface::RecordingSurface) in tests and against
//! [`PdfSurface`](pdf::PdfSurface) for real output.
//!
//! ## Architecture
//!
//! ```text
//! Input (JSON/API)
//!       ↓
//!   [model]  Document, blocks, tables and cells
//!       ↓
//!   [layout]  Column geometry, row measurement, page breaks
//!       ↓
//!   [surface]  Measure, draw, allocate pages
//!       ↓
//!   [pdf]  Standard-font PDF surface and serializer
//! ```

pub mod error;
pub mod font;
pub mod layout;
pub mod model;
pub mod pdf;
pub mod surface;
pub mod text;

pub use error::{FolioError, Result};
pub use layout::{layout_table, layout_table_with, LayoutOptions, TableExt};
pub use model::{Cell, Document, Table};

use font::FontSpec;
use model::Block;
use pdf::{PdfSurface, PdfTableStyle};
use surface::{Point, Stroke, Surface};

/// Render a document to PDF bytes.
///
/// Blocks are drawn in order onto a single [`PdfSurface`]; tables paginate
/// themselves, everything else is placed where it is asked to be.
pub fn render(document: &Document) -> Result<Vec<u8>> {
    let mut surface = PdfSurface::new(&document.page, document.metadata.clone());
    for block in &document.content {
        draw_block(&mut surface, block)?;
    }
    log::info!("rendered {} pages", surface.page_count());
    surface.finish()
}

/// Render a document described as JSON to PDF bytes.
pub fn render_json(json: &str) -> Result<Vec<u8>> {
    let document: Document = serde_json::from_str(json)?;
    render(&document)
}

fn draw_block(surface: &mut PdfSurface, block: &Block) -> Result<()> {
    match block {
        Block::Text {
            content,
            x,
            y,
            width,
            font,
            size,
            align,
        } => {
            if let Some(font) = font {
                surface.set_font(*font);
            }
            if let Some(size) = size {
                surface.set_font_size(*size);
            }
            let cursor = surface.cursor();
            let origin = Point::new(x.unwrap_or(cursor.x), y.unwrap_or(cursor.y));
            let metrics = surface.page_metrics();
            let width = width.unwrap_or(metrics.width - metrics.margin_right - origin.x);
            surface.draw_text(content, origin, width, *align);
        }

        Block::Table {
            table,
            options,
            header_font,
            body_font,
            font_size,
        } => {
            let mut style = PdfTableStyle::default();
            if let Some(font) = header_font {
                style.header.font = *font;
            }
            if let Some(font) = body_font {
                style.body.font = *font;
            }
            if let Some(size) = font_size {
                style.header = FontSpec::new(style.header.font, *size);
                style.body = FontSpec::new(style.body.font, *size);
            }
            surface.table_with(table, options, &mut style)?;
        }

        Block::Rule { x1, x2, y, width } => {
            let y = y.unwrap_or_else(|| surface.cursor().y);
            surface.draw_line(Point::new(*x1, y), Point::new(*x2, y), Stroke::solid(*width));
        }

        Block::MoveDown { lines } => surface.move_down(*lines),

        Block::PageBreak => {
            surface.add_page();
        }
    }
    Ok(())
}
