//! # PDF Surface
//!
//! A [`Surface`] backed by real font metrics that collects pages of drawing
//! operations and serializes them with [`PdfWriter`] when finished.
//!
//! Text is measured with the AFM widths of the active standard font and
//! wrapped with the shared line breaker, so what the table engine measures
//! is exactly what ends up on the page.

pub mod writer;

use crate::error::{FolioError, Result};
use crate::font::{FontSpec, StandardFont};
use crate::layout::StyleHooks;
use crate::model::{Cell, Metadata, PageConfig};
use crate::surface::{PageAdded, PageMetrics, Point, Stroke, Surface, TextAlign};
use crate::text::{break_into_lines, BrokenLine};

pub use writer::{PageOp, PdfPage, PdfWriter};

pub struct PdfSurface {
    metrics: PageMetrics,
    metadata: Metadata,
    font: FontSpec,
    pages: Vec<PdfPage>,
    cursor: Point,
    finished: bool,
}

impl PdfSurface {
    /// A surface with one empty page, Helvetica 12 active and the cursor at
    /// the top-left of the content area.
    pub fn new(config: &PageConfig, metadata: Metadata) -> Self {
        let metrics = PageMetrics::from_config(config);
        Self {
            metrics,
            metadata,
            font: FontSpec::default(),
            pages: vec![PdfPage::new(metrics.width, metrics.height)],
            cursor: metrics.content_origin(),
            finished: false,
        }
    }

    pub fn font(&self) -> FontSpec {
        self.font
    }

    pub fn set_font(&mut self, font: StandardFont) -> &mut Self {
        self.font.font = font;
        self
    }

    pub fn set_font_size(&mut self, size: f64) -> &mut Self {
        self.font.size = size;
        self
    }

    pub fn set_font_spec(&mut self, spec: FontSpec) -> &mut Self {
        self.font = spec;
        self
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn pages(&self) -> &[PdfPage] {
        &self.pages
    }

    /// Serialize every page to PDF bytes. The surface accepts no more
    /// drawing afterwards.
    pub fn finish(&mut self) -> Result<Vec<u8>> {
        if self.finished {
            return Err(FolioError::SurfaceUnavailable);
        }
        self.finished = true;
        Ok(PdfWriter::new().write(&self.pages, &self.metadata))
    }

    fn wrap(&self, text: &str, width: f64) -> Vec<BrokenLine> {
        let font = self.font;
        break_into_lines(text, width, |ch| font.char_width(ch))
    }

    fn current_page(&mut self) -> &mut PdfPage {
        // `new` creates the first page and pages are never removed.
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }
}

impl Surface for PdfSurface {
    fn measure_wrapped_height(&self, text: &str, width: f64) -> f64 {
        self.wrap(text, width).len() as f64 * self.font.line_height()
    }

    fn draw_text(&mut self, text: &str, origin: Point, width: f64, align: TextAlign) {
        if self.finished {
            log::warn!("pdf: text drawn after finish is dropped");
            return;
        }
        let lines = self.wrap(text, width);
        let font = self.font;
        let line_height = font.line_height();
        let ascent = font.ascent();

        let page = self.current_page();
        for (i, line) in lines.iter().enumerate() {
            let slack = (width - line.width).max(0.0);
            let x = match align {
                TextAlign::Left => origin.x,
                TextAlign::Center => origin.x + slack / 2.0,
                TextAlign::Right => origin.x + slack,
            };
            page.ops.push(PageOp::Text {
                font: font.font,
                size: font.size,
                x,
                baseline: origin.y + i as f64 * line_height + ascent,
                text: line.text.trim_end().to_string(),
            });
        }

        self.cursor = Point::new(origin.x, origin.y + lines.len() as f64 * line_height);
    }

    fn draw_line(&mut self, from: Point, to: Point, stroke: Stroke) {
        if self.finished {
            log::warn!("pdf: line drawn after finish is dropped");
            return;
        }
        self.current_page()
            .ops
            .push(PageOp::Line { from, to, stroke });
    }

    fn cursor(&self) -> Point {
        self.cursor
    }

    fn set_cursor(&mut self, at: Point) {
        self.cursor = at;
    }

    fn page_metrics(&self) -> PageMetrics {
        self.metrics
    }

    fn add_page(&mut self) -> PageAdded {
        self.pages
            .push(PdfPage::new(self.metrics.width, self.metrics.height));
        self.cursor = self.metrics.content_origin();
        PageAdded {
            index: self.pages.len() - 1,
            metrics: self.metrics,
        }
    }

    fn line_height(&self) -> f64 {
        self.font.line_height()
    }

    fn is_available(&self) -> bool {
        !self.finished
    }
}

/// Table styling for [`PdfSurface`]: a bold monospace header over a
/// regular body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PdfTableStyle {
    pub header: FontSpec,
    pub body: FontSpec,
}

impl Default for PdfTableStyle {
    fn default() -> Self {
        Self {
            header: FontSpec::new(StandardFont::CourierBold, 10.0),
            body: FontSpec::new(StandardFont::Helvetica, 10.0),
        }
    }
}

impl StyleHooks<PdfSurface> for PdfTableStyle {
    fn prepare_header(&mut self, surface: &mut PdfSurface) {
        surface.set_font_spec(self.header);
    }

    fn prepare_row(&mut self, surface: &mut PdfSurface, _row: &[Cell], _index: usize) {
        surface.set_font_spec(self.body);
    }
}
