//! A surface that records what it is asked to draw.
//!
//! Every glyph has the same advance and every line the same height, which
//! makes layout arithmetic easy to predict in tests and keeps the output a
//! plain list of [`DrawCommand`]s that can be compared or serialized.

use serde::Serialize;

use super::{PageAdded, PageMetrics, Point, Stroke, Surface, TextAlign};
use crate::model::PageConfig;
use crate::text::break_into_lines;

/// One recorded paint or pagination step.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum DrawCommand {
    Text {
        page: usize,
        text: String,
        origin: Point,
        width: f64,
        align: TextAlign,
    },
    Line {
        page: usize,
        from: Point,
        to: Point,
        stroke: Stroke,
    },
    PageAdded {
        index: usize,
    },
}

#[derive(Debug, Clone)]
pub struct RecordingSurface {
    metrics: PageMetrics,
    advance: f64,
    line_height: f64,
    cursor: Point,
    page: usize,
    commands: Vec<DrawCommand>,
    closed: bool,
}

impl RecordingSurface {
    /// A surface with 6pt glyph advances and 12pt lines, cursor at the
    /// content origin of the first page.
    pub fn new(metrics: PageMetrics) -> Self {
        Self {
            metrics,
            advance: 6.0,
            line_height: 12.0,
            cursor: metrics.content_origin(),
            page: 0,
            commands: Vec::new(),
            closed: false,
        }
    }

    pub fn from_config(config: &PageConfig) -> Self {
        Self::new(PageMetrics::from_config(config))
    }

    pub fn with_glyph_metrics(mut self, advance: f64, line_height: f64) -> Self {
        self.advance = advance;
        self.line_height = line_height;
        self
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Pages in use, counting the first.
    pub fn page_count(&self) -> usize {
        self.page + 1
    }

    /// Stop accepting drawing commands.
    pub fn close(&mut self) {
        self.closed = true;
    }

    fn line_count(&self, text: &str, width: f64) -> usize {
        let advance = self.advance;
        break_into_lines(text, width, |_| advance).len()
    }
}

impl Surface for RecordingSurface {
    fn measure_wrapped_height(&self, text: &str, width: f64) -> f64 {
        self.line_count(text, width) as f64 * self.line_height
    }

    fn draw_text(&mut self, text: &str, origin: Point, width: f64, align: TextAlign) {
        let height = self.measure_wrapped_height(text, width);
        self.commands.push(DrawCommand::Text {
            page: self.page,
            text: text.to_string(),
            origin,
            width,
            align,
        });
        self.cursor = Point::new(origin.x, origin.y + height);
    }

    fn draw_line(&mut self, from: Point, to: Point, stroke: Stroke) {
        self.commands.push(DrawCommand::Line {
            page: self.page,
            from,
            to,
            stroke,
        });
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
        self.page += 1;
        self.cursor = self.metrics.content_origin();
        self.commands.push(DrawCommand::PageAdded { index: self.page });
        PageAdded {
            index: self.page,
            metrics: self.metrics,
        }
    }

    fn line_height(&self) -> f64 {
        self.line_height
    }

    fn is_available(&self) -> bool {
        !self.closed
    }
}
