//! # Drawing Surfaces
//!
//! The layout engine never touches a file format. It talks to a
//! [`Surface`]: something that can measure wrapped text, paint text and
//! rules at absolute positions, and open a new page when asked.
//!
//! Coordinates are in points with the origin at the top-left corner of the
//! page and y growing downwards.
//!
//! ## Page allocation
//!
//! [`Surface::add_page`] returns a [`PageAdded`] event describing the new
//! page. Whoever asked for the page applies that event to its own state
//! before issuing the next drawing call, so layout state can never be
//! stale on the new page. There are no listeners to register and nothing
//! to unregister afterwards.

pub mod recording;

use serde::{Deserialize, Serialize};

pub use recording::{DrawCommand, RecordingSurface};

/// A position on the page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Horizontal alignment of wrapped text inside its box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// How a rule is stroked. Opacity applies to this stroke only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Stroke {
    pub width: f64,
    pub opacity: f64,
}

impl Stroke {
    pub const fn solid(width: f64) -> Self {
        Self {
            width,
            opacity: 1.0,
        }
    }

    pub const fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }
}

/// Dimensions and margins of the active page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PageMetrics {
    pub width: f64,
    pub height: f64,
    pub margin_top: f64,
    pub margin_bottom: f64,
    pub margin_left: f64,
    pub margin_right: f64,
}

impl PageMetrics {
    pub fn from_config(config: &crate::model::PageConfig) -> Self {
        let (width, height) = config.size.dimensions();
        Self {
            width,
            height,
            margin_top: config.margin.top,
            margin_bottom: config.margin.bottom,
            margin_left: config.margin.left,
            margin_right: config.margin.right,
        }
    }

    /// Width between the left and right margins.
    pub fn content_width(&self) -> f64 {
        self.width - self.margin_left - self.margin_right
    }

    /// The lowest y content may reach.
    pub fn bottom_boundary(&self) -> f64 {
        self.height - self.margin_bottom
    }

    /// Height between the top and bottom margins.
    pub fn content_height(&self) -> f64 {
        self.bottom_boundary() - self.margin_top
    }

    /// Where a fresh page's content starts.
    pub fn content_origin(&self) -> Point {
        Point::new(self.margin_left, self.margin_top)
    }
}

/// Notification that a page was allocated. Returned by
/// [`Surface::add_page`] and must be applied before the next drawing call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PageAdded {
    /// Zero-based index of the new page in the surface.
    pub index: usize,
    pub metrics: PageMetrics,
}

/// The capability set the layout engine needs from a paginated canvas.
pub trait Surface {
    /// Height `text` occupies when wrapped to `width`. Empty text is 0.
    fn measure_wrapped_height(&self, text: &str, width: f64) -> f64;

    /// Paint `text` wrapped to `width` with its first line's top at
    /// `origin`. Leaves the cursor at `origin.x`, just below the text.
    fn draw_text(&mut self, text: &str, origin: Point, width: f64, align: TextAlign);

    /// Paint a straight rule.
    fn draw_line(&mut self, from: Point, to: Point, stroke: Stroke);

    fn cursor(&self) -> Point;

    fn set_cursor(&mut self, at: Point);

    fn page_metrics(&self) -> PageMetrics;

    /// Open a new page, make it active, and move the cursor to its content
    /// origin.
    fn add_page(&mut self) -> PageAdded;

    /// Height of one line in the current text style.
    fn line_height(&self) -> f64;

    /// Whether the surface still accepts drawing commands.
    fn is_available(&self) -> bool {
        true
    }

    /// Move the cursor down by `lines` lines of the current text style.
    fn move_down(&mut self, lines: f64) {
        let at = self.cursor();
        let dy = self.line_height() * lines;
        self.set_cursor(Point::new(at.x, at.y + dy));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Edges, PageConfig, PageSize};

    #[test]
    fn metrics_from_letter_config() {
        let metrics = PageMetrics::from_config(&PageConfig::default());
        assert_eq!(metrics.width, 612.0);
        assert_eq!(metrics.content_width(), 468.0);
        assert_eq!(metrics.bottom_boundary(), 720.0);
        assert_eq!(metrics.content_height(), 648.0);
        assert_eq!(metrics.content_origin(), Point::new(72.0, 72.0));
    }

    #[test]
    fn metrics_respect_asymmetric_margins() {
        let config = PageConfig {
            size: PageSize::Custom {
                width: 300.0,
                height: 400.0,
            },
            margin: Edges {
                top: 10.0,
                right: 20.0,
                bottom: 30.0,
                left: 40.0,
            },
        };
        let metrics = PageMetrics::from_config(&config);
        assert_eq!(metrics.content_width(), 240.0);
        assert_eq!(metrics.bottom_boundary(), 370.0);
    }

    #[test]
    fn stroke_opacity_is_per_stroke() {
        let stroke = Stroke::solid(1.0).with_opacity(0.7);
        assert_eq!(stroke.width, 1.0);
        assert_eq!(stroke.opacity, 0.7);
        assert_eq!(Stroke::solid(2.0).opacity, 1.0);
    }
}
