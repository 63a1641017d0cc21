//! # Table Layout Engine
//!
//! Lays a [`Table`] out onto any [`Surface`], a row at a time, breaking to a
//! new page whenever the next row no longer has room.
//!
//! ## How a table is placed
//!
//! 1. Resolve the column geometry: the usable width divided evenly among the
//!    headers, minus the column spacing for the text box.
//! 2. Measure the header row. If three header-heights don't fit below the
//!    start position, open a new page before drawing anything.
//! 3. Draw the header labels and a 2pt rule under them.
//! 4. For each body row: measure it (the tallest wrapped cell plus row
//!    spacing), decide whether it stays on this page, call the row hook,
//!    draw the cells and a light 1pt rule under the row.
//! 5. Leave the surface cursor one line below the table, back at the
//!    table's left edge.
//!
//! Page allocation goes through [`Surface::add_page`]. The [`PageAdded`]
//! event it returns is applied to the [`LayoutCursor`] immediately, so the
//! next row is always positioned against the new page.

pub mod columns;
pub mod page_break;

use serde::{Deserialize, Serialize};

use crate::error::{FolioError, Result};
use crate::model::{Cell, Table};
use crate::surface::{PageAdded, Point, Stroke, Surface, TextAlign};

pub use columns::ColumnGeometry;
use page_break::{fits_on_empty_page, header_decision, row_decision, BreakDecision};

const HEADER_RULE: Stroke = Stroke::solid(2.0);
const ROW_RULE: Stroke = Stroke::solid(1.0).with_opacity(0.7);

/// Placement options for one table.
///
/// A field left out falls back to its default; an explicit `0` for
/// `columnSpacing`, `rowSpacing` or `width` is taken as given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutOptions {
    /// Gap on the right of every column.
    pub column_spacing: f64,
    /// Vertical gap added below every row.
    pub row_spacing: f64,
    /// Total table width. Defaults to the page width between the margins.
    #[serde(alias = "width")]
    pub usable_width: Option<f64>,
    /// Left edge of the table. Defaults to the surface cursor.
    pub start_x: Option<f64>,
    /// Top of the header row. Defaults to the surface cursor.
    pub start_y: Option<f64>,
    /// Redraw the header at the top of every page the table continues on.
    pub repeat_header: bool,
    /// What to do with a row taller than an empty page.
    pub overflow: OverflowPolicy,
    /// Most pages this table may add before giving up.
    pub max_pages: Option<usize>,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            column_spacing: 15.0,
            row_spacing: 5.0,
            usable_width: None,
            start_x: None,
            start_y: None,
            repeat_header: false,
            overflow: OverflowPolicy::default(),
            max_pages: None,
        }
    }
}

/// Handling for a row that cannot fit between the margins of an empty page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OverflowPolicy {
    /// Draw it at the top of a new page and let it run past the bottom margin.
    #[default]
    Draw,
    /// Fail with [`FolioError::RowTooTall`].
    Error,
}

/// Style hooks called right before the header and each body row are drawn.
///
/// Hooks receive the concrete surface, so they can switch fonts or any other
/// state the surface exposes. Every method defaults to doing nothing.
pub trait StyleHooks<S: ?Sized> {
    fn prepare_header(&mut self, _surface: &mut S) {}

    fn prepare_row(&mut self, _surface: &mut S, _row: &[Cell], _index: usize) {}
}

impl<S: ?Sized> StyleHooks<S> for () {}

/// Style hooks built from two closures.
pub struct HookFns<FH, FR> {
    pub header: FH,
    pub row: FR,
}

impl<S, FH, FR> StyleHooks<S> for HookFns<FH, FR>
where
    S: ?Sized,
    FH: FnMut(&mut S),
    FR: FnMut(&mut S, &[Cell], usize),
{
    fn prepare_header(&mut self, surface: &mut S) {
        (self.header)(surface)
    }

    fn prepare_row(&mut self, surface: &mut S, row: &[Cell], index: usize) {
        (self.row)(surface, row, index)
    }
}

/// Vertical layout state for one table, valid on the current page only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutCursor {
    /// Left edge of the table.
    pub x: f64,
    /// Top of the row being drawn.
    pub start_y: f64,
    /// Lowest point reached by the rows drawn on this page.
    pub row_bottom: f64,
    /// Lowest y content may reach on this page.
    pub page_bottom: f64,
}

impl LayoutCursor {
    pub fn new(x: f64, start_y: f64, page_bottom: f64) -> Self {
        Self {
            x,
            start_y,
            row_bottom: 0.0,
            page_bottom,
        }
    }

    /// Re-anchor on a freshly allocated page.
    pub fn on_page_added(&mut self, event: &PageAdded) {
        self.start_y = event.metrics.margin_top;
        self.row_bottom = 0.0;
        self.page_bottom = event.metrics.bottom_boundary();
    }

    /// Record that a row reaching down to `bottom` was drawn.
    fn extend_row(&mut self, bottom: f64) {
        self.row_bottom = self.row_bottom.max(bottom);
    }

    fn advance(&mut self, row_spacing: f64) {
        self.start_y = self.row_bottom + row_spacing;
    }
}

/// Counts the pages one table adds against its optional limit.
#[derive(Debug)]
struct PageBudget {
    limit: Option<usize>,
    used: usize,
}

impl PageBudget {
    fn new(limit: Option<usize>) -> Self {
        Self { limit, used: 0 }
    }

    fn allocate<S: Surface + ?Sized>(&mut self, surface: &mut S) -> Result<PageAdded> {
        if let Some(limit) = self.limit {
            if self.used >= limit {
                return Err(FolioError::PageLimitExceeded { limit });
            }
        }
        self.used += 1;
        Ok(surface.add_page())
    }
}

/// Lay `table` out on `surface` with no style hooks.
pub fn layout_table<'s, S>(
    surface: &'s mut S,
    table: &Table,
    options: &LayoutOptions,
) -> Result<&'s mut S>
where
    S: Surface + ?Sized,
{
    layout_table_with(surface, table, options, &mut ())
}

/// Lay `table` out on `surface`, calling `hooks` before the header and each
/// row is drawn. Returns the surface for chaining.
///
/// Nothing is drawn if the surface is unavailable or the table is
/// malformed.
pub fn layout_table_with<'s, S, H>(
    surface: &'s mut S,
    table: &Table,
    options: &LayoutOptions,
    hooks: &mut H,
) -> Result<&'s mut S>
where
    S: Surface + ?Sized,
    H: StyleHooks<S> + ?Sized,
{
    if !surface.is_available() {
        return Err(FolioError::SurfaceUnavailable);
    }
    table.validate()?;

    let metrics = surface.page_metrics();
    let origin = surface.cursor();
    let usable_width = options
        .usable_width
        .unwrap_or_else(|| metrics.content_width());
    let geometry =
        ColumnGeometry::resolve(table.column_count(), usable_width, options.column_spacing);
    let cursor = LayoutCursor::new(
        options.start_x.unwrap_or(origin.x),
        options.start_y.unwrap_or(origin.y),
        metrics.bottom_boundary(),
    );

    log::trace!(
        "table: {} columns, container {:.2}pt, text {:.2}pt, start ({:.2}, {:.2})",
        geometry.count,
        geometry.container_width,
        geometry.content_width,
        cursor.x,
        cursor.start_y
    );

    let mut layout = TableLayout {
        surface,
        hooks,
        options,
        geometry,
        cursor,
        pages: PageBudget::new(options.max_pages),
    };
    layout.run(table)?;

    log::debug!(
        "table: {} rows laid out, {} pages added",
        table.rows.len(),
        layout.pages.used
    );
    Ok(layout.surface)
}

/// Method-call access to the table engine on any surface.
pub trait TableExt: Surface {
    fn table(&mut self, table: &Table, options: &LayoutOptions) -> Result<&mut Self> {
        layout_table(self, table, options)
    }

    fn table_with<H>(
        &mut self,
        table: &Table,
        options: &LayoutOptions,
        hooks: &mut H,
    ) -> Result<&mut Self>
    where
        H: StyleHooks<Self> + ?Sized,
    {
        layout_table_with(self, table, options, hooks)
    }
}

impl<S: Surface + ?Sized> TableExt for S {}

struct TableLayout<'s, 'h, 'o, S: ?Sized, H: ?Sized> {
    surface: &'s mut S,
    hooks: &'h mut H,
    options: &'o LayoutOptions,
    geometry: ColumnGeometry,
    cursor: LayoutCursor,
    pages: PageBudget,
}

impl<'s, 'h, 'o, S, H> TableLayout<'s, 'h, 'o, S, H>
where
    S: Surface + ?Sized,
    H: StyleHooks<S> + ?Sized,
{
    fn run(&mut self, table: &Table) -> Result<()> {
        self.hooks.prepare_header(&mut *self.surface);
        let header_height = self.measure_row(&table.headers);
        if header_decision(self.cursor.start_y, header_height, self.cursor.page_bottom)
            == BreakDecision::MoveToNextPage
        {
            self.new_page()?;
        }
        self.draw_header(&table.headers, header_height);

        for (index, row) in table.rows.iter().enumerate() {
            self.place_row(table, index, row)?;
        }

        let y = self.surface.cursor().y;
        self.surface.set_cursor(Point::new(self.cursor.x, y));
        self.surface.move_down(1.0);
        Ok(())
    }

    /// Tallest wrapped cell plus row spacing.
    fn measure_row<T: AsRef<str>>(&self, cells: &[T]) -> f64 {
        let tallest = cells
            .iter()
            .map(|cell| {
                self.surface
                    .measure_wrapped_height(cell.as_ref(), self.geometry.content_width)
            })
            .fold(0.0, f64::max);
        tallest + self.options.row_spacing
    }

    fn new_page(&mut self) -> Result<()> {
        let event = self.pages.allocate(&mut *self.surface)?;
        self.cursor.on_page_added(&event);
        log::debug!("table: continued on page {}", event.index + 1);
        Ok(())
    }

    fn draw_header(&mut self, headers: &[String], height: f64) {
        self.draw_cells(headers);
        self.cursor.extend_row(self.cursor.start_y + height);
        self.draw_rule(HEADER_RULE);
    }

    fn place_row(&mut self, table: &Table, index: usize, row: &[Cell]) -> Result<()> {
        let height = self.measure_row(row);

        match row_decision(self.cursor.start_y, height, self.cursor.page_bottom) {
            BreakDecision::Place => self.cursor.advance(self.options.row_spacing),
            BreakDecision::MoveToNextPage => {
                self.check_overflow(index, height)?;
                self.new_page()?;
                if self.options.repeat_header {
                    self.hooks.prepare_header(&mut *self.surface);
                    let header_height = self.measure_row(&table.headers);
                    self.draw_header(&table.headers, header_height);
                    self.cursor.advance(self.options.row_spacing);
                }
            }
        }

        self.hooks.prepare_row(&mut *self.surface, row, index);
        self.draw_cells(row);
        self.cursor.extend_row(self.cursor.start_y + height);
        self.draw_rule(ROW_RULE);
        Ok(())
    }

    fn check_overflow(&self, index: usize, height: f64) -> Result<()> {
        let metrics = self.surface.page_metrics();
        if fits_on_empty_page(height, &metrics) {
            return Ok(());
        }
        match self.options.overflow {
            OverflowPolicy::Error => Err(FolioError::RowTooTall {
                row: index,
                height,
                available: metrics.content_height(),
            }),
            OverflowPolicy::Draw => {
                log::warn!(
                    "table: row {} is {:.2}pt tall and will overflow a {:.2}pt page",
                    index,
                    height,
                    metrics.content_height()
                );
                Ok(())
            }
        }
    }

    fn draw_cells<T: AsRef<str>>(&mut self, cells: &[T]) {
        for (i, cell) in cells.iter().enumerate() {
            let origin = Point::new(
                self.geometry.column_x(self.cursor.x, i),
                self.cursor.start_y,
            );
            self.surface.draw_text(
                cell.as_ref(),
                origin,
                self.geometry.content_width,
                TextAlign::Left,
            );
        }
    }

    fn draw_rule(&mut self, stroke: Stroke) {
        let y = self.cursor.row_bottom - self.options.row_spacing * 0.5;
        self.surface.draw_line(
            Point::new(self.cursor.x, y),
            Point::new(self.cursor.x + self.geometry.usable_width, y),
            stroke,
        );
    }
}
