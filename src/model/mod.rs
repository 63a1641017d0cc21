//! # Document Model
//!
//! The input representation for the engine. The centre of it is [`Table`]:
//! ordered header labels plus ordered rows of cells. Around it sits a small
//! document format, a list of [`Block`]s drawn top to bottom onto pages,
//! so a whole invoice or report can be described as JSON.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{FolioError, Result};
use crate::font::StandardFont;
use crate::layout::LayoutOptions;
use crate::surface::TextAlign;

/// A table: header labels define the columns, every row fills them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub headers: Vec<String>,
    #[serde(default)]
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new<H, S>(headers: H) -> Self
    where
        H: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row, builder style.
    pub fn row<R, C>(mut self, cells: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: Into<Cell>,
    {
        self.rows.push(cells.into_iter().map(Into::into).collect());
        self
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Check that there is at least one column and that every row has
    /// exactly one cell per header.
    pub fn validate(&self) -> Result<()> {
        let expected = self.headers.len();
        if expected == 0 {
            return Err(FolioError::NoColumns);
        }
        for (row, cells) in self.rows.iter().enumerate() {
            if cells.len() != expected {
                return Err(FolioError::InvalidTableShape {
                    row,
                    expected,
                    found: cells.len(),
                });
            }
        }
        Ok(())
    }
}

/// A single cell value, kept in its display form.
///
/// JSON input may use strings, numbers, booleans or null; numbers print
/// without a trailing `.0` when they are whole.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "CellValue")]
pub struct Cell(String);

impl Cell {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Cell {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell(s.to_string())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Cell(s)
    }
}

impl From<i64> for Cell {
    fn from(n: i64) -> Self {
        Cell(n.to_string())
    }
}

impl From<u32> for Cell {
    fn from(n: u32) -> Self {
        Cell(n.to_string())
    }
}

impl From<f64> for Cell {
    fn from(n: f64) -> Self {
        Cell(n.to_string())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CellValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null(()),
}

impl From<CellValue> for Cell {
    fn from(value: CellValue) -> Self {
        match value {
            CellValue::Text(s) => Cell(s),
            CellValue::Integer(n) => Cell(n.to_string()),
            CellValue::Float(n) => Cell(n.to_string()),
            CellValue::Bool(b) => Cell(b.to_string()),
            CellValue::Null(()) => Cell(String::new()),
        }
    }
}

/// A complete document ready for rendering.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Blocks drawn in order, each starting at the cursor the previous
    /// one left behind unless it pins its own position.
    pub content: Vec<Block>,

    #[serde(default)]
    pub metadata: Metadata,

    /// Page configuration used for the first page and every page added
    /// after it.
    #[serde(default)]
    pub page: PageConfig,
}

/// Something drawn onto the page stream.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Block {
    /// Wrapped text. `x`/`y` pin the position; otherwise the cursor is used.
    /// Without an explicit `width` the text runs to the right margin.
    #[serde(rename_all = "camelCase")]
    Text {
        content: String,
        #[serde(default)]
        x: Option<f64>,
        #[serde(default)]
        y: Option<f64>,
        #[serde(default)]
        width: Option<f64>,
        #[serde(default)]
        font: Option<StandardFont>,
        #[serde(default)]
        size: Option<f64>,
        #[serde(default)]
        align: TextAlign,
    },

    /// A table laid out by the pagination engine.
    #[serde(rename_all = "camelCase")]
    Table {
        table: Table,
        #[serde(default)]
        options: LayoutOptions,
        #[serde(default)]
        header_font: Option<StandardFont>,
        #[serde(default)]
        body_font: Option<StandardFont>,
        #[serde(default)]
        font_size: Option<f64>,
    },

    /// A horizontal rule from `x1` to `x2`, at `y` or the cursor.
    Rule {
        x1: f64,
        x2: f64,
        #[serde(default)]
        y: Option<f64>,
        #[serde(default = "default_rule_width")]
        width: f64,
    },

    /// Advance the cursor by a number of lines of the current font.
    MoveDown {
        #[serde(default = "default_lines")]
        lines: f64,
    },

    /// Start a new page.
    PageBreak,
}

fn default_rule_width() -> f64 {
    1.0
}

fn default_lines() -> f64 {
    1.0
}

/// Document metadata embedded in the PDF.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Metadata {
    pub title: Option<String>,
    pub author: Option<String>,
    pub subject: Option<String>,
    pub creator: Option<String>,
}

/// Configuration for a page: size and margins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageConfig {
    /// Page size. Defaults to US Letter.
    #[serde(default = "PageSize::default")]
    pub size: PageSize,

    /// Page margins in points (1/72 inch).
    #[serde(default = "default_margin")]
    pub margin: Edges,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            size: PageSize::Letter,
            margin: default_margin(),
        }
    }
}

fn default_margin() -> Edges {
    Edges::uniform(72.0)
}

/// Standard page sizes in points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub enum PageSize {
    A4,
    A3,
    A5,
    #[default]
    Letter,
    Legal,
    Tabloid,
    Custom {
        width: f64,
        height: f64,
    },
}

impl PageSize {
    /// Returns (width, height) in points.
    pub fn dimensions(&self) -> (f64, f64) {
        match self {
            PageSize::A4 => (595.28, 841.89),
            PageSize::A3 => (841.89, 1190.55),
            PageSize::A5 => (419.53, 595.28),
            PageSize::Letter => (612.0, 792.0),
            PageSize::Legal => (612.0, 1008.0),
            PageSize::Tabloid => (792.0, 1224.0),
            PageSize::Custom { width, height } => (*width, *height),
        }
    }
}

/// Edge values (top, right, bottom, left) used for margins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Edges {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Edges {
    pub fn uniform(v: f64) -> Self {
        Self {
            top: v,
            right: v,
            bottom: v,
            left: v,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mixed_cell_values_deserialize_to_display_form() {
        let table: Table = serde_json::from_str(
            r#"{ "headers": ["Sno.", "Name", "Cost"], "rows": [[1, "Paracetamol", 12.5], [2, null, true]] }"#,
        )
        .unwrap();
        assert_eq!(table.rows[0][0].as_str(), "1");
        assert_eq!(table.rows[0][2].as_str(), "12.5");
        assert_eq!(table.rows[1][1].as_str(), "");
        assert_eq!(table.rows[1][2].as_str(), "true");
    }

    #[test]
    fn validate_rejects_short_row() {
        let table = Table::new(["A", "B"]).row(["x", "y"]).row(["z"]);
        match table.validate() {
            Err(FolioError::InvalidTableShape {
                row,
                expected,
                found,
            }) => {
                assert_eq!((row, expected, found), (1, 2, 1));
            }
            other => panic!("expected InvalidTableShape, got {:?}", other),
        }
    }

    #[test]
    fn validate_rejects_headerless_table() {
        let table = Table::default();
        assert!(matches!(table.validate(), Err(FolioError::NoColumns)));
    }

    #[test]
    fn empty_rows_are_valid() {
        assert!(Table::new(["Only"]).validate().is_ok());
    }

    #[test]
    fn page_config_defaults_to_letter() {
        let config: PageConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.size, PageSize::Letter);
        assert_eq!(config.margin, Edges::uniform(72.0));
    }

    #[test]
    fn blocks_are_tagged_by_type() {
        let doc: Document = serde_json::from_str(
            r#"{
                "content": [
                    { "type": "Text", "content": "Invoice", "align": "Center", "font": "Helvetica-Bold", "size": 20 },
                    { "type": "MoveDown" },
                    { "type": "Table", "table": { "headers": ["A"] }, "options": { "width": 300 } },
                    { "type": "Rule", "x1": 10, "x2": 600 },
                    { "type": "PageBreak" }
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(doc.content.len(), 5);
        assert!(matches!(
            doc.content[0],
            Block::Text {
                align: TextAlign::Center,
                font: Some(StandardFont::HelveticaBold),
                ..
            }
        ));
        assert!(matches!(doc.content[1], Block::MoveDown { lines } if lines == 1.0));
        match &doc.content[2] {
            Block::Table { options, .. } => assert_eq!(options.usable_width, Some(300.0)),
            other => panic!("expected table block, got {:?}", other),
        }
    }
}
