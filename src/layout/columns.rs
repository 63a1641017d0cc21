//! # Column Geometry
//!
//! Columns share the usable width evenly. Each column owns a container of
//! `usable_width / count`; its text box is the container minus the
//! column spacing, which leaves the gap on the right of every column.

/// Derived column layout for one table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnGeometry {
    pub count: usize,
    pub usable_width: f64,
    /// Horizontal distance between the left edges of adjacent columns.
    pub container_width: f64,
    /// Width text is wrapped to inside each column.
    pub content_width: f64,
}

impl ColumnGeometry {
    pub fn resolve(count: usize, usable_width: f64, column_spacing: f64) -> Self {
        let container_width = usable_width / count.max(1) as f64;
        Self {
            count,
            usable_width,
            container_width,
            content_width: container_width - column_spacing,
        }
    }

    /// Left edge of column `index` for a table starting at `start_x`.
    pub fn column_x(&self, start_x: f64, index: usize) -> f64 {
        start_x + index as f64 * self.container_width
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_columns_in_200() {
        let g = ColumnGeometry::resolve(2, 200.0, 15.0);
        assert_eq!(g.container_width, 100.0);
        assert_eq!(g.content_width, 85.0);
        assert_eq!(g.column_x(10.0, 0), 10.0);
        assert_eq!(g.column_x(10.0, 1), 110.0);
    }

    #[test]
    fn invoice_columns() {
        // Eight columns across 590pt.
        let g = ColumnGeometry::resolve(8, 590.0, 15.0);
        assert!((g.container_width - 73.75).abs() < 1e-9);
        assert!((g.content_width - 58.75).abs() < 1e-9);
        assert!((g.column_x(10.0, 7) - 526.25).abs() < 1e-9);
    }

    #[test]
    fn spacing_wider_than_container_gives_negative_content() {
        let g = ColumnGeometry::resolve(4, 40.0, 15.0);
        assert!(g.content_width < 0.0);
    }
}
