//! Property tests for table layout.
//!
//! Random tables are laid out on a recording surface and checked for the
//! guarantees the engine makes regardless of content.

use folio::layout::columns::ColumnGeometry;
use folio::layout::page_break::{header_decision, row_decision, BreakDecision};
use folio::layout::{LayoutOptions, TableExt};
use folio::model::{PageConfig, Table};
use folio::surface::{DrawCommand, RecordingSurface, Surface};
use proptest::prelude::*;

fn table_strategy() -> impl Strategy<Value = Table> {
    (1usize..6).prop_flat_map(|cols| {
        let header = prop::collection::vec("[A-Za-z]{1,12}", cols);
        let rows = prop::collection::vec(prop::collection::vec("[a-z ]{0,40}", cols), 0..80);
        (header, rows).prop_map(|(headers, rows)| {
            rows.into_iter()
                .fold(Table::new(headers), |table, row| table.row(row))
        })
    })
}

fn laid_out(table: &Table, options: &LayoutOptions) -> RecordingSurface {
    let mut surface = RecordingSurface::from_config(&PageConfig::default());
    surface.table(table, options).unwrap();
    surface
}

proptest! {
    #[test]
    fn columns_partition_usable_width(
        count in 1usize..20,
        width in 50.0f64..2000.0,
        spacing in 0.0f64..30.0,
    ) {
        let g = ColumnGeometry::resolve(count, width, spacing);
        prop_assert!((g.container_width * count as f64 - width).abs() < 1e-6);
        prop_assert!((g.container_width - g.content_width - spacing).abs() < 1e-9);
        let last_right = g.column_x(0.0, count - 1) + g.container_width;
        prop_assert!((last_right - width).abs() < 1e-6);
    }

    #[test]
    fn taller_rows_never_break_later(
        start in 0.0f64..800.0,
        h1 in 0.0f64..300.0,
        extra in 0.0f64..300.0,
        bottom in 100.0f64..900.0,
    ) {
        let h2 = h1 + extra;
        if row_decision(start, h1, bottom) == BreakDecision::MoveToNextPage {
            prop_assert_eq!(row_decision(start, h2, bottom), BreakDecision::MoveToNextPage);
        }
        if header_decision(start, h1, bottom) == BreakDecision::MoveToNextPage {
            prop_assert_eq!(header_decision(start, h2, bottom), BreakDecision::MoveToNextPage);
        }
    }

    #[test]
    fn every_cell_is_drawn_once_in_order(table in table_strategy()) {
        let surface = laid_out(&table, &LayoutOptions::default());
        let drawn: Vec<String> = surface
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect();
        let expected: Vec<String> = table
            .headers
            .iter()
            .cloned()
            .chain(table.rows.iter().flatten().map(|cell| cell.to_string()))
            .collect();
        prop_assert_eq!(drawn, expected);
    }

    #[test]
    fn uniform_rows_start_above_the_bottom_margin(
        headers in prop::collection::vec("[A-Za-z]{1,12}", 1..6),
        cell in "[a-z ]{0,40}",
        count in 0usize..200,
    ) {
        let row = vec![cell; headers.len()];
        let table = (0..count).fold(Table::new(headers), |table, _| table.row(row.clone()));
        let surface = laid_out(&table, &LayoutOptions::default());
        let bottom = surface.page_metrics().bottom_boundary();
        for command in surface.commands() {
            if let DrawCommand::Text { origin, .. } = command {
                prop_assert!(origin.y < bottom);
            }
        }
    }

    #[test]
    fn layout_is_deterministic(table in table_strategy()) {
        let options = LayoutOptions { repeat_header: true, ..Default::default() };
        let first = laid_out(&table, &options);
        let second = laid_out(&table, &options);
        prop_assert_eq!(first.commands(), second.commands());
    }

    #[test]
    fn more_rows_never_use_fewer_pages(table in table_strategy()) {
        let pages = laid_out(&table, &LayoutOptions::default()).page_count();
        let filler: Vec<String> = vec!["more".to_string(); table.column_count()];
        let longer = table.clone().row(filler);
        prop_assert!(laid_out(&longer, &LayoutOptions::default()).page_count() >= pages);
    }
}
