//! # Page Break Decisions
//!
//! The rules that decide whether the next row stays on the current page.
//!
//! Both checks demand room for three rows of the measured height, not one.
//! A header therefore never lands at the foot of a page with no room for a
//! body row under it, and body rows stop short of the bottom margin rather
//! than packing it tight.

use crate::surface::PageMetrics;

/// How many row-heights of room a row needs before it is placed.
pub const HEADROOM_ROWS: f64 = 3.0;

/// What to do with the next row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakDecision {
    /// Place the row on the current page.
    Place,
    /// Allocate a new page first.
    MoveToNextPage,
}

/// Decide whether the header row can start at `start_y`.
pub fn header_decision(start_y: f64, header_height: f64, page_bottom: f64) -> BreakDecision {
    if start_y + HEADROOM_ROWS * header_height > page_bottom {
        BreakDecision::MoveToNextPage
    } else {
        BreakDecision::Place
    }
}

/// Decide whether a body row stays on the current page.
///
/// `start_y` is the top of the previous row (or of the header for the first
/// body row), not where this row would start.
pub fn row_decision(start_y: f64, row_height: f64, page_bottom: f64) -> BreakDecision {
    if start_y + HEADROOM_ROWS * row_height < page_bottom {
        BreakDecision::Place
    } else {
        BreakDecision::MoveToNextPage
    }
}

/// Whether a row of this height fits between the margins of an empty page.
pub fn fits_on_empty_page(row_height: f64, metrics: &PageMetrics) -> bool {
    row_height <= metrics.content_height()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_with_room_is_placed() {
        assert_eq!(header_decision(100.0, 20.0, 720.0), BreakDecision::Place);
    }

    #[test]
    fn header_exactly_at_limit_is_placed() {
        // 660 + 3 * 20 == 720 is not strictly greater.
        assert_eq!(header_decision(660.0, 20.0, 720.0), BreakDecision::Place);
    }

    #[test]
    fn header_without_headroom_moves() {
        assert_eq!(
            header_decision(661.0, 20.0, 720.0),
            BreakDecision::MoveToNextPage
        );
    }

    #[test]
    fn row_exactly_at_limit_moves() {
        // Rows need strictly less than the bottom.
        assert_eq!(
            row_decision(660.0, 20.0, 720.0),
            BreakDecision::MoveToNextPage
        );
        assert_eq!(row_decision(659.0, 20.0, 720.0), BreakDecision::Place);
    }

    #[test]
    fn taller_rows_break_no_later() {
        let mut broke = false;
        for h in (1..200).map(|h| h as f64) {
            let decision = row_decision(300.0, h, 720.0);
            if broke {
                assert_eq!(decision, BreakDecision::MoveToNextPage, "height {h}");
            }
            broke = decision == BreakDecision::MoveToNextPage;
        }
        assert!(broke);
    }

    #[test]
    fn empty_page_capacity() {
        let metrics = PageMetrics {
            width: 612.0,
            height: 792.0,
            margin_top: 72.0,
            margin_bottom: 72.0,
            margin_left: 72.0,
            margin_right: 72.0,
        };
        assert!(fits_on_empty_page(648.0, &metrics));
        assert!(!fits_on_empty_page(648.5, &metrics));
    }
}
