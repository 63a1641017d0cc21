//! # Text Wrapping
//!
//! Greedy line breaking shared by every surface. Break opportunities come
//! from UAX#14, so spaces, hyphens and CJK boundaries all work; newlines
//! force a break. A word wider than the line is split between characters.
//!
//! Measurement is supplied by the caller as a per-character advance, which
//! keeps this module independent of any particular font.

use unicode_linebreak::{linebreaks, BreakOpportunity};

/// A line of text after line-breaking.
#[derive(Debug, Clone, PartialEq)]
pub struct BrokenLine {
    pub text: String,
    /// Width excluding trailing spaces.
    pub width: f64,
}

/// Compute UAX#14 break opportunities indexed by char position.
///
/// Entry `i` is the opportunity *before* char `i`. Index 0 is always `None`.
fn compute_break_opportunities(text: &str) -> Vec<Option<BreakOpportunity>> {
    let char_count = text.chars().count();
    let mut result = vec![None; char_count];

    // linebreaks() yields the byte offset AFTER each break.
    let mut byte_to_char = vec![0usize; text.len() + 1];
    for (char_idx, (byte_idx, _)) in text.char_indices().enumerate() {
        byte_to_char[byte_idx] = char_idx;
    }
    byte_to_char[text.len()] = char_count;

    for (byte_offset, opp) in linebreaks(text) {
        let char_idx = byte_to_char[byte_offset];
        if char_idx < char_count {
            result[char_idx] = Some(opp);
        }
    }

    result
}

fn is_newline(ch: char) -> bool {
    matches!(ch, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

/// Break `text` into lines no wider than `max_width`.
///
/// Empty text yields no lines at all. Every other input yields at least one
/// line, and each line holds at least one character, so a non-positive
/// `max_width` degrades to one character per line instead of looping.
pub fn break_into_lines<F>(text: &str, max_width: f64, advance: F) -> Vec<BrokenLine>
where
    F: Fn(char) -> f64,
{
    if text.is_empty() {
        return Vec::new();
    }

    let chars: Vec<char> = text.chars().collect();
    let widths: Vec<f64> = chars.iter().map(|&ch| advance(ch)).collect();
    let break_opps = compute_break_opportunities(text);

    let mut lines = Vec::new();
    let mut line_start = 0;
    let mut line_width = 0.0;
    let mut last_break_point: Option<usize> = None;

    for (i, &ch) in chars.iter().enumerate() {
        if i > 0 {
            match break_opps[i] {
                Some(BreakOpportunity::Mandatory) => {
                    let end = if is_newline(chars[i - 1]) { i - 1 } else { i };
                    lines.push(make_line(&chars[line_start..end], &widths[line_start..end]));
                    line_start = i;
                    line_width = 0.0;
                    last_break_point = None;
                }
                Some(BreakOpportunity::Allowed) => {
                    last_break_point = Some(i - 1);
                }
                None => {}
            }
        }

        if is_newline(ch) {
            continue;
        }

        let char_width = widths[i];
        if line_width + char_width > max_width && line_start < i {
            if let Some(bp) = last_break_point.filter(|&bp| bp >= line_start) {
                let break_at = bp + 1;
                lines.push(make_line(
                    &chars[line_start..break_at],
                    &widths[line_start..break_at],
                ));
                line_start = break_at;
                line_width = widths[line_start..=i].iter().sum();
                last_break_point = None;
                continue;
            }

            // No break opportunity on this line: split the word here.
            lines.push(make_line(&chars[line_start..i], &widths[line_start..i]));
            line_start = i;
            line_width = char_width;
            last_break_point = None;
            continue;
        }

        line_width += char_width;
    }

    // The tail always holds its own terminating newline, if any, so a text
    // ending in one newline does not open an extra line. A tail made only
    // of a newline is a blank line closed by it.
    if line_start < chars.len() {
        lines.push(make_line(&chars[line_start..], &widths[line_start..]));
    }

    lines
}

fn make_line(chars: &[char], widths: &[f64]) -> BrokenLine {
    let kept: Vec<(char, f64)> = chars
        .iter()
        .zip(widths)
        .filter(|(c, _)| !is_newline(**c))
        .map(|(c, w)| (*c, *w))
        .collect();

    let mut end = kept.len();
    while end > 0 && kept[end - 1].0 == ' ' {
        end -= 1;
    }

    BrokenLine {
        text: kept.iter().map(|(c, _)| *c).collect(),
        width: kept[..end].iter().map(|(_, w)| w).sum(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mono(_: char) -> f64 {
        6.0
    }

    #[test]
    fn test_single_line() {
        let lines = break_into_lines("Hello", 200.0, mono);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text, "Hello");
        assert_eq!(lines[0].width, 30.0);
    }

    #[test]
    fn test_line_break_at_space() {
        // "Hello " fits in 40pt, "World" goes to the next line.
        let lines = break_into_lines("Hello World", 40.0, mono);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text, "Hello ");
        assert_eq!(lines[0].width, 30.0, "trailing space is not counted");
        assert_eq!(lines[1].text, "World");
    }

    #[test]
    fn test_explicit_newline() {
        let lines = break_into_lines("Hello\nWorld", 200.0, mono);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text, "Hello");
        assert_eq!(lines[1].text, "World");
    }

    #[test]
    fn test_trailing_newline_does_not_add_line() {
        let lines = break_into_lines("Hello\n", 200.0, mono);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text, "Hello");
    }

    #[test]
    fn test_empty_string() {
        assert!(break_into_lines("", 200.0, mono).is_empty());
    }

    #[test]
    fn test_long_word_is_split() {
        // 10 chars at 6pt in a 30pt column: 5 per line.
        let lines = break_into_lines("ABCDEFGHIJ", 30.0, mono);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text, "ABCDE");
        assert_eq!(lines[1].text, "FGHIJ");
    }

    #[test]
    fn test_zero_width_makes_progress() {
        let lines = break_into_lines("abc", 0.0, mono);
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_trailing_blank_line_is_kept() {
        // The first newline closes "a", the second closes an empty line.
        let lines = break_into_lines("a\n\n", 200.0, mono);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text, "a");
        assert_eq!(lines[1].text, "");
        assert_eq!(break_into_lines("a\r\n\r\n", 200.0, mono).len(), 2);
        assert_eq!(break_into_lines("a\n\nb", 200.0, mono).len(), 3);
    }

    #[test]
    fn test_lone_newline_is_one_blank_line() {
        assert_eq!(break_into_lines("\n", 200.0, mono).len(), 1);
    }
}
