//! Glyph metrics for the standard PDF fonts Folio ships with.
//!
//! Widths are the AFM advance widths in 1/1000 em for printable ASCII
//! (U+0020..=U+007E) and Latin-1 (U+00A0..=U+00FF). Oblique variants share
//! the upright widths.

/// Metrics for one standard font face.
#[derive(Debug)]
pub struct StandardFontMetrics {
    widths: &'static [u16; 95],
    latin1: &'static [u16; 96],
    /// Advance used for characters outside both tables.
    pub default_width: u16,
    pub ascender: i16,
    /// Height of the font bounding box, which is also the line height.
    pub bbox_height: u16,
}

impl StandardFontMetrics {
    /// Advance width of a character in points.
    ///
    /// The WinAnsi punctuation in 0x80..=0x9F (curly quotes, dashes, the euro
    /// sign) and anything beyond Latin-1 use `default_width`.
    pub fn char_width(&self, ch: char, font_size: f64) -> f64 {
        let units = match ch as u32 {
            code @ 0x20..=0x7E => self.widths[(code - 0x20) as usize],
            code @ 0xA0..=0xFF => self.latin1[(code - 0xA0) as usize],
            _ => self.default_width,
        };
        units as f64 * font_size / 1000.0
    }

    pub fn line_height(&self, font_size: f64) -> f64 {
        self.bbox_height as f64 * font_size / 1000.0
    }

    /// Distance from the top of a line to its baseline.
    pub fn ascent(&self, font_size: f64) -> f64 {
        self.ascender as f64 * font_size / 1000.0
    }
}

#[rustfmt::skip]
static HELVETICA_WIDTHS: [u16; 95] = [
    // space ! " # $ % & ' ( ) * + , - . /
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    // 0-9
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    // : ; < = > ? @
    278, 278, 584, 584, 584, 556, 1015,
    // A-Z
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    // [ \ ] ^ _ `
    278, 278, 278, 469, 556, 333,
    // a-z
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
    // { | } ~
    334, 260, 334, 584,
];

#[rustfmt::skip]
static HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    333, 333, 584, 584, 584, 611, 975,
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    333, 278, 333, 584, 556, 333,
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
    389, 280, 389, 584,
];

static COURIER_WIDTHS: [u16; 95] = [600; 95];

#[rustfmt::skip]
static HELVETICA_LATIN1: [u16; 96] = [
    // nbsp ¡ ¢ £ ¤ ¥ ¦ § ¨ © ª « ¬ shy ® ¯
    278, 333, 556, 556, 556, 556, 260, 556, 333, 737, 370, 556, 584, 333, 737, 333,
    // ° ± ² ³ ´ µ ¶ · ¸ ¹ º » ¼ ½ ¾ ¿
    400, 584, 333, 333, 333, 556, 537, 278, 333, 333, 365, 556, 834, 834, 834, 611,
    // À-Ï
    667, 667, 667, 667, 667, 667, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278,
    // Ð-ß
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611,
    // à-ï
    556, 556, 556, 556, 556, 556, 889, 500, 556, 556, 556, 556, 278, 278, 278, 278,
    // ð-ÿ
    556, 556, 556, 556, 556, 556, 556, 584, 611, 556, 556, 556, 556, 500, 556, 500,
];

#[rustfmt::skip]
static HELVETICA_BOLD_LATIN1: [u16; 96] = [
    278, 333, 556, 556, 556, 556, 280, 556, 333, 737, 370, 556, 584, 333, 737, 333,
    400, 584, 333, 333, 333, 611, 556, 278, 333, 333, 365, 556, 834, 834, 834, 611,
    722, 722, 722, 722, 722, 722, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278,
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611,
    556, 556, 556, 556, 556, 556, 889, 556, 556, 556, 556, 556, 278, 278, 278, 278,
    611, 611, 611, 611, 611, 611, 611, 584, 611, 611, 611, 611, 611, 556, 611, 556,
];

static COURIER_LATIN1: [u16; 96] = [600; 96];

pub static HELVETICA: StandardFontMetrics = StandardFontMetrics {
    widths: &HELVETICA_WIDTHS,
    latin1: &HELVETICA_LATIN1,
    default_width: 556,
    ascender: 718,
    bbox_height: 1156,
};

pub static HELVETICA_BOLD: StandardFontMetrics = StandardFontMetrics {
    widths: &HELVETICA_BOLD_WIDTHS,
    latin1: &HELVETICA_BOLD_LATIN1,
    default_width: 556,
    ascender: 718,
    bbox_height: 1190,
};

pub static COURIER: StandardFontMetrics = StandardFontMetrics {
    widths: &COURIER_WIDTHS,
    latin1: &COURIER_LATIN1,
    default_width: 600,
    ascender: 629,
    bbox_height: 1055,
};

pub static COURIER_BOLD: StandardFontMetrics = StandardFontMetrics {
    widths: &COURIER_WIDTHS,
    latin1: &COURIER_LATIN1,
    default_width: 600,
    ascender: 629,
    bbox_height: 1051,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn helvetica_space_width() {
        assert!((HELVETICA.char_width(' ', 12.0) - 3.336).abs() < 0.001);
    }

    #[test]
    fn helvetica_table_is_aligned() {
        // Spot checks across the table catch an off-by-one in the layout.
        assert_eq!(HELVETICA.char_width('0', 1000.0), 556.0);
        assert_eq!(HELVETICA.char_width('@', 1000.0), 1015.0);
        assert_eq!(HELVETICA.char_width('W', 1000.0), 944.0);
        assert_eq!(HELVETICA.char_width('i', 1000.0), 222.0);
        assert_eq!(HELVETICA.char_width('~', 1000.0), 584.0);
        assert_eq!(HELVETICA_BOLD.char_width('m', 1000.0), 889.0);
        assert_eq!(HELVETICA_BOLD.char_width('|', 1000.0), 280.0);
    }

    #[test]
    fn latin1_uses_afm_widths() {
        assert_eq!(HELVETICA.char_width('\u{A0}', 1000.0), 278.0);
        assert_eq!(HELVETICA.char_width('©', 1000.0), 737.0);
        assert_eq!(HELVETICA.char_width('Æ', 1000.0), 1000.0);
        assert_eq!(HELVETICA.char_width('ç', 1000.0), 500.0);
        assert_eq!(HELVETICA.char_width('ÿ', 1000.0), 500.0);
        assert_eq!(HELVETICA_BOLD.char_width('ñ', 1000.0), 611.0);
        assert_eq!(HELVETICA_BOLD.char_width('Ä', 1000.0), 722.0);
        assert_eq!(COURIER_BOLD.char_width('ü', 10.0), 6.0);
    }

    #[test]
    fn outside_latin1_uses_default_width() {
        assert_eq!(HELVETICA.char_width('€', 1000.0), 556.0);
        assert_eq!(COURIER.char_width('₹', 10.0), 6.0);
    }

    #[test]
    fn line_height_scales_with_size() {
        assert!((HELVETICA.line_height(12.0) - 13.872).abs() < 1e-9);
        assert!((COURIER_BOLD.line_height(10.0) - 10.51).abs() < 1e-9);
    }
}
