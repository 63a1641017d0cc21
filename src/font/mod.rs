//! # Fonts
//!
//! Folio draws with the standard PDF fonts, which every viewer carries, so
//! nothing is embedded. Helvetica and Courier are available in regular,
//! bold, oblique and bold-oblique faces.

pub mod metrics;

use serde::{Deserialize, Serialize};

pub use metrics::StandardFontMetrics;

/// The standard PDF fonts Folio can measure and draw.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum StandardFont {
    #[default]
    Helvetica,
    #[serde(rename = "Helvetica-Bold")]
    HelveticaBold,
    #[serde(rename = "Helvetica-Oblique")]
    HelveticaOblique,
    #[serde(rename = "Helvetica-BoldOblique")]
    HelveticaBoldOblique,
    Courier,
    #[serde(rename = "Courier-Bold")]
    CourierBold,
    #[serde(rename = "Courier-Oblique")]
    CourierOblique,
    #[serde(rename = "Courier-BoldOblique")]
    CourierBoldOblique,
}

impl StandardFont {
    /// The PDF base font name.
    pub fn pdf_name(&self) -> &'static str {
        match self {
            Self::Helvetica => "Helvetica",
            Self::HelveticaBold => "Helvetica-Bold",
            Self::HelveticaOblique => "Helvetica-Oblique",
            Self::HelveticaBoldOblique => "Helvetica-BoldOblique",
            Self::Courier => "Courier",
            Self::CourierBold => "Courier-Bold",
            Self::CourierOblique => "Courier-Oblique",
            Self::CourierBoldOblique => "Courier-BoldOblique",
        }
    }

    pub fn metrics(&self) -> &'static StandardFontMetrics {
        match self {
            Self::Helvetica | Self::HelveticaOblique => &metrics::HELVETICA,
            Self::HelveticaBold | Self::HelveticaBoldOblique => &metrics::HELVETICA_BOLD,
            Self::Courier | Self::CourierOblique => &metrics::COURIER,
            Self::CourierBold | Self::CourierBoldOblique => &metrics::COURIER_BOLD,
        }
    }
}

/// A font face at a size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontSpec {
    pub font: StandardFont,
    pub size: f64,
}

impl FontSpec {
    pub const fn new(font: StandardFont, size: f64) -> Self {
        Self { font, size }
    }

    pub fn char_width(&self, ch: char) -> f64 {
        self.font.metrics().char_width(ch, self.size)
    }

    pub fn line_height(&self) -> f64 {
        self.font.metrics().line_height(self.size)
    }

    pub fn ascent(&self) -> f64 {
        self.font.metrics().ascent(self.size)
    }
}

impl Default for FontSpec {
    fn default() -> Self {
        Self::new(StandardFont::Helvetica, 12.0)
    }
}
