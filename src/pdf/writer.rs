//! # PDF Serializer
//!
//! Writes the pages a [`PdfSurface`](super::PdfSurface) collected as a PDF
//! 1.7 file. Only the subset a table document needs is produced: standard
//! Type1 fonts, text runs, stroked lines and a graphics state per stroke
//! opacity.
//!
//! ```text
//! %PDF-1.7            <- header
//! 1 0 obj ... endobj  <- catalog, page tree, fonts, graphics states,
//! 2 0 obj ... endobj     content streams, pages, info
//! ...
//! xref                <- byte offset of every object
//! trailer             <- points to the catalog and info dictionary
//! %%EOF
//! ```

use std::fmt::Write as FmtWrite;
use std::io::Write as IoWrite;

use miniz_oxide::deflate::compress_to_vec_zlib;

use crate::font::StandardFont;
use crate::model::Metadata;
use crate::surface::{Point, Stroke};

/// One page of drawing operations in top-down coordinates.
#[derive(Debug, Clone)]
pub struct PdfPage {
    pub width: f64,
    pub height: f64,
    pub ops: Vec<PageOp>,
}

impl PdfPage {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ops: Vec::new(),
        }
    }
}

/// A drawing operation on a page.
#[derive(Debug, Clone, PartialEq)]
pub enum PageOp {
    /// A single line of text. `x`/`baseline` are measured from the top-left.
    Text {
        font: StandardFont,
        size: f64,
        x: f64,
        baseline: f64,
        text: String,
    },
    Line {
        from: Point,
        to: Point,
        stroke: Stroke,
    },
}

#[derive(Debug, Default)]
pub struct PdfWriter;

/// Tracks allocated PDF objects during writing.
struct PdfBuilder {
    objects: Vec<Vec<u8>>,
    fonts: Vec<(StandardFont, usize)>,
    /// Stroke opacities below 1, each with its ExtGState object id.
    opacities: Vec<(f64, usize)>,
}

impl PdfBuilder {
    fn push(&mut self, data: Vec<u8>) -> usize {
        self.objects.push(data);
        self.objects.len() - 1
    }

    fn font_index(&self, font: StandardFont) -> usize {
        self.fonts.iter().position(|(f, _)| *f == font).unwrap_or(0)
    }

    fn opacity_index(&self, opacity: f64) -> Option<usize> {
        self.opacities
            .iter()
            .position(|(o, _)| same_opacity(*o, opacity))
    }
}

fn same_opacity(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

impl PdfWriter {
    pub fn new() -> Self {
        Self
    }

    /// Write pages to a PDF byte vector.
    pub fn write(&self, pages: &[PdfPage], metadata: &Metadata) -> Vec<u8> {
        // Object 0 is the free-list head; 1 is the catalog and 2 the page
        // tree, filled in once the page ids are known.
        let mut builder = PdfBuilder {
            objects: vec![Vec::new(), Vec::new(), Vec::new()],
            fonts: Vec::new(),
            opacities: Vec::new(),
        };

        self.register_fonts(&mut builder, pages);
        self.register_opacities(&mut builder, pages);
        let resources = self.build_resource_dict(&builder);

        let mut page_ids = Vec::with_capacity(pages.len());
        for page in pages {
            let content = self.build_content_stream(page, &builder);
            let compressed = compress_to_vec_zlib(content.as_bytes(), 6);

            let mut stream: Vec<u8> = Vec::new();
            let _ = write!(
                stream,
                "<< /Length {} /Filter /FlateDecode >>\nstream\n",
                compressed.len()
            );
            stream.extend_from_slice(&compressed);
            stream.extend_from_slice(b"\nendstream");
            let content_id = builder.push(stream);

            let page_dict = format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {:.2} {:.2}] \
                 /Contents {} 0 R /Resources {} >>",
                page.width, page.height, content_id, resources
            );
            page_ids.push(builder.push(page_dict.into_bytes()));
        }

        builder.objects[1] = b"<< /Type /Catalog /Pages 2 0 R >>".to_vec();
        let kids = page_ids
            .iter()
            .map(|id| format!("{} 0 R", id))
            .collect::<Vec<_>>()
            .join(" ");
        builder.objects[2] = format!(
            "<< /Type /Pages /Kids [{}] /Count {} >>",
            kids,
            page_ids.len()
        )
        .into_bytes();

        let info_id = builder.push(self.build_info_dict(metadata).into_bytes());

        log::debug!(
            "pdf: {} pages, {} fonts, {} objects",
            pages.len(),
            builder.fonts.len(),
            builder.objects.len()
        );
        self.serialize(&builder, info_id)
    }

    /// One Type1 font object per standard font the pages use. Helvetica is
    /// always present so every page has a font resource.
    fn register_fonts(&self, builder: &mut PdfBuilder, pages: &[PdfPage]) {
        let mut fonts: Vec<StandardFont> = pages
            .iter()
            .flat_map(|page| page.ops.iter())
            .filter_map(|op| match op {
                PageOp::Text { font, .. } => Some(*font),
                PageOp::Line { .. } => None,
            })
            .collect();
        fonts.sort();
        fonts.dedup();
        if fonts.is_empty() {
            fonts.push(StandardFont::Helvetica);
        }

        for font in fonts {
            let dict = format!(
                "<< /Type /Font /Subtype /Type1 /BaseFont /{} /Encoding /WinAnsiEncoding >>",
                font.pdf_name()
            );
            let id = builder.push(dict.into_bytes());
            builder.fonts.push((font, id));
        }
    }

    /// One ExtGState per distinct stroke opacity below 1.
    fn register_opacities(&self, builder: &mut PdfBuilder, pages: &[PdfPage]) {
        for op in pages.iter().flat_map(|page| page.ops.iter()) {
            let PageOp::Line { stroke, .. } = op else {
                continue;
            };
            let opacity = stroke.opacity.clamp(0.0, 1.0);
            if opacity >= 1.0 || builder.opacity_index(opacity).is_some() {
                continue;
            }
            let dict = format!(
                "<< /Type /ExtGState /CA {:.3} /ca {:.3} >>",
                opacity, opacity
            );
            let id = builder.push(dict.into_bytes());
            builder.opacities.push((opacity, id));
        }
    }

    fn build_resource_dict(&self, builder: &PdfBuilder) -> String {
        let fonts = builder
            .fonts
            .iter()
            .enumerate()
            .map(|(i, (_, id))| format!("/F{} {} 0 R", i, id))
            .collect::<Vec<_>>()
            .join(" ");
        let mut dict = format!("<< /Font << {} >>", fonts);
        if !builder.opacities.is_empty() {
            let states = builder
                .opacities
                .iter()
                .enumerate()
                .map(|(i, (_, id))| format!("/GS{} {} 0 R", i, id))
                .collect::<Vec<_>>()
                .join(" ");
            let _ = write!(dict, " /ExtGState << {} >>", states);
        }
        dict.push_str(" >>");
        dict
    }

    /// Build the content stream for a single page, flipping y so the
    /// top-down page coordinates land in PDF user space.
    fn build_content_stream(&self, page: &PdfPage, builder: &PdfBuilder) -> String {
        let mut stream = String::new();
        let height = page.height;

        for op in &page.ops {
            match op {
                PageOp::Text {
                    font,
                    size,
                    x,
                    baseline,
                    text,
                } => {
                    let _ = write!(
                        stream,
                        "BT\n/F{} {:.1} Tf\n{:.2} {:.2} Td\n({}) Tj\nET\n",
                        builder.font_index(*font),
                        size,
                        x,
                        height - baseline,
                        encode_winansi(text)
                    );
                }
                PageOp::Line { from, to, stroke } => {
                    stream.push_str("q\n");
                    if let Some(gs) = builder.opacity_index(stroke.opacity.clamp(0.0, 1.0)) {
                        let _ = writeln!(stream, "/GS{} gs", gs);
                    }
                    let _ = write!(
                        stream,
                        "{:.2} w\n{:.2} {:.2} m\n{:.2} {:.2} l\nS\nQ\n",
                        stroke.width,
                        from.x,
                        height - from.y,
                        to.x,
                        height - to.y
                    );
                }
            }
        }

        stream
    }

    fn build_info_dict(&self, metadata: &Metadata) -> String {
        let mut info = String::from("<< ");
        if let Some(ref title) = metadata.title {
            let _ = write!(info, "/Title ({}) ", escape_pdf_string(title));
        }
        if let Some(ref author) = metadata.author {
            let _ = write!(info, "/Author ({}) ", escape_pdf_string(author));
        }
        if let Some(ref subject) = metadata.subject {
            let _ = write!(info, "/Subject ({}) ", escape_pdf_string(subject));
        }
        let creator = metadata.creator.as_deref().unwrap_or("Folio");
        let _ = write!(
            info,
            "/Creator ({}) /Producer (Folio {}) >>",
            escape_pdf_string(creator),
            env!("CARGO_PKG_VERSION")
        );
        info
    }

    /// Serialize all objects into the final PDF byte stream.
    fn serialize(&self, builder: &PdfBuilder, info_id: usize) -> Vec<u8> {
        let mut output: Vec<u8> = Vec::new();
        let mut offsets: Vec<usize> = vec![0; builder.objects.len()];

        output.extend_from_slice(b"%PDF-1.7\n");
        output.extend_from_slice(b"%\xe2\xe3\xcf\xd3\n");

        for (i, data) in builder.objects.iter().enumerate().skip(1) {
            offsets[i] = output.len();
            let _ = write!(output, "{} 0 obj\n", i);
            output.extend_from_slice(data);
            output.extend_from_slice(b"\nendobj\n\n");
        }

        let xref_offset = output.len();
        let _ = write!(output, "xref\n0 {}\n", builder.objects.len());
        let _ = write!(output, "0000000000 65535 f \n");
        for offset in offsets.iter().skip(1) {
            let _ = write!(output, "{:010} 00000 n \n", offset);
        }

        let _ = write!(
            output,
            "trailer\n<< /Size {} /Root 1 0 R /Info {} 0 R >>\nstartxref\n{}\n%%EOF\n",
            builder.objects.len(),
            info_id,
            xref_offset
        );

        output
    }
}

/// Escape special characters in a PDF string.
fn escape_pdf_string(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('(', "\\(")
        .replace(')', "\\)")
}

/// Encode text as a WinAnsi literal string body. Characters outside the
/// encoding become `?`.
fn encode_winansi(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match unicode_to_winansi(ch).unwrap_or(b'?') {
            b'\\' => out.push_str("\\\\"),
            b'(' => out.push_str("\\("),
            b')' => out.push_str("\\)"),
            b @ 0x20..=0x7E => out.push(b as char),
            b => {
                let _ = write!(out, "\\{:03o}", b);
            }
        }
    }
    out
}

/// Map a Unicode codepoint to a WinAnsiEncoding byte value.
///
/// WinAnsiEncoding is Windows-1252: 0x20..=0x7E and 0xA0..=0xFF map
/// directly, 0x80..=0x9F holds quotes, dashes and a few letters.
pub(crate) fn unicode_to_winansi(ch: char) -> Option<u8> {
    let cp = ch as u32;
    if (0x20..=0x7E).contains(&cp) || (0xA0..=0xFF).contains(&cp) {
        return Some(cp as u8);
    }
    match cp {
        0x20AC => Some(0x80), // Euro sign
        0x201A => Some(0x82),
        0x0192 => Some(0x83),
        0x201E => Some(0x84),
        0x2026 => Some(0x85), // Horizontal ellipsis
        0x2020 => Some(0x86),
        0x2021 => Some(0x87),
        0x02C6 => Some(0x88),
        0x2030 => Some(0x89),
        0x0160 => Some(0x8A),
        0x2039 => Some(0x8B),
        0x0152 => Some(0x8C),
        0x017D => Some(0x8E),
        0x2018 => Some(0x91),
        0x2019 => Some(0x92),
        0x201C => Some(0x93),
        0x201D => Some(0x94),
        0x2022 => Some(0x95), // Bullet
        0x2013 => Some(0x96), // En dash
        0x2014 => Some(0x97), // Em dash
        0x02DC => Some(0x98),
        0x2122 => Some(0x99), // Trade mark sign
        0x0161 => Some(0x9A),
        0x203A => Some(0x9B),
        0x0153 => Some(0x9C),
        0x017E => Some(0x9E),
        0x0178 => Some(0x9F),
        _ => None,
    }
}
