use std::io;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use resvg::{tiny_skia, usvg};

pub const OG_WIDTH: u32 = 1200;
pub const OG_HEIGHT: u32 = 630;

const PADDING: f32 = 60.0;
const TITLE_SIZE: f32 = 56.0;
const TITLE_LINE_HEIGHT: f32 = TITLE_SIZE * 1.3;
const LABEL_SIZE: f32 = 24.0;
const LABEL_GAP: f32 = 30.0;
// Baseline offset from the top of a line box
const ASCENT_RATIO: f32 = 0.8;

/// Rasterizes the Open-Graph card for a post title. `site_label` is the small
/// caption under the title, usually the blog domain. Fonts are loaded once at
/// construction and reused for every card of the build.
pub struct OgImage {
    opt: usvg::Options<'static>,
}

impl OgImage {
    pub fn new(font_file: Option<PathBuf>) -> io::Result<OgImage> {
        let mut opt = usvg::Options::default();
        load_fonts(opt.fontdb_mut(), font_file.as_deref())?;
        Ok(OgImage { opt })
    }

    pub fn render_png(&self, title: &str, site_label: &str) -> io::Result<Vec<u8>> {
        let svg = build_svg(title, site_label);

        let tree = usvg::Tree::from_str(&svg, &self.opt).map_err(|e| {
            io::Error::new(ErrorKind::InvalidData, format!("Error building OG image tree: {}", e))
        })?;

        let mut pixmap = tiny_skia::Pixmap::new(OG_WIDTH, OG_HEIGHT)
            .ok_or(io::Error::new(ErrorKind::Other, "Could not allocate OG pixmap"))?;
        resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

        pixmap.encode_png().map_err(|e| {
            io::Error::new(ErrorKind::InvalidData, format!("Error encoding OG png: {}", e))
        })
    }
}

fn load_fonts(db: &mut usvg::fontdb::Database, font_file: Option<&Path>) -> io::Result<()> {
    db.load_system_fonts();

    let Some(font_file) = font_file else {
        return Ok(());
    };

    db.load_font_file(font_file).map_err(|e| {
        io::Error::new(e.kind(), format!("Error loading font {}: {}", font_file.display(), e))
    })?;

    // Point the generic family at the configured font so the <text> nodes
    // below pick it up
    let family = db.faces()
        .filter(|face| match &face.source {
            usvg::fontdb::Source::File(path) => path.as_path() == font_file,
            _ => false,
        })
        .find_map(|face| face.families.first().map(|(name, _)| name.clone()));
    if let Some(family) = family {
        db.set_sans_serif_family(family);
    }

    Ok(())
}

/// Fixed two-node layout from the card design: wrapped title over a small
/// site label, centered vertically on a dark gradient.
pub fn build_svg(title: &str, site_label: &str) -> String {
    let lines = wrap_title(title, OG_WIDTH as f32 - 2.0 * PADDING);

    let block_height = lines.len() as f32 * TITLE_LINE_HEIGHT + LABEL_GAP + LABEL_SIZE;
    let top = (OG_HEIGHT as f32 - block_height) / 2.0;

    let mut svg = String::new();
    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = OG_WIDTH, h = OG_HEIGHT));
    svg.push_str(concat!(
        r#"<defs><linearGradient id="bg" x1="0%" y1="0%" x2="100%" y2="100%">"#,
        r##"<stop offset="0%" stop-color="#1a1a2e"/>"##,
        r##"<stop offset="100%" stop-color="#16213e"/>"##,
        r#"</linearGradient></defs>"#));
    svg.push_str(&format!(
        r#"<rect width="{w}" height="{h}" fill="url(#bg)"/>"#,
        w = OG_WIDTH, h = OG_HEIGHT));

    for (i, line) in lines.iter().enumerate() {
        let y = top + i as f32 * TITLE_LINE_HEIGHT + TITLE_SIZE * ASCENT_RATIO;
        svg.push_str(&format!(
            r##"<text x="{x}" y="{y:.1}" font-family="sans-serif" font-size="{size}" font-weight="700" fill="#ffffff">{text}</text>"##,
            x = PADDING, y = y, size = TITLE_SIZE,
            text = quick_xml::escape::escape(line.as_str())));
    }

    let label_y = top + lines.len() as f32 * TITLE_LINE_HEIGHT + LABEL_GAP + LABEL_SIZE * ASCENT_RATIO;
    svg.push_str(&format!(
        r##"<text x="{x}" y="{y:.1}" font-family="sans-serif" font-size="{size}" fill="#888888">{text}</text>"##,
        x = PADDING, y = label_y, size = LABEL_SIZE,
        text = quick_xml::escape::escape(site_label)));

    svg.push_str("</svg>");
    svg
}

/// Greedy wrap with an estimated advance per character. Wide (CJK) glyphs
/// count a full em, anything else roughly half. Latin words only break at
/// spaces; CJK breaks anywhere
fn wrap_title(title: &str, max_width: f32) -> Vec<String> {
    let mut lines: Vec<String> = vec![];
    let mut line = String::new();
    let mut line_width = 0.0f32;

    for token in tokenize(title) {
        let token_width: f32 = token.chars().map(char_width).sum();

        if line_width + token_width > max_width && !line.is_empty() {
            lines.push(line.trim_end().to_string());
            line = String::new();
            line_width = 0.0;
            if token == " " {
                continue;
            }
        }

        line.push_str(&token);
        line_width += token_width;
    }

    if !line.trim().is_empty() || lines.is_empty() {
        lines.push(line.trim_end().to_string());
    }

    lines
}

fn tokenize(text: &str) -> Vec<String> {
    let mut tokens = vec![];
    let mut word = String::new();

    for c in text.chars() {
        if c == ' ' || is_wide(c) {
            if !word.is_empty() {
                tokens.push(std::mem::take(&mut word));
            }
            tokens.push(c.to_string());
        } else {
            word.push(c);
        }
    }
    if !word.is_empty() {
        tokens.push(word);
    }

    tokens
}

fn char_width(c: char) -> f32 {
    if is_wide(c) {
        TITLE_SIZE
    } else {
        TITLE_SIZE * 0.55
    }
}

fn is_wide(c: char) -> bool {
    matches!(c as u32,
        0x1100..=0x115F          // Hangul Jamo
        | 0x2E80..=0x303F        // CJK radicals, punctuation
        | 0x3040..=0x30FF        // Hiragana, Katakana
        | 0x3400..=0x4DBF        // CJK extension A
        | 0x4E00..=0x9FFF        // CJK unified
        | 0xAC00..=0xD7AF        // Hangul syllables
        | 0xF900..=0xFAFF        // CJK compatibility
        | 0xFF00..=0xFF60        // Fullwidth forms
    )
}
