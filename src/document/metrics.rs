//! Text measurement and word wrapping
//!
//! Widths come from the standard Helvetica advance widths (1/1000 em) so the
//! layout agrees with what the PDF viewer draws with its built-in Helvetica.

use super::geometry::MM_PER_PT;

/// Font variant used by a text run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontStyle {
    #[default]
    Normal,
    Bold,
    Italic,
}

/// Measures rendered text width in layout units (mm)
pub trait TextMetrics {
    /// Width of `text` set at `size` points
    fn text_width(&self, text: &str, size: f32, style: FontStyle) -> f32;
}

/// Helvetica advance widths for printable ASCII (`' '..='~'`)
const HELVETICA_ASCII: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // '0'..'?'
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // '@'..'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 'P'..'_'
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // '`'..'o'
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // 'p'..'~'
];

/// Bold glyphs run wider; scaling keeps wrapping on the safe side
const BOLD_SCALE: f32 = 1.08;

/// Built-in Helvetica metrics
#[derive(Debug, Clone, Copy, Default)]
pub struct HelveticaMetrics;

impl HelveticaMetrics {
    fn advance(ch: char) -> u16 {
        let base = fold_accent(ch);
        if (' '..='~').contains(&base) {
            return HELVETICA_ASCII[base as usize - ' ' as usize];
        }
        match ch {
            '—' | '…' => 1000,
            '•' => 350,
            '’' | '‘' => 222,
            _ => 556,
        }
    }
}

impl TextMetrics for HelveticaMetrics {
    fn text_width(&self, text: &str, size: f32, style: FontStyle) -> f32 {
        let units: u32 = text.chars().map(|c| u32::from(Self::advance(c))).sum();
        let scale = match style {
            FontStyle::Bold => BOLD_SCALE,
            FontStyle::Normal | FontStyle::Italic => 1.0,
        };
        units as f32 / 1000.0 * size * MM_PER_PT * scale
    }
}

/// Map accented Latin letters onto their base letter for width lookup
fn fold_accent(ch: char) -> char {
    match ch {
        'à' | 'á' | 'â' | 'ä' | 'ã' => 'a',
        'À' | 'Á' | 'Â' | 'Ä' | 'Ã' => 'A',
        'ç' => 'c',
        'Ç' => 'C',
        'è' | 'é' | 'ê' | 'ë' => 'e',
        'È' | 'É' | 'Ê' | 'Ë' => 'E',
        'ì' | 'í' | 'î' | 'ï' => 'i',
        'Ì' | 'Í' | 'Î' | 'Ï' => 'I',
        'ò' | 'ó' | 'ô' | 'ö' | 'õ' => 'o',
        'Ò' | 'Ó' | 'Ô' | 'Ö' | 'Õ' => 'O',
        'ù' | 'ú' | 'û' | 'ü' => 'u',
        'Ù' | 'Ú' | 'Û' | 'Ü' => 'U',
        'ñ' => 'n',
        'Ñ' => 'N',
        'ÿ' => 'y',
        '\u{a0}' | '\u{202f}' => ' ',
        other => other,
    }
}

/// Greedy word wrap of `text` to `max_width`.
///
/// Blank text yields no lines. A single word wider than `max_width` is split
/// across lines at character boundaries.
pub fn wrap_text<M: TextMetrics + ?Sized>(
    metrics: &M,
    text: &str,
    max_width: f32,
    size: f32,
    style: FontStyle,
) -> Vec<String> {
    let fits = |candidate: &str| metrics.text_width(candidate, size, style) <= max_width;
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{} {}", current, word)
        };

        if fits(&candidate) {
            current = candidate;
            continue;
        }

        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }

        if fits(word) {
            current = word.to_string();
        } else {
            for ch in word.chars() {
                current.push(ch);
                if !fits(&current) && current.chars().count() > 1 {
                    current.pop();
                    lines.push(std::mem::take(&mut current));
                    current.push(ch);
                }
            }
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Truncate `text` with an ellipsis so it fits in `max_width`
pub fn fit_text<M: TextMetrics + ?Sized>(
    metrics: &M,
    text: &str,
    max_width: f32,
    size: f32,
    style: FontStyle,
) -> String {
    if metrics.text_width(text, size, style) <= max_width {
        return text.to_string();
    }
    let mut truncated: String = text.to_string();
    while !truncated.is_empty() {
        truncated.pop();
        let candidate = format!("{}…", truncated.trim_end());
        if metrics.text_width(&candidate, size, style) <= max_width {
            return candidate;
        }
    }
    String::new()
}
