//! Static font-metric tables for the three template typefaces.
//!
//! Character widths are in em units (relative to font size) and approximate. The
//! rasterizer advances glyphs with the same tables, so measured and drawn text agree.
//!
//! The base table covers ASCII 0x20..=0x7E (95 printable characters), index =
//! `(char as usize) - 32`. Other families are a uniform scale of the base table.

use serde::{Deserialize, Serialize};

use crate::templates::tree::{TextStyle, Weight};
use crate::templates::ImplementedTemplate;

// ────────────────────────────────────────────────────────────────────────────
// Font family enum
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FontFamily {
    /// Professional template: humanist sans-serif.
    Inter,
    /// Modern template: geometric humanist sans-serif.
    Lato,
    /// Minimal template: old-style serif.
    EbGaramond,
}

impl FontFamily {
    pub fn for_template(template: ImplementedTemplate) -> Self {
        match template {
            ImplementedTemplate::Professional => FontFamily::Inter,
            ImplementedTemplate::Modern => FontFamily::Lato,
            ImplementedTemplate::Minimal => FontFamily::EbGaramond,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Font metric table
// ────────────────────────────────────────────────────────────────────────────

/// Width table for one family.
///
/// Slot layout of the base table:
/// ```text
/// [0]=sp  [1]=!   [2]="   [3]=#   [4]=$   [5]=%   [6]=&   [7]='
/// [8]=(   [9]=)   [10]=*  [11]=+  [12]=,  [13]=-  [14]=.  [15]=/
/// [16..25]=0-9
/// [26]=:  [27]=;  [28]=<  [29]==  [30]=>  [31]=?  [32]=@
/// [33..58]=A-Z
/// [59]=[  [60]=\  [61]=]  [62]=^  [63]=_  [64]=`
/// [65..90]=a-z
/// [91]={  [92]=|  [93]=}  [94]=~
/// ```
pub struct FontMetricTable {
    pub font: FontFamily,
    /// Multiplier applied to every base width.
    scale: f32,
    /// Fallback width for non-ASCII characters, in em.
    pub average_char_width: f32,
}

impl FontMetricTable {
    /// Width of one character in em units.
    pub fn char_width(&self, c: char) -> f32 {
        let code = c as usize;
        if (32..=126).contains(&code) {
            BASE_WIDTHS[code - 32] * self.scale
        } else {
            self.average_char_width
        }
    }

    /// Rendered width of a string in em units.
    pub fn measure_str(&self, s: &str) -> f32 {
        s.chars().map(|c| self.char_width(c)).sum()
    }

    /// Horizontal advance of `c` in pixels for the given style.
    pub fn advance_px(&self, c: char, style: &TextStyle) -> f32 {
        self.char_width(c) * style.size * weight_factor(style.weight)
    }

    /// Rendered width of `s` in pixels for the given style.
    pub fn measure_px(&self, s: &str, style: &TextStyle) -> f32 {
        self.measure_str(s) * style.size * weight_factor(style.weight)
    }

    /// Greedy word-wrap at `max_width` pixels.
    ///
    /// Explicit newlines always break (blank lines are kept). A word wider than the
    /// line is broken between characters. Always returns at least one line.
    pub fn wrap(&self, text: &str, style: &TextStyle, max_width: f32) -> Vec<String> {
        let space = self.advance_px(' ', style);
        let mut lines = Vec::new();

        for paragraph in text.split('\n') {
            let mut current = String::new();
            let mut width = 0.0_f32;

            for word in paragraph.split_whitespace() {
                let word_w = self.measure_px(word, style);

                if !current.is_empty() && width + space + word_w <= max_width {
                    current.push(' ');
                    current.push_str(word);
                    width += space + word_w;
                    continue;
                }

                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                    width = 0.0;
                }

                if word_w <= max_width {
                    current.push_str(word);
                    width = word_w;
                } else {
                    for c in word.chars() {
                        let cw = self.advance_px(c, style);
                        if !current.is_empty() && width + cw > max_width {
                            lines.push(std::mem::take(&mut current));
                            width = 0.0;
                        }
                        current.push(c);
                        width += cw;
                    }
                }
            }
            lines.push(current);
        }
        lines
    }
}

fn weight_factor(weight: Weight) -> f32 {
    match weight {
        Weight::Regular => 1.0,
        Weight::Medium => 1.02,
        Weight::Semibold | Weight::Bold => 1.06,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Static width table (95 ASCII printable characters)
// ────────────────────────────────────────────────────────────────────────────

#[rustfmt::skip]
static BASE_WIDTHS: [f32; 95] = [
    // sp    !     "     #     $     %     &     '     (     )     *     +     ,     -     .     /
    0.25, 0.30, 0.38, 0.56, 0.56, 0.89, 0.67, 0.22, 0.33, 0.33, 0.39, 0.59, 0.28, 0.33, 0.28, 0.31,
    // 0     1     2     3     4     5     6     7     8     9
    0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56,
    // :     ;     <     =     >     ?     @
    0.28, 0.28, 0.59, 0.59, 0.59, 0.50, 1.02,
    // A     B     C     D     E     F     G     H     I     J     K     L     M
    0.67, 0.61, 0.61, 0.67, 0.56, 0.50, 0.67, 0.67, 0.25, 0.39, 0.61, 0.53, 0.78,
    // N     O     P     Q     R     S     T     U     V     W     X     Y     Z
    0.67, 0.72, 0.56, 0.72, 0.61, 0.50, 0.56, 0.67, 0.67, 0.89, 0.61, 0.61, 0.56,
    // [     \     ]     ^     _     `
    0.28, 0.31, 0.28, 0.47, 0.56, 0.34,
    // a     b     c     d     e     f     g     h     i     j     k     l     m
    0.56, 0.56, 0.50, 0.56, 0.56, 0.31, 0.56, 0.56, 0.22, 0.22, 0.53, 0.22, 0.83,
    // n     o     p     q     r     s     t     u     v     w     x     y     z
    0.56, 0.56, 0.56, 0.56, 0.33, 0.44, 0.39, 0.56, 0.50, 0.72, 0.50, 0.50, 0.44,
    // {     |     }     ~
    0.33, 0.26, 0.33, 0.59,
];

static INTER_TABLE: FontMetricTable = FontMetricTable {
    font: FontFamily::Inter,
    scale: 1.0,
    average_char_width: 0.52,
};

/// Approx. 105% of Inter.
static LATO_TABLE: FontMetricTable = FontMetricTable {
    font: FontFamily::Lato,
    scale: 1.05,
    average_char_width: 0.55,
};

/// Approx. 85% of Inter.
static EB_GARAMOND_TABLE: FontMetricTable = FontMetricTable {
    font: FontFamily::EbGaramond,
    scale: 0.85,
    average_char_width: 0.44,
};

pub fn get_metrics(font: &FontFamily) -> &'static FontMetricTable {
    match font {
        FontFamily::Inter => &INTER_TABLE,
        FontFamily::Lato => &LATO_TABLE,
        FontFamily::EbGaramond => &EB_GARAMOND_TABLE,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::tree::Color;

    fn style(size: f32) -> TextStyle {
        TextStyle::new(size, Color::GRAY_800)
    }

    #[test]
    fn test_measure_str_empty_returns_zero() {
        let metrics = get_metrics(&FontFamily::Inter);
        assert_eq!(metrics.measure_str(""), 0.0);
    }

    #[test]
    fn test_measure_str_ascii_characters() {
        let metrics = get_metrics(&FontFamily::Inter);
        // "Rust" = R(0.61) + u(0.56) + s(0.44) + t(0.39) = 2.00
        let width = metrics.measure_str("Rust");
        assert!((width - 2.00).abs() < 1e-3, "Rust width should be ~2.00, got {width}");
    }

    #[test]
    fn test_non_ascii_falls_back_to_average() {
        let metrics = get_metrics(&FontFamily::Lato);
        assert!((metrics.measure_str("é") - metrics.average_char_width).abs() < 1e-4);
    }

    #[test]
    fn test_measure_px_scales_with_size_and_weight() {
        let metrics = get_metrics(&FontFamily::Inter);
        let regular = metrics.measure_px("Rust", &style(10.0));
        assert!((regular - 20.0).abs() < 1e-3);
        let bold = metrics.measure_px("Rust", &style(10.0).weight(Weight::Bold));
        assert!(bold > regular);
    }

    #[test]
    fn test_garamond_narrower_than_lato() {
        let text = "Architected distributed caching layer";
        let garamond = get_metrics(&FontFamily::EbGaramond).measure_str(text);
        let lato = get_metrics(&FontFamily::Lato).measure_str(text);
        assert!(garamond < lato);
    }

    #[test]
    fn test_wrap_short_text_is_one_line() {
        let metrics = get_metrics(&FontFamily::Inter);
        assert_eq!(metrics.wrap("Rust and SQL", &style(14.0), 400.0), vec!["Rust and SQL"]);
    }

    #[test]
    fn test_wrap_breaks_long_text_within_width() {
        let metrics = get_metrics(&FontFamily::Inter);
        let s = style(14.0);
        let text = "word ".repeat(60);
        let lines = metrics.wrap(&text, &s, 300.0);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(metrics.measure_px(line, &s) <= 300.0 + 1e-3, "line overflows: {line}");
        }
        let rejoined: Vec<&str> = lines.iter().flat_map(|l| l.split(' ')).collect();
        assert_eq!(rejoined.len(), 60);
    }

    #[test]
    fn test_wrap_keeps_explicit_newlines_and_blank_lines() {
        let metrics = get_metrics(&FontFamily::Inter);
        let lines = metrics.wrap("first\n\nthird", &style(14.0), 400.0);
        assert_eq!(lines, vec!["first", "", "third"]);
    }

    #[test]
    fn test_wrap_breaks_overlong_word() {
        let metrics = get_metrics(&FontFamily::Inter);
        let s = style(16.0);
        let url = "https://example.com/".repeat(8);
        let lines = metrics.wrap(&url, &s, 200.0);
        assert!(lines.len() > 1);
        assert_eq!(lines.concat(), url);
    }

    #[test]
    fn test_each_template_has_a_family() {
        assert_eq!(FontFamily::for_template(ImplementedTemplate::Professional), FontFamily::Inter);
        assert_eq!(FontFamily::for_template(ImplementedTemplate::Modern), FontFamily::Lato);
        assert_eq!(FontFamily::for_template(ImplementedTemplate::Minimal), FontFamily::EbGaramond);
    }
}
