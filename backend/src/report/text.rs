//! Text measurement and greedy word wrapping for the layout planner.

use genpdf::fonts::{FontCache, FontData, FontFamily};
use genpdf::style::Style;

/// Measures rendered text width in millimetres.
pub trait TextMetrics {
    fn width(&self, text: &str, size_pt: u8, bold: bool) -> f64;
}

/// Widths taken from the glyph advances of the font the report is drawn
/// with.
pub struct FontMetrics {
    cache: FontCache,
}

impl FontMetrics {
    pub fn new(family: FontFamily<FontData>) -> FontMetrics {
        FontMetrics {
            cache: FontCache::new(family),
        }
    }
}

impl TextMetrics for FontMetrics {
    fn width(&self, text: &str, size_pt: u8, bold: bool) -> f64 {
        let mut style = Style::new().with_font_size(size_pt);
        if bold {
            style = style.bold();
        }
        f64::from(style.str_width(&self.cache, text))
    }
}

/// Average-glyph-width estimate, for planning without a font on disk.
#[cfg(test)]
#[derive(Debug, Clone, Copy, Default)]
pub struct ApproxMetrics;

#[cfg(test)]
impl ApproxMetrics {
    const REGULAR_FACTOR: f64 = 0.52;
    const BOLD_FACTOR: f64 = 0.56;
    const PT_TO_MM: f64 = 25.4 / 72.0;
}

#[cfg(test)]
impl TextMetrics for ApproxMetrics {
    fn width(&self, text: &str, size_pt: u8, bold: bool) -> f64 {
        let factor = if bold {
            Self::BOLD_FACTOR
        } else {
            Self::REGULAR_FACTOR
        };
        text.chars().count() as f64 * factor * f64::from(size_pt) * Self::PT_TO_MM
    }
}

/// Breaks `text` into lines no wider than `max_width`.
///
/// Explicit newlines are kept. Words longer than a line are split at
/// character boundaries. Blank input yields no lines.
pub fn wrap(
    metrics: &dyn TextMetrics,
    text: &str,
    size_pt: u8,
    bold: bool,
    max_width: f64,
) -> Vec<String> {
    let mut lines = Vec::new();
    if text.trim().is_empty() {
        return lines;
    }
    let fits = |s: &str| metrics.width(s, size_pt, bold) <= max_width;

    for paragraph in text.lines() {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{current} {word}")
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
                let mut pieces = split_long_word(word, &fits);
                current = pieces.pop().unwrap_or_default();
                lines.extend(pieces);
            }
        }
        // blank source lines survive as spacing
        lines.push(current);
    }

    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    lines
}

fn split_long_word(word: &str, fits: &dyn Fn(&str) -> bool) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut piece = String::new();
    for ch in word.chars() {
        piece.push(ch);
        if !fits(&piece) && piece.chars().count() > 1 {
            piece.pop();
            pieces.push(std::mem::take(&mut piece));
            piece.push(ch);
        }
    }
    if !piece.is_empty() {
        pieces.push(piece);
    }
    pieces
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// One millimetre per character, whatever the size.
    struct Mono;

    impl TextMetrics for Mono {
        fn width(&self, text: &str, _size_pt: u8, _bold: bool) -> f64 {
            text.chars().count() as f64
        }
    }

    #[test]
    fn wraps_on_word_boundaries() {
        let lines = wrap(&Mono, "the quick brown fox jumps", 10, false, 10.0);
        assert_eq!(lines, vec!["the quick", "brown fox", "jumps"]);
    }

    #[test]
    fn keeps_explicit_newlines() {
        let lines = wrap(&Mono, "first\n\nsecond", 10, false, 20.0);
        assert_eq!(lines, vec!["first", "", "second"]);
    }

    #[test]
    fn splits_words_longer_than_a_line() {
        let lines = wrap(&Mono, "ab abcdefghij", 10, false, 4.0);
        assert_eq!(lines, vec!["ab", "abcd", "efgh", "ij"]);
    }

    #[test]
    fn blank_text_has_no_lines() {
        assert!(wrap(&Mono, "  \n ", 10, false, 10.0).is_empty());
    }

    #[test]
    fn bold_is_wider() {
        let m = ApproxMetrics;
        assert!(m.width("Inspection", 11, true) > m.width("Inspection", 11, false));
        assert_eq!(m.width("", 11, true), 0.0);
    }

    #[test]
    fn font_metrics_follow_glyph_widths() {
        let m = FontMetrics::new(crate::report::testing::font_family());

        assert_eq!(m.width("", 11, false), 0.0);
        assert!(m.width("WWWW", 11, false) > m.width("iiii", 11, false));
        assert!(m.width("Inspection", 11, true) > m.width("Inspection", 11, false));
        let small = m.width("Exits clear", 10, false);
        let large = m.width("Exits clear", 20, false);
        assert!((large - 2.0 * small).abs() < 1e-4);
    }

    #[test]
    fn capitals_wrap_within_the_line_with_real_widths() {
        let m = FontMetrics::new(crate::report::testing::font_family());
        let title = "EMERGENCY EXIT SIGNAGE ILLUMINATED AND UNOBSTRUCTED ON EVERY LEVEL OF THE NORTH WAREHOUSE";

        let lines = wrap(&m, title, 11, true, 180.0);

        assert!(lines.len() > 1);
        for line in &lines {
            assert!(m.width(line, 11, true) <= 180.0, "{line}");
        }
        assert_eq!(lines.join(" "), title);
    }
}
