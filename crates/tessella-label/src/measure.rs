#![forbid(unsafe_code)]

//! Text measurement in display-width units.
//!
//! Widths are measured in cells (CJK counts 2, combining marks 0) and cuts
//! happen at grapheme boundaries, so emoji and ZWJ sequences are never torn
//! apart. Pixel estimates come later, by scaling cells with a per-font
//! aspect factor.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

const ELLIPSIS: &str = "\u{2026}";

/// Display width of `text` in cells.
#[inline]
#[must_use]
pub fn display_width(text: &str) -> usize {
    text.width()
}

/// Approximate pixel width of `text` at `font_size`, using `glyph_aspect`
/// as the cell-to-em ratio.
#[inline]
#[must_use]
pub fn approx_px_width(text: &str, font_size: f64, glyph_aspect: f64) -> f64 {
    display_width(text) as f64 * font_size * glyph_aspect
}

/// Shorten `text` to at most `max_width` cells, appending `…` when anything
/// was cut. The ellipsis is budgeted, so the result never exceeds
/// `max_width`. Cuts respect grapheme boundaries.
#[must_use]
pub fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if display_width(text) <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let budget = max_width - ELLIPSIS.width();
    let mut out = String::new();
    let mut used = 0;
    for grapheme in text.graphemes(true) {
        let w = grapheme.width();
        if used + w > budget {
            break;
        }
        out.push_str(grapheme);
        used += w;
    }
    out.push_str(ELLIPSIS);
    out
}

/// Format a value as a thousands-separated integer: `1250.4` -> `"1,250"`.
///
/// The value is rounded first; the cast saturates on non-finite input.
#[must_use]
pub fn format_value(value: f64) -> String {
    let rounded = value.round() as i64;
    let digits = rounded.unsigned_abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if rounded < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}
