//! Text layout.
//!
//! Contains:
//! - `text_measure`: width classification, escape scanning, truncation, wrapping
//! - `align`: centering
//! - `border`: box-drawing borders
//!
//! [`TextLayout`] binds these operations to a [`FontMetrics`] source. The
//! free functions ([`measure`], [`truncate`], [`wrap`], [`center`]) use the
//! process-wide metrics and fail with [`LayoutError::Unavailable`] if those
//! could not be initialised.
//!
//! [`LayoutError::Unavailable`]: crate::LayoutError::Unavailable

mod align;
mod border;
pub mod text_measure;

pub use align::{center_lines, center_text};
pub use border::{BorderStyle, border_lines};

use std::fmt;

use crate::error::Result;
use crate::metrics::{FontMetrics, global_metrics};
use text_measure::WidthMeasurement;

/// Layout operations bound to a metrics source.
#[derive(Clone, Copy)]
pub struct TextLayout<'m> {
    metrics: &'m dyn FontMetrics,
}

impl fmt::Debug for TextLayout<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextLayout")
            .field("narrow_columns", &self.metrics.narrow_columns())
            .field("wide_columns", &self.metrics.wide_columns())
            .finish()
    }
}

impl TextLayout<'static> {
    /// Layout over the process-wide metrics.
    pub fn global() -> Result<Self> {
        Ok(Self::new(global_metrics()?))
    }
}

impl<'m> TextLayout<'m> {
    pub fn new(metrics: &'m dyn FontMetrics) -> Self {
        Self { metrics }
    }

    pub fn metrics(&self) -> &'m dyn FontMetrics {
        self.metrics
    }

    /// Display width of `text` in columns.
    pub fn measure(&self, text: &str) -> usize {
        text_measure::string_width(text, self.metrics)
    }

    /// Width of `text` together with its visible and escape runs.
    pub fn measure_runs<'t>(&self, text: &'t str) -> WidthMeasurement<'t> {
        text_measure::measure_runs(text, self.metrics)
    }

    /// Truncate to `limit` columns by replacing the middle with `" … "`.
    pub fn truncate(&self, text: &str, limit: usize) -> String {
        text_measure::truncate_middle(text, limit, self.metrics)
    }

    /// Truncate to `limit` columns keeping the head, ending with `suffix`.
    pub fn truncate_end(&self, text: &str, limit: usize, suffix: &str) -> String {
        text_measure::truncate_end(text, limit, suffix, self.metrics)
    }

    /// Wrap at grapheme boundaries into lines of at most `limit` columns.
    pub fn wrap(&self, text: &str, limit: usize) -> Result<Vec<String>> {
        text_measure::wrap_text(text, limit, self.metrics)
    }

    /// Wrap at word boundaries into lines of at most `limit` columns.
    pub fn wrap_words(&self, text: &str, limit: usize) -> Result<Vec<String>> {
        text_measure::wrap_text_word(text, limit, self.metrics)
    }

    /// Number of lines [`wrap`](Self::wrap) would produce.
    pub fn text_height(&self, text: &str, limit: usize) -> Result<usize> {
        text_measure::measure_text_height(text, limit, self.metrics)
    }

    /// Center a string or a list of lines, preserving its shape.
    pub fn center<C: Centerable + ?Sized>(&self, input: &C, fill: char) -> C::Output {
        input.center_with(self, fill, 0)
    }

    /// Like [`center`](Self::center), padding to at least `min_width`.
    pub fn center_to<C: Centerable + ?Sized>(
        &self,
        input: &C,
        fill: char,
        min_width: usize,
    ) -> C::Output {
        input.center_with(self, fill, min_width)
    }

    /// Enclose lines in a border.
    pub fn border<S: AsRef<str>>(&self, lines: &[S], style: BorderStyle) -> Vec<String> {
        border_lines(lines, style, 0, self.metrics)
    }
}

/// Inputs accepted by centering: a single (possibly multi-line) string or a
/// list of lines. The output has the same shape as the input.
pub trait Centerable {
    type Output;

    fn center_with(&self, layout: &TextLayout<'_>, fill: char, min_width: usize) -> Self::Output;
}

impl Centerable for str {
    type Output = String;

    fn center_with(&self, layout: &TextLayout<'_>, fill: char, min_width: usize) -> String {
        center_text(self, fill, min_width, layout.metrics)
    }
}

impl Centerable for String {
    type Output = String;

    fn center_with(&self, layout: &TextLayout<'_>, fill: char, min_width: usize) -> String {
        self.as_str().center_with(layout, fill, min_width)
    }
}

impl<S: AsRef<str>> Centerable for [S] {
    type Output = Vec<String>;

    fn center_with(&self, layout: &TextLayout<'_>, fill: char, min_width: usize) -> Vec<String> {
        center_lines(self, fill, min_width, layout.metrics)
    }
}

impl<S: AsRef<str>> Centerable for Vec<S> {
    type Output = Vec<String>;

    fn center_with(&self, layout: &TextLayout<'_>, fill: char, min_width: usize) -> Vec<String> {
        self.as_slice().center_with(layout, fill, min_width)
    }
}

impl<S: AsRef<str>, const N: usize> Centerable for [S; N] {
    type Output = Vec<String>;

    fn center_with(&self, layout: &TextLayout<'_>, fill: char, min_width: usize) -> Vec<String> {
        self.as_slice().center_with(layout, fill, min_width)
    }
}

/// Display width of `text` using the process-wide metrics.
pub fn measure(text: &str) -> Result<usize> {
    Ok(TextLayout::global()?.measure(text))
}

/// Middle-truncate `text` to `limit` columns using the process-wide metrics.
pub fn truncate(text: &str, limit: usize) -> Result<String> {
    Ok(TextLayout::global()?.truncate(text, limit))
}

/// Wrap `text` to `limit` columns using the process-wide metrics.
pub fn wrap(text: &str, limit: usize) -> Result<Vec<String>> {
    TextLayout::global()?.wrap(text, limit)
}

/// Center a string or list of lines using the process-wide metrics.
pub fn center<C: Centerable + ?Sized>(input: &C, fill: char) -> Result<C::Output> {
    Ok(TextLayout::global()?.center(input, fill))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::TableMetrics;

    #[test]
    fn center_keeps_shape() {
        let metrics = TableMetrics::default();
        let layout = TextLayout::new(&metrics);

        let list: Vec<String> = layout.center(&vec!["     foo", "  bar baz "], 'X');
        assert_eq!(list, vec!["XXfooXX", "bar baz"]);

        let single: String = layout.center("  foo\nbar baz", 'X');
        assert_eq!(single, "XXfooXX\nbar baz");

        let array = layout.center(&["a", "abc"], '.');
        assert_eq!(array, vec![".a.", "abc"]);
    }

    #[test]
    fn center_to_min_width() {
        let metrics = TableMetrics::default();
        let layout = TextLayout::new(&metrics);
        assert_eq!(layout.center_to("ab", '-', 5), "--ab-");
    }

    #[test]
    fn layout_delegates() {
        let metrics = TableMetrics::default();
        let layout = TextLayout::new(&metrics);
        assert_eq!(layout.measure("한글"), 4);
        assert_eq!(layout.truncate("⮕⮕⮕⮕", 7), "⮕ … ⮕");
        assert_eq!(layout.truncate_end("abcdef", 4, "…"), "abc…");
        assert_eq!(layout.wrap("abcdef", 3).unwrap(), vec!["abc", "def"]);
        assert_eq!(layout.wrap_words("ab cd", 3).unwrap(), vec!["ab", "cd"]);
        assert_eq!(layout.text_height("abcdef", 3).unwrap(), 2);
        assert_eq!(layout.measure_runs("\x1b[1mx").columns, 1);
        assert_eq!(layout.border(&["x"], BorderStyle::Ascii), vec!["+-+", "|x|", "+-+"]);
    }

    #[test]
    fn debug_shows_columns() {
        let metrics = TableMetrics::default();
        let layout = TextLayout::new(&metrics);
        assert_eq!(format!("{layout:?}"), "TextLayout { narrow_columns: 1, wide_columns: 2 }");
    }
}
