//! Renderable - anything that lays itself out in a `(columns, rows)` budget.
//!
//! A closed set of variants, each with one render rule:
//!
//! ```text
//! Value(None)          → ""
//! Value(Some(text))    → verbatim if columns unbounded or text looks like a URI,
//!                        otherwise wrap(text, columns), first `rows` lines
//! Function(f)          → f(columns, rows)
//! Composite(Truncated) → inner lines, each middle-truncated to columns
//!                        (URI-like lines are kept whole)
//! Composite(Centered)  → inner lines centered (to columns when bounded)
//! Composite(Bordered)  → inner rendered in (columns-2, rows-2), then boxed;
//!                        "" when the budget is under 2 columns or rows
//! Composite(Stacked)   → children top to bottom, sharing the row budget;
//!                        Value(None) children take no rows
//! ```
//!
//! # Example
//!
//! ```
//! use spark_text::{BorderStyle, Renderable};
//!
//! let card = Renderable::of("abcdefghij").bordered(BorderStyle::Ascii);
//! assert_eq!(
//!     card.render(Some(9), None).unwrap(),
//!     "+-------+\n|abcdefg|\n|hij    |\n+-------+"
//! );
//! ```

use std::fmt;
use std::sync::{Arc, LazyLock};

use regex::Regex;

use crate::error::Result;
use crate::layout::text_measure::split_lines;
use crate::layout::{BorderStyle, TextLayout, border_lines, center_lines};

/// Render callback: `(columns, rows) -> text`.
pub type RenderFn = dyn Fn(Option<usize>, Option<usize>) -> String + Send + Sync;

static URI: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*://\S+$").expect("URI pattern is valid")
});

/// Whether `text` is a single URI-like token (`scheme://...`, no spaces).
pub fn looks_like_uri(text: &str) -> bool {
    URI.is_match(text.trim())
}

/// Content with a `(columns, rows) -> text` layout contract.
#[derive(Clone)]
pub enum Renderable {
    /// Plain value; `None` renders as the empty string.
    Value(Option<String>),
    /// Caller-supplied layout.
    Function(Arc<RenderFn>),
    /// Layout operation applied to other renderables.
    Composite(Composite),
}

/// Renderables built from layout operations.
#[derive(Clone, Debug)]
pub enum Composite {
    Truncated(Box<Renderable>),
    Centered { inner: Box<Renderable>, fill: char },
    Bordered { inner: Box<Renderable>, style: BorderStyle },
    Stacked(Vec<Renderable>),
}

impl fmt::Debug for Renderable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Renderable::Value(v) => f.debug_tuple("Value").field(v).finish(),
            Renderable::Function(_) => f.write_str("Function(..)"),
            Renderable::Composite(c) => f.debug_tuple("Composite").field(c).finish(),
        }
    }
}

impl Default for Renderable {
    fn default() -> Self {
        Renderable::Value(None)
    }
}

impl From<&str> for Renderable {
    fn from(value: &str) -> Self {
        Renderable::Value(Some(value.to_string()))
    }
}

impl From<String> for Renderable {
    fn from(value: String) -> Self {
        Renderable::Value(Some(value))
    }
}

impl From<Option<String>> for Renderable {
    fn from(value: Option<String>) -> Self {
        Renderable::Value(value)
    }
}

impl Renderable {
    pub fn of(value: impl Into<String>) -> Self {
        Renderable::Value(Some(value.into()))
    }

    /// A renderable with no value.
    pub fn none() -> Self {
        Renderable::Value(None)
    }

    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(Option<usize>, Option<usize>) -> String + Send + Sync + 'static,
    {
        Renderable::Function(Arc::new(f))
    }

    pub fn truncated(self) -> Self {
        Renderable::Composite(Composite::Truncated(Box::new(self)))
    }

    pub fn centered(self, fill: char) -> Self {
        Renderable::Composite(Composite::Centered {
            inner: Box::new(self),
            fill,
        })
    }

    pub fn bordered(self, style: BorderStyle) -> Self {
        Renderable::Composite(Composite::Bordered {
            inner: Box::new(self),
            style,
        })
    }

    pub fn stacked(items: impl IntoIterator<Item = Renderable>) -> Self {
        Renderable::Composite(Composite::Stacked(items.into_iter().collect()))
    }

    /// Render using the process-wide metrics.
    pub fn render(&self, columns: Option<usize>, rows: Option<usize>) -> Result<String> {
        self.render_with(&TextLayout::global()?, columns, rows)
    }

    /// Render using the given layout.
    ///
    /// Fails with [`LayoutError::InvalidArgument`](crate::LayoutError::InvalidArgument)
    /// when a value has to be wrapped to zero columns.
    pub fn render_with(
        &self,
        layout: &TextLayout<'_>,
        columns: Option<usize>,
        rows: Option<usize>,
    ) -> Result<String> {
        match self {
            Renderable::Value(None) => Ok(String::new()),
            Renderable::Value(Some(text)) => render_value(layout, text, columns, rows),
            Renderable::Function(f) => Ok(f(columns, rows)),
            Renderable::Composite(c) => c.render_with(layout, columns, rows),
        }
    }
}

fn render_value(
    layout: &TextLayout<'_>,
    text: &str,
    columns: Option<usize>,
    rows: Option<usize>,
) -> Result<String> {
    let Some(columns) = columns else {
        return Ok(text.to_string());
    };
    if looks_like_uri(text) {
        return Ok(text.to_string());
    }
    let lines = layout.wrap(text, columns)?;
    Ok(take_rows(lines, rows).join("\n"))
}

fn take_rows(mut lines: Vec<String>, rows: Option<usize>) -> Vec<String> {
    if let Some(rows) = rows {
        lines.truncate(rows);
    }
    lines
}

impl Composite {
    fn render_with(
        &self,
        layout: &TextLayout<'_>,
        columns: Option<usize>,
        rows: Option<usize>,
    ) -> Result<String> {
        match self {
            Composite::Truncated(inner) => {
                let rendered = inner.render_with(layout, None, rows)?;
                let lines: Vec<String> = split_lines(&rendered)
                    .into_iter()
                    .map(|line| match columns {
                        Some(limit) if !looks_like_uri(line) => layout.truncate(line, limit),
                        _ => line.to_string(),
                    })
                    .collect();
                Ok(take_rows(lines, rows).join("\n"))
            }
            Composite::Centered { inner, fill } => {
                let rendered = inner.render_with(layout, columns, rows)?;
                let lines = split_lines(&rendered);
                let centered = center_lines(&lines, *fill, columns.unwrap_or(0), layout.metrics());
                Ok(centered.join("\n"))
            }
            Composite::Bordered { inner, style } => {
                if columns.is_some_and(|c| c < 2) || rows.is_some_and(|r| r < 2) {
                    return Ok(String::new());
                }
                let inner_columns = columns.map(|c| c.saturating_sub(2));
                let inner_rows = rows.map(|r| r.saturating_sub(2));
                let content = if inner_columns == Some(0) || inner_rows == Some(0) {
                    String::new()
                } else {
                    inner.render_with(layout, inner_columns, inner_rows)?
                };
                let lines: Vec<&str> = if content.is_empty() {
                    Vec::new()
                } else {
                    split_lines(&content)
                };
                let min_width = inner_columns.unwrap_or(0);
                let boxed = border_lines(&lines, *style, min_width, layout.metrics());
                Ok(boxed.join("\n"))
            }
            Composite::Stacked(items) => {
                let mut out: Vec<String> = Vec::new();
                for item in items {
                    if matches!(item, Renderable::Value(None)) {
                        continue;
                    }
                    let remaining = rows.map(|r| r.saturating_sub(out.len()));
                    if remaining == Some(0) {
                        break;
                    }
                    let rendered = item.render_with(layout, columns, remaining)?;
                    out.extend(split_lines(&rendered).into_iter().map(str::to_string));
                }
                Ok(take_rows(out, rows).join("\n"))
            }
        }
    }
}
