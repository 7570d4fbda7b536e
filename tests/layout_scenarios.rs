//! End-to-end layout through the process-wide metrics.

use crossterm::style::Stylize;
use spark_text::{
    BorderStyle, LayoutError, Renderable, center, global_metrics, measure, strip_ansi, truncate,
    wrap,
};

#[test]
fn hangul_measures_two_columns_per_syllable() {
    assert_eq!(measure("한글").unwrap(), 4);
}

#[test]
fn digits_wrap_at_twenty() {
    assert_eq!(
        wrap("1234567890123456789012345", 20).unwrap(),
        vec!["12345678901234567890", "12345"]
    );
}

#[test]
fn arrows_truncate_around_marker() {
    assert_eq!(truncate("⮕⮕⮕⮕", 7).unwrap(), "⮕ … ⮕");
}

#[test]
fn center_trims_then_pads() {
    let lines = center(&["     foo", "  bar baz "], 'X').unwrap();
    assert_eq!(lines, vec!["XXfooXX", "bar baz"]);

    let text = center("     foo\n  bar baz ", 'X').unwrap();
    assert_eq!(text, "XXfooXX\nbar baz");
}

#[test]
fn styled_text_measures_as_plain() {
    let styled = format!("{} {}", "warn".yellow().bold(), "한글".on_blue());
    assert_eq!(measure(&styled).unwrap(), measure("warn 한글").unwrap());
    assert_eq!(strip_ansi(&styled), "warn 한글");
}

#[test]
fn styled_text_keeps_escapes_through_truncate() {
    let styled = format!("{}", "abcdefghijklmnop".red());
    let out = truncate(&styled, 9).unwrap();
    assert_eq!(measure(&out).unwrap(), 9);
    assert_eq!(strip_ansi(&out), "abc … nop");
}

#[test]
fn zero_width_wrap_is_rejected() {
    assert!(matches!(
        wrap("abc", 0),
        Err(LayoutError::InvalidArgument { name: "limit", .. })
    ));
}

#[test]
fn global_metrics_are_shared() {
    let a = global_metrics().unwrap() as *const _ as *const ();
    let b = global_metrics().unwrap() as *const _ as *const ();
    assert_eq!(a, b);
}

#[test]
fn renderable_panel() {
    let panel = Renderable::stacked([
        Renderable::of("status").centered('='),
        Renderable::of("https://example.com/some/long/path"),
        Renderable::from_fn(|columns, _| "-".repeat(columns.unwrap_or(3))),
    ]);
    let out = panel.render(Some(10), None).unwrap();
    assert_eq!(out, "==status==\nhttps://example.com/some/long/path\n----------");

    let boxed = Renderable::of("abc").bordered(BorderStyle::Single);
    assert_eq!(boxed.render(Some(5), Some(3)).unwrap(), "┌───┐\n│abc│\n└───┘");
}
