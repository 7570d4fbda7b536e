use proptest::prelude::*;
use spark_text::layout::text_measure::string_width;
use spark_text::{TableMetrics, TextLayout, strip_ansi};

const SGR: [&str; 4] = ["\x1b[1m", "\x1b[31m", "\x1b[38;2;10;20;30m", "\x1b[0m"];

fn text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 .,가-힣]{0,40}"
}

/// Interleave SGR sequences into `plain` at the given char positions.
fn styled(plain: &str, marks: &[(usize, usize)]) -> String {
    let mut out = String::new();
    for (i, c) in plain.chars().enumerate() {
        for &(at, sgr) in marks {
            if at == i {
                out.push_str(SGR[sgr]);
            }
        }
        out.push(c);
    }
    out.push_str(SGR[3]);
    out
}

fn marks() -> impl Strategy<Value = Vec<(usize, usize)>> {
    prop::collection::vec((0usize..40, 0usize..4), 0..6)
}

proptest! {
    #[test]
    fn ascii_width_is_length(s in "[ -~]{0,80}") {
        let metrics = TableMetrics::default();
        prop_assert_eq!(TextLayout::new(&metrics).measure(&s), s.len());
    }

    #[test]
    fn escapes_measure_as_zero(plain in text(), marks in marks()) {
        let metrics = TableMetrics::default();
        let layout = TextLayout::new(&metrics);
        let s = styled(&plain, &marks);
        prop_assert_eq!(layout.measure(&s), layout.measure(&plain));
        prop_assert_eq!(strip_ansi(&s), plain.as_str());
    }

    #[test]
    fn truncate_fits_and_is_stable(plain in text(), marks in marks(), limit in 0usize..30) {
        let metrics = TableMetrics::default();
        let layout = TextLayout::new(&metrics);
        let s = styled(&plain, &marks);

        let once = layout.truncate(&s, limit);
        prop_assert!(layout.measure(&once) <= limit);
        prop_assert_eq!(layout.truncate(&once, limit), once.clone());
        if layout.measure(&s) <= limit {
            prop_assert_eq!(once, s);
        }
    }

    #[test]
    fn wrap_keeps_content_within_bound(plain in text(), marks in marks(), limit in 2usize..20) {
        let metrics = TableMetrics::default();
        let layout = TextLayout::new(&metrics);
        let s = styled(&plain, &marks);

        let lines = layout.wrap(&s, limit).unwrap();
        prop_assert_eq!(lines.concat(), s.clone());
        for line in &lines {
            prop_assert!(string_width(line, &metrics) <= limit, "{:?} wider than {}", line, limit);
        }
        prop_assert_eq!(layout.text_height(&s, limit).unwrap(), lines.len());
    }

    #[test]
    fn center_pads_symmetrically(lines in prop::collection::vec("[a-z가-힣]{1,10}", 1..6)) {
        let metrics = TableMetrics::default();
        let layout = TextLayout::new(&metrics);
        let target = lines.iter().map(|l| layout.measure(l)).max().unwrap_or(0);

        let out = layout.center(&lines, 'X');
        prop_assert_eq!(out.len(), lines.len());
        for (line, centered) in lines.iter().zip(&out) {
            prop_assert_eq!(layout.measure(centered), target);
            let left = centered.chars().take_while(|&c| c == 'X').count();
            let right = centered.chars().rev().take_while(|&c| c == 'X').count();
            prop_assert!(left == right || left == right + 1);
            prop_assert_eq!(&centered[left..centered.len() - right], line.as_str());
        }
    }
}
