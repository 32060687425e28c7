//! Property-based tests for scripts run end to end.

use proptest::prelude::*;
use tabula::{render_to_string, Recordable};

#[derive(Debug, Clone, Recordable)]
#[record(rename_all = "PascalCase")]
struct Entry {
    name: String,
    code: u32,
}

fn entries() -> impl Strategy<Value = Vec<Entry>> {
    prop::collection::vec(
        ("[a-zA-Z ]{0,12}", any::<u32>()).prop_map(|(name, code)| Entry { name, code }),
        0..12,
    )
}

proptest! {
    #[test]
    fn tablex_prints_one_line_per_row(data in entries(), min in 0i64..16, pad in 0i64..4) {
        let script = format!("{{{{ tablex(data, {min}, 8, {pad}) }}}}");
        let out = render_to_string("t", &script, &data, None).unwrap();
        prop_assert_eq!(out.lines().count(), data.len() + 1);
        prop_assert!(out.ends_with('\n'));
    }

    #[test]
    fn rows_length_matches_clamped_range(data in entries(), start in -3i64..15, end in -3i64..15) {
        let script = format!("{{{{ rows(data, {start}, {end}) | length }}}}");
        let out = render_to_string("t", &script, &data, None).unwrap();
        let len = data.len() as i64;
        let (s, e) = (start.clamp(0, len), end.clamp(0, len));
        prop_assert_eq!(out, (e - s).max(0).to_string());
    }

    #[test]
    fn sort_then_select_lists_every_code(data in entries()) {
        let out = render_to_string("t", r#"{{ select(sort(data, "Code"), "Code") }}"#, &data, None)
            .unwrap();
        let mut expected: Vec<u32> = data.iter().map(|e| e.code).collect();
        expected.sort_unstable();
        let got: Vec<u32> = out.lines().map(|l| l.parse().unwrap()).collect();
        prop_assert_eq!(got, expected);
    }
}
