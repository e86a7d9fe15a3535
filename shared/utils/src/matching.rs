//! Code normalization and cross-referencing
//!
//! The core three-stage pipeline: presence test against the document text,
//! mapping build from the VOCI sheet pairs, and resolution of each matched
//! feature code to its first sales code.

use std::collections::HashMap;

use wersmatch_models::MatchedCode;

/// Normalize a WERS code for loose matching: every `-` or `_` becomes a
/// single space. Idempotent.
pub fn normalize_code(code: &str) -> String {
    code.replace(['-', '_'], " ")
}

/// Stage 1: feature codes whose raw or normalized form appears as a substring
/// of the document text, original order preserved.
pub fn codes_in_text(codes: &[String], text: &str) -> Vec<String> {
    codes
        .iter()
        .filter(|code| text.contains(code.as_str()) || text.contains(&normalize_code(code)))
        .cloned()
        .collect()
}

/// Mapping from normalized WERS code to its sales codes, first-seen row order
/// preserved per key. Built once per request; never mutated after the fold.
///
/// The "first" sales code is first by raw spreadsheet row order as the
/// workbook yields it, which is implementation-defined across re-exports of
/// the same sheet.
#[derive(Debug, Clone, Default)]
pub struct SalesCodeMap {
    entries: HashMap<String, Vec<String>>,
}

impl SalesCodeMap {
    /// Stage 2: fold (WERS code, sales code) pairs into the mapping.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let entries = pairs
            .into_iter()
            .fold(HashMap::new(), |mut map: HashMap<String, Vec<String>>, (wers, sales)| {
                map.entry(normalize_code(&wers)).or_default().push(sales);
                map
            });
        Self { entries }
    }

    /// All sales codes for a feature code, insertion order.
    pub fn sales_codes(&self, code: &str) -> &[String] {
        self.entries
            .get(&normalize_code(code))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// First-inserted sales code for a feature code, if any mapping exists.
    pub fn first_sales_code(&self, code: &str) -> Option<&str> {
        self.sales_codes(code).first().map(String::as_str)
    }
}

/// Stage 3: resolve each matched feature code to its first sales code, or to
/// itself when no mapping entry exists.
pub fn resolve_codes(matched: &[String], map: &SalesCodeMap) -> Vec<MatchedCode> {
    matched
        .iter()
        .map(|code| {
            let resolved = map
                .first_sales_code(code)
                .map(str::to_string)
                .unwrap_or_else(|| code.clone());
            MatchedCode::new(code.clone(), resolved)
        })
        .collect()
}

/// The full pipeline over already-loaded inputs.
pub fn cross_reference(
    feature_codes: &[String],
    document_text: &str,
    mapping_pairs: Vec<(String, String)>,
) -> Vec<MatchedCode> {
    let matched = codes_in_text(feature_codes, document_text);
    let map = SalesCodeMap::from_pairs(mapping_pairs);
    resolve_codes(&matched, &map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn codes(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_normalize_replaces_both_separators() {
        assert_eq!(normalize_code("A-B_C"), "A B C");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let once = normalize_code("AB-12_X");
        assert_eq!(normalize_code(&once), once);
    }

    #[test]
    fn test_normalized_form_matches_document() {
        // Raw "AB-12" does not appear, but its normalized form does.
        let matched = codes_in_text(&codes(&["AB-12"]), "the option AB 12 is fitted");
        assert_eq!(matched, codes(&["AB-12"]));
    }

    #[test]
    fn test_raw_form_matches_document() {
        let matched = codes_in_text(&codes(&["AB-12"]), "the option AB-12 is fitted");
        assert_eq!(matched, codes(&["AB-12"]));
    }

    #[test]
    fn test_absent_codes_never_match() {
        let matched = codes_in_text(&codes(&["AB-12", "ZZ-99"]), "mentions AB 12 only");
        assert_eq!(matched, codes(&["AB-12"]));
    }

    #[test]
    fn test_match_order_follows_sheet_order() {
        let matched = codes_in_text(
            &codes(&["XY-9", "AB-12", "CD_3"]),
            "CD 3 before AB 12 before XY 9",
        );
        assert_eq!(matched, codes(&["XY-9", "AB-12", "CD_3"]));
    }

    #[test]
    fn test_first_sales_code_by_insertion_order() {
        let map = SalesCodeMap::from_pairs(vec![
            ("AB-12".to_string(), "S1".to_string()),
            ("AB 12".to_string(), "S2".to_string()),
        ]);
        // Both rows normalize to the same key; S1 was inserted first.
        assert_eq!(map.first_sales_code("AB-12"), Some("S1"));
        assert_eq!(map.sales_codes("AB_12"), &["S1".to_string(), "S2".to_string()]);
    }

    #[test]
    fn test_unmapped_code_resolves_to_itself() {
        let map = SalesCodeMap::from_pairs(vec![("AB-12".to_string(), "S1".to_string())]);
        let resolved = resolve_codes(&codes(&["XY-9"]), &map);
        assert_eq!(resolved, vec![MatchedCode::new("XY-9", "XY-9")]);
    }

    #[test]
    fn test_cross_reference_end_to_end() {
        let feature_codes = codes(&["AB-12", "XY-9", "ZZ-1"]);
        let text = "fitted with AB 12 and XY 9";
        let pairs = vec![
            ("AB 12".to_string(), "S1".to_string()),
            ("AB 12".to_string(), "S2".to_string()),
        ];

        let result = cross_reference(&feature_codes, text, pairs);
        assert_eq!(
            result,
            vec![
                MatchedCode::new("AB-12", "S1"),
                MatchedCode::new("XY-9", "XY-9"),
            ]
        );
    }

    proptest! {
        /// Normalized output never contains a separator and normalization is
        /// idempotent.
        #[test]
        fn prop_normalize_removes_separators(code in "[A-Z0-9_-]{1,16}") {
            let normalized = normalize_code(&code);
            prop_assert!(!normalized.contains('-'));
            prop_assert!(!normalized.contains('_'));
            prop_assert_eq!(normalize_code(&normalized), normalized);
        }

        /// A code embedded into the text always survives the presence test.
        #[test]
        fn prop_embedded_code_is_matched(code in "[A-Z]{2,4}-[0-9]{1,3}") {
            let text = format!("document mentioning {} inline", code);
            let matched = codes_in_text(&[code.clone()], &text);
            prop_assert_eq!(matched, vec![code]);
        }

        /// Codes over a disjoint alphabet from the text never match.
        #[test]
        fn prop_disjoint_code_never_matches(code in "[A-Z]{2,6}", text in "[a-z 0]{0,64}") {
            let matched = codes_in_text(&[code], &text);
            prop_assert!(matched.is_empty());
        }

        /// Resolution output is one pair per matched code, in order, and every
        /// mapped pair resolves to the first-inserted sales code.
        #[test]
        fn prop_resolution_is_total_and_ordered(
            entries in proptest::collection::vec(("[A-Z]{2,3}-[0-9]{1,2}", "[A-Z][0-9]"), 0..12),
        ) {
            let matched: Vec<String> = entries.iter().map(|(code, _)| code.clone()).collect();
            let map = SalesCodeMap::from_pairs(entries.clone());
            let resolved = resolve_codes(&matched, &map);

            prop_assert_eq!(resolved.len(), matched.len());
            for (pair, code) in resolved.iter().zip(&matched) {
                prop_assert_eq!(&pair.feature_code, code);
                let expected = entries
                    .iter()
                    .find(|(wers, _)| normalize_code(wers) == normalize_code(code))
                    .map(|(_, sales)| sales.clone())
                    .unwrap_or_else(|| code.clone());
                prop_assert_eq!(&pair.resolved_code, &expected);
            }
        }
    }
}
