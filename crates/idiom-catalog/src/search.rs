//! Search suggestions for the idiom picker.

use crate::model::Idiom;

/// Suggestion cap used by the editor's search box.
pub const DEFAULT_SUGGESTION_LIMIT: usize = 10;

/// Return up to `limit` idioms whose text contains `query`, ignoring case.
///
/// Matches keep the order of `idioms`. A blank query suggests nothing.
#[must_use]
pub fn suggestions<'a>(idioms: &'a [Idiom], query: &str, limit: usize) -> Vec<&'a Idiom> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    idioms
        .iter()
        .filter(|idiom| idiom.idiom.to_lowercase().contains(&needle))
        .take(limit)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn idioms() -> Vec<Idiom> {
        ["一马当先", "马到成功", "龙马精神", "画蛇添足", "Ma Shang"]
            .into_iter()
            .map(Idiom::new)
            .collect()
    }

    fn names(found: &[&Idiom]) -> Vec<String> {
        found.iter().map(|idiom| idiom.idiom.clone()).collect()
    }

    #[rstest]
    fn substring_matches_keep_input_order(idioms: Vec<Idiom>) {
        let found = suggestions(&idioms, "马", DEFAULT_SUGGESTION_LIMIT);
        assert_eq!(names(&found), vec!["一马当先", "马到成功", "龙马精神"]);
    }

    #[rstest]
    fn matching_ignores_case(idioms: Vec<Idiom>) {
        let found = suggestions(&idioms, "ma s", DEFAULT_SUGGESTION_LIMIT);
        assert_eq!(names(&found), vec!["Ma Shang"]);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn blank_query_suggests_nothing(idioms: Vec<Idiom>, #[case] query: &str) {
        assert!(suggestions(&idioms, query, DEFAULT_SUGGESTION_LIMIT).is_empty());
    }

    #[rstest]
    fn limit_caps_results(idioms: Vec<Idiom>) {
        assert_eq!(suggestions(&idioms, "马", 2).len(), 2);
    }
}
