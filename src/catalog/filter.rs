//! Multi-predicate filtering over the catalog.

use crate::catalog::Catalog;
use crate::catalog::model::QuestionSummary;
use crate::catalog::selection::SelectionState;

/// Whether one summary passes every enabled predicate of `state`.
pub fn matches(item: &QuestionSummary, state: &SelectionState) -> bool {
    if let Some(difficulty) = state.difficulty()
        && item.difficulty != difficulty
    {
        return false;
    }
    if let Some(tag) = state.active_tag()
        && !item.has_tag(tag)
    {
        return false;
    }
    let needle = state.search_text();
    needle.is_empty() || item.title.to_lowercase().contains(needle)
}

/// Catalog positions of the matching items, in catalog order.
pub fn apply_positions(catalog: &Catalog, state: &SelectionState) -> Vec<usize> {
    catalog
        .items()
        .iter()
        .enumerate()
        .filter(|(_, q)| matches(q, state))
        .map(|(pos, _)| pos)
        .collect()
}

/// The matching summaries, in catalog order.
pub fn apply<'a>(catalog: &'a Catalog, state: &SelectionState) -> Vec<&'a QuestionSummary> {
    catalog
        .items()
        .iter()
        .filter(|q| matches(q, state))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::{summary, two_sum_catalog};
    use crate::catalog::model::{Difficulty, QuestionId};
    use proptest::prelude::*;

    fn ids(result: &[&QuestionSummary]) -> Vec<u64> {
        result.iter().map(|q| q.id.0).collect()
    }

    #[test]
    fn end_to_end_filter_sequence() {
        let catalog = two_sum_catalog();
        let mut state = SelectionState::new();

        state.set_search_text("two");
        assert_eq!(ids(&apply(&catalog, &state)), vec![1, 2]);

        state.set_difficulty(Some(Difficulty::Easy));
        assert_eq!(ids(&apply(&catalog, &state)), vec![1]);

        state.set_difficulty(None);
        state.set_search_text("");
        state.toggle_tag("Array");
        assert_eq!(ids(&apply(&catalog, &state)), vec![1]);

        state.toggle_tag("Array");
        assert_eq!(ids(&apply(&catalog, &state)), vec![1, 2]);
    }

    #[test]
    fn tag_match_is_exact_not_substring() {
        let catalog = two_sum_catalog();
        let mut state = SelectionState::new();
        state.toggle_tag("Hash");
        assert!(apply(&catalog, &state).is_empty());
    }

    #[test]
    fn empty_catalog_yields_empty_result() {
        let mut state = SelectionState::new();
        state.set_search_text("x");
        assert!(apply(&Catalog::default(), &state).is_empty());
    }

    #[test]
    fn positions_match_items() {
        let catalog = two_sum_catalog();
        let mut state = SelectionState::new();
        state.toggle_tag("Linked List");
        assert_eq!(apply_positions(&catalog, &state), vec![1]);
    }

    fn arb_catalog() -> impl Strategy<Value = Catalog> {
        let item = (
            "[A-Za-z ]{0,12}",
            0..3usize,
            prop::collection::vec("[a-d]", 0..4),
        );
        prop::collection::vec(item, 0..30).prop_map(|raw| {
            Catalog::new(
                raw.into_iter()
                    .enumerate()
                    .map(|(i, (title, d, tags))| {
                        let tags: Vec<&str> = tags.iter().map(String::as_str).collect();
                        summary(i as u64, &title, Difficulty::ALL[d], &tags)
                    })
                    .collect(),
            )
        })
    }

    proptest! {
        #[test]
        fn empty_state_returns_catalog_unchanged(catalog in arb_catalog()) {
            let result = apply(&catalog, &SelectionState::new());
            let expected: Vec<&QuestionSummary> = catalog.items().iter().collect();
            prop_assert_eq!(result, expected);
        }

        #[test]
        fn tag_filter_is_sound_and_complete(catalog in arb_catalog(), tag in "[a-d]") {
            let mut state = SelectionState::new();
            state.toggle_tag(&tag);
            let result = apply(&catalog, &state);
            prop_assert!(result.iter().all(|q| q.has_tag(&tag)));
            let expected = catalog.items().iter().filter(|q| q.has_tag(&tag)).count();
            prop_assert_eq!(result.len(), expected);
        }

        #[test]
        fn filter_preserves_catalog_order(
            catalog in arb_catalog(),
            needle in "[a-z]{0,2}",
            d in prop::option::of(0..3usize),
        ) {
            let mut state = SelectionState::new();
            state.set_search_text(&needle);
            state.set_difficulty(d.map(|d| Difficulty::ALL[d]));
            let result: Vec<QuestionId> = apply(&catalog, &state).iter().map(|q| q.id).collect();
            let mut sorted = result.clone();
            sorted.sort();
            prop_assert_eq!(result, sorted);
        }
    }
}
