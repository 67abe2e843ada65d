//! Position-based prev/next over the catalog order.
//!
//! Adjacency is the neighbouring slot in the catalog, not id arithmetic.

use crate::catalog::Catalog;
use crate::catalog::model::{IdKey, QuestionId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Prev,
    Next,
}

impl Step {
    fn offset(self) -> isize {
        match self {
            Self::Prev => -1,
            Self::Next => 1,
        }
    }
}

/// Where the current question sits in the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationContext {
    /// `None` when the id is not in the catalog.
    pub position: Option<usize>,
    pub total: usize,
    pub has_prev: bool,
    pub has_next: bool,
}

impl NavigationContext {
    /// `-1` for an unknown position, as the label arithmetic expects.
    pub fn raw_position(&self) -> isize {
        self.position.map_or(-1, |p| p as isize)
    }

    /// `"position+1 / total"`; an unknown position reads `"0 / total"`.
    pub fn label(&self) -> String {
        format!("{} / {}", self.raw_position() + 1, self.total)
    }

    pub fn is_known(&self) -> bool {
        self.position.is_some()
    }
}

fn position_of(catalog: &Catalog, current: &IdKey) -> Option<usize> {
    catalog
        .items()
        .iter()
        .position(|q| IdKey::from(q.id) == *current)
}

pub fn locate(catalog: &Catalog, current: impl Into<IdKey>) -> NavigationContext {
    let total = catalog.len();
    let position = position_of(catalog, &current.into());
    // An unknown position still lets the user step forward to the first item
    // (position -1 + 1 == 0), but never backward.
    let has_prev = position.is_some_and(|p| p > 0);
    let has_next = match position {
        Some(p) => p + 1 < total,
        None => total > 0,
    };
    NavigationContext {
        position,
        total,
        has_prev,
        has_next,
    }
}

/// Id of the neighbour in `direction`, or `None` at either end.
pub fn step(catalog: &Catalog, current: impl Into<IdKey>, direction: Step) -> Option<QuestionId> {
    let raw = position_of(catalog, &current.into()).map_or(-1, |p| p as isize);
    let target = raw.checked_add(direction.offset())?;
    let target = usize::try_from(target).ok()?;
    catalog.get(target).map(|q| q.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::ids;
    use proptest::prelude::*;

    #[test]
    fn middle_item_has_both_neighbours() {
        let catalog = ids(&[10, 20, 30]);
        let ctx = locate(&catalog, 20u64);
        assert!(ctx.has_prev);
        assert!(ctx.has_next);
        assert_eq!(ctx.label(), "2 / 3");
        assert_eq!(step(&catalog, 20u64, Step::Next), Some(QuestionId(30)));
        assert_eq!(step(&catalog, 20u64, Step::Prev), Some(QuestionId(10)));
    }

    #[test]
    fn stepping_past_either_end_is_none() {
        let catalog = ids(&[10, 20, 30]);
        assert_eq!(step(&catalog, 10u64, Step::Prev), None);
        assert_eq!(step(&catalog, 30u64, Step::Next), None);
        let first = locate(&catalog, 10u64);
        assert!(!first.has_prev);
        let last = locate(&catalog, 30u64);
        assert!(!last.has_next);
    }

    #[test]
    fn adjacency_is_positional_not_arithmetic() {
        let catalog = ids(&[5, 2, 9]);
        assert_eq!(step(&catalog, 2u64, Step::Next), Some(QuestionId(9)));
        assert_eq!(step(&catalog, 2u64, Step::Prev), Some(QuestionId(5)));
    }

    #[test]
    fn numeral_string_locates_like_integer() {
        let catalog = ids(&[10, 20, 30]);
        assert_eq!(locate(&catalog, "30"), locate(&catalog, 30u64));
        assert_eq!(locate(&catalog, "30").position, Some(2));
    }

    #[test]
    fn unknown_id_is_a_distinct_state() {
        let catalog = ids(&[10, 20, 30]);
        let ctx = locate(&catalog, "99");
        assert!(!ctx.is_known());
        assert_eq!(ctx.raw_position(), -1);
        assert_eq!(ctx.label(), "0 / 3");
        assert!(!ctx.has_prev);
        assert!(ctx.has_next);
        assert_eq!(step(&catalog, "99", Step::Prev), None);
        assert_eq!(step(&catalog, "99", Step::Next), Some(QuestionId(10)));
    }

    #[test]
    fn empty_catalog_has_no_neighbours() {
        let catalog = ids(&[]);
        let ctx = locate(&catalog, 1u64);
        assert_eq!(ctx.label(), "0 / 0");
        assert!(!ctx.has_prev && !ctx.has_next);
        assert_eq!(step(&catalog, 1u64, Step::Next), None);
    }

    proptest! {
        #[test]
        fn step_agrees_with_flags(n in 1usize..20, pick in 0usize..20) {
            let raw: Vec<u64> = (0..n as u64).map(|i| i * 7 + 3).collect();
            let catalog = ids(&raw);
            let current = raw[pick % n];
            let ctx = locate(&catalog, current);
            prop_assert_eq!(ctx.has_prev, step(&catalog, current, Step::Prev).is_some());
            prop_assert_eq!(ctx.has_next, step(&catalog, current, Step::Next).is_some());
        }
    }
}
