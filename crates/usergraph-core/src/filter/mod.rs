//! Pluggable predicate filters and the chain that applies them.
//!
//! A [`Filter`] pairs an applicability check on the criteria with a match
//! check on a single item. A [`FilterChain`] runs its filters in registration
//! order, skipping the ones that are not applicable, and keeps only the
//! items every applicable filter accepts.
//!
//! Predicates are plain function pointers: they cannot capture state and
//! only receive shared references, so a filter can never mutate the items
//! or the criteria.

pub mod request;

/// A single named predicate over items of type `E` driven by criteria `C`.
pub struct Filter<E, C> {
    name: &'static str,
    is_applicable: fn(&C) -> bool,
    matches: fn(&E, &C) -> bool,
}

impl<E, C> Filter<E, C> {
    pub const fn new(
        name: &'static str,
        is_applicable: fn(&C) -> bool,
        matches: fn(&E, &C) -> bool,
    ) -> Self {
        Self {
            name,
            is_applicable,
            matches,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Whether the criteria activate this filter.
    pub fn is_applicable(&self, criteria: &C) -> bool {
        (self.is_applicable)(criteria)
    }

    /// Whether `item` passes this filter. Only meaningful when applicable.
    pub fn matches(&self, item: &E, criteria: &C) -> bool {
        (self.matches)(item, criteria)
    }
}

impl<E, C> Clone for Filter<E, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E, C> Copy for Filter<E, C> {}

impl<E, C> std::fmt::Debug for Filter<E, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Filter").field("name", &self.name).finish()
    }
}

/// An ordered set of filters combined with logical AND.
#[derive(Debug)]
pub struct FilterChain<E, C> {
    filters: Vec<Filter<E, C>>,
}

impl<E, C> FilterChain<E, C> {
    pub fn new(filters: Vec<Filter<E, C>>) -> Self {
        Self { filters }
    }

    pub fn filters(&self) -> &[Filter<E, C>] {
        &self.filters
    }

    /// Names of the filters the criteria activate, in evaluation order.
    pub fn applicable(&self, criteria: &C) -> Vec<&'static str> {
        self.filters
            .iter()
            .filter(|f| f.is_applicable(criteria))
            .map(Filter::name)
            .collect()
    }

    /// Keep the items matching every applicable filter, preserving order.
    pub fn apply(&self, mut items: Vec<E>, criteria: &C) -> Vec<E> {
        for filter in &self.filters {
            if !filter.is_applicable(criteria) {
                continue;
            }
            items.retain(|item| filter.matches(item, criteria));
        }
        items
    }
}

impl<E, C> Default for FilterChain<E, C> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Bounds {
        min: Option<i32>,
        max: Option<i32>,
    }

    fn min_filter() -> Filter<i32, Bounds> {
        Filter::new(
            "min",
            |c| c.min.is_some(),
            |item, c| c.min.is_some_and(|min| *item >= min),
        )
    }

    fn max_filter() -> Filter<i32, Bounds> {
        Filter::new(
            "max",
            |c| c.max.is_some(),
            |item, c| c.max.is_some_and(|max| *item <= max),
        )
    }

    #[test]
    fn test_no_applicable_filter_passes_everything_through() {
        let chain = FilterChain::new(vec![min_filter(), max_filter()]);
        let items = vec![5, 1, 9, 3];
        assert_eq!(chain.apply(items.clone(), &Bounds::default()), items);
        assert!(chain.applicable(&Bounds::default()).is_empty());
    }

    #[test]
    fn test_applicable_filters_are_anded() {
        let chain = FilterChain::new(vec![min_filter(), max_filter()]);
        let bounds = Bounds {
            min: Some(3),
            max: Some(6),
        };
        assert_eq!(chain.apply(vec![5, 1, 9, 3, 6], &bounds), vec![5, 3, 6]);
        assert_eq!(chain.applicable(&bounds), vec!["min", "max"]);
    }

    #[test]
    fn test_order_of_filters_does_not_change_result() {
        let bounds = Bounds {
            min: Some(2),
            max: Some(8),
        };
        let items = vec![1, 2, 5, 8, 9, 4];
        let forward = FilterChain::new(vec![min_filter(), max_filter()]);
        let backward = FilterChain::new(vec![max_filter(), min_filter()]);
        assert_eq!(
            forward.apply(items.clone(), &bounds),
            backward.apply(items, &bounds)
        );
    }

    #[test]
    fn test_empty_chain_is_identity() {
        let chain: FilterChain<i32, Bounds> = FilterChain::default();
        let bounds = Bounds {
            min: Some(100),
            max: None,
        };
        assert_eq!(chain.apply(vec![1, 2], &bounds), vec![1, 2]);
    }
}
