//! query plan

use crate::filter::FilterSpec;
use crate::sort::{Direction, SortField};

/// Case-insensitive equality on one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicate {
    pub column: &'static str,
    pub value: String,
}

impl Predicate {
    pub fn eq(column: &'static str, value: impl Into<String>) -> Self {
        Self {
            column,
            value: value.into(),
        }
    }

    /// An empty search value matches everything.
    pub fn is_active(&self) -> bool {
        !self.value.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderBy {
    pub column: &'static str,
    pub direction: Direction,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryPlan {
    predicates: Vec<Predicate>,
    order: Vec<OrderBy>,
    limit: u64,
    offset: u64,
}

impl QueryPlan {
    /// Orders by the requested key, then by `identity` ascending so pages stay
    /// stable when the primary key has duplicates.
    pub fn new<F: SortField>(
        spec: &FilterSpec<F>,
        identity: &'static str,
        predicates: Vec<Predicate>,
    ) -> Self {
        let sort = spec.sort();
        let mut order = vec![OrderBy {
            column: sort.column(),
            direction: sort.direction(),
        }];
        if sort.column() != identity {
            order.push(OrderBy {
                column: identity,
                direction: Direction::Asc,
            });
        }
        Self {
            predicates,
            order,
            limit: spec.limit(),
            offset: spec.offset(),
        }
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    pub fn active_predicates(&self) -> impl Iterator<Item = &Predicate> {
        self.predicates.iter().filter(|p| p.is_active())
    }

    pub fn order(&self) -> &[OrderBy] {
        &self.order
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }
}
