//! resource descriptor

use std::collections::HashMap;

use crate::filter::FilterSpec;
use crate::plan::{Predicate, QueryPlan};
use crate::sort::SortField;

/// Maps a query-string parameter onto the column it filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchField {
    pub param: &'static str,
    pub column: &'static str,
}

impl SearchField {
    pub const fn new(param: &'static str, column: &'static str) -> Self {
        Self { param, column }
    }
}

/// Everything the listing engine needs to know about one resource type:
/// its sortable columns, its identity column and its search parameters.
pub trait Resource {
    type Sort: SortField;

    /// Envelope key for a listing, e.g. `foods`.
    const PLURAL: &'static str;
    const IDENTITY: &'static str = "id";
    const SEARCH: &'static [SearchField];

    /// Builds one predicate per search field, in declaration order. Missing
    /// parameters become empty values and therefore match everything.
    fn predicates(query: &HashMap<String, String>) -> Vec<Predicate> {
        Self::SEARCH
            .iter()
            .map(|field| {
                let value = query.get(field.param).map(String::as_str).unwrap_or("");
                Predicate::eq(field.column, value)
            })
            .collect()
    }

    fn plan(spec: &FilterSpec<Self::Sort>, query: &HashMap<String, String>) -> QueryPlan {
        QueryPlan::new(spec, Self::IDENTITY, Self::predicates(query))
    }
}
