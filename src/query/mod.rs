//! Query engine over the normalized entity collection.
//!
//! Everything here is a pure function of its inputs: the canonical
//! collection is only borrowed, never reordered.

mod filter;
mod sort;
mod stats;

pub use filter::*;
pub use sort::*;
pub use stats::*;

use serde::Serialize;

use crate::model::Entity;

/// Derived view handed to presentation consumers.
#[derive(Debug, Clone, Serialize)]
pub struct QueryResult<'a> {
    pub data: Vec<&'a Entity>,
    pub stats: Stats,
    pub facets: Facets,
}

/// Filter, then sort, then count. Facets ignore the filters.
pub fn apply<'a>(entities: &'a [Entity], filters: &Filters, sort: SortSpec) -> QueryResult<'a> {
    let mut data: Vec<&Entity> = entities.iter().filter(|e| filters.matches(e)).collect();
    sort_view(&mut data, sort);

    QueryResult {
        stats: Stats::from_view(&data),
        facets: Facets::from_entities(entities),
        data,
    }
}
