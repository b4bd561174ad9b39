//! Entity search
//!
//! Multi-criteria filtering with pagination and a stable default ordering.
//! All three kinds share one pipeline over [`Resource`]: exact name/user
//! match, tag-intersection (the candidate's tags must be a superset of the
//! requested set), most-recently-updated first.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::model::{Application, Cluster, Command, Resource};
use crate::ops::store::Store;

/// Search criteria; unset fields impose no filter
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FindCriteria {
    /// Exact name match when present
    pub name: Option<String>,

    /// Exact user match when present
    pub user: Option<String>,

    /// Tag-intersection filter: matches entities whose tags are a superset
    /// of this set (AND across all supplied tags). Empty means no filter.
    #[serde(default)]
    pub tags: BTreeSet<String>,
}

/// Pagination window
///
/// `page` is a page index, clamped to non-negative. A non-positive `limit`
/// yields an empty result rather than an unbounded scan.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Page {
    pub page: i64,
    pub limit: i64,
}

impl Page {
    pub fn new(page: i64, limit: i64) -> Self {
        Self { page, limit }
    }

    /// The first page with a conventional operator-friendly size
    pub fn first() -> Self {
        Self::new(0, 64)
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::first()
    }
}

fn matches<T: Resource>(row: &T, criteria: &FindCriteria) -> bool {
    if let Some(name) = &criteria.name {
        if row.name() != name {
            return false;
        }
    }
    if let Some(user) = &criteria.user {
        if row.user() != user {
            return false;
        }
    }
    if !criteria.tags.is_empty() {
        let tags = row.attr_set(crate::model::Attribute::Tags);
        if !criteria.tags.iter().all(|t| tags.contains(t)) {
            return false;
        }
    }
    true
}

/// Shared filter / sort / page pipeline
///
/// Ordering is `updated` descending (most recently touched first) with id
/// ascending as the tie-break, so repeated queries over an unchanged store
/// return identical sequences.
fn filter_sort_page<T: Resource + Clone>(
    rows: Vec<&T>,
    criteria: &FindCriteria,
    page: Page,
) -> Vec<T> {
    if page.limit <= 0 {
        return Vec::new();
    }

    let mut hits: Vec<&T> = rows.into_iter().filter(|r| matches(*r, criteria)).collect();
    hits.sort_by(|a, b| {
        b.updated()
            .cmp(&a.updated())
            .then_with(|| a.id().cmp(b.id()))
    });

    let limit = page.limit as usize;
    let offset = (page.page.max(0) as usize).saturating_mul(limit);
    hits.into_iter()
        .skip(offset)
        .take(limit)
        .cloned()
        .collect()
}

/// Find Applications matching the criteria
///
/// Returns an empty vec (never an error) when nothing matches.
pub fn find_applications(store: &Store, criteria: &FindCriteria, page: Page) -> Vec<Application> {
    filter_sort_page(store.list_applications(), criteria, page)
}

/// Find Commands matching the criteria
///
/// Returns an empty vec (never an error) when nothing matches.
pub fn find_commands(store: &Store, criteria: &FindCriteria, page: Page) -> Vec<Command> {
    filter_sort_page(store.list_commands(), criteria, page)
}

/// Find Clusters matching the criteria
///
/// Returns an empty vec (never an error) when nothing matches.
pub fn find_clusters(store: &Store, criteria: &FindCriteria, page: Page) -> Vec<Cluster> {
    filter_sort_page(store.list_clusters(), criteria, page)
}
