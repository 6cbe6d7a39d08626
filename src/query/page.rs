//! Page envelope and pagination execution
//!
//! The executor counts, slices and wraps an already filtered and
//! ordered record list. Count and slice always come from the same
//! materialization, so repeated identical requests against an
//! unchanged store produce identical envelopes.

use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;

use crate::query::request::PageSpec;

/// One bounded slice of a total result set, plus navigation metadata
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<R> {
    /// The records on this page
    pub data: Vec<R>,

    /// Total number of records matching the query
    pub total_records: usize,

    /// Current page number (starts at 1)
    pub page_number: usize,

    /// Effective page size
    pub page_size: usize,

    /// Total number of pages
    pub total_pages: usize,

    /// Whether a later page exists
    pub has_next_page: bool,

    /// Whether an earlier page exists
    pub has_previous_page: bool,

    /// Free-form response metadata (e.g. dropped criteria warnings)
    pub metadata: HashMap<String, Value>,
}

impl<R> Page<R> {
    /// Attach one metadata entry
    pub fn insert_metadata(&mut self, key: impl Into<String>, value: Value) {
        self.metadata.insert(key.into(), value);
    }
}

/// Slice a filtered, ordered record list into one page
///
/// `get_all` returns everything as a single page; otherwise the page
/// number is clamped to at least 1 and the page size into `[1, 1000]`.
pub fn paginate<R>(records: Vec<R>, spec: &PageSpec) -> Page<R> {
    let total_records = records.len();

    if spec.get_all {
        return Page {
            data: records,
            total_records,
            page_number: 1,
            page_size: total_records,
            total_pages: 1,
            has_next_page: false,
            has_previous_page: false,
            metadata: HashMap::new(),
        };
    }

    let page_number = spec.page_number();
    let page_size = spec.page_size();
    let total_pages = total_records.div_ceil(page_size);
    let skip = (page_number - 1) * page_size;

    let data: Vec<R> = records.into_iter().skip(skip).take(page_size).collect();

    Page {
        data,
        total_records,
        page_number,
        page_size,
        total_pages,
        has_next_page: page_number < total_pages,
        has_previous_page: page_number > 1,
        metadata: HashMap::new(),
    }
}
