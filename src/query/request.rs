//! Query request value objects
//!
//! These are the request-scoped descriptions every list endpoint
//! accepts: filter criteria, sort keys, pagination bounds and an
//! optional column subset. All of them are constructed from the inbound
//! JSON body and discarded once the response envelope is built.
//!
//! # Wire format
//! ```json
//! {
//!   "filters": [{"propertyName": "name", "operation": "Contains", "value": "para"}],
//!   "sort": [{"sortBy": "unit_price", "sortDirection": "desc"}],
//!   "pagination": {"pageNumber": 2, "pageSize": 25, "getAll": false},
//!   "columns": ["name", "unit_price"]
//! }
//! ```

use serde::{Deserialize, Serialize};

/// Hard upper bound on the page size a client can request
pub const MAX_PAGE_SIZE: usize = 1000;

fn default_page_number() -> i64 {
    1
}

fn default_page_size() -> i64 {
    10
}

/// One filter condition against a single entity field
///
/// `value` is always textual; it is coerced to the target field's
/// scalar kind at evaluation time. A criterion naming an unknown field
/// is silently dropped.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriterion {
    /// Name of the entity field to test (matched case-insensitively)
    pub property_name: String,

    /// The comparison to perform
    pub operation: FilterOperator,

    /// Textual comparison value; ignored by IsNull/IsNotNull
    #[serde(default)]
    pub value: String,
}

/// The closed set of filter operations clients may request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterOperator {
    Equal,
    NotEqual,
    Contains,
    StartsWith,
    EndsWith,
    GreaterThan,
    LessThan,
    GreaterOrEqual,
    LessOrEqual,
    IsNull,
    IsNotNull,
    In,
    NotIn,
}

/// One sort key; an ordered sequence of these forms a multi-key order
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortKey {
    /// Name of the entity field to order by (matched case-insensitively)
    pub sort_by: String,

    /// "desc" (case-insensitive) for descending; anything else sorts
    /// ascending
    #[serde(default)]
    pub sort_direction: String,
}

impl SortKey {
    /// Whether this key orders descending
    pub fn is_descending(&self) -> bool {
        self.sort_direction.eq_ignore_ascii_case("desc")
    }
}

/// Pagination bounds for a list request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageSpec {
    /// Page number, starting at 1; values below 1 are clamped up
    pub page_number: i64,

    /// Records per page; clamped into `[1, MAX_PAGE_SIZE]`
    pub page_size: i64,

    /// When true, every matching record is returned as a single page
    /// and the other two fields are ignored
    pub get_all: bool,
}

impl Default for PageSpec {
    fn default() -> Self {
        Self {
            page_number: default_page_number(),
            page_size: default_page_size(),
            get_all: false,
        }
    }
}

impl PageSpec {
    /// Effective page number, ensuring minimum of 1
    pub fn page_number(&self) -> usize {
        self.page_number.max(1) as usize
    }

    /// Effective page size, clamped into `[1, MAX_PAGE_SIZE]`
    pub fn page_size(&self) -> usize {
        self.page_size.clamp(1, MAX_PAGE_SIZE as i64) as usize
    }
}

/// A complete dynamic list query: filters, sort, pagination and an
/// optional column projection
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QueryRequest {
    /// Filter criteria, AND-combined
    pub filters: Vec<FilterCriterion>,

    /// Sort keys, primary first
    pub sort: Vec<SortKey>,

    /// Pagination bounds
    pub pagination: PageSpec,

    /// When present, results are projected down to these fields and
    /// returned as name→value rows instead of full entities
    pub columns: Option<Vec<String>>,
}

impl QueryRequest {
    /// A query returning every record as a single page
    pub fn all() -> Self {
        Self {
            pagination: PageSpec {
                get_all: true,
                ..PageSpec::default()
            },
            ..Self::default()
        }
    }

    /// Add a filter criterion
    pub fn filter(
        mut self,
        property: impl Into<String>,
        operation: FilterOperator,
        value: impl Into<String>,
    ) -> Self {
        self.filters.push(FilterCriterion {
            property_name: property.into(),
            operation,
            value: value.into(),
        });
        self
    }

    /// Add a sort key
    pub fn order_by(mut self, field: impl Into<String>, direction: impl Into<String>) -> Self {
        self.sort.push(SortKey {
            sort_by: field.into(),
            sort_direction: direction.into(),
        });
        self
    }

    /// Set pagination bounds
    pub fn paginate(mut self, page_number: i64, page_size: i64) -> Self {
        self.pagination = PageSpec {
            page_number,
            page_size,
            get_all: false,
        };
        self
    }

    /// Restrict the result to a subset of columns
    pub fn select(mut self, columns: Vec<&str>) -> Self {
        self.columns = Some(columns.into_iter().map(String::from).collect());
        self
    }
}
