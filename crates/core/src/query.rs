//! Query normalization.
//!
//! Turns a raw, untrusted parameter bag (as it arrives from an HTTP query
//! string or a browser URL) into a [`QueryDescriptor`]. A descriptor can only
//! be obtained through validation, so holding one means every field is in
//! range.

use std::collections::{BTreeMap, HashMap};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::automation::{AutomationField, FILTERABLE_FIELDS};
use crate::error::QueryError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const DEFAULT_PAGE: u64 = 1;

pub const DEFAULT_LIMIT: u32 = 50;

pub const MIN_LIMIT: u32 = 1;

pub const MAX_LIMIT: u32 = 50_000;

pub const PARAM_PAGE: &str = "page";
pub const PARAM_LIMIT: &str = "limit";
pub const PARAM_SORT_BY: &str = "sortBy";
pub const PARAM_SORT_ORDER: &str = "sortOrder";

/// Raw query parameters. A missing key is an absent value.
pub type RawParams = HashMap<String, String>;

/// Build a parameter bag from decoded query pairs. When a key repeats, the
/// first value wins.
pub fn collect_params<I>(pairs: I) -> RawParams
where
    I: IntoIterator<Item = (String, String)>,
{
    let mut params = RawParams::new();
    for (key, value) in pairs {
        params.entry(key).or_insert(value);
    }
    params
}

/// Active filters keyed by field. Values are trimmed and never empty.
pub type Filters = BTreeMap<AutomationField, String>;

// ---------------------------------------------------------------------------
// Sort order
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    /// Exact match on `asc` / `desc`; anything else is `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }

    pub fn reversed(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

// ---------------------------------------------------------------------------
// Descriptor
// ---------------------------------------------------------------------------

/// Validated listing query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryDescriptor {
    page: u64,
    limit: u32,
    sort_by: Option<String>,
    sort_order: SortOrder,
    filters: Filters,
}

impl Default for QueryDescriptor {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            sort_by: None,
            sort_order: SortOrder::Asc,
            filters: Filters::new(),
        }
    }
}

impl QueryDescriptor {
    /// Strict normalization used by the server.
    ///
    /// Pagination is checked first; a bad `page` or `limit` fails with
    /// [`QueryError::InvalidPagination`] before `sortOrder` is looked at.
    /// Keys other than the known parameters and filterable fields are
    /// ignored.
    pub fn from_params(params: &RawParams) -> Result<Self, QueryError> {
        let page = parse_page(param(params, PARAM_PAGE))?;
        let limit = parse_limit(param(params, PARAM_LIMIT))?;
        let sort_order = parse_sort_order(param(params, PARAM_SORT_ORDER))?;

        Ok(Self {
            page,
            limit,
            sort_by: param(params, PARAM_SORT_BY).map(str::to_owned),
            sort_order,
            filters: collect_filters(params),
        })
    }

    /// Lenient normalization used when reading a browser URL.
    ///
    /// Uses the same field rules as [`from_params`](Self::from_params), but a
    /// field that fails validation falls back to its default rather than
    /// failing the whole parse.
    pub fn from_params_lenient(params: &RawParams) -> Self {
        Self {
            page: parse_page(param(params, PARAM_PAGE)).unwrap_or(DEFAULT_PAGE),
            limit: parse_limit(param(params, PARAM_LIMIT)).unwrap_or(DEFAULT_LIMIT),
            sort_by: param(params, PARAM_SORT_BY).map(str::to_owned),
            sort_order: parse_sort_order(param(params, PARAM_SORT_ORDER)).unwrap_or_default(),
            filters: collect_filters(params),
        }
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn sort_by(&self) -> Option<&str> {
        self.sort_by.as_deref()
    }

    pub fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    pub fn filters(&self) -> &Filters {
        &self.filters
    }

    pub fn filter(&self, field: AutomationField) -> Option<&str> {
        self.filters.get(&field).map(String::as_str)
    }

    pub fn set_page(&mut self, page: u64) -> Result<(), QueryError> {
        if page < DEFAULT_PAGE {
            return Err(QueryError::InvalidPagination);
        }
        self.page = page;
        Ok(())
    }

    pub fn set_limit(&mut self, limit: u32) -> Result<(), QueryError> {
        if !(MIN_LIMIT..=MAX_LIMIT).contains(&limit) {
            return Err(QueryError::InvalidPagination);
        }
        self.limit = limit;
        Ok(())
    }

    /// Set the sort key. An empty key clears sorting.
    pub fn set_sort(&mut self, sort_by: Option<String>, sort_order: SortOrder) {
        self.sort_by = sort_by.filter(|s| !s.is_empty());
        self.sort_order = sort_order;
    }

    /// Set or clear one filter. Blank values clear it; non-filterable
    /// fields are ignored.
    pub fn set_filter(&mut self, field: AutomationField, value: Option<&str>) {
        if !field.is_filterable() {
            return;
        }
        match value.map(str::trim).filter(|v| !v.is_empty()) {
            Some(v) => {
                self.filters.insert(field, v.to_owned());
            }
            None => {
                self.filters.remove(&field);
            }
        }
    }

    pub fn clear_filters(&mut self) {
        self.filters.clear();
    }

    /// Serialize to ordered query pairs.
    ///
    /// `page` and `limit` are always present. `sortOrder` is written when a
    /// sort key is set or when it differs from the default, so the pairs
    /// parse back to an equal descriptor.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            (PARAM_PAGE, self.page.to_string()),
            (PARAM_LIMIT, self.limit.to_string()),
        ];

        if let Some(sort_by) = &self.sort_by {
            pairs.push((PARAM_SORT_BY, sort_by.clone()));
        }
        if self.sort_by.is_some() || self.sort_order != SortOrder::default() {
            pairs.push((PARAM_SORT_ORDER, self.sort_order.as_str().to_owned()));
        }

        for (field, value) in &self.filters {
            pairs.push((field.as_str(), value.clone()));
        }

        pairs
    }
}

// ---------------------------------------------------------------------------
// Field parsers
// ---------------------------------------------------------------------------

/// Look up a parameter, treating an empty string as absent.
fn param<'a>(params: &'a RawParams, key: &str) -> Option<&'a str> {
    params.get(key).map(String::as_str).filter(|v| !v.is_empty())
}

/// Parse a pagination count: surrounding whitespace is ignored, blank means
/// absent, and the rest must be plain ASCII digits (no sign, no fraction).
/// A value too large for `T` is invalid.
fn parse_count<T: FromStr>(raw: Option<&str>) -> Result<Option<T>, QueryError> {
    let Some(digits) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(QueryError::InvalidPagination);
    }
    digits
        .parse::<T>()
        .map(Some)
        .map_err(|_| QueryError::InvalidPagination)
}

fn parse_page(raw: Option<&str>) -> Result<u64, QueryError> {
    let page = parse_count::<u64>(raw)?.unwrap_or(DEFAULT_PAGE);
    if page < DEFAULT_PAGE {
        return Err(QueryError::InvalidPagination);
    }
    Ok(page)
}

fn parse_limit(raw: Option<&str>) -> Result<u32, QueryError> {
    let limit = parse_count::<u32>(raw)?.unwrap_or(DEFAULT_LIMIT);
    if !(MIN_LIMIT..=MAX_LIMIT).contains(&limit) {
        return Err(QueryError::InvalidPagination);
    }
    Ok(limit)
}

fn parse_sort_order(raw: Option<&str>) -> Result<SortOrder, QueryError> {
    match raw {
        None => Ok(SortOrder::default()),
        Some(s) => SortOrder::parse(s).ok_or(QueryError::InvalidSortOrder),
    }
}

fn collect_filters(params: &RawParams) -> Filters {
    FILTERABLE_FIELDS
        .into_iter()
        .filter_map(|field| {
            let value = params.get(field.as_str())?.trim();
            (!value.is_empty()).then(|| (field, value.to_owned()))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
