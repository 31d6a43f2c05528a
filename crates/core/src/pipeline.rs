//! Query orchestration: normalize, fetch, filter, sort, paginate.
//!
//! Normalization and source failures abort the whole call. Once a query has
//! been normalized and the records fetched, the remaining stages cannot fail.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::automation::Automation;
use crate::error::{QueryError, SourceError};
use crate::filter::apply_filters;
use crate::pagination::{paginate, Pagination};
use crate::query::{Filters, QueryDescriptor, RawParams, SortOrder};
use crate::sort::sort_records;

/// Supplies the full, unfiltered record collection.
///
/// Implementations are read on every query; nothing is cached here.
#[async_trait]
pub trait RecordSource: Send + Sync {
    async fn list(&self) -> Result<Vec<Automation>, SourceError>;
}

/// Echo of the sort that was applied.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sorting {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
    pub sort_order: SortOrder,
}

/// One page of results plus the metadata a client needs to reconcile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageResult<T> {
    pub data: Vec<T>,
    pub pagination: Pagination,
    #[serde(default)]
    pub filters: Filters,
    #[serde(default)]
    pub sorting: Sorting,
}

/// Run the full pipeline against raw request parameters.
pub async fn execute<S>(source: &S, params: &RawParams) -> Result<PageResult<Automation>, QueryError>
where
    S: RecordSource + ?Sized,
{
    let query = QueryDescriptor::from_params(params)?;
    run(source, &query).await
}

/// Run the pipeline for an already validated query.
pub async fn run<S>(source: &S, query: &QueryDescriptor) -> Result<PageResult<Automation>, QueryError>
where
    S: RecordSource + ?Sized,
{
    let records = source.list().await?;
    Ok(process(records, query))
}

/// Filter, sort and paginate an in-memory collection.
pub fn process(records: Vec<Automation>, query: &QueryDescriptor) -> PageResult<Automation> {
    let mut records = apply_filters(records, query.filters());
    sort_records(&mut records, query.sort_by(), query.sort_order());
    let (data, pagination) = paginate(records, query.page(), query.limit());

    PageResult {
        data,
        pagination,
        filters: query.filters().clone(),
        sorting: Sorting {
            sort_by: query.sort_by().map(str::to_owned),
            sort_order: query.sort_order(),
        },
    }
}
