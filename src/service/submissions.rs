//! Create and list flows over `SubmissionStore`.

use super::pagination::{PageRequest, Pagination};
use crate::error::AppError;
use crate::model::{Gender, NewSubmission, Submission};
use crate::sql::ListFilter;
use crate::store::SubmissionStore;
use chrono::NaiveDate;
use serde_json::Value;
use std::collections::HashMap;

/// Raw query string of the read endpoint. Values are parsed leniently, never rejected.
#[derive(Clone, Debug, Default)]
pub struct FetchParams {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub search: Option<String>,
    pub gender: Option<String>,
}

impl From<HashMap<String, String>> for FetchParams {
    fn from(mut query: HashMap<String, String>) -> Self {
        FetchParams {
            page: query.remove("page"),
            limit: query.remove("limit"),
            search: query.remove("search"),
            gender: query.remove("gender"),
        }
    }
}

impl FetchParams {
    pub fn page_request(&self) -> PageRequest {
        PageRequest::from_params(self.page.as_deref(), self.limit.as_deref())
    }

    /// Blank search is dropped; a gender outside the enumeration is ignored.
    pub fn filter(&self) -> ListFilter {
        let search = self
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from);
        let gender = self
            .gender
            .as_deref()
            .and_then(|g| g.trim().parse::<Gender>().ok());
        ListFilter { search, gender }
    }
}

#[derive(Debug)]
pub struct ListResult {
    pub rows: Vec<Submission>,
    pub pagination: Pagination,
}

pub struct SubmissionService;

impl SubmissionService {
    /// Decode and validate a raw body, then insert it. Returns the new id.
    pub async fn create(store: &SubmissionStore, body: &[u8], today: NaiveDate) -> Result<i64, AppError> {
        let body: Value = serde_json::from_slice(body).map_err(|_| AppError::InvalidJson)?;
        let submission = NewSubmission::from_json(&body, today)?;
        let id = store.insert(&submission).await?;
        tracing::info!(id, "submission created");
        Ok(id)
    }

    /// Count with the filters, then fetch the requested page.
    pub async fn list(store: &SubmissionStore, params: &FetchParams) -> Result<ListResult, AppError> {
        let page = params.page_request();
        let filter = params.filter();
        let total = store.count(&filter).await?;
        let rows = store.list(&filter, page).await?;
        Ok(ListResult {
            rows,
            pagination: Pagination::new(page, total),
        })
    }
}
