//! Builds the parameterized submission queries. Identifiers are fixed; every value is a parameter.

use super::params::BindValue;
use crate::model::Gender;
use crate::service::PageRequest;

pub const TABLE: &str = "submissions";
pub const GENDER_TYPE: &str = "submission_gender";

/// SELECT list; the enum column comes back as text so it decodes into `String`.
const SELECT_COLUMNS: &str = "id, name, email, phone, gender::text AS gender, dob, created_at, updated_at";

/// Columns matched by free-text search.
const SEARCH_COLUMNS: [&str; 3] = ["name", "email", "phone"];

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListFilter {
    pub search: Option<String>,
    pub gender: Option<Gender>,
}

#[derive(Debug)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<BindValue>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    fn push_param(&mut self, v: BindValue) -> usize {
        self.params.push(v);
        self.params.len()
    }
}

/// Escape LIKE metacharacters so the search term matches literally.
fn escape_like(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Appends the WHERE clause for `filter` to `q`, ANDing the active predicates.
fn push_where(q: &mut QueryBuf, filter: &ListFilter) {
    let mut where_parts = Vec::new();
    if let Some(search) = filter.search.as_deref().filter(|s| !s.is_empty()) {
        let n = q.push_param(BindValue::Text(format!("%{}%", escape_like(search))));
        let ors: Vec<String> = SEARCH_COLUMNS
            .iter()
            .map(|c| format!("{} ILIKE ${}", c, n))
            .collect();
        where_parts.push(format!("({})", ors.join(" OR ")));
    }
    if let Some(gender) = filter.gender {
        let n = q.push_param(BindValue::Text(gender.as_str().to_string()));
        where_parts.push(format!("gender = ${}::{}", n, GENDER_TYPE));
    }
    if !where_parts.is_empty() {
        q.sql.push_str(" WHERE ");
        q.sql.push_str(&where_parts.join(" AND "));
    }
}

/// SELECT COUNT(*) with the list filters.
pub fn count_submissions(filter: &ListFilter) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = format!("SELECT COUNT(*) FROM {}", TABLE);
    push_where(&mut q, filter);
    q
}

/// One page of submissions, newest first. LIMIT and OFFSET are bound after the filter params.
pub fn select_submissions(filter: &ListFilter, page: PageRequest) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = format!("SELECT {} FROM {}", SELECT_COLUMNS, TABLE);
    push_where(&mut q, filter);
    let limit = q.push_param(BindValue::BigInt(page.limit));
    let offset = q.push_param(BindValue::BigInt(page.offset()));
    q.sql.push_str(&format!(
        " ORDER BY created_at DESC, id DESC LIMIT ${} OFFSET ${}",
        limit, offset
    ));
    q
}

/// INSERT returning the assigned id. Params: name, email, phone, gender, dob.
pub fn insert_submission() -> String {
    format!(
        "INSERT INTO {} (name, email, phone, gender, dob) VALUES ($1, $2, $3, $4::{}, $5) RETURNING id",
        TABLE, GENDER_TYPE
    )
}
