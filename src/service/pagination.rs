//! Page/limit parsing and the pagination block of list responses.

use serde::Serialize;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 10;
pub const MAX_LIMIT: i64 = 100;

/// Lenient integer parse: optional leading whitespace and sign, then the leading digits.
/// No digits yields 0; overflow saturates.
pub fn parse_int_prefix(s: &str) -> i64 {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let mut n: i64 = 0;
    for b in digits.bytes().take_while(u8::is_ascii_digit) {
        let d = i64::from(b - b'0');
        n = n.saturating_mul(10).saturating_add(d);
    }
    if negative {
        -n
    } else {
        n
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub limit: i64,
}

impl PageRequest {
    /// Page floors at 1; limit clamps to [1, MAX_LIMIT]. Absent values take the defaults.
    pub fn from_params(page: Option<&str>, limit: Option<&str>) -> Self {
        let page = page.map_or(DEFAULT_PAGE, |p| parse_int_prefix(p).max(1));
        let limit = limit.map_or(DEFAULT_LIMIT, |l| parse_int_prefix(l).clamp(1, MAX_LIMIT));
        PageRequest { page, limit }
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        PageRequest {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub current_page: i64,
    pub per_page: i64,
    pub total_records: i64,
    pub total_pages: i64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl Pagination {
    pub fn new(req: PageRequest, total_records: i64) -> Self {
        let total_pages = (total_records + req.limit - 1) / req.limit;
        Pagination {
            current_page: req.page,
            per_page: req.limit,
            total_records,
            total_pages,
            has_next: req.page < total_pages,
            has_prev: req.page > 1,
        }
    }
}
