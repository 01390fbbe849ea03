//! Submission service: validation rules, paging math, and the create/list flows.

mod pagination;
mod submissions;
mod validation;
pub use pagination::{parse_int_prefix, PageRequest, Pagination, DEFAULT_LIMIT, DEFAULT_PAGE, MAX_LIMIT};
pub use submissions::{FetchParams, ListResult, SubmissionService};
pub use validation::{
    required_fields, validate_dob, validate_email, validate_gender, validate_name, validate_phone,
    REQUIRED_FIELDS,
};
