//! filter specification

use std::borrow::Cow;
use std::collections::HashMap;

use validator::{ValidationError, ValidationErrors};

use crate::sort::{SortField, SortKey};

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_PAGE_SIZE: i64 = 20;
pub const DEFAULT_SORT: &str = "id";
pub const MAX_PAGE_SIZE: i64 = 100;
/// Keeps `(page - 1) * page_size` well inside a signed 64-bit offset.
pub const MAX_PAGE: i64 = 10_000_000;

pub const PAGE_PARAM: &str = "page";
pub const PAGE_SIZE_PARAM: &str = "page_size";
pub const SORT_PARAM: &str = "sort";

/// Paging and sorting exactly as the client sent them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListParams {
    pub page: i64,
    pub page_size: i64,
    pub sort: String,
}

/// A validated listing request. Only [`FilterSpec::validate`] and
/// [`FilterSpec::from_query`] build one, so a query plan never sees
/// out-of-range paging or a sort key outside the resource's enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterSpec<F: SortField> {
    page: u64,
    page_size: u64,
    sort: SortKey<F>,
}

impl<F: SortField> FilterSpec<F> {
    /// Checks every rule and reports all violations together.
    pub fn validate(params: &ListParams) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let spec = Self::check(params, &mut errors);
        match spec {
            Some(spec) if errors.is_empty() => Ok(spec),
            _ => Err(errors),
        }
    }

    /// Reads `page`, `page_size` and `sort` from a query string map, falling
    /// back to the defaults when absent. Integer parse failures are reported
    /// next to any other violation.
    pub fn from_query(query: &HashMap<String, String>) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let params = ListParams {
            page: read_int(query, PAGE_PARAM, DEFAULT_PAGE, &mut errors),
            page_size: read_int(query, PAGE_SIZE_PARAM, DEFAULT_PAGE_SIZE, &mut errors),
            sort: query
                .get(SORT_PARAM)
                .cloned()
                .unwrap_or_else(|| DEFAULT_SORT.to_string()),
        };
        let spec = Self::check(&params, &mut errors);
        match spec {
            Some(spec) if errors.is_empty() => Ok(spec),
            _ => Err(errors),
        }
    }

    fn check(params: &ListParams, errors: &mut ValidationErrors) -> Option<Self> {
        if params.page < 1 {
            errors.add(PAGE_PARAM, field_error("range", "must be greater than zero"));
        } else if params.page > MAX_PAGE {
            errors.add(PAGE_PARAM, field_error("range", "must be a maximum of 10 million"));
        }
        if params.page_size < 1 {
            errors.add(
                PAGE_SIZE_PARAM,
                field_error("range", "must be greater than zero"),
            );
        } else if params.page_size > MAX_PAGE_SIZE {
            errors.add(
                PAGE_SIZE_PARAM,
                field_error("range", "must be a maximum of 100"),
            );
        }
        let sort = SortKey::parse(&params.sort);
        if sort.is_none() {
            errors.add(SORT_PARAM, field_error("safelist", "invalid sort value"));
        }
        Some(Self {
            page: u64::try_from(params.page).ok()?,
            page_size: u64::try_from(params.page_size).ok()?,
            sort: sort?,
        })
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    pub fn sort(&self) -> SortKey<F> {
        self.sort
    }

    pub fn limit(&self) -> u64 {
        self.page_size
    }

    pub fn offset(&self) -> u64 {
        (self.page - 1) * self.page_size
    }
}

fn read_int(
    query: &HashMap<String, String>,
    key: &'static str,
    default: i64,
    errors: &mut ValidationErrors,
) -> i64 {
    match query.get(key) {
        None => default,
        Some(raw) if raw.is_empty() => default,
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            errors.add(key, field_error("integer", "must be an integer value"));
            default
        }),
    }
}

fn field_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

/// Flattens validation errors into one message per field, the shape clients
/// receive in a 422 body.
pub fn error_messages(errors: &ValidationErrors) -> HashMap<String, String> {
    errors
        .field_errors()
        .into_iter()
        .filter_map(|(field, list)| {
            let first = list.first()?;
            let message = first
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| first.code.to_string());
            Some((field.to_string(), message))
        })
        .collect()
}
