use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 1000;
pub const DEFAULT_HISTORY_LIMIT: i64 = 10;
/// Anything above is treated like a garbage value and falls back to the default.
pub const MAX_PAGE: i64 = 1_000_000;
pub const MAX_LIMIT: i64 = 10_000;

/// Page window resolved from query parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub page: i64,
    pub limit: i64,
}

impl Page {
    pub fn new(page: i64, limit: i64) -> Self {
        Self { page, limit }
    }

    /// Missing, unparsable, non-positive or oversized values fall back to the defaults.
    pub fn parse(page: Option<&str>, limit: Option<&str>, default_limit: i64) -> Self {
        Self {
            page: bounded_or(page, MAX_PAGE, DEFAULT_PAGE),
            limit: bounded_or(limit, MAX_LIMIT, default_limit),
        }
    }

    pub fn offset(&self) -> i64 {
        self.page.saturating_sub(1).max(0).saturating_mul(self.limit)
    }
}

fn bounded_or(value: Option<&str>, max: i64, default: i64) -> i64 {
    value
        .and_then(|raw| raw.trim().parse::<i64>().ok())
        .filter(|parsed| (1..=max).contains(parsed))
        .unwrap_or(default)
}

/// Query string shared by every list endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub name: Option<String>,
    pub search: Option<String>,
    pub status: Option<String>,
}

impl ListQuery {
    pub fn page(&self, default_limit: i64) -> Page {
        Page::parse(self.page.as_deref(), self.limit.as_deref(), default_limit)
    }

    /// `name` wins over `search`; blank terms count as absent.
    pub fn term(&self) -> Option<String> {
        let present = |value: &Option<String>| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|term| !term.is_empty())
                .map(str::to_string)
        };
        present(&self.name).or_else(|| present(&self.search))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub page: i64,
    pub limit: i64,
    pub total: i64,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, page: Page, total: i64) -> Self {
        Self {
            items,
            page: page.page,
            limit: page.limit,
            total,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paginated<U> {
        Paginated {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            limit: self.limit,
            total: self.total,
        }
    }
}
