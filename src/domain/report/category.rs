use super::entity::{MediaType, Report};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use ts_rs::TS;

/// Page size used by the moderation tables.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Content partition of the report list. Each category is paginated and
/// cached on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS, Default)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum ReportCategory {
    #[default]
    Posts,
    Comments,
}

impl ReportCategory {
    pub const ALL: [ReportCategory; 2] = [Self::Posts, Self::Comments];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Posts => "posts",
            Self::Comments => "comments",
        }
    }

    pub fn media_type(&self) -> MediaType {
        match self {
            Self::Posts => MediaType::Post,
            Self::Comments => MediaType::Comment,
        }
    }
}

impl fmt::Display for ReportCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "posts" | "post" => Ok(Self::Posts),
            "comments" | "comment" => Ok(Self::Comments),
            other => Err(format!("unknown report category: {}", other)),
        }
    }
}

/// `category:page` entry of the fetched-keys ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub category: ReportCategory,
    pub page: u32,
}

impl CacheKey {
    pub fn new(category: ReportCategory, page: u32) -> Self {
        Self { category, page }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.category, self.page)
    }
}

/// One materialized page of reports for a single category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CategoryPage {
    pub category: ReportCategory,
    pub reports: Vec<Report>,
    pub current_page: u32,
    pub total_pages: u32,
    pub total_records: u32,
    pub page_size: u32,
    /// A fetch for this category's current page is in flight
    pub loading: bool,
    /// Message from the most recent failed fetch, cleared by the next success
    pub last_error: Option<String>,
}

impl CategoryPage {
    /// Initial page shown before anything was fetched.
    pub fn empty(category: ReportCategory, page_size: u32) -> Self {
        Self {
            category,
            reports: vec![],
            current_page: 1,
            total_pages: 0,
            total_records: 0,
            page_size,
            loading: false,
            last_error: None,
        }
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn find(&self, report_id: &str) -> Option<&Report> {
        self.reports.iter().find(|r| r.id == report_id)
    }
}
