//! Page view tracking and statistics.

use serde::{Deserialize, Serialize};

use folio_core::types::{Date, Timestamp};

use crate::entity::{Entity, Fillable, Timestamps};

columns! {
    /// Columns of the `page_views` table.
    pub enum PageViewColumn {
        Id => ("id", "bigint"),
        PageType => ("page_type", "text"),
        PageIdentifier => ("page_identifier", "text"),
        IpAddress => ("ip_address", "text"),
        UserAgent => ("user_agent", "text"),
        Referer => ("referer", "text"),
        CreatedAt => ("created_at", "timestamptz"),
    }
}

/// The `page_views` table. Only `created_at` exists, stamped by `track`.
pub struct PageView;

impl Entity for PageView {
    type Column = PageViewColumn;
    const NAME: &'static str = "PageView";
    const TABLE: &'static str = "page_views";
    const PRIMARY_KEY: PageViewColumn = PageViewColumn::Id;
    const FILLABLE: Fillable<PageViewColumn> = Fillable::Only(&[
        PageViewColumn::PageType,
        PageViewColumn::PageIdentifier,
        PageViewColumn::IpAddress,
        PageViewColumn::UserAgent,
        PageViewColumn::Referer,
    ]);
    const TIMESTAMPS: Option<Timestamps<PageViewColumn>> = None;
}

/// `page_type` recorded for project detail pages.
pub const PROJECT_DETAIL: &str = "project_detail";

/// DTO for recording a page view.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewPageView {
    pub page_type: String,
    pub page_identifier: Option<String>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub referer: Option<String>,
}

/// Optional date range, inclusive on both ends.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DateRange {
    pub date_from: Option<Timestamp>,
    pub date_to: Option<Timestamp>,
}

/// Filters for [`crate::repositories::PageViewRepo::get_stats`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageViewFilter {
    #[serde(flatten)]
    pub range: DateRange,
    pub page_type: Option<String>,
}

/// Views of one page type on one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageViewStat {
    pub page_type: String,
    pub views: i64,
    pub unique_visitors: i64,
    pub day: Date,
}

/// Views of one project detail page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopProject {
    pub project_slug: String,
    pub views: i64,
    pub unique_visitors: i64,
}
