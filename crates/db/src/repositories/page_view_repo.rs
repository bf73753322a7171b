//! Queries specific to the `page_views` table.

use chrono::Utc;

use folio_core::types::DbId;

use crate::error::{DbError, ModelError};
use crate::executor::Statement;
use crate::models::page_view::{
    DateRange, NewPageView, PageView, PageViewFilter, PageViewStat, TopProject, PROJECT_DETAIL,
};
use crate::repository::Repository;
use crate::value::SqlValue;

pub type PageViewRepo = Repository<PageView>;

/// Number of projects returned by `get_top_projects` when the caller does
/// not say.
pub const DEFAULT_TOP_PROJECTS: i64 = 10;

impl Repository<PageView> {
    /// Record a page view, stamped with the current time.
    pub async fn track(&self, view: &NewPageView) -> Result<DbId, ModelError> {
        let statement = Statement::insert(
            "INSERT INTO page_views (page_type, page_identifier, ip_address, user_agent, referer, created_at) \
             VALUES ($1::text, $2::text, $3::text, $4::text, $5::text, $6::timestamptz) \
             RETURNING id",
        )
        .bind(view.page_type.as_str())
        .bind(non_empty(&view.page_identifier))
        .bind(non_empty(&view.ip_address))
        .bind(non_empty(&view.user_agent))
        .bind(non_empty(&view.referer))
        .bind(Utc::now());

        let result = self.executor().write(&statement).await?;
        let id = result
            .insert_id
            .ok_or_else(|| DbError::new("Page view insert returned no id", Some("NO_INSERT_ID")))?;
        Ok(id)
    }

    /// Views and unique visitors per page type and day, newest day first.
    pub async fn get_stats(&self, filter: &PageViewFilter) -> Result<Vec<PageViewStat>, ModelError> {
        let mut params = Vec::new();
        let mut predicates = range_predicates(&filter.range, &mut params);
        if let Some(page_type) = &filter.page_type {
            params.push(SqlValue::from(page_type.as_str()));
            predicates.push(format!("page_type = ${}::text", params.len()));
        }

        let mut sql = String::from(
            "SELECT page_type, COUNT(*) AS views, COUNT(DISTINCT ip_address) AS unique_visitors, \
             DATE(created_at) AS day FROM page_views",
        );
        if !predicates.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&predicates.join(" AND "));
        }
        sql.push_str(" GROUP BY page_type, DATE(created_at) ORDER BY day DESC, page_type ASC");

        Ok(self
            .executor()
            .fetch_as(&Statement::query(sql).with_params(params))
            .await?)
    }

    /// Most viewed project pages.
    pub async fn get_top_projects(
        &self,
        limit: Option<i64>,
        range: &DateRange,
    ) -> Result<Vec<TopProject>, ModelError> {
        let mut params = vec![SqlValue::from(PROJECT_DETAIL)];
        let mut predicates = vec![
            "page_type = $1::text".to_string(),
            "page_identifier IS NOT NULL".to_string(),
        ];
        predicates.extend(range_predicates(range, &mut params));
        params.push(SqlValue::Int(limit.unwrap_or(DEFAULT_TOP_PROJECTS)));

        let sql = format!(
            "SELECT page_identifier AS project_slug, COUNT(*) AS views, \
             COUNT(DISTINCT ip_address) AS unique_visitors \
             FROM page_views WHERE {} \
             GROUP BY page_identifier ORDER BY views DESC, project_slug ASC LIMIT ${}",
            predicates.join(" AND "),
            params.len()
        );

        Ok(self
            .executor()
            .fetch_as(&Statement::query(sql).with_params(params))
            .await?)
    }
}

/// `created_at` bounds for an optional range, both inclusive.
fn range_predicates(range: &DateRange, params: &mut Vec<SqlValue>) -> Vec<String> {
    let mut predicates = Vec::new();
    if let Some(from) = range.date_from {
        params.push(SqlValue::Timestamp(from));
        predicates.push(format!("created_at >= ${}::timestamptz", params.len()));
    }
    if let Some(to) = range.date_to {
        params.push(SqlValue::Timestamp(to));
        predicates.push(format!("created_at <= ${}::timestamptz", params.len()));
    }
    predicates
}

fn non_empty(value: &Option<String>) -> SqlValue {
    match value.as_deref() {
        Some(v) if !v.is_empty() => SqlValue::from(v),
        _ => SqlValue::Null,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn range_predicates_number_after_existing_params() {
        let range = DateRange {
            date_from: Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()),
            date_to: Some(Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap()),
        };
        let mut params = vec![SqlValue::from("project_detail")];
        let predicates = range_predicates(&range, &mut params);
        assert_eq!(
            predicates,
            vec![
                "created_at >= $2::timestamptz".to_string(),
                "created_at <= $3::timestamptz".to_string(),
            ]
        );
        assert_eq!(params.len(), 3);
    }

    #[test]
    fn empty_range_adds_nothing() {
        let mut params = Vec::new();
        assert!(range_predicates(&DateRange::default(), &mut params).is_empty());
        assert!(params.is_empty());
    }

    #[test]
    fn blank_optional_fields_become_null() {
        assert_eq!(non_empty(&Some(String::new())), SqlValue::Null);
        assert_eq!(non_empty(&None), SqlValue::Null);
        assert_eq!(non_empty(&Some("home".into())), SqlValue::from("home"));
    }
}
