//! Queries specific to the `technologies` table and its project links.

use indexmap::IndexMap;

use folio_core::types::DbId;

use crate::error::ModelError;
use crate::executor::{Statement, WriteResult};
use crate::models::technology::{
    Proficiency, Technology, TechnologyGroup, UsageType, OTHER_CATEGORY,
};
use crate::repository::Repository;
use crate::value::Record;

pub type TechnologyRepo = Repository<Technology>;

impl Repository<Technology> {
    /// Active technologies linked to a project, with the link's usage type
    /// and displayed proficiency.
    pub async fn find_by_project(&self, project_id: DbId) -> Result<Vec<Record>, ModelError> {
        let statement = Statement::query(
            "SELECT t.*, pt.usage_type, pt.proficiency_shown \
             FROM technologies t \
             INNER JOIN project_technologies pt ON t.id = pt.technology_id \
             WHERE pt.project_id = $1::bigint AND t.is_active = true \
             ORDER BY pt.usage_type ASC, t.name ASC",
        )
        .bind(project_id);
        Ok(self.executor().fetch_all(&statement).await?)
    }

    /// Active technologies grouped by category.
    pub async fn find_active_grouped(&self) -> Result<Vec<TechnologyGroup>, ModelError> {
        let statement = Statement::query(
            "SELECT * FROM technologies WHERE is_active = true ORDER BY category ASC, name ASC",
        );
        let technologies = self.executor().fetch_all(&statement).await?;
        Ok(group_by_category(technologies))
    }

    /// Link a technology to a project, or update the existing link.
    pub async fn link_to_project(
        &self,
        project_id: DbId,
        technology_id: DbId,
        usage: UsageType,
        proficiency: Proficiency,
    ) -> Result<WriteResult, ModelError> {
        let statement = Statement::command(
            "INSERT INTO project_technologies (project_id, technology_id, usage_type, proficiency_shown) \
             VALUES ($1::bigint, $2::bigint, $3::text, $4::text) \
             ON CONFLICT (project_id, technology_id) DO UPDATE SET \
                 usage_type = EXCLUDED.usage_type, \
                 proficiency_shown = EXCLUDED.proficiency_shown",
        )
        .bind(project_id)
        .bind(technology_id)
        .bind(usage.as_str())
        .bind(proficiency.as_str());
        Ok(self.executor().write(&statement).await?)
    }

    /// Remove a project link. Returns the number of links removed.
    pub async fn unlink_from_project(
        &self,
        project_id: DbId,
        technology_id: DbId,
    ) -> Result<u64, ModelError> {
        let statement = Statement::command(
            "DELETE FROM project_technologies \
             WHERE project_id = $1::bigint AND technology_id = $2::bigint",
        )
        .bind(project_id)
        .bind(technology_id);
        Ok(self.executor().write(&statement).await?.affected_rows)
    }
}

/// Group technology rows by `category`, keeping first-seen order. Rows
/// without a category land in "other".
pub fn group_by_category(technologies: Vec<Record>) -> Vec<TechnologyGroup> {
    let mut groups: IndexMap<String, TechnologyGroup> = IndexMap::new();
    for technology in technologies {
        let name = technology
            .get("category")
            .and_then(|v| v.as_str())
            .filter(|s| !s.is_empty())
            .unwrap_or(OTHER_CATEGORY)
            .to_string();
        groups
            .entry(name.clone())
            .or_insert_with(|| TechnologyGroup {
                name,
                technologies: Vec::new(),
            })
            .technologies
            .push(technology);
    }
    groups.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: serde_json::Value) -> Record {
        match value {
            serde_json::Value::Object(map) => map,
            _ => panic!("expected a JSON object"),
        }
    }

    #[test]
    fn groups_by_category_with_other_fallback() {
        let rows = vec![
            record(json!({"name": "Rust", "category": "language"})),
            record(json!({"name": "Make", "category": null})),
            record(json!({"name": "Go", "category": "language"})),
        ];
        let groups = group_by_category(rows);

        let names: Vec<&str> = groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["language", "other"]);
        assert_eq!(groups[0].technologies.len(), 2);
        assert_eq!(groups[1].technologies[0]["name"], "Make");
    }

    #[test]
    fn link_defaults() {
        assert_eq!(UsageType::default().as_str(), "secondary");
        assert_eq!(Proficiency::default().as_str(), "intermediate");
    }
}
