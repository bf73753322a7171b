//! Queries specific to the `projects` table.

use crate::error::ModelError;
use crate::executor::Statement;
use crate::json_column::decode_list;
use crate::models::project::{Project, ProjectColumn, ProjectWithTechnologies};
use crate::repository::Repository;
use crate::sql::{FindOptions, OrderBy};
use crate::value::{Record, SqlValue};

pub type ProjectRepo = Repository<Project>;

/// Number of featured projects returned when the caller does not say.
pub const DEFAULT_FEATURED_LIMIT: i64 = 3;

/// Linked technologies are aggregated into JSON text so the row shape stays
/// flat; `'[]'` when the project has none.
const WITH_TECHNOLOGIES: &str = "\
    SELECT p.*, \
        COALESCE( \
            (json_agg(json_build_object( \
                'id', t.id, \
                'name', t.name, \
                'slug', t.slug, \
                'category', t.category, \
                'color', t.color, \
                'icon_class', t.icon_class, \
                'usage_type', pt.usage_type, \
                'proficiency_shown', pt.proficiency_shown \
            ) ORDER BY t.name) FILTER (WHERE t.id IS NOT NULL))::text, \
            '[]' \
        ) AS technologies \
    FROM projects p \
    LEFT JOIN project_technologies pt ON p.id = pt.project_id \
    LEFT JOIN technologies t ON pt.technology_id = t.id \
    WHERE p.slug = $1::text AND p.is_published = true \
    GROUP BY p.id";

impl Repository<Project> {
    /// List published projects.
    ///
    /// `is_published = true` always comes first and replaces any caller
    /// condition on the same column, so drafts can never be listed through
    /// this method, even with `is_published = false` in `options`. Without a
    /// caller order, projects are sorted by `sort_order` and then newest
    /// first.
    pub async fn find_published(
        &self,
        options: FindOptions<ProjectColumn>,
    ) -> Result<Vec<Record>, ModelError> {
        self.find_all(&published(options)).await
    }

    /// Featured and published projects, at most `limit` of them.
    pub async fn find_featured(&self, limit: Option<i64>) -> Result<Vec<Record>, ModelError> {
        let options = FindOptions::new()
            .filter(ProjectColumn::IsFeatured, true)
            .filter(ProjectColumn::IsPublished, true)
            .order_by(OrderBy::asc(ProjectColumn::SortOrder))
            .order_by(OrderBy::desc(ProjectColumn::CreatedAt))
            .limit(limit.unwrap_or(DEFAULT_FEATURED_LIMIT));
        self.find_all(&options).await
    }

    /// A published project with its technologies and decoded gallery.
    pub async fn find_by_slug_with_technologies(
        &self,
        slug: &str,
    ) -> Result<ProjectWithTechnologies, ModelError> {
        let statement = Statement::query(WITH_TECHNOLOGIES).bind(slug);
        let record = self
            .executor()
            .fetch_optional(&statement)
            .await?
            .ok_or(ModelError::ProjectNotPublished)?;
        Ok(with_technologies(record))
    }
}

fn published(mut options: FindOptions<ProjectColumn>) -> FindOptions<ProjectColumn> {
    options
        .conditions
        .retain(|(column, _)| *column != ProjectColumn::IsPublished);
    options
        .conditions
        .insert(0, (ProjectColumn::IsPublished, SqlValue::Bool(true)));
    if options.order_by.is_empty() {
        options.order_by = vec![
            OrderBy::asc(ProjectColumn::SortOrder),
            OrderBy::desc(ProjectColumn::CreatedAt),
        ];
    }
    options
}

/// Split the aggregated JSON columns out of a joined row.
fn with_technologies(mut project: Record) -> ProjectWithTechnologies {
    let technologies = decode_list("technologies", project.remove("technologies").as_ref());
    let gallery_images = decode_list("gallery_images", project.remove("gallery_images").as_ref());
    ProjectWithTechnologies {
        project,
        technologies,
        gallery_images,
    }
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
    fn published_filter_comes_first_and_overrides_caller() {
        let options = FindOptions::new()
            .filter(ProjectColumn::Status, "completed")
            .filter(ProjectColumn::IsPublished, false);
        let options = published(options);
        assert_eq!(
            options.conditions,
            vec![
                (ProjectColumn::IsPublished, SqlValue::Bool(true)),
                (ProjectColumn::Status, SqlValue::Text("completed".into())),
            ]
        );
        assert_eq!(
            options.order_by,
            vec![
                OrderBy::asc(ProjectColumn::SortOrder),
                OrderBy::desc(ProjectColumn::CreatedAt),
            ]
        );
    }

    #[test]
    fn published_keeps_caller_order() {
        let options = published(FindOptions::new().order_by(OrderBy::asc(ProjectColumn::Title)));
        assert_eq!(options.order_by, vec![OrderBy::asc(ProjectColumn::Title)]);
    }

    #[test]
    fn joined_row_is_split_into_parts() {
        let row = record(json!({
            "id": 1,
            "slug": "folio",
            "gallery_images": r#"["a.png","b.png"]"#,
            "technologies": r#"[{"id":4,"name":"Rust","slug":"rust","category":"language","color":null,"icon_class":null,"usage_type":"primary","proficiency_shown":"expert"}]"#,
        }));
        let project = with_technologies(row);

        assert_eq!(project.gallery_images, vec!["a.png", "b.png"]);
        assert_eq!(project.technologies.len(), 1);
        assert_eq!(project.technologies[0].name, "Rust");
        assert!(!project.project.contains_key("technologies"));
        assert!(!project.project.contains_key("gallery_images"));
    }

    #[test]
    fn broken_json_degrades_to_empty_lists() {
        let row = record(json!({
            "id": 1,
            "gallery_images": "not json",
            "technologies": null,
        }));
        let project = with_technologies(row);
        assert!(project.gallery_images.is_empty());
        assert!(project.technologies.is_empty());
    }
}
