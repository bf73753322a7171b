//! Queries specific to the `skills` table.

use indexmap::IndexMap;

use crate::error::ModelError;
use crate::executor::Statement;
use crate::models::skill::{Skill, SkillColumn, SkillGroup, UNCATEGORIZED};
use crate::repository::Repository;
use crate::sql::{order_clause, OrderBy};
use crate::value::Record;

pub type SkillRepo = Repository<Skill>;

const WITH_CATEGORY: &str = "\
    SELECT s.*, c.name AS category_name, c.slug AS category_slug, c.color AS category_color \
    FROM skills s \
    LEFT JOIN categories c ON s.category_id = c.id";

impl Repository<Skill> {
    /// All skills with their category's name, slug and color.
    ///
    /// An empty `order_by` sorts by `sort_order`, then `name`.
    pub async fn find_with_category(
        &self,
        order_by: &[OrderBy<SkillColumn>],
    ) -> Result<Vec<Record>, ModelError> {
        let default_order = [
            OrderBy::asc(SkillColumn::SortOrder),
            OrderBy::asc(SkillColumn::Name),
        ];
        let order = if order_by.is_empty() {
            &default_order[..]
        } else {
            order_by
        };
        let sql = format!("{WITH_CATEGORY} ORDER BY {}", order_clause(order, Some("s")));
        Ok(self.executor().fetch_all(&Statement::query(sql)).await?)
    }

    /// Featured skills grouped by category name.
    pub async fn find_featured_grouped(&self) -> Result<Vec<SkillGroup>, ModelError> {
        let sql = format!(
            "{WITH_CATEGORY} WHERE s.is_featured = true ORDER BY c.name ASC, s.sort_order ASC"
        );
        let skills = self.executor().fetch_all(&Statement::query(sql)).await?;
        Ok(group_by_category(skills))
    }
}

/// Group joined skill rows by `category_name`, keeping first-seen order.
///
/// Rows without a category land in the "Uncategorized" group. A group takes
/// its slug and color from its first row.
pub fn group_by_category(skills: Vec<Record>) -> Vec<SkillGroup> {
    let mut groups: IndexMap<String, SkillGroup> = IndexMap::new();
    for skill in skills {
        let name = text(&skill, "category_name").unwrap_or_else(|| UNCATEGORIZED.to_string());
        groups
            .entry(name.clone())
            .or_insert_with(|| SkillGroup {
                name,
                slug: text(&skill, "category_slug"),
                color: text(&skill, "category_color"),
                skills: Vec::new(),
            })
            .skills
            .push(skill);
    }
    groups.into_values().collect()
}

fn text(record: &Record, key: &str) -> Option<String> {
    record
        .get(key)
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
