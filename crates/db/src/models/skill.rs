//! Skills, optionally grouped by category.

use serde::Serialize;

use crate::entity::{Entity, Fillable, Timestamps};
use crate::value::Record;

columns! {
    /// Columns of the `skills` table.
    pub enum SkillColumn {
        Id => ("id", "bigint"),
        Name => ("name", "text"),
        CategoryId => ("category_id", "bigint"),
        ProficiencyLevel => ("proficiency_level", "integer"),
        YearsExperience => ("years_experience", "integer"),
        Description => ("description", "text"),
        IconClass => ("icon_class", "text"),
        IsFeatured => ("is_featured", "boolean"),
        SortOrder => ("sort_order", "integer"),
        CreatedAt => ("created_at", "timestamptz"),
        UpdatedAt => ("updated_at", "timestamptz"),
    }
}

/// The `skills` table.
pub struct Skill;

impl Entity for Skill {
    type Column = SkillColumn;
    const NAME: &'static str = "Skill";
    const TABLE: &'static str = "skills";
    const PRIMARY_KEY: SkillColumn = SkillColumn::Id;
    const FILLABLE: Fillable<SkillColumn> = Fillable::Only(&[
        SkillColumn::Name,
        SkillColumn::CategoryId,
        SkillColumn::ProficiencyLevel,
        SkillColumn::YearsExperience,
        SkillColumn::Description,
        SkillColumn::IconClass,
        SkillColumn::IsFeatured,
        SkillColumn::SortOrder,
    ]);
    const TIMESTAMPS: Option<Timestamps<SkillColumn>> = Some(Timestamps {
        created_at: SkillColumn::CreatedAt,
        updated_at: SkillColumn::UpdatedAt,
    });
}

/// Category label used for skills without a category.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Featured skills sharing one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillGroup {
    pub name: String,
    pub slug: Option<String>,
    pub color: Option<String>,
    pub skills: Vec<Record>,
}
