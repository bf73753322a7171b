//! Technologies and their links to projects.

use serde::{Deserialize, Serialize};

use crate::entity::{Entity, Fillable, Timestamps};
use crate::value::Record;

columns! {
    /// Columns of the `technologies` table.
    pub enum TechnologyColumn {
        Id => ("id", "bigint"),
        Name => ("name", "text"),
        Slug => ("slug", "text"),
        Category => ("category", "text"),
        Color => ("color", "text"),
        IconClass => ("icon_class", "text"),
        Description => ("description", "text"),
        OfficialWebsite => ("official_website", "text"),
        DocumentationUrl => ("documentation_url", "text"),
        IsActive => ("is_active", "boolean"),
        CreatedAt => ("created_at", "timestamptz"),
        UpdatedAt => ("updated_at", "timestamptz"),
    }
}

/// The `technologies` table.
pub struct Technology;

impl Entity for Technology {
    type Column = TechnologyColumn;
    const NAME: &'static str = "Technology";
    const TABLE: &'static str = "technologies";
    const PRIMARY_KEY: TechnologyColumn = TechnologyColumn::Id;
    const FILLABLE: Fillable<TechnologyColumn> = Fillable::Only(&[
        TechnologyColumn::Name,
        TechnologyColumn::Slug,
        TechnologyColumn::Category,
        TechnologyColumn::Color,
        TechnologyColumn::IconClass,
        TechnologyColumn::Description,
        TechnologyColumn::OfficialWebsite,
        TechnologyColumn::DocumentationUrl,
        TechnologyColumn::IsActive,
    ]);
    const TIMESTAMPS: Option<Timestamps<TechnologyColumn>> = Some(Timestamps {
        created_at: TechnologyColumn::CreatedAt,
        updated_at: TechnologyColumn::UpdatedAt,
    });
}

/// Category label used for technologies without a category.
pub const OTHER_CATEGORY: &str = "other";

/// How a project uses a technology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UsageType {
    Primary,
    #[default]
    Secondary,
    Tool,
}

impl UsageType {
    pub fn as_str(self) -> &'static str {
        match self {
            UsageType::Primary => "primary",
            UsageType::Secondary => "secondary",
            UsageType::Tool => "tool",
        }
    }
}

/// Proficiency level displayed next to a technology on a project page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Proficiency {
    Beginner,
    #[default]
    Intermediate,
    Advanced,
    Expert,
}

impl Proficiency {
    pub fn as_str(self) -> &'static str {
        match self {
            Proficiency::Beginner => "beginner",
            Proficiency::Intermediate => "intermediate",
            Proficiency::Advanced => "advanced",
            Proficiency::Expert => "expert",
        }
    }
}

/// Active technologies sharing one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TechnologyGroup {
    pub name: String,
    pub technologies: Vec<Record>,
}
