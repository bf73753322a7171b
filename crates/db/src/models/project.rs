//! Portfolio projects.

use serde::{Deserialize, Serialize};

use folio_core::types::DbId;

use crate::entity::{Entity, Fillable, Timestamps};
use crate::value::Record;

columns! {
    /// Columns of the `projects` table.
    pub enum ProjectColumn {
        Id => ("id", "bigint"),
        Title => ("title", "text"),
        Slug => ("slug", "text"),
        ShortDescription => ("short_description", "text"),
        FullDescription => ("full_description", "text"),
        FeaturedImage => ("featured_image", "text"),
        GalleryImages => ("gallery_images", "text"),
        DemoUrl => ("demo_url", "text"),
        GithubUrl => ("github_url", "text"),
        Status => ("status", "text"),
        IsFeatured => ("is_featured", "boolean"),
        IsPublished => ("is_published", "boolean"),
        StartDate => ("start_date", "date"),
        EndDate => ("end_date", "date"),
        SortOrder => ("sort_order", "integer"),
        MetaTitle => ("meta_title", "text"),
        MetaDescription => ("meta_description", "text"),
        CreatedAt => ("created_at", "timestamptz"),
        UpdatedAt => ("updated_at", "timestamptz"),
    }
}

/// The `projects` table.
pub struct Project;

impl Entity for Project {
    type Column = ProjectColumn;
    const NAME: &'static str = "Project";
    const TABLE: &'static str = "projects";
    const PRIMARY_KEY: ProjectColumn = ProjectColumn::Id;
    const FILLABLE: Fillable<ProjectColumn> = Fillable::Only(&[
        ProjectColumn::Title,
        ProjectColumn::Slug,
        ProjectColumn::ShortDescription,
        ProjectColumn::FullDescription,
        ProjectColumn::FeaturedImage,
        ProjectColumn::GalleryImages,
        ProjectColumn::DemoUrl,
        ProjectColumn::GithubUrl,
        ProjectColumn::Status,
        ProjectColumn::IsFeatured,
        ProjectColumn::IsPublished,
        ProjectColumn::StartDate,
        ProjectColumn::EndDate,
        ProjectColumn::SortOrder,
        ProjectColumn::MetaTitle,
        ProjectColumn::MetaDescription,
    ]);
    const TIMESTAMPS: Option<Timestamps<ProjectColumn>> = Some(Timestamps {
        created_at: ProjectColumn::CreatedAt,
        updated_at: ProjectColumn::UpdatedAt,
    });
}

/// A technology as linked to one project (decoded from the aggregated join).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechnologyUsage {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub category: Option<String>,
    pub color: Option<String>,
    pub icon_class: Option<String>,
    pub usage_type: String,
    pub proficiency_shown: String,
}

/// A published project together with its technologies and gallery.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectWithTechnologies {
    #[serde(flatten)]
    pub project: Record,
    pub technologies: Vec<TechnologyUsage>,
    pub gallery_images: Vec<String>,
}
