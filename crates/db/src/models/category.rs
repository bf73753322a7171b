//! Skill categories.

use crate::entity::{Entity, Fillable, Timestamps};

columns! {
    /// Columns of the `categories` table.
    pub enum CategoryColumn {
        Id => ("id", "bigint"),
        Name => ("name", "text"),
        Slug => ("slug", "text"),
        Description => ("description", "text"),
        Color => ("color", "text"),
        SortOrder => ("sort_order", "integer"),
        CreatedAt => ("created_at", "timestamptz"),
        UpdatedAt => ("updated_at", "timestamptz"),
    }
}

/// The `categories` table.
pub struct Category;

impl Entity for Category {
    type Column = CategoryColumn;
    const NAME: &'static str = "Category";
    const TABLE: &'static str = "categories";
    const PRIMARY_KEY: CategoryColumn = CategoryColumn::Id;
    const FILLABLE: Fillable<CategoryColumn> = Fillable::Only(&[
        CategoryColumn::Name,
        CategoryColumn::Slug,
        CategoryColumn::Description,
        CategoryColumn::Color,
        CategoryColumn::SortOrder,
    ]);
    const TIMESTAMPS: Option<Timestamps<CategoryColumn>> = Some(Timestamps {
        created_at: CategoryColumn::CreatedAt,
        updated_at: CategoryColumn::UpdatedAt,
    });
}
