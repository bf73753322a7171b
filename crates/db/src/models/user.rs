//! Site administrators.

use crate::entity::{Entity, Fillable, Timestamps};

columns! {
    /// Columns of the `users` table.
    pub enum UserColumn {
        Id => ("id", "bigint"),
        Username => ("username", "text"),
        Email => ("email", "text"),
        PasswordHash => ("password_hash", "text"),
        FirstName => ("first_name", "text"),
        LastName => ("last_name", "text"),
        Role => ("role", "text"),
        CreatedAt => ("created_at", "timestamptz"),
        UpdatedAt => ("updated_at", "timestamptz"),
    }
}

/// The `users` table.
///
/// `password_hash` is writable (only `create_with_password` sets it, from a
/// hash computed server-side) but never returned by reads.
pub struct User;

impl Entity for User {
    type Column = UserColumn;
    const NAME: &'static str = "User";
    const TABLE: &'static str = "users";
    const PRIMARY_KEY: UserColumn = UserColumn::Id;
    const FILLABLE: Fillable<UserColumn> = Fillable::Only(&[
        UserColumn::Username,
        UserColumn::Email,
        UserColumn::PasswordHash,
        UserColumn::FirstName,
        UserColumn::LastName,
        UserColumn::Role,
    ]);
    const HIDDEN: &'static [UserColumn] = &[UserColumn::PasswordHash];
    const TIMESTAMPS: Option<Timestamps<UserColumn>> = Some(Timestamps {
        created_at: UserColumn::CreatedAt,
        updated_at: UserColumn::UpdatedAt,
    });
}

/// Key holding the plaintext password in `create_with_password` input.
pub const PASSWORD_FIELD: &str = "password";
