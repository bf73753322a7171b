//! Queries specific to the `users` table.

use chrono::Utc;
use serde_json::Value;

use folio_core::password::{hash_password, verify_password};
use folio_core::types::DbId;

use crate::entity::Column;
use crate::error::ModelError;
use crate::executor::Statement;
use crate::models::user::{User, UserColumn, PASSWORD_FIELD};
use crate::repository::{Created, Repository};
use crate::sql;
use crate::value::Record;

pub type UserRepo = Repository<User>;

impl Repository<User> {
    /// Create a user from data carrying a plaintext `password`.
    ///
    /// The password is hashed and stored as `password_hash`; the plaintext
    /// never reaches the database.
    pub async fn create_with_password(&self, data: &Record) -> Result<Created, ModelError> {
        let password = data
            .get(PASSWORD_FIELD)
            .and_then(Value::as_str)
            .filter(|p| !p.is_empty())
            .ok_or(ModelError::PasswordRequired)?;
        let hash = hash_password(password)?;

        let mut data = data.clone();
        data.remove(PASSWORD_FIELD);
        data.insert(UserColumn::PasswordHash.name().to_string(), Value::String(hash));
        self.create(&data).await
    }

    /// Check credentials and return the user without its hash.
    pub async fn verify_password(&self, email: &str, password: &str) -> Result<Record, ModelError> {
        let mut user = self
            .executor()
            .fetch_optional(&sql::select_by::<User>(UserColumn::Email, email.into()))
            .await?
            .ok_or(ModelError::UserNotFound)?;

        let stored = user
            .remove(UserColumn::PasswordHash.name())
            .and_then(|v| v.as_str().map(str::to_string))
            .ok_or(ModelError::InvalidPassword)?;
        if !verify_password(password, &stored)? {
            return Err(ModelError::InvalidPassword);
        }

        tracing::debug!(user_id = ?user.get("id"), "Password verified");
        Ok(user)
    }

    /// Replace a user's password. Returns the number of rows updated.
    pub async fn update_password(&self, id: DbId, new_password: &str) -> Result<u64, ModelError> {
        if new_password.is_empty() {
            return Err(ModelError::PasswordRequired);
        }
        let hash = hash_password(new_password)?;
        let statement = Statement::command(
            "UPDATE users SET password_hash = $1::text, updated_at = $2::timestamptz \
             WHERE id = $3::bigint",
        )
        .bind(hash)
        .bind(Utc::now())
        .bind(id);
        Ok(self.executor().write(&statement).await?.affected_rows)
    }
}
