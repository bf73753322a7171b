//! Handler for the public contact form.

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde::Deserialize;
use serde_json::Value;
use validator::Validate;

use folio_db::entity::Column;
use folio_db::models::contact::ContactColumn;
use folio_db::Record;

use super::{client_ip, user_agent};
use crate::error::AppResult;
use crate::response::Envelope;
use crate::state::AppState;

/// Request body for `POST /api/contacts`.
#[derive(Debug, Deserialize, Validate)]
pub struct ContactForm {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(max = 200))]
    pub subject: Option<String>,
    #[validate(length(min = 1, max = 5000))]
    pub message: String,
}

impl ContactForm {
    /// Build the record to insert. Status is left to the column default.
    fn into_record(self, ip_address: Option<String>, user_agent: Option<String>) -> Record {
        let mut record = Record::new();
        let mut set = |column: ContactColumn, value: Option<String>| {
            if let Some(value) = value {
                record.insert(column.name().to_string(), Value::String(value));
            }
        };
        set(ContactColumn::Name, Some(self.name.trim().to_string()));
        set(ContactColumn::Email, Some(self.email.trim().to_string()));
        set(ContactColumn::Subject, self.subject.filter(|s| !s.trim().is_empty()));
        set(ContactColumn::Message, Some(self.message));
        set(ContactColumn::IpAddress, ip_address);
        set(ContactColumn::UserAgent, user_agent);
        record
    }
}

/// POST /api/contacts
pub async fn create(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(input): Json<ContactForm>,
) -> AppResult<(StatusCode, Json<Envelope<Record>>)> {
    input.validate()?;

    let record = input.into_record(client_ip(&headers), user_agent(&headers));
    let created = state.repos.contacts.create(&record).await?;
    tracing::info!(contact_id = created.insert_id, "Contact message received");

    Ok((
        StatusCode::CREATED,
        Json(Envelope::created(created.insert_id, created.data)),
    ))
}
