//! Queries specific to the `contacts` table.

use chrono::Utc;

use folio_core::types::DbId;

use crate::error::ModelError;
use crate::executor::Statement;
use crate::models::contact::{Contact, ContactColumn, ContactStats, ContactStatus};
use crate::repository::{Repository, Updated};
use crate::sql::{FindOptions, OrderBy};
use crate::value::{Record, SqlValue};

pub type ContactRepo = Repository<Contact>;

const STATS: &str = "\
    SELECT \
        COUNT(*) AS total, \
        COUNT(*) FILTER (WHERE status = 'unread') AS unread, \
        COUNT(*) FILTER (WHERE status = 'read') AS read, \
        COUNT(*) FILTER (WHERE status = 'replied') AS replied, \
        COUNT(*) FILTER (WHERE status = 'archived') AS archived, \
        COUNT(*) FILTER (WHERE created_at >= NOW() - INTERVAL '7 days') AS last_week, \
        COUNT(*) FILTER (WHERE created_at >= NOW() - INTERVAL '30 days') AS last_month \
    FROM contacts";

impl Repository<Contact> {
    /// Messages with `status`, newest first unless the caller orders them.
    pub async fn find_by_status(
        &self,
        status: ContactStatus,
        mut options: FindOptions<ContactColumn>,
    ) -> Result<Vec<Record>, ModelError> {
        options
            .conditions
            .insert(0, (ContactColumn::Status, SqlValue::from(status.as_str())));
        if options.order_by.is_empty() {
            options.order_by.push(OrderBy::desc(ContactColumn::CreatedAt));
        }
        self.find_all(&options).await
    }

    pub async fn mark_as_read(&self, id: DbId) -> Result<Updated, ModelError> {
        self.set_status(id, ContactStatus::Read).await
    }

    /// Store a reply and mark the message replied.
    pub async fn mark_as_replied(
        &self,
        id: DbId,
        reply_message: &str,
    ) -> Result<Updated, ModelError> {
        let changes = vec![
            (ContactColumn::Status, SqlValue::from(ContactStatus::Replied.as_str())),
            (ContactColumn::ReplyMessage, SqlValue::from(reply_message)),
            (ContactColumn::RepliedAt, SqlValue::Timestamp(Utc::now())),
        ];
        self.apply_changes(id, changes).await
    }

    pub async fn archive(&self, id: DbId) -> Result<Updated, ModelError> {
        self.set_status(id, ContactStatus::Archived).await
    }

    /// Totals per status plus the last 7 and 30 days.
    pub async fn get_stats(&self) -> Result<ContactStats, ModelError> {
        self.executor()
            .fetch_as::<ContactStats>(&Statement::query(STATS))
            .await?
            .into_iter()
            .next()
            .ok_or(ModelError::StatsUnavailable)
    }

    async fn set_status(&self, id: DbId, status: ContactStatus) -> Result<Updated, ModelError> {
        self.apply_changes(id, vec![(ContactColumn::Status, SqlValue::from(status.as_str()))])
            .await
    }
}
