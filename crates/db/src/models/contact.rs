//! Contact form messages.

use serde::{Deserialize, Serialize};

use crate::entity::{Entity, Fillable, Timestamps};

columns! {
    /// Columns of the `contacts` table.
    pub enum ContactColumn {
        Id => ("id", "bigint"),
        Name => ("name", "text"),
        Email => ("email", "text"),
        Subject => ("subject", "text"),
        Message => ("message", "text"),
        Status => ("status", "text"),
        IpAddress => ("ip_address", "text"),
        UserAgent => ("user_agent", "text"),
        ReplyMessage => ("reply_message", "text"),
        RepliedAt => ("replied_at", "timestamptz"),
        CreatedAt => ("created_at", "timestamptz"),
        UpdatedAt => ("updated_at", "timestamptz"),
    }
}

/// The `contacts` table.
pub struct Contact;

impl Entity for Contact {
    type Column = ContactColumn;
    const NAME: &'static str = "Contact";
    const TABLE: &'static str = "contacts";
    const PRIMARY_KEY: ContactColumn = ContactColumn::Id;
    const FILLABLE: Fillable<ContactColumn> = Fillable::Only(&[
        ContactColumn::Name,
        ContactColumn::Email,
        ContactColumn::Subject,
        ContactColumn::Message,
        ContactColumn::Status,
        ContactColumn::IpAddress,
        ContactColumn::UserAgent,
        ContactColumn::ReplyMessage,
        ContactColumn::RepliedAt,
    ]);
    const TIMESTAMPS: Option<Timestamps<ContactColumn>> = Some(Timestamps {
        created_at: ContactColumn::CreatedAt,
        updated_at: ContactColumn::UpdatedAt,
    });
}

/// Lifecycle of a contact message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactStatus {
    Unread,
    Read,
    Replied,
    Archived,
}

impl ContactStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ContactStatus::Unread => "unread",
            ContactStatus::Read => "read",
            ContactStatus::Replied => "replied",
            ContactStatus::Archived => "archived",
        }
    }
}

/// Aggregate counts over all contact messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactStats {
    pub total: i64,
    pub unread: i64,
    pub read: i64,
    pub replied: i64,
    pub archived: i64,
    /// Messages received in the last 7 days.
    pub last_week: i64,
    /// Messages received in the last 30 days.
    pub last_month: i64,
}
