//! Success envelope for API handlers.
//!
//! Every successful response is `{ "success": true, ... }` with `data` and,
//! depending on the operation, `count`, `insertId` or `affectedRows`.
//! Failures are rendered by [`crate::error::AppError`].

use serde::Serialize;

use folio_core::types::DbId;

#[derive(Debug, Serialize)]
pub struct Envelope<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(rename = "insertId", skip_serializing_if = "Option::is_none")]
    pub insert_id: Option<DbId>,
    #[serde(rename = "affectedRows", skip_serializing_if = "Option::is_none")]
    pub affected_rows: Option<u64>,
}

impl<T: Serialize> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            count: None,
            insert_id: None,
            affected_rows: None,
        }
    }

    pub fn created(insert_id: DbId, data: Option<T>) -> Self {
        Self {
            insert_id: Some(insert_id),
            data,
            ..Self::empty()
        }
    }

    fn empty() -> Self {
        Self {
            success: true,
            data: None,
            count: None,
            insert_id: None,
            affected_rows: None,
        }
    }
}

impl<T: Serialize> Envelope<Vec<T>> {
    /// A list together with its length.
    pub fn list(items: Vec<T>) -> Self {
        Self {
            count: Some(items.len()),
            ..Self::ok(items)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn list_reports_count() {
        let body = serde_json::to_value(Envelope::list(vec![1, 2, 3])).unwrap();
        assert_eq!(body, json!({ "success": true, "data": [1, 2, 3], "count": 3 }));
    }

    #[test]
    fn created_uses_wire_names() {
        let body = serde_json::to_value(Envelope::<()>::created(7, None)).unwrap();
        assert_eq!(body, json!({ "success": true, "insertId": 7 }));
    }
}
