//! Decoding of JSON stored in (or aggregated into) text columns.
//!
//! Reads are fail-soft: a missing, `NULL` or malformed value decodes to an
//! empty list and a warning is logged. A value that is already a JSON array
//! (e.g. from a `json` column) is decoded directly.

use serde::de::DeserializeOwned;
use serde_json::Value;

/// Decode a list from a record value.
pub fn decode_list<T: DeserializeOwned>(column: &str, raw: Option<&Value>) -> Vec<T> {
    let parsed = match raw {
        None | Some(Value::Null) => return Vec::new(),
        Some(Value::String(text)) if text.trim().is_empty() => return Vec::new(),
        Some(Value::String(text)) => serde_json::from_str::<Vec<T>>(text),
        Some(other) => serde_json::from_value::<Vec<T>>(other.clone()),
    };

    match parsed {
        Ok(items) => items,
        Err(e) => {
            tracing::warn!(column, error = %e, "Malformed JSON list, using empty list");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_json_text() {
        let raw = json!(r#"["a.png","b.png"]"#);
        let images: Vec<String> = decode_list("gallery_images", Some(&raw));
        assert_eq!(images, vec!["a.png", "b.png"]);
    }

    #[test]
    fn decodes_native_arrays() {
        let raw = json!(["a.png"]);
        let images: Vec<String> = decode_list("gallery_images", Some(&raw));
        assert_eq!(images, vec!["a.png"]);
    }

    #[test]
    fn missing_and_null_are_empty() {
        let none: Vec<String> = decode_list("gallery_images", None);
        let null: Vec<String> = decode_list("gallery_images", Some(&Value::Null));
        let blank: Vec<String> = decode_list("gallery_images", Some(&json!("  ")));
        assert!(none.is_empty());
        assert!(null.is_empty());
        assert!(blank.is_empty());
    }

    #[test]
    fn malformed_text_degrades_to_empty() {
        let raw = json!("[not json");
        let images: Vec<String> = decode_list("gallery_images", Some(&raw));
        assert!(images.is_empty());
    }

    #[test]
    fn wrong_shape_degrades_to_empty() {
        let raw = json!(r#"{"cover":"a.png"}"#);
        let images: Vec<String> = decode_list("gallery_images", Some(&raw));
        assert!(images.is_empty());
    }
}
