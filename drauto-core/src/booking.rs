use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// A booking document: a store-assigned identifier plus whatever fields
/// the client submitted (`email`, `status`, the booked service, a date).
///
/// The schema is open on purpose; the API round-trips unknown fields
/// untouched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookingRecord {
    pub id: Uuid,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl BookingRecord {
    pub fn email(&self) -> Option<&str> {
        self.fields.get("email").and_then(Value::as_str)
    }

    pub fn status(&self) -> Option<&str> {
        self.fields.get("status").and_then(Value::as_str)
    }
}

/// Which bookings a caller is allowed to read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingScope {
    /// Every booking in the store.
    All,
    /// Bookings whose `email` field equals the caller's own address.
    Owner(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ScopeError {
    #[error("requested email does not match the authenticated identity")]
    EmailMismatch,
}

impl BookingScope {
    /// Applies the ownership rule for the listing endpoint: no filter reads
    /// everything, a filter equal to the caller's own email narrows to that
    /// owner, and any other filter is rejected. An identity without an
    /// email can never pass a filtered request.
    pub fn resolve(
        identity_email: Option<&str>,
        requested_email: Option<&str>,
    ) -> Result<Self, ScopeError> {
        match requested_email {
            None => Ok(BookingScope::All),
            Some(requested) if identity_email == Some(requested) => {
                Ok(BookingScope::Owner(requested.to_string()))
            }
            Some(_) => Err(ScopeError::EmailMismatch),
        }
    }
}

// ============ Store acknowledgements ============
//
// Serialized with the wire casing clients already depend on
// (`insertedId`, `matchedCount`, ...).

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InsertAck {
    pub inserted_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAck {
    pub matched_count: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upserted_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DeleteAck {
    pub deleted_count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_no_filter_resolves_to_all() {
        let scope = BookingScope::resolve(Some("a@example.com"), None).unwrap();
        assert_eq!(scope, BookingScope::All);

        let scope = BookingScope::resolve(None, None).unwrap();
        assert_eq!(scope, BookingScope::All);
    }

    #[test]
    fn test_matching_filter_resolves_to_owner() {
        let scope = BookingScope::resolve(Some("a@example.com"), Some("a@example.com")).unwrap();
        assert_eq!(scope, BookingScope::Owner("a@example.com".to_string()));
    }

    #[test]
    fn test_mismatched_filter_is_rejected() {
        let result = BookingScope::resolve(Some("a@example.com"), Some("b@example.com"));
        assert!(result.is_err());
    }

    #[test]
    fn test_identity_without_email_cannot_filter() {
        let result = BookingScope::resolve(None, Some("a@example.com"));
        assert!(result.is_err());
    }

    #[test]
    fn test_record_serializes_fields_at_top_level() {
        let mut fields = Map::new();
        fields.insert("email".to_string(), json!("a@example.com"));
        fields.insert("status".to_string(), json!("pending"));

        let record = BookingRecord {
            id: Uuid::nil(),
            fields,
        };

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["email"], "a@example.com");
        assert_eq!(value["status"], "pending");
        assert_eq!(value["id"], Uuid::nil().to_string());
        assert_eq!(record.email(), Some("a@example.com"));
        assert_eq!(record.status(), Some("pending"));
    }

    #[test]
    fn test_update_ack_omits_absent_upserted_id() {
        let ack = UpdateAck {
            matched_count: 1,
            upserted_id: None,
        };

        let value = serde_json::to_value(&ack).unwrap();
        assert_eq!(value["matchedCount"], 1);
        assert!(value.get("upsertedId").is_none());
    }

    #[test]
    fn test_acks_use_wire_casing() {
        let insert = serde_json::to_value(InsertAck {
            inserted_id: Uuid::nil(),
        })
        .unwrap();
        assert!(insert.get("insertedId").is_some());

        let delete = serde_json::to_value(DeleteAck { deleted_count: 0 }).unwrap();
        assert_eq!(delete["deletedCount"], 0);
    }
}
