use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use serde_json::{Map, Value};
use uuid::Uuid;

use drauto_core::booking::{BookingRecord, BookingScope, DeleteAck, InsertAck, UpdateAck};
use drauto_core::catalog::{ServiceQuery, ServiceRecord, SortOrder};
use drauto_core::repository::{BookingRepository, ServiceRepository};

/// In-memory services collection. Backs the API tests and store-less
/// local runs.
#[derive(Default)]
pub struct InMemoryServiceRepository {
    services: RwLock<Vec<ServiceRecord>>,
}

impl InMemoryServiceRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_services(services: Vec<ServiceRecord>) -> Self {
        Self {
            services: RwLock::new(services),
        }
    }
}

#[async_trait]
impl ServiceRepository for InMemoryServiceRepository {
    async fn search(
        &self,
        query: &ServiceQuery,
    ) -> Result<Vec<ServiceRecord>, Box<dyn std::error::Error + Send + Sync>> {
        let services = self.services.read().unwrap();
        let mut matched: Vec<ServiceRecord> = services
            .iter()
            .filter(|s| query.matches_title(&s.title))
            .cloned()
            .collect();

        match query.sort {
            SortOrder::Ascending => matched.sort_by(|a, b| a.price.total_cmp(&b.price)),
            SortOrder::Descending => matched.sort_by(|a, b| b.price.total_cmp(&a.price)),
        }

        Ok(matched)
    }

    async fn get(
        &self,
        id: Uuid,
    ) -> Result<Option<ServiceRecord>, Box<dyn std::error::Error + Send + Sync>> {
        let services = self.services.read().unwrap();
        Ok(services.iter().find(|s| s.id == id).cloned())
    }
}

/// In-memory bookings collection with the same upsert and delete
/// semantics as the Postgres repository.
#[derive(Default)]
pub struct InMemoryBookingRepository {
    bookings: RwLock<HashMap<Uuid, Map<String, Value>>>,
}

impl InMemoryBookingRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookingRepository for InMemoryBookingRepository {
    async fn list(
        &self,
        scope: &BookingScope,
    ) -> Result<Vec<BookingRecord>, Box<dyn std::error::Error + Send + Sync>> {
        let bookings = self.bookings.read().unwrap();
        let records = bookings
            .iter()
            .filter(|(_, fields)| match scope {
                BookingScope::All => true,
                BookingScope::Owner(email) => {
                    fields.get("email").and_then(Value::as_str) == Some(email.as_str())
                }
            })
            .map(|(id, fields)| BookingRecord {
                id: *id,
                fields: fields.clone(),
            })
            .collect();

        Ok(records)
    }

    async fn insert(
        &self,
        mut document: Map<String, Value>,
    ) -> Result<InsertAck, Box<dyn std::error::Error + Send + Sync>> {
        // The store owns identifiers
        document.remove("id");
        let id = Uuid::new_v4();
        self.bookings.write().unwrap().insert(id, document);

        Ok(InsertAck { inserted_id: id })
    }

    async fn set_status(
        &self,
        id: Uuid,
        status: &str,
    ) -> Result<UpdateAck, Box<dyn std::error::Error + Send + Sync>> {
        let mut bookings = self.bookings.write().unwrap();
        match bookings.get_mut(&id) {
            Some(fields) => {
                fields.insert("status".to_string(), Value::String(status.to_string()));
                Ok(UpdateAck {
                    matched_count: 1,
                    upserted_id: None,
                })
            }
            None => {
                let mut fields = Map::new();
                fields.insert("status".to_string(), Value::String(status.to_string()));
                bookings.insert(id, fields);
                Ok(UpdateAck {
                    matched_count: 0,
                    upserted_id: Some(id),
                })
            }
        }
    }

    async fn delete(
        &self,
        id: Uuid,
    ) -> Result<DeleteAck, Box<dyn std::error::Error + Send + Sync>> {
        let removed = self.bookings.write().unwrap().remove(&id);

        Ok(DeleteAck {
            deleted_count: if removed.is_some() { 1 } else { 0 },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn service(title: &str, price: f64) -> ServiceRecord {
        ServiceRecord {
            id: Uuid::new_v4(),
            title: title.to_string(),
            price,
            img: None,
            service_id: None,
        }
    }

    fn document(email: &str, status: &str) -> Map<String, Value> {
        let mut fields = Map::new();
        fields.insert("email".to_string(), json!(email));
        fields.insert("status".to_string(), json!(status));
        fields
    }

    fn repo_with_fleet_services() -> InMemoryServiceRepository {
        InMemoryServiceRepository::with_services(vec![
            service("Engine Oil Change", 20.0),
            service("Full Engine Diagnostic", 150.0),
            service("Wheel Alignment", 60.0),
        ])
    }

    #[tokio::test]
    async fn test_search_filters_by_title() {
        let repo = repo_with_fleet_services();

        let query = ServiceQuery {
            search: Some("engine".to_string()),
            sort: SortOrder::default(),
        };
        let found = repo.search(&query).await.unwrap();

        assert_eq!(found.len(), 2);
        assert!(found.iter().all(|s| s.title.to_lowercase().contains("engine")));
    }

    #[tokio::test]
    async fn test_search_sorts_by_price() {
        let repo = repo_with_fleet_services();

        // Default is descending
        let found = repo.search(&ServiceQuery::default()).await.unwrap();
        let prices: Vec<f64> = found.iter().map(|s| s.price).collect();
        assert_eq!(prices, vec![150.0, 60.0, 20.0]);

        // Ascending on request
        let query = ServiceQuery {
            search: None,
            sort: SortOrder::Ascending,
        };
        let found = repo.search(&query).await.unwrap();
        let prices: Vec<f64> = found.iter().map(|s| s.price).collect();
        assert_eq!(prices, vec![20.0, 60.0, 150.0]);
    }

    #[tokio::test]
    async fn test_get_misses_return_none() {
        let repo = repo_with_fleet_services();

        let found = repo.get(Uuid::new_v4()).await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_list_scopes_to_owner() {
        let repo = InMemoryBookingRepository::new();
        repo.insert(document("a@example.com", "pending")).await.unwrap();
        repo.insert(document("a@example.com", "approved")).await.unwrap();
        repo.insert(document("b@example.com", "pending")).await.unwrap();

        let all = repo.list(&BookingScope::All).await.unwrap();
        assert_eq!(all.len(), 3);

        let owned = repo
            .list(&BookingScope::Owner("a@example.com".to_string()))
            .await
            .unwrap();
        assert_eq!(owned.len(), 2);
        assert!(owned.iter().all(|b| b.email() == Some("a@example.com")));
    }

    #[tokio::test]
    async fn test_insert_ignores_caller_supplied_id() {
        let repo = InMemoryBookingRepository::new();
        let mut fields = document("a@example.com", "pending");
        let foreign = Uuid::new_v4();
        fields.insert("id".to_string(), json!(foreign.to_string()));

        let ack = repo.insert(fields).await.unwrap();
        assert_ne!(ack.inserted_id, foreign);

        let all = repo.list(&BookingScope::All).await.unwrap();
        assert_eq!(all.len(), 1);
        assert!(all[0].fields.get("id").is_none());
    }

    #[tokio::test]
    async fn test_set_status_updates_existing_record() {
        let repo = InMemoryBookingRepository::new();
        let ack = repo.insert(document("a@example.com", "pending")).await.unwrap();

        let update = repo.set_status(ack.inserted_id, "approved").await.unwrap();
        assert_eq!(update.matched_count, 1);
        assert!(update.upserted_id.is_none());

        // Other fields survive the update
        let all = repo.list(&BookingScope::All).await.unwrap();
        assert_eq!(all[0].status(), Some("approved"));
        assert_eq!(all[0].email(), Some("a@example.com"));
    }

    #[tokio::test]
    async fn test_set_status_upserts_missing_record() {
        let repo = InMemoryBookingRepository::new();
        let id = Uuid::new_v4();

        let update = repo.set_status(id, "approved").await.unwrap();
        assert_eq!(update.matched_count, 0);
        assert_eq!(update.upserted_id, Some(id));

        // The upserted document carries only the status field
        let all = repo.list(&BookingScope::All).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, id);
        assert_eq!(all[0].fields.len(), 1);
        assert_eq!(all[0].status(), Some("approved"));
    }

    #[tokio::test]
    async fn test_delete_reports_zero_or_one() {
        let repo = InMemoryBookingRepository::new();
        let ack = repo.insert(document("a@example.com", "pending")).await.unwrap();

        let missing = repo.delete(Uuid::new_v4()).await.unwrap();
        assert_eq!(missing.deleted_count, 0);

        let deleted = repo.delete(ack.inserted_id).await.unwrap();
        assert_eq!(deleted.deleted_count, 1);

        // Deleting again is still not an error
        let again = repo.delete(ack.inserted_id).await.unwrap();
        assert_eq!(again.deleted_count, 0);
    }
}
