use async_trait::async_trait;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::booking::{BookingRecord, BookingScope, DeleteAck, InsertAck, UpdateAck};
use crate::catalog::{ServiceQuery, ServiceRecord};

/// Repository trait for the read-only services collection
#[async_trait]
pub trait ServiceRepository: Send + Sync {
    async fn search(
        &self,
        query: &ServiceQuery,
    ) -> Result<Vec<ServiceRecord>, Box<dyn std::error::Error + Send + Sync>>;

    async fn get(
        &self,
        id: Uuid,
    ) -> Result<Option<ServiceRecord>, Box<dyn std::error::Error + Send + Sync>>;
}

/// Repository trait for booking documents
#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn list(
        &self,
        scope: &BookingScope,
    ) -> Result<Vec<BookingRecord>, Box<dyn std::error::Error + Send + Sync>>;

    /// Stores the document under a fresh identifier. Any caller-supplied
    /// `id` field is dropped; the store owns identifiers.
    async fn insert(
        &self,
        document: Map<String, Value>,
    ) -> Result<InsertAck, Box<dyn std::error::Error + Send + Sync>>;

    /// Overwrites only the `status` field. A missing record upserts a
    /// status-only document under the same identifier.
    async fn set_status(
        &self,
        id: Uuid,
        status: &str,
    ) -> Result<UpdateAck, Box<dyn std::error::Error + Send + Sync>>;

    async fn delete(
        &self,
        id: Uuid,
    ) -> Result<DeleteAck, Box<dyn std::error::Error + Send + Sync>>;
}
