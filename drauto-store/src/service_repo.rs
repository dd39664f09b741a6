use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use drauto_core::catalog::{ServiceQuery, ServiceRecord, SortOrder};
use drauto_core::repository::ServiceRepository;

pub struct PgServiceRepository {
    pool: PgPool,
}

impl PgServiceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal struct for type-safe querying
#[derive(sqlx::FromRow)]
struct ServiceRow {
    id: Uuid,
    title: String,
    price: f64,
    img: Option<String>,
    service_id: Option<String>,
}

impl ServiceRow {
    fn into_record(self) -> ServiceRecord {
        ServiceRecord {
            id: self.id,
            title: self.title,
            price: self.price,
            img: self.img,
            service_id: self.service_id,
        }
    }
}

/// Escapes LIKE wildcards so the search term matches as a literal
/// substring.
fn escape_like(term: &str) -> String {
    term.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

#[async_trait]
impl ServiceRepository for PgServiceRepository {
    async fn search(
        &self,
        query: &ServiceQuery,
    ) -> Result<Vec<ServiceRecord>, Box<dyn std::error::Error + Send + Sync>> {
        // Only the direction is interpolated; the search term stays bound.
        let direction = match query.sort {
            SortOrder::Ascending => "ASC",
            SortOrder::Descending => "DESC",
        };
        let sql = format!(
            "SELECT id, title, price, img, service_id FROM services \
             WHERE ($1::text IS NULL OR title ILIKE '%' || $1 || '%') \
             ORDER BY price {}",
            direction
        );

        let rows = sqlx::query_as::<_, ServiceRow>(&sql)
            .bind(query.search.as_deref().map(escape_like))
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(ServiceRow::into_record).collect())
    }

    async fn get(
        &self,
        id: Uuid,
    ) -> Result<Option<ServiceRecord>, Box<dyn std::error::Error + Send + Sync>> {
        let row = sqlx::query_as::<_, ServiceRow>(
            "SELECT id, title, price, img, service_id FROM services WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(ServiceRow::into_record))
    }
}
