use async_trait::async_trait;
use serde_json::{Map, Value};
use sqlx::PgPool;
use uuid::Uuid;

use drauto_core::booking::{BookingRecord, BookingScope, DeleteAck, InsertAck, UpdateAck};
use drauto_core::repository::BookingRepository;

pub struct PgBookingRepository {
    pool: PgPool,
}

impl PgBookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal struct for type-safe querying
#[derive(sqlx::FromRow)]
struct BookingRow {
    id: Uuid,
    doc: Value,
}

impl BookingRow {
    fn into_record(self) -> BookingRecord {
        let fields = match self.doc {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        BookingRecord {
            id: self.id,
            fields,
        }
    }
}

#[async_trait]
impl BookingRepository for PgBookingRepository {
    async fn list(
        &self,
        scope: &BookingScope,
    ) -> Result<Vec<BookingRecord>, Box<dyn std::error::Error + Send + Sync>> {
        let rows = match scope {
            BookingScope::All => {
                sqlx::query_as::<_, BookingRow>("SELECT id, doc FROM bookings")
                    .fetch_all(&self.pool)
                    .await?
            }
            BookingScope::Owner(email) => {
                sqlx::query_as::<_, BookingRow>(
                    "SELECT id, doc FROM bookings WHERE doc->>'email' = $1",
                )
                .bind(email)
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(rows.into_iter().map(BookingRow::into_record).collect())
    }

    async fn insert(
        &self,
        mut document: Map<String, Value>,
    ) -> Result<InsertAck, Box<dyn std::error::Error + Send + Sync>> {
        // The store owns identifiers
        document.remove("id");
        let id = Uuid::new_v4();

        sqlx::query("INSERT INTO bookings (id, doc) VALUES ($1, $2)")
            .bind(id)
            .bind(Value::Object(document))
            .execute(&self.pool)
            .await?;

        Ok(InsertAck { inserted_id: id })
    }

    async fn set_status(
        &self,
        id: Uuid,
        status: &str,
    ) -> Result<UpdateAck, Box<dyn std::error::Error + Send + Sync>> {
        // One statement covers both outcomes, so a record deleted between
        // lookup and write still upserts instead of erroring. xmax = 0
        // holds only for rows this statement inserted.
        let inserted: bool = sqlx::query_scalar(
            "INSERT INTO bookings (id, doc) \
             VALUES ($1, jsonb_build_object('status', $2::text)) \
             ON CONFLICT (id) DO UPDATE \
             SET doc = jsonb_set(bookings.doc, '{status}', to_jsonb($2::text)) \
             RETURNING (xmax = 0)",
        )
        .bind(id)
        .bind(status)
        .fetch_one(&self.pool)
        .await?;

        Ok(UpdateAck {
            matched_count: if inserted { 0 } else { 1 },
            upserted_id: inserted.then_some(id),
        })
    }

    async fn delete(
        &self,
        id: Uuid,
    ) -> Result<DeleteAck, Box<dyn std::error::Error + Send + Sync>> {
        let result = sqlx::query("DELETE FROM bookings WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(DeleteAck {
            deleted_count: result.rows_affected(),
        })
    }
}
