//! Local record store speaking the same protocol as the hosted one. Every
//! table lives in a single `records` table as a JSON field map.

use super::{
    CreateParams, DeleteParams, RecordFields, RecordQuery, RecordResponse, RecordResult,
    RecordStoreClient, UpdateParams,
};
use anyhow::Context;
use async_trait::async_trait;
use chrono::Utc;
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{params, Connection, OptionalExtension};
use serde_json::Value;
use std::path::Path;
use tracing::{error, info};

type DbPool = Pool<SqliteConnectionManager>;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS records (
    table_name TEXT NOT NULL,
    id INTEGER NOT NULL,
    fields TEXT NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    PRIMARY KEY (table_name, id)
);
";

const RESERVED: [&str; 3] = ["Id", "CreatedDate", "LastModifiedDate"];

pub struct SqliteRecordClient {
    pool: DbPool,
}

struct StoredRecord {
    id: i64,
    fields: RecordFields,
    created_at: String,
    updated_at: String,
}

impl StoredRecord {
    fn into_value(self, query: Option<&RecordQuery>) -> Value {
        let mut fields = self.fields;
        fields.insert("Id".to_string(), Value::from(self.id));
        fields.insert("CreatedDate".to_string(), Value::String(self.created_at));
        fields.insert("LastModifiedDate".to_string(), Value::String(self.updated_at));

        if let Some(query) = query.filter(|q| !q.fields.is_empty()) {
            let wanted: Vec<&str> = query.names().collect();
            fields.retain(|name, _| wanted.contains(&name.as_str()));
        }
        Value::Object(fields)
    }
}

fn strip_reserved(mut fields: RecordFields) -> RecordFields {
    for name in RESERVED {
        fields.remove(name);
    }
    fields
}

fn now() -> String {
    Utc::now().to_rfc3339()
}

fn load(conn: &Connection, table: &str, id: i64) -> anyhow::Result<Option<StoredRecord>> {
    let row = conn
        .query_row(
            "SELECT id, fields, created_at, updated_at FROM records
             WHERE table_name = ?1 AND id = ?2",
            params![table, id],
            |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                ))
            },
        )
        .optional()?;

    row.map(|(id, fields, created_at, updated_at)| {
        Ok(StoredRecord {
            id,
            fields: serde_json::from_str(&fields)
                .with_context(|| format!("Corrupt fields for {} {}", table, id))?,
            created_at,
            updated_at,
        })
    })
    .transpose()
}

impl SqliteRecordClient {
    pub fn open(path: &Path) -> anyhow::Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let manager = SqliteConnectionManager::file(path);
        let pool = Pool::new(manager).context("Failed to open record store")?;
        info!("Record store opened at {}", path.display());
        Self::with_pool(pool)
    }

    /// A private in-memory database; one pooled connection so every
    /// caller sees the same data.
    pub fn in_memory() -> anyhow::Result<Self> {
        let pool = Pool::builder()
            .max_size(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .build(SqliteConnectionManager::memory())
            .context("Failed to open in-memory record store")?;
        Self::with_pool(pool)
    }

    fn with_pool(pool: DbPool) -> anyhow::Result<Self> {
        pool.get()?.execute_batch(SCHEMA)?;
        Ok(Self { pool })
    }

    fn fetch(&self, table: &str, query: &RecordQuery) -> anyhow::Result<Value> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(
            "SELECT id FROM records WHERE table_name = ?1 ORDER BY id ASC",
        )?;
        let ids = stmt
            .query_map([table], |row| row.get::<_, i64>(0))?
            .collect::<Result<Vec<_>, _>>()?;

        let mut records = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(record) = load(&conn, table, id)? {
                records.push(record.into_value(Some(query)));
            }
        }
        Ok(Value::Array(records))
    }

    fn get(&self, table: &str, id: i64, query: &RecordQuery) -> anyhow::Result<Option<Value>> {
        let conn = self.pool.get()?;
        Ok(load(&conn, table, id)?.map(|record| record.into_value(Some(query))))
    }

    fn insert(&self, table: &str, fields: RecordFields) -> anyhow::Result<Value> {
        let conn = self.pool.get()?;
        let fields = strip_reserved(fields);
        let id: i64 = conn.query_row(
            "SELECT COALESCE(MAX(id), 0) + 1 FROM records WHERE table_name = ?1",
            [table],
            |row| row.get(0),
        )?;
        let stamp = now();

        conn.execute(
            "INSERT INTO records (table_name, id, fields, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?4)",
            params![table, id, serde_json::to_string(&fields)?, stamp],
        )?;

        Ok(StoredRecord {
            id,
            fields,
            created_at: stamp.clone(),
            updated_at: stamp,
        }
        .into_value(None))
    }

    fn modify(&self, table: &str, fields: RecordFields) -> anyhow::Result<RecordResult> {
        let Some(id) = fields.get("Id").and_then(Value::as_i64) else {
            return Ok(RecordResult::failed("Record is missing Id"));
        };

        let conn = self.pool.get()?;
        let Some(mut record) = load(&conn, table, id)? else {
            return Ok(RecordResult::failed(format!("Record {} not found", id)));
        };

        record.fields.extend(strip_reserved(fields));
        record.updated_at = now();
        conn.execute(
            "UPDATE records SET fields = ?1, updated_at = ?2 WHERE table_name = ?3 AND id = ?4",
            params![
                serde_json::to_string(&record.fields)?,
                record.updated_at,
                table,
                id
            ],
        )?;

        Ok(RecordResult::ok(record.into_value(None)))
    }

    fn remove(&self, table: &str, id: i64) -> anyhow::Result<RecordResult> {
        let conn = self.pool.get()?;
        let removed = conn.execute(
            "DELETE FROM records WHERE table_name = ?1 AND id = ?2",
            params![table, id],
        )?;

        if removed == 0 {
            Ok(RecordResult::failed(format!("Record {} not found", id)))
        } else {
            Ok(RecordResult::ok(serde_json::json!({ "Id": id })))
        }
    }
}

fn respond<T>(result: anyhow::Result<T>, build: impl FnOnce(T) -> RecordResponse) -> RecordResponse {
    match result {
        Ok(value) => build(value),
        Err(e) => {
            error!("Record store error: {:#}", e);
            RecordResponse::failure(e.to_string())
        }
    }
}

#[async_trait]
impl RecordStoreClient for SqliteRecordClient {
    async fn fetch_records(&self, table: &str, query: &RecordQuery) -> RecordResponse {
        respond(self.fetch(table, query), RecordResponse::with_data)
    }

    async fn get_record_by_id(&self, table: &str, id: i64, query: &RecordQuery) -> RecordResponse {
        respond(self.get(table, id, query), |record| match record {
            Some(record) => RecordResponse::with_data(record),
            None => RecordResponse::failure(format!("Record {} not found", id)),
        })
    }

    async fn create_record(&self, table: &str, params: CreateParams) -> RecordResponse {
        let results = params
            .records
            .into_iter()
            .map(|fields| self.insert(table, fields).map(RecordResult::ok))
            .collect::<anyhow::Result<Vec<_>>>();
        respond(results, RecordResponse::with_results)
    }

    async fn update_record(&self, table: &str, params: UpdateParams) -> RecordResponse {
        let results = params
            .records
            .into_iter()
            .map(|fields| self.modify(table, fields))
            .collect::<anyhow::Result<Vec<_>>>();
        respond(results, RecordResponse::with_results)
    }

    async fn delete_record(&self, table: &str, params: DeleteParams) -> RecordResponse {
        let results = params
            .record_ids
            .into_iter()
            .map(|id| self.remove(table, id))
            .collect::<anyhow::Result<Vec<_>>>();
        respond(results, RecordResponse::with_results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: Value) -> RecordFields {
        value.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn test_ids_are_per_table() {
        let store = SqliteRecordClient::in_memory().unwrap();
        let params = || CreateParams {
            records: vec![fields(json!({"title_c": "One"}))],
        };

        store.create_record("ticket_c", params()).await;
        let second = store.create_record("ticket_c", params()).await;
        let other = store.create_record("payment_c", params()).await;

        let second_results = second.results.unwrap();
        let other_results = other.results.unwrap();
        let second_id = &second_results[0].data.as_ref().unwrap()["Id"];
        let other_id = &other_results[0].data.as_ref().unwrap()["Id"];
        assert_eq!(second_id, &json!(2));
        assert_eq!(other_id, &json!(1));
    }

    #[tokio::test]
    async fn test_fetch_returns_only_requested_fields() {
        let store = SqliteRecordClient::in_memory().unwrap();
        store
            .create_record(
                "ticket_c",
                CreateParams {
                    records: vec![fields(json!({"title_c": "Door", "category_c": "carpentry"}))],
                },
            )
            .await;

        let response = store
            .fetch_records("ticket_c", &RecordQuery::with_fields(&["Id", "title_c"]))
            .await;
        assert!(response.success);
        assert_eq!(response.data, Some(json!([{"Id": 1, "title_c": "Door"}])));
    }

    #[tokio::test]
    async fn test_update_and_delete_report_missing_records() {
        let store = SqliteRecordClient::in_memory().unwrap();

        let update = store
            .update_record(
                "ticket_c",
                UpdateParams {
                    records: vec![fields(json!({"Id": 9, "title_c": "Nope"}))],
                },
            )
            .await;
        assert!(update.success);
        let result = &update.results.unwrap()[0];
        assert!(!result.success);
        assert_eq!(result.message.as_deref(), Some("Record 9 not found"));

        let delete = store
            .delete_record("ticket_c", DeleteParams { record_ids: vec![9] })
            .await;
        assert!(!delete.results.unwrap()[0].success);

        let get = store
            .get_record_by_id("ticket_c", 9, &RecordQuery::default())
            .await;
        assert!(!get.success);
    }

    #[tokio::test]
    async fn test_file_store_persists_between_opens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("records.sqlite");

        {
            let store = SqliteRecordClient::open(&path).unwrap();
            store
                .create_record(
                    "brief_c",
                    CreateParams {
                        records: vec![fields(json!({"budget_c": "50k-100k"}))],
                    },
                )
                .await;
        }

        let reopened = SqliteRecordClient::open(&path).unwrap();
        let response = reopened
            .get_record_by_id("brief_c", 1, &RecordQuery::with_fields(&["budget_c"]))
            .await;
        assert_eq!(response.data, Some(json!({"budget_c": "50k-100k"})));
    }
}
