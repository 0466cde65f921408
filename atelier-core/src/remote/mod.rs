pub mod http;
pub mod mapping;
pub mod sqlite;

pub use http::{HttpRecordClient, RemoteStoreConfig};
pub use mapping::RemoteRecord;
pub use sqlite::SqliteRecordClient;

use crate::error::{EntityKind, ServiceError, ServiceResult};
use crate::store::EntityService;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::{error, warn};

/// Flat `*_c` field map exchanged with the record store
pub type RecordFields = serde_json::Map<String, Value>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldName {
    #[serde(rename = "Name")]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldRef {
    pub field: FieldName,
}

/// Which fields a read should return, serialized as
/// `{"fields": [{"field": {"Name": "title_c"}}, ...]}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordQuery {
    #[serde(default)]
    pub fields: Vec<FieldRef>,
}

impl RecordQuery {
    pub fn with_fields(names: &[&str]) -> Self {
        Self {
            fields: names
                .iter()
                .map(|name| FieldRef {
                    field: FieldName {
                        name: name.to_string(),
                    },
                })
                .collect(),
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.field.name.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateParams {
    pub records: Vec<RecordFields>,
}

/// Every record must carry its `Id`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateParams {
    pub records: Vec<RecordFields>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteParams {
    #[serde(rename = "RecordIds")]
    pub record_ids: Vec<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordResult {
    pub success: bool,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub message: Option<String>,
}

impl RecordResult {
    pub fn ok(data: Value) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordResponse {
    pub success: bool,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub results: Option<Vec<RecordResult>>,
    #[serde(default)]
    pub message: Option<String>,
}

impl RecordResponse {
    pub fn with_data(data: Value) -> Self {
        Self {
            success: true,
            data: Some(data),
            results: None,
            message: None,
        }
    }

    pub fn with_results(results: Vec<RecordResult>) -> Self {
        Self {
            success: true,
            data: None,
            results: Some(results),
            message: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            results: None,
            message: Some(message.into()),
        }
    }
}

/// Record API the remote adapter talks to. Failures, transport ones
/// included, come back as `success: false` rather than as `Err`.
#[async_trait]
pub trait RecordStoreClient: Send + Sync {
    async fn fetch_records(&self, table: &str, query: &RecordQuery) -> RecordResponse;
    async fn get_record_by_id(&self, table: &str, id: i64, query: &RecordQuery) -> RecordResponse;
    async fn create_record(&self, table: &str, params: CreateParams) -> RecordResponse;
    async fn update_record(&self, table: &str, params: UpdateParams) -> RecordResponse;
    async fn delete_record(&self, table: &str, params: DeleteParams) -> RecordResponse;
}

/// Entity service backed by a [`RecordStoreClient`]
pub struct RemoteService<E> {
    client: Arc<dyn RecordStoreClient>,
    _entity: PhantomData<fn() -> E>,
}

impl<E: RemoteRecord> RemoteService<E> {
    pub fn new(client: Arc<dyn RecordStoreClient>) -> Self {
        Self {
            client,
            _entity: PhantomData,
        }
    }
}

fn remote_failure(kind: EntityKind, action: &str, message: Option<String>) -> ServiceError {
    let message = message.unwrap_or_else(|| format!("Failed to {} {}", action, kind.label().to_lowercase()));
    error!("Error trying to {} {}: {}", action, kind.label().to_lowercase(), message);
    ServiceError::Remote(message)
}

/// Fails on `success: false` or on the first failed per-record result,
/// otherwise yields the data of the first successful record.
fn first_record(kind: EntityKind, action: &str, response: RecordResponse) -> ServiceResult<Option<Value>> {
    if !response.success {
        return Err(remote_failure(kind, action, response.message));
    }

    let Some(results) = response.results else {
        return Ok(response.data);
    };

    let failed: Vec<&RecordResult> = results.iter().filter(|r| !r.success).collect();
    if let Some(first) = failed.first() {
        error!("Failed to {} {} {} record(s)", action, failed.len(), kind.label().to_lowercase());
        return Err(remote_failure(kind, action, first.message.clone()));
    }

    Ok(results.into_iter().find_map(|r| r.data))
}

fn decode_record<E: RemoteRecord>(value: &Value) -> ServiceResult<E> {
    let fields = value
        .as_object()
        .ok_or_else(|| ServiceError::decode(E::KIND, "record is not an object"))?;
    E::from_fields(fields)
}

#[async_trait]
impl<E: RemoteRecord> EntityService<E> for RemoteService<E> {
    async fn get_all(&self) -> ServiceResult<Vec<E>> {
        let response = self.client.fetch_records(E::TABLE, &E::query()).await;
        if !response.success {
            return Err(remote_failure(E::KIND, "fetch", response.message));
        }

        match response.data {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(Value::Array(records)) => records.iter().map(decode_record::<E>).collect(),
            Some(_) => Err(ServiceError::decode(E::KIND, "expected a list of records")),
        }
    }

    async fn get_by_id(&self, id: i64) -> ServiceResult<E> {
        let response = self
            .client
            .get_record_by_id(E::TABLE, id, &E::query())
            .await;
        if !response.success {
            warn!(
                "Lookup of {} {} failed: {}",
                E::KIND,
                id,
                response.message.as_deref().unwrap_or("no message")
            );
            return Err(ServiceError::NotFound(E::KIND));
        }

        match response.data {
            None | Some(Value::Null) => Err(ServiceError::NotFound(E::KIND)),
            Some(value) => decode_record(&value),
        }
    }

    async fn create(&self, request: E::Create) -> ServiceResult<E> {
        let fields = E::create_fields(&request)?;
        let response = self
            .client
            .create_record(E::TABLE, CreateParams { records: vec![fields] })
            .await;

        match first_record(E::KIND, "create", response)? {
            Some(value) => decode_record(&value),
            None => Err(remote_failure(
                E::KIND,
                "create",
                Some("Record store returned no created record".to_string()),
            )),
        }
    }

    async fn update(&self, id: i64, update: E::Update) -> ServiceResult<E> {
        self.get_by_id(id).await?;

        let mut fields = E::update_fields(&update)?;
        fields.insert("Id".to_string(), Value::from(id));
        let response = self
            .client
            .update_record(E::TABLE, UpdateParams { records: vec![fields] })
            .await;

        match first_record(E::KIND, "update", response)? {
            Some(value) => decode_record(&value),
            None => self.get_by_id(id).await,
        }
    }

    async fn delete(&self, id: i64) -> ServiceResult<E> {
        let existing = self.get_by_id(id).await?;

        let response = self
            .client
            .delete_record(E::TABLE, DeleteParams { record_ids: vec![id] })
            .await;
        first_record(E::KIND, "delete", response)?;

        Ok(existing)
    }
}
