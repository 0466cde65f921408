use super::{
    CreateParams, DeleteParams, RecordQuery, RecordResponse, RecordStoreClient, UpdateParams,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteStoreConfig {
    pub base_url: String,
    pub project_id: String,
    pub public_key: String,
}

/// Record store reached over HTTP/JSON
pub struct HttpRecordClient {
    client: reqwest::Client,
    config: RemoteStoreConfig,
}

impl HttpRecordClient {
    pub fn new(config: RemoteStoreConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/records/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> RecordResponse {
        let request = request
            .header("X-Project-Id", &self.config.project_id)
            .header("X-Public-Key", &self.config.public_key);

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                error!("Record store request failed: {}", e);
                return RecordResponse::failure(e.to_string());
            }
        };

        let status = response.status();
        match response.json::<RecordResponse>().await {
            Ok(body) => body,
            Err(e) if status.is_success() => {
                error!("Record store sent an unreadable body: {}", e);
                RecordResponse::failure(format!("Invalid response from record store: {}", e))
            }
            Err(_) => RecordResponse::failure(format!("Record store returned HTTP {}", status)),
        }
    }
}

#[async_trait]
impl RecordStoreClient for HttpRecordClient {
    async fn fetch_records(&self, table: &str, query: &RecordQuery) -> RecordResponse {
        debug!("POST records/{}/query", table);
        self.send(self.client.post(self.url(&format!("{}/query", table))).json(query))
            .await
    }

    async fn get_record_by_id(&self, table: &str, id: i64, query: &RecordQuery) -> RecordResponse {
        let fields: Vec<&str> = query.names().collect();
        debug!("GET records/{}/{}", table, id);
        self.send(
            self.client
                .get(self.url(&format!("{}/{}", table, id)))
                .query(&[("fields", fields.join(","))]),
        )
        .await
    }

    async fn create_record(&self, table: &str, params: CreateParams) -> RecordResponse {
        self.send(self.client.post(self.url(table)).json(&params)).await
    }

    async fn update_record(&self, table: &str, params: UpdateParams) -> RecordResponse {
        self.send(self.client.put(self.url(table)).json(&params)).await
    }

    async fn delete_record(&self, table: &str, params: DeleteParams) -> RecordResponse {
        self.send(self.client.delete(self.url(table)).json(&params)).await
    }
}
