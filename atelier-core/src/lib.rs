pub mod annotation;
pub mod calendar;
pub mod components;
pub mod error;
pub mod listing;
pub mod pages;
pub mod remote;
pub mod store;
pub mod validation;

pub use error::{EntityKind, ServiceError, ServiceResult};
pub use remote::{HttpRecordClient, RecordStoreClient, RemoteStoreConfig, SqliteRecordClient};
pub use store::{Entity, EntityService, Latency, MemoryStore, Services};
