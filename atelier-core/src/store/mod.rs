pub mod entities;
pub mod memory;
pub mod queries;
pub mod seed;

pub use memory::{MemoryCollection, MemoryService, MemoryStore};
pub use queries::{PaymentQueries, SiteVisitQueries};
pub use seed::{seed_fixtures, SeedSummary};

use crate::error::{EntityKind, ServiceResult};
use crate::remote::{RecordStoreClient, RemoteService};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shared_types::{Brief, Document, Message, Payment, Project, Proposal, SiteVisit, Ticket, Timeline};
use std::sync::Arc;
use std::time::Duration;

/// A domain record with a stable integer id and a CRUD lifecycle.
///
/// `Create` carries the fields a caller supplies for a new record, `Update`
/// is a partial: every `Some` field overwrites, every `None` is left alone.
pub trait Entity: Clone + Send + Sync + 'static {
    type Create: Send + Sync + 'static;
    type Update: Send + Sync + 'static;

    const KIND: EntityKind;

    fn id(&self) -> i64;

    fn build(id: i64, request: Self::Create, now: DateTime<Utc>) -> Self;

    fn merge(&mut self, update: Self::Update, now: DateTime<Utc>);
}

/// Uniform CRUD contract implemented by every store adapter
#[async_trait]
pub trait EntityService<E: Entity>: Send + Sync {
    async fn get_all(&self) -> ServiceResult<Vec<E>>;
    async fn get_by_id(&self, id: i64) -> ServiceResult<E>;
    async fn create(&self, request: E::Create) -> ServiceResult<E>;
    async fn update(&self, id: i64, update: E::Update) -> ServiceResult<E>;
    /// Returns the removed record
    async fn delete(&self, id: i64) -> ServiceResult<E>;
}

/// Simulated round-trip delay applied by the in-memory adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Latency {
    pub list: Duration,
    pub get: Duration,
    pub create: Duration,
    pub update: Duration,
    pub delete: Duration,
}

impl Latency {
    pub fn none() -> Self {
        Self::scaled(0.0)
    }

    /// Default delays multiplied by `factor`; 1.0 gives 300/200/400/300/250ms
    pub fn scaled(factor: f64) -> Self {
        let ms = |base: f64| Duration::from_millis((base * factor.max(0.0)).round() as u64);
        Self {
            list: ms(300.0),
            get: ms(200.0),
            create: ms(400.0),
            update: ms(300.0),
            delete: ms(250.0),
        }
    }

    pub(crate) async fn wait(delay: Duration) {
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

impl Default for Latency {
    fn default() -> Self {
        Self::scaled(1.0)
    }
}

/// One service per entity, chosen once at composition time
#[derive(Clone)]
pub struct Services {
    pub tickets: Arc<dyn EntityService<Ticket>>,
    pub proposals: Arc<dyn EntityService<Proposal>>,
    pub messages: Arc<dyn EntityService<Message>>,
    pub payments: Arc<dyn EntityService<Payment>>,
    pub documents: Arc<dyn EntityService<Document>>,
    pub briefs: Arc<dyn EntityService<Brief>>,
    pub timelines: Arc<dyn EntityService<Timeline>>,
    pub site_visits: Arc<dyn EntityService<SiteVisit>>,
    pub projects: Arc<dyn EntityService<Project>>,
}

impl Services {
    pub fn in_memory(store: &MemoryStore) -> Self {
        Self {
            tickets: Arc::new(store.service::<Ticket>()),
            proposals: Arc::new(store.service::<Proposal>()),
            messages: Arc::new(store.service::<Message>()),
            payments: Arc::new(store.service::<Payment>()),
            documents: Arc::new(store.service::<Document>()),
            briefs: Arc::new(store.service::<Brief>()),
            timelines: Arc::new(store.service::<Timeline>()),
            site_visits: Arc::new(store.service::<SiteVisit>()),
            projects: Arc::new(store.service::<Project>()),
        }
    }

    pub fn remote(client: Arc<dyn RecordStoreClient>) -> Self {
        Self {
            tickets: Arc::new(RemoteService::<Ticket>::new(client.clone())),
            proposals: Arc::new(RemoteService::<Proposal>::new(client.clone())),
            messages: Arc::new(RemoteService::<Message>::new(client.clone())),
            payments: Arc::new(RemoteService::<Payment>::new(client.clone())),
            documents: Arc::new(RemoteService::<Document>::new(client.clone())),
            briefs: Arc::new(RemoteService::<Brief>::new(client.clone())),
            timelines: Arc::new(RemoteService::<Timeline>::new(client.clone())),
            site_visits: Arc::new(RemoteService::<SiteVisit>::new(client.clone())),
            projects: Arc::new(RemoteService::<Project>::new(client)),
        }
    }
}
