//! In-memory adapter: one owned collection per entity, seeded from the
//! bundled fixtures, with simulated round-trip latency.

use super::{Entity, EntityService, Latency};
use crate::error::{ServiceError, ServiceResult};
use anyhow::Context;
use async_trait::async_trait;
use chrono::Utc;
use serde::de::DeserializeOwned;
use shared_types::{Brief, Document, Message, Payment, Project, Proposal, SiteVisit, Ticket, Timeline};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

pub type Collection<E> = Arc<RwLock<Vec<E>>>;

/// Owns every in-memory collection. Construct once per process (or per
/// test) and hand services out with [`MemoryStore::service`].
#[derive(Clone)]
pub struct MemoryStore {
    tickets: Collection<Ticket>,
    proposals: Collection<Proposal>,
    messages: Collection<Message>,
    payments: Collection<Payment>,
    documents: Collection<Document>,
    briefs: Collection<Brief>,
    timelines: Collection<Timeline>,
    site_visits: Collection<SiteVisit>,
    projects: Collection<Project>,
    latency: Latency,
}

/// Ties an entity type to its collection inside [`MemoryStore`] and to
/// the fixture file it is seeded from.
pub trait MemoryCollection: Entity + DeserializeOwned {
    fn collection(store: &MemoryStore) -> &Collection<Self>;
    fn fixture() -> &'static str;
}

macro_rules! memory_collection {
    ($entity:ty, $field:ident, $file:literal) => {
        impl MemoryCollection for $entity {
            fn collection(store: &MemoryStore) -> &Collection<Self> {
                &store.$field
            }

            fn fixture() -> &'static str {
                include_str!(concat!("../../fixtures/", $file))
            }
        }
    };
}

memory_collection!(Ticket, tickets, "tickets.json");
memory_collection!(Proposal, proposals, "proposals.json");
memory_collection!(Message, messages, "messages.json");
memory_collection!(Payment, payments, "payments.json");
memory_collection!(Document, documents, "documents.json");
memory_collection!(Brief, briefs, "briefs.json");
memory_collection!(Timeline, timelines, "timelines.json");
memory_collection!(SiteVisit, site_visits, "site_visits.json");
memory_collection!(Project, projects, "projects.json");

fn parse_fixture<E: MemoryCollection>() -> anyhow::Result<Collection<E>> {
    let items: Vec<E> = serde_json::from_str(E::fixture())
        .with_context(|| format!("Failed to parse {} fixture", E::KIND))?;
    Ok(Arc::new(RwLock::new(items)))
}

impl MemoryStore {
    pub fn empty(latency: Latency) -> Self {
        Self {
            tickets: Arc::default(),
            proposals: Arc::default(),
            messages: Arc::default(),
            payments: Arc::default(),
            documents: Arc::default(),
            briefs: Arc::default(),
            timelines: Arc::default(),
            site_visits: Arc::default(),
            projects: Arc::default(),
            latency,
        }
    }

    pub fn seeded(latency: Latency) -> anyhow::Result<Self> {
        Ok(Self {
            tickets: parse_fixture()?,
            proposals: parse_fixture()?,
            messages: parse_fixture()?,
            payments: parse_fixture()?,
            documents: parse_fixture()?,
            briefs: parse_fixture()?,
            timelines: parse_fixture()?,
            site_visits: parse_fixture()?,
            projects: parse_fixture()?,
            latency,
        })
    }

    pub fn latency(&self) -> Latency {
        self.latency
    }

    pub fn service<E: MemoryCollection>(&self) -> MemoryService<E> {
        MemoryService {
            items: E::collection(self).clone(),
            latency: self.latency,
        }
    }

    /// Empties every collection
    pub async fn clear(&self) {
        self.tickets.write().await.clear();
        self.proposals.write().await.clear();
        self.messages.write().await.clear();
        self.payments.write().await.clear();
        self.documents.write().await.clear();
        self.briefs.write().await.clear();
        self.timelines.write().await.clear();
        self.site_visits.write().await.clear();
        self.projects.write().await.clear();
    }
}

pub struct MemoryService<E> {
    items: Collection<E>,
    latency: Latency,
}

impl<E: Entity> MemoryService<E> {
    /// A standalone service over `items`, not tied to a store
    pub fn from_items(items: Vec<E>, latency: Latency) -> Self {
        Self {
            items: Arc::new(RwLock::new(items)),
            latency,
        }
    }
}

fn next_id<E: Entity>(items: &[E]) -> i64 {
    items.iter().map(|item| item.id()).max().map_or(1, |max| max + 1)
}

#[async_trait]
impl<E: Entity> EntityService<E> for MemoryService<E> {
    async fn get_all(&self) -> ServiceResult<Vec<E>> {
        Latency::wait(self.latency.list).await;
        Ok(self.items.read().await.clone())
    }

    async fn get_by_id(&self, id: i64) -> ServiceResult<E> {
        Latency::wait(self.latency.get).await;
        self.items
            .read()
            .await
            .iter()
            .find(|item| item.id() == id)
            .cloned()
            .ok_or(ServiceError::NotFound(E::KIND))
    }

    async fn create(&self, request: E::Create) -> ServiceResult<E> {
        Latency::wait(self.latency.create).await;
        let mut items = self.items.write().await;
        let id = next_id(&items);
        let entity = E::build(id, request, Utc::now());
        items.push(entity.clone());
        debug!("Created {} {}", E::KIND, id);
        Ok(entity)
    }

    async fn update(&self, id: i64, update: E::Update) -> ServiceResult<E> {
        Latency::wait(self.latency.update).await;
        let mut items = self.items.write().await;
        let entity = items
            .iter_mut()
            .find(|item| item.id() == id)
            .ok_or(ServiceError::NotFound(E::KIND))?;
        entity.merge(update, Utc::now());
        debug!("Updated {} {}", E::KIND, id);
        Ok(entity.clone())
    }

    async fn delete(&self, id: i64) -> ServiceResult<E> {
        Latency::wait(self.latency.delete).await;
        let mut items = self.items.write().await;
        let index = items
            .iter()
            .position(|item| item.id() == id)
            .ok_or(ServiceError::NotFound(E::KIND))?;
        debug!("Deleted {} {}", E::KIND, id);
        Ok(items.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::{CreateTicketRequest, TicketPriority, TicketStatus, UpdateTicketRequest};

    fn ticket_request(title: &str) -> CreateTicketRequest {
        CreateTicketRequest {
            title: title.to_string(),
            description: "Kitchen sink drips".to_string(),
            priority: TicketPriority::High,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_seeded_store_loads_every_fixture() {
        let store = MemoryStore::seeded(Latency::none()).unwrap();
        assert!(!store.service::<Ticket>().get_all().await.unwrap().is_empty());
        assert!(!store.service::<Proposal>().get_all().await.unwrap().is_empty());
        assert!(!store.service::<Message>().get_all().await.unwrap().is_empty());
        assert!(!store.service::<Payment>().get_all().await.unwrap().is_empty());
        assert!(!store.service::<Document>().get_all().await.unwrap().is_empty());
        assert!(!store.service::<Brief>().get_all().await.unwrap().is_empty());
        assert!(!store.service::<Timeline>().get_all().await.unwrap().is_empty());
        assert!(!store.service::<SiteVisit>().get_all().await.unwrap().is_empty());
        assert!(store.service::<Project>().get_by_id(1).await.is_ok());
    }

    #[tokio::test]
    async fn test_create_assigns_max_plus_one() {
        let service = MemoryService::<Ticket>::from_items(Vec::new(), Latency::none());
        let first = service.create(ticket_request("First")).await.unwrap();
        assert_eq!(first.id, 1);

        let second = service.create(ticket_request("Second")).await.unwrap();
        assert_eq!(second.id, 2);

        service.delete(1).await.unwrap();
        let third = service.create(ticket_request("Third")).await.unwrap();
        assert_eq!(third.id, 3);
        assert_eq!(third.status, TicketStatus::Open);
    }

    #[tokio::test]
    async fn test_update_unknown_id_leaves_store_unchanged() {
        let store = MemoryStore::seeded(Latency::none()).unwrap();
        let service = store.service::<Ticket>();
        let before = service.get_all().await.unwrap();

        let err = service
            .update(
                9999,
                UpdateTicketRequest {
                    title: Some("Changed".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Ticket not found");
        assert_eq!(service.get_all().await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_delete_twice_fails_second_time() {
        let service = MemoryService::<Ticket>::from_items(Vec::new(), Latency::none());
        let created = service.create(ticket_request("Leaky faucet")).await.unwrap();

        let removed = service.delete(created.id).await.unwrap();
        assert_eq!(removed.title, "Leaky faucet");

        let err = service.delete(created.id).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_services_share_store_collections() {
        let store = MemoryStore::empty(Latency::none());
        let writer = store.service::<Ticket>();
        let reader = store.service::<Ticket>();

        writer.create(ticket_request("Shared")).await.unwrap();
        assert_eq!(reader.get_all().await.unwrap().len(), 1);

        store.clear().await;
        assert!(reader.get_all().await.unwrap().is_empty());
    }
}
