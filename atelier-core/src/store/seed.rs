//! Replays the bundled fixtures through a set of services, so any adapter
//! can start from the same sample project.

use super::{EntityService, MemoryCollection, Services};
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::info;

/// Records created per entity
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SeedSummary {
    pub counts: Vec<(&'static str, usize)>,
}

impl SeedSummary {
    pub fn total(&self) -> usize {
        self.counts.iter().map(|(_, n)| n).sum()
    }
}

async fn seed_one<E>(service: &dyn EntityService<E>) -> Result<usize>
where
    E: MemoryCollection,
    E::Create: DeserializeOwned,
{
    // Fixture records carry every create field, so they parse as requests
    let requests: Vec<E::Create> = serde_json::from_str(E::fixture())
        .with_context(|| format!("Failed to parse {} fixture", E::KIND))?;
    let count = requests.len();
    for request in requests {
        service
            .create(request)
            .await
            .with_context(|| format!("Failed to seed {} record", E::KIND))?;
    }
    Ok(count)
}

/// Creates every fixture record through `services`. Ids are assigned by
/// the target store.
pub async fn seed_fixtures(services: &Services) -> Result<SeedSummary> {
    let counts = vec![
        ("projects", seed_one(services.projects.as_ref()).await?),
        ("timelines", seed_one(services.timelines.as_ref()).await?),
        ("briefs", seed_one(services.briefs.as_ref()).await?),
        ("proposals", seed_one(services.proposals.as_ref()).await?),
        ("site_visits", seed_one(services.site_visits.as_ref()).await?),
        ("tickets", seed_one(services.tickets.as_ref()).await?),
        ("payments", seed_one(services.payments.as_ref()).await?),
        ("documents", seed_one(services.documents.as_ref()).await?),
        ("messages", seed_one(services.messages.as_ref()).await?),
    ];
    let summary = SeedSummary { counts };
    info!("Seeded {} records", summary.total());
    Ok(summary)
}
