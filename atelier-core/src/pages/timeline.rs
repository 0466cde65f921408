use super::{days_until, PageState, CURRENT_PROJECT_ID};
use crate::components::{Badge, ToBadge};
use crate::store::{Services, SiteVisitQueries};
use chrono::{DateTime, Utc};
use serde::Serialize;
use shared_types::{Phase, PhaseStatus, SiteVisit, Timeline};
use tracing::warn;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PhaseCounts {
    pub completed: usize,
    pub in_progress: usize,
    pub pending: usize,
}

pub fn phase_icon(phase: &Phase) -> &'static str {
    match phase.phase.as_str() {
        "consultation" => "Users",
        "design" => "Palette",
        "approval" => "CheckCircle",
        "procurement" => "ShoppingCart",
        "delivery" => "Truck",
        "installation" => "Hammer",
        _ => "Circle",
    }
}

pub struct TimelinePage {
    services: Services,
    pub state: PageState,
    pub timeline: Option<Timeline>,
    /// Site visits attached to the loaded timeline
    pub visits: Vec<SiteVisit>,
}

impl TimelinePage {
    pub fn new(services: Services) -> Self {
        Self {
            services,
            state: PageState::Loading,
            timeline: None,
            visits: Vec::new(),
        }
    }

    pub async fn load(&mut self) {
        self.state = PageState::Loading;
        let result = self.services.timelines.get_by_id(CURRENT_PROJECT_ID).await;
        self.state = PageState::settle(&result, "Failed to load timeline");
        let Ok(timeline) = result else {
            return;
        };

        // Visits are supplementary; a failure here leaves the timeline shown
        self.visits = match self.services.site_visits.by_timeline_id(timeline.id).await {
            Ok(visits) => visits,
            Err(e) => {
                warn!("Failed to load visits for timeline {}: {}", timeline.id, e);
                Vec::new()
            }
        };
        self.timeline = Some(timeline);
    }

    pub async fn retry(&mut self) {
        self.load().await
    }

    pub fn phase_counts(&self) -> PhaseCounts {
        match &self.timeline {
            Some(t) => PhaseCounts {
                completed: t.count_phases(PhaseStatus::Completed),
                in_progress: t.count_phases(PhaseStatus::InProgress),
                pending: t.count_phases(PhaseStatus::Pending),
            },
            None => PhaseCounts::default(),
        }
    }

    pub fn days_remaining(&self, now: DateTime<Utc>) -> Option<i64> {
        self.timeline
            .as_ref()
            .map(|t| days_until(t.estimated_completion, now))
    }

    pub fn phase_badges(&self) -> Vec<Badge> {
        self.timeline
            .iter()
            .flat_map(|t| t.phases.iter().map(|p| p.status.badge()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::BadgeVariant;
    use crate::error::{EntityKind, ServiceError, ServiceResult};
    use crate::pages::testing::services;
    use crate::store::EntityService;
    use async_trait::async_trait;
    use chrono::Duration;
    use shared_types::{CreateSiteVisitRequest, CreateTimelineRequest, UpdateSiteVisitRequest};
    use std::sync::Arc;

    fn phase(id: i64, name: &str, status: PhaseStatus) -> Phase {
        Phase {
            id,
            name: name.to_string(),
            phase: name.to_lowercase(),
            status,
            progress: 0,
            start_date: None,
            end_date: None,
            tasks: vec![],
        }
    }

    #[tokio::test]
    async fn test_counts_and_days_remaining() {
        let now = Utc::now();
        let (_store, services) = services();
        services
            .timelines
            .create(CreateTimelineRequest {
                project_id: Some(1),
                overall_progress: 40,
                estimated_completion: now + Duration::days(10) + Duration::hours(2),
                phases: vec![
                    phase(1, "Consultation", PhaseStatus::Completed),
                    phase(2, "Design", PhaseStatus::Completed),
                    phase(3, "Procurement", PhaseStatus::InProgress),
                    phase(4, "Installation", PhaseStatus::Pending),
                ],
                upcoming_milestones: vec![],
            })
            .await
            .unwrap();

        let mut page = TimelinePage::new(services);
        page.load().await;

        assert_eq!(
            page.phase_counts(),
            PhaseCounts {
                completed: 2,
                in_progress: 1,
                pending: 1
            }
        );
        assert_eq!(page.days_remaining(now), Some(11));

        let badges = page.phase_badges();
        assert_eq!(badges[0].variant, BadgeVariant::Success);
        assert_eq!(badges[2].variant, BadgeVariant::Warning);
        assert_eq!(badges[3].variant, BadgeVariant::Default);

        let timeline = page.timeline.as_ref().unwrap();
        assert_eq!(phase_icon(&timeline.phases[2]), "ShoppingCart");
    }

    struct OfflineVisits;

    #[async_trait]
    impl EntityService<SiteVisit> for OfflineVisits {
        async fn get_all(&self) -> ServiceResult<Vec<SiteVisit>> {
            Err(ServiceError::Remote("site visits offline".to_string()))
        }
        async fn get_by_id(&self, _id: i64) -> ServiceResult<SiteVisit> {
            Err(ServiceError::NotFound(EntityKind::SiteVisit))
        }
        async fn create(&self, _request: CreateSiteVisitRequest) -> ServiceResult<SiteVisit> {
            Err(ServiceError::Remote("site visits offline".to_string()))
        }
        async fn update(
            &self,
            _id: i64,
            _update: UpdateSiteVisitRequest,
        ) -> ServiceResult<SiteVisit> {
            Err(ServiceError::Remote("site visits offline".to_string()))
        }
        async fn delete(&self, _id: i64) -> ServiceResult<SiteVisit> {
            Err(ServiceError::Remote("site visits offline".to_string()))
        }
    }

    #[tokio::test]
    async fn test_failed_visits_keep_timeline() {
        let (_store, mut services) = services();
        services
            .timelines
            .create(CreateTimelineRequest {
                project_id: Some(1),
                overall_progress: 10,
                estimated_completion: Utc::now() + Duration::days(30),
                phases: vec![phase(1, "Consultation", PhaseStatus::InProgress)],
                upcoming_milestones: vec![],
            })
            .await
            .unwrap();
        services.site_visits = Arc::new(OfflineVisits);

        let mut page = TimelinePage::new(services);
        page.load().await;

        assert!(page.state.is_ready());
        assert!(page.timeline.is_some());
        assert!(page.visits.is_empty());
    }

    #[tokio::test]
    async fn test_missing_timeline() {
        let (_store, services) = services();
        let mut page = TimelinePage::new(services);
        page.load().await;
        assert_eq!(page.state.error(), Some("Timeline not found"));
        assert_eq!(page.days_remaining(Utc::now()), None);
    }
}
