//! Read-side queries layered over the CRUD contract. They work against any
//! adapter since they only need `get_all`.

use super::EntityService;
use crate::error::ServiceResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shared_types::{Payment, PaymentSummary, SiteVisit, SiteVisitStatus};

/// Visits strictly after `now`, excluding cancelled ones, soonest first
pub fn upcoming(visits: &[SiteVisit], limit: usize, now: DateTime<Utc>) -> Vec<SiteVisit> {
    let mut upcoming: Vec<SiteVisit> = visits
        .iter()
        .filter(|visit| visit.date > now && visit.status != SiteVisitStatus::Cancelled)
        .cloned()
        .collect();
    upcoming.sort_by_key(|visit| visit.date);
    upcoming.truncate(limit);
    upcoming
}

/// Visits whose start falls inside `[start, end]`
pub fn in_range(visits: &[SiteVisit], start: DateTime<Utc>, end: DateTime<Utc>) -> Vec<SiteVisit> {
    visits
        .iter()
        .filter(|visit| visit.date >= start && visit.date <= end)
        .cloned()
        .collect()
}

#[async_trait]
pub trait SiteVisitQueries {
    async fn upcoming(&self, limit: usize, now: DateTime<Utc>) -> ServiceResult<Vec<SiteVisit>>;
    async fn by_date_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> ServiceResult<Vec<SiteVisit>>;
    async fn by_timeline_id(&self, timeline_id: i64) -> ServiceResult<Vec<SiteVisit>>;
}

#[async_trait]
impl<S> SiteVisitQueries for S
where
    S: EntityService<SiteVisit> + ?Sized,
{
    async fn upcoming(&self, limit: usize, now: DateTime<Utc>) -> ServiceResult<Vec<SiteVisit>> {
        let visits = self.get_all().await?;
        Ok(upcoming(&visits, limit, now))
    }

    async fn by_date_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> ServiceResult<Vec<SiteVisit>> {
        let visits = self.get_all().await?;
        Ok(in_range(&visits, start, end))
    }

    async fn by_timeline_id(&self, timeline_id: i64) -> ServiceResult<Vec<SiteVisit>> {
        let visits = self.get_all().await?;
        Ok(visits
            .into_iter()
            .filter(|visit| visit.timeline_id == Some(timeline_id))
            .collect())
    }
}

#[async_trait]
pub trait PaymentQueries {
    async fn summary(&self) -> ServiceResult<PaymentSummary>;
}

#[async_trait]
impl<S> PaymentQueries for S
where
    S: EntityService<Payment> + ?Sized,
{
    async fn summary(&self) -> ServiceResult<PaymentSummary> {
        let payments = self.get_all().await?;
        Ok(PaymentSummary::from_payments(&payments))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{Latency, MemoryService};
    use chrono::{Duration, TimeZone};

    fn visit(id: i64, date: DateTime<Utc>, status: SiteVisitStatus) -> SiteVisit {
        SiteVisit {
            id,
            title: format!("Visit {}", id),
            description: String::new(),
            date,
            end_date: date + Duration::hours(2),
            status,
            phase: "design".to_string(),
            attendees: vec![],
            timeline_id: Some(1),
            created_at: date,
        }
    }

    #[test]
    fn test_upcoming_skips_past_and_cancelled() {
        let now = Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap();
        let visits = vec![
            visit(1, now + Duration::days(3), SiteVisitStatus::Scheduled),
            visit(2, now - Duration::days(1), SiteVisitStatus::Confirmed),
            visit(3, now + Duration::days(1), SiteVisitStatus::Cancelled),
            visit(4, now + Duration::days(2), SiteVisitStatus::Confirmed),
            visit(5, now, SiteVisitStatus::Scheduled),
        ];

        let ids: Vec<i64> = upcoming(&visits, 5, now).iter().map(|v| v.id).collect();
        assert_eq!(ids, vec![4, 1]);

        let limited = upcoming(&visits, 1, now);
        assert_eq!(limited.len(), 1);
        assert_eq!(limited[0].id, 4);
    }

    #[test]
    fn test_range_is_inclusive() {
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 3, 31, 23, 59, 59).unwrap();
        let visits = vec![
            visit(1, start, SiteVisitStatus::Scheduled),
            visit(2, end, SiteVisitStatus::Scheduled),
            visit(3, end + Duration::seconds(1), SiteVisitStatus::Scheduled),
        ];

        let ids: Vec<i64> = in_range(&visits, start, end).iter().map(|v| v.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_queries_through_service() {
        let now = Utc::now();
        let mut other = visit(2, now + Duration::days(1), SiteVisitStatus::Scheduled);
        other.timeline_id = Some(7);
        let service = MemoryService::from_items(
            vec![visit(1, now + Duration::days(2), SiteVisitStatus::Scheduled), other],
            Latency::none(),
        );

        let for_timeline = service.by_timeline_id(7).await.unwrap();
        assert_eq!(for_timeline.len(), 1);
        assert_eq!(for_timeline[0].id, 2);

        let soonest = service.upcoming(1, now).await.unwrap();
        assert_eq!(soonest[0].id, 2);
    }
}
