use super::{Notice, PageState, CURRENT_PROJECT_ID};
use crate::calendar::{self, CalendarDay};
use crate::error::{ServiceError, ServiceResult};
use crate::store::{queries, Services};
use crate::validation;
use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Utc};
use serde::Serialize;
use shared_types::{
    CreateSiteVisitRequest, SiteVisit, SiteVisitStatus, Timeline, UpdateSiteVisitRequest,
};
use tracing::info;

const DEFAULT_DURATION_HOURS: u32 = 2;

/// Inputs of the "schedule a visit" dialog
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleForm {
    pub title: String,
    pub description: String,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub duration_hours: u32,
    pub phase: String,
    pub attendees: Vec<String>,
}

impl Default for ScheduleForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            date: None,
            time: None,
            duration_hours: DEFAULT_DURATION_HOURS,
            phase: String::new(),
            attendees: vec!["client".to_string(), "designer".to_string()],
        }
    }
}

impl ScheduleForm {
    /// Form opened from a day cell, defaulting to 10:00
    pub fn for_date(date: NaiveDate) -> Self {
        Self {
            date: Some(date),
            time: NaiveTime::from_hms_opt(10, 0, 0),
            ..Self::default()
        }
    }

    /// Start is the chosen date and time in UTC; end is start plus the
    /// duration.
    pub fn to_request(&self) -> ServiceResult<CreateSiteVisitRequest> {
        let (Some(date), Some(time)) = (self.date, self.time) else {
            return Err(ServiceError::validation(
                "date",
                "Please choose a date and time",
            ));
        };
        let start = date.and_time(time).and_utc();

        let request = CreateSiteVisitRequest {
            title: self.title.trim().to_string(),
            description: self.description.clone(),
            date: start,
            end_date: start + Duration::hours(i64::from(self.duration_hours)),
            status: Some(SiteVisitStatus::Scheduled),
            phase: self.phase.clone(),
            attendees: self.attendees.clone(),
            timeline_id: None,
        };
        validation::validate_site_visit(&request)?;
        Ok(request)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CalendarCell {
    #[serde(flatten)]
    pub day: CalendarDay,
    pub visits: Vec<SiteVisit>,
}

pub struct CalendarPage {
    services: Services,
    pub state: PageState,
    pub notice: Option<Notice>,
    pub year: i32,
    pub month: u32,
    pub visits: Vec<SiteVisit>,
    /// Source of the phase choices in the schedule form
    pub timeline: Option<Timeline>,
}

impl CalendarPage {
    pub fn new(services: Services, today: NaiveDate) -> Self {
        Self {
            services,
            state: PageState::Loading,
            notice: None,
            year: today.year(),
            month: today.month(),
            visits: Vec::new(),
            timeline: None,
        }
    }

    pub async fn load(&mut self) {
        self.state = PageState::Loading;
        let result = futures::try_join!(
            self.services.site_visits.get_all(),
            self.services.timelines.get_by_id(CURRENT_PROJECT_ID),
        );
        self.state = PageState::settle(&result, "Failed to load calendar data");
        if let Ok((visits, timeline)) = result {
            self.visits = visits;
            self.timeline = Some(timeline);
        }
    }

    pub async fn retry(&mut self) {
        self.load().await
    }

    pub fn title(&self) -> String {
        calendar::month_title(self.year, self.month).unwrap_or_default()
    }

    pub fn next_month(&mut self) {
        (self.year, self.month) = calendar::shift_month(self.year, self.month, 1);
    }

    pub fn prev_month(&mut self) {
        (self.year, self.month) = calendar::shift_month(self.year, self.month, -1);
    }

    pub fn visits_on(&self, date: NaiveDate) -> Vec<SiteVisit> {
        self.visits
            .iter()
            .filter(|v| v.date.date_naive() == date)
            .cloned()
            .collect()
    }

    /// The 42-cell grid for the current month with each day's visits
    pub fn month_grid(&self, today: NaiveDate) -> Vec<CalendarCell> {
        calendar::month_grid(self.year, self.month, today)
            .unwrap_or_default()
            .into_iter()
            .map(|day| CalendarCell {
                visits: self.visits_on(day.date),
                day,
            })
            .collect()
    }

    pub fn upcoming(&self, limit: usize, now: DateTime<Utc>) -> Vec<SiteVisit> {
        queries::upcoming(&self.visits, limit, now)
    }

    pub fn phase_options(&self) -> Vec<String> {
        self.timeline
            .iter()
            .flat_map(|t| t.phases.iter().map(|p| p.phase.clone()))
            .collect()
    }

    pub async fn schedule_visit(&mut self, form: &ScheduleForm) -> ServiceResult<SiteVisit> {
        let result = match form.to_request() {
            Ok(mut request) => {
                request.timeline_id = self.timeline.as_ref().map(|t| t.id);
                self.services.site_visits.create(request).await
            }
            Err(err) => Err(err),
        };
        self.finish(result, "Site visit scheduled successfully!", "Failed to schedule site visit")
            .await
    }

    pub async fn update_visit_status(
        &mut self,
        id: i64,
        status: SiteVisitStatus,
    ) -> ServiceResult<SiteVisit> {
        let update = UpdateSiteVisitRequest {
            status: Some(status),
            ..Default::default()
        };
        let result = self.services.site_visits.update(id, update).await;
        self.finish(result, &format!("Visit {} successfully!", status), "Failed to update visit")
            .await
    }

    async fn finish(
        &mut self,
        result: ServiceResult<SiteVisit>,
        success: &str,
        failure: &str,
    ) -> ServiceResult<SiteVisit> {
        self.notice = Some(match &result {
            Ok(visit) => {
                info!("Site visit {} is {}", visit.id, visit.status);
                Notice::success(success)
            }
            Err(err) => {
                let message = err.to_string();
                Notice::error(if message.is_empty() { failure.to_string() } else { message })
            }
        });
        if result.is_ok() {
            self.load().await;
        }
        result
    }
}
