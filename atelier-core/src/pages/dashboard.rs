use super::{days_until, format_currency, PageState, CURRENT_PROJECT_ID};
use crate::components::{BadgeVariant, CardVariant, StatusCard};
use crate::error::ServiceResult;
use crate::store::{PaymentQueries, Services};
use chrono::{DateTime, Utc};
use shared_types::{PaymentSummary, Project};

pub struct DashboardPage {
    services: Services,
    pub state: PageState,
    pub project: Option<Project>,
    pub payments: PaymentSummary,
}

impl DashboardPage {
    pub fn new(services: Services) -> Self {
        Self {
            services,
            state: PageState::Loading,
            project: None,
            payments: PaymentSummary::default(),
        }
    }

    pub async fn load(&mut self) {
        self.state = PageState::Loading;
        let result = self.fetch().await;
        self.state = PageState::settle(&result, "Failed to load project data");
        if let Ok((project, payments)) = result {
            self.project = Some(project);
            self.payments = payments;
        }
    }

    pub async fn retry(&mut self) {
        self.load().await
    }

    async fn fetch(&self) -> ServiceResult<(Project, PaymentSummary)> {
        futures::try_join!(
            self.services.projects.get_by_id(CURRENT_PROJECT_ID),
            self.services.payments.summary(),
        )
    }

    /// Share of the budget already paid, as a whole percentage
    pub fn budget_used_percent(&self) -> i64 {
        match &self.project {
            Some(project) if project.budget > 0.0 => {
                (self.payments.total_paid / project.budget * 100.0).round() as i64
            }
            _ => 0,
        }
    }

    /// Whole days since the project started, never negative
    pub fn days_active(&self, now: DateTime<Utc>) -> i64 {
        self.project
            .as_ref()
            .and_then(|p| p.start_date)
            .map_or(0, |start| (now - start).num_days().max(0))
    }

    pub fn status_cards(&self, now: DateTime<Utc>) -> Vec<StatusCard> {
        let Some(project) = &self.project else {
            return Vec::new();
        };

        let days_active = self.days_active(now);
        let completion = match project.estimated_completion {
            Some(date) => {
                let weeks = (days_until(date, now).max(0) + 6) / 7;
                format!("Estimated completion in {} weeks", weeks)
            }
            None => "Completion date to be confirmed".to_string(),
        };
        let (progress_label, progress_variant) = if project.progress_percentage >= 100 {
            ("Completed", BadgeVariant::Success)
        } else {
            ("In Progress", BadgeVariant::Warning)
        };

        vec![
            StatusCard::new("Project Status", project.status.as_str(), "Activity")
                .description("Current phase of your project")
                .status("On Track", BadgeVariant::Success)
                .variant(CardVariant::Success),
            StatusCard::new(
                "Budget Used",
                format_currency(self.payments.total_paid),
                "DollarSign",
            )
            .description(format!("of {} total budget", format_currency(project.budget)))
            .status(&format!("{}%", self.budget_used_percent()), BadgeVariant::Info)
            .variant(CardVariant::Primary),
            StatusCard::new("Days Active", days_active.to_string(), "Calendar")
                .description(format!("Project started {} days ago", days_active)),
            StatusCard::new(
                "Completion",
                format!("{}%", project.progress_percentage),
                "TrendingUp",
            )
            .description(completion)
            .status(progress_label, progress_variant)
            .variant(CardVariant::Warning),
        ]
    }
}
