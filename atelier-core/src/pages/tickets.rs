use super::{Notice, PageState};
use crate::components::{Badge, TicketModal, TicketSubmission, ToBadge};
use crate::error::{EntityKind, ServiceError, ServiceResult};
use crate::listing::{self, TicketFilter, TicketSort};
use crate::store::Services;
use crate::validation;
use shared_types::{CreateTicketRequest, Ticket, TicketStatus, UpdateTicketRequest};
use tracing::info;

pub struct TicketsPage {
    services: Services,
    pub state: PageState,
    pub notice: Option<Notice>,
    pub tickets: Vec<Ticket>,
    pub filter: TicketFilter,
    pub sort: TicketSort,
    /// Open create/edit dialog
    pub modal: Option<TicketModal>,
}

impl TicketsPage {
    pub fn new(services: Services) -> Self {
        Self {
            services,
            state: PageState::Loading,
            notice: None,
            tickets: Vec::new(),
            filter: TicketFilter::default(),
            sort: TicketSort::default(),
            modal: None,
        }
    }

    pub async fn load(&mut self) {
        self.state = PageState::Loading;
        let result = self.services.tickets.get_all().await;
        self.state = PageState::settle(&result, "Failed to load tickets");
        if let Ok(tickets) = result {
            self.tickets = tickets;
        }
    }

    pub async fn retry(&mut self) {
        self.load().await
    }

    /// Tickets passing the current filter, in the current sort order
    pub fn visible(&self) -> Vec<Ticket> {
        listing::filter_tickets(&self.tickets, &self.filter, self.sort)
    }

    pub fn categories(&self) -> Vec<String> {
        listing::ticket_categories(&self.tickets)
    }

    pub fn badges(ticket: &Ticket) -> (Badge, Badge) {
        (ticket.priority.badge(), ticket.status.badge())
    }

    pub fn open_create(&mut self) -> &mut TicketModal {
        self.modal.insert(TicketModal::new())
    }

    pub fn open_edit(&mut self, id: i64) -> ServiceResult<&mut TicketModal> {
        let ticket = self
            .tickets
            .iter()
            .find(|t| t.id == id)
            .ok_or(ServiceError::NotFound(EntityKind::Ticket))?;
        Ok(self.modal.insert(TicketModal::edit(ticket)))
    }

    pub fn close_modal(&mut self) {
        self.modal = None;
    }

    /// Submits the open dialog; it closes only when the save succeeds.
    pub async fn submit_modal(&mut self) -> ServiceResult<Ticket> {
        let submission = match &self.modal {
            Some(modal) => modal.submit(),
            None => {
                return Err(ServiceError::validation("ticket", "No ticket form is open"));
            }
        };
        let result = match submission {
            Ok(TicketSubmission::Create(request)) => self.create(request).await,
            Ok(TicketSubmission::Update { id, request }) => self.edit(id, request).await,
            Err(err) => {
                self.notice = Some(Notice::error(err.to_string()));
                Err(err)
            }
        };
        if result.is_ok() {
            self.modal = None;
        }
        result
    }

    pub async fn create(&mut self, request: CreateTicketRequest) -> ServiceResult<Ticket> {
        let result = match validation::validate_ticket_request(&request) {
            Ok(()) => self.services.tickets.create(request).await,
            Err(err) => Err(err),
        };
        if let Ok(ticket) = &result {
            info!("Created ticket {}: {}", ticket.id, ticket.title);
        }
        self.finish(result, "Ticket created successfully!", "Failed to create ticket")
            .await
    }

    pub async fn edit(&mut self, id: i64, request: UpdateTicketRequest) -> ServiceResult<Ticket> {
        let result = self.services.tickets.update(id, request).await;
        self.finish(result, "Ticket updated successfully!", "Failed to update ticket")
            .await
    }

    pub async fn change_status(&mut self, id: i64, status: TicketStatus) -> ServiceResult<Ticket> {
        let update = UpdateTicketRequest {
            status: Some(status),
            ..Default::default()
        };
        let result = self.services.tickets.update(id, update).await;
        let success = format!("Ticket status changed to {}", status.as_str().replace('-', " "));
        self.finish(result, &success, "Failed to update ticket status")
            .await
    }

    pub async fn delete(&mut self, id: i64) -> ServiceResult<Ticket> {
        let result = self.services.tickets.delete(id).await;
        self.finish(result, "Ticket deleted successfully!", "Failed to delete ticket")
            .await
    }

    async fn finish(
        &mut self,
        result: ServiceResult<Ticket>,
        success: &str,
        failure: &str,
    ) -> ServiceResult<Ticket> {
        self.notice = Some(Notice::outcome(&result, success, failure));
        if result.is_ok() {
            self.load().await;
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::BadgeVariant;
    use crate::pages::NoticeLevel;
    use crate::pages::testing::services;
    use shared_types::TicketPriority;

    fn request(title: &str, priority: TicketPriority, category: &str) -> CreateTicketRequest {
        CreateTicketRequest {
            title: title.to_string(),
            description: format!("{} needs attention", title),
            priority,
            status: None,
            category: category.to_string(),
            photos: vec![],
            assigned_to: None,
        }
    }

    async fn page() -> TicketsPage {
        let (_store, services) = services();
        let mut page = TicketsPage::new(services);
        page.load().await;
        page
    }

    #[tokio::test]
    async fn test_create_filter_and_sort() {
        let mut page = page().await;
        page.create(request("Loose outlet", TicketPriority::Low, "electrical"))
            .await
            .unwrap();
        page.create(request("Burst pipe", TicketPriority::Critical, "plumbing"))
            .await
            .unwrap();
        page.create(request("Flickering light", TicketPriority::High, "electrical"))
            .await
            .unwrap();
        assert_eq!(page.tickets.len(), 3);
        assert_eq!(page.notice, Some(Notice::success("Ticket created successfully!")));

        page.sort = TicketSort::Priority;
        let titles: Vec<String> = page.visible().into_iter().map(|t| t.title).collect();
        assert_eq!(titles, vec!["Burst pipe", "Flickering light", "Loose outlet"]);

        page.filter.category = Some("electrical".to_string());
        page.filter.search = "LIGHT".to_string();
        let visible = page.visible();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].title, "Flickering light");

        assert_eq!(page.categories(), vec!["electrical", "plumbing"]);
    }

    #[tokio::test]
    async fn test_invalid_ticket_is_not_created() {
        let mut page = page().await;
        let err = page
            .create(request("  ", TicketPriority::Medium, "other"))
            .await
            .unwrap_err();

        assert!(err.is_validation());
        assert!(page.tickets.is_empty());
        assert_eq!(page.notice, Some(Notice::error("Please enter a ticket title")));
    }

    #[tokio::test]
    async fn test_status_change_and_delete() {
        let mut page = page().await;
        let ticket = page
            .create(request("Chipped tile", TicketPriority::Medium, "flooring"))
            .await
            .unwrap();

        page.change_status(ticket.id, TicketStatus::InProgress)
            .await
            .unwrap();
        assert_eq!(page.tickets[0].status, TicketStatus::InProgress);
        assert_eq!(
            page.notice,
            Some(Notice::success("Ticket status changed to in progress"))
        );

        let (priority, status) = TicketsPage::badges(&page.tickets[0]);
        assert_eq!(priority.variant, BadgeVariant::Info);
        assert_eq!(status.label, "IN PROGRESS");

        page.delete(ticket.id).await.unwrap();
        assert!(page.tickets.is_empty());

        assert!(page.delete(ticket.id).await.unwrap_err().is_not_found());
        assert_eq!(page.notice, Some(Notice::error("Failed to delete ticket")));
    }

    #[tokio::test]
    async fn test_new_ticket_badges_follow_status() {
        let mut page = page().await;
        let created = page
            .create(CreateTicketRequest {
                title: "Leaky faucet".to_string(),
                description: "Kitchen sink drips".to_string(),
                priority: TicketPriority::High,
                status: None,
                category: "plumbing".to_string(),
                photos: vec![],
                assigned_to: None,
            })
            .await
            .unwrap();

        let listed = page
            .visible()
            .into_iter()
            .find(|t| t.title == "Leaky faucet")
            .unwrap();
        assert_eq!(listed.id, created.id);
        let (priority, status) = TicketsPage::badges(&listed);
        assert_eq!(priority.label, "HIGH");
        assert_eq!(status.label, "OPEN");

        page.change_status(created.id, TicketStatus::Resolved)
            .await
            .unwrap();
        let listed = page
            .visible()
            .into_iter()
            .find(|t| t.title == "Leaky faucet")
            .unwrap();
        assert_eq!(listed.id, created.id);
        assert_eq!(TicketsPage::badges(&listed).1.label, "RESOLVED");
    }

    #[tokio::test]
    async fn test_modal_round_trip() {
        let mut page = page().await;

        let modal = page.open_create();
        modal.form.title = "Scratched door".to_string();
        modal.form.description = "Deep scratch on the pantry door".to_string();
        let created = page.submit_modal().await.unwrap();
        assert!(page.modal.is_none());

        let modal = page.open_edit(created.id).unwrap();
        assert!(modal.is_editing());
        modal.form.priority = TicketPriority::High;
        page.submit_modal().await.unwrap();
        assert_eq!(page.tickets[0].priority, TicketPriority::High);
        assert_eq!(page.notice.as_ref().unwrap().level, NoticeLevel::Success);

        let modal = page.open_create();
        modal.form.title = "No description".to_string();
        assert!(page.submit_modal().await.is_err());
        assert!(page.modal.is_some());
    }
}
