use super::{Notice, PageState};
use crate::components::ColorPalette;
use crate::error::{EntityKind, ServiceError, ServiceResult};
use crate::store::Services;
use crate::validation;
use chrono::Utc;
use shared_types::{Proposal, ProposalComment, ProposalStatus, UpdateProposalRequest};

pub struct ProposalsPage {
    services: Services,
    pub state: PageState,
    pub notice: Option<Notice>,
    pub proposals: Vec<Proposal>,
    /// Proposal open in the 3D preview
    selected: Option<i64>,
    pub show_comments: bool,
}

impl ProposalsPage {
    pub fn new(services: Services) -> Self {
        Self {
            services,
            state: PageState::Loading,
            notice: None,
            proposals: Vec::new(),
            selected: None,
            show_comments: false,
        }
    }

    pub async fn load(&mut self) {
        self.state = PageState::Loading;
        let result = self.services.proposals.get_all().await;
        self.state = PageState::settle(&result, "Failed to load proposals");
        if let Ok(proposals) = result {
            self.proposals = proposals;
        }
    }

    pub async fn retry(&mut self) {
        self.load().await
    }

    pub fn selected(&self) -> Option<&Proposal> {
        let id = self.selected?;
        self.proposals.iter().find(|p| p.id == id)
    }

    /// Opens the preview for `id`, or closes it when it is already open
    pub fn toggle_preview(&mut self, id: i64) {
        if self.selected == Some(id) {
            self.selected = None;
        } else if self.proposals.iter().any(|p| p.id == id) {
            self.selected = Some(id);
            self.notice = Some(Notice::info("Opening 3D preview..."));
        }
    }

    pub fn palette(&self, id: i64) -> Option<ColorPalette> {
        self.proposals
            .iter()
            .find(|p| p.id == id)
            .map(|p| ColorPalette::new(p.color_palette.clone()))
    }

    pub async fn approve(&mut self, id: i64) -> ServiceResult<Proposal> {
        let update = UpdateProposalRequest {
            status: Some(ProposalStatus::Approved),
            approval_date: Some(Utc::now()),
            ..Default::default()
        };
        let result = self.services.proposals.update(id, update).await;
        self.finish(result, "Proposal approved successfully!", "Failed to approve proposal")
            .await
    }

    pub async fn reject(&mut self, id: i64) -> ServiceResult<Proposal> {
        let update = UpdateProposalRequest {
            status: Some(ProposalStatus::Rejected),
            ..Default::default()
        };
        let result = self.services.proposals.update(id, update).await;
        self.finish(result, "Proposal status updated", "Failed to update proposal")
            .await
    }

    /// Appends a feedback comment authored by the client
    pub async fn add_comment(&mut self, id: i64, content: &str) -> ServiceResult<Proposal> {
        let result = match self.with_comment(id, content) {
            Ok(update) => self.services.proposals.update(id, update).await,
            Err(err) => Err(err),
        };
        self.finish(result, "Comment added successfully", "Failed to add comment")
            .await
    }

    fn with_comment(&self, id: i64, content: &str) -> ServiceResult<UpdateProposalRequest> {
        validation::validate_comment(content)?;
        let Some(proposal) = self.proposals.iter().find(|p| p.id == id) else {
            return Err(ServiceError::NotFound(EntityKind::Proposal));
        };

        let now = Utc::now();
        let mut comments = proposal.comments.clone();
        comments.push(ProposalComment {
            id: now.timestamp_millis(),
            content: content.trim().to_string(),
            author: "You".to_string(),
            timestamp: now,
            kind: "feedback".to_string(),
        });

        Ok(UpdateProposalRequest {
            comments: Some(comments),
            ..Default::default()
        })
    }

    async fn finish(
        &mut self,
        result: ServiceResult<Proposal>,
        success: &str,
        failure: &str,
    ) -> ServiceResult<Proposal> {
        self.notice = Some(Notice::outcome(&result, success, failure));
        if result.is_ok() {
            self.load().await;
        }
        result
    }
}
