//! Create/edit form for a ticket, with photo upload and point annotation.

use super::file_upload::{FileUpload, SelectedFile, UploadOutcome};
use crate::annotation::{self, DrawCommand, IdAllocator, Surface};
use crate::error::{ServiceError, ServiceResult};
use crate::validation;
use shared_types::{
    Annotation, CreateTicketRequest, Photo, Ticket, TicketPriority, TicketStatus,
    UpdateTicketRequest,
};
use tracing::debug;
use uuid::Uuid;

pub const CATEGORIES: [&str; 6] = [
    "electrical",
    "plumbing",
    "painting",
    "flooring",
    "fixtures",
    "other",
];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TicketForm {
    pub title: String,
    pub description: String,
    pub priority: TicketPriority,
    pub status: TicketStatus,
    pub category: String,
}

#[derive(Debug, Clone)]
pub enum TicketSubmission {
    Create(CreateTicketRequest),
    Update { id: i64, request: UpdateTicketRequest },
}

#[derive(Debug)]
pub struct TicketModal {
    editing: Option<i64>,
    pub form: TicketForm,
    photos: Vec<Photo>,
    selected_photo: Option<i64>,
    is_annotating: bool,
    pending: Option<Annotation>,
    upload: FileUpload,
    ids: IdAllocator,
}

impl Default for TicketModal {
    fn default() -> Self {
        Self::new()
    }
}

impl TicketModal {
    pub fn new() -> Self {
        Self {
            editing: None,
            form: TicketForm::default(),
            photos: Vec::new(),
            selected_photo: None,
            is_annotating: false,
            pending: None,
            upload: FileUpload::default(),
            ids: IdAllocator::from_clock(),
        }
    }

    pub fn edit(ticket: &Ticket) -> Self {
        Self {
            editing: Some(ticket.id),
            form: TicketForm {
                title: ticket.title.clone(),
                description: ticket.description.clone(),
                priority: ticket.priority,
                status: ticket.status,
                category: ticket.category.clone(),
            },
            photos: ticket.photos.clone(),
            ..Self::new()
        }
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    pub fn photos(&self) -> &[Photo] {
        &self.photos
    }

    pub fn selected_photo(&self) -> Option<&Photo> {
        let id = self.selected_photo?;
        self.photos.iter().find(|p| p.id == id)
    }

    pub fn is_annotating(&self) -> bool {
        self.is_annotating
    }

    pub fn pending(&self) -> Option<&Annotation> {
        self.pending.as_ref()
    }

    /// Adds every accepted image as a photo with a local `blob:` url
    pub fn upload(&mut self, files: Vec<SelectedFile>) -> UploadOutcome {
        let outcome = self.upload.select(files);
        for file in &outcome.accepted {
            self.photos.push(Photo {
                id: self.ids.next_id(),
                name: file.name.clone(),
                url: format!("blob:{}", Uuid::new_v4()),
                annotations: Vec::new(),
            });
        }
        debug!("{} photos uploaded", outcome.accepted.len());
        outcome
    }

    /// Removing the selected photo also clears the selection and leaves
    /// annotation mode.
    pub fn remove_photo(&mut self, photo_id: i64) -> bool {
        let before = self.photos.len();
        self.photos.retain(|p| p.id != photo_id);

        if self.selected_photo == Some(photo_id) {
            self.selected_photo = None;
            self.is_annotating = false;
            self.pending = None;
        }
        self.photos.len() != before
    }

    pub fn select_photo(&mut self, photo_id: i64) -> bool {
        if !self.photos.iter().any(|p| p.id == photo_id) {
            return false;
        }
        self.selected_photo = Some(photo_id);
        self.is_annotating = false;
        self.pending = None;
        true
    }

    pub fn start_annotation(&mut self) -> ServiceResult<()> {
        if self.selected_photo().is_none() {
            return Err(ServiceError::validation(
                "photo",
                "Please select a photo to annotate",
            ));
        }
        self.is_annotating = true;
        self.pending = None;
        Ok(())
    }

    /// Places the pending marker at a click on `surface`. Ignored outside
    /// annotation mode.
    pub fn click(&mut self, px: f64, py: f64, surface: &Surface) -> Option<&Annotation> {
        if !self.is_annotating {
            return None;
        }
        let (x, y) = surface.normalize(px, py);
        self.pending = Some(Annotation {
            id: self.ids.next_id(),
            x,
            y,
            text: String::new(),
            is_editing: true,
        });
        self.pending.as_ref()
    }

    pub fn save_annotation(&mut self, text: &str) -> ServiceResult<()> {
        validation::validate_annotation_text(text)?;
        let Some(mut annotation) = self.pending.take() else {
            return Err(ServiceError::validation(
                "position",
                "Click on the photo to place the note",
            ));
        };

        let Some(photo) = self
            .selected_photo
            .and_then(|id| self.photos.iter_mut().find(|p| p.id == id))
        else {
            return Err(ServiceError::validation(
                "photo",
                "Please select a photo to annotate",
            ));
        };

        annotation.text = text.trim().to_string();
        annotation.is_editing = false;
        photo.annotations.push(annotation);
        self.is_annotating = false;
        Ok(())
    }

    pub fn cancel_annotation(&mut self) {
        self.pending = None;
        self.is_annotating = false;
    }

    pub fn render(&self, surface: &Surface) -> Vec<DrawCommand> {
        match self.selected_photo() {
            Some(photo) => annotation::render(photo, self.pending.as_ref(), surface),
            None => Vec::new(),
        }
    }

    pub fn submit(&self) -> ServiceResult<TicketSubmission> {
        validation::validate_ticket(&self.form.title, &self.form.description)?;

        let form = self.form.clone();
        Ok(match self.editing {
            None => TicketSubmission::Create(CreateTicketRequest {
                title: form.title,
                description: form.description,
                priority: form.priority,
                status: Some(form.status),
                category: form.category,
                photos: self.photos.clone(),
                assigned_to: None,
            }),
            Some(id) => TicketSubmission::Update {
                id,
                request: UpdateTicketRequest {
                    title: Some(form.title),
                    description: Some(form.description),
                    priority: Some(form.priority),
                    status: Some(form.status),
                    category: Some(form.category),
                    photos: Some(self.photos.clone()),
                    assigned_to: None,
                },
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn modal_with_photo() -> (TicketModal, i64) {
        let mut modal = TicketModal::new();
        modal.upload(vec![SelectedFile::new("wall.jpg", "image/jpeg", 1024)]);
        let id = modal.photos()[0].id;
        assert!(modal.select_photo(id));
        (modal, id)
    }

    fn marker_positions(commands: &[DrawCommand]) -> Vec<(f64, f64)> {
        commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Marker { x, y, .. } => Some((*x, *y)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_upload_creates_blob_photos() {
        let mut modal = TicketModal::new();
        let outcome = modal.upload(vec![
            SelectedFile::new("a.png", "image/png", 10),
            SelectedFile::new("b.txt", "text/plain", 10),
        ]);

        assert_eq!(outcome.rejected.len(), 1);
        assert_eq!(modal.photos().len(), 1);
        assert!(modal.photos()[0].url.starts_with("blob:"));
    }

    #[test]
    fn test_click_outside_annotation_mode_is_ignored() {
        let (mut modal, _) = modal_with_photo();
        assert!(modal.click(10.0, 10.0, &Surface::default()).is_none());
        assert!(modal.pending().is_none());
    }

    #[test]
    fn test_start_annotation_requires_selection() {
        let mut modal = TicketModal::new();
        let err = modal.start_annotation().unwrap_err();
        assert_eq!(err.to_string(), "Please select a photo to annotate");
        assert!(!modal.is_annotating());
    }

    #[test]
    fn test_annotation_survives_resize() {
        let (mut modal, _) = modal_with_photo();
        let small = Surface::new(400.0, 320.0);

        modal.start_annotation().unwrap();
        modal.click(100.0, 160.0, &small);
        modal.save_annotation("  Crack here  ").unwrap();

        modal.start_annotation().unwrap();
        modal.click(300.0, 80.0, &small);
        modal.save_annotation("Scuff").unwrap();

        let photo = modal.selected_photo().unwrap();
        assert_eq!(photo.annotations[0].text, "Crack here");
        assert!(!photo.annotations[0].is_editing);

        let large = Surface::new(800.0, 640.0);
        let positions = marker_positions(&modal.render(&large));
        assert_eq!(positions, vec![(200.0, 320.0), (600.0, 160.0)]);
    }

    #[test]
    fn test_blank_annotation_is_rejected() {
        let (mut modal, _) = modal_with_photo();
        modal.start_annotation().unwrap();
        modal.click(50.0, 50.0, &Surface::default());

        assert!(modal.save_annotation("   ").unwrap_err().is_validation());
        assert!(modal.selected_photo().unwrap().annotations.is_empty());
        assert!(modal.pending().is_some());
        assert!(modal.is_annotating());
    }

    #[test]
    fn test_removing_selected_photo_resets_annotation_state() {
        let (mut modal, id) = modal_with_photo();
        modal.start_annotation().unwrap();
        modal.click(50.0, 50.0, &Surface::default());

        assert!(modal.remove_photo(id));
        assert!(modal.selected_photo().is_none());
        assert!(!modal.is_annotating());
        assert!(modal.render(&Surface::default()).is_empty());
    }

    #[test]
    fn test_pending_marker_drawn_last_without_label() {
        let (mut modal, _) = modal_with_photo();
        modal.start_annotation().unwrap();
        modal.click(200.0, 160.0, &Surface::default());

        let commands = modal.render(&Surface::default());
        match commands.last() {
            Some(DrawCommand::Marker { color, label, .. }) => {
                assert_eq!(*color, annotation::PENDING_MARKER_COLOR);
                assert!(label.is_none());
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_submit_validates_and_builds_requests() {
        let mut modal = TicketModal::new();
        assert_eq!(
            modal.submit().unwrap_err().to_string(),
            "Please enter a ticket title"
        );

        modal.form.title = "Leaky faucet".to_string();
        modal.form.description = "Kitchen sink drips".to_string();
        modal.form.priority = TicketPriority::High;
        match modal.submit().unwrap() {
            TicketSubmission::Create(request) => {
                assert_eq!(request.priority, TicketPriority::High);
                assert_eq!(request.status, Some(TicketStatus::Open));
            }
            other => panic!("expected create, got {:?}", other),
        }
    }
}
