use crate::error::{ServiceError, ServiceResult};
use chrono::{DateTime, Utc};
use shared_types::{CreateSiteVisitRequest, CreateTicketRequest, MessageAttachment};

pub fn validate_ticket(title: &str, description: &str) -> ServiceResult<()> {
    validate_required("title", title, "Please enter a ticket title")?;
    validate_required("description", description, "Please enter a ticket description")?;
    Ok(())
}

/// Title and description, plus every photo annotation inside the photo
pub fn validate_ticket_request(request: &CreateTicketRequest) -> ServiceResult<()> {
    validate_ticket(&request.title, &request.description)?;
    request
        .photos
        .iter()
        .flat_map(|photo| &photo.annotations)
        .try_for_each(|annotation| validate_normalized(annotation.x, annotation.y))
}

pub fn validate_annotation_text(text: &str) -> ServiceResult<()> {
    validate_required("text", text, "Please enter annotation text")
}

pub fn validate_normalized(x: f64, y: f64) -> ServiceResult<()> {
    let in_unit = |v: f64| v.is_finite() && (0.0..=1.0).contains(&v);
    if !in_unit(x) || !in_unit(y) {
        return Err(ServiceError::validation(
            "position",
            format!("Annotation position ({}, {}) is outside the photo", x, y),
        ));
    }
    Ok(())
}

pub fn validate_site_visit(request: &CreateSiteVisitRequest) -> ServiceResult<()> {
    validate_required("title", &request.title, "Please enter a visit title")?;
    validate_visit_window(request.date, request.end_date)
}

fn validate_visit_window(start: DateTime<Utc>, end: DateTime<Utc>) -> ServiceResult<()> {
    if end < start {
        return Err(ServiceError::validation(
            "end_date",
            "Visit must end after it starts",
        ));
    }
    Ok(())
}

/// A message needs text or at least one attachment
pub fn validate_message(content: &str, attachments: &[MessageAttachment]) -> ServiceResult<()> {
    if content.trim().is_empty() && attachments.is_empty() {
        return Err(ServiceError::validation(
            "content",
            "Please enter a message or attach a file",
        ));
    }
    Ok(())
}

pub fn validate_comment(content: &str) -> ServiceResult<()> {
    validate_required("content", content, "Please enter a comment")
}

fn validate_required(field: &'static str, value: &str, message: &str) -> ServiceResult<()> {
    if value.trim().is_empty() {
        return Err(ServiceError::validation(field, message));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use shared_types::{Annotation, Photo};

    #[test]
    fn test_ticket_requires_title_then_description() {
        let err = validate_ticket("  ", "").unwrap_err();
        assert_eq!(err.to_string(), "Please enter a ticket title");

        let err = validate_ticket("Leaky faucet", "\t").unwrap_err();
        assert_eq!(err.to_string(), "Please enter a ticket description");

        assert!(validate_ticket("Leaky faucet", "Kitchen sink drips").is_ok());
    }

    #[test]
    fn test_normalized_bounds() {
        assert!(validate_normalized(0.0, 1.0).is_ok());
        assert!(validate_normalized(1.01, 0.5).is_err());
        assert!(validate_normalized(f64::NAN, 0.5).is_err());
    }

    #[test]
    fn test_ticket_request_checks_annotation_positions() {
        let annotation = |x: f64, y: f64| Annotation {
            id: 1,
            x,
            y,
            text: "Crack".to_string(),
            is_editing: false,
        };
        let mut request = CreateTicketRequest {
            title: "Cracked tile".to_string(),
            description: "Entry tile".to_string(),
            priority: Default::default(),
            status: None,
            category: String::new(),
            photos: vec![Photo {
                id: 1,
                name: "tile.jpg".to_string(),
                url: "blob:1".to_string(),
                annotations: vec![annotation(0.25, 0.75)],
            }],
            assigned_to: None,
        };
        assert!(validate_ticket_request(&request).is_ok());

        request.photos[0].annotations.push(annotation(1.5, 0.2));
        let err = validate_ticket_request(&request).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_visit_must_not_end_before_start() {
        let start = Utc::now();
        let request = CreateSiteVisitRequest {
            title: "Kitchen measure".to_string(),
            description: String::new(),
            date: start,
            end_date: start - Duration::hours(1),
            status: None,
            phase: String::new(),
            attendees: vec![],
            timeline_id: None,
        };
        assert!(validate_site_visit(&request).unwrap_err().is_validation());
    }

    #[test]
    fn test_message_with_only_attachment_is_valid() {
        let attachment = MessageAttachment {
            name: "plan.pdf".to_string(),
            mime_type: "application/pdf".to_string(),
            url: "blob:1".to_string(),
        };
        assert!(validate_message("   ", &[]).is_err());
        assert!(validate_message("", &[attachment]).is_ok());
    }
}
