use shared_types::*;
use std::fs;
use std::path::Path;
use ts_rs::TS;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Generate TypeScript definitions for API types
    let mut types = Vec::new();

    // Ticket types
    types.push(clean_type(Annotation::export_to_string()?));
    types.push(clean_type(Photo::export_to_string()?));
    types.push(clean_type(Ticket::export_to_string()?));
    types.push(clean_type(TicketPriority::export_to_string()?));
    types.push(clean_type(TicketStatus::export_to_string()?));
    types.push(clean_type(CreateTicketRequest::export_to_string()?));
    types.push(clean_type(UpdateTicketRequest::export_to_string()?));
    types.push(clean_type(TicketsResponse::export_to_string()?));

    // Proposal types
    types.push(clean_type(Proposal::export_to_string()?));
    types.push(clean_type(ProposalStatus::export_to_string()?));
    types.push(clean_type(FurnitureItem::export_to_string()?));
    types.push(clean_type(ProposalComment::export_to_string()?));
    types.push(clean_type(CreateProposalRequest::export_to_string()?));
    types.push(clean_type(UpdateProposalRequest::export_to_string()?));
    types.push(clean_type(ProposalsResponse::export_to_string()?));

    // Site visit types
    types.push(clean_type(SiteVisit::export_to_string()?));
    types.push(clean_type(SiteVisitStatus::export_to_string()?));
    types.push(clean_type(CreateSiteVisitRequest::export_to_string()?));
    types.push(clean_type(UpdateSiteVisitRequest::export_to_string()?));
    types.push(clean_type(SiteVisitsResponse::export_to_string()?));

    // Payment types
    types.push(clean_type(Payment::export_to_string()?));
    types.push(clean_type(PaymentStatus::export_to_string()?));
    types.push(clean_type(PaymentType::export_to_string()?));
    types.push(clean_type(PaymentSummary::export_to_string()?));
    types.push(clean_type(CreatePaymentRequest::export_to_string()?));
    types.push(clean_type(UpdatePaymentRequest::export_to_string()?));
    types.push(clean_type(PaymentsResponse::export_to_string()?));

    // Timeline types
    types.push(clean_type(Timeline::export_to_string()?));
    types.push(clean_type(Phase::export_to_string()?));
    types.push(clean_type(PhaseStatus::export_to_string()?));
    types.push(clean_type(PhaseTask::export_to_string()?));
    types.push(clean_type(Milestone::export_to_string()?));
    types.push(clean_type(CreateTimelineRequest::export_to_string()?));
    types.push(clean_type(UpdateTimelineRequest::export_to_string()?));
    types.push(clean_type(TimelinesResponse::export_to_string()?));

    // Document types
    types.push(clean_type(Document::export_to_string()?));
    types.push(clean_type(DocumentCategory::export_to_string()?));
    types.push(clean_type(CreateDocumentRequest::export_to_string()?));
    types.push(clean_type(UpdateDocumentRequest::export_to_string()?));
    types.push(clean_type(DocumentsResponse::export_to_string()?));

    // Message types
    types.push(clean_type(Message::export_to_string()?));
    types.push(clean_type(MessageAttachment::export_to_string()?));
    types.push(clean_type(CreateMessageRequest::export_to_string()?));
    types.push(clean_type(UpdateMessageRequest::export_to_string()?));
    types.push(clean_type(MessagesResponse::export_to_string()?));

    // Brief types
    types.push(clean_type(Brief::export_to_string()?));
    types.push(clean_type(CreateBriefRequest::export_to_string()?));
    types.push(clean_type(UpdateBriefRequest::export_to_string()?));
    types.push(clean_type(BriefsResponse::export_to_string()?));

    // Project types
    types.push(clean_type(Project::export_to_string()?));
    types.push(clean_type(ProjectStatus::export_to_string()?));
    types.push(clean_type(CreateProjectRequest::export_to_string()?));
    types.push(clean_type(UpdateProjectRequest::export_to_string()?));
    types.push(clean_type(ProjectsResponse::export_to_string()?));

    types.push(clean_type(ErrorResponse::export_to_string()?));

    let output_dir = Path::new("../web/src/api-types");
    fs::create_dir_all(output_dir)?;

    let output_path = output_dir.join("types.ts");
    let output = types.join("\n\n");

    fs::write(&output_path, output)?;
    println!("Generated TypeScript types in {}", output_path.display());

    Ok(())
}

/// Strips the generated-file banner and the per-file `import type` lines;
/// every definition ends up in the same `types.ts`.
fn clean_type(mut type_def: String) -> String {
    type_def.retain(|c| c != '\r');

    let filtered: Vec<&str> = type_def
        .lines()
        .filter(|line| {
            let trimmed = line.trim();
            !trimmed.starts_with("import type")
                && !trimmed.starts_with("// This file was generated")
                && !trimmed.starts_with("/* This file was generated")
        })
        .collect();

    let result = filtered.join("\n").trim().to_string();
    if result.is_empty() {
        result
    } else {
        format!("{}\n", result)
    }
}
