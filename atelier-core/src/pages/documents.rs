use super::{Notice, PageState};
use crate::listing::{self, DocumentFilter};
use crate::store::Services;
use serde::Serialize;
use shared_types::{Document, DocumentCategory};

/// One entry of the category sidebar; `category: None` is "All Documents"
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub category: Option<DocumentCategory>,
    pub label: &'static str,
    pub count: usize,
}

/// Human readable size using 1024-based units and at most two decimals
pub fn format_file_size(bytes: i64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    if bytes <= 0 {
        return "0 Bytes".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let rounded = format!("{:.2}", value);
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", trimmed, UNITS[unit])
}

pub fn document_icon(file_type: &str) -> &'static str {
    match file_type {
        "pdf" | "document" => "FileText",
        "image" => "Image",
        "spreadsheet" => "FileSpreadsheet",
        _ => "File",
    }
}

pub struct DocumentsPage {
    services: Services,
    pub state: PageState,
    pub notice: Option<Notice>,
    pub documents: Vec<Document>,
    pub filter: DocumentFilter,
    /// Document open in the preview pane
    selected: Option<i64>,
}

impl DocumentsPage {
    pub fn new(services: Services) -> Self {
        Self {
            services,
            state: PageState::Loading,
            notice: None,
            documents: Vec::new(),
            filter: DocumentFilter::default(),
            selected: None,
        }
    }

    pub async fn load(&mut self) {
        self.state = PageState::Loading;
        let result = self.services.documents.get_all().await;
        self.state = PageState::settle(&result, "Failed to load documents");
        if let Ok(documents) = result {
            self.documents = documents;
        }
    }

    pub async fn retry(&mut self) {
        self.load().await
    }

    pub fn visible(&self) -> Vec<Document> {
        listing::filter_documents(&self.documents, &self.filter)
    }

    pub fn counts(&self) -> Vec<CategoryCount> {
        let mut counts = vec![CategoryCount {
            category: None,
            label: "All Documents",
            count: self.documents.len(),
        }];
        counts.extend(
            listing::category_counts(&self.documents)
                .into_iter()
                .map(|(category, count)| CategoryCount {
                    category: Some(category),
                    label: category.label(),
                    count,
                }),
        );
        counts
    }

    pub fn select(&mut self, id: Option<i64>) {
        self.selected = id.filter(|id| self.documents.iter().any(|d| d.id == *id));
    }

    pub fn selected(&self) -> Option<&Document> {
        let id = self.selected?;
        self.documents.iter().find(|d| d.id == id)
    }

    /// Starts a download; returns the document url when it has one
    pub fn download(&mut self, id: i64) -> Option<String> {
        let document = self.documents.iter().find(|d| d.id == id)?;
        self.notice = Some(Notice::info(format!("Downloading {}...", document.name)));
        document.url.clone()
    }
}
