use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

/// Vault category a document is filed under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "kebab-case")]
pub enum DocumentCategory {
    Quotes,
    Drawings,
    Warranties,
    Contracts,
    Invoices,
    Photos,
}

impl DocumentCategory {
    pub const ALL: [DocumentCategory; 6] = [
        DocumentCategory::Quotes,
        DocumentCategory::Drawings,
        DocumentCategory::Warranties,
        DocumentCategory::Contracts,
        DocumentCategory::Invoices,
        DocumentCategory::Photos,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentCategory::Quotes => "quotes",
            DocumentCategory::Drawings => "drawings",
            DocumentCategory::Warranties => "warranties",
            DocumentCategory::Contracts => "contracts",
            DocumentCategory::Invoices => "invoices",
            DocumentCategory::Photos => "photos",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DocumentCategory::Quotes => "Quotes",
            DocumentCategory::Drawings => "Drawings",
            DocumentCategory::Warranties => "Warranties",
            DocumentCategory::Contracts => "Contracts",
            DocumentCategory::Invoices => "Invoices",
            DocumentCategory::Photos => "Photos",
        }
    }
}

impl fmt::Display for DocumentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// File stored in the client's document vault
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Document {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub category: DocumentCategory,
    /// File kind (pdf, image, spreadsheet, ...)
    #[serde(rename = "type")]
    pub file_type: String,
    /// Size in bytes
    pub size: i64,
    pub uploaded_at: DateTime<Utc>,
    pub url: Option<String>,
}

/// Request to add a document to the vault
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CreateDocumentRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub category: DocumentCategory,
    #[serde(rename = "type")]
    pub file_type: String,
    pub size: i64,
    pub url: Option<String>,
}

/// Request to update document metadata
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default)]
pub struct UpdateDocumentRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<DocumentCategory>,
    #[serde(rename = "type")]
    pub file_type: Option<String>,
    pub size: Option<i64>,
    pub url: Option<String>,
}

/// Response containing a list of documents
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DocumentsResponse {
    pub documents: Vec<Document>,
}
