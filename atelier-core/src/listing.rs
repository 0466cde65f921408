//! Client-side filtering and sorting for the ticket and document lists.
//! Filters are conjunctive; an absent constraint matches everything.

use serde::de::{Deserializer, IntoDeserializer};
use serde::{Deserialize, Serialize};
use shared_types::{Document, DocumentCategory, Ticket, TicketPriority, TicketStatus};
use std::cmp::Ordering;

/// Treats a missing value, `""` and `"all"` as no constraint
fn all_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(value) if value.is_empty() || value.eq_ignore_ascii_case("all") => Ok(None),
        Some(value) => T::deserialize(value.into_deserializer()).map(Some),
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TicketFilter {
    pub search: String,
    #[serde(deserialize_with = "all_as_none")]
    pub priority: Option<TicketPriority>,
    #[serde(deserialize_with = "all_as_none")]
    pub status: Option<TicketStatus>,
    #[serde(deserialize_with = "all_as_none")]
    pub category: Option<String>,
}

impl TicketFilter {
    pub fn matches(&self, ticket: &Ticket) -> bool {
        let search = self.search.trim();
        let matches_search = search.is_empty()
            || contains_ignore_case(&ticket.title, search)
            || contains_ignore_case(&ticket.description, search);

        matches_search
            && self.priority.map_or(true, |p| ticket.priority == p)
            && self.status.map_or(true, |s| ticket.status == s)
            && self
                .category
                .as_deref()
                .map_or(true, |c| ticket.category == c)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TicketSort {
    /// Newest first
    #[default]
    Created,
    /// Critical first
    Priority,
    Title,
    Status,
}

impl TicketSort {
    pub fn compare(&self, a: &Ticket, b: &Ticket) -> Ordering {
        match self {
            TicketSort::Created => b.created_at.cmp(&a.created_at),
            TicketSort::Priority => b.priority.rank().cmp(&a.priority.rank()),
            TicketSort::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
            TicketSort::Status => a.status.as_str().cmp(b.status.as_str()),
        }
    }
}

/// Stable: tickets that compare equal keep their original order
pub fn filter_tickets(tickets: &[Ticket], filter: &TicketFilter, sort: TicketSort) -> Vec<Ticket> {
    let mut visible: Vec<Ticket> = tickets.iter().filter(|t| filter.matches(t)).cloned().collect();
    visible.sort_by(|a, b| sort.compare(a, b));
    visible
}

/// Distinct non-empty categories in first-seen order
pub fn ticket_categories(tickets: &[Ticket]) -> Vec<String> {
    let mut categories: Vec<String> = Vec::new();
    for ticket in tickets {
        if !ticket.category.is_empty() && !categories.contains(&ticket.category) {
            categories.push(ticket.category.clone());
        }
    }
    categories
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentFilter {
    #[serde(deserialize_with = "all_as_none")]
    pub category: Option<DocumentCategory>,
    pub search: String,
}

impl DocumentFilter {
    pub fn matches(&self, document: &Document) -> bool {
        let search = self.search.trim();
        self.category.map_or(true, |c| document.category == c)
            && (search.is_empty()
                || contains_ignore_case(&document.name, search)
                || contains_ignore_case(&document.description, search))
    }
}

pub fn filter_documents(documents: &[Document], filter: &DocumentFilter) -> Vec<Document> {
    documents.iter().filter(|d| filter.matches(d)).cloned().collect()
}

/// Count per category, in the fixed category order
pub fn category_counts(documents: &[Document]) -> Vec<(DocumentCategory, usize)> {
    DocumentCategory::ALL
        .iter()
        .map(|&category| {
            let count = documents.iter().filter(|d| d.category == category).count();
            (category, count)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn ticket(id: i64, title: &str, priority: TicketPriority, status: TicketStatus) -> Ticket {
        let created = Utc::now() - Duration::days(10) + Duration::days(id);
        Ticket {
            id,
            title: title.to_string(),
            description: format!("{} description", title),
            priority,
            status,
            category: if id % 2 == 0 { "plumbing" } else { "electrical" }.to_string(),
            photos: vec![],
            assigned_to: None,
            created_at: created,
            updated_at: created,
        }
    }

    fn sample() -> Vec<Ticket> {
        vec![
            ticket(1, "Outlet sparks", TicketPriority::Critical, TicketStatus::Open),
            ticket(2, "Leaky faucet", TicketPriority::High, TicketStatus::Open),
            ticket(3, "dim bulb", TicketPriority::Low, TicketStatus::Resolved),
            ticket(4, "Burst pipe", TicketPriority::Critical, TicketStatus::InProgress),
            ticket(5, "Chipped paint", TicketPriority::Medium, TicketStatus::Open),
        ]
    }

    #[test]
    fn test_filters_are_conjunctive() {
        let filter = TicketFilter {
            priority: Some(TicketPriority::Critical),
            status: Some(TicketStatus::Open),
            ..Default::default()
        };

        let result = filter_tickets(&sample(), &filter, TicketSort::Created);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, 1);
    }

    #[test]
    fn test_search_is_case_insensitive_over_title_and_description() {
        let filter = TicketFilter {
            search: "FAUCET".to_string(),
            ..Default::default()
        };
        assert_eq!(filter_tickets(&sample(), &filter, TicketSort::Created)[0].id, 2);

        let filter = TicketFilter {
            search: "bulb desc".to_string(),
            ..Default::default()
        };
        assert_eq!(filter_tickets(&sample(), &filter, TicketSort::Created)[0].id, 3);
    }

    #[test]
    fn test_priority_sort_uses_rank() {
        let sorted = filter_tickets(&sample(), &TicketFilter::default(), TicketSort::Priority);
        let priorities: Vec<TicketPriority> = sorted.iter().map(|t| t.priority).collect();
        assert_eq!(
            priorities,
            vec![
                TicketPriority::Critical,
                TicketPriority::Critical,
                TicketPriority::High,
                TicketPriority::Medium,
                TicketPriority::Low,
            ]
        );
        // equal ranks keep input order
        assert_eq!(sorted[0].id, 1);
        assert_eq!(sorted[1].id, 4);
    }

    #[test]
    fn test_created_title_and_status_sorts() {
        let by_created = filter_tickets(&sample(), &TicketFilter::default(), TicketSort::Created);
        assert_eq!(by_created[0].id, 5);

        let by_title = filter_tickets(&sample(), &TicketFilter::default(), TicketSort::Title);
        let titles: Vec<&str> = by_title.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["Burst pipe", "Chipped paint", "dim bulb", "Leaky faucet", "Outlet sparks"]
        );

        let by_status = filter_tickets(&sample(), &TicketFilter::default(), TicketSort::Status);
        assert_eq!(by_status[0].status, TicketStatus::InProgress);
        assert_eq!(by_status[4].status, TicketStatus::Resolved);
    }

    #[test]
    fn test_all_means_no_constraint() {
        let filter: TicketFilter = serde_json::from_value(serde_json::json!({
            "priority": "all",
            "status": "open",
            "category": "all"
        }))
        .unwrap();
        assert_eq!(filter.priority, None);
        assert_eq!(filter.status, Some(TicketStatus::Open));
        assert_eq!(filter.category, None);
    }

    #[test]
    fn test_category_listing() {
        assert_eq!(ticket_categories(&sample()), vec!["electrical", "plumbing"]);
    }
}
