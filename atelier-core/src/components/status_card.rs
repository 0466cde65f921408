use super::badge::{Badge, BadgeVariant};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CardVariant {
    #[default]
    Default,
    Primary,
    Success,
    Warning,
}

/// Headline figure on the dashboard
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusCard {
    pub title: String,
    pub value: String,
    pub description: String,
    pub status: Option<Badge>,
    pub icon: &'static str,
    pub variant: CardVariant,
}

impl StatusCard {
    pub fn new(title: &str, value: impl Into<String>, icon: &'static str) -> Self {
        Self {
            title: title.to_string(),
            value: value.into(),
            description: String::new(),
            status: None,
            icon,
            variant: CardVariant::Default,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn status(mut self, label: &str, variant: BadgeVariant) -> Self {
        self.status = Some(Badge::new(label, variant));
        self
    }

    pub fn variant(mut self, variant: CardVariant) -> Self {
        self.variant = variant;
        self
    }
}
