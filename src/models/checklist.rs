use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A role-scoped checklist for one project.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Checklist {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub alt_id: Option<String>,
    #[serde(rename = "projectId", default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub items: Vec<ChecklistItem>,
}

impl Checklist {
    /// Fill in the display fields of every item.
    pub fn format_for_display(&mut self) {
        for item in &mut self.items {
            item.format_for_display();
        }
    }

    pub fn completed_count(&self) -> usize {
        self.items.iter().filter(|i| i.completed).count()
    }
}

/// One ordered item in a checklist.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChecklistItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub alt_id: Option<String>,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(skip)]
    pub created_at_formatted: String,
}

impl ChecklistItem {
    pub fn identity(&self) -> Option<&str> {
        super::identity(&self.id, &self.alt_id)
    }

    pub fn matches_id(&self, candidate: &str) -> bool {
        super::matches_identity(&self.id, &self.alt_id, candidate)
    }

    pub fn format_for_display(&mut self) {
        // Items show date only, no time of day
        self.created_at_formatted = super::format_date(self.created_at);
    }
}
