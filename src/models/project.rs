use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An accessibility project, the scope unit for checklists and progress.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Project {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub alt_id: Option<String>,
    pub name: String,
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "updatedAt", default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,

    #[serde(skip)]
    pub created_at_formatted: String,
    #[serde(skip)]
    pub updated_at_formatted: String,
}

impl Project {
    pub fn identity(&self) -> Option<&str> {
        super::identity(&self.id, &self.alt_id)
    }

    pub fn matches_id(&self, candidate: &str) -> bool {
        super::matches_identity(&self.id, &self.alt_id, candidate)
    }

    pub fn format_for_display(&mut self) {
        self.created_at_formatted = super::format_datetime(self.created_at);
        self.updated_at_formatted = super::format_datetime(self.updated_at);
    }
}
