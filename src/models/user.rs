use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::role_display_name;

/// A user account. Role is the sole authorization attribute.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Mongo-style identity some backend deployments return instead of `id`.
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub alt_id: Option<String>,
    pub username: String,
    #[serde(default)]
    pub role: String,
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "updatedAt", default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,

    // Display-only fields, populated client-side.
    #[serde(skip)]
    pub role_display_name: String,
    #[serde(skip)]
    pub created_at_formatted: String,
    #[serde(skip)]
    pub updated_at_formatted: String,
}

impl User {
    pub fn identity(&self) -> Option<&str> {
        super::identity(&self.id, &self.alt_id)
    }

    pub fn matches_id(&self, candidate: &str) -> bool {
        super::matches_identity(&self.id, &self.alt_id, candidate)
    }

    /// Fill in the display-only fields (role label, Swedish dates).
    pub fn format_for_display(&mut self) {
        self.role_display_name = role_display_name(&self.role).to_string();
        self.created_at_formatted = super::format_datetime(self.created_at);
        self.updated_at_formatted = super::format_datetime(self.updated_at);
    }
}
