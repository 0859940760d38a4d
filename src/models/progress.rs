use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::role_display_name;

/// Per-role completion counters for one project.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct RoleCount {
    #[serde(default)]
    pub completed: u32,
    #[serde(default)]
    pub total: u32,
}

impl RoleCount {
    pub fn percentage(&self) -> u32 {
        if self.total == 0 {
            0
        } else {
            ((self.completed as f64 / self.total as f64) * 100.0).round() as u32
        }
    }
}

/// Display row for one role's progress.
#[derive(Debug, Clone, Serialize)]
pub struct RoleProgress {
    pub role: String,
    pub role_display_name: String,
    pub completed: u32,
    pub total: u32,
    pub percentage: u32,
}

/// Progress aggregate for one project: completion counters per role plus
/// a derived overall percentage.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectProgress {
    #[serde(rename = "projectId", default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(rename = "projectName", default, skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,
    #[serde(default)]
    pub roles: HashMap<String, RoleCount>,
    #[serde(rename = "lastUpdated", default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,

    #[serde(skip)]
    pub total_progress_percentage: u32,
    #[serde(skip)]
    pub role_progress: Vec<RoleProgress>,
    #[serde(skip)]
    pub last_updated_formatted: String,
}

impl ProjectProgress {
    /// Overall completion across all roles, rounded to whole percent.
    pub fn total_progress(&self) -> u32 {
        let total: u32 = self.roles.values().map(|r| r.total).sum();
        let completed: u32 = self.roles.values().map(|r| r.completed).sum();
        if total == 0 {
            0
        } else {
            ((completed as f64 / total as f64) * 100.0).round() as u32
        }
    }

    pub fn format_for_display(&mut self) {
        self.total_progress_percentage = self.total_progress();

        let mut rows: Vec<RoleProgress> = self
            .roles
            .iter()
            .map(|(role, count)| RoleProgress {
                role: role.clone(),
                role_display_name: role_display_name(role).to_string(),
                completed: count.completed,
                total: count.total,
                percentage: count.percentage(),
            })
            .collect();
        // HashMap iteration order is arbitrary; keep the rows stable
        rows.sort_by(|a, b| a.role.cmp(&b.role));
        self.role_progress = rows;

        self.last_updated_formatted = super::format_datetime(self.last_updated);
    }
}

/// Detailed progress for one role in one project, from the
/// `/progress/{projectId}/{role}` endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoleProgressDetail {
    #[serde(default)]
    pub completed: u32,
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub items: Vec<ProgressItem>,

    #[serde(skip)]
    pub role: String,
    #[serde(skip)]
    pub role_display_name: String,
    #[serde(skip)]
    pub progress_percentage: u32,
}

impl RoleProgressDetail {
    pub fn format_for_display(&mut self, role: &str) {
        self.role = role.to_string();
        self.role_display_name = role_display_name(role).to_string();
        self.progress_percentage =
            RoleCount { completed: self.completed, total: self.total }.percentage();
        for item in &mut self.items {
            item.format_for_display();
        }
    }
}

/// One checklist item as reported by the progress endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProgressItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub alt_id: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(rename = "completedAt", default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,

    #[serde(skip)]
    pub completed_at_formatted: String,
}

impl ProgressItem {
    pub fn format_for_display(&mut self) {
        self.completed_at_formatted = super::format_datetime(self.completed_at);
    }
}

/// Dashboard statistics over a list of project progress records.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProgressStatistics {
    pub total_projects: usize,
    pub completed_projects: usize,
    pub in_progress_projects: usize,
    pub average_progress: u32,
    pub completion_rate: u32,
}

impl ProgressStatistics {
    pub fn from_list(list: &[ProjectProgress]) -> Self {
        let total_projects = list.len();
        let completed_projects = list.iter().filter(|p| p.total_progress() == 100).count();
        let average_progress = if total_projects > 0 {
            (list.iter().map(|p| p.total_progress() as f64).sum::<f64>() / total_projects as f64)
                .round() as u32
        } else {
            0
        };
        let completion_rate = if total_projects > 0 {
            ((completed_projects as f64 / total_projects as f64) * 100.0).round() as u32
        } else {
            0
        };

        Self {
            total_projects,
            completed_projects,
            in_progress_projects: total_projects - completed_projects,
            average_progress,
            completion_rate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn progress(pairs: &[(&str, u32, u32)]) -> ProjectProgress {
        let roles = pairs
            .iter()
            .map(|(role, completed, total)| {
                (role.to_string(), RoleCount { completed: *completed, total: *total })
            })
            .collect();
        ProjectProgress { roles, ..Default::default() }
    }

    #[test]
    fn total_progress_rounds_across_roles() {
        let p = progress(&[("designer", 1, 3), ("developer", 2, 3)]);
        // 3 of 6 items
        assert_eq!(p.total_progress(), 50);
    }

    #[test]
    fn empty_roles_mean_zero_progress() {
        let p = ProjectProgress::default();
        assert_eq!(p.total_progress(), 0);
    }

    #[test]
    fn deserializes_role_map() {
        let mut p: ProjectProgress = serde_json::from_value(json!({
            "projectId": "p1",
            "roles": {
                "designer": { "completed": 2, "total": 4 },
                "tester": { "completed": 0, "total": 0 }
            }
        }))
        .unwrap();
        p.format_for_display();

        assert_eq!(p.total_progress_percentage, 50);
        assert_eq!(p.role_progress.len(), 2);
        assert_eq!(p.role_progress[0].role, "designer");
        assert_eq!(p.role_progress[1].percentage, 0);
    }

    #[test]
    fn statistics_over_project_list() {
        let list = vec![
            progress(&[("designer", 2, 2)]),
            progress(&[("developer", 1, 2)]),
        ];
        let stats = ProgressStatistics::from_list(&list);
        assert_eq!(stats.total_projects, 2);
        assert_eq!(stats.completed_projects, 1);
        assert_eq!(stats.in_progress_projects, 1);
        assert_eq!(stats.average_progress, 75);
        assert_eq!(stats.completion_rate, 50);
    }
}
