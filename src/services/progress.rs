use std::sync::Arc;

use crate::api::{endpoints, ApiClient};
use crate::models::{ProgressStatistics, ProjectProgress, RoleProgressDetail};
use crate::services::{decode, normalize_list, ServiceResponse};

/// Read-only progress tracking per project and role.
pub struct ProgressService {
    client: Arc<ApiClient>,
}

impl ProgressService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Progress for all projects. A non-array response is treated as an
    /// empty list.
    pub async fn all(&self) -> ServiceResponse<Vec<ProjectProgress>> {
        match self.client.get(endpoints::PROGRESS).await {
            Ok(value) => {
                let mut list: Vec<ProjectProgress> = Vec::new();
                for raw in normalize_list(value) {
                    match decode::<ProjectProgress>(raw) {
                        Ok(mut progress) => {
                            progress.format_for_display();
                            list.push(progress);
                        }
                        Err(err) => {
                            return ServiceResponse::from_error(
                                err,
                                "Kunde inte hämta framstegsdata",
                                &[],
                            )
                        }
                    }
                }
                let count = list.len();
                ServiceResponse::ok(list, format!("Hämtade framsteg för {count} projekt"))
            }
            Err(err) => ServiceResponse::from_error(err, "Kunde inte hämta framstegsdata", &[]),
        }
    }

    pub async fn project(&self, project_id: &str) -> ServiceResponse<ProjectProgress> {
        let path = format!("{}/{project_id}", endpoints::PROGRESS);

        match self.client.get(&path).await.and_then(decode::<ProjectProgress>) {
            Ok(mut progress) => {
                progress.format_for_display();
                ServiceResponse::ok(progress, "Projektframsteg hämtat framgångsrikt")
            }
            Err(err) => ServiceResponse::from_error(err, "Kunde inte hämta projektframsteg", &[]),
        }
    }

    pub async fn role(&self, project_id: &str, role: &str) -> ServiceResponse<RoleProgressDetail> {
        let path = format!("{}/{project_id}/{role}", endpoints::PROGRESS);

        match self.client.get(&path).await.and_then(decode::<RoleProgressDetail>) {
            Ok(mut detail) => {
                detail.format_for_display(role);
                ServiceResponse::ok(detail, "Rollframsteg hämtat framgångsrikt")
            }
            Err(err) => ServiceResponse::from_error(
                err,
                &format!("Kunde inte hämta framsteg för {role}"),
                &[],
            ),
        }
    }

    /// Dashboard statistics over an already-fetched progress list.
    pub fn statistics(list: &[ProjectProgress]) -> ProgressStatistics {
        ProgressStatistics::from_list(list)
    }
}
