use std::sync::Arc;

use serde_json::json;

use crate::api::{endpoints, ApiClient};
use crate::models::Checklist;
use crate::services::validation::{validate_checklist_item, ChecklistItemInput};
use crate::services::{decode, ServiceResponse};

/// Role-scoped checklists per project. Item writes are admin-only;
/// completion toggling is open to the checklist's role.
pub struct ChecklistService {
    client: Arc<ApiClient>,
}

impl ChecklistService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Checklist for one project and role.
    pub async fn get(&self, project_id: &str, role: &str) -> ServiceResponse<Checklist> {
        let path = format!("{}/{project_id}/{role}", endpoints::CHECKLISTS);

        match self.client.get(&path).await.and_then(decode::<Checklist>) {
            Ok(mut checklist) => {
                checklist.format_for_display();
                ServiceResponse::ok(checklist, "Checklista hämtad framgångsrikt")
            }
            Err(err) => ServiceResponse::from_error(
                err,
                &format!("Kunde inte hämta checklista för {role}"),
                &[],
            ),
        }
    }

    /// All checklists for one project.
    pub async fn list(&self, project_id: &str) -> ServiceResponse<Vec<Checklist>> {
        let path = format!("{}/{project_id}", endpoints::CHECKLISTS);

        match self.client.get(&path).await.and_then(decode::<Vec<Checklist>>) {
            Ok(mut checklists) => {
                for checklist in &mut checklists {
                    checklist.format_for_display();
                }
                let count = checklists.len();
                ServiceResponse::ok(checklists, format!("Hämtade {count} checklistor"))
            }
            Err(err) => {
                ServiceResponse::from_error(err, "Kunde inte hämta projektets checklistor", &[])
            }
        }
    }

    /// Add an item; the backend returns the whole updated checklist.
    pub async fn add_item(
        &self,
        project_id: &str,
        role: &str,
        input: &ChecklistItemInput,
    ) -> ServiceResponse<Checklist> {
        let errors = validate_checklist_item(input);
        if !errors.is_empty() {
            return ServiceResponse::validation(errors);
        }

        let path = format!("{}/{project_id}/{role}/items", endpoints::CHECKLISTS);
        let body = json!(input);
        match self.client.post(&path, &body).await.and_then(decode::<Checklist>) {
            Ok(mut checklist) => {
                checklist.format_for_display();
                ServiceResponse::ok(checklist, "Checklistpunkt tillagd framgångsrikt")
            }
            Err(err) => {
                ServiceResponse::from_error(err, "Kunde inte lägga till checklistpunkt", &[])
            }
        }
    }

    pub async fn update_item(
        &self,
        project_id: &str,
        role: &str,
        item_id: &str,
        input: &ChecklistItemInput,
    ) -> ServiceResponse<Checklist> {
        let errors = validate_checklist_item(input);
        if !errors.is_empty() {
            return ServiceResponse::validation(errors);
        }

        let path = format!("{}/{project_id}/{role}/items/{item_id}", endpoints::CHECKLISTS);
        let body = json!(input);
        match self.client.put(&path, &body).await.and_then(decode::<Checklist>) {
            Ok(mut checklist) => {
                checklist.format_for_display();
                ServiceResponse::ok(checklist, "Checklistpunkt uppdaterad framgångsrikt")
            }
            Err(err) => {
                ServiceResponse::from_error(err, "Kunde inte uppdatera checklistpunkt", &[])
            }
        }
    }

    pub async fn remove_item(
        &self,
        project_id: &str,
        role: &str,
        item_id: &str,
    ) -> ServiceResponse<Checklist> {
        let path = format!("{}/{project_id}/{role}/items/{item_id}", endpoints::CHECKLISTS);

        match self.client.delete(&path).await.and_then(decode::<Checklist>) {
            Ok(mut checklist) => {
                checklist.format_for_display();
                ServiceResponse::ok(checklist, "Checklistpunkt borttagen framgångsrikt")
            }
            Err(err) => {
                ServiceResponse::from_error(err, "Kunde inte ta bort checklistpunkt", &[])
            }
        }
    }

    /// Flip an item's completion state.
    pub async fn toggle_item(
        &self,
        project_id: &str,
        role: &str,
        item_id: &str,
        completed: bool,
    ) -> ServiceResponse<Checklist> {
        let path = format!("{}/{project_id}/{role}/toggle", endpoints::CHECKLISTS);
        let body = json!({ "itemId": item_id, "completed": completed });

        match self.client.patch(&path, &body).await.and_then(decode::<Checklist>) {
            Ok(mut checklist) => {
                checklist.format_for_display();
                let message = if completed {
                    "Punkt markerad som klar"
                } else {
                    "Punkt markerad som ej klar"
                };
                ServiceResponse::ok(checklist, message)
            }
            Err(err) => {
                ServiceResponse::from_error(err, "Kunde inte uppdatera checklistpunkt", &[])
            }
        }
    }
}
