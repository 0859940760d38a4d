use std::sync::Arc;

use serde_json::json;

use crate::api::{endpoints, ApiClient};
use crate::models::Project;
use crate::services::validation::{validate_project, ProjectInput};
use crate::services::{decode, ServiceResponse};

// Shared status table for project operations, mirroring the backend's
// error vocabulary.
const STATUS_MESSAGES: &[(u16, &str)] = &[
    (400, "Ogiltiga data skickades"),
    (401, "Du är inte inloggad"),
    (403, "Du har inte behörighet för denna åtgärd"),
    (404, "Projektet hittades inte"),
    (409, "Ett projekt med detta namn finns redan"),
    (422, "Valideringsfel"),
    (500, "Serverfel uppstod"),
];

// Duplicate-key marker some backend deployments leak through verbatim.
const DUPLICATE_KEY_MARKER: &str = "E11000 duplicate key error";

/// Project administration (admin only for writes).
pub struct ProjectService {
    client: Arc<ApiClient>,
}

impl ProjectService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> ServiceResponse<Vec<Project>> {
        match self
            .client
            .get(endpoints::PROJECTS)
            .await
            .and_then(decode::<Vec<Project>>)
        {
            Ok(mut projects) => {
                for project in &mut projects {
                    project.format_for_display();
                }
                let count = projects.len();
                ServiceResponse::ok(projects, format!("Hämtade {count} projekt"))
            }
            Err(err) => ServiceResponse::from_error(err, "Kunde inte hämta projekt", &[]),
        }
    }

    pub async fn get(&self, id: &str) -> ServiceResponse<Project> {
        let path = format!("{}/{id}", endpoints::PROJECTS);

        match self.client.get(&path).await.and_then(decode::<Project>) {
            Ok(mut project) => {
                project.format_for_display();
                ServiceResponse::ok(project, "Projekt hämtat framgångsrikt")
            }
            Err(err) => ServiceResponse::from_error(err, "Kunde inte hämta projekt", &[]),
        }
    }

    pub async fn create(&self, input: &ProjectInput) -> ServiceResponse<Project> {
        let errors = validate_project(input);
        if !errors.is_empty() {
            return ServiceResponse::validation(errors);
        }

        let body = json!(input);
        match self
            .client
            .post(endpoints::PROJECTS, &body)
            .await
            .and_then(decode::<Project>)
        {
            Ok(mut project) => {
                project.format_for_display();
                ServiceResponse::ok(project, "Projekt skapat framgångsrikt")
            }
            Err(err) => {
                ServiceResponse::from_error(err, "Kunde inte skapa projekt", STATUS_MESSAGES)
            }
        }
    }

    pub async fn update(&self, id: &str, input: &ProjectInput) -> ServiceResponse<Project> {
        let errors = validate_project(input);
        if !errors.is_empty() {
            return ServiceResponse::validation(errors);
        }

        let path = format!("{}/{id}", endpoints::PROJECTS);
        let body = json!(input);
        match self.client.put(&path, &body).await.and_then(decode::<Project>) {
            Ok(mut project) => {
                project.format_for_display();
                ServiceResponse::ok(project, "Projekt uppdaterat framgångsrikt")
            }
            Err(err) => {
                let mut resp: ServiceResponse<Project> =
                    ServiceResponse::from_error(err, "Kunde inte uppdatera projekt", STATUS_MESSAGES);
                // A leaked duplicate-key error means the name is taken
                if resp.message.contains(DUPLICATE_KEY_MARKER) {
                    resp.message = "Ett projekt med detta namn finns redan".to_string();
                    resp.status = Some(409);
                }
                resp
            }
        }
    }

    pub async fn delete(&self, id: &str) -> ServiceResponse<()> {
        let path = format!("{}/{id}", endpoints::PROJECTS);

        match self.client.delete(&path).await {
            Ok(_) => ServiceResponse::ok((), "Projekt borttaget framgångsrikt"),
            Err(err) => ServiceResponse::from_error(err, "Kunde inte ta bort projekt", &[]),
        }
    }
}
