use std::sync::Arc;

use serde_json::json;

use crate::api::{endpoints, ApiClient};
use crate::models::Post;
use crate::services::validation::{validate_post, PostInput};
use crate::services::{decode, normalize_list, ServiceResponse};

const CREATE_MESSAGES: &[(u16, &str)] = &[
    (400, "Valideringsfel: Kontrollera att alla obligatoriska fält är ifyllda"),
    (403, "Du har inte behörighet att skapa inlägg"),
];

const UPDATE_MESSAGES: &[(u16, &str)] = &[
    (400, "Valideringsfel: Kontrollera att alla fält är korrekt ifyllda"),
    (403, "Du har inte behörighet att uppdatera detta inlägg"),
    (404, "Inlägget hittades inte"),
];

const DELETE_MESSAGES: &[(u16, &str)] = &[
    (403, "Du har inte behörighet att radera detta inlägg"),
    (404, "Inlägget hittades inte"),
];

/// Role-scoped posts shown on the dashboards.
pub struct PostService {
    client: Arc<ApiClient>,
}

impl PostService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// List all posts. The backend has produced several list envelopes over
    /// time; `normalize_list` pins the precedence.
    pub async fn list(&self) -> ServiceResponse<Vec<Post>> {
        match self.client.get(endpoints::POSTS).await {
            Ok(value) => {
                let mut posts: Vec<Post> = Vec::new();
                for raw in normalize_list(value) {
                    match decode::<Post>(raw) {
                        Ok(mut post) => {
                            post.format_for_display();
                            posts.push(post);
                        }
                        Err(err) => {
                            return ServiceResponse::from_error(err, "Kunde inte hämta inlägg", &[])
                        }
                    }
                }
                let count = posts.len();
                ServiceResponse::ok(posts, format!("Hämtade {count} inlägg"))
            }
            Err(err) => ServiceResponse::from_error(err, "Kunde inte hämta inlägg", &[]),
        }
    }

    pub async fn get(&self, id: &str) -> ServiceResponse<Post> {
        let path = format!("{}/{id}", endpoints::POSTS);

        match self.client.get(&path).await.and_then(decode::<Post>) {
            Ok(mut post) => {
                post.format_for_display();
                ServiceResponse::ok(post, "Inlägg hämtat framgångsrikt")
            }
            Err(err) => ServiceResponse::from_error(err, "Kunde inte hämta inlägg", &[]),
        }
    }

    pub async fn create(&self, input: &PostInput) -> ServiceResponse<Post> {
        let errors = validate_post(input);
        if !errors.is_empty() {
            return ServiceResponse::validation(errors);
        }

        let body = json!(input);
        match self
            .client
            .post(endpoints::POSTS, &body)
            .await
            .and_then(decode::<Post>)
        {
            Ok(mut post) => {
                post.format_for_display();
                ServiceResponse::ok(post, "Inlägg skapat framgångsrikt")
            }
            Err(err) => {
                ServiceResponse::from_error(err, "Kunde inte skapa inlägg", CREATE_MESSAGES)
            }
        }
    }

    pub async fn update(&self, id: &str, input: &PostInput) -> ServiceResponse<Post> {
        let errors = validate_post(input);
        if !errors.is_empty() {
            return ServiceResponse::validation(errors);
        }

        let path = format!("{}/{id}", endpoints::POSTS);
        let body = json!(input);
        match self.client.put(&path, &body).await.and_then(decode::<Post>) {
            Ok(mut post) => {
                post.format_for_display();
                ServiceResponse::ok(post, "Inlägg uppdaterat framgångsrikt")
            }
            Err(err) => {
                ServiceResponse::from_error(err, "Kunde inte uppdatera inlägg", UPDATE_MESSAGES)
            }
        }
    }

    pub async fn delete(&self, id: &str) -> ServiceResponse<()> {
        let path = format!("{}/{id}", endpoints::POSTS);

        match self.client.delete(&path).await {
            Ok(_) => ServiceResponse::ok((), "Inlägg raderat framgångsrikt"),
            Err(err) => {
                ServiceResponse::from_error(err, "Kunde inte radera inlägg", DELETE_MESSAGES)
            }
        }
    }
}
