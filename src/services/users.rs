use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::api::{endpoints, ApiClient};
use crate::models::User;
use crate::services::validation::{validate_user, UserInput};
use crate::services::{decode, ServiceResponse};

/// Payload of a successful login call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginData {
    pub token: String,
    pub user: User,
}

const CREATE_MESSAGES: &[(u16, &str)] = &[
    (400, "Valideringsfel: Kontrollera att alla obligatoriska fält är ifyllda"),
    (409, "Användarnamnet används redan"),
];

const UPDATE_MESSAGES: &[(u16, &str)] = &[
    (400, "Valideringsfel: Kontrollera att alla fält är korrekt ifyllda"),
    (404, "Användaren hittades inte"),
    (409, "Användarnamnet används redan av annan användare"),
];

const DELETE_MESSAGES: &[(u16, &str)] = &[
    (404, "Användaren hittades inte"),
    (409, "Användaren kan inte tas bort"),
];

/// User administration and authentication.
pub struct UserService {
    client: Arc<ApiClient>,
}

impl UserService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn login(&self, username: &str, password: &str) -> ServiceResponse<LoginData> {
        let body = json!({ "username": username, "password": password });

        match self
            .client
            .post(endpoints::LOGIN, &body)
            .await
            .and_then(decode::<LoginData>)
        {
            Ok(mut data) => {
                data.user.format_for_display();
                ServiceResponse::ok(data, "Inloggning lyckades")
            }
            Err(err) => ServiceResponse::from_error(err, "Inloggning misslyckades", &[]),
        }
    }

    pub async fn list(&self) -> ServiceResponse<Vec<User>> {
        match self
            .client
            .get(endpoints::USERS)
            .await
            .and_then(decode::<Vec<User>>)
        {
            Ok(mut users) => {
                for user in &mut users {
                    user.format_for_display();
                }
                let count = users.len();
                ServiceResponse::ok(users, format!("Hämtade {count} användare"))
            }
            Err(err) => ServiceResponse::from_error(err, "Kunde inte hämta användare", &[]),
        }
    }

    pub async fn get(&self, id: &str) -> ServiceResponse<User> {
        let path = format!("{}/{id}", endpoints::USERS);

        match self.client.get(&path).await.and_then(decode::<User>) {
            Ok(mut user) => {
                user.format_for_display();
                ServiceResponse::ok(user, "Användare hämtad framgångsrikt")
            }
            Err(err) => ServiceResponse::from_error(err, "Kunde inte hämta användare", &[]),
        }
    }

    /// Create a new user (admin only). Validation failure short-circuits
    /// before the network.
    pub async fn create(&self, input: &UserInput) -> ServiceResponse<User> {
        let errors = validate_user(input, false);
        if !errors.is_empty() {
            return ServiceResponse::validation(errors);
        }

        let body = json!(input);
        match self
            .client
            .post(endpoints::USERS, &body)
            .await
            .and_then(decode::<User>)
        {
            Ok(mut user) => {
                user.format_for_display();
                ServiceResponse::ok(user, "Användare skapad framgångsrikt")
            }
            Err(err) => {
                ServiceResponse::from_error(err, "Kunde inte skapa användare", CREATE_MESSAGES)
            }
        }
    }

    pub async fn update(&self, id: &str, input: &UserInput) -> ServiceResponse<User> {
        let errors = validate_user(input, true);
        if !errors.is_empty() {
            return ServiceResponse::validation(errors);
        }

        let path = format!("{}/{id}", endpoints::USERS);
        let body = json!(input);
        match self.client.put(&path, &body).await.and_then(decode::<User>) {
            Ok(mut user) => {
                user.format_for_display();
                ServiceResponse::ok(user, "Användare uppdaterad framgångsrikt")
            }
            Err(err) => {
                ServiceResponse::from_error(err, "Kunde inte uppdatera användare", UPDATE_MESSAGES)
            }
        }
    }

    pub async fn delete(&self, id: &str) -> ServiceResponse<()> {
        let path = format!("{}/{id}", endpoints::USERS);

        match self.client.delete(&path).await {
            Ok(_) => ServiceResponse::ok((), "Användare borttagen framgångsrikt"),
            Err(err) => {
                ServiceResponse::from_error(err, "Kunde inte ta bort användare", DELETE_MESSAGES)
            }
        }
    }
}
