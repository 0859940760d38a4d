// Client-side validation mirroring the backend's rules. A failed
// validation short-circuits before any network call.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::types::Role;

// Unicode letter class so Swedish usernames (åäö) pass.
static USERNAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\p{L}0-9._-]+$").expect("username pattern"));

#[derive(Debug, Clone, Serialize)]
pub struct UserInput {
    pub username: String,
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectInput {
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PostInput {
    pub title: String,
    pub content: String,
    pub role: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChecklistItemInput {
    pub title: String,
    pub content: String,
}

/// Username 3-50 chars from the permissive Unicode class, valid role,
/// password at least 6 chars (on edit only when a new one is given).
pub fn validate_user(input: &UserInput, is_editing: bool) -> HashMap<String, String> {
    let mut errors = HashMap::new();

    let username = input.username.trim();
    if username.chars().count() < 3 {
        errors.insert(
            "username".to_string(),
            "Användarnamn måste vara minst 3 tecken".to_string(),
        );
    } else if username.chars().count() > 50 {
        errors.insert(
            "username".to_string(),
            "Användarnamn får inte vara längre än 50 tecken".to_string(),
        );
    } else if !USERNAME_PATTERN.is_match(username) {
        errors.insert(
            "username".to_string(),
            "Användarnamn får bara innehålla bokstäver (inklusive åäö), siffror, punkt, underscore och bindestreck".to_string(),
        );
    }

    if Role::parse(&input.role).is_none() {
        errors.insert("role".to_string(), "Giltig roll krävs".to_string());
    }

    let password_too_short = |p: &String| p.chars().count() < 6;
    if is_editing {
        if input.password.as_ref().is_some_and(password_too_short) {
            errors.insert(
                "password".to_string(),
                "Lösenord måste vara minst 6 tecken".to_string(),
            );
        }
    } else if input.password.as_ref().map_or(true, password_too_short) {
        errors.insert(
            "password".to_string(),
            "Lösenord måste vara minst 6 tecken".to_string(),
        );
    }

    errors
}

/// Project name 3-100 chars, mirroring the backend schema.
pub fn validate_project(input: &ProjectInput) -> HashMap<String, String> {
    let mut errors = HashMap::new();

    let name = input.name.trim();
    if name.chars().count() < 3 {
        errors.insert(
            "name".to_string(),
            "Projektnamn måste vara minst 3 tecken".to_string(),
        );
    } else if name.chars().count() > 100 {
        errors.insert(
            "name".to_string(),
            "Projektnamn får inte vara längre än 100 tecken".to_string(),
        );
    }

    errors
}

/// Post title 3-100 chars, role one of the three non-admin roles,
/// content at least 10 chars.
pub fn validate_post(input: &PostInput) -> HashMap<String, String> {
    let mut errors = HashMap::new();

    let title = input.title.trim();
    if title.is_empty() {
        errors.insert("title".to_string(), "Titel är obligatorisk".to_string());
    } else if title.chars().count() < 3 {
        errors.insert("title".to_string(), "Titel måste vara minst 3 tecken".to_string());
    } else if title.chars().count() > 100 {
        errors.insert(
            "title".to_string(),
            "Titel får inte vara längre än 100 tecken".to_string(),
        );
    }

    if input.role.is_empty() {
        errors.insert("role".to_string(), "Roll är obligatorisk".to_string());
    } else if !matches!(input.role.as_str(), "designer" | "developer" | "tester") {
        errors.insert(
            "role".to_string(),
            "Roll måste vara antingen \"designer\", \"developer\" eller \"tester\"".to_string(),
        );
    }

    let content = input.content.trim();
    if content.is_empty() {
        errors.insert("content".to_string(), "Innehåll är obligatoriskt".to_string());
    } else if content.chars().count() < 10 {
        errors.insert(
            "content".to_string(),
            "Innehåll måste vara minst 10 tecken".to_string(),
        );
    }

    errors
}

/// Checklist item title 3-100 chars, content 10-1000 chars.
pub fn validate_checklist_item(input: &ChecklistItemInput) -> HashMap<String, String> {
    let mut errors = HashMap::new();

    let title = input.title.trim();
    if title.chars().count() < 3 {
        errors.insert("title".to_string(), "Titel måste vara minst 3 tecken".to_string());
    } else if title.chars().count() > 100 {
        errors.insert(
            "title".to_string(),
            "Titel får inte vara längre än 100 tecken".to_string(),
        );
    }

    let content = input.content.trim();
    if content.chars().count() < 10 {
        errors.insert(
            "content".to_string(),
            "Innehåll måste vara minst 10 tecken".to_string(),
        );
    } else if content.chars().count() > 1000 {
        errors.insert(
            "content".to_string(),
            "Innehåll får inte vara längre än 1000 tecken".to_string(),
        );
    }

    errors
}
