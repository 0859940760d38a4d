pub mod auth;
pub mod checklists;
pub mod open;
pub mod posts;
pub mod progress;
pub mod projects;
pub mod users;
