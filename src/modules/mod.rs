pub mod auth;
pub mod entities;
pub mod projects;
pub mod users;
