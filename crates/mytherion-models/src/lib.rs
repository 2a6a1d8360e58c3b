//! # Mytherion Models
//!
//! Database rows and request/response DTOs for the Mytherion API.
//!
//! # Modules
//!
//! - [`auth`]: registration, login and identity responses
//! - [`users`]: user accounts
//! - [`projects`]: worldbuilding projects and their statistics
//! - [`entities`]: characters, locations, items and the other project entries

pub mod auth;
pub mod entities;
pub mod projects;
pub mod users;

pub use auth::{AuthResponse, AuthUser, LoginRequest, MeResponse, RegisterRequest};

pub use users::{UpdateUserDto, User, UserResponse};

pub use projects::{
    CreateProjectDto, EntityTypeCount, PaginatedProjectsResponse, Project, ProjectStats,
    UpdateProjectDto,
};

pub use entities::{
    CreateEntityDto, Entity, EntityFilterParams, EntityType, PaginatedEntitiesResponse,
    UpdateEntityDto,
};
