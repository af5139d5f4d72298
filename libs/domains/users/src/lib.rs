//! Users Domain
//!
//! CRUD over a single `user_model` table: `id`, `name`, `email`.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← /users/ and /users/{id}
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← argument validation, metrics
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← trait + in-memory and PostgreSQL implementations
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← User, UserArgs, SeaORM entity
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_users::{InMemoryUserRepository, UserService, handlers};
//!
//! let service = UserService::new(InMemoryUserRepository::new());
//! let router = handlers::router(service);
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{UserError, UserResult};
pub use handlers::ApiDoc;
pub use models::{NewUser, User, UserArgs};
pub use postgres::PgUserRepository;
pub use repository::{InMemoryUserRepository, UserRepository};
pub use service::UserService;
