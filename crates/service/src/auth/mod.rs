//! Auth module: three-layer architecture (domain, repository, service).
//!
//! Centralizes signup, login, and session-token verification business logic
//! under the service crate.

pub mod domain;
pub mod errors;
pub mod repo;
pub mod repository;
pub mod service;

pub use service::AuthService;
