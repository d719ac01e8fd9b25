/// News Service Library
///
/// Content-management backend for a news publishing site: articles, tags,
/// gallery images, reaction counters, and aggregate statistics over an
/// HTTP JSON API.
///
/// # Modules
///
/// - `handlers`: HTTP request handlers
/// - `models`: Data structures for news, tags, images
/// - `services`: Business logic layer
/// - `db`: Database access layer and repositories
/// - `media`: Slug-namespaced local file storage for uploads
/// - `pagination`: Page-number pagination shared by list endpoints
/// - `error`: Error types and handling
/// - `config`: Configuration management
/// - `metrics`: Observability and metrics collection
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod media;
pub mod metrics;
pub mod models;
pub mod openapi;
pub mod pagination;
pub mod services;

pub use config::Config;
pub use error::{AppError, Result};
