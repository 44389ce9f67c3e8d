//! Client for the Big Local News GraphQL API.
//!
//! Covers the handful of operations ETL jobs need: listing projects, reading
//! and deleting project files, creating projects and uploading files.

mod client;
mod config;
mod project;
mod queries;
mod transport;

pub use client::Client;
pub use config::ApiConfig;
pub use config::DEFAULT_ENDPOINT;
pub use config::ENDPOINT_ENV;
pub use config::TOKEN_ENV;
pub use project::FetchPolicy;
pub use project::Project;
pub use project::ProjectFile;
pub use project::ProjectMeta;
pub use transport::GraphQlRequest;
pub use transport::HttpTransport;
pub use transport::Transport;
