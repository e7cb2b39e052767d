//! Database repositories for data access layer
//!
//! [`PostgresClient`] owns the connection and its explicit lifecycle; the
//! repositories borrow its pool for one table each.

pub mod client;
pub mod embedding;
pub mod workflow;

pub use client::PostgresClient;
pub use embedding::EmbeddingRepository;
pub use workflow::WorkflowRepository;
