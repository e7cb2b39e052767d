//! n8n MCP Server
//!
//! Model Context Protocol server that exposes n8n workflow management,
//! validation and similarity search as tools for AI assistants.

pub mod server;
pub mod tools;

pub use n8n_mcp_api_client::N8nApiClient;
pub use server::N8nMcpService;
