//! n8n-mcp infrastructure
//!
//! Process-level setup shared by the binaries.

pub mod telemetry;

pub use telemetry::{init_telemetry, shutdown_telemetry, LogFormat, LogTarget, TelemetryConfig};
