//! Data models for the application
//!
//! `workflow` is the defensive projection of a raw n8n document, `enriched` the
//! derived catalog record, and `validation` the engine's options and report.

mod enriched;
mod validation;
mod workflow;

pub use enriched::*;
pub use validation::*;
pub use workflow::*;
