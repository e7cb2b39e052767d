pub mod catalog;
pub mod embedding;
pub mod loader;
pub mod semantic_search;
