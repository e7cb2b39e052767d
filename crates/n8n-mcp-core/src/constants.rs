//! Well-known n8n identifiers and analysis thresholds.

/// Node type of documentation-only sticky notes.
pub const STICKY_NOTE_TYPE: &str = "n8n-nodes-base.stickyNote";

/// Node type of the error trigger entry point.
pub const ERROR_TRIGGER_TYPE: &str = "n8n-nodes-base.errorTrigger";

/// Category assigned when a filename carries no `category:` prefix.
pub const UNCATEGORIZED: &str = "uncategorized";

/// Prefix of identifiers synthesized for workflows without an `id`.
pub const GENERATED_ID_PREFIX: &str = "generated-";

/// Service names tagged when they appear inside a node type.
pub const SERVICE_TAGS: [&str; 9] = [
    "gmail", "google", "openai", "langchain", "webhook", "http", "database", "postgres",
    "supabase",
];

/// Parameter substrings that hint at inline credentials.
pub const CREDENTIAL_KEYWORDS: [&str; 6] = ["api", "key", "token", "secret", "password", "auth"];

// Complexity tiers (strictly greater than)
pub const COMPLEX_NODE_THRESHOLD: usize = 15;
pub const COMPLEX_CONNECTION_THRESHOLD: usize = 20;
pub const MODERATE_NODE_THRESHOLD: usize = 7;
pub const MODERATE_CONNECTION_THRESHOLD: usize = 10;

// Validation thresholds
pub const MIN_WORKFLOW_NAME_LEN: usize = 5;
pub const MAX_NODES_BEFORE_SPLIT: usize = 50;
pub const MIN_NODES_FOR_STICKY_NOTES: usize = 10;
