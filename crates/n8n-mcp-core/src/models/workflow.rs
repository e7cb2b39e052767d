//! Structured view over a raw n8n workflow document.
//!
//! Raw documents are free-form JSON. Parsing never fails: collections that are
//! missing or of the wrong type become empty, scalar fields that are missing,
//! empty or of the wrong type become `None`.

use std::collections::BTreeMap;
use std::io;

use serde::Serialize;
use serde_json::ser::Formatter;
use serde_json::Value;

use crate::constants::{ERROR_TRIGGER_TYPE, STICKY_NOTE_TYPE};

/// A workflow tag as it appears in the `tags` array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowTag {
    /// Plain string entry
    Plain(String),
    /// `{ "name": ... }` object entry
    Named(String),
    /// Any other entry (object without a string name, number, ...)
    Opaque,
}

impl WorkflowTag {
    pub fn label(&self) -> Option<&str> {
        match self {
            WorkflowTag::Plain(name) | WorkflowTag::Named(name) => Some(name),
            WorkflowTag::Opaque => None,
        }
    }
}

/// The `type` field of a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// Non-empty string type such as `n8n-nodes-base.gmail`
    Typed(String),
    /// Non-string (or missing) type, kept as its JSON text with `", "` and
    /// `": "` separators
    Encoded(String),
    /// Empty string type
    Blank,
}

impl NodeKind {
    fn from_value(value: Option<&Value>) -> Self {
        match value {
            Some(Value::String(s)) if s.is_empty() => NodeKind::Blank,
            Some(Value::String(s)) => NodeKind::Typed(s.clone()),
            Some(other) => NodeKind::Encoded(spaced_json(other)),
            None => NodeKind::Encoded(Value::Null.to_string()),
        }
    }
}

/// A single node of a workflow.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub name: Option<String>,
    pub kind: NodeKind,
    /// `None` when the node has no `parameters` key at all.
    pub parameters: Option<Value>,
}

impl Node {
    fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        Some(Node {
            name: non_empty_str(object.get("name")),
            kind: NodeKind::from_value(object.get("type")),
            parameters: object.get("parameters").cloned(),
        })
    }

    /// Canonical type string, `None` for a blank type.
    pub fn canonical_type(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Typed(t) | NodeKind::Encoded(t) => Some(t),
            NodeKind::Blank => None,
        }
    }

    pub fn is_type(&self, node_type: &str) -> bool {
        self.canonical_type() == Some(node_type)
    }

    pub fn is_sticky_note(&self) -> bool {
        self.is_type(STICKY_NOTE_TYPE)
    }

    pub fn is_error_trigger(&self) -> bool {
        self.is_type(ERROR_TRIGGER_TYPE)
    }

    /// Final dot-delimited segment of a string type (`gmail` for `n8n-nodes-base.gmail`).
    pub fn type_base_name(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Typed(t) => t.rsplit('.').next(),
            _ => None,
        }
    }

    /// Text content of a sticky note.
    pub fn note_content(&self) -> Option<&str> {
        self.parameters
            .as_ref()
            .and_then(|p| p.get("content"))
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    /// Lowercased textual form of `parameters`, used for keyword scans.
    pub fn parameters_text(&self) -> Option<String> {
        self.parameters
            .as_ref()
            .map(|p| p.to_string().to_lowercase())
    }
}

/// Structured projection of a raw workflow document.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Workflow {
    pub id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub tags: Vec<WorkflowTag>,
    /// Set when `settings.errorWorkflow` holds a non-empty value.
    pub error_workflow: Option<String>,
    pub nodes: Vec<Node>,
    /// Source node name to its `main` outputs, each a list of connection targets.
    pub connections: BTreeMap<String, Vec<Vec<Value>>>,
}

impl Workflow {
    pub fn from_value(value: &Value) -> Self {
        let tags = value
            .get("tags")
            .and_then(Value::as_array)
            .map(|entries| entries.iter().map(parse_tag).collect())
            .unwrap_or_default();

        let nodes = value
            .get("nodes")
            .and_then(Value::as_array)
            .map(|entries| entries.iter().filter_map(Node::from_value).collect())
            .unwrap_or_default();

        let connections = value
            .get("connections")
            .and_then(Value::as_object)
            .map(|map| {
                map.iter()
                    .map(|(source, conn)| (source.clone(), parse_main_outputs(conn)))
                    .collect()
            })
            .unwrap_or_default();

        let error_workflow = value
            .get("settings")
            .and_then(|s| s.get("errorWorkflow"))
            .filter(|v| is_truthy(v))
            .map(scalar_text);

        Workflow {
            id: value.get("id").filter(|v| is_truthy(v)).and_then(id_text),
            name: non_empty_str(value.get("name")),
            description: non_empty_str(value.get("description")),
            tags,
            error_workflow,
            nodes,
            connections,
        }
    }

    /// Names of all nodes that have one, in document order.
    pub fn node_names(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().filter_map(|n| n.name.as_deref())
    }
}

/// Unwrap an enriched catalog record to the raw workflow it was built from.
/// Raw documents are returned unchanged.
pub fn original_document(value: &Value) -> &Value {
    match value.get("originalWorkflow") {
        Some(original) if original.is_object() => original,
        _ => value,
    }
}

/// Single-line JSON with a space after every `,` and `:`.
struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        writer.write_all(b": ")
    }
}

fn spaced_json(value: &Value) -> String {
    let mut buf = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, SpacedFormatter);
    match value.serialize(&mut serializer) {
        Ok(()) => String::from_utf8(buf).unwrap_or_else(|_| value.to_string()),
        Err(_) => value.to_string(),
    }
}

fn parse_tag(value: &Value) -> WorkflowTag {
    match value {
        Value::String(s) => WorkflowTag::Plain(s.clone()),
        Value::Object(map) => match map.get("name").and_then(Value::as_str) {
            Some(name) => WorkflowTag::Named(name.to_string()),
            None => WorkflowTag::Opaque,
        },
        _ => WorkflowTag::Opaque,
    }
}

fn parse_main_outputs(conn: &Value) -> Vec<Vec<Value>> {
    conn.get("main")
        .and_then(Value::as_array)
        .map(|outputs| {
            outputs
                .iter()
                .filter_map(Value::as_array)
                .cloned()
                .collect()
        })
        .unwrap_or_default()
}

fn non_empty_str(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn id_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}
