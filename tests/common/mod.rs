//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value, json};
use tempfile::TempDir;

/// Builder for export files containing a JSON array of conversations
pub struct ExportBuilder {
    temp_dir: TempDir,
    records: Vec<Value>,
}

impl ExportBuilder {
    /// Create a new builder with an empty export
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self { temp_dir, records: Vec::new() }
    }

    /// Add a conversation
    pub fn with_conversation(mut self, conversation: ConversationBuilder) -> Self {
        self.records.push(conversation.to_value());
        self
    }

    /// Add an arbitrary record as-is
    pub fn with_raw(mut self, record: Value) -> Self {
        self.records.push(record);
        self
    }

    /// Write `conversations.json` and return the fixture (consumes self)
    pub fn build(mut self) -> ExportFixture {
        let content = serde_json::to_string(&Value::Array(std::mem::take(&mut self.records)))
            .expect("Failed to serialize export");
        self.build_with_content(&content)
    }

    /// Write the given text as the export file instead of the collected records
    pub fn build_with_content(self, content: &str) -> ExportFixture {
        let path = self.temp_dir.path().join("conversations.json");
        fs::write(&path, content).expect("Failed to write export");
        ExportFixture { temp_dir: self.temp_dir, path }
    }
}

impl Default for ExportBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A written export; the temp directory lives as long as the fixture
pub struct ExportFixture {
    temp_dir: TempDir,
    path: PathBuf,
}

impl ExportFixture {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn dir(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn index_path(&self) -> PathBuf {
        self.dir().join("conversations.json.index")
    }

    pub fn metadata_path(&self) -> PathBuf {
        self.dir().join("conversations.json.index.meta.json")
    }
}

/// Builder for one conversation record
pub struct ConversationBuilder {
    id: String,
    title: Option<String>,
    create_time: Option<f64>,
    update_time: Option<f64>,
    model: Option<String>,
    is_archived: bool,
    nodes: Vec<(String, Value)>,
}

impl ConversationBuilder {
    /// Create a conversation created at 2023-11-14T22:13:20Z with no messages
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            title: Some("Test conversation".to_string()),
            create_time: Some(1700000000.0),
            update_time: None,
            model: None,
            is_archived: false,
            nodes: vec![("root".to_string(), json!({ "id": "root", "message": null }))],
        }
    }

    pub fn title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    pub fn untitled(mut self) -> Self {
        self.title = None;
        self
    }

    pub fn create_time(mut self, create_time: f64) -> Self {
        self.create_time = Some(create_time);
        self
    }

    /// Omit `create_time` entirely
    pub fn without_create_time(mut self) -> Self {
        self.create_time = None;
        self
    }

    pub fn update_time(mut self, update_time: f64) -> Self {
        self.update_time = Some(update_time);
        self
    }

    pub fn model(mut self, model: &str) -> Self {
        self.model = Some(model.to_string());
        self
    }

    pub fn archived(mut self) -> Self {
        self.is_archived = true;
        self
    }

    /// Add a message node
    pub fn message(mut self, message: MessageBuilder) -> Self {
        let node_id = format!("node-{}", message.id);
        self.nodes.push((node_id, json!({ "parent": "root", "message": message.to_value() })));
        self
    }

    /// Add a node with no message payload
    pub fn structural_node(mut self, node_id: &str) -> Self {
        self.nodes.push((node_id.to_string(), json!({ "id": node_id, "message": null })));
        self
    }

    pub fn to_value(&self) -> Value {
        let mut record = Map::new();
        record.insert("id".to_string(), json!(self.id));
        if let Some(title) = &self.title {
            record.insert("title".to_string(), json!(title));
        }
        if let Some(create_time) = self.create_time {
            record.insert("create_time".to_string(), json!(create_time));
        }
        if let Some(update_time) = self.update_time {
            record.insert("update_time".to_string(), json!(update_time));
        }
        if let Some(model) = &self.model {
            record.insert("default_model_slug".to_string(), json!(model));
        }
        record.insert("is_archived".to_string(), json!(self.is_archived));

        let mapping: Map<String, Value> = self.nodes.iter().cloned().collect();
        record.insert("mapping".to_string(), Value::Object(mapping));
        Value::Object(record)
    }
}

/// Builder for one message payload
pub struct MessageBuilder {
    id: String,
    role: String,
    author_name: Option<String>,
    create_time: Option<f64>,
    parts: Vec<Value>,
}

impl MessageBuilder {
    pub fn user(id: &str, text: &str) -> Self {
        Self::with_role(id, "user", text)
    }

    pub fn assistant(id: &str, text: &str) -> Self {
        Self::with_role(id, "assistant", text)
    }

    fn with_role(id: &str, role: &str, text: &str) -> Self {
        Self {
            id: id.to_string(),
            role: role.to_string(),
            author_name: None,
            create_time: None,
            parts: vec![json!(text)],
        }
    }

    pub fn at(mut self, create_time: f64) -> Self {
        self.create_time = Some(create_time);
        self
    }

    pub fn author_name(mut self, name: &str) -> Self {
        self.author_name = Some(name.to_string());
        self
    }

    /// Replace the content parts
    pub fn parts(mut self, parts: Vec<Value>) -> Self {
        self.parts = parts;
        self
    }

    pub fn to_value(&self) -> Value {
        json!({
            "id": self.id,
            "author": { "role": self.role, "name": self.author_name },
            "create_time": self.create_time,
            "content": { "content_type": "text", "parts": self.parts }
        })
    }
}

/// The worked example: one conversation, two messages, created 2023-11-14
pub fn trip_planning() -> ConversationBuilder {
    ConversationBuilder::new("c1")
        .title("Trip planning")
        .model("gpt-4")
        .message(MessageBuilder::assistant("m2", "World").at(1700000002.0))
        .message(MessageBuilder::user("m1", "Hello").at(1700000001.0))
}

/// A small multi-day corpus
pub fn realistic_export() -> ExportFixture {
    ExportBuilder::new()
        .with_conversation(trip_planning())
        .with_conversation(
            ConversationBuilder::new("c2")
                .title("Rust borrow checker")
                .create_time(1699948800.0)
                .model("gpt-4o")
                .message(MessageBuilder::user("q", "Why does the borrow checker reject this?").at(1699948801.0))
                .message(MessageBuilder::assistant("a", "Because the reference outlives the value.").at(1699948802.0)),
        )
        .with_conversation(
            ConversationBuilder::new("c3")
                .untitled()
                .create_time(1700035200.0)
                .model("gpt-4")
                .message(MessageBuilder::user("q", "Packing list for a Kyoto trip").at(1700035201.0)),
        )
        .with_conversation(ConversationBuilder::new("skipped").without_create_time())
        .build()
}
