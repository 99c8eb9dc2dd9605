use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Abstract field types as the entity-binding layer describes them. `Custom`
/// carries an application-defined type name that may or may not translate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    FullText,
    Keyword,
    Integer,
    Long,
    Float,
    Double,
    Bool,
    Date,
    Custom(String),
}

/// One indexed field as described by the entity-binding collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: String,
    pub kind: FieldKind,
    pub analyzer: Option<String>,
    pub stored: bool,
    pub indexed: bool,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            analyzer: None,
            stored: false,
            indexed: true,
        }
    }

    pub fn with_analyzer(mut self, analyzer: impl Into<String>) -> Self {
        self.analyzer = Some(analyzer.into());
        self
    }

    pub fn stored(mut self) -> Self {
        self.stored = true;
        self
    }

    pub fn not_indexed(mut self) -> Self {
        self.indexed = false;
        self
    }
}

/// One entity type's contribution to a physical index. Several bindings may
/// target the same index; their fields are merged during translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityBinding {
    pub entity: String,
    pub fields: Vec<FieldDescriptor>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DynamicMapping {
    Strict,
    False,
    True,
}

/// Translation-time knobs, read-only during a `translate` call.
#[derive(Debug, Clone)]
pub struct ExecutionOptions {
    pub dynamic_mapping: DynamicMapping,
    pub multi_tenancy: bool,
}

impl Default for ExecutionOptions {
    fn default() -> Self {
        Self {
            dynamic_mapping: DynamicMapping::Strict,
            multi_tenancy: false,
        }
    }
}

/// Concrete mapping for one field, serialized exactly as the service's
/// mapping API expects. Service-side defaults (`store: false`, `index: true`)
/// are omitted so documents stay minimal and byte-stable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMapping {
    #[serde(rename = "type")]
    pub field_type: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub analyzer: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not", default)]
    pub store: bool,
    #[serde(skip_serializing_if = "is_true", default = "default_true")]
    pub index: bool,
}

fn is_true(value: &bool) -> bool {
    *value
}

fn default_true() -> bool {
    true
}

/// The mapping half of an index's schema. `BTreeMap` keeps property order
/// sorted, so serialization is deterministic and usable for drift comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingDocument {
    pub dynamic: DynamicMapping,
    pub properties: BTreeMap<String, FieldMapping>,
}

/// Everything needed to create one index: its name plus the settings and
/// mapping documents. Produced by [`translate`](crate::schema::translate),
/// owned by the caller afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexMetadata {
    pub name: String,
    pub settings: IndexSettings,
    pub mapping: MappingDocument,
}

impl IndexMetadata {
    /// The JSON body for an index-creation call. Empty settings are omitted
    /// rather than sent as an empty object.
    pub fn create_body(&self) -> Value {
        let mut body = serde_json::Map::new();
        if !self.settings.is_empty() {
            body.insert(
                "settings".to_string(),
                serde_json::json!({ "index": self.settings }),
            );
        }
        // MappingDocument is plain maps and strings; serialization cannot fail.
        body.insert(
            "mappings".to_string(),
            serde_json::to_value(&self.mapping).expect("mapping document serializes infallibly"),
        );
        Value::Object(body)
    }
}

/// The subset of a remote index's settings this layer understands. Unknown
/// keys in the service's settings document are deliberately tolerated; the
/// default instance is the valid "no custom settings" state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexSettings {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub analysis: Option<Analysis>,
}

impl IndexSettings {
    pub fn is_empty(&self) -> bool {
        self.analysis.as_ref().is_none_or(Analysis::is_empty)
    }
}

/// Raw analyzer/tokenizer/filter definitions, keyed by name. Definitions are
/// kept as raw JSON; this layer transports them, it does not interpret them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    #[serde(skip_serializing_if = "BTreeMap::is_empty", default)]
    pub analyzer: BTreeMap<String, Value>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty", default)]
    pub tokenizer: BTreeMap<String, Value>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty", default)]
    pub filter: BTreeMap<String, Value>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty", default)]
    pub char_filter: BTreeMap<String, Value>,
}

impl Analysis {
    pub fn is_empty(&self) -> bool {
        self.analyzer.is_empty()
            && self.tokenizer.is_empty()
            && self.filter.is_empty()
            && self.char_filter.is_empty()
    }
}
