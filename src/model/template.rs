use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// A template as it appears in the listing: just enough to request its details.
///
/// Both `id` and `name` are non-empty; the list parser refuses anything else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateRef {
    pub id: String,
    pub name: String,
}

impl TemplateRef {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// Merges a detail payload onto this reference.
    pub fn with_fields(self, fields: Option<Vec<TemplateField>>) -> DetailedTemplate {
        DetailedTemplate {
            id: self.id,
            name: self.name,
            fields,
        }
    }
}

/// A named data slot on a template page.
///
/// Kept exactly as the API returned it, so keys beyond `page_number` and
/// `name` (and entries missing either) survive into the store unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateField(Value);

impl TemplateField {
    pub fn new(page_number: i64, name: impl Into<String>) -> Self {
        Self(json!({ "page_number": page_number, "name": name.into() }))
    }

    pub fn page_number(&self) -> Option<i64> {
        self.0.get("page_number").and_then(Value::as_i64)
    }

    pub fn name(&self) -> Option<&str> {
        self.0.get("name").and_then(Value::as_str)
    }

    /// The raw JSON entry.
    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

impl From<Value> for TemplateField {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// A listed template merged with its field details. This is also the stored shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailedTemplate {
    pub id: String,
    pub name: String,
    /// `None` when the detail response carried no `fields` key.
    #[serde(default)]
    pub fields: Option<Vec<TemplateField>>,
}

impl DetailedTemplate {
    pub fn has_fields(&self) -> bool {
        self.fields.is_some()
    }
}
