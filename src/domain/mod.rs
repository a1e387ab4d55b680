use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub mod error;
pub mod mask;
pub mod path;

pub use error::{FieldError, FormError, FormResult, LookupError, LookupResult};

/// Kind of a form field; determines seeding, validation, and encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    Number,
    Date,
    Time,
    Select,
    Checkbox,
    CheckboxGroup,
    File,
    Hidden,
    /// Text input whose visibility is toggled by another field; same
    /// engine semantics as `Text`.
    ConditionalText,
}

impl FieldKind {
    /// Whether this kind may carry an input mask.
    pub fn supports_mask(&self) -> bool {
        matches!(self, FieldKind::Text | FieldKind::ConditionalText)
    }
}

/// One choice in a `Select` or `CheckboxGroup` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub label: String,
    pub value: String,
}

impl SelectOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Static, author-supplied description of one form field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Unique key; dot-paths address nested attributes of the target
    /// record (e.g. "guardian.cpf")
    pub name: String,
    pub kind: FieldKind,
    #[serde(default)]
    pub required: bool,
    /// Positional input mask using `9` as digit placeholder
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mask: Option<String>,
    /// Choices for Select and CheckboxGroup kinds; ignored otherwise
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<SelectOption>,
    /// Initial value, type-compatible with `kind`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            required: false,
            mask: None,
            options: Vec::new(),
            default: None,
        }
    }

    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Text)
    }

    pub fn select(name: impl Into<String>, options: Vec<SelectOption>) -> Self {
        let mut field = Self::new(name, FieldKind::Select);
        field.options = options;
        field
    }

    pub fn checkbox_group(name: impl Into<String>, options: Vec<SelectOption>) -> Self {
        let mut field = Self::new(name, FieldKind::CheckboxGroup);
        field.options = options;
        field
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn mask(mut self, mask: impl Into<String>) -> Self {
        self.mask = Some(mask.into());
        self
    }

    pub fn default_value(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }
}

/// An in-memory handle to a file chosen for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHandle {
    pub filename: String,
    /// MIME type if known; inferred from the filename during encoding
    /// when absent
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

impl FileHandle {
    pub fn new(filename: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            content_type: None,
            data,
        }
    }
}

/// Current typed value of one field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Text(String),
    Flag(bool),
    Items(Vec<String>),
    File(FileHandle),
}

impl FieldValue {
    /// Convert a JSON default into a typed value; `None` if the JSON shape
    /// does not fit any field value.
    pub fn from_json(value: &Value) -> Option<FieldValue> {
        match value {
            Value::Null => Some(FieldValue::Null),
            Value::Bool(b) => Some(FieldValue::Flag(*b)),
            Value::String(s) => Some(FieldValue::Text(s.clone())),
            Value::Number(n) => Some(FieldValue::Text(n.to_string())),
            Value::Array(items) => {
                let strings: Option<Vec<String>> = items
                    .iter()
                    .map(|v| v.as_str().map(|s| s.to_string()))
                    .collect();
                strings.map(FieldValue::Items)
            }
            Value::Object(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Emptiness as used by required-field validation: empty string, unset
    /// flag, empty group, or no value at all.
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Null => true,
            FieldValue::Text(s) => s.is_empty(),
            FieldValue::Flag(b) => !b,
            FieldValue::Items(items) => items.is_empty(),
            FieldValue::File(_) => false,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Flag(b)
    }
}

/// Address attributes returned by the postal-code lookup collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
}

/// Port for the postal-code address lookup collaborator.
#[async_trait]
pub trait AddressLookupPort: Send + Sync {
    /// Look up an address by its normalized digit-only postal code.
    async fn lookup(&self, code: &str) -> LookupResult<Address>;
}
