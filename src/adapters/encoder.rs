//! Submission payload encoders.
//!
//! A clean [`FormState`] is serialized into one of two shapes: a flat
//! key/value JSON object (Structured) or an ordered multipart-style part
//! list (Multipart). Masked values are always transmitted in their
//! canonical digit-only form, never the display form.

use serde_json::{Map, Value};

use crate::domain::{mask, FieldDescriptor, FieldKind, FieldValue, FormResult};
use crate::engine::FormState;

/// Caller-selected submission encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// Flat key -> JSON value object; arrays pass through as arrays
    Structured,
    /// Ordered named parts; arrays become one JSON-serialized string part,
    /// files become file parts
    Multipart,
}

/// One part of a multipart payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Part {
    Text {
        name: String,
        value: String,
    },
    File {
        name: String,
        filename: String,
        content_type: String,
        data: Vec<u8>,
    },
}

impl Part {
    pub fn name(&self) -> &str {
        match self {
            Part::Text { name, .. } | Part::File { name, .. } => name,
        }
    }
}

/// Encoded payload, ready for the transport adapter.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Structured(Map<String, Value>),
    Multipart(Vec<Part>),
}

impl Payload {
    pub fn as_structured(&self) -> Option<&Map<String, Value>> {
        match self {
            Payload::Structured(map) => Some(map),
            Payload::Multipart(_) => None,
        }
    }

    pub fn as_parts(&self) -> Option<&[Part]> {
        match self {
            Payload::Multipart(parts) => Some(parts),
            Payload::Structured(_) => None,
        }
    }
}

/// Encode a clean state. The engine checks for outstanding errors before
/// calling this.
pub fn encode(
    fields: &[FieldDescriptor],
    state: &FormState,
    encoding: Encoding,
) -> FormResult<Payload> {
    match encoding {
        Encoding::Structured => encode_structured(fields, state),
        Encoding::Multipart => encode_multipart(fields, state),
    }
}

fn canonical_text(field: &FieldDescriptor, value: &str) -> String {
    if field.mask.is_some() && !value.is_empty() {
        mask::remove_mask(value)
    } else {
        value.to_string()
    }
}

fn encode_structured(fields: &[FieldDescriptor], state: &FormState) -> FormResult<Payload> {
    let mut map = Map::new();
    for field in fields {
        let value = state
            .values
            .get(&field.name)
            .cloned()
            .unwrap_or(FieldValue::Null);
        let json = match value {
            FieldValue::Null => Value::Null,
            FieldValue::Text(s) => Value::String(canonical_text(field, &s)),
            FieldValue::Flag(b) => Value::Bool(b),
            FieldValue::Items(items) => {
                Value::Array(items.into_iter().map(Value::String).collect())
            }
            // Binary content is not JSON-representable; uploads go through
            // the multipart encoding.
            FieldValue::File(_) => continue,
        };
        map.insert(field.name.clone(), json);
    }
    Ok(Payload::Structured(map))
}

fn encode_multipart(fields: &[FieldDescriptor], state: &FormState) -> FormResult<Payload> {
    let mut parts = Vec::new();
    for field in fields {
        let value = state
            .values
            .get(&field.name)
            .cloned()
            .unwrap_or(FieldValue::Null);
        match value {
            FieldValue::Null => {
                // Unselected file fields are omitted entirely.
                if field.kind != FieldKind::File {
                    parts.push(Part::Text {
                        name: field.name.clone(),
                        value: String::new(),
                    });
                }
            }
            FieldValue::Text(s) => parts.push(Part::Text {
                name: field.name.clone(),
                value: canonical_text(field, &s),
            }),
            FieldValue::Flag(b) => parts.push(Part::Text {
                name: field.name.clone(),
                value: b.to_string(),
            }),
            FieldValue::Items(items) => parts.push(Part::Text {
                name: field.name.clone(),
                value: serde_json::to_string(&items)?,
            }),
            FieldValue::File(file) => {
                let content_type = file.content_type.clone().unwrap_or_else(|| {
                    mime_guess::from_path(&file.filename)
                        .first_or_octet_stream()
                        .to_string()
                });
                parts.push(Part::File {
                    name: field.name.clone(),
                    filename: file.filename,
                    content_type,
                    data: file.data,
                });
            }
        }
    }
    Ok(Payload::Multipart(parts))
}
