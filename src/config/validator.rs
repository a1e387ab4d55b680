use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

use crate::domain::{mask, FieldDescriptor, FieldKind};

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Duplicate entry: {0}")]
    Duplicate(String),
}

pub struct SchemaValidator;

impl SchemaValidator {
    /// Static validation of an author-supplied field schema, run before a
    /// form is ever mounted.
    pub fn validate(fields: &[FieldDescriptor]) -> Result<(), Vec<SchemaError>> {
        let mut errors = Vec::new();
        let mut seen_names = HashMap::new();

        for (idx, field) in fields.iter().enumerate() {
            if field.name.is_empty() {
                errors.push(SchemaError::MissingField(format!("fields[{}].name", idx)));
            }

            if let Some(prev_idx) = seen_names.insert(&field.name, idx) {
                errors.push(SchemaError::Duplicate(format!(
                    "Field name '{}' appears at indices {} and {}",
                    field.name, prev_idx, idx
                )));
            }

            if let Some(mask_str) = &field.mask {
                if !field.kind.supports_mask() {
                    errors.push(SchemaError::InvalidValue {
                        field: field.name.clone(),
                        reason: "masks are only supported on text-like fields".to_string(),
                    });
                } else if mask_str.is_empty() {
                    errors.push(SchemaError::InvalidValue {
                        field: field.name.clone(),
                        reason: "mask must not be empty".to_string(),
                    });
                } else if let Err(e) = mask::mask_to_pattern(mask_str) {
                    errors.push(SchemaError::InvalidValue {
                        field: field.name.clone(),
                        reason: format!("mask does not compile: {}", e),
                    });
                }
            }

            if matches!(field.kind, FieldKind::Select | FieldKind::CheckboxGroup)
                && field.options.is_empty()
            {
                errors.push(SchemaError::InvalidValue {
                    field: field.name.clone(),
                    reason: "select and checkbox group fields require options".to_string(),
                });
            }

            if let Some(default) = &field.default {
                if let Err(reason) = Self::check_default(field.kind, default) {
                    errors.push(SchemaError::InvalidValue {
                        field: field.name.clone(),
                        reason,
                    });
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn check_default(kind: FieldKind, default: &Value) -> Result<(), String> {
        match kind {
            FieldKind::Checkbox => {
                if default.is_boolean() {
                    Ok(())
                } else {
                    Err("checkbox default must be a boolean".to_string())
                }
            }
            FieldKind::CheckboxGroup => match default.as_array() {
                Some(items) if items.iter().all(|v| v.is_string()) => Ok(()),
                _ => Err("checkbox group default must be an array of strings".to_string()),
            },
            FieldKind::File => Err("file fields cannot carry a default".to_string()),
            _ => {
                if default.is_string() || default.is_number() || default.is_null() {
                    Ok(())
                } else {
                    Err("default must be a string".to_string())
                }
            }
        }
    }
}
