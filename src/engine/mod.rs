//! Schema-driven form state owner.
//!
//! A [`FormEngine`] holds one [`FormState`] for a given field schema and
//! mediates every edit, validation pass, and submission encoding. Masked
//! fields are kept in display form while editing and canonicalized to their
//! digit-only form when encoded.

use regex::Regex;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::adapters::encoder::{self, Encoding, Payload};
use crate::config::{LookupSettings, SchemaValidator};
use crate::domain::{
    mask, path, AddressLookupPort, FieldDescriptor, FieldError, FieldKind, FieldValue, FormError,
    FormResult,
};

mod lookup;

use lookup::LookupScheduler;

/// Mutable per-form-instance record: current values and validation errors.
///
/// Lives only for the editing session; it is not a cache and not durable.
#[derive(Debug, Clone, Default)]
pub struct FormState {
    pub values: HashMap<String, FieldValue>,
    pub errors: HashMap<String, FieldError>,
}

impl FormState {
    /// Whether the form is submit-ready. Lookup failures are advisory and
    /// do not count against submission.
    pub fn is_clean(&self) -> bool {
        self.blocking_error_count() == 0
    }

    fn blocking_error_count(&self) -> usize {
        self.errors
            .values()
            .filter(|e| !matches!(e, FieldError::Lookup(_)))
            .count()
    }
}

/// Owns a [`FormState`] for a field schema and mediates edits, validation,
/// and submission encoding.
pub struct FormEngine {
    fields: Vec<FieldDescriptor>,
    patterns: HashMap<String, Regex>,
    state: Arc<RwLock<FormState>>,
    lookup: Option<LookupScheduler>,
}

impl FormEngine {
    /// Build an engine for a schema. The schema is validated up front and
    /// every declared mask is compiled once.
    pub fn new(fields: Vec<FieldDescriptor>) -> FormResult<Self> {
        SchemaValidator::validate(&fields).map_err(|errors| {
            let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            FormError::Schema(messages.join("\n"))
        })?;

        let mut patterns = HashMap::new();
        for field in &fields {
            if let Some(mask_str) = &field.mask {
                let pattern =
                    mask::mask_to_pattern(mask_str).map_err(|e| FormError::InvalidMask {
                        field: field.name.clone(),
                        reason: e.to_string(),
                    })?;
                patterns.insert(field.name.clone(), pattern);
            }
        }

        let state = Self::initial_state(&fields);

        Ok(Self {
            fields,
            patterns,
            state: Arc::new(RwLock::new(state)),
            lookup: None,
        })
    }

    /// Attach the postal-code autofill collaborator. Edits to the
    /// configured postal field trigger a debounced address lookup.
    pub fn with_lookup(mut self, port: Arc<dyn AddressLookupPort>, settings: LookupSettings) -> Self {
        self.lookup = Some(LookupScheduler::new(port, settings));
        self
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    fn initial_state(fields: &[FieldDescriptor]) -> FormState {
        let mut state = FormState::default();
        for field in fields {
            state
                .values
                .insert(field.name.clone(), Self::seed_value(field));
        }
        state
    }

    fn seed_value(field: &FieldDescriptor) -> FieldValue {
        if let Some(default) = &field.default {
            if let Some(value) = FieldValue::from_json(default) {
                return Self::masked_seed(field, value);
            }
        }
        match field.kind {
            FieldKind::Checkbox => FieldValue::Flag(false),
            FieldKind::CheckboxGroup => FieldValue::Items(Vec::new()),
            FieldKind::File => FieldValue::Null,
            _ => FieldValue::Text(String::new()),
        }
    }

    // Masked fields never hold raw keystrokes, seeded values included.
    fn masked_seed(field: &FieldDescriptor, value: FieldValue) -> FieldValue {
        match (&field.mask, value) {
            (Some(mask_str), FieldValue::Text(s)) if !s.is_empty() => {
                FieldValue::Text(mask::apply_mask(&mask::remove_mask(&s), mask_str))
            }
            (_, value) => value,
        }
    }

    fn descriptor(&self, name: &str) -> FormResult<&FieldDescriptor> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .ok_or_else(|| FormError::UnknownField(name.to_string()))
    }

    /// Record one field edit.
    ///
    /// For masked fields the raw input is reduced to digits, reformatted
    /// through the mask, and checked against the compiled pattern; a
    /// non-empty value that does not match is flagged immediately. An empty
    /// value is never flagged at edit time; required-ness is a submit-time
    /// concern. Unmasked fields store the value verbatim and clear any
    /// previous error.
    ///
    /// Editing the postal-code field to a complete code schedules the
    /// debounced address lookup; a newer edit supersedes any pending or
    /// in-flight lookup.
    pub async fn on_field_change(
        &mut self,
        name: &str,
        raw: impl Into<FieldValue>,
    ) -> FormResult<()> {
        let raw = raw.into();
        let field = self.descriptor(name)?.clone();

        let (new_value, new_error) = match (&field.mask, raw) {
            (Some(mask_str), FieldValue::Text(input)) => {
                let digits = mask::remove_mask(&input);
                let masked = mask::apply_mask(&digits, mask_str);
                let error = match self.patterns.get(&field.name) {
                    Some(pattern) if !masked.is_empty() && !pattern.is_match(&masked) => {
                        Some(FieldError::FormatMismatch)
                    }
                    _ => None,
                };
                (FieldValue::Text(masked), error)
            }
            (_, value) => (value, None),
        };

        let digits = new_value.as_text().map(mask::remove_mask);

        {
            let mut state = self.state.write().await;
            state.values.insert(field.name.clone(), new_value);
            match new_error {
                Some(error) => {
                    state.errors.insert(field.name.clone(), error);
                }
                None => {
                    state.errors.remove(&field.name);
                }
            }
        }

        if let Some(scheduler) = self.lookup.as_mut() {
            if field.name == scheduler.postal_field() {
                // Every edit to the postal field supersedes a pending or
                // in-flight lookup; only a complete code schedules a new one.
                scheduler.supersede();
                if let Some(digits) = digits {
                    if digits.len() == scheduler.code_length() {
                        scheduler.schedule(digits, Arc::clone(&self.state));
                    }
                }
            }
        }

        Ok(())
    }

    /// Toggle one option of a checkbox group. Adding is idempotent;
    /// removing a value that is not present is a no-op. Clears the field's
    /// error either way.
    pub async fn on_checkbox_group_change(
        &self,
        name: &str,
        option_value: &str,
        checked: bool,
    ) -> FormResult<()> {
        self.descriptor(name)?;

        let mut state = self.state.write().await;
        let mut items = match state.values.get(name) {
            Some(FieldValue::Items(items)) => items.clone(),
            _ => Vec::new(),
        };
        if checked {
            if !items.iter().any(|v| v == option_value) {
                items.push(option_value.to_string());
            }
        } else {
            items.retain(|v| v != option_value);
        }
        state.values.insert(name.to_string(), FieldValue::Items(items));
        state.errors.remove(name);
        Ok(())
    }

    /// Submit-time batch validation. Re-checks every field: required fields
    /// must be non-empty for their kind, masked values must fully match
    /// their pattern. Format errors take precedence. Never fails; the
    /// returned map is stored on the state and an empty map means the form
    /// is submit-ready. Advisory lookup errors are kept on the state but
    /// excluded from the returned map.
    pub async fn validate_all(&self) -> HashMap<String, FieldError> {
        let mut state = self.state.write().await;
        let mut errors = HashMap::new();

        for field in &self.fields {
            let value = state.values.get(&field.name);

            if field.mask.is_some() {
                if let Some(FieldValue::Text(s)) = value {
                    if !s.is_empty() {
                        if let Some(pattern) = self.patterns.get(&field.name) {
                            if !pattern.is_match(s) {
                                errors.insert(field.name.clone(), FieldError::FormatMismatch);
                                continue;
                            }
                        }
                    }
                }
            }

            let empty = value.map(FieldValue::is_empty).unwrap_or(true);
            if field.required && empty {
                errors.insert(field.name.clone(), FieldError::Required);
            }
        }

        // Advisory lookup errors survive the pass on the state; they never
        // block submission and are not part of the returned map.
        let mut next_errors = errors.clone();
        for (name, error) in state.errors.iter() {
            if matches!(error, FieldError::Lookup(_)) && !next_errors.contains_key(name) {
                next_errors.insert(name.clone(), error.clone());
            }
        }
        state.errors = next_errors;
        errors
    }

    /// Encode the current values for submission. Masked values are
    /// transmitted in canonical digit-only form. Fails with
    /// [`FormError::ValidationOutstanding`] if any non-advisory error
    /// remains on the state.
    pub async fn encode(&self, encoding: Encoding) -> FormResult<Payload> {
        let state = self.state.read().await;
        let blocking = state.blocking_error_count();
        if blocking > 0 {
            return Err(FormError::ValidationOutstanding(blocking));
        }
        encoder::encode(&self.fields, &state, encoding)
    }

    /// Overwrite values from an existing record, resolving each field's
    /// dot-path name against the record. Absent paths leave the seeded
    /// value untouched; masked fields are reformatted through their mask.
    pub async fn seed_from_record(&self, record: &Value) {
        let mut state = self.state.write().await;
        for field in &self.fields {
            if let Some(value) = path::resolve(record, &field.name).and_then(FieldValue::from_json)
            {
                state
                    .values
                    .insert(field.name.clone(), Self::masked_seed(field, value));
            }
        }
    }

    /// Return the form to its freshly-initialized shape and cancel any
    /// pending lookup.
    pub async fn reset(&mut self) {
        if let Some(scheduler) = self.lookup.as_mut() {
            scheduler.cancel();
        }
        let mut state = self.state.write().await;
        *state = Self::initial_state(&self.fields);
    }

    /// Clone of the current state, for display binding and tests.
    pub async fn snapshot(&self) -> FormState {
        self.state.read().await.clone()
    }

    pub async fn value(&self, name: &str) -> Option<FieldValue> {
        self.state.read().await.values.get(name).cloned()
    }

    pub async fn error(&self, name: &str) -> Option<FieldError> {
        self.state.read().await.errors.get(name).cloned()
    }
}
