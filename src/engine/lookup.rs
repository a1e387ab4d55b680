//! Debounced postal-code lookup scheduling.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::FormState;
use crate::config::LookupSettings;
use crate::domain::{AddressLookupPort, FieldError, FieldValue};

/// Schedules at most one pending lookup at a time. Rescheduling aborts the
/// pending task and bumps a generation counter, so a superseded lookup that
/// already left the debounce window can never apply a stale result.
pub(crate) struct LookupScheduler {
    port: Arc<dyn AddressLookupPort>,
    settings: LookupSettings,
    generation: Arc<AtomicU64>,
    pending: Option<JoinHandle<()>>,
}

impl LookupScheduler {
    pub fn new(port: Arc<dyn AddressLookupPort>, settings: LookupSettings) -> Self {
        Self {
            port,
            settings,
            generation: Arc::new(AtomicU64::new(0)),
            pending: None,
        }
    }

    pub fn postal_field(&self) -> &str {
        &self.settings.postal_field
    }

    pub fn code_length(&self) -> usize {
        self.settings.code_length
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    /// Abort any pending lookup and invalidate its generation, so a result
    /// already in flight can no longer apply. Called for every edit of the
    /// postal field, whether or not a new lookup gets scheduled.
    pub fn supersede(&mut self) {
        self.cancel();
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    /// Schedule a debounced lookup for `code`, superseding any pending or
    /// in-flight lookup. On success the street/city/state fields are
    /// overwritten; on failure only the postal-code field receives an
    /// advisory error.
    pub fn schedule(&mut self, code: String, state: Arc<RwLock<FormState>>) {
        self.cancel();

        let my_generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let generation = Arc::clone(&self.generation);
        let port = Arc::clone(&self.port);
        let settings = self.settings.clone();
        let delay = Duration::from_millis(settings.debounce_ms);

        debug!(code = %code, "scheduling postal code lookup");

        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;

            let result = port.lookup(&code).await;

            let mut state = state.write().await;
            // Last-write-wins by schedule time: if a newer lookup was
            // scheduled while this one was in flight, drop this result.
            if generation.load(Ordering::SeqCst) != my_generation {
                debug!(code = %code, "discarding superseded lookup result");
                return;
            }

            match result {
                Ok(address) => {
                    state
                        .values
                        .insert(settings.street_field.clone(), FieldValue::Text(address.street));
                    state
                        .values
                        .insert(settings.city_field.clone(), FieldValue::Text(address.city));
                    state
                        .values
                        .insert(settings.state_field.clone(), FieldValue::Text(address.state));
                    if matches!(
                        state.errors.get(&settings.postal_field),
                        Some(FieldError::Lookup(_))
                    ) {
                        state.errors.remove(&settings.postal_field);
                    }
                }
                Err(e) => {
                    warn!(code = %code, error = %e, "postal code lookup failed");
                    state
                        .errors
                        .insert(settings.postal_field.clone(), FieldError::Lookup(e.to_string()));
                }
            }
        }));
    }
}

impl Drop for LookupScheduler {
    fn drop(&mut self) {
        self.cancel();
    }
}
