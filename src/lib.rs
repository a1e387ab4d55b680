//! # Formwork - Schema-Driven Form Engine
//!
//! Formwork is the form core of an administrative web client: a
//! schema-driven state owner that applies positional input masks, validates
//! field values, and serializes clean forms into submission payloads.
//!
//! ## Features
//!
//! - **Mask codec**: bidirectional transform between masked display strings
//!   and canonical digit strings, with compiled full-match patterns
//! - **Field schemas**: declarative field descriptors (text, select,
//!   checkbox groups, files, ...) loadable from JSON or YAML
//! - **Validation**: immediate format feedback on edit, batch
//!   required/format checks on submit
//! - **Encoders**: structured JSON object or ordered multipart part list,
//!   always carrying unmasked canonical values
//! - **Address autofill**: debounced, supersede-on-reschedule postal-code
//!   lookup through a pluggable collaborator port
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use formwork::{Encoding, FieldDescriptor, FormEngine};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let fields = vec![
//!         FieldDescriptor::text("name").required(true),
//!         FieldDescriptor::text("phone").mask("(99) 99999-9999"),
//!     ];
//!
//!     let mut form = FormEngine::new(fields)?;
//!     form.on_field_change("name", "Ana Souza").await?;
//!     form.on_field_change("phone", "11987654321").await?;
//!
//!     if form.validate_all().await.is_empty() {
//!         let payload = form.encode(Encoding::Structured).await?;
//!         // hand the payload to the transport adapter
//!         let _ = payload;
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! Formwork follows Hexagonal Architecture:
//! - **Domain**: field model, mask codec, path utility, ports
//! - **Engine**: per-instance form state owner and validation
//! - **Adapters**: payload encoders, lookup client, submission transport
//! - **Config**: settings and schema loading/validation

pub mod adapters;
pub mod config;
pub mod domain;
pub mod engine;

pub use adapters::encoder::{Encoding, Part, Payload};
pub use config::{EngineSettings, LookupSettings};
pub use domain::{
    Address, AddressLookupPort, FieldDescriptor, FieldError, FieldKind, FieldValue, FileHandle,
    FormError, SelectOption,
};
pub use engine::{FormEngine, FormState};
