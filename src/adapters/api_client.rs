//! Submission transport for the backend API collaborator.
//!
//! Delivers an encoded payload with a single POST. No retry, no debounce,
//! and no engine-imposed timeout; outcome handling beyond the status check
//! belongs to the caller.

use serde_json::Value;
use tracing::info;

use crate::adapters::encoder::{Part, Payload};
use crate::config::ApiSettings;
use crate::domain::{FormError, FormResult};

pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(settings: &ApiSettings) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        }
    }

    /// POST a payload to `path` under the configured base URL. Structured
    /// payloads go as a JSON body, multipart payloads as a multipart form.
    pub async fn submit(&self, path: &str, payload: Payload) -> FormResult<Value> {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));

        let request = self.client.post(&url);
        let request = match payload {
            Payload::Structured(map) => request.json(&Value::Object(map)),
            Payload::Multipart(parts) => request.multipart(Self::to_form(parts)?),
        };

        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(FormError::Api {
                status: status.as_u16(),
                message,
            });
        }

        info!(%url, status = status.as_u16(), "form submitted");
        let body: Value = response.json().await.unwrap_or(Value::Null);
        Ok(body)
    }

    fn to_form(parts: Vec<Part>) -> FormResult<reqwest::multipart::Form> {
        let mut form = reqwest::multipart::Form::new();
        for part in parts {
            form = match part {
                Part::Text { name, value } => form.text(name, value),
                Part::File {
                    name,
                    filename,
                    content_type,
                    data,
                } => {
                    let file_part = reqwest::multipart::Part::bytes(data)
                        .file_name(filename)
                        .mime_str(&content_type)
                        .map_err(|e| FormError::Transport(e.to_string()))?;
                    form.part(name, file_part)
                }
            };
        }
        Ok(form)
    }
}
