//! HTTP adapter for the postal-code lookup collaborator.
//!
//! Speaks the ViaCEP-style interface: `GET {base}/ws/{code}/json/` with a
//! JSON body carrying `logradouro`/`localidade`/`uf` attributes, or
//! `{"erro": true}` for an unknown code.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::config::LookupSettings;
use crate::domain::{Address, AddressLookupPort, LookupError, LookupResult};

pub struct CepClient {
    client: reqwest::Client,
    base_url: String,
}

impl CepClient {
    pub fn new(settings: &LookupSettings) -> LookupResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct CepResponse {
    #[serde(default)]
    erro: bool,
    #[serde(default)]
    logradouro: String,
    #[serde(default)]
    localidade: String,
    #[serde(default)]
    uf: String,
}

#[async_trait]
impl AddressLookupPort for CepClient {
    async fn lookup(&self, code: &str) -> LookupResult<Address> {
        let url = format!("{}/ws/{}/json/", self.base_url, code);
        debug!(%url, "postal code lookup request");

        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(LookupError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: CepResponse = response
            .json()
            .await
            .map_err(|e| LookupError::Parse(format!("Failed to parse response: {}", e)))?;

        if body.erro {
            return Err(LookupError::NotFound(code.to_string()));
        }

        Ok(Address {
            street: body.logradouro,
            city: body.localidade,
            state: body.uf,
        })
    }
}
