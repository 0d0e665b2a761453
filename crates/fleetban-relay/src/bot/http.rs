//! Bot export over HTTP

use std::time::Duration;

use async_trait::async_trait;
use fleetban_core::{BotChannel, BotExport, RelayDeliveryError, RelayResult};
use reqwest::{header, Client, Url};

use crate::error::RelaySetupError;

/// POSTs exports as JSON to a fixed endpoint
#[derive(Clone)]
pub struct HttpBotChannel {
    client: Client,
    url: Url,
    token: Option<String>,
    timeout: Duration,
}

impl HttpBotChannel {
    /// Build a channel for `url`, attaching `token` as a bearer credential
    pub fn new(url: &str, token: Option<String>, timeout: Duration) -> Result<Self, RelaySetupError> {
        let url = Url::parse(url).map_err(|e| RelaySetupError::InvalidBotUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            url,
            token,
            timeout,
        })
    }

    fn transport_error(&self, err: &reqwest::Error) -> RelayDeliveryError {
        if err.is_timeout() {
            RelayDeliveryError::Timeout(self.timeout)
        } else {
            RelayDeliveryError::Transport(err.to_string())
        }
    }
}

impl std::fmt::Debug for HttpBotChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpBotChannel")
            .field("url", &self.url.as_str())
            .field("authenticated", &self.token.is_some())
            .finish()
    }
}

#[async_trait]
impl BotChannel for HttpBotChannel {
    async fn export(&self, payload: &BotExport) -> RelayResult {
        let mut request = self.client.post(self.url.clone()).json(payload);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| self.transport_error(&e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RelayDeliveryError::Rejected(status.as_u16()));
        }

        tracing::debug!(status = status.as_u16(), "Bot export accepted");
        Ok(())
    }
}
