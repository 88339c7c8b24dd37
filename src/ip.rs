use log::debug;
use reqwest::Client;

use crate::error::Result;

/// Asks an IP echo service for the caller's public address.
pub struct IpResolver {
    client: Client,
    url: String,
}

impl IpResolver {
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    /// One GET per call, no retry. The body is returned trimmed and is not
    /// validated; the registrar enforces its own allow-list.
    pub async fn lookup(&self) -> Result<String> {
        debug!("Looking up public IP via {}", self.url);

        let body = self
            .client
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        Ok(body.trim().to_string())
    }
}
