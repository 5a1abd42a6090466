//! REST client for the Home Assistant API
//!
//! Thin gateway over the endpoints this service consumes: entity states,
//! service calls, and automation config persistence. All requests carry a
//! bearer token and a 10 second timeout; failures come back as structured
//! [`HaClientError`] values for the web layer to present fail-soft.

use std::collections::HashMap;
use std::time::Duration;

use ab_automation::Automation;
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Timeout applied to every Home Assistant request
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Result type for gateway operations
pub type HaResult<T> = Result<T, HaClientError>;

/// Errors from the Home Assistant gateway
#[derive(Debug, Error)]
pub enum HaClientError {
    /// The request never completed (connection refused, timeout, ...)
    #[error("connection error: {0}")]
    Request(#[from] reqwest::Error),

    /// Home Assistant answered with a non-success status
    #[error("Home Assistant returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The automation could not be rendered to YAML
    #[error("failed to render automation YAML: {0}")]
    Render(#[from] serde_yaml::Error),
}

impl HaClientError {
    /// Upstream status code, when Home Assistant answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            HaClientError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// One entity from `GET /api/states`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityState {
    pub entity_id: String,
    pub state: String,
    #[serde(default)]
    pub attributes: HashMap<String, serde_json::Value>,
}

impl EntityState {
    /// Domain part of the entity id ("light" for "light.living_room")
    pub fn domain(&self) -> &str {
        self.entity_id.split('.').next().unwrap_or("")
    }

    /// The `friendly_name` attribute, falling back to the entity id
    pub fn friendly_name(&self) -> &str {
        self.attributes
            .get("friendly_name")
            .and_then(|v| v.as_str())
            .unwrap_or(&self.entity_id)
    }
}

/// Client for a single Home Assistant instance
pub struct HaClient {
    base_url: String,
    token: String,
    http: reqwest::Client,
}

impl HaClient {
    /// Build a client for `base_url` (e.g. "http://supervisor/core")
    /// authenticating with `token`.
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> HaResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Ok(Self {
            base_url,
            token: token.into(),
            http,
        })
    }

    /// Fetch all entity states
    pub async fn states(&self) -> HaResult<Vec<EntityState>> {
        let url = format!("{}/api/states", self.base_url);
        debug!(%url, "fetching entity states");
        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await?;
        let response = check_status(response).await?;
        Ok(response.json().await?)
    }

    /// Call `<domain>.<service>` against a single entity
    pub async fn call_service(
        &self,
        domain: &str,
        service: &str,
        entity_id: &str,
    ) -> HaResult<()> {
        let url = format!("{}/api/services/{domain}/{service}", self.base_url);
        debug!(%url, %entity_id, "calling service");
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.token)
            .json(&json!({ "entity_id": entity_id }))
            .send()
            .await?;
        check_status(response).await?;
        Ok(())
    }

    /// Persist an automation as a named config entry.
    ///
    /// Reloads automations first (a failed reload is only logged, matching
    /// how Home Assistant tolerates stale configs), then posts the YAML
    /// rendering. Returns the derived filename.
    pub async fn save_automation(&self, automation: &Automation) -> HaResult<String> {
        let filename = automation.config_filename();
        info!(%filename, "saving automation to Home Assistant");

        if let Err(error) = self.reload_automations().await {
            match error {
                HaClientError::Status { status, ref body } => {
                    warn!(status, body, "failed to reload automations");
                }
                other => return Err(other),
            }
        }

        let yaml = automation.to_yaml()?;
        let url = format!(
            "{}/api/config/automation/config/{filename}",
            self.base_url
        );
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.token)
            .json(&json!({ "content": yaml }))
            .send()
            .await?;
        check_status(response).await?;

        info!(%filename, "automation saved");
        Ok(filename)
    }

    /// Ask Home Assistant to reload automation configs
    pub async fn reload_automations(&self) -> HaResult<()> {
        let url = format!("{}/api/services/automation/reload", self.base_url);
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.token)
            .send()
            .await?;
        check_status(response).await?;
        Ok(())
    }
}

/// Map non-success responses to `HaClientError::Status`
async fn check_status(response: reqwest::Response) -> HaResult<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        let body = response.text().await.unwrap_or_default();
        Err(HaClientError::Status {
            status: status.as_u16(),
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_state_domain_and_friendly_name() {
        let entity: EntityState = serde_json::from_value(serde_json::json!({
            "entity_id": "light.living_room",
            "state": "on",
            "attributes": { "friendly_name": "Living Room" }
        }))
        .unwrap();
        assert_eq!(entity.domain(), "light");
        assert_eq!(entity.friendly_name(), "Living Room");
    }

    #[test]
    fn friendly_name_falls_back_to_entity_id() {
        let entity: EntityState = serde_json::from_value(serde_json::json!({
            "entity_id": "sensor.temp",
            "state": "21.5"
        }))
        .unwrap();
        assert_eq!(entity.friendly_name(), "sensor.temp");
    }

    #[test]
    fn base_url_trailing_slash_is_stripped() {
        let client = HaClient::new("http://supervisor/core/", "token").unwrap();
        assert_eq!(client.base_url, "http://supervisor/core");
    }
}
