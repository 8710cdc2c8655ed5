use std::env;

use async_trait::async_trait;
use careflow_core::model::{FlowExecution, UserId};
use reqwest::Client;

use super::ExecutionSource;
use crate::error::SourceError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpSourceConfig {
    pub base_url: String,
    pub api_token: Option<String>,
}

impl HttpSourceConfig {
    #[must_use]
    pub fn new(base_url: impl Into<String>, api_token: Option<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_token: api_token.filter(|token| !token.trim().is_empty()),
        }
    }

    #[must_use]
    pub fn from_env() -> Option<Self> {
        let base_url = env::var("CAREFLOW_API_URL").ok()?;
        if base_url.trim().is_empty() {
            return None;
        }
        let api_token = env::var("CAREFLOW_API_TOKEN").ok();
        Some(Self::new(base_url, api_token))
    }

    #[must_use]
    pub fn executions_url(&self, user_id: UserId) -> String {
        format!(
            "{}/patients/{user_id}/flow-executions",
            self.base_url.trim_end_matches('/')
        )
    }
}

/// Fetches executions from the portal REST API.
#[derive(Clone)]
pub struct HttpExecutionSource {
    client: Client,
    config: Option<HttpSourceConfig>,
}

impl HttpExecutionSource {
    #[must_use]
    pub fn new(config: Option<HttpSourceConfig>) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }
}

#[async_trait]
impl ExecutionSource for HttpExecutionSource {
    async fn list_for_patient(&self, user_id: UserId) -> Result<Vec<FlowExecution>, SourceError> {
        let config = self.config.as_ref().ok_or(SourceError::Disabled)?;

        let mut request = self.client.get(config.executions_url(user_id));
        if let Some(token) = &config.api_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(SourceError::HttpStatus(response.status()));
        }

        let executions: Vec<FlowExecution> = response.json().await?;
        Ok(executions)
    }
}
