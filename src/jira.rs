// src/jira.rs
//! Networking utilities to create issues through the Jira REST API

use crate::config::{ExecutionContext, JiraConfig};
use log::{debug, error, info};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

pub const CREATE_ISSUE_PATH: &str = "/rest/api/2/issue/";

/// Failures of a single issue-creation request. Only the two auth statuses
/// are told apart; everything else is reported as-is.
#[derive(Debug, Error)]
pub enum JiraError {
    /// Wrong username or password.
    #[error("Jira rejected the credentials (401 Unauthorized)")]
    Unauthorized,

    /// Jira locks the account behind a captcha after repeated failures.
    #[error("Jira refused access (403 Forbidden)")]
    Forbidden,

    #[error("Jira responded with HTTP {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Anything that can create one Jira issue from a rendered JSON payload.
pub trait IssueCreator {
    fn create_issue(
        &self,
        ctx: &ExecutionContext,
        payload: String,
    ) -> impl Future<Output = Result<(), JiraError>>;
}

pub struct JiraClient {
    client: Client,
    create_url: String,
}

impl JiraClient {
    pub fn new(cfg: &JiraConfig) -> Result<Self, JiraError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(cfg.timeout_ms))
            .build()?;
        debug!("HTTP client built with timeout: {}ms", cfg.timeout_ms);

        Ok(Self {
            client,
            create_url: create_issue_url(&cfg.base_url),
        })
    }

    pub fn create_url(&self) -> &str {
        &self.create_url
    }
}

impl IssueCreator for JiraClient {
    async fn create_issue(&self, ctx: &ExecutionContext, payload: String) -> Result<(), JiraError> {
        info!("Sending POST request to URL: {} (story {})", self.create_url, ctx.story_key);
        debug!("Payload: {}", payload);

        let res = self
            .client
            .post(&self.create_url)
            .basic_auth(&ctx.username, Some(&ctx.password))
            .header(CONTENT_TYPE, "application/json")
            .body(payload)
            .send()
            .await?;

        let status = res.status();
        debug!("Received response status: {}", status);

        match status {
            s if s.is_success() => Ok(()),
            StatusCode::UNAUTHORIZED => Err(JiraError::Unauthorized),
            StatusCode::FORBIDDEN => Err(JiraError::Forbidden),
            _ => {
                let body = res.text().await.unwrap_or_else(|_| "N/A".to_string());
                error!("Jira responded with HTTP {} and body: {}", status, body);
                Err(JiraError::Status { status, body })
            }
        }
    }
}

pub fn create_issue_url(base_url: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), CREATE_ISSUE_PATH)
}
