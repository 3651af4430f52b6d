//! Thin client for the Mail.tm REST API.
//!
//! Four operations, all plain request/response: list domains, create an
//! account, obtain a bearer token, list messages. Failures are returned as
//! explicit errors; callers decide whether to degrade. The lifecycle manager
//! and message mirror absorb every error here, because upstream binding is a
//! best-effort enhancement and never a hard dependency of mailbox creation.

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum MailTmError {
    #[error("upstream request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("upstream returned status {0}")]
    Status(StatusCode),
}

/// Reference to an upstream account created for a mailbox.
#[derive(Debug, Clone, Deserialize)]
pub struct AccountRef {
    pub id: String,
    #[serde(default)]
    pub address: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpstreamSender {
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub name: String,
}

/// Message summary as reported by the provider. Every field except `id` is
/// defensively defaulted; the provider contract is external and absent
/// fields must not break mirroring.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpstreamMessage {
    pub id: String,
    #[serde(default)]
    pub from: Option<UpstreamSender>,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub intro: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub seen: bool,
    #[serde(default)]
    pub created_at: String,
}

// Mail.tm wraps collections in hydra envelopes.
#[derive(Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
struct HydraCollection<T> {
    #[serde(rename = "hydra:member", default)]
    member: Vec<T>,
}

#[derive(Deserialize)]
struct DomainEntry {
    domain: String,
}

#[derive(Deserialize)]
struct TokenResponse {
    token: String,
}

#[derive(Clone)]
pub struct MailTmClient {
    http: Client,
    base_url: String,
}

impl MailTmClient {
    /// Builds a client with a bounded per-request timeout. The provider has
    /// no SLA; an unbounded call would stall mailbox generation.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, MailTmError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub async fn list_domains(&self) -> Result<Vec<String>, MailTmError> {
        let response = self
            .http
            .get(format!("{}/domains", self.base_url))
            .send()
            .await?;
        let body: HydraCollection<DomainEntry> = check(response)?.json().await?;
        debug!(count = body.member.len(), "fetched upstream domains");
        Ok(body.member.into_iter().map(|d| d.domain).collect())
    }

    pub async fn create_account(
        &self,
        address: &str,
        password: &str,
    ) -> Result<AccountRef, MailTmError> {
        let response = self
            .http
            .post(format!("{}/accounts", self.base_url))
            .json(&json!({ "address": address, "password": password }))
            .send()
            .await?;
        Ok(check(response)?.json().await?)
    }

    pub async fn issue_token(
        &self,
        address: &str,
        password: &str,
    ) -> Result<String, MailTmError> {
        let response = self
            .http
            .post(format!("{}/token", self.base_url))
            .json(&json!({ "address": address, "password": password }))
            .send()
            .await?;
        let body: TokenResponse = check(response)?.json().await?;
        Ok(body.token)
    }

    pub async fn list_messages(&self, token: &str) -> Result<Vec<UpstreamMessage>, MailTmError> {
        let response = self
            .http
            .get(format!("{}/messages", self.base_url))
            .bearer_auth(token)
            .send()
            .await?;
        let body: HydraCollection<UpstreamMessage> = check(response)?.json().await?;
        Ok(body.member)
    }
}

fn check(response: reqwest::Response) -> Result<reqwest::Response, MailTmError> {
    if response.status().is_success() {
        Ok(response)
    } else {
        Err(MailTmError::Status(response.status()))
    }
}
