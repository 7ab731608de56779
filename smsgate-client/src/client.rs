//! HTTP client for the SMS Gateway third-party API.
//!
//! Applies Basic or Bearer auth to every request and maps non-success
//! responses to structured errors. When an [`Encryptor`] is attached, the
//! send path encrypts message payloads before serialization and the read
//! path decrypts recipient phone numbers after parsing — no other endpoint
//! is aware encryption exists.

use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use smsgate_crypto::Encryptor;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::message::{Message, MessagePayload};
use crate::types::{
    Device, HealthStatus, LogEntry, MessageState, MessagesExportRequest, Settings, TokenRequest,
    TokenResponse, Webhook,
};

const USER_AGENT: &str = concat!(
    "android-sms-gateway/",
    env!("CARGO_PKG_VERSION"),
    " (client; rust)"
);

/// Client for the SMS Gateway third-party API.
pub struct GatewayClient {
    client: Client,
    config: ClientConfig,
    auth_header: String,
    encryptor: Option<Encryptor>,
}

impl GatewayClient {
    /// Creates a client. Fails when credentials are missing or empty.
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let auth_header = config.credentials.header_value()?;
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .expect("failed to build HTTP client");

        Ok(Self {
            client,
            config,
            auth_header,
            encryptor: None,
        })
    }

    /// Attaches a field encryptor; message payloads sent through this
    /// client are encrypted end to end from then on.
    pub fn with_encryptor(mut self, encryptor: Encryptor) -> Self {
        self.encryptor = Some(encryptor);
        self
    }

    // ── Messages ──

    /// Sends a message and returns its initial state.
    pub async fn send_message(&self, message: Message) -> ClientResult<MessageState> {
        self.send_message_with_options(message, false).await
    }

    /// Sends a message, optionally skipping server-side phone validation.
    pub async fn send_message_with_options(
        &self,
        message: Message,
        skip_phone_validation: bool,
    ) -> ClientResult<MessageState> {
        let path = if skip_phone_validation {
            "/messages?skipPhoneValidation=true"
        } else {
            "/messages"
        };

        let mut payload = MessagePayload::Plain(message);
        if let Some(encryptor) = &self.encryptor {
            payload = payload.encrypt(encryptor)?;
        }

        let state: MessageState = Self::parse(self.post(path, &payload).await?).await?;
        self.decrypt_state(state)
    }

    /// Fetches the current state of a previously sent message.
    pub async fn get_message_state(&self, id: &str) -> ClientResult<MessageState> {
        let state: MessageState = Self::parse(self.get(&format!("/messages/{id}")).await?).await?;
        self.decrypt_state(state)
    }

    fn decrypt_state(&self, state: MessageState) -> ClientResult<MessageState> {
        match &self.encryptor {
            Some(encryptor) => Ok(state.decrypt(encryptor)?),
            None => Ok(state),
        }
    }

    // ── Devices ──

    pub async fn list_devices(&self) -> ClientResult<Vec<Device>> {
        Self::parse(self.get("/devices").await?).await
    }

    pub async fn remove_device(&self, id: &str) -> ClientResult<()> {
        self.delete(&format!("/devices/{id}")).await?;
        Ok(())
    }

    // ── Health ──

    pub async fn health_check(&self) -> ClientResult<HealthStatus> {
        Self::parse(self.get("/health").await?).await
    }

    // ── Inbox ──

    /// Requests an export of inbox messages; entries are delivered through
    /// `sms:received` webhooks.
    pub async fn request_inbox_export(
        &self,
        request: &MessagesExportRequest,
    ) -> ClientResult<serde_json::Value> {
        Self::parse(self.post("/inbox/export", request).await?).await
    }

    // ── Logs ──

    /// Fetches server log entries, optionally bounded to a time range.
    pub async fn get_logs(
        &self,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> ClientResult<Vec<LogEntry>> {
        let mut query = Vec::new();
        if let Some(from) = from {
            query.push(format!("from={}", from.to_rfc3339_opts(SecondsFormat::Secs, true)));
        }
        if let Some(to) = to {
            query.push(format!("to={}", to.to_rfc3339_opts(SecondsFormat::Secs, true)));
        }

        let path = if query.is_empty() {
            "/logs".to_string()
        } else {
            format!("/logs?{}", query.join("&"))
        };

        Self::parse(self.get(&path).await?).await
    }

    // ── Settings ──

    pub async fn get_settings(&self) -> ClientResult<Settings> {
        Self::parse(self.get("/settings").await?).await
    }

    /// Replaces the account settings wholesale.
    pub async fn replace_settings(&self, settings: &Settings) -> ClientResult<Settings> {
        Self::parse(self.put("/settings", settings).await?).await
    }

    /// Updates only the provided settings sections.
    pub async fn patch_settings(&self, settings: &Settings) -> ClientResult<Settings> {
        Self::parse(self.patch("/settings", settings).await?).await
    }

    // ── Webhooks ──

    pub async fn list_webhooks(&self) -> ClientResult<Vec<Webhook>> {
        Self::parse(self.get("/webhooks").await?).await
    }

    pub async fn register_webhook(&self, webhook: &Webhook) -> ClientResult<Webhook> {
        Self::parse(self.post("/webhooks", webhook).await?).await
    }

    pub async fn delete_webhook(&self, id: &str) -> ClientResult<()> {
        self.delete(&format!("/webhooks/{id}")).await?;
        Ok(())
    }

    // ── Auth Tokens ──

    pub async fn generate_token(&self, request: &TokenRequest) -> ClientResult<TokenResponse> {
        Self::parse(self.post("/auth/token", request).await?).await
    }

    pub async fn revoke_token(&self, jti: &str) -> ClientResult<()> {
        self.delete(&format!("/auth/token/{jti}")).await?;
        Ok(())
    }

    // ── Request Plumbing ──

    async fn get(&self, path: &str) -> ClientResult<reqwest::Response> {
        debug!("GET {path}");
        let resp = self
            .client
            .get(self.url(path))
            .header(reqwest::header::AUTHORIZATION, &self.auth_header)
            .send()
            .await?;
        Self::check_status(resp).await
    }

    async fn post(&self, path: &str, body: &impl Serialize) -> ClientResult<reqwest::Response> {
        debug!("POST {path}");
        let resp = self
            .client
            .post(self.url(path))
            .header(reqwest::header::AUTHORIZATION, &self.auth_header)
            .json(body)
            .send()
            .await?;
        Self::check_status(resp).await
    }

    async fn put(&self, path: &str, body: &impl Serialize) -> ClientResult<reqwest::Response> {
        debug!("PUT {path}");
        let resp = self
            .client
            .put(self.url(path))
            .header(reqwest::header::AUTHORIZATION, &self.auth_header)
            .json(body)
            .send()
            .await?;
        Self::check_status(resp).await
    }

    async fn patch(&self, path: &str, body: &impl Serialize) -> ClientResult<reqwest::Response> {
        debug!("PATCH {path}");
        let resp = self
            .client
            .patch(self.url(path))
            .header(reqwest::header::AUTHORIZATION, &self.auth_header)
            .json(body)
            .send()
            .await?;
        Self::check_status(resp).await
    }

    async fn delete(&self, path: &str) -> ClientResult<reqwest::Response> {
        debug!("DELETE {path}");
        let resp = self
            .client
            .delete(self.url(path))
            .header(reqwest::header::AUTHORIZATION, &self.auth_header)
            .send()
            .await?;
        Self::check_status(resp).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    /// Reads the body eagerly so decode failures are distinguishable from
    /// transport failures.
    async fn parse<T: DeserializeOwned>(resp: reqwest::Response) -> ClientResult<T> {
        let body = resp.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn check_status(resp: reqwest::Response) -> ClientResult<reqwest::Response> {
        let status = resp.status();
        if status.is_client_error() || status.is_server_error() {
            let message = resp.text().await.unwrap_or_default();
            return Err(ClientError::Http {
                status: status.as_u16(),
                message,
            });
        }
        Ok(resp)
    }
}
