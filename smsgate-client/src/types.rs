//! Response models and shared enums for the gateway API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use smsgate_crypto::{CryptoResult, Encryptor};

/// Processing state of a message or an individual recipient.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProcessState {
    /// Created, not yet received by the device.
    Pending,
    /// Received by the device.
    Processed,
    /// Sent to the carrier.
    Sent,
    /// Delivered to the recipient.
    Delivered,
    Failed,
}

/// Delivery state of a single recipient.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipientState {
    /// Phone number — plaintext, encoded or hashed depending on the
    /// enclosing message's flags.
    pub phone_number: String,
    pub state: ProcessState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RecipientState {
    /// Replaces the phone number with its decrypted plaintext.
    pub fn decrypt(mut self, encryptor: &Encryptor) -> CryptoResult<Self> {
        self.phone_number = encryptor.decrypt(&self.phone_number)?;
        Ok(self)
    }
}

/// State of a sent message as reported by the gateway.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageState {
    pub id: String,
    pub state: ProcessState,
    pub recipients: Vec<RecipientState>,
    /// Values are one-way hashes; no recoverable plaintext exists.
    #[serde(default)]
    pub is_hashed: bool,
    /// Values are encrypted wire strings awaiting decryption.
    #[serde(default)]
    pub is_encrypted: bool,
}

impl MessageState {
    /// Decrypts every recipient phone number and clears the encryption
    /// flag.
    ///
    /// No-op when the state is hashed (decryption is meaningless) or not
    /// encrypted. The first failing recipient aborts the whole operation;
    /// a partially-decrypted state is never observable.
    pub fn decrypt(self, encryptor: &Encryptor) -> CryptoResult<Self> {
        if self.is_hashed || !self.is_encrypted {
            return Ok(self);
        }

        let recipients = self
            .recipients
            .into_iter()
            .map(|recipient| recipient.decrypt(encryptor))
            .collect::<CryptoResult<Vec<_>>>()?;

        Ok(Self {
            recipients,
            is_encrypted: false,
            ..self
        })
    }
}

/// A device registered to the account.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_seen: Option<DateTime<Utc>>,
}

/// Events a webhook can subscribe to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum WebhookEvent {
    #[serde(rename = "sms:received")]
    SmsReceived,
    #[serde(rename = "sms:sent")]
    SmsSent,
    #[serde(rename = "sms:delivered")]
    SmsDelivered,
    #[serde(rename = "sms:failed")]
    SmsFailed,
    #[serde(rename = "system:ping")]
    SystemPing,
}

/// A webhook registration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Webhook {
    /// Webhook ID; generated by the server when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub event: WebhookEvent,
    /// URL the gateway will POST event payloads to.
    pub url: String,
    /// Restricts the webhook to one device when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,
}

impl Webhook {
    pub fn new(event: WebhookEvent, url: impl Into<String>) -> Self {
        Self {
            id: None,
            event,
            url: url.into(),
            device_id: None,
        }
    }
}

/// A server-side log entry.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub id: i64,
    pub message: String,
    pub module: String,
    pub priority: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

/// Device settings.
///
/// Sections are passed through as raw JSON; the gateway validates their
/// contents. Absent sections are left untouched by PATCH.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encryption: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gateway: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logs: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub messages: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ping: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webhooks: Option<serde_json::Value>,
}

/// Request for an inbox messages export to be delivered via webhooks.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessagesExportRequest {
    pub device_id: String,
    /// Start of the time range.
    pub since: DateTime<Utc>,
    /// End of the time range.
    pub until: DateTime<Utc>,
}

/// Request for a scoped JWT.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TokenRequest {
    pub scopes: Vec<String>,
    /// Token lifetime in seconds; server default when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u64>,
}

/// An issued JWT.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    /// Token ID (`jti`), usable for revocation.
    pub id: String,
    pub expires_at: DateTime<Utc>,
}

/// Gateway health report.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checks: Option<serde_json::Value>,
}
