//! Outgoing message model and the encryption gate on the send path.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use smsgate_crypto::{CryptoResult, Encryptor};

use crate::error::{ClientError, ClientResult};

/// An SMS message to send through the gateway.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Message ID; generated by the server when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Message text. Long messages are split into parts by the device.
    pub message: String,
    /// Time to live in seconds. Mutually exclusive with `valid_until`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u64>,
    /// Absolute expiration timestamp. Mutually exclusive with `ttl`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_until: Option<DateTime<Utc>>,
    /// SIM slot to send from; device default when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sim_number: Option<u8>,
    /// Request a delivery report for each recipient.
    pub with_delivery_report: bool,
    /// Message priority. Values >= 100 bypass rate limits and delays.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i8>,
    /// Recipient phone numbers in E.164 format.
    pub phone_numbers: Vec<String>,
}

impl Message {
    /// Creates a message with default delivery options.
    pub fn new(message: impl Into<String>, phone_numbers: Vec<String>) -> Self {
        Self {
            id: None,
            message: message.into(),
            ttl: None,
            valid_until: None,
            sim_number: None,
            with_delivery_report: true,
            priority: None,
            phone_numbers,
        }
    }

    /// Starts a builder for a message with non-default options.
    pub fn builder(message: impl Into<String>, phone_numbers: Vec<String>) -> MessageBuilder {
        MessageBuilder {
            message: Self::new(message, phone_numbers),
        }
    }
}

/// Builder for [`Message`].
#[derive(Clone, Debug)]
pub struct MessageBuilder {
    message: Message,
}

impl MessageBuilder {
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.message.id = Some(id.into());
        self
    }

    pub fn ttl(mut self, ttl: u64) -> Self {
        self.message.ttl = Some(ttl);
        self
    }

    pub fn valid_until(mut self, valid_until: DateTime<Utc>) -> Self {
        self.message.valid_until = Some(valid_until);
        self
    }

    pub fn sim_number(mut self, sim_number: u8) -> Self {
        self.message.sim_number = Some(sim_number);
        self
    }

    pub fn with_delivery_report(mut self, with_delivery_report: bool) -> Self {
        self.message.with_delivery_report = with_delivery_report;
        self
    }

    pub fn priority(mut self, priority: i8) -> Self {
        self.message.priority = Some(priority);
        self
    }

    /// Validates and produces the message.
    pub fn build(self) -> ClientResult<Message> {
        if self.message.ttl.is_some() && self.message.valid_until.is_some() {
            return Err(ClientError::Config(
                "validUntil and ttl cannot be set at the same time".to_string(),
            ));
        }
        Ok(self.message)
    }
}

/// A message payload that is either plaintext or already field-encrypted.
///
/// The variant, not a runtime flag, guards idempotency: encrypting an
/// [`Encrypted`](Self::Encrypted) payload returns it unchanged, and the
/// `isEncrypted` wire flag is derived from the variant at serialization
/// time. There is no way to construct a half-encrypted payload.
#[derive(Clone, Debug)]
pub enum MessagePayload {
    /// Body and phone numbers are plaintext.
    Plain(Message),
    /// Body and every phone number are encoded wire strings.
    Encrypted(Message),
}

impl MessagePayload {
    pub fn is_encrypted(&self) -> bool {
        matches!(self, Self::Encrypted(_))
    }

    pub fn message(&self) -> &Message {
        match self {
            Self::Plain(message) | Self::Encrypted(message) => message,
        }
    }

    /// Encrypts the message body and each phone number, every field with
    /// its own fresh salt. Already-encrypted payloads pass through
    /// unchanged.
    ///
    /// On error the payload is consumed; no partially-encrypted value is
    /// ever observable.
    pub fn encrypt(self, encryptor: &Encryptor) -> CryptoResult<Self> {
        match self {
            Self::Plain(mut message) => {
                message.message = encryptor.encrypt(&message.message)?;
                message.phone_numbers = message
                    .phone_numbers
                    .iter()
                    .map(|number| encryptor.encrypt(number))
                    .collect::<CryptoResult<Vec<_>>>()?;
                Ok(Self::Encrypted(message))
            }
            encrypted @ Self::Encrypted(_) => Ok(encrypted),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WireMessage<'a> {
    #[serde(flatten)]
    message: &'a Message,
    is_encrypted: bool,
}

impl Serialize for MessagePayload {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        WireMessage {
            message: self.message(),
            is_encrypted: self.is_encrypted(),
        }
        .serialize(serializer)
    }
}
