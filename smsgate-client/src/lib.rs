//! Rust client for the SMS Gateway for Android third-party API.
//!
//! Wraps the REST endpoints (messages, devices, webhooks, settings, logs,
//! auth tokens) behind typed models, and optionally applies end-to-end
//! field encryption to outgoing message payloads via [`smsgate_crypto`]:
//! the message body and recipient phone numbers are encrypted before the
//! request is serialized and decrypted when states are read back.
//!
//! # Example
//!
//! ```no_run
//! use smsgate_client::{ClientConfig, Credentials, GatewayClient, Message};
//! use smsgate_crypto::Encryptor;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ClientConfig::new(Credentials::Basic {
//!     login: "login".into(),
//!     password: "password".into(),
//! });
//! let client = GatewayClient::new(config)?
//!     .with_encryptor(Encryptor::new("passphrase")?);
//!
//! let message = Message::new("Hello!", vec!["+19995550101".into()]);
//! let state = client.send_message(message).await?;
//! println!("message {} is {:?}", state.id, state.state);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod message;
pub mod types;

pub use client::GatewayClient;
pub use config::{ClientConfig, Credentials, DEFAULT_URL};
pub use error::{ClientError, ClientResult};
pub use message::{Message, MessageBuilder, MessagePayload};
pub use types::*;
