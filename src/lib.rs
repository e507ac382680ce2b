//! Typed Rust client for the Nuntium messaging gateway HTTP API.
//!
//! All routing and delivery logic lives in the gateway; this crate builds
//! correctly-shaped HTTP requests, authenticates them, and decodes the JSON
//! responses into stable local types. The design is a domain layer of plain
//! shapes, a transport layer for wire-format quirks (the channel
//! `configuration` pair-list shape, query encoding, receipt headers), and a
//! small client layer orchestrating requests.
//!
//! ```rust,no_run
//! use nuntium::{AoMessage, NuntiumClient, SendAo};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), nuntium::NuntiumError> {
//!     let client = NuntiumClient::new("https://nuntium.example", "account", "app", "password");
//!     let message = AoMessage::new("sms://1", "sms://5551234", "hello", "hi!");
//!     let receipt = client.send_ao(SendAo::single(message)).await?;
//!     println!("queued with token {:?}", receipt.token);
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
mod transport;

pub use client::{NuntiumClient, NuntiumClientBuilder, NuntiumError};
pub use domain::{
    AoMessage, Carrier, Channel, Country, CustomAttributes, Direction, SendAo, SendAoReceipt,
};
