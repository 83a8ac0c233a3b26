//! Send emails through the Microsoft Graph API.
//!
//! This crate maps a structured email message onto the Graph
//! [`sendMail`] endpoint and issues a single authenticated `POST` per
//! send. Tokens come from a [`TokenCredential`] implementation, so any
//! identity setup (client credentials, managed identity, a cached token
//! you refresh yourself) can be plugged in.
//!
//! [`sendMail`]: https://learn.microsoft.com/en-us/graph/api/user-sendmail
//!
//! ## Example
//!
//! ```rust,no_run
//! use graph_mailer::{
//!     credential::StaticTokenCredential, AsyncTransport, GraphTransport, Message,
//! };
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let message = Message::builder()
//!     .from("nobody@domain.tld".parse()?)
//!     .to("hei@domain.tld".parse()?)
//!     .subject("Happy new year")
//!     .text(String::from("Be happy!"))
//!     .build()?;
//!
//! let credential = StaticTokenCredential::new("ey...");
//! let mailer = GraphTransport::builder(credential)
//!     .user("mailer@domain.tld")
//!     .save_to_sent_items(true)
//!     .build();
//!
//! mailer.send(&message).await?;
//! # Ok(())
//! # }
//! ```
//!
//! Failures keep their cause apart: [`transport::graph::Error`] tells a
//! failed token acquisition from a rejected or unreachable API call, and
//! a rejected call carries the response status and body.

#![forbid(unsafe_code)]
#![deny(
    missing_docs,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unused_import_braces,
    unused_qualifications
)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod address;
pub mod credential;
mod error;
pub mod message;
pub mod transport;

pub use crate::{
    address::{Address, Envelope},
    credential::{AccessToken, TokenCredential},
    error::Error,
    message::{Attachment, Message},
    transport::{graph::GraphTransport, AsyncTransport},
};

/// Boxed error source passed across the crate's trait seams.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;
