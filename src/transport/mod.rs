//! ### Sending Messages
//!
//! The following transports are available:
//!
//! * The [`GraphTransport`](graph::GraphTransport) delivers messages
//!   through the Microsoft Graph `sendMail` API.
//! * The [`StubTransport`](stub::StubTransport) records messages
//!   instead of delivering them. Useful for testing.

use async_trait::async_trait;

use crate::Message;

pub mod graph;
pub mod stub;

/// Async Transport method for emails
#[async_trait]
pub trait AsyncTransport {
    /// Response produced by the Transport
    type Ok;
    /// Error produced by the Transport
    type Error;

    /// Sends the email
    async fn send(&self, message: &Message) -> Result<Self::Ok, Self::Error>;
}
