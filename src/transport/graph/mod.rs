//! The Graph transport delivers emails through the Microsoft Graph
//! [`sendMail`] API: one authenticated `POST` per message, no retries.
//!
//! A bearer token is requested from the configured [`TokenCredential`]
//! before every send, scoped to [`GRAPH_SCOPE`]. The target mailbox is
//! picked in this order: the user configured on the transport, the
//! message's declared sender address, the `/me` alias of the
//! authenticated identity.
//!
//! [`sendMail`]: https://learn.microsoft.com/en-us/graph/api/user-sendmail
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
//! let mailer = GraphTransport::builder(StaticTokenCredential::new("ey...")).build();
//! mailer.send(&message).await?;
//! # Ok(())
//! # }
//! ```

use std::{fmt, sync::Arc};

use async_trait::async_trait;
use reqwest::{header::AUTHORIZATION, Client};

use self::payload::SendMail;
use crate::{credential::TokenCredential, transport::AsyncTransport, Address, Message};

mod error;
mod payload;

pub use self::error::Error;

/// Well-known Graph API root all requests are issued against.
pub const GRAPH_BASE_URL: &str = "https://graph.microsoft.com/v1.0";

/// Token scope covering the Graph resource.
pub const GRAPH_SCOPE: &str = "https://graph.microsoft.com/.default";

/// Sends emails using the Microsoft Graph API
#[derive(Clone)]
pub struct GraphTransport {
    client: Client,
    credential: Arc<dyn TokenCredential>,
    user: Option<String>,
    save_to_sent_items: bool,
    base_url: String,
}

impl GraphTransport {
    /// Creates a new transport builder for the given credential.
    ///
    /// Defaults are:
    ///
    /// * No target user, the endpoint falls back to the message sender
    ///   or the authenticated user
    /// * Sent messages are not saved to the Sent Items folder
    /// * The public Graph API root
    pub fn builder<C: TokenCredential + 'static>(credential: C) -> GraphTransportBuilder {
        GraphTransportBuilder::new(Arc::new(credential))
    }

    /// Picks the mailbox endpoint this message is sent through.
    ///
    /// Exactly one of: the configured user, the message's declared
    /// sender address, the authenticated user, in that priority order.
    fn send_endpoint(&self, sender: Option<&Address>) -> String {
        match (self.user.as_deref(), sender) {
            (Some(user), _) => format!("{}/users/{}/sendMail", self.base_url, user),
            (None, Some(address)) => format!("{}/users/{}/sendMail", self.base_url, address),
            (None, None) => format!("{}/me/sendMail", self.base_url),
        }
    }
}

impl fmt::Debug for GraphTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GraphTransport")
            .field("user", &self.user)
            .field("save_to_sent_items", &self.save_to_sent_items)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl AsyncTransport for GraphTransport {
    type Ok = ();
    type Error = Error;

    /// Sends an email
    async fn send(&self, message: &Message) -> Result<Self::Ok, Self::Error> {
        let token = self
            .credential
            .token(GRAPH_SCOPE)
            .await
            .map_err(error::credential)?;

        let endpoint = self.send_endpoint(message.sender());
        let payload = SendMail::new(message, self.save_to_sent_items);

        #[cfg(feature = "tracing")]
        tracing::debug!("POST {}", endpoint);

        let response = self
            .client
            .post(&endpoint)
            .header(AUTHORIZATION, token.authorization())
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                if e.is_builder() {
                    error::client(e)
                } else {
                    error::network(e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(error::response(status, body));
        }

        Ok(())
    }
}

/// Contains client configuration.
/// Instances of this struct can be created using [`GraphTransport::builder`].
#[derive(Clone)]
pub struct GraphTransportBuilder {
    client: Option<Client>,
    credential: Arc<dyn TokenCredential>,
    user: Option<String>,
    save_to_sent_items: bool,
    base_url: String,
}

impl GraphTransportBuilder {
    // Create new builder with default parameters
    fn new(credential: Arc<dyn TokenCredential>) -> Self {
        GraphTransportBuilder {
            client: None,
            credential,
            user: None,
            save_to_sent_items: false,
            base_url: GRAPH_BASE_URL.into(),
        }
    }

    /// Set the mailbox user all messages are sent as.
    ///
    /// Takes priority over the message sender for endpoint selection.
    pub fn user<T: Into<String>>(mut self, user: T) -> Self {
        self.user = Some(user.into());
        self
    }

    /// Keep a copy of sent messages in the Sent Items folder.
    pub fn save_to_sent_items(mut self, save: bool) -> Self {
        self.save_to_sent_items = save;
        self
    }

    /// Set a different API root, e.g. a national cloud deployment.
    pub fn base_url<T: Into<String>>(mut self, base_url: T) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        self.base_url = base_url;
        self
    }

    /// Use a preconfigured HTTP client, e.g. with a proxy or custom
    /// timeouts.
    pub fn client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Build the transport
    pub fn build(self) -> GraphTransport {
        GraphTransport {
            client: self.client.unwrap_or_default(),
            credential: self.credential,
            user: self.user,
            save_to_sent_items: self.save_to_sent_items,
            base_url: self.base_url,
        }
    }
}

impl fmt::Debug for GraphTransportBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GraphTransportBuilder")
            .field("user", &self.user)
            .field("save_to_sent_items", &self.save_to_sent_items)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}
