//! Provides a strongly typed way to build emails
//!
//! ## Usage
//!
//! ```rust
//! use graph_mailer::message::Message;
//!
//! # use std::error::Error;
//! # fn main() -> Result<(), Box<dyn Error>> {
//! let m = Message::builder()
//!     .from("nobody@domain.tld".parse()?)
//!     .reply_to("yuin@domain.tld".parse()?)
//!     .to("hei@domain.tld".parse()?)
//!     .subject("Happy new year")
//!     .text(String::from("Be happy!"))
//!     .build()?;
//! # Ok(())
//! # }
//! ```
//!
//! Messages carry an HTML and/or a plain text body. When both are
//! present, transports deliver the HTML one.

mod attachment;

pub use self::attachment::Attachment;
use crate::{address::Envelope, Address, Error};

/// Email message ready to be sent through a transport
#[derive(Debug, Clone)]
pub struct Message {
    subject: String,
    sender: Option<Address>,
    from: Vec<Address>,
    to: Vec<Address>,
    cc: Vec<Address>,
    bcc: Vec<Address>,
    reply_to: Vec<Address>,
    text_body: Option<String>,
    html_body: Option<String>,
    attachments: Vec<Attachment>,
    envelope: Envelope,
}

impl Message {
    /// Creates a new message builder.
    pub fn builder() -> MessageBuilder {
        MessageBuilder::new()
    }

    /// The message subject, empty if none was set.
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// The declared sender mailbox, if any.
    ///
    /// This is the message-level sender; the delivery sender lives in
    /// the [`Envelope`].
    pub fn sender(&self) -> Option<&Address> {
        self.sender.as_ref()
    }

    /// The `From` addresses.
    pub fn from(&self) -> &[Address] {
        &self.from
    }

    /// The `To` addresses.
    pub fn to(&self) -> &[Address] {
        &self.to
    }

    /// The `Cc` addresses.
    pub fn cc(&self) -> &[Address] {
        &self.cc
    }

    /// The `Bcc` addresses.
    pub fn bcc(&self) -> &[Address] {
        &self.bcc
    }

    /// The `Reply-To` addresses.
    pub fn reply_to(&self) -> &[Address] {
        &self.reply_to
    }

    /// The plain text body, if any.
    pub fn text_body(&self) -> Option<&str> {
        self.text_body.as_deref()
    }

    /// The HTML body, if any.
    pub fn html_body(&self) -> Option<&str> {
        self.html_body.as_deref()
    }

    /// The attachments, in the order they were added.
    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }

    /// Gets the envelope used for delivery.
    pub fn envelope(&self) -> &Envelope {
        &self.envelope
    }
}

/// Builder for [`Message`]
///
/// Recipient methods can be called repeatedly; addresses accumulate in
/// call order.
#[derive(Debug, Clone, Default)]
pub struct MessageBuilder {
    subject: Option<String>,
    sender: Option<Address>,
    from: Vec<Address>,
    to: Vec<Address>,
    cc: Vec<Address>,
    bcc: Vec<Address>,
    reply_to: Vec<Address>,
    text_body: Option<String>,
    html_body: Option<String>,
    attachments: Vec<Attachment>,
    envelope: Option<Envelope>,
}

impl MessageBuilder {
    /// Creates a new default message builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set or add a `From` address.
    pub fn from(mut self, address: Address) -> Self {
        self.from.push(address);
        self
    }

    /// Set the `Sender` address.
    ///
    /// Also decides the `sendMail` endpoint when the transport has no
    /// configured user.
    pub fn sender(mut self, address: Address) -> Self {
        self.sender = Some(address);
        self
    }

    /// Add a `To` recipient.
    pub fn to(mut self, address: Address) -> Self {
        self.to.push(address);
        self
    }

    /// Add a `Cc` recipient.
    pub fn cc(mut self, address: Address) -> Self {
        self.cc.push(address);
        self
    }

    /// Add a `Bcc` recipient.
    pub fn bcc(mut self, address: Address) -> Self {
        self.bcc.push(address);
        self
    }

    /// Add a `Reply-To` address.
    pub fn reply_to(mut self, address: Address) -> Self {
        self.reply_to.push(address);
        self
    }

    /// Set the subject.
    pub fn subject<S: Into<String>>(mut self, subject: S) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Set the plain text body.
    pub fn text<S: Into<String>>(mut self, body: S) -> Self {
        self.text_body = Some(body.into());
        self
    }

    /// Set the HTML body.
    ///
    /// Takes priority over a plain text body at delivery.
    pub fn html<S: Into<String>>(mut self, body: S) -> Self {
        self.html_body = Some(body.into());
        self
    }

    /// Add an attachment.
    pub fn attachment(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }

    /// Use a custom envelope instead of the one derived from the
    /// message headers.
    pub fn envelope(mut self, envelope: Envelope) -> Self {
        self.envelope = Some(envelope);
        self
    }

    /// Builds the message.
    ///
    /// Unless an explicit envelope was given, one is derived from the
    /// headers: the sender — or the single `From` address — becomes the
    /// envelope sender, and `To`, `Cc` and `Bcc` become the envelope
    /// recipients.
    ///
    /// # Errors
    ///
    /// - [`Error::TooManyFrom`] without an explicit envelope or sender
    ///   when several `From` addresses are set
    /// - [`Error::MissingTo`] without an explicit envelope when the
    ///   message has no recipient at all
    pub fn build(self) -> Result<Message, Error> {
        let envelope = match self.envelope {
            Some(envelope) => envelope,
            None => {
                let from = match &self.sender {
                    Some(sender) => Some(sender.clone()),
                    None => {
                        if self.from.len() > 1 {
                            return Err(Error::TooManyFrom);
                        }
                        self.from.first().cloned()
                    }
                };

                let mut to = self.to.clone();
                to.extend_from_slice(&self.cc);
                to.extend_from_slice(&self.bcc);

                Envelope::new(from, to)?
            }
        };

        Ok(Message {
            subject: self.subject.unwrap_or_default(),
            sender: self.sender,
            from: self.from,
            to: self.to,
            cc: self.cc,
            bcc: self.bcc,
            reply_to: self.reply_to,
            text_body: self.text_body,
            html_body: self.html_body,
            attachments: self.attachments,
            envelope,
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::Message;
    use crate::{Address, Envelope, Error};

    fn addr(s: &str) -> Address {
        s.parse().unwrap()
    }

    #[test]
    fn envelope_from_headers() {
        let message = Message::builder()
            .from(addr("from@example.com"))
            .to(addr("to@example.com"))
            .cc(addr("cc@example.com"))
            .bcc(addr("bcc@example.com"))
            .build()
            .unwrap();

        assert_eq!(message.envelope().from(), Some(&addr("from@example.com")));
        assert_eq!(
            message.envelope().to(),
            [
                addr("to@example.com"),
                addr("cc@example.com"),
                addr("bcc@example.com")
            ]
        );
    }

    #[test]
    fn sender_wins_over_from() {
        let message = Message::builder()
            .from(addr("a@example.com"))
            .from(addr("b@example.com"))
            .sender(addr("sender@example.com"))
            .to(addr("to@example.com"))
            .build()
            .unwrap();

        assert_eq!(message.envelope().from(), Some(&addr("sender@example.com")));
    }

    #[test]
    fn too_many_from_without_sender() {
        let result = Message::builder()
            .from(addr("a@example.com"))
            .from(addr("b@example.com"))
            .to(addr("to@example.com"))
            .build();

        assert_eq!(result.unwrap_err(), Error::TooManyFrom);
    }

    #[test]
    fn missing_recipients() {
        let result = Message::builder().from(addr("from@example.com")).build();
        assert_eq!(result.unwrap_err(), Error::MissingTo);
    }

    #[test]
    fn explicit_envelope_override() {
        let envelope =
            Envelope::new(Some(addr("bounce@example.com")), vec![addr("rcpt@example.com")])
                .unwrap();

        let message = Message::builder()
            .from(addr("from@example.com"))
            .to(addr("to@example.com"))
            .envelope(envelope.clone())
            .build()
            .unwrap();

        assert_eq!(message.envelope(), &envelope);
    }
}
