//! Mapping from [`Message`] to the `sendMail` request body
//!
//! Pure translation, no validation: whatever the message model allowed
//! is what goes on the wire.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::Serialize;

use crate::{message::Attachment, Address, Message};

const FILE_ATTACHMENT: &str = "#microsoft.graph.fileAttachment";

/// Top-level `sendMail` request body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct SendMail<'a> {
    message: GraphMessage<'a>,
    save_to_sent_items: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GraphMessage<'a> {
    subject: &'a str,
    body: MessageBody<'a>,
    to_recipients: Vec<Recipient<'a>>,
    cc_recipients: Vec<Recipient<'a>>,
    bcc_recipients: Vec<Recipient<'a>>,
    reply_to: Vec<Recipient<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sender: Option<Recipient<'a>>,
    attachments: Vec<FileAttachment<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MessageBody<'a> {
    content_type: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Recipient<'a> {
    email_address: EmailAddress<'a>,
}

#[derive(Debug, Serialize)]
struct EmailAddress<'a> {
    address: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FileAttachment<'a> {
    #[serde(rename = "@odata.type")]
    odata_type: &'static str,
    name: &'a str,
    content_type: &'a str,
    content_bytes: String,
    content_id: &'a str,
    is_inline: bool,
}

impl<'a> SendMail<'a> {
    pub(super) fn new(message: &'a Message, save_to_sent_items: bool) -> Self {
        let envelope = message.envelope();

        // HTML wins when both bodies are present
        let (content_type, content) = match (message.html_body(), message.text_body()) {
            (Some(html), _) => ("HTML", html),
            (None, Some(text)) => ("Text", text),
            (None, None) => ("Text", ""),
        };

        // Envelope recipients already listed as cc or bcc would be
        // delivered twice, drop them from the to list
        let to_recipients = envelope
            .to()
            .iter()
            .filter(|&address| {
                !message.cc().contains(address) && !message.bcc().contains(address)
            })
            .map(Recipient::new)
            .collect();

        SendMail {
            message: GraphMessage {
                subject: message.subject(),
                body: MessageBody {
                    content_type,
                    content,
                },
                to_recipients,
                cc_recipients: message.cc().iter().map(Recipient::new).collect(),
                bcc_recipients: message.bcc().iter().map(Recipient::new).collect(),
                reply_to: message.reply_to().iter().map(Recipient::new).collect(),
                sender: envelope.from().map(Recipient::new),
                attachments: message
                    .attachments()
                    .iter()
                    .map(FileAttachment::new)
                    .collect(),
            },
            save_to_sent_items,
        }
    }
}

impl<'a> Recipient<'a> {
    fn new(address: &'a Address) -> Self {
        Recipient {
            email_address: EmailAddress {
                address: address.as_ref(),
            },
        }
    }
}

impl<'a> FileAttachment<'a> {
    fn new(attachment: &'a Attachment) -> Self {
        let name = attachment.name().unwrap_or("");

        FileAttachment {
            odata_type: FILE_ATTACHMENT,
            name,
            content_type: attachment.mime().essence_str(),
            content_bytes: STANDARD.encode(attachment.content()),
            content_id: name,
            is_inline: attachment.is_inline(),
        }
    }
}
