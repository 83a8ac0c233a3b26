use mime::Mime;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Disposition {
    Attachment,
    Inline,
}

/// A file attached to a [`Message`](super::Message)
///
/// Raw content bytes plus the metadata the receiving side needs: a
/// media type, an optional filename and whether the content is meant to
/// be rendered inline.
#[derive(Debug, Clone)]
pub struct Attachment {
    filename: Option<String>,
    disposition: Disposition,
    content_type: Mime,
    content: Vec<u8>,
}

impl Default for Attachment {
    fn default() -> Self {
        Self::new()
    }
}

impl Attachment {
    /// Creates a new discrete attachment.
    pub fn new() -> Self {
        Self {
            filename: None,
            disposition: Disposition::Attachment,
            content_type: mime::APPLICATION_OCTET_STREAM,
            content: Vec::new(),
        }
    }

    /// Creates a new inline attachment, referenced from the message
    /// body by its filename.
    pub fn new_inline() -> Self {
        Self {
            disposition: Disposition::Inline,
            ..Self::new()
        }
    }

    /// Sets the attachment filename.
    pub fn filename<S: Into<String>>(mut self, filename: S) -> Self {
        self.filename = Some(filename.into());
        self
    }

    /// Sets the media type, `application/octet-stream` by default.
    pub fn content_type(mut self, content_type: Mime) -> Self {
        self.content_type = content_type;
        self
    }

    /// Sets the content bytes.
    pub fn body<T: Into<Vec<u8>>>(mut self, content: T) -> Self {
        self.content = content.into();
        self
    }

    /// The attachment filename, if one was set.
    pub fn name(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    /// The declared media type.
    pub fn mime(&self) -> &Mime {
        &self.content_type
    }

    /// The raw content bytes.
    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// Whether the attachment should be rendered inline.
    pub fn is_inline(&self) -> bool {
        self.disposition == Disposition::Inline
    }
}
