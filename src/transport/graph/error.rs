//! Error and result type for the Graph transport

use std::{error::Error as StdError, fmt};

use reqwest::StatusCode;

use crate::BoxError;

/// The Errors that may occur when sending an email through the Graph API
pub struct Error {
    inner: Box<Inner>,
}

struct Inner {
    kind: Kind,
    source: Option<BoxError>,
    body: Option<String>,
}

impl Error {
    pub(crate) fn new<E>(kind: Kind, source: Option<E>) -> Error
    where
        E: Into<BoxError>,
    {
        Error {
            inner: Box::new(Inner {
                kind,
                source: source.map(Into::into),
                body: None,
            }),
        }
    }

    /// Returns true if the error comes from token acquisition
    pub fn is_credential(&self) -> bool {
        matches!(self.inner.kind, Kind::Credential)
    }

    /// Returns true if the error is a network-level failure
    pub fn is_network(&self) -> bool {
        matches!(self.inner.kind, Kind::Network)
    }

    /// Returns true if the error is a non-success API response
    pub fn is_response(&self) -> bool {
        matches!(self.inner.kind, Kind::Response(_))
    }

    /// Returns the status code, if the error was generated from a response.
    pub fn status(&self) -> Option<StatusCode> {
        match self.inner.kind {
            Kind::Response(status) => Some(status),
            _ => None,
        }
    }

    /// Returns the response body, if the error was generated from a response.
    pub fn body(&self) -> Option<&str> {
        self.inner.body.as_deref()
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) enum Kind {
    /// Token acquisition failed
    Credential,
    /// Underlying network i/o error
    Network,
    /// Non-success response from the API
    Response(StatusCode),
    /// Internal client error
    Client,
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut builder = f.debug_struct("graph_mailer::transport::graph::Error");

        builder.field("kind", &self.inner.kind);

        if let Some(ref source) = self.inner.source {
            builder.field("source", source);
        }

        if let Some(ref body) = self.inner.body {
            builder.field("body", body);
        }

        builder.finish()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.kind {
            Kind::Credential => f.write_str("credential error")?,
            Kind::Network => f.write_str("network error")?,
            Kind::Response(status) => write!(f, "the API returned {status}")?,
            Kind::Client => f.write_str("internal client error")?,
        }

        if let Some(ref e) = self.inner.source {
            write!(f, ": {e}")?;
        }

        if let Some(ref body) = self.inner.body {
            write!(f, ": {body}")?;
        }

        Ok(())
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.inner.source.as_ref().map(|e| {
            let r: &(dyn StdError + 'static) = &**e;
            r
        })
    }
}

pub(crate) fn credential<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Credential, Some(e))
}

pub(crate) fn network<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Network, Some(e))
}

pub(crate) fn client<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Client, Some(e))
}

pub(crate) fn response(status: StatusCode, body: String) -> Error {
    let mut error = Error::new::<BoxError>(Kind::Response(status), None);
    error.inner.body = Some(body);
    error
}
