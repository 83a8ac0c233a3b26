//! The stub transport returns a fixed answer and records the messages
//! it was asked to deliver. It can be useful for testing purposes.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::{transport::AsyncTransport, Message};

/// This transport keeps the messages in memory and returns the
/// configured response
#[derive(Debug, Clone, Default)]
pub struct StubTransport {
    fail: bool,
    messages: Arc<Mutex<Vec<Message>>>,
}

/// Error returned by a negative stub transport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StubError;

impl std::fmt::Display for StubError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("stub error")
    }
}

impl std::error::Error for StubError {}

impl StubTransport {
    /// Creates a new transport that always succeeds
    pub fn new_positive() -> StubTransport {
        StubTransport::default()
    }

    /// Creates a new transport that always fails
    pub fn new_negative() -> StubTransport {
        StubTransport {
            fail: true,
            ..StubTransport::default()
        }
    }

    /// Messages the transport was asked to send, in order.
    ///
    /// Failed sends are recorded too.
    pub fn messages(&self) -> Vec<Message> {
        self.messages.lock().unwrap().clone()
    }
}

#[async_trait]
impl AsyncTransport for StubTransport {
    type Ok = ();
    type Error = StubError;

    async fn send(&self, message: &Message) -> Result<Self::Ok, Self::Error> {
        self.messages.lock().unwrap().push(message.clone());
        if self.fail {
            Err(StubError)
        } else {
            Ok(())
        }
    }
}
