//! Subscribe handshake and the receive-only event channel.

use super::codec::Frame;
use super::connection::Connection;
use super::error::{SubscriptionError, SwayError};
use super::message::command;
use super::transport::RawSocket;
use crate::internal;
use std::os::unix::net::UnixStream;
use std::time::Duration;

/// Exact acknowledgement sway sends for an accepted subscribe.
pub const SUBSCRIBE_SUCCESS: &[u8] = br#"{"success": true}"#;

/// Logical state of an event connection. There is no way back to
/// `Unsubscribed`; closing the connection is the only exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Subscription {
    #[default]
    Unsubscribed,
    Subscribed,
}

/// Sends a subscribe frame on `conn` and checks the acknowledgement.
///
/// # Errors
/// Returns [`SubscriptionError::Rejected`] if the reply is anything other than
/// [`SUBSCRIBE_SUCCESS`], or the transport error that interrupted the exchange.
pub fn subscribe<S: RawSocket>(conn: &mut Connection<S>, payload: &[u8]) -> Result<(), SwayError> {
    let ack = conn.send(command::SUBSCRIBE, payload)?;
    if ack.payload() == SUBSCRIBE_SUCCESS {
        Ok(())
    } else {
        let reply = String::from_utf8_lossy(ack.payload()).into_owned();
        internal::warn("EVENTS", &format!("Subscribe rejected: {reply}"));
        Err(SubscriptionError::Rejected(reply).into())
    }
}

/// Builds the JSON array payload sway expects, e.g. `["workspace","window"]`.
#[must_use]
pub fn event_list_payload<I, T>(events: I) -> String
where
    I: IntoIterator<Item = T>,
    T: Into<String>,
{
    let names: Vec<String> = events.into_iter().map(Into::into).collect();
    serde_json::Value::from(names).to_string()
}

/// The event half of a client: one subscribe, then only reads.
#[derive(Debug)]
pub struct EventChannel<S: RawSocket = UnixStream> {
    conn: Connection<S>,
    state: Subscription,
}

impl<S: RawSocket> EventChannel<S> {
    /// Wraps an unsubscribed connection.
    pub const fn new(conn: Connection<S>) -> Self {
        Self {
            conn,
            state: Subscription::Unsubscribed,
        }
    }

    /// Current subscription state.
    #[must_use]
    pub const fn state(&self) -> Subscription {
        self.state
    }

    /// Performs the subscribe handshake. Allowed once.
    ///
    /// # Errors
    /// Returns [`SubscriptionError::AlreadySubscribed`] on a second call, and
    /// the errors of [`subscribe`] otherwise.
    pub fn subscribe(&mut self, payload: &[u8]) -> Result<(), SwayError> {
        if self.state == Subscription::Subscribed {
            return Err(SubscriptionError::AlreadySubscribed.into());
        }
        subscribe(&mut self.conn, payload)?;
        self.state = Subscription::Subscribed;
        internal::info(
            "EVENTS",
            &format!("Subscribed: {}", String::from_utf8_lossy(payload)),
        );
        Ok(())
    }

    /// Blocks until the next pushed event.
    ///
    /// # Errors
    /// Returns [`SubscriptionError::NotSubscribed`] before a successful
    /// subscribe, and connection errors otherwise.
    pub fn next_event(&mut self) -> Result<Frame, SwayError> {
        self.ensure_subscribed()?;
        self.conn.receive()
    }

    /// Waits up to `timeout` for the next event.
    ///
    /// # Errors
    /// Same as [`next_event`](Self::next_event).
    pub fn next_event_timeout(&mut self, timeout: Duration) -> Result<Option<Frame>, SwayError> {
        self.ensure_subscribed()?;
        self.conn.receive_timeout(timeout)
    }

    fn ensure_subscribed(&self) -> Result<(), SwayError> {
        match self.state {
            Subscription::Subscribed => Ok(()),
            Subscription::Unsubscribed => Err(SubscriptionError::NotSubscribed.into()),
        }
    }

    /// Underlying connection, for teardown.
    pub(crate) const fn connection_mut(&mut self) -> &mut Connection<S> {
        &mut self.conn
    }

    /// Whether the underlying connection is still open.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.conn.is_open()
    }
}
