//! Sway IPC protocol client.
//!
//! Sway (and i3) expose a Unix domain socket speaking a length-prefixed binary
//! protocol. A [`Client`] opens two independent connections to it:
//! - **command connection**: strictly one request, then its response
//! - **event connection**: one subscribe handshake, then a stream of pushed events
//!
//! # Example
//!
//! ```no_run
//! use swaysock::sway::{Client, message::command};
//!
//! let client = Client::connect()?;
//! let reply = client.send_command(command::RUN_COMMAND, "workspace 2")?;
//! println!("{}", reply.payload_str().unwrap_or_default());
//! # Ok::<(), swaysock::sway::SwayError>(())
//! ```

pub mod client;
pub mod codec;
pub mod connection;
pub mod error;
pub mod listener;
pub mod message;
pub mod socket;
pub mod subscription;
pub mod transport;

pub use client::{Client, TEARDOWN_SENTINEL};
pub use codec::{Frame, HEADER_LEN, Header, MAGIC};
pub use connection::Connection;
pub use error::{DiscoveryError, ProtocolError, SubscriptionError, SwayError};
pub use listener::EventListenerHandle;
pub use subscription::{EventChannel, SUBSCRIBE_SUCCESS, Subscription};
pub use transport::{RawSocket, SocketTransport};
