//! The client consumers use: one command connection and one event connection
//! to the same socket.

use super::codec::Frame;
use super::connection::Connection;
use super::error::SwayError;
use super::socket;
use super::subscription::{self, EventChannel, Subscription};
use super::transport::RawSocket;
use crate::config::{Config, ConnectionConfig, SocketConfig, Teardown};
use crate::internal;
use std::os::unix::net::UnixStream;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError, TryLockError};
use std::time::Duration;

/// Written to each socket on teardown. It is not a valid header, so a peer
/// blocked reading from us fails immediately.
pub const TEARDOWN_SENTINEL: &[u8] = b"close-sway-ipc";

/// Sway IPC client.
///
/// Requests on the command connection are serialized by a lock, so a shared
/// `&Client` may be used from several threads while another thread drains
/// events. [`close`](Self::close) does not wait for those calls: it shuts the
/// sockets down through separate handles, which makes blocked reads fail.
/// Both sockets are closed on drop.
///
/// # Example
///
/// ```no_run
/// use swaysock::sway::{Client, message};
///
/// let client = Client::connect()?;
/// let workspaces = client.send_command(message::command::GET_WORKSPACES, "")?;
/// println!("{}", String::from_utf8_lossy(workspaces.payload()));
///
/// client.subscribe_events(["workspace"])?;
/// let event = client.next_event()?;
/// println!("{event:?}");
/// # Ok::<(), swaysock::sway::SwayError>(())
/// ```
#[derive(Debug)]
pub struct Client<S: RawSocket = UnixStream> {
    socket_path: PathBuf,
    commands: Mutex<Connection<S>>,
    events: Mutex<EventChannel<S>>,
    /// Duplicate handles to the command and event sockets, taken by `close`.
    interrupts: [Mutex<Option<S>>; 2],
    closed: AtomicBool,
    teardown: Teardown,
}

impl Client<UnixStream> {
    /// Resolves the socket from the environment and connects with defaults.
    ///
    /// # Errors
    /// Returns [`SwayError::Discovery`] or [`SwayError::Connect`].
    pub fn connect() -> Result<Self, SwayError> {
        Self::with_configs(&SocketConfig::default(), &ConnectionConfig::default())
    }

    /// Connects using the `[socket]` and `[connection]` sections of `config`.
    ///
    /// # Errors
    /// Returns [`SwayError::Discovery`] or [`SwayError::Connect`].
    pub fn from_config(config: &Config) -> Result<Self, SwayError> {
        Self::with_configs(&config.socket, &config.connection)
    }

    /// Resolves the socket path once, then opens both connections against it.
    ///
    /// # Errors
    /// Returns [`SwayError::Discovery`] or [`SwayError::Connect`].
    pub fn with_configs(
        socket: &SocketConfig,
        connection: &ConnectionConfig,
    ) -> Result<Self, SwayError> {
        let path = socket::resolve_socket_path(socket)?;
        Self::connect_to(&path, connection)
    }

    /// Opens both connections to a known socket path.
    ///
    /// # Errors
    /// Returns [`SwayError::Connect`] if either connection fails.
    pub fn connect_to(path: &Path, config: &ConnectionConfig) -> Result<Self, SwayError> {
        let commands = Connection::open(path, config)?;
        let events = Connection::open(path, config)?;
        internal::info("IPC", &format!("Connected to {}", path.display()));
        Ok(Self::from_connections(path, commands, events, config.teardown))
    }
}

impl<S: RawSocket> Client<S> {
    /// Assembles a client from two already-open connections.
    pub fn from_connections(
        socket_path: impl Into<PathBuf>,
        commands: Connection<S>,
        events: Connection<S>,
        teardown: Teardown,
    ) -> Self {
        let interrupts = [interrupt_handle(&commands), interrupt_handle(&events)];
        Self {
            socket_path: socket_path.into(),
            commands: Mutex::new(commands),
            events: Mutex::new(EventChannel::new(events)),
            interrupts,
            closed: AtomicBool::new(false),
            teardown,
        }
    }

    /// Path both connections were opened against.
    #[must_use]
    pub fn socket_path(&self) -> &Path {
        &self.socket_path
    }

    /// Sends a request on the command connection and returns its response.
    ///
    /// Concurrent callers are serialized; each receives its own response.
    ///
    /// # Errors
    /// Any connection error; see [`Connection::send`].
    pub fn send_command(
        &self,
        message_type: u32,
        payload: impl AsRef<[u8]>,
    ) -> Result<Frame, SwayError> {
        lock(&self.commands).send(message_type, payload.as_ref())
    }

    /// Subscribes the event connection with a raw payload.
    ///
    /// # Errors
    /// See [`EventChannel::subscribe`].
    pub fn subscribe(&self, payload: impl AsRef<[u8]>) -> Result<(), SwayError> {
        lock(&self.events).subscribe(payload.as_ref())
    }

    /// Subscribes to the named events, e.g. `["workspace", "window"]`.
    ///
    /// # Errors
    /// See [`EventChannel::subscribe`].
    pub fn subscribe_events<I, T>(&self, events: I) -> Result<(), SwayError>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.subscribe(subscription::event_list_payload(events))
    }

    /// Whether the subscribe handshake has completed.
    #[must_use]
    pub fn is_subscribed(&self) -> bool {
        lock(&self.events).state() == Subscription::Subscribed
    }

    /// Blocks until the next event. Meant to be called in a loop by one thread.
    ///
    /// # Errors
    /// See [`EventChannel::next_event`].
    pub fn next_event(&self) -> Result<Frame, SwayError> {
        lock(&self.events).next_event()
    }

    /// Waits up to `timeout` for the next event; `Ok(None)` if none arrived.
    ///
    /// # Errors
    /// See [`EventChannel::next_event_timeout`].
    pub fn next_event_timeout(&self, timeout: Duration) -> Result<Option<Frame>, SwayError> {
        lock(&self.events).next_event_timeout(timeout)
    }

    /// Whether both connections are still open.
    ///
    /// Does not block: a connection busy with an in-flight call counts as open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        !self.closed.load(Ordering::Acquire)
            && peek_state(&self.commands, Connection::is_open)
            && peek_state(&self.events, EventChannel::is_open)
    }

    /// Notifies the peer and closes both connections. Idempotent.
    ///
    /// Threads blocked in [`send_command`](Self::send_command) or
    /// [`next_event`](Self::next_event) are woken first and get an error.
    pub fn close(&self) {
        if self.closed.swap(true, Ordering::AcqRel) {
            return;
        }

        let interrupted = self.interrupts.each_ref().map(|slot| self.interrupt(slot));

        let mut commands = lock(&self.commands);
        let mut events = lock(&self.events);
        for (conn, interrupted) in [&mut *commands, events.connection_mut()]
            .into_iter()
            .zip(interrupted)
        {
            if !interrupted {
                if self.teardown == Teardown::Sentinel && conn.is_open() {
                    // Best-effort; the peer may already be gone.
                    let _ = conn.write_raw(TEARDOWN_SENTINEL);
                }
                conn.shutdown();
            }
            conn.close();
        }
        internal::debug(
            "IPC",
            &format!("Closed connections to {}", self.socket_path.display()),
        );
    }

    /// Sends the sentinel and shuts the socket down through its duplicate
    /// handle, without touching the connection lock. Returns `false` if there
    /// is no such handle.
    fn interrupt(&self, slot: &Mutex<Option<S>>) -> bool {
        let Some(mut socket) = lock(slot).take() else {
            return false;
        };
        if self.teardown == Teardown::Sentinel {
            let _ = socket.write_all(TEARDOWN_SENTINEL);
        }
        if let Err(e) = socket.shutdown_both() {
            internal::trace("SOCKET", &format!("shutdown failed: {e}"));
        }
        true
    }
}

impl<S: RawSocket> Drop for Client<S> {
    fn drop(&mut self) {
        self.close();
    }
}

fn interrupt_handle<S: RawSocket>(conn: &Connection<S>) -> Mutex<Option<S>> {
    let handle = match conn.try_clone_handle() {
        Some(Ok(socket)) => Some(socket),
        Some(Err(e)) => {
            internal::debug(
                "IPC",
                &format!("No duplicate handle, close will wait for in-flight calls: {e}"),
            );
            None
        }
        None => None,
    };
    Mutex::new(handle)
}

fn peek_state<T>(mutex: &Mutex<T>, is_open: impl FnOnce(&T) -> bool) -> bool {
    match mutex.try_lock() {
        Ok(guard) => is_open(&guard),
        Err(TryLockError::Poisoned(poisoned)) => is_open(&poisoned.into_inner()),
        Err(TryLockError::WouldBlock) => true,
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    // Connection state stays consistent across a panic: fatal errors close it first.
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
