//! Background thread that drains the event connection.

use super::client::Client;
use super::codec::Frame;
use super::error::SwayError;
use super::transport::RawSocket;
use crate::internal;
use std::io;
use std::ops::ControlFlow;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Handle to a running event listener thread.
///
/// Drop this handle to signal shutdown; the thread notices within one poll interval.
#[derive(Debug)]
pub struct EventListenerHandle {
    shutdown: Arc<AtomicBool>,
    thread: Option<JoinHandle<Result<(), SwayError>>>,
}

impl EventListenerHandle {
    /// Signals the listener to stop.
    pub fn stop(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }

    /// Whether the listener thread has exited.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.thread.as_ref().is_none_or(JoinHandle::is_finished)
    }

    /// Signals stop and waits for the thread, returning how the loop ended.
    ///
    /// # Errors
    /// Returns the connection error that ended the loop, if any.
    pub fn join(mut self) -> Result<(), SwayError> {
        self.stop();
        match self.thread.take() {
            Some(handle) => match handle.join() {
                Ok(result) => result,
                Err(panic) => std::panic::resume_unwind(panic),
            },
            None => Ok(()),
        }
    }
}

impl Drop for EventListenerHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Runs the event loop on the current thread (blocking).
///
/// Waits for events in slices of `poll_interval` so `shutdown` is checked
/// regularly, and passes each frame to `handler`. Returns when the handler
/// breaks, `shutdown` is set, or the connection fails. The client must already
/// be subscribed.
///
/// # Errors
/// Returns the error that broke the connection. An error observed after
/// `shutdown` was set is not reported.
pub fn run_event_loop<S, F>(
    client: &Client<S>,
    poll_interval: Duration,
    shutdown: &AtomicBool,
    mut handler: F,
) -> Result<(), SwayError>
where
    S: RawSocket,
    F: FnMut(Frame) -> ControlFlow<()>,
{
    while !shutdown.load(Ordering::Relaxed) {
        match client.next_event_timeout(poll_interval) {
            Ok(Some(frame)) => {
                if handler(frame).is_break() {
                    break;
                }
            }
            Ok(None) => {}
            Err(e) => {
                if shutdown.load(Ordering::Relaxed) {
                    break;
                }
                internal::warn("EVENTS", &format!("Event stream ended: {e}"));
                return Err(e);
            }
        }
    }

    internal::debug("EVENTS", "Event listener stopped");
    Ok(())
}

/// Starts the event loop in a background thread named `sway-ipc-events`.
///
/// # Errors
/// Returns the OS error if the thread cannot be spawned.
pub fn start_listener<S, F>(
    client: Arc<Client<S>>,
    poll_interval: Duration,
    handler: F,
) -> io::Result<EventListenerHandle>
where
    S: RawSocket + Send + 'static,
    F: FnMut(Frame) -> ControlFlow<()> + Send + 'static,
{
    let shutdown = Arc::new(AtomicBool::new(false));
    let shutdown_clone = Arc::clone(&shutdown);

    let thread = thread::Builder::new()
        .name("sway-ipc-events".into())
        .spawn(move || run_event_loop(&*client, poll_interval, &shutdown_clone, handler))
        .inspect_err(|e| {
            internal::error("EVENTS", &format!("Failed to spawn listener thread: {e}"));
        })?;

    Ok(EventListenerHandle {
        shutdown,
        thread: Some(thread),
    })
}
