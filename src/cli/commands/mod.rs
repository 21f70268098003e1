//! One file per subcommand; each handler owns its error reporting.

mod send;
mod socket;
mod subscribe;

pub use send::cmd_send;
pub use socket::cmd_socket;
pub use subscribe::cmd_subscribe;
