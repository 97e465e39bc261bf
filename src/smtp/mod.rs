//! SMTP reachability probing.
//!
//! [`check_smtp`] walks a domain's mail exchangers in preference order,
//! runs a minimal `EHLO`/`MAIL FROM`/`RCPT TO` dialogue on each and stops at
//! the first conclusive reply. An accepted recipient is followed, on the same
//! session, by a second `RCPT TO` for a synthetic mailbox to tell selective
//! hosts from catch-all ones. No message is ever sent.

mod catch_all;
mod error;
mod probe;
mod session;
mod transport;
mod types;
mod util;

pub use error::SmtpError;
pub use probe::check_smtp;
pub use session::SmtpReply;
pub use types::{CatchAllVerdict, SmtpCheckResult};

#[cfg(test)]
pub(crate) mod tests;
