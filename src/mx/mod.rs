//! DNS mail-exchanger resolution.
//!
//! [`resolve_mail_exchangers`] feeds the SMTP probe with hosts in preference
//! order; [`check_mx`] is the standalone presence check.

mod error;
mod resolver;
mod types;

pub use error::MxError;
pub use resolver::{LookupMx, check_mx, resolve_mail_exchangers, system_resolver};
pub use types::{MailExchanger, Mx};

#[cfg(test)]
pub(crate) mod tests;
