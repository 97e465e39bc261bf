#![forbid(unsafe_code)]
//! mailreach: email reachability checks
//!
//! Syntax parsing, static domain classification (free provider, role
//! account, disposable, known TLD), MX resolution, SMTP recipient probing
//! with catch-all detection and an optional avatar lookup, merged into one
//! [`VerificationResult`] with a yes/no/unknown [`Reachable`] verdict.
//!
//! ```no_run
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let verifier = mailreach::Verifier::builder()
//!     .enable_smtp_check()
//!     .build()?;
//! let result = verifier.verify("alice@example.com").await?;
//! println!("{}", result.reachable);
//! # Ok(())
//! # }
//! ```

pub mod validator;
pub use validator::{Syntax, domain_to_ascii, parse_address};

pub mod classify;

pub mod disposable;
pub use disposable::{DisposableDomains, DisposableRefresher, RefreshError};

pub mod context;
pub use context::{CheckContext, Interrupted};

pub mod mx;
pub use mx::{LookupMx, MailExchanger, Mx, MxError};

pub mod smtp;
pub use smtp::{SmtpCheckResult, SmtpError};

pub mod reachability;
pub use reachability::Reachable;

pub mod avatar;
pub use avatar::{Avatar, AvatarError};

pub mod config;
pub use config::{
    ConfigError, EnabledChecks, ProxyConfig, ProxyKind, VerifierBuilder, VerifierConfig,
};

pub mod verifier;
pub use verifier::{
    CheckError, CheckErrors, CheckName, VerificationResult, Verifier, VerifyError,
};
