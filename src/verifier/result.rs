#[cfg(feature = "with-serde")]
use serde::{Deserialize, Serialize};

use crate::avatar::Avatar;
use crate::reachability::Reachable;
use crate::smtp::SmtpCheckResult;
use crate::validator::Syntax;

/// Everything learnt about one address.
#[cfg_attr(feature = "with-serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerificationResult {
    /// Input address, trimmed and lower-cased.
    pub email: String,
    pub reachable: Reachable,
    pub syntax: Syntax,
    /// `None` when the SMTP check was disabled or skipped.
    pub smtp: Option<SmtpCheckResult>,
    pub avatar: Option<Avatar>,
    pub suggestion: String,
    pub disposable: bool,
    pub role_account: bool,
    pub free: bool,
    pub has_mx_records: bool,
    /// `true` only when the TLD check ran and passed.
    pub tld_exists: bool,
}
