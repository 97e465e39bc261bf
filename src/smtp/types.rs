#[cfg(feature = "with-serde")]
use serde::{Deserialize, Serialize};

/// What the primary `RCPT TO` said about the mailbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum MailboxState {
    Accepted,
    Rejected,
    #[default]
    Unknown,
}

/// Result of one primary session against one host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct ProbeOutcome {
    pub host_exists: bool,
    pub mailbox: MailboxState,
    pub full_inbox: bool,
    pub service_disabled: bool,
}

impl ProbeOutcome {
    pub(crate) fn connected() -> Self {
        Self {
            host_exists: true,
            ..Self::default()
        }
    }

    /// A verdict that ends the walk through the MX list.
    pub(crate) fn is_conclusive(&self) -> bool {
        self.mailbox != MailboxState::Unknown || self.full_inbox || self.service_disabled
    }

    /// The catch-all probe only makes sense after an accepted recipient.
    pub(crate) fn wants_catch_all_probe(&self) -> bool {
        self.host_exists
            && self.mailbox == MailboxState::Accepted
            && !self.full_inbox
            && !self.service_disabled
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CatchAllVerdict {
    pub is_catch_all: bool,
}

/// Outcome of the SMTP check.
///
/// `host_exists == false` implies every other field is `false`.
#[cfg_attr(feature = "with-serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SmtpCheckResult {
    pub host_exists: bool,
    pub full_inbox: bool,
    pub catch_all: bool,
    pub deliverable: bool,
    pub disabled: bool,
}

impl SmtpCheckResult {
    /// Some host accepted a connection but none gave a conclusive answer.
    pub(crate) fn host_only() -> Self {
        Self {
            host_exists: true,
            ..Self::default()
        }
    }

    pub(crate) fn from_probe(outcome: &ProbeOutcome, verdict: CatchAllVerdict) -> Self {
        if !outcome.host_exists {
            return Self::default();
        }
        let catch_all = outcome.wants_catch_all_probe() && verdict.is_catch_all;
        Self {
            host_exists: true,
            full_inbox: outcome.full_inbox,
            catch_all,
            deliverable: outcome.mailbox == MailboxState::Accepted && !catch_all,
            disabled: outcome.service_disabled,
        }
    }
}
