//! Reduction of an SMTP check to a single reachability verdict.

use std::fmt;

use crate::smtp::SmtpCheckResult;

#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "with-serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Reachable {
    Yes,
    No,
    #[default]
    Unknown,
}

impl Reachable {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Yes => "yes",
            Self::No => "no",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Reachable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `unknown` when SMTP checking is off or the host is catch-all, `yes` when
/// the mailbox is deliverable, `no` otherwise.
pub fn classify(smtp_enabled: bool, result: &SmtpCheckResult) -> Reachable {
    if !smtp_enabled {
        return Reachable::Unknown;
    }
    if result.deliverable {
        return Reachable::Yes;
    }
    if result.catch_all {
        return Reachable::Unknown;
    }
    Reachable::No
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn smtp_result() -> impl Strategy<Value = SmtpCheckResult> {
        any::<[bool; 5]>().prop_map(|[host_exists, full_inbox, catch_all, deliverable, disabled]| {
            SmtpCheckResult {
                host_exists,
                full_inbox,
                catch_all,
                deliverable,
                disabled,
            }
        })
    }

    proptest! {
        #[test]
        fn disabled_is_always_unknown(result in smtp_result()) {
            prop_assert_eq!(classify(false, &result), Reachable::Unknown);
        }

        #[test]
        fn yes_only_when_deliverable(result in smtp_result()) {
            prop_assert_eq!(classify(true, &result) == Reachable::Yes, result.deliverable);
        }
    }

    #[test]
    fn catch_all_is_unknown() {
        let result = SmtpCheckResult {
            host_exists: true,
            catch_all: true,
            ..SmtpCheckResult::default()
        };
        assert_eq!(classify(true, &result), Reachable::Unknown);
    }

    #[test]
    fn missing_host_is_no() {
        assert_eq!(classify(true, &SmtpCheckResult::default()), Reachable::No);
    }

    #[test]
    fn display_is_lowercase() {
        assert_eq!(Reachable::Yes.to_string(), "yes");
        assert_eq!(Reachable::Unknown.as_str(), "unknown");
    }
}
