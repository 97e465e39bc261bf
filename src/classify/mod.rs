//! Static domain and account classification: free providers, role accounts,
//! top-level domain existence and typo suggestions.

mod suggest;
pub(crate) mod tables;

pub use suggest::suggest;

use crate::validator::domain_to_ascii;
use tables::{COUNTRY_CODE_TLDS, FREE_PROVIDERS, GENERIC_TLDS, ROLE_ACCOUNTS};

/// `true` when `domain` is a well-known free mailbox provider.
pub fn is_free_provider(domain: &str) -> bool {
    FREE_PROVIDERS.contains(domain_to_ascii(domain).as_str())
}

/// `true` when `username` names a function rather than a person
/// (`postmaster`, `support`, ...).
pub fn is_role_account(username: &str) -> bool {
    ROLE_ACCOUNTS.contains(username.trim().to_ascii_lowercase().as_str())
}

/// `true` when the last label of `domain` is a delegated generic or
/// country-code top-level domain.
pub fn top_level_domain_exists(domain: &str) -> bool {
    let ascii = domain_to_ascii(domain);
    let Some((_, tld)) = ascii.rsplit_once('.') else {
        return false;
    };
    GENERIC_TLDS.contains(tld) || COUNTRY_CODE_TLDS.contains(tld)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn free_providers_are_case_insensitive() {
        assert!(is_free_provider("gmail.com"));
        assert!(is_free_provider("GMail.com"));
        assert!(!is_free_provider("github.com"));
    }

    #[test]
    fn role_accounts() {
        assert!(is_role_account("admin"));
        assert!(is_role_account("Postmaster"));
        assert!(!is_role_account("email_username"));
    }

    #[test]
    fn tld_lookup() {
        assert!(top_level_domain_exists("zzjbfwqi.shop"));
        assert!(top_level_domain_exists("example.co.uk"));
        assert!(top_level_domain_exists("github.com"));
        assert!(!top_level_domain_exists("iamdisposableemail.testing"));
        assert!(!top_level_domain_exists("localhost"));
    }
}
