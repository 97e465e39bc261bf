mod domain;
mod local;
mod types;

pub use domain::domain_to_ascii;
pub use types::Syntax;

use domain::check_domain;
use local::is_local_strict;

/// Parse `email` into username and domain, checking an RFC 5321/5322 subset
/// (dot-atom local part, LDH domain labels after IDNA conversion).
///
/// Never fails: an unusable address yields `valid == false` with the reasons.
pub fn parse_address(email: &str) -> Syntax {
    let input = email.trim();

    let mut reasons = Vec::new();

    // longueur totale (RFC 5321: 254 max avec @)
    if input.len() > 254 {
        reasons.push(format!("total length {} > 254", input.len()));
    }

    let parts: Vec<&str> = input.split('@').collect();
    if parts.len() != 2 {
        reasons.push("must contain exactly one '@'".to_string());
        return Syntax::invalid(reasons);
    }
    let (local, domain) = (parts[0], parts[1]);

    if local.is_empty() || local.len() > 64 {
        reasons.push(format!(
            "local part length {} invalid (1..=64)",
            local.len()
        ));
    } else if !is_local_strict(local) {
        reasons.push("invalid local part".to_string());
    }

    check_domain(domain, &mut reasons);

    if !reasons.is_empty() {
        return Syntax::invalid(reasons);
    }

    Syntax {
        username: local.to_string(),
        domain: domain.to_ascii_lowercase(),
        valid: true,
        reasons,
    }
}
