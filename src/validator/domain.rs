/// Convertit le domaine en ASCII (punycode). Retombe sur l'entrée en minuscules
/// quand la conversion échoue, les vérifications de labels feront le tri.
pub fn domain_to_ascii(domain: &str) -> String {
    let trimmed = domain.trim().trim_end_matches('.');
    idna::domain_to_ascii(trimmed).unwrap_or_else(|_| trimmed.to_ascii_lowercase())
}

/// Valide le domaine: conversion IDNA + checks de labels.
/// Push des raisons invalidantes dans `reasons`.
pub(crate) fn check_domain(domain: &str, reasons: &mut Vec<String>) {
    let domain_ascii = match idna::domain_to_ascii(domain) {
        Ok(d) => d,
        Err(_) => {
            reasons.push("domain punycode conversion failed".to_string());
            return;
        }
    };

    if domain_ascii.is_empty() {
        reasons.push("domain empty after IDNA conversion".to_string());
        return;
    }

    if domain_ascii.len() > 253 {
        reasons.push(format!("domain length {} > 253", domain_ascii.len()));
    }

    // au moins un point
    if !domain_ascii.contains('.') {
        reasons.push("domain must contain at least one dot".to_string());
    }

    for label in domain_ascii.split('.') {
        if label.is_empty() {
            reasons.push("empty domain label".to_string());
            continue;
        }
        if label.len() > 63 {
            reasons.push(format!(
                "domain label '{}' length {} > 63",
                label,
                label.len()
            ));
        }
        if label.starts_with('-') || label.ends_with('-') {
            reasons.push(format!(
                "domain label '{}' cannot start/end with '-'",
                label
            ));
        }
        if !label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            reasons.push(format!("domain label '{}' has invalid chars", label));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn basic_domain_ok() {
        let mut reasons = vec![];
        check_domain("example.com", &mut reasons);
        assert!(reasons.is_empty(), "{:?}", reasons);
    }

    #[test]
    fn label_too_long() {
        let long = "a".repeat(64);
        let mut reasons = vec![];
        check_domain(&format!("{}.com", long), &mut reasons);
        assert!(!reasons.is_empty());
    }

    #[test]
    fn unicode_domain_is_punycoded() {
        assert_eq!(domain_to_ascii("exämple.com"), "xn--exmple-cua.com");
        assert_eq!(domain_to_ascii("Example.COM."), "example.com");
    }
}
