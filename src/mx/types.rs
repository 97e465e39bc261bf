/// One mail exchanger advertised for a domain. Ordering is by preference
/// (lower first), then host name.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MailExchanger {
    pub preference: u16,
    pub host: String,
}

impl MailExchanger {
    pub fn new(preference: u16, host: impl Into<String>) -> Self {
        Self {
            preference,
            host: host.into(),
        }
    }
}

/// Outcome of the MX presence check.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Mx {
    pub has_mx_record: bool,
    pub records: Vec<MailExchanger>,
}
