/// Result of parsing an address into its username and domain parts.
///
/// Invalid addresses carry empty `username`/`domain` fields; `reasons` lists
/// what failed.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Syntax {
    pub username: String,
    pub domain: String,
    pub valid: bool,
    #[cfg_attr(
        feature = "with-serde",
        serde(default, skip_serializing_if = "Vec::is_empty")
    )]
    pub reasons: Vec<String>,
}

impl Syntax {
    pub(crate) fn invalid(reasons: Vec<String>) -> Self {
        Self {
            reasons,
            ..Self::default()
        }
    }
}
