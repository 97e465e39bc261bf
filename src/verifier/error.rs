use std::fmt;

use thiserror::Error;

use crate::avatar::AvatarError;
use crate::context::Interrupted;
use crate::mx::MxError;
use crate::smtp::SmtpError;
use crate::verifier::VerificationResult;

/// Independent checks launched by a verification run.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "with-serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CheckName {
    Mx,
    Smtp,
    Avatar,
    Suggestion,
}

impl fmt::Display for CheckName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Mx => "MX",
            Self::Smtp => "SMTP",
            Self::Avatar => "avatar",
            Self::Suggestion => "suggestion",
        })
    }
}

#[derive(Debug, Error)]
pub enum CheckCause {
    #[error(transparent)]
    Mx(#[from] MxError),
    #[error(transparent)]
    Smtp(#[from] SmtpError),
    #[error(transparent)]
    Avatar(#[from] AvatarError),
}

/// One failed check.
#[derive(Debug, Error)]
#[error("{name} check failed: {cause}")]
pub struct CheckError {
    pub name: CheckName,
    #[source]
    pub cause: CheckCause,
}

impl CheckError {
    pub fn new(name: CheckName, cause: impl Into<CheckCause>) -> Self {
        Self {
            name,
            cause: cause.into(),
        }
    }

    /// The check only stopped because the run was cancelled.
    pub fn is_cancellation(&self) -> bool {
        match &self.cause {
            CheckCause::Mx(MxError::Interrupted(Interrupted::Cancelled)) => true,
            CheckCause::Smtp(err) => err.is_cancellation(),
            CheckCause::Avatar(AvatarError::Interrupted(Interrupted::Cancelled)) => true,
            _ => false,
        }
    }
}

/// Every failure of a verification run, ordered by check.
#[derive(Debug, Default)]
pub struct CheckErrors(Vec<CheckError>);

impl CheckErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: CheckError) {
        self.0.push(error);
        self.0.sort_by_key(|e| e.name);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CheckError> {
        self.0.iter()
    }

    pub fn get(&self, name: CheckName) -> Option<&CheckError> {
        self.0.iter().find(|e| e.name == name)
    }

    /// Drop failures caused only by a sibling cancelling the run, as long as
    /// a real failure remains to explain it.
    pub(crate) fn without_sibling_cancellations(mut self) -> Self {
        if self.0.iter().any(|e| !e.is_cancellation()) {
            self.0.retain(|e| !e.is_cancellation());
        }
        self
    }
}

impl fmt::Display for CheckErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.as_slice() {
            [] => f.write_str("no check failed"),
            [only] => write!(f, "{only}"),
            many => {
                write!(f, "{} checks failed: ", many.len())?;
                for (i, err) in many.iter().enumerate() {
                    if i > 0 {
                        f.write_str("; ")?;
                    }
                    write!(f, "{err}")?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for CheckErrors {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.first().map(|e| e as _)
    }
}

impl IntoIterator for CheckErrors {
    type Item = CheckError;
    type IntoIter = std::vec::IntoIter<CheckError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a CheckErrors {
    type Item = &'a CheckError;
    type IntoIter = std::slice::Iter<'a, CheckError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[derive(Debug, Error)]
pub enum VerifyError {
    /// Fatal: no result is produced.
    #[error("TLD domain \"{domain}\" does not exist")]
    TopLevelDomainUnknown { domain: String },
    /// Some checks failed; `partial` holds everything that was computed.
    #[error("{errors}")]
    Checks {
        partial: Box<VerificationResult>,
        errors: CheckErrors,
    },
}

impl VerifyError {
    pub fn partial(&self) -> Option<&VerificationResult> {
        match self {
            Self::Checks { partial, .. } => Some(partial),
            Self::TopLevelDomainUnknown { .. } => None,
        }
    }

    pub fn check_errors(&self) -> Option<&CheckErrors> {
        match self {
            Self::Checks { errors, .. } => Some(errors),
            Self::TopLevelDomainUnknown { .. } => None,
        }
    }
}
