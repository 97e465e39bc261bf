use thiserror::Error;

use crate::context::Interrupted;
use crate::mx::MxError;

#[derive(Debug, Error)]
pub enum SmtpError {
    #[error(transparent)]
    Mx(#[from] MxError),
    #[error("connection to {host} failed: {source}")]
    Connect {
        host: String,
        #[source]
        source: std::io::Error,
    },
    #[error("proxy {proxy} could not reach {host}: {source}")]
    Proxy {
        proxy: String,
        host: String,
        #[source]
        source: tokio_socks::Error,
    },
    #[error("I/O error: {source}")]
    Io {
        #[source]
        source: std::io::Error,
    },
    #[error("protocol error: {0}")]
    Protocol(String),
    #[error(transparent)]
    Interrupted(#[from] Interrupted),
}

impl SmtpError {
    pub(crate) fn connect(host: &str, source: std::io::Error) -> Self {
        Self::Connect {
            host: host.to_string(),
            source,
        }
    }

    pub(crate) fn io(source: std::io::Error) -> Self {
        Self::Io { source }
    }

    /// Cancellation or the shared deadline: the whole probe must stop.
    /// Per-operation timeouts are not aborts, the next host is tried.
    pub fn is_abort(&self) -> bool {
        matches!(
            self,
            Self::Interrupted(Interrupted::Cancelled | Interrupted::DeadlineExceeded)
                | Self::Mx(MxError::Interrupted(
                    Interrupted::Cancelled | Interrupted::DeadlineExceeded
                ))
        )
    }

    pub fn is_cancellation(&self) -> bool {
        matches!(
            self,
            Self::Interrupted(Interrupted::Cancelled) | Self::Mx(MxError::Interrupted(Interrupted::Cancelled))
        )
    }
}
