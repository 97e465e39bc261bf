use thiserror::Error;
use trust_dns_resolver::error::ResolveError;

use crate::context::Interrupted;

#[derive(Debug, Error)]
pub enum MxError {
    #[error("domain is empty")]
    EmptyDomain,
    #[error("domain IDNA conversion failed")]
    IdnaConversion {
        #[source]
        source: idna::Errors,
    },
    #[error("resolver initialization failed: {source}")]
    ResolverInit {
        #[source]
        source: ResolveError,
    },
    #[error("no mail exchanger advertised for {domain}")]
    NoMailExchanger { domain: String },
    #[error("MX lookup for {domain} failed: {source}")]
    HostLookupFailed {
        domain: String,
        #[source]
        source: ResolveError,
    },
    #[error("MX lookup abandoned: {0}")]
    Interrupted(#[from] Interrupted),
}

impl MxError {
    pub(crate) fn idna(source: idna::Errors) -> Self {
        Self::IdnaConversion { source }
    }

    pub(crate) fn resolver_init(source: ResolveError) -> Self {
        Self::ResolverInit { source }
    }

    pub(crate) fn lookup(domain: &str, source: ResolveError) -> Self {
        Self::HostLookupFailed {
            domain: domain.to_string(),
            source,
        }
    }

    /// `true` for the failures that mean "this domain has nowhere to deliver",
    /// as opposed to an aborted or misconfigured lookup.
    pub fn is_host_lookup_failure(&self) -> bool {
        matches!(
            self,
            Self::NoMailExchanger { .. } | Self::HostLookupFailed { .. }
        )
    }
}
