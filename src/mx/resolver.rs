use std::collections::HashSet;

use async_trait::async_trait;
use trust_dns_resolver::TokioAsyncResolver;
use trust_dns_resolver::error::{ResolveError, ResolveErrorKind};
use trust_dns_resolver::proto::op::ResponseCode;

use super::{MailExchanger, Mx, MxError};
use crate::context::CheckContext;

/// Source of MX records. Implemented for the tokio resolver; tests plug in
/// stubs.
///
/// Implementations return `Ok(vec![])` when the domain exists but publishes
/// no MX record, and `Err` for every other failure, NXDOMAIN included.
#[async_trait]
pub trait LookupMx: Send + Sync {
    async fn lookup_mx(&self, domain: &str) -> Result<Vec<MailExchanger>, ResolveError>;
}

#[async_trait]
impl LookupMx for TokioAsyncResolver {
    async fn lookup_mx(&self, domain: &str) -> Result<Vec<MailExchanger>, ResolveError> {
        let lookup = match TokioAsyncResolver::mx_lookup(self, domain).await {
            Ok(lookup) => lookup,
            Err(err) if is_empty_answer(&err) => return Ok(Vec::new()),
            Err(err) => return Err(err),
        };
        let mut records = Vec::new();
        for mx in lookup.iter() {
            let host = normalize_exchange(&mx.exchange().to_utf8());
            // RFC 7505 null MX: "." means the domain accepts no mail
            if host.is_empty() {
                continue;
            }
            records.push(MailExchanger::new(mx.preference(), host));
        }
        Ok(records)
    }
}

/// Resolver configured from the host's `/etc/resolv.conf` (or platform
/// equivalent).
pub fn system_resolver() -> Result<TokioAsyncResolver, MxError> {
    TokioAsyncResolver::tokio_from_system_conf().map_err(MxError::resolver_init)
}

/// Resolve `domain` to its mail exchangers, ascending by preference.
pub async fn resolve_mail_exchangers<R>(
    resolver: &R,
    domain: &str,
    ctx: &CheckContext,
) -> Result<Vec<MailExchanger>, MxError>
where
    R: LookupMx + ?Sized,
{
    let ascii = normalize_domain(domain)?;
    let mut records = ctx
        .run(None, resolver.lookup_mx(&ascii))
        .await?
        .map_err(|err| MxError::lookup(&ascii, err))?;

    records.sort();
    // keep the most preferred entry of a host listed twice
    let mut seen = HashSet::new();
    records.retain(|mx| seen.insert(mx.host.clone()));

    if records.is_empty() {
        tracing::debug!(domain = %ascii, "no MX records");
        return Err(MxError::NoMailExchanger { domain: ascii });
    }
    tracing::debug!(domain = %ascii, count = records.len(), "MX records resolved");
    Ok(records)
}

/// MX presence check: a domain without records is reported, not failed.
pub async fn check_mx<R>(resolver: &R, domain: &str, ctx: &CheckContext) -> Result<Mx, MxError>
where
    R: LookupMx + ?Sized,
{
    match resolve_mail_exchangers(resolver, domain, ctx).await {
        Ok(records) => Ok(Mx {
            has_mx_record: true,
            records,
        }),
        Err(MxError::NoMailExchanger { .. }) => Ok(Mx::default()),
        Err(err) => Err(err),
    }
}

pub(crate) fn normalize_domain(domain: &str) -> Result<String, MxError> {
    let trimmed = domain.trim().trim_end_matches('.');
    if trimmed.is_empty() {
        return Err(MxError::EmptyDomain);
    }
    idna::domain_to_ascii(trimmed).map_err(MxError::idna)
}

pub(crate) fn normalize_exchange(exchange: &str) -> String {
    let trimmed = exchange.trim_end_matches('.');
    trimmed.to_ascii_lowercase()
}

fn is_empty_answer(err: &ResolveError) -> bool {
    matches!(
        err.kind(),
        ResolveErrorKind::NoRecordsFound { response_code, .. } if *response_code != ResponseCode::NXDomain
    )
}
