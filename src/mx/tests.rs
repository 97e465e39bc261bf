use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use trust_dns_resolver::error::ResolveError;

use super::{LookupMx, MailExchanger, MxError, check_mx, resolve_mail_exchangers, resolver};
use crate::context::{CheckContext, Interrupted};

type LookupResult = Result<Vec<MailExchanger>, ResolveError>;
type LookupFn = dyn Fn(&str) -> LookupResult + Send + Sync;

pub(crate) struct StubResolver {
    pub on_lookup: Box<LookupFn>,
}

impl StubResolver {
    pub(crate) fn new<F>(f: F) -> Self
    where
        F: Fn(&str) -> LookupResult + Send + Sync + 'static,
    {
        Self {
            on_lookup: Box::new(f),
        }
    }

    /// Every lookup answers a single exchanger on the loopback address.
    pub(crate) fn loopback() -> Self {
        Self::new(|_| Ok(vec![MailExchanger::new(10, "127.0.0.1")]))
    }
}

#[async_trait]
impl LookupMx for StubResolver {
    async fn lookup_mx(&self, domain: &str) -> LookupResult {
        (self.on_lookup)(domain)
    }
}

struct HangingResolver;

#[async_trait]
impl LookupMx for HangingResolver {
    async fn lookup_mx(&self, _domain: &str) -> LookupResult {
        futures::future::pending().await
    }
}

#[test]
fn normalize_domain_rejects_empty() {
    let err = resolver::normalize_domain(" . ").expect_err("empty domain should fail");
    assert!(matches!(err, MxError::EmptyDomain));
}

#[test]
fn normalize_domain_applies_idna() {
    let ascii = resolver::normalize_domain("Exämple.COM.").expect("idna conversion");
    assert_eq!(ascii, "xn--exmple-cua.com");
}

#[test]
fn normalize_exchange_trims_dot_and_lowercases() {
    assert_eq!(resolver::normalize_exchange("Mail.EXAMPLE.com."), "mail.example.com");
    assert_eq!(resolver::normalize_exchange("."), "");
}

#[tokio::test]
async fn resolve_sorts_and_dedups_records() {
    let stub = StubResolver::new(|domain| {
        assert_eq!(domain, "example.com");
        Ok(vec![
            MailExchanger::new(20, "mx2.example.com"),
            MailExchanger::new(10, "mx1.example.com"),
            MailExchanger::new(10, "mx1.example.com"),
            MailExchanger::new(30, "mx3.example.com"),
        ])
    });

    let records = resolve_mail_exchangers(&stub, "example.com", &CheckContext::new())
        .await
        .expect("lookup succeeds");
    let hosts: Vec<&str> = records.iter().map(|r| r.host.as_str()).collect();
    assert_eq!(hosts, ["mx1.example.com", "mx2.example.com", "mx3.example.com"]);
    assert_eq!(records[0].preference, 10);
    assert_eq!(records[2].preference, 30);
}

#[tokio::test]
async fn resolve_without_records_is_no_mail_exchanger() {
    let stub = StubResolver::new(|_| Ok(Vec::new()));
    let err = resolve_mail_exchangers(&stub, "example.com", &CheckContext::new())
        .await
        .expect_err("no records");
    assert!(matches!(err, MxError::NoMailExchanger { ref domain } if domain == "example.com"));
    assert!(err.is_host_lookup_failure());
}

#[tokio::test]
async fn resolver_failure_is_host_lookup_failed() {
    let stub = StubResolver::new(|_| Err(ResolveError::from("SERVFAIL")));
    let err = resolve_mail_exchangers(&stub, "broken.example", &CheckContext::new())
        .await
        .expect_err("lookup fails");
    assert!(matches!(err, MxError::HostLookupFailed { ref domain, .. } if domain == "broken.example"));
}

#[tokio::test]
async fn check_mx_reports_absence_without_error() {
    let stub = StubResolver::new(|_| Ok(Vec::new()));
    let mx = check_mx(&stub, "example.com", &CheckContext::new())
        .await
        .expect("absence is not an error");
    assert!(!mx.has_mx_record);
    assert!(mx.records.is_empty());
}

#[tokio::test]
async fn check_mx_reports_records() {
    let calls = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&calls);
    let stub = StubResolver::new(move |_| {
        seen.fetch_add(1, Ordering::SeqCst);
        Ok(vec![MailExchanger::new(5, "mx.example.com")])
    });
    let mx = check_mx(&stub, "example.com", &CheckContext::new())
        .await
        .expect("lookup succeeds");
    assert!(mx.has_mx_record);
    assert_eq!(mx.records, vec![MailExchanger::new(5, "mx.example.com")]);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn cancelled_context_abandons_lookup() {
    let ctx = CheckContext::new();
    ctx.cancel();
    let err = check_mx(&HangingResolver, "example.com", &ctx)
        .await
        .expect_err("cancelled");
    assert!(matches!(err, MxError::Interrupted(Interrupted::Cancelled)));
    assert!(!err.is_host_lookup_failure());
}
