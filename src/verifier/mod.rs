//! Check orchestration.
//!
//! A [`Verifier`] parses the address, applies the cheap static checks, then
//! runs the enabled network checks (MX, SMTP, avatar, suggestion) under one
//! cancellable context and merges their outcomes into a
//! [`VerificationResult`].

mod error;
mod result;
mod runner;

pub use error::{CheckCause, CheckError, CheckErrors, CheckName, VerifyError};
pub use result::VerificationResult;

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::avatar::{self, Avatar, AvatarError};
use crate::classify;
use crate::config::{VerifierBuilder, VerifierConfig};
use crate::context::CheckContext;
use crate::disposable::{DEFAULT_SOURCE_URL, DisposableDomains, DisposableRefresher};
use crate::mx::{self, LookupMx, Mx, MxError};
use crate::reachability;
use crate::smtp::{self, SmtpCheckResult, SmtpError};
use crate::validator::{domain_to_ascii, parse_address};
use runner::{CheckReport, CheckTask, runner_for};

/// Long-lived, cheaply cloneable verifier. Configuration is frozen at build
/// time; each call keeps its intermediate state private.
#[derive(Clone)]
pub struct Verifier {
    config: Arc<VerifierConfig>,
    resolver: Arc<dyn LookupMx>,
    disposable: DisposableDomains,
    http: reqwest::Client,
}

impl fmt::Debug for Verifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Verifier")
            .field("config", &self.config)
            .field("disposable_domains", &self.disposable.len())
            .finish_non_exhaustive()
    }
}

impl Verifier {
    pub fn builder() -> VerifierBuilder {
        VerifierBuilder::new()
    }

    pub(crate) fn from_parts(
        config: Arc<VerifierConfig>,
        resolver: Arc<dyn LookupMx>,
        disposable: DisposableDomains,
        http: reqwest::Client,
    ) -> Self {
        Self {
            config,
            resolver,
            disposable,
            http,
        }
    }

    pub fn config(&self) -> &VerifierConfig {
        &self.config
    }

    pub fn disposable_domains(&self) -> &DisposableDomains {
        &self.disposable
    }

    pub fn is_disposable(&self, domain: &str) -> bool {
        self.disposable.contains(domain)
    }

    pub fn add_disposable_domains<I, S>(&self, domains: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.disposable.add(domains);
    }

    /// Keep the disposable-domain store fresh from the public list. The
    /// returned handle must be [`stop`](DisposableRefresher::stop)ped.
    pub fn start_disposable_refresher(&self, interval: Duration) -> DisposableRefresher {
        DisposableRefresher::start(
            self.disposable.clone(),
            self.http.clone(),
            DEFAULT_SOURCE_URL,
            interval,
        )
    }

    pub async fn check_mx(&self, domain: &str) -> Result<Mx, MxError> {
        mx::check_mx(self.resolver.as_ref(), domain, &CheckContext::new()).await
    }

    pub async fn check_smtp(&self, domain: &str, username: &str) -> Result<SmtpCheckResult, SmtpError> {
        smtp::check_smtp(
            self.resolver.as_ref(),
            &self.config,
            domain,
            username,
            &CheckContext::new(),
        )
        .await
    }

    pub async fn check_avatar(&self, email: &str) -> Result<Avatar, AvatarError> {
        avatar::check_avatar(&self.http, email, &self.config.avatar_base_url).await
    }

    pub async fn verify(&self, email: &str) -> Result<VerificationResult, VerifyError> {
        self.verify_with(email, &CheckContext::new()).await
    }

    /// Verify `email` under the caller's cancellation token and deadline.
    ///
    /// * invalid syntax: `Ok` with only `syntax` filled in;
    /// * unknown top-level domain (when checked): [`VerifyError::TopLevelDomainUnknown`];
    /// * disposable domain: `Ok` with the classification flags only;
    /// * failed checks: [`VerifyError::Checks`] carrying the partial result.
    pub async fn verify_with(
        &self,
        email: &str,
        ctx: &CheckContext,
    ) -> Result<VerificationResult, VerifyError> {
        let email = email.trim().to_lowercase();
        let mut result = VerificationResult {
            syntax: parse_address(&email),
            email,
            ..VerificationResult::default()
        };
        if !result.syntax.valid {
            tracing::debug!(email = %result.email, reasons = ?result.syntax.reasons, "invalid syntax");
            return Ok(result);
        }

        let domain = result.syntax.domain.clone();
        let username = result.syntax.username.clone();
        result.free = classify::is_free_provider(&domain);
        result.role_account = classify::is_role_account(&username);
        result.disposable = self.disposable.contains(&domain);

        let checks = self.config.checks;
        if checks.tld {
            let ascii = domain_to_ascii(&domain);
            if !classify::top_level_domain_exists(&ascii) {
                return Err(VerifyError::TopLevelDomainUnknown { domain: ascii });
            }
            result.tld_exists = true;
        }

        if result.disposable {
            tracing::debug!(%domain, "disposable domain, network checks skipped");
            return Ok(result);
        }

        let run_ctx = ctx.child();
        let email = result.email.as_str();
        let mut tasks: Vec<CheckTask<'_>> = Vec::with_capacity(checks.task_count());
        if checks.mx {
            tasks.push(Box::pin(async {
                CheckReport::Mx(mx::check_mx(self.resolver.as_ref(), &domain, &run_ctx).await)
            }));
        }
        if checks.smtp {
            tasks.push(Box::pin(async {
                CheckReport::Smtp(
                    smtp::check_smtp(
                        self.resolver.as_ref(),
                        &self.config,
                        &domain,
                        &username,
                        &run_ctx,
                    )
                    .await,
                )
            }));
        }
        if checks.avatar {
            tasks.push(Box::pin(async {
                CheckReport::Avatar(
                    avatar::check_avatar_with(
                        &self.http,
                        email,
                        &self.config.avatar_base_url,
                        &run_ctx,
                    )
                    .await,
                )
            }));
        }
        if checks.suggest {
            tasks.push(Box::pin(async {
                CheckReport::Suggestion(classify::suggest(&domain))
            }));
        }

        let runner = runner_for(tasks.len());
        tracing::debug!(email, runner = runner.name(), checks = tasks.len(), "running checks");
        let reports = runner.run(&run_ctx, tasks).await;
        let errors = merge(&mut result, reports).without_sibling_cancellations();

        if errors.is_empty() {
            Ok(result)
        } else {
            tracing::debug!(email = %result.email, %errors, "verification incomplete");
            Err(VerifyError::Checks {
                partial: Box::new(result),
                errors,
            })
        }
    }
}

fn merge(result: &mut VerificationResult, reports: Vec<CheckReport>) -> CheckErrors {
    let mx_lookup_failed = reports
        .iter()
        .any(|r| matches!(r, CheckReport::Mx(Err(e)) if e.is_host_lookup_failure()));
    let mut errors = CheckErrors::new();
    for report in reports {
        match report {
            CheckReport::Mx(Ok(mx)) => result.has_mx_records = mx.has_mx_record,
            CheckReport::Mx(Err(err)) => errors.push(CheckError::new(CheckName::Mx, err)),
            CheckReport::Smtp(Ok(smtp)) => {
                result.reachable = reachability::classify(true, &smtp);
                result.smtp = Some(smtp);
            }
            CheckReport::Smtp(Err(err)) => {
                // nowhere to deliver: the host verdict is known even though
                // the check failed, whether SMTP saw the lookup fail itself or
                // was cancelled after the MX check saw it first
                let no_host = match &err {
                    SmtpError::Mx(e) if e.is_host_lookup_failure() => true,
                    other => other.is_cancellation() && mx_lookup_failed,
                };
                if no_host {
                    let smtp = SmtpCheckResult::default();
                    result.reachable = reachability::classify(true, &smtp);
                    result.smtp = Some(smtp);
                }
                errors.push(CheckError::new(CheckName::Smtp, err));
            }
            CheckReport::Avatar(Ok(avatar)) => result.avatar = Some(avatar),
            CheckReport::Avatar(Err(err)) => {
                errors.push(CheckError::new(CheckName::Avatar, err))
            }
            CheckReport::Suggestion(suggestion) => result.suggestion = suggestion,
        }
    }
    errors
}
