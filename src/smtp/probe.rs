use tokio::io::{AsyncRead, AsyncWrite};

use crate::config::VerifierConfig;
use crate::context::CheckContext;
use crate::mx::{LookupMx, resolve_mail_exchangers};
use crate::smtp::catch_all;
use crate::smtp::error::SmtpError;
use crate::smtp::session::{SmtpReply, SmtpSession};
use crate::smtp::transport;
use crate::smtp::types::{CatchAllVerdict, MailboxState, ProbeOutcome, SmtpCheckResult};
use crate::validator::domain_to_ascii;

const FULL_INBOX_PHRASES: &[&str] = &[
    "4.2.2",
    "5.2.2",
    "mailbox full",
    "mailbox is full",
    "full mailbox",
    "over quota",
    "quota exceeded",
    "exceeded storage",
    "insufficient system storage",
    "out of storage",
];

const DISABLED_PHRASES: &[&str] = &[
    "5.2.1",
    "disabled",
    "deactivated",
    "suspended",
    "discontinued",
    "inactive",
    "no longer active",
    "account blocked",
    "account is blocked",
    "account has been blocked",
];

const POLICY_PHRASES: &[&str] = &[
    "blacklist",
    "blocklist",
    "spamhaus",
    "abusix",
    "spam",
    "blocked",
    "banned",
    "access denied",
    "relay not permitted",
    "relay access denied",
    "relaying denied",
    "host rejected",
    "connection rejected",
    "not yet authorized",
    "reverse hostname",
];

const NO_SUCH_USER_PHRASES: &[&str] = &[
    "5.1.1",
    "no such user",
    "no such mailbox",
    "no such address",
    "user unknown",
    "unknown user",
    "unknown recipient",
    "does not exist",
    "doesn't exist",
    "mailbox not found",
    "mailbox unavailable",
    "recipient not found",
    "invalid recipient",
    "recipient address rejected",
    "not a valid mailbox",
];

/// Interpretation of the reply to the primary `RCPT TO`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RcptVerdict {
    Accepted,
    NoSuchMailbox,
    FullInbox,
    Disabled,
    Inconclusive(&'static str),
}

fn classify_rcpt(reply: &SmtpReply) -> RcptVerdict {
    if reply.is_positive_completion() {
        return RcptVerdict::Accepted;
    }
    let message = reply.message();
    let says = |phrases: &[&str]| phrases.iter().any(|p| message.contains(p));

    if (reply.is_transient_failure() || reply.is_permanent_failure()) && says(FULL_INBOX_PHRASES)
    {
        return RcptVerdict::FullInbox;
    }
    if !reply.is_permanent_failure() {
        return RcptVerdict::Inconclusive(if reply.is_transient_failure() {
            "transient failure"
        } else {
            "unexpected reply"
        });
    }
    if says(DISABLED_PHRASES) {
        return RcptVerdict::Disabled;
    }
    // 550 is also used for policy rejections: rule those out first
    if says(POLICY_PHRASES) {
        return RcptVerdict::Inconclusive("policy rejection");
    }
    if matches!(reply.code, 550 | 551 | 553) || says(NO_SUCH_USER_PHRASES) {
        return RcptVerdict::NoSuchMailbox;
    }
    RcptVerdict::Inconclusive("unrecognized permanent failure")
}

enum HostReport {
    /// No transport connection could be established.
    Unreachable,
    /// Connected, but the host gave no usable answer.
    Inconclusive,
    Conclusive(SmtpCheckResult),
}

/// Probe `username@domain` against the domain's mail exchangers in
/// preference order, stopping at the first conclusive answer.
///
/// Resolution failures (including a domain without MX records) are errors.
/// Hosts that cannot be reached or answer inconclusively are skipped; if none
/// was reachable the result has `host_exists == false`.
pub async fn check_smtp<R>(
    resolver: &R,
    config: &VerifierConfig,
    domain: &str,
    username: &str,
    ctx: &CheckContext,
) -> Result<SmtpCheckResult, SmtpError>
where
    R: LookupMx + ?Sized,
{
    let ascii = domain_to_ascii(domain);
    let hosts = resolve_mail_exchangers(resolver, &ascii, ctx).await?;
    let recipient = format!("{username}@{ascii}");

    let mut connected = false;
    for mx in &hosts {
        if let Some(reason) = ctx.interrupted() {
            return Err(reason.into());
        }
        match probe_host(&mx.host, &recipient, &ascii, config, ctx).await? {
            HostReport::Unreachable => {}
            HostReport::Inconclusive => connected = true,
            HostReport::Conclusive(result) => {
                tracing::debug!(host = %mx.host, ?result, "conclusive SMTP answer");
                return Ok(result);
            }
        }
    }

    tracing::debug!(domain = %ascii, connected, tried = hosts.len(), "no conclusive SMTP answer");
    Ok(if connected {
        SmtpCheckResult::host_only()
    } else {
        SmtpCheckResult::default()
    })
}

async fn probe_host(
    host: &str,
    recipient: &str,
    domain: &str,
    config: &VerifierConfig,
    ctx: &CheckContext,
) -> Result<HostReport, SmtpError> {
    let stream = match transport::connect(
        host,
        config.smtp_port,
        config.proxy.as_ref(),
        config.connect_timeout,
        ctx,
    )
    .await
    {
        Ok(stream) => stream,
        Err(err) if err.is_abort() => return Err(err),
        Err(err) => {
            tracing::debug!(host, error = %err, "host unreachable");
            return Ok(HostReport::Unreachable);
        }
    };

    let mut session = SmtpSession::new(host, stream, ctx, config.operation_timeout);
    let report = converse(&mut session, recipient, domain, config).await;
    session.quit().await;

    match report {
        Ok(HostReport::Inconclusive) => {
            tracing::debug!(host, transcript = ?session.transcript(), "host inconclusive");
            Ok(HostReport::Inconclusive)
        }
        Ok(report) => Ok(report),
        Err(err) if err.is_abort() => Err(err),
        Err(err) => {
            tracing::debug!(host, error = %err, transcript = ?session.transcript(), "host inconclusive");
            Ok(HostReport::Inconclusive)
        }
    }
}

async fn converse<S>(
    session: &mut SmtpSession<S>,
    recipient: &str,
    domain: &str,
    config: &VerifierConfig,
) -> Result<HostReport, SmtpError>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let outcome = primary_probe(session, recipient, config).await?;
    if !outcome.is_conclusive() {
        return Ok(HostReport::Inconclusive);
    }
    let verdict = if config.checks.catch_all && outcome.wants_catch_all_probe() {
        catch_all::disambiguate(session, domain).await?
    } else {
        CatchAllVerdict::default()
    };
    Ok(HostReport::Conclusive(SmtpCheckResult::from_probe(
        &outcome, verdict,
    )))
}

async fn primary_probe<S>(
    session: &mut SmtpSession<S>,
    recipient: &str,
    config: &VerifierConfig,
) -> Result<ProbeOutcome, SmtpError>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let banner = session.read_banner().await?;
    if !banner.is_positive_completion() {
        tracing::debug!(code = banner.code, "greeting refused");
        return Ok(ProbeOutcome::connected());
    }

    let ehlo = session
        .send_command(&format!("EHLO {}", config.hello_name))
        .await?;
    if !ehlo.is_positive_completion() {
        let helo = session
            .send_command(&format!("HELO {}", config.hello_name))
            .await?;
        if !helo.is_positive_completion() {
            tracing::debug!(code = helo.code, "HELO refused");
            return Ok(ProbeOutcome::connected());
        }
    }

    let mail = session
        .send_command(&format!("MAIL FROM:<{}>", config.from_email))
        .await?;
    if !mail.is_positive_completion() {
        tracing::debug!(code = mail.code, "MAIL FROM refused");
        return Ok(ProbeOutcome::connected());
    }

    let rcpt = session
        .send_command(&format!("RCPT TO:<{recipient}>"))
        .await?;
    let outcome = match classify_rcpt(&rcpt) {
        RcptVerdict::Accepted => ProbeOutcome {
            mailbox: MailboxState::Accepted,
            ..ProbeOutcome::connected()
        },
        RcptVerdict::NoSuchMailbox => ProbeOutcome {
            mailbox: MailboxState::Rejected,
            ..ProbeOutcome::connected()
        },
        RcptVerdict::FullInbox => ProbeOutcome {
            full_inbox: true,
            ..ProbeOutcome::connected()
        },
        RcptVerdict::Disabled => ProbeOutcome {
            service_disabled: true,
            ..ProbeOutcome::connected()
        },
        RcptVerdict::Inconclusive(reason) => {
            tracing::debug!(code = rcpt.code, reason, "recipient reply inconclusive");
            ProbeOutcome::connected()
        }
    };
    Ok(outcome)
}
