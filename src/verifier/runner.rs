use futures::future::BoxFuture;
use futures::stream::{FuturesUnordered, StreamExt};

use crate::avatar::{Avatar, AvatarError};
use crate::context::CheckContext;
use crate::mx::{Mx, MxError};
use crate::smtp::{SmtpCheckResult, SmtpError};

/// What one check produced.
#[derive(Debug)]
pub(crate) enum CheckReport {
    Mx(Result<Mx, MxError>),
    Smtp(Result<SmtpCheckResult, SmtpError>),
    Avatar(Result<Avatar, AvatarError>),
    Suggestion(String),
}

impl CheckReport {
    fn failed(&self) -> bool {
        match self {
            Self::Mx(r) => r.is_err(),
            Self::Smtp(r) => r.is_err(),
            Self::Avatar(r) => r.is_err(),
            Self::Suggestion(_) => false,
        }
    }
}

pub(crate) type CheckTask<'a> = BoxFuture<'a, CheckReport>;

/// Drives the checks of one run. The first failing check cancels `ctx`;
/// every report, including those of cancelled siblings, is returned.
pub(crate) trait TaskRunner: Send + Sync {
    fn name(&self) -> &'static str;

    fn run<'a>(&'a self, ctx: &'a CheckContext, tasks: Vec<CheckTask<'a>>) -> BoxFuture<'a, Vec<CheckReport>>;
}

/// Runs checks one after another on the caller's task.
pub(crate) struct InlineRunner;

impl TaskRunner for InlineRunner {
    fn name(&self) -> &'static str {
        "inline"
    }

    fn run<'a>(&'a self, ctx: &'a CheckContext, tasks: Vec<CheckTask<'a>>) -> BoxFuture<'a, Vec<CheckReport>> {
        Box::pin(async move {
            let mut reports = Vec::with_capacity(tasks.len());
            for task in tasks {
                let report = task.await;
                if report.failed() {
                    ctx.cancel();
                }
                reports.push(report);
            }
            reports
        })
    }
}

/// Polls every check concurrently on the caller's task.
pub(crate) struct ConcurrentRunner;

impl TaskRunner for ConcurrentRunner {
    fn name(&self) -> &'static str {
        "concurrent"
    }

    fn run<'a>(&'a self, ctx: &'a CheckContext, tasks: Vec<CheckTask<'a>>) -> BoxFuture<'a, Vec<CheckReport>> {
        Box::pin(async move {
            let mut pending: FuturesUnordered<_> = tasks.into_iter().collect();
            let mut reports = Vec::with_capacity(pending.len());
            while let Some(report) = pending.next().await {
                if report.failed() && !ctx.is_cancelled() {
                    tracing::debug!(?report, "check failed, cancelling siblings");
                    ctx.cancel();
                }
                reports.push(report);
            }
            reports
        })
    }
}

/// Concurrency only pays off with at least two checks.
pub(crate) fn runner_for(task_count: usize) -> &'static dyn TaskRunner {
    if task_count >= 2 {
        &ConcurrentRunner
    } else {
        &InlineRunner
    }
}
