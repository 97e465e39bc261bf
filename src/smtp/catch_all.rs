use tokio::io::{AsyncRead, AsyncWrite};

use crate::smtp::error::SmtpError;
use crate::smtp::session::SmtpSession;
use crate::smtp::types::CatchAllVerdict;
use crate::smtp::util::{SYNTHETIC_LOCAL_LEN, random_local_part};

/// Second `RCPT TO` on the session that just accepted the real recipient,
/// for a synthetic mailbox at the same domain. Acceptance means the host
/// takes any recipient.
///
/// Only cancellation or the shared deadline escape as errors; any other
/// failure reads as "selective".
pub(crate) async fn disambiguate<S>(
    session: &mut SmtpSession<S>,
    domain: &str,
) -> Result<CatchAllVerdict, SmtpError>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let probe = format!("{}@{domain}", random_local_part(SYNTHETIC_LOCAL_LEN));
    match session.send_command(&format!("RCPT TO:<{probe}>")).await {
        Ok(reply) => {
            let is_catch_all = reply.is_positive_completion();
            tracing::debug!(domain, code = reply.code, is_catch_all, "catch-all probe");
            Ok(CatchAllVerdict { is_catch_all })
        }
        Err(err) if err.is_abort() => Err(err),
        Err(err) => {
            tracing::debug!(domain, error = %err, "catch-all probe inconclusive");
            Ok(CatchAllVerdict::default())
        }
    }
}
