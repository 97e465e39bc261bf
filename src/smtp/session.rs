use std::time::Duration;

use tokio::io::{
    AsyncBufRead, AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader,
};

use crate::context::CheckContext;
use crate::smtp::error::SmtpError;

/// Longest line accepted from a server before the reply is declared malformed.
const MAX_LINE_LEN: usize = 4096;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmtpReply {
    pub code: u16,
    pub lines: Vec<String>,
}

impl SmtpReply {
    pub fn is_positive_completion(&self) -> bool {
        (200..300).contains(&self.code)
    }

    pub fn is_transient_failure(&self) -> bool {
        (400..500).contains(&self.code)
    }

    pub fn is_permanent_failure(&self) -> bool {
        (500..600).contains(&self.code)
    }

    /// All reply lines joined and lower-cased, for phrase matching.
    pub fn message(&self) -> String {
        self.lines.join(" ").to_ascii_lowercase()
    }
}

/// One SMTP conversation with one host. Every exchange is bounded by the
/// operation timeout and observes the check context; dropping the session
/// closes the connection.
pub(crate) struct SmtpSession<S> {
    host: String,
    stream: BufReader<S>,
    transcript: Vec<String>,
    ctx: CheckContext,
    operation_timeout: Duration,
}

impl<S> SmtpSession<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub(crate) fn new(host: &str, stream: S, ctx: &CheckContext, operation_timeout: Duration) -> Self {
        Self {
            host: host.to_string(),
            stream: BufReader::new(stream),
            transcript: Vec::new(),
            ctx: ctx.clone(),
            operation_timeout,
        }
    }

    pub(crate) fn transcript(&self) -> &[String] {
        &self.transcript
    }

    pub(crate) async fn read_banner(&mut self) -> Result<SmtpReply, SmtpError> {
        let reply = self
            .ctx
            .run(Some(self.operation_timeout), read_reply(&mut self.stream))
            .await??;
        self.record_reply(&reply);
        Ok(reply)
    }

    pub(crate) async fn send_command(&mut self, command: &str) -> Result<SmtpReply, SmtpError> {
        self.record("C", command);
        let stream = &mut self.stream;
        let exchange = async move {
            write_line(stream.get_mut(), command).await?;
            read_reply(stream).await
        };
        let reply = self.ctx.run(Some(self.operation_timeout), exchange).await??;
        self.record_reply(&reply);
        Ok(reply)
    }

    /// Best-effort `QUIT`; failures only matter for the transcript.
    pub(crate) async fn quit(&mut self) {
        if self.ctx.interrupted().is_some() {
            return;
        }
        match self.send_command("QUIT").await {
            Ok(_) => {}
            Err(err) => self.record("!", &format!("QUIT failed: {err}")),
        }
        let _ = self.stream.get_mut().shutdown().await;
    }

    fn record(&mut self, direction: &str, message: &str) {
        tracing::trace!(host = %self.host, "{direction}: {message}");
        self.transcript
            .push(format!("[{}] {direction}: {message}", self.host));
    }

    fn record_reply(&mut self, reply: &SmtpReply) {
        if reply.lines.is_empty() {
            self.record("S", &reply.code.to_string());
        } else {
            for line in &reply.lines {
                self.record("S", &format!("{} {}", reply.code, line));
            }
        }
    }
}

async fn write_line<W>(writer: &mut W, command: &str) -> Result<(), SmtpError>
where
    W: AsyncWrite + Unpin,
{
    let mut data = Vec::with_capacity(command.len() + 2);
    data.extend_from_slice(command.as_bytes());
    data.extend_from_slice(b"\r\n");
    writer.write_all(&data).await.map_err(SmtpError::io)?;
    writer.flush().await.map_err(SmtpError::io)
}

pub(crate) async fn read_reply<R>(reader: &mut R) -> Result<SmtpReply, SmtpError>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = Vec::new();
    let mut code: Option<u16> = None;
    loop {
        let line = read_line(reader).await?;
        if line.len() < 3 {
            return Err(SmtpError::Protocol(format!("invalid reply: {line}")));
        }
        let parsed_code = line
            .get(..3)
            .and_then(|digits| digits.parse::<u16>().ok())
            .ok_or_else(|| SmtpError::Protocol(format!("invalid code in line: {line}")))?;
        match code {
            Some(existing) if existing != parsed_code => {
                return Err(SmtpError::Protocol(format!(
                    "inconsistent reply codes: {existing} vs {parsed_code}"
                )));
            }
            Some(_) => {}
            None => code = Some(parsed_code),
        }
        let is_last = line.as_bytes().get(3) != Some(&b'-');
        let text = line.get(4..).unwrap_or_default().to_string();
        lines.push(text);
        if is_last {
            break;
        }
    }
    Ok(SmtpReply {
        code: code.unwrap_or_default(),
        lines,
    })
}

async fn read_line<R>(reader: &mut R) -> Result<String, SmtpError>
where
    R: AsyncBufRead + Unpin,
{
    let mut buf = Vec::new();
    let read = (&mut *reader)
        .take(MAX_LINE_LEN as u64)
        .read_until(b'\n', &mut buf)
        .await
        .map_err(SmtpError::io)?;
    if read == 0 {
        return Err(SmtpError::io(std::io::Error::new(
            std::io::ErrorKind::UnexpectedEof,
            "connection closed",
        )));
    }
    if !buf.ends_with(b"\n") {
        return Err(SmtpError::Protocol(format!(
            "reply line longer than {MAX_LINE_LEN} bytes or truncated"
        )));
    }
    while buf.last().is_some_and(|b| *b == b'\n' || *b == b'\r') {
        buf.pop();
    }
    String::from_utf8(buf).map_err(|err| SmtpError::Protocol(format!("utf8 error: {err}")))
}
