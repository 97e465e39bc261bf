use std::io;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

use super::{SmtpCheckResult, SmtpError, check_smtp};
use crate::config::VerifierConfig;
use crate::context::{CheckContext, Interrupted};
use crate::mx::tests::StubResolver;
use crate::mx::{MailExchanger, MxError};

/// `(expected command prefix, response)`; an empty prefix writes the response
/// without reading first (greeting banner).
pub(crate) type Script = Vec<(&'static str, &'static str)>;

/// Loopback SMTP server that plays one script per accepted connection.
pub(crate) async fn spawn_mock_server(sessions: Vec<Script>) -> (u16, JoinHandle<()>) {
    spawn_mock_server_on("127.0.0.1:0", sessions).await
}

async fn spawn_mock_server_on(addr: &str, sessions: Vec<Script>) -> (u16, JoinHandle<()>) {
    let listener = TcpListener::bind(addr)
        .await
        .expect("bind mock server");
    let port = listener.local_addr().expect("addr").port();
    let handle = tokio::spawn(async move {
        for script in sessions {
            let (stream, _) = listener.accept().await.expect("accept");
            handle_session(stream, script).await.expect("mock session I/O");
        }
    });
    (port, handle)
}

async fn handle_session(stream: TcpStream, script: Script) -> io::Result<()> {
    let (read, mut write) = stream.into_split();
    let mut reader = BufReader::new(read);
    for (expected, response) in script {
        if !expected.is_empty() {
            let mut line = String::new();
            reader.read_line(&mut line).await?;
            assert!(
                line.starts_with(expected),
                "expected command starting with '{expected}', got '{line}'"
            );
        }
        write.write_all(response.as_bytes()).await?;
        write.flush().await?;
    }
    Ok(())
}

pub(crate) fn banner() -> (&'static str, &'static str) {
    ("", "220 mock.smtp.test ESMTP\r\n")
}

/// Greeting through `MAIL FROM`, all accepted.
pub(crate) fn handshake() -> Script {
    vec![
        banner(),
        ("EHLO localhost", "250-mock.smtp.test\r\n250 PIPELINING\r\n"),
        ("MAIL FROM:<user@example.org>", "250 2.1.0 Ok\r\n"),
    ]
}

pub(crate) fn script(tail: &[(&'static str, &'static str)]) -> Script {
    let mut script = handshake();
    script.extend_from_slice(tail);
    script
}

pub(crate) fn test_config(port: u16) -> VerifierConfig {
    let mut config = VerifierConfig {
        smtp_port: port,
        connect_timeout: Duration::from_secs(2),
        operation_timeout: Duration::from_secs(2),
        ..VerifierConfig::default()
    };
    config.checks.smtp = true;
    config
}

fn hosts(names: &'static [&'static str]) -> StubResolver {
    StubResolver::new(move |domain| {
        assert_eq!(domain, "example.com");
        Ok(names
            .iter()
            .enumerate()
            .map(|(i, host)| MailExchanger::new(10 * (i as u16 + 1), *host))
            .collect())
    })
}

async fn probe(resolver: &StubResolver, config: &VerifierConfig) -> Result<SmtpCheckResult, SmtpError> {
    check_smtp(resolver, config, "example.com", "alice", &CheckContext::new()).await
}

#[tokio::test]
async fn accepted_and_selective_is_deliverable() {
    let (port, server) = spawn_mock_server(vec![script(&[
        ("RCPT TO:<alice@example.com>", "250 2.1.5 Ok\r\n"),
        ("RCPT TO:<", "550 5.1.1 No such user\r\n"),
        ("QUIT", "221 2.0.0 Bye\r\n"),
    ])])
    .await;

    let result = probe(&StubResolver::loopback(), &test_config(port))
        .await
        .expect("probe");
    server.await.expect("mock server");
    assert_eq!(
        result,
        SmtpCheckResult {
            host_exists: true,
            deliverable: true,
            ..SmtpCheckResult::default()
        }
    );
}

#[tokio::test]
async fn catch_all_host_is_not_deliverable() {
    let (port, server) = spawn_mock_server(vec![script(&[
        ("RCPT TO:<alice@example.com>", "250 2.1.5 Ok\r\n"),
        ("RCPT TO:<", "250 2.1.5 Ok\r\n"),
        ("QUIT", "221 2.0.0 Bye\r\n"),
    ])])
    .await;

    let result = probe(&StubResolver::loopback(), &test_config(port))
        .await
        .expect("probe");
    server.await.expect("mock server");
    assert!(result.host_exists && result.catch_all);
    assert!(!result.deliverable);
}

#[tokio::test]
async fn no_such_user_stops_without_catch_all_probe() {
    // both loopback addresses reach the same listener; the second session
    // would make the address deliverable if it were ever played
    let (port, server) = spawn_mock_server_on("0.0.0.0:0", vec![
        script(&[
            ("RCPT TO:<alice@example.com>", "550 5.1.1 User unknown\r\n"),
            ("QUIT", "221 2.0.0 Bye\r\n"),
        ]),
        script(&[
            ("RCPT TO:<alice@example.com>", "250 2.1.5 Ok\r\n"),
            ("RCPT TO:<", "550 5.1.1 No such user\r\n"),
            ("QUIT", "221 2.0.0 Bye\r\n"),
        ]),
    ])
    .await;

    let resolver = hosts(&["127.0.0.1", "127.0.0.2"]);
    let result = probe(&resolver, &test_config(port)).await.expect("probe");
    assert!(!server.is_finished(), "second host was contacted");
    server.abort();
    assert_eq!(
        result,
        SmtpCheckResult {
            host_exists: true,
            ..SmtpCheckResult::default()
        }
    );
}

#[tokio::test]
async fn disabled_catch_all_check_sends_single_rcpt() {
    let (port, server) = spawn_mock_server(vec![script(&[
        ("RCPT TO:<alice@example.com>", "250 2.1.5 Ok\r\n"),
        ("QUIT", "221 2.0.0 Bye\r\n"),
    ])])
    .await;

    let mut config = test_config(port);
    config.checks.catch_all = false;
    let result = probe(&StubResolver::loopback(), &config)
        .await
        .expect("probe");
    server.await.expect("mock server");
    assert!(result.deliverable && !result.catch_all);
}

#[tokio::test]
async fn full_inbox_is_reported() {
    let (port, server) = spawn_mock_server(vec![script(&[
        ("RCPT TO:<alice@example.com>", "452 4.2.2 Mailbox full\r\n"),
        ("QUIT", "221 2.0.0 Bye\r\n"),
    ])])
    .await;

    let result = probe(&StubResolver::loopback(), &test_config(port))
        .await
        .expect("probe");
    server.await.expect("mock server");
    assert!(result.host_exists && result.full_inbox);
    assert!(!result.deliverable && !result.catch_all);
}

#[tokio::test]
async fn ehlo_refusal_falls_back_to_helo() {
    let (port, server) = spawn_mock_server(vec![vec![
        banner(),
        ("EHLO localhost", "502 5.5.1 Command not implemented\r\n"),
        ("HELO localhost", "250 mock.smtp.test\r\n"),
        ("MAIL FROM:<user@example.org>", "250 Ok\r\n"),
        ("RCPT TO:<alice@example.com>", "250 Ok\r\n"),
        ("RCPT TO:<", "550 no such user\r\n"),
        ("QUIT", "221 Bye\r\n"),
    ]])
    .await;

    let result = probe(&StubResolver::loopback(), &test_config(port))
        .await
        .expect("probe");
    server.await.expect("mock server");
    assert!(result.deliverable);
}

#[tokio::test]
async fn unreachable_first_host_falls_through_to_next() {
    let (port, server) = spawn_mock_server(vec![script(&[
        ("RCPT TO:<alice@example.com>", "550 5.1.1 User unknown\r\n"),
        ("QUIT", "221 Bye\r\n"),
    ])])
    .await;

    // nothing listens on 127.0.0.2 at this port
    let resolver = hosts(&["127.0.0.2", "127.0.0.1"]);
    let result = probe(&resolver, &test_config(port)).await.expect("probe");
    server.await.expect("mock server");
    assert!(result.host_exists);
    assert!(!result.deliverable);
}

#[tokio::test]
async fn transient_reply_moves_to_next_host() {
    // both loopback addresses reach the same listener
    let (port, server) = spawn_mock_server_on("0.0.0.0:0", vec![
        script(&[
            ("RCPT TO:<alice@example.com>", "451 4.7.1 Greylisted\r\n"),
            ("QUIT", "221 Bye\r\n"),
        ]),
        script(&[
            ("RCPT TO:<alice@example.com>", "250 Ok\r\n"),
            ("RCPT TO:<", "550 5.1.1 No such user\r\n"),
            ("QUIT", "221 Bye\r\n"),
        ]),
    ])
    .await;

    let resolver = hosts(&["127.0.0.1", "127.0.0.2"]);
    let result = probe(&resolver, &test_config(port)).await.expect("probe");
    server.await.expect("mock server");
    assert!(result.deliverable);
}

#[tokio::test]
async fn inconclusive_everywhere_keeps_host_exists() {
    let (port, server) = spawn_mock_server(vec![script(&[
        ("RCPT TO:<alice@example.com>", "554 Transaction failed\r\n"),
        ("QUIT", "221 Bye\r\n"),
    ])])
    .await;

    let result = probe(&StubResolver::loopback(), &test_config(port))
        .await
        .expect("probe");
    server.await.expect("mock server");
    assert_eq!(result, SmtpCheckResult { host_exists: true, ..SmtpCheckResult::default() });
}

#[tokio::test]
async fn all_hosts_unreachable_is_not_an_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let port = listener.local_addr().expect("addr").port();
    drop(listener);

    let result = probe(&StubResolver::loopback(), &test_config(port))
        .await
        .expect("probe");
    assert_eq!(result, SmtpCheckResult::default());
}

#[tokio::test]
async fn silent_host_times_out_as_inconclusive() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let port = listener.local_addr().expect("addr").port();
    let server = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.expect("accept");
        tokio::time::sleep(Duration::from_millis(500)).await;
        drop(stream);
    });

    let mut config = test_config(port);
    config.operation_timeout = Duration::from_millis(50);
    let result = probe(&StubResolver::loopback(), &config)
        .await
        .expect("probe");
    assert_eq!(result, SmtpCheckResult { host_exists: true, ..SmtpCheckResult::default() });
    server.await.expect("mock server");
}

#[tokio::test]
async fn missing_mx_is_an_error() {
    let resolver = StubResolver::new(|_| Ok(Vec::new()));
    let err = probe(&resolver, &test_config(25)).await.expect_err("no MX");
    assert!(matches!(err, SmtpError::Mx(MxError::NoMailExchanger { .. })));
}

#[tokio::test]
async fn cancellation_aborts_probe() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let port = listener.local_addr().expect("addr").port();
    let _server = tokio::spawn(async move {
        let _conn = listener.accept().await;
        futures::future::pending::<()>().await;
    });

    let ctx = CheckContext::new();
    let canceller = ctx.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        canceller.cancel();
    });

    let resolver = Arc::new(StubResolver::loopback());
    let err = check_smtp(resolver.as_ref(), &test_config(port), "example.com", "alice", &ctx)
        .await
        .expect_err("cancelled");
    assert!(matches!(err, SmtpError::Interrupted(Interrupted::Cancelled)));
    assert!(err.is_cancellation());
}
