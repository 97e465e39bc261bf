use std::net::SocketAddr;
use std::time::Duration;

use tokio::net::TcpStream;
use tokio_socks::tcp::{Socks4Stream, Socks5Stream};

use crate::config::{ProxyConfig, ProxyKind};
use crate::context::CheckContext;
use crate::smtp::error::SmtpError;

/// Open a TCP connection to `host:port`, directly or through `proxy`,
/// within the connect timeout (or the proxy's own timeout when it sets one).
pub(crate) async fn connect(
    host: &str,
    port: u16,
    proxy: Option<&ProxyConfig>,
    connect_timeout: Duration,
    ctx: &CheckContext,
) -> Result<TcpStream, SmtpError> {
    match proxy {
        None => {
            let stream = ctx
                .run(Some(connect_timeout), TcpStream::connect((host, port)))
                .await?
                .map_err(|err| SmtpError::connect(host, err))?;
            tracing::debug!(host, port, "connected");
            Ok(stream)
        }
        Some(proxy) => {
            let limit = proxy.timeout.unwrap_or(connect_timeout);
            let stream = ctx.run(Some(limit), dial_proxy(proxy, host, port)).await??;
            tracing::debug!(host, port, proxy = %proxy.addr, kind = %proxy.kind, "connected through proxy");
            Ok(stream)
        }
    }
}

async fn dial_proxy(proxy: &ProxyConfig, host: &str, port: u16) -> Result<TcpStream, SmtpError> {
    let addr = proxy.addr.as_str();
    let credentials = proxy.credentials.as_ref();
    let dialed = match proxy.kind {
        ProxyKind::Socks5 => match credentials {
            Some(c) => {
                Socks5Stream::connect_with_password(addr, (host, port), &c.username, &c.password)
                    .await
            }
            None => Socks5Stream::connect(addr, (host, port)).await,
        }
        .map(Socks5Stream::into_inner),
        // hostname forwarded to the proxy for resolution
        ProxyKind::Socks4a => match credentials {
            Some(c) => Socks4Stream::connect_with_userid(addr, (host, port), &c.username).await,
            None => Socks4Stream::connect(addr, (host, port)).await,
        }
        .map(Socks4Stream::into_inner),
        // SOCKS4 only carries IPv4 addresses: resolve locally
        ProxyKind::Socks4 => {
            let target = resolve_ipv4(host, port).await?;
            match credentials {
                Some(c) => Socks4Stream::connect_with_userid(addr, target, &c.username).await,
                None => Socks4Stream::connect(addr, target).await,
            }
            .map(Socks4Stream::into_inner)
        }
    };
    dialed.map_err(|source| SmtpError::Proxy {
        proxy: proxy.addr.clone(),
        host: host.to_string(),
        source,
    })
}

async fn resolve_ipv4(host: &str, port: u16) -> Result<SocketAddr, SmtpError> {
    let mut addrs = tokio::net::lookup_host((host, port))
        .await
        .map_err(|err| SmtpError::connect(host, err))?;
    addrs.find(SocketAddr::is_ipv4).ok_or_else(|| {
        SmtpError::connect(
            host,
            std::io::Error::new(std::io::ErrorKind::NotFound, "no IPv4 address for SOCKS4"),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    #[tokio::test]
    async fn direct_connection_reaches_listener() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let accept = tokio::spawn(async move { listener.accept().await.map(|_| ()) });

        let ctx = CheckContext::new();
        connect("127.0.0.1", port, None, Duration::from_secs(2), &ctx)
            .await
            .expect("connects");
        accept.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn refused_connection_is_connect_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let ctx = CheckContext::new();
        let err = connect("127.0.0.1", port, None, Duration::from_secs(2), &ctx)
            .await
            .expect_err("nothing listens");
        assert!(matches!(err, SmtpError::Connect { .. }));
        assert!(!err.is_abort());
    }

    #[tokio::test]
    async fn cancelled_context_skips_dial() {
        let ctx = CheckContext::new();
        ctx.cancel();
        let err = connect("127.0.0.1", 9, None, Duration::from_secs(2), &ctx)
            .await
            .expect_err("cancelled");
        assert!(err.is_abort());
    }

    /// Minimal SOCKS5 server: no-auth method, CONNECT to a domain target,
    /// then echoes a greeting as if it were the remote host.
    #[tokio::test]
    async fn socks5_proxy_forwards_domain_target() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let proxy_addr = listener.local_addr().unwrap();
        let server = tokio::spawn(async move {
            let (mut sock, _) = listener.accept().await.unwrap();
            let mut greeting = [0u8; 3];
            sock.read_exact(&mut greeting).await.unwrap();
            assert_eq!(greeting, [0x05, 0x01, 0x00]);
            sock.write_all(&[0x05, 0x00]).await.unwrap();

            let mut head = [0u8; 5];
            sock.read_exact(&mut head).await.unwrap();
            assert_eq!(&head[..4], &[0x05, 0x01, 0x00, 0x03]);
            let mut name = vec![0u8; head[4] as usize];
            sock.read_exact(&mut name).await.unwrap();
            let mut port = [0u8; 2];
            sock.read_exact(&mut port).await.unwrap();
            assert_eq!(name, b"mx.example.com");
            assert_eq!(u16::from_be_bytes(port), 25);

            sock.write_all(&[0x05, 0x00, 0x00, 0x01, 127, 0, 0, 1, 0, 25])
                .await
                .unwrap();
            sock.write_all(b"220 via proxy\r\n").await.unwrap();
        });

        let proxy = ProxyConfig::parse(&format!("socks5://{proxy_addr}")).unwrap();
        let ctx = CheckContext::new();
        let mut stream = connect("mx.example.com", 25, Some(&proxy), Duration::from_secs(2), &ctx)
            .await
            .expect("proxied connection");
        let mut buf = [0u8; 15];
        stream.read_exact(&mut buf).await.unwrap();
        assert_eq!(&buf, b"220 via proxy\r\n");
        server.await.unwrap();
    }
}
