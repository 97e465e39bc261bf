//! Gravatar presence lookup.

use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::context::{CheckContext, Interrupted};

#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Avatar {
    pub has_avatar: bool,
    #[cfg_attr(feature = "with-serde", serde(default, skip_serializing_if = "String::is_empty"))]
    pub avatar_url: String,
}

#[derive(Debug, Error)]
pub enum AvatarError {
    #[error("avatar request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("avatar service answered {status} for {url}")]
    Status { url: String, status: u16 },
    #[error("avatar lookup abandoned: {0}")]
    Interrupted(#[from] Interrupted),
}

/// Hex SHA-256 of the trimmed, lower-cased address.
pub fn email_hash(email: &str) -> String {
    let normalized = email.trim().to_lowercase();
    hex::encode(Sha256::digest(normalized.as_bytes()))
}

/// `<base_url><hash>?d=404`: the service answers 404 instead of serving a
/// placeholder image when no avatar exists.
pub fn avatar_url(base_url: &str, email: &str) -> String {
    let base = base_url.trim_end_matches('/');
    format!("{base}/{}?d=404", email_hash(email))
}

pub async fn check_avatar(
    client: &reqwest::Client,
    email: &str,
    base_url: &str,
) -> Result<Avatar, AvatarError> {
    check_avatar_with(client, email, base_url, &CheckContext::new()).await
}

pub(crate) async fn check_avatar_with(
    client: &reqwest::Client,
    email: &str,
    base_url: &str,
    ctx: &CheckContext,
) -> Result<Avatar, AvatarError> {
    let url = avatar_url(base_url, email);
    let response = ctx
        .run(None, client.get(&url).send())
        .await?
        .map_err(|source| AvatarError::Request {
            url: url.clone(),
            source,
        })?;

    let status = response.status();
    tracing::debug!(%url, status = status.as_u16(), "avatar lookup");
    match status {
        reqwest::StatusCode::OK => Ok(Avatar {
            has_avatar: true,
            avatar_url: url,
        }),
        reqwest::StatusCode::NOT_FOUND => Ok(Avatar::default()),
        reqwest::StatusCode::TOO_MANY_REQUESTS => {
            tracing::warn!(%url, "avatar service rate limited, treating as no avatar");
            Ok(Avatar::default())
        }
        other => Err(AvatarError::Status {
            url,
            status: other.as_u16(),
        }),
    }
}
