use anyhow::{anyhow, Context};
use serde_json::json;

use crate::ArticleId;

/// Failure reported by the data service for a request it could understand.
///
/// The `Display` form is the human-readable detail, it is what ends up in
/// front of the user.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    Unknown(String),

    #[error("Not a valid article link or id: {0:?}")]
    InvalidArticleId(String),

    #[error("Article {0} not found")]
    ArticleNotFound(ArticleId),

    #[error("{0}")]
    Upstream(String),
}

impl Error {
    pub fn status_code(&self) -> http::StatusCode {
        use http::StatusCode;
        match self {
            Error::Unknown(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::InvalidArticleId(_) => StatusCode::BAD_REQUEST,
            Error::ArticleNotFound(_) => StatusCode::NOT_FOUND,
            Error::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }

    pub fn detail(&self) -> String {
        self.to_string()
    }

    pub fn contents(&self) -> Vec<u8> {
        let detail = self.detail();
        serde_json::to_vec(&match self {
            Error::Unknown(_) => json!({
                "detail": detail,
                "type": "unknown",
            }),
            Error::InvalidArticleId(input) => json!({
                "detail": detail,
                "type": "invalid-article-id",
                "input": input,
            }),
            Error::ArticleNotFound(id) => json!({
                "detail": detail,
                "type": "article-not-found",
                "article_id": id,
            }),
            Error::Upstream(_) => json!({
                "detail": detail,
                "type": "upstream",
            }),
        })
        .expect("serializing error contents")
    }

    /// Parses an error body. Bodies carrying a `detail` but no known `type`
    /// (eg. produced by another implementation of the service) become
    /// `Unknown` so that their detail still reaches the user.
    pub fn parse(body: &[u8]) -> anyhow::Result<Error> {
        let data: serde_json::Value =
            serde_json::from_slice(body).context("parsing error contents")?;
        let detail = data
            .get("detail")
            .and_then(|d| d.as_str())
            .ok_or_else(|| anyhow!("error contents has no detail string"))?;
        Ok(match data.get("type").and_then(|t| t.as_str()) {
            Some("invalid-article-id") => Error::InvalidArticleId(String::from(
                data.get("input")
                    .and_then(|i| i.as_str())
                    .ok_or_else(|| anyhow!("invalid article id error without an input"))?,
            )),
            Some("article-not-found") => Error::ArticleNotFound(ArticleId(String::from(
                data.get("article_id")
                    .and_then(|i| i.as_str())
                    .ok_or_else(|| anyhow!("article not found error without an article id"))?,
            ))),
            Some("upstream") => Error::Upstream(String::from(detail)),
            _ => Error::Unknown(String::from(detail)),
        })
    }
}
