use async_trait::async_trait;

use crate::{
    api::{Article, ArticleId, HistoryEntry},
    Error,
};

/// The remote source of articles.
///
/// `force_update = false` lets the service answer from its cache,
/// `force_update = true` asks it to re-fetch the article upstream.
///
/// Implementations are expected to bound each call with a timeout and report
/// its expiry as `Error::FetchFailed`.
#[async_trait(?Send)]
pub trait DataService {
    async fn parse(&self, id: &ArticleId, force_update: bool) -> Result<Article, Error>;

    async fn history(&self) -> Result<Vec<HistoryEntry>, Error>;
}
