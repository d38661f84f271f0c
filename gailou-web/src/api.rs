use std::time::Duration;

use async_trait::async_trait;
use futures::{
    future::{self, Either},
    pin_mut,
};
use gailou_client::{
    api::{self, Article, ArticleId, HistoryEntry, ParseQuery},
    DataService, Error,
};

// Matches the backend's own upstream request timeout
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct HttpService {
    host: String,
}

impl HttpService {
    pub fn new(host: &str) -> HttpService {
        HttpService {
            host: String::from(host.trim_end_matches('/')),
        }
    }

    async fn fetch<R>(&self, fetcher: &str, query: Option<&ParseQuery>) -> Result<R, Error>
    where
        R: for<'de> serde::Deserialize<'de>,
    {
        let req = self.fetch_no_timeout(fetcher, query);
        let timeout = wasm_timer::Delay::new(REQUEST_TIMEOUT);
        pin_mut!(req);
        match future::select(req, timeout).await {
            Either::Left((res, _)) => res,
            Either::Right(_) => {
                tracing::warn!(fetcher, "data service request timed out");
                Err(Error::FetchFailed(format!(
                    "Data service did not answer within {}s",
                    REQUEST_TIMEOUT.as_secs()
                )))
            }
        }
    }

    async fn fetch_no_timeout<R>(&self, fetcher: &str, query: Option<&ParseQuery>) -> Result<R, Error>
    where
        R: for<'de> serde::Deserialize<'de>,
    {
        let mut req = crate::CLIENT.get(format!("{}/api/{}", self.host, fetcher));
        if let Some(query) = query {
            req = req.query(query);
        }
        let resp = req.send().await.map_err(Error::fetch_failed)?;
        let status = resp.status();
        let body = resp.bytes().await.map_err(Error::fetch_failed)?;
        if status.is_success() {
            return api::json::from_slice(&body).map_err(|e| {
                tracing::debug!(?e, "malformed data service response");
                Error::FetchFailed(format!("Malformed data service response: {e}"))
            });
        }
        match api::Error::parse(&body) {
            Ok(err) => Err(Error::from(err)),
            Err(e) => {
                tracing::debug!(?e, %status, "error response without a detail");
                Err(Error::FetchFailed(format!("Data service answered {status}")))
            }
        }
    }
}

#[async_trait(?Send)]
impl DataService for HttpService {
    async fn parse(&self, id: &ArticleId, force_update: bool) -> Result<Article, Error> {
        let query = ParseQuery {
            article_id: id.clone(),
            force_update,
        };
        self.fetch("parse", Some(&query)).await
    }

    async fn history(&self) -> Result<Vec<HistoryEntry>, Error> {
        self.fetch("history", None).await
    }
}
