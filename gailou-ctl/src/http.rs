use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use gailou_client::{
    api::{self, Article, ArticleId, HistoryEntry, ParseQuery},
    DataService, Error,
};

/// The data service, reached over HTTP
pub struct HttpService {
    client: reqwest::Client,
    host: String,
    timeout: Duration,
}

impl HttpService {
    pub fn new(host: String, timeout: Duration) -> anyhow::Result<HttpService> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("building http client")?;
        Ok(HttpService {
            client,
            host: String::from(host.trim_end_matches('/')),
            timeout,
        })
    }

    async fn fetch<R>(&self, fetcher: &str, query: Option<&ParseQuery>) -> Result<R, Error>
    where
        R: for<'de> serde::Deserialize<'de>,
    {
        let mut req = self.client.get(format!("{}/api/{}", self.host, fetcher));
        if let Some(query) = query {
            req = req.query(query);
        }
        let resp = req.send().await.map_err(|e| self.transport_error(e))?;
        let status = resp.status();
        let body = resp.bytes().await.map_err(|e| self.transport_error(e))?;
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

    fn transport_error(&self, e: reqwest::Error) -> Error {
        tracing::debug!(?e, "data service request failed");
        match e.is_timeout() {
            true => Error::FetchFailed(format!(
                "Data service did not answer within {}s",
                self.timeout.as_secs_f32()
            )),
            false => Error::fetch_failed(e),
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
