use std::{collections::HashMap, net::TcpListener, sync::Arc};

use anyhow::Context;
use async_trait::async_trait;
use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use gailou_client::{
    api::{self, Article, ArticleId, HistoryEntry, ParseQuery},
    DataService,
};
use tokio::sync::Mutex;

mod error;
pub use error::Error;

/// In-memory stand-in for the scraping backend.
///
/// `upstream` is what a fresh scrape of each article would return, the cache
/// holds what was scraped last. History lists every successfully served
/// article, most recently served first.
#[derive(Debug, Default)]
pub struct MockServer {
    upstream: HashMap<ArticleId, Result<Article, api::Error>>,
    cache: HashMap<ArticleId, Article>,
    history: Vec<HistoryEntry>,
    upstream_fetches: usize,
}

impl MockServer {
    pub fn new() -> MockServer {
        MockServer::default()
    }

    /// Make `article` the current upstream version of its id
    pub fn publish(&mut self, article: Article) {
        self.upstream.insert(article.id.clone(), Ok(article));
    }

    /// Make any further upstream fetch of `id` fail with `err`
    pub fn fail_upstream(&mut self, id: ArticleId, err: api::Error) {
        self.upstream.insert(id, Err(err));
    }

    /// Return the number of upstream fetches performed so far
    pub fn test_upstream_fetches(&self) -> usize {
        self.upstream_fetches
    }

    pub fn parse(&mut self, id: &ArticleId, force_update: bool) -> Result<Article, api::Error> {
        if ArticleId::parse(id.as_str()).ok().as_ref() != Some(id) {
            return Err(api::Error::InvalidArticleId(id.0.clone()));
        }
        let article = match (force_update, self.cache.get(id)) {
            (false, Some(cached)) => {
                tracing::debug!(%id, "serving article from cache");
                cached.clone()
            }
            _ => {
                tracing::debug!(%id, force_update, "fetching article upstream");
                self.upstream_fetches += 1;
                let article = self
                    .upstream
                    .get(id)
                    .cloned()
                    .unwrap_or_else(|| Err(api::Error::ArticleNotFound(id.clone())))?;
                self.cache.insert(id.clone(), article.clone());
                article
            }
        };
        self.history.retain(|e| e.id != *id);
        self.history.insert(0, article.history_entry());
        Ok(article)
    }

    pub fn history(&self) -> Vec<HistoryEntry> {
        self.history.clone()
    }
}

/// Shared handle on a `MockServer`, usable both in-process and over HTTP
#[derive(Clone, Debug, Default)]
pub struct MockService(Arc<Mutex<MockServer>>);

impl MockService {
    pub fn new(server: MockServer) -> MockService {
        MockService(Arc::new(Mutex::new(server)))
    }

    pub async fn lock(&self) -> tokio::sync::MutexGuard<'_, MockServer> {
        self.0.lock().await
    }
}

#[async_trait(?Send)]
impl DataService for MockService {
    async fn parse(&self, id: &ArticleId, force_update: bool) -> Result<Article, gailou_client::Error> {
        Ok(self.lock().await.parse(id, force_update)?)
    }

    async fn history(&self) -> Result<Vec<HistoryEntry>, gailou_client::Error> {
        Ok(self.lock().await.history())
    }
}

pub fn router(service: MockService) -> Router {
    Router::new()
        .route("/api/parse", get(parse))
        .route("/api/history", get(history))
        .layer(tower_http::cors::CorsLayer::permissive())
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(service)
}

/// Serve the HTTP binding of `service` until the process stops
pub async fn serve(listener: TcpListener, service: MockService) -> anyhow::Result<()> {
    listener
        .set_nonblocking(true)
        .context("setting listener non-blocking")?;
    tracing::info!("listening on {:?}", listener.local_addr());
    axum::Server::from_tcp(listener)
        .context("building axum server")?
        .serve(router(service).into_make_service())
        .await
        .context("serving axum webserver")
}

/// JSON reply encoded without bounding the nesting of comment threads
struct Payload<T>(T);

impl<T: serde::Serialize> IntoResponse for Payload<T> {
    fn into_response(self) -> Response {
        match api::json::to_vec(&self.0) {
            Ok(body) => ([(header::CONTENT_TYPE, "application/json")], body).into_response(),
            Err(e) => Error(api::Error::Unknown(format!("serializing response: {e}"))).into_response(),
        }
    }
}

async fn parse(
    State(service): State<MockService>,
    Query(q): Query<ParseQuery>,
) -> Result<Payload<Article>, Error> {
    Ok(Payload(service.lock().await.parse(&q.article_id, q.force_update)?))
}

async fn history(State(service): State<MockService>) -> Payload<Vec<HistoryEntry>> {
    Payload(service.lock().await.history())
}
