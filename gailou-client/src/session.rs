use std::sync::Arc;

use crate::{
    api::{Article, ArticleId, HistoryEntry},
    DataService, Error,
};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Status {
    Idle,

    /// Nothing is displayed while the article loads
    Loading,

    /// The displayed article stays on screen while it is re-fetched
    Refreshing,
}

/// An article fetch issued by an `ArticleSession`, waiting to be run
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LoadTicket {
    seq: u64,
    id: ArticleId,
    force_update: bool,
}

impl LoadTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn id(&self) -> &ArticleId {
        &self.id
    }

    pub fn force_update(&self) -> bool {
        self.force_update
    }

    pub async fn fetch<S: DataService + ?Sized>(self, service: &S) -> LoadOutcome {
        let result = service.parse(&self.id, self.force_update).await;
        self.resolve(result)
    }

    pub fn resolve(self, result: Result<Article, Error>) -> LoadOutcome {
        LoadOutcome {
            ticket: self,
            result,
        }
    }
}

#[derive(Debug)]
pub struct LoadOutcome {
    pub ticket: LoadTicket,
    pub result: Result<Article, Error>,
}

/// A history fetch issued by an `ArticleSession`, waiting to be run
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HistoryTicket {
    seq: u64,
}

impl HistoryTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub async fn fetch<S: DataService + ?Sized>(self, service: &S) -> HistoryOutcome {
        let result = service.history().await;
        self.resolve(result)
    }

    pub fn resolve(self, result: Result<Vec<HistoryEntry>, Error>) -> HistoryOutcome {
        HistoryOutcome {
            ticket: self,
            result,
        }
    }
}

#[derive(Debug)]
pub struct HistoryOutcome {
    pub ticket: HistoryTicket,
    pub result: Result<Vec<HistoryEntry>, Error>,
}

/// Owner of what is currently displayed.
///
/// The session never performs I/O itself: operations that need the data
/// service hand out a ticket, the caller runs it and passes the outcome back
/// to `complete_load` or `complete_history`. Only the outcome of the most
/// recently issued ticket of each kind is ever applied, so a slow response can
/// not overwrite the result of a later request.
#[derive(Clone, Debug, Default)]
pub struct ArticleSession {
    article: Option<Arc<Article>>,
    generation: u64,
    history: Arc<Vec<HistoryEntry>>,
    error: Option<Error>,
    history_error: Option<Error>,
    loading: bool,
    last_load: u64,
    last_history: u64,
}

impl ArticleSession {
    pub fn new() -> ArticleSession {
        ArticleSession::default()
    }

    pub fn article(&self) -> Option<&Arc<Article>> {
        self.article.as_ref()
    }

    /// Bumped every time a new article snapshot gets displayed
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn history(&self) -> &Arc<Vec<HistoryEntry>> {
        &self.history
    }

    pub fn error(&self) -> Option<&Error> {
        self.error.as_ref()
    }

    pub fn history_error(&self) -> Option<&Error> {
        self.history_error.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn status(&self) -> Status {
        match (self.loading, self.article.is_some()) {
            (false, _) => Status::Idle,
            (true, false) => Status::Loading,
            (true, true) => Status::Refreshing,
        }
    }

    /// Parse user input and start loading the article it designates.
    ///
    /// Invalid input leaves the session untouched.
    pub fn submit_query(&mut self, raw_input: &str) -> Result<LoadTicket, Error> {
        let id = ArticleSession::parse_query(raw_input)?;
        Ok(self.load_article(id, false))
    }

    /// Validate user input the way `submit_query` does, without loading
    pub fn parse_query(raw_input: &str) -> Result<ArticleId, Error> {
        ArticleId::parse(raw_input).map_err(|_| Error::InvalidInput(String::from(raw_input)))
    }

    pub fn select_history_entry(&mut self, id: ArticleId) -> LoadTicket {
        self.load_article(id, false)
    }

    /// Re-fetch the displayed article, bypassing the service's cache
    pub fn force_refresh(&mut self) -> Option<LoadTicket> {
        let id = self.article.as_ref()?.id.clone();
        Some(self.load_article(id, true))
    }

    pub fn load_article(&mut self, id: ArticleId, force_update: bool) -> LoadTicket {
        self.last_load += 1;
        self.loading = true;
        self.error = None;
        if !force_update {
            self.article = None;
        }
        tracing::debug!(seq = self.last_load, %id, force_update, "issued article load");
        LoadTicket {
            seq: self.last_load,
            id,
            force_update,
        }
    }

    /// Apply the outcome of a `LoadTicket`.
    ///
    /// Returns the history refresh to run after a successful load.
    pub fn complete_load(&mut self, outcome: LoadOutcome) -> Option<HistoryTicket> {
        let LoadOutcome { ticket, result } = outcome;
        if ticket.seq != self.last_load {
            tracing::warn!(
                seq = ticket.seq,
                latest = self.last_load,
                id = %ticket.id,
                "discarding stale article load"
            );
            return None;
        }
        self.loading = false;
        match result {
            Ok(article) => {
                tracing::debug!(seq = ticket.seq, id = %article.id, "article loaded");
                self.article = Some(Arc::new(article));
                self.generation += 1;
                Some(self.refresh_history())
            }
            Err(e) => {
                tracing::debug!(seq = ticket.seq, id = %ticket.id, err = %e, "article load failed");
                self.error = Some(e);
                None
            }
        }
    }

    pub fn refresh_history(&mut self) -> HistoryTicket {
        self.last_history += 1;
        tracing::debug!(seq = self.last_history, "issued history refresh");
        HistoryTicket {
            seq: self.last_history,
        }
    }

    /// Apply the outcome of a `HistoryTicket`, returns whether it was applied.
    ///
    /// Failures are recorded separately and never touch the article or its
    /// error.
    pub fn complete_history(&mut self, outcome: HistoryOutcome) -> bool {
        let HistoryOutcome { ticket, result } = outcome;
        if ticket.seq != self.last_history {
            tracing::warn!(
                seq = ticket.seq,
                latest = self.last_history,
                "discarding stale history refresh"
            );
            return false;
        }
        match result {
            Ok(history) => {
                self.history = Arc::new(history);
                self.history_error = None;
            }
            Err(e) => {
                tracing::warn!(err = %e, "failed refreshing history");
                self.history_error = Some(e);
            }
        }
        true
    }
}
