use std::rc::Rc;

use gailou_client::{
    api::ArticleId, ArticleSession, Error, HistoryOutcome, HistoryTicket, LoadOutcome, LoadTicket,
    Status,
};
use gloo_storage::{LocalStorage, Storage};
use yew::prelude::*;

use crate::{api::HttpService, ui};

const KEY_API_HOST: &str = "api-host";
const DEFAULT_API_HOST: &str = "http://localhost:8000";

pub enum AppMsg {
    Submit(String),
    SelectHistory(ArticleId),
    ForceRefresh,
    ArticleLoaded(LoadOutcome),
    HistoryLoaded(HistoryOutcome),
    SetHost(String),
}

pub struct App {
    session: ArticleSession,
    host: String,
    service: Rc<HttpService>,
    // Queries rejected before reaching the session
    input_error: Option<Error>,
}

impl App {
    fn fetch_article(&mut self, ctx: &Context<Self>, ticket: LoadTicket) {
        self.input_error = None;
        let service = self.service.clone();
        ctx.link()
            .send_future(async move { AppMsg::ArticleLoaded(ticket.fetch(&*service).await) });
    }

    fn fetch_history(&self, ctx: &Context<Self>, ticket: HistoryTicket) {
        let service = self.service.clone();
        ctx.link()
            .send_future(async move { AppMsg::HistoryLoaded(ticket.fetch(&*service).await) });
    }
}

impl Component for App {
    type Message = AppMsg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let host: String =
            LocalStorage::get(KEY_API_HOST).unwrap_or_else(|_| String::from(DEFAULT_API_HOST));
        tracing::info!(%host, "starting with data service");
        let mut this = App {
            session: ArticleSession::new(),
            service: Rc::new(HttpService::new(&host)),
            host,
            input_error: None,
        };
        let ticket = this.session.refresh_history();
        this.fetch_history(ctx, ticket);
        this
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            AppMsg::Submit(query) => match self.session.submit_query(&query) {
                Ok(ticket) => self.fetch_article(ctx, ticket),
                Err(e) => {
                    tracing::debug!(?query, "rejected query");
                    self.input_error = Some(e);
                }
            },
            AppMsg::SelectHistory(id) => {
                let ticket = self.session.select_history_entry(id);
                self.fetch_article(ctx, ticket);
            }
            AppMsg::ForceRefresh => match self.session.force_refresh() {
                Some(ticket) => self.fetch_article(ctx, ticket),
                None => return false,
            },
            AppMsg::ArticleLoaded(outcome) => {
                if let Some(ticket) = self.session.complete_load(outcome) {
                    self.fetch_history(ctx, ticket);
                }
            }
            AppMsg::HistoryLoaded(outcome) => return self.session.complete_history(outcome),
            AppMsg::SetHost(host) => {
                let host = match host.trim() {
                    "" => String::from(DEFAULT_API_HOST),
                    h => String::from(h),
                };
                if let Err(e) = LocalStorage::set(KEY_API_HOST, &host) {
                    tracing::warn!(?e, "failed saving data service host to local storage");
                }
                tracing::info!(%host, "switched data service");
                self.service = Rc::new(HttpService::new(&host));
                self.host = host;
                let ticket = self.session.refresh_history();
                self.fetch_history(ctx, ticket);
            }
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let status = self.session.status();
        let error = self
            .input_error
            .as_ref()
            .or_else(|| self.session.error())
            .map(|e| e.to_string());
        let main = match self.session.article() {
            Some(article) => html! {
                <ui::ArticleView
                    article={ article.clone() }
                    generation={ self.session.generation() }
                    { status }
                    on_force_refresh={ ctx.link().callback(|_| AppMsg::ForceRefresh) }
                />
            },
            None if status == Status::Loading => html! {
                <ui::LoadingSpinner { status } />
            },
            None => html! {
                <div class="text-center text-muted my-5">
                    { "Paste an article link or id above to read its comment threads" }
                </div>
            },
        };

        html! {
            <div class="container-fluid vh-100">
                <div class="row h-100">
                    <nav class="col-md-3 sidebar overflow-auto p-0">
                        <ui::HistoryList
                            history={ self.session.history().clone() }
                            active={ self.session.article().map(|a| a.id.clone()) }
                            error={ self.session.history_error().map(|e| e.to_string()) }
                            on_select={ ctx.link().callback(AppMsg::SelectHistory) }
                        />
                    </nav>
                    <main class="col-md-9 h-100 overflow-auto p-0">
                        <div class="d-flex align-items-center">
                            <ui::QueryBar
                                busy={ self.session.is_loading() }
                                on_submit={ ctx.link().callback(AppMsg::Submit) }
                            />
                            <ui::SettingsMenu
                                host={ self.host.clone() }
                                on_host_change={ ctx.link().callback(AppMsg::SetHost) }
                            />
                        </div>
                        <ui::ErrorBanner message={ error } />
                        { main }
                    </main>
                </div>
            </div>
        }
    }
}
