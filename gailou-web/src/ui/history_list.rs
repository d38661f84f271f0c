use std::sync::Arc;

use gailou_client::api::{ArticleId, HistoryEntry};
use yew::prelude::*;

#[derive(Clone, PartialEq, Properties)]
pub struct HistoryListProps {
    pub history: Arc<Vec<HistoryEntry>>,
    pub active: Option<ArticleId>,
    pub error: Option<String>,
    pub on_select: Callback<ArticleId>,
}

#[function_component(HistoryList)]
pub fn history_list(p: &HistoryListProps) -> Html {
    let list_items = p.history.iter().map(|e| {
        let is_active = match p.active.as_ref() == Some(&e.id) {
            true => "active",
            false => "",
        };
        let on_select = {
            let id = e.id.clone();
            p.on_select.reform(move |ev: MouseEvent| {
                ev.prevent_default();
                id.clone()
            })
        };
        html! {
            <li key={ e.id.0.clone() } class={classes!("nav-item", is_active, "border-bottom", "p-2")}>
                <a
                    class={classes!("nav-link", is_active)}
                    href={format!("#article-{}", e.id)}
                    title={ e.id.0.clone() }
                    onclick={on_select}
                >
                    { e.title.clone() }
                </a>
            </li>
        }
    });
    let placeholder = (p.history.is_empty() && p.error.is_none()).then(|| {
        html! { <li class="nav-item text-muted p-2">{ "No article fetched yet" }</li> }
    });
    let error = p.error.as_ref().map(|e| {
        html! { <li class="nav-item text-danger small p-2">{ format!("History unavailable: {e}") }</li> }
    });
    html! {
        <ul class="nav flex-column">
            <li class="nav-item p-2"><h2 class="h6 text-uppercase">{ "History" }</h2></li>
            { for error }
            { for placeholder }
            { for list_items }
        </ul>
    }
}
