use std::sync::Arc;

use gailou_client::{api::Article, Status};
use yew::prelude::*;

use crate::ui;

#[derive(Clone, Properties)]
pub struct ArticleViewProps {
    pub article: Arc<Article>,
    pub generation: u64,
    pub status: Status,
    pub on_force_refresh: Callback<()>,
}

// `on_force_refresh` is rebuilt by the parent on every render and always sends
// the same message
impl PartialEq for ArticleViewProps {
    fn eq(&self, other: &Self) -> bool {
        self.generation == other.generation
            && Arc::ptr_eq(&self.article, &other.article)
            && self.status == other.status
    }
}

#[function_component(ArticleView)]
pub fn article_view(p: &ArticleViewProps) -> Html {
    let a = &p.article;
    let byline = [a.author.as_deref(), a.publish_time.as_deref()]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" · ");
    html! {
        <article class="p-3">
            <header class="d-flex align-items-start mb-3">
                <div class="flex-fill">
                    <h1 class="h3">{ &a.title }</h1>
                    if !byline.is_empty() {
                        <div class="text-muted small">{ byline }</div>
                    }
                </div>
                <button
                    type="button"
                    class="btn btn-outline-secondary btn-sm bi-btn bi-arrow-clockwise"
                    title="Re-fetch from the source"
                    disabled={ p.status != Status::Idle }
                    onclick={ p.on_force_refresh.reform(|_| ()) }
                >
                    { " Refresh" }
                </button>
                <ui::LoadingSpinner status={ p.status } />
            </header>
            <div class="article-content mb-4">
                { Html::from_html_unchecked(yew::virtual_dom::AttrValue::from(a.content.clone())) }
            </div>
            <h2 class="h5">{ format!("Comments ({} top-level)", a.top_level_count()) }</h2>
            <ui::CommentTree comments={ a.comments.clone() } generation={ p.generation } />
        </article>
    }
}
