use std::sync::Arc;

use gailou_client::{
    api::{Comment, CommentId},
    CommentRow, Row, Toggle,
};
use yew::prelude::*;

// Past this depth replies are not indented any further
const MAX_INDENT: usize = 12;

#[derive(Clone, Properties)]
pub struct CommentTreeProps {
    pub comments: Arc<Vec<Comment>>,
    pub generation: u64,
}

impl PartialEq for CommentTreeProps {
    fn eq(&self, other: &Self) -> bool {
        self.generation == other.generation && Arc::ptr_eq(&self.comments, &other.comments)
    }
}

pub enum CommentTreeMsg {
    Toggle(CommentId),
}

pub struct CommentTree {
    tree: gailou_client::CommentTree,
}

impl Component for CommentTree {
    type Message = CommentTreeMsg;
    type Properties = CommentTreeProps;

    fn create(ctx: &Context<Self>) -> Self {
        CommentTree {
            tree: gailou_client::CommentTree::new(ctx.props().comments.clone()),
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            CommentTreeMsg::Toggle(id) => {
                let expanded = self.tree.toggle(&id);
                tracing::trace!(%id, expanded, "toggled comment replies");
            }
        }
        true
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        // A newly loaded article starts with every thread expanded
        if ctx.props() != old_props {
            self.tree.replace(ctx.props().comments.clone());
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let on_toggle = ctx.link().callback(CommentTreeMsg::Toggle);
        let rows = self.tree.render().into_iter().map(|row| match row {
            Row::NoComments => html! {
                <li class="list-group-item text-muted text-center py-4">{ "No comments yet" }</li>
            },
            Row::Comment(row) => comment_row(&row, &on_toggle),
        });
        html! {
            <ul class="list-group list-group-flush comment-tree">
                { for rows }
            </ul>
        }
    }
}

fn comment_row(row: &CommentRow<'_>, on_toggle: &Callback<CommentId>) -> Html {
    let c = row.comment;
    let indent = format!("padding-left: {}rem", 1.0 + 1.5 * row.depth.min(MAX_INDENT) as f32);
    html! {
        <li
            key={ c.id.0.clone() }
            class={ classes!("list-group-item", "comment", (row.depth > 0).then(|| "comment-reply")) }
            style={ indent }
        >
            <div class="d-flex align-items-center small">
                { avatar(c) }
                <strong>{ &c.author }</strong>
                { for c.reply_to_user().map(|to| html! {
                    <span class="text-muted ms-1">
                        <span class="bi-arrow-right-short" aria-hidden="true"></span>
                        { format!("@{to}") }
                    </span>
                }) }
                { for c.location().map(|loc| html! {
                    <span class="text-muted ms-2">
                        <span class="bi-geo-alt me-1" aria-hidden="true"></span>
                        { loc }
                    </span>
                }) }
                <span class="text-muted ms-auto">{ &c.time }</span>
            </div>
            <div class="comment-content mt-1">
                { Html::from_html_unchecked(yew::virtual_dom::AttrValue::from(c.content.clone())) }
            </div>
            { for row.toggle.map(|t| toggle_button(&c.id, t, on_toggle)) }
        </li>
    }
}

fn avatar(c: &Comment) -> Html {
    match c.avatar() {
        Some(src) => html! {
            <img class="rounded-circle me-2" width="24" height="24" src={ String::from(src) } alt={ c.author.clone() } />
        },
        None => html! {
            <span class="bi-person-circle fs-5 me-2" aria-hidden="true"></span>
        },
    }
}

fn toggle_button(id: &CommentId, toggle: Toggle, on_toggle: &Callback<CommentId>) -> Html {
    let icon_class = match toggle {
        Toggle::Collapse => "bi-chevron-up",
        Toggle::Expand { .. } => "bi-chevron-down",
    };
    let id = id.clone();
    html! {
        <button
            type="button"
            class="btn btn-link btn-sm p-0 mt-1"
            aria-expanded={ matches!(toggle, Toggle::Collapse).to_string() }
            onclick={ on_toggle.reform(move |_| id.clone()) }
        >
            <span class={ classes!(icon_class, "me-1") } aria-hidden="true"></span>
            { toggle.to_string() }
        </button>
    }
}
