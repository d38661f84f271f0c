use yew::prelude::*;

#[derive(Clone, PartialEq, Properties)]
pub struct ErrorBannerProps {
    pub message: Option<String>,
}

#[function_component(ErrorBanner)]
pub fn error_banner(p: &ErrorBannerProps) -> Html {
    let Some(message) = &p.message else {
        return html! {};
    };
    html! {
        <div class="alert alert-danger d-flex align-items-center m-3" role="alert">
            <span class="bi-exclamation-triangle-fill me-2" aria-hidden="true"></span>
            <div>{ message }</div>
        </div>
    }
}
