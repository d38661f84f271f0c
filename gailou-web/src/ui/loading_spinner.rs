use gailou_client::Status;
use yew::prelude::*;

#[derive(Clone, PartialEq, Properties)]
pub struct LoadingSpinnerProps {
    pub status: Status,
}

#[function_component(LoadingSpinner)]
pub fn loading_spinner(p: &LoadingSpinnerProps) -> Html {
    match p.status {
        Status::Idle => html! {},
        Status::Loading => html! {
            <div class="d-flex justify-content-center align-items-center my-5">
                <div class="spinner-border" role="status" aria-hidden="true"></div>
                <span class="ms-3">{ "Loading article..." }</span>
            </div>
        },
        // The displayed article stays visible, only hint at the pending fetch
        Status::Refreshing => html! {
            <span class="d-inline-flex align-items-center text-muted ms-3">
                <span class="spinner-border spinner-border-sm" role="status" aria-hidden="true"></span>
                <span class="ms-2">{ "Refreshing..." }</span>
            </span>
        },
    }
}
