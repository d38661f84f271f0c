use yew::prelude::*;

#[derive(Clone, PartialEq, Properties)]
pub struct QueryBarProps {
    pub busy: bool,
    pub on_submit: Callback<String>,
}

#[function_component(QueryBar)]
pub fn query_bar(p: &QueryBarProps) -> Html {
    let query = use_state(String::new);
    let on_input = {
        let query = query.clone();
        Callback::from(move |e: InputEvent| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            query.set(input.value())
        })
    };
    let on_submit = {
        let query = query.clone();
        p.on_submit.reform(move |e: SubmitEvent| {
            e.prevent_default();
            (*query).clone()
        })
    };
    html! {
        <form class="flex-fill d-flex m-3" onsubmit={on_submit}>
            <input
                type="text"
                class="form-control me-2"
                placeholder="Article link or id"
                aria-label="Article link or id"
                value={ (*query).clone() }
                oninput={on_input}
            />
            <button type="submit" class="btn btn-primary">
                { match p.busy {
                    true => "Fetching...",
                    false => "Load",
                } }
            </button>
        </form>
    }
}
