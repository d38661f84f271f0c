use yew::prelude::*;

#[derive(Clone, PartialEq, Properties)]
pub struct SettingsMenuProps {
    pub host: String,
    pub on_host_change: Callback<String>,
}

#[function_component(SettingsMenu)]
pub fn settings_menu(p: &SettingsMenuProps) -> Html {
    let on_change = p.on_host_change.reform(|e: web_sys::Event| {
        let input: web_sys::HtmlInputElement = e.target_unchecked_into();
        input.value()
    });
    html! {
        <div class="dropdown">
            <button
                type="button"
                class="btn btn-light btn-circle m-3 bi-btn bi-gear-fill fs-6"
                title="Settings"
                data-bs-toggle="dropdown"
                data-bs-auto-close="outside"
            >
            </button>
            <div class="dropdown-menu dropdown-menu-end dropdown-menu-dark mt-3 p-3">
                <label class="form-label" for="api-host">{ "Data service" }</label>
                <input
                    type="url"
                    class="form-control"
                    id="api-host"
                    placeholder="http://localhost:8000"
                    value={ p.host.clone() }
                    onchange={on_change}
                />
            </div>
        </div>
    }
}
