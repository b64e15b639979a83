use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct StatusProps {
    pub loading: bool,
    #[prop_or_default]
    pub error: Option<String>,
    /// Nothing to show after a finished request
    #[prop_or_default]
    pub empty: bool,
    #[prop_or(AttrValue::Static("Немає даних за обраними фільтрами"))]
    pub empty_message: AttrValue,
}

/// Loading, error and empty states of a result view.
#[function_component(Status)]
pub fn status(props: &StatusProps) -> Html {
    if props.loading {
        return html! {
            <div class="status loading">
                <div class="spinner"></div>
                <p>{"Завантаження..."}</p>
            </div>
        };
    }

    match &props.error {
        Some(msg) => html! {
            <div class="status error">
                <p>{"❌ "}{msg}</p>
            </div>
        },
        None if props.empty => html! {
            <div class="status empty">
                <p>{props.empty_message.clone()}</p>
            </div>
        },
        None => html! {},
    }
}
