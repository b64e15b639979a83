use yew::prelude::*;

use crate::models::listing::Pagination;

#[derive(Properties, PartialEq)]
pub struct PaginationControlsProps {
    pub pagination: Pagination,
    pub on_change: Callback<u32>,
    #[prop_or_default]
    pub disabled: bool,
}

#[function_component(PaginationControls)]
pub fn pagination_controls(props: &PaginationControlsProps) -> Html {
    let button = |target: Option<u32>, label: &'static str| {
        let on_change = props.on_change.clone();
        let onclick = Callback::from(move |_: MouseEvent| {
            if let Some(page) = target {
                on_change.emit(page);
            }
        });
        html! {
            <button class="page-button" {onclick} disabled={props.disabled || target.is_none()}>
                {label}
            </button>
        }
    };

    html! {
        <nav class="pagination" aria-label="Сторінки">
            {button(props.pagination.previous(), "← Назад")}
            <span class="page-label">{props.pagination.label()}</span>
            {button(props.pagination.next(), "Далі →")}
        </nav>
    }
}
