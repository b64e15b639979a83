use web_sys::HtmlSelectElement;
use yew::prelude::*;

use crate::models::product::ProductType;

#[derive(Properties, PartialEq)]
pub struct ProductSelectorProps {
    pub product: ProductType,
    pub on_change: Callback<ProductType>,
}

/// Product family dropdown component
#[function_component(ProductSelector)]
pub fn product_selector(props: &ProductSelectorProps) -> Html {
    let on_change = {
        let callback = props.on_change.clone();
        Callback::from(move |e: Event| {
            let target: HtmlSelectElement = e.target_unchecked_into();
            if let Ok(product) = target.value().parse::<ProductType>() {
                callback.emit(product);
            }
        })
    };

    html! {
        <select
            class="product-selector"
            onchange={on_change}
            aria-label="Оберіть тип товару"
            title="Оберіть тип товару"
        >
            {
                ProductType::all().iter().map(|p| {
                    let selected = *p == props.product;
                    html! {
                        <option value={p.slug()} {selected}>{p.label()}</option>
                    }
                }).collect::<Html>()
            }
        </select>
    }
}
