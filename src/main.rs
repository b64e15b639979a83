use yew::prelude::*;

use price_monitor_dashboard::components::{Dashboard, ProductSelector, Reports};
use price_monitor_dashboard::hooks::{
    use_navigation::{Section, use_navigation},
    use_reference_data::ReferenceDataProvider,
};
use price_monitor_dashboard::models::{Batteries, ProductType, SolarPanels};

#[function_component(App)]
fn app() -> Html {
    let navigation = use_navigation();
    let product = navigation.product;

    let tabs = Section::all().iter().map(|section| {
        let section = *section;
        let active = section == navigation.section;
        let onclick = {
            let set_section = navigation.set_section.clone();
            Callback::from(move |_: MouseEvent| set_section.emit(section))
        };
        html! {
            <button
                type="button"
                class={classes!("tab", active.then_some("active"))}
                {onclick}
            >
                {section.label()}
            </button>
        }
    });

    let page = match (navigation.section, product) {
        (Section::Dashboard, ProductType::Batteries) => html! { <Dashboard<Batteries> /> },
        (Section::Dashboard, ProductType::SolarPanels) => html! { <Dashboard<SolarPanels> /> },
        (Section::Reports, product) => html! { <Reports key={product.slug()} {product} /> },
    };

    html! {
        <div class="app-container">
            <header class="app-header">
                <h1>{"Моніторинг цін"}</h1>
                <ProductSelector {product} on_change={navigation.set_product.clone()} />
                <nav class="tabs">{for tabs}</nav>
            </header>

            <main class="app-main">
                <ReferenceDataProvider {product}>
                    {page}
                </ReferenceDataProvider>
            </main>

            <style>
                {include_str!("style.css")}
            </style>
        </div>
    }
}

fn main() {
    yew::Renderer::<App>::new().render();
}
