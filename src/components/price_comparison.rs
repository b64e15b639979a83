use yew::prelude::*;

use crate::components::formatted_report::FormattedReport;
use crate::hooks::use_action::{ActionState, use_action};
use crate::models::product::ProductType;
use crate::services::api::DashboardClient;

#[derive(Properties, PartialEq)]
pub struct PriceComparisonProps {
    pub product: ProductType,
}

/// Comparison of own prices against competitors, generated on request.
#[function_component(PriceComparison)]
pub fn price_comparison(props: &PriceComparisonProps) -> Html {
    let action = use_action();

    let on_load = {
        let action = action.clone();
        let product = props.product;
        Callback::from(move |_: MouseEvent| {
            action.run("Помилка при порівнянні цін", async move {
                DashboardClient::new()?.price_comparison(product).await
            });
        })
    };

    let running = action.state().is_running();

    html! {
        <section class="comparison-section">
            <h2>{"Порівняння цін"}</h2>
            <div class="form-actions">
                <button type="button" class="primary" onclick={on_load} disabled={running}>
                    if running { {"Порівнюємо..."} } else { {"Порівняти ціни"} }
                </button>
            </div>
            {
                match action.state() {
                    ActionState::Idle => html! {},
                    ActionState::Running => html! {
                        <div class="status loading">
                            <div class="spinner"></div>
                            <p>{"Завантаження порівняння..."}</p>
                        </div>
                    },
                    ActionState::Done(text) => html! {
                        <FormattedReport text={text.clone()} />
                    },
                    ActionState::Failed(message) => html! {
                        <div class="status error"><p>{"❌ "}{message}</p></div>
                    },
                }
            }
        </section>
    }
}
