use yew::prelude::*;

use crate::components::notice::Notice;
use crate::hooks::use_action::{ActionHandle, use_action};
use crate::models::product::ProductType;
use crate::services::api::DashboardClient;

#[derive(Properties, PartialEq)]
pub struct ParserButtonsProps {
    pub product: ProductType,
}

#[derive(Clone, Copy, PartialEq)]
enum Parser {
    Competitor,
    OwnPrices,
}

impl Parser {
    fn start(self, action: &ActionHandle, product: ProductType) {
        match self {
            Self::Competitor => action.run("Помилка при запуску парсера конкурентів", async move {
                DashboardClient::new()?
                    .parse_competitor(product)
                    .await
                    .map(|ack| ack.message("Парсер конкурентів запущено"))
            }),
            Self::OwnPrices => action.run("Помилка при запуску парсера власних цін", async move {
                DashboardClient::new()?
                    .parse_own_prices(product)
                    .await
                    .map(|ack| ack.message("Парсер власних цін запущено"))
            }),
        }
    }
}

/// Triggers for the server-side price scrapers.
#[function_component(ParserButtons)]
pub fn parser_buttons(props: &ParserButtonsProps) -> Html {
    let competitor = use_action();
    let own_prices = use_action();

    let button = |parser: Parser, action: &ActionHandle, idle: &'static str, busy: &'static str| {
        let running = action.state().is_running();
        let onclick = {
            let action = action.clone();
            let product = props.product;
            Callback::from(move |_: MouseEvent| parser.start(&action, product))
        };
        let on_dismiss = {
            let action = action.clone();
            Callback::from(move |()| action.dismiss())
        };

        html! {
            <div class="parser-trigger">
                <button type="button" class="primary" {onclick} disabled={running}>
                    { if running { busy } else { idle } }
                </button>
                <Notice state={action.state().clone()} {on_dismiss} />
            </div>
        }
    };

    html! {
        <section class="parser-section">
            <h2>{"Парсери"}</h2>
            {button(Parser::Competitor, &competitor, "Запустити парсер конкурентів", "Парсинг конкурентів...")}
            {button(Parser::OwnPrices, &own_prices, "Запустити парсер власних цін", "Парсинг власних цін...")}
        </section>
    }
}
