use std::rc::Rc;
use web_sys::HtmlTextAreaElement;
use yew::prelude::*;

use crate::components::formatted_report::FormattedReport;
use crate::hooks::use_action::{ActionState, use_action};
use crate::models::{error::AppError, product::Product};
use crate::services::api::DashboardClient;

#[derive(Properties)]
pub struct AnalyticsPanelProps<P: Product> {
    /// Rows currently on screen
    pub rows: Rc<Vec<P::Row>>,
}

impl<P: Product> PartialEq for AnalyticsPanelProps<P> {
    fn eq(&self, other: &Self) -> bool {
        self.rows == other.rows
    }
}

/// AI analysis of the rows on screen, with an optional comment for the model.
#[function_component(AnalyticsPanel)]
pub fn analytics_panel<P: Product>(props: &AnalyticsPanelProps<P>) -> Html {
    let comment = use_state(String::new);
    let action = use_action();

    let on_comment = {
        let comment = comment.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlTextAreaElement = e.target_unchecked_into();
            comment.set(input.value());
        })
    };

    let on_analyze = {
        let action = action.clone();
        let rows = props.rows.clone();
        let comment = comment.clone();
        Callback::from(move |_: MouseEvent| {
            if rows.is_empty() {
                action.reject(&AppError::ValidationError(
                    "Немає даних для аналізу".to_string(),
                ));
                return;
            }

            let rows = rows.clone();
            let comment = (*comment).clone();
            action.run("Помилка при отриманні аналітики", async move {
                DashboardClient::new()?
                    .analytics::<P>(&rows, &comment)
                    .await
            });
        })
    };

    let running = action.state().is_running();

    html! {
        <section class="analytics-section">
            <h2>{"Аналітика"}</h2>
            <textarea
                class="analytics-comment"
                placeholder="Коментар до аналізу (необов'язково)"
                value={(*comment).clone()}
                oninput={on_comment}
                disabled={running}
            />
            <div class="form-actions">
                <button type="button" class="primary" onclick={on_analyze} disabled={running}>
                    if running { {"Аналізуємо..."} } else { {"Отримати аналітику"} }
                </button>
            </div>
            {
                match action.state() {
                    ActionState::Idle => html! {},
                    ActionState::Running => html! {
                        <div class="status loading">
                            <div class="spinner"></div>
                            <p>{"Формуємо аналітику..."}</p>
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
