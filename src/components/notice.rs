use gloo_timers::callback::Timeout;
use yew::prelude::*;

use crate::config::Config;
use crate::hooks::use_action::ActionState;

#[derive(Properties, PartialEq)]
pub struct NoticeProps {
    pub state: ActionState,
    pub on_dismiss: Callback<()>,
}

/// Outcome of an upload or parser run.
///
/// Success messages disappear after a few seconds; errors stay until the
/// user closes them or starts another action.
#[function_component(Notice)]
pub fn notice(props: &NoticeProps) -> Html {
    {
        let on_dismiss = props.on_dismiss.clone();
        use_effect_with(props.state.clone(), move |state| {
            let timeout = matches!(state, ActionState::Done(_)).then(|| {
                Timeout::new(Config::NOTIFICATION_TIMEOUT_MS, move || on_dismiss.emit(()))
            });
            move || drop(timeout)
        });
    }

    let close = {
        let on_dismiss = props.on_dismiss.clone();
        Callback::from(move |_: MouseEvent| on_dismiss.emit(()))
    };

    match &props.state {
        ActionState::Idle => html! {},
        ActionState::Running => html! {
            <div class="notice running">
                <div class="spinner"></div>
                <p>{"Виконується запит..."}</p>
            </div>
        },
        ActionState::Done(message) => html! {
            <div class="notice success" role="status">
                <p>{"✅ "}{message}</p>
                <button class="notice-close" onclick={close} aria-label="Закрити">{"×"}</button>
            </div>
        },
        ActionState::Failed(message) => html! {
            <div class="notice error" role="alert">
                <p>{"❌ "}{message}</p>
                <button class="notice-close" onclick={close} aria-label="Закрити">{"×"}</button>
            </div>
        },
    }
}
