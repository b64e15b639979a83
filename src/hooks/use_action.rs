use std::future::Future;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::models::error::AppError;

/// Progress of a user-triggered request: an upload, a parser run, an
/// analytics or comparison report.
#[derive(Clone, PartialEq, Debug, Default)]
pub enum ActionState {
    #[default]
    Idle,
    Running,
    /// Success message or report text
    Done(String),
    Failed(String),
}

impl ActionState {
    /// Returns true while the request is in flight
    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running)
    }

    pub fn output(&self) -> Option<&str> {
        match self {
            Self::Done(output) => Some(output),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Handle returned by `use_action` hook
#[derive(Clone, PartialEq)]
pub struct ActionHandle {
    state: UseStateHandle<ActionState>,
}

impl ActionHandle {
    pub fn state(&self) -> &ActionState {
        &self.state
    }

    /// Runs `request` unless another one is still in flight.
    ///
    /// The output becomes `Done`; an error becomes `Failed` with a message
    /// prefixed by `action`.
    pub fn run<F>(&self, action: &'static str, request: F)
    where
        F: Future<Output = Result<String, AppError>> + 'static,
    {
        if self.state.is_running() {
            return;
        }

        self.state.set(ActionState::Running);
        let state = self.state.clone();
        spawn_local(async move {
            match request.await {
                Ok(output) => state.set(ActionState::Done(output)),
                Err(e) => {
                    web_sys::console::error_1(&format!("{action}: {e}").into());
                    state.set(ActionState::Failed(e.describe(action)));
                }
            }
        });
    }

    /// Shows a client-side validation failure without sending anything.
    pub fn reject(&self, error: &AppError) {
        self.state.set(ActionState::Failed(error.user_message()));
    }

    pub fn dismiss(&self) {
        self.state.set(ActionState::Idle);
    }
}

#[hook]
pub fn use_action() -> ActionHandle {
    let state = use_state(ActionState::default);
    ActionHandle { state }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_accessors() {
        assert!(ActionState::Running.is_running());
        assert_eq!(ActionState::Done("ok".into()).output(), Some("ok"));
        assert_eq!(ActionState::Failed("no".into()).error(), Some("no"));
        assert_eq!(ActionState::Idle.output(), None);
    }
}
