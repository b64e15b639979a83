use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::models::{
    chart::{ChartSelection, ChartState},
    product::Product,
};
use crate::services::api::fetch_chart;

/// Handle returned by `use_chart` hook
pub struct ChartHandle<P: Product> {
    pub selection: Option<ChartSelection<P::Row>>,
    pub state: ChartState,
    pub open: Callback<ChartSelection<P::Row>>,
    pub close: Callback<()>,
}

impl<P: Product> Clone for ChartHandle<P> {
    fn clone(&self) -> Self {
        Self {
            selection: self.selection.clone(),
            state: self.state.clone(),
            open: self.open.clone(),
            close: self.close.clone(),
        }
    }
}

impl<P: Product> PartialEq for ChartHandle<P> {
    fn eq(&self, other: &Self) -> bool {
        self.selection == other.selection
            && self.state == other.state
            && self.open == other.open
            && self.close == other.close
    }
}

/// Price history for the row and suppliers picked last.
#[hook]
pub fn use_chart<P: Product>() -> ChartHandle<P> {
    let selection = use_state(|| None::<ChartSelection<P::Row>>);
    let state = use_state(|| ChartState::Loading);
    let latest = use_mut_ref(|| 0u32);

    {
        let state = state.clone();
        let latest = latest.clone();

        use_effect_with((*selection).clone(), move |selection| {
            let request = {
                let mut latest = latest.borrow_mut();
                *latest = latest.wrapping_add(1);
                *latest
            };

            if let Some(selection) = selection.clone() {
                state.set(ChartState::Loading);

                spawn_local(async move {
                    let result = fetch_chart::<P>(&selection.row, &selection.suppliers).await;
                    if *latest.borrow() != request {
                        return;
                    }

                    if let Err(e) = &result {
                        web_sys::console::error_1(&format!("Chart failed: {e}").into());
                    }
                    state.set(ChartState::from_result(result));
                });
            }

            || ()
        });
    }

    let open = {
        let selection = selection.clone();
        Callback::from(move |chosen: ChartSelection<P::Row>| selection.set(Some(chosen)))
    };

    let close = {
        let selection = selection.clone();
        Callback::from(move |()| selection.set(None))
    };

    ChartHandle {
        selection: (*selection).clone(),
        state: (*state).clone(),
        open,
        close,
    }
}
