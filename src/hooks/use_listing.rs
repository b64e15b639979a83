use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::models::{
    listing::{ListingFilters, ListingState},
    product::Product,
};
use crate::services::api::fetch_listing;

/// Handle returned by `use_listing` hook
pub struct ListingHandle<P: Product> {
    pub state: ListingState<P::Row>,
    /// Filters of the page on screen
    pub filters: P::Filters,
    /// Starts a new search at page 1
    pub submit: Callback<P::Filters>,
    /// Moves to another page of the current search
    pub change_page: Callback<u32>,
}

impl<P: Product> Clone for ListingHandle<P> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
            filters: self.filters.clone(),
            submit: self.submit.clone(),
            change_page: self.change_page.clone(),
        }
    }
}

impl<P: Product> PartialEq for ListingHandle<P> {
    fn eq(&self, other: &Self) -> bool {
        self.state == other.state
            && self.filters == other.filters
            && self.submit == other.submit
            && self.change_page == other.change_page
    }
}

/// Fetches a listing page whenever the filters change.
///
/// Only the answer to the latest request is applied; a failure leaves an
/// empty first page and a message.
#[hook]
pub fn use_listing<P: Product>() -> ListingHandle<P> {
    let filters = use_state(|| P::Filters::default().first_page());
    let state = use_state(ListingState::<P::Row>::new);
    let trigger = use_state(|| 0u32);
    let latest = use_mut_ref(|| 0u32);

    {
        let state = state.clone();
        let latest = latest.clone();

        use_effect_with(((*filters).clone(), *trigger), move |(filters, _)| {
            let request = {
                let mut latest = latest.borrow_mut();
                *latest = latest.wrapping_add(1);
                *latest
            };

            state.set(state.begin());

            let filters = filters.clone();
            spawn_local(async move {
                let result = fetch_listing::<P>(&filters).await;
                if *latest.borrow() != request {
                    return;
                }

                match result {
                    Ok(page) => state.set(ListingState::loaded(page, filters.page())),
                    Err(e) => {
                        web_sys::console::error_1(&format!("Listing failed: {e}").into());
                        state.set(ListingState::failed(
                            e.describe("Помилка при завантаженні даних"),
                        ));
                    }
                }
            });

            || ()
        });
    }

    let submit = {
        let filters = filters.clone();
        let trigger = trigger.clone();
        Callback::from(move |new_filters: P::Filters| {
            filters.set(new_filters.first_page());
            trigger.set(*trigger + 1);
        })
    };

    let change_page = {
        let filters = filters.clone();
        let pagination = state.pagination;
        Callback::from(move |page: u32| {
            if let Some(next) = filters.turn_to(page, &pagination) {
                filters.set(next);
            }
        })
    };

    ListingHandle {
        state: (*state).clone(),
        filters: (*filters).clone(),
        submit,
        change_page,
    }
}
