use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::models::{
    product::ProductType,
    reference::{Brand, ReferenceData, Supplier},
};
use crate::services::api::DashboardClient;

/// Updates applied to the shared reference data.
///
/// Every update names the product it was fetched for; answers for a
/// product that is no longer selected are dropped.
#[derive(Debug, Clone, PartialEq)]
pub enum ReferenceAction {
    Begin(ProductType),
    Brands(ProductType, Vec<Brand>),
    Suppliers(ProductType, Vec<Supplier>),
    Failed(ProductType, String),
}

impl Reducible for ReferenceData {
    type Action = ReferenceAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        match action {
            ReferenceAction::Begin(product) if product == self.product => Rc::new(Self {
                brands: self.brands.clone(),
                suppliers: self.suppliers.clone(),
                ..Self::loading(product)
            }),
            ReferenceAction::Begin(product) => Rc::new(Self::loading(product)),
            ReferenceAction::Brands(product, brands) if product == self.product => Rc::new(Self {
                brands: Rc::new(brands),
                pending: self.pending.saturating_sub(1),
                ..(*self).clone()
            }),
            ReferenceAction::Suppliers(product, suppliers) if product == self.product => {
                Rc::new(Self {
                    suppliers: Rc::new(suppliers),
                    pending: self.pending.saturating_sub(1),
                    ..(*self).clone()
                })
            }
            ReferenceAction::Failed(product, message) if product == self.product => Rc::new(Self {
                brands: Rc::new(Vec::new()),
                suppliers: Rc::new(Vec::new()),
                pending: 0,
                error: Some(message),
                product,
            }),
            _ => self,
        }
    }
}

/// Context value shared by everything that needs brands or suppliers.
#[derive(Clone, PartialEq)]
pub struct ReferenceHandle {
    pub data: ReferenceData,
    /// Fetches both lists again for the current product
    pub refresh: Callback<()>,
}

#[derive(Properties, PartialEq)]
pub struct ReferenceDataProviderProps {
    pub product: ProductType,
    #[prop_or_default]
    pub children: Html,
}

/// Loads brands and suppliers on mount and whenever the product changes.
/// Nothing else writes to the store; a new fetch only starts on `refresh`.
#[function_component(ReferenceDataProvider)]
pub fn reference_data_provider(props: &ReferenceDataProviderProps) -> Html {
    let data = use_reducer(|| ReferenceData::loading(props.product));
    let generation = use_state(|| 0u32);

    {
        let data = data.clone();
        use_effect_with((props.product, *generation), move |(product, _)| {
            load_reference_data(*product, data.dispatcher());
            || ()
        });
    }

    let refresh = {
        let generation = generation.clone();
        Callback::from(move |()| generation.set(*generation + 1))
    };

    let handle = ReferenceHandle {
        data: (*data).clone(),
        refresh,
    };

    html! {
        <ContextProvider<ReferenceHandle> context={handle}>
            {props.children.clone()}
        </ContextProvider<ReferenceHandle>>
    }
}

/// The two lists load independently; each one lands as soon as it arrives.
fn load_reference_data(product: ProductType, dispatcher: UseReducerDispatcher<ReferenceData>) {
    dispatcher.dispatch(ReferenceAction::Begin(product));

    let client = match DashboardClient::new() {
        Ok(client) => client,
        Err(e) => {
            web_sys::console::error_1(&format!("Reference data unavailable: {e}").into());
            dispatcher.dispatch(ReferenceAction::Failed(
                product,
                e.describe("Не вдалося завантажити довідники"),
            ));
            return;
        }
    };

    {
        let client = client.clone();
        let dispatcher = dispatcher.clone();
        spawn_local(async move {
            let brands = client.brands(product).await;
            dispatcher.dispatch(ReferenceAction::Brands(product, brands));
        });
    }

    spawn_local(async move {
        let suppliers = client.suppliers(product).await;
        dispatcher.dispatch(ReferenceAction::Suppliers(product, suppliers));
    });
}

/// Shared brands and suppliers, or an empty store outside the provider.
#[hook]
pub fn use_reference_data() -> ReferenceHandle {
    use_context::<ReferenceHandle>().unwrap_or_else(|| ReferenceHandle {
        data: ReferenceData::default(),
        refresh: Callback::noop(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brand(id: i64, name: &str) -> Brand {
        Brand {
            id,
            name: name.to_string(),
        }
    }

    #[test]
    fn test_lists_land_independently() {
        let data = Rc::new(ReferenceData::loading(ProductType::Batteries));

        let data = data.reduce(ReferenceAction::Brands(
            ProductType::Batteries,
            vec![brand(1, "Varta")],
        ));
        assert!(data.is_loading());
        assert_eq!(data.brands.len(), 1);

        let data = data.reduce(ReferenceAction::Suppliers(ProductType::Batteries, Vec::new()));
        assert!(!data.is_loading());
    }

    #[test]
    fn test_stale_product_answers_are_dropped() {
        let data = Rc::new(ReferenceData::loading(ProductType::SolarPanels));
        let data = data.reduce(ReferenceAction::Brands(
            ProductType::Batteries,
            vec![brand(1, "Varta")],
        ));

        assert!(data.brands.is_empty());
        assert_eq!(data.pending, 2);
    }

    #[test]
    fn test_begin_keeps_previous_lists_until_replaced() {
        let data = Rc::new(ReferenceData::loading(ProductType::Batteries))
            .reduce(ReferenceAction::Brands(ProductType::Batteries, vec![brand(1, "Varta")]))
            .reduce(ReferenceAction::Begin(ProductType::Batteries));

        assert_eq!(data.brands.len(), 1);
        assert_eq!(data.pending, 2);
        assert_eq!(data.error, None);
    }

    #[test]
    fn test_switching_product_clears_lists() {
        let data = Rc::new(ReferenceData::loading(ProductType::Batteries))
            .reduce(ReferenceAction::Brands(ProductType::Batteries, vec![brand(1, "Varta")]))
            .reduce(ReferenceAction::Begin(ProductType::SolarPanels));

        assert!(data.brands.is_empty());
        assert_eq!(data.product, ProductType::SolarPanels);
    }
}
