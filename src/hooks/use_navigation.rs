use gloo_storage::Storage;
use serde::{Deserialize, Serialize};
use yew::prelude::*;

use crate::models::product::ProductType;

const PRODUCT_KEY: &str = "product";
const SECTION_KEY: &str = "section";

/// Top-level page of the dashboard.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub enum Section {
    /// Filters, listing, charts and analytics
    #[default]
    Dashboard,
    /// Uploads, parsers and price comparison
    Reports,
}

impl Section {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Dashboard => "Панель",
            Self::Reports => "Звіти",
        }
    }

    pub fn all() -> &'static [Section] {
        &[Self::Dashboard, Self::Reports]
    }
}

/// Handle returned by `use_navigation` hook
#[derive(Clone, PartialEq)]
pub struct NavigationHandle {
    pub product: ProductType,
    pub section: Section,
    pub set_product: Callback<ProductType>,
    pub set_section: Callback<Section>,
}

/// Product and section selection, persisted to localStorage
#[hook]
pub fn use_navigation() -> NavigationHandle {
    let product = use_state(|| load_preference::<ProductType>(PRODUCT_KEY).unwrap_or_default());
    let section = use_state(|| load_preference::<Section>(SECTION_KEY).unwrap_or_default());

    {
        let product_value = *product;
        use_effect_with(product_value, move |product| {
            save_preference(PRODUCT_KEY, *product);
            || ()
        });
    }

    {
        let section_value = *section;
        use_effect_with(section_value, move |section| {
            save_preference(SECTION_KEY, *section);
            || ()
        });
    }

    let set_product = {
        let product = product.clone();
        Callback::from(move |new_product| product.set(new_product))
    };

    let set_section = {
        let section = section.clone();
        Callback::from(move |new_section| section.set(new_section))
    };

    NavigationHandle {
        product: *product,
        section: *section,
        set_product,
        set_section,
    }
}

fn load_preference<T: for<'de> Deserialize<'de>>(key: &str) -> Option<T> {
    gloo_storage::LocalStorage::get(key).ok()
}

fn save_preference<T: Serialize>(key: &str, value: T) {
    if let Err(e) = gloo_storage::LocalStorage::set(key, value) {
        web_sys::console::warn_1(&format!("Failed to save {key}: {e:?}").into());
    }
}
