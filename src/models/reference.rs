use serde::{Deserialize, Serialize};
use std::rc::Rc;

use super::product::ProductType;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Brand {
    pub id: i64,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supplier {
    pub id: i64,
    pub name: String,
}

/// Brand and supplier lists shared by the filter forms, the chart supplier
/// picker and the text uploader.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct ReferenceData {
    /// Product family the lists belong to
    pub product: ProductType,
    pub brands: Rc<Vec<Brand>>,
    pub suppliers: Rc<Vec<Supplier>>,
    /// Outstanding fetches; zero once both lists have arrived
    pub pending: u8,
    pub error: Option<String>,
}

impl ReferenceData {
    /// Empty lists with both fetches outstanding.
    pub fn loading(product: ProductType) -> Self {
        Self {
            product,
            pending: 2,
            ..Self::default()
        }
    }

    pub fn is_loading(&self) -> bool {
        self.pending > 0
    }

    /// Display name for a brand id, falling back to the raw id.
    pub fn brand_name(&self, id: i64) -> String {
        self.brands
            .iter()
            .find(|b| b.id == id)
            .map_or_else(|| id.to_string(), |b| b.name.clone())
    }

    /// Display name for a supplier id, falling back to the raw id.
    pub fn supplier_name(&self, id: i64) -> String {
        self.suppliers
            .iter()
            .find(|s| s.id == id)
            .map_or_else(|| id.to_string(), |s| s.name.clone())
    }

    pub fn supplier_names(&self) -> Vec<String> {
        self.suppliers.iter().map(|s| s.name.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_fall_back_to_id() {
        let data = ReferenceData {
            brands: Rc::new(vec![Brand {
                id: 1,
                name: "Varta".to_string(),
            }]),
            ..ReferenceData::default()
        };

        assert_eq!(data.brand_name(1), "Varta");
        assert_eq!(data.brand_name(9), "9");
        assert_eq!(data.supplier_name(2), "2");
    }

    #[test]
    fn test_loading_waits_for_both_lists() {
        let data = ReferenceData::loading(ProductType::SolarPanels);
        assert!(data.is_loading());
        assert_eq!(data.product, ProductType::SolarPanels);
        assert!(data.brands.is_empty());
    }
}
