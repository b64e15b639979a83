use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{
    datetime,
    error::AppError,
    filters::{
        self, FacetOptions, PRICE_BOUNDS, PRICE_PER_W_BOUNDS, SortOrder, deserialize_list,
        deserialize_price_per_w_range, deserialize_price_range, format_number, order_price_range,
        order_range,
    },
    listing::{ListingFilters, ListingRow},
    product::{Product, ProductType},
};
use crate::config::Config;

pub const PANEL_TYPE_OPTIONS: FacetOptions =
    &[("одностороння", "Одностороння"), ("двостороння", "Двостороння")];

pub const CELL_TYPE_OPTIONS: FacetOptions = &[("n-type", "N-type"), ("p-type", "P-type")];

/// A solar panel offer from one supplier.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SolarPanelRow {
    pub id: i64,
    pub name: String,
    pub full_name: String,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub supplier: Option<String>,
    pub power: f64,
    #[serde(default)]
    pub panel_type: Option<String>,
    #[serde(default)]
    pub cell_type: Option<String>,
    #[serde(default)]
    pub thickness: Option<f64>,
    pub price: f64,
    #[serde(default)]
    pub price_per_w: Option<f64>,
    #[serde(default, with = "datetime::optional")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl SolarPanelRow {
    /// Price per watt as sent by the backend, or derived from price and power.
    pub fn effective_price_per_w(&self) -> Option<f64> {
        self.price_per_w
            .or_else(|| (self.power > 0.0).then(|| self.price / self.power))
    }
}

impl ListingRow for SolarPanelRow {
    fn id(&self) -> i64 {
        self.id
    }

    fn title(&self) -> &str {
        &self.full_name
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolarPanelSortField {
    #[default]
    Price,
    Power,
    PricePerW,
    UpdatedAt,
}

impl SolarPanelSortField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Price => "price",
            Self::Power => "power",
            Self::PricePerW => "price_per_w",
            Self::UpdatedAt => "updated_at",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Price => "Ціна",
            Self::Power => "Потужність",
            Self::PricePerW => "Ціна за Вт",
            Self::UpdatedAt => "Дата оновлення",
        }
    }

    pub fn all() -> &'static [SolarPanelSortField] {
        &[Self::Price, Self::Power, Self::PricePerW, Self::UpdatedAt]
    }

    pub fn parse_or_default(s: &str) -> Self {
        Self::all()
            .iter()
            .copied()
            .find(|f| f.as_str() == s.trim())
            .unwrap_or_default()
    }
}

/// Body of `POST /solar_panels/current_solar_panels`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolarPanelFilters {
    #[serde(deserialize_with = "deserialize_list")]
    pub brand_ids: Vec<i64>,
    #[serde(deserialize_with = "deserialize_list")]
    pub supplier_ids: Vec<i64>,
    #[serde(deserialize_with = "deserialize_list")]
    pub powers: Vec<f64>,
    #[serde(deserialize_with = "deserialize_list")]
    pub panel_types: Vec<String>,
    #[serde(deserialize_with = "deserialize_list")]
    pub cell_types: Vec<String>,
    #[serde(deserialize_with = "deserialize_price_range")]
    pub price_diapason: [u32; 2],
    #[serde(deserialize_with = "deserialize_price_per_w_range")]
    pub price_per_w_diapason: [f64; 2],
    pub page: u32,
    pub page_size: u32,
    pub sort_by: SolarPanelSortField,
    pub sort_order: SortOrder,
}

impl Default for SolarPanelFilters {
    fn default() -> Self {
        Self {
            brand_ids: Vec::new(),
            supplier_ids: Vec::new(),
            powers: Vec::new(),
            panel_types: Vec::new(),
            cell_types: Vec::new(),
            price_diapason: PRICE_BOUNDS,
            price_per_w_diapason: PRICE_PER_W_BOUNDS,
            page: 1,
            page_size: Config::DEFAULT_PAGE_SIZE,
            sort_by: SolarPanelSortField::default(),
            sort_order: SortOrder::default(),
        }
    }
}

impl ListingFilters for SolarPanelFilters {
    fn page(&self) -> u32 {
        self.page
    }

    fn page_size(&self) -> u32 {
        self.page_size
    }

    fn with_page(self, page: u32) -> Self {
        Self { page, ..self }
    }

    fn normalized(self) -> Self {
        Self {
            price_diapason: order_price_range(self.price_diapason),
            price_per_w_diapason: order_range(self.price_per_w_diapason, PRICE_PER_W_BOUNDS),
            page: self.page.max(1),
            page_size: self.page_size.max(1),
            ..self
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SolarPanelFilterDraft {
    pub brand_ids: Vec<i64>,
    pub supplier_ids: Vec<i64>,
    pub powers: String,
    pub panel_types: Vec<String>,
    pub cell_types: Vec<String>,
    pub price_min: String,
    pub price_max: String,
    pub price_per_w_min: String,
    pub price_per_w_max: String,
    pub page_size: String,
    pub sort_by: String,
    pub sort_order: String,
}

impl From<&SolarPanelFilters> for SolarPanelFilterDraft {
    fn from(filters: &SolarPanelFilters) -> Self {
        Self {
            brand_ids: filters.brand_ids.clone(),
            supplier_ids: filters.supplier_ids.clone(),
            powers: filters
                .powers
                .iter()
                .map(|p| format_number(*p))
                .collect::<Vec<_>>()
                .join(", "),
            panel_types: filters.panel_types.clone(),
            cell_types: filters.cell_types.clone(),
            price_min: filters.price_diapason[0].to_string(),
            price_max: filters.price_diapason[1].to_string(),
            price_per_w_min: format_number(filters.price_per_w_diapason[0]),
            price_per_w_max: format_number(filters.price_per_w_diapason[1]),
            page_size: filters.page_size.to_string(),
            sort_by: filters.sort_by.as_str().to_string(),
            sort_order: filters.sort_order.as_str().to_string(),
        }
    }
}

impl Default for SolarPanelFilterDraft {
    fn default() -> Self {
        Self::from(&SolarPanelFilters::default())
    }
}

impl SolarPanelFilterDraft {
    pub fn normalize(&self) -> Result<SolarPanelFilters, AppError> {
        let [price_min, price_max] = filters::parse_range(
            &self.price_min,
            &self.price_max,
            PRICE_BOUNDS.map(f64::from),
            "Ціна",
        )?;
        let price_per_w_diapason = filters::parse_range(
            &self.price_per_w_min,
            &self.price_per_w_max,
            PRICE_PER_W_BOUNDS,
            "Ціна за Вт",
        )?;

        let normalized = SolarPanelFilters {
            brand_ids: self.brand_ids.clone(),
            supplier_ids: self.supplier_ids.clone(),
            powers: filters::parse_number_list(&self.powers, "Потужність")?,
            panel_types: self.panel_types.clone(),
            cell_types: self.cell_types.clone(),
            price_diapason: [filters::to_whole(price_min), filters::to_whole(price_max)],
            price_per_w_diapason,
            page: 1,
            page_size: filters::parse_positive(
                &self.page_size,
                "Розмір сторінки має бути більше 0",
            )?,
            sort_by: SolarPanelSortField::parse_or_default(&self.sort_by),
            sort_order: SortOrder::parse_or_default(&self.sort_order),
        };

        Ok(normalized.first_page())
    }
}

/// Marker for the solar panel endpoint family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SolarPanels;

/// Body of `POST /solar_panels/chart`: the whole row plus the supplier list.
#[derive(Serialize)]
struct SolarPanelChartRequest<'a> {
    #[serde(flatten)]
    row: &'a SolarPanelRow,
    include_suppliers: &'a [String],
}

impl Product for SolarPanels {
    const TYPE: ProductType = ProductType::SolarPanels;

    type Row = SolarPanelRow;
    type Filters = SolarPanelFilters;

    fn chart_request(
        row: &SolarPanelRow,
        include_suppliers: &[String],
    ) -> Result<serde_json::Value, AppError> {
        serde_json::to_value(SolarPanelChartRequest {
            row,
            include_suppliers,
        })
        .map_err(|e| AppError::DataError(format!("Failed to encode chart request: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_row() -> SolarPanelRow {
        serde_json::from_value(json!({
            "id": 3,
            "name": "JA Solar 550",
            "full_name": "JA Solar JAM72S30 550W",
            "brand": "JA Solar",
            "supplier": "Friends Solar",
            "power": 550.0,
            "panel_type": "одностороння",
            "cell_type": "n-type",
            "thickness": 30.0,
            "price": 4400.0,
            "price_per_w": null,
            "updated_at": "2025-02-01",
            "warehouse": "Київ"
        }))
        .unwrap()
    }

    #[test]
    fn test_chart_request_carries_whole_row() {
        let body = SolarPanels::chart_request(&sample_row(), &["A".into(), "B".into()]).unwrap();
        assert_eq!(body["id"], 3);
        assert_eq!(body["power"], 550.0);
        assert_eq!(body["warehouse"], "Київ");
        assert_eq!(body["include_suppliers"], json!(["A", "B"]));
    }

    #[test]
    fn test_effective_price_per_w() {
        assert_eq!(sample_row().effective_price_per_w(), Some(8.0));
    }

    #[test]
    fn test_draft_defaults_normalize_to_defaults() {
        let draft = SolarPanelFilterDraft::default();
        assert_eq!(draft.normalize().unwrap(), SolarPanelFilters::default());
    }

    #[test]
    fn test_normalize_parses_power_list() {
        let draft = SolarPanelFilterDraft {
            powers: "550, 580".to_string(),
            price_per_w_min: "4".to_string(),
            price_per_w_max: "1.5".to_string(),
            ..SolarPanelFilterDraft::default()
        };

        let filters = draft.normalize().unwrap();
        assert_eq!(filters.powers, vec![550.0, 580.0]);
        assert_eq!(filters.price_per_w_diapason, [1.5, 4.0]);
    }
}
