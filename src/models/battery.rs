use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{
    datetime,
    error::AppError,
    filters::{
        self, FacetOptions, PRICE_BOUNDS, SortOrder, deserialize_list, deserialize_price_range,
        format_number, order_price_range,
    },
    listing::{ListingFilters, ListingRow},
    product::{Product, ProductType},
};
use crate::config::Config;

/// Region sent with chart requests when a row has none.
pub const DEFAULT_REGION: &str = "EUROPE";

pub const POLARITY_OPTIONS: FacetOptions = &[("R+", "R+"), ("L+", "L+"), ("all", "Всі")];

pub const REGION_OPTIONS: FacetOptions = &[("ASIA", "Азія"), ("EUROPE", "Європа")];

pub const ELECTROLYTE_OPTIONS: FacetOptions =
    &[("LAB", "LAB"), ("GEL", "GEL"), ("AGM", "AGM"), ("EFB", "EFB")];

/// A battery offer from one supplier, as returned by the listing endpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BatteryRow {
    pub id: i64,
    pub name: String,
    pub full_name: String,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub supplier: Option<String>,
    pub volume: f64,
    #[serde(default)]
    pub c_amps: Option<i64>,
    #[serde(default)]
    pub polarity: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub electrolyte: Option<String>,
    pub price: f64,
    #[serde(default, with = "datetime::optional")]
    pub updated_at: Option<DateTime<Utc>>,
    /// Fields this client does not model, echoed back in analytics requests
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ListingRow for BatteryRow {
    fn id(&self) -> i64 {
        self.id
    }

    fn title(&self) -> &str {
        &self.full_name
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatterySortField {
    #[default]
    Price,
    CAmps,
    Volume,
    Region,
}

impl BatterySortField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Price => "price",
            Self::CAmps => "c_amps",
            Self::Volume => "volume",
            Self::Region => "region",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Price => "Ціна",
            Self::CAmps => "Пусковий струм",
            Self::Volume => "Об'єм",
            Self::Region => "Регіон",
        }
    }

    pub fn all() -> &'static [BatterySortField] {
        &[Self::Price, Self::CAmps, Self::Volume, Self::Region]
    }

    /// Unknown values fall back to sorting by price.
    pub fn parse_or_default(s: &str) -> Self {
        Self::all()
            .iter()
            .copied()
            .find(|f| f.as_str() == s.trim())
            .unwrap_or_default()
    }
}

/// Body of `POST /batteries/current_batteries`.
///
/// Missing or `null` facets deserialize as empty lists and a malformed
/// price range as the slider bounds, so the serialized form always has the
/// shape the backend validates against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatteryFilters {
    #[serde(deserialize_with = "deserialize_list")]
    pub brand_ids: Vec<i64>,
    #[serde(deserialize_with = "deserialize_list")]
    pub supplier_ids: Vec<i64>,
    #[serde(deserialize_with = "deserialize_list")]
    pub volumes: Vec<f64>,
    #[serde(deserialize_with = "deserialize_list")]
    pub c_amps: Vec<i64>,
    #[serde(deserialize_with = "deserialize_list")]
    pub polarities: Vec<String>,
    #[serde(deserialize_with = "deserialize_list")]
    pub regions: Vec<String>,
    #[serde(deserialize_with = "deserialize_list")]
    pub electrolytes: Vec<String>,
    #[serde(deserialize_with = "deserialize_price_range")]
    pub price_diapason: [u32; 2],
    pub page: u32,
    pub page_size: u32,
    pub sort_by: BatterySortField,
    pub sort_order: SortOrder,
}

impl Default for BatteryFilters {
    fn default() -> Self {
        Self {
            brand_ids: Vec::new(),
            supplier_ids: Vec::new(),
            volumes: Vec::new(),
            c_amps: Vec::new(),
            polarities: Vec::new(),
            regions: Vec::new(),
            electrolytes: Vec::new(),
            price_diapason: PRICE_BOUNDS,
            page: 1,
            page_size: Config::DEFAULT_PAGE_SIZE,
            sort_by: BatterySortField::default(),
            sort_order: SortOrder::default(),
        }
    }
}

impl ListingFilters for BatteryFilters {
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
            page: self.page.max(1),
            page_size: self.page_size.max(1),
            ..self
        }
    }
}

/// Editable state of the battery filter form. Numeric inputs stay as text
/// until the form is submitted.
#[derive(Debug, Clone, PartialEq)]
pub struct BatteryFilterDraft {
    pub brand_ids: Vec<i64>,
    pub supplier_ids: Vec<i64>,
    pub volumes: String,
    pub c_amps: String,
    pub polarities: Vec<String>,
    pub regions: Vec<String>,
    pub electrolytes: Vec<String>,
    pub price_min: String,
    pub price_max: String,
    pub page_size: String,
    pub sort_by: String,
    pub sort_order: String,
}

impl From<&BatteryFilters> for BatteryFilterDraft {
    fn from(filters: &BatteryFilters) -> Self {
        let join = |values: Vec<String>| values.join(", ");
        Self {
            brand_ids: filters.brand_ids.clone(),
            supplier_ids: filters.supplier_ids.clone(),
            volumes: join(filters.volumes.iter().map(|v| format_number(*v)).collect()),
            c_amps: join(filters.c_amps.iter().map(ToString::to_string).collect()),
            polarities: filters.polarities.clone(),
            regions: filters.regions.clone(),
            electrolytes: filters.electrolytes.clone(),
            price_min: filters.price_diapason[0].to_string(),
            price_max: filters.price_diapason[1].to_string(),
            page_size: filters.page_size.to_string(),
            sort_by: filters.sort_by.as_str().to_string(),
            sort_order: filters.sort_order.as_str().to_string(),
        }
    }
}

impl Default for BatteryFilterDraft {
    fn default() -> Self {
        Self::from(&BatteryFilters::default())
    }
}

impl BatteryFilterDraft {
    /// Converts the form into wire filters for a fresh search (page 1).
    pub fn normalize(&self) -> Result<BatteryFilters, AppError> {
        let [price_min, price_max] = filters::parse_range(
            &self.price_min,
            &self.price_max,
            PRICE_BOUNDS.map(f64::from),
            "Ціна",
        )?;

        let normalized = BatteryFilters {
            brand_ids: self.brand_ids.clone(),
            supplier_ids: self.supplier_ids.clone(),
            volumes: filters::parse_number_list(&self.volumes, "Об'єм акумулятора")?,
            c_amps: filters::parse_number_list(&self.c_amps, "Пусковий струм")?,
            polarities: self.polarities.clone(),
            regions: self.regions.clone(),
            electrolytes: self.electrolytes.clone(),
            price_diapason: [filters::to_whole(price_min), filters::to_whole(price_max)],
            page: 1,
            page_size: filters::parse_positive(
                &self.page_size,
                "Розмір сторінки має бути більше 0",
            )?,
            sort_by: BatterySortField::parse_or_default(&self.sort_by),
            sort_order: SortOrder::parse_or_default(&self.sort_order),
        };

        Ok(normalized.first_page())
    }
}

/// Marker for the battery endpoint family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Batteries;

/// Body of `POST /batteries/chart`.
#[derive(Serialize)]
struct BatteryChartRequest<'a> {
    name: &'a str,
    full_name: &'a str,
    brand: &'a str,
    volume: f64,
    c_amps: i64,
    polarity: &'a str,
    region: &'a str,
    include_suppliers: &'a [String],
}

impl Product for Batteries {
    const TYPE: ProductType = ProductType::Batteries;

    type Row = BatteryRow;
    type Filters = BatteryFilters;

    fn chart_request(
        row: &BatteryRow,
        include_suppliers: &[String],
    ) -> Result<serde_json::Value, AppError> {
        let request = BatteryChartRequest {
            name: &row.name,
            full_name: &row.full_name,
            brand: row.brand.as_deref().unwrap_or_default(),
            volume: row.volume,
            c_amps: row.c_amps.unwrap_or_default(),
            polarity: row.polarity.as_deref().unwrap_or_default(),
            region: row
                .region
                .as_deref()
                .filter(|r| !r.is_empty())
                .unwrap_or(DEFAULT_REGION),
            include_suppliers,
        };

        serde_json::to_value(request)
            .map_err(|e| AppError::DataError(format!("Failed to encode chart request: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_row() -> BatteryRow {
        serde_json::from_value(json!({
            "id": 7,
            "name": "Varta Blue 60",
            "full_name": "Varta Blue Dynamic 60Ah 540A R+",
            "brand": "Varta",
            "supplier": "MAKB",
            "volume": 60.0,
            "c_amps": 540,
            "polarity": "R+",
            "region": null,
            "electrolyte": "LAB",
            "price": 3899.0,
            "updated_at": "2025-02-01T10:00:00"
        }))
        .unwrap()
    }

    #[test]
    fn test_chart_request_defaults_region() {
        let body = Batteries::chart_request(&sample_row(), &["MAKB".to_string()]).unwrap();
        assert_eq!(body["region"], "EUROPE");
        assert_eq!(body["c_amps"], 540);
        assert_eq!(body["include_suppliers"], json!(["MAKB"]));
        assert!(body.get("id").is_none());
    }

    #[test]
    fn test_sort_field_fallback() {
        assert_eq!(BatterySortField::parse_or_default("c_amps"), BatterySortField::CAmps);
        assert_eq!(BatterySortField::parse_or_default("colour"), BatterySortField::Price);
    }

    #[test]
    fn test_draft_round_trips_defaults() {
        let draft = BatteryFilterDraft::default();
        assert_eq!(draft.normalize().unwrap(), BatteryFilters::default());
    }

    #[test]
    fn test_normalized_orders_price_range() {
        let filters = BatteryFilters {
            price_diapason: [8000, 200],
            page: 0,
            page_size: 0,
            ..BatteryFilters::default()
        }
        .normalized();

        assert_eq!(filters.price_diapason, [200, 8000]);
        assert_eq!(filters.page, 1);
        assert_eq!(filters.page_size, 1);
    }
}
