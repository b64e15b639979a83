use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::fmt::Debug;

use super::{
    chart::ChartEncoding,
    error::AppError,
    listing::{ListingFilters, ListingRow},
};

/// Product families the pricing backend tracks.
/// Each family has its own endpoint family and filter schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductType {
    #[default]
    Batteries,
    SolarPanels,
}

impl ProductType {
    /// Path segment used in API URLs (`/{slug}/...`, `/upload_{slug}/...`).
    pub fn slug(&self) -> &'static str {
        match self {
            Self::Batteries => "batteries",
            Self::SolarPanels => "solar_panels",
        }
    }

    /// Field holding the rows in listing responses and analytics requests.
    pub fn rows_key(&self) -> &'static str {
        self.slug()
    }

    /// Older backends spelled the solar panel rows key differently.
    pub fn legacy_rows_key(&self) -> Option<&'static str> {
        match self {
            Self::Batteries => None,
            Self::SolarPanels => Some("sollar_panels"),
        }
    }

    /// How the chart endpoint encodes its payload for this product.
    pub fn chart_encoding(&self) -> ChartEncoding {
        match self {
            Self::Batteries => ChartEncoding::Image,
            Self::SolarPanels => ChartEncoding::Series,
        }
    }

    /// File extensions the report upload endpoint accepts (lowercase).
    pub fn accepted_report_extensions(&self) -> &'static [&'static str] {
        match self {
            Self::Batteries => &["xls", "xlsx"],
            Self::SolarPanels => &["xlsx", "xls", "csv", "txt", "pdf"],
        }
    }

    /// Value for the `accept` attribute of a file input.
    pub fn accept_attribute(&self) -> String {
        self.accepted_report_extensions()
            .iter()
            .map(|ext| format!(".{ext}"))
            .collect::<Vec<_>>()
            .join(",")
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Batteries => "Акумулятори",
            Self::SolarPanels => "Сонячні панелі",
        }
    }

    pub fn all() -> &'static [ProductType] {
        &[Self::Batteries, Self::SolarPanels]
    }
}

impl std::fmt::Display for ProductType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.slug())
    }
}

impl std::str::FromStr for ProductType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "batteries" => Ok(Self::Batteries),
            "solar_panels" | "sollar_panels" => Ok(Self::SolarPanels),
            _ => Err(AppError::ConfigError(format!("Invalid product type: {s}"))),
        }
    }
}

/// Compile-time binding between a product family and its data shapes.
pub trait Product: Clone + Copy + PartialEq + Default + Debug + 'static {
    const TYPE: ProductType;

    type Row: ListingRow + Serialize + DeserializeOwned + Clone + PartialEq + Debug + 'static;
    type Filters: ListingFilters;

    /// Body for the chart endpoint: the row's identifying fields plus the
    /// suppliers whose history should be drawn.
    fn chart_request(
        row: &Self::Row,
        include_suppliers: &[String],
    ) -> Result<serde_json::Value, AppError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_parsing() {
        assert_eq!("batteries".parse::<ProductType>().unwrap(), ProductType::Batteries);
        assert_eq!("Solar_Panels".parse::<ProductType>().unwrap(), ProductType::SolarPanels);
        assert_eq!("sollar_panels".parse::<ProductType>().unwrap(), ProductType::SolarPanels);
        assert!("inverters".parse::<ProductType>().is_err());
    }

    #[test]
    fn test_accept_attribute() {
        assert_eq!(ProductType::Batteries.accept_attribute(), ".xls,.xlsx");
        assert!(ProductType::SolarPanels.accept_attribute().contains(".pdf"));
    }

    #[test]
    fn test_chart_encoding_by_product() {
        assert_eq!(ProductType::Batteries.chart_encoding(), ChartEncoding::Image);
        assert_eq!(ProductType::SolarPanels.chart_encoding(), ChartEncoding::Series);
    }
}
