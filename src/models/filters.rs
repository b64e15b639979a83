//! Shared pieces of the per-product filter schemas: sort order, numeric
//! ranges and the helpers that turn form input into wire values.

use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;

use super::error::AppError;

/// Bounds of the price slider, in UAH.
pub const PRICE_BOUNDS: [u32; 2] = [0, 10_000];

/// Bounds of the price-per-watt slider, in UAH/W.
pub const PRICE_PER_W_BOUNDS: [f64; 2] = [0.0, 5.0];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Asc => "За зростанням",
            Self::Desc => "За спаданням",
        }
    }

    pub fn all() -> &'static [SortOrder] {
        &[Self::Asc, Self::Desc]
    }

    /// Unknown values fall back to the default order.
    pub fn parse_or_default(s: &str) -> Self {
        match s.trim() {
            "asc" => Self::Asc,
            "desc" => Self::Desc,
            _ => Self::default(),
        }
    }
}

/// Select options as `(value, label)` pairs.
pub type FacetOptions = &'static [(&'static str, &'static str)];

/// Splits a comma-separated input such as `"60, 75,90"` into numbers.
///
/// Blank tokens are skipped; anything unparsable is a validation error
/// naming the offending field.
pub fn parse_number_list<T: FromStr>(input: &str, field: &str) -> Result<Vec<T>, AppError> {
    input
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| {
            token.parse::<T>().map_err(|_| {
                AppError::ValidationError(format!("Некоректне значення «{token}» у полі «{field}»"))
            })
        })
        .collect()
}

/// Parses a positive integer such as the page size.
pub fn parse_positive(input: &str, message: &str) -> Result<u32, AppError> {
    match input.trim().parse::<u32>() {
        Ok(n) if n >= 1 => Ok(n),
        _ => Err(AppError::ValidationError(message.to_string())),
    }
}

/// Turns a pair of range inputs into an ordered range inside `bounds`.
/// Blank inputs take the corresponding bound.
pub fn parse_range(min: &str, max: &str, bounds: [f64; 2], field: &str) -> Result<[f64; 2], AppError> {
    let parse = |input: &str, fallback: f64| -> Result<f64, AppError> {
        let input = input.trim();
        if input.is_empty() {
            return Ok(fallback);
        }
        input
            .replace(',', ".")
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| {
                AppError::ValidationError(format!("Некоректне значення «{input}» у полі «{field}»"))
            })
    };

    Ok(order_range([parse(min, bounds[0])?, parse(max, bounds[1])?], bounds))
}

/// Orders a range and clamps both ends into `bounds`.
pub fn order_range(range: [f64; 2], bounds: [f64; 2]) -> [f64; 2] {
    let [a, b] = range.map(|v| v.clamp(bounds[0], bounds[1]));
    if a <= b { [a, b] } else { [b, a] }
}

pub fn order_price_range(range: [u32; 2]) -> [u32; 2] {
    let [lo, hi] = order_range(range.map(f64::from), PRICE_BOUNDS.map(f64::from));
    [to_whole(lo), to_whole(hi)]
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn to_whole(value: f64) -> u32 {
    value.round().max(0.0) as u32
}

/// A value that may arrive as a JSON number or a numeric string.
#[derive(Deserialize)]
#[serde(untagged)]
enum NumberLike {
    Number(f64),
    Text(String),
}

impl NumberLike {
    fn value(&self) -> Option<f64> {
        let value = match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse::<f64>().ok(),
        };
        value.filter(|v| v.is_finite())
    }
}

fn lenient_pair<'de, D>(deserializer: D) -> Result<Option<[f64; 2]>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Vec<NumberLike>> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|values| match values.as_slice() {
        [a, b] => Some([a.value()?, b.value()?]),
        _ => None,
    }))
}

/// `price_diapason`: numbers or numeric strings; anything else takes the
/// slider bounds.
pub fn deserialize_price_range<'de, D>(deserializer: D) -> Result<[u32; 2], D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_pair(deserializer)?.map_or(PRICE_BOUNDS, |pair| pair.map(to_whole)))
}

/// `price_per_w_diapason`: same leniency as the price range.
pub fn deserialize_price_per_w_range<'de, D>(deserializer: D) -> Result<[f64; 2], D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_pair(deserializer)?.unwrap_or(PRICE_PER_W_BOUNDS))
}

/// Array facets: `null` becomes an empty list.
pub fn deserialize_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Formats a number for a form input without a trailing `.0`.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}
