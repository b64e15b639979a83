use serde_json::Value;
use std::collections::BTreeMap;
use std::rc::Rc;

use super::{datetime, error::AppError};

/// How a product's chart endpoint encodes its answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartEncoding {
    /// Base64 PNG rendered by the backend
    Image,
    /// Dated prices per supplier, drawn in the browser
    Series,
}

/// Prices of each supplier on one date.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesPoint {
    pub date: String,
    pub prices: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChartPayload {
    /// Base64-encoded PNG bytes
    Image(String),
    Series(Vec<SeriesPoint>),
}

impl ChartPayload {
    /// Decodes the `chart` field of a chart response.
    ///
    /// Returns `Ok(None)` when the backend has nothing to draw for the
    /// selection: a missing or blank image, or a series without points.
    pub fn decode(encoding: ChartEncoding, raw: Option<Value>) -> Result<Option<Self>, AppError> {
        let Some(raw) = raw.filter(|v| !v.is_null()) else {
            return Ok(None);
        };

        match encoding {
            ChartEncoding::Image => decode_image(raw),
            ChartEncoding::Series => decode_series(raw),
        }
    }

    /// `src` for an `<img>` element showing an image payload.
    pub fn data_url(&self) -> Option<String> {
        match self {
            Self::Image(base64) => Some(format!("data:image/png;base64,{base64}")),
            Self::Series(_) => None,
        }
    }

    /// Whether any of `suppliers` has a price to draw. Images are drawn by
    /// the backend and always count.
    pub fn has_prices_for(&self, suppliers: &[String]) -> bool {
        match self {
            Self::Image(_) => true,
            Self::Series(points) => points.iter().any(|p| {
                suppliers
                    .iter()
                    .any(|s| p.prices.get(s).is_some_and(|price| price.is_finite()))
            }),
        }
    }

    /// Category labels and one value column per supplier, in supplier order.
    /// Dates without a price for a supplier hold `NaN`, which the chart
    /// serializes as `null` and draws as a gap.
    pub fn series_data(&self, suppliers: &[String]) -> (Vec<String>, Vec<(String, Vec<f64>)>) {
        let Self::Series(points) = self else {
            return (Vec::new(), Vec::new());
        };

        let dates = points.iter().map(|p| p.date.clone()).collect();
        let columns = suppliers
            .iter()
            .map(|supplier| {
                let values = points
                    .iter()
                    .map(|p| p.prices.get(supplier).copied().unwrap_or(f64::NAN))
                    .collect();
                (supplier.clone(), values)
            })
            .collect();

        (dates, columns)
    }
}

fn decode_image(raw: Value) -> Result<Option<ChartPayload>, AppError> {
    let Value::String(s) = raw else {
        return Err(AppError::DataError("Chart image is not a string".to_string()));
    };

    let trimmed = s.trim();
    let body = trimmed
        .split_once("base64,")
        .map_or(trimmed, |(_, data)| data);

    if body.is_empty() {
        return Ok(None);
    }

    let is_base64 = body
        .bytes()
        .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'+' | b'/' | b'=' | b'\n' | b'\r'));
    if !is_base64 {
        return Err(AppError::DataError("Chart image is not base64".to_string()));
    }

    Ok(Some(ChartPayload::Image(body.to_string())))
}

fn decode_series(raw: Value) -> Result<Option<ChartPayload>, AppError> {
    // The backend double-encodes the series as a JSON string.
    let raw = match raw {
        Value::String(s) if s.trim().is_empty() => return Ok(None),
        Value::String(s) => serde_json::from_str(&s)
            .map_err(|e| AppError::DataError(format!("Failed to parse chart series: {e}")))?,
        other => other,
    };

    let entries = match raw {
        Value::Object(mut map) => match map.remove("datasets") {
            Some(Value::Array(entries)) => entries,
            Some(Value::Null) | None => Vec::new(),
            Some(_) => return Err(AppError::DataError("'datasets' is not a list".to_string())),
        },
        Value::Array(entries) => entries,
        _ => return Err(AppError::DataError("Unexpected chart series shape".to_string())),
    };

    let mut points = entries
        .into_iter()
        .map(series_point)
        .collect::<Result<Vec<_>, _>>()?;
    points.retain(|p| !p.prices.is_empty());

    Ok((!points.is_empty()).then_some(ChartPayload::Series(points)))
}

/// Accepts `{date, suppliers: {name: price}}` as well as the flat
/// `{date, <name>: price}` form.
fn series_point(entry: Value) -> Result<SeriesPoint, AppError> {
    let Value::Object(mut map) = entry else {
        return Err(AppError::DataError("Chart point is not an object".to_string()));
    };

    let date = match map.remove("date") {
        Some(Value::String(s)) => datetime::parse_flexible(&s)
            .map_or(s, |dt| datetime::display_date(&dt)),
        Some(other) => other.to_string(),
        None => return Err(AppError::DataError("Chart point has no date".to_string())),
    };

    let prices_source = match map.remove("suppliers") {
        Some(Value::Object(suppliers)) => suppliers,
        _ => map,
    };

    let prices = prices_source
        .into_iter()
        .filter_map(|(name, value)| value.as_f64().map(|price| (name, price)))
        .collect();

    Ok(SeriesPoint { date, prices })
}

/// Row plus suppliers the user asked to compare on a chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSelection<R> {
    pub row: R,
    pub suppliers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChartState {
    Loading,
    Ready(Rc<ChartPayload>),
    /// The backend has no history for the selection
    NoData,
    Error(String),
}

impl ChartState {
    pub fn from_result(result: Result<Option<ChartPayload>, AppError>) -> Self {
        match result {
            Ok(Some(payload)) => Self::Ready(Rc::new(payload)),
            Ok(None) => Self::NoData,
            Err(e) => Self::Error(e.describe("Помилка при завантаженні даних графіка")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_image_decoding() {
        let payload = ChartPayload::decode(ChartEncoding::Image, Some(json!("iVBORw0KGgo=")))
            .unwrap()
            .unwrap();
        assert_eq!(
            payload.data_url().unwrap(),
            "data:image/png;base64,iVBORw0KGgo="
        );
    }

    #[test]
    fn test_blank_image_is_no_data() {
        assert_eq!(ChartPayload::decode(ChartEncoding::Image, Some(json!("  "))).unwrap(), None);
        assert_eq!(ChartPayload::decode(ChartEncoding::Image, None).unwrap(), None);
        assert_eq!(ChartPayload::decode(ChartEncoding::Image, Some(Value::Null)).unwrap(), None);
    }

    #[test]
    fn test_image_rejects_non_base64() {
        let result = ChartPayload::decode(ChartEncoding::Image, Some(json!("<html>oops</html>")));
        assert!(matches!(result, Err(AppError::DataError(_))));
    }

    #[test]
    fn test_series_from_json_string() {
        let raw = json!(r#"{"datasets":[{"date":"2025-01-02","suppliers":{"A":100.0,"B":110.5}}]}"#);
        let payload = ChartPayload::decode(ChartEncoding::Series, Some(raw)).unwrap().unwrap();

        let ChartPayload::Series(points) = &payload else {
            panic!("expected series");
        };
        assert_eq!(points[0].date, "02.01.2025");
        assert_eq!(points[0].prices["B"], 110.5);
    }

    #[test]
    fn test_series_from_flat_points() {
        let raw = json!([{"date": "2025-01-02", "A": 100}, {"date": "2025-01-03", "B": 90}]);
        let payload = ChartPayload::decode(ChartEncoding::Series, Some(raw)).unwrap().unwrap();

        let (dates, columns) = payload.series_data(&["A".to_string(), "B".to_string()]);
        assert_eq!(dates.len(), 2);
        assert_eq!(columns[0].1[0], 100.0);
        assert!(columns[0].1[1].is_nan());
        assert_eq!(columns[1].1[1], 90.0);
    }

    #[test]
    fn test_empty_series_is_no_data() {
        let raw = json!(r#"{"datasets": []}"#);
        assert_eq!(ChartPayload::decode(ChartEncoding::Series, Some(raw)).unwrap(), None);
    }

    #[test]
    fn test_points_without_prices_are_dropped() {
        let raw = json!(r#"{"datasets":[{"date":"2025-01-02","suppliers":{}},{"date":"2025-01-03","suppliers":{}}]}"#);
        assert_eq!(ChartPayload::decode(ChartEncoding::Series, Some(raw)).unwrap(), None);

        let raw = json!([{"date": "2025-01-02"}, {"date": "2025-01-03", "A": 95}]);
        let ChartPayload::Series(points) =
            ChartPayload::decode(ChartEncoding::Series, Some(raw)).unwrap().unwrap()
        else {
            panic!("expected series");
        };
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].date, "03.01.2025");
    }

    #[test]
    fn test_prices_only_for_other_suppliers() {
        let raw = json!([{"date": "2025-01-02", "C": 100}]);
        let payload = ChartPayload::decode(ChartEncoding::Series, Some(raw)).unwrap().unwrap();

        assert!(!payload.has_prices_for(&["A".to_string(), "B".to_string()]));
        assert!(payload.has_prices_for(&["C".to_string()]));
        assert!(ChartPayload::Image("iVBORw0KGgo=".to_string()).has_prices_for(&[]));
    }

    #[test]
    fn test_chart_state_from_result() {
        assert_eq!(ChartState::from_result(Ok(None)), ChartState::NoData);
        assert!(matches!(
            ChartState::from_result(Err(AppError::NetworkError("down".into()))),
            ChartState::Error(_)
        ));
    }
}
