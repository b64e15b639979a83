//! Integration tests for `DashboardClient`.
//!
//! Each test stands up a local `wiremock` server, so no real backend is
//! contacted. Covered: endpoint paths and bodies per product, degraded
//! reference data, FastAPI error details, multipart uploads and the
//! client-side checks that must fire before any request is sent.
#![cfg(not(target_arch = "wasm32"))]

use serde_json::json;
use wiremock::matchers::{
    body_partial_json, body_string_contains, header, header_regex, method, path,
};
use wiremock::{Mock, MockServer, ResponseTemplate};

use price_monitor_dashboard::models::{
    Batteries, ProductType, SolarPanels,
    battery::{BatteryFilters, BatteryRow},
    chart::ChartPayload,
    error::AppError,
    solar_panel::{SolarPanelFilters, SolarPanelRow},
    upload::{ReportFile, TextReport},
};
use price_monitor_dashboard::services::api::{ApiConfig, DashboardClient};

/// Builds a client pointed at the mock server.
fn test_client(server: &MockServer) -> DashboardClient {
    let config = ApiConfig::builder().base_url(server.uri()).build();
    DashboardClient::with_config(config).expect("failed to build test DashboardClient")
}

fn battery_rows(count: i64) -> Vec<serde_json::Value> {
    (1..=count)
        .map(|id| {
            json!({
                "id": id,
                "name": format!("Varta {id}"),
                "full_name": format!("Varta Blue Dynamic {id}"),
                "brand": "Varta",
                "supplier": "MAKB",
                "volume": 60.0,
                "c_amps": 540,
                "polarity": "R+",
                "region": "EUROPE",
                "electrolyte": "LAB",
                "price": 3899.0,
                "updated_at": "2025-03-01"
            })
        })
        .collect()
}

fn solar_row() -> SolarPanelRow {
    serde_json::from_value(json!({
        "id": 3,
        "name": "JA Solar 550",
        "full_name": "JA Solar JAM72S30 550W",
        "power": 550.0,
        "price": 4400.0
    }))
    .unwrap()
}

// ---------------------------------------------------------------------------
// Reference data
// ---------------------------------------------------------------------------

#[tokio::test]
async fn brands_are_read_from_the_product_endpoint() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/batteries/brands"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "brands": [{"id": 1, "name": "Varta"}, {"id": 2, "name": "Bosch"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let brands = test_client(&server).brands(ProductType::Batteries).await;

    assert_eq!(brands.len(), 2);
    assert_eq!(brands[1].name, "Bosch");
}

#[tokio::test]
async fn brands_failure_degrades_to_empty_list() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/solar_panels/brands"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&server)
        .await;

    let client = test_client(&server);
    assert!(client.brands(ProductType::SolarPanels).await.is_empty());

    let err = client
        .try_brands(ProductType::SolarPanels)
        .await
        .expect_err("expected the raw accessor to fail");
    assert!(matches!(err, AppError::HttpStatus { status: 500, .. }));
}

#[tokio::test]
async fn malformed_suppliers_degrade_to_empty_list() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/batteries/suppliers"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let suppliers = test_client(&server).suppliers(ProductType::Batteries).await;
    assert!(suppliers.is_empty());
}

// ---------------------------------------------------------------------------
// Listings
// ---------------------------------------------------------------------------

#[tokio::test]
async fn listing_returns_rows_and_total_pages() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/batteries/current_batteries"))
        .and(body_partial_json(json!({
            "brand_ids": [],
            "price_diapason": [0, 10000],
            "page": 1,
            "page_size": 10
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "batteries": battery_rows(10),
            "total_pages": 3
        })))
        .expect(1)
        .mount(&server)
        .await;

    let page = test_client(&server)
        .listing::<Batteries>(&BatteryFilters::default())
        .await
        .expect("listing should succeed");

    assert_eq!(page.rows.len(), 10);
    assert_eq!(page.total_pages, 3);
    let first: &BatteryRow = &page.rows[0];
    assert_eq!(first.c_amps, Some(540));
}

#[tokio::test]
async fn listing_normalizes_filters_before_sending() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/solar_panels/current_solar_panels"))
        .and(body_partial_json(json!({
            "price_diapason": [100, 9000],
            "price_per_w_diapason": [0.5, 2.0],
            "page": 1,
            "page_size": 1
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sollar_panels": [],
            "total_pages": 0
        })))
        .expect(1)
        .mount(&server)
        .await;

    let filters = SolarPanelFilters {
        price_diapason: [9000, 100],
        price_per_w_diapason: [2.0, 0.5],
        page: 0,
        page_size: 0,
        ..SolarPanelFilters::default()
    };

    let page = test_client(&server)
        .listing::<SolarPanels>(&filters)
        .await
        .expect("listing should succeed");

    assert!(page.rows.is_empty());
    assert_eq!(page.total_pages, 1);
}

#[tokio::test]
async fn listing_without_rows_field_is_a_data_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/batteries/current_batteries"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"total_pages": 2})))
        .mount(&server)
        .await;

    let result = test_client(&server)
        .listing::<Batteries>(&BatteryFilters::default())
        .await;

    assert!(matches!(result, Err(AppError::DataError(_))), "got: {result:?}");
}

// ---------------------------------------------------------------------------
// Charts and analytics
// ---------------------------------------------------------------------------

#[tokio::test]
async fn solar_chart_without_datapoints_is_no_data() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/solar_panels/chart"))
        .and(body_partial_json(json!({
            "id": 3,
            "include_suppliers": ["A", "B"]
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"chart": "{\"datasets\": []}"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let chart = test_client(&server)
        .chart::<SolarPanels>(&solar_row(), &["A".to_string(), "B".to_string()])
        .await
        .expect("chart should succeed");

    assert_eq!(chart, None);
}

#[tokio::test]
async fn solar_chart_for_unselected_suppliers_is_no_data() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/solar_panels/chart"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "chart": "{\"datasets\": [{\"date\": \"2025-01-02\", \"suppliers\": {\"C\": 4300.0}}]}"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let chart = test_client(&server)
        .chart::<SolarPanels>(&solar_row(), &["A".to_string(), "B".to_string()])
        .await
        .expect("chart should succeed");

    assert_eq!(chart, None);
}

#[tokio::test]
async fn battery_chart_is_an_image() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/batteries/chart"))
        .and(body_partial_json(json!({"region": "EUROPE", "include_suppliers": ["MAKB"]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"chart": "iVBORw0KGgo="})))
        .mount(&server)
        .await;

    let row: BatteryRow = serde_json::from_value(battery_rows(1).remove(0)).unwrap();
    let row = BatteryRow { region: None, ..row };

    let chart = test_client(&server)
        .chart::<Batteries>(&row, &["MAKB".to_string()])
        .await
        .expect("chart should succeed");

    assert_eq!(chart, Some(ChartPayload::Image("iVBORw0KGgo=".to_string())));
}

#[tokio::test]
async fn chart_without_suppliers_is_rejected_locally() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let result = test_client(&server)
        .chart::<SolarPanels>(&solar_row(), &[])
        .await;

    assert!(matches!(result, Err(AppError::ValidationError(_))));
}

#[tokio::test]
async fn analytics_sends_rows_under_product_key() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/batteries/analytics"))
        .and(body_partial_json(json!({"comment": "Фокус на AGM"})))
        .and(body_string_contains("\"batteries\":["))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"analytics": "## Огляд\nВисока ціна"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let rows: Vec<BatteryRow> = battery_rows(2)
        .into_iter()
        .map(|r| serde_json::from_value(r).unwrap())
        .collect();

    let text = test_client(&server)
        .analytics::<Batteries>(&rows, "Фокус на AGM")
        .await
        .expect("analytics should succeed");

    assert!(text.contains("Висока ціна"));
}

#[tokio::test]
async fn analytics_without_rows_is_rejected_locally() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let result = test_client(&server).analytics::<Batteries>(&[], "").await;
    assert!(matches!(result, Err(AppError::ValidationError(_))));
}

#[tokio::test]
async fn price_comparison_returns_text() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/solar_panels/price_comparison"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"price_comparison": "Ми дешевші на 5%"})),
        )
        .mount(&server)
        .await;

    let text = test_client(&server)
        .price_comparison(ProductType::SolarPanels)
        .await
        .expect("comparison should succeed");

    assert_eq!(text, "Ми дешевші на 5%");
}

// ---------------------------------------------------------------------------
// Uploads and parsers
// ---------------------------------------------------------------------------

#[tokio::test]
async fn report_file_is_sent_as_multipart() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/upload_batteries/ai_upload/upload_reports"))
        .and(header_regex("content-type", "^multipart/form-data"))
        .and(body_string_contains("name=\"file\""))
        .and(body_string_contains("prices.xlsx"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"detail": "Imported 12 rows"})))
        .expect(1)
        .mount(&server)
        .await;

    let file = ReportFile {
        name: "prices.xlsx".to_string(),
        bytes: b"PK\x03\x04 fake workbook".to_vec(),
    };

    let ack = test_client(&server)
        .upload_report(ProductType::Batteries, file)
        .await
        .expect("upload should succeed");

    assert_eq!(ack.detail.as_deref(), Some("Imported 12 rows"));
}

#[tokio::test]
async fn wrong_extension_is_rejected_before_upload() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let file = ReportFile {
        name: "prices.txt".to_string(),
        bytes: b"Varta 60Ah 3899".to_vec(),
    };

    let result = test_client(&server)
        .upload_report(ProductType::Batteries, file)
        .await;

    match result {
        Err(AppError::ValidationError(msg)) => assert!(msg.contains("XLSX")),
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn empty_file_is_rejected_before_upload() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let file = ReportFile {
        name: "prices.xlsx".to_string(),
        bytes: Vec::new(),
    };

    let result = test_client(&server)
        .upload_report(ProductType::Batteries, file)
        .await;

    assert_eq!(
        result,
        Err(AppError::ValidationError("Файл порожній".to_string()))
    );
}

#[tokio::test]
async fn blank_text_report_is_rejected_before_upload() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let report = TextReport {
        text: "   ".to_string(),
        supplier_name: "MAKB".to_string(),
    };

    let result = test_client(&server)
        .upload_report_text(ProductType::SolarPanels, &report)
        .await;

    assert!(matches!(result, Err(AppError::ValidationError(_))));
}

#[tokio::test]
async fn upload_error_detail_is_surfaced() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/upload_solar_panels/ai_upload/upload_reports_text"))
        .and(body_partial_json(json!({"supplier_name": "Friends Solar"})))
        .respond_with(
            ResponseTemplate::new(422).set_body_json(json!({"detail": "Не знайдено жодної ціни"})),
        )
        .mount(&server)
        .await;

    let report = TextReport::new("JA Solar 550W", "Friends Solar").unwrap();
    let err = test_client(&server)
        .upload_report_text(ProductType::SolarPanels, &report)
        .await
        .expect_err("expected the backend to refuse the text");

    assert_eq!(err.user_message(), "Не знайдено жодної ціни");
    assert!(matches!(err, AppError::HttpStatus { status: 422, .. }));
}

#[tokio::test]
async fn parsers_post_to_ai_upload_endpoints() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/upload_batteries/ai_upload/parse_competitor"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "started"})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/upload_batteries/ai_upload/parse_me"))
        .respond_with(ResponseTemplate::new(200).set_body_string("\"queued\""))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);

    let competitor = client
        .parse_competitor(ProductType::Batteries)
        .await
        .expect("competitor parser should start");
    assert_eq!(competitor.detail, None);
    assert_eq!(competitor.extra["status"], "started");

    let own = client
        .parse_own_prices(ProductType::Batteries)
        .await
        .expect("own-price parser should start");
    assert_eq!(own.detail.as_deref(), Some("queued"));
}

#[tokio::test]
async fn unreachable_backend_is_a_network_error() {
    let config = ApiConfig::builder().base_url("http://127.0.0.1:9").build();
    let client = DashboardClient::with_config(config).unwrap();

    let result = client.price_comparison(ProductType::Batteries).await;
    assert!(matches!(result, Err(AppError::NetworkError(_))), "got: {result:?}");
}
