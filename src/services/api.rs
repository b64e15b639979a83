use crate::config::Config;
use crate::models::{
    chart::ChartPayload,
    error::AppError,
    listing::{ListingFilters, Page},
    product::{Product, ProductType},
    reference::{Brand, Supplier},
    upload::{ActionAck, ReportFile, TextReport},
};
use reqwest::{Method, header};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;

// API CONFIGURATION
/// Configuration for the pricing backend client.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    base_url: String,
}

impl ApiConfig {
    /// Creates a builder for constructing an `ApiConfig`.
    pub fn builder() -> ApiConfigBuilder {
        ApiConfigBuilder::default()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn brands_url(&self, product: ProductType) -> String {
        self.product_url(product, "brands")
    }

    pub fn suppliers_url(&self, product: ProductType) -> String {
        self.product_url(product, "suppliers")
    }

    /// `/{product}/current_{product}`
    pub fn listing_url(&self, product: ProductType) -> String {
        self.product_url(product, &format!("current_{}", product.slug()))
    }

    pub fn analytics_url(&self, product: ProductType) -> String {
        self.product_url(product, "analytics")
    }

    pub fn chart_url(&self, product: ProductType) -> String {
        self.product_url(product, "chart")
    }

    pub fn price_comparison_url(&self, product: ProductType) -> String {
        self.product_url(product, "price_comparison")
    }

    pub fn upload_reports_url(&self, product: ProductType) -> String {
        self.ai_upload_url(product, "upload_reports")
    }

    pub fn upload_reports_text_url(&self, product: ProductType) -> String {
        self.ai_upload_url(product, "upload_reports_text")
    }

    pub fn parse_competitor_url(&self, product: ProductType) -> String {
        self.ai_upload_url(product, "parse_competitor")
    }

    pub fn parse_me_url(&self, product: ProductType) -> String {
        self.ai_upload_url(product, "parse_me")
    }

    fn product_url(&self, product: ProductType, endpoint: &str) -> String {
        format!("{}/{}/{endpoint}", self.base_url, product.slug())
    }

    fn ai_upload_url(&self, product: ProductType, endpoint: &str) -> String {
        format!(
            "{}/upload_{}/ai_upload/{endpoint}",
            self.base_url,
            product.slug()
        )
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfigBuilder::default().build()
    }
}

// API CONFIGURATION BUILDER
/// Builder for constructing an `ApiConfig` with custom settings.
#[derive(Debug, Default)]
pub struct ApiConfigBuilder {
    base_url: Option<String>,
}

impl ApiConfigBuilder {
    /// Sets a custom base URL (primarily for testing).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Builds the `ApiConfig`. A trailing slash on the base URL is dropped.
    pub fn build(self) -> ApiConfig {
        let base_url = self
            .base_url
            .unwrap_or_else(|| Config::api_url().to_string());

        ApiConfig {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

// API RESPONSE TYPES
#[derive(Deserialize, Debug)]
struct BrandsResponse {
    #[serde(default)]
    brands: Vec<Brand>,
}

#[derive(Deserialize, Debug)]
struct SuppliersResponse {
    #[serde(default)]
    suppliers: Vec<Supplier>,
}

#[derive(Deserialize, Debug)]
struct AnalyticsResponse {
    analytics: Option<String>,
}

#[derive(Deserialize, Debug)]
struct PriceComparisonResponse {
    price_comparison: Option<String>,
}

#[derive(Deserialize, Debug)]
struct ChartResponse {
    #[serde(default)]
    chart: Option<Value>,
}

#[derive(Serialize)]
struct AnalyticsRequest<'a, R> {
    #[serde(flatten)]
    rows: std::collections::BTreeMap<&'static str, &'a [R]>,
    comment: &'a str,
}

// DASHBOARD CLIENT
/// HTTP client for the pricing backend.
#[derive(Debug, Clone)]
pub struct DashboardClient {
    http: reqwest::Client,
    config: ApiConfig,
}

impl DashboardClient {
    /// Creates a new client with default configuration.
    pub fn new() -> Result<Self, AppError> {
        Self::with_config(ApiConfig::default())
    }

    /// Creates a new client with the specified configuration.
    pub fn with_config(config: ApiConfig) -> Result<Self, AppError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| AppError::ConfigError(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { http, config })
    }

    /// Returns a reference to the client's configuration.
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    // REFERENCE DATA
    /// Fetches the brand list, propagating failures.
    pub async fn try_brands(&self, product: ProductType) -> Result<Vec<Brand>, AppError> {
        let response: BrandsResponse = self
            .send_json(self.http.get(self.config.brands_url(product)))
            .await?;
        Ok(response.brands)
    }

    /// Fetches the supplier list, propagating failures.
    pub async fn try_suppliers(&self, product: ProductType) -> Result<Vec<Supplier>, AppError> {
        let response: SuppliersResponse = self
            .send_json(self.http.get(self.config.suppliers_url(product)))
            .await?;
        Ok(response.suppliers)
    }

    /// Brand list for the filter forms; any failure yields an empty list.
    pub async fn brands(&self, product: ProductType) -> Vec<Brand> {
        self.try_brands(product)
            .await
            .unwrap_or_else(|e| degraded("brands", &e))
    }

    /// Supplier list for the forms and pickers; any failure yields an empty list.
    pub async fn suppliers(&self, product: ProductType) -> Vec<Supplier> {
        self.try_suppliers(product)
            .await
            .unwrap_or_else(|e| degraded("suppliers", &e))
    }

    // LISTINGS
    /// Fetches one page of a filtered listing.
    ///
    /// The filters are normalized again before sending, so callers may pass
    /// values straight from state.
    pub async fn listing<P: Product>(&self, filters: &P::Filters) -> Result<Page<P::Row>, AppError> {
        let filters = filters.clone().normalized();
        let body: Value = self
            .send_json(
                self.http
                    .post(self.config.listing_url(P::TYPE))
                    .json(&filters),
            )
            .await?;

        Page::from_response(P::TYPE, body)
    }

    // ANALYTICS & CHARTS
    /// Asks the backend for an analytics report on the displayed rows.
    pub async fn analytics<P: Product>(
        &self,
        rows: &[P::Row],
        comment: &str,
    ) -> Result<String, AppError> {
        if rows.is_empty() {
            return Err(AppError::ValidationError(
                "Немає даних для аналізу".to_string(),
            ));
        }

        let request = AnalyticsRequest {
            rows: std::iter::once((P::TYPE.rows_key(), rows)).collect(),
            comment,
        };
        let response: AnalyticsResponse = self
            .send_json(
                self.http
                    .post(self.config.analytics_url(P::TYPE))
                    .json(&request),
            )
            .await?;

        response
            .analytics
            .ok_or_else(|| AppError::DataError("Response has no 'analytics' field".to_string()))
    }

    /// Price history of one row for the chosen suppliers.
    ///
    /// `Ok(None)` means the backend has no history to draw for the chosen
    /// suppliers.
    pub async fn chart<P: Product>(
        &self,
        row: &P::Row,
        suppliers: &[String],
    ) -> Result<Option<ChartPayload>, AppError> {
        if suppliers.is_empty() {
            return Err(AppError::ValidationError(
                "Будь ласка, виберіть хоча б одного постачальника".to_string(),
            ));
        }

        let body = P::chart_request(row, suppliers)?;
        let response: ChartResponse = self
            .send_json(self.http.post(self.config.chart_url(P::TYPE)).json(&body))
            .await?;

        let payload = ChartPayload::decode(P::TYPE.chart_encoding(), response.chart)?;
        Ok(payload.filter(|p| p.has_prices_for(suppliers)))
    }

    pub async fn price_comparison(&self, product: ProductType) -> Result<String, AppError> {
        let response: PriceComparisonResponse = self
            .send_json(self.http.get(self.config.price_comparison_url(product)))
            .await?;

        response.price_comparison.ok_or_else(|| {
            AppError::DataError("Response has no 'price_comparison' field".to_string())
        })
    }

    // UPLOADS & PARSERS
    /// Uploads a price report file as multipart field `file`.
    pub async fn upload_report(
        &self,
        product: ProductType,
        file: ReportFile,
    ) -> Result<ActionAck, AppError> {
        let ReportFile { name, bytes } = file;
        crate::models::upload::validate_report_file_name(product, Some(&name))?;
        crate::models::upload::validate_report_bytes(&bytes)?;

        let part = reqwest::multipart::Part::bytes(bytes).file_name(name);
        let form = reqwest::multipart::Form::new().part("file", part);

        self.send_ack(
            self.http
                .post(self.config.upload_reports_url(product))
                .multipart(form),
        )
        .await
    }

    /// Uploads pasted report text attributed to a supplier.
    pub async fn upload_report_text(
        &self,
        product: ProductType,
        report: &TextReport,
    ) -> Result<ActionAck, AppError> {
        let report = TextReport::new(&report.text, &report.supplier_name)?;
        self.send_ack(
            self.http
                .post(self.config.upload_reports_text_url(product))
                .json(&report),
        )
        .await
    }

    /// Starts the competitor price parser.
    pub async fn parse_competitor(&self, product: ProductType) -> Result<ActionAck, AppError> {
        self.trigger(Method::POST, self.config.parse_competitor_url(product))
            .await
    }

    /// Starts the parser for the shop's own prices.
    pub async fn parse_own_prices(&self, product: ProductType) -> Result<ActionAck, AppError> {
        self.trigger(Method::POST, self.config.parse_me_url(product))
            .await
    }

    async fn trigger(&self, method: Method, url: String) -> Result<ActionAck, AppError> {
        self.send_ack(self.http.request(method, url)).await
    }

    /// Executes a request whose answer only acknowledges the action.
    async fn send_ack(&self, request: reqwest::RequestBuilder) -> Result<ActionAck, AppError> {
        let response = self.send(request).await?;
        let text = response
            .text()
            .await
            .map_err(|e| AppError::DataError(format!("Failed to read response: {e}")))?;

        let value = serde_json::from_str(&text).unwrap_or(Value::String(text));
        Ok(ActionAck::from_value(value))
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, AppError> {
        self.send(request)
            .await?
            .json()
            .await
            .map_err(|e| AppError::DataError(format!("Failed to parse response: {e}")))
    }

    /// Executes a single request, turning non-2xx answers into errors.
    async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response, AppError> {
        let response = request.send().await.map_err(|e| self.classify_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(self.error_for_status(status, &body));
        }

        Ok(response)
    }

    /// Converts a reqwest error into an appropriate AppError.
    fn classify_error(&self, error: reqwest::Error) -> AppError {
        if error.is_timeout() {
            AppError::NetworkError(format!("Request timeout: {error}"))
        } else if error.is_request() {
            AppError::NetworkError(format!("Request error: {error}"))
        } else if error.is_builder() {
            AppError::ConfigError(format!("Invalid request: {error}"))
        } else {
            AppError::NetworkError(format!("Network error: {error}"))
        }
    }

    /// Creates an error from a non-2xx answer, keeping FastAPI's `detail`.
    fn error_for_status(&self, status: reqwest::StatusCode, body: &str) -> AppError {
        let message = match status.as_u16() {
            400..=499 => format!("Client error: {body}"),
            500..=599 => format!("Server error: {body}"),
            _ => format!("Unexpected status: {body}"),
        };

        AppError::HttpStatus {
            status: status.as_u16(),
            message,
            detail: error_detail(body),
        }
    }
}

/// Extracts `detail` from an error body: either a plain string or the
/// first `msg` of a validation error list.
pub fn error_detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    let detail = match value.get("detail")? {
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .find_map(|item| item.get("msg").and_then(Value::as_str))?
            .to_string(),
        _ => return None,
    };

    let detail = detail.trim();
    (!detail.is_empty()).then(|| detail.to_string())
}

fn degraded<T>(what: &str, error: &AppError) -> Vec<T> {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::warn_1(&format!("Failed to load {what}: {error}").into());
    #[cfg(not(target_arch = "wasm32"))]
    let _ = (what, error);

    Vec::new()
}

// CONVENIENCE FUNCTIONS
/// Fetches a listing page using default configuration.
pub async fn fetch_listing<P: Product>(filters: &P::Filters) -> Result<Page<P::Row>, AppError> {
    DashboardClient::new()?.listing::<P>(filters).await
}

/// Fetches a chart using default configuration.
pub async fn fetch_chart<P: Product>(
    row: &P::Row,
    suppliers: &[String],
) -> Result<Option<ChartPayload>, AppError> {
    DashboardClient::new()?.chart::<P>(row, suppliers).await
}
