/// Configuration constants for the application
pub struct Config;

impl Config {
    /// Backend used when no `API_URL` was set at build time
    pub const DEFAULT_API_URL: &'static str = "http://127.0.0.1:8000";

    /// Rows per page requested on first load
    pub const DEFAULT_PAGE_SIZE: u32 = 10;

    /// Page sizes offered by the filter forms
    pub const PAGE_SIZE_OPTIONS: [u32; 4] = [10, 20, 50, 100];

    /// How long success notifications stay visible (4 seconds)
    pub const NOTIFICATION_TIMEOUT_MS: u32 = 4_000;

    /// Base URL of the pricing backend, baked in at compile time.
    pub fn api_url() -> &'static str {
        option_env!("API_URL").unwrap_or(Self::DEFAULT_API_URL)
    }
}
