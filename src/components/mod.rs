pub mod analytics_panel;
pub mod battery_filter_form;
pub mod battery_table;
pub mod chart_panel;
pub mod dashboard;
pub mod form_fields;
pub mod formatted_report;
pub mod notice;
pub mod pagination;
pub mod parser_buttons;
pub mod price_comparison;
pub mod product_selector;
pub mod report_uploader;
pub mod reports;
pub mod solar_panel_filter_form;
pub mod solar_panel_table;
pub mod status;
pub mod supplier_picker;
pub mod text_report_uploader;

pub use dashboard::Dashboard;
pub use product_selector::ProductSelector;
pub use reports::Reports;
