pub mod use_action;
pub mod use_chart;
pub mod use_listing;
pub mod use_navigation;
pub mod use_reference_data;
