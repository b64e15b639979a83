pub mod battery;
pub mod chart;
pub mod datetime;
pub mod error;
pub mod filters;
pub mod listing;
pub mod product;
pub mod reference;
pub mod report;
pub mod solar_panel;
pub mod upload;

pub use battery::Batteries;
pub use product::{Product, ProductType};
pub use solar_panel::SolarPanels;
