//! The capability tools the model can call.

mod geocode;
mod search;
mod weather;

pub use geocode::GeocodeTool;
pub use search::SearchTool;
pub use weather::WeatherTool;
