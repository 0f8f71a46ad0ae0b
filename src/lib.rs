//! Geoweather
//!
//! Hourly temperature charts and geohash polygon export for geotagged
//! weather samples.
//!
//! Module organization:
//! - `chart`: `temperature_plot` and chart rendering
//! - `polygons`: `geohash_to_polygon` GeoJSON/CSV export
//! - `config`: chart configuration resolved from properties
//! - `properties`: property registry with defaults (chart_properties.json)
//! - `table`: polars CSV and column helpers

pub mod chart;
pub mod config;
pub mod polygons;
pub mod properties;
pub mod table;

pub use chart::{temperature_plot, ChartError, TemperatureChart, TemperatureSeries};
pub use config::ChartConfig;
pub use polygons::{geohash_to_polygon, ExportError, ExportOptions};
