//! Hourly temperature chart
//!
//! Structure:
//! - `series.rs`: array-like inputs and 24-hour densification
//! - `units.rs`: Celsius/Fahrenheit axis conversion
//! - `palettes.rs`: colormaps for the density scatter
//! - `plot.rs`: `temperature_plot` and the `TemperatureChart` handle
//! - `render.rs`: PNG/SVG output through plotters
//! - `fonts.rs`: runtime font registration
//! - `error.rs`: Error types

pub mod error;
pub mod fonts;
pub mod palettes;
pub mod plot;
pub mod render;
pub mod series;
pub mod units;

pub use error::{ChartError, Result};
pub use plot::{temperature_plot, LayerKind, TemperatureChart};
pub use series::{ArrayLike, SampleColumns, TemperatureSeries};
pub use units::TemperatureUnit;
