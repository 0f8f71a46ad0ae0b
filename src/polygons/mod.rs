//! Geohash bounding boxes to GeoJSON polygons
//!
//! Structure:
//! - `export.rs`: `geohash_to_polygon` and the row-to-feature transformation
//! - `geojson.rs`: serde model of the emitted FeatureCollection
//! - `error.rs`: Error types

pub mod error;
pub mod export;
pub mod geojson;

use polars::prelude::DataFrame;
use std::path::Path;

pub use error::{ExportError, Result};
pub use export::{
    build_feature_collection, geohash_to_polygon, magnitude_table, write_feature_collection,
    ExportOptions, CORNER_COLUMNS,
};
pub use geojson::{Feature, FeatureCollection, Geometry};

/// Load a bounding-box table from CSV
pub fn read_bounding_boxes(path: &Path) -> Result<DataFrame> {
    Ok(crate::table::read_csv(path)?)
}
