//! Geohash bounding-box table to GeoJSON polygons and magnitude CSV

use polars::prelude::*;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::error::{ExportError, Result};
use super::geojson::{Feature, FeatureCollection, FeatureProperties, Geometry, Position};
use crate::table;

/// Corner columns in the order they are read
pub const CORNER_COLUMNS: [&str; 8] = [
    "sw_lon", "sw_lat", "se_lat", "se_lon", "ne_lat", "ne_lon", "nw_lat", "nw_lon",
];

/// Header of the index column in the magnitude CSV
pub const INDEX_COLUMN: &str = "id";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportOptions {
    /// Repeat the southwest corner at the end of the ring. `false` writes the
    /// bare sw, se, ne, nw ring.
    pub close_ring: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self { close_ring: true }
    }
}

/// Corner coordinates of every row, in table order
struct Corners {
    sw_lon: Vec<f64>,
    sw_lat: Vec<f64>,
    se_lat: Vec<f64>,
    se_lon: Vec<f64>,
    ne_lat: Vec<f64>,
    ne_lon: Vec<f64>,
    nw_lat: Vec<f64>,
    nw_lon: Vec<f64>,
}

impl Corners {
    fn read(df: &DataFrame) -> PolarsResult<Self> {
        Ok(Self {
            sw_lon: table::column_f64_or_nan(df, "sw_lon")?,
            sw_lat: table::column_f64_or_nan(df, "sw_lat")?,
            se_lat: table::column_f64_or_nan(df, "se_lat")?,
            se_lon: table::column_f64_or_nan(df, "se_lon")?,
            ne_lat: table::column_f64_or_nan(df, "ne_lat")?,
            ne_lon: table::column_f64_or_nan(df, "ne_lon")?,
            nw_lat: table::column_f64_or_nan(df, "nw_lat")?,
            nw_lon: table::column_f64_or_nan(df, "nw_lon")?,
        })
    }

    /// sw, se, ne, nw ring of one row
    fn ring(&self, row: usize, close: bool) -> Vec<Position> {
        let mut ring = vec![
            [self.sw_lon[row], self.sw_lat[row]],
            [self.se_lon[row], self.se_lat[row]],
            [self.ne_lon[row], self.ne_lat[row]],
            [self.nw_lon[row], self.nw_lat[row]],
        ];
        if close {
            ring.push(ring[0]);
        }
        ring
    }
}

/// Build one Polygon feature per row, `id` = row position
pub fn build_feature_collection(
    df: &DataFrame,
    mag_col_name: &str,
    options: &ExportOptions,
) -> Result<FeatureCollection> {
    let corners = Corners::read(df)?;
    let magnitudes = df.column(mag_col_name)?;

    let mut features = Vec::with_capacity(df.height());
    for row in 0..df.height() {
        features.push(Feature {
            properties: FeatureProperties {
                temperature: magnitude_json(magnitudes.get(row)?),
            },
            id: row,
            geometry: Geometry::Polygon(vec![corners.ring(row, options.close_ring)]),
        });
    }

    Ok(FeatureCollection::new(features))
}

/// Two-column table: `id` index and the magnitude column
pub fn magnitude_table(df: &DataFrame, mag_col_name: &str) -> Result<DataFrame> {
    let ids: Vec<u32> = (0..df.height() as u32).collect();
    let id_column = Column::new(INDEX_COLUMN.into(), ids);
    let magnitude = df.column(mag_col_name)?.clone();
    Ok(DataFrame::new(vec![id_column, magnitude])?)
}

/// Serialize a FeatureCollection as UTF-8 JSON, overwriting `path`
pub fn write_feature_collection(collection: &FeatureCollection, path: &Path) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer(&mut writer, collection)?;
    writer.flush()?;
    Ok(())
}

/// Write the polygon GeoJSON and the magnitude CSV for a bounding-box table
///
/// Every parameter is required; if any is `None` nothing is written and
/// `ExportError::MissingParameter` is returned. Table and I/O failures are
/// passed through unchanged; a failure after the JSON file is written leaves
/// it in place.
pub fn geohash_to_polygon(
    df: Option<&DataFrame>,
    mag_col_name: Option<&str>,
    fileout_json: Option<&Path>,
    fileout_csv: Option<&Path>,
    options: &ExportOptions,
) -> Result<()> {
    let (Some(df), Some(mag_col_name), Some(fileout_json), Some(fileout_csv)) =
        (df, mag_col_name, fileout_json, fileout_csv)
    else {
        return Err(ExportError::MissingParameter);
    };

    let collection = build_feature_collection(df, mag_col_name, options)?;
    write_feature_collection(&collection, fileout_json)?;

    let mut magnitudes = magnitude_table(df, mag_col_name)?;
    table::write_csv(&mut magnitudes, fileout_csv)?;

    log::info!(
        "Exported {} polygons to {} and {}",
        collection.len(),
        fileout_json.display(),
        fileout_csv.display()
    );
    Ok(())
}

/// Magnitude cell as JSON: integers stay integers, NaN and null become null
fn magnitude_json(value: AnyValue) -> serde_json::Value {
    use serde_json::Value;

    let float = |v: f64| {
        serde_json::Number::from_f64(v)
            .map(Value::Number)
            .unwrap_or(Value::Null)
    };

    match value {
        AnyValue::Null => Value::Null,
        AnyValue::Boolean(b) => Value::Bool(b),
        AnyValue::Int8(v) => v.into(),
        AnyValue::Int16(v) => v.into(),
        AnyValue::Int32(v) => v.into(),
        AnyValue::Int64(v) => v.into(),
        AnyValue::UInt8(v) => v.into(),
        AnyValue::UInt16(v) => v.into(),
        AnyValue::UInt32(v) => v.into(),
        AnyValue::UInt64(v) => v.into(),
        AnyValue::Float32(v) => float(v as f64),
        AnyValue::Float64(v) => float(v),
        AnyValue::String(s) => Value::String(s.to_string()),
        AnyValue::StringOwned(s) => Value::String(s.to_string()),
        other => Value::String(other.to_string()),
    }
}
